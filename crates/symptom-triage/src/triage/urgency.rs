use serde::Serialize;

use super::domain::Urgency;

/// Display metadata for an urgency level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct UrgencyConfig {
    pub color: &'static str,
    pub description: &'static str,
}

pub const fn urgency_config(urgency: Urgency) -> UrgencyConfig {
    match urgency {
        Urgency::Low => UrgencyConfig {
            color: "green",
            description: "Minor concern. Self-care and monitoring at home are usually sufficient.",
        },
        Urgency::Medium => UrgencyConfig {
            color: "yellow",
            description: "Moderate concern. Arrange a consultation with a healthcare provider within a few days.",
        },
        Urgency::High => UrgencyConfig {
            color: "orange",
            description: "Serious concern. See a doctor within 24 hours.",
        },
        Urgency::Emergency => UrgencyConfig {
            color: "red",
            description: "Potentially life-threatening. Seek emergency medical care immediately.",
        },
    }
}

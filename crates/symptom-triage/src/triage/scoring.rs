use std::cmp::Reverse;

use super::domain::{RuleMatch, TriageRule};
use super::matcher::MatchResult;

/// Matched rule with its confidence, in ranked position.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedMatch<'r> {
    pub rule: &'r TriageRule,
    pub confidence: u8,
    pub matched: Vec<&'static str>,
}

impl RankedMatch<'_> {
    pub fn to_rule_match(&self) -> RuleMatch {
        RuleMatch {
            rule_id: self.rule.id.to_string(),
            name: self.rule.name.to_string(),
            urgency: self.rule.urgency,
            confidence: self.confidence,
            matched_symptoms: self.matched.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// `round(100 * matched / required)`, half rounding up, clamped to 0..=100.
pub fn confidence(matched: usize, required: usize) -> u8 {
    if required == 0 {
        return 0;
    }
    let matched = matched.min(required);
    let percent = (200 * matched + required) / (2 * required);
    percent.min(100) as u8
}

/// Drops zero-overlap results, then orders by urgency and confidence, both descending.
/// The sort is stable, so equal keys keep rule-table order.
pub fn rank<'r>(matches: Vec<MatchResult<'r>>) -> Vec<RankedMatch<'r>> {
    let mut ranked: Vec<RankedMatch<'r>> = matches
        .into_iter()
        .filter(|result| result.matched_count() > 0)
        .map(|result| RankedMatch {
            rule: result.rule,
            confidence: confidence(result.matched_count(), result.required_count),
            matched: result.matched,
        })
        .collect();

    ranked.sort_by_key(|entry| (Reverse(entry.rule.urgency), Reverse(entry.confidence)));
    ranked
}

use crate::infra::parse_urgency;
use chrono::Local;
use clap::Args;
use symptom_triage::config::{AppConfig, TelemetryConfig};
use symptom_triage::error::AppError;
use symptom_triage::telemetry;
use symptom_triage::triage::{
    urgency_config, AnalysisReport, AnalysisRequest, TriageEngine, TriageRule, TriageService,
    Urgency,
};
use tracing::debug;

#[derive(Args, Debug)]
pub(crate) struct AnalyzeArgs {
    /// Symptoms to analyze; quote multi-word symptoms ("Chest pain")
    #[arg(required = true)]
    pub(crate) symptoms: Vec<String>,
    /// Print the full report as JSON instead of a summary
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct RulesArgs {
    /// Only list rules with this urgency (low, medium, high, emergency)
    #[arg(long, value_parser = parse_urgency)]
    pub(crate) urgency: Option<Urgency>,
}

#[derive(Args, Debug)]
pub(crate) struct UrgencyArgs {
    /// Urgency level to describe (low, medium, high, emergency)
    #[arg(value_parser = parse_urgency)]
    pub(crate) level: Urgency,
}

fn init_cli_logging(config: &TelemetryConfig) {
    if let Err(err) = telemetry::init_cli(config) {
        eprintln!("logging disabled: {err}");
    }
}

pub(crate) fn run_analyze(args: AnalyzeArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    init_cli_logging(&config.telemetry);

    let AnalyzeArgs { symptoms, json } = args;
    let service = TriageService::new(TriageEngine::standard(), config.limits);
    let report = service.analyze(&AnalysisRequest { symptoms })?;
    debug!(urgency = %report.result.urgency, "cli analysis complete");

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        render_analysis(&report);
    }

    Ok(())
}

pub(crate) fn run_rules(args: RulesArgs) -> Result<(), AppError> {
    let service = TriageService::default();
    let rules: Vec<&TriageRule> = service
        .engine()
        .table()
        .rules()
        .iter()
        .filter(|rule| args.urgency.map_or(true, |level| rule.urgency == level))
        .collect();

    if rules.is_empty() {
        println!("No triage rules match the requested urgency");
        return Ok(());
    }

    for rule in rules {
        render_rule(rule);
    }

    Ok(())
}

pub(crate) fn run_urgency(args: UrgencyArgs) -> Result<(), AppError> {
    let config = urgency_config(args.level);
    println!("{} ({})", args.level.label(), config.color);
    println!("{}", config.description);
    Ok(())
}

fn render_analysis(report: &AnalysisReport) {
    let result = &report.result;

    println!("Symptom triage");
    println!(
        "Reported: {} (analyzed {})",
        result.selected_symptoms.join(", "),
        report
            .analyzed_at
            .with_timezone(&Local)
            .format("%Y-%m-%d %H:%M")
    );
    println!(
        "Urgency: {} [{}], confidence {}%",
        result.urgency.label(),
        report.urgency_display.color,
        result.confidence
    );
    println!("\n{}", result.final_advice);

    if result.matched_rules.is_empty() {
        println!("\nMatched conditions: none");
    } else {
        println!("\nMatched conditions");
        for matched in &result.matched_rules {
            println!(
                "- {} ({}, {}%): {}",
                matched.name,
                matched.urgency.label(),
                matched.confidence,
                matched.matched_symptoms.join(", ")
            );
        }
    }

    println!("\nRecommended actions");
    for action in &result.recommended_actions {
        println!("- [{}] {}", action.kind.label(), action.description);
    }

    if !result.specialist_referrals.is_empty() {
        let specialties: Vec<&str> = result
            .specialist_referrals
            .iter()
            .map(|referral| referral.specialty.as_str())
            .collect();
        println!("\nSpecialists: {}", specialties.join(", "));
    }

    match result.follow_up_days {
        Some(days) if result.follow_up_required => {
            println!("\nFollow-up: recommended within {days} day(s)")
        }
        _ => println!("\nFollow-up: not required"),
    }

    println!("\n{}", report.disclaimer);
}

fn render_rule(rule: &TriageRule) {
    let follow_up = match rule.follow_up {
        Some(policy) if policy.required => format!("follow-up {} day(s)", policy.days),
        _ => "no follow-up".to_string(),
    };
    println!(
        "- {} | {} | {} | {}",
        rule.id,
        rule.name,
        rule.urgency.label(),
        follow_up
    );
    println!("    symptoms: {}", rule.required_symptoms.join(", "));
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::{Mutex, OnceLock};
    use symptom_triage::triage::TriageInputError;

    fn env_guard() -> &'static Mutex<()> {
        static GUARD: OnceLock<Mutex<()>> = OnceLock::new();
        GUARD.get_or_init(|| Mutex::new(()))
    }

    fn analyze_args(symptoms: &[&str]) -> AnalyzeArgs {
        AnalyzeArgs {
            symptoms: symptoms.iter().map(|symptom| symptom.to_string()).collect(),
            json: true,
        }
    }

    #[test]
    fn analyze_honours_configured_symptom_limit() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        env::set_var("TRIAGE_MAX_SYMPTOMS", "2");

        let result = run_analyze(analyze_args(&["Fever", "Cough", "Sore throat"]));
        env::remove_var("TRIAGE_MAX_SYMPTOMS");

        match result {
            Err(AppError::InvalidInput(TriageInputError::TooManySymptoms { count, limit })) => {
                assert_eq!(count, 3);
                assert_eq!(limit, 2);
            }
            other => panic!("expected symptom limit rejection, got {other:?}"),
        }
    }

    #[test]
    fn analyze_accepts_requests_within_configured_limits() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        env::remove_var("TRIAGE_MAX_SYMPTOMS");
        env::remove_var("TRIAGE_MAX_SYMPTOM_LENGTH");

        let result = run_analyze(analyze_args(&["Chest pain"]));

        assert!(result.is_ok(), "analysis failed: {result:?}");
    }

    #[test]
    fn analyze_surfaces_invalid_limit_configuration() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        env::set_var("TRIAGE_MAX_SYMPTOM_LENGTH", "none");

        let result = run_analyze(analyze_args(&["Fever"]));
        env::remove_var("TRIAGE_MAX_SYMPTOM_LENGTH");

        assert!(matches!(result, Err(AppError::Config(_))));
    }
}

use crate::commands::{run_analyze, run_rules, run_urgency, AnalyzeArgs, RulesArgs, UrgencyArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use symptom_triage::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Symptom Triage",
    about = "Serve or query the rule-based symptom triage engine from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Analyze a list of symptoms and print the triage outcome
    Analyze(AnalyzeArgs),
    /// List the triage rules, optionally filtered by urgency
    Rules(RulesArgs),
    /// Show display metadata for an urgency level
    Urgency(UrgencyArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Analyze(args) => run_analyze(args),
        Command::Rules(args) => run_rules(args),
        Command::Urgency(args) => run_urgency(args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_serve_without_subcommand() {
        let cli = Cli::try_parse_from(["symptom-triage"]).expect("parses");
        assert!(cli.command.is_none());
    }

    #[test]
    fn parses_analyze_symptoms_with_spaces() {
        let cli = Cli::try_parse_from([
            "symptom-triage",
            "analyze",
            "Chest pain",
            "Shortness of breath",
            "--json",
        ])
        .expect("parses");
        match cli.command {
            Some(Command::Analyze(args)) => {
                assert_eq!(args.symptoms, vec!["Chest pain", "Shortness of breath"]);
                assert!(args.json);
            }
            other => panic!("expected analyze command, got {other:?}"),
        }
    }

    #[test]
    fn rejects_unknown_urgency_filter() {
        let result = Cli::try_parse_from(["symptom-triage", "rules", "--urgency", "critical"]);
        assert!(result.is_err());
    }
}

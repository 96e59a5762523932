use crate::cli::{parse_args_from, Config, ParseOutcome};
use crate::domain::{CodeSource, ReviewCommand};
use clap_complete::Shell;
use common::domain::{AnalysisId, ModelName, ProviderName};
use std::path::PathBuf;

fn config(args: &[&str]) -> Config {
    match parse_args_from(args).unwrap() {
        ParseOutcome::Config(c) => c,
        other => panic!("expected Config, got {:?}", other),
    }
}

#[test]
fn test_no_args_is_help() {
    assert_eq!(config(&["review"]), Config::default());
    assert_eq!(config(&["review", "-h"]).command, ReviewCommand::Help);
}

#[test]
fn test_analyze_file() {
    let c = config(&["review", "analyze", "src/app.js"]);
    assert_eq!(
        c.command,
        ReviewCommand::Analyze {
            source: CodeSource::File(PathBuf::from("src/app.js")),
            save: true,
        }
    );
}

#[test]
fn test_analyze_stdin_variants() {
    let stdin = ReviewCommand::Analyze {
        source: CodeSource::Stdin,
        save: true,
    };
    assert_eq!(config(&["review", "analyze"]).command, stdin);
    assert_eq!(config(&["review", "analyze", "-"]).command, stdin);
}

#[test]
fn test_analyze_example_no_save() {
    let c = config(&["review", "analyze", "--example", "--no-save"]);
    assert_eq!(
        c.command,
        ReviewCommand::Analyze {
            source: CodeSource::Example,
            save: false,
        }
    );
}

#[test]
fn test_analyze_example_conflicts_with_file() {
    let err = parse_args_from(&["review", "analyze", "--example", "a.js"]).unwrap_err();
    assert_eq!(err.exit_code(), 64);
}

#[test]
fn test_global_options() {
    let c = config(&[
        "review", "analyze", "a.js", "--json", "-v", "-p", "echo", "-m", "gemini-1.5-pro",
    ]);
    assert!(c.json);
    assert!(c.verbose);
    assert_eq!(c.profile, Some(ProviderName::new("echo")));
    assert_eq!(c.model, Some(ModelName::new("gemini-1.5-pro")));
}

#[test]
fn test_history_subcommands() {
    assert_eq!(
        config(&["review", "history", "list"]).command,
        ReviewCommand::HistoryList
    );
    assert_eq!(
        config(&["review", "history", "show", "analysis_1_abc"]).command,
        ReviewCommand::HistoryShow {
            id: AnalysisId::new("analysis_1_abc")
        }
    );
    assert_eq!(
        config(&["review", "history", "delete", "analysis_1_abc"]).command,
        ReviewCommand::HistoryDelete {
            id: AnalysisId::new("analysis_1_abc")
        }
    );
    assert_eq!(
        config(&["review", "history", "clear"]).command,
        ReviewCommand::HistoryClear { confirmed: false }
    );
    assert_eq!(
        config(&["review", "history", "clear", "--yes"]).command,
        ReviewCommand::HistoryClear { confirmed: true }
    );
}

#[test]
fn test_history_requires_subcommand_and_id() {
    assert!(parse_args_from(&["review", "history"]).is_err());
    let err = parse_args_from(&["review", "history", "show"]).unwrap_err();
    assert!(err.is_usage());
}

#[test]
fn test_check() {
    let c = config(&["review", "check"]);
    assert_eq!(c.command, ReviewCommand::Check);
    assert_eq!(c.command.name(), "check");
}

#[test]
fn test_subcommand_help_is_displayed() {
    match parse_args_from(&["review", "analyze", "--help"]).unwrap() {
        ParseOutcome::DisplayHelp(text) => assert!(text.contains("--no-save")),
        other => panic!("expected DisplayHelp, got {:?}", other),
    }
}

#[test]
fn test_generate_completion() {
    match parse_args_from(&["review", "--generate", "bash"]).unwrap() {
        ParseOutcome::GenerateCompletion(shell) => assert_eq!(shell, Shell::Bash),
        other => panic!("expected GenerateCompletion, got {:?}", other),
    }
}

#[test]
fn test_unknown_subcommand() {
    let err = parse_args_from(&["review", "lint"]).unwrap_err();
    assert_eq!(err.exit_code(), 64);
}

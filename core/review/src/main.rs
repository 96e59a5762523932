mod adapter;
mod cli;
mod domain;
mod ports;
mod usecase;
mod wiring;

#[cfg(test)]
mod tests;

use std::process;

use adapter::presenter::{format_history_list, format_result, format_saved, AnalyzeReport};
use cli::{parse_args, print_completion, Config, ParseOutcome};
use common::error::Error;
use common::ports::outbound::{LogLevel, LogRecord};
use domain::ReviewCommand;
use ports::inbound::UseCaseRunner;
use usecase::{AnalysisOutcome, ClearOutcome};
use wiring::{wire_app, App};

/// 履歴への保存だけが失敗した（解析結果は出力済み）
const EXIT_SAVE_FAILED: i32 = 74;
/// 接続確認に失敗した
const EXIT_UNAVAILABLE: i32 = 69;

/// Command をディスパッチする Runner（match は main レイヤーに集約）
struct Runner {
    app: App,
}

impl UseCaseRunner for Runner {
    fn run(&self, config: Config) -> Result<i32, Error> {
        let command_name = config.command.name();
        let _ = self.app.logger.log(
            &LogRecord::new(LogLevel::Info, "command started")
                .layer("cli")
                .kind("lifecycle")
                .field("command", command_name),
        );

        let result = self.dispatch(config);

        let code = match &result {
            Ok(code) => *code,
            Err(e) => e.exit_code(),
        };
        let _ = self.app.logger.log(
            &LogRecord::new(LogLevel::Info, "command finished")
                .layer("cli")
                .kind("lifecycle")
                .field("command", command_name)
                .field("exit_code", code),
        );
        if let Err(ref e) = result {
            let _ = self
                .app
                .logger
                .log(&LogRecord::new(LogLevel::Error, e.to_string()).layer("cli").kind("error"));
        }
        result
    }
}

impl Runner {
    fn dispatch(&self, config: Config) -> Result<i32, Error> {
        let json = config.json;
        match config.command {
            ReviewCommand::Help => {
                print_help();
                Ok(0)
            }
            ReviewCommand::Analyze { source, save } => {
                let code = self.app.code_reader.read(&source)?;
                let uc = self.app.analyze_use_case(config.profile, config.model)?;
                let outcome = uc.analyze(&code, save)?;
                print_outcome(&outcome, json)?;
                // 解析結果は出力済み。保存の失敗は終了コードで知らせる
                match &outcome.save_error {
                    Some(e) => {
                        eprintln!("review: warning: {}", e);
                        Ok(EXIT_SAVE_FAILED)
                    }
                    None => Ok(0),
                }
            }
            ReviewCommand::HistoryList => {
                let entries = self.app.history_use_case().list();
                if json {
                    println!("{}", serde_json::to_string_pretty(&entries)?);
                } else {
                    print!("{}", format_history_list(&entries));
                }
                Ok(0)
            }
            ReviewCommand::HistoryShow { id } => {
                let entry = self.app.history_use_case().show(&id)?;
                if json {
                    println!("{}", serde_json::to_string_pretty(&entry)?);
                } else {
                    print!("{}", format_saved(&entry));
                }
                Ok(0)
            }
            ReviewCommand::HistoryDelete { id } => {
                self.app.history_use_case().delete(&id)?;
                println!("Deleted {}", id);
                Ok(0)
            }
            ReviewCommand::HistoryClear { confirmed } => {
                match self.app.history_use_case().clear(confirmed)? {
                    ClearOutcome::Cleared(n) => println!("Cleared {} saved analyses", n),
                    ClearOutcome::Cancelled => println!("Cancelled"),
                }
                Ok(0)
            }
            ReviewCommand::Check => {
                let uc = self.app.analyze_use_case(config.profile, config.model)?;
                if uc.check_connection() {
                    println!("Connection OK");
                    Ok(0)
                } else {
                    println!("Connection failed");
                    Ok(EXIT_UNAVAILABLE)
                }
            }
        }
    }
}

fn print_outcome(outcome: &AnalysisOutcome, json: bool) -> Result<(), Error> {
    if json {
        let report = AnalyzeReport {
            result: &outcome.result,
            saved_id: outcome.saved.as_ref().map(|s| s.id.as_str()),
            save_error: outcome.save_error.as_ref().map(|e| e.to_string()),
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", format_result(&outcome.result));
        if let Some(saved) = &outcome.saved {
            println!("\nSaved as {}", saved.id);
        }
    }
    Ok(())
}

fn main() {
    let exit_code = match run() {
        Ok(code) => code,
        Err(e) => {
            if e.is_usage() {
                print_usage();
            }
            eprintln!("review: {}", e);
            e.exit_code()
        }
    };
    process::exit(exit_code);
}

pub fn run() -> Result<i32, Error> {
    let config = match parse_args()? {
        ParseOutcome::Config(c) => c,
        ParseOutcome::GenerateCompletion(shell) => {
            print_completion(shell);
            return Ok(0);
        }
        ParseOutcome::DisplayHelp(text) => {
            print!("{}", text);
            return Ok(0);
        }
    };
    let app = wire_app(config.verbose)?;
    let runner = Runner { app };
    runner.run(config)
}

fn print_usage() {
    eprintln!("Usage: review [options] <analyze|history|check> ...");
}

fn print_help() {
    println!("Usage: review [options] <command> [args]");
    println!("Commands:");
    println!("  analyze [FILE]               Analyze FILE (or stdin when omitted or `-`) and save the result to history");
    println!("    --example                  Analyze the bundled example snippet");
    println!("    --no-save                  Do not add the result to history");
    println!("  history list                 List saved analyses, newest first (at most 50 are kept)");
    println!("  history show <ID>            Show one saved analysis");
    println!("  history delete <ID>          Delete one saved analysis");
    println!("  history clear [-y|--yes]     Delete all saved analyses");
    println!("  check                        Check that the LLM API is reachable");
    println!("Options:");
    println!("  -h, --help                   Show this help message");
    println!("  -p, --profile <profile>      LLM profile (gemini, echo). Default: $REVIEW_PROFILE or gemini");
    println!("  -m, --model <model>          Model name. Default: $REVIEW_MODEL or gemini-2.0-flash");
    println!("  --json                       Print results as JSON");
    println!("  -v, --verbose                Also write structured logs to stderr");
    println!("  --generate <shell>           Generate shell completion script (bash, zsh, fish)");
    println!();
    println!("Environment:");
    println!("  GEMINI_API_KEY   API key for the gemini profile");
    println!("  REVIEW_HOME      Root for history and logs ($REVIEW_HOME/data, $REVIEW_HOME/state).");
    println!("                   If unset, $XDG_DATA_HOME/code-review and $XDG_STATE_HOME/code-review are used.");
    println!("  REVIEW_PROFILE   Default profile");
    println!("  REVIEW_MODEL     Default model");
    println!();
    println!("Examples:");
    println!("  review analyze src/app.js");
    println!("  cat login.py | review analyze --json");
    println!("  review -p echo analyze --example");
    println!("  review history list");
}

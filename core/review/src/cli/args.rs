use crate::domain::{CodeSource, ReviewCommand};
use clap::builder::ArgAction;
use clap::error::ErrorKind;
use clap::value_parser;
use clap_complete::Shell;
use common::domain::{AnalysisId, ModelName, ProviderName};
use common::error::Error;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// -v / --verbose: 構造化ログを stderr にも出す
    pub verbose: bool,
    /// --json: 結果を JSON で出力する
    pub json: bool,
    pub profile: Option<ProviderName>,
    pub model: Option<ModelName>,
    pub command: ReviewCommand,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            verbose: false,
            json: false,
            profile: None,
            model: None,
            command: ReviewCommand::Help,
        }
    }
}

/// 解析結果: 通常の Config / 補完スクリプト生成 / clap が生成したヘルプ表示
#[derive(Debug, Clone)]
pub enum ParseOutcome {
    Config(Config),
    GenerateCompletion(Shell),
    /// サブコマンドの --help（clap の出力をそのまま表示して終了）
    DisplayHelp(String),
}

fn id_arg() -> clap::Arg {
    clap::Arg::new("id")
        .value_name("ID")
        .help("Analysis id as shown by `review history list`")
        .required(true)
}

pub(crate) fn build_clap_command() -> clap::Command {
    clap::Command::new("review")
        .about("Send source code to an LLM for critique and keep a local history of the results")
        .disable_help_flag(true)
        .arg(
            clap::Arg::new("help")
                .short('h')
                .long("help")
                .help("Show this help message")
                .action(ArgAction::SetTrue),
        )
        .arg(
            clap::Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Also write structured logs to stderr")
                .global(true)
                .action(ArgAction::SetTrue),
        )
        .arg(
            clap::Arg::new("json")
                .long("json")
                .help("Print results as JSON")
                .global(true)
                .action(ArgAction::SetTrue),
        )
        .arg(
            clap::Arg::new("profile")
                .short('p')
                .long("profile")
                .value_name("profile")
                .help("LLM profile (gemini, echo). Default: $REVIEW_PROFILE or gemini")
                .global(true)
                .num_args(1),
        )
        .arg(
            clap::Arg::new("model")
                .short('m')
                .long("model")
                .value_name("model")
                .help("Model name (e.g. gemini-2.0-flash). Default: $REVIEW_MODEL")
                .global(true)
                .num_args(1),
        )
        .arg(
            clap::Arg::new("generate")
                .long("generate")
                .value_name("shell")
                .help("Generate shell completion script")
                .value_parser(value_parser!(Shell))
                .num_args(1),
        )
        .subcommand(
            clap::Command::new("analyze")
                .about("Analyze a source file (or stdin) and save the result to history")
                .arg(
                    clap::Arg::new("file")
                        .value_name("FILE")
                        .help("File to analyze; `-` or omitted reads stdin")
                        .value_parser(value_parser!(PathBuf)),
                )
                .arg(
                    clap::Arg::new("example")
                        .long("example")
                        .help("Analyze the bundled example snippet")
                        .conflicts_with("file")
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    clap::Arg::new("no-save")
                        .long("no-save")
                        .help("Do not add the result to history")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            clap::Command::new("history")
                .about("List, show, delete or clear saved analyses")
                .subcommand_required(true)
                .subcommand(clap::Command::new("list").about("List saved analyses, newest first"))
                .subcommand(
                    clap::Command::new("show")
                        .about("Show one saved analysis")
                        .arg(id_arg()),
                )
                .subcommand(
                    clap::Command::new("delete")
                        .about("Delete one saved analysis")
                        .arg(id_arg()),
                )
                .subcommand(
                    clap::Command::new("clear")
                        .about("Delete all saved analyses")
                        .arg(
                            clap::Arg::new("yes")
                                .short('y')
                                .long("yes")
                                .help("Do not ask for confirmation")
                                .action(ArgAction::SetTrue),
                        ),
                ),
        )
        .subcommand(clap::Command::new("check").about("Check that the LLM API is reachable"))
}

fn id_from(matches: &clap::ArgMatches) -> AnalysisId {
    matches
        .get_one::<String>("id")
        .map(|s| AnalysisId::new(s.as_str()))
        .unwrap_or_else(|| AnalysisId::new(""))
}

fn matches_to_command(matches: &clap::ArgMatches) -> ReviewCommand {
    if matches.get_flag("help") {
        return ReviewCommand::Help;
    }
    match matches.subcommand() {
        Some(("analyze", sub)) => {
            let source = if sub.get_flag("example") {
                CodeSource::Example
            } else {
                match sub.get_one::<PathBuf>("file") {
                    Some(p) if p.as_os_str() != "-" => CodeSource::File(p.clone()),
                    _ => CodeSource::Stdin,
                }
            };
            ReviewCommand::Analyze {
                source,
                save: !sub.get_flag("no-save"),
            }
        }
        Some(("history", sub)) => match sub.subcommand() {
            Some(("show", m)) => ReviewCommand::HistoryShow { id: id_from(m) },
            Some(("delete", m)) => ReviewCommand::HistoryDelete { id: id_from(m) },
            Some(("clear", m)) => ReviewCommand::HistoryClear {
                confirmed: m.get_flag("yes"),
            },
            _ => ReviewCommand::HistoryList,
        },
        Some(("check", _)) => ReviewCommand::Check,
        _ => ReviewCommand::Help,
    }
}

fn matches_to_config(matches: &clap::ArgMatches) -> Config {
    Config {
        verbose: matches.get_flag("verbose"),
        json: matches.get_flag("json"),
        profile: matches
            .get_one::<String>("profile")
            .map(|s| ProviderName::new(s.clone())),
        model: matches
            .get_one::<String>("model")
            .map(|s| ModelName::new(s.clone())),
        command: matches_to_command(matches),
    }
}

fn parse_matches(result: Result<clap::ArgMatches, clap::Error>) -> Result<ParseOutcome, Error> {
    let matches = match result {
        Ok(m) => m,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            return Ok(ParseOutcome::DisplayHelp(e.to_string()));
        }
        Err(e) => return Err(Error::invalid_argument(e.to_string())),
    };

    if let Some(&shell) = matches.get_one::<Shell>("generate") {
        return Ok(ParseOutcome::GenerateCompletion(shell));
    }

    Ok(ParseOutcome::Config(matches_to_config(&matches)))
}

/// コマンドラインを解析する。補完生成が要求された場合は ParseOutcome::GenerateCompletion を返す。
pub fn parse_args() -> Result<ParseOutcome, Error> {
    parse_matches(build_clap_command().try_get_matches())
}

/// テスト用: 引数スライスから解析する
#[allow(dead_code)]
pub fn parse_args_from(args: &[&str]) -> Result<ParseOutcome, Error> {
    parse_matches(build_clap_command().try_get_matches_from(args))
}

/// 補完スクリプトを標準出力に出力する。
pub fn print_completion(shell: Shell) {
    let mut cmd = build_clap_command();
    clap_complete::generate(shell, &mut cmd, "review", &mut std::io::stdout());
}

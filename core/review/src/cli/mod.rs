//! CLI 層: 引数解析と補完スクリプト生成

mod args;

#[allow(unused_imports)]
pub use args::{parse_args, parse_args_from, print_completion, Config, ParseOutcome};

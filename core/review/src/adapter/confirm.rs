//! ConfirmPrompt の実装

use crate::ports::outbound::ConfirmPrompt;
use std::io::{self, BufRead, Write};

/// stderr に質問を出し、stdin の 1 行で答えを受け取る
#[derive(Debug, Clone, Default)]
pub struct StdinConfirm;

impl ConfirmPrompt for StdinConfirm {
    fn confirm(&self, message: &str) -> bool {
        eprint!("{} [y/N] ", message);
        let _ = io::stderr().flush();
        let mut line = String::new();
        if io::stdin().lock().read_line(&mut line).is_err() {
            return false;
        }
        is_yes(&line)
    }
}

/// 常に同じ答えを返す（--yes 指定時やテスト用）
#[derive(Debug, Clone)]
pub struct FixedConfirm(pub bool);

impl ConfirmPrompt for FixedConfirm {
    fn confirm(&self, _message: &str) -> bool {
        self.0
    }
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_yes() {
        assert!(is_yes("y\n"));
        assert!(is_yes(" YES "));
        assert!(!is_yes(""));
        assert!(!is_yes("n"));
        assert!(!is_yes("yep"));
    }
}

//! 分数解析 - 业务能力层
//!
//! 从模型的自由文本回复中取出分数。
//!
//! 规则：找到第一行（不区分大小写）包含 `score` 的文本，从该行取数字。
//! 找不到该行、该行没有数字、或数字超出 `u64` 范围时，分数为 0。
//!
//! 默认的 [`ScoreParseMode::ConcatDigits`] 会把该行所有数字拼接起来，
//! 因此 `Score: 8/10` 得到 `810`。这是已知缺陷，保留为默认行为，
//! 需要时可切换到 [`ScoreParseMode::FirstInteger`]。
//!
//! 两种模式都只认 ASCII 数字 `0-9`。上标 `²`、全角或其他文字的数字
//! 会被忽略：`Score: 7²` 得到 `7`，而不是把整条记录记为 `Error:`。

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// 分数行的数字提取方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScoreParseMode {
    /// 拼接该行所有数字
    #[default]
    ConcatDigits,
    /// 只取该行第一个连续数字
    FirstInteger,
}

impl ScoreParseMode {
    pub fn as_str(self) -> &'static str {
        match self {
            ScoreParseMode::ConcatDigits => "concat-digits",
            ScoreParseMode::FirstInteger => "first-integer",
        }
    }
}

impl fmt::Display for ScoreParseMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ScoreParseMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "concat-digits" | "concat_digits" => Ok(ScoreParseMode::ConcatDigits),
            "first-integer" | "first_integer" => Ok(ScoreParseMode::FirstInteger),
            other => Err(format!("未知的分数解析模式: {}", other)),
        }
    }
}

fn integer_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"[0-9]+").expect("static regex"))
}

/// 找到第一行包含 `score` 的文本
pub fn find_score_line(reply: &str) -> Option<&str> {
    reply
        .split('\n')
        .find(|line| line.to_lowercase().contains("score"))
}

/// 从模型回复中解析分数
pub fn parse_score(reply: &str, mode: ScoreParseMode) -> u64 {
    let Some(line) = find_score_line(reply) else {
        debug!("回复中没有找到分数行，记为 0 分");
        return 0;
    };

    let digits: String = match mode {
        ScoreParseMode::ConcatDigits => line.chars().filter(|c| c.is_ascii_digit()).collect(),
        ScoreParseMode::FirstInteger => integer_pattern()
            .find(line)
            .map(|m| m.as_str().to_string())
            .unwrap_or_default(),
    };

    if digits.is_empty() {
        return 0;
    }

    match digits.parse::<u64>() {
        Ok(score) => score,
        Err(_) => {
            warn!("分数行数字过长，无法解析: {}", digits);
            0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_score_line() {
        assert_eq!(parse_score("Score: 7", ScoreParseMode::ConcatDigits), 7);
    }

    #[test]
    fn test_fraction_concatenates_digits() {
        // 已知缺陷：8/10 被拼成 810
        let reply = "Great work!\nScore: 8/10\nFeedback: ...";
        assert_eq!(parse_score(reply, ScoreParseMode::ConcatDigits), 810);
    }

    #[test]
    fn test_non_ascii_digits_are_ignored() {
        assert_eq!(parse_score("Score: 7²", ScoreParseMode::ConcatDigits), 7);
        assert_eq!(parse_score("Score: ７/10", ScoreParseMode::ConcatDigits), 10);
        assert_eq!(parse_score("Score: ٣ then 4", ScoreParseMode::FirstInteger), 4);
    }

    #[test]
    fn test_fraction_first_integer_mode() {
        let reply = "Score: 8/10";
        assert_eq!(parse_score(reply, ScoreParseMode::FirstInteger), 8);
    }

    #[test]
    fn test_no_score_line_is_zero() {
        let reply = "Nice answer.\nYou covered chlorophyll well.";
        assert_eq!(parse_score(reply, ScoreParseMode::ConcatDigits), 0);
        assert_eq!(parse_score("", ScoreParseMode::FirstInteger), 0);
    }

    #[test]
    fn test_score_line_without_digits_is_zero() {
        let reply = "**Score:** see below\n9 out of 10";
        assert_eq!(parse_score(reply, ScoreParseMode::ConcatDigits), 0);
    }

    #[test]
    fn test_only_first_score_line_is_used() {
        let reply = "1. SCORE 6\n2. Revised score: 9";
        assert_eq!(parse_score(reply, ScoreParseMode::ConcatDigits), 6);
    }

    #[test]
    fn test_line_numbering_leaks_into_score() {
        let reply = "1. A score out of 10: 7";
        assert_eq!(parse_score(reply, ScoreParseMode::ConcatDigits), 1107);
        assert_eq!(parse_score(reply, ScoreParseMode::FirstInteger), 1);
    }

    #[test]
    fn test_overflow_is_zero() {
        let reply = format!("Score: {}", "9".repeat(40));
        assert_eq!(parse_score(&reply, ScoreParseMode::ConcatDigits), 0);
    }

    #[test]
    fn test_mode_from_str() {
        assert_eq!(
            "first-integer".parse::<ScoreParseMode>().unwrap(),
            ScoreParseMode::FirstInteger
        );
        assert_eq!(
            "CONCAT_DIGITS".parse::<ScoreParseMode>().unwrap(),
            ScoreParseMode::ConcatDigits
        );
        assert!("round".parse::<ScoreParseMode>().is_err());
    }
}

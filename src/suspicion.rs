//! Post-cleaning checks for text that still looks malformed.
//!
//! Nothing here changes the text. The tags only tell a reviewer which lessons
//! deserve a second look.

use regex::Regex;
use serde::Serialize;
use std::fmt;
use std::sync::LazyLock;

static RE_FILE_LETTER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\b[a-h]\b").unwrap());

static RE_RANK_DIGIT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\b[1-8]\b").unwrap());

static RE_SHORT_PAIR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b[a-z]{2,3}\s+[a-z]{2,3}\b").unwrap());

/// A reason to review a cleaned text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Problem {
    /// Short text with a lone file letter and a lone rank digit.
    #[serde(rename = "possible leftover coordinates")]
    LeftoverCoordinates,
    #[serde(rename = "contains underscore")]
    ContainsUnderscore,
    #[serde(rename = "ends with many digits")]
    EndsWithManyDigits,
    /// Two short lowercase tokens in a row, e.g. "imm edi".
    #[serde(rename = "possible remaining split-words")]
    RemainingSplitWords,
    #[serde(rename = "very short solution text")]
    VeryShortText,
}

impl Problem {
    /// Label used in reports.
    pub fn as_str(&self) -> &'static str {
        match self {
            Problem::LeftoverCoordinates => "possible leftover coordinates",
            Problem::ContainsUnderscore => "contains underscore",
            Problem::EndsWithManyDigits => "ends with many digits",
            Problem::RemainingSplitWords => "possible remaining split-words",
            Problem::VeryShortText => "very short solution text",
        }
    }
}

impl fmt::Display for Problem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Cutoffs used by the detector. Tuned against real lesson exports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SuspicionThresholds {
    /// Coordinate leftovers are only reported for texts shorter than this.
    pub max_coordinate_text_len: usize,
    /// Number of trailing digits that counts as "many".
    pub min_trailing_digits: usize,
    /// Trimmed texts shorter than this are reported as very short.
    pub min_text_len: usize,
}

impl Default for SuspicionThresholds {
    fn default() -> Self {
        Self {
            max_coordinate_text_len: 80,
            min_trailing_digits: 6,
            min_text_len: 20,
        }
    }
}

/// Checks `text` with the default thresholds.
pub fn detect_problems(text: &str) -> Vec<Problem> {
    detect_problems_with(text, &SuspicionThresholds::default())
}

/// Checks `text` and returns every problem found, in declaration order.
pub fn detect_problems_with(text: &str, thresholds: &SuspicionThresholds) -> Vec<Problem> {
    let mut problems = Vec::new();
    let trimmed = text.trim();

    if RE_FILE_LETTER.is_match(text)
        && RE_RANK_DIGIT.is_match(text)
        && text.chars().count() < thresholds.max_coordinate_text_len
    {
        problems.push(Problem::LeftoverCoordinates);
    }

    if text.contains('_') {
        problems.push(Problem::ContainsUnderscore);
    }

    if trailing_digit_count(trimmed) >= thresholds.min_trailing_digits {
        problems.push(Problem::EndsWithManyDigits);
    }

    if RE_SHORT_PAIR.is_match(&text.to_lowercase()) {
        problems.push(Problem::RemainingSplitWords);
    }

    if trimmed.chars().count() < thresholds.min_text_len {
        problems.push(Problem::VeryShortText);
    }

    problems
}

/// Counts digits at the end of `text`, allowing whitespace between them.
fn trailing_digit_count(text: &str) -> usize {
    let mut count = 0;
    for c in text.chars().rev() {
        if c.is_ascii_digit() {
            count += 1;
        } else if !c.is_whitespace() {
            break;
        }
    }
    count
}

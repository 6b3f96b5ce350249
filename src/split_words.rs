//! # Split-Word Heuristics
//!
//! Justified text reflowed out of a PDF often comes back with words torn in
//! two ("obv ious", "kn ight") and with piece-notation glyphs separated from
//! the word they start ("R ook"). This module decides, pair by pair, whether
//! two adjacent tokens were originally one word.
//!
//! The decision is an ordered rule table evaluated top to bottom; the first
//! rule that applies decides. Pairs no rule claims are kept apart.

use crate::vocab::{is_piece_word, is_stopword, looks_like_real_word};
use regex::{Captures, Regex};
use std::sync::LazyLock;

// Single piece initial split from a lowercase fragment: "R ook", "K ing".
static RE_SPLIT_PIECE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b([KQRBNP])\s+([a-z]{2,})\b").unwrap());

static RE_SPLIT_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b([A-Za-z]{2,})\s+([A-Za-z]{2,})\b").unwrap());

// Short lowercase head followed by a longer lowercase tail: "imm ediately".
static RE_SPLIT_SHORT_LEFT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b([a-z]{1,3})\s+([a-z]{3,})\b").unwrap());

/// What a join rule decides when it applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinDecision {
    /// Merge the two tokens.
    Join,
    /// Leave the whitespace between them.
    KeepApart,
}

/// Two adjacent tokens under consideration.
#[derive(Debug, Clone)]
pub struct TokenPair<'a> {
    pub left: &'a str,
    pub right: &'a str,
    pub combined: String,
    pub left_len: usize,
    pub right_len: usize,
    pub combined_len: usize,
}

impl<'a> TokenPair<'a> {
    pub fn new(left: &'a str, right: &'a str) -> Self {
        let combined = format!("{left}{right}");
        let left_len = left.chars().count();
        let right_len = right.chars().count();
        Self {
            left,
            right,
            combined,
            left_len,
            right_len,
            combined_len: left_len + right_len,
        }
    }
}

/// A single entry of the join rule table.
#[derive(Debug, Clone, Copy)]
pub struct JoinRule {
    /// Short identifier, used in logs.
    pub name: &'static str,
    /// Decision taken when `applies` returns true.
    pub decision: JoinDecision,
    pub applies: fn(&TokenPair<'_>) -> bool,
}

/// Join rules in evaluation order. First match wins.
pub static JOIN_RULES: &[JoinRule] = &[
    JoinRule {
        name: "stopword",
        decision: JoinDecision::KeepApart,
        applies: either_is_stopword,
    },
    JoinRule {
        name: "piece-word",
        decision: JoinDecision::Join,
        applies: forms_piece_word,
    },
    JoinRule {
        name: "both-short",
        decision: JoinDecision::KeepApart,
        applies: both_short,
    },
    JoinRule {
        name: "short-prefix",
        decision: JoinDecision::Join,
        applies: short_prefix,
    },
    JoinRule {
        name: "fragments-form-word",
        decision: JoinDecision::Join,
        applies: fragments_form_word,
    },
    JoinRule {
        name: "non-word-prefix",
        decision: JoinDecision::Join,
        applies: non_word_prefix,
    },
];

fn either_is_stopword(pair: &TokenPair<'_>) -> bool {
    is_stopword(pair.left) || is_stopword(pair.right)
}

fn forms_piece_word(pair: &TokenPair<'_>) -> bool {
    is_piece_word(&pair.combined)
}

fn both_short(pair: &TokenPair<'_>) -> bool {
    pair.left_len <= 2 && pair.right_len <= 2
}

fn short_prefix(pair: &TokenPair<'_>) -> bool {
    pair.left_len <= 3 && pair.right_len >= 3 && pair.combined_len >= 6
}

fn fragments_form_word(pair: &TokenPair<'_>) -> bool {
    !looks_like_real_word(pair.left)
        && !looks_like_real_word(pair.right)
        && looks_like_real_word(&pair.combined)
}

fn non_word_prefix(pair: &TokenPair<'_>) -> bool {
    pair.left_len <= 4 && !looks_like_real_word(pair.left) && pair.combined_len >= 7
}

/// Returns the rule that decides the pair, or `None` when no rule applies.
pub fn explain_join(left: &str, right: &str) -> Option<&'static JoinRule> {
    let pair = TokenPair::new(left, right);
    JOIN_RULES.iter().find(|rule| (rule.applies)(&pair))
}

/// Returns true if `left` and `right` were most likely one word.
pub fn should_join(left: &str, right: &str) -> bool {
    explain_join(left, right).is_some_and(|rule| rule.decision == JoinDecision::Join)
}

/// Repairs split words.
///
/// Piece-initial splits are merged unconditionally. Other alphabetic pairs
/// go through [`should_join`], repeated until a pass joins nothing or
/// `max_passes` is reached. A last pass catches short lowercase heads the
/// general pattern skipped.
pub fn join_split_words(input: &str, max_passes: usize) -> String {
    let mut text = RE_SPLIT_PIECE.replace_all(input, "${1}${2}").into_owned();

    for pass in 0..max_passes.max(1) {
        let (next, joins) = join_pass(&RE_SPLIT_WORD, &text);
        text = next;
        tracing::debug!(pass, joins, "split-word pass");
        if joins == 0 {
            break;
        }
    }

    join_pass(&RE_SPLIT_SHORT_LEFT, &text).0
}

/// One left-to-right scan. Returns the new text and the number of joins.
fn join_pass(pattern: &Regex, text: &str) -> (String, usize) {
    let mut joins = 0;
    let result = pattern.replace_all(text, |caps: &Captures<'_>| {
        let left = &caps[1];
        let right = &caps[2];
        match explain_join(left, right) {
            Some(rule) if rule.decision == JoinDecision::Join => {
                joins += 1;
                tracing::trace!(left, right, rule = rule.name, "joined split word");
                format!("{left}{right}")
            }
            _ => caps[0].to_string(),
        }
    });
    (result.into_owned(), joins)
}

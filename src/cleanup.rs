//! # Cleanup Pipeline
//!
//! A 5-stage pipeline for repairing PDF-extracted lesson text.
//!
//! ## Pipeline Stages
//!
//! 1. **Stage 1: String Normalization** - Unicode composition, line endings, control character removal
//! 2. **Stage 2: Board Noise** - Lone coordinate labels left over from diagrams
//! 3. **Stage 3: Wrapped Lines** - Hyphenated and hard-wrapped words across line breaks
//! 4. **Stage 4: Split Words** - Heuristic rejoining of words torn apart by reflow
//! 5. **Stage 5: Scrubbing** - Trailing digit/underscore junk, whitespace and blank lines
//!
//! Every stage is a pure `&str -> String` function; the pipeline holds no state
//! between calls.

use crate::options::{CleanupOptions, UnicodeForm};
use crate::split_words::join_split_words;
use regex::{Captures, Regex};
use std::sync::LazyLock;
use unicode_normalization::UnicodeNormalization;

// ============================================================================
// Stage 1: String Normalization
// ============================================================================

static RE_NBSP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\x{A0}\x{2007}\x{202F}]").unwrap());

// General category "Other" (control, format, private use, unassigned) minus newline and tab.
static RE_INVISIBLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\p{C}&&[^\n\t]]").unwrap());

/// Stage 1: Normalize raw string
///
/// - Unicode NFKC (or NFC) composition
/// - Non-breaking spaces to plain spaces
/// - `\r\n` and `\r` to `\n`
/// - Control, format and private-use character removal
pub fn stage1_normalize_string(input: &str, options: &CleanupOptions) -> String {
    let composed: String = match options.unicode_form {
        UnicodeForm::Nfc => input.nfc().collect(),
        UnicodeForm::Nfkc => input.nfkc().collect(),
    };

    let spaced = RE_NBSP.replace_all(&composed, " ");
    let unified = spaced.replace("\r\n", "\n").replace('\r', "\n");

    RE_INVISIBLE.replace_all(&unified, "").into_owned()
}

// ============================================================================
// Stage 2: Board Noise
// ============================================================================

/// Stage 2: Drop lines holding nothing but a board coordinate
///
/// Diagrams extracted from a PDF leave their file letters (`a`..`h`) and rank
/// digits (`1`..`8`) behind as one-character lines. Those lines are removed
/// outright; whitespace-only lines stay as empty lines.
pub fn stage2_strip_board_noise(input: &str) -> String {
    input
        .split('\n')
        .filter_map(|line| {
            let trimmed = line.trim();
            if trimmed.is_empty() {
                Some("")
            } else if is_coordinate_label(trimmed) {
                None
            } else {
                Some(line)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn is_coordinate_label(s: &str) -> bool {
    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => matches!(c.to_ascii_lowercase(), 'a'..='h') || matches!(c, '1'..='8'),
        _ => false,
    }
}

// ============================================================================
// Stage 3: Wrapped Lines
// ============================================================================

static RE_HYPHEN_BREAK: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(\w)-\n(\w)").unwrap());

static RE_HARD_WRAP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([A-Za-z]{3,})\n([a-z]{2,})").unwrap());

/// Stage 3: Rejoin words broken across lines
///
/// - `posi-\ntion` -> `position`
/// - `imme\ndiately` -> `immediately` (no hyphen; lowercase continuation)
///
/// This over-joins on purpose. Text it gets wrong is caught by the suspicion
/// detector rather than prevented here.
pub fn stage3_join_wrapped_lines(input: &str) -> String {
    let dehyphenated = RE_HYPHEN_BREAK.replace_all(input, "${1}${2}");
    RE_HARD_WRAP
        .replace_all(&dehyphenated, "${1}${2}")
        .into_owned()
}

// ============================================================================
// Stage 4: Split Words
// ============================================================================

/// Stage 4: Rejoin words split by reflow (see [`crate::split_words`])
pub fn stage4_join_split_words(input: &str, options: &CleanupOptions) -> String {
    join_split_words(input, options.max_join_passes)
}

// ============================================================================
// Stage 5: Scrubbing
// ============================================================================

// Up to ten digits, loosely spaced, at the end of a line.
static RE_GARBAGE_TAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)[ \t_]*(?:[0-9][ \t]*){1,10}[ \t_]*$").unwrap());

static RE_TRAIL_JUNK: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?m)[ \t_]+$").unwrap());

static RE_MULTIPLE_SPACES: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[ \t]{2,}").unwrap());

/// Stage 5: Scrub trailing junk and whitespace
///
/// - Strip trailing digit runs (page and diagram numbers) from every line
/// - Strip trailing underscores and whitespace from every line
/// - Collapse runs of spaces and tabs
/// - Keep at most two consecutive blank lines
/// - Trim the text
pub fn stage5_scrub(input: &str, options: &CleanupOptions) -> String {
    if options.scrub_tails {
        let stripped = strip_garbage_tails(input, options.keep_square_digits);
        let stripped = RE_TRAIL_JUNK.replace_all(&stripped, "");
        normalize_whitespace(&stripped)
    } else {
        normalize_whitespace(input)
    }
}

/// Removes trailing digit runs from each line.
///
/// With `keep_square_digits`, digits written directly after a letter are part
/// of a square or move (`e4`, `Nf3`) and survive; only what follows them goes.
pub fn strip_garbage_tails(input: &str, keep_square_digits: bool) -> String {
    RE_GARBAGE_TAIL
        .replace_all(input, |caps: &Captures<'_>| {
            if !keep_square_digits {
                return String::new();
            }
            let start = caps.get(0).map_or(0, |m| m.start());
            let glued = input[..start]
                .chars()
                .next_back()
                .is_some_and(|c| c.is_ascii_alphabetic());
            if glued {
                caps[0].chars().take_while(|c| c.is_ascii_digit()).collect()
            } else {
                String::new()
            }
        })
        .into_owned()
}

fn normalize_whitespace(input: &str) -> String {
    let collapsed = RE_MULTIPLE_SPACES.replace_all(input, " ");

    let mut lines: Vec<&str> = Vec::new();
    let mut blank_run = 0;
    for line in collapsed.split('\n') {
        let line = line.trim_end();
        if line.trim().is_empty() {
            blank_run += 1;
            if blank_run <= 2 {
                lines.push("");
            }
        } else {
            blank_run = 0;
            lines.push(line);
        }
    }

    lines.join("\n").trim().to_string()
}

// ============================================================================
// Main Pipeline
// ============================================================================

/// Run the full cleanup pipeline on lesson text
///
/// # Example
///
/// ```
/// use endclean::{cleanup, CleanupOptions};
///
/// let raw = "The posi-\ntion is won.\nc\n4\nR ook takes pawn. 3 1 4";
/// let clean = cleanup(raw, &CleanupOptions::default());
/// assert_eq!(clean, "The position is won.\nRook takes pawn.");
/// ```
pub fn cleanup(input: &str, options: &CleanupOptions) -> String {
    let mut result = input.to_string();

    // Stage 1: String normalization
    if options.normalize {
        result = stage1_normalize_string(&result, options);
    }

    // Stage 2: Board noise
    if options.strip_board_noise {
        result = stage2_strip_board_noise(&result);
    }

    // Stage 3: Wrapped lines
    if options.join_wrapped_lines {
        result = stage3_join_wrapped_lines(&result);
    }

    // Stage 4: Split words
    if options.join_split_words {
        result = stage4_join_split_words(&result, options);
    }

    // Stage 5: Scrubbing
    stage5_scrub(&result, options)
}

/// Run cleanup with default options
pub fn cleanup_default(input: &str) -> String {
    cleanup(input, &CleanupOptions::default())
}

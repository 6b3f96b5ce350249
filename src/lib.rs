//! # endclean
//!
//! Repairs chess endgame lesson text that was extracted from PDF books.
//!
//! Extraction leaves behind diagram coordinate labels, words hyphenated or
//! hard-wrapped across lines, words torn apart by justified-text reflow,
//! invisible control characters and trailing page-number junk. `endclean`
//! runs a fixed sequence of pure text passes over each lesson's
//! `solutionText` and flags lessons that still look wrong afterwards.
//!
//! ## Quick Start
//!
//! ```
//! use endclean::{clean_solution_text, detect_problems};
//!
//! let clean = clean_solution_text("The posi-\ntion becomes winning after R ook takes pawn.");
//! assert_eq!(clean, "The position becomes winning after Rook takes pawn.");
//! assert!(detect_problems(&clean).is_empty());
//! ```
//!
//! ## Lesson documents
//!
//! ```no_run
//! use endclean::{CleanupOptions, LessonDocument};
//!
//! fn main() -> endclean::Result<()> {
//!     let mut doc = LessonDocument::open("lessons.json")?;
//!     let report = doc.clean(&CleanupOptions::default());
//!     doc.save("lessons.clean.json")?;
//!     report.save("report.json")?;
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - `async`: Async file I/O with Tokio
//! - `python`: Python bindings

pub mod cleanup;
pub mod error;
pub mod lessons;
pub mod options;
pub mod split_words;
pub mod suspicion;
pub mod vocab;

#[cfg(feature = "async")]
pub mod async_api;

#[cfg(feature = "python")]
mod python;

// Re-exports
pub use cleanup::cleanup;
pub use error::{Error, Result};
pub use lessons::{
    clean_lesson, clean_lessons, CleanReport, LessonDocument, LessonOutcome, SuspiciousLesson,
    SOLUTION_FIELD,
};
pub use options::{CleanupOptions, UnicodeForm};
pub use split_words::{explain_join, should_join, JoinDecision, JoinRule, JOIN_RULES};
pub use suspicion::{detect_problems, detect_problems_with, Problem, SuspicionThresholds};

use std::path::Path;

/// Cleans a lesson text with default options.
///
/// # Example
///
/// ```
/// assert_eq!(endclean::clean_solution_text("kn ight"), "knight");
/// ```
pub fn clean_solution_text(text: &str) -> String {
    cleanup(text, &CleanupOptions::default())
}

/// Loads a lesson document, cleans it and writes the result.
///
/// The returned report carries the absolute input and output paths.
///
/// # Example
///
/// ```no_run
/// use endclean::{clean_file, CleanupOptions};
///
/// let report = clean_file("lessons.json", "lessons.clean.json", &CleanupOptions::default())?;
/// println!("{} of {} lessons changed", report.lessons_changed, report.total_lessons);
/// # Ok::<(), endclean::Error>(())
/// ```
pub fn clean_file(
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
    options: &CleanupOptions,
) -> Result<CleanReport> {
    let input = input.as_ref();
    let output = output.as_ref();

    let mut doc = LessonDocument::open(input)?;
    let report = doc.clean(options);
    doc.save(output)?;

    Ok(report.with_paths(input, Some(output)))
}

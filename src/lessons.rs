//! Lesson documents and per-lesson cleaning.
//!
//! A lesson document is either a bare JSON array of lesson objects or an
//! object carrying a `lessons` array next to other keys. Only the
//! `solutionText` field of each lesson is ever rewritten; every other field,
//! and the key order of every object, is written back as it was read.

use crate::cleanup::cleanup;
use crate::error::{Error, Result};
use crate::options::CleanupOptions;
use crate::suspicion::{detect_problems_with, Problem};
use rayon::prelude::*;
use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;
use serde_json::{Map, Value};
use std::fs::{self, File};
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Field holding the text to clean.
pub const SOLUTION_FIELD: &str = "solutionText";

const LESSONS_KEY: &str = "lessons";

/// A parsed lesson document.
#[derive(Debug, Clone, PartialEq)]
pub struct LessonDocument {
    lessons: Vec<Value>,
    /// Top-level object for `{ "lessons": [...] }` documents.
    envelope: Option<Map<String, Value>>,
}

impl LessonDocument {
    /// Creates a document from an already parsed JSON value.
    pub fn from_value(root: Value) -> Result<Self> {
        match root {
            Value::Array(lessons) => Ok(Self {
                lessons,
                envelope: None,
            }),
            Value::Object(mut map) => {
                let lessons = match map.get_mut(LESSONS_KEY) {
                    Some(Value::Array(lessons)) => std::mem::take(lessons),
                    _ => return Err(shape_error()),
                };
                Ok(Self {
                    lessons,
                    envelope: Some(map),
                })
            }
            _ => Err(shape_error()),
        }
    }

    /// Reads a document from a JSON reader.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let root: Value = serde_json::from_reader(reader)?;
        Self::from_value(root)
    }

    /// Reads a document from a file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    /// Returns the lesson records.
    pub fn lessons(&self) -> &[Value] {
        &self.lessons
    }

    /// Returns the lesson records for modification.
    pub fn lessons_mut(&mut self) -> &mut [Value] {
        &mut self.lessons
    }

    /// Number of lesson records, including malformed ones.
    pub fn len(&self) -> usize {
        self.lessons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lessons.is_empty()
    }

    /// True for `{ "lessons": [...] }` documents.
    pub fn is_wrapped(&self) -> bool {
        self.envelope.is_some()
    }

    /// Cleans every lesson in place.
    pub fn clean(&mut self, options: &CleanupOptions) -> CleanReport {
        clean_lessons(&mut self.lessons, options)
    }

    /// Converts back into a JSON value with the original top-level shape.
    pub fn into_value(self) -> Value {
        match self.envelope {
            Some(mut map) => {
                // The key already exists, so it keeps its position.
                map.insert(LESSONS_KEY.to_string(), Value::Array(self.lessons));
                Value::Object(map)
            }
            None => Value::Array(self.lessons),
        }
    }

    /// Serializes with two-space indentation.
    pub fn to_string_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Writes the document to `path`.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        fs::write(path, self.to_string_pretty()?)?;
        Ok(())
    }
}

impl FromStr for LessonDocument {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let root: Value = serde_json::from_str(s)?;
        Self::from_value(root)
    }
}

// Writes the same JSON as `into_value` without cloning the lessons.
impl Serialize for LessonDocument {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let Some(envelope) = &self.envelope else {
            return self.lessons.serialize(serializer);
        };

        let mut map = serializer.serialize_map(Some(envelope.len()))?;
        for (key, value) in envelope {
            if key == LESSONS_KEY {
                map.serialize_entry(key, &self.lessons)?;
            } else {
                map.serialize_entry(key, value)?;
            }
        }
        map.end()
    }
}

fn shape_error() -> Error {
    Error::InvalidShape("expected a list of lessons or { \"lessons\": [...] }".into())
}

/// Result of cleaning one lesson.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LessonOutcome {
    /// The cleaned text differs from the raw text.
    pub changed: bool,
    /// Problems found in the cleaned text.
    pub problems: Vec<Problem>,
}

/// A lesson flagged for manual review.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SuspiciousLesson {
    pub id: Value,
    pub title: Value,
    pub problems: Vec<Problem>,
}

/// Summary of a cleaning run.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CleanReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<PathBuf>,
    pub total_lessons: usize,
    pub lessons_changed: usize,
    pub suspicious_count: usize,
    pub suspicious: Vec<SuspiciousLesson>,
    /// Records without a string `solutionText`.
    #[serde(skip)]
    pub lessons_skipped: usize,
}

impl CleanReport {
    /// Records the input and output paths, made absolute when possible.
    pub fn with_paths(mut self, input: impl AsRef<Path>, output: Option<&Path>) -> Self {
        self.input = Some(absolute(input.as_ref()));
        self.output = output.map(absolute);
        self
    }

    /// Serializes with two-space indentation.
    pub fn to_string_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Writes the report to `path`.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        fs::write(path, self.to_string_pretty()?)?;
        Ok(())
    }
}

fn absolute(path: &Path) -> PathBuf {
    std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf())
}

/// Cleans the `solutionText` of a single record.
///
/// Returns `None`, leaving the record untouched, when the record is not an
/// object or has no string `solutionText`.
pub fn clean_lesson(record: &mut Value, options: &CleanupOptions) -> Option<LessonOutcome> {
    let field = record.as_object_mut()?.get_mut(SOLUTION_FIELD)?;
    let Value::String(raw) = field else {
        return None;
    };

    let cleaned = cleanup(raw, options);
    let changed = cleaned != *raw;
    let problems = detect_problems_with(&cleaned, &options.thresholds);
    if changed {
        *raw = cleaned;
    }

    Some(LessonOutcome { changed, problems })
}

/// Cleans every record and summarizes the run.
///
/// Records are processed in parallel when `options.parallel` is set; the
/// report lists suspicious lessons in input order either way.
pub fn clean_lessons(lessons: &mut [Value], options: &CleanupOptions) -> CleanReport {
    let outcomes: Vec<Option<LessonOutcome>> = if options.parallel {
        lessons
            .par_iter_mut()
            .map(|lesson| clean_lesson(lesson, options))
            .collect()
    } else {
        lessons
            .iter_mut()
            .map(|lesson| clean_lesson(lesson, options))
            .collect()
    };

    let mut report = CleanReport {
        total_lessons: lessons.len(),
        ..CleanReport::default()
    };

    for (index, (lesson, outcome)) in lessons.iter().zip(outcomes).enumerate() {
        let Some(outcome) = outcome else {
            tracing::warn!(index, "lesson has no string {SOLUTION_FIELD}, skipped");
            report.lessons_skipped += 1;
            continue;
        };

        if outcome.changed {
            report.lessons_changed += 1;
        }

        if !outcome.problems.is_empty() {
            tracing::debug!(index, problems = ?outcome.problems, "lesson flagged");
            report.suspicious.push(SuspiciousLesson {
                id: lesson.get("id").cloned().unwrap_or(Value::Null),
                title: lesson.get("title").cloned().unwrap_or(Value::Null),
                problems: outcome.problems,
            });
        }
    }

    report.suspicious_count = report.suspicious.len();
    tracing::info!(
        total = report.total_lessons,
        changed = report.lessons_changed,
        suspicious = report.suspicious_count,
        skipped = report.lessons_skipped,
        "cleaned lessons"
    );
    report
}

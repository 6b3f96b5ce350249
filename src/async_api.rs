//! Async API for non-blocking lesson processing.
//!
//! Enable the `async` feature to use these APIs:
//!
//! ```toml
//! [dependencies]
//! endclean = { version = "0.1", features = ["async"] }
//! ```

use crate::error::{Error, Result};
use crate::lessons::{CleanReport, LessonDocument};
use crate::options::CleanupOptions;
use std::path::Path;
use tokio::fs;

/// Asynchronously loads a lesson document.
pub async fn load_lessons(path: impl AsRef<Path>) -> Result<LessonDocument> {
    let data = fs::read(path).await?;
    let root: serde_json::Value = serde_json::from_slice(&data)?;
    LessonDocument::from_value(root)
}

/// Asynchronously writes a lesson document.
pub async fn save_lessons(doc: &LessonDocument, path: impl AsRef<Path>) -> Result<()> {
    let json = doc.to_string_pretty()?;
    fs::write(path, json).await?;
    Ok(())
}

/// Asynchronously cleans a whole document.
///
/// Cleaning is CPU-bound, so it runs on the blocking pool.
pub async fn clean_document(
    mut doc: LessonDocument,
    options: &CleanupOptions,
) -> Result<(LessonDocument, CleanReport)> {
    let options = options.clone();
    tokio::task::spawn_blocking(move || {
        let report = doc.clean(&options);
        (doc, report)
    })
    .await
    .map_err(|e| Error::Io(std::io::Error::other(e.to_string())))
}

/// Asynchronously loads, cleans and saves a lesson document.
///
/// # Example
///
/// ```no_run
/// # async fn example() -> endclean::Result<()> {
/// use endclean::CleanupOptions;
///
/// let report = endclean::async_api::clean_file(
///     "lessons.json",
///     "lessons.clean.json",
///     &CleanupOptions::default(),
/// )
/// .await?;
/// println!("{} suspicious", report.suspicious_count);
/// # Ok(())
/// # }
/// ```
pub async fn clean_file(
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
    options: &CleanupOptions,
) -> Result<CleanReport> {
    let input = input.as_ref();
    let output = output.as_ref();

    let doc = load_lessons(input).await?;
    let (doc, report) = clean_document(doc, options).await?;
    save_lessons(&doc, output).await?;

    Ok(report.with_paths(input, Some(output)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_clean_file_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("lessons.json");
        let output = dir.path().join("clean.json");
        std::fs::write(
            &input,
            r#"{"lessons": [{"id": 1, "title": "t", "solutionText": "kn ight wins the race easily"}]}"#,
        )
        .unwrap();

        let report = clean_file(&input, &output, &CleanupOptions::default())
            .await
            .unwrap();
        assert_eq!(report.total_lessons, 1);
        assert_eq!(report.lessons_changed, 1);

        let doc = load_lessons(&output).await.unwrap();
        assert!(doc.is_wrapped());
        assert_eq!(doc.lessons()[0]["solutionText"], "knight wins the race easily");
    }

    #[tokio::test]
    async fn test_load_rejects_bad_shape() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, r#"{"items": []}"#).unwrap();

        let err = load_lessons(&path).await.unwrap_err();
        assert!(matches!(err, Error::InvalidShape(_)));
    }
}

//! End-to-end cleaning of lesson files on disk.

use endclean::{clean_file, CleanupOptions, LessonDocument, Problem};
use serde_json::{json, Value};
use std::fs;

fn write_json(dir: &tempfile::TempDir, name: &str, value: &Value) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, serde_json::to_string_pretty(value).unwrap()).unwrap();
    path
}

#[test]
fn cleans_bare_array_file() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_json(
        &dir,
        "lessons.json",
        &json!([
            {
                "id": "ke-01",
                "title": "Key squares",
                "solutionText": "White marches toward critical squares.\nd\n6\nThen Black loses the opposi-\ntion immediately. 4 2",
                "difficulty": 3
            },
            {
                "id": "ke-02",
                "title": "Broken",
                "solutionText": ["not", "text"]
            },
            {
                "id": "ke-03",
                "title": "Tiny",
                "solutionText": "R ook wins."
            }
        ]),
    );
    let output = dir.path().join("clean.json");

    let report = clean_file(&input, &output, &CleanupOptions::default()).unwrap();

    assert_eq!(report.total_lessons, 3);
    assert_eq!(report.lessons_changed, 2);
    assert_eq!(report.suspicious_count, 1);
    assert_eq!(report.suspicious[0].id, json!("ke-03"));
    assert_eq!(report.suspicious[0].problems, vec![Problem::VeryShortText]);
    assert!(report.input.as_ref().is_some_and(|p| p.is_absolute()));
    assert!(report.output.as_ref().is_some_and(|p| p.is_absolute()));

    let written: Value = serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
    assert_eq!(
        written[0]["solutionText"],
        "White marches toward critical squares.\nThen Black loses the opposition immediately."
    );
    assert_eq!(written[0]["difficulty"], 3);
    assert_eq!(written[1]["solutionText"], json!(["not", "text"]));
    assert_eq!(written[2]["solutionText"], "Rook wins.");
}

#[test]
fn keeps_wrapped_document_shape() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_json(
        &dir,
        "book.json",
        &json!({
            "book": "Endgame Manual",
            "lessons": [
                {"id": 1, "title": "Lucena", "solutionText": "Build a bridge with the R ook on the fourth rank."}
            ],
            "pages": 412
        }),
    );
    let output = dir.path().join("book.clean.json");

    clean_file(&input, &output, &CleanupOptions::default()).unwrap();

    let doc = LessonDocument::open(&output).unwrap();
    assert!(doc.is_wrapped());
    assert_eq!(
        doc.lessons()[0]["solutionText"],
        "Build a bridge with the Rook on the fourth rank."
    );

    let value = doc.into_value();
    let keys: Vec<_> = value.as_object().unwrap().keys().cloned().collect();
    assert_eq!(keys, ["book", "lessons", "pages"]);
}

#[test]
fn cleaning_twice_changes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_json(
        &dir,
        "lessons.json",
        &json!([
            {"id": 1, "solutionText": "White plays Kf7\nc\nand the obv ious plan wins.  12"},
            {"id": 2, "solutionText": "Black draws by the short-\nside defence____"}
        ]),
    );
    let first = dir.path().join("first.json");
    let second = dir.path().join("second.json");

    let report = clean_file(&input, &first, &CleanupOptions::default()).unwrap();
    assert_eq!(report.lessons_changed, 2);

    let report = clean_file(&first, &second, &CleanupOptions::default()).unwrap();
    assert_eq!(report.lessons_changed, 0);
    assert_eq!(
        fs::read_to_string(&first).unwrap(),
        fs::read_to_string(&second).unwrap()
    );
}

#[test]
fn rejects_unknown_shape() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_json(&dir, "bad.json", &json!({"chapters": []}));
    let output = dir.path().join("out.json");

    let err = clean_file(&input, &output, &CleanupOptions::default()).unwrap_err();
    assert!(matches!(err, endclean::Error::InvalidShape(_)));
    assert!(!output.exists());
}

use crate::{cleanup, detect_problems, should_join, CleanupOptions, LessonDocument};
use pyo3::prelude::*;

fn preset(name: Option<&str>) -> PyResult<CleanupOptions> {
    let name = name.unwrap_or("standard");
    CleanupOptions::preset(name).ok_or_else(|| {
        PyErr::new::<pyo3::exceptions::PyValueError, _>(format!("Unknown preset: {name}"))
    })
}

#[pyfunction]
#[pyo3(signature = (text, preset_name=None))]
fn clean_text(text: &str, preset_name: Option<&str>) -> PyResult<String> {
    let options = preset(preset_name)?;
    Ok(cleanup(text, &options))
}

#[pyfunction]
fn suspicion_problems(text: &str) -> Vec<String> {
    detect_problems(text)
        .into_iter()
        .map(|p| p.as_str().to_string())
        .collect()
}

#[pyfunction]
fn join_decision(left: &str, right: &str) -> bool {
    should_join(left, right)
}

/// Cleans a lesson document given as a JSON string.
///
/// Returns `(cleaned_json, report_json)`.
#[pyfunction]
#[pyo3(signature = (json, preset_name=None))]
fn clean_lessons_json(json: &str, preset_name: Option<&str>) -> PyResult<(String, String)> {
    let options = preset(preset_name)?;
    let to_py = |e: crate::Error| PyErr::new::<pyo3::exceptions::PyValueError, _>(e.to_string());

    let mut doc: LessonDocument = json.parse().map_err(to_py)?;
    let report = doc.clean(&options);

    Ok((
        doc.to_string_pretty().map_err(to_py)?,
        report.to_string_pretty().map_err(to_py)?,
    ))
}

#[pymodule]
fn _endclean(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(clean_text, m)?)?;
    m.add_function(wrap_pyfunction!(suspicion_problems, m)?)?;
    m.add_function(wrap_pyfunction!(join_decision, m)?)?;
    m.add_function(wrap_pyfunction!(clean_lessons_json, m)?)?;

    Ok(())
}

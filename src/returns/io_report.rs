use std::fs;
use std::path::Path;

use serde_json::Value as JSValue;
use text_diff::print_diff;

use crate::returns::*;

/// Writes the report as pretty-printed JSON, creating the parent directories.
pub fn write_report(report: &Report, path: &Path) -> ReturnsResult<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).context(CreatingOutputDirSnafu {
                path: parent.display().to_string(),
            })?;
        }
    }
    let js = serde_json::to_string_pretty(report).context(SerializingReportSnafu {})?;
    fs::write(path, js).context(WritingOutputSnafu {
        path: path.display().to_string(),
    })?;
    info!("Wrote report to {:?}", path);
    Ok(())
}

// The processing date changes with every run and is not compared.
fn comparable(mut js: JSValue) -> JSValue {
    if let Some(obj) = js.as_object_mut() {
        obj.remove("processed_date");
    }
    js
}

/// Compares the report with a report written by an earlier run.
pub fn check_reference(report: &Report, reference_path: &Path) -> ReturnsResult<()> {
    let path = reference_path.display().to_string();
    let contents = fs::read_to_string(reference_path).context(OpeningJsonSnafu {
        path: path.clone(),
    })?;
    let reference: JSValue = serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu {
        path: path.clone(),
    })?;
    let current = serde_json::to_value(report).context(SerializingReportSnafu {})?;

    let pretty_reference = serde_json::to_string_pretty(&comparable(reference))
        .context(SerializingReportSnafu {})?;
    let pretty_current =
        serde_json::to_string_pretty(&comparable(current)).context(SerializingReportSnafu {})?;
    if pretty_reference != pretty_current {
        warn!("Found differences with the reference report {:?}", path);
        print_diff(pretty_reference.as_str(), pretty_current.as_str(), "\n");
        whatever!(
            "Difference detected between the report and the reference report {}",
            path
        )
    }
    info!("The report matches the reference {:?}", path);
    Ok(())
}

use std::io::Write;
use std::path::{Path, PathBuf};

use crate::report::{QualityReport, ReportFormatter, TextReportFormatter};
use crate::{IoError, SiftResult};

/// Writes the text report, replacing any previous file at `path`.
pub fn write_quality_report(reports: &[QualityReport], path: &Path) -> SiftResult<()> {
    let content = TextReportFormatter.format(reports, &super::now_rfc3339());
    write_text_file(path, &content)?;
    tracing::info!(path = %path.display(), datasets = reports.len(), "data quality report saved");
    Ok(())
}

pub fn write_summary_json(reports: &[QualityReport], path: &Path) -> SiftResult<()> {
    let content = serde_json::to_string_pretty(reports)?;
    write_text_file(path, &content)?;
    tracing::info!(path = %path.display(), "json summary saved");
    Ok(())
}

fn write_text_file(path: &Path, content: &str) -> SiftResult<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let tmp_path = temp_path(path);
    let mut file = std::fs::File::create(&tmp_path).map_err(|err| {
        Box::new(IoError(format!(
            "failed to create {}: {err}",
            tmp_path.display()
        )))
    })?;
    let written = file
        .write_all(content.as_bytes())
        .and_then(|_| file.sync_all())
        .and_then(|_| std::fs::rename(&tmp_path, path));
    if let Err(err) = written {
        drop(file);
        let _ = std::fs::remove_file(&tmp_path);
        return Err(Box::new(IoError(format!(
            "failed to write {}: {err}",
            path.display()
        ))));
    }
    Ok(())
}

fn temp_path(path: &Path) -> PathBuf {
    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("report.txt");
    let tmp_name = format!("{file_name}.tmp-{}", std::process::id());
    path.with_file_name(tmp_name)
}

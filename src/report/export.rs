//! Report export to PDF and JSON.
//!
//! PDF output goes through [`super::layout_report`] and [`crate::pdf::encode`];
//! files are written to a temporary sibling and moved into place only once
//! the whole document has been written.

use super::sections::layout_report;
use super::stats::format_coverage;
use super::types::RenderStats;
use crate::config::LayoutConfig;
use crate::pdf;
use crate::types::{GeneralInfo, Summary, TestCase};
use log::{debug, info};
use std::fs::File;
use std::io::{self, Write};
use std::path::Path;
use tempfile::NamedTempFile;

/// Lay out and encode a report, returning the PDF bytes and render stats.
pub fn generate_pdf_with_stats(
    general: &GeneralInfo,
    cases: &[TestCase],
    summary: &Summary,
    config: &LayoutConfig,
) -> io::Result<(Vec<u8>, RenderStats)> {
    let (list, stats) =
        layout_report(general, cases, summary, config).map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
    let bytes = pdf::encode(&list, config)?;
    debug!("Encoded {} pages into {} bytes", list.page_count(), bytes.len());
    Ok((bytes, stats))
}

/// Lay out and encode a report into PDF bytes
pub fn generate_pdf(
    general: &GeneralInfo,
    cases: &[TestCase],
    summary: &Summary,
    config: &LayoutConfig,
) -> io::Result<Vec<u8>> {
    generate_pdf_with_stats(general, cases, summary, config).map(|(bytes, _)| bytes)
}

/// Write the report PDF to `output_path`.
///
/// The document is written to a temporary file in the same directory and
/// renamed over `output_path` on success, so a failed run never leaves a
/// truncated PDF behind.
pub fn save_pdf(
    general: &GeneralInfo,
    cases: &[TestCase],
    summary: &Summary,
    config: &LayoutConfig,
    output_path: &Path,
) -> io::Result<RenderStats> {
    let (bytes, stats) = generate_pdf_with_stats(general, cases, summary, config)?;

    let dir = match output_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(&bytes)?;
    tmp.as_file().sync_all()?;
    tmp.persist(output_path).map_err(|e| e.error)?;

    info!("Wrote {} ({} pages)", output_path.display(), stats.pages);
    Ok(stats)
}

/// Export the summary as pretty-printed JSON.
///
/// Coverage is derived at export time and written both as a number and in
/// the `NN.N` form used in the PDF.
pub fn export_json_summary(summary: &Summary, output_path: &Path) -> io::Result<()> {
    use serde_json::json;

    let report = json!({
        "generated_at": chrono::Local::now().to_rfc3339(),
        "summary": {
            "total": summary.total,
            "approved": summary.approved,
            "rejected": summary.rejected,
            "blocked": summary.blocked,
            "pending": summary.pending,
            "coverage": summary.coverage(),
            "coverage_display": format!("{}%", format_coverage(summary)),
            "consistent": summary.is_consistent(),
        },
        "notes": summary.notes,
    });

    let file = File::create(output_path)?;
    serde_json::to_writer_pretty(file, &report)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Status;

    fn sample() -> (GeneralInfo, Vec<TestCase>) {
        let general = GeneralInfo {
            product: "Portal".into(),
            responsible: "Ana".into(),
            objective: "Validar login".into(),
            ..Default::default()
        };
        let mut cases = vec![TestCase::new("Login", "Entra", "Entrou", Status::Approved)];
        crate::types::renumber(&mut cases);
        (general, cases)
    }

    #[test]
    fn test_generate_pdf_header() {
        let (general, cases) = sample();
        let summary = Summary::from_cases(&cases, "");
        let bytes = generate_pdf(&general, &cases, &summary, &LayoutConfig::default()).unwrap();
        assert!(bytes.starts_with(b"%PDF-"));
    }

    #[test]
    fn test_generate_pdf_rejects_invalid_layout() {
        let (general, cases) = sample();
        let summary = Summary::from_cases(&cases, "");
        let mut config = LayoutConfig::default();
        config.line_height = 0.5;
        let err = generate_pdf(&general, &cases, &summary, &config).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
    }

    #[test]
    fn test_save_pdf_writes_file() {
        let (general, cases) = sample();
        let summary = Summary::from_cases(&cases, "");
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("relatorio-teste.pdf");

        let stats = save_pdf(&general, &cases, &summary, &LayoutConfig::default(), &path).unwrap();
        assert_eq!(stats.pages, 1);
        assert_eq!(stats.test_cases, 1);
        let written = std::fs::read(&path).unwrap();
        assert!(written.starts_with(b"%PDF-"));
        // Only the final file remains in the directory
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_save_pdf_missing_directory_fails() {
        let (general, cases) = sample();
        let summary = Summary::from_cases(&cases, "");
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("out.pdf");
        assert!(save_pdf(&general, &cases, &summary, &LayoutConfig::default(), &path).is_err());
        assert!(!path.exists());
    }

    #[test]
    fn test_export_json_summary() {
        let cases: Vec<TestCase> = [Status::Approved, Status::Rejected, Status::Pending]
            .into_iter()
            .map(|s| TestCase::new("d", "e", "a", s))
            .collect();
        let summary = Summary::from_cases(&cases, "Sem bloqueios");
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("summary.json");

        export_json_summary(&summary, &path).unwrap();
        let value: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["summary"]["total"], 3);
        assert_eq!(value["summary"]["approved"], 1);
        assert_eq!(value["summary"]["coverage_display"], "33.3%");
        assert_eq!(value["summary"]["consistent"], true);
        assert_eq!(value["notes"], "Sem bloqueios");
    }
}

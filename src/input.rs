//! Loading a report description from disk.
//!
//! The CLI reads one JSON file holding the general info, the test cases and
//! the closing notes. Evidence is referenced by path, relative to the JSON
//! file, and read into memory here so the layout engine never touches the
//! filesystem.

use crate::types::{Evidence, GeneralInfo, ReportInput, Status, TestCase, renumber};
use log::{debug, warn};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ReportFile {
    #[serde(default)]
    general: GeneralInfo,
    #[serde(default)]
    test_cases: Vec<CaseEntry>,
    #[serde(default)]
    notes: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct CaseEntry {
    description: String,
    expected_result: String,
    actual_result: String,
    status: Status,
    evidences: Vec<PathBuf>,
}

/// MIME type for an evidence file, from its extension
pub fn media_type_for(path: &Path) -> &'static str {
    let ext = path.extension().and_then(|e| e.to_str()).map(|e| e.to_ascii_lowercase());
    match ext.as_deref() {
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("bmp") => "image/bmp",
        Some("webp") => "image/webp",
        Some("tif") | Some("tiff") => "image/tiff",
        _ => "application/octet-stream",
    }
}

fn load_evidence(base_dir: &Path, relative: &Path) -> Result<Evidence, String> {
    let path = base_dir.join(relative);
    let bytes = fs::read(&path).map_err(|e| format!("Failed to read evidence {}: {}", path.display(), e))?;
    let name = relative
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| relative.display().to_string());
    debug!("Loaded evidence {} ({} bytes)", path.display(), bytes.len());
    Ok(Evidence::new(name, media_type_for(relative), bytes))
}

/// Parse a report description, resolving evidence paths against `base_dir`.
///
/// Case ids are assigned from list order.
pub fn parse_report(json: &str, base_dir: &Path) -> Result<ReportInput, String> {
    let file: ReportFile = serde_json::from_str(json).map_err(|e| format!("Failed to parse report JSON: {}", e))?;

    let mut test_cases = Vec::with_capacity(file.test_cases.len());
    for (i, entry) in file.test_cases.into_iter().enumerate() {
        let mut case = TestCase::new(entry.description, entry.expected_result, entry.actual_result, entry.status);
        for relative in &entry.evidences {
            let evidence = load_evidence(base_dir, relative).map_err(|e| format!("Test case {}: {}", i + 1, e))?;
            case.evidences.push(evidence);
        }
        test_cases.push(case);
    }
    renumber(&mut test_cases);

    Ok(ReportInput { general: file.general, test_cases, notes: file.notes })
}

/// Load a report description file.
///
/// Missing required fields are logged, not rejected: the report still renders
/// with those cells empty.
pub fn load_report(path: &Path) -> Result<ReportInput, String> {
    let json = fs::read_to_string(path).map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;
    let base_dir = path.parent().unwrap_or_else(|| Path::new("."));
    let input = parse_report(&json, base_dir).map_err(|e| format!("{}: {}", path.display(), e))?;

    let missing = input.general.missing_required();
    if !missing.is_empty() {
        warn!("{}: missing required fields: {}", path.display(), missing.join(", "));
    }
    debug!("Loaded {} test cases from {}", input.test_cases.len(), path.display());
    Ok(input)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn write_png(path: &Path) {
        let img = image::RgbImage::from_pixel(3, 2, image::Rgb([0, 128, 255]));
        let mut buf = Cursor::new(Vec::new());
        image::DynamicImage::ImageRgb8(img).write_to(&mut buf, image::ImageFormat::Png).unwrap();
        fs::write(path, buf.into_inner()).unwrap();
    }

    #[test]
    fn test_media_type_for() {
        assert_eq!(media_type_for(Path::new("a.PNG")), "image/png");
        assert_eq!(media_type_for(Path::new("shots/b.jpeg")), "image/jpeg");
        assert_eq!(media_type_for(Path::new("notes.txt")), "application/octet-stream");
        assert_eq!(media_type_for(Path::new("noext")), "application/octet-stream");
    }

    #[test]
    fn test_parse_report_numbers_cases() {
        let json = r#"{
            "general": {"product": "Portal", "responsible": "Ana", "objective": "Login"},
            "test_cases": [
                {"description": "a", "status": "aprovado"},
                {"description": "b", "status": "bloqueado"},
                {"description": "c"}
            ],
            "notes": "Fim"
        }"#;
        let input = parse_report(json, Path::new(".")).unwrap();
        assert_eq!(input.general.product, "Portal");
        assert_eq!(input.test_cases.iter().map(|c| c.id).collect::<Vec<_>>(), vec![1, 2, 3]);
        assert_eq!(input.test_cases[0].status, Status::Approved);
        assert_eq!(input.test_cases[1].status, Status::Blocked);
        assert_eq!(input.test_cases[2].status, Status::Pending);
        assert_eq!(input.notes, "Fim");
    }

    #[test]
    fn test_parse_report_rejects_unknown_top_level_key() {
        let err = parse_report(r#"{"generl": {}}"#, Path::new(".")).unwrap_err();
        assert!(err.contains("Failed to parse report JSON"));
    }

    #[test]
    fn test_load_report_reads_evidence_relative_to_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("shots")).unwrap();
        write_png(&dir.path().join("shots").join("login.png"));
        let report = dir.path().join("report.json");
        fs::write(
            &report,
            r#"{"test_cases": [{"description": "Login", "status": "approved", "evidences": ["shots/login.png"]}]}"#,
        )
        .unwrap();

        let input = load_report(&report).unwrap();
        let evidence = &input.test_cases[0].evidences[0];
        assert_eq!(evidence.name, "login.png");
        assert_eq!(evidence.media_type, "image/png");
        assert!(crate::images::decode_image(evidence).is_ok());
    }

    #[test]
    fn test_load_report_missing_evidence_fails() {
        let dir = tempfile::tempdir().unwrap();
        let report = dir.path().join("report.json");
        fs::write(&report, r#"{"test_cases": [{"evidences": ["gone.png"]}]}"#).unwrap();

        let err = load_report(&report).unwrap_err();
        assert!(err.contains("Test case 1"), "unexpected error: {}", err);
        assert!(err.contains("gone.png"));
    }

    #[test]
    fn test_load_report_missing_file() {
        let err = load_report(Path::new("/nonexistent/report.json")).unwrap_err();
        assert!(err.contains("Failed to read"));
    }
}

use crate::config::{LAYOUT_ENV, LayoutConfig, resolve_layout};
use clap::Parser;
use std::path::PathBuf;

/// Default name of the generated PDF
pub const DEFAULT_OUTPUT: &str = "relatorio-teste.pdf";

#[derive(Parser, Debug, Clone)]
#[command(name = "evidence-report")]
#[command(about = "Render test-execution evidence into a paginated PDF report")]
#[command(version)]
pub struct CliArgs {
    /// JSON file describing the execution: general info, test cases, notes.
    /// Evidence paths inside it are relative to the file.
    #[arg(value_name = "INPUT.json")]
    pub input: PathBuf,

    /// PDF output path
    #[arg(long, short = 'o', default_value = DEFAULT_OUTPUT)]
    pub output: PathBuf,

    /// Layout TOML overriding page size, margins, fonts and spacing.
    /// Falls back to the EVIDENCE_REPORT_LAYOUT environment variable.
    #[arg(long, value_name = "PATH")]
    pub layout: Option<PathBuf>,

    /// Also write the summary counts and coverage as JSON
    #[arg(long, value_name = "PATH")]
    pub json_summary: Option<PathBuf>,

    /// Override the detected console width (for reproducible output)
    #[arg(long, value_name = "COLUMNS")]
    pub console_width: Option<usize>,

    /// Don't print the summary tables
    #[arg(long, short = 'q')]
    pub quiet: bool,
}

impl CliArgs {
    /// Parse command-line arguments
    pub fn parse_args() -> Self {
        CliArgs::parse()
    }

    /// Validate argument combinations
    pub fn validate(&self) -> Result<(), String> {
        if !self.input.is_file() {
            return Err(format!("Input file {} does not exist", self.input.display()));
        }

        if self.output.is_dir() {
            return Err(format!("Output path {} is a directory", self.output.display()));
        }

        if self.json_summary.as_ref() == Some(&self.output) {
            return Err("--json-summary must not point at the PDF output".to_string());
        }

        Ok(())
    }

    /// Layout from --layout, the environment, or the defaults
    pub fn layout_config(&self) -> Result<LayoutConfig, String> {
        resolve_layout(self.layout.as_deref()).map_err(|e| {
            if self.layout.is_none() { format!("{} (from {})", e, LAYOUT_ENV) } else { e }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(input: PathBuf) -> CliArgs {
        CliArgs {
            input,
            output: PathBuf::from(DEFAULT_OUTPUT),
            layout: None,
            json_summary: None,
            console_width: None,
            quiet: false,
        }
    }

    #[test]
    fn test_parse_defaults() {
        let parsed = CliArgs::try_parse_from(["evidence-report", "report.json"]).unwrap();
        assert_eq!(parsed.input, PathBuf::from("report.json"));
        assert_eq!(parsed.output, PathBuf::from("relatorio-teste.pdf"));
        assert!(parsed.layout.is_none());
        assert!(!parsed.quiet);
    }

    #[test]
    fn test_parse_all_flags() {
        let parsed = CliArgs::try_parse_from([
            "evidence-report",
            "report.json",
            "-o",
            "out.pdf",
            "--layout",
            "letter.toml",
            "--json-summary",
            "summary.json",
            "--quiet",
        ])
        .unwrap();
        assert_eq!(parsed.output, PathBuf::from("out.pdf"));
        assert_eq!(parsed.layout, Some(PathBuf::from("letter.toml")));
        assert_eq!(parsed.json_summary, Some(PathBuf::from("summary.json")));
        assert!(parsed.quiet);
    }

    #[test]
    fn test_parse_requires_input() {
        assert!(CliArgs::try_parse_from(["evidence-report"]).is_err());
    }

    #[test]
    fn test_validate_missing_input_fails() {
        let err = args(PathBuf::from("/nonexistent/report.json")).validate().unwrap_err();
        assert!(err.contains("does not exist"));
    }

    #[test]
    fn test_validate_summary_clobbering_pdf_fails() {
        let input = tempfile::NamedTempFile::new().unwrap();
        let mut args = args(input.path().to_path_buf());
        args.json_summary = Some(args.output.clone());
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_validate_valid_args_succeeds() {
        let input = tempfile::NamedTempFile::new().unwrap();
        assert!(args(input.path().to_path_buf()).validate().is_ok());
    }
}

//! Test evidence report generation.
//!
//! Turns the general information of a test execution, its ordered test cases
//! (with screenshot evidence) and a summary into a paginated PDF. Layout goes
//! through the [`canvas::Canvas`] capability and is recorded into a
//! [`canvas::DisplayList`], which [`pdf::encode`] turns into a document.
//!
//! The usual entry points are [`report::save_pdf`] and
//! [`report::generate_pdf`]; [`report::layout_report`] exposes the pages for
//! inspection.

pub mod canvas;
pub mod cli;
pub mod config;
pub mod console_format;
pub mod images;
pub mod input;
pub mod labels;
pub mod layout;
pub mod metrics;
pub mod pdf;
pub mod report;
pub mod types;
pub mod ui;

pub use config::LayoutConfig;
pub use report::{RenderStats, export_json_summary, generate_pdf, layout_report, render_report, save_pdf};
pub use types::{Evidence, GeneralInfo, ReportInput, Status, Summary, TestCase};

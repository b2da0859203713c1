//! Report generation module - section layout and export.
//!
//! This module handles:
//! - Laying out the report sections onto a canvas in their fixed order
//! - Formatting coverage and execution dates
//! - Export to PDF and JSON
//!
//! Console rendering is handled by the console_format module.
//!
//! # Module Organization
//!
//! - `types` - Render statistics
//! - `stats` - Coverage formatting and summary checks
//! - `format` - Date parsing and formatting
//! - `sections` - The section renderers and `render_report`
//! - `export` - PDF and JSON sinks

mod export;
mod format;
mod sections;
mod stats;
mod types;

pub use types::RenderStats;

pub use format::{format_date, parse_date};
pub use stats::{check_summary, format_coverage};

pub use sections::{layout_report, render_report};

pub use export::{export_json_summary, generate_pdf, generate_pdf_with_stats, save_pdf};

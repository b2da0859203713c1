/// Console formatting module - Pure rendering concerns
///
/// This module handles the terminal output of the CLI:
/// - The summary table printed after a report is written
/// - The per-case listing with status colors
/// - Text truncation and padding for box-drawn tables
///
/// It accepts the summary and case list and renders them to any
/// `std::io::Write` destination, so tests can render into a buffer.
use crate::labels;
use crate::report::{RenderStats, format_coverage};
use crate::types::{Status, Summary, TestCase};
use std::io::{self, Write};
use std::sync::OnceLock;
use term::color::Color;
use terminal_size::{Width, terminal_size};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Width of the label column in the summary table
const SUMMARY_LABEL_WIDTH: usize = 22;
/// Width of the value column in the summary table
const SUMMARY_VALUE_WIDTH: usize = 10;
/// Widths of the id and status columns in the case listing
const CASE_ID_WIDTH: usize = 6;
const CASE_STATUS_WIDTH: usize = 13;
/// Narrowest description column the case listing will use
const MIN_DESCRIPTION_WIDTH: usize = 20;
/// Widest the case listing grows, even on very wide terminals
const MAX_TABLE_WIDTH: usize = 110;

/// Writer for table output - configurable for color/plain text
pub struct TableWriter<W: Write> {
    writer: W,
    use_colors: bool,
}

impl<W: Write> TableWriter<W> {
    /// Create a new table writer
    pub fn new(writer: W, use_colors: bool) -> Self {
        Self { writer, use_colors }
    }

    /// Write formatted text, optionally with color
    fn write_colored(&mut self, text: &str, color: Color) -> io::Result<()> {
        if self.use_colors {
            if let Some(ref mut t) = term::stdout() {
                let _ = t.fg(color);
                let _ = t.write_all(text.as_bytes());
                let _ = t.reset();
                Ok(())
            } else {
                write!(self.writer, "{}", text)
            }
        } else {
            write!(self.writer, "{}", text)
        }
    }

    /// Write the summary block: one row per counter, then coverage
    pub fn write_summary_table(&mut self, summary: &Summary) -> io::Result<()> {
        write!(self.writer, "{}", format_summary_border('┌', '┬', '┐'))?;
        self.write_summary_row(labels::SUMMARY_TOTAL, &summary.total.to_string(), None)?;
        write!(self.writer, "{}", format_summary_border('├', '┼', '┤'))?;
        for status in Status::ALL {
            self.write_summary_row(status.summary_label(), &summary.count(status).to_string(), Some(status))?;
        }
        write!(self.writer, "{}", format_summary_border('├', '┼', '┤'))?;
        self.write_summary_row(labels::SUMMARY_COVERAGE, &format!("{}%", format_coverage(summary)), None)?;
        write!(self.writer, "{}", format_summary_border('└', '┴', '┘'))
    }

    fn write_summary_row(&mut self, label: &str, value: &str, status: Option<Status>) -> io::Result<()> {
        let label = truncate_with_padding(label, SUMMARY_LABEL_WIDTH - 2);
        let value = format!("{:>width$}", value, width = SUMMARY_VALUE_WIDTH - 2);
        write!(self.writer, "│ ")?;
        match status {
            Some(status) => self.write_colored(&label, status_color(status))?,
            None => write!(self.writer, "{}", label)?,
        }
        writeln!(self.writer, " │ {} │", value)
    }

    /// Write one line per test case: id, colored status and description
    pub fn write_case_table(&mut self, cases: &[TestCase], table_width: usize) -> io::Result<()> {
        let description_width = case_description_width(table_width);
        write!(self.writer, "{}", format_case_border('┌', '┬', '┐', description_width))?;
        writeln!(
            self.writer,
            "│{:^id$}│{:^status$}│{:^desc$}│",
            "#",
            "Status",
            labels::DESCRIPTION.trim_end_matches(':'),
            id = CASE_ID_WIDTH,
            status = CASE_STATUS_WIDTH,
            desc = description_width
        )?;
        write!(self.writer, "{}", format_case_border('├', '┼', '┤', description_width))?;

        for case in cases {
            let description = case.description.lines().next().unwrap_or("");
            write!(self.writer, "│ {:>width$} │ ", case.id, width = CASE_ID_WIDTH - 2)?;
            let status = truncate_with_padding(case.status.label(), CASE_STATUS_WIDTH - 2);
            self.write_colored(&status, status_color(case.status))?;
            writeln!(self.writer, " │ {} │", truncate_with_padding(description, description_width - 2))?;
        }

        write!(self.writer, "{}", format_case_border('└', '┴', '┘', description_width))
    }

    /// Write the closing line naming the output file
    pub fn write_result_line(&mut self, output: &str, stats: &RenderStats) -> io::Result<()> {
        write!(self.writer, "{}", format_result_line(output, stats))
    }
}

/// Terminal color for a status
pub fn status_color(status: Status) -> Color {
    match status {
        Status::Approved => term::color::GREEN,
        Status::Rejected => term::color::RED,
        Status::Blocked => term::color::YELLOW,
        Status::Pending => term::color::WHITE,
    }
}

fn format_summary_border(left: char, middle: char, right: char) -> String {
    format!(
        "{}{}{}{}{}\n",
        left,
        "─".repeat(SUMMARY_LABEL_WIDTH),
        middle,
        "─".repeat(SUMMARY_VALUE_WIDTH),
        right
    )
}

fn format_case_border(left: char, middle: char, right: char, description_width: usize) -> String {
    format!(
        "{}{}{}{}{}{}{}\n",
        left,
        "─".repeat(CASE_ID_WIDTH),
        middle,
        "─".repeat(CASE_STATUS_WIDTH),
        middle,
        "─".repeat(description_width),
        right
    )
}

/// Description column width for a case table `table_width` columns wide
pub fn case_description_width(table_width: usize) -> usize {
    // Four vertical borders
    let fixed = CASE_ID_WIDTH + CASE_STATUS_WIDTH + 4;
    table_width.min(MAX_TABLE_WIDTH).saturating_sub(fixed).max(MIN_DESCRIPTION_WIDTH)
}

/// Format the summary table as a string, without colors
pub fn format_summary_table(summary: &Summary) -> String {
    let mut buf = Vec::new();
    let _ = TableWriter::new(&mut buf, false).write_summary_table(summary);
    String::from_utf8_lossy(&buf).into_owned()
}

/// Format the case listing as a string, without colors
pub fn format_case_table(cases: &[TestCase], table_width: usize) -> String {
    let mut buf = Vec::new();
    let _ = TableWriter::new(&mut buf, false).write_case_table(cases, table_width);
    String::from_utf8_lossy(&buf).into_owned()
}

/// Format the closing line, mentioning skipped evidence when there was any
pub fn format_result_line(output: &str, stats: &RenderStats) -> String {
    let pages = if stats.pages == 1 { "page" } else { "pages" };
    let mut line = format!("\nWrote {} ({} {}, {} images)", output, stats.pages, pages, stats.images_drawn);
    if stats.images_skipped > 0 {
        line.push_str(&format!(", {} evidence files could not be decoded", stats.images_skipped));
    }
    line.push('\n');
    line
}

/// Print summary, case listing and result line to stdout with colors
pub fn print_report_overview(summary: &Summary, cases: &[TestCase], output: &str, stats: &RenderStats) {
    let mut writer = TableWriter::new(io::stdout(), true);
    let _ = writer.write_summary_table(summary);
    if !cases.is_empty() {
        let _ = writer.write_case_table(cases, get_console_width());
    }
    let _ = writer.write_result_line(output, stats);
}

//
// Console Width
//

static CONSOLE_WIDTH: OnceLock<usize> = OnceLock::new();

/// Override the detected console width (for reproducible output)
pub fn set_console_width(width: usize) {
    let _ = CONSOLE_WIDTH.set(width); // Ignore error if already initialized
}

/// Console width: the override if set, else the terminal's, else 100
pub fn get_console_width() -> usize {
    *CONSOLE_WIDTH.get_or_init(|| if let Some((Width(w), _)) = terminal_size() { w as usize } else { 100 })
}

//
// Text Formatting Utilities
//

/// Count the display width of a string, accounting for wide Unicode characters
pub fn display_width(s: &str) -> usize {
    UnicodeWidthStr::width(s)
}

/// Truncate and pad string to exact width
pub fn truncate_with_padding(s: &str, width: usize) -> String {
    let display_w = display_width(s);

    if display_w > width {
        let mut result = String::new();
        let mut current_width = 0;

        // Reserve space for "..."
        let target_width = if width >= 3 { width - 3 } else { width };

        for c in s.chars() {
            let c_width = UnicodeWidthChar::width(c).unwrap_or(1);
            if current_width + c_width > target_width {
                break;
            }
            result.push(c);
            current_width += c_width;
        }

        if width >= 3 {
            result.push_str("...");
            current_width += 3;
        }

        if current_width < width {
            result.push_str(&" ".repeat(width - current_width));
        }

        result
    } else {
        format!("{}{}", s, " ".repeat(width - display_w))
    }
}

#[cfg(test)]
#[path = "console_format_test.rs"]
mod console_format_test;

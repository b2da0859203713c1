//! Summary formatting and consistency checks.
//!
//! The summary is computed by the caller; the report only formats it. These
//! helpers keep the derived coverage figure and the sanity checks in one place.

use crate::types::Summary;
use log::warn;

/// Coverage percentage with exactly one decimal digit ("33.3").
pub fn format_coverage(summary: &Summary) -> String {
    format!("{:.1}", summary.coverage())
}

/// Warn when the summary doesn't match the case list it claims to describe.
///
/// Returns true when the summary is consistent. The report is rendered either
/// way; the counts are printed as given.
pub fn check_summary(summary: &Summary, case_count: usize) -> bool {
    let mut consistent = true;

    if !summary.is_consistent() {
        warn!(
            "Summary counts ({} approved + {} rejected + {} blocked + {} pending) don't add up to total {}",
            summary.approved, summary.rejected, summary.blocked, summary.pending, summary.total
        );
        consistent = false;
    }

    if summary.total != case_count {
        warn!("Summary total {} doesn't match the {} test cases being rendered", summary.total, case_count);
        consistent = false;
    }

    consistent
}

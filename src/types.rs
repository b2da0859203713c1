/// Core data structures for test evidence reports
///
/// This module defines the records the report is generated from: the general
/// execution info, the ordered list of test cases with their evidence images,
/// and the summary aggregate computed from that list.
use crate::canvas::Rgb;
use crate::labels;

/// General information about the test execution
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct GeneralInfo {
    pub product: String,
    pub version: Option<String>,
    /// Raw execution date as entered ("2024-03-05" or RFC 3339)
    pub date: Option<String>,
    pub responsible: String,
    pub test_type: Option<String>,
    pub environment: Option<String>,
    pub os: Option<String>,
    pub browser: Option<String>,
    pub database: Option<String>,
    pub objective: String,
}

impl GeneralInfo {
    /// Names of required fields that are blank.
    ///
    /// The layout engine renders regardless; this is for callers that want to
    /// refuse or warn before generating.
    pub fn missing_required(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.product.trim().is_empty() {
            missing.push("product");
        }
        if self.responsible.trim().is_empty() {
            missing.push("responsible");
        }
        if self.objective.trim().is_empty() {
            missing.push("objective");
        }
        missing
    }
}

/// Outcome recorded for a test case
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Status {
    /// No outcome selected yet
    #[default]
    Pending = 0,
    Approved = 1,
    Rejected = 2,
    Blocked = 3,
}

/// Printed label and fill colors for each status
struct StatusStyle {
    label: &'static str,
    summary_label: &'static str,
    summary_fill: Rgb,
    banner_fill: Rgb,
}

// Indexed by `Status as usize`
static STATUS_STYLES: [StatusStyle; 4] = [
    StatusStyle {
        label: labels::STATUS_PENDING,
        summary_label: labels::SUMMARY_PENDING,
        summary_fill: Rgb::GRAY,
        banner_fill: Rgb::AMBER,
    },
    StatusStyle {
        label: labels::STATUS_APPROVED,
        summary_label: labels::SUMMARY_APPROVED,
        summary_fill: Rgb::GREEN,
        banner_fill: Rgb::GREEN,
    },
    StatusStyle {
        label: labels::STATUS_REJECTED,
        summary_label: labels::SUMMARY_REJECTED,
        summary_fill: Rgb::RED,
        banner_fill: Rgb::RED,
    },
    StatusStyle {
        label: labels::STATUS_BLOCKED,
        summary_label: labels::SUMMARY_BLOCKED,
        summary_fill: Rgb::AMBER,
        banner_fill: Rgb::AMBER,
    },
];

impl Status {
    /// All statuses in summary display order
    pub const ALL: [Status; 4] = [Status::Approved, Status::Rejected, Status::Blocked, Status::Pending];

    fn style(&self) -> &'static StatusStyle {
        &STATUS_STYLES[*self as usize]
    }

    /// Parse a status as entered in the form. Unknown text is `Pending`.
    pub fn parse(s: &str) -> Status {
        match s.trim().to_lowercase().as_str() {
            "aprovado" | "approved" | "passed" | "pass" => Status::Approved,
            "reprovado" | "rejected" | "failed" | "fail" => Status::Rejected,
            "bloqueado" | "blocked" => Status::Blocked,
            _ => Status::Pending,
        }
    }

    /// Label printed in the report ("Aprovado", ...)
    pub fn label(&self) -> &'static str {
        self.style().label
    }

    /// Label of this status' counter in the summary block
    pub fn summary_label(&self) -> &'static str {
        self.style().summary_label
    }

    /// Fill of the counter row in the summary block
    pub fn summary_fill(&self) -> Rgb {
        self.style().summary_fill
    }

    /// Fill of the test-case banner
    pub fn banner_fill(&self) -> Rgb {
        self.style().banner_fill
    }
}

impl From<String> for Status {
    fn from(s: String) -> Self {
        Status::parse(&s)
    }
}

impl From<Status> for String {
    fn from(status: Status) -> Self {
        status.label().to_string()
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// An image attached to a test case
#[derive(Debug, Clone, PartialEq)]
pub struct Evidence {
    /// File name or caption, used in log messages
    pub name: String,
    /// MIME type as declared by the picker ("image/png")
    pub media_type: String,
    pub bytes: Vec<u8>,
}

impl Evidence {
    pub fn new(name: impl Into<String>, media_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self { name: name.into(), media_type: media_type.into(), bytes }
    }
}

/// A single test case and its recorded outcome
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TestCase {
    /// Position in the list, starting at 1
    pub id: u32,
    pub description: String,
    pub expected_result: String,
    pub actual_result: String,
    pub status: Status,
    pub evidences: Vec<Evidence>,
}

impl TestCase {
    pub fn new(
        description: impl Into<String>,
        expected_result: impl Into<String>,
        actual_result: impl Into<String>,
        status: Status,
    ) -> Self {
        Self {
            id: 0,
            description: description.into(),
            expected_result: expected_result.into(),
            actual_result: actual_result.into(),
            status,
            evidences: Vec::new(),
        }
    }
}

/// Renumber cases so ids are 1..N in list order
pub fn renumber(cases: &mut [TestCase]) {
    for (i, case) in cases.iter_mut().enumerate() {
        case.id = i as u32 + 1;
    }
}

/// Aggregate counts over the test-case list
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Summary {
    pub total: usize,
    pub approved: usize,
    pub rejected: usize,
    pub blocked: usize,
    pub pending: usize,
    /// Free-text closing notes
    pub notes: String,
}

impl Summary {
    /// Count cases by status.
    pub fn from_cases(cases: &[TestCase], notes: impl Into<String>) -> Self {
        let mut summary = Summary { total: cases.len(), notes: notes.into(), ..Default::default() };
        for case in cases {
            match case.status {
                Status::Approved => summary.approved += 1,
                Status::Rejected => summary.rejected += 1,
                Status::Blocked => summary.blocked += 1,
                Status::Pending => summary.pending += 1,
            }
        }
        summary
    }

    /// Counter for a given status
    pub fn count(&self, status: Status) -> usize {
        match status {
            Status::Approved => self.approved,
            Status::Rejected => self.rejected,
            Status::Blocked => self.blocked,
            Status::Pending => self.pending,
        }
    }

    /// Percentage of approved cases; 0.0 when there are no cases
    pub fn coverage(&self) -> f64 {
        if self.total == 0 { 0.0 } else { self.approved as f64 / self.total as f64 * 100.0 }
    }

    /// True when the status counters partition `total`
    pub fn is_consistent(&self) -> bool {
        self.approved + self.rejected + self.blocked + self.pending == self.total
    }
}

/// Everything a report is generated from, as collected by the form
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReportInput {
    pub general: GeneralInfo,
    pub test_cases: Vec<TestCase>,
    pub notes: String,
}

impl ReportInput {
    /// Append a case; it receives the next id
    pub fn add_case(&mut self, case: TestCase) {
        self.test_cases.push(case);
        renumber(&mut self.test_cases);
    }

    /// Insert a case before `position` (0-based, clamped to the list length)
    pub fn insert_case(&mut self, position: usize, case: TestCase) {
        let position = position.min(self.test_cases.len());
        self.test_cases.insert(position, case);
        renumber(&mut self.test_cases);
    }

    /// Remove the case with `id`, returning it. Remaining ids are renumbered.
    pub fn remove_case(&mut self, id: u32) -> Option<TestCase> {
        let index = self.test_cases.iter().position(|c| c.id == id)?;
        let removed = self.test_cases.remove(index);
        renumber(&mut self.test_cases);
        Some(removed)
    }

    pub fn summary(&self) -> Summary {
        Summary::from_cases(&self.test_cases, self.notes.clone())
    }
}

#[cfg(test)]
#[path = "data_structures_test.rs"]
mod data_structures_test;

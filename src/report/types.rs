//! Report type definitions.

/// What a layout pass produced.
///
/// Returned alongside the pages so callers can log or display how the
/// evidence was handled without inspecting draw operations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize)]
pub struct RenderStats {
    /// Number of pages in the document
    pub pages: usize,
    /// Number of test-case sections rendered
    pub test_cases: usize,
    /// Evidence images placed on a page
    pub images_drawn: usize,
    /// Evidence images that failed to decode and were left out
    pub images_skipped: usize,
}

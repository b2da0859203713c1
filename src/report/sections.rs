//! Report sections in their fixed rendering order.
//!
//! Title, general info, summary, scope, one section per test case, and the
//! closing notes when there are any.

use super::format::format_date;
use super::stats::{check_summary, format_coverage};
use super::types::RenderStats;
use crate::canvas::{Canvas, DisplayList, Rgb};
use crate::config::LayoutConfig;
use crate::images::DecodedImage;
use crate::labels;
use crate::layout::LayoutContext;
use crate::types::{GeneralInfo, Status, Summary, TestCase};
use log::{debug, info, warn};

/// Lay out a complete report onto `canvas`.
///
/// The layout is validated before anything is drawn. Evidence that fails to
/// decode is logged and left out.
pub fn render_report<C: Canvas>(
    canvas: &mut C,
    general: &GeneralInfo,
    cases: &[TestCase],
    summary: &Summary,
    config: &LayoutConfig,
) -> Result<RenderStats, String> {
    config.validate().map_err(|e| format!("Invalid layout: {}", e))?;
    info!("Rendering report for '{}' with {} test cases", general.product, cases.len());
    check_summary(summary, cases.len());

    let mut stats = RenderStats::default();
    let mut ctx = LayoutContext::begin(canvas, config);

    ctx.title(labels::TITLE);
    ctx.gap(config.section_gap);

    render_general_info(&mut ctx, general);
    render_summary(&mut ctx, summary);
    render_scope(&mut ctx, general);

    let first_case = if cases.is_empty() { 0.0 } else { config.field_gap + case_opening_height(config) };
    ctx.heading(labels::SECTION_CASES, first_case);
    ctx.gap(config.field_gap);

    let mut ordered: Vec<&TestCase> = cases.iter().collect();
    ordered.sort_by_key(|case| case.id);
    for case in ordered {
        render_test_case(&mut ctx, case, &mut stats);
    }

    render_notes(&mut ctx, summary);

    stats.pages = ctx.finish();
    info!(
        "Report laid out on {} pages ({} images, {} skipped)",
        stats.pages, stats.images_drawn, stats.images_skipped
    );
    Ok(stats)
}

/// Lay out a report into a fresh [`DisplayList`].
pub fn layout_report(
    general: &GeneralInfo,
    cases: &[TestCase],
    summary: &Summary,
    config: &LayoutConfig,
) -> Result<(DisplayList, RenderStats), String> {
    let mut list = DisplayList::new();
    let stats = render_report(&mut list, general, cases, summary, config)?;
    Ok((list, stats))
}

/// What has to follow a case banner on its page: the gap, the description
/// label and the first description line
fn banner_keep_height(config: &LayoutConfig) -> f32 {
    config.field_gap + 2.0 * config.line_height
}

fn case_opening_height(config: &LayoutConfig) -> f32 {
    config.banner_height + banner_keep_height(config)
}

fn render_general_info<C: Canvas>(ctx: &mut LayoutContext<'_, C>, general: &GeneralInfo) {
    ctx.heading(labels::SECTION_GENERAL, ctx.config().row_height);

    ctx.field(labels::PRODUCT, &general.product);
    ctx.field(labels::VERSION, general.version.as_deref().unwrap_or(""));
    ctx.field(labels::DATE, &format_date(general.date.as_deref()));
    ctx.field(labels::RESPONSIBLE, &general.responsible);

    let optional = [
        (labels::TEST_TYPE, &general.test_type),
        (labels::ENVIRONMENT, &general.environment),
        (labels::OS, &general.os),
        (labels::BROWSER, &general.browser),
        (labels::DATABASE, &general.database),
    ];
    for (label, value) in optional {
        if let Some(value) = value.as_deref().filter(|v| !v.trim().is_empty()) {
            ctx.field(label, value);
        }
    }

    ctx.gap(ctx.config().section_gap);
}

fn render_summary<C: Canvas>(ctx: &mut LayoutContext<'_, C>, summary: &Summary) {
    ctx.heading(labels::SECTION_SUMMARY, ctx.config().row_height);

    ctx.row(labels::SUMMARY_TOTAL, &summary.total.to_string(), Rgb::LIGHT_GRAY);
    for status in Status::ALL {
        ctx.row(status.summary_label(), &summary.count(status).to_string(), status.summary_fill());
    }
    ctx.row(labels::SUMMARY_COVERAGE, &format!("{}%", format_coverage(summary)), Rgb::LIGHT_GRAY);

    ctx.gap(ctx.config().section_gap);
}

fn render_scope<C: Canvas>(ctx: &mut LayoutContext<'_, C>, general: &GeneralInfo) {
    // Objective label and its first line
    ctx.heading(labels::SECTION_SCOPE, 2.0 * ctx.config().line_height);
    ctx.labeled_paragraph(labels::OBJECTIVE, &general.objective);
    ctx.gap(ctx.config().section_gap);
}

fn render_test_case<C: Canvas>(ctx: &mut LayoutContext<'_, C>, case: &TestCase, stats: &mut RenderStats) {
    let field_gap = ctx.config().field_gap;
    let keep = banner_keep_height(ctx.config());
    debug!("Test case {} ({}) starts on page {}", case.id, case.status, ctx.page_count());

    let title = format!("{} {} - {}", labels::CASE_TITLE, case.id, case.status.label());
    ctx.banner(&title, case.status.banner_fill(), keep);
    ctx.gap(field_gap);

    ctx.labeled_paragraph(labels::DESCRIPTION, &case.description);
    ctx.gap(field_gap);
    ctx.labeled_paragraph(labels::EXPECTED_RESULT, &case.expected_result);
    ctx.gap(field_gap);
    ctx.labeled_paragraph(labels::ACTUAL_RESULT, &case.actual_result);

    // Decode strictly in evidence order so the layout is deterministic
    let mut decoded: Vec<DecodedImage> = Vec::with_capacity(case.evidences.len());
    for (i, evidence) in case.evidences.iter().enumerate() {
        match ctx.canvas().decode_image(evidence) {
            Ok(image) => decoded.push(image),
            Err(e) => {
                warn!("Skipping evidence {} of test case {}: {}", i + 1, case.id, e);
                stats.images_skipped += 1;
            }
        }
    }

    if let Some(first) = decoded.first() {
        ctx.gap(field_gap);
        let (_, first_height) = ctx.image_size(first);
        let label_height = ctx.config().line_height;
        ctx.ensure_space(label_height + first_height);
        ctx.label_line(labels::EVIDENCES);
        for image in &decoded {
            ctx.image(image);
            ctx.gap(field_gap);
            stats.images_drawn += 1;
        }
    }

    ctx.separator();
    ctx.gap(ctx.config().section_gap);
    stats.test_cases += 1;
}

fn render_notes<C: Canvas>(ctx: &mut LayoutContext<'_, C>, summary: &Summary) {
    let notes = summary.notes.trim();
    if notes.is_empty() {
        return;
    }
    ctx.labeled_paragraph(labels::SECTION_NOTES, notes);
}

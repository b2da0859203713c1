//! Page layout cursor and block primitives.
//!
//! [`LayoutContext`] owns the vertical cursor of one in-flight document. Every
//! primitive emits exactly one unsplittable block (or, for paragraphs, one
//! block per wrapped line) and calls [`LayoutContext::ensure_space`] first, so
//! no draw operation ever extends below `page_height - margins.bottom`.
//!
//! Labels, headings and banners reserve room for the first block after them
//! as well, so none of them can be the last thing on a page.

use crate::canvas::{Canvas, Rect, Rgb, TextStyle};
use crate::config::LayoutConfig;
use crate::images::{self, DecodedImage};
use crate::metrics::FontStyle;
use log::debug;

/// Horizontal padding inside table cells and banners
pub const CELL_PADDING: f32 = 2.0;

/// Height of the block holding a separator rule
const SEPARATOR_BLOCK: f32 = 4.0;

/// Baseline that vertically centers a line of text in a block
fn baseline_in(top: f32, height: f32, style: &TextStyle) -> f32 {
    top + height / 2.0 + 0.255 * style.size_mm()
}

/// Mutable layout state threaded through every drawing call
pub struct LayoutContext<'a, C: Canvas> {
    canvas: &'a mut C,
    config: &'a LayoutConfig,
    y: f32,
    pages: usize,
}

impl<'a, C: Canvas> LayoutContext<'a, C> {
    /// Open the first page and place the cursor at the top margin
    pub fn begin(canvas: &'a mut C, config: &'a LayoutConfig) -> Self {
        canvas.new_page();
        Self { canvas, config, y: config.margins.top, pages: 1 }
    }

    pub fn config(&self) -> &LayoutConfig {
        self.config
    }

    pub fn canvas(&self) -> &C {
        &*self.canvas
    }

    /// Current vertical offset on the current page
    pub fn y(&self) -> f32 {
        self.y
    }

    pub fn page_count(&self) -> usize {
        self.pages
    }

    fn left(&self) -> f32 {
        self.config.margins.left
    }

    fn width(&self) -> f32 {
        self.config.content_width()
    }

    fn at_page_top(&self) -> bool {
        self.y <= self.config.margins.top
    }

    fn body_style(&self, font: FontStyle) -> TextStyle {
        TextStyle::new(font, self.config.font_sizes.body, Rgb::BLACK)
    }

    /// Start a new page before a block of `height` that would overflow.
    ///
    /// A block taller than the printable area is placed at the top of a page
    /// anyway; config validation rules that case out.
    pub fn ensure_space(&mut self, height: f32) {
        if self.y + height > self.config.max_y() && !self.at_page_top() {
            self.page_break();
        }
    }

    /// Unconditionally continue on a fresh page
    pub fn page_break(&mut self) {
        self.canvas.new_page();
        self.pages += 1;
        self.y = self.config.margins.top;
        debug!("Page break: now on page {}", self.pages);
    }

    /// Leave vertical space between blocks. Gaps are dropped at the top of a page.
    pub fn gap(&mut self, height: f32) {
        if !self.at_page_top() {
            self.y += height;
        }
    }

    /// One line of text in a block of `height`, starting at `x`
    fn text_block(&mut self, x: f32, height: f32, text: &str, style: TextStyle) {
        self.ensure_space(height);
        let baseline = baseline_in(self.y, height, &style);
        self.canvas.draw_text(x, baseline, text, style);
        self.y += height;
    }

    /// Full-width title banner with centered text
    pub fn title(&mut self, text: &str) {
        let height = self.config.title_height;
        let style = TextStyle::new(FontStyle::Bold, self.config.font_sizes.title, Rgb::PRIMARY.contrasting_text());
        self.ensure_space(height);

        let (left, width) = (self.left(), self.width());
        self.canvas.draw_rect(Rect::new(left, self.y, width, height), Rgb::PRIMARY);
        let text_width = self.canvas.measure_text_width(text, style.font, style.size);
        let x = left + ((width - text_width) / 2.0).max(0.0);
        self.canvas.draw_text(x, baseline_in(self.y, height, &style), text, style);
        self.y += height;
    }

    /// Section heading with a rule underneath.
    ///
    /// `keep_with` is the height of what has to follow on the same page.
    pub fn heading(&mut self, text: &str, keep_with: f32) {
        let height = self.config.heading_height;
        let style = TextStyle::new(FontStyle::Bold, self.config.font_sizes.heading, Rgb::PRIMARY);
        self.ensure_space(height + keep_with);

        let (left, width) = (self.left(), self.width());
        self.canvas.draw_text(left, baseline_in(self.y, height, &style), text, style);
        let rule_y = self.y + height - 0.5;
        self.canvas.draw_line((left, rule_y), (left + width, rule_y), 0.2, Rgb::PRIMARY);
        self.y += height;
    }

    /// A bold label on its own line
    pub fn label_line(&mut self, label: &str) {
        let style = self.body_style(FontStyle::Bold);
        self.text_block(self.left(), self.config.line_height, label, style);
    }

    fn wrap_body(&self, text: &str, indent: f32) -> Vec<String> {
        let style = self.body_style(FontStyle::Regular);
        self.canvas.wrap_text(text, style.font, style.size, self.width() - indent)
    }

    fn emit_lines(&mut self, lines: &[String], indent: f32) {
        let style = self.body_style(FontStyle::Regular);
        let x = self.left() + indent;
        for line in lines {
            self.text_block(x, self.config.line_height, line, style);
        }
    }

    /// Height of the first wrapped line, or zero when there is nothing to draw
    fn first_line_height(&self, lines: &[String]) -> f32 {
        if lines.is_empty() {
            0.0
        } else {
            self.config.line_height
        }
    }

    /// Word-wrapped paragraph at full content width, indented by `indent`.
    ///
    /// Breaks pages between lines. Returns the number of lines emitted.
    pub fn paragraph(&mut self, text: &str, indent: f32) -> usize {
        let lines = self.wrap_body(text, indent);
        self.emit_lines(&lines, indent);
        lines.len()
    }

    /// Bold label line followed by a wrapped paragraph below it.
    ///
    /// The label moves to the next page together with the first line.
    pub fn labeled_paragraph(&mut self, label: &str, text: &str) {
        let lines = self.wrap_body(text, 0.0);
        self.ensure_space(self.config.line_height + self.first_line_height(&lines));
        self.label_line(label);
        self.emit_lines(&lines, 0.0);
    }

    /// Whether `value` fits in the value column of a two-column row
    pub fn fits_inline(&self, value: &str) -> bool {
        if value.contains('\n') {
            return false;
        }
        let style = self.body_style(FontStyle::Regular);
        let value_width = self.canvas.measure_text_width(value, style.font, style.size);
        self.config.label_column + value_width + 2.0 * CELL_PADDING <= self.width()
    }

    /// Two-column table row: shaded label cell, value to its right
    pub fn row(&mut self, label: &str, value: &str, label_fill: Rgb) {
        let height = self.config.row_height;
        self.ensure_space(height);

        let left = self.left();
        let label_style = TextStyle::new(FontStyle::Bold, self.config.font_sizes.body, label_fill.contrasting_text());
        let value_style = self.body_style(FontStyle::Regular);
        let baseline = baseline_in(self.y, height, &label_style);

        self.canvas.draw_rect(Rect::new(left, self.y, self.config.label_column, height), label_fill);
        self.canvas.draw_text(left + CELL_PADDING, baseline, label, label_style);
        if !value.is_empty() {
            self.canvas.draw_text(left + self.config.label_column + CELL_PADDING, baseline, value, value_style);
        }
        let rule_y = self.y + height - 0.1;
        self.canvas.draw_line((left, rule_y), (left + self.width(), rule_y), 0.1, Rgb::LIGHT_GRAY);
        self.y += height;
    }

    /// A labeled field that decides its own shape.
    ///
    /// Short values share the row with their label; long or multi-line values
    /// get the label row to themselves and wrap below at full width.
    pub fn field(&mut self, label: &str, value: &str) {
        if self.fits_inline(value) {
            self.row(label, value, Rgb::LIGHT_GRAY);
        } else {
            let lines = self.wrap_body(value, CELL_PADDING);
            self.ensure_space(self.config.row_height + self.first_line_height(&lines));
            self.row(label, "", Rgb::LIGHT_GRAY);
            self.emit_lines(&lines, CELL_PADDING);
        }
    }

    /// Full-width colored banner with bold text, kept on the same page as
    /// the next `keep_with` millimetres
    pub fn banner(&mut self, text: &str, fill: Rgb, keep_with: f32) {
        let height = self.config.banner_height;
        let style = TextStyle::new(FontStyle::Bold, self.config.font_sizes.banner, fill.contrasting_text());
        self.ensure_space(height + keep_with);

        let (left, width) = (self.left(), self.width());
        self.canvas.draw_rect(Rect::new(left, self.y, width, height), fill);
        self.canvas.draw_text(left + CELL_PADDING + 1.0, baseline_in(self.y, height, &style), text, style);
        self.y += height;
    }

    /// Size an image will be drawn at: scaled to the content width and the
    /// configured height cap
    pub fn image_size(&self, image: &DecodedImage) -> (f32, f32) {
        images::fit_image(image.width, image.height, self.config.image_dpi, self.width(), self.config.image_max_height)
    }

    pub fn image(&mut self, image: &DecodedImage) -> Rect {
        let (width, height) = self.image_size(image);
        self.ensure_space(height);

        let rect = Rect::new(self.left(), self.y, width, height);
        self.canvas.draw_image(rect, image);
        self.y += height;
        rect
    }

    /// Thin horizontal rule across the content width
    pub fn separator(&mut self) {
        self.ensure_space(SEPARATOR_BLOCK);
        let (left, width) = (self.left(), self.width());
        let rule_y = self.y + SEPARATOR_BLOCK / 2.0;
        self.canvas.draw_line((left, rule_y), (left + width, rule_y), self.config.separator_width, Rgb::RULE);
        self.y += SEPARATOR_BLOCK;
    }

    /// Close the document, returning the number of pages
    pub fn finish(self) -> usize {
        self.pages
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::{DisplayList, DrawOp};

    fn assert_within_pages(list: &DisplayList, config: &LayoutConfig) {
        for (i, page) in list.pages().iter().enumerate() {
            for op in &page.ops {
                let (top, bottom) = op.extent();
                assert!(top >= config.margins.top - 1e-3, "page {}: {:?} above top margin", i + 1, op);
                assert!(bottom <= config.max_y() + 1e-3, "page {}: {:?} below max_y", i + 1, op);
            }
        }
    }

    #[test]
    fn test_begin_opens_first_page() {
        let config = LayoutConfig::default();
        let mut list = DisplayList::new();
        let ctx = LayoutContext::begin(&mut list, &config);
        assert_eq!(ctx.y(), 20.0);
        assert_eq!(ctx.finish(), 1);
        assert_eq!(list.page_count(), 1);
    }

    #[test]
    fn test_ensure_space_breaks_on_overflow() {
        let config = LayoutConfig::default();
        let mut list = DisplayList::new();
        let mut ctx = LayoutContext::begin(&mut list, &config);

        // Only 42 rows of 6mm fit in the 257mm printable height
        let mut rows = 0;
        while ctx.page_count() == 1 {
            ctx.label_line("row");
            rows += 1;
        }
        assert_eq!(rows, (257.0_f32 / 6.0).floor() as usize + 1);
        assert_eq!(ctx.y(), 20.0 + 6.0);
        ctx.finish();
        assert_within_pages(&list, &config);
    }

    #[test]
    fn test_gap_dropped_at_page_top() {
        let config = LayoutConfig::default();
        let mut list = DisplayList::new();
        let mut ctx = LayoutContext::begin(&mut list, &config);
        ctx.gap(10.0);
        assert_eq!(ctx.y(), 20.0);
        ctx.label_line("x");
        ctx.gap(10.0);
        assert_eq!(ctx.y(), 36.0);
    }

    #[test]
    fn test_paragraph_straddles_pages_line_by_line() {
        let config = LayoutConfig::default();
        let mut list = DisplayList::new();
        let mut ctx = LayoutContext::begin(&mut list, &config);
        let text = "Lorem ipsum dolor sit amet, consectetur adipiscing elit. ".repeat(120);
        let lines = ctx.paragraph(&text, 0.0);
        let pages = ctx.finish();

        assert!(pages > 1);
        let drawn = list.pages().iter().map(|p| p.texts().count()).sum::<usize>();
        assert_eq!(drawn, lines);
        assert_within_pages(&list, &config);
    }

    #[test]
    fn test_field_inline_when_value_fits() {
        let config = LayoutConfig::default();
        let mut list = DisplayList::new();
        let mut ctx = LayoutContext::begin(&mut list, &config);
        ctx.field("Produto:", "Portal");
        assert_eq!(ctx.y(), 20.0 + config.row_height);
        ctx.finish();

        let texts: Vec<&str> = list.texts().collect();
        assert_eq!(texts, vec!["Produto:", "Portal"]);
    }

    #[test]
    fn test_field_stacks_long_value() {
        let config = LayoutConfig::default();
        let mut list = DisplayList::new();
        let mut ctx = LayoutContext::begin(&mut list, &config);
        let value = "ambiente de homologação com replicação geográfica ".repeat(4);
        assert!(!ctx.fits_inline(&value));
        ctx.field("Ambiente:", &value);
        let y = ctx.y();
        ctx.finish();

        let texts: Vec<&str> = list.texts().collect();
        assert_eq!(texts[0], "Ambiente:");
        assert!(texts.len() > 2, "value should wrap onto several lines");
        assert!(y > 20.0 + config.row_height + config.line_height);
    }

    #[test]
    fn test_field_multiline_value_stacks() {
        let config = LayoutConfig::default();
        let mut list = DisplayList::new();
        let ctx = LayoutContext::begin(&mut list, &config);
        assert!(!ctx.fits_inline("a\nb"));
    }

    #[test]
    fn test_banner_fill_and_text() {
        let config = LayoutConfig::default();
        let mut list = DisplayList::new();
        let mut ctx = LayoutContext::begin(&mut list, &config);
        ctx.banner("Caso de Teste 1 - Aprovado", Rgb::GREEN, 0.0);
        ctx.finish();

        let ops = &list.pages()[0].ops;
        assert!(matches!(ops[0], DrawOp::Rect { fill, rect } if fill == Rgb::GREEN && rect.width == 170.0));
        assert!(matches!(&ops[1], DrawOp::Text { text, style, .. } if text == "Caso de Teste 1 - Aprovado" && style.color == Rgb::WHITE));
    }

    #[test]
    fn test_image_moves_to_next_page_when_too_tall() {
        let config = LayoutConfig::default();
        let mut list = DisplayList::new();
        let mut ctx = LayoutContext::begin(&mut list, &config);
        // Leave 30mm on the page, then place an image capped at 80mm
        while ctx.y() < config.max_y() - 30.0 {
            ctx.label_line("filler");
        }
        let image = DecodedImage { width: 800, height: 800, rgb: vec![0; 800 * 800 * 3] };
        let rect = ctx.image(&image);
        assert_eq!(ctx.page_count(), 2);
        assert_eq!(rect.y, 20.0);
        assert!((rect.height - 80.0).abs() < 1e-3);
        ctx.finish();
        assert_within_pages(&list, &config);
    }

    // 41 filler lines leave 11mm on a default page: room for one more block,
    // but not for a label and the line after it
    fn fill_to_page_bottom(ctx: &mut LayoutContext<'_, DisplayList>) {
        for _ in 0..41 {
            ctx.label_line("filler");
        }
        assert!((ctx.config().max_y() - ctx.y() - 11.0).abs() < 1e-3);
    }

    fn page_texts(list: &DisplayList, page: usize) -> Vec<&str> {
        list.pages()[page].texts().filter(|t| *t != "filler").collect()
    }

    #[test]
    fn test_labeled_paragraph_label_moves_with_first_line() {
        let config = LayoutConfig::default();
        let mut list = DisplayList::new();
        let mut ctx = LayoutContext::begin(&mut list, &config);
        fill_to_page_bottom(&mut ctx);
        ctx.labeled_paragraph("Descrição:", "texto do caso");
        assert_eq!(ctx.finish(), 2);

        assert!(page_texts(&list, 0).is_empty());
        assert_eq!(page_texts(&list, 1), vec!["Descrição:", "texto do caso"]);
    }

    #[test]
    fn test_labeled_paragraph_empty_text_needs_only_label() {
        let config = LayoutConfig::default();
        let mut list = DisplayList::new();
        let mut ctx = LayoutContext::begin(&mut list, &config);
        fill_to_page_bottom(&mut ctx);
        ctx.labeled_paragraph("Resultado Obtido:", "");
        assert_eq!(ctx.finish(), 1);
    }

    #[test]
    fn test_stacked_field_row_moves_with_first_line() {
        let config = LayoutConfig::default();
        let mut list = DisplayList::new();
        let mut ctx = LayoutContext::begin(&mut list, &config);
        fill_to_page_bottom(&mut ctx);
        ctx.field("Ambiente:", "linha um\nlinha dois");
        assert_eq!(ctx.finish(), 2);

        assert!(page_texts(&list, 0).is_empty());
        assert_eq!(page_texts(&list, 1), vec!["Ambiente:", "linha um", "linha dois"]);
    }

    #[test]
    fn test_heading_keeps_with_next_block() {
        let config = LayoutConfig::default();
        let mut list = DisplayList::new();
        let mut ctx = LayoutContext::begin(&mut list, &config);
        fill_to_page_bottom(&mut ctx);
        ctx.heading("Resumo", config.row_height);
        assert_eq!(ctx.page_count(), 2);
        ctx.finish();
        assert_eq!(page_texts(&list, 1), vec!["Resumo"]);
        assert_within_pages(&list, &config);
    }

    #[test]
    fn test_heading_without_keep_fits_remaining_space() {
        let config = LayoutConfig::default();
        let mut list = DisplayList::new();
        let mut ctx = LayoutContext::begin(&mut list, &config);
        fill_to_page_bottom(&mut ctx);
        ctx.heading("Resumo", 0.0);
        assert_eq!(ctx.finish(), 1);
    }

    #[test]
    fn test_title_is_centered() {
        let config = LayoutConfig::default();
        let mut list = DisplayList::new();
        let mut ctx = LayoutContext::begin(&mut list, &config);
        ctx.title("Relatório");
        ctx.finish();

        let text_op = list.pages()[0].ops.iter().find_map(|op| match op {
            DrawOp::Text { x, style, text, .. } => Some((*x, *style, text.clone())),
            _ => None,
        });
        let (x, style, text) = text_op.unwrap();
        let width = crate::metrics::text_width(&text, style.font, style.size);
        let center = x + width / 2.0;
        assert!((center - 105.0).abs() < 1e-3);
    }
}

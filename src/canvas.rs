//! Drawing capability used by the layout engine.
//!
//! The engine never talks to a PDF library directly. It measures and draws
//! through [`Canvas`], whose coordinates are millimetres from the top-left
//! corner of the current page (y grows downwards). [`DisplayList`] is the
//! canonical implementation: it records positioned draw operations per page,
//! which `pdf::encode` later turns into a document.

use crate::images::{self, DecodedImage};
use crate::metrics::{self, FontStyle};
use crate::types::Evidence;

/// An sRGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);
    pub const PRIMARY: Rgb = Rgb::new(25, 118, 210);
    pub const GREEN: Rgb = Rgb::new(46, 125, 50);
    pub const RED: Rgb = Rgb::new(198, 40, 40);
    pub const AMBER: Rgb = Rgb::new(255, 160, 0);
    pub const GRAY: Rgb = Rgb::new(189, 189, 189);
    pub const LIGHT_GRAY: Rgb = Rgb::new(238, 238, 238);
    pub const RULE: Rgb = Rgb::new(158, 158, 158);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Black or white, whichever reads better on top of this color
    pub fn contrasting_text(self) -> Rgb {
        let luma = 0.299 * self.r as f32 + 0.587 * self.g as f32 + 0.114 * self.b as f32;
        if luma > 160.0 { Rgb::BLACK } else { Rgb::WHITE }
    }

    /// Components scaled to 0.0..=1.0
    pub fn to_unit(self) -> [f32; 3] {
        [self.r as f32 / 255.0, self.g as f32 / 255.0, self.b as f32 / 255.0]
    }
}

/// Axis-aligned rectangle in page millimetres (top-left origin)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }
}

/// Font, size and color of a run of text
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub font: FontStyle,
    /// Size in points
    pub size: f32,
    pub color: Rgb,
}

impl TextStyle {
    pub fn new(font: FontStyle, size: f32, color: Rgb) -> Self {
        Self { font, size, color }
    }

    /// Font size converted to millimetres
    pub fn size_mm(&self) -> f32 {
        self.size * metrics::MM_PER_PT
    }
}

/// Measurement and drawing primitives the layout engine depends on.
pub trait Canvas {
    /// Width in millimetres of `text` set in `font` at `size` points.
    fn measure_text_width(&self, text: &str, font: FontStyle, size: f32) -> f32;

    /// Start a new page; subsequent draws go there.
    fn new_page(&mut self);

    /// Draw `text` with its baseline starting at (`x`, `baseline`).
    fn draw_text(&mut self, x: f32, baseline: f32, text: &str, style: TextStyle);

    fn draw_rect(&mut self, rect: Rect, fill: Rgb);

    fn draw_line(&mut self, from: (f32, f32), to: (f32, f32), width: f32, color: Rgb);

    /// Draw a decoded image scaled into `rect`.
    fn draw_image(&mut self, rect: Rect, image: &DecodedImage);

    /// Word-wrap `text` to `max_width` using this canvas' measurements.
    fn wrap_text(&self, text: &str, font: FontStyle, size: f32, max_width: f32) -> Vec<String> {
        metrics::wrap_text(text, max_width, |s| self.measure_text_width(s, font, size))
    }

    /// Decode an evidence blob into pixels.
    fn decode_image(&self, evidence: &Evidence) -> Result<DecodedImage, String> {
        images::decode_image(evidence)
    }
}

/// A positioned drawing operation
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Text { x: f32, baseline: f32, text: String, style: TextStyle },
    Rect { rect: Rect, fill: Rgb },
    Line { from: (f32, f32), to: (f32, f32), width: f32, color: Rgb },
    /// `image` indexes [`DisplayList::images`]
    Image { rect: Rect, image: usize },
}

impl DrawOp {
    /// Vertical extent (top, bottom) of the operation on its page
    pub fn extent(&self) -> (f32, f32) {
        match self {
            // Helvetica ascends to ~0.72 em and descends to ~0.21 em
            DrawOp::Text { baseline, style, .. } => {
                (baseline - 0.72 * style.size_mm(), baseline + 0.21 * style.size_mm())
            }
            DrawOp::Rect { rect, .. } | DrawOp::Image { rect, .. } => (rect.y, rect.bottom()),
            DrawOp::Line { from, to, width, .. } => {
                (from.1.min(to.1) - width / 2.0, from.1.max(to.1) + width / 2.0)
            }
        }
    }
}

/// Draw operations of one page, in paint order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    pub ops: Vec<DrawOp>,
}

impl Page {
    /// Text runs on this page, in paint order
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    /// Lowest point reached by any operation, or 0.0 for an empty page
    pub fn content_bottom(&self) -> f32 {
        self.ops.iter().map(|op| op.extent().1).fold(0.0, f32::max)
    }
}

/// Recorded pages of a laid-out document
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DisplayList {
    pages: Vec<Page>,
    images: Vec<DecodedImage>,
}

impl DisplayList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Decoded images referenced by [`DrawOp::Image`]
    pub fn images(&self) -> &[DecodedImage] {
        &self.images
    }

    /// All text runs of the document, in page and paint order
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.pages.iter().flat_map(|p| p.texts())
    }

    fn current_page(&mut self) -> &mut Page {
        if self.pages.is_empty() {
            self.pages.push(Page::default());
        }
        let last = self.pages.len() - 1;
        &mut self.pages[last]
    }
}

impl Canvas for DisplayList {
    fn measure_text_width(&self, text: &str, font: FontStyle, size: f32) -> f32 {
        metrics::text_width(text, font, size)
    }

    fn new_page(&mut self) {
        self.pages.push(Page::default());
    }

    fn draw_text(&mut self, x: f32, baseline: f32, text: &str, style: TextStyle) {
        self.current_page().ops.push(DrawOp::Text { x, baseline, text: text.to_string(), style });
    }

    fn draw_rect(&mut self, rect: Rect, fill: Rgb) {
        self.current_page().ops.push(DrawOp::Rect { rect, fill });
    }

    fn draw_line(&mut self, from: (f32, f32), to: (f32, f32), width: f32, color: Rgb) {
        self.current_page().ops.push(DrawOp::Line { from, to, width, color });
    }

    fn draw_image(&mut self, rect: Rect, image: &DecodedImage) {
        self.images.push(image.clone());
        let index = self.images.len() - 1;
        self.current_page().ops.push(DrawOp::Image { rect, image: index });
    }
}

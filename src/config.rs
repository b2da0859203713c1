/// Layout configuration module
///
/// This module handles:
/// - The page geometry, font sizes and spacing used by the layout engine
/// - Loading overrides from a TOML file (`--layout` or `EVIDENCE_REPORT_LAYOUT`)
/// - Validating that every block fits in the printable area
use crate::labels;
use crate::layout::CELL_PADDING;
use crate::metrics::{self, FontStyle, MM_PER_PT};
use log::debug;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable naming a layout TOML file
pub const LAYOUT_ENV: &str = "EVIDENCE_REPORT_LAYOUT";

/// Page margins in millimetres
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Margins {
    pub top: f32,
    pub bottom: f32,
    pub left: f32,
    pub right: f32,
}

impl Default for Margins {
    fn default() -> Self {
        Self { top: 20.0, bottom: 20.0, left: 20.0, right: 20.0 }
    }
}

/// Font sizes in points
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FontSizes {
    pub title: f32,
    pub heading: f32,
    pub body: f32,
    pub banner: f32,
}

impl Default for FontSizes {
    fn default() -> Self {
        Self { title: 18.0, heading: 14.0, body: 11.0, banner: 12.0 }
    }
}

/// Geometry and spacing of the report, in millimetres unless noted
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Page size (A4 portrait by default)
    pub page_width: f32,
    pub page_height: f32,
    pub margins: Margins,
    pub font_sizes: FontSizes,

    /// Height of the title banner
    pub title_height: f32,
    /// Height of a section heading line
    pub heading_height: f32,
    /// Height of one wrapped paragraph line
    pub line_height: f32,
    /// Height of one label/value table row
    pub row_height: f32,
    /// Height of a test-case banner
    pub banner_height: f32,
    /// Width of the label column in two-column rows
    pub label_column: f32,

    /// Vertical gap after a section
    pub section_gap: f32,
    /// Vertical gap between fields inside a section
    pub field_gap: f32,

    /// Cap on the rendered height of one evidence image
    pub image_max_height: f32,
    /// Resolution used to convert image pixels to millimetres
    pub image_dpi: f32,
    /// Thickness of the rule closing each test case
    pub separator_width: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            page_width: 210.0,
            page_height: 297.0,
            margins: Margins::default(),
            font_sizes: FontSizes::default(),
            title_height: 14.0,
            heading_height: 10.0,
            line_height: 6.0,
            row_height: 7.0,
            banner_height: 9.0,
            label_column: 48.0,
            section_gap: 6.0,
            field_gap: 2.0,
            image_max_height: 80.0,
            image_dpi: 96.0,
            separator_width: 0.3,
        }
    }
}

impl LayoutConfig {
    /// Lowest y a block may reach
    pub fn max_y(&self) -> f32 {
        self.page_height - self.margins.bottom
    }

    /// Width between the left and right margins
    pub fn content_width(&self) -> f32 {
        self.page_width - self.margins.left - self.margins.right
    }

    /// Height available for content on one page
    pub fn printable_height(&self) -> f32 {
        self.max_y() - self.margins.top
    }

    /// Check that the geometry is usable.
    ///
    /// Every block must fit on an empty page and every text line must be at
    /// least as tall as its font, otherwise page breaking can't keep content
    /// inside the printable area.
    pub fn validate(&self) -> Result<(), String> {
        let m = &self.margins;
        for (name, value) in [
            ("page_width", self.page_width),
            ("page_height", self.page_height),
            ("margins.top", m.top),
            ("margins.bottom", m.bottom),
            ("margins.left", m.left),
            ("margins.right", m.right),
            ("image_dpi", self.image_dpi),
            ("separator_width", self.separator_width),
            ("section_gap", self.section_gap),
            ("field_gap", self.field_gap),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(format!("{} must be a non-negative number (got {})", name, value));
            }
        }
        if self.image_dpi == 0.0 {
            return Err("image_dpi must be greater than zero".to_string());
        }

        if self.content_width() <= 0.0 {
            return Err(format!(
                "Margins ({} + {}) leave no room on a {}mm wide page",
                m.left, m.right, self.page_width
            ));
        }
        if self.printable_height() <= 0.0 {
            return Err(format!(
                "Margins ({} + {}) leave no room on a {}mm tall page",
                m.top, m.bottom, self.page_height
            ));
        }
        if self.label_column <= 0.0 || self.label_column >= self.content_width() {
            return Err(format!(
                "label_column ({}) must be positive and narrower than the content width ({})",
                self.label_column,
                self.content_width()
            ));
        }

        let fonts = &self.font_sizes;
        let blocks = [
            ("title_height", self.title_height, fonts.title),
            ("heading_height", self.heading_height, fonts.heading),
            ("line_height", self.line_height, fonts.body),
            ("row_height", self.row_height, fonts.body),
            ("banner_height", self.banner_height, fonts.banner),
        ];
        for (name, height, font_size) in blocks {
            if !(font_size > 0.0) {
                return Err(format!("Font size for {} must be positive", name));
            }
            if height < font_size * MM_PER_PT {
                return Err(format!(
                    "{} ({}mm) is shorter than its {}pt font ({:.2}mm)",
                    name,
                    height,
                    font_size,
                    font_size * MM_PER_PT
                ));
            }
            if height > self.printable_height() {
                return Err(format!(
                    "{} ({}mm) exceeds the printable height ({}mm)",
                    name,
                    height,
                    self.printable_height()
                ));
            }
        }

        // Row labels are never wrapped, so each must fit its shaded cell
        for label in labels::ROW_LABELS {
            let width = metrics::text_width(label, FontStyle::Bold, fonts.body) + 2.0 * CELL_PADDING;
            if width > self.label_column {
                return Err(format!(
                    "label_column ({}mm) is narrower than the label '{}' ({:.1}mm at {}pt)",
                    self.label_column, label, width, fonts.body
                ));
            }
        }

        if !(self.image_max_height > 0.0) || self.image_max_height > self.printable_height() {
            return Err(format!(
                "image_max_height ({}) must be positive and at most the printable height ({})",
                self.image_max_height,
                self.printable_height()
            ));
        }

        Ok(())
    }
}

/// Parse and validate a layout from TOML text.
///
/// Missing keys keep their defaults.
pub fn parse_layout(toml_str: &str) -> Result<LayoutConfig, String> {
    let config: LayoutConfig = toml::from_str(toml_str).map_err(|e| format!("Failed to parse layout TOML: {}", e))?;
    config.validate()?;
    Ok(config)
}

/// Load and validate a layout TOML file
pub fn load_layout(path: &Path) -> Result<LayoutConfig, String> {
    let toml_str =
        fs::read_to_string(path).map_err(|e| format!("Failed to read layout file {}: {}", path.display(), e))?;
    parse_layout(&toml_str).map_err(|e| format!("{}: {}", path.display(), e))
}

/// Resolve the layout to use
///
/// An explicit path wins, then the `EVIDENCE_REPORT_LAYOUT` environment
/// variable, then the built-in defaults.
pub fn resolve_layout(explicit: Option<&Path>) -> Result<LayoutConfig, String> {
    let path = match explicit {
        Some(p) => Some(p.to_path_buf()),
        None => env::var(LAYOUT_ENV).ok().filter(|v| !v.trim().is_empty()).map(PathBuf::from),
    };

    match path {
        Some(path) => {
            debug!("Loading layout from {:?}", path);
            load_layout(&path)
        }
        None => {
            debug!("Using default A4 layout");
            Ok(LayoutConfig::default())
        }
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

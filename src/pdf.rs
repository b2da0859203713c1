//! PDF encoding of a recorded display list.
//!
//! Each [`Page`] becomes one PDF page whose MediaBox comes from the layout
//! config. Display-list coordinates are millimetres from the top-left corner;
//! PDF user space is points from the bottom-left, so every y is flipped.
//! Text uses the standard Helvetica faces with WinAnsiEncoding, which keeps
//! the document free of embedded fonts.

use crate::canvas::{DisplayList, DrawOp, Page, Rgb};
use crate::config::LayoutConfig;
use crate::images::DecodedImage;
use crate::metrics::{self, FontStyle};
use flate2::Compression;
use flate2::write::ZlibEncoder;
use log::debug;
use lopdf::content::{Content, Operation};
use lopdf::{Dictionary, Document, Object, ObjectId, Stream, dictionary};
use std::io::{self, Write};

const PT_PER_MM: f32 = 72.0 / 25.4;

fn to_io<E: std::fmt::Display>(e: E) -> io::Error {
    io::Error::new(io::ErrorKind::Other, format!("PDF encoding failed: {}", e))
}

fn font_resource(font: FontStyle) -> &'static str {
    match font {
        FontStyle::Regular => "F1",
        FontStyle::Bold => "F2",
    }
}

fn image_resource(index: usize) -> String {
    format!("Im{}", index)
}

/// Converts page millimetres (top-left origin) to PDF points
struct PageSpace {
    height_mm: f32,
}

impl PageSpace {
    fn x(&self, x_mm: f32) -> f32 {
        x_mm * PT_PER_MM
    }

    fn y(&self, y_mm: f32) -> f32 {
        (self.height_mm - y_mm) * PT_PER_MM
    }

    fn len(&self, mm: f32) -> f32 {
        mm * PT_PER_MM
    }
}

fn color_operands(color: Rgb) -> Vec<Object> {
    color.to_unit().into_iter().map(Object::from).collect()
}

/// Content stream operations for one page
fn page_operations(page: &Page, space: &PageSpace) -> Vec<Operation> {
    let mut ops = Vec::new();

    for op in &page.ops {
        match op {
            DrawOp::Rect { rect, fill } => {
                ops.push(Operation::new("rg", color_operands(*fill)));
                ops.push(Operation::new(
                    "re",
                    vec![
                        space.x(rect.x).into(),
                        space.y(rect.bottom()).into(),
                        space.len(rect.width).into(),
                        space.len(rect.height).into(),
                    ],
                ));
                ops.push(Operation::new("f", vec![]));
            }
            DrawOp::Line { from, to, width, color } => {
                ops.push(Operation::new("RG", color_operands(*color)));
                ops.push(Operation::new("w", vec![space.len(*width).into()]));
                ops.push(Operation::new("m", vec![space.x(from.0).into(), space.y(from.1).into()]));
                ops.push(Operation::new("l", vec![space.x(to.0).into(), space.y(to.1).into()]));
                ops.push(Operation::new("S", vec![]));
            }
            DrawOp::Text { x, baseline, text, style } => {
                ops.push(Operation::new("rg", color_operands(style.color)));
                ops.push(Operation::new("BT", vec![]));
                ops.push(Operation::new("Tf", vec![font_resource(style.font).into(), style.size.into()]));
                ops.push(Operation::new("Td", vec![space.x(*x).into(), space.y(*baseline).into()]));
                ops.push(Operation::new("Tj", vec![Object::string_literal(metrics::encode_winansi(text))]));
                ops.push(Operation::new("ET", vec![]));
            }
            DrawOp::Image { rect, image } => {
                ops.push(Operation::new("q", vec![]));
                ops.push(Operation::new(
                    "cm",
                    vec![
                        space.len(rect.width).into(),
                        Object::Integer(0),
                        Object::Integer(0),
                        space.len(rect.height).into(),
                        space.x(rect.x).into(),
                        space.y(rect.bottom()).into(),
                    ],
                ));
                ops.push(Operation::new("Do", vec![Object::Name(image_resource(*image).into_bytes())]));
                ops.push(Operation::new("Q", vec![]));
            }
        }
    }

    ops
}

/// Image XObject holding zlib-compressed RGB samples
fn image_stream(image: &DecodedImage) -> io::Result<Stream> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(&image.rgb)?;
    let samples = encoder.finish()?;

    let dict = dictionary! {
        "Type" => "XObject",
        "Subtype" => "Image",
        "Width" => image.width as i64,
        "Height" => image.height as i64,
        "ColorSpace" => "DeviceRGB",
        "BitsPerComponent" => 8i64,
        "Filter" => "FlateDecode",
    };
    // Already compressed; keep lopdf from compressing again
    Ok(Stream::new(dict, samples).with_compression(false))
}

fn font_dictionary(font: FontStyle) -> Dictionary {
    dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => font.base_font(),
        "Encoding" => "WinAnsiEncoding",
    }
}

/// Encode a display list as a PDF document.
///
/// The output depends only on the display list and the page size, so the
/// same input always produces the same bytes.
pub fn encode(list: &DisplayList, config: &LayoutConfig) -> io::Result<Vec<u8>> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let space = PageSpace { height_mm: config.page_height };

    let mut fonts = Dictionary::new();
    for font in [FontStyle::Regular, FontStyle::Bold] {
        let id = doc.add_object(font_dictionary(font));
        fonts.set(font_resource(font), id);
    }

    let mut xobjects = Dictionary::new();
    for (index, image) in list.images().iter().enumerate() {
        let id = doc.add_object(image_stream(image)?);
        xobjects.set(image_resource(index), id);
    }

    let resources_id = doc.add_object(dictionary! {
        "Font" => fonts,
        "XObject" => xobjects,
    });

    let media_box: Vec<Object> = vec![
        Object::Integer(0),
        Object::Integer(0),
        space.len(config.page_width).into(),
        space.len(config.page_height).into(),
    ];

    let mut kids: Vec<Object> = Vec::with_capacity(list.page_count());
    for page in list.pages() {
        let content = Content { operations: page_operations(page, &space) };
        let content_id = doc.add_object(Stream::new(Dictionary::new(), content.encode().map_err(to_io)?));
        let page_id: ObjectId = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
            "MediaBox" => media_box.clone(),
        });
        kids.push(page_id.into());
    }

    let page_count = kids.len() as i64;
    let pages = dictionary! {
        "Type" => "Pages",
        "Kids" => kids,
        "Count" => page_count,
        "Resources" => resources_id,
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages));

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let info_id = doc.add_object(dictionary! {
        "Title" => Object::string_literal(metrics::encode_winansi(crate::labels::TITLE)),
        "Producer" => Object::string_literal(concat!("evidence-report ", env!("CARGO_PKG_VERSION"))),
    });
    doc.trailer.set("Info", info_id);

    doc.compress();

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes).map_err(to_io)?;
    debug!("PDF document: {} pages, {} images, {} bytes", page_count, list.images().len(), bytes.len());
    Ok(bytes)
}

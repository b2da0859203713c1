//! Shared fixtures for the integration tests
#![allow(dead_code)]

use evidence_report::{Evidence, GeneralInfo, Status, TestCase};
use std::io::Cursor;

/// A PNG of `width` x `height` pixels filled with one color
pub fn png(width: u32, height: u32) -> Vec<u8> {
    let img = image::RgbImage::from_pixel(width, height, image::Rgb([30, 90, 200]));
    let mut buf = Cursor::new(Vec::new());
    image::DynamicImage::ImageRgb8(img).write_to(&mut buf, image::ImageFormat::Png).unwrap();
    buf.into_inner()
}

pub fn png_evidence(name: &str, width: u32, height: u32) -> Evidence {
    Evidence::new(name, "image/png", png(width, height))
}

pub fn general(product: &str, responsible: &str, objective: &str) -> GeneralInfo {
    GeneralInfo {
        product: product.to_string(),
        responsible: responsible.to_string(),
        objective: objective.to_string(),
        ..Default::default()
    }
}

/// Cases with ids 1..N and the given statuses
pub fn cases(statuses: &[Status]) -> Vec<TestCase> {
    let mut cases: Vec<TestCase> = statuses
        .iter()
        .enumerate()
        .map(|(i, status)| {
            TestCase::new(
                format!("Descrição do caso {}", i + 1),
                format!("Resultado esperado {}", i + 1),
                format!("Resultado obtido {}", i + 1),
                *status,
            )
        })
        .collect();
    evidence_report::types::renumber(&mut cases);
    cases
}

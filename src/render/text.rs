//! Glyph rasterization pass. Shapes stroke and fill through tiny-skia; text
//! runs through `ab_glyph`/`imageproc` into transparent RGBA tiles that the
//! pipeline blits in z-order.

use std::path::PathBuf;

use ab_glyph::{Font, FontArc, PxScale, ScaleFont};
use image::{Rgba, RgbaImage};
use imageproc::drawing::draw_text_mut;

use crate::annotation::{Color, TextElement};

/// Fallback advance per character (fraction of font size) when no font file
/// could be loaded; matches the shape model's font-free measurement.
const FALLBACK_CHAR_ADVANCE: f64 = 0.62;

pub struct FontStore {
    font: Option<FontArc>,
}

impl FontStore {
    /// Probe `paths` in order and keep the first parseable font. Running
    /// without any font is allowed; glyphs are then skipped at render time.
    pub fn load(paths: &[PathBuf]) -> Self {
        for path in paths {
            if let Ok(bytes) = std::fs::read(path) {
                match FontArc::try_from_vec(bytes) {
                    Ok(font) => {
                        tracing::debug!(?path, "glyph font loaded");
                        return Self { font: Some(font) };
                    }
                    Err(err) => {
                        tracing::warn!(?err, ?path, "unusable font file; trying next candidate");
                    }
                }
            }
        }
        tracing::warn!("no usable glyph font found; text annotations render without glyphs");
        Self { font: None }
    }

    pub const fn empty() -> Self {
        Self { font: None }
    }

    pub const fn has_font(&self) -> bool {
        self.font.is_some()
    }

    pub fn measure_line(&self, line: &str, size: f32) -> f64 {
        match &self.font {
            Some(font) => {
                let scaled = font.as_scaled(PxScale::from(size));
                line.chars()
                    .map(|c| f64::from(scaled.h_advance(font.glyph_id(c))))
                    .sum()
            }
            None => line.chars().count() as f64 * f64::from(size) * FALLBACK_CHAR_ADVANCE,
        }
    }

    /// Rasterize one line into a transparent tile. `None` when no font is
    /// available or the line is empty.
    pub fn line_tile(&self, line: &str, size: f32, color: Color, opacity: f32) -> Option<RgbaImage> {
        let font = self.font.as_ref()?;
        if line.is_empty() {
            return None;
        }
        let width = self.measure_line(line, size).ceil().max(1.0) as u32;
        let height = (f64::from(size) * 1.3).ceil().max(1.0) as u32;
        let mut tile = RgbaImage::new(width, height);
        draw_text_mut(&mut tile, pixel(color, opacity), 0, 0, size, font, line);
        Some(tile)
    }

    /// Rasterize a whole text annotation (every line, optional stroked
    /// outline as offset passes, then the filled glyphs).
    pub fn text_tile(&self, text: &TextElement, color: Color, opacity: f32) -> Option<RgbaImage> {
        let font = self.font.as_ref()?;
        let size = text.style.size;
        let line_height = text.line_height();
        let lines = text.lines();
        let outline = text
            .style
            .outline_color
            .map(|outline_color| (outline_color, f64::from(text.style.outline_width.max(1.0))));
        let margin = outline.map_or(0.0, |(_, width)| width.ceil());

        let width = lines
            .iter()
            .map(|line| self.measure_line(line, size))
            .fold(0.0, f64::max)
            .max(1.0)
            + margin * 2.0;
        let height = lines.len() as f64 * line_height + margin * 2.0;
        let mut tile = RgbaImage::new(width.ceil() as u32, height.ceil() as u32);

        for (index, line) in lines.iter().enumerate() {
            if line.is_empty() {
                continue;
            }
            let x = margin;
            let y = margin + index as f64 * line_height;
            if let Some((outline_color, outline_width)) = outline {
                for (dx, dy) in outline_offsets(outline_width) {
                    draw_text_mut(
                        &mut tile,
                        pixel(outline_color, opacity),
                        (x + dx).round() as i32,
                        (y + dy).round() as i32,
                        size,
                        font,
                        line,
                    );
                }
            }
            draw_text_mut(
                &mut tile,
                pixel(color, opacity),
                x.round() as i32,
                y.round() as i32,
                size,
                font,
                line,
            );
        }
        Some(tile)
    }
}

fn pixel(color: Color, opacity: f32) -> Rgba<u8> {
    let alpha = (opacity.clamp(0.0, 1.0) * 255.0).round() as u8;
    Rgba([color.r, color.g, color.b, alpha])
}

fn outline_offsets(width: f64) -> [(f64, f64); 8] {
    let diagonal = width * std::f64::consts::FRAC_1_SQRT_2;
    [
        (-width, 0.0),
        (width, 0.0),
        (0.0, -width),
        (0.0, width),
        (-diagonal, -diagonal),
        (diagonal, -diagonal),
        (-diagonal, diagonal),
        (diagonal, diagonal),
    ]
}

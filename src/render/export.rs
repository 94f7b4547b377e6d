//! PNG export. The happy path serializes the composited canvas directly;
//! an export-restricted base image (the tainted-canvas analogue) routes
//! through a privileged viewport capture that is cropped to the canvas's
//! on-screen bounds. Both paths return the same PNG bytes.

use std::io::Cursor;

use anyhow::{anyhow, Context};
use image::{imageops, DynamicImage, ImageFormat, RgbaImage};
use thiserror::Error;
use tiny_skia::Pixmap;

use super::{RenderError, RenderPipeline};
use crate::annotation::Annotation;

/// Privileged collaborator that can photograph the whole viewport even when
/// the canvas itself refuses serialization. One asynchronous round trip in
/// the host environment; a plain blocking call here.
pub trait ViewportCapture {
    fn capture_viewport(&mut self) -> anyhow::Result<RgbaImage>;
}

/// On-screen canvas rectangle in CSS pixels, used to crop the viewport
/// capture. Scaled by the device pixel ratio before cropping.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasBounds {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("an export is already in progress")]
    ExportInFlight,
    #[error(transparent)]
    Render(#[from] RenderError),
    #[error("png encoding failed: {0}")]
    Encode(#[source] anyhow::Error),
    #[error("viewport capture fallback failed: {0}")]
    Fallback(#[source] anyhow::Error),
}

impl RenderPipeline {
    /// Produce the finished raster as PNG bytes. Callers must serialize
    /// export requests; a second export while one is pending is refused.
    pub fn export_png(
        &mut self,
        annotations: &[Annotation],
        capture: &mut dyn ViewportCapture,
        bounds: CanvasBounds,
        device_pixel_ratio: f64,
    ) -> Result<Vec<u8>, ExportError> {
        if self.export_in_flight {
            return Err(ExportError::ExportInFlight);
        }
        self.export_in_flight = true;
        let result = self.export_png_locked(annotations, capture, bounds, device_pixel_ratio);
        self.export_in_flight = false;
        result
    }

    fn export_png_locked(
        &mut self,
        annotations: &[Annotation],
        capture: &mut dyn ViewportCapture,
        bounds: CanvasBounds,
        device_pixel_ratio: f64,
    ) -> Result<Vec<u8>, ExportError> {
        if !self.export_restricted() {
            let pixmap = self.render(annotations, None)?;
            return encode_pixmap_png(&pixmap).map_err(ExportError::Encode);
        }

        tracing::warn!("base image refuses direct serialization; using viewport capture");
        let shot = capture
            .capture_viewport()
            .context("viewport capture request")
            .map_err(ExportError::Fallback)?;
        let cropped = crop_to_canvas(&shot, bounds, device_pixel_ratio)
            .map_err(ExportError::Fallback)?;
        encode_image_png(&cropped).map_err(ExportError::Encode)
    }
}

fn crop_to_canvas(
    shot: &RgbaImage,
    bounds: CanvasBounds,
    device_pixel_ratio: f64,
) -> anyhow::Result<RgbaImage> {
    let scale = if device_pixel_ratio > 0.0 {
        device_pixel_ratio
    } else {
        1.0
    };
    let shot_width = i64::from(shot.width());
    let shot_height = i64::from(shot.height());

    let left = ((bounds.x * scale).round() as i64).max(0);
    let top = ((bounds.y * scale).round() as i64).max(0);
    let right = (((bounds.x + bounds.width) * scale).round() as i64).min(shot_width);
    let bottom = (((bounds.y + bounds.height) * scale).round() as i64).min(shot_height);

    let width = right - left;
    let height = bottom - top;
    if width <= 0 || height <= 0 {
        return Err(anyhow!(
            "canvas bounds {bounds:?} fall outside the {shot_width}x{shot_height} capture"
        ));
    }

    Ok(imageops::crop_imm(
        shot,
        left as u32,
        top as u32,
        width as u32,
        height as u32,
    )
    .to_image())
}

fn encode_pixmap_png(pixmap: &Pixmap) -> anyhow::Result<Vec<u8>> {
    let image = RgbaImage::from_raw(pixmap.width(), pixmap.height(), pixmap.data().to_vec())
        .ok_or_else(|| anyhow!("cannot construct output image from surface"))?;
    encode_image_png(&image)
}

fn encode_image_png(image: &RgbaImage) -> anyhow::Result<Vec<u8>> {
    let mut buffer = Cursor::new(Vec::new());
    DynamicImage::ImageRgba8(image.clone())
        .write_to(&mut buffer, ImageFormat::Png)
        .context("cannot encode PNG")?;
    Ok(buffer.into_inner())
}

//! Raster compositing pipeline: base image scaled to the canvas, then every
//! committed annotation in z-order, then the in-progress shape, each painted
//! in isolation with its own opacity and rotation.

mod export;
mod text;

pub use export::{CanvasBounds, ExportError, ViewportCapture};
pub use text::FontStore;

use anyhow::anyhow;
use image::{imageops, RgbaImage};
use thiserror::Error;
use tiny_skia::{FillRule, LineCap, Paint, PathBuilder, Pixmap, Stroke, Transform};

use crate::annotation::{Annotation, Color, Shape, SpanElement, CALLOUT_RADIUS};
use crate::config::EngineConfig;
use crate::geometry::Point;

pub type RenderResult<T> = std::result::Result<T, RenderError>;

/// Extra blur softness on top of the stroke-width-driven sigma.
const BLUR_SIGMA_BASE: f32 = 2.0;

/// Callout numeral size, sized to fit the fixed disc radius.
const CALLOUT_NUMERAL_SIZE: f32 = 14.0;
const CALLOUT_BORDER_WIDTH: f32 = 2.0;
const WHITE: Color = Color::new(255, 255, 255);

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to decode base image: {0}")]
    ImageDecode(#[from] image::ImageError),
    #[error("base image has zero pixel area")]
    EmptyImage,
    #[error("render surface failure: {0}")]
    Surface(#[from] anyhow::Error),
}

/// Decoded base image plus its export policy. A restricted source is the
/// tainted-canvas analogue: it still renders on screen, but direct raster
/// serialization is refused and export goes through the capture fallback.
#[derive(Debug, Clone)]
pub struct ImageSource {
    pub pixels: RgbaImage,
    pub export_restricted: bool,
}

impl ImageSource {
    /// Decode an encoded image. Failure is reported to the caller and halts
    /// initialization; no canvas state is created.
    pub fn from_bytes(bytes: &[u8]) -> RenderResult<Self> {
        let pixels = image::load_from_memory(bytes)?.to_rgba8();
        Self::from_image(pixels)
    }

    pub fn from_image(pixels: RgbaImage) -> RenderResult<Self> {
        if pixels.width() == 0 || pixels.height() == 0 {
            return Err(RenderError::EmptyImage);
        }
        Ok(Self {
            pixels,
            export_restricted: false,
        })
    }

    pub fn restricted(mut self) -> Self {
        self.export_restricted = true;
        self
    }
}

pub struct RenderPipeline {
    base: RgbaImage,
    export_restricted: bool,
    canvas_width: u32,
    canvas_height: u32,
    scaled_base: Option<RgbaImage>,
    fonts: FontStore,
    pub(crate) export_in_flight: bool,
}

impl RenderPipeline {
    pub fn new(
        source: ImageSource,
        canvas_width: u32,
        canvas_height: u32,
        config: &EngineConfig,
    ) -> RenderResult<Self> {
        if source.pixels.width() == 0 || source.pixels.height() == 0 {
            return Err(RenderError::EmptyImage);
        }
        Ok(Self {
            base: source.pixels,
            export_restricted: source.export_restricted,
            canvas_width: canvas_width.max(1),
            canvas_height: canvas_height.max(1),
            scaled_base: None,
            fonts: FontStore::load(&config.font_paths),
            export_in_flight: false,
        })
    }

    pub const fn canvas_size(&self) -> (u32, u32) {
        (self.canvas_width, self.canvas_height)
    }

    pub const fn export_restricted(&self) -> bool {
        self.export_restricted
    }

    pub fn resize_canvas(&mut self, width: u32, height: u32) {
        let width = width.max(1);
        let height = height.max(1);
        if (width, height) != (self.canvas_width, self.canvas_height) {
            self.canvas_width = width;
            self.canvas_height = height;
            self.scaled_base = None;
        }
    }

    /// Composite one frame: cleared surface, scaled base image, committed
    /// annotations in list order, then the in-progress annotation on top.
    pub fn render(
        &mut self,
        annotations: &[Annotation],
        draft: Option<&Annotation>,
    ) -> RenderResult<Pixmap> {
        let width = self.canvas_width;
        let height = self.canvas_height;
        self.ensure_scaled_base();
        let scaled = self
            .scaled_base
            .as_ref()
            .ok_or_else(|| anyhow!("scaled base image missing after ensure"))?;

        let mut pixmap = Pixmap::new(width, height)
            .ok_or_else(|| anyhow!("cannot allocate {width}x{height} pixmap"))?;
        pixmap.data_mut().copy_from_slice(scaled.as_raw());

        for annotation in annotations {
            draw_annotation(&mut pixmap, scaled, &self.fonts, annotation)?;
        }
        if let Some(draft) = draft {
            draw_annotation(&mut pixmap, scaled, &self.fonts, draft)?;
        }
        Ok(pixmap)
    }

    fn ensure_scaled_base(&mut self) {
        let needs_scale = match &self.scaled_base {
            Some(scaled) => scaled.dimensions() != (self.canvas_width, self.canvas_height),
            None => true,
        };
        if needs_scale {
            self.scaled_base = Some(imageops::resize(
                &self.base,
                self.canvas_width,
                self.canvas_height,
                imageops::FilterType::Triangle,
            ));
        }
    }
}

/// Paint one annotation in isolation. Degenerate geometry is skipped rather
/// than drawn.
fn draw_annotation(
    pixmap: &mut Pixmap,
    scaled_base: &RgbaImage,
    fonts: &FontStore,
    annotation: &Annotation,
) -> anyhow::Result<()> {
    if annotation.is_degenerate() {
        return Ok(());
    }

    let style = annotation.style;
    let opacity = style.opacity.clamp(0.0, 1.0);
    let stroke = Stroke {
        width: style.stroke_width.max(1.0),
        line_cap: LineCap::Round,
        ..Stroke::default()
    };
    let transform = rotation_transform(annotation);

    match &annotation.shape {
        Shape::Freehand(stroke_shape) => {
            let mut pb = PathBuilder::new();
            let first = stroke_shape
                .points
                .first()
                .ok_or_else(|| anyhow!("freehand path became empty"))?;
            pb.move_to(first.x as f32, first.y as f32);
            for point in &stroke_shape.points[1..] {
                pb.line_to(point.x as f32, point.y as f32);
            }
            let path = pb.finish().ok_or_else(|| anyhow!("cannot build freehand path"))?;
            pixmap.stroke_path(&path, &paint(style.color, opacity), &stroke, transform, None);
        }
        Shape::Rectangle(span) => {
            let rect = span_rect(span)?;
            let path = PathBuilder::from_rect(rect);
            if let Some(fill) = span.fill_color {
                pixmap.fill_path(
                    &path,
                    &paint(fill, opacity),
                    FillRule::Winding,
                    transform,
                    None,
                );
            }
            pixmap.stroke_path(&path, &paint(style.color, opacity), &stroke, transform, None);
        }
        Shape::Ellipse(span) => {
            let mut pb = PathBuilder::new();
            pb.push_oval(span_rect(span)?);
            let path = pb.finish().ok_or_else(|| anyhow!("cannot build ellipse path"))?;
            if let Some(fill) = span.fill_color {
                pixmap.fill_path(
                    &path,
                    &paint(fill, opacity),
                    FillRule::Winding,
                    transform,
                    None,
                );
            }
            pixmap.stroke_path(&path, &paint(style.color, opacity), &stroke, transform, None);
        }
        Shape::Line(span) => {
            let mut pb = PathBuilder::new();
            pb.move_to(span.start.x as f32, span.start.y as f32);
            pb.line_to(span.end.x as f32, span.end.y as f32);
            let path = pb.finish().ok_or_else(|| anyhow!("cannot build line path"))?;
            pixmap.stroke_path(&path, &paint(style.color, opacity), &stroke, transform, None);
        }
        Shape::Arrow(span) => {
            let path = arrow_path(span, f64::from(stroke.width))?;
            pixmap.stroke_path(&path, &paint(style.color, opacity), &stroke, transform, None);
        }
        Shape::Highlight(span) => {
            let path = PathBuilder::from_rect(span_rect(span)?);
            pixmap.fill_path(
                &path,
                &paint(style.color, opacity),
                FillRule::Winding,
                transform,
                None,
            );
        }
        Shape::Blur(span) => {
            draw_blur_region(pixmap, scaled_base, span, style.stroke_width);
        }
        Shape::Text(element) => {
            let lines = element.lines();
            let text_width = lines
                .iter()
                .map(|line| fonts.measure_line(line, element.style.size))
                .fold(0.0, f64::max)
                .max(1.0);
            let text_height = lines.len() as f64 * element.line_height();

            if let Some(bg) = element.style.bg_color {
                if let Some(rect) = tiny_skia::Rect::from_xywh(
                    element.position.x as f32,
                    element.position.y as f32,
                    text_width as f32,
                    text_height as f32,
                ) {
                    let path = PathBuilder::from_rect(rect);
                    pixmap.fill_path(
                        &path,
                        &paint(bg, opacity),
                        FillRule::Winding,
                        Transform::identity(),
                        None,
                    );
                }
            }

            if let Some(tile) = fonts.text_tile(element, style.color, opacity) {
                let margin = match element.style.outline_color {
                    Some(_) => f64::from(element.style.outline_width.max(1.0)).ceil(),
                    None => 0.0,
                };
                blit_tile(
                    pixmap,
                    &tile,
                    (element.position.x - margin).round() as i64,
                    (element.position.y - margin).round() as i64,
                );
            }
        }
        Shape::Callout(callout) => {
            let center = callout.position;
            let mut pb = PathBuilder::new();
            pb.push_circle(center.x as f32, center.y as f32, CALLOUT_RADIUS as f32);
            let path = pb.finish().ok_or_else(|| anyhow!("cannot build callout disc"))?;
            pixmap.fill_path(
                &path,
                &paint(style.color, opacity),
                FillRule::Winding,
                Transform::identity(),
                None,
            );
            let border = Stroke {
                width: CALLOUT_BORDER_WIDTH,
                ..Stroke::default()
            };
            pixmap.stroke_path(
                &path,
                &paint(WHITE, opacity),
                &border,
                Transform::identity(),
                None,
            );

            let numeral = callout.number.to_string();
            if let Some(tile) = fonts.line_tile(&numeral, CALLOUT_NUMERAL_SIZE, WHITE, opacity) {
                blit_tile(
                    pixmap,
                    &tile,
                    (center.x - f64::from(tile.width()) / 2.0).round() as i64,
                    (center.y - f64::from(tile.height()) / 2.0).round() as i64,
                );
            }
        }
        Shape::Stamp(stamp) => {
            let glyph = stamp.glyph.to_string();
            if let Some(tile) = fonts.line_tile(&glyph, stamp.size, style.color, opacity) {
                blit_tile(
                    pixmap,
                    &tile,
                    (stamp.position.x - f64::from(tile.width()) / 2.0).round() as i64,
                    (stamp.position.y - f64::from(tile.height()) / 2.0).round() as i64,
                );
            }
        }
    }
    Ok(())
}

fn paint(color: Color, opacity: f32) -> Paint<'static> {
    let mut paint = Paint::default();
    let alpha = (opacity * 255.0).round() as u8;
    paint.set_color_rgba8(color.r, color.g, color.b, alpha);
    paint.anti_alias = true;
    paint
}

fn rotation_transform(annotation: &Annotation) -> Transform {
    if annotation.rotation == 0.0 {
        return Transform::identity();
    }
    match annotation.center() {
        Some(center) => Transform::from_rotate_at(
            annotation.rotation.to_degrees() as f32,
            center.x as f32,
            center.y as f32,
        ),
        None => Transform::identity(),
    }
}

fn span_rect(span: &SpanElement) -> anyhow::Result<tiny_skia::Rect> {
    let bounds = span.bounds();
    tiny_skia::Rect::from_ltrb(
        bounds.left as f32,
        bounds.top as f32,
        bounds.right as f32,
        bounds.bottom as f32,
    )
    .ok_or_else(|| anyhow!("invalid span rectangle"))
}

/// Shaft plus two angled head strokes. Head length follows the stroke width
/// with a 10 px floor; head half-angle is 30 degrees.
fn arrow_path(span: &SpanElement, stroke_width: f64) -> anyhow::Result<tiny_skia::Path> {
    let Point { x: sx, y: sy } = span.start;
    let Point { x: ex, y: ey } = span.end;
    let shaft_angle = (ey - sy).atan2(ex - sx);
    let head_length = (stroke_width * 4.0).max(10.0);
    let half_angle = std::f64::consts::FRAC_PI_6;

    let mut pb = PathBuilder::new();
    pb.move_to(sx as f32, sy as f32);
    pb.line_to(ex as f32, ey as f32);
    for direction in [shaft_angle + std::f64::consts::PI - half_angle,
        shaft_angle + std::f64::consts::PI + half_angle]
    {
        pb.move_to(ex as f32, ey as f32);
        pb.line_to(
            (ex + head_length * direction.cos()) as f32,
            (ey + head_length * direction.sin()) as f32,
        );
    }
    pb.finish().ok_or_else(|| anyhow!("cannot build arrow path"))
}

/// Re-blur the base image region under a blur annotation and write it back
/// opaque. Sigma scales with the stroke width option.
fn draw_blur_region(
    pixmap: &mut Pixmap,
    scaled_base: &RgbaImage,
    span: &SpanElement,
    stroke_width: f32,
) {
    let bounds = span.bounds();
    let Some((x, y, width, height)) = bounded_region(
        bounds.left.round() as i64,
        bounds.top.round() as i64,
        bounds.width().round() as i64,
        bounds.height().round() as i64,
        scaled_base.width(),
        scaled_base.height(),
    ) else {
        return;
    };

    let region = imageops::crop_imm(scaled_base, x, y, width, height).to_image();
    let sigma = BLUR_SIGMA_BASE + stroke_width.max(1.0);
    let blurred = imageops::blur(&region, sigma);

    let stride = pixmap.width() as usize * 4;
    let data = pixmap.data_mut();
    for (row, tile_row) in blurred.rows().enumerate() {
        let dst_offset = (y as usize + row) * stride + x as usize * 4;
        for (column, pixel) in tile_row.enumerate() {
            let at = dst_offset + column * 4;
            data[at] = pixel.0[0];
            data[at + 1] = pixel.0[1];
            data[at + 2] = pixel.0[2];
            data[at + 3] = 255;
        }
    }
}

/// Clamp a region to the surface, mirroring how blur previews stay inside
/// the source image.
fn bounded_region(
    x: i64,
    y: i64,
    width: i64,
    height: i64,
    surface_width: u32,
    surface_height: u32,
) -> Option<(u32, u32, u32, u32)> {
    if width <= 0 || height <= 0 || surface_width == 0 || surface_height == 0 {
        return None;
    }
    let left = x.clamp(0, i64::from(surface_width) - 1);
    let top = y.clamp(0, i64::from(surface_height) - 1);
    let right = (x + width).clamp(left + 1, i64::from(surface_width));
    let bottom = (y + height).clamp(top + 1, i64::from(surface_height));
    if right <= left || bottom <= top {
        return None;
    }
    Some((
        left as u32,
        top as u32,
        (right - left) as u32,
        (bottom - top) as u32,
    ))
}

/// Alpha-over blit of a straight-alpha RGBA tile onto the premultiplied
/// pixmap surface.
fn blit_tile(pixmap: &mut Pixmap, tile: &RgbaImage, left: i64, top: i64) {
    let surface_width = i64::from(pixmap.width());
    let surface_height = i64::from(pixmap.height());
    let stride = pixmap.width() as usize * 4;
    let data = pixmap.data_mut();

    for (row, tile_row) in tile.rows().enumerate() {
        let y = top + row as i64;
        if y < 0 || y >= surface_height {
            continue;
        }
        for (column, pixel) in tile_row.enumerate() {
            let x = left + column as i64;
            if x < 0 || x >= surface_width {
                continue;
            }
            let alpha = u16::from(pixel.0[3]);
            if alpha == 0 {
                continue;
            }
            let at = y as usize * stride + x as usize * 4;
            let inverse = 255 - alpha;
            for channel in 0..3 {
                let src = (u16::from(pixel.0[channel]) * alpha + 127) / 255;
                let dst = (u16::from(data[at + channel]) * inverse + 127) / 255;
                data[at + channel] = (src + dst).min(255) as u8;
            }
            let dst_alpha = (u16::from(data[at + 3]) * inverse + 127) / 255;
            data[at + 3] = (alpha + dst_alpha).min(255) as u8;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annotation::{CalloutElement, FreehandStroke, StrokeStyle};

    fn base_image(color: [u8; 4], width: u32, height: u32) -> ImageSource {
        ImageSource::from_image(RgbaImage::from_pixel(width, height, image::Rgba(color)))
            .expect("non-empty base image")
    }

    fn pipeline(width: u32, height: u32) -> RenderPipeline {
        RenderPipeline::new(
            base_image([255, 255, 255, 255], width, height),
            width,
            height,
            &EngineConfig::default(),
        )
        .expect("pipeline constructs")
    }

    fn pixel(pixmap: &Pixmap, x: u32, y: u32) -> [u8; 4] {
        let at = (y * pixmap.width() + x) as usize * 4;
        let data = pixmap.data();
        [data[at], data[at + 1], data[at + 2], data[at + 3]]
    }

    fn red_style() -> StrokeStyle {
        let mut style = StrokeStyle::default();
        style.set_color(Color::new(255, 0, 0));
        style
    }

    #[test]
    fn render_output_matches_canvas_dimensions() {
        let mut pipeline = RenderPipeline::new(
            base_image([0, 128, 255, 255], 40, 20),
            80,
            40,
            &EngineConfig::default(),
        )
        .expect("pipeline constructs");
        let frame = pipeline.render(&[], None).expect("empty frame renders");
        assert_eq!(frame.width(), 80);
        assert_eq!(frame.height(), 40);
        // The base is scaled up to fill the canvas.
        assert_eq!(pixel(&frame, 60, 30), [0, 128, 255, 255]);
    }

    #[test]
    fn image_source_rejects_undecodable_and_empty_input() {
        assert!(matches!(
            ImageSource::from_bytes(b"not an image"),
            Err(RenderError::ImageDecode(_))
        ));
        assert!(matches!(
            ImageSource::from_image(RgbaImage::new(0, 0)),
            Err(RenderError::EmptyImage)
        ));
    }

    #[test]
    fn rectangle_strokes_edges_and_fills_interior_only_when_filled() {
        let mut pipeline = pipeline(100, 100);
        let mut outlined = Annotation::new(
            1,
            red_style(),
            Shape::Rectangle(SpanElement::new(Point::new(20.0, 20.0), Point::new(80.0, 80.0))),
        );
        let frame = pipeline
            .render(std::slice::from_ref(&outlined), None)
            .expect("frame renders");
        assert_eq!(pixel(&frame, 50, 20), [255, 0, 0, 255]);
        assert_eq!(pixel(&frame, 50, 50), [255, 255, 255, 255]);

        if let Some(span) = outlined.shape.as_span_mut() {
            span.fill_color = Some(Color::new(0, 0, 255));
        }
        let frame = pipeline
            .render(std::slice::from_ref(&outlined), None)
            .expect("frame renders");
        assert_eq!(pixel(&frame, 50, 50), [0, 0, 255, 255]);
    }

    #[test]
    fn opacity_blends_toward_the_backdrop() {
        let mut pipeline = pipeline(100, 100);
        let mut style = red_style();
        style.set_opacity(0.5);
        let highlight = Annotation::new(
            1,
            style,
            Shape::Highlight(SpanElement::new(Point::new(10.0, 10.0), Point::new(90.0, 90.0))),
        );
        let frame = pipeline
            .render(std::slice::from_ref(&highlight), None)
            .expect("frame renders");
        let [r, g, b, _] = pixel(&frame, 50, 50);
        assert!(r > 200, "red stays dominant, got {r}");
        assert!((100..200).contains(&g), "green is half-faded, got {g}");
        assert!((100..200).contains(&b), "blue is half-faded, got {b}");
    }

    #[test]
    fn degenerate_shapes_are_skipped_not_drawn() {
        let mut pipeline = pipeline(50, 50);
        let click = Point::new(25.0, 25.0);
        let shapes = vec![
            Annotation::new(1, red_style(), Shape::Freehand(FreehandStroke::new(click))),
            Annotation::new(2, red_style(), Shape::Rectangle(SpanElement::new(click, click))),
        ];
        let frame = pipeline.render(&shapes, None).expect("frame renders");
        assert_eq!(pixel(&frame, 25, 25), [255, 255, 255, 255]);
    }

    #[test]
    fn draft_annotation_paints_on_top_of_the_list() {
        let mut pipeline = pipeline(100, 100);
        let committed = Annotation::new(
            1,
            red_style(),
            Shape::Highlight(SpanElement::new(Point::new(0.0, 0.0), Point::new(100.0, 100.0))),
        );
        let mut blue = StrokeStyle::default();
        blue.set_color(Color::new(0, 0, 255));
        let draft = Annotation::new(
            2,
            blue,
            Shape::Highlight(SpanElement::new(Point::new(40.0, 40.0), Point::new(60.0, 60.0))),
        );
        let frame = pipeline
            .render(std::slice::from_ref(&committed), Some(&draft))
            .expect("frame renders");
        assert_eq!(pixel(&frame, 50, 50), [0, 0, 255, 255]);
    }

    #[test]
    fn rotated_rectangle_paints_along_its_rotated_edges() {
        let mut pipeline = pipeline(200, 200);
        let mut rect = Annotation::new(
            1,
            red_style(),
            Shape::Rectangle(SpanElement::new(Point::new(60.0, 90.0), Point::new(140.0, 110.0))),
        );
        rect.rotation = std::f64::consts::FRAC_PI_2;
        let frame = pipeline
            .render(std::slice::from_ref(&rect), None)
            .expect("frame renders");
        // Rotated a quarter turn about (100, 100), the long edges become
        // vertical: x in [90, 110], y in [60, 140].
        let [r, ..] = pixel(&frame, 91, 100);
        assert!(r > 200, "rotated left edge should be red, got {r}");
        // The unrotated top edge location is now empty.
        assert_eq!(pixel(&frame, 70, 90), [255, 255, 255, 255]);
    }

    #[test]
    fn callout_draws_a_colored_disc_with_border() {
        let mut pipeline = pipeline(100, 100);
        let callout = Annotation::new(
            1,
            red_style(),
            Shape::Callout(CalloutElement::new(Point::new(50.0, 50.0), 7)),
        );
        let frame = pipeline
            .render(std::slice::from_ref(&callout), None)
            .expect("frame renders");
        // Inside the disc but clear of the centered numeral.
        let [r, _, b, _] = pixel(&frame, 40, 50);
        assert!(r > 200 && b < 120, "disc fill should be red");
        // Outside the disc the backdrop survives.
        assert_eq!(pixel(&frame, 20, 20), [255, 255, 255, 255]);
    }

    #[test]
    fn blur_region_mixes_neighboring_base_pixels() {
        let mut base = RgbaImage::from_pixel(60, 60, image::Rgba([0, 0, 0, 255]));
        for y in 0..60 {
            for x in 30..60 {
                base.put_pixel(x, y, image::Rgba([255, 255, 255, 255]));
            }
        }
        let mut pipeline = RenderPipeline::new(
            ImageSource::from_image(base).expect("base image"),
            60,
            60,
            &EngineConfig::default(),
        )
        .expect("pipeline constructs");

        let blur = Annotation::new(
            1,
            StrokeStyle::default(),
            Shape::Blur(SpanElement::new(Point::new(10.0, 10.0), Point::new(50.0, 50.0))),
        );
        let frame = pipeline
            .render(std::slice::from_ref(&blur), None)
            .expect("frame renders");
        // On the black/white boundary inside the blur region the pixel is a
        // mixture now.
        let [r, ..] = pixel(&frame, 30, 30);
        assert!(r > 10 && r < 245, "boundary pixel should be blurred, got {r}");
        // Outside the region the hard edge survives.
        assert_eq!(pixel(&frame, 29, 2), [0, 0, 0, 255]);
        assert_eq!(pixel(&frame, 31, 2), [255, 255, 255, 255]);
    }

    #[test]
    fn bounded_region_clamps_to_the_surface() {
        assert_eq!(bounded_region(-5, -10, 200, 120, 64, 48), Some((0, 0, 64, 48)));
        assert_eq!(bounded_region(10, 10, 0, 5, 64, 48), None);
        assert_eq!(bounded_region(100, 10, 5, 5, 64, 48), Some((63, 10, 1, 5)));
    }

    #[test]
    fn resize_canvas_invalidates_the_scaled_base() {
        let mut pipeline = pipeline(40, 40);
        let _ = pipeline.render(&[], None).expect("first frame");
        pipeline.resize_canvas(80, 20);
        let frame = pipeline.render(&[], None).expect("resized frame");
        assert_eq!((frame.width(), frame.height()), (80, 20));
    }
}

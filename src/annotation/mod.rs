//! Annotation shape model: one tagged union over all markup kinds, shared
//! style fields, and value-type constructors. Everything past construction
//! replaces annotations by value so history snapshots stay untouched.

mod marker;
mod span;
mod stroke;
mod text;

pub use crate::geometry::{Bounds, Color, Point};
pub use marker::{CalloutElement, StampElement, CALLOUT_RADIUS};
pub use span::SpanElement;
pub use stroke::FreehandStroke;
pub use text::{TextElement, TextStyle};

const MIN_STROKE_WIDTH: f32 = 1.0;
const MAX_STROKE_WIDTH: f32 = 20.0;
const MIN_OPACITY: f32 = 0.1;
const MAX_OPACITY: f32 = 1.0;

/// Style fields common to every annotation kind.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokeStyle {
    pub color: Color,
    pub stroke_width: f32,
    pub opacity: f32,
}

impl Default for StrokeStyle {
    fn default() -> Self {
        Self {
            color: Color::new(229, 62, 62),
            stroke_width: 3.0,
            opacity: 1.0,
        }
    }
}

impl StrokeStyle {
    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    pub fn set_stroke_width(&mut self, stroke_width: f32) {
        self.stroke_width = stroke_width.clamp(MIN_STROKE_WIDTH, MAX_STROKE_WIDTH);
    }

    pub fn set_opacity(&mut self, opacity: f32) {
        self.opacity = opacity.clamp(MIN_OPACITY, MAX_OPACITY);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    Freehand,
    Rectangle,
    Ellipse,
    Arrow,
    Line,
    Highlight,
    Blur,
    Text,
    Callout,
    Stamp,
}

impl ShapeKind {
    /// Kinds whose selection grows resize/rotate handles.
    pub const fn supports_resize(self) -> bool {
        matches!(self, Self::Rectangle | Self::Ellipse | Self::Arrow)
    }

    pub const fn supports_fill(self) -> bool {
        matches!(self, Self::Rectangle | Self::Ellipse | Self::Arrow | Self::Line)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Freehand(FreehandStroke),
    Rectangle(SpanElement),
    Ellipse(SpanElement),
    Arrow(SpanElement),
    Line(SpanElement),
    Highlight(SpanElement),
    Blur(SpanElement),
    Text(TextElement),
    Callout(CalloutElement),
    Stamp(StampElement),
}

impl Shape {
    pub const fn kind(&self) -> ShapeKind {
        match self {
            Self::Freehand(_) => ShapeKind::Freehand,
            Self::Rectangle(_) => ShapeKind::Rectangle,
            Self::Ellipse(_) => ShapeKind::Ellipse,
            Self::Arrow(_) => ShapeKind::Arrow,
            Self::Line(_) => ShapeKind::Line,
            Self::Highlight(_) => ShapeKind::Highlight,
            Self::Blur(_) => ShapeKind::Blur,
            Self::Text(_) => ShapeKind::Text,
            Self::Callout(_) => ShapeKind::Callout,
            Self::Stamp(_) => ShapeKind::Stamp,
        }
    }

    pub const fn as_span(&self) -> Option<&SpanElement> {
        match self {
            Self::Rectangle(span)
            | Self::Ellipse(span)
            | Self::Arrow(span)
            | Self::Line(span)
            | Self::Highlight(span)
            | Self::Blur(span) => Some(span),
            _ => None,
        }
    }

    pub fn as_span_mut(&mut self) -> Option<&mut SpanElement> {
        match self {
            Self::Rectangle(span)
            | Self::Ellipse(span)
            | Self::Arrow(span)
            | Self::Line(span)
            | Self::Highlight(span)
            | Self::Blur(span) => Some(span),
            _ => None,
        }
    }

    pub const fn as_freehand(&self) -> Option<&FreehandStroke> {
        match self {
            Self::Freehand(stroke) => Some(stroke),
            _ => None,
        }
    }

    pub fn as_freehand_mut(&mut self) -> Option<&mut FreehandStroke> {
        match self {
            Self::Freehand(stroke) => Some(stroke),
            _ => None,
        }
    }

    pub const fn as_text(&self) -> Option<&TextElement> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_text_mut(&mut self) -> Option<&mut TextElement> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }
}

/// One drawn markup object. `rotation` is radians about the shape center and
/// defaults to zero; only kinds with resize support ever acquire a non-zero
/// value through the handle layer.
#[derive(Debug, Clone, PartialEq)]
pub struct Annotation {
    pub id: u64,
    pub style: StrokeStyle,
    pub rotation: f64,
    pub shape: Shape,
}

impl Annotation {
    pub const fn new(id: u64, style: StrokeStyle, shape: Shape) -> Self {
        Self {
            id,
            style,
            rotation: 0.0,
            shape,
        }
    }

    pub const fn kind(&self) -> ShapeKind {
        self.shape.kind()
    }

    /// Rotation center: bounding-box midpoint for span shapes, path centroid
    /// for freehand, raw position for the glyph-based kinds.
    pub fn center(&self) -> Option<Point> {
        match &self.shape {
            Shape::Freehand(stroke) => crate::geometry::centroid(&stroke.points),
            Shape::Rectangle(span)
            | Shape::Ellipse(span)
            | Shape::Arrow(span)
            | Shape::Line(span)
            | Shape::Highlight(span)
            | Shape::Blur(span) => Some(span.center()),
            Shape::Text(text) => Some(text.position),
            Shape::Callout(callout) => Some(callout.position),
            Shape::Stamp(stamp) => Some(stamp.position),
        }
    }

    /// Unrotated geometric bounds; `None` for an empty freehand path.
    pub fn bounds(&self) -> Option<Bounds> {
        match &self.shape {
            Shape::Freehand(stroke) => stroke.bounds(),
            Shape::Rectangle(span)
            | Shape::Ellipse(span)
            | Shape::Arrow(span)
            | Shape::Line(span)
            | Shape::Highlight(span)
            | Shape::Blur(span) => Some(span.bounds()),
            Shape::Text(text) => Some(text.bounds()),
            Shape::Callout(callout) => Some(Bounds::new(
                callout.position.x - CALLOUT_RADIUS,
                callout.position.y - CALLOUT_RADIUS,
                callout.position.x + CALLOUT_RADIUS,
                callout.position.y + CALLOUT_RADIUS,
            )),
            Shape::Stamp(stamp) => Some(stamp.bounds()),
        }
    }

    pub fn translate(&mut self, dx: f64, dy: f64) {
        match &mut self.shape {
            Shape::Freehand(stroke) => {
                for point in &mut stroke.points {
                    *point = point.offset(dx, dy);
                }
            }
            Shape::Rectangle(span)
            | Shape::Ellipse(span)
            | Shape::Arrow(span)
            | Shape::Line(span)
            | Shape::Highlight(span)
            | Shape::Blur(span) => span.translate(dx, dy),
            Shape::Text(text) => text.position = text.position.offset(dx, dy),
            Shape::Callout(callout) => callout.position = callout.position.offset(dx, dy),
            Shape::Stamp(stamp) => stamp.position = stamp.position.offset(dx, dy),
        }
    }

    /// A degenerate annotation is the residue of a zero-length gesture and is
    /// dropped at commit time instead of being rendered.
    pub fn is_degenerate(&self) -> bool {
        match &self.shape {
            Shape::Freehand(stroke) => stroke.points.len() < 2,
            Shape::Arrow(span) | Shape::Line(span) => span.start == span.end,
            Shape::Rectangle(span)
            | Shape::Ellipse(span)
            | Shape::Highlight(span)
            | Shape::Blur(span) => {
                let bounds = span.bounds();
                bounds.width() <= f64::EPSILON || bounds.height() <= f64::EPSILON
            }
            Shape::Text(text) => text.content.trim().is_empty(),
            Shape::Callout(_) | Shape::Stamp(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn annotation(shape: Shape) -> Annotation {
        Annotation::new(1, StrokeStyle::default(), shape)
    }

    #[test]
    fn stroke_style_setters_clamp_toolbar_ranges() {
        let mut style = StrokeStyle::default();
        style.set_stroke_width(0.0);
        assert_eq!(style.stroke_width, 1.0);
        style.set_stroke_width(64.0);
        assert_eq!(style.stroke_width, 20.0);
        style.set_opacity(0.0);
        assert!((style.opacity - 0.1).abs() < f32::EPSILON);
        style.set_opacity(2.5);
        assert!((style.opacity - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn only_rectangle_ellipse_arrow_support_resize() {
        for kind in [ShapeKind::Rectangle, ShapeKind::Ellipse, ShapeKind::Arrow] {
            assert!(kind.supports_resize(), "{kind:?} should resize");
        }
        for kind in [
            ShapeKind::Freehand,
            ShapeKind::Line,
            ShapeKind::Highlight,
            ShapeKind::Blur,
            ShapeKind::Text,
            ShapeKind::Callout,
            ShapeKind::Stamp,
        ] {
            assert!(!kind.supports_resize(), "{kind:?} should not resize");
        }
    }

    #[test]
    fn center_uses_bbox_midpoint_centroid_and_raw_position() {
        let rect = annotation(Shape::Rectangle(SpanElement::new(
            Point::new(0.0, 0.0),
            Point::new(10.0, 20.0),
        )));
        assert_eq!(rect.center(), Some(Point::new(5.0, 10.0)));

        let stroke = annotation(Shape::Freehand(FreehandStroke::from_points(vec![
            Point::new(0.0, 0.0),
            Point::new(6.0, 0.0),
            Point::new(3.0, 9.0),
        ])));
        assert_eq!(stroke.center(), Some(Point::new(3.0, 3.0)));

        let callout = annotation(Shape::Callout(CalloutElement::new(Point::new(7.0, 8.0), 1)));
        assert_eq!(callout.center(), Some(Point::new(7.0, 8.0)));
    }

    #[test]
    fn degenerate_gestures_are_flagged_per_kind() {
        let click = Point::new(5.0, 5.0);
        assert!(annotation(Shape::Freehand(FreehandStroke::new(click))).is_degenerate());
        assert!(annotation(Shape::Arrow(SpanElement::new(click, click))).is_degenerate());
        assert!(annotation(Shape::Rectangle(SpanElement::new(
            click,
            Point::new(5.0, 25.0)
        )))
        .is_degenerate());
        assert!(annotation(Shape::Text(TextElement::with_content(
            click,
            "  ",
            TextStyle::default()
        )))
        .is_degenerate());
        assert!(!annotation(Shape::Callout(CalloutElement::new(click, 3))).is_degenerate());
        assert!(!annotation(Shape::Line(SpanElement::new(click, Point::new(9.0, 5.0))))
            .is_degenerate());
    }

    #[test]
    fn translate_walks_every_positional_field() {
        let mut arrow = annotation(Shape::Arrow(SpanElement::new(
            Point::new(1.0, 1.0),
            Point::new(4.0, 5.0),
        )));
        arrow.translate(2.0, -1.0);
        let span = arrow.shape.as_span().expect("arrow keeps span geometry");
        assert_eq!(span.start, Point::new(3.0, 0.0));
        assert_eq!(span.end, Point::new(6.0, 4.0));

        let mut stroke = annotation(Shape::Freehand(FreehandStroke::from_points(vec![
            Point::new(0.0, 0.0),
            Point::new(1.0, 1.0),
        ])));
        stroke.translate(5.0, 5.0);
        let points = &stroke.shape.as_freehand().expect("freehand").points;
        assert_eq!(points[0], Point::new(5.0, 5.0));
        assert_eq!(points[1], Point::new(6.0, 6.0));
    }
}

//! Hit-testing for annotation bodies and manipulation handles. Bodies are
//! tested top-most first; handles exist only for the selected shape and only
//! on kinds that support resize.

use crate::annotation::{Annotation, Shape, ShapeKind, CALLOUT_RADIUS};
use crate::geometry::{self, Point};

/// Width of the annular band around an ellipse outline that counts as a hit,
/// in normalized ellipse-equation units.
const ELLIPSE_RING_BAND: f64 = 0.3;

/// Distance of the rotation handle above the top edge midpoint, in the
/// shape's local frame.
pub const ROTATION_HANDLE_OFFSET: f64 = 24.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Handle {
    TopLeft,
    Top,
    TopRight,
    Right,
    BottomRight,
    Bottom,
    BottomLeft,
    Left,
    Start,
    End,
    Rotate,
}

impl Handle {
    /// Geometric opposite, the resize anchor. Endpoint and rotation handles
    /// have no box anchor.
    pub const fn opposite(self) -> Option<Handle> {
        match self {
            Self::TopLeft => Some(Self::BottomRight),
            Self::Top => Some(Self::Bottom),
            Self::TopRight => Some(Self::BottomLeft),
            Self::Right => Some(Self::Left),
            Self::BottomRight => Some(Self::TopLeft),
            Self::Bottom => Some(Self::Top),
            Self::BottomLeft => Some(Self::TopRight),
            Self::Left => Some(Self::Right),
            Self::Start | Self::End | Self::Rotate => None,
        }
    }
}

/// Top-most annotation under `point`, or `None`. Later list entries paint on
/// top, so the list is walked in reverse.
pub fn annotation_at<'a>(
    point: Point,
    annotations: &'a [Annotation],
    padding: f64,
) -> Option<&'a Annotation> {
    annotations
        .iter()
        .rev()
        .find(|annotation| hits_annotation(annotation, point, padding))
}

/// Per-variant hit rule against a single annotation. A rotated shape is
/// tested in its local frame: the query point is rotated by `-rotation`
/// about the shape center first.
pub fn hits_annotation(annotation: &Annotation, point: Point, padding: f64) -> bool {
    let point = local_point(annotation, point);
    match &annotation.shape {
        Shape::Freehand(stroke) => stroke
            .points
            .iter()
            .any(|sample| sample.distance_to(point) <= padding),
        Shape::Rectangle(span) | Shape::Highlight(span) | Shape::Blur(span) => {
            // Border proximity only. Interior clicks never hit, filled or not.
            let corners = span.bounds().corners();
            (0..4).any(|index| {
                let a = corners[index];
                let b = corners[(index + 1) % 4];
                geometry::distance_to_segment(point, a, b) <= padding
            })
        }
        Shape::Ellipse(span) => {
            let bounds = span.bounds();
            match geometry::ellipse_ring_value(
                point,
                bounds.center(),
                bounds.width() / 2.0,
                bounds.height() / 2.0,
            ) {
                Some(value) => (value - 1.0).abs() < ELLIPSE_RING_BAND,
                None => false,
            }
        }
        Shape::Arrow(span) | Shape::Line(span) => {
            geometry::distance_to_segment(point, span.start, span.end) <= padding
        }
        Shape::Text(text) => text.bounds().inflate(padding).contains(point),
        Shape::Callout(callout) => {
            callout.position.distance_to(point) <= CALLOUT_RADIUS + padding
        }
        Shape::Stamp(stamp) => stamp.bounds().inflate(padding).contains(point),
    }
}

/// Handle identities and their screen-space positions for a selected shape.
/// Positions are computed in the local (unrotated) frame, then rotated about
/// the shape center so handles visually track rotation. Empty for kinds
/// without resize support.
pub fn handle_positions(annotation: &Annotation) -> Vec<(Handle, Point)> {
    if !annotation.kind().supports_resize() {
        return Vec::new();
    }
    let Some(center) = annotation.center() else {
        return Vec::new();
    };

    let mut handles = match (&annotation.shape, annotation.kind()) {
        (Shape::Arrow(span), _) => vec![(Handle::Start, span.start), (Handle::End, span.end)],
        (_, ShapeKind::Rectangle | ShapeKind::Ellipse) => {
            let Some(bounds) = annotation.bounds() else {
                return Vec::new();
            };
            let mid_x = (bounds.left + bounds.right) / 2.0;
            let mid_y = (bounds.top + bounds.bottom) / 2.0;
            vec![
                (Handle::TopLeft, Point::new(bounds.left, bounds.top)),
                (Handle::Top, Point::new(mid_x, bounds.top)),
                (Handle::TopRight, Point::new(bounds.right, bounds.top)),
                (Handle::Right, Point::new(bounds.right, mid_y)),
                (Handle::BottomRight, Point::new(bounds.right, bounds.bottom)),
                (Handle::Bottom, Point::new(mid_x, bounds.bottom)),
                (Handle::BottomLeft, Point::new(bounds.left, bounds.bottom)),
                (Handle::Left, Point::new(bounds.left, mid_y)),
            ]
        }
        _ => return Vec::new(),
    };

    if let Some(bounds) = annotation.bounds() {
        handles.push((
            Handle::Rotate,
            Point::new(
                (bounds.left + bounds.right) / 2.0,
                bounds.top - ROTATION_HANDLE_OFFSET,
            ),
        ));
    }

    for (_, position) in &mut handles {
        *position = geometry::rotate_about(*position, center, annotation.rotation);
    }
    handles
}

/// Handle under `point` for the selected annotation, if any. The test is a
/// per-axis square of half-size `radius`, matching the drawn handle chrome.
pub fn handle_at(annotation: &Annotation, point: Point, radius: f64) -> Option<Handle> {
    handle_positions(annotation)
        .into_iter()
        .find(|(_, position)| {
            (point.x - position.x).abs() <= radius && (point.y - position.y).abs() <= radius
        })
        .map(|(handle, _)| handle)
}

fn local_point(annotation: &Annotation, point: Point) -> Point {
    if annotation.rotation == 0.0 {
        return point;
    }
    match annotation.center() {
        Some(center) => geometry::rotate_about(point, center, -annotation.rotation),
        None => point,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annotation::{
        CalloutElement, Color, FreehandStroke, SpanElement, StrokeStyle, TextElement, TextStyle,
    };

    const PADDING: f64 = 10.0;

    fn rectangle(id: u64, a: Point, b: Point) -> Annotation {
        Annotation::new(
            id,
            StrokeStyle::default(),
            Shape::Rectangle(SpanElement::new(a, b)),
        )
    }

    #[test]
    fn hit_walks_reverse_z_order_topmost_first() {
        let lower = rectangle(1, Point::new(0.0, 0.0), Point::new(100.0, 100.0));
        let upper = rectangle(2, Point::new(0.0, 0.0), Point::new(100.0, 50.0));
        let list = vec![lower, upper];

        let hit = annotation_at(Point::new(50.0, 2.0), &list, PADDING)
            .expect("top edge of both rectangles");
        assert_eq!(hit.id, 2);
    }

    #[test]
    fn hit_rectangle_interior_misses_with_and_without_fill() {
        let mut rect = rectangle(1, Point::new(0.0, 0.0), Point::new(200.0, 200.0));
        let interior = Point::new(100.0, 100.0);
        assert!(!hits_annotation(&rect, interior, PADDING));

        if let Some(span) = rect.shape.as_span_mut() {
            span.fill_color = Some(Color::new(10, 20, 30));
        }
        assert!(!hits_annotation(&rect, interior, PADDING));
        assert!(hits_annotation(&rect, Point::new(100.0, 5.0), PADDING));
    }

    #[test]
    fn hit_ellipse_uses_the_annular_band() {
        let ellipse = Annotation::new(
            1,
            StrokeStyle::default(),
            Shape::Ellipse(SpanElement::new(
                Point::new(0.0, 0.0),
                Point::new(100.0, 100.0),
            )),
        );
        // On the outline: normalized value 1.0.
        assert!(hits_annotation(&ellipse, Point::new(100.0, 50.0), PADDING));
        // Center: value 0, far outside the band.
        assert!(!hits_annotation(&ellipse, Point::new(50.0, 50.0), PADDING));
        // Just inside the band edge: value (45/50)² = 0.81 > 0.7.
        assert!(hits_annotation(&ellipse, Point::new(95.0, 50.0), PADDING));
        // Deep interior: value (25/50)² = 0.25.
        assert!(!hits_annotation(&ellipse, Point::new(75.0, 50.0), PADDING));
    }

    #[test]
    fn hit_arrow_and_freehand_use_distance_tolerance() {
        let arrow = Annotation::new(
            1,
            StrokeStyle::default(),
            Shape::Arrow(SpanElement::new(Point::new(0.0, 0.0), Point::new(100.0, 0.0))),
        );
        assert!(hits_annotation(&arrow, Point::new(50.0, 9.0), PADDING));
        assert!(!hits_annotation(&arrow, Point::new(50.0, 11.0), PADDING));

        let stroke = Annotation::new(
            2,
            StrokeStyle::default(),
            Shape::Freehand(FreehandStroke::from_points(vec![
                Point::new(0.0, 0.0),
                Point::new(40.0, 40.0),
            ])),
        );
        assert!(hits_annotation(&stroke, Point::new(45.0, 45.0), PADDING));
        // Between samples but far from both: midpoint of a sparse stroke.
        assert!(!hits_annotation(&stroke, Point::new(20.0, 20.0), 10.0));
    }

    #[test]
    fn hit_callout_is_a_disc_and_text_a_measured_box() {
        let callout = Annotation::new(
            1,
            StrokeStyle::default(),
            Shape::Callout(CalloutElement::new(Point::new(50.0, 50.0), 1)),
        );
        assert!(hits_annotation(&callout, Point::new(50.0, 73.0), PADDING));
        assert!(!hits_annotation(&callout, Point::new(50.0, 75.0), PADDING));

        let text = Annotation::new(
            2,
            StrokeStyle::default(),
            Shape::Text(TextElement::with_content(
                Point::new(0.0, 0.0),
                "hello",
                TextStyle::default(),
            )),
        );
        assert!(hits_annotation(&text, Point::new(20.0, 10.0), PADDING));
        assert!(!hits_annotation(&text, Point::new(200.0, 10.0), PADDING));
    }

    #[test]
    fn hit_rotated_rectangle_tests_in_the_local_frame() {
        let mut rect = rectangle(1, Point::new(40.0, 40.0), Point::new(160.0, 80.0));
        rect.rotation = std::f64::consts::FRAC_PI_2;
        // The unrotated top edge midpoint no longer hits once rotated.
        assert!(!hits_annotation(&rect, Point::new(100.0, 40.0), 2.0));
        // The rotated right edge passes through center + (0, 60).
        assert!(hits_annotation(&rect, Point::new(100.0, 120.0), 2.0));
    }

    #[test]
    fn handles_exist_only_for_resizable_kinds() {
        let line = Annotation::new(
            1,
            StrokeStyle::default(),
            Shape::Line(SpanElement::new(Point::new(0.0, 0.0), Point::new(10.0, 0.0))),
        );
        assert!(handle_positions(&line).is_empty());

        let rect = rectangle(2, Point::new(0.0, 0.0), Point::new(100.0, 60.0));
        let handles = handle_positions(&rect);
        assert_eq!(handles.len(), 9);
        assert!(handles
            .iter()
            .any(|(handle, _)| matches!(handle, Handle::Rotate)));

        let arrow = Annotation::new(
            3,
            StrokeStyle::default(),
            Shape::Arrow(SpanElement::new(Point::new(0.0, 0.0), Point::new(50.0, 0.0))),
        );
        let handles = handle_positions(&arrow);
        assert_eq!(handles.len(), 3);
        assert_eq!(handle_at(&arrow, Point::new(49.0, 1.0), 8.0), Some(Handle::End));
    }

    #[test]
    fn handles_track_rotation_visually() {
        let mut rect = rectangle(1, Point::new(40.0, 40.0), Point::new(160.0, 80.0));
        rect.rotation = std::f64::consts::FRAC_PI_2;
        let handles = handle_positions(&rect);
        let (_, top_left) = handles
            .iter()
            .find(|(handle, _)| matches!(handle, Handle::TopLeft))
            .expect("rectangle has a top-left handle");
        // Local (40, 40) rotated a quarter turn about (100, 60) lands at (120, 0).
        assert!((top_left.x - 120.0).abs() < 1e-9);
        assert!((top_left.y - 0.0).abs() < 1e-9);

        assert_eq!(
            handle_at(&rect, Point::new(121.0, 1.0), 8.0),
            Some(Handle::TopLeft)
        );
        assert_eq!(handle_at(&rect, Point::new(40.0, 40.0), 8.0), None);
    }
}

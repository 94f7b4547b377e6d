//! Move/resize/rotate math for one gesture. A [`TransformSession`] captures
//! the pre-transform snapshot on handle-press and derives every intermediate
//! geometry from that snapshot plus the live pointer, so a gesture never
//! accumulates floating-point drift.

use crate::annotation::{Annotation, Shape, ShapeKind};
use crate::editor::hit::Handle;
use crate::geometry::{self, Bounds, Point};

/// Fixed offset applied to a duplicated annotation.
pub const DUPLICATE_OFFSET: f64 = 20.0;

/// Rotation constrain step: 15 degrees.
const ROTATION_SNAP_STEP: f64 = std::f64::consts::PI / 12.0;

/// Constrained-draw angle step for arrow/line: 45 degrees.
const DRAW_ANGLE_SNAP_STEP: f64 = std::f64::consts::FRAC_PI_4;

#[derive(Debug, Clone)]
pub struct TransformSession {
    snapshot: Annotation,
    handle: Option<Handle>,
    origin: Point,
    /// Screen-space position of the corner that must not move (resize only).
    anchor: Option<Point>,
    rotation_start: f64,
}

impl TransformSession {
    pub fn begin_move(snapshot: Annotation, pointer: Point) -> Self {
        Self {
            snapshot,
            handle: None,
            origin: pointer,
            anchor: None,
            rotation_start: 0.0,
        }
    }

    pub fn begin_resize(snapshot: Annotation, handle: Handle, pointer: Point) -> Self {
        let anchor = handle.opposite().and_then(|opposite| {
            let bounds = snapshot.bounds()?;
            let center = snapshot.center()?;
            Some(geometry::rotate_about(
                box_handle_point(&bounds, opposite),
                center,
                snapshot.rotation,
            ))
        });
        Self {
            snapshot,
            handle: Some(handle),
            origin: pointer,
            anchor,
            rotation_start: 0.0,
        }
    }

    pub fn begin_rotate(snapshot: Annotation, pointer: Point) -> Self {
        let rotation_start = match snapshot.center() {
            Some(center) => {
                (pointer.y - center.y).atan2(pointer.x - center.x) - snapshot.rotation
            }
            None => 0.0,
        };
        Self {
            snapshot,
            handle: Some(Handle::Rotate),
            origin: pointer,
            anchor: None,
            rotation_start,
        }
    }

    pub fn snapshot(&self) -> &Annotation {
        &self.snapshot
    }

    /// Screen-space anchor captured at resize start, for invariance checks.
    pub fn anchor(&self) -> Option<Point> {
        self.anchor
    }

    /// Fixed-offset drag: the grab point keeps its offset from the shape, the
    /// shape does not snap to the cursor.
    pub fn moved(&self, pointer: Point) -> Annotation {
        let mut next = self.snapshot.clone();
        next.translate(pointer.x - self.origin.x, pointer.y - self.origin.y);
        next
    }

    /// Anchor-locked resize. The pointer delta is taken into the shape's
    /// local frame, applied to the edges implied by the dragged handle, and
    /// the result is translated so the anchor corner's screen position is
    /// unchanged even under rotation.
    pub fn resized(&self, pointer: Point) -> Annotation {
        let Some(handle) = self.handle else {
            return self.snapshot.clone();
        };
        match handle {
            Handle::Start | Handle::End => self.relocated_endpoint(handle, pointer),
            Handle::Rotate => self.snapshot.clone(),
            _ => self.resized_box(handle, pointer),
        }
    }

    fn relocated_endpoint(&self, handle: Handle, pointer: Point) -> Annotation {
        let mut next = self.snapshot.clone();
        let rotation = next.rotation;
        let center = next.center();
        let Some(span) = next.shape.as_span_mut() else {
            return next;
        };
        let local = match center {
            Some(center) if rotation != 0.0 => {
                geometry::rotate_about(pointer, center, -rotation)
            }
            _ => pointer,
        };
        match handle {
            Handle::Start => span.start = local,
            _ => span.end = local,
        }
        next
    }

    fn resized_box(&self, handle: Handle, pointer: Point) -> Annotation {
        let mut next = self.snapshot.clone();
        let (Some(bounds), Some(anchor)) = (self.snapshot.bounds(), self.anchor) else {
            return next;
        };

        let delta = geometry::rotate_about(
            Point::new(pointer.x - self.origin.x, pointer.y - self.origin.y),
            Point::new(0.0, 0.0),
            -self.snapshot.rotation,
        );

        let mut left = bounds.left;
        let mut top = bounds.top;
        let mut right = bounds.right;
        let mut bottom = bounds.bottom;
        if matches!(handle, Handle::TopLeft | Handle::Left | Handle::BottomLeft) {
            left += delta.x;
        }
        if matches!(handle, Handle::TopRight | Handle::Right | Handle::BottomRight) {
            right += delta.x;
        }
        if matches!(handle, Handle::TopLeft | Handle::Top | Handle::TopRight) {
            top += delta.y;
        }
        if matches!(handle, Handle::BottomLeft | Handle::Bottom | Handle::BottomRight) {
            bottom += delta.y;
        }

        // The resized box has a new center, which would swing the anchor
        // corner around under rotation. Translate so it stays put on screen.
        let resized = Bounds::new(left, top, right, bottom);
        let center = resized.center();
        let opposite = handle.opposite().unwrap_or(handle);
        let anchor_now = geometry::rotate_about(
            box_handle_point(&resized, opposite),
            center,
            self.snapshot.rotation,
        );
        let correction_x = anchor.x - anchor_now.x;
        let correction_y = anchor.y - anchor_now.y;

        if let Some(span) = next.shape.as_span_mut() {
            span.start = Point::new(left + correction_x, top + correction_y);
            span.end = Point::new(right + correction_x, bottom + correction_y);
        }
        next
    }

    /// Absolute rotation tracking the pointer from the angle it grabbed the
    /// handle at; `constrain` rounds to 15-degree increments.
    pub fn rotated(&self, pointer: Point, constrain: bool) -> Annotation {
        let mut next = self.snapshot.clone();
        let Some(center) = self.snapshot.center() else {
            return next;
        };
        let pointer_angle = (pointer.y - center.y).atan2(pointer.x - center.x);
        let mut rotation = pointer_angle - self.rotation_start;
        if constrain {
            rotation = geometry::snap_angle(rotation, ROTATION_SNAP_STEP);
        }
        next.rotation = rotation;
        next
    }
}

/// Local-frame position of a box handle, shared with the handle layer's
/// corner enumeration.
fn box_handle_point(bounds: &Bounds, handle: Handle) -> Point {
    let mid_x = (bounds.left + bounds.right) / 2.0;
    let mid_y = (bounds.top + bounds.bottom) / 2.0;
    match handle {
        Handle::TopLeft => Point::new(bounds.left, bounds.top),
        Handle::Top => Point::new(mid_x, bounds.top),
        Handle::TopRight => Point::new(bounds.right, bounds.top),
        Handle::Right => Point::new(bounds.right, mid_y),
        Handle::BottomRight => Point::new(bounds.right, bounds.bottom),
        Handle::Bottom => Point::new(mid_x, bounds.bottom),
        Handle::BottomLeft => Point::new(bounds.left, bounds.bottom),
        Handle::Left => Point::new(bounds.left, mid_y),
        Handle::Start | Handle::End | Handle::Rotate => bounds.center(),
    }
}

/// Shift-constrained drawing. Rectangle-like kinds snap to a square using the
/// larger absolute delta signed by the original direction; arrow/line snap
/// the angle to the nearest 45-degree multiple, preserving gesture length.
pub fn constrained_end(kind: ShapeKind, start: Point, end: Point) -> Point {
    let dx = end.x - start.x;
    let dy = end.y - start.y;
    match kind {
        ShapeKind::Rectangle | ShapeKind::Ellipse | ShapeKind::Highlight | ShapeKind::Blur => {
            let magnitude = dx.abs().max(dy.abs());
            let sign_x = if dx < 0.0 { -1.0 } else { 1.0 };
            let sign_y = if dy < 0.0 { -1.0 } else { 1.0 };
            Point::new(start.x + magnitude * sign_x, start.y + magnitude * sign_y)
        }
        ShapeKind::Arrow | ShapeKind::Line => {
            let length = (dx * dx + dy * dy).sqrt();
            if length <= f64::EPSILON {
                return end;
            }
            let angle = geometry::snap_angle(dy.atan2(dx), DRAW_ANGLE_SNAP_STEP);
            Point::new(
                start.x + length * angle.cos(),
                start.y + length * angle.sin(),
            )
        }
        _ => end,
    }
}

/// Clone `annotation` under a fresh id, offset by the fixed duplicate vector.
pub fn duplicated(annotation: &Annotation, new_id: u64) -> Annotation {
    let mut copy = annotation.clone();
    copy.id = new_id;
    copy.translate(DUPLICATE_OFFSET, DUPLICATE_OFFSET);
    copy
}

/// Stroke-mode eraser: drop freehand path points within `radius` of `at`.
/// Returns whether anything was removed. Every other kind is untouched.
pub fn erase_stroke_points(annotation: &mut Annotation, at: Point, radius: f64) -> bool {
    let Shape::Freehand(stroke) = &mut annotation.shape else {
        return false;
    };
    let before = stroke.points.len();
    stroke.points.retain(|point| point.distance_to(at) > radius);
    stroke.points.len() != before
}

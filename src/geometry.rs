//! Shared geometric and color primitives used across annotation, editor and
//! render modules.

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn offset(self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    pub fn distance_to(self, other: Point) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl Bounds {
    pub const fn new(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Normalized box spanned by two drag points.
    pub fn from_points(a: Point, b: Point) -> Self {
        Self {
            left: a.x.min(b.x),
            top: a.y.min(b.y),
            right: a.x.max(b.x),
            bottom: a.y.max(b.y),
        }
    }

    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }

    pub fn center(&self) -> Point {
        Point::new(
            (self.left + self.right) / 2.0,
            (self.top + self.bottom) / 2.0,
        )
    }

    pub fn inflate(&self, amount: f64) -> Self {
        Self {
            left: self.left - amount,
            top: self.top - amount,
            right: self.right + amount,
            bottom: self.bottom + amount,
        }
    }

    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.left
            && point.x <= self.right
            && point.y >= self.top
            && point.y <= self.bottom
    }

    pub fn corners(&self) -> [Point; 4] {
        [
            Point::new(self.left, self.top),
            Point::new(self.right, self.top),
            Point::new(self.right, self.bottom),
            Point::new(self.left, self.bottom),
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const fn rgb(self) -> (u8, u8, u8) {
        (self.r, self.g, self.b)
    }
}

/// Rotate `point` around `center` by `angle` radians (positive = clockwise in
/// raster coordinates, where the y axis grows downward).
pub fn rotate_about(point: Point, center: Point, angle: f64) -> Point {
    let (sin, cos) = angle.sin_cos();
    let dx = point.x - center.x;
    let dy = point.y - center.y;
    Point::new(
        center.x + dx * cos - dy * sin,
        center.y + dx * sin + dy * cos,
    )
}

/// Shortest distance from `point` to the segment `a`..`b`.
pub fn distance_to_segment(point: Point, a: Point, b: Point) -> f64 {
    let seg_x = b.x - a.x;
    let seg_y = b.y - a.y;
    let len_sq = seg_x * seg_x + seg_y * seg_y;
    if len_sq <= f64::EPSILON {
        return point.distance_to(a);
    }
    let t = ((point.x - a.x) * seg_x + (point.y - a.y) * seg_y) / len_sq;
    let t = t.clamp(0.0, 1.0);
    point.distance_to(Point::new(a.x + t * seg_x, a.y + t * seg_y))
}

/// Value of the normalized ellipse equation `(dx/rx)² + (dy/ry)²` for `point`
/// against the ellipse centered at `center` with radii `rx`/`ry`. Returns
/// `None` for a degenerate (zero-radius) ellipse. The outline sits where the
/// value equals 1.
pub fn ellipse_ring_value(point: Point, center: Point, rx: f64, ry: f64) -> Option<f64> {
    if rx.abs() <= f64::EPSILON || ry.abs() <= f64::EPSILON {
        return None;
    }
    let nx = (point.x - center.x) / rx;
    let ny = (point.y - center.y) / ry;
    Some(nx * nx + ny * ny)
}

/// Round `angle` (radians) to the nearest multiple of `step`.
pub fn snap_angle(angle: f64, step: f64) -> f64 {
    (angle / step).round() * step
}

/// Arithmetic mean of a point sequence; `None` when empty.
pub fn centroid(points: &[Point]) -> Option<Point> {
    if points.is_empty() {
        return None;
    }
    let (sum_x, sum_y) = points
        .iter()
        .fold((0.0, 0.0), |(sx, sy), p| (sx + p.x, sy + p.y));
    let count = points.len() as f64;
    Some(Point::new(sum_x / count, sum_y / count))
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn bounds_from_points_normalizes_any_drag_direction() {
        let bounds = Bounds::from_points(Point::new(30.0, 8.0), Point::new(12.0, 40.0));
        assert_eq!(bounds, Bounds::new(12.0, 8.0, 30.0, 40.0));
        assert!((bounds.width() - 18.0).abs() < EPS);
        assert!((bounds.height() - 32.0).abs() < EPS);
        assert_eq!(bounds.center(), Point::new(21.0, 24.0));
    }

    #[test]
    fn rotate_about_quarter_turn_maps_axes() {
        let rotated = rotate_about(
            Point::new(10.0, 0.0),
            Point::new(0.0, 0.0),
            std::f64::consts::FRAC_PI_2,
        );
        assert!(rotated.x.abs() < 1e-9);
        assert!((rotated.y - 10.0).abs() < 1e-9);
    }

    #[test]
    fn rotate_about_round_trip_returns_to_original_point() {
        let original = Point::new(3.0, -7.0);
        let center = Point::new(1.5, 2.5);
        let there = rotate_about(original, center, 0.6458);
        let back = rotate_about(there, center, -0.6458);
        assert!((back.x - original.x).abs() < 1e-9);
        assert!((back.y - original.y).abs() < 1e-9);
    }

    #[test]
    fn distance_to_segment_projects_inside_and_clamps_outside() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(10.0, 0.0);
        assert!((distance_to_segment(Point::new(5.0, 4.0), a, b) - 4.0).abs() < EPS);
        assert!((distance_to_segment(Point::new(-3.0, 4.0), a, b) - 5.0).abs() < EPS);
        assert!((distance_to_segment(Point::new(13.0, 4.0), a, b) - 5.0).abs() < EPS);
    }

    #[test]
    fn distance_to_segment_degenerate_segment_is_point_distance() {
        let a = Point::new(2.0, 2.0);
        assert!((distance_to_segment(Point::new(5.0, 6.0), a, a) - 5.0).abs() < EPS);
    }

    #[test]
    fn ellipse_ring_value_is_one_on_the_outline() {
        let center = Point::new(0.0, 0.0);
        let value = ellipse_ring_value(Point::new(8.0, 0.0), center, 8.0, 4.0)
            .expect("non-degenerate ellipse");
        assert!((value - 1.0).abs() < EPS);
        assert!(ellipse_ring_value(Point::new(1.0, 1.0), center, 0.0, 4.0).is_none());
    }

    #[test]
    fn snap_angle_rounds_to_nearest_step() {
        let step = std::f64::consts::FRAC_PI_4;
        assert!(snap_angle(0.38, step).abs() < EPS);
        assert!((snap_angle(0.61, step) - step).abs() < EPS);
    }

    #[test]
    fn centroid_averages_points_and_rejects_empty() {
        let points = [
            Point::new(0.0, 0.0),
            Point::new(6.0, 0.0),
            Point::new(3.0, 9.0),
        ];
        assert_eq!(centroid(&points), Some(Point::new(3.0, 3.0)));
        assert_eq!(centroid(&[]), None);
    }
}

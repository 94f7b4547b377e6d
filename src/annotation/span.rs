use crate::geometry::{Bounds, Color, Point};

/// Two-point geometry shared by rectangle, ellipse, arrow, line, highlight
/// and blur annotations. `start`/`end` keep the drag orientation; box-like
/// consumers normalize through [`SpanElement::bounds`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpanElement {
    pub start: Point,
    pub end: Point,
    pub fill_color: Option<Color>,
}

impl SpanElement {
    pub const fn new(start: Point, end: Point) -> Self {
        Self {
            start,
            end,
            fill_color: None,
        }
    }

    pub const fn with_fill(start: Point, end: Point, fill_color: Option<Color>) -> Self {
        Self {
            start,
            end,
            fill_color,
        }
    }

    pub fn bounds(&self) -> Bounds {
        Bounds::from_points(self.start, self.end)
    }

    pub fn center(&self) -> Point {
        self.bounds().center()
    }

    pub fn translate(&mut self, dx: f64, dy: f64) {
        self.start = self.start.offset(dx, dy);
        self.end = self.end.offset(dx, dy);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn span_bounds_normalize_reverse_drags() {
        let span = SpanElement::new(Point::new(30.0, 40.0), Point::new(12.0, 8.0));
        assert_eq!(span.bounds(), Bounds::new(12.0, 8.0, 30.0, 40.0));
        assert_eq!(span.center(), Point::new(21.0, 24.0));
    }

    #[test]
    fn span_translate_moves_both_endpoints() {
        let mut span = SpanElement::new(Point::new(1.0, 2.0), Point::new(5.0, 6.0));
        span.translate(10.0, -2.0);
        assert_eq!(span.start, Point::new(11.0, 0.0));
        assert_eq!(span.end, Point::new(15.0, 4.0));
    }
}

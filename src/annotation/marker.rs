use crate::geometry::{Bounds, Point};

/// Disc radius of a numbered callout, shared by hit-testing and rendering.
pub const CALLOUT_RADIUS: f64 = 14.0;

/// Numbered callout disc. Numbers are handed out by the editor and only grow
/// within a session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CalloutElement {
    pub position: Point,
    pub number: u32,
}

impl CalloutElement {
    pub const fn new(position: Point, number: u32) -> Self {
        Self { position, number }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StampElement {
    pub position: Point,
    pub glyph: char,
    pub size: f32,
}

impl StampElement {
    pub const DEFAULT_SIZE: f32 = 28.0;

    pub const fn new(position: Point, glyph: char, size: f32) -> Self {
        Self {
            position,
            glyph,
            size,
        }
    }

    pub fn bounds(&self) -> Bounds {
        let half = f64::from(self.size.max(1.0)) / 2.0;
        Bounds::new(
            self.position.x - half,
            self.position.y - half,
            self.position.x + half,
            self.position.y + half,
        )
    }
}

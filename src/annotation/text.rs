use crate::geometry::{Bounds, Color, Point};

const MIN_TEXT_SIZE: f32 = 8.0;
const MAX_TEXT_SIZE: f32 = 96.0;

/// Character advance as a fraction of the font size, used for font-free
/// measurement. Matches the fallback the glyph pass degrades to when no
/// system font is available.
const FALLBACK_CHAR_ADVANCE: f64 = 0.62;
const LINE_HEIGHT_FACTOR: f64 = 1.3;

/// Sticky text styling carried by the toolbar and stamped onto each new
/// text annotation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub size: f32,
    pub bg_color: Option<Color>,
    pub outline_color: Option<Color>,
    pub outline_width: f32,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            size: 18.0,
            bg_color: None,
            outline_color: None,
            outline_width: 2.0,
        }
    }
}

impl TextStyle {
    pub fn set_size(&mut self, size: f32) {
        self.size = size.clamp(MIN_TEXT_SIZE, MAX_TEXT_SIZE);
    }

    pub fn set_bg_color(&mut self, bg_color: Option<Color>) {
        self.bg_color = bg_color;
    }

    pub fn set_outline(&mut self, outline_color: Option<Color>, outline_width: f32) {
        self.outline_color = outline_color;
        self.outline_width = outline_width.max(1.0);
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextElement {
    pub position: Point,
    pub content: String,
    pub style: TextStyle,
}

impl TextElement {
    pub fn new(position: Point, style: TextStyle) -> Self {
        Self {
            position,
            content: String::new(),
            style,
        }
    }

    pub fn with_content(position: Point, content: impl Into<String>, style: TextStyle) -> Self {
        Self {
            position,
            content: content.into(),
            style,
        }
    }

    pub fn lines(&self) -> Vec<&str> {
        if self.content.is_empty() {
            vec![""]
        } else {
            self.content.split('\n').collect()
        }
    }

    pub fn line_height(&self) -> f64 {
        (f64::from(self.style.size.max(1.0)) * LINE_HEIGHT_FACTOR).max(2.0)
    }

    /// Font-free measured size: widest line by character count, stacked line
    /// height. Good enough for hit boxes; the render pass measures for real.
    pub fn measured_size(&self) -> (f64, f64) {
        let char_width = f64::from(self.style.size.max(1.0)) * FALLBACK_CHAR_ADVANCE;
        let lines = self.lines();
        let width = lines
            .iter()
            .map(|line| line.chars().count() as f64 * char_width)
            .fold(0.0, f64::max)
            .max(8.0);
        let height = (lines.len() as f64 * self.line_height()).max(f64::from(self.style.size));
        (width, height)
    }

    pub fn bounds(&self) -> Bounds {
        let (width, height) = self.measured_size();
        Bounds::new(
            self.position.x,
            self.position.y,
            self.position.x + width,
            self.position.y + height,
        )
    }

    pub fn insert_char(&mut self, c: char) {
        self.content.push(c);
    }

    pub fn insert_newline(&mut self) {
        self.content.push('\n');
    }

    pub fn delete_backward(&mut self) -> bool {
        self.content.pop().is_some()
    }
}

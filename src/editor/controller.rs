//! Pointer/keyboard state machine turning raw input events into editor
//! mutations. Tool selection is orthogonal to the interaction state and only
//! gates which transitions are legal; at most one gesture session exists at a
//! time.

use crate::annotation::{
    CalloutElement, Color, FreehandStroke, Shape, ShapeKind, SpanElement, StampElement,
    StrokeStyle, TextElement, TextStyle,
};
use crate::config::EngineConfig;
use crate::editor::{hit, transform, AnnotationEditor, Availability, Handle, TransformSession};
use crate::geometry::Point;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tool {
    Move,
    Eraser,
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

impl Tool {
    /// Shape kind this tool draws, if it is a drawing tool.
    pub const fn draws(self) -> Option<ShapeKind> {
        match self {
            Self::Freehand => Some(ShapeKind::Freehand),
            Self::Rectangle => Some(ShapeKind::Rectangle),
            Self::Ellipse => Some(ShapeKind::Ellipse),
            Self::Arrow => Some(ShapeKind::Arrow),
            Self::Line => Some(ShapeKind::Line),
            Self::Highlight => Some(ShapeKind::Highlight),
            Self::Blur => Some(ShapeKind::Blur),
            Self::Text => Some(ShapeKind::Text),
            Self::Callout => Some(ShapeKind::Callout),
            Self::Stamp => Some(ShapeKind::Stamp),
            Self::Move | Self::Eraser => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EraserMode {
    Object,
    Stroke,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractionState {
    Idle,
    Drawing,
    Dragging,
    Resizing,
    Rotating,
    Erasing,
    EditingText,
}

/// Keyboard events routed to the modal text session. Enter and blur commit,
/// Escape discards; Shift+Enter inserts a line break.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextInputEvent {
    Character(char),
    Enter,
    ShiftEnter,
    Backspace,
    Escape,
    Blur,
}

/// Sticky tool options. Values survive tool switches, matching the toolbar's
/// persistent swatches.
#[derive(Debug, Clone)]
struct ToolOptions {
    style: StrokeStyle,
    fill_enabled: bool,
    text_style: TextStyle,
    stamp_glyph: char,
    eraser_mode: EraserMode,
}

impl Default for ToolOptions {
    fn default() -> Self {
        Self {
            style: StrokeStyle::default(),
            fill_enabled: false,
            text_style: TextStyle::default(),
            stamp_glyph: '★',
            eraser_mode: EraserMode::Object,
        }
    }
}

pub struct EditorController {
    editor: AnnotationEditor,
    config: EngineConfig,
    tool: Tool,
    state: InteractionState,
    session: Option<TransformSession>,
    options: ToolOptions,
    constrain: bool,
}

impl Default for EditorController {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl EditorController {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            editor: AnnotationEditor::new(),
            config,
            tool: Tool::Move,
            state: InteractionState::Idle,
            session: None,
            options: ToolOptions::default(),
            constrain: false,
        }
    }

    pub fn editor(&self) -> &AnnotationEditor {
        &self.editor
    }

    pub fn tool(&self) -> Tool {
        self.tool
    }

    pub fn state(&self) -> InteractionState {
        self.state
    }

    pub fn availability(&self) -> Availability {
        self.editor.availability()
    }

    pub fn set_change_hook(&mut self, hook: impl FnMut() + 'static) {
        self.editor.set_change_hook(hook);
    }

    fn enter(&mut self, next: InteractionState) {
        if self.state != next {
            tracing::debug!(from = ?self.state, to = ?next, "interaction transition");
            self.state = next;
        }
    }

    // Toolbar command surface.

    pub fn select_tool(&mut self, tool: Tool) {
        self.finish_text_session(true);
        self.abort_gesture();
        if tool != Tool::Move {
            self.editor.select(None);
        }
        self.tool = tool;
    }

    pub fn set_color(&mut self, color: Color) {
        self.options.style.set_color(color);
    }

    pub fn set_stroke_width(&mut self, stroke_width: f32) {
        self.options.style.set_stroke_width(stroke_width);
    }

    pub fn set_opacity(&mut self, opacity: f32) {
        self.options.style.set_opacity(opacity);
    }

    pub fn set_fill_enabled(&mut self, fill_enabled: bool) {
        self.options.fill_enabled = fill_enabled;
    }

    pub fn set_eraser_mode(&mut self, mode: EraserMode) {
        self.options.eraser_mode = mode;
    }

    pub fn set_text_size(&mut self, size: f32) {
        self.options.text_style.set_size(size);
    }

    pub fn set_text_bg_color(&mut self, bg_color: Option<Color>) {
        self.options.text_style.set_bg_color(bg_color);
    }

    pub fn set_text_outline(&mut self, outline_color: Option<Color>, outline_width: f32) {
        self.options.text_style.set_outline(outline_color, outline_width);
    }

    pub fn set_stamp_glyph(&mut self, glyph: char) {
        self.options.stamp_glyph = glyph;
    }

    pub fn set_constrain(&mut self, constrain: bool) {
        self.constrain = constrain;
    }

    pub fn undo(&mut self) -> bool {
        self.abort_gesture();
        self.editor.undo()
    }

    pub fn redo(&mut self) -> bool {
        self.abort_gesture();
        self.editor.redo()
    }

    pub fn clear_all(&mut self) -> usize {
        self.abort_gesture();
        self.editor.clear_all()
    }

    pub fn duplicate(&mut self) -> Option<u64> {
        self.editor.duplicate_selected()
    }

    /// Abandon everything transient: live gesture, in-progress shape and
    /// selection.
    pub fn cancel(&mut self) {
        self.finish_text_session(false);
        self.abort_gesture();
        self.editor.discard_draft();
        self.editor.select(None);
    }

    // Pointer events.

    pub fn pointer_down(&mut self, point: Point) {
        // A click outside the text box blurs it, which commits.
        self.finish_text_session(true);

        match self.tool {
            Tool::Move => self.pointer_down_move(point),
            Tool::Eraser => {
                self.enter(InteractionState::Erasing);
                self.erase_at(point);
            }
            Tool::Text => {
                self.editor.begin_draft(
                    self.options.style,
                    Shape::Text(TextElement::new(point, self.options.text_style)),
                );
                self.enter(InteractionState::EditingText);
            }
            Tool::Callout => {
                let number = self.editor.next_callout_number();
                self.editor.begin_draft(
                    self.options.style,
                    Shape::Callout(CalloutElement::new(point, number)),
                );
                self.enter(InteractionState::Drawing);
            }
            Tool::Stamp => {
                self.editor.begin_draft(
                    self.options.style,
                    Shape::Stamp(StampElement::new(
                        point,
                        self.options.stamp_glyph,
                        StampElement::DEFAULT_SIZE,
                    )),
                );
                self.enter(InteractionState::Drawing);
            }
            Tool::Freehand => {
                self.editor.begin_draft(
                    self.options.style,
                    Shape::Freehand(FreehandStroke::new(point)),
                );
                self.enter(InteractionState::Drawing);
            }
            Tool::Rectangle | Tool::Ellipse | Tool::Arrow | Tool::Line | Tool::Highlight
            | Tool::Blur => {
                let kind = self.tool.draws().unwrap_or(ShapeKind::Rectangle);
                let fill = self.fill_for(kind);
                self.editor.begin_draft(
                    self.options.style,
                    span_shape(kind, SpanElement::with_fill(point, point, fill)),
                );
                self.enter(InteractionState::Drawing);
            }
        }
    }

    pub fn pointer_move(&mut self, point: Point) {
        match self.state {
            InteractionState::Drawing => self.update_draft(point),
            InteractionState::Dragging => {
                if let Some(session) = &self.session {
                    let moved = session.moved(point);
                    self.editor.replace(moved);
                }
            }
            InteractionState::Resizing => {
                if let Some(session) = &self.session {
                    let resized = session.resized(point);
                    self.editor.replace(resized);
                }
            }
            InteractionState::Rotating => {
                if let Some(session) = &self.session {
                    let rotated = session.rotated(point, self.constrain);
                    self.editor.replace(rotated);
                }
            }
            InteractionState::Erasing => self.erase_at(point),
            InteractionState::Idle | InteractionState::EditingText => {}
        }
    }

    pub fn pointer_up(&mut self, point: Point) {
        // Transform sessions take the release position as their final
        // geometry; drawing drafts were already shaped by the last move
        // (re-applying here would double-append freehand points).
        if matches!(
            self.state,
            InteractionState::Dragging | InteractionState::Resizing | InteractionState::Rotating
        ) {
            self.pointer_move(point);
        }
        self.finish_gesture();
    }

    /// The pointer left the canvas mid-gesture; sessions must not dangle, so
    /// this behaves like pointer-up at the last known position.
    pub fn pointer_leave(&mut self) {
        self.finish_gesture();
    }

    // Keyboard events.

    /// Route a key event to the modal text session. Returns whether the event
    /// was consumed.
    pub fn text_input(&mut self, event: TextInputEvent) -> bool {
        if self.state != InteractionState::EditingText {
            return false;
        }
        match event {
            TextInputEvent::Character(c) => {
                if let Some(text) = self.editor.draft_mut().and_then(|d| d.shape.as_text_mut()) {
                    text.insert_char(c);
                }
            }
            TextInputEvent::ShiftEnter => {
                if let Some(text) = self.editor.draft_mut().and_then(|d| d.shape.as_text_mut()) {
                    text.insert_newline();
                }
            }
            TextInputEvent::Backspace => {
                if let Some(text) = self.editor.draft_mut().and_then(|d| d.shape.as_text_mut()) {
                    text.delete_backward();
                }
            }
            TextInputEvent::Enter | TextInputEvent::Blur => self.finish_text_session(true),
            TextInputEvent::Escape => self.finish_text_session(false),
        }
        true
    }

    // Internals.

    fn pointer_down_move(&mut self, point: Point) {
        if let Some(selected) = self.editor.selected() {
            if let Some(handle) = hit::handle_at(selected, point, self.config.handle_radius) {
                let snapshot = selected.clone();
                match handle {
                    Handle::Rotate => {
                        self.session = Some(TransformSession::begin_rotate(snapshot, point));
                        self.enter(InteractionState::Rotating);
                    }
                    _ => {
                        self.session =
                            Some(TransformSession::begin_resize(snapshot, handle, point));
                        self.enter(InteractionState::Resizing);
                    }
                }
                return;
            }
        }

        match hit::annotation_at(point, self.editor.annotations(), self.config.hit_padding) {
            Some(hit) => {
                let snapshot = hit.clone();
                self.editor.select(Some(snapshot.id));
                self.session = Some(TransformSession::begin_move(snapshot, point));
                self.enter(InteractionState::Dragging);
            }
            None => self.editor.select(None),
        }
    }

    fn update_draft(&mut self, point: Point) {
        let constrain = self.constrain;
        let Some(draft) = self.editor.draft_mut() else {
            return;
        };
        let kind = draft.kind();
        match &mut draft.shape {
            Shape::Freehand(stroke) => stroke.append(point),
            Shape::Rectangle(span)
            | Shape::Ellipse(span)
            | Shape::Arrow(span)
            | Shape::Line(span)
            | Shape::Highlight(span)
            | Shape::Blur(span) => {
                span.end = if constrain {
                    transform::constrained_end(kind, span.start, point)
                } else {
                    point
                };
            }
            Shape::Text(_) => {}
            Shape::Callout(callout) => callout.position = point,
            Shape::Stamp(stamp) => stamp.position = point,
        }
    }

    fn erase_at(&mut self, point: Point) {
        match self.options.eraser_mode {
            EraserMode::Object => {
                let target = hit::annotation_at(
                    point,
                    self.editor.annotations(),
                    self.config.hit_padding,
                )
                .map(|annotation| annotation.id);
                if let Some(id) = target {
                    self.editor.erase(id);
                }
            }
            EraserMode::Stroke => {
                self.editor.erase_stroke_at(point, self.config.eraser_radius);
            }
        }
    }

    fn fill_for(&self, kind: ShapeKind) -> Option<Color> {
        (self.options.fill_enabled && kind.supports_fill()).then_some(self.options.style.color)
    }

    /// End of a pointer-down..up span: commit drawing drafts, drop transform
    /// sessions. Text stays modal until Enter/Escape/blur.
    fn finish_gesture(&mut self) {
        match self.state {
            InteractionState::Drawing => {
                self.editor.commit_draft();
                self.enter(InteractionState::Idle);
            }
            InteractionState::Dragging
            | InteractionState::Resizing
            | InteractionState::Rotating => {
                self.session = None;
                self.enter(InteractionState::Idle);
            }
            InteractionState::Erasing => self.enter(InteractionState::Idle),
            InteractionState::Idle | InteractionState::EditingText => {}
        }
    }

    /// Drop a live gesture without committing draft geometry.
    fn abort_gesture(&mut self) {
        self.session = None;
        if self.state == InteractionState::Drawing {
            self.editor.discard_draft();
        }
        if self.state != InteractionState::EditingText {
            self.enter(InteractionState::Idle);
        }
    }

    fn finish_text_session(&mut self, commit: bool) {
        if self.state != InteractionState::EditingText {
            return;
        }
        if commit {
            self.editor.commit_draft();
        } else {
            self.editor.discard_draft();
        }
        self.enter(InteractionState::Idle);
    }
}

const fn span_shape(kind: ShapeKind, span: SpanElement) -> Shape {
    match kind {
        ShapeKind::Ellipse => Shape::Ellipse(span),
        ShapeKind::Arrow => Shape::Arrow(span),
        ShapeKind::Line => Shape::Line(span),
        ShapeKind::Highlight => Shape::Highlight(span),
        ShapeKind::Blur => Shape::Blur(span),
        _ => Shape::Rectangle(span),
    }
}

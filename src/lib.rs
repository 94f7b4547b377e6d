//! Annotation engine for drawing markup over a static raster image: the
//! shape model, hit-testing and selection, move/resize/rotate transform
//! math, linear undo/redo, and the pipeline that composites image plus
//! shapes into one raster output. Toolbars, clipboards and host-page
//! adapters are external collaborators reached through commands and traits.

pub mod annotation;
pub mod config;
pub mod editor;
pub mod error;
pub mod geometry;
pub mod logging;
pub mod render;

pub use annotation::{Annotation, Shape, ShapeKind, StrokeStyle};
pub use config::{load_engine_config, EngineConfig};
pub use editor::{
    AnnotationEditor, Availability, EditorController, EraserMode, Handle, InteractionState,
    TextInputEvent, Tool,
};
pub use error::{EngineError, EngineResult};
pub use render::{CanvasBounds, ImageSource, RenderPipeline, ViewportCapture};

//! inkpage core library
//!
//! Stroke geometry model for freehand ink annotations: point storage,
//! bounding boxes, editing transforms, eraser hit-testing and the binary
//! document format.

pub mod config;
pub mod element;
pub mod erase_mask;
pub mod eraser;
pub mod error;
pub mod page;
pub mod persistence;
pub mod point;
pub mod point_buffer;
pub mod registry;
pub mod stream;
pub mod stroke;

pub use config::{ConfigError, InkConfig};
pub use element::{Color, Element, ElementBase, ElementKind, Rect, ShapeContainer};
pub use erase_mask::{EraseMask, EraseMaskId, EraseMaskTable};
pub use eraser::{EraserHit, HIT_SLACK};
pub use error::{StreamError, StreamResult, StrokeError, StrokeResult};
pub use page::{Page, StrokeId};
pub use persistence::{
    export_json, load_page, save_page, summarize, PageSummary, PersistenceError,
    PersistenceResult, StrokeSummary,
};
pub use point::Point;
pub use point_buffer::{PointBuffer, DEFAULT_GROWTH_CHUNK};
pub use registry::{read_element, DocumentElement};
pub use stream::{ObjectInputStream, ObjectOutputStream};
pub use stroke::{Stroke, StrokeTool};

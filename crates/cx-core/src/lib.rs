pub mod animation;
pub mod error;
pub mod export;
pub mod id;
pub mod model;
pub mod scene;
pub mod sink;
pub mod transform;

pub use animation::{AnimationRegistry, AnimationRequest, Easing, attach_animation};
pub use error::{ExportError, ExportResult};
pub use export::{ExportConfig, export_document, export_to_sink, render_element};
pub use id::{ElementId, IdMinter};
pub use model::*;
pub use scene::{Scene, UpdateOutcome};
pub use sink::{DeliverySink, FileSink, MemorySink};
pub use transform::{TransformResult, normalize_drag, normalize_transform};

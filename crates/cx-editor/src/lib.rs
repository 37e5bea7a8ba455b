//! CX editor: the editing session that sits between the interactive
//! surface, the control panel, and the core scene/export pipeline.

pub mod controls;
pub mod events;
pub mod image;
pub mod session;

pub use controls::Controls;
pub use events::{EditorEvent, EventOutcome, IgnoreReason};
pub use session::{SceneObserver, Session};

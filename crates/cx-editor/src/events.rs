//! Events delivered to the session by its collaborators.
//!
//! The interactive surface reports selection and gesture ends; the control
//! panel reports widget changes and button presses; the file reader reports
//! a finished image. Each event maps to one `EventOutcome`.

use cx_core::animation::Easing;
use cx_core::id::ElementId;
use cx_core::model::ElementType;
use serde::{Deserialize, Serialize};

/// An input to the editing session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum EditorEvent {
    // ── Interactive surface ──
    /// Click on an element, or on empty stage (`None`).
    Select {
        #[serde(default)]
        id: Option<ElementId>,
    },
    DragEnd {
        id: ElementId,
        x: f32,
        y: f32,
    },
    TransformEnd {
        id: ElementId,
        x: f32,
        y: f32,
        #[serde(rename = "scaleX")]
        scale_x: f32,
        #[serde(rename = "scaleY")]
        scale_y: f32,
    },

    // ── Control panel ──
    AddElement {
        #[serde(rename = "type")]
        element_type: ElementType,
    },
    SetColor {
        value: String,
    },
    SetTextSize {
        value: String,
    },
    SetAnimationX {
        value: String,
    },
    SetAnimationY {
        value: String,
    },
    SetAnimationDuration {
        value: String,
    },
    SetEasing {
        easing: Easing,
    },
    RequestAnimation,
    RequestExport,

    // ── File reader ──
    ImageReady {
        #[serde(rename = "dataUri")]
        data_uri: String,
    },
}

/// Why an event produced no change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    /// An animation was requested with nothing selected.
    NoSelection,
    /// The event named an element that is not in the scene.
    UnknownElement(ElementId),
    /// Images are added through `ImageReady`, not `AddElement`.
    NeedsImageData,
}

/// What handling an event did.
#[derive(Debug, Clone, PartialEq)]
pub enum EventOutcome {
    Added(ElementId),
    Updated(ElementId),
    Selected(Option<ElementId>),
    Animated {
        id: ElementId,
        class_name: String,
    },
    ControlChanged,
    /// The full exported document.
    Exported(String),
    Ignored(IgnoreReason),
}

impl EventOutcome {
    pub fn is_ignored(&self) -> bool {
        matches!(self, EventOutcome::Ignored(_))
    }
}

//! Core data model for a CX scene.
//!
//! A scene is a flat, ordered list of placed elements. Each element carries
//! an identity, a reference point, a residual scale (always identity once a
//! gesture has been normalized), its variant-specific geometry and paint,
//! and an optional animation class written by the animation registry.
//!
//! Sizes (`width`, `height`, `radius`) are canonical: real, directly
//! renderable values, never pending scale factors.

use crate::id::ElementId;
use serde::{Deserialize, Serialize};
use smallvec::{SmallVec, smallvec};

// ─── Element types ───────────────────────────────────────────────────────

/// The variant of an element, without its data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementType {
    Rect,
    Circle,
    Text,
    Image,
}

impl ElementType {
    /// Prefix used when minting ids for this type.
    pub fn prefix(self) -> &'static str {
        match self {
            ElementType::Rect => "rect",
            ElementType::Circle => "circle",
            ElementType::Text => "text",
            ElementType::Image => "image",
        }
    }
}

// ─── Shapes ──────────────────────────────────────────────────────────────

/// Axis-aligned rectangle; `(x, y)` is its top-left corner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RectShape {
    pub width: f32,
    pub height: f32,
    pub fill: String,
}

/// Circle; `(x, y)` is its center.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CircleShape {
    pub radius: f32,
    pub fill: String,
}

/// Text box; `(x, y)` is its top-left corner. Sized by `font_size`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextShape {
    pub text: String,
    pub font_size: f32,
    pub fill: String,
}

/// Embedded image; `(x, y)` is its top-left corner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageShape {
    /// Image payload, usually a `data:` URI.
    pub source: String,
    pub width: f32,
    pub height: f32,
}

/// Variant-specific part of an element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ElementKind {
    Rect(RectShape),
    Circle(CircleShape),
    Text(TextShape),
    Image(ImageShape),
}

impl ElementKind {
    pub fn element_type(&self) -> ElementType {
        match self {
            ElementKind::Rect(_) => ElementType::Rect,
            ElementKind::Circle(_) => ElementType::Circle,
            ElementKind::Text(_) => ElementType::Text,
            ElementKind::Image(_) => ElementType::Image,
        }
    }
}

// ─── Element ─────────────────────────────────────────────────────────────

fn identity_scale() -> f32 {
    1.0
}

/// A single placed element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Element {
    pub id: ElementId,
    pub x: f32,
    pub y: f32,
    #[serde(default = "identity_scale")]
    pub scale_x: f32,
    #[serde(default = "identity_scale")]
    pub scale_y: f32,
    #[serde(flatten)]
    pub kind: ElementKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub animation_class: Option<String>,
}

impl Element {
    pub fn new(id: ElementId, x: f32, y: f32, kind: ElementKind) -> Self {
        Self {
            id,
            x,
            y,
            scale_x: 1.0,
            scale_y: 1.0,
            kind,
            animation_class: None,
        }
    }

    pub fn rect(id: ElementId, x: f32, y: f32, width: f32, height: f32, fill: &str) -> Self {
        Self::new(
            id,
            x,
            y,
            ElementKind::Rect(RectShape {
                width,
                height,
                fill: fill.to_string(),
            }),
        )
    }

    pub fn circle(id: ElementId, x: f32, y: f32, radius: f32, fill: &str) -> Self {
        Self::new(
            id,
            x,
            y,
            ElementKind::Circle(CircleShape {
                radius,
                fill: fill.to_string(),
            }),
        )
    }

    pub fn text(id: ElementId, x: f32, y: f32, text: &str, font_size: f32, fill: &str) -> Self {
        Self::new(
            id,
            x,
            y,
            ElementKind::Text(TextShape {
                text: text.to_string(),
                font_size,
                fill: fill.to_string(),
            }),
        )
    }

    pub fn image(id: ElementId, x: f32, y: f32, source: &str, width: f32, height: f32) -> Self {
        Self::new(
            id,
            x,
            y,
            ElementKind::Image(ImageShape {
                source: source.to_string(),
                width,
                height,
            }),
        )
    }

    pub fn element_type(&self) -> ElementType {
        self.kind.element_type()
    }

    /// Apply one attribute assignment.
    ///
    /// Returns `false` (and leaves the element untouched) when the attribute
    /// does not exist on this element's variant.
    pub fn apply(&mut self, attr: &Attr) -> bool {
        let (id, element_type) = (self.id, self.element_type());
        match (attr, &mut self.kind) {
            (Attr::X(v), _) => self.x = *v,
            (Attr::Y(v), _) => self.y = *v,
            (Attr::ScaleX(v), _) => self.scale_x = *v,
            (Attr::ScaleY(v), _) => self.scale_y = *v,
            (Attr::AnimationClass(c), _) => self.animation_class = Some(c.clone()),
            (Attr::Width(v), ElementKind::Rect(s)) => s.width = *v,
            (Attr::Width(v), ElementKind::Image(s)) => s.width = *v,
            (Attr::Height(v), ElementKind::Rect(s)) => s.height = *v,
            (Attr::Height(v), ElementKind::Image(s)) => s.height = *v,
            (Attr::Radius(v), ElementKind::Circle(s)) => s.radius = *v,
            (Attr::FontSize(v), ElementKind::Text(s)) => s.font_size = *v,
            (Attr::Text(t), ElementKind::Text(s)) => s.text = t.clone(),
            (Attr::Fill(c), ElementKind::Rect(s)) => s.fill = c.clone(),
            (Attr::Fill(c), ElementKind::Circle(s)) => s.fill = c.clone(),
            (Attr::Fill(c), ElementKind::Text(s)) => s.fill = c.clone(),
            (Attr::Source(src), ElementKind::Image(s)) => s.source = src.clone(),
            _ => {
                log::trace!("skip `{}` on {id:?} ({element_type:?})", attr.name());
                return false;
            }
        }
        true
    }

    /// Apply every attribute of `patch` in order. Returns how many applied.
    pub fn apply_patch(&mut self, patch: &[Attr]) -> usize {
        patch.iter().filter(|attr| self.apply(attr)).count()
    }
}

// ─── Attribute patches ───────────────────────────────────────────────────

/// One attribute assignment, the unit of a partial update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "attr", content = "value", rename_all = "camelCase")]
pub enum Attr {
    X(f32),
    Y(f32),
    ScaleX(f32),
    ScaleY(f32),
    Width(f32),
    Height(f32),
    Radius(f32),
    FontSize(f32),
    Text(String),
    Fill(String),
    Source(String),
    AnimationClass(String),
}

impl Attr {
    /// Attribute key, as it would appear in a property bag.
    pub fn name(&self) -> &'static str {
        match self {
            Attr::X(_) => "x",
            Attr::Y(_) => "y",
            Attr::ScaleX(_) => "scaleX",
            Attr::ScaleY(_) => "scaleY",
            Attr::Width(_) => "width",
            Attr::Height(_) => "height",
            Attr::Radius(_) => "radius",
            Attr::FontSize(_) => "fontSize",
            Attr::Text(_) => "text",
            Attr::Fill(_) => "fill",
            Attr::Source(_) => "source",
            Attr::AnimationClass(_) => "animationClass",
        }
    }
}

/// An ordered partial-attribute update. Later entries win.
pub type AttrPatch = SmallVec<[Attr; 6]>;

// ─── Resize capability ───────────────────────────────────────────────────

/// Fold non-uniform scale factors into canonical size attributes.
///
/// Each shape decides which of its fields absorb the scale; the result
/// never contains scale attributes itself.
pub trait Resize {
    fn resize(&self, scale_x: f32, scale_y: f32) -> AttrPatch;
}

impl Resize for RectShape {
    fn resize(&self, scale_x: f32, scale_y: f32) -> AttrPatch {
        smallvec![
            Attr::Width(self.width * scale_x),
            Attr::Height(self.height * scale_y)
        ]
    }
}

impl Resize for CircleShape {
    /// Single radius: only `scale_x` applies.
    fn resize(&self, scale_x: f32, _scale_y: f32) -> AttrPatch {
        smallvec![Attr::Radius(self.radius * scale_x)]
    }
}

impl Resize for TextShape {
    /// Text is sized by `font_size`; scale is dropped.
    fn resize(&self, _scale_x: f32, _scale_y: f32) -> AttrPatch {
        AttrPatch::new()
    }
}

impl Resize for ImageShape {
    fn resize(&self, scale_x: f32, scale_y: f32) -> AttrPatch {
        smallvec![
            Attr::Width(self.width * scale_x),
            Attr::Height(self.height * scale_y)
        ]
    }
}

impl Resize for ElementKind {
    fn resize(&self, scale_x: f32, scale_y: f32) -> AttrPatch {
        match self {
            ElementKind::Rect(s) => s.resize(scale_x, scale_y),
            ElementKind::Circle(s) => s.resize(scale_x, scale_y),
            ElementKind::Text(s) => s.resize(scale_x, scale_y),
            ElementKind::Image(s) => s.resize(scale_x, scale_y),
        }
    }
}

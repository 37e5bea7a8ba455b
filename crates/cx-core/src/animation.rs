//! Animation registry: element identity → CSS keyframe rule + class name.
//!
//! Every registered animation appends one `@keyframes` rule and one class
//! rule to a single accumulated stylesheet. Names are a pure function of the
//! element id, so registering twice for the same element appends a second
//! pair with identical names; the later one wins under the cascade. Nothing
//! is ever removed or deduplicated.

use crate::export::format_num;
use crate::id::ElementId;
use crate::model::Attr;
use crate::scene::{Scene, UpdateOutcome};
use serde::{Deserialize, Serialize};
use std::fmt::Write;

// ─── Requests ────────────────────────────────────────────────────────────

/// CSS timing function for the generated animation.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Easing {
    #[default]
    Linear,
    Ease,
    EaseIn,
    EaseOut,
    EaseInOut,
    CubicBezier(f32, f32, f32, f32),
}

impl Easing {
    /// The CSS `animation-timing-function` value.
    pub fn to_css(&self) -> String {
        match self {
            Easing::Linear => "linear".into(),
            Easing::Ease => "ease".into(),
            Easing::EaseIn => "ease-in".into(),
            Easing::EaseOut => "ease-out".into(),
            Easing::EaseInOut => "ease-in-out".into(),
            Easing::CubicBezier(a, b, c, d) => format!(
                "cubic-bezier({}, {}, {}, {})",
                format_num(*a),
                format_num(*b),
                format_num(*c),
                format_num(*d)
            ),
        }
    }
}

/// A translation from the element's resting position to `(dx, dy)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnimationRequest {
    pub dx: f32,
    pub dy: f32,
    /// Seconds. Expected positive; not validated here.
    pub duration_secs: f32,
    #[serde(default)]
    pub easing: Easing,
}

impl AnimationRequest {
    pub fn translate(dx: f32, dy: f32, duration_secs: f32) -> Self {
        Self {
            dx,
            dy,
            duration_secs,
            easing: Easing::Linear,
        }
    }

    #[must_use]
    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }
}

// ─── Naming ──────────────────────────────────────────────────────────────

/// Class carried by the animated element: `animate-<id>`.
pub fn class_name(id: ElementId) -> String {
    format!("animate-{id}")
}

/// Name of the keyframes rule: `move-<id>`.
pub fn keyframes_name(id: ElementId) -> String {
    format!("move-{id}")
}

/// Render the keyframes + class rule pair for one request.
pub fn keyframe_rule(id: ElementId, request: &AnimationRequest) -> String {
    let keyframes = keyframes_name(id);
    let class = class_name(id);
    let mut out = String::with_capacity(256);

    writeln!(out, "@keyframes {keyframes} {{").unwrap();
    out.push_str("  0% { transform: translate(0px, 0px); }\n");
    writeln!(
        out,
        "  100% {{ transform: translate({}px, {}px); }}",
        format_num(request.dx),
        format_num(request.dy)
    )
    .unwrap();
    out.push_str("}\n");
    writeln!(out, ".{class} {{").unwrap();
    writeln!(
        out,
        "  animation: {keyframes} {}s {} forwards;",
        format_secs(request.duration_secs),
        request.easing.to_css()
    )
    .unwrap();
    out.push_str("}\n");
    out
}

/// Durations keep full precision: rounding a short positive duration to
/// two decimals would turn it into `0s`.
fn format_secs(secs: f32) -> String {
    if secs.is_finite() {
        format!("{secs}")
    } else {
        format_num(secs)
    }
}

// ─── Registry ────────────────────────────────────────────────────────────

/// One registered animation.
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationEntry {
    pub element: ElementId,
    pub class_name: String,
    pub keyframes_name: String,
    pub request: AnimationRequest,
    /// The exact text appended to the stylesheet.
    pub rule: String,
}

/// Append-only store of generated animation rules.
#[derive(Debug, Clone, Default)]
pub struct AnimationRegistry {
    entries: Vec<AnimationEntry>,
    stylesheet: String,
}

impl AnimationRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Generate and append the rule for `id`. Does not touch the scene.
    pub fn register(&mut self, id: ElementId, request: &AnimationRequest) -> &AnimationEntry {
        let rule = keyframe_rule(id, request);
        self.stylesheet.push_str(&rule);
        log::debug!(
            "registered {} for {id:?} ({} bytes of animation css)",
            keyframes_name(id),
            self.stylesheet.len()
        );
        self.entries.push(AnimationEntry {
            element: id,
            class_name: class_name(id),
            keyframes_name: keyframes_name(id),
            request: *request,
            rule,
        });
        &self.entries[self.entries.len() - 1]
    }

    /// Everything registered so far, concatenated in registration order.
    pub fn stylesheet(&self) -> &str {
        &self.stylesheet
    }

    pub fn entries(&self) -> &[AnimationEntry] {
        &self.entries
    }

    /// Entries registered for one element, oldest first.
    pub fn entries_for(&self, id: ElementId) -> impl Iterator<Item = &AnimationEntry> {
        self.entries.iter().filter(move |e| e.element == id)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Register an animation for `id` and write its class onto the element.
///
/// An id that is not in the scene leaves both the registry and the scene
/// untouched.
pub fn attach_animation<'a>(
    scene: &'a mut Scene,
    registry: &mut AnimationRegistry,
    id: ElementId,
    request: &AnimationRequest,
) -> UpdateOutcome<'a> {
    if !scene.contains(id) {
        log::debug!("animation for unknown element {id:?} ignored");
        return UpdateOutcome::NotFound;
    }
    let class = registry.register(id, request).class_name.clone();
    scene.update(id, &[Attr::AnimationClass(class)])
}

//! Control panel state: color, text size, animation parameters.
//!
//! Numeric inputs arrive as raw text. Coercion to a safe value happens here,
//! before anything reaches the core: empty, unparseable or non-finite input
//! falls back to the field's default.

use cx_core::animation::{AnimationRequest, Easing};
use cx_core::id::ElementId;
use cx_core::model::Element;

pub const DEFAULT_COLOR: &str = "#000000";
pub const DEFAULT_TEXT_SIZE: f32 = 24.0;
pub const DEFAULT_ANIMATION_OFFSET: f32 = 0.0;
pub const DEFAULT_ANIMATION_DURATION: f32 = 2.0;
pub const DEFAULT_TEXT: &str = "New Text";

/// Current values of the control widgets.
#[derive(Debug, Clone, PartialEq)]
pub struct Controls {
    pub color: String,
    pub text_size: f32,
    pub animation_x: f32,
    pub animation_y: f32,
    pub animation_duration: f32,
    pub easing: Easing,
}

impl Default for Controls {
    fn default() -> Self {
        Self {
            color: DEFAULT_COLOR.to_string(),
            text_size: DEFAULT_TEXT_SIZE,
            animation_x: DEFAULT_ANIMATION_OFFSET,
            animation_y: DEFAULT_ANIMATION_OFFSET,
            animation_duration: DEFAULT_ANIMATION_DURATION,
            easing: Easing::Linear,
        }
    }
}

impl Controls {
    pub fn new() -> Self {
        Self::default()
    }

    /// A color is a single CSS value: empty input, or input that could close
    /// the declaration (`;`, `{`, `}`), resets to the default.
    pub fn set_color(&mut self, raw: &str) {
        let raw = raw.trim();
        self.color = if raw.is_empty() {
            DEFAULT_COLOR.to_string()
        } else if raw.contains([';', '{', '}']) {
            log::warn!("rejected color {raw:?}");
            DEFAULT_COLOR.to_string()
        } else {
            raw.to_string()
        };
    }

    pub fn set_text_size(&mut self, raw: &str) {
        self.text_size = coerce_number(raw, DEFAULT_TEXT_SIZE);
    }

    pub fn set_animation_x(&mut self, raw: &str) {
        self.animation_x = coerce_number(raw, DEFAULT_ANIMATION_OFFSET);
    }

    pub fn set_animation_y(&mut self, raw: &str) {
        self.animation_y = coerce_number(raw, DEFAULT_ANIMATION_OFFSET);
    }

    /// Durations must be positive; anything else resets to the default.
    pub fn set_animation_duration(&mut self, raw: &str) {
        let d = coerce_number(raw, DEFAULT_ANIMATION_DURATION);
        self.animation_duration = if d > 0.0 {
            d
        } else {
            DEFAULT_ANIMATION_DURATION
        };
    }

    /// The animation the panel would request right now.
    pub fn animation_request(&self) -> AnimationRequest {
        AnimationRequest::translate(self.animation_x, self.animation_y, self.animation_duration)
            .with_easing(self.easing)
    }

    // ─── Templates ───────────────────────────────────────────────────────

    pub fn rect_template(&self, id: ElementId) -> Element {
        Element::rect(id, 50.0, 50.0, 100.0, 100.0, &self.color)
    }

    pub fn circle_template(&self, id: ElementId) -> Element {
        Element::circle(id, 150.0, 150.0, 50.0, &self.color)
    }

    pub fn text_template(&self, id: ElementId) -> Element {
        Element::text(id, 100.0, 100.0, DEFAULT_TEXT, self.text_size, &self.color)
    }

    pub fn image_template(&self, id: ElementId, source: &str) -> Element {
        Element::image(id, 100.0, 100.0, source, 200.0, 200.0)
    }
}

/// Parse `raw` as a finite number, or return `default`.
pub fn coerce_number(raw: &str, default: f32) -> f32 {
    match raw.trim().parse::<f32>() {
        Ok(n) if n.is_finite() => n,
        _ => default,
    }
}

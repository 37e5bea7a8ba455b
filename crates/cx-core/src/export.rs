//! Exporter: Scene + animation stylesheet → standalone HTML document.
//!
//! Each element becomes one absolutely positioned fragment inside a
//! full-viewport container. Output is a pure function of its inputs: no
//! timestamps, no generated ids, stable number formatting.

use crate::error::ExportResult;
use crate::model::{Element, ElementKind};
use crate::scene::Scene;
use crate::sink::DeliverySink;
use serde::{Deserialize, Serialize};
use std::fmt::Write;

/// Shared class giving every fragment `position: absolute`.
pub const ELEMENT_CLASS: &str = "canvas-element";

/// Class of the full-viewport positioning container.
pub const CONTAINER_CLASS: &str = "canvas-container";

/// Base rules emitted before any animation rules.
pub const BASE_STYLESHEET: &str = "\
body { margin: 0; padding: 0; }
.canvas-container { position: relative; width: 100vw; height: 100vh; }
.canvas-element { position: absolute; }
";

// ─── Config ───────────────────────────────────────────────────────────────

/// Document-level export settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ExportConfig {
    /// `<title>` of the exported page. Default: **Exported Canvas**.
    pub title: String,
    /// `lang` attribute of `<html>`. Default: **en**.
    pub lang: String,
    /// File name suggested to the delivery sink. Default: **canvas.html**.
    pub file_name: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            title: "Exported Canvas".into(),
            lang: "en".into(),
            file_name: "canvas.html".into(),
        }
    }
}

// ─── Document ─────────────────────────────────────────────────────────────

/// Render the whole document.
///
/// `animation_css` is appended verbatim after `BASE_STYLESHEET`.
#[must_use]
pub fn export_document(scene: &Scene, animation_css: &str, config: &ExportConfig) -> String {
    let mut out = String::with_capacity(1024 + scene.len() * 160 + animation_css.len());

    out.push_str("<!DOCTYPE html>\n");
    writeln!(out, "<html lang=\"{}\">", escape_html(&config.lang)).unwrap();
    out.push_str("<head>\n");
    out.push_str("<meta charset=\"UTF-8\">\n");
    out.push_str(
        "<meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n",
    );
    writeln!(out, "<title>{}</title>", escape_html(&config.title)).unwrap();
    out.push_str("<style>\n");
    out.push_str(BASE_STYLESHEET);
    out.push_str(animation_css);
    if !animation_css.is_empty() && !animation_css.ends_with('\n') {
        out.push('\n');
    }
    out.push_str("</style>\n");
    out.push_str("</head>\n");
    out.push_str("<body>\n");
    writeln!(out, "<div class=\"{CONTAINER_CLASS}\">").unwrap();
    for element in scene.iter() {
        out.push_str(&render_element(element));
        out.push('\n');
    }
    out.push_str("</div>\n");
    out.push_str("</body>\n");
    out.push_str("</html>\n");
    out
}

/// Render the document and hand it to `sink` under `config.file_name`.
pub fn export_to_sink(
    scene: &Scene,
    animation_css: &str,
    config: &ExportConfig,
    sink: &mut dyn DeliverySink,
) -> ExportResult<()> {
    let document = export_document(scene, animation_css, config);
    log::debug!(
        "exporting {} elements as {} ({} bytes)",
        scene.len(),
        config.file_name,
        document.len()
    );
    sink.save(&document, &config.file_name)
}

// ─── Fragments ────────────────────────────────────────────────────────────

/// Render one element as a positioned HTML fragment.
#[must_use]
pub fn render_element(element: &Element) -> String {
    let class = class_attr(element);
    match &element.kind {
        ElementKind::Rect(rect) => {
            let style = style_attr(&[
                ("top", px(element.y)),
                ("left", px(element.x)),
                ("width", px(rect.width)),
                ("height", px(rect.height)),
                ("background-color", rect.fill.clone()),
            ]);
            format!("<div class=\"{class}\" style=\"{style}\"></div>")
        }
        ElementKind::Circle(circle) => {
            // Center-based geometry → top-left box of side 2r.
            let r = circle.radius;
            let style = style_attr(&[
                ("top", px(element.y - r)),
                ("left", px(element.x - r)),
                ("width", px(r * 2.0)),
                ("height", px(r * 2.0)),
                ("border-radius", "50%".to_string()),
                ("background-color", circle.fill.clone()),
            ]);
            format!("<div class=\"{class}\" style=\"{style}\"></div>")
        }
        ElementKind::Text(text) => {
            let style = style_attr(&[
                ("top", px(element.y)),
                ("left", px(element.x)),
                ("font-size", px(text.font_size)),
                ("color", text.fill.clone()),
            ]);
            format!(
                "<div class=\"{class}\" style=\"{style}\">{}</div>",
                escape_html(&text.text)
            )
        }
        ElementKind::Image(image) => {
            let style = style_attr(&[
                ("top", px(element.y)),
                ("left", px(element.x)),
                ("width", px(image.width)),
                ("height", px(image.height)),
            ]);
            format!(
                "<img src=\"{}\" alt=\"\" class=\"{class}\" style=\"{style}\" />",
                escape_html(&image.source)
            )
        }
    }
}

/// Base class plus the animation class, if any.
fn class_attr(element: &Element) -> String {
    match &element.animation_class {
        Some(anim) if !anim.is_empty() => {
            format!("{ELEMENT_CLASS} {}", escape_html(anim))
        }
        _ => ELEMENT_CLASS.to_string(),
    }
}

/// `prop:value;` declarations joined by single spaces, escaped for an attribute.
fn style_attr(decls: &[(&str, String)]) -> String {
    let mut out = String::new();
    for (i, (prop, value)) in decls.iter().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        write!(out, "{prop}:{};", escape_html(value)).unwrap();
    }
    out
}

fn px(n: f32) -> String {
    format!("{}px", format_num(n))
}

// ─── Text helpers ─────────────────────────────────────────────────────────

/// Format a number without a trailing `.0`, at most two decimals.
///
/// Non-finite values have no CSS form and are written as `0`.
pub(crate) fn format_num(n: f32) -> String {
    if !n.is_finite() {
        log::warn!("non-finite value {n} exported as 0");
        return "0".to_string();
    }
    if n == 0.0 {
        "0".to_string()
    } else if n == n.floor() {
        format!("{n}")
    } else {
        let s = format!("{n:.2}");
        match s.trim_end_matches('0').trim_end_matches('.') {
            "-0" => "0".to_string(),
            trimmed => trimmed.to_string(),
        }
    }
}

/// Escape text for use in HTML content and double-quoted attributes.
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::id::ElementId;
    use pretty_assertions::assert_eq;

    fn id(s: &str) -> ElementId {
        ElementId::intern(s)
    }

    #[test]
    fn rect_fragment() {
        let el = Element::rect(id("rect0"), 50.0, 50.0, 100.0, 100.0, "#ff0000");
        assert_eq!(
            render_element(&el),
            "<div class=\"canvas-element\" style=\"top:50px; left:50px; width:100px; \
             height:100px; background-color:#ff0000;\"></div>"
        );
    }

    #[test]
    fn circle_fragment_converts_center_to_corner() {
        let el = Element::circle(id("circle0"), 150.0, 150.0, 50.0, "#00ff00");
        assert_eq!(
            render_element(&el),
            "<div class=\"canvas-element\" style=\"top:100px; left:100px; width:100px; \
             height:100px; border-radius:50%; background-color:#00ff00;\"></div>"
        );
    }

    #[test]
    fn text_fragment_escapes_content() {
        let el = Element::text(id("text0"), 100.0, 100.0, "a < b & \"c\"", 24.0, "#000000");
        assert_eq!(
            render_element(&el),
            "<div class=\"canvas-element\" style=\"top:100px; left:100px; font-size:24px; \
             color:#000000;\">a &lt; b &amp; &quot;c&quot;</div>"
        );
    }

    #[test]
    fn image_fragment() {
        let el = Element::image(id("image0"), 100.0, 100.0, "data:image/png;base64,AAAA", 200.0, 150.5);
        assert_eq!(
            render_element(&el),
            "<img src=\"data:image/png;base64,AAAA\" alt=\"\" class=\"canvas-element\" \
             style=\"top:100px; left:100px; width:200px; height:150.5px;\" />"
        );
    }

    #[test]
    fn animation_class_is_appended() {
        let mut el = Element::rect(id("rect0"), 0.0, 0.0, 1.0, 1.0, "#000");
        el.animation_class = Some("animate-rect0".into());
        assert!(render_element(&el).starts_with("<div class=\"canvas-element animate-rect0\""));
    }

    #[test]
    fn empty_scene_document() {
        let doc = export_document(&Scene::new(), "", &ExportConfig::default());
        assert_eq!(
            doc,
            "<!DOCTYPE html>\n\
             <html lang=\"en\">\n\
             <head>\n\
             <meta charset=\"UTF-8\">\n\
             <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n\
             <title>Exported Canvas</title>\n\
             <style>\n\
             body { margin: 0; padding: 0; }\n\
             .canvas-container { position: relative; width: 100vw; height: 100vh; }\n\
             .canvas-element { position: absolute; }\n\
             </style>\n\
             </head>\n\
             <body>\n\
             <div class=\"canvas-container\">\n\
             </div>\n\
             </body>\n\
             </html>\n"
        );
    }

    #[test]
    fn animation_css_follows_base_rules() {
        let doc = export_document(&Scene::new(), ".x { color: red; }", &ExportConfig::default());
        let base = doc.find(".canvas-element { position: absolute; }").unwrap();
        let anim = doc.find(".x { color: red; }\n</style>").unwrap();
        assert!(base < anim);
    }

    #[test]
    fn config_title_is_escaped() {
        let config = ExportConfig {
            title: "Tom & Jerry".into(),
            ..Default::default()
        };
        let doc = export_document(&Scene::new(), "", &config);
        assert!(doc.contains("<title>Tom &amp; Jerry</title>"));
    }

    #[test]
    fn fragments_follow_scene_order() {
        let mut scene = Scene::new();
        scene.append(Element::circle(id("circle_a"), 10.0, 10.0, 5.0, "#111"));
        scene.append(Element::rect(id("rect_b"), 0.0, 0.0, 5.0, 5.0, "#222"));
        let doc = export_document(&scene, "", &ExportConfig::default());
        let a = doc.find("#111").unwrap();
        let b = doc.find("#222").unwrap();
        assert!(a < b);
    }

    #[test]
    fn format_num_trims() {
        assert_eq!(format_num(100.0), "100");
        assert_eq!(format_num(-25.0), "-25");
        assert_eq!(format_num(1.5), "1.5");
        assert_eq!(format_num(0.126), "0.13");
        assert_eq!(format_num(2.10), "2.1");
        assert_eq!(format_num(-0.0), "0");
        assert_eq!(format_num(-0.001), "0");
    }

    #[test]
    fn format_num_keeps_large_whole_numbers() {
        assert_eq!(format_num(3.0e9), "3000000000");
        assert_eq!(format_num(-4.0e9), "-4000000000");
        assert_eq!(format_num(f32::INFINITY), "0");
        assert_eq!(format_num(f32::NAN), "0");
    }

    #[test]
    fn huge_sizes_are_not_saturated() {
        let el = Element::rect(id("rect_huge"), 0.0, 0.0, 3.0e9, 10.0, "#000");
        assert!(render_element(&el).contains("width:3000000000px;"));
    }

    #[test]
    fn base_stylesheet_matches_class_constants() {
        assert!(BASE_STYLESHEET.contains(&format!(".{CONTAINER_CLASS} {{")));
        assert!(BASE_STYLESHEET.contains(&format!(".{ELEMENT_CLASS} {{")));
    }

    #[test]
    fn config_from_partial_json() {
        let config: ExportConfig = serde_json::from_str(r#"{"title":"Demo"}"#).unwrap();
        assert_eq!(config.title, "Demo");
        assert_eq!(config.file_name, "canvas.html");
        assert_eq!(config.lang, "en");
    }
}

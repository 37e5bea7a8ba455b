//! Transform normalization: gesture results → canonical attributes.
//!
//! The interactive surface reports a moved/resized element as an absolute
//! position plus axis scale factors layered over the element's unscaled
//! geometry. This pass folds the factors back into real sizes and resets
//! scale to identity, so repeated resizes never compound.

use crate::id::ElementId;
use crate::model::{Attr, AttrPatch, Element, Resize};
use crate::scene::{Scene, UpdateOutcome};
use serde::{Deserialize, Serialize};
use smallvec::smallvec;

/// What the surface reports at the end of a move/resize gesture.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransformResult {
    pub x: f32,
    pub y: f32,
    pub scale_x: f32,
    pub scale_y: f32,
}

impl TransformResult {
    /// A pure move: position only, identity scale.
    pub fn moved_to(x: f32, y: f32) -> Self {
        Self {
            x,
            y,
            scale_x: 1.0,
            scale_y: 1.0,
        }
    }
}

/// Build the canonical patch for `element` after `result`.
///
/// Position and identity scale come first, then whatever the element's
/// shape folds the scale into. Sizes are not clamped.
#[must_use]
pub fn transform_patch(element: &Element, result: &TransformResult) -> AttrPatch {
    let mut patch: AttrPatch = smallvec![
        Attr::X(result.x),
        Attr::Y(result.y),
        Attr::ScaleX(1.0),
        Attr::ScaleY(1.0),
    ];
    patch.extend(element.kind.resize(result.scale_x, result.scale_y));
    patch
}

/// Apply a resize/move result to the element `id` in `scene`.
pub fn normalize_transform<'a>(
    scene: &'a mut Scene,
    id: ElementId,
    result: &TransformResult,
) -> UpdateOutcome<'a> {
    let Some(element) = scene.get(id) else {
        log::debug!("transform end on unknown element {id:?} ignored");
        return UpdateOutcome::NotFound;
    };
    let patch = transform_patch(element, result);
    scene.update(id, &patch)
}

/// Apply a drag-end position to the element `id` in `scene`.
pub fn normalize_drag(scene: &mut Scene, id: ElementId, x: f32, y: f32) -> UpdateOutcome<'_> {
    scene.update(id, &[Attr::X(x), Attr::Y(y)])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ElementKind;

    fn scene_with(element: Element) -> Scene {
        let mut scene = Scene::new();
        scene.append(element);
        scene
    }

    #[test]
    fn rect_fold() {
        let id = ElementId::intern("rect0");
        let mut scene = scene_with(Element::rect(id, 50.0, 50.0, 100.0, 50.0, "#ff0000"));

        let result = TransformResult {
            x: 60.0,
            y: 70.0,
            scale_x: 1.5,
            scale_y: 2.0,
        };
        let el = normalize_transform(&mut scene, id, &result).element().unwrap();

        assert_eq!((el.x, el.y), (60.0, 70.0));
        assert_eq!((el.scale_x, el.scale_y), (1.0, 1.0));
        match &el.kind {
            ElementKind::Rect(r) => {
                assert_eq!(r.width, 150.0);
                assert_eq!(r.height, 100.0);
            }
            _ => panic!("expected Rect"),
        }
    }

    #[test]
    fn circle_uses_scale_x_only() {
        let id = ElementId::intern("circle0");
        let mut scene = scene_with(Element::circle(id, 150.0, 150.0, 10.0, "#00ff00"));

        let result = TransformResult {
            x: 150.0,
            y: 150.0,
            scale_x: 2.0,
            scale_y: 5.0,
        };
        let el = normalize_transform(&mut scene, id, &result).element().unwrap();
        match &el.kind {
            ElementKind::Circle(c) => assert_eq!(c.radius, 20.0),
            _ => panic!("expected Circle"),
        }
        assert_eq!((el.scale_x, el.scale_y), (1.0, 1.0));
    }

    #[test]
    fn text_only_moves() {
        let id = ElementId::intern("text0");
        let mut scene = scene_with(Element::text(id, 100.0, 100.0, "hi", 24.0, "#000"));

        let result = TransformResult {
            x: 5.0,
            y: 6.0,
            scale_x: 3.0,
            scale_y: 3.0,
        };
        let el = normalize_transform(&mut scene, id, &result).element().unwrap();
        assert_eq!((el.x, el.y), (5.0, 6.0));
        match &el.kind {
            ElementKind::Text(t) => assert_eq!(t.font_size, 24.0),
            _ => panic!("expected Text"),
        }
    }

    #[test]
    fn image_folds_like_rect() {
        let id = ElementId::intern("image0");
        let mut scene = scene_with(Element::image(id, 100.0, 100.0, "data:,", 200.0, 200.0));

        let result = TransformResult {
            x: 100.0,
            y: 100.0,
            scale_x: 0.5,
            scale_y: 0.25,
        };
        let el = normalize_transform(&mut scene, id, &result).element().unwrap();
        match &el.kind {
            ElementKind::Image(i) => {
                assert_eq!(i.width, 100.0);
                assert_eq!(i.height, 50.0);
            }
            _ => panic!("expected Image"),
        }
    }

    #[test]
    fn identity_rerun_is_stable() {
        let id = ElementId::intern("rect_stable");
        let mut scene = scene_with(Element::rect(id, 0.0, 0.0, 80.0, 40.0, "#000"));

        let first = TransformResult {
            x: 10.0,
            y: 10.0,
            scale_x: 1.25,
            scale_y: 3.0,
        };
        let after_first = normalize_transform(&mut scene, id, &first)
            .element()
            .cloned()
            .unwrap();

        let second = TransformResult::moved_to(after_first.x, after_first.y);
        let after_second = normalize_transform(&mut scene, id, &second)
            .element()
            .cloned()
            .unwrap();

        assert_eq!(after_first, after_second);
    }

    #[test]
    fn shrinking_to_zero_is_not_clamped() {
        let id = ElementId::intern("rect_zero");
        let mut scene = scene_with(Element::rect(id, 0.0, 0.0, 80.0, 40.0, "#000"));

        let result = TransformResult {
            x: 0.0,
            y: 0.0,
            scale_x: 0.0,
            scale_y: -1.0,
        };
        let el = normalize_transform(&mut scene, id, &result).element().unwrap();
        match &el.kind {
            ElementKind::Rect(r) => {
                assert_eq!(r.width, 0.0);
                assert_eq!(r.height, -40.0);
            }
            _ => panic!("expected Rect"),
        }
    }

    #[test]
    fn unknown_id_is_noop() {
        let mut scene = scene_with(Element::rect(
            ElementId::intern("rect_known"),
            0.0,
            0.0,
            1.0,
            1.0,
            "#000",
        ));
        let before = scene.clone();
        let outcome = normalize_transform(
            &mut scene,
            ElementId::intern("rect_unknown"),
            &TransformResult::moved_to(9.0, 9.0),
        );
        assert_eq!(outcome, UpdateOutcome::NotFound);
        assert_eq!(scene.all(), before.all());
    }

    #[test]
    fn drag_changes_position_only() {
        let id = ElementId::intern("circle_drag");
        let mut scene = scene_with(Element::circle(id, 150.0, 150.0, 50.0, "#00ff00"));
        let el = normalize_drag(&mut scene, id, 20.0, 30.0).element().unwrap();
        assert_eq!((el.x, el.y), (20.0, 30.0));
        match &el.kind {
            ElementKind::Circle(c) => assert_eq!(c.radius, 50.0),
            _ => panic!("expected Circle"),
        }
    }

    #[test]
    fn patch_order_is_position_scale_size() {
        let el = Element::rect(ElementId::intern("rect_p"), 0.0, 0.0, 10.0, 20.0, "#000");
        let patch = transform_patch(
            &el,
            &TransformResult {
                x: 1.0,
                y: 2.0,
                scale_x: 2.0,
                scale_y: 2.0,
            },
        );
        let names: Vec<_> = patch.iter().map(Attr::name).collect();
        assert_eq!(names, ["x", "y", "scaleX", "scaleY", "width", "height"]);
    }
}

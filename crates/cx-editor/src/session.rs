//! Editing session: the one context object that owns all mutable state.
//!
//! The scene, the animation registry, the current selection and the id
//! counter live together here and are passed explicitly, never shared
//! globally. Every event is handled synchronously; a missing precondition
//! (no selection, stale id) is reported as `EventOutcome::Ignored` and
//! changes nothing.

use crate::controls::Controls;
use crate::events::{EditorEvent, EventOutcome, IgnoreReason};
use cx_core::animation::{AnimationRegistry, attach_animation};
use cx_core::error::ExportResult;
use cx_core::export::{ExportConfig, export_document, export_to_sink};
use cx_core::id::{ElementId, IdMinter};
use cx_core::model::{Element, ElementType};
use cx_core::scene::{Scene, UpdateOutcome};
use cx_core::sink::DeliverySink;
use cx_core::transform::{TransformResult, normalize_drag, normalize_transform};

/// Receives the scene after every change, for re-rendering.
pub trait SceneObserver {
    fn scene_changed(&mut self, elements: &[Element], selection: Option<ElementId>);
}

/// The editing session.
pub struct Session {
    scene: Scene,
    animations: AnimationRegistry,
    selection: Option<ElementId>,
    ids: IdMinter,

    /// Control panel state (color, sizes, animation parameters).
    pub controls: Controls,

    /// Settings used by `export` and `export_to`.
    pub export_config: ExportConfig,

    observers: Vec<Box<dyn SceneObserver>>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    /// Start an empty session.
    pub fn new() -> Self {
        Self::with_config(ExportConfig::default())
    }

    pub fn with_config(export_config: ExportConfig) -> Self {
        Self {
            scene: Scene::new(),
            animations: AnimationRegistry::new(),
            selection: None,
            ids: IdMinter::new(),
            controls: Controls::new(),
            export_config,
            observers: Vec::new(),
        }
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn animations(&self) -> &AnimationRegistry {
        &self.animations
    }

    pub fn selection(&self) -> Option<ElementId> {
        self.selection
    }

    pub fn add_observer(&mut self, observer: Box<dyn SceneObserver>) {
        self.observers.push(observer);
    }

    fn notify(&mut self) {
        let elements = self.scene.all();
        for observer in &mut self.observers {
            observer.scene_changed(elements, self.selection);
        }
    }

    // ─── Dispatch ────────────────────────────────────────────────────────

    /// Handle one event from the surface, the control panel or the file reader.
    pub fn handle(&mut self, event: EditorEvent) -> EventOutcome {
        log::debug!("event {event:?}");
        match event {
            EditorEvent::Select { id } => self.select(id),
            EditorEvent::DragEnd { id, x, y } => self.drag_end(id, x, y),
            EditorEvent::TransformEnd {
                id,
                x,
                y,
                scale_x,
                scale_y,
            } => self.transform_end(
                id,
                TransformResult {
                    x,
                    y,
                    scale_x,
                    scale_y,
                },
            ),
            EditorEvent::AddElement { element_type } => self.add_element(element_type),
            EditorEvent::ImageReady { data_uri } => self.image_ready(&data_uri),
            EditorEvent::SetColor { value } => {
                self.controls.set_color(&value);
                EventOutcome::ControlChanged
            }
            EditorEvent::SetTextSize { value } => {
                self.controls.set_text_size(&value);
                EventOutcome::ControlChanged
            }
            EditorEvent::SetAnimationX { value } => {
                self.controls.set_animation_x(&value);
                EventOutcome::ControlChanged
            }
            EditorEvent::SetAnimationY { value } => {
                self.controls.set_animation_y(&value);
                EventOutcome::ControlChanged
            }
            EditorEvent::SetAnimationDuration { value } => {
                self.controls.set_animation_duration(&value);
                EventOutcome::ControlChanged
            }
            EditorEvent::SetEasing { easing } => {
                self.controls.easing = easing;
                EventOutcome::ControlChanged
            }
            EditorEvent::RequestAnimation => self.request_animation(),
            EditorEvent::RequestExport => EventOutcome::Exported(self.export()),
        }
    }

    // ─── Surface events ──────────────────────────────────────────────────

    /// Select an element, or clear the selection.
    ///
    /// An id that is not in the scene clears the selection.
    pub fn select(&mut self, id: Option<ElementId>) -> EventOutcome {
        self.selection = id.filter(|id| self.scene.contains(*id));
        if id.is_some() && self.selection.is_none() {
            log::debug!("select on unknown element {id:?}; selection cleared");
        }
        self.notify();
        EventOutcome::Selected(self.selection)
    }

    pub fn drag_end(&mut self, id: ElementId, x: f32, y: f32) -> EventOutcome {
        let outcome = match normalize_drag(&mut self.scene, id, x, y) {
            UpdateOutcome::Updated(_) => EventOutcome::Updated(id),
            UpdateOutcome::NotFound => EventOutcome::Ignored(IgnoreReason::UnknownElement(id)),
        };
        self.after_mutation(outcome)
    }

    pub fn transform_end(&mut self, id: ElementId, result: TransformResult) -> EventOutcome {
        let outcome = match normalize_transform(&mut self.scene, id, &result) {
            UpdateOutcome::Updated(_) => EventOutcome::Updated(id),
            UpdateOutcome::NotFound => EventOutcome::Ignored(IgnoreReason::UnknownElement(id)),
        };
        self.after_mutation(outcome)
    }

    // ─── Control panel ───────────────────────────────────────────────────

    /// Add a rectangle, circle or text from the current control values.
    pub fn add_element(&mut self, element_type: ElementType) -> EventOutcome {
        let element = match element_type {
            ElementType::Rect => self.controls.rect_template(self.ids.mint(element_type)),
            ElementType::Circle => self.controls.circle_template(self.ids.mint(element_type)),
            ElementType::Text => self.controls.text_template(self.ids.mint(element_type)),
            ElementType::Image => return EventOutcome::Ignored(IgnoreReason::NeedsImageData),
        };
        self.append(element)
    }

    /// Add an image once the file reader has produced its payload.
    pub fn image_ready(&mut self, data_uri: &str) -> EventOutcome {
        let id = self.ids.mint(ElementType::Image);
        let element = self.controls.image_template(id, data_uri);
        self.append(element)
    }

    /// Append a pre-built element, minting a fresh id for it.
    pub fn add_custom(&mut self, mut element: Element) -> EventOutcome {
        element.id = self.ids.mint(element.element_type());
        self.append(element)
    }

    fn append(&mut self, element: Element) -> EventOutcome {
        let id = element.id;
        self.scene.append(element);
        log::debug!("added {id:?} ({} elements)", self.scene.len());
        self.after_mutation(EventOutcome::Added(id))
    }

    /// Attach the panel's current animation to the selected element.
    pub fn request_animation(&mut self) -> EventOutcome {
        let Some(id) = self.selection else {
            log::debug!("animation requested with no selection");
            return EventOutcome::Ignored(IgnoreReason::NoSelection);
        };
        let request = self.controls.animation_request();
        let outcome = match attach_animation(&mut self.scene, &mut self.animations, id, &request)
        {
            UpdateOutcome::Updated(el) => EventOutcome::Animated {
                id,
                class_name: el.animation_class.clone().unwrap_or_default(),
            },
            UpdateOutcome::NotFound => EventOutcome::Ignored(IgnoreReason::UnknownElement(id)),
        };
        self.after_mutation(outcome)
    }

    fn after_mutation(&mut self, outcome: EventOutcome) -> EventOutcome {
        if !outcome.is_ignored() {
            self.notify();
        }
        outcome
    }

    // ─── Export ──────────────────────────────────────────────────────────

    /// Render the current scene and animation rules as a document.
    pub fn export(&self) -> String {
        export_document(&self.scene, self.animations.stylesheet(), &self.export_config)
    }

    /// Render and deliver under the configured file name.
    pub fn export_to(&self, sink: &mut dyn DeliverySink) -> ExportResult<()> {
        export_to_sink(
            &self.scene,
            self.animations.stylesheet(),
            &self.export_config,
            sink,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Clone, Default)]
    struct Recorder(Rc<RefCell<Vec<(usize, Option<ElementId>)>>>);

    impl SceneObserver for Recorder {
        fn scene_changed(&mut self, elements: &[Element], selection: Option<ElementId>) {
            self.0.borrow_mut().push((elements.len(), selection));
        }
    }

    #[test]
    fn add_mints_prefixed_ids() {
        let mut s = Session::new();
        assert_eq!(
            s.add_element(ElementType::Rect),
            EventOutcome::Added(ElementId::intern("rect0"))
        );
        assert_eq!(
            s.add_element(ElementType::Circle),
            EventOutcome::Added(ElementId::intern("circle1"))
        );
        assert_eq!(
            s.image_ready("data:image/png;base64,AAAA"),
            EventOutcome::Added(ElementId::intern("image2"))
        );
        assert_eq!(s.scene().len(), 3);
    }

    #[test]
    fn add_image_without_data_is_ignored() {
        let mut s = Session::new();
        assert_eq!(
            s.add_element(ElementType::Image),
            EventOutcome::Ignored(IgnoreReason::NeedsImageData)
        );
        assert!(s.scene().is_empty());
    }

    #[test]
    fn select_unknown_clears_selection() {
        let mut s = Session::new();
        s.add_element(ElementType::Rect);
        s.select(Some(ElementId::intern("rect0")));
        assert_eq!(s.selection(), Some(ElementId::intern("rect0")));
        assert_eq!(
            s.select(Some(ElementId::intern("nothing_here"))),
            EventOutcome::Selected(None)
        );
        assert_eq!(s.selection(), None);
    }

    #[test]
    fn animate_without_selection_is_noop() {
        let mut s = Session::new();
        s.add_element(ElementType::Rect);
        let before = s.scene().all().to_vec();
        assert_eq!(
            s.request_animation(),
            EventOutcome::Ignored(IgnoreReason::NoSelection)
        );
        assert_eq!(s.scene().all(), before.as_slice());
        assert_eq!(s.animations().stylesheet(), "");
    }

    #[test]
    fn add_custom_replaces_id() {
        let mut s = Session::new();
        let el = Element::circle(ElementId::intern("whatever"), 1.0, 2.0, 3.0, "#abc");
        assert_eq!(
            s.add_custom(el),
            EventOutcome::Added(ElementId::intern("circle0"))
        );
        assert!(s.scene().get(ElementId::intern("circle0")).is_some());
    }

    #[test]
    fn observers_see_every_change() {
        let recorder = Recorder::default();
        let log = recorder.0.clone();
        let mut s = Session::new();
        s.add_observer(Box::new(recorder));

        s.add_element(ElementType::Rect);
        s.select(Some(ElementId::intern("rect0")));
        s.drag_end(ElementId::intern("rect0"), 5.0, 5.0);
        // Ignored events don't re-render
        s.drag_end(ElementId::intern("ghost"), 5.0, 5.0);

        let rect0 = ElementId::intern("rect0");
        assert_eq!(
            *log.borrow(),
            vec![(1, None), (1, Some(rect0)), (1, Some(rect0))]
        );
    }
}

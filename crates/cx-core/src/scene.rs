//! Scene store: the ordered collection of placed elements.
//!
//! Insertion order is paint order: later elements sit on top on screen and
//! come later in exported markup. The store is mutated through exactly two
//! operations, `append` and `update`; there is no removal.

use crate::id::ElementId;
use crate::model::{Attr, Element};
use std::collections::HashMap;

/// Result of a keyed update.
///
/// `NotFound` is not an error: a stale id coming from the interactive layer
/// simply produces no change.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UpdateOutcome<'a> {
    Updated(&'a Element),
    NotFound,
}

impl<'a> UpdateOutcome<'a> {
    pub fn element(&self) -> Option<&'a Element> {
        match *self {
            UpdateOutcome::Updated(el) => Some(el),
            UpdateOutcome::NotFound => None,
        }
    }
}

/// The single source of truth for placed elements.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    elements: Vec<Element>,

    /// Index from ElementId → position in `elements`.
    id_index: HashMap<ElementId, usize>,
}

impl Scene {
    /// Create an empty scene.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an element on top of everything else.
    ///
    /// The caller mints the id and guarantees it is unique in this scene.
    pub fn append(&mut self, element: Element) {
        let id = element.id;
        debug_assert!(
            !self.id_index.contains_key(&id),
            "duplicate element id {id:?}"
        );
        if self.id_index.contains_key(&id) {
            log::warn!("appending duplicate element id {id:?}");
        }
        self.id_index.insert(id, self.elements.len());
        self.elements.push(element);
    }

    /// Merge `patch` into the element matching `id`.
    ///
    /// Every attribute named in the patch is overwritten; every other
    /// attribute and every other element stays as it was.
    pub fn update(&mut self, id: ElementId, patch: &[Attr]) -> UpdateOutcome<'_> {
        let Some(&pos) = self.id_index.get(&id) else {
            log::debug!("update on unknown element {id:?} ignored");
            return UpdateOutcome::NotFound;
        };
        let element = &mut self.elements[pos];
        let applied = element.apply_patch(patch);
        log::trace!("updated {id:?}: {applied}/{} attrs", patch.len());
        UpdateOutcome::Updated(element)
    }

    /// Look up an element by id.
    pub fn get(&self, id: ElementId) -> Option<&Element> {
        self.id_index.get(&id).map(|&pos| &self.elements[pos])
    }

    pub fn contains(&self, id: ElementId) -> bool {
        self.id_index.contains_key(&id)
    }

    /// All elements in paint order.
    pub fn all(&self) -> &[Element] {
        &self.elements
    }

    pub fn iter(&self) -> impl Iterator<Item = &Element> {
        self.elements.iter()
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

use lasso::{Spur, ThreadedRodeo};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::sync::LazyLock;

use crate::model::ElementType;

/// Global string interner for element IDs — fast comparisons, low memory.
static INTERNER: LazyLock<ThreadedRodeo> = LazyLock::new(ThreadedRodeo::default);

/// A lightweight, interned identifier for elements in a scene.
/// Internally a `Spur` index — 4 bytes, Copy, Eq, Hash in O(1).
///
/// The id is the join key between selection, transforms, animations and
/// export, so it must stay stable for the element's whole lifetime.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ElementId(Spur);

impl ElementId {
    /// Intern a string as an ElementId, or return existing if already interned.
    pub fn intern(s: &str) -> Self {
        ElementId(INTERNER.get_or_intern(s))
    }

    /// Resolve back to a string slice.
    pub fn as_str(&self) -> &str {
        INTERNER.resolve(&self.0)
    }
}

impl fmt::Debug for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "@{}", self.as_str())
    }
}

/// Bare id, so it can be spliced into CSS class and keyframe names.
impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ElementId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ElementId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(ElementId::intern(&s))
    }
}

// ─── Minting ─────────────────────────────────────────────────────────────

/// Per-session id source: one monotonically increasing counter shared by
/// every element type, combined with the type's prefix (`rect0`, `circle1`).
#[derive(Debug, Clone, Default)]
pub struct IdMinter {
    next: u64,
}

impl IdMinter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mint a fresh id for an element of the given type.
    pub fn mint(&mut self, element_type: ElementType) -> ElementId {
        self.mint_with_prefix(element_type.prefix())
    }

    /// Mint a fresh id with an arbitrary prefix.
    pub fn mint_with_prefix(&mut self, prefix: &str) -> ElementId {
        let n = self.next;
        self.next += 1;
        ElementId::intern(&format!("{prefix}{n}"))
    }

    /// The counter value the next mint will use.
    pub fn peek(&self) -> u64 {
        self.next
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn interning_roundtrip() {
        let a = ElementId::intern("rect0");
        let b = ElementId::intern("rect0");
        assert_eq!(a, b);
        assert_eq!(a.as_str(), "rect0");
    }

    #[test]
    fn display_is_bare_debug_is_tagged() {
        let id = ElementId::intern("circle3");
        assert_eq!(id.to_string(), "circle3");
        assert_eq!(format!("{id:?}"), "@circle3");
    }

    #[test]
    fn counter_is_shared_across_types() {
        let mut ids = IdMinter::new();
        assert_eq!(ids.mint(ElementType::Rect).as_str(), "rect0");
        assert_eq!(ids.mint(ElementType::Circle).as_str(), "circle1");
        assert_eq!(ids.mint(ElementType::Text).as_str(), "text2");
        assert_eq!(ids.mint(ElementType::Image).as_str(), "image3");
        assert_eq!(ids.peek(), 4);
    }

    #[test]
    fn minted_ids_are_pairwise_distinct() {
        let mut ids = IdMinter::new();
        let kinds = [
            ElementType::Rect,
            ElementType::Circle,
            ElementType::Text,
            ElementType::Image,
        ];
        let mut seen = HashSet::new();
        for i in 0..200 {
            let id = ids.mint(kinds[i % kinds.len()]);
            assert!(seen.insert(id), "duplicate id {id:?}");
        }
    }

    #[test]
    fn serde_uses_plain_string() {
        let id = ElementId::intern("text7");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"text7\"");
        let back: ElementId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }
}

use std::collections::HashSet;

use log::{debug, info};

use crate::element::{Element, ElementId, NewElement};

/// Owns the ordered collection of placed elements.
///
/// Insertion order is stacking order: the last element renders on top.
#[derive(Debug, Default)]
pub struct ElementStore {
    elements: Vec<Element>,
    /// Every id ever handed out, so ids are never reused after a delete.
    /// Grows by one entry per added element for the lifetime of the board;
    /// retired ids are never pruned.
    issued: HashSet<ElementId>,
}

impl ElementStore {
    /// An empty board.
    pub fn new() -> Self {
        Self::default()
    }

    /// Assigns a fresh id and appends the element on top of the stack.
    pub fn add(&mut self, new: NewElement) -> ElementId {
        let id = self.fresh_id();
        let element = Element::from_new(id, new);
        info!("Added {} element {}", element.kind(), id);
        self.elements.push(element);
        id
    }

    fn fresh_id(&mut self) -> ElementId {
        loop {
            let id = ElementId::new_random();
            if self.issued.insert(id) {
                return id;
            }
        }
    }

    /// Replaces the element with the same id. Returns `false` and leaves the
    /// collection untouched when no element matches.
    pub fn update(&mut self, element: Element) -> bool {
        match self.elements.iter_mut().find(|e| e.id() == element.id()) {
            Some(slot) => {
                *slot = element;
                true
            }
            None => {
                debug!("Ignoring update for unknown element {}", element.id());
                false
            }
        }
    }

    /// Removes the element with `id`, keeping the order of the rest.
    /// Returns `false` when no element matches.
    pub fn delete(&mut self, id: ElementId) -> bool {
        let before = self.elements.len();
        self.elements.retain(|e| e.id() != id);
        let removed = self.elements.len() != before;
        if removed {
            info!("Deleted element {}", id);
        } else {
            debug!("Ignoring delete for unknown element {}", id);
        }
        removed
    }

    /// All elements, bottom to top.
    pub fn list(&self) -> &[Element] {
        &self.elements
    }

    /// Looks up a live element.
    pub fn get(&self, id: ElementId) -> Option<&Element> {
        self.elements.iter().find(|e| e.id() == id)
    }

    /// Number of live elements.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Pretty JSON of the current elements, for the debug window.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&self.elements)
    }
}

use crate::element::{Element, ElementId, NewElement};
use crate::store::ElementStore;

/// A mutation of the board. The palette, uploads and the board surface
/// produce these; the app applies them to the store once per frame.
#[derive(Debug, Clone, PartialEq)]
pub enum BoardCommand {
    /// Place a new element on top of the board
    Add(NewElement),
    /// Replace an element with a new value carrying the same id
    Update(Element),
    /// Remove an element, no confirmation
    Delete(ElementId),
}

impl BoardCommand {
    pub fn name(&self) -> &'static str {
        match self {
            BoardCommand::Add(_) => "Add Element",
            BoardCommand::Update(_) => "Update Element",
            BoardCommand::Delete(_) => "Delete Element",
        }
    }

    /// Applies the command. Returns whether the store changed.
    pub fn execute(self, store: &mut ElementStore) -> bool {
        match self {
            BoardCommand::Add(new) => {
                store.add(new);
                true
            }
            BoardCommand::Update(element) => store.update(element),
            BoardCommand::Delete(id) => store.delete(id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::{Position, factory};

    #[test]
    fn commands_route_to_store_operations() {
        let mut store = ElementStore::new();
        assert!(BoardCommand::Add(factory::create_emoji("💡").unwrap()).execute(&mut store));
        let element = store.list()[0].clone();

        let moved = element.clone().with_position(Position::new(5.0, 6.0));
        assert!(BoardCommand::Update(moved).execute(&mut store));
        assert_eq!(store.list()[0].position(), Position::new(5.0, 6.0));

        assert!(BoardCommand::Delete(element.id()).execute(&mut store));
        assert!(!BoardCommand::Delete(element.id()).execute(&mut store));
        assert!(store.is_empty());
    }
}

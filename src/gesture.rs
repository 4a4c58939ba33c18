//! Pointer gestures on board elements.
//!
//! ```text
//!                 begin_drag   ┌──────────┐  release: commit position
//!             ┌───────────────►│ Dragging │─────────────────┐
//!   ┌──────┐  │                └──────────┘                 ▼
//!   │ Idle │──┤                                         ┌──────┐
//!   └──────┘  │                ┌──────────┐             │ Idle │
//!             └───────────────►│ Resizing │────────────►└──────┘
//!               begin_resize   └──────────┘  release: commit size if moved
//!                          every move: commit size
//! ```
//!
//! Entering a gesture is only possible from `Idle`, so a press on the resize
//! handle can never also start a drag. Leaving always goes back to `Idle`
//! through [`GestureController::release`] or [`GestureController::cancel`].

use egui::{Pos2, Vec2};
use log::debug;

use crate::command::BoardCommand;
use crate::element::{Element, ElementId, Position, Size};
use crate::store::ElementStore;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum GestureState {
    #[default]
    Idle,
    Dragging {
        element_id: ElementId,
        start_pointer: Pos2,
        start_position: Position,
        current_pointer: Pos2,
    },
    Resizing {
        element_id: ElementId,
        start_pointer: Pos2,
        start_size: Size,
        start_position: Position,
        /// Pointer of the last committed size.
        last_pointer: Pos2,
    },
}

impl GestureState {
    pub fn name(&self) -> &'static str {
        match self {
            GestureState::Idle => "Idle",
            GestureState::Dragging { .. } => "Dragging",
            GestureState::Resizing { .. } => "Resizing",
        }
    }

    pub fn element_id(&self) -> Option<ElementId> {
        match self {
            GestureState::Idle => None,
            GestureState::Dragging { element_id, .. } | GestureState::Resizing { element_id, .. } => {
                Some(*element_id)
            }
        }
    }
}

/// New size for a bottom-right resize; each axis is floored at the minimum.
pub fn resize_from_bottom_right(start_size: Size, delta: Vec2) -> Size {
    Size::new(start_size.width + delta.x, start_size.height + delta.y).clamped()
}

/// A bottom-right resize keeps the top-left corner where it started.
fn resized(element: &Element, size: Size, start_position: Position) -> BoardCommand {
    BoardCommand::Update(element.clone().with_size(size).with_position(start_position))
}

#[derive(Debug, Default)]
pub struct GestureController {
    state: GestureState,
}

impl GestureController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &GestureState {
        &self.state
    }

    pub fn is_active(&self) -> bool {
        !matches!(self.state, GestureState::Idle)
    }

    fn transition(&mut self, next: GestureState) {
        debug!(
            "Gesture {} -> {} ({:?})",
            self.state.name(),
            next.name(),
            next.element_id().or(self.state.element_id())
        );
        self.state = next;
    }

    /// Starts moving `element`. Ignored unless idle.
    pub fn begin_drag(&mut self, element: &Element, pointer: Pos2) -> bool {
        if self.is_active() {
            return false;
        }
        self.transition(GestureState::Dragging {
            element_id: element.id(),
            start_pointer: pointer,
            start_position: element.position(),
            current_pointer: pointer,
        });
        true
    }

    /// Starts resizing `element` from its bottom-right corner. Ignored unless idle.
    pub fn begin_resize(&mut self, element: &Element, pointer: Pos2) -> bool {
        if self.is_active() {
            return false;
        }
        self.transition(GestureState::Resizing {
            element_id: element.id(),
            start_pointer: pointer,
            start_size: element.size(),
            start_position: element.position(),
            last_pointer: pointer,
        });
        true
    }

    /// Tracks the pointer. Drags only update the preview; resizes commit the
    /// new size whenever the pointer differs from the last committed one, so
    /// this may be called every frame.
    pub fn pointer_moved(&mut self, pointer: Pos2, store: &ElementStore) -> Option<BoardCommand> {
        match self.state {
            GestureState::Idle => None,
            GestureState::Dragging { .. } => {
                if let GestureState::Dragging {
                    current_pointer, ..
                } = &mut self.state
                {
                    *current_pointer = pointer;
                }
                None
            }
            GestureState::Resizing { last_pointer, .. } if last_pointer == pointer => None,
            GestureState::Resizing {
                element_id,
                start_pointer,
                start_size,
                start_position,
                ..
            } => {
                let Some(element) = store.get(element_id) else {
                    self.cancel();
                    return None;
                };
                if let GestureState::Resizing { last_pointer, .. } = &mut self.state {
                    *last_pointer = pointer;
                }
                let size = resize_from_bottom_right(start_size, pointer - start_pointer);
                Some(resized(element, size, start_position))
            }
        }
    }

    /// Ends the current gesture. A drag commits its final position here; a
    /// resize only commits if the release point was never reported as a move.
    pub fn release(&mut self, pointer: Pos2, store: &ElementStore) -> Option<BoardCommand> {
        let finished = std::mem::take(&mut self.state);
        debug!("Gesture {} -> Idle (released)", finished.name());
        match finished {
            GestureState::Dragging {
                element_id,
                start_pointer,
                start_position,
                ..
            } => {
                let element = store.get(element_id)?;
                let position = start_position.offset(pointer - start_pointer);
                Some(BoardCommand::Update(element.clone().with_position(position)))
            }
            GestureState::Resizing {
                element_id,
                start_pointer,
                start_size,
                start_position,
                last_pointer,
            } if last_pointer != pointer => {
                let element = store.get(element_id)?;
                let size = resize_from_bottom_right(start_size, pointer - start_pointer);
                Some(resized(element, size, start_position))
            }
            GestureState::Resizing { .. } | GestureState::Idle => None,
        }
    }

    /// Abandons the current gesture without committing anything.
    pub fn cancel(&mut self) {
        if self.is_active() {
            self.transition(GestureState::Idle);
        }
    }

    /// Offset to draw `id` at while it is being dragged.
    pub fn drag_preview(&self, id: ElementId) -> Option<Vec2> {
        match self.state {
            GestureState::Dragging {
                element_id,
                start_pointer,
                current_pointer,
                ..
            } if element_id == id => Some(current_pointer - start_pointer),
            _ => None,
        }
    }
}

use egui::{Color32, CursorIcon, Id, Painter, Pos2, Rect, Response, Sense, Stroke, Ui, Vec2};

use crate::element::ElementId;

/// Square grab area tucked into the bottom-right corner of an element.
pub struct ResizeHandle {
    element_id: ElementId,
    corner: Pos2,
    size: f32,
}

impl ResizeHandle {
    /// `corner` is the element's bottom-right corner in screen space.
    pub fn new(element_id: ElementId, corner: Pos2, size: f32) -> Self {
        Self {
            element_id,
            corner,
            size,
        }
    }

    pub fn id(&self) -> Id {
        Id::new(("resize_handle", self.element_id))
    }

    pub fn rect(&self) -> Rect {
        Rect::from_min_max(self.corner - Vec2::splat(self.size), self.corner)
    }

    /// Registers the handle for dragging and paints the dot when `visible`.
    /// The handle stays interactive while hidden.
    pub fn show(&self, ui: &Ui, painter: &Painter, visible: bool) -> Response {
        let rect = self.rect();
        let response = ui
            .interact(rect, self.id(), Sense::drag())
            .on_hover_cursor(CursorIcon::ResizeNwSe);

        if visible || response.dragged() {
            let radius = self.size / 4.0;
            let fill = ui.visuals().selection.bg_fill;
            painter.circle_filled(rect.center(), radius, fill);
            painter.circle_stroke(rect.center(), radius, Stroke::new(1.0, Color32::WHITE));
        }

        response
    }
}

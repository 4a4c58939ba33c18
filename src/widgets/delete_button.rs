use egui::{Align2, Color32, CursorIcon, FontId, Id, Painter, Pos2, Rect, Response, Sense, Ui, Vec2};

use crate::element::ElementId;

/// Round "×" button hanging off an element's top-right corner.
pub struct DeleteButton {
    element_id: ElementId,
    center: Pos2,
    size: f32,
}

impl DeleteButton {
    /// Centers the button just inside `corner`, overlapping the box edge.
    pub fn at_corner(element_id: ElementId, corner: Pos2, size: f32) -> Self {
        let inset = size / 2.0 - 8.0;
        Self {
            element_id,
            center: corner + Vec2::new(-inset, inset),
            size,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::from_center_size(self.center, Vec2::splat(self.size))
    }

    pub fn show(&self, ui: &Ui, painter: &Painter) -> Response {
        let rect = self.rect();
        let id = Id::new(("delete_button", self.element_id));
        // Sensing drags too keeps a press on the button from dragging the
        // element underneath.
        let response = ui
            .interact(rect, id, Sense::click_and_drag())
            .on_hover_cursor(CursorIcon::PointingHand);

        let fill = if response.hovered() {
            ui.visuals().error_fg_color
        } else {
            ui.visuals().error_fg_color.gamma_multiply(0.85)
        };
        painter.circle_filled(rect.center(), self.size / 2.0, fill);
        painter.text(
            rect.center(),
            Align2::CENTER_CENTER,
            "×",
            FontId::proportional(self.size * 0.7),
            Color32::WHITE,
        );

        response
    }
}

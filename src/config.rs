/// Tunables for the board and its panels.
#[derive(Debug, Clone, PartialEq)]
pub struct BoardConfig {
    /// Board width divided by height.
    pub aspect_ratio: f32,
    /// Side of the square bottom-right resize handle.
    pub handle_size: f32,
    /// Diameter of the per-element delete button.
    pub delete_button_size: f32,
    pub board_rounding: f32,
    pub palette_width: f32,
    /// File name offered when exporting the board.
    pub export_file_name: String,
    /// Number of decoded image textures kept around.
    pub texture_cache_size: usize,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            aspect_ratio: 4.0 / 3.0,
            handle_size: 16.0,
            delete_button_size: 24.0,
            board_rounding: 8.0,
            palette_width: 320.0,
            export_file_name: "moodboard.png".to_owned(),
            texture_cache_size: 64,
        }
    }
}

impl BoardConfig {
    /// Largest board size with the configured aspect ratio that fits `available`.
    pub fn board_size(&self, available: egui::Vec2) -> egui::Vec2 {
        let width = available.x.max(0.0);
        let height = width / self.aspect_ratio;
        if height <= available.y || available.y <= 0.0 {
            egui::vec2(width, height)
        } else {
            egui::vec2(available.y * self.aspect_ratio, available.y)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn board_fills_width_when_tall_enough() {
        let config = BoardConfig::default();
        let size = config.board_size(egui::vec2(800.0, 1000.0));
        assert_eq!(size.x, 800.0);
        assert!((size.y - 600.0).abs() < 0.01);
    }

    #[test]
    fn board_shrinks_to_fit_height() {
        let config = BoardConfig::default();
        let size = config.board_size(egui::vec2(800.0, 300.0));
        assert!((size.x - 400.0).abs() < 0.01);
        assert_eq!(size.y, 300.0);
    }
}

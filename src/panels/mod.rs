mod board;
mod palette;

pub use board::BoardSurface;
pub use palette::{PalettePanel, PaletteTab};

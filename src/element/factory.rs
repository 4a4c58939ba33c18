//! Constructors for the palette. Each returns `None` when the required
//! content is missing, in which case nothing is added to the board.

use std::ops::RangeInclusive;

use super::{ElementContent, NewElement, Position, Size, TextStyle};

/// Glyphs offered in the emoji tab.
pub const EMOJIS: [&str; 10] = ["😊", "😎", "🎨", "💡", "✨", "🌈", "🎭", "💫", "🌟", "🎪"];

/// Swatches offered in the colors tab.
pub const COLORS: [&str; 8] = [
    "#FF6B6B", "#4ECDC4", "#45B7D1", "#96CEB4", "#FFEEAD", "#D4A5A5", "#9B5DE5", "#F15BB5",
];

/// Where every new element lands.
pub const DEFAULT_POSITION: Position = Position::new(100.0, 100.0);

pub const IMAGE_SIZE: Size = Size::new(200.0, 200.0);
pub const EMOJI_SIZE: Size = Size::new(50.0, 50.0);
pub const TEXT_SIZE: Size = Size::new(200.0, 50.0);
pub const COLOR_SIZE: Size = Size::new(100.0, 100.0);

pub const FONT_SIZE_RANGE: RangeInclusive<f32> = 12.0..=48.0;
pub const DEFAULT_FONT_SIZE: f32 = 16.0;
pub const DEFAULT_TEXT_COLOR: &str = "#000000";

fn required(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

/// Image from a URL, local path or `data:` URL.
pub fn create_image(source: &str) -> Option<NewElement> {
    let source = required(source)?;
    Some(NewElement::new(
        ElementContent::Image {
            source: source.to_owned(),
        },
        DEFAULT_POSITION,
        IMAGE_SIZE,
    ))
}

/// Emoji glyph, sized for a single character.
pub fn create_emoji(glyph: &str) -> Option<NewElement> {
    let glyph = required(glyph)?;
    Some(NewElement::new(
        ElementContent::Emoji {
            glyph: glyph.to_owned(),
        },
        DEFAULT_POSITION,
        EMOJI_SIZE,
    ))
}

/// Text keeps its inner whitespace; only blank input is rejected.
pub fn create_text(text: &str, font_size: f32, color: &str) -> Option<NewElement> {
    required(text)?;
    let font_size = font_size.round().clamp(*FONT_SIZE_RANGE.start(), *FONT_SIZE_RANGE.end());
    let color = required(color).unwrap_or(DEFAULT_TEXT_COLOR);
    Some(NewElement::new(
        ElementContent::Text {
            text: text.to_owned(),
            style: TextStyle {
                font_size,
                color: color.to_owned(),
                font_family: None,
            },
        },
        DEFAULT_POSITION,
        TEXT_SIZE,
    ))
}

/// Swatch filled with a hex color such as `#FF6B6B`.
pub fn create_color(value: &str) -> Option<NewElement> {
    let value = required(value)?;
    Some(NewElement::new(
        ElementContent::Color {
            value: value.to_owned(),
        },
        DEFAULT_POSITION,
        COLOR_SIZE,
    ))
}

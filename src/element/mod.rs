use std::fmt;

use egui::{Color32, Rect};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

mod common;
pub mod factory;

pub use common::{MIN_ELEMENT_SIZE, Position, Size};

/// Stable identifier of a placed element. Issued by the store, never by callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementId(Uuid);

impl ElementId {
    pub(crate) fn new_random() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// The four kinds of things that can sit on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
    Image,
    Emoji,
    Text,
    Color,
}

impl ElementKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ElementKind::Image => "image",
            ElementKind::Emoji => "emoji",
            ElementKind::Text => "text",
            ElementKind::Color => "color",
        }
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Typography for text elements.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextStyle {
    pub font_size: f32,
    /// Hex color, e.g. `#000000`.
    pub color: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            font_size: factory::DEFAULT_FONT_SIZE,
            color: factory::DEFAULT_TEXT_COLOR.to_owned(),
            font_family: None,
        }
    }
}

/// What an element shows. Each kind carries only the fields it needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ElementContent {
    /// Remote URL, local path or `data:` URL.
    Image { source: String },
    Emoji { glyph: String },
    Text { text: String, style: TextStyle },
    /// Hex color filling the whole box.
    Color { value: String },
}

impl ElementContent {
    pub fn kind(&self) -> ElementKind {
        match self {
            ElementContent::Image { .. } => ElementKind::Image,
            ElementContent::Emoji { .. } => ElementKind::Emoji,
            ElementContent::Text { .. } => ElementKind::Text,
            ElementContent::Color { .. } => ElementKind::Color,
        }
    }

    /// The kind-specific payload string.
    pub fn as_str(&self) -> &str {
        match self {
            ElementContent::Image { source } => source,
            ElementContent::Emoji { glyph } => glyph,
            ElementContent::Text { text, .. } => text,
            ElementContent::Color { value } => value,
        }
    }

    pub fn text_style(&self) -> Option<&TextStyle> {
        match self {
            ElementContent::Text { style, .. } => Some(style),
            _ => None,
        }
    }
}

/// Free-form box attributes. Only the renderer reads these.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BoxStyle {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f32>,
}

impl BoxStyle {
    pub fn is_empty(&self) -> bool {
        self.background_color.is_none() && self.opacity.is_none()
    }
}

/// An element that has not been given an id yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewElement {
    pub content: ElementContent,
    pub position: Position,
    pub size: Size,
    #[serde(default, skip_serializing_if = "BoxStyle::is_empty")]
    pub style: BoxStyle,
}

impl NewElement {
    pub fn new(content: ElementContent, position: Position, size: Size) -> Self {
        Self {
            content,
            position,
            size,
            style: BoxStyle::default(),
        }
    }

    pub fn with_style(mut self, style: BoxStyle) -> Self {
        self.style = style;
        self
    }

    pub fn kind(&self) -> ElementKind {
        self.content.kind()
    }
}

/// A placed element. Changes produce a new value carrying the same id.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Element {
    id: ElementId,
    content: ElementContent,
    position: Position,
    size: Size,
    #[serde(skip_serializing_if = "BoxStyle::is_empty")]
    style: BoxStyle,
}

impl Element {
    pub(crate) fn from_new(id: ElementId, new: NewElement) -> Self {
        Self {
            id,
            content: new.content,
            position: new.position,
            size: new.size.clamped(),
            style: new.style,
        }
    }

    pub fn id(&self) -> ElementId {
        self.id
    }

    pub fn kind(&self) -> ElementKind {
        self.content.kind()
    }

    pub fn element_type(&self) -> &'static str {
        self.kind().as_str()
    }

    pub fn content(&self) -> &ElementContent {
        &self.content
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn style(&self) -> &BoxStyle {
        &self.style
    }

    /// Board-local bounding rectangle.
    pub fn rect(&self) -> Rect {
        common::box_rect(self.position, self.size)
    }

    pub fn with_position(mut self, position: Position) -> Self {
        self.position = position;
        self
    }

    /// Replaces the size, flooring each axis at [`MIN_ELEMENT_SIZE`].
    pub fn with_size(mut self, size: Size) -> Self {
        self.size = size.clamped();
        self
    }

    /// Replaces the content. The kind may not change, so a mismatching
    /// content is handed back as the error.
    pub fn with_content(mut self, content: ElementContent) -> Result<Self, ElementContent> {
        if content.kind() != self.kind() {
            return Err(content);
        }
        self.content = content;
        Ok(self)
    }

    pub fn with_style(mut self, style: BoxStyle) -> Self {
        self.style = style;
        self
    }
}

/// Parses `#RGB`, `#RRGGBB` or `#RRGGBBAA` colors.
pub fn parse_color(value: &str) -> Option<Color32> {
    Color32::from_hex(value.trim()).ok()
}

/// Formats an opaque `#RRGGBB` string.
pub fn color_to_hex(color: Color32) -> String {
    format!("#{:02X}{:02X}{:02X}", color.r(), color.g(), color.b())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Element {
        let new = factory::create_color("#FF6B6B").unwrap();
        Element::from_new(ElementId::new_random(), new)
    }

    #[test]
    fn with_size_never_goes_below_minimum() {
        let element = sample().with_size(Size::new(-400.0, 12.0));
        assert_eq!(element.size(), Size::new(MIN_ELEMENT_SIZE, MIN_ELEMENT_SIZE));
    }

    #[test]
    fn with_content_keeps_kind_fixed() {
        let element = sample();
        let id = element.id();

        let recolored = element
            .clone()
            .with_content(ElementContent::Color { value: "#000000".into() })
            .unwrap();
        assert_eq!(recolored.id(), id);
        assert_eq!(recolored.content().as_str(), "#000000");

        let rejected = element.with_content(ElementContent::Emoji { glyph: "✨".into() });
        assert!(rejected.is_err());
    }

    #[test]
    fn rect_is_anchored_top_left() {
        let element = sample().with_position(Position::new(10.0, 20.0));
        let rect = element.rect();
        assert_eq!(rect.min, egui::pos2(10.0, 20.0));
        assert_eq!(rect.size(), egui::vec2(100.0, 100.0));
    }

    #[test]
    fn colors_parse_and_format() {
        let color = parse_color("#45B7D1").unwrap();
        assert_eq!(color, Color32::from_rgb(0x45, 0xB7, 0xD1));
        assert_eq!(color_to_hex(color), "#45B7D1");
        assert!(parse_color("not a color").is_none());
    }

    #[test]
    fn content_serializes_with_kind_tag() {
        let content = ElementContent::Emoji { glyph: "🌈".into() };
        let json = serde_json::to_value(&content).unwrap();
        assert_eq!(json["type"], "emoji");
        assert_eq!(json["glyph"], "🌈");
    }
}

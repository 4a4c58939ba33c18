use moodboard::element::{ElementContent, ElementKind, MIN_ELEMENT_SIZE, Position, Size, factory};
use moodboard::{ElementStore, file_handler::UploadedImage};

#[test]
fn test_palette_defaults_per_kind() {
    let image = factory::create_image("a.png").unwrap();
    assert_eq!(image.kind(), ElementKind::Image);
    assert_eq!(image.size, Size::new(200.0, 200.0));

    let emoji = factory::create_emoji("🎨").unwrap();
    assert_eq!(emoji.size, Size::new(50.0, 50.0));

    let text = factory::create_text("hi", 16.0, "#000000").unwrap();
    assert_eq!(text.size, Size::new(200.0, 50.0));

    let color = factory::create_color("#FF6B6B").unwrap();
    assert_eq!(color.size, Size::new(100.0, 100.0));

    // Everything lands at the same spot
    for new in [&image, &emoji, &text, &color] {
        assert_eq!(new.position, Position::new(100.0, 100.0));
    }
}

#[test]
fn test_blank_content_is_rejected() {
    assert!(factory::create_image("").is_none());
    assert!(factory::create_image("   ").is_none());
    assert!(factory::create_text("\n\t", 16.0, "#000000").is_none());
    assert!(factory::create_emoji("").is_none());
    assert!(factory::create_color(" ").is_none());
}

#[test]
fn test_text_style_is_carried() {
    let text = factory::create_text("  hello  world ", 99.0, "#123456").unwrap();
    match &text.content {
        ElementContent::Text { text, style } => {
            assert_eq!(text, "  hello  world ");
            // Font size is limited to the slider range
            assert_eq!(style.font_size, 48.0);
            assert_eq!(style.color, "#123456");
        }
        other => panic!("expected text content, got {other:?}"),
    }

    // An empty color falls back to black
    let text = factory::create_text("hi", 16.0, "").unwrap();
    assert_eq!(text.content.text_style().unwrap().color, "#000000");
}

#[test]
fn test_every_palette_entry_creates_an_element() {
    let mut store = ElementStore::new();
    for glyph in factory::EMOJIS {
        store.add(factory::create_emoji(glyph).unwrap());
    }
    for value in factory::COLORS {
        store.add(factory::create_color(value).unwrap());
    }
    assert_eq!(store.len(), factory::EMOJIS.len() + factory::COLORS.len());
    assert!(store.list().iter().all(|e| e.size().width >= MIN_ELEMENT_SIZE));
}

#[test]
fn test_uploaded_image_becomes_data_url_element() {
    let upload = UploadedImage::from_bytes("photo.png", b"\x89PNG\r\n\x1a\nrest");
    assert!(upload.data_url.starts_with("data:image/png;base64,"));

    let new = upload.into_element().unwrap();
    assert_eq!(new.kind(), ElementKind::Image);
    assert!(new.content.as_str().starts_with("data:image/png"));
    assert_eq!(new.size, Size::new(200.0, 200.0));
}

#[test]
fn test_text_font_size_is_whole_points() {
    let text = factory::create_text("hi", 17.4, "#000000").unwrap();
    match &text.content {
        ElementContent::Text { style, .. } => assert_eq!(style.font_size, 17.0),
        other => panic!("expected text content, got {other:?}"),
    }
}

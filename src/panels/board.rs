use egui::load::{SizedTexture, TexturePoll};
use egui::{
    Align2, Color32, CursorIcon, FontFamily, FontId, Id, Painter, Rect, Sense, SizeHint, Stroke,
    TextureOptions, Ui,
};

use crate::command::BoardCommand;
use crate::config::BoardConfig;
use crate::element::{parse_color, Element, ElementContent, ElementId, TextStyle};
use crate::gesture::{GestureController, GestureState};
use crate::image_source::{cover_uv, ImageSource};
use crate::store::ElementStore;
use crate::texture_manager::TextureManager;
use crate::widgets::{DeleteButton, ResizeHandle};

const ELEMENT_ROUNDING: f32 = 4.0;
const TEXT_PADDING: f32 = 4.0;
/// Glyph color on the white board.
const INK: Color32 = Color32::from_gray(40);

/// The 4:3 surface elements are arranged on.
pub struct BoardSurface {
    gestures: GestureController,
    textures: TextureManager,
    config: BoardConfig,
    /// Screen rectangle of the board in the last frame it was shown.
    mounted: Option<Rect>,
}

impl BoardSurface {
    pub fn new(config: &BoardConfig) -> Self {
        Self {
            gestures: GestureController::new(),
            textures: TextureManager::new(config.texture_cache_size),
            config: config.clone(),
            mounted: None,
        }
    }

    /// `None` until the board has been laid out once.
    pub fn mounted_rect(&self) -> Option<Rect> {
        self.mounted
    }

    pub fn gestures(&self) -> &GestureController {
        &self.gestures
    }

    /// Draws every element and turns pointer input into board commands.
    /// With `hide_affordances` the delete buttons and resize handles are not
    /// painted, which keeps them out of exported images.
    pub fn show(
        &mut self,
        ui: &mut Ui,
        store: &ElementStore,
        hide_affordances: bool,
    ) -> Vec<BoardCommand> {
        self.textures.begin_frame();

        let board_size = self.config.board_size(ui.available_size());
        let (board_rect, _) = ui.allocate_exact_size(board_size, Sense::hover());
        self.mounted = Some(board_rect);

        let painter = ui.painter_at(board_rect);
        painter.rect_filled(board_rect, self.config.board_rounding, Color32::WHITE);

        let origin = board_rect.min.to_vec2();
        let screen_rect = |element: &Element, gestures: &GestureController| {
            let rect = element.rect().translate(origin);
            match gestures.drag_preview(element.id()) {
                Some(offset) => rect.translate(offset),
                None => rect,
            }
        };

        let delete_size = self.config.delete_button_size;
        let delete_button = |element: &Element, rect: Rect| {
            DeleteButton::at_corner(element.id(), rect.right_top(), delete_size)
        };

        // Affordances go to the topmost element under the pointer, or to the
        // one currently being manipulated. The delete button hangs over the
        // corner and counts as part of its element.
        let pointer = ui.input(|i| i.pointer.hover_pos());
        let highlighted = self.gestures.state().element_id().or_else(|| {
            let pointer = pointer.filter(|pos| board_rect.contains(*pos))?;
            store
                .list()
                .iter()
                .rev()
                .find(|element| {
                    let rect = screen_rect(element, &self.gestures);
                    rect.contains(pointer) || delete_button(element, rect).rect().contains(pointer)
                })
                .map(Element::id)
        });

        let mut commands = Vec::new();
        for element in store.list() {
            let rect = screen_rect(element, &self.gestures);
            self.paint_element(ui, &painter.with_clip_rect(rect), element, rect);

            let response = ui.interact(
                rect.intersect(board_rect),
                Id::new(("board_element", element.id())),
                Sense::drag(),
            );
            if response.drag_started() {
                let press = ui
                    .input(|i| i.pointer.press_origin())
                    .or(response.interact_pointer_pos());
                if let Some(press) = press {
                    self.gestures.begin_drag(element, press);
                }
            }

            let show_affordances = !hide_affordances && highlighted == Some(element.id());

            let handle = ResizeHandle::new(element.id(), rect.max, self.config.handle_size);
            let handle_response = handle.show(ui, &painter, show_affordances);
            if handle_response.drag_started() {
                if let Some(press) = ui.input(|i| i.pointer.press_origin()) {
                    self.gestures.begin_resize(element, press);
                }
            }

            if show_affordances && !self.gestures.is_active() {
                if delete_button(element, rect).show(ui, &painter).clicked() {
                    commands.push(BoardCommand::Delete(element.id()));
                    self.textures.invalidate_element(element.id());
                }
            }
        }

        commands.extend(self.track_pointer(ui, store));
        commands
    }

    /// Feeds this frame's pointer state into the active gesture.
    fn track_pointer(&mut self, ui: &Ui, store: &ElementStore) -> Vec<BoardCommand> {
        if !self.gestures.is_active() {
            return Vec::new();
        }

        let (latest, released, escape) = ui.input(|i| {
            (
                i.pointer.latest_pos(),
                i.pointer.primary_released() || !i.pointer.primary_down(),
                i.key_pressed(egui::Key::Escape),
            )
        });

        let Some(pointer) = latest.filter(|_| !escape) else {
            self.gestures.cancel();
            return Vec::new();
        };

        // The controller ignores a pointer it has already seen.
        let mut commands: Vec<BoardCommand> =
            self.gestures.pointer_moved(pointer, store).into_iter().collect();
        if released {
            commands.extend(self.gestures.release(pointer, store));
        }
        match self.gestures.state() {
            GestureState::Dragging { .. } => ui.ctx().set_cursor_icon(CursorIcon::Grabbing),
            GestureState::Resizing { .. } => ui.ctx().set_cursor_icon(CursorIcon::ResizeNwSe),
            GestureState::Idle => {}
        }
        commands
    }

    fn paint_element(&mut self, ui: &Ui, painter: &Painter, element: &Element, rect: Rect) {
        let opacity = element.style().opacity.unwrap_or(1.0).clamp(0.0, 1.0);
        let fade = |color: Color32| color.gamma_multiply(opacity);

        if let Some(background) = element.style().background_color.as_deref().and_then(parse_color) {
            painter.rect_filled(rect, ELEMENT_ROUNDING, fade(background));
        }

        match element.content() {
            ElementContent::Image { source } => {
                match self.image_texture(ui, element.id(), source) {
                    Some(texture) => {
                        let uv = cover_uv(texture.size, rect.size());
                        painter.image(texture.id, rect, uv, fade(Color32::WHITE));
                    }
                    None => paint_placeholder(ui, painter, rect),
                }
            }
            ElementContent::Emoji { glyph } => {
                let size = rect.width().min(rect.height()) * 0.72;
                painter.text(
                    rect.center(),
                    Align2::CENTER_CENTER,
                    glyph,
                    FontId::proportional(size),
                    fade(INK),
                );
            }
            ElementContent::Text { text, style } => {
                let galley = painter.layout(
                    text.clone(),
                    text_font(style),
                    fade(parse_color(&style.color).unwrap_or(INK)),
                    (rect.width() - 2.0 * TEXT_PADDING).max(0.0),
                );
                painter.galley(rect.min + egui::Vec2::splat(TEXT_PADDING), galley, INK);
            }
            ElementContent::Color { value } => {
                let fill = parse_color(value).unwrap_or(Color32::GRAY);
                painter.rect_filled(rect, ELEMENT_ROUNDING, fade(fill));
            }
        }
    }

    /// Texture for an image element. Remote images go through the egui
    /// loaders; everything else is decoded once into the texture cache.
    fn image_texture(&mut self, ui: &Ui, id: ElementId, source: &str) -> Option<SizedTexture> {
        match ImageSource::classify(source) {
            ImageSource::Remote(url) => {
                match ui.ctx().try_load_texture(url, TextureOptions::LINEAR, SizeHint::default()) {
                    Ok(TexturePoll::Ready { texture }) => Some(texture),
                    Ok(TexturePoll::Pending { .. }) => None,
                    Err(err) => {
                        log::trace!("Remote image {url} unavailable: {err}");
                        None
                    }
                }
            }
            local => self
                .textures
                .get_or_load(id, source, || local.load(), ui.ctx())
                .map(|handle| SizedTexture::from_handle(&handle)),
        }
    }
}

fn text_font(style: &TextStyle) -> FontId {
    let family = match style.font_family.as_deref() {
        Some("monospace") => FontFamily::Monospace,
        _ => FontFamily::Proportional,
    };
    FontId::new(style.font_size, family)
}

fn paint_placeholder(ui: &Ui, painter: &Painter, rect: Rect) {
    let visuals = ui.visuals();
    painter.rect_filled(rect, ELEMENT_ROUNDING, visuals.faint_bg_color);
    painter.rect_stroke(rect, ELEMENT_ROUNDING, Stroke::new(1.0, visuals.weak_text_color()));
    painter.text(
        rect.center(),
        Align2::CENTER_CENTER,
        "image",
        FontId::proportional(12.0),
        visuals.weak_text_color(),
    );
}


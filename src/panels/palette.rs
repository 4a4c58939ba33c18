use egui::{Color32, Grid, RichText, Sense, Ui, Vec2};

use crate::command::BoardCommand;
use crate::element::{color_to_hex, factory, parse_color, NewElement};
use crate::file_handler::FileLoader;

const SWATCH_SIZE: f32 = 48.0;
const EMOJI_COLUMNS: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PaletteTab {
    #[default]
    Images,
    Emojis,
    Text,
    Colors,
}

impl PaletteTab {
    pub const ALL: [PaletteTab; 4] = [
        PaletteTab::Images,
        PaletteTab::Emojis,
        PaletteTab::Text,
        PaletteTab::Colors,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            PaletteTab::Images => "Images",
            PaletteTab::Emojis => "Emojis",
            PaletteTab::Text => "Text",
            PaletteTab::Colors => "Colors",
        }
    }
}

/// Form state of the element palette.
#[derive(Debug)]
pub struct PalettePanel {
    tab: PaletteTab,
    image_url: String,
    text: String,
    font_size: f32,
    text_color: Color32,
}

impl Default for PalettePanel {
    fn default() -> Self {
        Self {
            tab: PaletteTab::default(),
            image_url: String::new(),
            text: String::new(),
            font_size: factory::DEFAULT_FONT_SIZE,
            text_color: parse_color(factory::DEFAULT_TEXT_COLOR).unwrap_or(Color32::BLACK),
        }
    }
}

impl PalettePanel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn show(&mut self, ui: &mut Ui, uploads: &mut FileLoader) -> Vec<BoardCommand> {
        ui.horizontal(|ui| {
            for tab in PaletteTab::ALL {
                ui.selectable_value(&mut self.tab, tab, tab.label());
            }
        });
        ui.separator();

        let added = match self.tab {
            PaletteTab::Images => self.images_tab(ui, uploads),
            PaletteTab::Emojis => emojis_tab(ui),
            PaletteTab::Text => self.text_tab(ui),
            PaletteTab::Colors => colors_tab(ui),
        };

        added
            .map(|new| {
                log::info!("Palette: adding {} element", new.kind());
                BoardCommand::Add(new)
            })
            .into_iter()
            .collect()
    }

    fn images_tab(&mut self, ui: &mut Ui, uploads: &mut FileLoader) -> Option<NewElement> {
        let upload = ui.add_enabled(!uploads.is_busy(), egui::Button::new("Upload Image"));
        if upload.clicked() {
            uploads.open_dialog(ui.ctx());
        }
        if uploads.is_busy() {
            ui.horizontal(|ui| {
                ui.spinner();
                ui.label("Waiting for file…");
            });
        }

        ui.add_space(8.0);
        ui.label("Or add from a URL:");
        let field = ui.add(
            egui::TextEdit::singleline(&mut self.image_url)
                .hint_text("https://…")
                .desired_width(f32::INFINITY),
        );
        let submitted = field.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));

        if ui.button("Add Image").clicked() || submitted {
            let new = factory::create_image(&self.image_url)?;
            self.image_url.clear();
            return Some(new);
        }
        None
    }

    fn text_tab(&mut self, ui: &mut Ui) -> Option<NewElement> {
        ui.add(
            egui::TextEdit::multiline(&mut self.text)
                .hint_text("Enter text")
                .desired_rows(3)
                .desired_width(f32::INFINITY),
        );
        ui.add(
            egui::Slider::new(&mut self.font_size, factory::FONT_SIZE_RANGE)
                .step_by(1.0)
                .text("Font size"),
        );
        ui.horizontal(|ui| {
            ui.label("Color");
            ui.color_edit_button_srgba(&mut self.text_color);
        });

        if ui.button("Add Text").clicked() {
            let new = factory::create_text(&self.text, self.font_size, &color_to_hex(self.text_color))?;
            self.text.clear();
            return Some(new);
        }
        None
    }
}

fn emojis_tab(ui: &mut Ui) -> Option<NewElement> {
    let mut added = None;
    Grid::new("palette_emojis")
        .num_columns(EMOJI_COLUMNS)
        .spacing([8.0, 8.0])
        .show(ui, |ui| {
            for (index, glyph) in factory::EMOJIS.iter().enumerate() {
                let button = egui::Button::new(RichText::new(*glyph).size(28.0))
                    .min_size(Vec2::splat(SWATCH_SIZE));
                if ui.add(button).clicked() {
                    added = factory::create_emoji(glyph);
                }
                if (index + 1) % EMOJI_COLUMNS == 0 {
                    ui.end_row();
                }
            }
        });
    added
}

fn colors_tab(ui: &mut Ui) -> Option<NewElement> {
    let mut added = None;
    Grid::new("palette_colors")
        .num_columns(4)
        .spacing([8.0, 8.0])
        .show(ui, |ui| {
            for (index, value) in factory::COLORS.iter().enumerate() {
                let fill = parse_color(value).unwrap_or(Color32::GRAY);
                let (rect, response) = ui.allocate_exact_size(Vec2::splat(SWATCH_SIZE), Sense::click());
                let stroke = if response.hovered() {
                    ui.visuals().widgets.hovered.fg_stroke
                } else {
                    egui::Stroke::NONE
                };
                ui.painter().rect(rect, 6.0, fill, stroke);
                if response.on_hover_text(*value).clicked() {
                    added = factory::create_color(value);
                }
                if (index + 1) % 4 == 0 {
                    ui.end_row();
                }
            }
        });
    added
}

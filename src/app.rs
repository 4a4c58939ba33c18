use log::{debug, warn};

use crate::command::BoardCommand;
use crate::config::BoardConfig;
use crate::export::{self, ExportSink, Exporter};
use crate::file_handler::{self, FileLoader};
use crate::panels::{BoardSurface, PalettePanel};
use crate::store::ElementStore;

pub struct MoodboardApp {
    config: BoardConfig,
    store: ElementStore,
    palette: PalettePanel,
    board: BoardSurface,
    uploads: FileLoader,
    exporter: Exporter,
    export_sink: Box<dyn ExportSink>,
    show_debug: bool,
}

impl MoodboardApp {
    /// Called once before the first frame.
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        // Remote image URLs are fetched and decoded by these
        egui_extras::install_image_loaders(&cc.egui_ctx);
        Self::with_config(BoardConfig::default())
    }

    pub fn with_config(config: BoardConfig) -> Self {
        Self {
            board: BoardSurface::new(&config),
            store: ElementStore::new(),
            palette: PalettePanel::new(),
            uploads: FileLoader::new(),
            exporter: Exporter::new(),
            export_sink: export::default_sink(),
            show_debug: false,
            config,
        }
    }

    pub fn store(&self) -> &ElementStore {
        &self.store
    }

    fn apply(&mut self, commands: Vec<BoardCommand>) {
        for command in commands {
            let name = command.name();
            if !command.execute(&mut self.store) {
                debug!("{name} had no effect");
            }
        }
    }

    fn finish_export(&mut self, ctx: &egui::Context) {
        match self.exporter.poll(ctx) {
            Some(Ok(png)) => {
                if let Err(err) = self.export_sink.offer(&self.config.export_file_name, &png) {
                    warn!("Export failed: {err}");
                }
            }
            Some(Err(err)) => warn!("Export failed: {err}"),
            None => {}
        }
    }
}

impl eframe::App for MoodboardApp {
    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.finish_export(ctx);

        let mut commands: Vec<BoardCommand> = self
            .uploads
            .poll()
            .into_iter()
            .chain(file_handler::take_dropped_images(ctx))
            .map(BoardCommand::Add)
            .collect();

        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading("Moodify");
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.toggle_value(&mut self.show_debug, "Debug");
                });
            });
        });

        egui::SidePanel::left("palette")
            .resizable(false)
            .exact_width(self.config.palette_width)
            .show(ctx, |ui| {
                ui.heading("Elements");
                commands.extend(self.palette.show(ui, &mut self.uploads));
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let export = ui.add_enabled(!self.exporter.is_pending(), egui::Button::new("Export as PNG"));
                if export.clicked() {
                    self.exporter.request(ctx, self.board.mounted_rect());
                }
            });
            ui.add_space(8.0);

            let hide_affordances = self.exporter.is_pending();
            commands.extend(self.board.show(ui, &self.store, hide_affordances));
        });

        if self.show_debug {
            egui::Window::new("Board Debug")
                .open(&mut self.show_debug)
                .default_width(360.0)
                .show(ctx, |ui| {
                    ui.label(format!("Elements: {}", self.store.len()));
                    ui.label(format!("Gesture: {}", self.board.gestures().state().name()));
                    ui.separator();
                    let json = self
                        .store
                        .to_json()
                        .unwrap_or_else(|err| format!("<failed to serialize: {err}>"));
                    egui::ScrollArea::vertical().show(ui, |ui| {
                        ui.monospace(json);
                    });
                });
        }

        self.apply(commands);
    }
}

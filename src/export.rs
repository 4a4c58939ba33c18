//! Rasterizes the board region and offers it as a PNG file.
//!
//! The pixels come from a viewport screenshot of the frame in which the
//! export was requested, so the result is whatever the board showed then.

use std::io::Cursor;

use egui::{ColorImage, Context, Pos2, Rect};
use log::{debug, info};

use crate::error::ExportError;

/// Receives the encoded PNG and hands it to the user.
pub trait ExportSink {
    fn offer(&self, file_name: &str, png: &[u8]) -> Result<(), ExportError>;
}

/// Native save dialog.
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Default)]
pub struct SaveDialogSink;

#[cfg(not(target_arch = "wasm32"))]
impl ExportSink for SaveDialogSink {
    fn offer(&self, file_name: &str, png: &[u8]) -> Result<(), ExportError> {
        let path = rfd::FileDialog::new()
            .set_title("Export as PNG")
            .set_file_name(file_name)
            .add_filter("PNG Image", &["png"])
            .save_file()
            .ok_or(ExportError::Cancelled)?;
        std::fs::write(&path, png)?;
        info!("Exported board to {}", path.display());
        Ok(())
    }
}

/// Browser download through a temporary object URL.
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Default)]
pub struct BrowserDownloadSink;

#[cfg(target_arch = "wasm32")]
impl ExportSink for BrowserDownloadSink {
    fn offer(&self, file_name: &str, png: &[u8]) -> Result<(), ExportError> {
        use eframe::wasm_bindgen::JsCast as _;

        let failed = |what: &str| ExportError::Download(what.to_owned());
        let document = web_sys::window()
            .and_then(|window| window.document())
            .ok_or_else(|| failed("no document"))?;

        let parts = js_sys::Array::new();
        parts.push(&js_sys::Uint8Array::from(png));
        let options = web_sys::BlobPropertyBag::new();
        options.set_type("image/png");
        let blob = web_sys::Blob::new_with_u8_array_sequence_and_options(&parts, &options)
            .map_err(|_| failed("could not create blob"))?;
        let url = web_sys::Url::create_object_url_with_blob(&blob)
            .map_err(|_| failed("could not create object URL"))?;

        let anchor = document
            .create_element("a")
            .map_err(|_| failed("could not create link"))?
            .dyn_into::<web_sys::HtmlAnchorElement>()
            .map_err(|_| failed("link is not an anchor"))?;
        anchor.set_href(&url);
        anchor.set_download(file_name);
        anchor.click();

        web_sys::Url::revoke_object_url(&url).ok();
        info!("Exported board as {file_name}");
        Ok(())
    }
}

/// The sink for the current platform.
pub fn default_sink() -> Box<dyn ExportSink> {
    #[cfg(not(target_arch = "wasm32"))]
    {
        Box::new(SaveDialogSink)
    }
    #[cfg(target_arch = "wasm32")]
    {
        Box::new(BrowserDownloadSink)
    }
}

/// Tracks one in-flight export between the request and the screenshot.
#[derive(Debug, Default)]
pub struct Exporter {
    pending: Option<Rect>,
}

impl Exporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Asks for a screenshot of this frame. `region` is the board's screen
    /// rectangle, or `None` when the board has not been laid out yet, in
    /// which case the request is dropped.
    pub fn request(&mut self, ctx: &Context, region: Option<Rect>) -> bool {
        let Some(region) = region else {
            debug!("Export requested before the board was mounted");
            return false;
        };
        self.pending = Some(region);
        ctx.send_viewport_cmd(egui::ViewportCommand::Screenshot(Default::default()));
        true
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Picks up the screenshot once it arrives and returns the board PNG.
    pub fn poll(&mut self, ctx: &Context) -> Option<Result<Vec<u8>, ExportError>> {
        self.pending?;
        let screenshot = ctx.input(|i| {
            i.raw.events.iter().find_map(|event| match event {
                egui::Event::Screenshot { image, .. } => Some(image.clone()),
                _ => None,
            })
        })?;
        let region = self.pending.take()?;
        Some(
            crop_region(&screenshot, region, ctx.pixels_per_point())
                .and_then(|board| encode_png(&board)),
        )
    }
}

/// Cuts `region` (in points) out of a screenshot taken at `pixels_per_point`.
pub fn crop_region(
    screenshot: &ColorImage,
    region: Rect,
    pixels_per_point: f32,
) -> Result<ColorImage, ExportError> {
    let [width, height] = screenshot.size;
    let bounds = Rect::from_min_max(
        Pos2::ZERO,
        Pos2::new(width as f32, height as f32) / pixels_per_point,
    );
    let region = region.intersect(bounds);
    if !region.is_positive() {
        return Err(ExportError::EmptyRegion);
    }
    let board = screenshot.region(&region, Some(pixels_per_point));
    if board.size[0] == 0 || board.size[1] == 0 {
        return Err(ExportError::EmptyRegion);
    }
    Ok(board)
}

pub fn encode_png(image: &ColorImage) -> Result<Vec<u8>, ExportError> {
    let [width, height] = image.size;
    let raw: Vec<u8> = image
        .pixels
        .iter()
        .flat_map(|color| color.to_srgba_unmultiplied())
        .collect();
    let buffer = image::RgbaImage::from_raw(width as u32, height as u32, raw)
        .ok_or(ExportError::EmptyRegion)?;

    let mut png = Vec::new();
    buffer.write_to(&mut Cursor::new(&mut png), image::ImageFormat::Png)?;
    Ok(png)
}

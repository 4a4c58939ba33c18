//! Turns user-chosen files into image elements: the "Upload Image" dialog and
//! files dropped onto the window. Contents become `data:` URLs.

use std::path::Path;

use eframe::egui;
use futures::channel::oneshot;
use log::{debug, info, warn};

use crate::data_url;
use crate::element::{NewElement, factory};
use crate::error::UploadError;

pub const IMAGE_EXTENSIONS: [&str; 6] = ["png", "jpg", "jpeg", "gif", "webp", "bmp"];

/// A file read to completion, ready to become an image element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedImage {
    pub file_name: String,
    pub data_url: String,
}

impl UploadedImage {
    pub fn from_bytes(file_name: &str, bytes: &[u8]) -> Self {
        let mime = data_url::mime_for(bytes, Some(file_name));
        Self {
            file_name: file_name.to_owned(),
            data_url: data_url::encode(bytes, mime),
        }
    }

    pub fn into_element(self) -> Option<NewElement> {
        factory::create_image(&self.data_url)
    }
}

/// `Ok(None)` means the user closed the dialog without choosing a file.
type PickResult = Result<Option<UploadedImage>, UploadError>;

/// Runs file dialogs off the UI thread and hands finished reads back to it.
#[derive(Debug, Default)]
pub struct FileLoader {
    pending: Vec<oneshot::Receiver<PickResult>>,
}

impl FileLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_busy(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Opens the image picker. The result arrives through [`Self::poll`].
    pub fn open_dialog(&mut self, ctx: &egui::Context) {
        let (sender, receiver) = oneshot::channel();
        self.pending.push(receiver);
        let ctx = ctx.clone();

        // Sending only fails once the app dropped the receiver.
        #[cfg(not(target_arch = "wasm32"))]
        std::thread::spawn(move || {
            let result = futures::executor::block_on(pick_image());
            let _ = sender.send(result);
            ctx.request_repaint();
        });

        #[cfg(target_arch = "wasm32")]
        wasm_bindgen_futures::spawn_local(async move {
            let result = pick_image().await;
            let _ = sender.send(result);
            ctx.request_repaint();
        });
    }

    /// Collects the uploads that finished since the last frame.
    pub fn poll(&mut self) -> Vec<NewElement> {
        let mut finished = Vec::new();
        self.pending.retain_mut(|receiver| match receiver.try_recv() {
            Ok(None) => true,
            Ok(Some(Ok(Some(image)))) => {
                info!("Uploaded {} ({} bytes as data URL)", image.file_name, image.data_url.len());
                finished.extend(image.into_element());
                false
            }
            Ok(Some(Ok(None))) => {
                debug!("Upload dialog closed without a file");
                false
            }
            Ok(Some(Err(err))) => {
                warn!("Upload failed: {err}");
                false
            }
            Err(oneshot::Canceled) => {
                warn!("Upload task ended without a result");
                false
            }
        });
        finished
    }
}

async fn pick_image() -> PickResult {
    let Some(handle) = rfd::AsyncFileDialog::new()
        .set_title("Upload Image")
        .add_filter("Images", &IMAGE_EXTENSIONS)
        .pick_file()
        .await
    else {
        return Ok(None);
    };

    let file_name = handle.file_name();

    #[cfg(not(target_arch = "wasm32"))]
    let bytes = std::fs::read(handle.path()).map_err(|source| UploadError::Read {
        name: file_name.clone(),
        source,
    })?;

    #[cfg(target_arch = "wasm32")]
    let bytes = handle.read().await;

    if bytes.is_empty() {
        return Err(UploadError::NoContents(file_name));
    }
    Ok(Some(UploadedImage::from_bytes(&file_name, &bytes)))
}

/// Image elements for files dropped onto the window this frame.
pub fn take_dropped_images(ctx: &egui::Context) -> Vec<NewElement> {
    let dropped = ctx.input(|i| i.raw.dropped_files.clone());
    dropped
        .iter()
        .filter_map(|file| match read_dropped_file(file) {
            Ok(image) => {
                info!("Dropped {}", image.file_name);
                image.into_element()
            }
            Err(err) => {
                warn!("Ignoring dropped file: {err}");
                None
            }
        })
        .collect()
}

fn dropped_file_name(file: &egui::DroppedFile) -> String {
    if let Some(path) = &file.path {
        path.display().to_string()
    } else if !file.name.is_empty() {
        file.name.clone()
    } else {
        "unknown".to_owned()
    }
}

fn read_dropped_file(file: &egui::DroppedFile) -> Result<UploadedImage, UploadError> {
    let file_name = dropped_file_name(file);
    if !is_image_file(file) {
        return Err(UploadError::NotAnImage(file_name));
    }

    if let Some(bytes) = &file.bytes {
        return Ok(UploadedImage::from_bytes(&file_name, bytes));
    }

    #[cfg(not(target_arch = "wasm32"))]
    if let Some(path) = &file.path {
        let bytes = std::fs::read(path).map_err(|source| UploadError::Read {
            name: file_name.clone(),
            source,
        })?;
        return Ok(UploadedImage::from_bytes(&file_name, &bytes));
    }

    Err(UploadError::NoContents(file_name))
}

/// Check if a file is an image based on MIME type or extension
fn is_image_file(file: &egui::DroppedFile) -> bool {
    if !file.mime.is_empty() {
        return file.mime.starts_with("image/");
    }
    let name = file
        .path
        .as_deref()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| file.name.clone().into());
    has_image_extension(&name)
}

fn has_image_extension(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .is_some_and(|ext| IMAGE_EXTENSIONS.contains(&ext.as_str()))
}

use std::path::Path;

use egui::{ColorImage, Pos2, Rect, Vec2};

use crate::data_url;
use crate::error::ImageLoadError;

/// Where an image element's pixels come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageSource<'a> {
    /// A `data:` URL, e.g. from an upload
    Inline(&'a str),
    /// A local file, with or without a `file://` prefix
    Local(&'a Path),
    /// An `http(s)` URL; fetched by the egui image loaders
    Remote(&'a str),
}

impl<'a> ImageSource<'a> {
    pub fn classify(content: &'a str) -> Self {
        let content = content.trim();
        if content.starts_with("data:") {
            ImageSource::Inline(content)
        } else if content.starts_with("http://") || content.starts_with("https://") {
            ImageSource::Remote(content)
        } else {
            ImageSource::Local(Path::new(content.strip_prefix("file://").unwrap_or(content)))
        }
    }

    /// Reads and decodes the image. Remote sources are not handled here.
    pub fn load(&self) -> Result<ColorImage, ImageLoadError> {
        let bytes = match self {
            ImageSource::Inline(url) => data_url::decode(url)?.bytes,
            ImageSource::Local(path) => read_local(path)?,
            ImageSource::Remote(url) => return Err(ImageLoadError::Remote((*url).to_owned())),
        };
        decode_color_image(&bytes)
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn read_local(path: &Path) -> Result<Vec<u8>, ImageLoadError> {
    Ok(std::fs::read(path)?)
}

#[cfg(target_arch = "wasm32")]
fn read_local(_path: &Path) -> Result<Vec<u8>, ImageLoadError> {
    Err(ImageLoadError::Unsupported)
}

pub fn decode_color_image(bytes: &[u8]) -> Result<ColorImage, ImageLoadError> {
    let image = image::load_from_memory(bytes)?;
    let size = [image.width() as usize, image.height() as usize];
    let rgba = image.to_rgba8();
    Ok(ColorImage::from_rgba_unmultiplied(
        size,
        rgba.as_flat_samples().as_slice(),
    ))
}

/// UV rectangle that fills `target` with an image of `image_size`, cropping
/// the overflowing axis evenly on both sides.
pub fn cover_uv(image_size: Vec2, target: Vec2) -> Rect {
    let full = Rect::from_min_max(Pos2::ZERO, Pos2::new(1.0, 1.0));
    if image_size.x <= 0.0 || image_size.y <= 0.0 || target.x <= 0.0 || target.y <= 0.0 {
        return full;
    }

    let image_aspect = image_size.x / image_size.y;
    let target_aspect = target.x / target.y;
    if image_aspect > target_aspect {
        let margin = (1.0 - target_aspect / image_aspect) / 2.0;
        Rect::from_min_max(Pos2::new(margin, 0.0), Pos2::new(1.0 - margin, 1.0))
    } else {
        let margin = (1.0 - image_aspect / target_aspect) / 2.0;
        Rect::from_min_max(Pos2::new(0.0, margin), Pos2::new(1.0, 1.0 - margin))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn tiny_png() -> Vec<u8> {
        let image = image::RgbaImage::from_pixel(3, 2, image::Rgba([255, 0, 0, 255]));
        let mut png = Vec::new();
        image
            .write_to(&mut Cursor::new(&mut png), image::ImageFormat::Png)
            .unwrap();
        png
    }

    #[test]
    fn classify_by_prefix() {
        assert!(matches!(ImageSource::classify("data:image/png;base64,AA=="), ImageSource::Inline(_)));
        assert!(matches!(ImageSource::classify(" https://example.com/a.jpg"), ImageSource::Remote(_)));
        assert_eq!(
            ImageSource::classify("file:///tmp/a.png"),
            ImageSource::Local(Path::new("/tmp/a.png"))
        );
        assert_eq!(ImageSource::classify("a.png"), ImageSource::Local(Path::new("a.png")));
    }

    #[test]
    fn inline_png_decodes_to_pixels() {
        let url = data_url::encode(&tiny_png(), "image/png");
        let image = ImageSource::classify(&url).load().unwrap();
        assert_eq!(image.size, [3, 2]);
        assert_eq!(image.pixels[0], egui::Color32::RED);
    }

    #[test]
    fn garbage_and_remote_sources_fail() {
        let url = data_url::encode(b"definitely not an image", "image/png");
        assert!(matches!(
            ImageSource::classify(&url).load(),
            Err(ImageLoadError::Decode(_))
        ));
        assert!(matches!(
            ImageSource::classify("https://example.com/a.png").load(),
            Err(ImageLoadError::Remote(_))
        ));
    }

    #[test]
    fn cover_crops_the_long_axis() {
        let wide = cover_uv(Vec2::new(400.0, 100.0), Vec2::new(100.0, 100.0));
        assert!((wide.min.x - 0.375).abs() < 1e-6);
        assert!((wide.max.x - 0.625).abs() < 1e-6);
        assert_eq!((wide.min.y, wide.max.y), (0.0, 1.0));

        let tall = cover_uv(Vec2::new(100.0, 200.0), Vec2::new(100.0, 100.0));
        assert!((tall.min.y - 0.25).abs() < 1e-6);
        assert!((tall.max.y - 0.75).abs() < 1e-6);
    }
}

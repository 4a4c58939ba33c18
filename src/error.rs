use thiserror::Error;

/// Errors while parsing a `data:` URL
#[derive(Debug, Error)]
pub enum DataUrlError {
    #[error("not a data URL")]
    MissingScheme,
    #[error("data URL has no ',' between header and payload")]
    MissingPayload,
    #[error("invalid base64 payload: {0}")]
    Base64(#[from] base64::DecodeError),
}

/// Errors while turning an image element's source into pixels
#[derive(Debug, Error)]
pub enum ImageLoadError {
    #[error(transparent)]
    DataUrl(#[from] DataUrlError),
    #[error("failed to read image file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to decode image: {0}")]
    Decode(#[from] image::ImageError),
    #[error("remote image {0} is fetched by the egui loaders")]
    Remote(String),
    #[error("local image files cannot be read on this platform")]
    Unsupported,
}

/// Errors while rasterizing and saving the board
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("board region lies outside the captured frame")]
    EmptyRegion,
    #[error("failed to encode PNG: {0}")]
    Encode(#[from] image::ImageError),
    #[error("failed to write export: {0}")]
    Io(#[from] std::io::Error),
    #[error("export cancelled")]
    Cancelled,
    #[error("browser download failed: {0}")]
    Download(String),
}

/// Errors while reading a user-chosen file
#[derive(Debug, Error)]
pub enum UploadError {
    #[error("failed to read {name}: {source}")]
    Read {
        name: String,
        #[source]
        source: std::io::Error,
    },
    #[error("{0} is not an image file")]
    NotAnImage(String),
    #[error("{0} has no readable contents")]
    NoContents(String),
}

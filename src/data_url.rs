//! `data:` URLs, the self-describing strings uploaded images are stored as.

use std::path::Path;

use base64::{Engine, engine::general_purpose::STANDARD};

use crate::error::DataUrlError;

const DEFAULT_MIME: &str = "text/plain;charset=US-ASCII";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataUrl {
    pub mime: String,
    pub bytes: Vec<u8>,
}

/// Encodes `bytes` as `data:<mime>;base64,<payload>`.
pub fn encode(bytes: &[u8], mime: &str) -> String {
    format!("data:{mime};base64,{}", STANDARD.encode(bytes))
}

pub fn decode(url: &str) -> Result<DataUrl, DataUrlError> {
    let rest = url
        .trim()
        .strip_prefix("data:")
        .ok_or(DataUrlError::MissingScheme)?;
    let (header, payload) = rest.split_once(',').ok_or(DataUrlError::MissingPayload)?;

    let (mime, bytes) = match header.strip_suffix(";base64") {
        Some(mime) => (mime, STANDARD.decode(payload.trim())?),
        None => (
            header,
            urlencoding::decode_binary(payload.as_bytes()).into_owned(),
        ),
    };

    Ok(DataUrl {
        mime: if mime.is_empty() {
            DEFAULT_MIME.to_owned()
        } else {
            mime.to_owned()
        },
        bytes,
    })
}

/// Picks a MIME type by sniffing the bytes, then by file extension.
pub fn mime_for(bytes: &[u8], file_name: Option<&str>) -> &'static str {
    if let Ok(format) = image::guess_format(bytes) {
        return format.to_mime_type();
    }
    file_name
        .and_then(|name| Path::new(name).extension())
        .and_then(image::ImageFormat::from_extension)
        .map(|format| format.to_mime_type())
        .unwrap_or("application/octet-stream")
}

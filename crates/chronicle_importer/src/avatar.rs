//! Avatar resolution.
//!
//! Avatars are stored as self-contained data URIs so the state file never
//! depends on a remote URL staying reachable.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use chronicle_error::{ChronicleResult, ImportError, ImportErrorKind};
use image::{GenericImageView, ImageReader};
use std::io::Cursor;
use tracing::{debug, instrument};

/// Image formats accepted for avatars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageFormat {
    /// PNG
    Png,
    /// JPEG
    Jpeg,
    /// GIF
    Gif,
    /// WebP
    Webp,
}

impl ImageFormat {
    /// Guess the format from the file signature, without decoding.
    pub fn detect(bytes: &[u8]) -> Option<Self> {
        image::guess_format(bytes)
            .ok()
            .and_then(Self::from_image_format)
    }

    /// MIME type used in the data URI.
    pub fn mime_type(self) -> &'static str {
        match self {
            ImageFormat::Png => "image/png",
            ImageFormat::Jpeg => "image/jpeg",
            ImageFormat::Gif => "image/gif",
            ImageFormat::Webp => "image/webp",
        }
    }

    fn from_image_format(format: image::ImageFormat) -> Option<Self> {
        match format {
            image::ImageFormat::Png => Some(ImageFormat::Png),
            image::ImageFormat::Jpeg => Some(ImageFormat::Jpeg),
            image::ImageFormat::Gif => Some(ImageFormat::Gif),
            image::ImageFormat::WebP => Some(ImageFormat::Webp),
            _ => None,
        }
    }

    fn from_mime_type(mime: &str) -> Option<Self> {
        match mime {
            "image/png" => Some(ImageFormat::Png),
            "image/jpeg" | "image/jpg" => Some(ImageFormat::Jpeg),
            "image/gif" => Some(ImageFormat::Gif),
            "image/webp" => Some(ImageFormat::Webp),
            _ => None,
        }
    }
}

/// Decode an avatar image in full and report its format.
///
/// Truncated or corrupt files fail here, not when the platform first sees them.
pub fn inspect_image(bytes: &[u8]) -> Result<ImageFormat, String> {
    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| format!("failed to guess image format: {}", e))?;

    let format = reader
        .format()
        .and_then(ImageFormat::from_image_format)
        .ok_or_else(|| "unsupported image format".to_string())?;

    let image = reader
        .decode()
        .map_err(|e| format!("could not decode {}: {}", format.mime_type(), e))?;

    let (width, height) = image.dimensions();
    debug!(format = format.mime_type(), width, height, "Decoded avatar");
    Ok(format)
}

#[track_caller]
fn resolution_error(reference: &str, reason: impl Into<String>) -> ImportError {
    // Data URIs can be huge; keep the error readable.
    let avatar = if reference.starts_with("data:") && reference.len() > 48 {
        format!("{}...", reference.chars().take(48).collect::<String>())
    } else {
        reference.to_string()
    };
    ImportError::new(ImportErrorKind::AvatarResolution {
        avatar,
        reason: reason.into(),
    })
}

/// Turn an avatar reference into an embeddable `data:` URI.
///
/// Accepts an http(s) URL, a local file path, or an existing base64 data URI.
///
/// # Errors
///
/// `ImportErrorKind::AvatarResolution` when the image cannot be fetched,
/// read or decoded, or is not PNG, JPEG, GIF or WebP.
#[instrument(skip(http, reference), fields(kind))]
pub async fn resolve_avatar(http: &reqwest::Client, reference: &str) -> ChronicleResult<String> {
    if reference.starts_with("data:") {
        tracing::Span::current().record("kind", "data_uri");
        return Ok(validate_data_uri(reference)?);
    }

    let bytes = if reference.starts_with("http://") || reference.starts_with("https://") {
        tracing::Span::current().record("kind", "url");
        fetch_remote(http, reference).await?
    } else {
        tracing::Span::current().record("kind", "path");
        tokio::fs::read(reference)
            .await
            .map_err(|e| resolution_error(reference, e.to_string()))?
    };

    let format = inspect_image(&bytes).map_err(|reason| resolution_error(reference, reason))?;

    debug!(
        format = format.mime_type(),
        size = bytes.len(),
        "Resolved avatar"
    );
    Ok(format!(
        "data:{};base64,{}",
        format.mime_type(),
        STANDARD.encode(&bytes)
    ))
}

async fn fetch_remote(http: &reqwest::Client, url: &str) -> Result<Vec<u8>, ImportError> {
    let response = http
        .get(url)
        .send()
        .await
        .map_err(|e| resolution_error(url, e.to_string()))?;

    if !response.status().is_success() {
        return Err(resolution_error(
            url,
            format!("server answered {}", response.status()),
        ));
    }

    let bytes = response
        .bytes()
        .await
        .map_err(|e| resolution_error(url, e.to_string()))?;
    Ok(bytes.to_vec())
}

fn validate_data_uri(uri: &str) -> Result<String, ImportError> {
    let (header, payload) = uri
        .strip_prefix("data:")
        .and_then(|rest| rest.split_once(','))
        .ok_or_else(|| resolution_error(uri, "malformed data URI"))?;

    let mime = header
        .strip_suffix(";base64")
        .ok_or_else(|| resolution_error(uri, "data URI is not base64 encoded"))?;
    let declared = ImageFormat::from_mime_type(mime)
        .ok_or_else(|| resolution_error(uri, format!("unsupported image type {}", mime)))?;

    let bytes = STANDARD
        .decode(payload)
        .map_err(|e| resolution_error(uri, e.to_string()))?;
    let actual = inspect_image(&bytes).map_err(|reason| resolution_error(uri, reason))?;
    if actual != declared {
        return Err(resolution_error(
            uri,
            format!("content is not {}", declared.mime_type()),
        ));
    }

    Ok(uri.to_string())
}

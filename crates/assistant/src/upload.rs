//! Chart image input validation
//!
//! Mirrors the upload widget's rules: image media types only (png, jpeg,
//! webp), 10 MB ceiling, and nothing empty. Rejection happens here, before
//! any request is formatted or dispatched.

use trading_copilot_config::constants::limits;
use trading_copilot_core::{Error, Result};
use trading_copilot_llm::ImageSource;

/// Validate an image reference before it is embedded into a request
pub fn validate_image_source(image: &ImageSource) -> Result<()> {
    match image {
        ImageSource::Url(url) => {
            let trimmed = url.trim();
            if trimmed.is_empty() {
                return Err(Error::InvalidInput("image URL is empty".to_string()));
            }
            if !trimmed.starts_with("http://")
                && !trimmed.starts_with("https://")
                && !trimmed.starts_with("data:image/")
            {
                return Err(Error::InvalidInput(format!(
                    "image URL must be http(s) or a data URL, got '{}'",
                    truncate(trimmed, 48)
                )));
            }
            Ok(())
        }
        ImageSource::Base64 { media_type, data } => {
            if !limits::IMAGE_MEDIA_TYPES.contains(&media_type.as_str()) {
                return Err(Error::InvalidInput(format!(
                    "unsupported image type '{}'; accepted: {}",
                    media_type,
                    limits::IMAGE_MEDIA_TYPES.join(", ")
                )));
            }
            if data.is_empty() {
                return Err(Error::InvalidInput("image data is empty".to_string()));
            }
            // Base64 expands by 4/3; compare against the decoded size
            let decoded_len = data.len() / 4 * 3;
            if decoded_len > limits::MAX_IMAGE_BYTES {
                return Err(Error::InvalidInput(format!(
                    "image is {} bytes decoded; maximum is {} bytes",
                    decoded_len,
                    limits::MAX_IMAGE_BYTES
                )));
            }
            Ok(())
        }
    }
}

fn truncate(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

//! Shared response-classification layer.
//!
//! The status check runs before any body inspection. A 4xx/5xx body is
//! never handed to a parser, so malformed error bodies cannot
//! masquerade as decode failures. This ordering is load-bearing for
//! both controllers.

use image::DynamicImage;
use serde::de::DeserializeOwned;

use crate::error::FetchError;

/// Reject any status outside `[200, 300)`.
pub fn check_status(status: u16) -> Result<(), FetchError> {
    if (200..300).contains(&status) {
        Ok(())
    } else {
        Err(FetchError::BadStatus(status))
    }
}

/// Status check, then JSON decode into the expected shape.
pub fn json<T: DeserializeOwned>(status: u16, body: &[u8]) -> Result<T, FetchError> {
    check_status(status)?;
    serde_json::from_slice(body).map_err(FetchError::unexpected)
}

/// Status check, then image decode (format sniffed from the bytes).
pub fn image(status: u16, body: &[u8]) -> Result<DynamicImage, FetchError> {
    check_status(status)?;
    ::image::load_from_memory(body).map_err(FetchError::unexpected)
}

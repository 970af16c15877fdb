//! Intents for the avatar fetch.

use std::sync::Arc;

use image::DynamicImage;

use crate::fsm::Intent;

/// Intents dispatched to the avatar reducer.
#[derive(Debug, Clone)]
pub enum AvatarIntent {
    /// Caller asked to load. Repeated calls are no-ops once loading.
    Start,
    /// Bytes arrived and decoded as an image.
    Completed(Arc<DynamicImage>),
    /// Bad status, undecodable bytes, or a malformed URL.
    Failed,
}

impl Intent for AvatarIntent {}

//! State for the one-stage avatar fetch.

use std::sync::Arc;

use image::DynamicImage;

use crate::fsm::MachineState;

/// Avatar lifecycle: four states, no backward transitions. A fresh
/// loader instance is the only way back to `Idle`.
#[derive(Debug, Clone)]
pub enum AvatarState {
    Idle,
    Loading,
    Loaded(Arc<DynamicImage>),
    Failed,
}

impl Default for AvatarState {
    fn default() -> Self {
        AvatarState::Idle
    }
}

impl PartialEq for AvatarState {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (AvatarState::Idle, AvatarState::Idle) => true,
            (AvatarState::Loading, AvatarState::Loading) => true,
            (AvatarState::Failed, AvatarState::Failed) => true,
            // Payloads compare by identity; pixel comparison is not
            // meaningful for the state machine.
            (AvatarState::Loaded(a), AvatarState::Loaded(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl MachineState for AvatarState {}

impl AvatarState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Loaded(_) | Self::Failed)
    }

    /// The decoded payload, if loaded.
    pub fn image(&self) -> Option<&Arc<DynamicImage>> {
        match self {
            Self::Loaded(image) => Some(image),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_idle() {
        assert_eq!(AvatarState::default(), AvatarState::Idle);
    }

    #[test]
    fn loaded_compares_by_identity() {
        let image = Arc::new(DynamicImage::new_rgba8(1, 1));
        let a = AvatarState::Loaded(Arc::clone(&image));
        let b = AvatarState::Loaded(image);
        let c = AvatarState::Loaded(Arc::new(DynamicImage::new_rgba8(1, 1)));
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn terminal_states() {
        assert!(!AvatarState::Idle.is_terminal());
        assert!(!AvatarState::Loading.is_terminal());
        assert!(AvatarState::Failed.is_terminal());
        assert!(AvatarState::Loaded(Arc::new(DynamicImage::new_rgba8(1, 1))).is_terminal());
    }
}

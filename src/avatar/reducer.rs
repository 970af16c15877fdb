//! Reducer for the avatar fetch.
//!
//! Policy differs from the user fetch: an illegal intent here is an
//! idempotent no-op, never a reset, so a presentation layer may call
//! `start()` as often as it likes without side effects.

use crate::fsm::{Reducer, Step};

use super::intent::AvatarIntent;
use super::state::AvatarState;

pub struct AvatarReducer;

impl Reducer for AvatarReducer {
    type State = AvatarState;
    type Intent = AvatarIntent;

    fn reduce(state: &AvatarState, intent: AvatarIntent) -> Step<AvatarState> {
        match (state, intent) {
            (AvatarState::Idle, AvatarIntent::Start) => Step::Next(AvatarState::Loading),
            (AvatarState::Loading, AvatarIntent::Completed(image)) => {
                Step::Next(AvatarState::Loaded(image))
            }
            (AvatarState::Loading, AvatarIntent::Failed) => Step::Next(AvatarState::Failed),
            _ => Step::Stay,
        }
    }
}

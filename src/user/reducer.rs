//! Reducer for the user fetch: the transition graph as data.

use crate::fsm::{Reducer, Step};

use super::intent::UserIntent;
use super::state::FetchState;

use FetchState::*;
use UserIntent::*;

/// Every legal edge of the fetch graph. A (state, intent) pair absent
/// from this table is a protocol violation and force-resets the
/// controller instead of failing loudly.
const TRANSITIONS: &[(FetchState, UserIntent, FetchState)] = &[
    (AwaitingInput, BeginFetch, FetchingUser),
    (FetchingUser, ProfileReceived, UserFetched),
    (UserFetched, AdvanceToRepos, FetchingRepos),
    (FetchingRepos, ReposReceived, Displayed),
    (FetchingUser, Fail, ErrorDisplayed),
    (FetchingRepos, Fail, ErrorDisplayed),
    (FetchingUser, Cancel, ErrorDisplayed),
    (FetchingRepos, Cancel, ErrorDisplayed),
    (AwaitingInput, Reset, AwaitingInput),
    (FetchingUser, Reset, AwaitingInput),
    (UserFetched, Reset, AwaitingInput),
    (FetchingRepos, Reset, AwaitingInput),
    (Displayed, Reset, AwaitingInput),
    (ErrorDisplayed, Reset, AwaitingInput),
];

/// Table lookup over `TRANSITIONS`.
pub struct UserReducer;

impl Reducer for UserReducer {
    type State = FetchState;
    type Intent = UserIntent;

    fn reduce(state: &FetchState, intent: UserIntent) -> Step<FetchState> {
        TRANSITIONS
            .iter()
            .find(|(from, on, _)| from == state && *on == intent)
            .map(|(_, _, to)| Step::Next(*to))
            .unwrap_or(Step::Reset)
    }
}

//! State for the two-stage user fetch.

use crate::fsm::MachineState;

/// User fetch lifecycle.
///
/// Transitions form a DAG: once a state is left it is only re-entered
/// via a full reset to `AwaitingInput`. `UserFetched` is transient —
/// the controller passes through it and immediately advances to
/// `FetchingRepos`, so it is never a steady observable state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchState {
    /// Waiting for a username.
    AwaitingInput,
    /// Profile request in flight.
    FetchingUser,
    /// Profile stored; about to issue the repos request.
    UserFetched,
    /// Repository-list request in flight.
    FetchingRepos,
    /// Profile and repos available. Terminal until reset.
    Displayed,
    /// A fetch failed or was cancelled. Terminal until reset.
    ErrorDisplayed,
}

impl Default for FetchState {
    fn default() -> Self {
        FetchState::AwaitingInput
    }
}

impl MachineState for FetchState {}

impl FetchState {
    /// True for the two states that may own an in-flight operation.
    pub fn in_flight(&self) -> bool {
        matches!(self, Self::FetchingUser | Self::FetchingRepos)
    }

    /// True for states with no outgoing edge except an explicit reset.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Displayed | Self::ErrorDisplayed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_awaits_input() {
        assert_eq!(FetchState::default(), FetchState::AwaitingInput);
    }

    #[test]
    fn in_flight_only_while_fetching() {
        assert!(FetchState::FetchingUser.in_flight());
        assert!(FetchState::FetchingRepos.in_flight());
        assert!(!FetchState::AwaitingInput.in_flight());
        assert!(!FetchState::UserFetched.in_flight());
        assert!(!FetchState::Displayed.in_flight());
        assert!(!FetchState::ErrorDisplayed.in_flight());
    }

    #[test]
    fn terminal_states() {
        assert!(FetchState::Displayed.is_terminal());
        assert!(FetchState::ErrorDisplayed.is_terminal());
        assert!(!FetchState::FetchingUser.is_terminal());
    }
}

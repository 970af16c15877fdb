//! Reducer trait and transition outcomes.

use super::intent::Intent;
use super::state::MachineState;

/// Outcome of reducing an intent against the current state.
#[derive(Debug, Clone, PartialEq)]
pub enum Step<S> {
    /// Legal transition into the given state.
    Next(S),
    /// The intent is ignored in this state (idempotent no-op).
    Stay,
    /// Protocol violation; the controller must force-reset to its
    /// initial state rather than fail loudly.
    Reset,
}

/// Reducer decides what a (state, intent) pair means.
///
/// The reducer is the only place where the transition graph lives.
/// It must be a pure function: (&State, Intent) -> Step<State>
pub trait Reducer {
    /// The state type this reducer operates on.
    type State: MachineState;

    /// The intent type this reducer handles.
    type Intent: Intent;

    /// Reduce an intent, returning the transition outcome.
    ///
    /// This should be a pure function with no side effects.
    fn reduce(state: &Self::State, intent: Self::Intent) -> Step<Self::State>;
}

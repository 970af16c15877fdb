//! Owned handle over the single in-flight network operation.
//!
//! Each controller owns exactly one `Flight`. Starting a new operation
//! goes through `begin`, which aborts whatever was in flight before a
//! successor id is handed out, so two live operations for one owner
//! can never coexist.

use tokio::task::JoinHandle;

/// Identity of one issued operation, compared by completions to detect
/// staleness. Ids are unique per `Flight` for the life of the owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlightId(pub(crate) u64);

#[derive(Debug, Default)]
pub struct Flight {
    current: Option<(FlightId, JoinHandle<()>)>,
    next: u64,
}

impl Flight {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cancel-and-replace: abort any live operation and allocate the id
    /// for its successor. The successor is not live until `attach`.
    pub fn begin(&mut self) -> FlightId {
        self.cancel();
        let id = FlightId(self.next);
        self.next += 1;
        id
    }

    /// Register the spawned task for the id handed out by `begin`.
    pub fn attach(&mut self, id: FlightId, handle: JoinHandle<()>) {
        debug_assert!(self.current.is_none(), "attach over a live flight");
        self.current = Some((id, handle));
    }

    /// Stale guard: does `id` name the operation currently in flight?
    pub fn matches(&self, id: FlightId) -> bool {
        matches!(self.current, Some((current, _)) if current == id)
    }

    /// Retire a naturally completed operation. No-op if `id` is stale.
    pub fn finish(&mut self, id: FlightId) {
        if self.matches(id) {
            self.current = None;
        }
    }

    /// Abort and discard the live operation, if any.
    pub fn cancel(&mut self) {
        if let Some((_, handle)) = self.current.take() {
            handle.abort();
        }
    }

    pub fn in_flight(&self) -> bool {
        self.current.is_some()
    }
}

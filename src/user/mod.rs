//! Two-stage user fetch: profile, then the dependent repository list.
//!
//! `UserFetchController` owns at most one in-flight network operation
//! at a time. A new fetch (or a reset) aborts and discards the previous
//! operation before issuing its own; completions that arrive for a
//! superseded operation are dropped by the stale guard. All transitions
//! go through the `UserReducer` table and are published on a watch
//! channel as `UserSnapshot`s.

mod intent;
mod reducer;
mod state;

pub use intent::UserIntent;
pub use reducer::UserReducer;
pub use state::FetchState;

use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::watch;

use crate::decode;
use crate::error::FetchError;
use crate::fsm::{Reducer, Step};
use crate::github::{Endpoints, UserProfile, UserRepo};
use crate::transport::{Flight, FlightId, RawResponse, SharedTransport};

/// Everything an observer needs, published on every transition and
/// readable synchronously at any time.
#[derive(Debug, Clone, Default)]
pub struct UserSnapshot {
    pub state: FetchState,
    pub username: Option<String>,
    pub profile: Option<UserProfile>,
    pub repos: Option<Vec<UserRepo>>,
    /// `None` means no error; overwritten on every new attempt.
    pub error: Option<FetchError>,
}

/// Cloneable handle over the single-owner controller core.
#[derive(Clone)]
pub struct UserFetchController {
    shared: Arc<Shared>,
}

struct Shared {
    inner: Mutex<Inner>,
    tx: watch::Sender<UserSnapshot>,
    transport: SharedTransport,
    endpoints: Endpoints,
}

#[derive(Default)]
struct Inner {
    state: FetchState,
    username: Option<String>,
    profile: Option<UserProfile>,
    repos: Option<Vec<UserRepo>>,
    error: Option<FetchError>,
    flight: Flight,
}

impl Inner {
    /// Cancel the in-flight operation and drop all fetched data.
    fn clear(&mut self) {
        self.flight.cancel();
        self.username = None;
        self.profile = None;
        self.repos = None;
        self.error = None;
    }
}

impl UserFetchController {
    pub fn new(transport: SharedTransport, endpoints: Endpoints) -> Self {
        let (tx, _rx) = watch::channel(UserSnapshot::default());
        Self {
            shared: Arc::new(Shared {
                inner: Mutex::new(Inner::default()),
                tx,
                transport,
                endpoints,
            }),
        }
    }

    /// Return to `AwaitingInput`. With `reset`, also cancel any
    /// in-flight operation and drop profile, repos, and error.
    /// Legal from any state.
    pub fn request_username(&self, reset: bool) {
        let mut inner = self.shared.inner.lock();
        if reset {
            inner.clear();
        } else {
            // AwaitingInput may not own an in-flight operation.
            inner.flight.cancel();
        }
        if let Step::Next(next) = UserReducer::reduce(&inner.state, UserIntent::Reset) {
            inner.state = next;
        }
        self.publish(&inner);
    }

    /// Start the two-stage pipeline for `username`.
    ///
    /// Legal only from `AwaitingInput`; anywhere else is a protocol
    /// violation and the controller self-heals by force-resetting.
    /// An empty username or an uncomposable URL fails without issuing
    /// a network operation.
    pub fn begin_fetch(&self, username: &str) {
        let mut inner = self.shared.inner.lock();
        match UserReducer::reduce(&inner.state, UserIntent::BeginFetch) {
            Step::Next(next) => {
                inner.username = Some(username.to_string());
                inner.error = None;
                inner.state = next;
                self.issue_profile_fetch(&mut inner);
            }
            _ => {
                tracing::warn!(state = ?inner.state, "begin_fetch outside AwaitingInput, force-resetting");
                self.force_reset(&mut inner);
            }
        }
    }

    /// Cancel an in-flight fetch: abort the operation, record
    /// `Cancelled`, and land in `ErrorDisplayed`. From any state
    /// without a fetch in flight this is a violation and force-resets.
    pub fn cancel(&self) {
        let mut inner = self.shared.inner.lock();
        match UserReducer::reduce(&inner.state, UserIntent::Cancel) {
            Step::Next(next) => {
                inner.flight.cancel();
                inner.error = Some(FetchError::Cancelled);
                inner.state = next;
                self.publish(&inner);
            }
            _ => {
                tracing::warn!(state = ?inner.state, "cancel with no fetch in flight, force-resetting");
                self.force_reset(&mut inner);
            }
        }
    }

    /// Current snapshot, read synchronously.
    pub fn snapshot(&self) -> UserSnapshot {
        self.shared.tx.borrow().clone()
    }

    /// Receiver that observes every published transition.
    pub fn subscribe(&self) -> watch::Receiver<UserSnapshot> {
        self.shared.tx.subscribe()
    }

    /// Wait until the controller reaches `Displayed` or
    /// `ErrorDisplayed` and return that snapshot.
    pub async fn finished(&self) -> UserSnapshot {
        let mut rx = self.subscribe();
        loop {
            {
                let snap = rx.borrow_and_update();
                if snap.state.is_terminal() {
                    return snap.clone();
                }
            }
            if rx.changed().await.is_err() {
                return self.snapshot();
            }
        }
    }

    fn issue_profile_fetch(&self, inner: &mut Inner) {
        let username = inner.username.clone().unwrap_or_default();
        let url = match self.shared.endpoints.user_url(&username) {
            Ok(url) => url,
            Err(err) => {
                self.fail(inner, err);
                return;
            }
        };
        tracing::debug!(%url, "issuing profile fetch");
        let id = inner.flight.begin();
        let this = self.clone();
        let handle = tokio::spawn(async move {
            let result = this.shared.transport.issue(url).await;
            this.complete_profile(id, result);
        });
        inner.flight.attach(id, handle);
        self.publish(inner);
    }

    fn issue_repos_fetch(&self, inner: &mut Inner) {
        let username = inner.username.clone().unwrap_or_default();
        let url = match self.shared.endpoints.repos_url(&username) {
            Ok(url) => url,
            Err(err) => {
                self.fail(inner, err);
                return;
            }
        };
        tracing::debug!(%url, "issuing repos fetch");
        let id = inner.flight.begin();
        let this = self.clone();
        let handle = tokio::spawn(async move {
            let result = this.shared.transport.issue(url).await;
            this.complete_repos(id, result);
        });
        inner.flight.attach(id, handle);
        self.publish(inner);
    }

    /// Completion of the profile stage. Accepted only while the
    /// controller is still in `FetchingUser` AND `id` names the live
    /// operation; anything else is stale and discarded.
    fn complete_profile(&self, id: FlightId, result: Result<RawResponse, FetchError>) {
        let mut inner = self.shared.inner.lock();
        if inner.state != FetchState::FetchingUser || !inner.flight.matches(id) {
            tracing::debug!(state = ?inner.state, "discarding stale profile completion");
            return;
        }
        inner.flight.finish(id);

        match result.and_then(|resp| decode::json::<UserProfile>(resp.status, &resp.body)) {
            Ok(profile) => {
                inner.profile = Some(profile);
                self.apply(&mut inner, UserIntent::ProfileReceived);
                // Mandatory auto-advance: UserFetched is transient.
                if let Step::Next(next) =
                    UserReducer::reduce(&inner.state, UserIntent::AdvanceToRepos)
                {
                    inner.state = next;
                    self.issue_repos_fetch(&mut inner);
                }
            }
            Err(err) => self.fail(&mut inner, err),
        }
    }

    /// Completion of the repos stage, guarded like `complete_profile`.
    fn complete_repos(&self, id: FlightId, result: Result<RawResponse, FetchError>) {
        let mut inner = self.shared.inner.lock();
        if inner.state != FetchState::FetchingRepos || !inner.flight.matches(id) {
            tracing::debug!(state = ?inner.state, "discarding stale repos completion");
            return;
        }
        inner.flight.finish(id);

        match result.and_then(|resp| decode::json::<Vec<UserRepo>>(resp.status, &resp.body)) {
            Ok(repos) => {
                inner.repos = Some(repos);
                self.apply(&mut inner, UserIntent::ReposReceived);
            }
            Err(err) => self.fail(&mut inner, err),
        }
    }

    fn apply(&self, inner: &mut Inner, intent: UserIntent) {
        match UserReducer::reduce(&inner.state, intent) {
            Step::Next(next) => {
                inner.state = next;
                self.publish(inner);
            }
            Step::Stay => {}
            Step::Reset => self.force_reset(inner),
        }
    }

    fn fail(&self, inner: &mut Inner, err: FetchError) {
        // The handle is cleared before ErrorDisplayed is entered.
        inner.flight.cancel();
        tracing::info!(error = %err, "fetch failed");
        inner.error = Some(err);
        self.apply(inner, UserIntent::Fail);
    }

    fn force_reset(&self, inner: &mut Inner) {
        inner.clear();
        inner.state = FetchState::AwaitingInput;
        self.publish(inner);
    }

    fn publish(&self, inner: &Inner) {
        // A live flight exists iff the state says a fetch is running.
        debug_assert_eq!(inner.state.in_flight(), inner.flight.in_flight());
        self.shared.tx.send_replace(UserSnapshot {
            state: inner.state,
            username: inner.username.clone(),
            profile: inner.profile.clone(),
            repos: inner.repos.clone(),
            error: inner.error.clone(),
        });
    }
}

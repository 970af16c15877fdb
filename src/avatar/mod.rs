//! One-stage avatar fetch into a four-state lifecycle.
//!
//! Many `AvatarLoader` instances can be live at once, one per rendered
//! avatar; instances are fully independent. Beyond the real URL-backed
//! loader there are synthetic constructors that never perform I/O, so
//! a presentation layer can render every visual state deterministically.

mod intent;
mod reducer;
mod state;

pub use intent::AvatarIntent;
pub use reducer::AvatarReducer;
pub use state::AvatarState;

use std::sync::Arc;

use image::DynamicImage;
use parking_lot::Mutex;
use reqwest::Url;
use tokio::sync::watch;

use crate::decode;
use crate::error::FetchError;
use crate::fsm::{Reducer, Step};
use crate::transport::{Flight, FlightId, RawResponse, SharedTransport};

#[derive(Clone)]
pub struct AvatarLoader {
    shared: Arc<Shared>,
}

struct Shared {
    inner: Mutex<Inner>,
    tx: watch::Sender<AvatarState>,
    source: Source,
}

enum Source {
    Remote {
        transport: SharedTransport,
        url: String,
    },
    /// Fixed-state loader; `start()` never issues a network call.
    Synthetic,
}

struct Inner {
    state: AvatarState,
    flight: Flight,
}

impl AvatarLoader {
    /// Real loader for an avatar URL; starts in `Idle` and fetches on
    /// the first `start()`.
    pub fn from_url(transport: SharedTransport, url: impl Into<String>) -> Self {
        Self::build(
            AvatarState::Idle,
            Source::Remote {
                transport,
                url: url.into(),
            },
        )
    }

    /// Synthetic loader pinned to `state`. Observationally identical to
    /// the real loader in that state, except `start()` does nothing.
    pub fn fixed(state: AvatarState) -> Self {
        Self::build(state, Source::Synthetic)
    }

    /// Synthetic loader already carrying a decoded payload.
    pub fn preloaded(image: DynamicImage) -> Self {
        Self::fixed(AvatarState::Loaded(Arc::new(image)))
    }

    fn build(state: AvatarState, source: Source) -> Self {
        let (tx, _rx) = watch::channel(state.clone());
        Self {
            shared: Arc::new(Shared {
                inner: Mutex::new(Inner {
                    state,
                    flight: Flight::new(),
                }),
                tx,
                source,
            }),
        }
    }

    /// Begin loading. Legal only from `Idle`; from any other state,
    /// and always on synthetic loaders, this is an idempotent no-op.
    pub fn start(&self) {
        let Source::Remote { transport, url } = &self.shared.source else {
            return;
        };
        let mut inner = self.shared.inner.lock();
        match AvatarReducer::reduce(&inner.state, AvatarIntent::Start) {
            Step::Next(next) => {
                inner.state = next;
                self.publish(&inner);
            }
            _ => return,
        }

        match Url::parse(url) {
            Ok(target) => {
                let id = inner.flight.begin();
                let this = self.clone();
                let transport = Arc::clone(transport);
                let handle = tokio::spawn(async move {
                    let result = transport.issue(target).await;
                    this.complete(id, result);
                });
                inner.flight.attach(id, handle);
            }
            Err(_) => {
                tracing::warn!(url = %url, "avatar url is malformed");
                self.apply(&mut inner, AvatarIntent::Failed);
            }
        }
    }

    /// Current state, read synchronously.
    pub fn state(&self) -> AvatarState {
        self.shared.tx.borrow().clone()
    }

    /// Receiver that observes every published transition.
    pub fn subscribe(&self) -> watch::Receiver<AvatarState> {
        self.shared.tx.subscribe()
    }

    /// Wait until the loader reaches `Loaded` or `Failed`.
    pub async fn finished(&self) -> AvatarState {
        let mut rx = self.subscribe();
        loop {
            {
                let state = rx.borrow_and_update();
                if state.is_terminal() {
                    return state.clone();
                }
            }
            if rx.changed().await.is_err() {
                return self.state();
            }
        }
    }

    /// Stale-guarded completion: applied only while still `Loading`
    /// AND `id` names the live operation.
    fn complete(&self, id: FlightId, result: Result<RawResponse, FetchError>) {
        let mut inner = self.shared.inner.lock();
        if inner.state != AvatarState::Loading || !inner.flight.matches(id) {
            tracing::debug!("discarding stale avatar completion");
            return;
        }
        inner.flight.finish(id);

        match result.and_then(|resp| decode::image(resp.status, &resp.body)) {
            Ok(image) => self.apply(&mut inner, AvatarIntent::Completed(Arc::new(image))),
            Err(err) => {
                // The cause is not part of the observable state; log it.
                tracing::warn!(error = %err, "avatar fetch failed");
                self.apply(&mut inner, AvatarIntent::Failed);
            }
        }
    }

    fn apply(&self, inner: &mut Inner, intent: AvatarIntent) {
        if let Step::Next(next) = AvatarReducer::reduce(&inner.state, intent) {
            inner.state = next;
            self.publish(inner);
        }
    }

    fn publish(&self, inner: &Inner) {
        // Only a Loading loader may own a live operation.
        debug_assert!(!inner.flight.in_flight() || inner.state == AvatarState::Loading);
        self.shared.tx.send_replace(inner.state.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::{Transport, TransportFuture};
    use bytes::Bytes;
    use std::io::Cursor;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn png_bytes() -> Bytes {
        let mut buf = Vec::new();
        DynamicImage::new_rgba8(2, 2)
            .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
            .unwrap();
        Bytes::from(buf)
    }

    /// Serves one canned response to every request, counting issues;
    /// `None` hangs forever.
    struct CountingTransport {
        response: Option<Result<RawResponse, FetchError>>,
        issued: AtomicUsize,
    }

    impl CountingTransport {
        fn new(response: Option<Result<RawResponse, FetchError>>) -> Arc<Self> {
            Arc::new(Self {
                response,
                issued: AtomicUsize::new(0),
            })
        }

        fn issued(&self) -> usize {
            self.issued.load(Ordering::SeqCst)
        }
    }

    impl Transport for CountingTransport {
        fn issue(&self, _url: Url) -> TransportFuture {
            self.issued.fetch_add(1, Ordering::SeqCst);
            let response = self.response.clone();
            Box::pin(async move {
                match response {
                    Some(result) => result,
                    None => std::future::pending().await,
                }
            })
        }
    }

    const URL: &str = "https://example.com/a.png";

    #[tokio::test]
    async fn fetches_and_decodes_into_loaded() {
        let transport = CountingTransport::new(Some(Ok(RawResponse {
            status: 200,
            body: png_bytes(),
        })));
        let loader = AvatarLoader::from_url(transport, URL);

        assert_eq!(loader.state(), AvatarState::Idle);
        loader.start();
        let state = loader.finished().await;
        let image = state.image().expect("payload");
        assert_eq!(image.width(), 2);
    }

    #[tokio::test]
    async fn double_start_issues_exactly_one_operation() {
        let transport = CountingTransport::new(None);
        let loader = AvatarLoader::from_url(Arc::clone(&transport) as SharedTransport, URL);

        loader.start();
        loader.start();
        assert_eq!(loader.state(), AvatarState::Loading);
        assert_eq!(transport.issued(), 1);
    }

    #[tokio::test]
    async fn bad_status_fails() {
        let transport = CountingTransport::new(Some(Ok(RawResponse {
            status: 404,
            body: png_bytes(),
        })));
        let loader = AvatarLoader::from_url(transport, URL);

        loader.start();
        assert_eq!(loader.finished().await, AvatarState::Failed);
    }

    #[tokio::test]
    async fn undecodable_payload_fails() {
        let transport = CountingTransport::new(Some(Ok(RawResponse {
            status: 200,
            body: Bytes::from_static(b"not an image"),
        })));
        let loader = AvatarLoader::from_url(transport, URL);

        loader.start();
        assert_eq!(loader.finished().await, AvatarState::Failed);
    }

    #[tokio::test]
    async fn malformed_url_fails_without_network() {
        let transport = CountingTransport::new(None);
        let loader = AvatarLoader::from_url(Arc::clone(&transport) as SharedTransport, "does not exist");

        loader.start();
        assert_eq!(loader.state(), AvatarState::Failed);
        assert_eq!(transport.issued(), 0);
    }

    #[tokio::test]
    async fn stale_completion_is_ignored() {
        let transport = CountingTransport::new(None);
        let loader = AvatarLoader::from_url(transport, URL);

        loader.start();
        loader.complete(
            FlightId(999),
            Ok(RawResponse {
                status: 200,
                body: png_bytes(),
            }),
        );
        assert_eq!(loader.state(), AvatarState::Loading);
    }

    #[tokio::test]
    async fn synthetic_fixed_never_leaves_its_state() {
        for state in [AvatarState::Idle, AvatarState::Loading, AvatarState::Failed] {
            let loader = AvatarLoader::fixed(state.clone());
            loader.start();
            assert_eq!(loader.state(), state);
        }
    }

    #[tokio::test]
    async fn preloaded_carries_its_payload_and_ignores_start() {
        let loader = AvatarLoader::preloaded(DynamicImage::new_rgba8(3, 3));
        loader.start();
        let state = loader.state();
        assert_eq!(state.image().expect("payload").width(), 3);
    }

    #[tokio::test]
    async fn independent_loaders_do_not_interfere() {
        let ok = CountingTransport::new(Some(Ok(RawResponse {
            status: 200,
            body: png_bytes(),
        })));
        let bad = CountingTransport::new(Some(Ok(RawResponse {
            status: 500,
            body: Bytes::new(),
        })));
        let a = AvatarLoader::from_url(ok, URL);
        let b = AvatarLoader::from_url(bad, URL);

        a.start();
        b.start();
        assert!(a.finished().await.image().is_some());
        assert_eq!(b.finished().await, AvatarState::Failed);
    }
}

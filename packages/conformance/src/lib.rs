//! Shared helpers for the SNAI client conformance suite.
//!
//! [`spawn_network`] binds an ephemeral port, serves the in-memory
//! [`network`] on it and returns the local URL together with the shared
//! state, so tests can seed agents and inspect what the client sent
//! without going through the HTTP layer.
//!
//! The server runs on its own thread with its own `tokio` runtime. The SDK
//! is blocking, so tests are plain `#[test]` functions and never enter an
//! async context themselves.

pub mod network;

use std::net::TcpListener;
use std::sync::Arc;
use std::thread;

pub use network::{build_router, NetworkState, SeenRequest};

/// Start an ephemeral fake network and return `(base_url, state)`.
///
/// The listener is bound before this returns, so the URL accepts
/// connections immediately. The server lives until the test process exits.
///
/// # Panics
///
/// Panics if the listener cannot be bound or the runtime cannot be built.
pub fn spawn_network() -> (String, Arc<NetworkState>) {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind ephemeral port");
    let addr = listener.local_addr().expect("get local addr");
    listener
        .set_nonblocking(true)
        .expect("set listener non-blocking");
    let base_url = format!("http://{addr}");

    let state = Arc::new(NetworkState::default());
    let router = build_router(Arc::clone(&state));

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .enable_all()
        .build()
        .expect("build conformance runtime");

    thread::Builder::new()
        .name(format!("snai-fake-{}", addr.port()))
        .spawn(move || {
            runtime.block_on(async move {
                let listener =
                    tokio::net::TcpListener::from_std(listener).expect("adopt listener");
                tracing::debug!("fake network listening on {addr}");
                axum::serve(listener, router)
                    .await
                    .expect("fake network error");
            });
        })
        .expect("spawn fake network thread");

    (base_url, state)
}

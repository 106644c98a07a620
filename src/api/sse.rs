//! The `/events` stream handler.
//!
//! Subscribes the connection to the broadcaster and streams wire frames
//! until the client hangs up. The response body is built from the pure
//! framing function, so what goes over the wire is exactly what the frame
//! tests pin down.

use axum::{
    body::Body,
    extract::State,
    http::header,
    response::IntoResponse,
};
use futures_util::stream;
use std::convert::Infallible;
use tracing::info;

use crate::events::wire_frame;
use crate::graph::GraphApi;

use super::state::AppState;

/// `GET /events` — upgrade to a persistent event stream.
///
/// The subscription's first event is the synthetic `connected` frame; every
/// broadcast after that is forwarded until disconnect. Dropping the body
/// stream drops the subscription, which unregisters it.
pub async fn events_handler<G: GraphApi>(State(state): State<AppState<G>>) -> impl IntoResponse {
    let subscription = state.broadcaster().subscribe();
    info!(subscriber = subscription.id(), "event stream connected");

    let stream = stream::unfold(subscription, |mut subscription| async move {
        let event = subscription.recv().await?;
        Some((
            Ok::<_, Infallible>(wire_frame(&event)),
            subscription,
        ))
    });

    (
        [
            (header::CONTENT_TYPE, "text/event-stream"),
            (header::CACHE_CONTROL, "no-cache"),
        ],
        Body::from_stream(stream),
    )
}

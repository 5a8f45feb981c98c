// Server-sent event streaming of dashboard snapshots
use axum::response::sse::{Event, KeepAlive, Sse};
use futures::stream::Stream;
use std::sync::Arc;
use tokio::sync::watch;

use crate::domain::dashboard::DashboardSnapshot;

fn snapshot_event(snapshot: &DashboardSnapshot) -> Result<Event, axum::Error> {
    Event::default()
        .event("snapshot")
        .id(snapshot.revision.to_string())
        .json_data(snapshot)
}

/// Yields the current snapshot first, then one event per publish. Ends when
/// the publisher goes away.
pub fn snapshot_events(
    mut rx: watch::Receiver<Arc<DashboardSnapshot>>,
) -> impl Stream<Item = Result<Event, axum::Error>> {
    async_stream::stream! {
        let current = rx.borrow_and_update().clone();
        yield snapshot_event(&current);

        while rx.changed().await.is_ok() {
            let snapshot = rx.borrow_and_update().clone();
            tracing::debug!("Streaming snapshot revision {}", snapshot.revision);
            yield snapshot_event(&snapshot);
        }
    }
}

pub fn snapshot_sse(
    rx: watch::Receiver<Arc<DashboardSnapshot>>,
) -> Sse<impl Stream<Item = Result<Event, axum::Error>>> {
    Sse::new(snapshot_events(rx)).keep_alive(KeepAlive::default())
}

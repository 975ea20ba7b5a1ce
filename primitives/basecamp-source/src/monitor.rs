//! Polling loop over the activity feed.
//!
//! The monitor owns the [`Watermark`]. Every `interval` it fetches all events
//! newer than the watermark and pushes them, one at a time, onto an unbounded
//! channel. A failed fetch is pushed as an error and leaves the watermark
//! untouched, so the next cycle asks for the same window again.

use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;

use crate::error::FetchError;
use crate::model::Event;
use crate::pagination::{PageSource, fetch_events_since};
use crate::watermark::Watermark;

/// What the monitor emits: an event, or the reason a cycle was skipped.
pub type FeedItem = Result<Event, FetchError>;

pub struct EventMonitor<S> {
    source: S,
    account: u64,
    interval: Duration,
    watermark: Watermark,
}

impl<S: PageSource> EventMonitor<S> {
    pub fn new(source: S, account: u64, interval: Duration, since: DateTime<Utc>) -> Self {
        Self {
            source,
            account,
            interval,
            watermark: Watermark::new(since),
        }
    }

    pub fn watermark(&self) -> Watermark {
        self.watermark
    }

    /// Run one fetch cycle and forward its outcome to `tx`.
    ///
    /// Returns `false` once the receiving side has gone away.
    pub async fn poll_once(&mut self, tx: &UnboundedSender<FeedItem>) -> bool {
        let since = self.watermark.since();
        let events = match fetch_events_since(&self.source, self.account, since).await {
            Ok(events) => events,
            Err(err) => {
                tracing::debug!(
                    page = err.page,
                    discarded = err.fetched.len(),
                    %since,
                    "event fetch failed, watermark kept"
                );
                return tx.send(Err(err)).is_ok();
            }
        };

        tracing::debug!(count = events.len(), %since, "fetched events");

        for event in events {
            let created_at = event.created_at;
            if tx.send(Ok(event)).is_err() {
                return false;
            }
            if self.watermark.observe(created_at) {
                tracing::trace!(watermark = %created_at, "watermark advanced");
            }
        }
        true
    }

    /// Sleep, fetch, repeat. Stops only when the receiver is dropped.
    pub async fn run(mut self, tx: UnboundedSender<FeedItem>) {
        loop {
            tokio::time::sleep(self.interval).await;
            if tx.is_closed() || !self.poll_once(&tx).await {
                tracing::debug!("event receiver dropped, stopping monitor");
                return;
            }
        }
    }
}

/// Spawn a monitor for `account` starting at `since` and return its output.
pub fn monitor_events<S>(
    source: S,
    account: u64,
    interval: Duration,
    since: DateTime<Utc>,
) -> (UnboundedReceiver<FeedItem>, JoinHandle<()>)
where
    S: PageSource + 'static,
{
    let (tx, rx) = mpsc::unbounded_channel();
    let monitor = EventMonitor::new(source, account, interval, since);
    let handle = tokio::spawn(monitor.run(tx));
    (rx, handle)
}

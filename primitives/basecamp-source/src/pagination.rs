//! Walks the paginated events endpoint.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::{FetchError, Result};
use crate::model::Event;

/// Number of events Basecamp returns on a full page.
pub const PAGE_SIZE: usize = 50;

/// Anything that can serve one page of the activity feed.
#[async_trait]
pub trait PageSource: Send + Sync {
    /// Fetch page `page` (1-based) of the events created since `since`.
    async fn events_page(&self, account: u64, since: DateTime<Utc>, page: u32)
    -> Result<Vec<Event>>;
}

/// Fetch every event since `since`, in the order the API returns them.
///
/// Pages are requested while the previous page came back full; the first
/// short page ends the walk.
pub async fn fetch_events_since<S>(
    source: &S,
    account: u64,
    since: DateTime<Utc>,
) -> std::result::Result<Vec<Event>, FetchError>
where
    S: PageSource + ?Sized,
{
    let mut events = Vec::new();
    let mut page = 1;

    loop {
        let batch = match source.events_page(account, since, page).await {
            Ok(batch) => batch,
            Err(err) => {
                return Err(FetchError {
                    page,
                    fetched: events,
                    source: err,
                });
            }
        };

        let full = batch.len() == PAGE_SIZE;
        tracing::trace!(page, count = batch.len(), "fetched events page");
        events.extend(batch);

        if !full {
            return Ok(events);
        }
        page += 1;
    }
}

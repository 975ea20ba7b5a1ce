//! Basecamp Source - Activity Feed Poller
//!
//! Polls the Basecamp Classic events endpoint for an account and streams every
//! new event over a channel. The newest `created_at` seen so far acts as the
//! `since` watermark for the next poll.
//!
//! ```no_run
//! # async fn demo() -> Result<(), basecamp_source::FeedError> {
//! use basecamp_source::{BasecampClient, BasecampConfig, monitor_events};
//! use std::time::Duration;
//!
//! let config = BasecampConfig::new("relay", "secret".into());
//! let client = BasecampClient::new(config)?;
//! let (mut events, _task) =
//!     monitor_events(client, 999_999, Duration::from_secs(10), chrono::Utc::now());
//! while let Some(item) = events.recv().await {
//!     println!("{item:?}");
//! }
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod error;
pub mod model;
pub mod monitor;
pub mod pagination;
pub mod watermark;

pub use client::{BasecampClient, BasecampConfig};
pub use error::{FeedError, FetchError};
pub use model::{Bucket, Creator, Event, Project};
pub use monitor::{EventMonitor, FeedItem, monitor_events};
pub use pagination::{PAGE_SIZE, PageSource, fetch_events_since};
pub use watermark::Watermark;

//! Consumer side of the relay: one event at a time, in arrival order.

use basecamp_source::FeedItem;
use hipchat_sink::{ChatApi, Delivery, Dispatcher};
use tokio::sync::mpsc::UnboundedReceiver;

/// Deliver everything the monitor emits until its channel closes.
pub async fn relay<C: ChatApi>(
    mut events: UnboundedReceiver<FeedItem>,
    dispatcher: &Dispatcher<C>,
) {
    while let Some(item) = events.recv().await {
        handle_item(dispatcher, item).await;
    }
}

async fn handle_item<C: ChatApi>(dispatcher: &Dispatcher<C>, item: FeedItem) {
    let event = match item {
        Ok(event) => event,
        Err(err) => {
            tracing::warn!(error = %err, "skipping poll cycle");
            return;
        }
    };

    match dispatcher.deliver(&event).await {
        Ok(Delivery::Posted { room, is_default }) => {
            tracing::debug!(
                event_id = event.id,
                project = %event.bucket.name,
                room = %room.name,
                is_default,
                "notification sent"
            );
        }
        Ok(Delivery::Unrouted) => {
            tracing::info!(project = %event.bucket.name, "cannot find a room for project");
        }
        Err(err) => {
            tracing::warn!(
                event_id = event.id,
                project = %event.bucket.name,
                error = %err,
                "failed to deliver notification"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use basecamp_source::{Bucket, Creator, Event, FeedError, FetchError};
    use chrono::Utc;
    use hipchat_sink::{ChatError, MessageRequest, Room};
    use std::sync::Mutex;
    use tokio::sync::mpsc;

    fn event(id: u64, project: &str) -> Event {
        let now = Utc::now();
        Event {
            id,
            action: "created".into(),
            summary: format!("created item {id}"),
            created_at: now,
            updated_at: now,
            bucket: Bucket {
                name: project.into(),
                app_url: String::new(),
            },
            html_url: String::new(),
            excerpt: String::new(),
            creator: Creator {
                name: "Ada".into(),
            },
        }
    }

    fn fetch_error() -> FetchError {
        let decode = serde_json::from_str::<Vec<Event>>("not json").unwrap_err();
        FetchError {
            page: 1,
            fetched: Vec::new(),
            source: FeedError::Decode(decode),
        }
    }

    /// Rejects the post whose body is `reject_message`, records the rest.
    struct FlakyChat {
        rooms: Vec<Room>,
        reject_message: Option<String>,
        posted: Mutex<Vec<MessageRequest>>,
    }

    #[async_trait]
    impl ChatApi for FlakyChat {
        async fn list_rooms(&self) -> hipchat_sink::error::Result<Vec<Room>> {
            Ok(self.rooms.clone())
        }

        async fn post_message(&self, request: &MessageRequest) -> hipchat_sink::error::Result<()> {
            if self.reject_message.as_deref() == Some(request.message.as_str()) {
                return Err(ChatError::Api {
                    code: 400,
                    kind: "Bad Request".into(),
                    message: "rejected".into(),
                });
            }
            self.posted.lock().unwrap().push(request.clone());
            Ok(())
        }
    }

    fn chat(reject_message: Option<String>) -> FlakyChat {
        FlakyChat {
            rooms: vec![
                Room {
                    id: 1,
                    name: "Web".into(),
                    topic: String::new(),
                },
                Room {
                    id: 2,
                    name: "Ops".into(),
                    topic: String::new(),
                },
            ],
            reject_message,
            posted: Mutex::new(Vec::new()),
        }
    }

    #[tokio::test]
    async fn delivers_in_emission_order_and_skips_errors() {
        let dispatcher = Dispatcher::new(chat(None));
        let (tx, rx) = mpsc::unbounded_channel();
        tx.send(Ok(event(1, "Web"))).unwrap();
        tx.send(Err(fetch_error())).unwrap();
        tx.send(Ok(event(2, "Payroll"))).unwrap();
        tx.send(Ok(event(3, "Ops"))).unwrap();
        drop(tx);

        relay(rx, &dispatcher).await;

        let posted = dispatcher_posts(&dispatcher);
        let rooms: Vec<&str> = posted.iter().map(|r| r.room_id.as_str()).collect();
        assert_eq!(rooms, vec!["1", "2"]);
    }

    #[tokio::test]
    async fn failed_post_does_not_stop_the_relay() {
        let first = event(1, "Web");
        let rejected = hipchat_sink::format_message(&first, false);
        let dispatcher = Dispatcher::new(chat(Some(rejected)));
        let (tx, rx) = mpsc::unbounded_channel();
        tx.send(Ok(first)).unwrap();
        tx.send(Ok(event(2, "Ops"))).unwrap();
        drop(tx);

        relay(rx, &dispatcher).await;

        let posted = dispatcher_posts(&dispatcher);
        assert_eq!(posted.len(), 1);
        assert_eq!(posted[0].room_id, "2");
    }

    fn dispatcher_posts(dispatcher: &Dispatcher<FlakyChat>) -> Vec<MessageRequest> {
        dispatcher.chat().posted.lock().unwrap().clone()
    }
}

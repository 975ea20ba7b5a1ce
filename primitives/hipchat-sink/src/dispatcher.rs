//! Turns Basecamp events into HipChat room notifications.

use basecamp_source::Event;

use crate::client::ChatApi;
use crate::error::Result;
use crate::matcher::select_room;
use crate::model::{Color, MessageFormat, MessageRequest, Room};

/// What happened to an event handed to [`Dispatcher::deliver`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Delivery {
    /// Posted to `room`; `is_default` when that was the catch-all room.
    Posted { room: Room, is_default: bool },
    /// No room claims the project and there is no catch-all room.
    Unrouted,
}

/// HTML body for `event`.
///
/// Catch-all rooms mix projects, so there the body starts with a link to the
/// project.
pub fn format_message(event: &Event, is_default: bool) -> String {
    if is_default {
        format!(
            r#"<strong><a href="{}">{}</a>, <a href="{}">{}</a></strong><br/>{}"#,
            event.bucket.app_url, event.bucket.name, event.html_url, event.summary, event.excerpt
        )
    } else {
        format!(
            r#"<strong><a href="{}">{}</a></strong><br/>{}"#,
            event.html_url, event.summary, event.excerpt
        )
    }
}

/// Build the `rooms/message` request for `event` in `room`.
pub fn message_request(event: &Event, room: &Room, is_default: bool) -> MessageRequest {
    MessageRequest {
        room_id: room.id.to_string(),
        from: event.creator.name.clone(),
        message: format_message(event, is_default),
        color: Color::Purple,
        message_format: MessageFormat::Html,
        notify: true,
    }
}

pub struct Dispatcher<C> {
    chat: C,
}

impl<C: ChatApi> Dispatcher<C> {
    pub fn new(chat: C) -> Self {
        Self { chat }
    }

    pub fn chat(&self) -> &C {
        &self.chat
    }

    /// Post `event` to `room`.
    pub async fn post(&self, event: &Event, room: &Room, is_default: bool) -> Result<()> {
        let request = message_request(event, room, is_default);
        self.chat.post_message(&request).await
    }

    /// Route `event` by its project name and post it.
    ///
    /// The room list is fetched fresh on every call.
    pub async fn deliver(&self, event: &Event) -> Result<Delivery> {
        let rooms = self.chat.list_rooms().await?;

        let Some(choice) = select_room(&event.bucket.name, &rooms) else {
            return Ok(Delivery::Unrouted);
        };

        let room = choice.room();
        let is_default = choice.is_default();
        tracing::debug!(
            project = %event.bucket.name,
            room = %room.name,
            is_default,
            "routing event"
        );

        self.post(event, room, is_default).await?;
        Ok(Delivery::Posted {
            room: room.clone(),
            is_default,
        })
    }
}

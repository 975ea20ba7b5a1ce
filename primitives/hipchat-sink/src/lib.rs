//! HipChat Sink - Room Notification Poster
//!
//! Routes Basecamp events to HipChat rooms and posts them as HTML
//! notifications.
//!
//! A room receives a project's events when its name is the project name or
//! its topic mentions the project. A room whose topic contains `Basecamp:*`
//! is the catch-all for every project without a room of its own; messages
//! posted there are prefixed with a link to the project.

pub mod client;
pub mod dispatcher;
pub mod error;
pub mod matcher;
pub mod model;

pub use client::{ChatApi, HipchatClient};
pub use dispatcher::{Delivery, Dispatcher, format_message, message_request};
pub use error::ChatError;
pub use matcher::{CATCH_ALL_MARKER, RoomChoice, select_room};
pub use model::{Color, MessageFormat, MessageRequest, Room};

//! HipChat v1 records.

use serde::{Deserialize, Serialize};

/// A chat room as returned by `rooms/list`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Room {
    #[serde(rename = "room_id")]
    pub id: u64,
    pub name: String,
    #[serde(default, deserialize_with = "nullable")]
    pub topic: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RoomList {
    pub rooms: Vec<Room>,
}

/// Background color of a posted message.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    #[default]
    Yellow,
    Red,
    Green,
    Purple,
    Gray,
    Random,
}

/// How HipChat renders the `message` field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageFormat {
    #[default]
    Html,
    Text,
}

/// Form body of `rooms/message`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MessageRequest {
    pub room_id: String,
    pub from: String,
    pub message: String,
    pub color: Color,
    pub message_format: MessageFormat,
    #[serde(serialize_with = "flag")]
    pub notify: bool,
}

/// HipChat v1 expects booleans as `1`/`0`.
fn flag<S: serde::Serializer>(value: &bool, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_u8(u8::from(*value))
}

fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

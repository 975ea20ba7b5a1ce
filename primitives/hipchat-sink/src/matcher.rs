//! Picks the room a project's events go to.
//!
//! A room claims a project when its name equals the project name or its topic
//! mentions it. Rooms whose topic carries [`CATCH_ALL_MARKER`] receive events
//! of every project no other room claims.

use crate::model::Room;

/// Topic marker of the catch-all room.
pub const CATCH_ALL_MARKER: &str = "Basecamp:*";

/// Outcome of [`select_room`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoomChoice<'a> {
    /// A room dedicated to the project.
    Project(&'a Room),
    /// The catch-all room.
    CatchAll(&'a Room),
}

impl<'a> RoomChoice<'a> {
    pub fn room(&self) -> &'a Room {
        match self {
            RoomChoice::Project(room) | RoomChoice::CatchAll(room) => room,
        }
    }

    pub fn is_default(&self) -> bool {
        matches!(self, RoomChoice::CatchAll(_))
    }
}

/// Select the destination room for `project` in a single pass over `rooms`.
///
/// The first room claiming the project wins immediately. Otherwise the last
/// catch-all room seen is used. `None` when neither exists.
pub fn select_room<'a>(project: &str, rooms: &'a [Room]) -> Option<RoomChoice<'a>> {
    let mut catch_all = None;

    for room in rooms {
        if room.name == project || (!room.topic.is_empty() && room.topic.contains(project)) {
            return Some(RoomChoice::Project(room));
        }
        if room.topic.contains(CATCH_ALL_MARKER) {
            catch_all = Some(room);
        }
    }

    catch_all.map(RoomChoice::CatchAll)
}

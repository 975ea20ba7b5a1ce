//! Records returned by the Basecamp API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer};

/// One entry of the account activity feed.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Event {
    pub id: u64,
    #[serde(default, deserialize_with = "nullable")]
    pub action: String,
    #[serde(default, deserialize_with = "nullable")]
    pub summary: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default, deserialize_with = "nullable")]
    pub bucket: Bucket,
    #[serde(default, deserialize_with = "nullable")]
    pub html_url: String,
    #[serde(default, deserialize_with = "nullable")]
    pub excerpt: String,
    #[serde(default, deserialize_with = "nullable")]
    pub creator: Creator,
}

/// The project (or calendar) an event belongs to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Bucket {
    #[serde(default, deserialize_with = "nullable")]
    pub name: String,
    #[serde(default, deserialize_with = "nullable")]
    pub app_url: String,
}

/// Person who triggered an event.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Creator {
    #[serde(default, deserialize_with = "nullable")]
    pub name: String,
}

/// Entry of the project listing.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Project {
    pub id: u64,
    #[serde(default, deserialize_with = "nullable")]
    pub name: String,
    #[serde(default, deserialize_with = "nullable")]
    pub description: String,
    #[serde(default)]
    pub archived: bool,
    #[serde(default)]
    pub starred: bool,
}

/// Treats an explicit JSON `null` like a missing field.
fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_feed_entry() {
        let raw = json!({
            "id": 1001,
            "action": "commented on",
            "summary": "commented on <span>Launch plan</span>",
            "created_at": "2014-03-24T11:00:50-05:00",
            "updated_at": "2014-03-24T11:05:00-05:00",
            "bucket": {
                "id": 605816632,
                "name": "Website redesign",
                "type": "Project",
                "app_url": "https://basecamp.com/999/projects/605816632"
            },
            "html_url": "https://basecamp.com/999/projects/605816632/messages/1",
            "excerpt": "Looks good to me",
            "creator": { "id": 149087659, "name": "Jason Fried" }
        });

        let event: Event = serde_json::from_value(raw).unwrap();
        assert_eq!(event.id, 1001);
        assert_eq!(event.bucket.name, "Website redesign");
        assert_eq!(event.creator.name, "Jason Fried");
        assert_eq!(event.created_at.to_rfc3339(), "2014-03-24T16:00:50+00:00");
    }

    #[test]
    fn null_strings_become_empty() {
        let raw = json!({
            "id": 7,
            "action": "created",
            "summary": "created a to-do",
            "created_at": "2014-03-24T11:00:50Z",
            "updated_at": "2014-03-24T11:00:50Z",
            "bucket": { "name": "Ops", "app_url": null },
            "html_url": "https://basecamp.com/999/todos/7",
            "excerpt": null,
            "creator": null
        });

        let event: Event = serde_json::from_value(raw).unwrap();
        assert_eq!(event.excerpt, "");
        assert_eq!(event.bucket.app_url, "");
        assert_eq!(event.creator, Creator::default());
    }

    #[test]
    fn decodes_project_listing() {
        let raw = json!([
            { "id": 1, "name": "Ops", "description": null, "archived": false, "starred": true },
            { "id": 2, "name": "Legacy" }
        ]);

        let projects: Vec<Project> = serde_json::from_value(raw).unwrap();
        assert_eq!(projects.len(), 2);
        assert!(projects[0].starred);
        assert_eq!(projects[0].description, "");
        assert!(!projects[1].archived);
    }
}

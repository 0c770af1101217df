//! Hackathon records as served by the backend.
//!
//! Records are opaque to the client: nothing is validated, every field
//! defaults to empty, and a batch always replaces the previous one wholesale.

use serde::{Deserialize, Deserializer, Serialize};

use crate::app_data::app_data;

/// A single hackathon listing
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Hackathon {
    /// Backend identifier; absent for results produced on the fly by search
    #[serde(alias = "ID", deserialize_with = "deserialize_id")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub title: String,
    /// Free-form display text, never parsed
    pub date: String,
    pub format: String,
    pub city: String,
    pub age_limit: String,
    pub link: String,
    pub status: String,
}

impl Hackathon {
    /// Whether the format text marks an online event
    pub fn is_online(&self) -> bool {
        self.format.contains(app_data().cards.online_marker.as_str())
    }

    /// Whether the backend has marked this event as over
    pub fn is_finished(&self) -> bool {
        self.status == app_data().cards.finished_status
    }

    /// Stable identity for the card at `index` in the current batch
    pub fn card_key(&self, index: usize) -> String {
        match self.id.as_deref() {
            Some(id) if !id.is_empty() => id.to_string(),
            _ => format!("ai-result-{}", index),
        }
    }
}

/// Accept string, numeric, or null identifiers
fn deserialize_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Number(u64),
    }

    Ok(Option::<RawId>::deserialize(deserializer)?.map(|raw| match raw {
        RawId::Text(s) => s,
        RawId::Number(n) => n.to_string(),
    }))
}

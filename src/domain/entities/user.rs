//! Account profile entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Profile of the signed-in account as returned by the service.
///
/// Documents may carry `_id`, `id` or both; `_id` wins when both are present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "WireProfile")]
pub struct UserProfile {
    id: String,
    #[serde(default)]
    name: String,
    email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    created_at: Option<DateTime<Utc>>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireProfile {
    #[serde(rename = "_id")]
    object_id: Option<String>,
    id: Option<String>,
    #[serde(default)]
    name: String,
    email: String,
    #[serde(default)]
    created_at: Option<DateTime<Utc>>,
}

impl TryFrom<WireProfile> for UserProfile {
    type Error = String;

    fn try_from(wire: WireProfile) -> Result<Self, Self::Error> {
        let id = wire
            .object_id
            .or(wire.id)
            .ok_or_else(|| "missing field `id`".to_string())?;

        Ok(Self {
            id,
            name: wire.name,
            email: wire.email,
            created_at: wire.created_at,
        })
    }
}

impl UserProfile {
    /// Creates new profile.
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            email: email.into(),
            created_at: None,
        }
    }

    /// Account id.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Display name as stored by the service.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Account email.
    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Account creation time, when the service sends it.
    #[must_use]
    pub const fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }

    /// Returns the name to greet the user with.
    #[must_use]
    pub fn display_name(&self) -> &str {
        if self.name.trim().is_empty() {
            &self.email
        } else {
            &self.name
        }
    }
}

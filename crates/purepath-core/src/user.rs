//! Nominal local identity.
//!
//! There is no authentication: the user record only carries a display name
//! for greetings and an id for the events log.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::events::Event;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default)]
    pub is_guest: bool,
}

impl User {
    pub fn guest() -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: "Guest".to_string(),
            email: None,
            is_guest: true,
        }
    }

    /// A named user. Blank names fall back to a guest identity.
    pub fn named(name: &str, email: Option<String>) -> Self {
        let name = name.trim();
        if name.is_empty() {
            return Self::guest();
        }
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            email: email.filter(|e| !e.trim().is_empty()),
            is_guest: false,
        }
    }

    pub fn signed_in_event(&self, at: DateTime<Utc>) -> Event {
        Event::UserSignedIn {
            user_id: self.id.clone(),
            name: self.name.clone(),
            is_guest: self.is_guest,
            at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn named_user_trims_and_keeps_email() {
        let user = User::named("  Sam ", Some("sam@example.com".into()));
        assert_eq!(user.name, "Sam");
        assert_eq!(user.email.as_deref(), Some("sam@example.com"));
        assert!(!user.is_guest);
    }

    #[test]
    fn blank_name_becomes_guest() {
        let user = User::named("   ", None);
        assert!(user.is_guest);
        assert_eq!(user.name, "Guest");
    }

    #[test]
    fn serializes_camel_case() {
        let user = User::guest();
        let json = serde_json::to_value(&user).unwrap();
        assert_eq!(json["isGuest"], true);
        assert!(json.get("email").is_none());
    }
}

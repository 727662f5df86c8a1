// toot - A command-line client for Mastodon
// Copyright (C) 2025 toot Contributors
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! User model representing a Mastodon account
//!
//! `User` deserializes directly from the REST API's account JSON, which is
//! how the raw lookup endpoint hands accounts back.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A Mastodon user/account
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier
    pub id: String,

    /// Username (without domain)
    pub username: String,

    /// Full account name (user@domain or user for local)
    pub acct: String,

    #[serde(default)]
    pub display_name: String,

    /// Profile bio (HTML)
    #[serde(default)]
    pub note: String,

    /// URL to the user's profile page
    #[serde(default)]
    pub url: String,

    #[serde(default)]
    pub avatar: String,

    /// Whether the account is locked (requires follow approval)
    #[serde(default)]
    pub locked: bool,

    #[serde(default)]
    pub bot: bool,

    pub created_at: DateTime<Utc>,

    #[serde(default)]
    pub statuses_count: u64,

    #[serde(default)]
    pub followers_count: u64,

    #[serde(default)]
    pub following_count: u64,
}

impl User {
    /// Name to show in headers, falling back to the username
    pub fn name(&self) -> &str {
        if self.display_name.trim().is_empty() {
            &self.username
        } else {
            &self.display_name
        }
    }
}

/// Relationship between the current user and another account
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Relationship {
    pub id: String,
    pub following: bool,
    pub requested: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_account_json() {
        let json = serde_json::json!({
            "id": "109",
            "username": "alice",
            "acct": "alice",
            "display_name": "",
            "url": "https://example.social/@alice",
            "created_at": "2024-03-01T00:00:00.000Z",
            "followers_count": 3,
            "emojis": [],
        });

        let user: User = serde_json::from_value(json).unwrap();
        assert_eq!(user.id, "109");
        assert_eq!(user.followers_count, 3);
        assert_eq!(user.name(), "alice");
        assert!(!user.bot);
    }
}

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

//! Account model for the logins toot keeps on disk

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A stored Mastodon login (for multi-account support)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredAccount {
    /// Unique identifier (local)
    pub id: String,

    /// Instance URL (e.g., "https://mastodon.social")
    pub instance_url: String,

    /// Username
    pub username: String,

    /// Full account name (user@host)
    pub acct: String,

    /// OAuth access token
    #[serde(skip_serializing, default)]
    pub access_token: String,

    /// When this account was added
    pub added_at: DateTime<Utc>,

    /// When this account was last used
    pub last_used_at: DateTime<Utc>,

    /// Whether this is the default/active account
    pub is_default: bool,
}

impl StoredAccount {
    /// Build a fresh record for a token obtained from `instance_url`
    pub fn new(instance_url: &str, username: &str, access_token: &str) -> Self {
        let now = Utc::now();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            instance_url: instance_url.to_string(),
            username: username.to_string(),
            acct: format!("{}@{}", username, instance_host(instance_url)),
            access_token: access_token.to_string(),
            added_at: now,
            last_used_at: now,
            is_default: false,
        }
    }
}

/// OAuth application registration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OAuthApp {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: String,
    pub instance_url: String,
}

/// OAuth authorization response with auth URL
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    /// URL to open in browser for authorization
    pub auth_url: String,
    /// State parameter for verification
    pub state: String,
}

/// Instance information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstanceInfo {
    pub url: String,
    pub title: String,
    pub description: String,
    pub version: String,
    pub user_count: Option<u64>,
    pub status_count: Option<u64>,
    pub domain_count: Option<u64>,
    /// Maximum post length
    pub max_toot_chars: Option<u32>,
    pub max_media_attachments: Option<u32>,
    pub languages: Vec<String>,
    /// Whether registration is open
    pub registrations: bool,
    pub approval_required: bool,
}

/// Host part of an instance URL: "https://example.social/" -> "example.social"
pub fn instance_host(instance_url: &str) -> &str {
    let without_scheme = instance_url
        .split_once("://")
        .map(|(_, rest)| rest)
        .unwrap_or(instance_url);
    without_scheme.split('/').next().unwrap_or(without_scheme)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn acct_includes_instance_host() {
        let account = StoredAccount::new("http://localhost:3000", "alice", "token");
        assert_eq!(account.acct, "alice@localhost:3000");
        assert!(!account.is_default);
    }

    #[test]
    fn token_is_not_serialized() {
        let account = StoredAccount::new("https://example.social", "bob", "secret");
        let json = serde_json::to_string(&account).unwrap();
        assert!(!json.contains("secret"));
    }

    #[test]
    fn host_of_bare_domain() {
        assert_eq!(instance_host("example.social"), "example.social");
        assert_eq!(instance_host("https://example.social/path"), "example.social");
    }
}

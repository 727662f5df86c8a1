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

//! Timeline model

use serde::{Deserialize, Serialize};

/// Type of timeline
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum TimelineType {
    /// Home timeline (own posts and posts from followed accounts)
    Home,
    /// Local timeline (posts from the instance)
    Local,
    /// Federated timeline (posts from all known instances)
    Federated,
    /// Posts from a specific account
    User { user_id: String },
    /// Posts with a specific hashtag
    Hashtag { tag: String, local: bool },
    /// Posts from members of a list
    List { list_id: String },
    /// Bookmarked posts
    Bookmarks,
}

impl TimelineType {
    /// Get a display name for this timeline type
    pub fn display_name(&self) -> String {
        match self {
            TimelineType::Home => "Home".to_string(),
            TimelineType::Local => "Local".to_string(),
            TimelineType::Federated => "Federated".to_string(),
            TimelineType::User { user_id } => format!("User: {}", user_id),
            TimelineType::Hashtag { tag, local: false } => format!("#{}", tag),
            TimelineType::Hashtag { tag, local: true } => format!("#{} (local)", tag),
            TimelineType::List { list_id } => format!("List: {}", list_id),
            TimelineType::Bookmarks => "Bookmarks".to_string(),
        }
    }
}

/// Request to fetch a timeline
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimelineRequest {
    pub timeline_type: TimelineType,
    /// Maximum number of posts to return
    pub limit: Option<u32>,
    /// Return posts older than this ID
    pub max_id: Option<String>,
    /// Return posts newer than this ID
    pub since_id: Option<String>,
    /// Return posts immediately newer than this ID
    pub min_id: Option<String>,
}

impl TimelineRequest {
    pub fn new(timeline_type: TimelineType, limit: Option<u32>) -> Self {
        Self {
            timeline_type,
            limit,
            max_id: None,
            since_id: None,
            min_id: None,
        }
    }
}

/// Response containing timeline posts
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimelineResponse {
    pub posts: Vec<super::Post>,
    /// ID of the newest post (for pagination)
    pub max_id: Option<String>,
    /// ID of the oldest post (for pagination)
    pub min_id: Option<String>,
    /// Whether there are more posts available
    pub has_more: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names() {
        assert_eq!(TimelineType::Home.display_name(), "Home");
        let tag = TimelineType::Hashtag { tag: "rust".into(), local: true };
        assert_eq!(tag.display_name(), "#rust (local)");
    }
}

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

//! Notification model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Post, User};

/// Type of notification
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum NotificationType {
    /// Someone mentioned you
    Mention,
    /// Someone boosted your post
    Reblog,
    /// Someone favorited your post
    Favourite,
    /// Someone followed you
    Follow,
    /// Someone requested to follow you
    FollowRequest,
    /// A poll you voted in has ended
    Poll,
    /// A post you interacted with was edited
    Update,
    #[serde(other)]
    Unknown,
}

impl NotificationType {
    /// Types hidden by the mentions-only view
    pub const NON_MENTIONS: [NotificationType; 5] = [
        NotificationType::Follow,
        NotificationType::Favourite,
        NotificationType::Reblog,
        NotificationType::Poll,
        NotificationType::FollowRequest,
    ];

    /// Text shown after the triggering account's name
    pub fn action(&self) -> &'static str {
        match self {
            NotificationType::Mention => "mentioned you",
            NotificationType::Reblog => "reblogged your status",
            NotificationType::Favourite => "favourited your status",
            NotificationType::Follow => "now follows you",
            NotificationType::FollowRequest => "requested to follow you",
            NotificationType::Poll => "voted in or created a poll that ended",
            NotificationType::Update => "edited a status you interacted with",
            NotificationType::Unknown => "sent you a notification",
        }
    }
}

/// A notification from Mastodon
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    pub id: String,

    #[serde(rename = "type")]
    pub notification_type: NotificationType,

    pub created_at: DateTime<Utc>,

    /// The account that triggered the notification
    pub account: User,

    /// The post associated with the notification (if any)
    pub status: Option<Post>,
}

/// Request for fetching notifications
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct NotificationRequest {
    /// Return results older than this ID
    pub max_id: Option<String>,
    /// Return results newer than this ID
    pub since_id: Option<String>,
    /// Return results immediately newer than this ID
    pub min_id: Option<String>,
    /// Maximum number of results to return (default 20)
    pub limit: Option<u32>,
    /// Exclude these notification types
    pub exclude_types: Vec<NotificationType>,
}

/// Response from fetching notifications
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationResponse {
    pub notifications: Vec<Notification>,
    /// ID of the newest notification (for pagination)
    pub max_id: Option<String>,
    /// ID of the oldest notification (for pagination)
    pub min_id: Option<String>,
    /// Whether there are more notifications to fetch
    pub has_more: bool,
}

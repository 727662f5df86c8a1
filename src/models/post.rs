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

//! Post model representing a Mastodon status/toot

use std::fmt;

use chrono::{DateTime, Utc};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use super::{MediaAttachment, User};

/// Visibility level for a post
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum Visibility {
    #[default]
    Public,
    Unlisted,
    Private,
    Direct,
}

impl Visibility {
    pub fn as_str(&self) -> &'static str {
        match self {
            Visibility::Public => "public",
            Visibility::Unlisted => "unlisted",
            Visibility::Private => "private",
            Visibility::Direct => "direct",
        }
    }
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A Mastodon post/status
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    /// Unique identifier for this post
    pub id: String,

    /// URI of the post (ActivityPub)
    pub uri: String,

    /// URL to the post's HTML representation
    pub url: Option<String>,

    /// The account that authored this post
    pub account: User,

    /// HTML content of the post
    pub content: String,

    /// Plain text rendering of `content`
    pub plain_content: String,

    /// Content warning text (empty when none)
    pub spoiler_text: String,

    pub visibility: Visibility,

    pub sensitive: bool,

    pub created_at: DateTime<Utc>,

    pub edited_at: Option<DateTime<Utc>>,

    /// Language of the post (ISO 639-1)
    pub language: Option<String>,

    /// ID of the post this is replying to
    pub in_reply_to_id: Option<String>,

    pub media_attachments: Vec<MediaAttachment>,

    /// Hashtags used in the post
    pub tags: Vec<Tag>,

    /// Accounts mentioned in the post
    pub mentions: Vec<Mention>,

    pub reblogs_count: u64,
    pub favourites_count: u64,
    pub replies_count: u64,

    /// The boosted post (if this is a boost)
    pub reblog: Option<Box<Post>>,

    pub reblogged: Option<bool>,
    pub favourited: Option<bool>,
    pub bookmarked: Option<bool>,
}

impl Post {
    /// The post whose content should be shown: the boosted post for boosts,
    /// otherwise the post itself.
    pub fn original(&self) -> &Post {
        self.reblog.as_deref().unwrap_or(self)
    }
}

/// A hashtag mentioned in a post
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tag {
    pub name: String,
    pub url: String,
}

/// An account mentioned in a post
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Mention {
    pub id: String,
    pub username: String,
    pub acct: String,
    pub url: String,
}

/// Request to create a new post
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewPost {
    pub content: String,
    pub spoiler_text: Option<String>,
    pub visibility: Visibility,
    pub sensitive: bool,
    pub language: Option<String>,
    pub in_reply_to_id: Option<String>,
    pub media_ids: Vec<String>,
}

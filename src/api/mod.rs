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

//! Mastodon API access
//!
//! Commands talk to the server through [`MastodonApi`]; [`MastodonClient`]
//! is the real implementation, backed by megalodon plus a small raw REST
//! client for the endpoints megalodon lacks.

mod client;
mod converter;
pub mod rest;

use anyhow::Result;
use async_trait::async_trait;

pub use client::{normalize_url, MastodonClient, REDIRECT_URI};
pub use rest::{Registration, RestClient, Token};

use crate::models::{
    InstanceInfo, MediaAttachment, MediaUploadRequest, NewPost, NotificationRequest,
    NotificationResponse, Post, Relationship, TimelineRequest, TimelineResponse, User, UserList,
};

/// Operations the command layer needs from a Mastodon server
#[async_trait]
pub trait MastodonApi: Send + Sync {
    /// The account the token belongs to
    async fn verify_credentials(&self) -> Result<User>;

    async fn get_timeline(&self, request: &TimelineRequest) -> Result<TimelineResponse>;

    async fn get_notifications(&self, request: &NotificationRequest) -> Result<NotificationResponse>;

    /// Dismiss every notification
    async fn clear_notifications(&self) -> Result<()>;

    async fn get_lists(&self) -> Result<Vec<UserList>>;

    async fn create_list(&self, title: &str) -> Result<UserList>;

    async fn add_accounts_to_list(&self, list_id: &str, account_ids: &[String]) -> Result<()>;

    async fn remove_accounts_from_list(&self, list_id: &str, account_ids: &[String]) -> Result<()>;

    /// Resolve `name`, `@name` or `name@domain` to an account
    async fn lookup_account(&self, acct: &str) -> Result<User>;

    async fn follow(&self, account_id: &str) -> Result<Relationship>;

    async fn unfollow(&self, account_id: &str) -> Result<Relationship>;

    async fn create_post(&self, new_post: &NewPost) -> Result<Post>;

    async fn bookmark(&self, post_id: &str) -> Result<Post>;

    async fn unbookmark(&self, post_id: &str) -> Result<Post>;

    async fn upload_media(&self, request: &MediaUploadRequest) -> Result<MediaAttachment>;

    async fn get_instance_info(&self) -> Result<InstanceInfo>;
}

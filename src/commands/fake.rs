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

//! In-memory [`MastodonApi`] for command tests

use std::collections::HashMap;
use std::sync::Mutex;

use anyhow::{anyhow, Result};
use async_trait::async_trait;

use crate::api::MastodonApi;
use crate::models::{
    InstanceInfo, MediaAttachment, MediaType, MediaUploadRequest, NewPost, Notification,
    NotificationRequest, NotificationResponse, Post, Relationship, TimelineRequest,
    TimelineResponse, TimelineType, User, UserList,
};
use crate::output::fixtures;

#[derive(Default)]
pub struct FakeApi {
    me: Option<User>,
    accounts: Vec<User>,
    timelines: HashMap<TimelineType, Vec<Post>>,
    notifications: Mutex<Vec<Notification>>,
    lists: Mutex<Vec<UserList>>,
    list_members: Mutex<HashMap<String, Vec<String>>>,
    timeline_requests: Mutex<Vec<TimelineRequest>>,
    notification_requests: Mutex<Vec<NotificationRequest>>,
    calls: Mutex<Vec<String>>,
}

impl FakeApi {
    pub fn with_me(mut self, me: User) -> Self {
        self.accounts.push(me.clone());
        self.me = Some(me);
        self
    }

    pub fn with_account(mut self, user: User) -> Self {
        self.accounts.push(user);
        self
    }

    pub fn with_timeline(mut self, timeline: TimelineType, posts: Vec<Post>) -> Self {
        self.timelines.insert(timeline, posts);
        self
    }

    pub fn with_list(self, id: &str, title: &str) -> Self {
        lock(&self.lists).push(UserList {
            id: id.to_string(),
            title: title.to_string(),
        });
        self
    }

    pub fn with_notifications(self, notifications: Vec<Notification>) -> Self {
        *lock(&self.notifications) = notifications;
        self
    }

    pub fn timeline_requests(&self) -> Vec<TimelineRequest> {
        lock(&self.timeline_requests).clone()
    }

    pub fn notification_requests(&self) -> Vec<NotificationRequest> {
        lock(&self.notification_requests).clone()
    }

    pub fn calls(&self) -> Vec<String> {
        lock(&self.calls).clone()
    }

    pub fn list_members(&self, list_id: &str) -> Vec<String> {
        lock(&self.list_members).get(list_id).cloned().unwrap_or_default()
    }

    fn record(&self, call: String) {
        lock(&self.calls).push(call);
    }

    fn status(&self, id: &str) -> Result<Post> {
        self.timelines
            .values()
            .flatten()
            .find(|post| post.id == id)
            .cloned()
            .ok_or_else(|| anyhow!("Server returned 404 Not Found: Record not found"))
    }
}

fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[async_trait]
impl MastodonApi for FakeApi {
    async fn verify_credentials(&self) -> Result<User> {
        self.me.clone().ok_or_else(|| anyhow!("The access token is invalid"))
    }

    async fn get_timeline(&self, request: &TimelineRequest) -> Result<TimelineResponse> {
        lock(&self.timeline_requests).push(request.clone());

        let mut posts = self.timelines.get(&request.timeline_type).cloned().unwrap_or_default();
        if let Some(limit) = request.limit {
            posts.truncate(limit as usize);
        }

        Ok(TimelineResponse {
            max_id: posts.first().map(|p| p.id.clone()),
            min_id: posts.last().map(|p| p.id.clone()),
            has_more: false,
            posts,
        })
    }

    async fn get_notifications(&self, request: &NotificationRequest) -> Result<NotificationResponse> {
        lock(&self.notification_requests).push(request.clone());

        let notifications: Vec<Notification> = lock(&self.notifications)
            .iter()
            .filter(|n| !request.exclude_types.contains(&n.notification_type))
            .cloned()
            .collect();

        Ok(NotificationResponse {
            max_id: notifications.first().map(|n| n.id.clone()),
            min_id: notifications.last().map(|n| n.id.clone()),
            has_more: false,
            notifications,
        })
    }

    async fn clear_notifications(&self) -> Result<()> {
        self.record("clear_notifications".to_string());
        lock(&self.notifications).clear();
        Ok(())
    }

    async fn get_lists(&self) -> Result<Vec<UserList>> {
        Ok(lock(&self.lists).clone())
    }

    async fn create_list(&self, title: &str) -> Result<UserList> {
        let mut lists = lock(&self.lists);
        let list = UserList {
            id: (lists.len() + 1).to_string(),
            title: title.to_string(),
        };
        lists.push(list.clone());
        Ok(list)
    }

    async fn add_accounts_to_list(&self, list_id: &str, account_ids: &[String]) -> Result<()> {
        lock(&self.list_members)
            .entry(list_id.to_string())
            .or_default()
            .extend(account_ids.iter().cloned());
        Ok(())
    }

    async fn remove_accounts_from_list(&self, list_id: &str, account_ids: &[String]) -> Result<()> {
        if let Some(members) = lock(&self.list_members).get_mut(list_id) {
            members.retain(|id| !account_ids.contains(id));
        }
        Ok(())
    }

    async fn lookup_account(&self, acct: &str) -> Result<User> {
        let acct = acct.trim_start_matches('@');
        self.accounts
            .iter()
            .find(|user| user.acct == acct || user.username == acct)
            .cloned()
            .ok_or_else(|| anyhow!("Server returned 404 Not Found: Record not found"))
    }

    async fn follow(&self, account_id: &str) -> Result<Relationship> {
        self.record(format!("follow:{}", account_id));
        Ok(Relationship {
            id: account_id.to_string(),
            following: true,
            requested: false,
        })
    }

    async fn unfollow(&self, account_id: &str) -> Result<Relationship> {
        self.record(format!("unfollow:{}", account_id));
        Ok(Relationship {
            id: account_id.to_string(),
            following: false,
            requested: false,
        })
    }

    async fn create_post(&self, new_post: &NewPost) -> Result<Post> {
        self.record(format!("post:{}", new_post.content));
        let author = self.me.clone().unwrap_or_else(|| fixtures::user("1", "me"));
        let mut post = fixtures::post("9000", &author, &new_post.content);
        post.visibility = new_post.visibility;
        post.url = Some("https://example.social/@me/9000".to_string());
        Ok(post)
    }

    async fn bookmark(&self, post_id: &str) -> Result<Post> {
        self.record(format!("bookmark:{}", post_id));
        let mut post = self.status(post_id)?;
        post.bookmarked = Some(true);
        Ok(post)
    }

    async fn unbookmark(&self, post_id: &str) -> Result<Post> {
        self.record(format!("unbookmark:{}", post_id));
        let mut post = self.status(post_id)?;
        post.bookmarked = Some(false);
        Ok(post)
    }

    async fn upload_media(&self, request: &MediaUploadRequest) -> Result<MediaAttachment> {
        let mut calls = lock(&self.calls);
        calls.push(format!("upload:{}", request.file_path));
        Ok(MediaAttachment {
            id: format!("m{}", calls.len()),
            media_type: MediaType::Image,
            url: format!("https://example.social/media/{}", calls.len()),
            preview_url: None,
            description: request.description.clone(),
        })
    }

    async fn get_instance_info(&self) -> Result<InstanceInfo> {
        Ok(InstanceInfo {
            url: "https://example.social".to_string(),
            title: "Example".to_string(),
            description: "An example instance".to_string(),
            version: "4.2.0".to_string(),
            user_count: Some(10),
            status_count: Some(100),
            domain_count: Some(5),
            max_toot_chars: Some(500),
            max_media_attachments: Some(4),
            languages: vec!["en".to_string()],
            registrations: true,
            approval_required: false,
        })
    }
}

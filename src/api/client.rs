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

//! Mastodon API client implementation

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use async_trait::async_trait;
use megalodon::{
    self, generator,
    megalodon::{
        AppInputOptions, GetBookmarksInputOptions, GetHomeTimelineInputOptions,
        GetListTimelineInputOptions, GetLocalTimelineInputOptions, GetNotificationsInputOptions,
        GetPublicTimelineInputOptions, GetTagTimelineInputOptions, PostStatusInputOptions,
        PostStatusOutput, UploadMediaInputOptions,
    },
    Megalodon, SNS,
};
use tracing::{debug, info};

use crate::models::{
    AuthResponse, InstanceInfo, MediaAttachment, MediaType, MediaUploadRequest, NewPost,
    Notification, NotificationRequest, NotificationResponse, OAuthApp, Post, Relationship,
    TimelineRequest, TimelineResponse, TimelineType, User, UserList,
};

use super::converter;
use super::rest::{RestClient, SCOPES};
use super::MastodonApi;

/// Application name for OAuth
const APP_NAME: &str = "toot";
/// Application website shown on the authorization page
const APP_WEBSITE: &str = "https://github.com/toot-cli/toot";
/// Redirect URI for out-of-band OAuth (the user pastes the code back)
pub const REDIRECT_URI: &str = "urn:ietf:wg:oauth:2.0:oob";
/// Page size when the caller does not ask for one
const DEFAULT_LIMIT: u32 = 20;

/// Mastodon API client
pub struct MastodonClient {
    client: Arc<Box<dyn Megalodon + Send + Sync>>,
    rest: RestClient,
    instance_url: String,
    access_token: Option<String>,
}

impl MastodonClient {
    /// Register toot as an OAuth application on the instance
    pub async fn register_app(instance_url: &str) -> Result<OAuthApp> {
        let instance_url = normalize_url(instance_url);
        info!("Registering application on {}", instance_url);

        let client = generator(SNS::Mastodon, instance_url.clone(), None, None)?;

        let app_data = client
            .register_app(
                APP_NAME.to_string(),
                &AppInputOptions {
                    redirect_uris: Some(REDIRECT_URI.to_string()),
                    scopes: Some(SCOPES.iter().map(|s| s.to_string()).collect()),
                    website: Some(APP_WEBSITE.to_string()),
                },
            )
            .await
            .context("Failed to register application")?;

        Ok(OAuthApp {
            client_id: app_data.client_id.clone(),
            client_secret: app_data.client_secret.clone(),
            redirect_uri: REDIRECT_URI.to_string(),
            instance_url,
        })
    }

    /// Build the URL the user opens to authorize toot
    pub fn authorization_url(app: &OAuthApp) -> AuthResponse {
        let state = uuid::Uuid::new_v4().to_string();
        let auth_url = format!(
            "{}/oauth/authorize?client_id={}&redirect_uri={}&response_type=code&scope={}&state={}",
            app.instance_url,
            urlencoding::encode(&app.client_id),
            urlencoding::encode(&app.redirect_uri),
            SCOPES.join("+"),
            state,
        );

        AuthResponse { auth_url, state }
    }

    /// Exchange an authorization code for a token and build an authenticated client
    pub async fn complete_auth(app: &OAuthApp, code: &str) -> Result<Self> {
        info!("Completing OAuth flow for {}", app.instance_url);

        let client = generator(SNS::Mastodon, app.instance_url.clone(), None, None)?;

        let token_data = client
            .fetch_access_token(
                app.client_id.clone(),
                app.client_secret.clone(),
                code.trim().to_string(),
                app.redirect_uri.clone(),
            )
            .await
            .context("Failed to fetch access token")?;

        info!("Access token obtained successfully");

        Self::from_token(&app.instance_url, &token_data.access_token)
    }

    /// Create a client from an existing access token
    pub fn from_token(instance_url: &str, access_token: &str) -> Result<Self> {
        let instance_url = normalize_url(instance_url);

        let client = generator(
            SNS::Mastodon,
            instance_url.clone(),
            Some(access_token.to_string()),
            None,
        )?;

        Ok(Self {
            client: Arc::new(client),
            rest: RestClient::new(&instance_url, Some(access_token)),
            instance_url,
            access_token: Some(access_token.to_string()),
        })
    }

    /// Create an unauthenticated client for public endpoints
    pub fn anonymous(instance_url: &str) -> Result<Self> {
        let instance_url = normalize_url(instance_url);
        debug!("Using anonymous client for {}", instance_url);

        let client = generator(SNS::Mastodon, instance_url.clone(), None, None)?;

        Ok(Self {
            client: Arc::new(client),
            rest: RestClient::new(&instance_url, None),
            instance_url,
            access_token: None,
        })
    }

    /// Get the access token (for persistence)
    pub fn access_token(&self) -> Option<&str> {
        self.access_token.as_deref()
    }
}

#[async_trait]
impl MastodonApi for MastodonClient {
    async fn verify_credentials(&self) -> Result<User> {
        let response = self
            .client
            .verify_account_credentials()
            .await
            .context("Failed to verify credentials")?;

        Ok(converter::convert_account(&response.json))
    }

    async fn get_timeline(&self, request: &TimelineRequest) -> Result<TimelineResponse> {
        let limit = request.limit.unwrap_or(DEFAULT_LIMIT);
        debug!("Fetching timeline: {}", request.timeline_type.display_name());

        let statuses = match &request.timeline_type {
            TimelineType::Home => {
                let options = GetHomeTimelineInputOptions {
                    max_id: request.max_id.clone(),
                    since_id: request.since_id.clone(),
                    min_id: request.min_id.clone(),
                    limit: Some(limit),
                    ..Default::default()
                };
                self.client.get_home_timeline(Some(&options)).await?.json
            }
            TimelineType::Local => {
                let options = GetLocalTimelineInputOptions {
                    max_id: request.max_id.clone(),
                    since_id: request.since_id.clone(),
                    min_id: request.min_id.clone(),
                    limit: Some(limit),
                    ..Default::default()
                };
                self.client.get_local_timeline(Some(&options)).await?.json
            }
            TimelineType::Federated => {
                let options = GetPublicTimelineInputOptions {
                    max_id: request.max_id.clone(),
                    since_id: request.since_id.clone(),
                    min_id: request.min_id.clone(),
                    limit: Some(limit),
                    ..Default::default()
                };
                self.client.get_public_timeline(Some(&options)).await?.json
            }
            TimelineType::Hashtag { tag, local } => {
                let options = GetTagTimelineInputOptions {
                    local: Some(*local),
                    max_id: request.max_id.clone(),
                    since_id: request.since_id.clone(),
                    min_id: request.min_id.clone(),
                    limit: Some(limit),
                    ..Default::default()
                };
                self.client
                    .get_tag_timeline(tag.clone(), Some(&options))
                    .await?
                    .json
            }
            TimelineType::User { user_id } => {
                let options = megalodon::megalodon::GetAccountStatusesInputOptions {
                    max_id: request.max_id.clone(),
                    since_id: request.since_id.clone(),
                    limit: Some(limit),
                    ..Default::default()
                };
                self.client
                    .get_account_statuses(user_id.clone(), Some(&options))
                    .await?
                    .json
            }
            TimelineType::List { list_id } => {
                let options = GetListTimelineInputOptions {
                    max_id: request.max_id.clone(),
                    since_id: request.since_id.clone(),
                    min_id: request.min_id.clone(),
                    limit: Some(limit),
                };
                self.client
                    .get_list_timeline(list_id.clone(), Some(&options))
                    .await?
                    .json
            }
            TimelineType::Bookmarks => {
                let options = GetBookmarksInputOptions {
                    max_id: request.max_id.clone(),
                    since_id: request.since_id.clone(),
                    min_id: request.min_id.clone(),
                    limit: Some(limit),
                    ..Default::default()
                };
                self.client.get_bookmarks(Some(&options)).await?.json
            }
        };

        let posts: Vec<Post> = statuses.iter().map(converter::convert_status).collect();

        let max_id = posts.first().map(|p| p.id.clone());
        let min_id = posts.last().map(|p| p.id.clone());
        let has_more = posts.len() == limit as usize;

        Ok(TimelineResponse {
            posts,
            max_id,
            min_id,
            has_more,
        })
    }

    async fn get_notifications(&self, request: &NotificationRequest) -> Result<NotificationResponse> {
        let limit = request.limit.unwrap_or(DEFAULT_LIMIT);

        let exclude_types = if request.exclude_types.is_empty() {
            None
        } else {
            Some(
                request
                    .exclude_types
                    .iter()
                    .filter_map(|t| converter::to_api_notification_type(*t))
                    .collect(),
            )
        };

        let options = GetNotificationsInputOptions {
            max_id: request.max_id.clone(),
            since_id: request.since_id.clone(),
            min_id: request.min_id.clone(),
            limit: Some(limit),
            exclude_types,
            ..Default::default()
        };

        let response = self
            .client
            .get_notifications(Some(&options))
            .await
            .context("Failed to fetch notifications")?;

        let notifications: Vec<Notification> = response
            .json
            .iter()
            .filter_map(converter::convert_notification)
            .collect();

        let max_id = notifications.first().map(|n| n.id.clone());
        let min_id = notifications.last().map(|n| n.id.clone());
        let has_more = notifications.len() == limit as usize;

        Ok(NotificationResponse {
            notifications,
            max_id,
            min_id,
            has_more,
        })
    }

    async fn clear_notifications(&self) -> Result<()> {
        self.client
            .dismiss_notifications()
            .await
            .context("Failed to clear notifications")?;

        Ok(())
    }

    async fn get_lists(&self) -> Result<Vec<UserList>> {
        let response = self.client.get_lists().await.context("Failed to fetch lists")?;
        Ok(response.json.iter().map(converter::convert_list).collect())
    }

    async fn create_list(&self, title: &str) -> Result<UserList> {
        let response = self
            .client
            .create_list(title.to_string())
            .await
            .context("Failed to create list")?;

        info!("Created list {}", response.json.id);
        Ok(converter::convert_list(&response.json))
    }

    async fn add_accounts_to_list(&self, list_id: &str, account_ids: &[String]) -> Result<()> {
        self.client
            .add_accounts_to_list(list_id.to_string(), account_ids.to_vec())
            .await
            .context("Failed to add accounts to list")?;

        Ok(())
    }

    async fn remove_accounts_from_list(&self, list_id: &str, account_ids: &[String]) -> Result<()> {
        self.client
            .delete_accounts_from_list(list_id.to_string(), account_ids.to_vec())
            .await
            .context("Failed to remove accounts from list")?;

        Ok(())
    }

    async fn lookup_account(&self, acct: &str) -> Result<User> {
        self.rest.lookup_account(acct).await
    }

    async fn follow(&self, account_id: &str) -> Result<Relationship> {
        let response = self
            .client
            .follow_account(account_id.to_string(), None)
            .await
            .context("Failed to follow account")?;

        Ok(converter::convert_relationship(&response.json))
    }

    async fn unfollow(&self, account_id: &str) -> Result<Relationship> {
        let response = self
            .client
            .unfollow_account(account_id.to_string())
            .await
            .context("Failed to unfollow account")?;

        Ok(converter::convert_relationship(&response.json))
    }

    async fn create_post(&self, new_post: &NewPost) -> Result<Post> {
        let options = PostStatusInputOptions {
            in_reply_to_id: new_post.in_reply_to_id.clone(),
            sensitive: Some(new_post.sensitive),
            spoiler_text: new_post.spoiler_text.clone(),
            visibility: Some(converter::to_api_visibility(new_post.visibility)),
            language: new_post.language.clone(),
            media_ids: if new_post.media_ids.is_empty() {
                None
            } else {
                Some(new_post.media_ids.clone())
            },
            ..Default::default()
        };

        let response = self
            .client
            .post_status(new_post.content.clone(), Some(&options))
            .await
            .context("Failed to create post")?;

        match &response.json {
            PostStatusOutput::Status(status) => Ok(converter::convert_status(status)),
            PostStatusOutput::ScheduledStatus(_) => {
                anyhow::bail!("Scheduled status not supported")
            }
        }
    }

    async fn bookmark(&self, post_id: &str) -> Result<Post> {
        let response = self
            .client
            .bookmark_status(post_id.to_string())
            .await
            .context("Failed to bookmark post")?;

        Ok(converter::convert_status(&response.json))
    }

    async fn unbookmark(&self, post_id: &str) -> Result<Post> {
        let response = self
            .client
            .unbookmark_status(post_id.to_string())
            .await
            .context("Failed to remove bookmark")?;

        Ok(converter::convert_status(&response.json))
    }

    async fn upload_media(&self, request: &MediaUploadRequest) -> Result<MediaAttachment> {
        if !Path::new(&request.file_path).exists() {
            anyhow::bail!("File not found: {}", request.file_path);
        }

        let options = UploadMediaInputOptions {
            description: request.description.clone(),
            ..Default::default()
        };

        let response = self
            .client
            .upload_media(request.file_path.clone(), Some(&options))
            .await
            .context("Failed to upload media")?;

        let attachment = match &response.json {
            megalodon::entities::UploadMedia::Attachment(att) => converter::convert_media(att),
            // Still processing on the server; the id is all a post needs
            megalodon::entities::UploadMedia::AsyncAttachment(async_att) => MediaAttachment {
                id: async_att.id.clone(),
                media_type: MediaType::Unknown,
                url: async_att.url.clone().unwrap_or_default(),
                preview_url: async_att.preview_url.clone(),
                description: async_att.description.clone(),
            },
        };

        info!("Media uploaded: {}", attachment.id);
        Ok(attachment)
    }

    async fn get_instance_info(&self) -> Result<InstanceInfo> {
        let response = self
            .client
            .get_instance()
            .await
            .context("Failed to get instance info")?;

        let instance = &response.json;

        Ok(InstanceInfo {
            url: self.instance_url.clone(),
            title: instance.title.clone(),
            description: instance.description.clone(),
            version: instance.version.clone(),
            user_count: Some(instance.stats.user_count as u64),
            status_count: Some(instance.stats.status_count as u64),
            domain_count: Some(instance.stats.domain_count as u64),
            max_toot_chars: Some(instance.configuration.statuses.max_characters as u32),
            max_media_attachments: instance
                .configuration
                .statuses
                .max_media_attachments
                .map(|v| v as u32),
            languages: instance.languages.clone(),
            registrations: instance.registrations,
            approval_required: instance.approval_required,
        })
    }
}

/// Normalize an instance URL
pub fn normalize_url(url: &str) -> String {
    let url = url.trim();
    let url = if url.starts_with("http://") || url.starts_with("https://") {
        url.to_string()
    } else {
        format!("https://{}", url)
    };

    // Remove trailing slash
    url.trim_end_matches('/').to_string()
}

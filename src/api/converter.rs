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

//! Type converters from megalodon types to toot types

use megalodon::entities;
use megalodon::entities::notification::NotificationType as ApiNotificationType;

use crate::models::{
    MediaAttachment, MediaType, Mention, Notification, NotificationType, Post, Relationship, Tag,
    User, UserList, Visibility,
};
use crate::output::html_to_text;

/// Convert a megalodon Status to a toot Post
pub fn convert_status(status: &entities::Status) -> Post {
    Post {
        id: status.id.clone(),
        uri: status.uri.clone(),
        url: status.url.clone(),
        account: convert_account(&status.account),
        content: status.content.clone(),
        plain_content: html_to_text(&status.content),
        spoiler_text: status.spoiler_text.clone(),
        visibility: convert_visibility(&status.visibility),
        sensitive: status.sensitive,
        created_at: status.created_at,
        edited_at: status.edited_at,
        language: status.language.clone(),
        in_reply_to_id: status.in_reply_to_id.clone(),
        media_attachments: status.media_attachments.iter().map(convert_media).collect(),
        tags: status.tags.iter().map(convert_tag).collect(),
        mentions: status.mentions.iter().map(convert_mention).collect(),
        reblogs_count: status.reblogs_count as u64,
        favourites_count: status.favourites_count as u64,
        replies_count: status.replies_count as u64,
        reblog: status.reblog.as_ref().map(|r| Box::new(convert_status(r))),
        reblogged: status.reblogged,
        favourited: status.favourited,
        bookmarked: status.bookmarked,
    }
}

/// Convert a megalodon Account to a toot User
pub fn convert_account(account: &entities::Account) -> User {
    User {
        id: account.id.clone(),
        username: account.username.clone(),
        acct: account.acct.clone(),
        display_name: account.display_name.clone(),
        note: account.note.clone(),
        url: account.url.clone(),
        avatar: account.avatar.clone(),
        locked: account.locked,
        bot: account.bot,
        created_at: account.created_at,
        statuses_count: account.statuses_count as u64,
        followers_count: account.followers_count as u64,
        following_count: account.following_count as u64,
    }
}

pub fn convert_relationship(relationship: &entities::Relationship) -> Relationship {
    Relationship {
        id: relationship.id.clone(),
        following: relationship.following,
        requested: relationship.requested,
    }
}

pub fn convert_list(list: &entities::List) -> UserList {
    UserList {
        id: list.id.clone(),
        title: list.title.clone(),
    }
}

fn convert_visibility(visibility: &entities::StatusVisibility) -> Visibility {
    match visibility {
        entities::StatusVisibility::Public => Visibility::Public,
        entities::StatusVisibility::Unlisted => Visibility::Unlisted,
        entities::StatusVisibility::Private => Visibility::Private,
        entities::StatusVisibility::Direct => Visibility::Direct,
        entities::StatusVisibility::Local => Visibility::Unlisted,
    }
}

/// Convert a toot visibility into the megalodon one used when posting
pub fn to_api_visibility(visibility: Visibility) -> entities::StatusVisibility {
    match visibility {
        Visibility::Public => entities::StatusVisibility::Public,
        Visibility::Unlisted => entities::StatusVisibility::Unlisted,
        Visibility::Private => entities::StatusVisibility::Private,
        Visibility::Direct => entities::StatusVisibility::Direct,
    }
}

/// Convert a media attachment
pub fn convert_media(media: &entities::Attachment) -> MediaAttachment {
    MediaAttachment {
        id: media.id.clone(),
        media_type: convert_media_type(&media.r#type),
        url: media.url.clone(),
        preview_url: media.preview_url.clone(),
        description: media.description.clone(),
    }
}

fn convert_media_type(media_type: &entities::attachment::AttachmentType) -> MediaType {
    match media_type {
        entities::attachment::AttachmentType::Image => MediaType::Image,
        entities::attachment::AttachmentType::Video => MediaType::Video,
        entities::attachment::AttachmentType::Gifv => MediaType::Gifv,
        entities::attachment::AttachmentType::Audio => MediaType::Audio,
        entities::attachment::AttachmentType::Unknown => MediaType::Unknown,
    }
}

fn convert_tag(tag: &entities::status::Tag) -> Tag {
    Tag {
        name: tag.name.clone(),
        url: tag.url.clone(),
    }
}

fn convert_mention(mention: &entities::Mention) -> Mention {
    Mention {
        id: mention.id.clone(),
        username: mention.username.clone(),
        acct: mention.acct.clone(),
        url: mention.url.clone(),
    }
}

/// Convert a megalodon Notification to a toot Notification
pub fn convert_notification(notification: &entities::Notification) -> Option<Notification> {
    // Account is required for our notification model
    let account = notification.account.as_ref()?;

    Some(Notification {
        id: notification.id.clone(),
        notification_type: convert_notification_type(&notification.r#type),
        created_at: notification.created_at,
        account: convert_account(account),
        status: notification.status.as_ref().map(convert_status),
    })
}

fn convert_notification_type(notification_type: &ApiNotificationType) -> NotificationType {
    match notification_type {
        ApiNotificationType::Mention => NotificationType::Mention,
        ApiNotificationType::Reblog => NotificationType::Reblog,
        ApiNotificationType::Favourite => NotificationType::Favourite,
        ApiNotificationType::Follow => NotificationType::Follow,
        ApiNotificationType::FollowRequest => NotificationType::FollowRequest,
        ApiNotificationType::PollExpired => NotificationType::Poll,
        ApiNotificationType::Update => NotificationType::Update,
        _ => NotificationType::Unknown,
    }
}

/// Map a toot notification type back to megalodon's for request filters.
/// `Unknown` has no server-side counterpart.
pub fn to_api_notification_type(notification_type: NotificationType) -> Option<ApiNotificationType> {
    match notification_type {
        NotificationType::Mention => Some(ApiNotificationType::Mention),
        NotificationType::Reblog => Some(ApiNotificationType::Reblog),
        NotificationType::Favourite => Some(ApiNotificationType::Favourite),
        NotificationType::Follow => Some(ApiNotificationType::Follow),
        NotificationType::FollowRequest => Some(ApiNotificationType::FollowRequest),
        NotificationType::Poll => Some(ApiNotificationType::PollExpired),
        NotificationType::Update => Some(ApiNotificationType::Update),
        NotificationType::Unknown => None,
    }
}

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

//! `notifications`

use std::io::Write;

use anyhow::Result;
use clap::Args;
use tracing::info;

use crate::api::MastodonApi;
use crate::models::{NotificationRequest, NotificationType};
use crate::output;

#[derive(Debug, Clone, Default, Args)]
pub struct NotificationOptions {
    /// Only show mentions
    #[arg(short, long)]
    pub mentions: bool,

    /// Show oldest notifications first
    #[arg(short, long)]
    pub reverse: bool,

    /// Dismiss all notifications
    #[arg(long)]
    pub clear: bool,
}

impl NotificationOptions {
    fn request(&self) -> NotificationRequest {
        let exclude_types = if self.mentions {
            NotificationType::NON_MENTIONS.to_vec()
        } else {
            Vec::new()
        };

        NotificationRequest {
            exclude_types,
            ..NotificationRequest::default()
        }
    }
}

pub async fn notifications<W: Write>(
    api: &dyn MastodonApi,
    options: &NotificationOptions,
    out: &mut W,
) -> Result<()> {
    if options.clear {
        api.clear_notifications().await?;
        info!("Cleared notifications");
        writeln!(out, "Cleared notifications")?;
        return Ok(());
    }

    let mut notifications = api.get_notifications(&options.request()).await?.notifications;
    if options.reverse {
        notifications.reverse();
    }

    output::print_notifications(out, &notifications)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::fake::FakeApi;
    use crate::output::fixtures::{notification, post, user};

    fn render(out: Vec<u8>) -> String {
        String::from_utf8(out).unwrap()
    }

    fn sample() -> FakeApi {
        let me = user("1", "me");
        let friend = user("2", "friend");
        FakeApi::default().with_me(me.clone()).with_notifications(vec![
            notification("30", NotificationType::Follow, &friend, None),
            notification("20", NotificationType::Mention, &friend, Some(post("200", &friend, "@me hi"))),
            notification("10", NotificationType::Favourite, &friend, Some(post("100", &me, "mine"))),
        ])
    }

    #[tokio::test]
    async fn empty_notifications_message() {
        let api = FakeApi::default();
        let mut out = Vec::new();
        notifications(&api, &NotificationOptions::default(), &mut out).await.unwrap();
        assert_eq!(render(out).trim(), "You have no notifications");
    }

    #[tokio::test]
    async fn shows_every_kind_newest_first() {
        let api = sample();
        let mut out = Vec::new();
        notifications(&api, &NotificationOptions::default(), &mut out).await.unwrap();

        let out = render(out);
        let follow = out.find("friend @friend now follows you").unwrap();
        let mention = out.find("friend @friend mentioned you").unwrap();
        let favourite = out.find("friend @friend favourited your status").unwrap();
        assert!(follow < mention && mention < favourite);
    }

    #[tokio::test]
    async fn mentions_excludes_other_kinds() {
        let api = sample();
        let options = NotificationOptions {
            mentions: true,
            ..NotificationOptions::default()
        };
        let mut out = Vec::new();
        notifications(&api, &options, &mut out).await.unwrap();

        let request = &api.notification_requests()[0];
        for kind in NotificationType::NON_MENTIONS {
            assert!(request.exclude_types.contains(&kind));
        }
        assert!(!request.exclude_types.contains(&NotificationType::Mention));

        let out = render(out);
        assert!(out.contains("mentioned you"));
        assert!(!out.contains("now follows you"));
        assert!(!out.contains("favourited"));
    }

    #[tokio::test]
    async fn reverse_shows_oldest_first() {
        let api = sample();
        let options = NotificationOptions {
            reverse: true,
            ..NotificationOptions::default()
        };
        let mut out = Vec::new();
        notifications(&api, &options, &mut out).await.unwrap();

        let out = render(out);
        assert!(out.find("favourited").unwrap() < out.find("now follows you").unwrap());
    }

    #[tokio::test]
    async fn clear_dismisses_everything() {
        let api = sample();
        let options = NotificationOptions {
            clear: true,
            ..NotificationOptions::default()
        };
        let mut out = Vec::new();
        notifications(&api, &options, &mut out).await.unwrap();

        assert_eq!(render(out).trim(), "Cleared notifications");
        assert_eq!(api.calls(), vec!["clear_notifications"]);

        let mut out = Vec::new();
        notifications(&api, &NotificationOptions::default(), &mut out).await.unwrap();
        assert_eq!(render(out).trim(), "You have no notifications");
    }
}

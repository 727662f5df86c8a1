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

//! `timeline` and `bookmarks`
//!
//! The timeline flags select one scope (home unless one of public, tag,
//! account or list is given). `--local` and `--instance` only refine the
//! public and tag scopes.

use std::io::Write;

use anyhow::Result;
use clap::Args;
use tracing::debug;

use crate::api::{MastodonApi, MastodonClient};
use crate::config::Config;
use crate::error::TootError;
use crate::models::{TimelineRequest, TimelineType, UserList};
use crate::output;

/// Flags of the `timeline` command
#[derive(Debug, Clone, Default, Args)]
pub struct TimelineOptions {
    /// Show the public timeline
    #[arg(short, long)]
    pub public: bool,

    /// Show posts with the given hashtag
    #[arg(short, long)]
    pub tag: Option<String>,

    /// Show posts from the given account
    #[arg(short, long)]
    pub account: Option<String>,

    /// Show posts from the list with the given id or title
    #[arg(short, long)]
    pub list: Option<String>,

    /// Only local posts (with --public or --tag)
    #[arg(short = 'L', long)]
    pub local: bool,

    /// Read a public or tag timeline from this instance without logging in
    #[arg(short, long)]
    pub instance: Option<String>,

    /// Number of posts to fetch
    #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..=40))]
    pub count: Option<u32>,

    /// Show oldest posts first
    #[arg(short, long)]
    pub reverse: bool,
}

/// Which timeline a validated set of flags points at
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimelineScope {
    Home,
    Public { local: bool },
    Tag { tag: String, local: bool },
    Account(String),
    List(String),
}

/// A validated `timeline` invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimelineQuery {
    pub scope: TimelineScope,
    /// Instance to read anonymously instead of the logged-in account's
    pub instance: Option<String>,
    pub count: Option<u32>,
    pub reverse: bool,
}

impl TimelineOptions {
    /// Check the flag combination and turn it into a query.
    pub fn validate(&self) -> Result<TimelineQuery, TootError> {
        let selected = [
            self.public,
            self.tag.is_some(),
            self.account.is_some(),
            self.list.is_some(),
        ]
        .iter()
        .filter(|s| **s)
        .count();

        if selected > 1 {
            return Err(TootError::ConflictingTimelines);
        }

        let public_or_tag = self.public || self.tag.is_some();

        if self.local && !public_or_tag {
            return Err(TootError::LocalWithoutPublicOrTag);
        }

        if self.instance.is_some() && !public_or_tag {
            return Err(TootError::InstanceWithoutPublicOrTag);
        }

        let scope = if self.public {
            TimelineScope::Public { local: self.local }
        } else if let Some(tag) = &self.tag {
            TimelineScope::Tag {
                tag: tag.trim_start_matches('#').to_string(),
                local: self.local,
            }
        } else if let Some(account) = &self.account {
            TimelineScope::Account(account.clone())
        } else if let Some(list) = &self.list {
            TimelineScope::List(list.clone())
        } else {
            TimelineScope::Home
        };

        Ok(TimelineQuery {
            scope,
            instance: self.instance.clone(),
            count: self.count,
            reverse: self.reverse,
        })
    }
}

/// Find a list by id or title
pub async fn find_list(api: &dyn MastodonApi, id_or_title: &str) -> Result<UserList> {
    let lists = api.get_lists().await?;
    lists
        .into_iter()
        .find(|list| list.matches(id_or_title))
        .ok_or_else(|| TootError::ListNotFound(id_or_title.to_string()).into())
}

/// Map a scope onto the server timeline, resolving account and list names
pub async fn resolve_scope(api: &dyn MastodonApi, scope: &TimelineScope) -> Result<TimelineType> {
    let timeline_type = match scope {
        TimelineScope::Home => TimelineType::Home,
        TimelineScope::Public { local: false } => TimelineType::Federated,
        TimelineScope::Public { local: true } => TimelineType::Local,
        TimelineScope::Tag { tag, local } => TimelineType::Hashtag {
            tag: tag.clone(),
            local: *local,
        },
        TimelineScope::Account(acct) => {
            let user = api.lookup_account(acct).await?;
            TimelineType::User { user_id: user.id }
        }
        TimelineScope::List(id_or_title) => {
            let list = find_list(api, id_or_title).await?;
            TimelineType::List { list_id: list.id }
        }
    };

    debug!("Resolved timeline: {}", timeline_type.display_name());
    Ok(timeline_type)
}

/// Fetch and print the timeline a query points at
pub async fn show_timeline<W: Write>(
    api: &dyn MastodonApi,
    query: &TimelineQuery,
    out: &mut W,
) -> Result<()> {
    let timeline_type = resolve_scope(api, &query.scope).await?;
    print_page(api, timeline_type, query.count, query.reverse, out).await
}

/// Fetch and print bookmarks, most recently bookmarked first
pub async fn show_bookmarks<W: Write>(
    api: &dyn MastodonApi,
    count: Option<u32>,
    reverse: bool,
    out: &mut W,
) -> Result<()> {
    print_page(api, TimelineType::Bookmarks, count, reverse, out).await
}

async fn print_page<W: Write>(
    api: &dyn MastodonApi,
    timeline_type: TimelineType,
    count: Option<u32>,
    reverse: bool,
    out: &mut W,
) -> Result<()> {
    let request = TimelineRequest::new(timeline_type, count);
    let mut posts = api.get_timeline(&request).await?.posts;

    if reverse {
        posts.reverse();
    }

    output::print_timeline(out, &posts)?;
    Ok(())
}

/// `toot timeline`
pub async fn timeline<W: Write>(config: &Config, options: &TimelineOptions, out: &mut W) -> Result<()> {
    // Flags are checked before touching the store or the network
    let query = options.validate()?;

    let client = match &query.instance {
        Some(instance) => MastodonClient::anonymous(instance)?,
        None => config.client().await?,
    };

    show_timeline(&client, &query, out).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::fake::FakeApi;
    use crate::output::fixtures::{post, user};

    fn options() -> TimelineOptions {
        TimelineOptions::default()
    }

    fn render_ids(out: &[u8]) -> Vec<String> {
        String::from_utf8_lossy(out)
            .lines()
            .filter_map(|line| line.strip_prefix("ID "))
            .map(|rest| rest.split_whitespace().next().unwrap_or("").to_string())
            .collect()
    }

    #[test]
    fn no_flags_is_home() {
        let query = options().validate().unwrap();
        assert_eq!(query.scope, TimelineScope::Home);
        assert_eq!(query.instance, None);
    }

    #[test]
    fn any_two_scopes_conflict() {
        let setters: [fn(&mut TimelineOptions); 4] = [
            |o| o.public = true,
            |o| o.tag = Some("foo".into()),
            |o| o.account = Some("bar".into()),
            |o| o.list = Some("baz".into()),
        ];

        for (i, first) in setters.iter().enumerate() {
            for second in setters.iter().skip(i + 1) {
                let mut opts = options();
                first(&mut opts);
                second(&mut opts);
                assert_eq!(opts.validate(), Err(TootError::ConflictingTimelines));
            }
        }

        let mut all = options();
        for set in setters {
            set(&mut all);
        }
        assert_eq!(all.validate(), Err(TootError::ConflictingTimelines));
    }

    #[test]
    fn conflict_message_is_exact() {
        assert_eq!(
            TootError::ConflictingTimelines.to_string(),
            "Only one of --public, --tag, --account, or --list can be used at one time."
        );
    }

    #[test]
    fn local_needs_public_or_tag() {
        let mut opts = options();
        opts.local = true;
        assert_eq!(opts.validate(), Err(TootError::LocalWithoutPublicOrTag));

        opts.account = Some("alice".into());
        assert_eq!(opts.validate(), Err(TootError::LocalWithoutPublicOrTag));

        opts.account = None;
        opts.public = true;
        assert_eq!(opts.validate().unwrap().scope, TimelineScope::Public { local: true });
    }

    #[test]
    fn instance_needs_public_or_tag() {
        let mut opts = options();
        opts.instance = Some("http://localhost:3000".into());
        assert_eq!(opts.validate(), Err(TootError::InstanceWithoutPublicOrTag));

        opts.list = Some("friends".into());
        assert_eq!(opts.validate(), Err(TootError::InstanceWithoutPublicOrTag));

        opts.list = None;
        opts.tag = Some("#foo".into());
        let query = opts.validate().unwrap();
        assert_eq!(query.scope, TimelineScope::Tag { tag: "foo".into(), local: false });
        assert_eq!(query.instance.as_deref(), Some("http://localhost:3000"));
    }

    #[test]
    fn local_is_reported_before_instance() {
        let mut opts = options();
        opts.local = true;
        opts.instance = Some("example.social".into());
        assert_eq!(opts.validate(), Err(TootError::LocalWithoutPublicOrTag));
    }

    #[tokio::test]
    async fn list_is_addressable_by_id_and_title() {
        let friend = user("3", "friend");
        let api = FakeApi::default()
            .with_list("42", "friends")
            .with_timeline(TimelineType::List { list_id: "42".into() }, vec![post("300", &friend, "hi")]);

        let mut by_title = Vec::new();
        let query = TimelineQuery {
            scope: TimelineScope::List("friends".into()),
            instance: None,
            count: None,
            reverse: false,
        };
        show_timeline(&api, &query, &mut by_title).await.unwrap();

        let mut by_id = Vec::new();
        let query = TimelineQuery { scope: TimelineScope::List("42".into()), ..query };
        show_timeline(&api, &query, &mut by_id).await.unwrap();

        assert_eq!(render_ids(&by_title), vec!["300"]);
        assert_eq!(by_title, by_id);
    }

    #[tokio::test]
    async fn unknown_list_is_an_error() {
        let api = FakeApi::default().with_list("42", "friends");
        let error = find_list(&api, "enemies").await.unwrap_err();
        assert_eq!(error.to_string(), "List \"enemies\" not found");
    }

    #[tokio::test]
    async fn account_scope_resolves_username() {
        let other = user("2", "other");
        let api = FakeApi::default()
            .with_account(other.clone())
            .with_timeline(TimelineType::User { user_id: "2".into() }, vec![post("200", &other, "x")]);

        let timeline = resolve_scope(&api, &TimelineScope::Account("@other".into())).await.unwrap();
        assert_eq!(timeline, TimelineType::User { user_id: "2".into() });
    }

    #[tokio::test]
    async fn public_local_maps_to_local_timeline() {
        let api = FakeApi::default();
        let timeline = resolve_scope(&api, &TimelineScope::Public { local: true }).await.unwrap();
        assert_eq!(timeline, TimelineType::Local);
        let timeline = resolve_scope(&api, &TimelineScope::Public { local: false }).await.unwrap();
        assert_eq!(timeline, TimelineType::Federated);
    }

    #[tokio::test]
    async fn tag_flag_reaches_the_server_without_hash() {
        let friend = user("3", "friend");
        let api = FakeApi::default().with_timeline(
            TimelineType::Hashtag { tag: "foo".into(), local: false },
            vec![post("301", &friend, "#foo")],
        );

        let mut opts = options();
        opts.tag = Some("#foo".into());
        let query = opts.validate().unwrap();

        let mut out = Vec::new();
        show_timeline(&api, &query, &mut out).await.unwrap();

        let requests = api.timeline_requests();
        assert_eq!(
            requests[0].timeline_type,
            TimelineType::Hashtag { tag: "foo".into(), local: false }
        );
        assert_eq!(render_ids(&out), vec!["301"]);
    }

    #[tokio::test]
    async fn local_tag_timeline() {
        let api = FakeApi::default();

        let mut opts = options();
        opts.tag = Some("foo".into());
        opts.local = true;
        let query = opts.validate().unwrap();

        show_timeline(&api, &query, &mut Vec::new()).await.unwrap();

        assert_eq!(
            api.timeline_requests()[0].timeline_type,
            TimelineType::Hashtag { tag: "foo".into(), local: true }
        );
    }

    #[tokio::test]
    async fn home_shows_only_what_the_server_returns_for_home() {
        let me = user("1", "me");
        let friend = user("3", "friend");
        let stranger = user("2", "stranger");
        let api = FakeApi::default()
            .with_timeline(
                TimelineType::Home,
                vec![post("103", &friend, "#foo #bar"), post("101", &me, "#foo")],
            )
            .with_timeline(TimelineType::Federated, vec![post("102", &stranger, "#bar")]);

        let query = options().validate().unwrap();
        let mut out = Vec::new();
        show_timeline(&api, &query, &mut out).await.unwrap();

        assert_eq!(api.timeline_requests()[0].timeline_type, TimelineType::Home);
        assert_eq!(render_ids(&out), vec!["103", "101"]);
    }

    #[tokio::test]
    async fn bookmarks_newest_first_unless_reversed() {
        let me = user("1", "me");
        // The server returns the most recently bookmarked post first
        let api = FakeApi::default().with_timeline(
            TimelineType::Bookmarks,
            vec![post("2", &me, "second"), post("1", &me, "first")],
        );

        let mut out = Vec::new();
        show_bookmarks(&api, None, false, &mut out).await.unwrap();
        assert_eq!(render_ids(&out), vec!["2", "1"]);

        let mut out = Vec::new();
        show_bookmarks(&api, None, true, &mut out).await.unwrap();
        assert_eq!(render_ids(&out), vec!["1", "2"]);
    }

    #[tokio::test]
    async fn count_is_passed_as_limit() {
        let api = FakeApi::default();
        let query = TimelineQuery {
            scope: TimelineScope::Home,
            instance: None,
            count: Some(5),
            reverse: false,
        };
        let mut out = Vec::new();
        show_timeline(&api, &query, &mut out).await.unwrap();

        let requests = api.timeline_requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].limit, Some(5));
        assert_eq!(String::from_utf8(out).unwrap().trim(), "─".repeat(80));
    }
}

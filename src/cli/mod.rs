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

//! Command line interface

use std::io;
use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use tracing::debug;

use crate::api::MastodonClient;
use crate::commands::{
    accounts, auth, lists, notifications, statuses, timeline, ListCommand, NotificationOptions,
    PostOptions, TimelineOptions,
};
use crate::config::Config;

#[derive(Debug, Parser)]
#[command(name = "toot", version, about = "A command-line client for Mastodon")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Act as this account (acct or username) instead of the active one
    #[arg(short, long, global = true, env = "TOOT_USING")]
    pub using: Option<String>,

    /// Directory holding the account store
    #[arg(long, global = true, env = "TOOT_CONFIG_DIR")]
    pub config_dir: Option<PathBuf>,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Also write JSON logs to this directory
    #[arg(long, global = true, env = "TOOT_LOG_DIR")]
    pub log_dir: Option<PathBuf>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Log in to an instance
    Login {
        #[arg(short, long)]
        instance: String,
    },
    /// Log out of an account (the active one by default)
    Logout { account: Option<String> },
    /// Show stored logins
    Auth,
    /// Make an account the active one
    Activate { account: String },
    /// Show the logged in account
    Whoami,
    /// Show information about an instance
    Instance {
        /// Instance to query instead of the active account's
        #[arg(short, long)]
        instance: Option<String>,
    },
    /// Post a status
    Post(PostOptions),
    /// Follow an account
    Follow { account: String },
    /// Stop following an account
    Unfollow { account: String },
    /// Bookmark a status
    Bookmark { status_id: String },
    /// Remove a status from bookmarks
    Unbookmark { status_id: String },
    /// Manage lists
    Lists {
        #[command(subcommand)]
        command: Option<ListCommand>,
    },
    /// Show a timeline (home by default)
    Timeline(TimelineOptions),
    /// Show bookmarked statuses
    Bookmarks(BookmarkOptions),
    /// Show notifications
    Notifications(NotificationOptions),
}

#[derive(Debug, Clone, Default, Args)]
pub struct BookmarkOptions {
    /// Number of posts to fetch
    #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..=40))]
    pub count: Option<u32>,

    /// Show oldest bookmarks first
    #[arg(short, long)]
    pub reverse: bool,
}

/// Dispatch a parsed command line
pub async fn run(cli: Cli) -> Result<()> {
    let config = Config::new(cli.config_dir, cli.using);
    debug!("Config directory: {}", config.config_dir.display());

    let mut out = io::stdout();

    match cli.command {
        Command::Login { instance } => {
            let mut input = io::stdin().lock();
            auth::login(&config, &instance, &mut input, &mut out).await
        }
        Command::Logout { account } => auth::logout(&config, account.as_deref(), &mut out).await,
        Command::Auth => auth::auth(&config, &mut out).await,
        Command::Activate { account } => auth::activate(&config, &account, &mut out).await,
        Command::Whoami => accounts::whoami(&config.client().await?, &mut out).await,
        Command::Instance { instance } => {
            let client = match instance {
                Some(instance) => MastodonClient::anonymous(&instance)?,
                None => config.client().await?,
            };
            accounts::instance(&client, &mut out).await
        }
        Command::Post(options) => statuses::post(&config.client().await?, &options, &mut out).await,
        Command::Follow { account } => {
            accounts::follow(&config.client().await?, &account, &mut out).await
        }
        Command::Unfollow { account } => {
            accounts::unfollow(&config.client().await?, &account, &mut out).await
        }
        Command::Bookmark { status_id } => {
            statuses::bookmark(&config.client().await?, &status_id, &mut out).await
        }
        Command::Unbookmark { status_id } => {
            statuses::unbookmark(&config.client().await?, &status_id, &mut out).await
        }
        Command::Lists { command } => {
            let command = command.unwrap_or(ListCommand::List);
            lists::lists(&config.client().await?, &command, &mut out).await
        }
        Command::Timeline(options) => timeline::timeline(&config, &options, &mut out).await,
        Command::Bookmarks(options) => {
            let client = config.client().await?;
            timeline::show_bookmarks(&client, options.count, options.reverse, &mut out).await
        }
        Command::Notifications(options) => {
            notifications::notifications(&config.client().await?, &options, &mut out).await
        }
    }
}

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

//! `lists`

use std::io::Write;

use anyhow::Result;
use clap::Subcommand;

use super::timeline::find_list;
use crate::api::MastodonApi;
use crate::output;

#[derive(Debug, Clone, Subcommand)]
pub enum ListCommand {
    /// Show your lists (the default)
    List,
    /// Create a new list
    Create {
        title: String,
    },
    /// Add an account to a list
    Add {
        /// List id or title
        list: String,
        account: String,
    },
    /// Remove an account from a list
    Remove {
        /// List id or title
        list: String,
        account: String,
    },
}

pub async fn lists<W: Write>(api: &dyn MastodonApi, command: &ListCommand, out: &mut W) -> Result<()> {
    match command {
        ListCommand::List => {
            let lists = api.get_lists().await?;
            output::print_lists(out, &lists)?;
        }
        ListCommand::Create { title } => {
            let list = api.create_list(title).await?;
            writeln!(out, "✓ List \"{}\" created", list.title)?;
        }
        ListCommand::Add { list, account } => {
            let list = find_list(api, list).await?;
            let user = api.lookup_account(account).await?;
            api.add_accounts_to_list(&list.id, &[user.id]).await?;
            writeln!(out, "✓ Added account \"{}\" to \"{}\"", account, list.title)?;
        }
        ListCommand::Remove { list, account } => {
            let list = find_list(api, list).await?;
            let user = api.lookup_account(account).await?;
            api.remove_accounts_from_list(&list.id, &[user.id]).await?;
            writeln!(out, "✓ Removed account \"{}\" from \"{}\"", account, list.title)?;
        }
    }
    Ok(())
}

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

//! Runtime configuration resolved from global flags and the environment

use std::path::PathBuf;

use anyhow::Result;
use tracing::debug;

use crate::api::MastodonClient;
use crate::error::TootError;
use crate::models::StoredAccount;
use crate::store::AccountStore;

/// File name of the account store inside the config directory
pub const STORE_FILE: &str = "toot.db";

/// Where toot keeps its state and which account it acts as
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory holding the account store
    pub config_dir: PathBuf,
    /// Account selected with `--using`, by acct or username
    pub using: Option<String>,
}

impl Config {
    pub fn new(config_dir: Option<PathBuf>, using: Option<String>) -> Self {
        Self {
            config_dir: config_dir.unwrap_or_else(default_config_dir),
            using,
        }
    }

    pub fn store_path(&self) -> PathBuf {
        self.config_dir.join(STORE_FILE)
    }

    pub async fn open_store(&self) -> Result<AccountStore> {
        AccountStore::open(&self.store_path()).await
    }

    /// The account commands act as: `--using` if given, else the default
    pub async fn active_account(&self, store: &AccountStore) -> Result<StoredAccount> {
        let account = match &self.using {
            Some(name) => store
                .find_account(name)
                .await?
                .ok_or_else(|| TootError::AccountNotFound(name.clone()))?,
            None => store
                .get_default_account()
                .await?
                .ok_or(TootError::NotLoggedIn)?,
        };

        debug!("Acting as {}", account.acct);
        Ok(account)
    }

    /// Authenticated client for the active account
    pub async fn client(&self) -> Result<MastodonClient> {
        let store = self.open_store().await?;
        let account = self.active_account(&store).await?;
        MastodonClient::from_token(&account.instance_url, &account.access_token)
    }
}

fn default_config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("toot")
}

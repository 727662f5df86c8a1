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

//! Login management: `login`, `logout`, `auth` and `activate`

use std::io::{BufRead, Write};

use anyhow::{bail, Result};
use tracing::info;

use crate::api::{normalize_url, MastodonApi, MastodonClient};
use crate::config::Config;
use crate::error::TootError;
use crate::models::{OAuthApp, StoredAccount, User};
use crate::output;
use crate::store::AccountStore;

/// `toot login`: authorize in the browser, paste the code back
pub async fn login<R: BufRead, W: Write>(
    config: &Config,
    instance: &str,
    input: &mut R,
    out: &mut W,
) -> Result<()> {
    let instance_url = normalize_url(instance);
    let store = config.open_store().await?;
    let app = app_for(&store, &instance_url).await?;

    let auth = MastodonClient::authorization_url(&app);
    writeln!(out, "Open the following URL in your browser to log in:")?;
    writeln!(out, "{}", auth.auth_url)?;
    writeln!(out)?;
    write!(out, "Authorization code: ")?;
    out.flush()?;

    let mut code = String::new();
    input.read_line(&mut code)?;
    let code = code.trim();
    if code.is_empty() {
        bail!("No authorization code given");
    }

    let client = MastodonClient::complete_auth(&app, code).await?;
    let me = client.verify_credentials().await?;
    let token = client.access_token().unwrap_or_default();

    let account = save_login(&store, &instance_url, &me, token).await?;
    writeln!(out)?;
    writeln!(out, "✓ Successfully logged in as @{}", account.acct)?;
    Ok(())
}

/// Registered app for the instance, registering one on first use
async fn app_for(store: &AccountStore, instance_url: &str) -> Result<OAuthApp> {
    if let Some(app) = store.get_app(instance_url).await? {
        return Ok(app);
    }

    let app = MastodonClient::register_app(instance_url).await?;
    store.save_app(&app).await?;
    Ok(app)
}

/// Store a fresh login and make it the default account
pub async fn save_login(
    store: &AccountStore,
    instance_url: &str,
    user: &User,
    access_token: &str,
) -> Result<StoredAccount> {
    let mut account = StoredAccount::new(instance_url, &user.username, access_token);
    store.save_account(&account).await?;
    store.set_default_account(&account.id).await?;
    account.is_default = true;

    info!("Logged in as {}", account.acct);
    Ok(account)
}

/// `toot logout`: forget the named account, or the active one
pub async fn logout<W: Write>(config: &Config, account: Option<&str>, out: &mut W) -> Result<()> {
    let store = config.open_store().await?;
    let account = match account {
        Some(name) => store
            .find_account(name)
            .await?
            .ok_or_else(|| TootError::AccountNotFound(name.to_string()))?,
        None => config.active_account(&store).await?,
    };

    store.delete_account(&account.id).await?;
    writeln!(out, "✓ Account {} logged out", account.acct)?;
    Ok(())
}

/// `toot auth`: list stored logins
pub async fn auth<W: Write>(config: &Config, out: &mut W) -> Result<()> {
    let store = config.open_store().await?;
    let accounts = store.get_accounts().await?;
    let active = config.active_account(&store).await.ok();

    output::print_stored_accounts(out, &accounts, active.as_ref().map(|a| a.id.as_str()))?;
    Ok(())
}

/// `toot activate`: make an account the default
pub async fn activate<W: Write>(config: &Config, account: &str, out: &mut W) -> Result<()> {
    let store = config.open_store().await?;
    let found = store
        .find_account(account)
        .await?
        .ok_or_else(|| TootError::AccountNotFound(account.to_string()))?;

    store.set_default_account(&found.id).await?;
    writeln!(out, "✓ {} is now the active account", found.acct)?;
    Ok(())
}

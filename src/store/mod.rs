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

//! Local storage for logins and registered OAuth applications
//!
//! Uses SQLite. Access tokens live in their own column and are never part
//! of the serialized `data` blob.

use std::path::Path;

use anyhow::Result;
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};
use tracing::{debug, info};

use crate::models::{OAuthApp, StoredAccount};

type AccountRow = (String, String, bool);

/// Store for accounts and apps
pub struct AccountStore {
    pool: SqlitePool,
}

impl AccountStore {
    /// Open (creating if needed) the store at `path`
    pub async fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let db_url = format!("sqlite:{}?mode=rwc", path.display());
        debug!("Opening account store at {}", path.display());

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect(&db_url)
            .await?;

        let store = Self { pool };
        store.init_schema().await?;

        Ok(store)
    }

    /// Throwaway store; a single connection keeps the in-memory database alive
    pub async fn in_memory() -> Result<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await?;

        let store = Self { pool };
        store.init_schema().await?;

        Ok(store)
    }

    async fn init_schema(&self) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS apps (
                instance_url TEXT PRIMARY KEY,
                client_id TEXT NOT NULL,
                client_secret TEXT NOT NULL,
                redirect_uri TEXT NOT NULL,
                created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
            );

            CREATE TABLE IF NOT EXISTS accounts (
                id TEXT PRIMARY KEY,
                instance_url TEXT NOT NULL,
                username TEXT NOT NULL,
                acct TEXT NOT NULL UNIQUE,
                access_token TEXT NOT NULL,
                data TEXT NOT NULL,
                created_at TEXT NOT NULL,
                last_used_at TEXT NOT NULL,
                is_default INTEGER NOT NULL DEFAULT 0
            );
            "#,
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    // ===== APPS =====

    pub async fn save_app(&self, app: &OAuthApp) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO apps (instance_url, client_id, client_secret, redirect_uri)
            VALUES (?, ?, ?, ?)
            ON CONFLICT(instance_url) DO UPDATE SET
                client_id = excluded.client_id,
                client_secret = excluded.client_secret,
                redirect_uri = excluded.redirect_uri
            "#,
        )
        .bind(&app.instance_url)
        .bind(&app.client_id)
        .bind(&app.client_secret)
        .bind(&app.redirect_uri)
        .execute(&self.pool)
        .await?;

        info!("Saved app for {}", app.instance_url);
        Ok(())
    }

    pub async fn get_app(&self, instance_url: &str) -> Result<Option<OAuthApp>> {
        let row: Option<(String, String, String, String)> = sqlx::query_as(
            "SELECT instance_url, client_id, client_secret, redirect_uri FROM apps WHERE instance_url = ?",
        )
        .bind(instance_url)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|(instance_url, client_id, client_secret, redirect_uri)| OAuthApp {
            client_id,
            client_secret,
            redirect_uri,
            instance_url,
        }))
    }

    // ===== ACCOUNTS =====

    /// Save or update an account. Accounts are keyed by `acct`, so logging
    /// in again replaces the previous token.
    pub async fn save_account(&self, account: &StoredAccount) -> Result<()> {
        let data = serde_json::to_string(account)?;

        sqlx::query(
            r#"
            INSERT INTO accounts (id, instance_url, username, acct, access_token, data, created_at, last_used_at, is_default)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            ON CONFLICT(acct) DO UPDATE SET
                id = excluded.id,
                access_token = excluded.access_token,
                data = excluded.data,
                last_used_at = excluded.last_used_at,
                is_default = excluded.is_default
            "#,
        )
        .bind(&account.id)
        .bind(&account.instance_url)
        .bind(&account.username)
        .bind(&account.acct)
        .bind(&account.access_token)
        .bind(&data)
        .bind(account.added_at.to_rfc3339())
        .bind(account.last_used_at.to_rfc3339())
        .bind(account.is_default)
        .execute(&self.pool)
        .await?;

        info!("Saved account {}", account.acct);
        Ok(())
    }

    /// All accounts, most recently used first
    pub async fn get_accounts(&self) -> Result<Vec<StoredAccount>> {
        let rows: Vec<AccountRow> = sqlx::query_as(
            "SELECT data, access_token, is_default FROM accounts ORDER BY last_used_at DESC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().filter_map(|row| decode_account(row).ok()).collect())
    }

    /// Get the default (or most recently used) account
    pub async fn get_default_account(&self) -> Result<Option<StoredAccount>> {
        let row: Option<AccountRow> = sqlx::query_as(
            "SELECT data, access_token, is_default FROM accounts WHERE is_default = 1 LIMIT 1",
        )
        .fetch_optional(&self.pool)
        .await?;

        let row = match row {
            Some(r) => Some(r),
            None => {
                sqlx::query_as(
                    "SELECT data, access_token, is_default FROM accounts ORDER BY last_used_at DESC LIMIT 1",
                )
                .fetch_optional(&self.pool)
                .await?
            }
        };

        row.map(decode_account).transpose()
    }

    /// Find an account by `acct` (user@host) or by bare username
    pub async fn find_account(&self, name: &str) -> Result<Option<StoredAccount>> {
        let name = name.trim_start_matches('@');
        let row: Option<AccountRow> = sqlx::query_as(
            r#"
            SELECT data, access_token, is_default FROM accounts
            WHERE acct = ? OR username = ?
            ORDER BY acct = ? DESC, last_used_at DESC
            LIMIT 1
            "#,
        )
        .bind(name)
        .bind(name)
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;

        row.map(decode_account).transpose()
    }

    pub async fn delete_account(&self, account_id: &str) -> Result<()> {
        sqlx::query("DELETE FROM accounts WHERE id = ?")
            .bind(account_id)
            .execute(&self.pool)
            .await?;

        info!("Deleted account {}", account_id);
        Ok(())
    }

    /// Set account as default and update last_used_at
    pub async fn set_default_account(&self, account_id: &str) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("UPDATE accounts SET is_default = 0")
            .execute(&mut *tx)
            .await?;

        sqlx::query("UPDATE accounts SET is_default = 1, last_used_at = ? WHERE id = ?")
            .bind(chrono::Utc::now().to_rfc3339())
            .bind(account_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        debug!("Set default account to {}", account_id);
        Ok(())
    }
}

fn decode_account((data, access_token, is_default): AccountRow) -> Result<StoredAccount> {
    let mut account: StoredAccount = serde_json::from_str(&data)?;
    // Restore the token that was skipped during serialization
    account.access_token = access_token;
    account.is_default = is_default;
    Ok(account)
}

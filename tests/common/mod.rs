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

//! Shared setup for the live-server tests
//!
//! These tests need a Mastodon instance that accepts registrations without
//! email confirmation. Point `TOOT_TEST_BASE_URL` at it; when unset, tests
//! that need a server return early.

#![allow(dead_code)]

use std::process::Output;

use anyhow::{Context, Result};
use tempfile::TempDir;
use tokio::process::Command;
use uuid::Uuid;

use toot::api::{MastodonApi, MastodonClient, Registration, RestClient};
use toot::models::{NewPost, OAuthApp, Post, StoredAccount};
use toot::store::AccountStore;

pub const BASE_URL_VAR: &str = "TOOT_TEST_BASE_URL";

/// Instance URL for tests that only need a syntactically valid one
pub const PLACEHOLDER_URL: &str = "http://localhost:3000";

pub fn init_test_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("toot=debug,api=debug")
        .with_test_writer()
        .try_init();
}

pub fn base_url() -> Option<String> {
    std::env::var(BASE_URL_VAR).ok().filter(|url| !url.trim().is_empty())
}

/// A registered account on the test instance
pub struct TestUser {
    pub username: String,
    pub id: String,
    pub client: MastodonClient,
}

impl TestUser {
    pub async fn post(&self, text: &str) -> Result<Post> {
        let new_post = NewPost {
            content: text.to_string(),
            ..NewPost::default()
        };
        self.client.create_post(&new_post).await
    }

    /// Post a status with random text
    pub async fn post_random(&self) -> Result<Post> {
        self.post(&Uuid::new_v4().to_string()).await
    }
}

/// Result of one run of the `toot` binary
pub struct RunResult {
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl From<Output> for RunResult {
    fn from(output: Output) -> Self {
        Self {
            exit_code: output.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        }
    }
}

/// A config directory plus an OAuth app on the test instance
pub struct TestContext {
    pub base_url: String,
    pub config_dir: TempDir,
    app: Option<OAuthApp>,
}

impl TestContext {
    /// Context for a live instance, or `None` when no instance is configured
    pub async fn live() -> Result<Option<Self>> {
        init_test_logging();

        let Some(base_url) = base_url() else {
            eprintln!("{} is not set, skipping", BASE_URL_VAR);
            return Ok(None);
        };

        let app = MastodonClient::register_app(&base_url).await?;
        Ok(Some(Self {
            base_url: app.instance_url.clone(),
            config_dir: tempfile::tempdir()?,
            app: Some(app),
        }))
    }

    /// Context with an empty config directory and no server behind it
    pub fn offline() -> Result<Self> {
        init_test_logging();

        Ok(Self {
            base_url: base_url().unwrap_or_else(|| PLACEHOLDER_URL.to_string()),
            config_dir: tempfile::tempdir()?,
            app: None,
        })
    }

    /// Register a fresh account and save its login in the config directory
    pub async fn register(&self) -> Result<TestUser> {
        let app = self.app.as_ref().context("No test instance configured")?;

        let app_token = RestClient::new(&self.base_url, None).app_token(app).await?;

        let username = format!("u{}", &Uuid::new_v4().simple().to_string()[..12]);
        let registration = Registration::new(
            &username,
            &format!("{}@example.com", username),
            "password-for-tests",
        );
        let token = RestClient::new(&self.base_url, Some(&app_token.access_token))
            .register_account(&registration)
            .await?;

        let client = MastodonClient::from_token(&self.base_url, &token.access_token)?;
        let me = client.verify_credentials().await?;

        let store = AccountStore::open(&self.config_dir.path().join(toot::config::STORE_FILE)).await?;
        store
            .save_account(&StoredAccount::new(&self.base_url, &me.username, &token.access_token))
            .await?;

        Ok(TestUser {
            username: me.username,
            id: me.id,
            client,
        })
    }

    /// Run `toot` as `user`
    pub async fn run_as(&self, user: &TestUser, args: &[&str]) -> RunResult {
        let mut full = vec!["--using", user.username.as_str()];
        full.extend_from_slice(args);
        self.run(&full).await
    }

    /// Run `toot` against this context's config directory
    pub async fn run(&self, args: &[&str]) -> RunResult {
        let output = Command::new(env!("CARGO_BIN_EXE_toot"))
            .arg("--config-dir")
            .arg(self.config_dir.path())
            .args(args)
            .env_remove("TOOT_USING")
            .env_remove("TOOT_CONFIG_DIR")
            .env_remove("RUST_LOG")
            .output()
            .await
            .expect("failed to run toot");

        output.into()
    }
}

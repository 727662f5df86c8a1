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

//! Raw REST calls for the endpoints megalodon does not cover
//!
//! Account lookup by address, the client-credentials grant and account
//! registration. Requests and responses are plain JSON.

use std::time::Instant;

use anyhow::{Context, Result};
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::log_api_call;
use crate::models::{OAuthApp, User};

/// Scopes requested for app tokens and registered accounts
pub const SCOPES: &[&str] = &["read", "write", "follow", "push"];

/// OAuth token as returned by `/oauth/token` and `/api/v1/accounts`
#[derive(Debug, Clone, Deserialize)]
pub struct Token {
    pub access_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
    #[serde(default)]
    pub scope: Option<String>,
}

/// Details for a new account on the instance
#[derive(Debug, Clone, Serialize)]
pub struct Registration {
    pub username: String,
    pub email: String,
    pub password: String,
    pub agreement: bool,
    pub locale: String,
}

impl Registration {
    pub fn new(username: &str, email: &str, password: &str) -> Self {
        Self {
            username: username.to_string(),
            email: email.to_string(),
            password: password.to_string(),
            agreement: true,
            locale: "en".to_string(),
        }
    }
}

#[derive(Serialize)]
struct ClientCredentialsGrant<'a> {
    grant_type: &'a str,
    client_id: &'a str,
    client_secret: &'a str,
    redirect_uri: &'a str,
    scope: String,
}

/// JSON-over-HTTP client bound to one instance
#[derive(Clone)]
pub struct RestClient {
    http: Client,
    base_url: String,
    access_token: Option<String>,
}

impl RestClient {
    pub fn new(base_url: &str, access_token: Option<&str>) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            access_token: access_token.map(str::to_string),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.access_token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn send<T: DeserializeOwned>(
        &self,
        method: &'static str,
        path: &str,
        request: RequestBuilder,
    ) -> Result<T> {
        log_api_call!(method, path);
        let started = Instant::now();

        let response = self
            .authorize(request)
            .send()
            .await
            .with_context(|| format!("{} {} failed", method, path))?;
        let response = check_status(response).await?;

        log_api_call!(method, path, started.elapsed().as_millis() as u64);

        response
            .json::<T>()
            .await
            .with_context(|| format!("Invalid response from {} {}", method, path))
    }

    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let request = self.http.get(self.url(path));
        self.send("GET", path, request).await
    }

    pub async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let request = self.http.post(self.url(path)).json(body);
        self.send("POST", path, request).await
    }

    /// Resolve an account address (`name` or `name@domain`) to an account
    pub async fn lookup_account(&self, acct: &str) -> Result<User> {
        let acct = acct.trim_start_matches('@');
        let path = format!("/api/v1/accounts/lookup?acct={}", urlencoding::encode(acct));
        self.get_json(&path)
            .await
            .with_context(|| format!("Failed to look up account {}", acct))
    }

    /// Obtain an app-level token through the client-credentials grant
    pub async fn app_token(&self, app: &OAuthApp) -> Result<Token> {
        debug!("Requesting client credentials token for {}", app.instance_url);

        let grant = ClientCredentialsGrant {
            grant_type: "client_credentials",
            client_id: &app.client_id,
            client_secret: &app.client_secret,
            redirect_uri: &app.redirect_uri,
            scope: SCOPES.join(" "),
        };

        self.post_json("/oauth/token", &grant)
            .await
            .context("Failed to obtain app token")
    }

    /// Register a new account. The client must carry an app token.
    pub async fn register_account(&self, registration: &Registration) -> Result<Token> {
        self.post_json("/api/v1/accounts", registration)
            .await
            .with_context(|| format!("Failed to register account {}", registration.username))
    }
}

async fn check_status(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    #[derive(Deserialize)]
    struct ApiError {
        error: String,
    }

    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ApiError>(&body)
        .map(|e| e.error)
        .unwrap_or(body);

    anyhow::bail!("Server returned {}: {}", status, message)
}

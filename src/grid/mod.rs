// zen-update: Shared `zen-common` Subtree Updater
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Grid console API client.
//!
//! ```text
//! GridClient::new(grid_url)
//!   .list_app_ids(token)
//!        |
//!        v
//!   POST {grid_url}/console/v2/api/
//!   Authorization: Token <token>
//!   {"query": APPS_QUERY, "variables": {}}
//!        |
//!    200 +--> AppsQueryResponse --> Vec<AppId>
//!   else +--> NetworkError::HttpError { status, body }
//! ```
//!
//! No retry and no timeout: a hung grid hangs the run.

pub mod types;


use reqwest::{Client, StatusCode};
use std::sync::OnceLock;
use tracing::{debug, info};

use crate::error::{NetworkError, ZenResult};
use types::{APPS_QUERY, AppId, AppsQueryResponse, GraphQlRequest};

/// Path of the console API below the grid URL.
pub const CONSOLE_API_PATH: &str = "/console/v2/api/";

/// Process-wide HTTP client, falling back to a plain client if the
/// configured one cannot be built.
fn global_client() -> &'static Client {
    static CLIENT: OnceLock<Client> = OnceLock::new();
    CLIENT.get_or_init(|| {
        Client::builder()
            .user_agent(format!("zen-update/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .unwrap_or_else(|_| Client::new())
    })
}

/// Client for the grid console API.
#[derive(Debug, Clone)]
pub struct GridClient {
    client: Client,
    endpoint: String,
}

impl GridClient {
    /// Creates a client for the grid at `grid_url`.
    ///
    /// A trailing `/` on `grid_url` is ignored.
    #[must_use]
    pub fn new(grid_url: &str) -> Self {
        Self {
            client: global_client().clone(),
            endpoint: api_endpoint(grid_url),
        }
    }

    /// Full URL of the console API endpoint.
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Lists the ids of all apps in all accounts of the token's user.
    ///
    /// # Errors
    ///
    /// Returns a `NetworkError` if:
    /// - The request cannot be sent.
    /// - The API answers with any status other than 200 (`HttpError`, with the raw body).
    /// - The body is not the expected `data.user.accounts[].apps[].id` document.
    pub async fn list_app_ids(&self, auth_token: &str) -> ZenResult<Vec<AppId>> {
        debug!(url = %self.endpoint, "querying apps");

        let response = self
            .client
            .post(&self.endpoint)
            .header("Authorization", format!("Token {auth_token}"))
            .json(&GraphQlRequest::new(APPS_QUERY))
            .send()
            .await
            .map_err(NetworkError::Reqwest)?;

        let status = response.status();
        let body = response.text().await.map_err(NetworkError::Reqwest)?;

        if status != StatusCode::OK {
            return Err(NetworkError::HttpError {
                status: status.as_u16(),
                url: self.endpoint.clone(),
                body,
            }
            .into());
        }

        let parsed = parse_apps_response(&body).map_err(|e| NetworkError::MalformedResponse {
            url: self.endpoint.clone(),
            message: e.to_string(),
        })?;

        let accounts = parsed.account_count();
        let app_ids = parsed.app_ids();
        info!(accounts, apps = app_ids.len(), "listed apps");

        Ok(app_ids)
    }
}

/// Joins the grid URL and the console API path.
#[must_use]
pub fn api_endpoint(grid_url: &str) -> String {
    format!("{}{CONSOLE_API_PATH}", grid_url.trim_end_matches('/'))
}

/// Parses a 200 response body of [`APPS_QUERY`].
///
/// # Errors
///
/// Returns the `serde_json` error if the body does not have the expected shape.
pub fn parse_apps_response(body: &str) -> serde_json::Result<AppsQueryResponse> {
    serde_json::from_str(body)
}

// zen-update: Shared `zen-common` Subtree Updater
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Wire types for the grid console API.
//!
//! ```text
//! { "data": { "user": { "accounts": [ { "apps": [ { "id": "..." } ] } ] } } }
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

/// GraphQL document listing every app of every account of the current user.
pub const APPS_QUERY: &str = r"
query {
  user {
    accounts {
      id
      apps {
        id
      }
    }
  }
}
";

/// Identifier of a deployable app on the grid.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AppId(String);

impl AppId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for AppId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AppId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for AppId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Request body posted to the console API.
#[derive(Debug, Serialize)]
pub struct GraphQlRequest<'a> {
    pub query: &'a str,
    pub variables: serde_json::Map<String, serde_json::Value>,
}

impl<'a> GraphQlRequest<'a> {
    /// Request with an empty `variables` object.
    #[must_use]
    pub fn new(query: &'a str) -> Self {
        Self {
            query,
            variables: serde_json::Map::new(),
        }
    }
}

/// Top-level response to [`APPS_QUERY`].
#[derive(Debug, Deserialize)]
pub struct AppsQueryResponse {
    pub data: AppsQueryData,
}

#[derive(Debug, Deserialize)]
pub struct AppsQueryData {
    pub user: User,
}

#[derive(Debug, Deserialize)]
pub struct User {
    pub accounts: Vec<Account>,
}

/// Account owning zero or more apps. Its own id is opaque to this tool.
#[derive(Debug, Deserialize)]
pub struct Account {
    #[serde(default)]
    pub id: Option<serde_json::Value>,
    pub apps: Vec<App>,
}

#[derive(Debug, Deserialize)]
pub struct App {
    pub id: AppId,
}

impl AppsQueryResponse {
    /// Flattens `data.user.accounts[*].apps[*].id`, accounts first, then apps
    /// within each account, in response order.
    #[must_use]
    pub fn app_ids(self) -> Vec<AppId> {
        self.data
            .user
            .accounts
            .into_iter()
            .flat_map(|account| account.apps)
            .map(|app| app.id)
            .collect()
    }

    /// Number of accounts in the response.
    #[must_use]
    pub fn account_count(&self) -> usize {
        self.data.user.accounts.len()
    }
}

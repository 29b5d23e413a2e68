//! Record fetching for the avatar dashboard
//!
//! One page of users is read from the demo API. Every failure mode collapses
//! into the same fixed fallback list so the dashboard always has something
//! to show.
use std::collections::HashSet;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, warn};
use url::Url;

use crate::error::{FetchError, LoadError};

/// Number of records requested from the remote source.
pub const PAGE_SIZE: usize = 3;

/// Endpoint the dashboard reads from unless configured otherwise.
pub const DEFAULT_BASE_URL: &str = "https://reqres.in/api/users";

/// Image shown when a record has no usable avatar.
pub const PLACEHOLDER_AVATAR: &str = "https://via.placeholder.com/128";

const DEFAULT_USER_AGENT: &str = concat!("avatar-dash/", env!("CARGO_PKG_VERSION"));

/// One displayable user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Identifier, unique within a single fetch result
    pub id: u64,
    /// Contact address, shown as-is
    pub email: String,
    /// Given name
    pub first_name: String,
    /// Family name
    pub last_name: String,
    /// Avatar image URI, possibly empty
    pub avatar: String,
}

impl Record {
    fn new(id: u64, email: &str, first_name: &str, last_name: &str, avatar: &str) -> Self {
        Self {
            id,
            email: email.to_string(),
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            avatar: avatar.to_string(),
        }
    }

    /// Full name as shown on a card
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name).trim().to_string()
    }

    /// Avatar URI after applying the host allow-list
    pub fn avatar_uri(&self) -> &str {
        avatar_uri(&self.avatar)
    }
}

/// User entry as it appears in the remote `data` list.
#[derive(Debug, Deserialize)]
struct RemoteUser {
    id: u64,
    email: String,
    #[serde(default)]
    first_name: Option<String>,
    #[serde(default)]
    last_name: Option<String>,
    #[serde(default)]
    avatar: Option<String>,
}

impl From<RemoteUser> for Record {
    fn from(user: RemoteUser) -> Self {
        Self {
            id: user.id,
            email: user.email,
            first_name: normalize_name(user.first_name.as_deref().unwrap_or_default()),
            last_name: normalize_name(user.last_name.as_deref().unwrap_or_default()),
            avatar: user.avatar.unwrap_or_default(),
        }
    }
}

/// Paged response envelope. Only `data` is consumed.
#[derive(Debug, Deserialize)]
struct UserPage {
    #[serde(default)]
    data: Option<Vec<RemoteUser>>,
}

/// The fixed records used whenever the remote source cannot be used.
pub fn fallback_records() -> Vec<Record> {
    vec![
        Record::new(
            1,
            "george.bluth@reqres.in",
            "George",
            "Bluth",
            "https://reqres.in/img/faces/1-image.jpg",
        ),
        Record::new(
            2,
            "janet.weaver@reqres.in",
            "Janet",
            "Weaver",
            "https://reqres.in/img/faces/2-image.jpg",
        ),
        Record::new(
            3,
            "emma.wong@reqres.in",
            "Emma",
            "Wong",
            "https://reqres.in/img/faces/3-image.jpg",
        ),
    ]
}

/// Upper-case the first character of a name and lower-case the rest.
pub fn normalize_name(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

/// Resolve an avatar reference against the image host allow-list.
///
/// Only `https` images from `reqres.in/img/faces/` or `via.placeholder.com`
/// are shown; anything else becomes [`PLACEHOLDER_AVATAR`].
pub fn avatar_uri(avatar: &str) -> &str {
    if is_allowed_avatar(avatar) {
        avatar
    } else {
        PLACEHOLDER_AVATAR
    }
}

fn is_allowed_avatar(avatar: &str) -> bool {
    let Ok(url) = Url::parse(avatar) else {
        return false;
    };

    if url.scheme() != "https" {
        return false;
    }

    match url.host_str() {
        Some("reqres.in") => url.path().starts_with("/img/faces/"),
        Some("via.placeholder.com") => true,
        _ => false,
    }
}

fn parse_page(body: &str) -> Result<Vec<Record>, FetchError> {
    let page: UserPage = serde_json::from_str(body)?;
    let users = page.data.ok_or_else(|| FetchError::malformed("missing `data` list"))?;

    if users.is_empty() {
        return Err(FetchError::Empty);
    }

    let mut seen = HashSet::with_capacity(users.len());
    users
        .into_iter()
        .map(|user| {
            if !seen.insert(user.id) {
                return Err(FetchError::malformed(format!("duplicate record id {}", user.id)));
            }
            Ok(Record::from(user))
        })
        .collect()
}

/// Connection settings for the record fetcher
#[derive(Debug, Clone)]
pub struct FetcherConfig {
    /// Endpoint returning the paged user list
    pub base_url: Url,
    /// Whole-request timeout
    pub timeout: Duration,
    /// User agent string
    pub user_agent: String,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            base_url: Url::parse(DEFAULT_BASE_URL).expect("default base URL is valid"),
            timeout: Duration::from_secs(10),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

/// Anything the dashboard can load its records from.
#[async_trait]
pub trait RecordSource: Send + Sync {
    /// Load one ordered sequence of records.
    async fn load(&self) -> Result<Vec<Record>, LoadError>;
}

/// Reads one page of users from the remote demo API
#[derive(Debug, Clone)]
pub struct RecordFetcher {
    client: Client,
    base_url: Url,
}

impl RecordFetcher {
    /// Create a new fetcher
    ///
    /// # Arguments
    /// * `config` - Endpoint, timeout, and user agent to use
    ///
    /// # Returns
    /// * `Result<Self, FetchError>` - New fetcher, or an error if the HTTP
    ///   client could not be built
    pub fn new(config: &FetcherConfig) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.as_str())
            .build()?;

        Ok(Self { client, base_url: config.base_url.clone() })
    }

    /// Get the endpoint URL
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Fetch one page of records, falling back to [`fallback_records`] on
    /// any failure. Never returns an error.
    pub async fn fetch_records(&self) -> Vec<Record> {
        match self.try_fetch().await {
            Ok(records) => {
                debug!(count = records.len(), "Loaded records from remote source");
                records
            },
            Err(err @ (FetchError::Status(_) | FetchError::Empty)) => {
                warn!(error = %err, "Using fallback records");
                fallback_records()
            },
            Err(err) => {
                error!(error = %err, "Using fallback records");
                fallback_records()
            },
        }
    }

    async fn try_fetch(&self) -> Result<Vec<Record>, FetchError> {
        let response = self
            .client
            .get(self.base_url.clone())
            .query(&[("per_page", PAGE_SIZE)])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let body = response.text().await?;
        parse_page(&body)
    }
}

#[async_trait]
impl RecordSource for RecordFetcher {
    async fn load(&self) -> Result<Vec<Record>, LoadError> {
        Ok(self.fetch_records().await)
    }
}

#[cfg(test)]
#[path = "api_tests.rs"]
mod tests;

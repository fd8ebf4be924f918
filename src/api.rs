use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

use crate::config::ClientSettings;

pub const UNKNOWN_USER: &str = "Unknown User";

/// One compared account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProfile {
    pub id: String,
    pub display_name: String,
    pub profile_url: String,
}

/// A game present in both libraries.
#[derive(Debug, Clone, PartialEq)]
pub struct SharedItem {
    pub id: u64,
    pub name: String,
    pub playtime_hours: f64,
    pub tags: Vec<String>,
    pub supports_co_op: bool,
    pub supports_multiplayer: bool,
}

impl SharedItem {
    pub fn is_playable_together(&self) -> bool {
        self.supports_co_op || self.supports_multiplayer
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Comparison {
    pub profiles: [UserProfile; 2],
    pub items: Vec<SharedItem>,
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("API Error: {}", status_line(.code, .reason))]
    Status { code: u16, reason: String },
    #[error(transparent)]
    Network(#[from] reqwest::Error),
    #[error("Failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl From<StatusCode> for ApiError {
    fn from(status: StatusCode) -> Self {
        ApiError::Status {
            code: status.as_u16(),
            reason: status.canonical_reason().unwrap_or_default().to_string(),
        }
    }
}

fn status_line(code: &u16, reason: &str) -> String {
    if reason.is_empty() {
        code.to_string()
    } else {
        format!("{code} {reason}")
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UserInfo {
    #[serde(default)]
    steam_id: Option<String>,
    #[serde(default)]
    persona_name: Option<String>,
    #[serde(default)]
    profile_url: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SharedGame {
    app_id: u64,
    name: String,
    // The service sends explicit nulls as well as omitting keys.
    #[serde(default)]
    playtime: Option<f64>,
    #[serde(default)]
    tags: Option<Vec<String>>,
    #[serde(default)]
    is_co_op: Option<bool>,
    #[serde(default)]
    is_multiplayer: Option<bool>,
}

#[derive(Debug, Deserialize)]
struct CompareResponse {
    #[serde(default)]
    user1: Option<UserInfo>,
    #[serde(default)]
    user2: Option<UserInfo>,
    #[serde(default)]
    shared_games: Option<Vec<SharedGame>>,
}

impl From<Option<UserInfo>> for UserProfile {
    fn from(info: Option<UserInfo>) -> Self {
        let info = info.unwrap_or_default();
        Self {
            id: info.steam_id.unwrap_or_default(),
            display_name: info
                .persona_name
                .filter(|name| !name.is_empty())
                .unwrap_or_else(|| UNKNOWN_USER.to_string()),
            profile_url: info.profile_url.unwrap_or_default(),
        }
    }
}

impl From<SharedGame> for SharedItem {
    fn from(game: SharedGame) -> Self {
        Self {
            id: game.app_id,
            name: game.name,
            playtime_hours: game.playtime.unwrap_or_default(),
            tags: game.tags.unwrap_or_default(),
            supports_co_op: game.is_co_op.unwrap_or_default(),
            supports_multiplayer: game.is_multiplayer.unwrap_or_default(),
        }
    }
}

impl From<CompareResponse> for Comparison {
    fn from(data: CompareResponse) -> Self {
        Self {
            profiles: [data.user1.into(), data.user2.into()],
            items: data
                .shared_games
                .unwrap_or_default()
                .into_iter()
                .map(SharedItem::from)
                .collect(),
        }
    }
}

/// Decode a comparison service success body.
pub fn parse_comparison(body: &[u8]) -> Result<Comparison, ApiError> {
    let data: CompareResponse = serde_json::from_slice(body)?;
    Ok(data.into())
}

/// Client for the comparison service. One attempt per call, no timeout.
#[derive(Debug, Clone)]
pub struct ComparisonClient {
    client: Client,
    settings: ClientSettings,
}

impl ComparisonClient {
    pub fn new(settings: ClientSettings) -> Self {
        Self {
            client: Client::new(),
            settings,
        }
    }

    pub fn settings(&self) -> &ClientSettings {
        &self.settings
    }

    /// Fetch the profiles and shared library of two accounts.
    pub async fn compare(&self, user_id_1: &str, user_id_2: &str) -> Result<Comparison, ApiError> {
        let url = self.settings.compare_url(user_id_1, user_id_2);
        tracing::debug!("Requesting comparison from {}", url);

        let resp = self
            .client
            .get(&url)
            .header(CONTENT_TYPE, "application/json")
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(status.into());
        }

        let body = resp.bytes().await?;
        parse_comparison(&body)
    }

    /// Probe `GET /health`. Not part of the comparison workflow.
    pub async fn check_health(&self) -> Result<(), ApiError> {
        let resp = self.client.get(self.settings.health_url()).send().await?;
        let status = resp.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(status.into())
        }
    }
}

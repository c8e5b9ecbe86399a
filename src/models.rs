use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::properties::Property;

/// Health entry from the status endpoint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiStatus {
    pub service_name: String,
    pub status: String,
}

impl ApiStatus {
    /// Service has no issues
    pub fn is_green(&self) -> bool {
        self.status == "green"
    }

    /// Service has some issues
    pub fn is_yellow(&self) -> bool {
        self.status == "yellow"
    }

    /// Service is unavailable
    pub fn is_red(&self) -> bool {
        self.status == "red"
    }
}

/// Short profile record returned by the uuid lookup endpoints
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct ProfileInfo {
    /// Profile uuid without dashes
    pub id: String,
    /// Username at the current time
    pub name: String,
    /// Account not migrated into a Mojang account
    #[serde(default)]
    pub legacy: bool,
    /// Account in demo mode (not premium)
    #[serde(default)]
    pub demo: bool,
}

/// One entry of a profile's username history
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NameHistoryItem {
    pub name: String,
    /// Absent for the profile's original name
    #[serde(default, with = "chrono::serde::ts_milliseconds_option")]
    pub changed_to_at: Option<DateTime<Utc>>,
}

/// Session-server profile with its signed properties
#[derive(Debug, Clone, Deserialize)]
pub struct ProfileResponse {
    /// Profile uuid without dashes
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub properties: Vec<Property>,
}

/// Result of the authenticate and refresh operations
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthenticateResponse {
    pub access_token: String,
    pub client_token: String,
    /// Always empty for refresh
    #[serde(default)]
    pub available_profiles: Vec<ProfileInfo>,
    pub selected_profile: ProfileInfo,
    pub user: UserInfo,
}

/// The `user` field of an authentication response
#[derive(Debug, Clone, Deserialize)]
pub struct UserInfo {
    pub id: String,
    #[serde(default)]
    pub properties: Vec<Property>,
}

/// Security challenge, flattened from the nested upstream shape
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(from = "RawChallenge")]
pub struct SecurityQuestion {
    pub answer_id: u64,
    pub question_id: u64,
    pub question: String,
}

#[derive(Debug, Deserialize)]
struct RawChallenge {
    answer: RawChallengeAnswer,
    question: RawChallengeQuestion,
}

#[derive(Debug, Deserialize)]
struct RawChallengeAnswer {
    id: u64,
}

#[derive(Debug, Deserialize)]
struct RawChallengeQuestion {
    id: u64,
    question: String,
}

impl From<RawChallenge> for SecurityQuestion {
    fn from(raw: RawChallenge) -> Self {
        Self {
            answer_id: raw.answer.id,
            question_id: raw.question.id,
            question: raw.question.question,
        }
    }
}

/// Answer to a security challenge
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Answer {
    pub id: u64,
    pub answer: String,
}

impl Answer {
    pub fn new(id: u64, answer: impl Into<String>) -> Self {
        Self {
            id,
            answer: answer.into(),
        }
    }
}

/// Sales statistics for the requested metric keys
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Statistics {
    pub total: u64,
    pub last24h: u64,
    pub sale_velocity_per_seconds: f64,
}

/// Profile as served by the Minecraft Services API
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct ServicesProfile {
    /// Profile uuid without dashes
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub skins: Vec<ServicesSkin>,
    #[serde(default)]
    pub capes: Vec<ServicesCape>,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct ServicesSkin {
    pub id: String,
    /// Only "ACTIVE" is documented upstream, kept open for alternates
    pub state: String,
    pub url: String,
    pub variant: String,
    #[serde(default)]
    pub alias: Option<String>,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct ServicesCape {
    pub id: String,
    /// Only "ACTIVE" is documented upstream, kept open for alternates
    pub state: String,
    pub url: String,
    #[serde(default)]
    pub alias: Option<String>,
}

/// Yggdrasil authenticate request
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AuthenticateRequest {
    pub username: String,
    pub password: String,
    pub client_token: String,
    pub request_user: bool,
    pub agent: Agent,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct Agent {
    pub name: String,
    pub version: u32,
}

impl Agent {
    pub fn minecraft() -> Self {
        Self {
            name: "Minecraft".to_string(),
            version: 1,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RefreshRequest {
    pub access_token: String,
    pub client_token: String,
    pub request_user: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ValidateRequest {
    pub access_token: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct InvalidateRequest {
    pub access_token: String,
    pub client_token: String,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct SignoutRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct JoinServerRequest {
    pub access_token: String,
    pub selected_profile: String,
    pub server_id: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct StatisticsRequest {
    pub metric_keys: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct UploadSkinByUrlRequest {
    pub variant: String,
    pub url: String,
}

/// Error body of the security-flow endpoints
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct OperationErrorBody {
    pub error_message: String,
}

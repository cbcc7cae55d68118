//! Request and response records for the admin API. Fields follow the
//! backend's camelCase names and missing display fields decode as defaults.
//! Record ids and dashboard counters are required, so a failed envelope never
//! decodes as an empty record through the raw fallback.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The signed-in administrator as returned by the login endpoint.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Identity {
    pub id: String,
    pub email: String,
    pub user_name: String,
    pub name: String,
    pub address: String,
    pub image: String,
    pub user_type: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub user_name: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub user_type: String,
    pub status: Option<String>,
    pub warnings: Option<u32>,
    pub last_active: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingProfile {
    pub id: String,
    #[serde(default)]
    pub user_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub user_type: String,
    #[serde(default)]
    pub profile_image: String,
    #[serde(default)]
    pub medical_license: String,
    #[serde(default)]
    pub submitted_at: String,
    #[serde(default)]
    pub specialty: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportedPost {
    pub id: i64,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub user_image: String,
    #[serde(default)]
    pub user_name: String,
    #[serde(default)]
    pub user_id: String,
    #[serde(default)]
    pub time: String,
    #[serde(default)]
    pub comments_count: u64,
    #[serde(default)]
    pub reactions_count: u64,
    pub post_image: Option<String>,
    #[serde(default)]
    pub report_reason: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportedComment {
    pub id: i64,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub post_id: i64,
    #[serde(default)]
    pub time: String,
    #[serde(default)]
    pub user_id: String,
    #[serde(default)]
    pub user_image: String,
    #[serde(default)]
    pub user_name: String,
    #[serde(default)]
    pub reactions_count: u64,
    #[serde(default)]
    pub report_reason: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopPost {
    pub id: i64,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub user_image: String,
    #[serde(default)]
    pub user_name: String,
    #[serde(default)]
    pub user_id: String,
    #[serde(default)]
    pub time: String,
    #[serde(default)]
    pub comments_count: u64,
    #[serde(default)]
    pub reactions_count: u64,
    #[serde(default)]
    pub engagement_score: u64,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_users: u64,
    pub pending_verifications: u64,
    pub reported_content: u64,
    pub active_warnings: u64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserStatus {
    Active,
    Disabled,
}

impl UserStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Disabled => "disabled",
        }
    }
}

impl fmt::Display for UserStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserStatus {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "active" => Ok(Self::Active),
            "disabled" => Ok(Self::Disabled),
            other => Err(format!("invalid user status: {other}")),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    Post,
    Comment,
}

impl ContentKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Post => "post",
            Self::Comment => "comment",
        }
    }
}

impl fmt::Display for ContentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContentKind {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "post" => Ok(Self::Post),
            "comment" => Ok(Self::Comment),
            other => Err(format!("invalid content type: {other}")),
        }
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct LoginRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

/// Login payload; only `user` and `token` are guaranteed by the backend.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub user: Identity,
    pub token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default, alias = "expiration", alias = "tokenExpiry")]
    pub expires_at: Option<String>,
}

#[derive(Clone, Debug, Serialize)]
pub struct StatusUpdate {
    pub status: UserStatus,
}

#[derive(Clone, Debug, Serialize)]
pub struct WarningRequest {
    pub reason: String,
}

#[derive(Clone, Debug, Serialize)]
pub struct RejectionRequest {
    pub reason: Option<String>,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentWarning {
    pub user_id: String,
    pub content_type: ContentKind,
    pub content_id: i64,
}

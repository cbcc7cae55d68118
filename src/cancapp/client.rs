//! Typed wrappers for the admin endpoints. Each helper is a single gateway
//! call; paths live here so views never build URLs themselves. The backend
//! enforces authorization, the console only forwards the bearer token.

use super::{
    envelope::Ack,
    error::{Error, Result},
    gateway::{CallOptions, Gateway},
    types::{
        ContentKind, ContentWarning, DashboardStats, LoginRequest, LoginResponse, PendingProfile,
        RejectionRequest, ReportedComment, ReportedPost, StatusUpdate, TopPost, User, UserStatus,
        WarningRequest,
    },
};
use secrecy::{ExposeSecret, SecretString};
use serde_json::Value;
use tracing::debug;
use url::Url;

#[derive(Clone, Debug)]
pub struct AdminApi {
    gateway: Gateway,
}

impl AdminApi {
    #[must_use]
    pub fn new(gateway: Gateway) -> Self {
        Self { gateway }
    }

    #[must_use]
    pub const fn gateway(&self) -> &Gateway {
        &self.gateway
    }

    /// Exchanges credentials for a token and identity.
    /// The password is only exposed while serializing the request body.
    ///
    /// # Errors
    /// Returns `Error::Auth` for missing or rejected credentials, otherwise the
    /// gateway error.
    pub async fn login(&self, email: &str, password: &SecretString) -> Result<LoginResponse> {
        let email = email.trim();
        if email.is_empty() || password.expose_secret().is_empty() {
            return Err(Error::Auth("Email and password are required.".to_string()));
        }

        let options = CallOptions::post().json(&LoginRequest {
            email,
            password: password.expose_secret(),
        })?;

        match self.gateway.fetch("/api/auth/login", options).await {
            Err(Error::Request { status, message }) if matches!(status, 400 | 401 | 403) => {
                debug!(status, "credentials rejected");
                Err(Error::Auth(message))
            }
            // A 2xx carrying a failed envelope is a rejection too.
            Err(Error::Decode(message)) => {
                debug!("login response rejected");
                Err(Error::Auth(message))
            }
            other => other,
        }
    }

    /// # Errors
    /// Returns the gateway error if the request or decoding fails.
    pub async fn dashboard_stats(&self) -> Result<DashboardStats> {
        self.gateway
            .fetch("/api/admin/dashboard/stats", CallOptions::get())
            .await
    }

    /// # Errors
    /// Returns the gateway error if the request or decoding fails.
    pub async fn users(&self) -> Result<Vec<User>> {
        self.list("/api/admin/users").await
    }

    /// # Errors
    /// Returns `Error::Config` for an empty id, otherwise the gateway error.
    pub async fn user(&self, user_id: &str) -> Result<User> {
        let endpoint = path(&["api", "admin", "users", required(user_id, "User id")?])?;
        self.gateway.fetch(&endpoint, CallOptions::get()).await
    }

    /// # Errors
    /// Returns `Error::Config` for an empty id, otherwise the gateway error.
    pub async fn update_user_status(&self, user_id: &str, status: UserStatus) -> Result<()> {
        let endpoint = path(&[
            "api",
            "admin",
            "users",
            required(user_id, "User id")?,
            "status",
        ])?;
        let options = CallOptions::put().json(&StatusUpdate { status })?;
        self.acknowledge(&endpoint, options).await
    }

    /// # Errors
    /// Returns `Error::Config` for an empty id or reason, otherwise the gateway error.
    pub async fn add_user_warning(&self, user_id: &str, reason: &str) -> Result<()> {
        let endpoint = path(&[
            "api",
            "admin",
            "users",
            required(user_id, "User id")?,
            "warnings",
        ])?;
        let options = CallOptions::post().json(&WarningRequest {
            reason: required(reason, "Warning reason")?.to_string(),
        })?;
        self.acknowledge(&endpoint, options).await
    }

    /// # Errors
    /// Returns the gateway error if the request or decoding fails.
    pub async fn pending_profiles(&self) -> Result<Vec<PendingProfile>> {
        self.list("/api/admin/verifications/pending").await
    }

    /// # Errors
    /// Returns `Error::Config` for an empty id, otherwise the gateway error.
    pub async fn approve_profile(&self, profile_id: &str) -> Result<()> {
        let endpoint = path(&[
            "api",
            "admin",
            "verifications",
            required(profile_id, "Profile id")?,
            "approve",
        ])?;
        self.acknowledge(&endpoint, CallOptions::post()).await
    }

    /// # Errors
    /// Returns `Error::Config` for an empty id, otherwise the gateway error.
    pub async fn reject_profile(&self, profile_id: &str, reason: Option<&str>) -> Result<()> {
        let endpoint = path(&[
            "api",
            "admin",
            "verifications",
            required(profile_id, "Profile id")?,
            "reject",
        ])?;
        let reason = reason
            .map(str::trim)
            .filter(|reason| !reason.is_empty())
            .map(str::to_string);
        let options = CallOptions::post().json(&RejectionRequest { reason })?;
        self.acknowledge(&endpoint, options).await
    }

    /// # Errors
    /// Returns the gateway error if the request or decoding fails.
    pub async fn reported_posts(&self) -> Result<Vec<ReportedPost>> {
        self.list("/api/admin/content/reported-posts").await
    }

    /// # Errors
    /// Returns the gateway error if the request or decoding fails.
    pub async fn reported_comments(&self) -> Result<Vec<ReportedComment>> {
        self.list("/api/admin/content/reported-comments").await
    }

    /// # Errors
    /// Returns the gateway error if the request or decoding fails.
    pub async fn top_posts(&self) -> Result<Vec<TopPost>> {
        self.list("/api/admin/content/top-posts").await
    }

    /// # Errors
    /// Returns the gateway error if the request or decoding fails.
    pub async fn remove_post(&self, post_id: i64) -> Result<()> {
        let endpoint = format!("/api/admin/content/posts/{post_id}");
        self.acknowledge(&endpoint, CallOptions::delete()).await
    }

    /// # Errors
    /// Returns the gateway error if the request or decoding fails.
    pub async fn remove_comment(&self, comment_id: i64) -> Result<()> {
        let endpoint = format!("/api/admin/content/comments/{comment_id}");
        self.acknowledge(&endpoint, CallOptions::delete()).await
    }

    /// # Errors
    /// Returns `Error::Config` for an empty user id, otherwise the gateway error.
    pub async fn warn_user_for_content(
        &self,
        user_id: &str,
        content_type: ContentKind,
        content_id: i64,
    ) -> Result<()> {
        let options = CallOptions::post().json(&ContentWarning {
            user_id: required(user_id, "User id")?.to_string(),
            content_type,
            content_id,
        })?;
        self.acknowledge("/api/admin/content/warn", options).await
    }

    /// # Errors
    /// Returns the gateway error if the request or decoding fails.
    pub async fn recent_activity(&self) -> Result<Vec<Value>> {
        self.list("/api/admin/activity/recent").await
    }

    /// # Errors
    /// Returns the gateway error if the request or decoding fails.
    pub async fn user_distribution(&self) -> Result<Vec<Value>> {
        self.list("/api/admin/users/distribution").await
    }

    /// Lists treat an empty body as an empty list.
    async fn list<T: serde::de::DeserializeOwned>(&self, endpoint: &str) -> Result<Vec<T>> {
        Ok(self
            .gateway
            .call(endpoint, CallOptions::get())
            .await?
            .content()
            .unwrap_or_default())
    }

    async fn acknowledge(&self, endpoint: &str, options: CallOptions) -> Result<()> {
        self.gateway.call::<Ack>(endpoint, options).await?;
        Ok(())
    }
}

fn required<'a>(value: &'a str, what: &str) -> Result<&'a str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(Error::Config(format!("{what} is required.")))
    } else {
        Ok(trimmed)
    }
}

/// Absolute endpoint path with each segment percent-encoded.
fn path(segments: &[&str]) -> Result<String> {
    let mut url = Url::parse("http://localhost/")
        .map_err(|err| Error::Config(format!("Failed to build path: {err}")))?;
    url.path_segments_mut()
        .map_err(|()| Error::Config("Failed to build path".to_string()))?
        .clear()
        .extend(segments);
    Ok(url.path().to_string())
}

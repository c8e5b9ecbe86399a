use std::collections::HashMap;

use reqwest::Client;
use reqwest::multipart::{Form, Part};
use tracing::{debug, instrument};
use uuid::Uuid;

use crate::blocked_servers::BlockedServers;
use crate::config::ApiConfig;
use crate::errors::{Error, Result};
use crate::models::*;
use crate::pipeline;

/// Main client for the Mojang account, session and auth services
#[derive(Debug, Clone)]
pub struct MojangClient {
    config: ApiConfig,
    http: Client,
}

impl MojangClient {
    /// Create a client against the official hosts
    pub fn new() -> Result<Self> {
        Self::with_config(ApiConfig::default())
    }

    /// Create a client with custom endpoints, timeout or limits
    pub fn with_config(config: ApiConfig) -> Result<Self> {
        let mut builder = Client::builder().timeout(config.timeout);
        if let Some(user_agent) = &config.user_agent {
            builder = builder.user_agent(user_agent);
        }
        let http = builder.build()?;

        Ok(Self { config, http })
    }

    /// Create a client over a caller-supplied transport
    pub fn with_http_client(config: ApiConfig, http: Client) -> Self {
        Self { config, http }
    }

    /// Current health of the Mojang services
    #[instrument(skip(self))]
    pub async fn api_status(&self) -> Result<Vec<ApiStatus>> {
        let url = self.config.status_base.join("check")?;

        debug!("Fetching API status");
        let request = self.http.get(url).build()?;
        let response = pipeline::send(&self.http, request).await?;

        let body: Vec<HashMap<String, String>> = serde_json::from_str(&response.text().await?)?;
        Ok(body
            .into_iter()
            .flatten()
            .map(|(service_name, status)| ApiStatus {
                service_name,
                status,
            })
            .collect())
    }

    /// Look up the profile currently holding a username
    #[instrument(skip(self))]
    pub async fn username_to_uuid(
        &self,
        username: &str,
        at_time: Option<i64>,
    ) -> Result<ProfileInfo> {
        let mut url = self
            .config
            .api_base
            .join(&format!("users/profiles/minecraft/{username}"))?;
        if let Some(at_time) = at_time {
            url.query_pairs_mut()
                .append_pair("atTime", &at_time.to_string());
        }

        debug!("Resolving username to uuid");
        let request = self.http.get(url).build()?;
        let response = pipeline::send(&self.http, request).await?;

        Ok(serde_json::from_str(&response.text().await?)?)
    }

    /// Username history of a profile, oldest first
    #[instrument(skip(self))]
    pub async fn uuid_to_name_history(&self, uuid: &str) -> Result<Vec<NameHistoryItem>> {
        let url = self
            .config
            .api_base
            .join(&format!("user/profiles/{uuid}/names"))?;

        debug!("Fetching name history");
        let request = self.http.get(url).build()?;
        let response = pipeline::send(&self.http, request).await?;

        Ok(serde_json::from_str(&response.text().await?)?)
    }

    /// Profile with its signed texture properties
    #[instrument(skip(self))]
    pub async fn uuid_to_textures(&self, uuid: &str) -> Result<ProfileResponse> {
        let mut url = self
            .config
            .session_base
            .join(&format!("session/minecraft/profile/{uuid}"))?;
        url.query_pairs_mut().append_pair("unsigned", "false");

        debug!("Fetching profile textures");
        let request = self.http.get(url).build()?;
        let response = pipeline::send(&self.http, request).await?;

        Ok(serde_json::from_str(&response.text().await?)?)
    }

    /// Helper to exchange a username for the corresponding textures
    #[instrument(skip(self))]
    pub async fn username_to_textures(&self, username: &str) -> Result<ProfileResponse> {
        let profile = self.username_to_uuid(username, None).await?;
        self.uuid_to_textures(&profile.id).await
    }

    /// Bulk username lookup. Empty names are dropped before the configured
    /// cap is enforced; exceeding it fails before any request is sent.
    #[instrument(skip(self, names))]
    pub async fn usernames_to_uuids(&self, names: &[&str]) -> Result<Vec<ProfileInfo>> {
        let names: Vec<&str> = names.iter().copied().filter(|name| !name.is_empty()).collect();
        if names.len() > self.config.profiles_per_lookup {
            return Err(Error::InvalidInput(format!(
                "You cannot request more than {} names per request",
                self.config.profiles_per_lookup
            )));
        }

        let url = self.config.api_base.join("profiles/minecraft")?;

        debug!(count = names.len(), "Resolving usernames to uuids");
        let request = self.http.post(url).json(&names).build()?;
        let response = pipeline::send(&self.http, request).await?;

        Ok(serde_json::from_str(&response.text().await?)?)
    }

    /// Authenticate with a Mojang account. A fresh v4 uuid is minted as the
    /// client token when the caller does not supply one.
    #[instrument(skip(self, password, client_token))]
    pub async fn authenticate(
        &self,
        login: &str,
        password: &str,
        client_token: Option<String>,
    ) -> Result<AuthenticateResponse> {
        let client_token = client_token.unwrap_or_else(|| Uuid::new_v4().to_string());
        let body = AuthenticateRequest {
            username: login.to_string(),
            password: password.to_string(),
            client_token,
            request_user: true,
            agent: Agent::minecraft(),
        };

        let url = self.config.auth_base.join("authenticate")?;

        debug!("Authenticating");
        let request = self.http.post(url).json(&body).build()?;
        let response = pipeline::send(&self.http, request).await?;

        Ok(serde_json::from_str(&response.text().await?)?)
    }

    /// Exchange a valid access token for a fresh one
    #[instrument(skip(self, access_token))]
    pub async fn refresh(
        &self,
        access_token: &str,
        client_token: &str,
    ) -> Result<AuthenticateResponse> {
        let body = RefreshRequest {
            access_token: access_token.to_string(),
            client_token: client_token.to_string(),
            request_user: true,
        };

        let url = self.config.auth_base.join("refresh")?;

        debug!("Refreshing access token");
        let request = self.http.post(url).json(&body).build()?;
        let response = pipeline::send(&self.http, request).await?;

        Ok(serde_json::from_str(&response.text().await?)?)
    }

    /// Whether an access token is still usable. A forbidden outcome is the
    /// expected negative answer here, not a failure.
    #[instrument(skip(self, access_token))]
    pub async fn validate(&self, access_token: &str) -> Result<bool> {
        let body = ValidateRequest {
            access_token: access_token.to_string(),
        };

        let url = self.config.auth_base.join("validate")?;

        debug!("Validating access token");
        let request = self.http.post(url).json(&body).build()?;
        match pipeline::send(&self.http, request).await {
            Ok(response) => Ok(response.status() == reqwest::StatusCode::NO_CONTENT),
            Err(Error::Forbidden { .. }) => Ok(false),
            Err(err) => Err(err),
        }
    }

    /// Invalidate an access token
    #[instrument(skip(self, access_token))]
    pub async fn invalidate(&self, access_token: &str, client_token: &str) -> Result<()> {
        let body = InvalidateRequest {
            access_token: access_token.to_string(),
            client_token: client_token.to_string(),
        };

        let url = self.config.auth_base.join("invalidate")?;

        debug!("Invalidating access token");
        let request = self.http.post(url).json(&body).build()?;
        pipeline::send(&self.http, request).await?;

        Ok(())
    }

    /// Invalidate every token of an account using its credentials. Like
    /// `validate`, a forbidden outcome coerces to `false`.
    #[instrument(skip(self, password))]
    pub async fn signout(&self, login: &str, password: &str) -> Result<bool> {
        let body = SignoutRequest {
            username: login.to_string(),
            password: password.to_string(),
        };

        let url = self.config.auth_base.join("signout")?;

        debug!("Signing out");
        let request = self.http.post(url).json(&body).build()?;
        match pipeline::send(&self.http, request).await {
            Ok(response) => Ok(response.status() == reqwest::StatusCode::NO_CONTENT),
            Err(Error::Forbidden { .. }) => Ok(false),
            Err(err) => Err(err),
        }
    }

    /// Client side of the server join handshake
    #[instrument(skip(self, access_token))]
    pub async fn join_server(
        &self,
        access_token: &str,
        account_uuid: &str,
        server_id: &str,
    ) -> Result<()> {
        let body = JoinServerRequest {
            access_token: access_token.to_string(),
            selected_profile: account_uuid.to_string(),
            server_id: server_id.to_string(),
        };

        let url = self.config.session_base.join("session/minecraft/join")?;

        debug!("Joining server");
        let request = self.http.post(url).json(&body).build()?;
        pipeline::send(&self.http, request).await?;

        Ok(())
    }

    /// Server side of the join handshake. The upstream signals "has not
    /// joined" with an empty 200 body, which surfaces as `NoContent`.
    #[instrument(skip(self))]
    pub async fn has_joined_server(
        &self,
        username: &str,
        server_id: &str,
    ) -> Result<ProfileResponse> {
        let mut url = self.config.session_base.join("session/minecraft/hasJoined")?;
        url.query_pairs_mut()
            .append_pair("username", username)
            .append_pair("serverId", server_id);

        debug!("Verifying server join");
        let request = self.http.get(url).build()?;
        let response = pipeline::send(&self.http, request).await?;

        let url = response.url().clone();
        let body = response.text().await?;
        if body.is_empty() {
            return Err(Error::NoContent { url });
        }

        Ok(serde_json::from_str(&body)?)
    }

    /// Fetch the blocked-servers hash list
    #[instrument(skip(self))]
    pub async fn blocked_servers(&self) -> Result<BlockedServers> {
        let url = self.config.session_base.join("blockedservers")?;

        debug!("Fetching blocked servers");
        let request = self.http.get(url).build()?;
        let response = pipeline::send(&self.http, request).await?;

        Ok(BlockedServers::parse(&response.text().await?))
    }

    /// Point the account's skin at an already-hosted texture
    #[instrument(skip(self, access_token))]
    pub async fn change_skin(
        &self,
        access_token: &str,
        account_uuid: &str,
        skin_url: &str,
        is_slim: bool,
    ) -> Result<()> {
        let url = self
            .config
            .api_base
            .join(&format!("user/profile/{account_uuid}/skin"))?;
        let model = if is_slim { "slim" } else { "" };

        debug!("Changing skin by url");
        let request = self
            .http
            .post(url)
            .header("Authorization", format!("Bearer {}", access_token))
            .form(&[("model", model), ("url", skin_url)])
            .build()?;
        pipeline::send(&self.http, request).await?;

        Ok(())
    }

    /// Upload a skin texture for the account (legacy endpoint)
    #[instrument(skip(self, access_token, skin))]
    pub async fn upload_skin(
        &self,
        access_token: &str,
        account_uuid: &str,
        skin: Vec<u8>,
        is_slim: bool,
    ) -> Result<()> {
        let url = self
            .config
            .api_base
            .join(&format!("user/profile/{account_uuid}/skin"))?;
        let form = Form::new()
            .part("file", Part::bytes(skin).file_name("char.png"))
            .text("model", if is_slim { "slim" } else { "" });

        debug!("Uploading skin");
        let request = self
            .http
            .put(url)
            .header("Authorization", format!("Bearer {}", access_token))
            .multipart(form)
            .build()?;
        pipeline::send(&self.http, request).await?;

        Ok(())
    }

    /// Reset the account's skin to the default
    #[instrument(skip(self, access_token))]
    pub async fn reset_skin(&self, access_token: &str, account_uuid: &str) -> Result<()> {
        let url = self
            .config
            .api_base
            .join(&format!("user/profile/{account_uuid}/skin"))?;

        debug!("Resetting skin");
        let request = self
            .http
            .delete(url)
            .header("Authorization", format!("Bearer {}", access_token))
            .build()?;
        pipeline::send(&self.http, request).await?;

        Ok(())
    }

    /// Succeeds when the current location is trusted; a non-empty body
    /// carries the server's explanation and becomes `Operation`.
    #[instrument(skip(self, access_token))]
    pub async fn is_security_questions_needed(&self, access_token: &str) -> Result<()> {
        let url = self.config.api_base.join("user/security/location")?;

        debug!("Checking security location");
        let request = self
            .http
            .get(url)
            .header("Authorization", format!("Bearer {}", access_token))
            .build()?;
        let response = pipeline::send(&self.http, request).await?;

        let body = response.text().await?;
        if !body.is_empty() {
            let error: OperationErrorBody = serde_json::from_str(&body)?;
            return Err(Error::Operation(error.error_message));
        }

        Ok(())
    }

    /// Security challenges assigned to the account
    #[instrument(skip(self, access_token))]
    pub async fn questions(&self, access_token: &str) -> Result<Vec<SecurityQuestion>> {
        let url = self.config.api_base.join("user/security/challenges")?;

        debug!("Fetching security questions");
        let request = self
            .http
            .get(url)
            .header("Authorization", format!("Bearer {}", access_token))
            .build()?;
        let response = pipeline::send(&self.http, request).await?;

        Ok(serde_json::from_str(&response.text().await?)?)
    }

    /// Submit security answers; an empty body means they were accepted
    #[instrument(skip(self, access_token, answers))]
    pub async fn answer(&self, access_token: &str, answers: &[Answer]) -> Result<bool> {
        let url = self.config.api_base.join("user/security/location")?;

        debug!(count = answers.len(), "Submitting security answers");
        let request = self
            .http
            .post(url)
            .header("Authorization", format!("Bearer {}", access_token))
            .json(&answers)
            .build()?;
        let response = pipeline::send(&self.http, request).await?;

        Ok(response.text().await?.is_empty())
    }

    /// Sales statistics for the given metric keys
    #[instrument(skip(self))]
    pub async fn statistics(&self, metric_keys: Vec<String>) -> Result<Statistics> {
        let body = StatisticsRequest { metric_keys };

        let url = self.config.api_base.join("orders/statistics")?;

        debug!("Fetching statistics");
        let request = self.http.post(url).json(&body).build()?;
        let response = pipeline::send(&self.http, request).await?;

        Ok(serde_json::from_str(&response.text().await?)?)
    }

    /// Profile of the authenticated account on the Minecraft Services API
    #[instrument(skip(self, access_token))]
    pub async fn services_profile(&self, access_token: &str) -> Result<ServicesProfile> {
        let url = self.config.services_base.join("minecraft/profile")?;

        debug!("Fetching services profile");
        let request = self
            .http
            .get(url)
            .header("Authorization", format!("Bearer {}", access_token))
            .build()?;
        let response = pipeline::send(&self.http, request).await?;

        Ok(serde_json::from_str(&response.text().await?)?)
    }

    /// Upload a skin texture through the Minecraft Services API
    #[instrument(skip(self, access_token, skin))]
    pub async fn upload_skin_by_file(
        &self,
        access_token: &str,
        skin: Vec<u8>,
        is_slim: bool,
    ) -> Result<()> {
        let url = self.config.services_base.join("minecraft/profile/skins")?;
        let form = Form::new()
            .part("file", Part::bytes(skin).file_name("char.png"))
            .text("variant", if is_slim { "slim" } else { "classic" });

        debug!("Uploading skin to services API");
        let request = self
            .http
            .post(url)
            .header("Authorization", format!("Bearer {}", access_token))
            .multipart(form)
            .build()?;
        pipeline::send(&self.http, request).await?;

        Ok(())
    }

    /// Point the skin at an already-hosted texture through the Minecraft
    /// Services API
    #[instrument(skip(self, access_token))]
    pub async fn upload_skin_by_url(
        &self,
        access_token: &str,
        skin_url: &str,
        is_slim: bool,
    ) -> Result<()> {
        let url = self.config.services_base.join("minecraft/profile/skins")?;
        let body = UploadSkinByUrlRequest {
            variant: if is_slim { "slim" } else { "classic" }.to_string(),
            url: skin_url.to_string(),
        };

        debug!("Changing skin by url through services API");
        let request = self
            .http
            .post(url)
            .header("Authorization", format!("Bearer {}", access_token))
            .json(&body)
            .build()?;
        pipeline::send(&self.http, request).await?;

        Ok(())
    }
}

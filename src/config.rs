use std::time::Duration;
use url::Url;

/// Official Mojang service hosts
pub mod endpoints {
    pub const API: &str = "https://api.mojang.com";
    pub const AUTH_SERVER: &str = "https://authserver.mojang.com";
    pub const SESSION_SERVER: &str = "https://sessionserver.mojang.com";
    pub const STATUS: &str = "https://status.mojang.com";
    pub const SERVICES: &str = "https://api.minecraftservices.com";
}

/// Fixed timeout per physical attempt; every retry gets a fresh window
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Retries after the initial attempt (3 total attempts)
pub const MAX_RETRIES: u32 = 2;

/// Upstream-documented cap on names per bulk uuid lookup
pub const DEFAULT_PROFILES_PER_LOOKUP: usize = 100;

/// Configuration for MojangClient
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Base URL of the main account API (api.mojang.com)
    pub api_base: Url,

    /// Base URL of the Yggdrasil auth server (authserver.mojang.com)
    pub auth_base: Url,

    /// Base URL of the session server (sessionserver.mojang.com)
    pub session_base: Url,

    /// Base URL of the status service (status.mojang.com)
    pub status_base: Url,

    /// Base URL of the Minecraft Services API (api.minecraftservices.com)
    pub services_base: Url,

    /// Per-attempt request timeout
    pub timeout: Duration,

    /// Custom user agent (optional)
    pub user_agent: Option<String>,

    /// Maximum number of names accepted by `usernames_to_uuids`
    pub profiles_per_lookup: usize,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            api_base: Url::parse(endpoints::API).expect("valid API base URL"),
            auth_base: Url::parse(endpoints::AUTH_SERVER).expect("valid auth base URL"),
            session_base: Url::parse(endpoints::SESSION_SERVER).expect("valid session base URL"),
            status_base: Url::parse(endpoints::STATUS).expect("valid status base URL"),
            services_base: Url::parse(endpoints::SERVICES).expect("valid services base URL"),
            timeout: REQUEST_TIMEOUT,
            user_agent: Some("mojang-api".to_string()),
            profiles_per_lookup: DEFAULT_PROFILES_PER_LOOKUP,
        }
    }
}

impl ApiConfig {
    /// Point every service at a single host, mainly for mock servers in tests
    pub fn with_base(base: Url) -> Self {
        Self {
            api_base: base.clone(),
            auth_base: base.clone(),
            session_base: base.clone(),
            status_base: base.clone(),
            services_base: base,
            ..Self::default()
        }
    }
}

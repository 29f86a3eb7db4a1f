//! Client Configuration
//! Mission: Resolve backend URL, session file and timeouts from the environment

/// Runtime configuration, resolved once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the EcoVault backend API (no trailing slash).
    pub api_url: String,
    /// Where the file-backed session store lives.
    pub session_file: String,
    /// Timeout applied to every auth HTTP call, in seconds.
    pub http_timeout_secs: u64,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenv::dotenv().ok();

        let api_url = std::env::var("ECOVAULT_API_URL")
            .unwrap_or_else(|_| "http://localhost:8080/api".to_string());
        // The backend routes are joined as "{api_url}/public/...".
        let api_url = api_url.trim_end_matches('/').to_string();

        let session_file = std::env::var("ECOVAULT_SESSION_FILE")
            .unwrap_or_else(|_| "./ecovault_session.json".to_string());

        let http_timeout_secs = std::env::var("ECOVAULT_HTTP_TIMEOUT_SECS")
            .unwrap_or_else(|_| "10".to_string())
            .parse()
            .unwrap_or(10);

        Ok(Self {
            api_url,
            session_file,
            http_timeout_secs,
        })
    }
}

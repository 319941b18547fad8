use std::env;
use std::time::Duration;
use url::Url;

pub const DEFAULT_CRM_BASE_URL: &str = "https://ttr171-api.iqsetter.com/crm/lead/create";
const DEFAULT_PORT: u16 = 5000;
const DEV_FRONTEND_ORIGIN: &str = "http://localhost:3000";

#[derive(Clone)]
pub struct RelayConfig {
    /// Server port
    pub port: u16,
    /// Production frontend origin, added to the CORS allow-list when set
    pub frontend_url: Option<String>,
    /// CRM auth key (None = every lead submission fails with a configuration error)
    pub crm_auth_key: Option<String>,
    /// CRM lead-create endpoint, without the auth key
    pub crm_base_url: Url,
    /// Outbound request timeout (None = wait for the CRM indefinitely)
    pub crm_timeout: Option<Duration>,
    /// CORS allowed origins
    pub allowed_origins: Vec<String>,
}

impl std::fmt::Debug for RelayConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RelayConfig")
            .field("port", &self.port)
            .field("frontend_url", &self.frontend_url)
            .field(
                "crm_auth_key",
                &self.crm_auth_key.as_ref().map(|_| "[REDACTED]"),
            )
            .field("crm_base_url", &self.crm_base_url.as_str())
            .field("crm_timeout", &self.crm_timeout)
            .field("allowed_origins", &self.allowed_origins)
            .finish()
    }
}

impl RelayConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the config from an arbitrary variable source. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let port: u16 = match var("PORT") {
            Some(raw) => raw
                .parse()
                .map_err(|_| ConfigError::InvalidNumber("PORT", raw))?,
            None => DEFAULT_PORT,
        };

        let frontend_url = var("FRONTEND_URL");

        // Missing key is reported per request, not at startup
        let crm_auth_key = var("CRM_AUTH_KEY");
        if crm_auth_key.is_none() {
            tracing::warn!("CRM_AUTH_KEY not set; lead submissions will be rejected");
        }

        let base = var("CRM_BASE_URL").unwrap_or_else(|| DEFAULT_CRM_BASE_URL.to_string());
        let crm_base_url = Url::parse(&base).map_err(|_| ConfigError::InvalidUrl(base.clone()))?;
        if crm_base_url.cannot_be_a_base() {
            return Err(ConfigError::InvalidUrl(base));
        }

        let crm_timeout = match var("CRM_TIMEOUT_SECS") {
            Some(raw) => {
                let secs: u64 = raw
                    .parse()
                    .map_err(|_| ConfigError::InvalidNumber("CRM_TIMEOUT_SECS", raw))?;
                Some(Duration::from_secs(secs))
            }
            None => None,
        };

        let allowed_origins = build_allowed_origins(frontend_url.as_deref());

        Ok(Self {
            port,
            frontend_url,
            crm_auth_key,
            crm_base_url,
            crm_timeout,
            allowed_origins,
        })
    }
}

/// The development origin plus the production frontend, if configured.
pub fn build_allowed_origins(frontend_url: Option<&str>) -> Vec<String> {
    let mut origins = vec![DEV_FRONTEND_ORIGIN.to_string()];
    if let Some(url) = frontend_url.filter(|u| !u.is_empty()) {
        if !origins.iter().any(|o| o == url) {
            origins.push(url.to_string());
        }
    }
    origins
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid number for {0}: {1}")]
    InvalidNumber(&'static str, String),

    #[error("invalid URL: {0}")]
    InvalidUrl(String),
}

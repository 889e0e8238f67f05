//! Configuration for the ChemNet explorer.

use std::time::Duration;

use url::Url;

/// API configuration constants.
pub mod api {
    use std::time::Duration;

    /// Base URL for the ChemNet REST API.
    pub const BASE_URL: &str = "https://dabrahamsson.pythonanywhere.com/api";

    /// Host serving the rendered network visualizations.
    pub const VISUALIZATION_HOST: &str = "https://pedrolopezmorales.pythonanywhere.com";

    /// Connection timeout.
    pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

    /// Maximum idle keepalive connections per host.
    pub const MAX_KEEPALIVE: usize = 10;

    /// Keepalive expiry.
    pub const KEEPALIVE_EXPIRY: Duration = Duration::from_secs(30);
}

/// Resource paths under the API base URL.
pub mod paths {
    pub const CHEMICALS: &str = "chemicals/";
    pub const COMPANIES: &str = "companies/";
    pub const UNIVERSITIES: &str = "universities/";
    pub const RESEARCHERS: &str = "researchers/";
    pub const FUNDING_TABLE: &str = "funding-table/";
}

/// Client configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the REST API (for testing with mock servers).
    pub api_base_url: String,

    /// Host that `iframe_url` paths are resolved against.
    pub visualization_host: String,

    /// Whole-request timeout. `None` waits for the backend indefinitely.
    pub request_timeout: Option<Duration>,

    /// Connection timeout.
    pub connect_timeout: Duration,
}

impl Config {
    /// Create a configuration pointing at the given hosts.
    #[must_use]
    pub fn new(api_base_url: impl Into<String>, visualization_host: impl Into<String>) -> Self {
        Self {
            api_base_url: api_base_url.into(),
            visualization_host: visualization_host.into(),
            request_timeout: None,
            connect_timeout: api::CONNECT_TIMEOUT,
        }
    }

    /// Create a test configuration with both hosts on a mock server.
    #[must_use]
    pub fn for_testing(base_url: &str) -> Self {
        Self {
            api_base_url: format!("{}/api", base_url),
            visualization_host: base_url.to_string(),
            request_timeout: Some(Duration::from_secs(5)),
            connect_timeout: Duration::from_secs(2),
        }
    }

    /// Create configuration from environment variables.
    ///
    /// A `.env` file in the working directory is loaded first when present.
    ///
    /// # Errors
    ///
    /// Returns error if a variable is set but cannot be parsed.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenv::dotenv().ok();

        let api_base_url =
            std::env::var("CHEMNET_API_URL").unwrap_or_else(|_| api::BASE_URL.to_string());
        let visualization_host = std::env::var("CHEMNET_VIZ_HOST")
            .unwrap_or_else(|_| api::VISUALIZATION_HOST.to_string());

        let mut config = Self::new(api_base_url, visualization_host);

        if let Ok(secs) = std::env::var("CHEMNET_REQUEST_TIMEOUT_SECS") {
            let secs: u64 = secs
                .parse()
                .map_err(|e| anyhow::anyhow!("invalid CHEMNET_REQUEST_TIMEOUT_SECS: {e}"))?;
            config.request_timeout = Some(Duration::from_secs(secs));
        }

        config.validate()?;
        Ok(config)
    }

    /// Check that both hosts are absolute URLs.
    ///
    /// # Errors
    ///
    /// Returns error naming the offending setting.
    pub fn validate(&self) -> anyhow::Result<()> {
        Url::parse(&self.api_base_url)
            .map_err(|e| anyhow::anyhow!("invalid API base URL {:?}: {e}", self.api_base_url))?;
        Url::parse(&self.visualization_host).map_err(|e| {
            anyhow::anyhow!("invalid visualization host {:?}: {e}", self.visualization_host)
        })?;
        Ok(())
    }

    /// API base URL normalized to end with a slash, so resource paths join under it.
    #[must_use]
    pub fn api_root(&self) -> String {
        if self.api_base_url.ends_with('/') {
            self.api_base_url.clone()
        } else {
            format!("{}/", self.api_base_url)
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(api::BASE_URL, api::VISUALIZATION_HOST)
    }
}

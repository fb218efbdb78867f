//! SDK configuration.
//!
//! A [`Config`] is a layer of optional settings. Layers are combined with
//! [`Config::merge`], later layers overriding earlier ones; [`Config::defaults`]
//! is the fully populated base layer.
//!
//! ```rust,no_run
//! use controlmonkey::Config;
//! use controlmonkey::credentials::Credentials;
//!
//! let mut config = Config::defaults();
//! config.merge(&Config::new().with_credentials(Credentials::from_static("token")));
//! ```

use std::sync::Arc;
use std::time::Duration;

use url::Url;

use crate::credentials::Credentials;
use crate::useragent::UserAgent;

pub const DEFAULT_BASE_URL: &str = "https://api.controlmonkey.io";
pub const DEFAULT_CONTENT_TYPE: &str = "application/json";
pub const BASE_URL_ENV_VAR: &str = "CONTROL_MONKEY_BASE_URL";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Clone, Debug, Default)]
pub struct Config {
    /// API endpoint.
    pub base_url: Option<Url>,
    /// HTTP client used to send requests.
    pub http_client: Option<reqwest::Client>,
    /// Credentials used to sign requests.
    pub credentials: Option<Arc<Credentials>>,
    /// Value of the `User-Agent` header.
    pub user_agent: Option<String>,
    /// Value of the `Content-Type` and `Accept` headers.
    pub content_type: Option<String>,
}

impl Config {
    /// Empty layer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fully populated layer with the SDK defaults.
    pub fn defaults() -> Self {
        Self {
            base_url: Some(default_base_url()),
            http_client: Some(default_http_client()),
            credentials: Some(Arc::new(Credentials::default())),
            user_agent: Some(UserAgent::sdk().to_string()),
            content_type: Some(DEFAULT_CONTENT_TYPE.to_string()),
        }
    }

    pub fn with_base_url(mut self, url: Url) -> Self {
        self.base_url = Some(url);
        self
    }

    pub fn with_http_client(mut self, client: reqwest::Client) -> Self {
        self.http_client = Some(client);
        self
    }

    pub fn with_credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = Some(Arc::new(credentials));
        self
    }

    pub fn with_shared_credentials(mut self, credentials: Arc<Credentials>) -> Self {
        self.credentials = Some(credentials);
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    /// Override every field `other` sets.
    pub fn merge(&mut self, other: &Config) {
        if let Some(url) = &other.base_url {
            self.base_url = Some(url.clone());
        }
        if let Some(client) = &other.http_client {
            self.http_client = Some(client.clone());
        }
        if let Some(credentials) = &other.credentials {
            self.credentials = Some(Arc::clone(credentials));
        }
        if let Some(user_agent) = &other.user_agent {
            self.user_agent = Some(user_agent.clone());
        }
        if let Some(content_type) = &other.content_type {
            self.content_type = Some(content_type.clone());
        }
    }

    /// Copy of `self` with each layer of `others` merged in order.
    pub fn merged<'a>(&self, others: impl IntoIterator<Item = &'a Config>) -> Config {
        let mut config = self.clone();
        for other in others {
            config.merge(other);
        }
        config
    }
}

/// `$CONTROL_MONKEY_BASE_URL` if set and valid, else [`DEFAULT_BASE_URL`].
pub fn default_base_url() -> Url {
    if let Ok(raw) = std::env::var(BASE_URL_ENV_VAR)
        && !raw.is_empty()
    {
        match Url::parse(&raw) {
            Ok(url) => return url,
            Err(e) => tracing::warn!(
                env = BASE_URL_ENV_VAR,
                error = %e,
                "Invalid base URL, using default"
            ),
        }
    }
    Url::parse(DEFAULT_BASE_URL).expect("default base URL is valid")
}

pub fn default_http_client() -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(DEFAULT_TIMEOUT)
        .build()
        .unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Failed to build HTTP client, using defaults");
            reqwest::Client::new()
        })
}

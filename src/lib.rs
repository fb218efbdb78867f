//! # controlmonkey
//!
//! Rust SDK for the ControlMonkey API.
//!
//! Requests are signed with a bearer token resolved through a chain of
//! credential providers: explicit configuration, the `CONTROL_MONKEY_TOKEN`
//! environment variable, and the shared credentials file
//! `~/.controlmonkey/credentials`.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use controlmonkey::{Client, Request, Session};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), controlmonkey::Error> {
//!     let client = Client::from_session(&Session::default())?;
//!     let stacks: serde_json::Value = client.execute_json(Request::get("/stack")).await?;
//!     println!("{}", stacks);
//!     Ok(())
//! }
//! ```
//!
//! ## Explicit credentials
//!
//! ```rust,no_run
//! use controlmonkey::credentials::{ChainProvider, FileProvider, StaticProvider};
//! use controlmonkey::{Client, Config, Credentials, Session};
//!
//! # fn example() -> Result<(), controlmonkey::Error> {
//! let creds = Credentials::new(
//!     ChainProvider::new(vec![])
//!         .with(StaticProvider::new("token"))
//!         .with(FileProvider::new("ci", "")),
//! );
//! let session = Session::new(&[Config::new().with_credentials(creds)]);
//! let client = Client::from_session(&session)?;
//! # Ok(())
//! # }
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod client;
pub mod config;
pub mod credentials;
pub mod featureflag;
pub mod session;
pub mod useragent;

pub use client::{Client, Request};
pub use config::Config;
pub use credentials::{CredentialProvider, CredentialValue, Credentials, CredentialsError};
pub use featureflag::{FeatureFlag, FeatureFlags};
pub use session::Session;
pub use useragent::{UserAgent, UserAgents};

/// Error type for controlmonkey operations.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// API returned an error response.
    #[error("API error (HTTP {status}): {message}", status = status.map(|s| s.to_string()).unwrap_or_else(|| "unknown".into()))]
    Api {
        message: String,
        status: Option<u16>,
    },

    /// Credentials could not be resolved.
    #[error(transparent)]
    Credentials(#[from] CredentialsError),

    /// Network connectivity or request failed.
    #[error("Network request failed: {0}")]
    Network(#[from] reqwest::Error),

    /// JSON serialization or deserialization failed.
    #[error("JSON parsing failed: {0}")]
    Json(#[from] serde_json::Error),

    /// Request URL could not be built.
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// Invalid or missing configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Request parameters are invalid.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl Error {
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Error::Api { status, .. } => *status,
            Error::Network(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(
            self,
            Error::Api {
                status: Some(401 | 403),
                ..
            } | Error::Credentials(_)
        )
    }

    pub fn is_retryable(&self) -> bool {
        match self {
            Error::Api {
                status: Some(429 | 500..=599),
                ..
            } => true,
            Error::Network(e) => e.is_timeout() || e.is_connect(),
            _ => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::Api {
            message: "Invalid token".to_string(),
            status: Some(401),
        };
        assert_eq!(err.to_string(), "API error (HTTP 401): Invalid token");
        assert!(err.is_unauthorized());
        assert!(!err.is_retryable());
    }

    #[test]
    fn test_error_is_retryable() {
        let server_error = Error::Api {
            message: "Internal error".to_string(),
            status: Some(503),
        };
        assert!(server_error.is_retryable());
        assert_eq!(server_error.status_code(), Some(503));

        let throttled = Error::Api {
            message: String::new(),
            status: Some(429),
        };
        assert!(throttled.is_retryable());
    }

    #[test]
    fn test_credentials_error_is_transparent() {
        let err: Error = CredentialsError::Empty.into();
        assert_eq!(err.to_string(), "controlmonkey: static credentials are empty");
        assert!(err.is_unauthorized());
    }
}

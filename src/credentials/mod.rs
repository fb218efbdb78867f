//! Credential resolution for the ControlMonkey API.
//!
//! A [`CredentialProvider`] produces a [`CredentialValue`] from one source:
//! - [`StaticProvider`]: a token set in code
//! - [`EnvironmentProvider`]: `CONTROL_MONKEY_TOKEN`
//! - [`FileProvider`]: a profile in `~/.controlmonkey/credentials`
//! - [`ChainProvider`]: an ordered list of other providers
//!
//! [`Credentials`] wraps a provider for shared use by the HTTP client.
//!
//! ```rust,no_run
//! use controlmonkey::credentials::{ChainProvider, Credentials, EnvironmentProvider, StaticProvider};
//!
//! # async fn example() -> Result<(), controlmonkey::credentials::CredentialsError> {
//! let creds = Credentials::new(
//!     ChainProvider::new(vec![])
//!         .with(StaticProvider::new("explicit-token"))
//!         .with(EnvironmentProvider::new()),
//! );
//! let value = creds.get().await?;
//! println!("token from {}", value.provider_name);
//! # Ok(())
//! # }
//! ```

mod cache;
mod error;
pub mod profile;
mod provider;
mod providers;
mod value;

pub use cache::Credentials;
pub use error::{CredentialsError, ErrorList, FileError};
pub use provider::CredentialProvider;
pub use providers::{
    ChainProvider, DEFAULT_PROFILE, ENV_CREDENTIALS_PROVIDER_NAME, ENV_TOKEN_VAR,
    EnvironmentProvider, FILE_CREDENTIALS_PROVIDER_NAME, FileProvider, PROFILE_ENV_VAR,
    SHARED_CREDENTIALS_FILE_ENV_VAR, STATIC_CREDENTIALS_PROVIDER_NAME, StaticProvider,
    default_filename, default_profile,
};
pub use value::CredentialValue;

//! Credential provider implementations.

mod chain;
mod environment;
mod file;
mod static_token;

pub use chain::ChainProvider;
pub use environment::{ENV_CREDENTIALS_PROVIDER_NAME, ENV_TOKEN_VAR, EnvironmentProvider};
pub use file::{
    DEFAULT_PROFILE, FILE_CREDENTIALS_PROVIDER_NAME, FileProvider, PROFILE_ENV_VAR,
    SHARED_CREDENTIALS_FILE_ENV_VAR, default_filename, default_profile,
};
pub use static_token::{STATIC_CREDENTIALS_PROVIDER_NAME, StaticProvider};

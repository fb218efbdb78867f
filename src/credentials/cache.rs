//! Credentials facade with single-flight retrieval.

use std::path::PathBuf;

use tokio::sync::Mutex;

use super::{
    ChainProvider, CredentialProvider, CredentialValue, CredentialsError, EnvironmentProvider,
    FileProvider, StaticProvider,
};

/// Thread-safe handle around a single [`CredentialProvider`].
///
/// At most one retrieve runs at a time per handle. The last successful value
/// is kept and returned until [`expire`](Self::expire) is called; failures are
/// not kept.
pub struct Credentials {
    provider: Box<dyn CredentialProvider>,
    cached: Mutex<Option<CredentialValue>>,
}

impl Credentials {
    pub fn new<P: CredentialProvider + 'static>(provider: P) -> Self {
        Self {
            provider: Box::new(provider),
            cached: Mutex::new(None),
        }
    }

    pub fn from_static(token: impl Into<String>) -> Self {
        Self::new(StaticProvider::new(token))
    }

    pub fn from_env() -> Self {
        Self::new(EnvironmentProvider::new())
    }

    pub fn from_file(profile: impl Into<String>, filename: impl Into<PathBuf>) -> Self {
        Self::new(FileProvider::new(profile, filename))
    }

    pub fn from_chain(providers: Vec<Box<dyn CredentialProvider>>) -> Self {
        Self::new(ChainProvider::new(providers))
    }

    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    /// Return the cached value, or retrieve a new one from the provider.
    pub async fn get(&self) -> Result<CredentialValue, CredentialsError> {
        let mut cached = self.cached.lock().await;

        if let Some(value) = cached.as_ref() {
            tracing::debug!("Using cached credentials from: {}", self.provider.name());
            return Ok(value.clone());
        }

        let value = self.provider.retrieve().await?;
        tracing::debug!("Retrieved credentials from: {}", self.provider.name());
        *cached = Some(value.clone());
        Ok(value)
    }

    /// Drop the cached value so the next [`get`](Self::get) retrieves again.
    pub async fn expire(&self) {
        *self.cached.lock().await = None;
    }

    pub async fn is_cached(&self) -> bool {
        self.cached.lock().await.is_some()
    }
}

impl Default for Credentials {
    fn default() -> Self {
        Self::new(ChainProvider::default())
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("provider", &self.provider.name())
            .finish()
    }
}

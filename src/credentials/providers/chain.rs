//! Chain credential provider.

use std::sync::Arc;

use async_trait::async_trait;

use super::{EnvironmentProvider, FileProvider};
use crate::credentials::{CredentialProvider, CredentialValue, CredentialsError, ErrorList};
use crate::featureflag::{self, FeatureFlags};

/// Chain provider that tries multiple providers in order.
///
/// Earlier providers always take precedence over later ones. By default the
/// first provider returning a complete value wins. With the
/// `MergeCredentialsChain` feature flag enabled, values are merged field by
/// field instead, the first provider supplying a field winning it.
pub struct ChainProvider {
    providers: Vec<Box<dyn CredentialProvider>>,
    flags: Option<Arc<FeatureFlags>>,
}

impl ChainProvider {
    /// Create with specified providers.
    pub fn new(providers: Vec<Box<dyn CredentialProvider>>) -> Self {
        Self {
            providers,
            flags: None,
        }
    }

    /// Add a provider to the end of the chain.
    pub fn with<P: CredentialProvider + 'static>(mut self, provider: P) -> Self {
        self.providers.push(Box::new(provider));
        self
    }

    /// Use `flags` instead of the process-wide feature flags.
    pub fn with_flags(mut self, flags: FeatureFlags) -> Self {
        self.flags = Some(Arc::new(flags));
        self
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    fn merge_enabled(&self) -> bool {
        match &self.flags {
            Some(flags) => flags.is_enabled(featureflag::MERGE_CREDENTIALS_CHAIN),
            None => featureflag::MERGE_CREDENTIALS_CHAIN.enabled(),
        }
    }
}

impl Default for ChainProvider {
    fn default() -> Self {
        Self::new(vec![])
            .with(EnvironmentProvider::new())
            .with(FileProvider::default())
    }
}

#[async_trait]
impl CredentialProvider for ChainProvider {
    fn name(&self) -> &str {
        "ChainProvider"
    }

    async fn retrieve(&self) -> Result<CredentialValue, CredentialsError> {
        if self.providers.is_empty() {
            return Err(CredentialsError::NoValidProviders);
        }

        let merge = self.merge_enabled();
        let mut merged = CredentialValue::default();
        let mut errors = Vec::new();

        for provider in &self.providers {
            match provider.retrieve().await {
                Ok(value) if value.is_empty() => {
                    tracing::debug!("Provider {} returned empty credentials", provider.name());
                    errors.push(CredentialsError::provider(format!(
                        "{} returned empty credentials",
                        provider.name()
                    )));
                }
                Ok(value) if merge => {
                    if merged.is_empty() && value.is_complete() {
                        merged.provider_name.clone_from(&value.provider_name);
                    }
                    merged.merge(&value);
                    if merged.is_complete() {
                        tracing::debug!("Credentials merged, token from: {}", provider.name());
                        return Ok(merged);
                    }
                }
                Ok(value) => {
                    tracing::debug!("Credentials resolved from: {}", provider.name());
                    return Ok(value);
                }
                Err(e) => {
                    tracing::debug!("Provider {} failed: {}", provider.name(), e);
                    errors.push(e);
                }
            }
        }

        Err(CredentialsError::Chain(ErrorList(errors)))
    }
}

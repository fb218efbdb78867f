//! Credential provider trait.

use async_trait::async_trait;

use super::{CredentialValue, CredentialsError};

/// A source that can attempt to produce a [`CredentialValue`].
///
/// Providers need no locking of their own; the [`Credentials`](super::Credentials)
/// facade serializes calls to `retrieve`.
#[async_trait]
pub trait CredentialProvider: Send + Sync {
    /// Provider name for diagnostics.
    fn name(&self) -> &str;

    /// Retrieve a value, or fail if none can be obtained.
    async fn retrieve(&self) -> Result<CredentialValue, CredentialsError>;
}

#[async_trait]
impl<P: CredentialProvider + ?Sized> CredentialProvider for Box<P> {
    fn name(&self) -> &str {
        (**self).name()
    }

    async fn retrieve(&self) -> Result<CredentialValue, CredentialsError> {
        (**self).retrieve().await
    }
}

#[async_trait]
impl<P: CredentialProvider + ?Sized> CredentialProvider for std::sync::Arc<P> {
    fn name(&self) -> &str {
        (**self).name()
    }

    async fn retrieve(&self) -> Result<CredentialValue, CredentialsError> {
        (**self).retrieve().await
    }
}

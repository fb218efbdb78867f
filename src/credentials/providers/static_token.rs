//! Static credential provider.

use async_trait::async_trait;

use crate::credentials::{CredentialProvider, CredentialValue, CredentialsError};

pub const STATIC_CREDENTIALS_PROVIDER_NAME: &str = "StaticCredentialsProvider";

/// Provider with an explicitly set token.
#[derive(Clone)]
pub struct StaticProvider {
    token: String,
}

impl StaticProvider {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }
}

#[async_trait]
impl CredentialProvider for StaticProvider {
    fn name(&self) -> &str {
        STATIC_CREDENTIALS_PROVIDER_NAME
    }

    async fn retrieve(&self) -> Result<CredentialValue, CredentialsError> {
        if self.token.is_empty() {
            return Err(CredentialsError::Empty);
        }
        Ok(CredentialValue::new(
            self.token.clone(),
            STATIC_CREDENTIALS_PROVIDER_NAME,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_static_empty() {
        let err = StaticProvider::new("").retrieve().await.unwrap_err();
        assert!(matches!(err, CredentialsError::Empty));
        assert_eq!(
            err.to_string(),
            "controlmonkey: static credentials are empty"
        );
    }

    #[tokio::test]
    async fn test_static_token() {
        let value = StaticProvider::new("token").retrieve().await.unwrap();
        assert_eq!(
            value,
            CredentialValue::new("token", STATIC_CREDENTIALS_PROVIDER_NAME)
        );
    }
}

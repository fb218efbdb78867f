//! Environment variable credential provider.

use async_trait::async_trait;

use crate::credentials::{CredentialProvider, CredentialValue, CredentialsError};

pub const ENV_CREDENTIALS_PROVIDER_NAME: &str = "EnvCredentialsProvider";

/// Variable holding the ControlMonkey API token.
pub const ENV_TOKEN_VAR: &str = "CONTROL_MONKEY_TOKEN";

/// Provider that reads the token from the process environment.
///
/// The variable is read on every retrieve, not at construction.
#[derive(Clone, Debug, Default)]
pub struct EnvironmentProvider;

impl EnvironmentProvider {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl CredentialProvider for EnvironmentProvider {
    fn name(&self) -> &str {
        ENV_CREDENTIALS_PROVIDER_NAME
    }

    async fn retrieve(&self) -> Result<CredentialValue, CredentialsError> {
        match std::env::var(ENV_TOKEN_VAR) {
            Ok(token) if !token.is_empty() => {
                Ok(CredentialValue::new(token, ENV_CREDENTIALS_PROVIDER_NAME))
            }
            _ => Err(CredentialsError::NotFound {
                var: ENV_TOKEN_VAR.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Both cases share one test so they never race on the same variable.
    #[tokio::test]
    async fn test_environment_provider() {
        let provider = EnvironmentProvider::new();

        // SAFETY: Test-only environment setup, the only test touching this variable
        unsafe { std::env::remove_var(ENV_TOKEN_VAR) };
        let err = provider.retrieve().await.unwrap_err();
        assert!(matches!(err, CredentialsError::NotFound { .. }));
        assert!(
            err.to_string()
                .contains("CONTROL_MONKEY_TOKEN not found in environment")
        );

        unsafe { std::env::set_var(ENV_TOKEN_VAR, "") };
        assert!(provider.retrieve().await.is_err());

        unsafe { std::env::set_var(ENV_TOKEN_VAR, "secret") };
        let value = provider.retrieve().await.unwrap();
        assert_eq!(
            value,
            CredentialValue::new("secret", ENV_CREDENTIALS_PROVIDER_NAME)
        );

        unsafe { std::env::remove_var(ENV_TOKEN_VAR) };
    }
}

//! Credential value type.

/// A resolved ControlMonkey API token and the provider that produced it.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct CredentialValue {
    /// ControlMonkey API token.
    pub token: String,
    /// Name of the provider that produced the token.
    pub provider_name: String,
}

impl CredentialValue {
    pub fn new(token: impl Into<String>, provider_name: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            provider_name: provider_name.into(),
        }
    }

    /// Value carrying only a token, with no provenance.
    pub fn from_token(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            provider_name: String::new(),
        }
    }

    /// True if no field is set.
    pub fn is_empty(&self) -> bool {
        self.token.is_empty()
    }

    /// True if every field is set.
    pub fn is_complete(&self) -> bool {
        !self.token.is_empty()
    }

    /// Fill fields that are still empty from `other`.
    ///
    /// Fields already set are kept, so the first value merged in wins.
    /// `provider_name` is left untouched.
    pub fn merge(&mut self, other: &CredentialValue) {
        if self.token.is_empty() {
            self.token.clone_from(&other.token);
        }
    }
}

impl std::fmt::Debug for CredentialValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let token = if self.token.is_empty() {
            ""
        } else {
            "[REDACTED]"
        };
        f.debug_struct("CredentialValue")
            .field("token", &token)
            .field("provider_name", &self.provider_name)
            .finish()
    }
}

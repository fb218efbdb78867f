//! Credential resolution errors.

use thiserror::Error;

/// Errors produced while resolving credentials.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CredentialsError {
    /// A static provider was configured with a blank token.
    #[error("controlmonkey: static credentials are empty")]
    Empty,

    /// The environment did not contain a token.
    #[error("controlmonkey: {var} not found in environment")]
    NotFound { var: String },

    /// The credentials file could not be read or parsed.
    #[error("controlmonkey: failed to load credentials file: {0}")]
    File(#[from] FileError),

    /// The requested profile is missing from an otherwise valid file.
    #[error("controlmonkey: failed to load credentials file: section \"{profile}\" does not exist")]
    ProfileNotFound { profile: String },

    /// A chain was built without any providers.
    #[error("controlmonkey: no valid credentials providers in chain")]
    NoValidProviders,

    /// Every provider in a chain failed.
    #[error("{0}")]
    Chain(ErrorList),

    /// Failure reported by a provider implemented outside this crate.
    #[error("controlmonkey: {0}")]
    Provider(String),
}

impl CredentialsError {
    pub fn provider(message: impl Into<String>) -> Self {
        Self::Provider(message.into())
    }
}

/// Low-level failure while loading a credentials file.
#[derive(Debug, Error)]
pub enum FileError {
    #[error("open {path}: {source}")]
    Open {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The file opened but its contents could not be read as text.
    #[error("read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("unclosed section: {0}")]
    UnclosedSection(String),

    #[error("key-value delimiter not found: {0}")]
    MissingDelimiter(String),

    #[error("key \"token\" not set in section \"{0}\"")]
    MissingToken(String),
}

/// Ordered errors collected from each provider of a failed chain.
#[derive(Debug, Default)]
pub struct ErrorList(pub Vec<CredentialsError>);

impl ErrorList {
    pub fn iter(&self) -> impl Iterator<Item = &CredentialsError> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Display for ErrorList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let msgs: Vec<String> = self.0.iter().map(|e| e.to_string()).collect();
        write!(f, "{}", msgs.join("\n"))
    }
}

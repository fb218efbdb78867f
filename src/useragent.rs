//! User-Agent product tokens.

use std::fmt;

pub const SDK_NAME: &str = "controlmonkey-sdk-rust";
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// One `product/version (comment; ...)` token.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UserAgent {
    pub product: String,
    pub version: String,
    pub comment: Vec<String>,
}

impl UserAgent {
    pub fn new(product: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            product: product.into(),
            version: version.into(),
            comment: Vec::new(),
        }
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment.push(comment.into());
        self
    }

    /// The SDK's own token.
    pub fn sdk() -> Self {
        Self::new(SDK_NAME, SDK_VERSION)
    }
}

impl fmt::Display for UserAgent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.product, self.version)?;
        if !self.comment.is_empty() {
            write!(f, " ({})", self.comment.join("; "))?;
        }
        Ok(())
    }
}

/// Ordered list of tokens, rendered space-separated.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UserAgents(pub Vec<UserAgent>);

impl fmt::Display for UserAgents {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tokens: Vec<String> = self.0.iter().map(|ua| ua.to_string()).collect();
        write!(f, "{}", tokens.join(" "))
    }
}

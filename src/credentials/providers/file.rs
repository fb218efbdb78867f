//! Shared credentials file provider.

use std::path::PathBuf;

use async_trait::async_trait;
use directories::BaseDirs;

use crate::credentials::profile::parse_token;
use crate::credentials::{CredentialProvider, CredentialValue, CredentialsError, FileError};

pub const FILE_CREDENTIALS_PROVIDER_NAME: &str = "FileCredentialsProvider";

/// Overrides the location of the shared credentials file.
pub const SHARED_CREDENTIALS_FILE_ENV_VAR: &str = "CONTROL_MONKEY_SHARED_CREDENTIALS_FILE";

/// Overrides the profile used when none is given.
pub const PROFILE_ENV_VAR: &str = "CONTROL_MONKEY_PROFILE";

pub const DEFAULT_PROFILE: &str = "default";

const CONFIG_DIR: &str = ".controlmonkey";
const CREDENTIALS_FILE: &str = "credentials";

/// Location of the shared credentials file: `$CONTROL_MONKEY_SHARED_CREDENTIALS_FILE`,
/// else `~/.controlmonkey/credentials`.
pub fn default_filename() -> PathBuf {
    if let Ok(path) = std::env::var(SHARED_CREDENTIALS_FILE_ENV_VAR)
        && !path.is_empty()
    {
        return PathBuf::from(path);
    }
    match BaseDirs::new() {
        Some(dirs) => dirs.home_dir().join(CONFIG_DIR).join(CREDENTIALS_FILE),
        None => PathBuf::from(CONFIG_DIR).join(CREDENTIALS_FILE),
    }
}

/// Profile to use when none is given: `$CONTROL_MONKEY_PROFILE`, else `default`.
pub fn default_profile() -> String {
    std::env::var(PROFILE_ENV_VAR)
        .ok()
        .filter(|p| !p.is_empty())
        .unwrap_or_else(|| DEFAULT_PROFILE.to_string())
}

/// Provider that reads the token from a profile in a credentials file.
///
/// Empty profile or filename fall back to [`default_profile`] and
/// [`default_filename`], resolved on each retrieve.
#[derive(Clone, Debug, Default)]
pub struct FileProvider {
    profile: Option<String>,
    filename: Option<PathBuf>,
}

impl FileProvider {
    pub fn new(profile: impl Into<String>, filename: impl Into<PathBuf>) -> Self {
        let profile = profile.into();
        let filename = filename.into();
        Self {
            profile: (!profile.is_empty()).then_some(profile),
            filename: (!filename.as_os_str().is_empty()).then_some(filename),
        }
    }

    fn profile(&self) -> String {
        self.profile.clone().unwrap_or_else(default_profile)
    }

    fn filename(&self) -> PathBuf {
        self.filename.clone().unwrap_or_else(default_filename)
    }
}

#[async_trait]
impl CredentialProvider for FileProvider {
    fn name(&self) -> &str {
        FILE_CREDENTIALS_PROVIDER_NAME
    }

    async fn retrieve(&self) -> Result<CredentialValue, CredentialsError> {
        let filename = self.filename();
        let profile = self.profile();

        let content = tokio::fs::read_to_string(&filename)
            .await
            .map_err(|source| {
                let path = filename.display().to_string();
                match source.kind() {
                    std::io::ErrorKind::InvalidData => FileError::Read { path, source },
                    _ => FileError::Open { path, source },
                }
            })?;

        let token = parse_token(&content, &profile)?;
        tracing::debug!(
            profile = %profile,
            file = %filename.display(),
            "Loaded credentials file"
        );
        Ok(CredentialValue::new(token, FILE_CREDENTIALS_PROVIDER_NAME))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_file(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[tokio::test]
    async fn test_file_provider_ini() {
        let file = write_file("[default]\ntoken = t1\n\n[ci]\ntoken = t2\n");

        let value = FileProvider::new("ci", file.path())
            .retrieve()
            .await
            .unwrap();
        assert_eq!(value, CredentialValue::new("t2", FILE_CREDENTIALS_PROVIDER_NAME));
    }

    #[tokio::test]
    async fn test_file_provider_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing");
        let err = FileProvider::new("default", &path)
            .retrieve()
            .await
            .unwrap_err();
        match err {
            CredentialsError::File(FileError::Open { source, .. }) => {
                assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_file_provider_invalid_utf8() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"[default]\ntoken = \xff\xfe\n").unwrap();

        let err = FileProvider::new("default", file.path())
            .retrieve()
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            CredentialsError::File(FileError::Read { .. })
        ));
        assert!(err.to_string().contains("failed to load credentials file: read "));
    }

    #[test]
    fn test_empty_arguments_use_defaults() {
        let provider = FileProvider::new("", "");
        assert!(provider.profile.is_none());
        assert!(provider.filename.is_none());
    }
}

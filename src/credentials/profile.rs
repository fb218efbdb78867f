//! Credentials file parsing.
//!
//! A credentials file is either a flat JSON object:
//!
//! ```json
//! {"token": "..."}
//! ```
//!
//! or an INI file with one section per profile:
//!
//! ```ini
//! [default]
//! token = ...
//!
//! [ci]
//! token = ...
//! ```
//!
//! JSON is tried first; anything that is not a JSON object is parsed as INI.

use std::collections::HashMap;

use super::{CredentialsError, FileError};

/// Section that holds keys appearing before any `[section]` header.
pub const DEFAULT_SECTION: &str = "DEFAULT";

const TOKEN_KEY: &str = "token";

/// Parsed INI document.
#[derive(Debug, Default)]
pub struct Profiles {
    sections: HashMap<String, HashMap<String, String>>,
}

impl Profiles {
    pub fn parse(content: &str) -> Result<Self, FileError> {
        let mut profiles = Self::default();
        let mut current = DEFAULT_SECTION.to_string();

        for raw in content.lines() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
                continue;
            }

            if let Some(rest) = line.strip_prefix('[') {
                // Anything after the closing bracket is ignored.
                let Some(end) = rest.rfind(']') else {
                    return Err(FileError::UnclosedSection(line.to_string()));
                };
                current = rest[..end].trim().to_string();
                profiles.sections.entry(current.clone()).or_default();
                continue;
            }

            let Some(idx) = line.find(['=', ':']) else {
                return Err(FileError::MissingDelimiter(line.to_string()));
            };
            let key = line[..idx].trim().to_string();
            let value = unquote(line[idx + 1..].trim()).to_string();
            profiles
                .sections
                .entry(current.clone())
                .or_default()
                .insert(key, value);
        }

        Ok(profiles)
    }

    pub fn section(&self, name: &str) -> Option<&HashMap<String, String>> {
        self.sections.get(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.sections.keys().map(String::as_str)
    }
}

fn unquote(value: &str) -> &str {
    for quote in ['"', '\''] {
        if value.len() >= 2 && value.starts_with(quote) && value.ends_with(quote) {
            return &value[1..value.len() - 1];
        }
    }
    value
}

/// Extract the token for `profile` from the contents of a credentials file.
pub fn parse_token(content: &str, profile: &str) -> Result<String, CredentialsError> {
    if let Ok(serde_json::Value::Object(json)) = serde_json::from_str(content) {
        return match json.get(TOKEN_KEY) {
            Some(serde_json::Value::String(token)) if !token.is_empty() => Ok(token.clone()),
            _ => Err(FileError::MissingToken(profile.to_string()).into()),
        };
    }

    let profiles = Profiles::parse(content)?;
    let section = profiles
        .section(profile)
        .ok_or_else(|| CredentialsError::ProfileNotFound {
            profile: profile.to_string(),
        })?;

    match section.get(TOKEN_KEY) {
        Some(token) if !token.is_empty() => Ok(token.clone()),
        _ => Err(FileError::MissingToken(profile.to_string()).into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const INI: &str = "\
# shared credentials
[default]
token = default_token

[complete_credentials]
token: \"complete_credentials_token\"
";

    #[test]
    fn test_parse_ini_sections() {
        let profiles = Profiles::parse(INI).unwrap();
        let mut names: Vec<&str> = profiles.names().collect();
        names.sort_unstable();
        assert_eq!(names, vec!["complete_credentials", "default"]);
        assert_eq!(
            profiles.section("default").unwrap().get("token").unwrap(),
            "default_token"
        );
    }

    #[test]
    fn test_parse_token_ini_profiles() {
        assert_eq!(parse_token(INI, "default").unwrap(), "default_token");
        assert_eq!(
            parse_token(INI, "complete_credentials").unwrap(),
            "complete_credentials_token"
        );
    }

    #[test]
    fn test_parse_token_json_ignores_profile() {
        let json = r#"{"token": "token"}"#;
        assert_eq!(parse_token(json, "anything").unwrap(), "token");
    }

    #[test]
    fn test_keys_before_section_go_to_default_section() {
        let profiles = Profiles::parse("token = top\n[other]\ntoken = x\n").unwrap();
        assert_eq!(
            profiles.section(DEFAULT_SECTION).unwrap().get("token").unwrap(),
            "top"
        );
    }

    #[test]
    fn test_unclosed_section() {
        let err = Profiles::parse("[profile_name\ntoken = x\n").unwrap_err();
        assert_eq!(err.to_string(), "unclosed section: [profile_name");
    }

    #[test]
    fn test_missing_delimiter() {
        let err = parse_token("{\"token\" \"token\"}", "default").unwrap_err();
        assert!(
            err.to_string()
                .contains("key-value delimiter not found: {\"token")
        );
    }

    #[test]
    fn test_section_header_trailing_comment() {
        let content = "[default] ; main profile\ntoken = t1\n[ci] # build\ntoken = t2\n";
        assert_eq!(parse_token(content, "default").unwrap(), "t1");
        assert_eq!(parse_token(content, "ci").unwrap(), "t2");
    }

    #[test]
    fn test_json_non_string_token() {
        for content in [r#"{"token": null}"#, r#"{"token": 123}"#, "{}"] {
            let err = parse_token(content, "default").unwrap_err();
            assert!(
                matches!(err, CredentialsError::File(FileError::MissingToken(_))),
                "{content}: {err}"
            );
        }
    }

    #[test]
    fn test_missing_profile() {
        let err = parse_token(INI, "nope").unwrap_err();
        assert!(matches!(err, CredentialsError::ProfileNotFound { .. }));
    }

    #[test]
    fn test_blank_token() {
        let err = parse_token("[default]\ntoken =\n", "default").unwrap_err();
        assert!(matches!(
            err,
            CredentialsError::File(FileError::MissingToken(_))
        ));
    }
}

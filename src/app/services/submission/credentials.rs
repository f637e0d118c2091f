//! Opaque credentials handed to the transport

use crate::config::UploadConfig;

/// API token and anti-forgery token, either of which may be unknown
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    pub token: Option<String>,
    pub csrf_token: Option<String>,
}

impl Credentials {
    pub fn new(token: Option<String>, csrf_token: Option<String>) -> Self {
        Self {
            token: token.filter(|t| !t.is_empty()),
            csrf_token: csrf_token.filter(|t| !t.is_empty()),
        }
    }

    /// Read both tokens from a raw `Cookie` header using the configured names
    pub fn from_cookie_header(cookie_header: &str, config: &UploadConfig) -> Self {
        Self::new(
            cookie_value(cookie_header, &config.token_cookie),
            cookie_value(cookie_header, &config.csrf_cookie),
        )
    }

    /// Explicit values win over cookie values
    pub fn or(self, fallback: Credentials) -> Self {
        Self {
            token: self.token.or(fallback.token),
            csrf_token: self.csrf_token.or(fallback.csrf_token),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.token.is_none() && self.csrf_token.is_none()
    }
}

/// Value of a cookie in a `name=value; name2=value2` string
///
/// Returns `None` when the cookie is absent or set more than once.
pub fn cookie_value(cookie_header: &str, name: &str) -> Option<String> {
    let prefix = format!("{}=", name);
    let mut matches = cookie_header
        .split(';')
        .map(str::trim)
        .filter_map(|pair| pair.strip_prefix(prefix.as_str()));

    let value = matches.next()?;
    if matches.next().is_some() {
        return None;
    }
    Some(value.to_string()).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cookie_value_lookup() {
        let header = "sessionid=abc; auth_token=tok123; csrftoken=csrf456";
        assert_eq!(cookie_value(header, "auth_token").as_deref(), Some("tok123"));
        assert_eq!(cookie_value(header, "csrftoken").as_deref(), Some("csrf456"));
        assert_eq!(cookie_value(header, "missing"), None);
    }

    #[test]
    fn test_cookie_name_must_match_exactly() {
        let header = "xauth_token=nope; auth_token_old=nope";
        assert_eq!(cookie_value(header, "auth_token"), None);
    }

    #[test]
    fn test_ambiguous_cookie_is_ignored() {
        let header = "auth_token=one; auth_token=two";
        assert_eq!(cookie_value(header, "auth_token"), None);
    }

    #[test]
    fn test_credentials_from_cookie_header() {
        let creds =
            Credentials::from_cookie_header("auth_token=t; csrftoken=c", &UploadConfig::default());
        assert_eq!(creds.token.as_deref(), Some("t"));
        assert_eq!(creds.csrf_token.as_deref(), Some("c"));
        assert!(!creds.is_empty());
    }

    #[test]
    fn test_explicit_credentials_take_precedence() {
        let explicit = Credentials::new(Some("explicit".to_string()), None);
        let cookies = Credentials::new(Some("cookie".to_string()), Some("csrf".to_string()));
        let merged = explicit.or(cookies);
        assert_eq!(merged.token.as_deref(), Some("explicit"));
        assert_eq!(merged.csrf_token.as_deref(), Some("csrf"));
    }

    #[test]
    fn test_empty_values_are_unknown() {
        let creds = Credentials::new(Some(String::new()), Some(String::new()));
        assert!(creds.is_empty());
    }
}

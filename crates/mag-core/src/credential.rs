use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

/// API key sent verbatim in the `Authenticate` header.
///
/// The value is opaque to magkit. `Debug` output is redacted so credentials
/// never end up in logs.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Credential(String);

impl Credential {
    /// Wrap an API key, rejecting values that cannot travel in an HTTP header.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Validation`] if the key is empty or holds anything
    /// other than visible ASCII, spaces, and tabs.
    pub fn parse(value: impl Into<String>) -> Result<Self, CoreError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(CoreError::Validation("API key is empty".into()));
        }
        if !value.chars().all(is_header_char) {
            return Err(CoreError::Validation(
                "API key must be visible ASCII; it is sent as a header value".into(),
            ));
        }
        Ok(Self(value))
    }

    /// Resolve the credential for a single call.
    ///
    /// A call-level credential always wins over the client-level default.
    #[must_use]
    pub fn resolve<'a>(call: Option<&'a Self>, default: Option<&'a Self>) -> Option<&'a Self> {
        call.or(default)
    }

    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }
}

const fn is_header_char(c: char) -> bool {
    matches!(c, '\t' | ' '..='~')
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(***)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_and_control_characters() {
        assert!(Credential::parse("").is_err());
        assert!(Credential::parse("   ").is_err());
        assert!(Credential::parse("abc\ndef").is_err());
        assert!(Credential::parse("insert_api_key").is_ok());
    }

    #[test]
    fn rejects_non_ascii_keys() {
        let err = Credential::parse("clé").unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
        assert!(Credential::parse("key\u{7f}").is_err());
        assert!(Credential::parse("Bearer abc\tdef~!").is_ok());
    }

    #[test]
    fn call_level_overrides_default() {
        let call = Credential::parse("call").unwrap();
        let default = Credential::parse("default").unwrap();

        let resolved = Credential::resolve(Some(&call), Some(&default)).unwrap();
        assert_eq!(resolved.expose(), "call");

        let resolved = Credential::resolve(None, Some(&default)).unwrap();
        assert_eq!(resolved.expose(), "default");

        assert!(Credential::resolve(None, None).is_none());
    }

    #[test]
    fn debug_output_is_redacted() {
        let key = Credential::parse("super-secret").unwrap();
        assert_eq!(format!("{key:?}"), "Credential(***)");
    }
}

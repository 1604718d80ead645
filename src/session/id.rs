//! Session identifier type.

use std::fmt;
use std::str::FromStr;

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use rand::Rng;

/// Size of the random token in bytes.
const TOKEN_BYTES: usize = 32;

/// Length of the base64url-encoded token.
const TOKEN_LENGTH: usize = 43;

/// Opaque identifier of a browser session.
///
/// Session IDs are 32 random bytes encoded as unpadded base64url, which is
/// safe to place in a cookie value without quoting.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SessionId(String);

impl SessionId {
    /// Generate a fresh random session ID.
    pub fn generate() -> Self {
        let mut bytes = [0u8; TOKEN_BYTES];
        rand::rng().fill(&mut bytes);
        Self(URL_SAFE_NO_PAD.encode(bytes))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for SessionId {
    type Err = crate::error::TodoError;

    /// Parse a token received from a client, checking only its shape.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let well_formed = s.len() == TOKEN_LENGTH
            && s
                .bytes()
                .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_');
        if well_formed {
            Ok(Self(s.to_string()))
        } else {
            Err(crate::error::TodoError::SessionNotFound(s.into()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_generated_format() {
        let id = SessionId::generate();
        assert_eq!(id.as_str().len(), TOKEN_LENGTH);
        assert!(!id.as_str().contains('='));
    }

    #[test]
    fn test_uniqueness() {
        let mut ids = HashSet::new();
        for _ in 0..1_000 {
            assert!(ids.insert(SessionId::generate()));
        }
    }

    #[test]
    fn test_roundtrip() {
        let original = SessionId::generate();
        let parsed: SessionId = original.to_string().parse().unwrap();
        assert_eq!(original, parsed);
    }

    #[test]
    fn test_parse_invalid() {
        assert!("".parse::<SessionId>().is_err());
        assert!("short".parse::<SessionId>().is_err());
        // Right length, wrong alphabet
        assert!("!".repeat(TOKEN_LENGTH).parse::<SessionId>().is_err());
        assert!("a".repeat(TOKEN_LENGTH + 1).parse::<SessionId>().is_err());
    }
}

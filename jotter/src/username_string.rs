use std::fmt::{self, Formatter};
use std::ops::Deref;
use std::str::FromStr;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde::de::Error;
use serde::de::Unexpected::Str;
use thiserror::Error;

pub const MAX_USERNAME_LEN: usize = 64;

/// A validated username. Comparison is case-sensitive.
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct UsernameString(String);

impl UsernameString {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for UsernameString {
    type Err = UsernameParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().is_empty() {
            return Err(UsernameParseError::Blank);
        }
        if s.chars().count() > MAX_USERNAME_LEN {
            return Err(UsernameParseError::TooLong);
        }
        if s.chars().any(char::is_control) {
            return Err(UsernameParseError::ControlCharacters);
        }
        Ok(UsernameString(s.to_string()))
    }
}

impl Deref for UsernameString {
    type Target = str;
    fn deref(&self) -> &str {
        &self.0[..]
    }
}

impl fmt::Display for UsernameString {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
pub enum UsernameParseError {
    #[error("username is blank")]
    Blank,

    #[error("username is longer than {MAX_USERNAME_LEN} characters")]
    TooLong,

    #[error("username contains control characters")]
    ControlCharacters,
}

impl Serialize for UsernameString {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for UsernameString {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct Visitor;
        impl serde::de::Visitor<'_> for Visitor {
            type Value = UsernameString;

            fn expecting(&self, formatter: &mut Formatter) -> fmt::Result {
                formatter.write_str("string containing a valid username")
            }

            fn visit_str<E>(self, v: &str) -> Result<UsernameString, E>
            where
                E: Error
            {
                UsernameString::from_str(v)
                    .map_err(|_| Error::invalid_value(Str(v), &self))
            }
        }

        deserializer.deserialize_str(Visitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_regular_names() {
        assert_eq!(UsernameString::from_str("alice").unwrap().as_str(), "alice");
    }

    #[test]
    fn case_is_preserved() {
        assert_ne!(
            UsernameString::from_str("Alice").unwrap(),
            UsernameString::from_str("alice").unwrap(),
        );
    }

    #[test]
    fn rejects_blank() {
        assert_eq!(UsernameString::from_str(""), Err(UsernameParseError::Blank));
        assert_eq!(UsernameString::from_str("  \t"), Err(UsernameParseError::Blank));
    }

    #[test]
    fn rejects_control_characters() {
        assert_eq!(
            UsernameString::from_str("al\nice"),
            Err(UsernameParseError::ControlCharacters),
        );
    }

    #[test]
    fn rejects_too_long() {
        let name = "a".repeat(MAX_USERNAME_LEN + 1);
        assert_eq!(UsernameString::from_str(&name), Err(UsernameParseError::TooLong));
    }

    #[test]
    fn deserialize_validates() {
        let parsed: Result<UsernameString, _> = serde_json::from_str("\"\"");
        assert!(parsed.is_err());
        let parsed: UsernameString = serde_json::from_str("\"bob\"").unwrap();
        assert_eq!(parsed.as_str(), "bob");
    }
}

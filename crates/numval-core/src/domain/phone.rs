use serde::{Deserialize, Serialize};
use std::fmt;

/// A phone number that passed the format gate of a [`crate::Normalizer`].
///
/// Only the normalizer can mint values, so holding one means the string
/// matched the configured pattern.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PhoneNumber(String);

impl PhoneNumber {
    pub(crate) fn from_matched(raw: &str) -> Self {
        Self(raw.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for PhoneNumber {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::PhoneNumber;

    #[test]
    fn phone_number_displays_raw_value() {
        let number = PhoneNumber::from_matched("+15551234567");
        assert_eq!(number.to_string(), "+15551234567");
        assert_eq!(number.as_str(), "+15551234567");
    }

    #[test]
    fn phone_number_serializes_as_plain_string() {
        let number = PhoneNumber::from_matched("+442071838750");
        let json = serde_json::to_string(&number).unwrap();
        assert_eq!(json, "\"+442071838750\"");
    }
}

use serde::{Deserialize, Serialize};
use std::fmt;

/// Phone type verdict returned by the validation service.
///
/// Values outside the known set are kept verbatim in `Unrecognized` so they
/// serialize back out unchanged. Matching is case-sensitive: `"invalid"` is
/// not [`PhoneType::Invalid`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PhoneType {
    Mobile,
    Landline,
    Voip,
    Invalid,
    Prepaid,
    Other,
    Unrecognized(String),
}

impl PhoneType {
    pub const INVALID: &'static str = "INVALID";

    pub fn as_str(&self) -> &str {
        match self {
            PhoneType::Mobile => "MOBILE",
            PhoneType::Landline => "LANDLINE",
            PhoneType::Voip => "VOIP",
            PhoneType::Invalid => Self::INVALID,
            PhoneType::Prepaid => "PREPAID",
            PhoneType::Other => "OTHER",
            PhoneType::Unrecognized(raw) => raw,
        }
    }

    pub fn is_invalid(&self) -> bool {
        matches!(self, PhoneType::Invalid)
    }
}

impl From<String> for PhoneType {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "MOBILE" => PhoneType::Mobile,
            "LANDLINE" => PhoneType::Landline,
            "VOIP" => PhoneType::Voip,
            PhoneType::INVALID => PhoneType::Invalid,
            "PREPAID" => PhoneType::Prepaid,
            "OTHER" => PhoneType::Other,
            _ => PhoneType::Unrecognized(raw),
        }
    }
}

impl From<PhoneType> for String {
    fn from(kind: PhoneType) -> Self {
        match kind {
            PhoneType::Unrecognized(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for PhoneType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Service output for a single number. Field names follow the service's
/// wire format; every field may be absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ValidationResponse {
    pub carrier: Option<String>,
    pub city: Option<String>,
    #[serde(rename = "CleansedPhoneNumberE164")]
    pub cleansed_phone_number_e164: Option<String>,
    pub cleansed_phone_number_national: Option<String>,
    pub country: Option<String>,
    pub country_code_iso2: Option<String>,
    pub country_code_numeric: Option<String>,
    pub county: Option<String>,
    pub original_country_code_iso2: Option<String>,
    pub original_phone_number: Option<String>,
    pub phone_type: Option<PhoneType>,
    pub phone_type_code: Option<i32>,
    pub timezone: Option<String>,
    pub zip_code: Option<String>,
}

impl ValidationResponse {
    /// A response is invalid only when the service said exactly `INVALID`.
    pub fn is_invalid(&self) -> bool {
        self.phone_type.as_ref().is_some_and(PhoneType::is_invalid)
    }

    pub fn original_number(&self) -> &str {
        self.original_phone_number.as_deref().unwrap_or_default()
    }
}

use crate::{Result, ServiceError};
use numval_core::ValidationResponse;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(rename = "NumberValidateResponse")]
    response: Option<ValidationResponse>,
}

/// Extracts the `NumberValidateResponse` object both backends return.
pub fn parse_response(body: &str) -> Result<ValidationResponse> {
    let envelope: Envelope = serde_json::from_str(body)
        .map_err(|err| ServiceError::Parse(format!("invalid service response: {err}")))?;
    envelope.response.ok_or_else(|| {
        ServiceError::Parse("service response has no NumberValidateResponse".to_string())
    })
}

#[cfg(test)]
mod tests {
    use super::parse_response;
    use crate::ServiceError;
    use numval_core::PhoneType;

    #[test]
    fn parses_full_envelope() {
        let body = r#"{
            "NumberValidateResponse": {
                "Carrier": "Example Wireless",
                "City": "Seattle",
                "CleansedPhoneNumberE164": "+12065550100",
                "CleansedPhoneNumberNational": "2065550100",
                "Country": "United States",
                "CountryCodeIso2": "US",
                "CountryCodeNumeric": "1",
                "OriginalPhoneNumber": "+12065550100",
                "PhoneType": "MOBILE",
                "PhoneTypeCode": 0,
                "Timezone": "America/Los_Angeles",
                "ZipCode": "98101"
            }
        }"#;
        let response = parse_response(body).expect("parse");
        assert_eq!(response.phone_type, Some(PhoneType::Mobile));
        assert_eq!(response.original_number(), "+12065550100");
        assert_eq!(response.country_code_iso2.as_deref(), Some("US"));
        assert_eq!(response.zip_code.as_deref(), Some("98101"));
    }

    #[test]
    fn rejects_missing_response_object() {
        let err = parse_response("{}").unwrap_err();
        assert!(matches!(err, ServiceError::Parse(_)));
    }

    #[test]
    fn rejects_non_json_output() {
        let err = parse_response("An error occurred (AccessDenied)").unwrap_err();
        assert!(err.to_string().contains("invalid service response"));
    }
}

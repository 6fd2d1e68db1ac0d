use crate::domain::PhoneNumber;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ValidationRequest {
    phone_number: PhoneNumber,
}

impl ValidationRequest {
    pub fn new(phone_number: PhoneNumber) -> Self {
        Self { phone_number }
    }

    pub fn phone_number(&self) -> &PhoneNumber {
        &self.phone_number
    }
}

pub fn build_requests(numbers: &[PhoneNumber]) -> Vec<ValidationRequest> {
    numbers.iter().cloned().map(ValidationRequest::new).collect()
}

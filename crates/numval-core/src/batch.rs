use crate::aggregate::Aggregator;
use crate::domain::{PhoneNumber, ValidationRequest, ValidationResponse};
use thiserror::Error;
use tracing::debug;

/// The external validation service: one blocking call per request.
pub trait PhoneValidator {
    type Error: std::error::Error + Send + Sync + 'static;

    fn validate(&self, request: &ValidationRequest) -> Result<ValidationResponse, Self::Error>;
}

#[derive(Debug, Error)]
#[error("validation failed for {number}")]
pub struct BatchError<E>
where
    E: std::error::Error + 'static,
{
    pub number: PhoneNumber,
    #[source]
    pub source: E,
}

/// Sends every request in order and feeds the responses into `aggregator`.
///
/// Stops at the first failing call. The aggregate built so far is dropped
/// and only the error is returned.
pub fn run_batch<V>(
    validator: &V,
    requests: &[ValidationRequest],
    mut aggregator: Aggregator,
) -> Result<Aggregator, BatchError<V::Error>>
where
    V: PhoneValidator + ?Sized,
{
    for (index, request) in requests.iter().enumerate() {
        let number = request.phone_number();
        debug!(%number, index, total = requests.len(), "validating phone number");

        let mut response = validator.validate(request).map_err(|source| BatchError {
            number: number.clone(),
            source,
        })?;
        if response.original_phone_number.is_none() {
            response.original_phone_number = Some(number.as_str().to_string());
        }
        aggregator.add(response);
    }
    Ok(aggregator)
}

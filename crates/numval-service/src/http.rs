use crate::{Result, ServiceError};
use numval_core::{PhoneValidator, ValidationRequest, ValidationResponse};

#[cfg(feature = "http-service")]
mod imp {
    use super::{PhoneValidator, Result, ServiceError, ValidationRequest, ValidationResponse};
    use crate::envelope::parse_response;
    use reqwest::blocking::Client;
    use std::time::Duration;
    use tracing::debug;
    use url::{Host, Url};

    /// Validates numbers against a JSON endpoint that accepts
    /// `{"PhoneNumber": ...}` and answers with a `NumberValidateResponse`.
    #[derive(Debug, Clone)]
    pub struct HttpValidator {
        client: Client,
        endpoint: Url,
    }

    impl HttpValidator {
        pub fn new(endpoint: &str, timeout_secs: u64) -> Result<Self> {
            let endpoint = Url::parse(endpoint)?;
            if endpoint.scheme() != "https" && !is_loopback(&endpoint) {
                return Err(ServiceError::Parse(
                    "validation endpoint must use https".to_string(),
                ));
            }
            let client = Client::builder()
                .user_agent("numval")
                .timeout(Duration::from_secs(timeout_secs))
                .connect_timeout(Duration::from_secs(10))
                .build()?;
            Ok(Self { client, endpoint })
        }
    }

    fn is_loopback(url: &Url) -> bool {
        match url.host() {
            Some(Host::Domain(domain)) => domain == "localhost",
            Some(Host::Ipv4(addr)) => addr.is_loopback(),
            Some(Host::Ipv6(addr)) => addr.is_loopback(),
            None => false,
        }
    }

    impl PhoneValidator for HttpValidator {
        type Error = ServiceError;

        fn validate(&self, request: &ValidationRequest) -> Result<ValidationResponse> {
            debug!(
                endpoint = %self.endpoint,
                number = %request.phone_number(),
                "posting validation request"
            );
            let body = self
                .client
                .post(self.endpoint.clone())
                .header("Accept", "application/json")
                .json(request)
                .send()?
                .error_for_status()?
                .text()?;
            parse_response(&body)
        }
    }

}

#[cfg(not(feature = "http-service"))]
mod imp {
    use super::{PhoneValidator, Result, ServiceError, ValidationRequest, ValidationResponse};

    #[derive(Debug, Clone)]
    pub struct HttpValidator {
        endpoint: String,
    }

    impl HttpValidator {
        pub fn new(endpoint: &str, _timeout_secs: u64) -> Result<Self> {
            Ok(Self {
                endpoint: endpoint.to_string(),
            })
        }
    }

    impl PhoneValidator for HttpValidator {
        type Error = ServiceError;

        fn validate(&self, _request: &ValidationRequest) -> Result<ValidationResponse> {
            Err(ServiceError::Unavailable(format!(
                "http validation of {} requires the http-service feature",
                self.endpoint
            )))
        }
    }

}

pub use imp::HttpValidator;

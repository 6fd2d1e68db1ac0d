use crate::envelope::parse_response;
use crate::{Result, ServiceError};
use numval_core::{PhoneValidator, ValidationRequest, ValidationResponse};
use std::io::ErrorKind;
use std::process::Command;
use tracing::debug;

/// Validates numbers by shelling out to the AWS CLI's Pinpoint command.
#[derive(Debug, Clone)]
pub struct AwsCliValidator {
    program: String,
    profile: Option<String>,
    region: Option<String>,
}

impl AwsCliValidator {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            profile: None,
            region: None,
        }
    }

    pub fn with_profile(mut self, profile: Option<String>) -> Self {
        self.profile = profile;
        self
    }

    pub fn with_region(mut self, region: Option<String>) -> Self {
        self.region = region;
        self
    }

    pub fn args(&self, request: &ValidationRequest) -> Vec<String> {
        let mut args = vec![
            "pinpoint".to_string(),
            "phone-number-validate".to_string(),
            "--number-validate-request".to_string(),
            format!("PhoneNumber={}", request.phone_number()),
            "--output".to_string(),
            "json".to_string(),
        ];
        if let Some(profile) = &self.profile {
            args.push("--profile".to_string());
            args.push(profile.clone());
        }
        if let Some(region) = &self.region {
            args.push("--region".to_string());
            args.push(region.clone());
        }
        args
    }

    fn run(&self, request: &ValidationRequest) -> Result<String> {
        let output = Command::new(&self.program)
            .args(self.args(request))
            .output()
            .map_err(|err| match err.kind() {
                ErrorKind::NotFound => {
                    ServiceError::Unavailable(format!("{} not found on PATH", self.program))
                }
                _ => ServiceError::Io(err),
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let message = if stderr.trim().is_empty() {
                format!("{} exited with status {}", self.program, output.status)
            } else {
                stderr.trim().to_string()
            };
            return Err(ServiceError::Command(message));
        }

        String::from_utf8(output.stdout)
            .map_err(|_| ServiceError::Parse("aws cli output was not valid UTF-8".to_string()))
    }
}

impl PhoneValidator for AwsCliValidator {
    type Error = ServiceError;

    fn validate(&self, request: &ValidationRequest) -> Result<ValidationResponse> {
        debug!(program = %self.program, number = %request.phone_number(), "running aws cli");
        let stdout = self.run(request)?;
        parse_response(&stdout)
    }
}

#[cfg(test)]
mod tests {
    use super::AwsCliValidator;
    use crate::ServiceError;
    use numval_core::{build_requests, Normalizer, PhoneValidator, ValidationRequest};

    fn request(raw: &str) -> ValidationRequest {
        let number = Normalizer::e164()
            .expect("pattern")
            .parse(raw)
            .expect("valid number");
        build_requests(&[number]).remove(0)
    }

    #[test]
    fn args_match_pinpoint_invocation() {
        let validator = AwsCliValidator::new("aws");
        assert_eq!(
            validator.args(&request("+15551234567")),
            vec![
                "pinpoint",
                "phone-number-validate",
                "--number-validate-request",
                "PhoneNumber=+15551234567",
                "--output",
                "json",
            ]
        );
    }

    #[test]
    fn args_include_profile_and_region() {
        let validator = AwsCliValidator::new("aws")
            .with_profile(Some("ops".to_string()))
            .with_region(Some("eu-west-1".to_string()));
        let args = validator.args(&request("+442071838750"));
        assert!(args.ends_with(&[
            "--profile".to_string(),
            "ops".to_string(),
            "--region".to_string(),
            "eu-west-1".to_string(),
        ]));
    }

    #[test]
    fn missing_program_is_unavailable() {
        let validator = AwsCliValidator::new("numval-definitely-missing-aws-binary");
        let err = validator.validate(&request("+15551234567")).unwrap_err();
        assert!(matches!(err, ServiceError::Unavailable(_)));
    }

    #[cfg(unix)]
    #[test]
    fn failing_program_is_command_error() {
        let validator = AwsCliValidator::new("false");
        let err = validator.validate(&request("+15551234567")).unwrap_err();
        assert!(matches!(err, ServiceError::Command(_)));
    }
}

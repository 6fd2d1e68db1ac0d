use anyhow::Error;
use clap::CommandFactory;
use numval_config::ConfigError;
use numval_core::{BatchError, CoreError};
use numval_service::ServiceError;
use std::process::ExitCode;
use thiserror::Error as ThisError;

pub const EXIT_FAILURE: u8 = 1;
pub const EXIT_NO_NUMBERS: u8 = 2;
pub const EXIT_INVALID_INPUT: u8 = 3;

#[derive(Debug, ThisError)]
pub enum CliError {
    #[error("no phone numbers to validate")]
    NoNumbers,
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

pub fn invalid_input(message: impl Into<String>) -> Error {
    CliError::InvalidInput(message.into()).into()
}

pub fn no_numbers() -> Error {
    CliError::NoNumbers.into()
}

pub fn report_error(err: &Error, verbose: bool) {
    if matches!(err.downcast_ref::<CliError>(), Some(CliError::NoNumbers)) {
        eprintln!("No phone numbers to validate.");
        eprintln!("{}", crate::Cli::command().render_usage());
        return;
    }
    eprintln!("error: {}", error_message(err, verbose));
}

fn error_message(err: &Error, verbose: bool) -> String {
    // Failed calls always carry the service's error text.
    if verbose || err.downcast_ref::<BatchError<ServiceError>>().is_some() {
        format!("{err:#}")
    } else {
        err.to_string()
    }
}

pub fn exit_code_for(err: &Error) -> ExitCode {
    ExitCode::from(exit_status(err))
}

fn exit_status(err: &Error) -> u8 {
    for cause in err.chain() {
        if cause.downcast_ref::<BatchError<ServiceError>>().is_some() {
            return EXIT_FAILURE;
        }
        if let Some(cli_err) = cause.downcast_ref::<CliError>() {
            return match cli_err {
                CliError::NoNumbers => EXIT_NO_NUMBERS,
                CliError::InvalidInput(_) => EXIT_INVALID_INPUT,
            };
        }
        if let Some(config_err) = cause.downcast_ref::<ConfigError>() {
            return config_exit_code(config_err);
        }
        if let Some(service_err) = cause.downcast_ref::<ServiceError>() {
            return service_exit_code(service_err);
        }
        if let Some(_core_err) = cause.downcast_ref::<CoreError>() {
            return EXIT_FAILURE;
        }
    }
    EXIT_FAILURE
}

fn config_exit_code(err: &ConfigError) -> u8 {
    match err {
        ConfigError::InvalidConfigPath(_)
        | ConfigError::MissingConfigFile(_)
        | ConfigError::InsecurePermissions(_)
        | ConfigError::InvalidTimeout(_)
        | ConfigError::InvalidServiceField { .. }
        | ConfigError::MissingNumbersFile(_)
        | ConfigError::NumbersFileTooLarge { .. }
        | ConfigError::Read { .. }
        | ConfigError::Parse { .. } => EXIT_INVALID_INPUT,
    }
}

fn service_exit_code(err: &ServiceError) -> u8 {
    match err {
        ServiceError::Unavailable(_) => EXIT_INVALID_INPUT,
        ServiceError::Command(_) | ServiceError::Io(_) | ServiceError::Parse(_) => EXIT_FAILURE,
        #[cfg(feature = "http-service")]
        ServiceError::Http(_) => EXIT_FAILURE,
        #[cfg(feature = "http-service")]
        ServiceError::Url(_) => EXIT_INVALID_INPUT,
    }
}

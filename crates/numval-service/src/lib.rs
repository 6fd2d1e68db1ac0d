pub mod aws_cli;
pub mod envelope;
pub mod error;
pub mod http;

pub use aws_cli::AwsCliValidator;
pub use error::{Result, ServiceError};
pub use http::HttpValidator;

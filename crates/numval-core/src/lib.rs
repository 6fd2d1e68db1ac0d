pub mod aggregate;
pub mod batch;
pub mod domain;
pub mod error;
pub mod rules;

pub use aggregate::{aws_cli_command, Aggregator, DetailLevel, FilterPolicy, ResultItem};
pub use batch::{run_batch, BatchError, PhoneValidator};
pub use domain::*;
pub use error::CoreError;
pub use rules::*;

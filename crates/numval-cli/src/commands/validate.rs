use crate::error::{invalid_input, no_numbers};
use anyhow::{Context as _, Result};
use clap::Args;
use numval_config::{self as config, AppConfig, ConfigOrigin, ServiceBackend, ServiceConfig};
use numval_core::{
    build_requests, run_batch, Aggregator, DetailLevel, FilterPolicy, Normalizer, PhoneValidator,
};
use numval_service::{AwsCliValidator, HttpValidator, ServiceError};
use std::path::PathBuf;
use tracing::{debug, warn};

#[derive(Debug, Args)]
pub struct ValidateArgs {
    /// Phone numbers in E.164 format, e.g. +15551234567
    #[arg(value_name = "PHONE_NUMBER")]
    pub numbers: Vec<String>,
    /// Only report the phone number instead of the full service response
    #[arg(long)]
    pub short: bool,
    /// Only report invalid phone numbers
    #[arg(long = "only-invalid", alias = "onlyinvalid")]
    pub only_invalid: bool,
    /// File containing a newline-delimited list of phone numbers
    #[arg(long = "cfg", value_name = "FILE")]
    pub numbers_file: Option<PathBuf>,
}

type DynValidator = Box<dyn PhoneValidator<Error = ServiceError>>;

pub fn validate(config_path: Option<PathBuf>, args: ValidateArgs) -> Result<()> {
    let loaded = config::load(config_path).with_context(|| "load config")?;
    match &loaded.origin {
        ConfigOrigin::File(path) => debug!(path = %path.display(), "config loaded"),
        ConfigOrigin::Defaults {
            searched: Some(path),
        } => debug!(path = %path.display(), "config missing, using defaults"),
        ConfigOrigin::Defaults { searched: None } => debug!("no config location, using defaults"),
    }
    let app_config = loaded.config;

    let ValidateArgs {
        numbers,
        short,
        only_invalid,
        numbers_file,
    } = args;

    let numbers_file = numbers_file.or_else(|| app_config.numbers_file.clone());
    let candidates = collect_candidates(numbers, numbers_file)?;
    let normalizer = Normalizer::e164().with_context(|| "compile phone number pattern")?;
    let normalized = normalizer.normalize(&candidates);
    for warning in &normalized.warnings {
        warn!("{warning}");
    }
    if normalized.numbers.is_empty() {
        return Err(no_numbers());
    }

    let (detail, filter) = output_shape(&app_config, short, only_invalid);
    debug!(
        count = normalized.numbers.len(),
        ?detail,
        ?filter,
        "validating phone numbers"
    );

    let validator = build_validator(&app_config.service)?;
    let requests = build_requests(&normalized.numbers);
    let aggregator = run_batch(&*validator, &requests, Aggregator::new(detail, filter))?;
    let output = aggregator.result().with_context(|| "render result")?;
    println!("{output}");
    Ok(())
}

fn collect_candidates(
    mut numbers: Vec<String>,
    numbers_file: Option<PathBuf>,
) -> Result<Vec<String>> {
    if let Some(path) = numbers_file {
        let lines = config::read_numbers_file(&path)
            .with_context(|| format!("read numbers file {}", path.display()))?;
        debug!(path = %path.display(), lines = lines.len(), "numbers file loaded");
        numbers.extend(lines);
    }
    Ok(numbers)
}

fn output_shape(
    config: &AppConfig,
    short: bool,
    only_invalid: bool,
) -> (DetailLevel, FilterPolicy) {
    let detail = if short || config.output.short {
        DetailLevel::Summary
    } else {
        DetailLevel::Full
    };
    let filter = if only_invalid || config.output.only_invalid {
        FilterPolicy::InvalidOnly
    } else {
        FilterPolicy::All
    };
    (detail, filter)
}

fn build_validator(service: &ServiceConfig) -> Result<DynValidator> {
    match service.backend {
        ServiceBackend::AwsCli => {
            let validator: DynValidator = Box::new(
                AwsCliValidator::new(service.aws_cli.clone())
                    .with_profile(service.profile.clone())
                    .with_region(service.region.clone()),
            );
            Ok(validator)
        }
        ServiceBackend::Http => {
            let endpoint = service
                .endpoint
                .as_deref()
                .ok_or_else(|| invalid_input("service.endpoint is required for the http backend"))?;
            let validator = HttpValidator::new(endpoint, service.timeout_secs)
                .with_context(|| format!("configure validation endpoint {endpoint}"))?;
            let validator: DynValidator = Box::new(validator);
            Ok(validator)
        }
    }
}

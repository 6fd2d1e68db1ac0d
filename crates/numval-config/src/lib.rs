use std::env;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

pub mod numbers;

pub use numbers::{read_numbers_file, read_numbers_file_with_limit, MAX_NUMBERS_FILE_BYTES};

const APP_DIR: &str = "numval";
const CONFIG_FILENAME: &str = "config.toml";

pub const DEFAULT_AWS_CLI: &str = "aws";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const MAX_TIMEOUT_SECS: u64 = 300;

#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    pub numbers_file: Option<PathBuf>,
    pub output: OutputConfig,
    pub service: ServiceConfig,
}

#[derive(Debug, Clone, Default)]
pub struct OutputConfig {
    pub short: bool,
    pub only_invalid: bool,
}

#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub backend: ServiceBackend,
    pub aws_cli: String,
    pub profile: Option<String>,
    pub region: Option<String>,
    pub endpoint: Option<String>,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ServiceBackend {
    AwsCli,
    Http,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            backend: ServiceBackend::AwsCli,
            aws_cli: DEFAULT_AWS_CLI.to_string(),
            profile: None,
            region: None,
            endpoint: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid config path: {0}")]
    InvalidConfigPath(PathBuf),
    #[error("config file not found: {0}")]
    MissingConfigFile(PathBuf),
    #[error("config file permissions too permissive: {0}")]
    InsecurePermissions(PathBuf),
    #[error("invalid service.timeout_secs value: {0}")]
    InvalidTimeout(u64),
    #[error("invalid service.{field}: {message}")]
    InvalidServiceField {
        field: &'static str,
        message: String,
    },
    #[error("numbers file not found: {0}")]
    MissingNumbersFile(PathBuf),
    #[error("numbers file too big: {path} (max file size: {limit} bytes)")]
    NumbersFileTooLarge { path: PathBuf, limit: u64 },
    #[error("failed to read file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    numbers_file: Option<PathBuf>,
    output: Option<OutputFile>,
    service: Option<ServiceFile>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct OutputFile {
    short: Option<bool>,
    only_invalid: Option<bool>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ServiceFile {
    backend: Option<ServiceBackend>,
    aws_cli: Option<String>,
    profile: Option<String>,
    region: Option<String>,
    endpoint: Option<String>,
    timeout_secs: Option<u64>,
}

/// Where the effective configuration came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigOrigin {
    File(PathBuf),
    /// No file was read. `searched` is the default location, if one exists.
    Defaults { searched: Option<PathBuf> },
}

#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub config: AppConfig,
    pub origin: ConfigOrigin,
}

impl LoadedConfig {
    fn defaults(searched: Option<PathBuf>) -> Self {
        Self {
            config: AppConfig::default(),
            origin: ConfigOrigin::Defaults { searched },
        }
    }
}

/// Loads the config named on the command line, or the one at the default
/// location. Only an explicitly named file is required to exist.
pub fn load(explicit: Option<PathBuf>) -> Result<LoadedConfig> {
    if let Some(path) = explicit {
        if path.as_os_str().is_empty() {
            return Err(ConfigError::InvalidConfigPath(path));
        }
        let config =
            read_config(&path)?.ok_or_else(|| ConfigError::MissingConfigFile(path.clone()))?;
        return Ok(LoadedConfig {
            config,
            origin: ConfigOrigin::File(path),
        });
    }

    let Some(path) = default_config_path() else {
        return Ok(LoadedConfig::defaults(None));
    };
    match read_config(&path)? {
        Some(config) => Ok(LoadedConfig {
            config,
            origin: ConfigOrigin::File(path),
        }),
        None => Ok(LoadedConfig::defaults(Some(path))),
    }
}

/// `$XDG_CONFIG_HOME/numval/config.toml`, falling back to `~/.config`.
pub fn default_config_path() -> Option<PathBuf> {
    let base = match env::var_os("XDG_CONFIG_HOME") {
        Some(dir) if !dir.is_empty() => PathBuf::from(dir),
        _ => dirs::home_dir()?.join(".config"),
    };
    Some(base.join(APP_DIR).join(CONFIG_FILENAME))
}

fn read_config(path: &Path) -> Result<Option<AppConfig>> {
    let read_err = |source: std::io::Error| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    };
    let metadata = match fs::metadata(path) {
        Ok(metadata) => metadata,
        Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
        Err(err) => return Err(read_err(err)),
    };
    check_private(path, &metadata)?;

    let contents = fs::read_to_string(path).map_err(read_err)?;
    let parsed: ConfigFile = toml::from_str(&contents).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    let base_dir = path.parent().unwrap_or_else(|| Path::new(""));
    merge_config(parsed, base_dir).map(Some)
}

fn merge_config(parsed: ConfigFile, base_dir: &Path) -> Result<AppConfig> {
    let mut config = AppConfig::default();

    // Relative numbers files are resolved against the config file's directory.
    if let Some(numbers_file) = parsed.numbers_file {
        config.numbers_file = Some(if numbers_file.is_relative() {
            base_dir.join(numbers_file)
        } else {
            numbers_file
        });
    }

    if let Some(output) = parsed.output {
        if let Some(short) = output.short {
            config.output.short = short;
        }
        if let Some(only_invalid) = output.only_invalid {
            config.output.only_invalid = only_invalid;
        }
    }

    if let Some(service) = parsed.service {
        merge_service(&mut config.service, service)?;
    }

    Ok(config)
}

fn merge_service(config: &mut ServiceConfig, parsed: ServiceFile) -> Result<()> {
    if let Some(backend) = parsed.backend {
        config.backend = backend;
    }
    if let Some(aws_cli) = parsed.aws_cli {
        if aws_cli.trim().is_empty() {
            return Err(ConfigError::InvalidServiceField {
                field: "aws_cli",
                message: "program cannot be empty".to_string(),
            });
        }
        config.aws_cli = aws_cli;
    }
    config.profile = non_empty("profile", parsed.profile)?;
    config.region = non_empty("region", parsed.region)?;
    config.endpoint = non_empty("endpoint", parsed.endpoint)?;
    if let Some(timeout) = parsed.timeout_secs {
        if timeout == 0 || timeout > MAX_TIMEOUT_SECS {
            return Err(ConfigError::InvalidTimeout(timeout));
        }
        config.timeout_secs = timeout;
    }

    if config.backend == ServiceBackend::Http && config.endpoint.is_none() {
        return Err(ConfigError::InvalidServiceField {
            field: "endpoint",
            message: "required for the http backend".to_string(),
        });
    }
    Ok(())
}

fn non_empty(field: &'static str, value: Option<String>) -> Result<Option<String>> {
    match value {
        Some(value) if value.trim().is_empty() => Err(ConfigError::InvalidServiceField {
            field,
            message: "value cannot be empty".to_string(),
        }),
        Some(value) => Ok(Some(value.trim().to_string())),
        None => Ok(None),
    }
}

// Owner-only access on unix.
#[cfg(unix)]
fn check_private(path: &Path, metadata: &fs::Metadata) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    if metadata.permissions().mode() & 0o077 == 0 {
        Ok(())
    } else {
        Err(ConfigError::InsecurePermissions(path.to_path_buf()))
    }
}

#[cfg(not(unix))]
fn check_private(_path: &Path, _metadata: &fs::Metadata) -> Result<()> {
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{
        load, merge_config, read_config, ConfigError, ConfigFile, ConfigOrigin, OutputFile,
        ServiceBackend, ServiceFile, DEFAULT_TIMEOUT_SECS,
    };
    use std::fs;
    use std::path::{Path, PathBuf};
    use tempfile::TempDir;

    fn restrict_permissions(path: &Path) {
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mut perms = fs::metadata(path).expect("metadata").permissions();
            perms.set_mode(0o600);
            fs::set_permissions(path, perms).expect("chmod");
        }
    }

    fn service_file() -> ServiceFile {
        ServiceFile {
            backend: None,
            aws_cli: None,
            profile: None,
            region: None,
            endpoint: None,
            timeout_secs: None,
        }
    }

    #[test]
    fn merge_config_applies_values() {
        let parsed = ConfigFile {
            numbers_file: Some(PathBuf::from("numbers.txt")),
            output: Some(OutputFile {
                short: Some(true),
                only_invalid: Some(true),
            }),
            service: Some(ServiceFile {
                profile: Some("ops".to_string()),
                region: Some(" us-west-2 ".to_string()),
                timeout_secs: Some(10),
                ..service_file()
            }),
        };
        let merged = merge_config(parsed, Path::new("/etc/numval")).expect("merge");
        assert_eq!(
            merged.numbers_file,
            Some(PathBuf::from("/etc/numval/numbers.txt"))
        );
        assert!(merged.output.short);
        assert!(merged.output.only_invalid);
        assert_eq!(merged.service.backend, ServiceBackend::AwsCli);
        assert_eq!(merged.service.profile.as_deref(), Some("ops"));
        assert_eq!(merged.service.region.as_deref(), Some("us-west-2"));
        assert_eq!(merged.service.timeout_secs, 10);
    }

    #[test]
    fn merge_config_keeps_absolute_numbers_file() {
        let parsed = ConfigFile {
            numbers_file: Some(PathBuf::from("/data/numbers.txt")),
            output: None,
            service: None,
        };
        let merged = merge_config(parsed, Path::new("/etc/numval")).expect("merge");
        assert_eq!(merged.numbers_file, Some(PathBuf::from("/data/numbers.txt")));
        assert_eq!(merged.service.timeout_secs, DEFAULT_TIMEOUT_SECS);
    }

    #[test]
    fn merge_config_rejects_http_without_endpoint() {
        let parsed = ConfigFile {
            numbers_file: None,
            output: None,
            service: Some(ServiceFile {
                backend: Some(ServiceBackend::Http),
                ..service_file()
            }),
        };
        let err = merge_config(parsed, Path::new("")).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidServiceField {
                field: "endpoint",
                ..
            }
        ));
    }

    #[test]
    fn merge_config_rejects_zero_timeout() {
        let parsed = ConfigFile {
            numbers_file: None,
            output: None,
            service: Some(ServiceFile {
                timeout_secs: Some(0),
                ..service_file()
            }),
        };
        let err = merge_config(parsed, Path::new("")).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidTimeout(0)));
    }

    #[test]
    fn load_requires_explicit_file() {
        let temp = TempDir::new().expect("tempdir");
        let missing = temp.path().join("config.toml");
        let err = load(Some(missing)).unwrap_err();
        assert!(err.to_string().contains("config file not found"));
    }

    #[test]
    fn load_rejects_empty_explicit_path() {
        let err = load(Some(PathBuf::new())).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidConfigPath(_)));
    }

    #[test]
    fn read_config_skips_missing_file() {
        let temp = TempDir::new().expect("tempdir");
        let missing = temp.path().join("config.toml");
        assert!(read_config(&missing).expect("read").is_none());
    }

    #[test]
    fn load_parses_toml() {
        let temp = TempDir::new().expect("tempdir");
        let path = temp.path().join("config.toml");
        fs::write(
            &path,
            concat!(
                "[output]\nonly_invalid = true\n",
                "[service]\nbackend = \"http\"\n",
                "endpoint = \"https://validate.example.com/v1\"\n",
            ),
        )
        .expect("write config");
        restrict_permissions(&path);

        let loaded = load(Some(path.clone())).expect("load");
        assert_eq!(loaded.origin, ConfigOrigin::File(path));
        let config = loaded.config;
        assert!(config.output.only_invalid);
        assert!(!config.output.short);
        assert_eq!(config.service.backend, ServiceBackend::Http);
        assert_eq!(
            config.service.endpoint.as_deref(),
            Some("https://validate.example.com/v1")
        );
    }

    #[test]
    fn read_config_rejects_unknown_fields() {
        let temp = TempDir::new().expect("tempdir");
        let path = temp.path().join("config.toml");
        fs::write(&path, "verbose = true\n").expect("write config");
        restrict_permissions(&path);

        let err = read_config(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn read_config_rejects_world_readable_file() {
        use std::os::unix::fs::PermissionsExt;

        let temp = TempDir::new().expect("tempdir");
        let path = temp.path().join("config.toml");
        fs::write(&path, "").expect("write config");
        fs::set_permissions(&path, fs::Permissions::from_mode(0o644)).expect("chmod");

        let err = read_config(&path).unwrap_err();
        assert!(matches!(err, ConfigError::InsecurePermissions(_)));
    }
}

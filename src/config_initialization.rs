//! Configuration initialization and hierarchy management

use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use crate::adapters::{ClientConfig, TomlConfigAdapter};

/// Environment variables and the config keys they override
pub const ENV_MAPPINGS: [(&str, &str); 3] = [
    ("DEEPFAKE_CLIENT_ENDPOINT", "endpoint"),
    ("DEEPFAKE_CLIENT_CONTRACT", "contract"),
    ("DEEPFAKE_CLIENT_LOG_FORMAT", "log_format"),
];

/// Initialize configuration following precedence: Env > File > Defaults.
///
/// An explicit `config_file` must exist; without one the default file in the
/// working directory is used when present.
pub fn initialize_configuration_hierarchy(config_file: Option<&Path>) -> Result<ClientConfig> {
    initialize_configuration_with(config_file, std::env::vars())
}

/// Same hierarchy with the override source supplied by the caller
pub fn initialize_configuration_with<I>(config_file: Option<&Path>, vars: I) -> Result<ClientConfig>
where
    I: IntoIterator<Item = (String, String)>,
{
    let mut config = load_config_file(config_file)?;
    apply_overrides(&mut config, vars)?;

    config.validate().context("Invalid client configuration")?;
    info!(
        endpoint = %config.endpoint,
        contract = %config.contract,
        "Configuration initialized"
    );
    Ok(config)
}

/// Load configuration from file, falling back to defaults
fn load_config_file(config_file: Option<&Path>) -> Result<ClientConfig> {
    if let Some(path) = config_file {
        info!("Loading configuration from: {}", path.display());
        return TomlConfigAdapter::load(path)
            .with_context(|| format!("Failed to load config file {}", path.display()));
    }

    let default_path = TomlConfigAdapter::default_config_path();
    if default_path.exists() {
        info!("Loading configuration from: {}", default_path.display());
        return TomlConfigAdapter::load(&default_path)
            .with_context(|| format!("Failed to load config file {}", default_path.display()));
    }

    info!("No config file found; using defaults");
    Ok(ClientConfig::default())
}

/// Apply environment-style overrides to configuration
pub fn apply_overrides<I>(config: &mut ClientConfig, vars: I) -> Result<usize>
where
    I: IntoIterator<Item = (String, String)>,
{
    let mut applied = 0;
    for (name, value) in vars {
        let Some((_, key)) = ENV_MAPPINGS.iter().find(|(env, _)| *env == name) else {
            continue;
        };
        config
            .set(key, &value)
            .with_context(|| format!("Invalid value for {}", name))?;
        info!("Found environment override: {} = {}", name, value);
        applied += 1;
    }

    if applied > 0 {
        info!("Applied {} environment variable overrides", applied);
    }
    Ok(applied)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{LogFormat, ServiceContract};
    use std::io::Write;

    fn vars(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_overrides_apply_known_variables() {
        let mut config = ClientConfig::default();
        let applied = apply_overrides(
            &mut config,
            vars(&[
                ("DEEPFAKE_CLIENT_ENDPOINT", "https://svc.example.com"),
                ("DEEPFAKE_CLIENT_CONTRACT", "detect-deepfake"),
                ("PATH", "/usr/bin"),
            ]),
        )
        .unwrap();

        assert_eq!(applied, 2);
        assert_eq!(config.endpoint, "https://svc.example.com");
        assert_eq!(config.contract, ServiceContract::DetectDeepfake);
        assert_eq!(config.log_format, LogFormat::Pretty);
    }

    #[test]
    fn test_overrides_reject_bad_values() {
        let mut config = ClientConfig::default();
        let err = apply_overrides(&mut config, vars(&[("DEEPFAKE_CLIENT_LOG_FORMAT", "xml")])).unwrap_err();
        assert!(err.to_string().contains("DEEPFAKE_CLIENT_LOG_FORMAT"));
    }

    #[test]
    fn test_explicit_file_is_loaded() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[client]\nendpoint = \"http://127.0.0.1:9000\"").unwrap();
        let config = load_config_file(Some(file.path())).unwrap();
        assert_eq!(config.endpoint, "http://127.0.0.1:9000");
    }

    #[test]
    fn test_hierarchy_env_overrides_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[client]\nendpoint = \"http://127.0.0.1:9000\"\ncontract = \"detect-deepfake\"\nlog_format = \"compact\""
        )
        .unwrap();

        let config = initialize_configuration_with(
            Some(file.path()),
            vars(&[("DEEPFAKE_CLIENT_ENDPOINT", "https://svc.example.com/api")]),
        )
        .unwrap();

        assert_eq!(config.endpoint, "https://svc.example.com/api");
        assert_eq!(config.contract, ServiceContract::DetectDeepfake);
        assert_eq!(config.log_format, LogFormat::Compact);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_hierarchy_rejects_invalid_final_endpoint() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[client]\ncontract = \"analyze\"").unwrap();

        let err = initialize_configuration_with(
            Some(file.path()),
            vars(&[("DEEPFAKE_CLIENT_ENDPOINT", "localhost:8000")]),
        )
        .unwrap_err();
        assert!(err.to_string().contains("Invalid client configuration"));
    }

    #[test]
    fn test_hierarchy_from_process_environment() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[client]\nendpoint = \"http://127.0.0.1:9000\"").unwrap();

        let config = initialize_configuration_hierarchy(Some(file.path())).unwrap();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent.toml");
        assert!(load_config_file(Some(&missing)).is_err());
    }
}

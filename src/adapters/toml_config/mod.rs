// TOML config adapter - Client configuration from TOML files

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;
use url::Url;

use crate::adapters::http_analysis::ServiceContract;
use crate::adapters::tracing_log::LogFormat;
use crate::error::{ClientError, ClientResult};

/// Service root used when nothing else is configured
pub const DEFAULT_ENDPOINT: &str = "http://localhost:8000";

/// File looked up in the working directory when no path is given
pub const DEFAULT_CONFIG_FILE: &str = "deepfake_client.toml";

/// Client configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Root URL of the analysis service
    pub endpoint: String,
    /// Wire contract the service speaks
    pub contract: ServiceContract,
    /// Log output format
    pub log_format: LogFormat,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            contract: ServiceContract::default(),
            log_format: LogFormat::default(),
        }
    }
}

impl ClientConfig {
    /// Parsed endpoint; must be an absolute http(s) URL
    pub fn endpoint_url(&self) -> ClientResult<Url> {
        let invalid = |reason: String| ClientError::InvalidEndpoint {
            endpoint: self.endpoint.clone(),
            reason,
        };

        let url = Url::parse(self.endpoint.trim()).map_err(|e| invalid(e.to_string()))?;
        match url.scheme() {
            "http" | "https" => Ok(url),
            other => Err(invalid(format!("unsupported scheme '{}'", other))),
        }
    }

    pub fn validate(&self) -> ClientResult<()> {
        self.endpoint_url().map(|_| ())
    }

    /// Override a single key, as used for environment variables
    pub fn set(&mut self, key: &str, value: &str) -> ClientResult<()> {
        match key {
            "endpoint" => self.endpoint = value.trim().to_string(),
            "contract" => self.contract = value.parse()?,
            "log_format" => self.log_format = value.parse()?,
            other => debug!("Ignoring unknown config key: {}", other),
        }
        Ok(())
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    client: ClientConfig,
}

/// TOML configuration adapter
pub struct TomlConfigAdapter;

impl TomlConfigAdapter {
    /// Default config file path in the working directory
    pub fn default_config_path() -> PathBuf {
        PathBuf::from(DEFAULT_CONFIG_FILE)
    }

    /// Parse the `[client]` table of a TOML document
    pub fn parse(content: &str) -> ClientResult<ClientConfig> {
        let file: ConfigFile = toml::from_str(content)?;
        Ok(file.client)
    }

    /// Read and parse a config file
    pub fn load(path: &Path) -> ClientResult<ClientConfig> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }
}

//! Batch job configuration.
//!
//! A job file names a list of networks and what to do with them:
//!
//! ```yaml
//! general:
//!   log_level: info
//!   format: compressed   # compressed | uncompressed | mapped
//!   summarize: true
//!
//! networks:
//!   - 10.0.0.1/24
//!   - 10.0.1.1/24
//!
//! split: 4        # optional
//! subnet: 26      # optional
//! ```

use serde::{Deserialize, Serialize};

use crate::address::IpAddress;
use crate::error::AddrError;

const LOG_LEVELS: [&str; 5] = ["error", "warn", "info", "debug", "trace"];

/// How addresses are rendered in job output
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// `2001:db8::1/64`
    #[default]
    Compressed,
    /// `2001:0db8:0000:0000:0000:0000:0000:0001/64`
    Uncompressed,
    /// `::ffff:10.0.0.1/24` for mapped addresses, compressed otherwise
    Mapped,
}

impl OutputFormat {
    pub fn render(self, ip: &IpAddress) -> String {
        match self {
            OutputFormat::Compressed => ip.to_string(),
            OutputFormat::Uncompressed => ip.to_string_uncompressed(),
            OutputFormat::Mapped => ip.to_string_mapped(),
        }
    }
}

/// A batch job read from YAML
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,
    pub networks: Vec<IpAddress>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub split: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subnet: Option<usize>,
}

/// General settings
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct GeneralConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_level: Option<String>,
    #[serde(default)]
    pub format: OutputFormat,
    #[serde(default = "default_summarize")]
    pub summarize: bool,
}

fn default_summarize() -> bool {
    true
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: Some("info".to_string()),
            format: OutputFormat::Compressed,
            summarize: true,
        }
    }
}

/// Configuration validation errors
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("Invalid general configuration: {0}")]
    InvalidGeneral(String),
    #[error("Invalid network list: {0}")]
    InvalidNetworks(String),
    #[error("Invalid job: {0}")]
    InvalidJob(String),
}

impl Config {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(level) = &self.general.log_level {
            if !LOG_LEVELS.contains(&level.to_lowercase().as_str()) {
                return Err(ValidationError::InvalidGeneral(format!(
                    "log_level '{}' is not one of {}",
                    level,
                    LOG_LEVELS.join(", ")
                )));
            }
        }

        if self.networks.is_empty() {
            return Err(ValidationError::InvalidNetworks(
                "at least one network is required".to_string(),
            ));
        }

        if self.split == Some(0) {
            return Err(ValidationError::InvalidJob(
                "split must be at least 1".to_string(),
            ));
        }

        if let Some(length) = self.subnet {
            for net in &self.networks {
                if length < net.prefix().length() || length > net.family().bits() {
                    return Err(ValidationError::InvalidJob(format!(
                        "subnet /{} does not fit {}",
                        length, net
                    )));
                }
            }
        }

        Ok(())
    }

    /// Run the job: optionally summarize, then split or subnet every result.
    pub fn apply(&self) -> Result<Vec<IpAddress>, AddrError> {
        let mut networks = if self.general.summarize {
            IpAddress::summarize(&self.networks)
        } else {
            self.networks.clone()
        };

        if let Some(count) = self.split {
            networks = networks
                .iter()
                .map(|net| net.split(count))
                .collect::<Result<Vec<_>, _>>()?
                .into_iter()
                .flatten()
                .collect();
        }

        if let Some(length) = self.subnet {
            networks = networks
                .iter()
                .map(|net| net.subnet(length))
                .collect::<Result<Vec<_>, _>>()?
                .into_iter()
                .flatten()
                .collect();
        }

        Ok(networks)
    }

    /// Render `networks` in the configured format.
    pub fn render(&self, networks: &[IpAddress]) -> Vec<String> {
        networks.iter().map(|n| self.general.format.render(n)).collect()
    }
}

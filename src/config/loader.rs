// Copyright 2025 The Drasi Authors.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.


//! Loading and saving configuration files with environment variable interpolation.

use super::env_interpolation;
use super::types::CdcSourceConfig;
use serde::de::DeserializeOwned;
use std::fs;
use std::path::Path;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse YAML: {0}")]
    YamlError(#[from] serde_yaml::Error),

    #[error("Failed to parse JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Environment variable interpolation failed: {0}")]
    InterpolationError(#[from] env_interpolation::InterpolationError),

    #[error("Failed to parse config file '{path}': YAML error: {yaml_err}, JSON error: {json_err}")]
    ParseError {
        path: String,
        yaml_err: String,
        json_err: String,
    },

    #[error("Validation error: {0}")]
    ValidationError(#[from] anyhow::Error),
}

/// Interpolate, then deserialize YAML.
///
/// ```
/// use pg_cdc_source::config::loader::from_yaml_str;
/// use pg_cdc_source::config::CdcSourceConfig;
///
/// std::env::set_var("DOC_LOADER_HOST", "db.internal");
///
/// let config: CdcSourceConfig = from_yaml_str(
///     "source:\n  hostname: ${DOC_LOADER_HOST}\n  database: inventory\n",
/// )
/// .unwrap();
/// assert_eq!(config.source.hostname, "db.internal");
/// ```
pub fn from_yaml_str<T: DeserializeOwned>(s: &str) -> Result<T, ConfigError> {
    let interpolated = env_interpolation::interpolate(s)?;
    Ok(serde_yaml::from_str(&interpolated)?)
}

/// Interpolate, then deserialize JSON.
pub fn from_json_str<T: DeserializeOwned>(s: &str) -> Result<T, ConfigError> {
    let interpolated = env_interpolation::interpolate(s)?;
    Ok(serde_json::from_str(&interpolated)?)
}

/// Load a [`CdcSourceConfig`] from a YAML or JSON file.
///
/// Environment variables are interpolated first. YAML is tried before JSON
/// and the result is validated before it is returned.
pub fn load_config_file<P: AsRef<Path>>(path: P) -> Result<CdcSourceConfig, ConfigError> {
    let path_ref = path.as_ref();
    let content = fs::read_to_string(path_ref)?;
    let interpolated = env_interpolation::interpolate(&content)?;

    let config = match serde_yaml::from_str::<CdcSourceConfig>(&interpolated) {
        Ok(config) => config,
        Err(yaml_err) => match serde_json::from_str::<CdcSourceConfig>(&interpolated) {
            Ok(config) => config,
            Err(json_err) => {
                return Err(ConfigError::ParseError {
                    path: path_ref.display().to_string(),
                    yaml_err: yaml_err.to_string(),
                    json_err: json_err.to_string(),
                });
            }
        },
    };

    config.validate()?;

    Ok(config)
}

/// Write `config` as YAML, creating parent directories as needed.
pub fn save_config_file<P: AsRef<Path>>(
    config: &CdcSourceConfig,
    path: P,
) -> Result<(), ConfigError> {
    let path_ref = path.as_ref();
    if let Some(parent) = path_ref.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let content = serde_yaml::to_string(config)?;
    fs::write(path_ref, content)?;
    Ok(())
}

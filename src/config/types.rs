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


//! Configuration file structures.

use indexmap::IndexMap;
use log::warn;
use serde::{Deserialize, Serialize};

use crate::builder::{PostgresSourceBuilder, DEFAULT_PORT, DEFAULT_SERVER_NAME};
use crate::plugin::{DecodingPlugin, DEFAULT_DECODING_PLUGIN};
use crate::properties::SourceProperties;
use crate::runtime::DeserializationSchema;

/// Top-level configuration file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CdcSourceConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
    pub source: PostgresSourceConfigDto,
}

/// PostgreSQL source settings as written in the configuration file.
///
/// Required connection fields default to empty so that a missing value is
/// reported by the builder under its own name rather than as a parse error.
#[derive(Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct PostgresSourceConfigDto {
    #[serde(default)]
    pub hostname: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default)]
    pub database: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    #[serde(default = "default_decoding_plugin")]
    pub decoding_plugin_name: String,
    #[serde(default = "default_server_name")]
    pub server_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema_list: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table_list: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<IndexMap<String, String>>,
}

impl Default for PostgresSourceConfigDto {
    fn default() -> Self {
        Self {
            hostname: String::new(),
            port: DEFAULT_PORT,
            database: String::new(),
            username: String::new(),
            password: String::new(),
            decoding_plugin_name: default_decoding_plugin(),
            server_name: default_server_name(),
            schema_list: None,
            table_list: None,
            properties: None,
        }
    }
}

impl std::fmt::Debug for PostgresSourceConfigDto {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PostgresSourceConfigDto")
            .field("hostname", &self.hostname)
            .field("port", &self.port)
            .field("database", &self.database)
            .field("username", &self.username)
            .field("password", &"******")
            .field("decoding_plugin_name", &self.decoding_plugin_name)
            .field("server_name", &self.server_name)
            .field("schema_list", &self.schema_list)
            .field("table_list", &self.table_list)
            .field(
                "properties",
                &self
                    .properties
                    .as_ref()
                    .map(|p| p.iter().collect::<SourceProperties>()),
            )
            .finish()
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

fn default_decoding_plugin() -> String {
    DEFAULT_DECODING_PLUGIN.to_string()
}

fn default_server_name() -> String {
    DEFAULT_SERVER_NAME.to_string()
}

impl CdcSourceConfig {
    pub fn new(source: PostgresSourceConfigDto) -> Self {
        Self {
            log_level: default_log_level(),
            source,
        }
    }

    /// Checks that do not depend on the builder.
    ///
    /// Required connection fields are left to
    /// [`PostgresSourceBuilder::build`] so they are reported the same way
    /// whether the source comes from a file or from code.
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.source.port == 0 {
            return Err(anyhow::anyhow!("Invalid source port: 0"));
        }

        if self.source.server_name.is_empty() {
            return Err(anyhow::anyhow!("Source serverName cannot be empty"));
        }

        if !DecodingPlugin::is_known(&self.source.decoding_plugin_name) {
            warn!(
                "Decoding plug-in '{}' is not one of the known plug-ins; passing it through unchanged",
                self.source.decoding_plugin_name
            );
        }

        Ok(())
    }
}

impl PostgresSourceConfigDto {
    /// Load these settings into a builder.
    ///
    /// Empty connection fields are still handed to the builder, which rejects
    /// them when built.
    pub fn into_builder<T>(
        self,
        deserializer: impl DeserializationSchema<T> + 'static,
    ) -> PostgresSourceBuilder<T> {
        let mut builder = PostgresSourceBuilder::new()
            .decoding_plugin_name(self.decoding_plugin_name)
            .server_name(self.server_name)
            .hostname(self.hostname)
            .port(self.port)
            .database(self.database)
            .username(self.username)
            .password(self.password)
            .deserializer(deserializer);

        if let Some(schemas) = self.schema_list {
            builder = builder.schema_list(schemas);
        }
        if let Some(tables) = self.table_list {
            builder = builder.table_list(tables);
        }
        if let Some(properties) = self.properties {
            builder = builder.properties(properties);
        }

        builder
    }
}

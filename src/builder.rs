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


use indexmap::IndexMap;
use log::{debug, warn};
use std::fmt;

use crate::error::{fields, BuildError, SourceBuildError};
use crate::plugin::DEFAULT_DECODING_PLUGIN;
use crate::properties::{self, SourceProperties};
use crate::runtime::{DeserializationSchema, SourceRuntime};

/// Connector implementation the runtime should load.
pub const CONNECTOR_CLASS: &str = "io.debezium.connector.postgresql.PostgresConnector";

/// Logical server name used as the namespace for every emitted topic.
///
/// Two sources running in the same runtime with this default will share
/// topic names; set [`PostgresSourceBuilder::server_name`] to keep them apart.
pub const DEFAULT_SERVER_NAME: &str = "postgres-binlog-source";

pub const DEFAULT_PORT: u16 = 5432;

/// Builder for a PostgreSQL change-data-capture source.
///
/// Setters store values as given and never validate. Validation happens in
/// [`build`](Self::build), which consumes the builder.
pub struct PostgresSourceBuilder<T> {
    plugin_name: String,
    server_name: String,
    hostname: Option<String>,
    port: u16,
    database: Option<String>,
    username: Option<String>,
    password: Option<String>,
    schema_list: Option<Vec<String>>,
    table_list: Option<Vec<String>>,
    properties: Option<IndexMap<String, String>>,
    deserializer: Option<Box<dyn DeserializationSchema<T>>>,
}

impl<T> Default for PostgresSourceBuilder<T> {
    fn default() -> Self {
        Self {
            plugin_name: DEFAULT_DECODING_PLUGIN.to_string(),
            server_name: DEFAULT_SERVER_NAME.to_string(),
            hostname: None,
            port: DEFAULT_PORT,
            database: None,
            username: None,
            password: None,
            schema_list: None,
            table_list: None,
            properties: None,
            deserializer: None,
        }
    }
}

impl<T> PostgresSourceBuilder<T> {
    /// Create a new builder with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Name of the logical decoding plug-in installed on the server.
    ///
    /// Accepts a [`DecodingPlugin`](crate::DecodingPlugin) or any plug-in name.
    pub fn decoding_plugin_name(mut self, name: impl Into<String>) -> Self {
        self.plugin_name = name.into();
        self
    }

    pub fn hostname(mut self, hostname: impl Into<String>) -> Self {
        self.hostname = Some(hostname.into());
        self
    }

    /// Port of the PostgreSQL server
    pub fn port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Database to stream changes from
    pub fn database(mut self, database: impl Into<String>) -> Self {
        self.database = Some(database.into());
        self
    }

    pub fn username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    /// Logical name that prefixes every topic produced by this source.
    pub fn server_name(mut self, name: impl Into<String>) -> Self {
        self.server_name = name.into();
        self
    }

    /// Patterns matching the schemas to monitor.
    ///
    /// When unset every non-system schema is monitored.
    pub fn schema_list<I, S>(mut self, schemas: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.schema_list = Some(schemas.into_iter().map(Into::into).collect());
        self
    }

    /// Patterns matching `schema.table` identifiers to monitor.
    ///
    /// When unset every non-system table in the monitored schemas is included.
    pub fn table_list<I, S>(mut self, tables: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.table_list = Some(tables.into_iter().map(Into::into).collect());
        self
    }

    /// Raw connector properties merged after every generated key.
    ///
    /// An entry here replaces any value the builder computes for the same key.
    pub fn properties<I, K, V>(mut self, properties: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.properties = Some(
            properties
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        );
        self
    }

    /// Converts the runtime's change records into `T`.
    pub fn deserializer(mut self, deserializer: impl DeserializationSchema<T> + 'static) -> Self {
        self.deserializer = Some(Box::new(deserializer));
        self
    }

    /// Same as [`deserializer`](Self::deserializer) for an already boxed schema.
    pub fn boxed_deserializer(mut self, deserializer: Box<dyn DeserializationSchema<T>>) -> Self {
        self.deserializer = Some(deserializer);
        self
    }

    /// Assemble the connector properties without creating a source.
    pub fn build_properties(&self) -> Result<SourceProperties, BuildError> {
        let mut props = SourceProperties::new();
        props.set(properties::CONNECTOR_CLASS, CONNECTOR_CLASS);
        props.set(properties::PLUGIN_NAME, self.plugin_name.as_str());
        props.set(properties::SERVER_NAME, self.server_name.as_str());
        props.set(
            properties::HOSTNAME,
            require(&self.hostname, fields::HOSTNAME)?,
        );
        props.set(properties::DBNAME, require(&self.database, fields::DATABASE)?);
        props.set(properties::USER, require(&self.username, fields::USERNAME)?);
        props.set(
            properties::PASSWORD,
            require(&self.password, fields::PASSWORD)?,
        );
        props.set(properties::PORT, self.port.to_string());

        if let Some(schemas) = self.schema_list.as_ref().filter(|s| !s.is_empty()) {
            props.set(properties::SCHEMA_WHITELIST, schemas.join(","));
        }
        if let Some(tables) = self.table_list.as_ref().filter(|t| !t.is_empty()) {
            props.set(properties::TABLE_WHITELIST, tables.join(","));
        }

        if let Some(overrides) = &self.properties {
            merge_overrides(&mut props, overrides);
        }

        debug!("Assembled PostgreSQL source properties: {props:?}");
        Ok(props)
    }

    /// Validate the configuration and hand it to `runtime`.
    ///
    /// Fails with [`SourceBuildError::Config`] before the runtime is touched
    /// when a required field is missing. A runtime failure is returned as
    /// [`SourceBuildError::Runtime`] carrying the runtime's own error.
    pub fn build<R>(self, runtime: &R) -> Result<R::Source, SourceBuildError<R::Error>>
    where
        R: SourceRuntime<T>,
    {
        let props = self.build_properties()?;
        let deserializer = self
            .deserializer
            .ok_or_else(|| BuildError::missing(fields::DESERIALIZER))?;

        runtime
            .create_source(deserializer, props)
            .map_err(SourceBuildError::Runtime)
    }
}

fn require<'a>(value: &'a Option<String>, field: &'static str) -> Result<&'a str, BuildError> {
    match value.as_deref() {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(BuildError::missing(field)),
    }
}

/// Copy passthrough entries over the generated ones.
fn merge_overrides(props: &mut SourceProperties, overrides: &IndexMap<String, String>) {
    for (key, value) in overrides {
        if props.set(key.as_str(), value.as_str()).is_some() {
            warn!("Passthrough property '{key}' overrides a generated value");
        }
    }
}

impl<T> fmt::Debug for PostgresSourceBuilder<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PostgresSourceBuilder")
            .field("plugin_name", &self.plugin_name)
            .field("server_name", &self.server_name)
            .field("hostname", &self.hostname)
            .field("port", &self.port)
            .field("database", &self.database)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "******"))
            .field("schema_list", &self.schema_list)
            .field("table_list", &self.table_list)
            .field("properties", &self.properties.as_ref().map(IndexMap::len))
            .field("deserializer", &self.deserializer.is_some())
            .finish()
    }
}

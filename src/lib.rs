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


//! Configuration builder for a PostgreSQL change-data-capture source.
//!
//! [`PostgresSourceBuilder`] collects connection and filter settings, checks
//! that the required ones are present, and turns them into the flat
//! [`SourceProperties`] map a change-capture runtime consumes. The runtime
//! itself sits behind the [`SourceRuntime`] trait.
//!
//! ```
//! use pg_cdc_source::{
//!     DecodingPlugin, JsonDeserializer, PostgresSourceBuilder, PreparedRuntime, PreparedSource,
//! };
//!
//! let source: PreparedSource<serde_json::Value> = PostgresSourceBuilder::new()
//!     .hostname("localhost")
//!     .database("inventory")
//!     .username("postgres")
//!     .password("postgres")
//!     .decoding_plugin_name(DecodingPlugin::Pgoutput)
//!     .schema_list(["public", "sales"])
//!     .deserializer(JsonDeserializer)
//!     .build(&PreparedRuntime)
//!     .unwrap();
//!
//! assert_eq!(source.properties().get("schema.whitelist"), Some("public,sales"));
//! ```

pub mod builder;
pub mod config;
pub mod error;
pub mod plugin;
pub mod properties;
pub mod runtime;

pub use builder::{PostgresSourceBuilder, CONNECTOR_CLASS, DEFAULT_PORT, DEFAULT_SERVER_NAME};
pub use config::{load_config_file, save_config_file, CdcSourceConfig, PostgresSourceConfigDto};
pub use error::{BuildError, SourceBuildError};
pub use plugin::{DecodingPlugin, DEFAULT_DECODING_PLUGIN};
pub use properties::SourceProperties;
pub use runtime::{
    ChangeRecord, DeserializationSchema, JsonDeserializer, PreparedRuntime, PreparedSource,
    SourceRuntime,
};

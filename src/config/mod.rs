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


//! File-based source configuration.
//!
//! A configuration file describes one PostgreSQL source:
//!
//! ```yaml
//! logLevel: info
//! source:
//!   hostname: "${PG_HOST}"
//!   port: 5432
//!   database: inventory
//!   username: "${PG_USER:-postgres}"
//!   password: "${PG_PASSWORD}"
//!   decodingPluginName: pgoutput
//!   schemaList: [public]
//!   tableList: [public.orders, public.customers]
//!   properties:
//!     snapshot.mode: initial
//! ```
//!
//! Environment variables are interpolated before parsing, see
//! [`env_interpolation`].

pub mod env_interpolation;
pub mod loader;
pub mod types;

pub use loader::{from_json_str, from_yaml_str, load_config_file, save_config_file, ConfigError};
pub use types::{CdcSourceConfig, PostgresSourceConfigDto};

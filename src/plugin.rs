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


//! Logical decoding plug-ins understood by the PostgreSQL connector.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A logical decoding plug-in installed on the database server.
///
/// The builder accepts any plug-in name as a plain string; this enum covers
/// the names the connector ships support for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DecodingPlugin {
    #[default]
    Decoderbufs,
    Wal2json,
    Wal2jsonRds,
    Wal2jsonStreaming,
    Wal2jsonRdsStreaming,
    Pgoutput,
}

pub const DEFAULT_DECODING_PLUGIN: &str = "decoderbufs";

const PLUGIN_NAMES: &[&str] = &[
    "decoderbufs",
    "wal2json",
    "wal2json_rds",
    "wal2json_streaming",
    "wal2json_rds_streaming",
    "pgoutput",
];

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown decoding plug-in '{0}'. Known plug-ins are: {known}", known = PLUGIN_NAMES.join(", "))]
pub struct UnknownPluginError(pub String);

impl DecodingPlugin {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Decoderbufs => "decoderbufs",
            Self::Wal2json => "wal2json",
            Self::Wal2jsonRds => "wal2json_rds",
            Self::Wal2jsonStreaming => "wal2json_streaming",
            Self::Wal2jsonRdsStreaming => "wal2json_rds_streaming",
            Self::Pgoutput => "pgoutput",
        }
    }

    /// Returns true if `name` is one of the supported plug-in names.
    pub fn is_known(name: &str) -> bool {
        PLUGIN_NAMES.contains(&name)
    }
}

impl FromStr for DecodingPlugin {
    type Err = UnknownPluginError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "decoderbufs" => Ok(Self::Decoderbufs),
            "wal2json" => Ok(Self::Wal2json),
            "wal2json_rds" => Ok(Self::Wal2jsonRds),
            "wal2json_streaming" => Ok(Self::Wal2jsonStreaming),
            "wal2json_rds_streaming" => Ok(Self::Wal2jsonRdsStreaming),
            "pgoutput" => Ok(Self::Pgoutput),
            other => Err(UnknownPluginError(other.to_string())),
        }
    }
}

impl fmt::Display for DecodingPlugin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<DecodingPlugin> for String {
    fn from(plugin: DecodingPlugin) -> Self {
        plugin.as_str().to_string()
    }
}

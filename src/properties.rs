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


//! Flat property map handed to the change-capture runtime.
//!
//! Keys use the dotted namespaces the connector expects (`database.hostname`,
//! `table.whitelist`, ...). Entries keep insertion order so rendered output is
//! stable and follows the order in which the builder assembled it.

use indexmap::IndexMap;
use serde::Serialize;
use std::fmt;

pub const CONNECTOR_CLASS: &str = "connector.class";
pub const PLUGIN_NAME: &str = "plugin.name";
pub const SERVER_NAME: &str = "database.server.name";
pub const HOSTNAME: &str = "database.hostname";
pub const DBNAME: &str = "database.dbname";
pub const USER: &str = "database.user";
pub const PASSWORD: &str = "database.password";
pub const PORT: &str = "database.port";
pub const SCHEMA_WHITELIST: &str = "schema.whitelist";
pub const TABLE_WHITELIST: &str = "table.whitelist";

/// Keys whose values must never reach logs or default output.
const SECRET_KEYS: &[&str] = &[PASSWORD];

const MASK: &str = "******";

/// Immutable-by-convention string to string map produced by the builder.
#[derive(Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SourceProperties {
    entries: IndexMap<String, String>,
}

impl SourceProperties {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite a key, returning the value it replaced.
    ///
    /// An overwritten key keeps its original position.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.entries.insert(key.into(), value.into())
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn into_inner(self) -> IndexMap<String, String> {
        self.entries
    }

    /// Returns true for keys holding credentials.
    pub fn is_secret(key: &str) -> bool {
        SECRET_KEYS.contains(&key)
    }

    /// Copy of the entries with secret values replaced by a mask.
    pub fn masked(&self) -> IndexMap<String, String> {
        self.entries
            .iter()
            .map(|(k, v)| {
                let value = if Self::is_secret(k) {
                    MASK.to_string()
                } else {
                    v.clone()
                };
                (k.clone(), value)
            })
            .collect()
    }

    /// Render as `key=value` lines in Java properties syntax.
    ///
    /// Backslashes and line breaks are escaped in keys and values; `=`, `:`
    /// and spaces are also escaped in keys. Secret values are masked unless
    /// `show_secrets` is set.
    pub fn to_properties_string(&self, show_secrets: bool) -> String {
        let mut out = String::new();
        for (key, value) in &self.entries {
            let value = if !show_secrets && Self::is_secret(key) {
                MASK
            } else {
                value.as_str()
            };
            escape_into(&mut out, key, true);
            out.push('=');
            escape_into(&mut out, value, false);
            out.push('\n');
        }
        out
    }
}

fn escape_into(out: &mut String, text: &str, is_key: bool) {
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '=' | ':' | ' ' if is_key => {
                out.push('\\');
                out.push(c);
            }
            _ => out.push(c),
        }
    }
}

impl fmt::Debug for SourceProperties {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.masked()).finish()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for SourceProperties {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut props = Self::new();
        for (k, v) in iter {
            props.set(k, v);
        }
        props
    }
}

impl IntoIterator for SourceProperties {
    type Item = (String, String);
    type IntoIter = indexmap::map::IntoIter<String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

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


//! Seam between the builder and the change-capture runtime that runs the source.
//!
//! The runtime owns everything that happens after configuration: replication
//! slot handling, snapshotting, offset tracking. This crate only needs two
//! things from it:
//!
//! - a [`DeserializationSchema`] that turns the runtime's change records into the
//!   caller's output type, supplied by the caller and passed through untouched
//! - a [`SourceRuntime`] entry point that accepts the deserializer together with
//!   the assembled [`SourceProperties`] and returns a source handle
//!
//! [`PreparedRuntime`] is the in-crate runtime. It performs no I/O and simply
//! keeps the pair together as a [`PreparedSource`], which is what the CLI and
//! tests use.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::convert::Infallible;
use std::fmt;

use crate::properties::SourceProperties;

/// A single change event as emitted by the runtime.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChangeRecord {
    pub topic: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<Value>,
    pub value: Value,
    /// Runtime-specific position of this record (LSN, transaction id, ...).
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub source_offset: BTreeMap<String, Value>,
}

impl ChangeRecord {
    pub fn new(topic: impl Into<String>, value: Value) -> Self {
        Self {
            topic: topic.into(),
            key: None,
            value,
            source_offset: BTreeMap::new(),
        }
    }

    pub fn with_key(mut self, key: Value) -> Self {
        self.key = Some(key);
        self
    }

    pub fn with_offset(mut self, name: impl Into<String>, position: Value) -> Self {
        self.source_offset.insert(name.into(), position);
        self
    }
}

/// Converts runtime change records into the caller's output type.
pub trait DeserializationSchema<T>: Send + Sync {
    fn deserialize(&self, record: &ChangeRecord) -> Result<T>;
}

impl<T, F> DeserializationSchema<T> for F
where
    F: Fn(&ChangeRecord) -> Result<T> + Send + Sync,
{
    fn deserialize(&self, record: &ChangeRecord) -> Result<T> {
        self(record)
    }
}

/// Emits each record's value unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonDeserializer;

impl DeserializationSchema<Value> for JsonDeserializer {
    fn deserialize(&self, record: &ChangeRecord) -> Result<Value> {
        Ok(record.value.clone())
    }
}

/// Source construction entry point of a change-capture runtime.
pub trait SourceRuntime<T> {
    type Source;
    type Error;

    fn create_source(
        &self,
        deserializer: Box<dyn DeserializationSchema<T>>,
        properties: SourceProperties,
    ) -> std::result::Result<Self::Source, Self::Error>;
}

/// Runtime that hands back the deserializer and properties without starting anything.
#[derive(Debug, Clone, Copy, Default)]
pub struct PreparedRuntime;

impl<T> SourceRuntime<T> for PreparedRuntime {
    type Source = PreparedSource<T>;
    type Error = Infallible;

    fn create_source(
        &self,
        deserializer: Box<dyn DeserializationSchema<T>>,
        properties: SourceProperties,
    ) -> std::result::Result<Self::Source, Self::Error> {
        Ok(PreparedSource {
            deserializer,
            properties,
        })
    }
}

/// A fully configured source that has not been handed to a running engine.
pub struct PreparedSource<T> {
    deserializer: Box<dyn DeserializationSchema<T>>,
    properties: SourceProperties,
}

impl<T> PreparedSource<T> {
    pub fn properties(&self) -> &SourceProperties {
        &self.properties
    }

    /// Run a record through the configured deserializer.
    pub fn deserialize(&self, record: &ChangeRecord) -> Result<T> {
        self.deserializer.deserialize(record)
    }

    pub fn into_parts(self) -> (Box<dyn DeserializationSchema<T>>, SourceProperties) {
        (self.deserializer, self.properties)
    }
}

impl<T> fmt::Debug for PreparedSource<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PreparedSource")
            .field("properties", &self.properties)
            .finish_non_exhaustive()
    }
}

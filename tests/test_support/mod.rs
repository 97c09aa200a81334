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


//! Shared helpers for integration tests.

#![allow(dead_code)]

use pg_cdc_source::{DeserializationSchema, PostgresSourceBuilder, SourceProperties, SourceRuntime};
use serde_json::Value;
use std::cell::RefCell;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Builder with every required setting filled in.
pub fn complete_builder() -> PostgresSourceBuilder<Value> {
    PostgresSourceBuilder::new()
        .hostname("localhost")
        .database("inventory")
        .username("postgres")
        .password("postgres")
        .deserializer(pg_cdc_source::JsonDeserializer)
}

/// Runtime that records every property map it is given.
#[derive(Default)]
pub struct RecordingRuntime {
    pub calls: RefCell<Vec<SourceProperties>>,
}

impl RecordingRuntime {
    pub fn call_count(&self) -> usize {
        self.calls.borrow().len()
    }
}

impl<T> SourceRuntime<T> for RecordingRuntime {
    type Source = SourceProperties;
    type Error = std::convert::Infallible;

    fn create_source(
        &self,
        _deserializer: Box<dyn DeserializationSchema<T>>,
        properties: SourceProperties,
    ) -> Result<Self::Source, Self::Error> {
        self.calls.borrow_mut().push(properties.clone());
        Ok(properties)
    }
}

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
#[error("replication slot '{0}' is already active")]
pub struct SlotInUse(pub String);

/// Runtime that refuses to create any source.
pub struct FailingRuntime;

impl<T> SourceRuntime<T> for FailingRuntime {
    type Source = ();
    type Error = SlotInUse;

    fn create_source(
        &self,
        _deserializer: Box<dyn DeserializationSchema<T>>,
        properties: SourceProperties,
    ) -> Result<Self::Source, Self::Error> {
        let slot = properties.get("slot.name").unwrap_or("debezium").to_string();
        Err(SlotInUse(slot))
    }
}

/// Write `contents` to a file inside a fresh temp dir.
pub fn write_config(name: &str, contents: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join(name);
    fs::write(&path, contents).expect("Failed to write config file");
    (temp_dir, path)
}

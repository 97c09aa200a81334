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


//! Error types returned when assembling a source.

/// Names of the settings `build` refuses to run without.
pub mod fields {
    pub const HOSTNAME: &str = "hostname";
    pub const DATABASE: &str = "database";
    pub const USERNAME: &str = "username";
    pub const PASSWORD: &str = "password";
    pub const DESERIALIZER: &str = "deserializer";
}

/// Configuration failure detected by the builder before any runtime object exists.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BuildError {
    #[error("Missing required field '{field}'")]
    MissingRequiredField { field: &'static str },
}

impl BuildError {
    pub fn missing(field: &'static str) -> Self {
        Self::MissingRequiredField { field }
    }

    /// Name of the offending field.
    pub fn field(&self) -> &'static str {
        match self {
            Self::MissingRequiredField { field } => field,
        }
    }
}

/// Failure from [`PostgresSourceBuilder::build`](crate::PostgresSourceBuilder::build).
///
/// Configuration problems and runtime construction problems are kept apart so
/// callers can react to them differently. The runtime's error is carried as is.
#[derive(Debug, thiserror::Error)]
pub enum SourceBuildError<E> {
    #[error("Invalid source configuration: {0}")]
    Config(#[from] BuildError),

    #[error("Source runtime failed to create the source: {0}")]
    Runtime(#[source] E),
}

impl<E> SourceBuildError<E> {
    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }

    /// Returns the runtime's own error, if that is what failed.
    pub fn into_runtime(self) -> Option<E> {
        match self {
            Self::Runtime(e) => Some(e),
            Self::Config(_) => None,
        }
    }
}

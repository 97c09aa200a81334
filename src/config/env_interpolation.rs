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


//! `${VAR}` / `${VAR:-default}` substitution for source configuration files.
//!
//! Credentials are usually kept out of the file and supplied through the
//! environment:
//!
//! ```
//! use pg_cdc_source::config::env_interpolation::interpolate;
//! use std::env;
//!
//! env::set_var("DOC_PG_PASSWORD", "s3cret");
//!
//! let input = "password: ${DOC_PG_PASSWORD}\nport: ${DOC_PG_PORT:-5432}";
//! let result = interpolate(input).unwrap();
//! assert_eq!(result, "password: s3cret\nport: 5432");
//! ```

use lazy_static::lazy_static;
use log::debug;
use regex::Regex;
use std::env;

/// Upper bound on the size of an interpolated document.
const MAX_INTERPOLATED_LENGTH: usize = 1_000_000;

lazy_static! {
    /// Group 1 is the variable name, group 3 the default (when `:-` is present).
    static ref ENV_VAR_PATTERN: Regex =
        Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)(:-([^}]*))?\}").expect("Invalid regex pattern");
}

#[derive(Debug, thiserror::Error)]
pub enum InterpolationError {
    #[error("Environment variable '{name}' is not set and has no default value")]
    MissingVariable { name: String },

    #[error("Environment variable '{name}' is not valid unicode")]
    NotUnicode { name: String },

    #[error("Interpolated result exceeds maximum allowed length of {MAX_INTERPOLATED_LENGTH} bytes")]
    ResultTooLarge,
}

/// Replace every environment variable reference in `input`.
///
/// An unset or empty variable falls back to its default; without one the
/// call fails with [`InterpolationError::MissingVariable`]. Substituted values
/// are not scanned again.
pub fn interpolate(input: &str) -> Result<String, InterpolationError> {
    let mut result = String::with_capacity(input.len());
    let mut last_end = 0;
    let mut names = Vec::new();

    for caps in ENV_VAR_PATTERN.captures_iter(input) {
        let (Some(whole), Some(name)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        let name = name.as_str();
        let default = caps.get(3).map(|m| m.as_str());

        result.push_str(&input[last_end..whole.start()]);

        let value = match env::var(name) {
            Ok(val) if !val.is_empty() => val,
            Ok(_) | Err(env::VarError::NotPresent) => match default {
                Some(default) => default.to_string(),
                None => {
                    return Err(InterpolationError::MissingVariable {
                        name: name.to_string(),
                    })
                }
            },
            Err(env::VarError::NotUnicode(_)) => {
                return Err(InterpolationError::NotUnicode {
                    name: name.to_string(),
                })
            }
        };

        result.push_str(&value);
        last_end = whole.end();
        names.push(name);

        if result.len() > MAX_INTERPOLATED_LENGTH {
            return Err(InterpolationError::ResultTooLarge);
        }
    }

    result.push_str(&input[last_end..]);
    if result.len() > MAX_INTERPOLATED_LENGTH {
        return Err(InterpolationError::ResultTooLarge);
    }

    // names only, values may be credentials
    if !names.is_empty() {
        debug!("Interpolated environment variables: {}", names.join(", "));
    }

    Ok(result)
}

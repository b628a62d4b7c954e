// cz-schema - Validation harness for the Commitizen configuration schema.
// Copyright (C) 2026 Jean-Philippe Cugnet <jean-philippe@cugnet.eu>
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, version 3 of the License.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>.

//! The Commitizen configuration schema document.

pub mod validator;

pub use validator::{
    Draft7Validator, PathSegment, Validate, ValidationFailure, check_schema,
};

use std::{
    fmt, fs, io,
    path::{Path, PathBuf},
};

use serde_json::{Value, json};
use thiserror::Error;

use crate::tracing::LogResult as _;

/// The URI of the JSON Schema Draft 7 meta-schema.
pub const DRAFT_7_URI: &str = "http://json-schema.org/draft-07/schema#";

/// The schema document bundled with the binary.
pub const EMBEDDED_SCHEMA: &str = include_str!("../schemas/cz-schema.json");

/// The example configuration bundled with the binary.
pub const EMBEDDED_EXAMPLE: &str = include_str!("../schemas/cz.example.json");

/// The file name of the bundled example configuration.
pub const EXAMPLE_FILE_NAME: &str = "cz.example.json";

/// JSON pointer to the settings declared under the `commitizen` key.
const COMMITIZEN_PROPERTIES: &str = "/properties/commitizen/properties";

/// A JSON Schema document describing Commitizen configuration files.
#[derive(Debug, Clone)]
pub struct SchemaDocument {
    /// The parsed schema.
    value: Value,
    /// Where the schema has been loaded from.
    origin: Origin,
}

/// Where a schema document has been loaded from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Origin {
    /// The schema bundled with the binary.
    Embedded,
    /// A schema file.
    File(PathBuf),
    /// A schema built in memory.
    Inline,
}

/// Errors that can occur when loading a schema document.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The schema file cannot be read.
    #[error("Failed to read the schema from {}", .path.display())]
    Read {
        /// The path of the schema file.
        path: PathBuf,
        /// The OS error.
        #[source]
        source: io::Error,
    },
    /// The schema is not valid JSON.
    #[error("The schema is not a valid JSON document")]
    Parse(#[from] serde_json::Error),
}

/// The schema document is not a usable Draft 7 schema.
///
/// This error is fatal: nothing can be validated against a malformed schema.
#[derive(Debug, Error)]
pub enum SchemaMalformedError {
    /// The schema violates the Draft 7 meta-schema.
    #[error(
        "The schema does not conform to the Draft 7 meta-schema ({} violation(s))",
        .violations.len()
    )]
    MetaSchema {
        /// Every violation of the meta-schema.
        violations: Vec<ValidationFailure>,
    },
    /// The meta-schema itself cannot be loaded.
    #[error("Failed to load the Draft 7 meta-schema: {0}")]
    MetaSchemaUnavailable(String),
    /// The schema conforms to the meta-schema but cannot be compiled.
    #[error("Failed to compile the schema: {0}")]
    Compile(String),
}

/// Problems with the top-level fields of a schema document.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HeaderError {
    /// `$schema` does not declare Draft 7.
    #[error("`$schema` is {found:?} instead of {uri:?}", uri = DRAFT_7_URI)]
    WrongDialect {
        /// The declared dialect, if any.
        found: Option<String>,
    },
    /// A required top-level field is missing.
    #[error("The schema has no `{field}`")]
    MissingField {
        /// The name of the missing field.
        field: &'static str,
    },
    /// The schema does not describe the `commitizen` key.
    #[error("The schema does not declare `properties.commitizen`")]
    MissingCommitizen,
}

impl SchemaDocument {
    /// Returns the schema bundled with the binary.
    pub fn embedded() -> Result<Self, LoadError> {
        let value = serde_json::from_str(EMBEDDED_SCHEMA).log_err()?;
        Ok(Self {
            value,
            origin: Origin::Embedded,
        })
    }

    /// Loads a schema from a file.
    #[tracing::instrument(level = "trace")]
    pub fn from_path(path: &Path) -> Result<Self, LoadError> {
        tracing::debug!(?path, "loading the schema");

        let json = fs::read_to_string(path)
            .map_err(|source| LoadError::Read {
                path: path.to_owned(),
                source,
            })
            .log_err()?;

        let value = serde_json::from_str(&json).log_err()?;

        Ok(Self {
            value,
            origin: Origin::File(path.to_owned()),
        })
    }

    /// Parses a schema from its JSON text.
    pub fn from_json(json: &str) -> Result<Self, LoadError> {
        let value = serde_json::from_str(json).log_err()?;
        Ok(Self::from_value(value))
    }

    /// Builds a schema from an in-memory JSON value.
    pub fn from_value(value: Value) -> Self {
        Self {
            value,
            origin: Origin::Inline,
        }
    }

    /// Returns the schema as a JSON value.
    pub fn as_value(&self) -> &Value {
        &self.value
    }

    /// Returns where the schema has been loaded from.
    pub fn origin(&self) -> &Origin {
        &self.origin
    }

    /// Checks the schema against the Draft 7 meta-schema.
    ///
    /// All violations are collected, not only the first one.
    #[tracing::instrument(level = "trace", skip(self))]
    pub fn check_meta(&self) -> Result<(), SchemaMalformedError> {
        let meta = jsonschema::draft7::new(&json!({ "$ref": DRAFT_7_URI }))
            .map_err(|error| {
                SchemaMalformedError::MetaSchemaUnavailable(error.to_string())
            })
            .log_err()?;

        let violations: Vec<_> = meta
            .iter_errors(&self.value)
            .map(|error| ValidationFailure::from_error(&error, &self.value))
            .collect();

        if violations.is_empty() {
            tracing::debug!(origin = %self.origin, "the schema is Draft 7 compliant");
            Ok(())
        } else {
            Err(SchemaMalformedError::MetaSchema { violations }).log_err()
        }
    }

    /// Checks the top-level fields of the schema.
    pub fn check_header(&self) -> Result<(), HeaderError> {
        let dialect = self.value.get("$schema").and_then(Value::as_str);
        if dialect != Some(DRAFT_7_URI) {
            return Err(HeaderError::WrongDialect {
                found: dialect.map(ToOwned::to_owned),
            });
        }

        for field in ["title", "description", "properties"] {
            if self.value.get(field).is_none() {
                return Err(HeaderError::MissingField { field });
            }
        }

        if self.value.pointer("/properties/commitizen").is_none() {
            return Err(HeaderError::MissingCommitizen);
        }

        Ok(())
    }

    /// Returns the settings declared under `commitizen`, in document order.
    pub fn commitizen_properties(&self) -> Vec<&str> {
        self.value
            .pointer(COMMITIZEN_PROPERTIES)
            .and_then(Value::as_object)
            .map(|properties| properties.keys().map(String::as_str).collect())
            .unwrap_or_default()
    }

    /// Returns the string members of the `enum` declared at `pointer`.
    ///
    /// `null` members are skipped. Returns [`None`] if there is no `enum` at
    /// this location.
    pub fn enum_values(&self, pointer: &str) -> Option<Vec<&str>> {
        let members = self.value.pointer(pointer)?.get("enum")?.as_array()?;
        Some(members.iter().filter_map(Value::as_str).collect())
    }

    /// Returns the string members of the `enum` of a `commitizen` setting.
    pub fn setting_enum_values(&self, setting: &str) -> Option<Vec<&str>> {
        self.enum_values(&format!("{COMMITIZEN_PROPERTIES}/{setting}"))
    }

    /// Returns whether the `enum` of a `commitizen` setting accepts `null`.
    pub fn setting_accepts_null(&self, setting: &str) -> bool {
        self.value
            .pointer(&format!("{COMMITIZEN_PROPERTIES}/{setting}/enum"))
            .and_then(Value::as_array)
            .is_some_and(|members| members.iter().any(Value::is_null))
    }
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Embedded => f.write_str("embedded schema"),
            Self::File(path) => write!(f, "{}", path.display()),
            Self::Inline => f.write_str("inline schema"),
        }
    }
}

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

//! Validation of configuration documents against a schema.

use std::fmt;

use itertools::Itertools as _;
use serde_json::Value;
use thiserror::Error;

use super::{SchemaDocument, SchemaMalformedError};
use crate::tracing::LogResult as _;

/// A validator of configuration documents.
pub trait Validate {
    /// Validates an instance, reporting the first violated constraint.
    fn validate(&self, instance: &Value) -> Result<(), ValidationFailure>;
}

/// A step in the path to a location inside a JSON document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSegment {
    /// A key in an object.
    Property(String),
    /// An index in an array.
    Index(usize),
}

/// A constraint violated by an instance.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ValidationFailure {
    /// The human-readable description of the violation.
    pub message: String,
    /// The location of the violation in the instance.
    pub path: Vec<PathSegment>,
}

/// A validator backed by the Draft 7 engine of the `jsonschema` crate.
pub struct Draft7Validator {
    /// The compiled schema.
    inner: jsonschema::Validator,
}

/// Checks a schema is usable for validation.
///
/// The schema must conform to the Draft 7 meta-schema and compile.
pub fn check_schema(schema: &SchemaDocument) -> Result<(), SchemaMalformedError> {
    Draft7Validator::new(schema).map(drop)
}

impl Draft7Validator {
    /// Compiles a schema document.
    ///
    /// The schema is checked against the Draft 7 meta-schema first.
    #[tracing::instrument(
        name = "compile_schema",
        level = "trace",
        skip_all,
        fields(origin = %schema.origin())
    )]
    pub fn new(schema: &SchemaDocument) -> Result<Self, SchemaMalformedError> {
        schema.check_meta()?;

        let inner = jsonschema::draft7::new(schema.as_value())
            .map_err(|error| SchemaMalformedError::Compile(error.to_string()))
            .log_err()?;

        tracing::debug!("the schema has been compiled");
        Ok(Self { inner })
    }

    /// Validates an instance, reporting every violated constraint.
    pub fn validate_all(&self, instance: &Value) -> Vec<ValidationFailure> {
        self.inner
            .iter_errors(instance)
            .map(|error| ValidationFailure::from_error(&error, instance))
            .collect()
    }

    /// Returns whether the instance is valid.
    pub fn is_valid(&self, instance: &Value) -> bool {
        self.inner.is_valid(instance)
    }
}

impl Validate for Draft7Validator {
    fn validate(&self, instance: &Value) -> Result<(), ValidationFailure> {
        match self.inner.iter_errors(instance).next() {
            None => Ok(()),
            Some(error) => Err(ValidationFailure::from_error(&error, instance)),
        }
    }
}

impl fmt::Debug for Draft7Validator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Draft7Validator").finish_non_exhaustive()
    }
}

impl ValidationFailure {
    /// Builds a failure from an error of the `jsonschema` crate.
    pub(crate) fn from_error(
        error: &jsonschema::ValidationError<'_>,
        instance: &Value,
    ) -> Self {
        Self {
            message: error.to_string(),
            path: path_segments(&error.instance_path.to_string(), instance),
        }
    }

    /// Returns the path as `key -> key -> index`, or `(root)` when empty.
    pub fn path_display(&self) -> String {
        if self.path.is_empty() {
            String::from("(root)")
        } else {
            self.path.iter().join(" -> ")
        }
    }
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Property(name) => f.write_str(name),
            Self::Index(index) => write!(f, "{index}"),
        }
    }
}

/// Splits a JSON pointer into path segments.
///
/// Numeric tokens are indices only when they point into an array, so that
/// numeric keys of objects stay properties.
fn path_segments(pointer: &str, instance: &Value) -> Vec<PathSegment> {
    let mut node = Some(instance);

    pointer
        .split('/')
        .skip(1)
        .map(|token| {
            let token = token.replace("~1", "/").replace("~0", "~");

            match (node, token.parse::<usize>()) {
                (Some(Value::Array(items)), Ok(index)) => {
                    node = items.get(index);
                    PathSegment::Index(index)
                }
                (current, _) => {
                    node = current.and_then(|value| value.get(&token));
                    PathSegment::Property(token)
                }
            }
        })
        .collect()
}

#[cfg(test)]
mod test {
    #![allow(clippy::pedantic, clippy::restriction)]

    use serde_json::json;

    use super::*;

    fn validator() -> Draft7Validator {
        let schema = SchemaDocument::from_value(json!({
            "$schema": "http://json-schema.org/draft-07/schema#",
            "type": "object",
            "properties": {
                "list": {
                    "type": "array",
                    "items": { "type": "integer" }
                },
                "map": {
                    "type": "object",
                    "additionalProperties": { "type": "boolean" }
                }
            }
        }));

        Draft7Validator::new(&schema).unwrap()
    }

    #[test]
    fn check_schema_accepts_the_embedded_schema() {
        let schema = SchemaDocument::embedded().unwrap();
        assert!(check_schema(&schema).is_ok());
    }

    #[test]
    fn check_schema_rejects_malformed_schemas() {
        let schema = SchemaDocument::from_value(json!({ "required": "name" }));

        assert!(matches!(
            check_schema(&schema),
            Err(SchemaMalformedError::MetaSchema { .. })
        ));
    }

    #[test]
    fn valid_instance_passes() {
        let validator = validator();
        let instance = json!({ "list": [1, 2], "map": { "a": true } });

        assert_eq!(validator.validate(&instance), Ok(()));
        assert!(validator.is_valid(&instance));
    }

    #[test]
    fn failure_path_uses_indices_in_arrays() {
        let validator = validator();
        let instance = json!({ "list": [1, "two"] });

        let failure = validator.validate(&instance).unwrap_err();

        assert_eq!(
            failure.path,
            vec![
                PathSegment::Property(String::from("list")),
                PathSegment::Index(1)
            ]
        );
        assert_eq!(failure.path_display(), "list -> 1");
    }

    #[test]
    fn numeric_keys_of_objects_stay_properties() {
        let validator = validator();
        let instance = json!({ "map": { "0": "yes" } });

        let failure = validator.validate(&instance).unwrap_err();

        assert_eq!(
            failure.path,
            vec![
                PathSegment::Property(String::from("map")),
                PathSegment::Property(String::from("0"))
            ]
        );
    }

    #[test]
    fn escaped_tokens_are_decoded() {
        let instance = json!({ "a/b": { "c~d": 1 } });

        assert_eq!(
            path_segments("/a~1b/c~0d", &instance),
            vec![
                PathSegment::Property(String::from("a/b")),
                PathSegment::Property(String::from("c~d"))
            ]
        );
    }

    #[test]
    fn root_failures_have_an_empty_path() {
        let validator = validator();
        let failure = validator.validate(&json!("not an object")).unwrap_err();

        assert!(failure.path.is_empty());
        assert_eq!(failure.path_display(), "(root)");
    }

    #[test]
    fn validate_all_reports_every_violation() {
        let validator = validator();
        let instance = json!({ "list": ["one", "two"], "map": { "a": 1 } });

        assert_eq!(validator.validate_all(&instance).len(), 3);
    }
}

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

//! Commitizen configuration files.

pub mod lint;

mod settings;

pub use settings::{
    BumpLevel, ChangelogFormat, Choice, Config, Customize, Nullable, Question,
    QuestionType, Settings, VersionProvider, VersionScheme,
};

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use serde_json::{Map, Value};
use thiserror::Error;

use crate::{schema::EMBEDDED_EXAMPLE, tracing::LogResult as _};

/// The configuration files looked up by Commitizen, in order of precedence.
pub const CONFIG_FILE_NAMES: [&str; 5] =
    ["pyproject.toml", ".cz.toml", ".cz.json", "cz.json", "cz.toml"];

/// The top-level key holding the settings.
pub const ROOT_KEY: &str = "commitizen";

/// The format of a configuration file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// A JSON document with a top-level `commitizen` key.
    Json,
    /// A TOML document with a `[tool.commitizen]` table.
    Toml,
}

/// Errors that can occur when loading a configuration file.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The configuration file cannot be read.
    #[error("Failed to read {}", .path.display())]
    Read {
        /// The path of the configuration file.
        path: PathBuf,
        /// The OS error.
        #[source]
        source: io::Error,
    },
    /// The format cannot be deduced from the file name.
    #[error("Unsupported configuration file {}: expected .json or .toml", .path.display())]
    UnsupportedFormat {
        /// The path of the configuration file.
        path: PathBuf,
    },
    /// The file is not valid JSON.
    #[error("{} is not a valid JSON document", .path.display())]
    Json {
        /// The path of the configuration file.
        path: PathBuf,
        /// The parsing error.
        #[source]
        source: serde_json::Error,
    },
    /// The file is not valid TOML.
    #[error("{} is not a valid TOML document", .path.display())]
    Toml {
        /// The path of the configuration file.
        path: PathBuf,
        /// The parsing error.
        #[source]
        source: FromTomlError,
    },
    /// The TOML file has no `[tool.commitizen]` table.
    #[error("{} has no [tool.commitizen] table", .path.display())]
    NoToolSection {
        /// The path of the configuration file.
        path: PathBuf,
    },
}

/// Errors that can occur when converting a TOML document.
#[derive(Debug, Error)]
pub enum FromTomlError {
    /// The document cannot be parsed.
    #[error("Failed to parse the TOML document")]
    Parse(#[from] toml::de::Error),
    /// The document cannot be represented as JSON.
    #[error("Failed to convert the TOML document to JSON")]
    Convert(#[from] serde_json::Error),
}

/// Errors that can occur when looking for a configuration file.
#[derive(Debug, Error)]
pub enum DiscoverError {
    /// No configuration file has been found.
    #[error("No Commitizen configuration found in {}", .dir.display())]
    NotFound {
        /// The directory searched.
        dir: PathBuf,
    },
    /// A configuration file has been found but cannot be loaded.
    #[error(transparent)]
    Load(#[from] LoadError),
}

impl Format {
    /// Deduces the format of a configuration file from its name.
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()? {
            "json" => Some(Self::Json),
            "toml" => Some(Self::Toml),
            _ => None,
        }
    }
}

/// Returns the example configuration bundled with the binary.
pub fn embedded_example() -> Result<Value, LoadError> {
    from_json(EMBEDDED_EXAMPLE).map_err(|source| LoadError::Json {
        path: PathBuf::from(crate::schema::EXAMPLE_FILE_NAME),
        source,
    })
}

/// Loads a configuration file as a schema instance.
///
/// TOML files are turned into `{"commitizen": <[tool.commitizen]>}`, so that
/// every format is validated the same way.
#[tracing::instrument(level = "trace")]
pub fn load_file(path: &Path) -> Result<Value, LoadError> {
    load_candidate(path)?
        .ok_or_else(|| LoadError::NoToolSection {
            path: path.to_owned(),
        })
        .log_err()
}

/// Looks for a configuration file in `dir`.
///
/// TOML files without a `[tool.commitizen]` table are skipped, like Commitizen
/// does. JSON files are always used, even when they lack the `commitizen` key,
/// so that the schema can report it.
#[tracing::instrument(level = "trace")]
pub fn discover(dir: &Path) -> Result<(PathBuf, Value), DiscoverError> {
    for name in CONFIG_FILE_NAMES {
        let path = dir.join(name);
        if !path.is_file() {
            continue;
        }

        match load_candidate(&path)? {
            Some(instance) => {
                tracing::debug!(?path, "configuration found");
                return Ok((path, instance));
            }
            None => tracing::debug!(?path, "no [tool.commitizen], skipping"),
        }
    }

    Err(DiscoverError::NotFound {
        dir: dir.to_owned(),
    })
}

/// Parses a JSON configuration.
pub fn from_json(json: &str) -> Result<Value, serde_json::Error> {
    serde_json::from_str(json)
}

/// Parses a TOML configuration into a schema instance.
///
/// Returns [`None`] if there is no `[tool.commitizen]` table.
pub fn from_toml(toml: &str) -> Result<Option<Value>, FromTomlError> {
    let mut document: toml::Table = toml::from_str(toml)?;

    let Some(toml::Value::Table(mut tool)) = document.remove("tool") else {
        return Ok(None);
    };

    let Some(settings) = tool.remove(ROOT_KEY) else {
        return Ok(None);
    };

    let mut instance = Map::new();
    instance.insert(String::from(ROOT_KEY), serde_json::to_value(settings)?);
    Ok(Some(Value::Object(instance)))
}

/// Loads a configuration file, returning [`None`] for TOML files without
/// settings.
fn load_candidate(path: &Path) -> Result<Option<Value>, LoadError> {
    let format =
        Format::from_path(path).ok_or_else(|| LoadError::UnsupportedFormat {
            path: path.to_owned(),
        })?;

    let content = fs::read_to_string(path)
        .map_err(|source| LoadError::Read {
            path: path.to_owned(),
            source,
        })
        .log_err()?;

    let instance = match format {
        Format::Json => from_json(&content)
            .map(Some)
            .map_err(|source| LoadError::Json {
                path: path.to_owned(),
                source,
            }),
        Format::Toml => from_toml(&content).map_err(|source| LoadError::Toml {
            path: path.to_owned(),
            source,
        }),
    };

    instance.log_err()
}

#[cfg(test)]
mod test {
    #![allow(clippy::pedantic, clippy::restriction)]

    use indoc::indoc;
    use serde_json::json;

    use super::*;

    #[test]
    fn toml_settings_are_wrapped_under_the_root_key() {
        let toml = indoc! {r#"
            [tool.commitizen]
            name = "cz_conventional_commits"
            version = "1.0.0"
            annotated_tag = true
            style = [["qmark", "fg:#ff9d00 bold"]]

            [tool.commitizen.customize]
            bump_map = { fix = "PATCH" }
        "#};

        assert_eq!(
            from_toml(toml).unwrap(),
            Some(json!({
                "commitizen": {
                    "name": "cz_conventional_commits",
                    "version": "1.0.0",
                    "annotated_tag": true,
                    "style": [["qmark", "fg:#ff9d00 bold"]],
                    "customize": { "bump_map": { "fix": "PATCH" } }
                }
            }))
        );
    }

    #[test]
    fn toml_without_tool_section_has_no_settings() {
        let toml = indoc! {r#"
            [project]
            name = "something"

            [tool.black]
            line-length = 79
        "#};

        assert_eq!(from_toml(toml).unwrap(), None);
    }

    #[test]
    fn invalid_toml_is_an_error() {
        assert!(matches!(
            from_toml("[tool.commitizen"),
            Err(FromTomlError::Parse(_))
        ));
    }

    #[test]
    fn format_is_deduced_from_the_extension() {
        assert_eq!(
            Format::from_path(Path::new("pyproject.toml")),
            Some(Format::Toml)
        );
        assert_eq!(Format::from_path(Path::new(".cz.json")), Some(Format::Json));
        assert_eq!(Format::from_path(Path::new(".cz.yaml")), None);
    }

    #[test]
    fn embedded_example_is_a_commitizen_document() {
        let example = embedded_example().unwrap();
        assert!(example.get(ROOT_KEY).is_some());
    }
}

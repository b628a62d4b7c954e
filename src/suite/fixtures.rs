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

//! Fixtures of the validation suite.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use serde_json::{Value, json};
use thiserror::Error;

use super::{Category, Expectation};
use crate::{
    config::{self, QuestionType, VersionProvider, VersionScheme},
    tracing::LogResult as _,
};

/// Versions the `version` setting must accept.
pub const ACCEPTED_VERSIONS: &[&str] = &[
    "0.1.0",
    "1.0.0",
    "2.3.4",
    "1.0.0-alpha",
    "1.0.0-alpha.1",
    "1.0.0-rc.2",
    "1.0.0+build.123",
    "2.3.4-alpha.1+build.456",
];

/// Versions the `version` setting must reject.
pub const REJECTED_VERSIONS: &[&str] = &["not-a-version", "1", "1.0", "v1.0.0"];

/// The settings that only accept `true` or `false`.
pub const BOOLEAN_SETTINGS: [&str; 11] = [
    "annotated_tag",
    "gpg_sign",
    "changelog_incremental",
    "changelog_merge_prerelease",
    "update_changelog_on_bump",
    "major_version_zero",
    "allow_abort",
    "always_signoff",
    "breaking_change_exclamation_in_title",
    "retry_after_failure",
    "use_shortcuts",
];

/// The name of the directory holding fixtures expected to be valid.
pub const VALID_DIR: &str = "valid";

/// The name of the directory holding fixtures expected to be invalid.
pub const INVALID_DIR: &str = "invalid";

/// A configuration with a known expected outcome.
#[derive(Debug, Clone, PartialEq)]
pub struct Fixture {
    /// The category of the case.
    pub category: Category,
    /// The name of the case.
    pub id: String,
    /// The expected outcome.
    pub expectation: Expectation,
    /// The configuration.
    pub instance: Value,
}

/// Errors that can occur when loading fixtures from a directory.
#[derive(Debug, Error)]
pub enum FixtureLoadError {
    /// The directory cannot be listed.
    #[error("Failed to list the fixtures in {}", .path.display())]
    ReadDir {
        /// The path of the directory.
        path: PathBuf,
        /// The OS error.
        #[source]
        source: io::Error,
    },
    /// A fixture cannot be loaded.
    #[error(transparent)]
    Load(#[from] config::LoadError),
    /// The directory contains no fixture at all.
    #[error(
        "No fixture found in {}: expected {VALID_DIR}/ or {INVALID_DIR}/",
        .path.display()
    )]
    Empty {
        /// The path of the directory.
        path: PathBuf,
    },
}

impl Fixture {
    /// Builds a fixture expected to be valid.
    pub fn accept(
        category: Category,
        id: impl Into<String>,
        instance: Value,
    ) -> Self {
        Self {
            category,
            id: id.into(),
            expectation: Expectation::Accept,
            instance,
        }
    }

    /// Builds a fixture expected to be invalid.
    pub fn reject(
        category: Category,
        id: impl Into<String>,
        instance: Value,
    ) -> Self {
        Self {
            category,
            id: id.into(),
            expectation: Expectation::Reject,
            instance,
        }
    }
}

/// Returns the built-in fixtures.
pub fn builtin() -> Vec<Fixture> {
    let mut fixtures = valid_configs();
    fixtures.extend(invalid_configs());
    fixtures.extend(version_formats());
    fixtures.extend(customize());
    fixtures
}

/// Loads the fixtures of `dir/valid` and `dir/invalid`.
///
/// JSON and TOML files are loaded in file name order. A missing
/// subdirectory is skipped, but at least one fixture must be found.
#[tracing::instrument(level = "trace")]
pub fn load_dir(dir: &Path) -> Result<Vec<Fixture>, FixtureLoadError> {
    let mut fixtures = Vec::new();

    for (subdir, category, expectation) in [
        (VALID_DIR, Category::ValidConfigs, Expectation::Accept),
        (INVALID_DIR, Category::InvalidConfigs, Expectation::Reject),
    ] {
        let path = dir.join(subdir);
        if !path.is_dir() {
            tracing::debug!(?path, "no fixture directory");
            continue;
        }

        for file in fixture_files(&path)? {
            let name = file
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default();

            fixtures.push(Fixture {
                category,
                id: format!("{subdir}/{name}"),
                expectation,
                instance: config::load_file(&file)?,
            });
        }
    }

    if fixtures.is_empty() {
        Err(FixtureLoadError::Empty {
            path: dir.to_owned(),
        })
        .log_err()
    } else {
        tracing::debug!(count = fixtures.len(), "fixtures loaded");
        Ok(fixtures)
    }
}

/// Lists the configuration files of a directory, sorted by name.
fn fixture_files(dir: &Path) -> Result<Vec<PathBuf>, FixtureLoadError> {
    let read_dir_error = |source| FixtureLoadError::ReadDir {
        path: dir.to_owned(),
        source,
    };

    let mut files = fs::read_dir(dir)
        .map_err(read_dir_error)
        .log_err()?
        .map(|entry| entry.map(|entry| entry.path()))
        .collect::<Result<Vec<_>, _>>()
        .map_err(read_dir_error)
        .log_err()?;

    files.retain(|path| {
        path.is_file() && config::Format::from_path(path).is_some()
    });
    files.sort();

    Ok(files)
}

/// Wraps settings under the `commitizen` key.
fn settings(settings: Value) -> Value {
    json!({ "commitizen": settings })
}

fn valid_configs() -> Vec<Fixture> {
    let category = Category::ValidConfigs;
    let mut fixtures = vec![
        Fixture::accept(
            category,
            "minimal",
            settings(json!({ "name": "cz_conventional_commits" })),
        ),
        Fixture::accept(
            category,
            "with_version",
            settings(json!({
                "name": "cz_conventional_commits",
                "version": "0.1.0",
                "tag_format": "v$version",
            })),
        ),
    ];

    fixtures.extend(VersionProvider::ALL.iter().map(|provider| {
        Fixture::accept(
            category,
            format!("version_provider_{provider}"),
            settings(json!({ "version_provider": provider.as_str() })),
        )
    }));

    fixtures.extend(VersionScheme::ALL.iter().map(|scheme| {
        Fixture::accept(
            category,
            format!("version_scheme_{scheme}"),
            settings(json!({ "version_scheme": scheme.as_str() })),
        )
    }));

    fixtures.extend([
        Fixture::accept(
            category,
            "version_scheme_null",
            settings(json!({ "version_scheme": null })),
        ),
        Fixture::accept(
            category,
            "hooks",
            settings(json!({
                "pre_bump_hooks": ["scripts/generate_documentation.sh"],
                "post_bump_hooks": [],
            })),
        ),
        Fixture::accept(
            category,
            "style",
            settings(json!({
                "style": [["qmark", "fg:#ff9d00 bold"], ["text", ""]],
            })),
        ),
        Fixture::accept(
            category,
            "version_files",
            settings(json!({
                "version_files": ["src/__version__.py", "Cargo.toml:version"],
            })),
        ),
        Fixture::accept(
            category,
            "booleans",
            settings(Value::Object(
                BOOLEAN_SETTINGS
                    .iter()
                    .enumerate()
                    .map(|(index, &setting)| {
                        (setting.to_owned(), Value::Bool(index % 2 == 0))
                    })
                    .collect(),
            )),
        ),
        Fixture::accept(
            category,
            "integers",
            settings(json!({
                "prerelease_offset": 1,
                "message_length_limit": 0,
            })),
        ),
        Fixture::accept(
            category,
            "nullable_strings",
            settings(json!({
                "changelog_format": null,
                "changelog_start_rev": null,
                "template": null,
                "bump_message": null,
            })),
        ),
        Fixture::accept(
            category,
            "extras",
            settings(json!({ "extras": { "anything": ["goes", 1, null] } })),
        ),
    ]);

    fixtures
}

fn invalid_configs() -> Vec<Fixture> {
    let category = Category::InvalidConfigs;

    let mut fixtures = vec![
        Fixture::reject(
            category,
            "missing_commitizen_key",
            json!({ "name": "cz_conventional_commits" }),
        ),
        Fixture::reject(
            category,
            "unknown_top_level_key",
            json!({ "commitizen": {}, "tool": {} }),
        ),
        Fixture::reject(
            category,
            "unknown_setting",
            settings(json!({ "unknown": true })),
        ),
        Fixture::reject(
            category,
            "invalid_version_provider",
            settings(json!({ "version_provider": "invalid" })),
        ),
        Fixture::reject(
            category,
            "invalid_version_scheme",
            settings(json!({ "version_scheme": "calver" })),
        ),
        Fixture::reject(
            category,
            "invalid_version_type",
            settings(json!({ "version_type": "calver" })),
        ),
        Fixture::reject(
            category,
            "invalid_changelog_format",
            settings(json!({ "changelog_format": "html" })),
        ),
        Fixture::reject(
            category,
            "version_files_not_array",
            settings(json!({ "version_files": "pyproject.toml:version" })),
        ),
        Fixture::reject(
            category,
            "pre_bump_hooks_string",
            settings(json!({ "pre_bump_hooks": "make docs" })),
        ),
        Fixture::reject(
            category,
            "post_bump_hooks_integer",
            settings(json!({ "post_bump_hooks": 123 })),
        ),
        Fixture::reject(
            category,
            "style_pair_too_short",
            settings(json!({ "style": [["qmark"]] })),
        ),
        Fixture::reject(
            category,
            "style_pair_too_long",
            settings(json!({ "style": [["qmark", "bold", "italic"]] })),
        ),
        Fixture::reject(
            category,
            "prerelease_offset_string",
            settings(json!({ "prerelease_offset": "zero" })),
        ),
        Fixture::reject(
            category,
            "message_length_limit_string",
            settings(json!({ "message_length_limit": "100" })),
        ),
        Fixture::reject(
            category,
            "invalid_bump_level",
            settings(json!({
                "customize": { "bump_map": { "break": "HUGE" } },
            })),
        ),
    ];

    for setting in BOOLEAN_SETTINGS {
        fixtures.push(Fixture::reject(
            category,
            format!("{setting}_string"),
            settings(json!({ setting: "yes" })),
        ));
        fixtures.push(Fixture::reject(
            category,
            format!("{setting}_integer"),
            settings(json!({ setting: 1 })),
        ));
    }

    fixtures
}

fn version_formats() -> Vec<Fixture> {
    let category = Category::VersionFormats;

    let accepted = ACCEPTED_VERSIONS.iter().map(|version| {
        Fixture::accept(
            category,
            format!("accepts {version}"),
            settings(json!({ "version": version })),
        )
    });

    let rejected = REJECTED_VERSIONS.iter().map(|version| {
        Fixture::reject(
            category,
            format!("rejects {version}"),
            settings(json!({ "version": version })),
        )
    });

    accepted.chain(rejected).collect()
}

fn customize() -> Vec<Fixture> {
    let category = Category::Customize;

    let mut fixtures = vec![Fixture::accept(
        category,
        "full_customize",
        settings(json!({
            "name": "cz_customize",
            "customize": {
                "message_template": "{{change_type}}: {{message}}",
                "example": "feature: this feature enables customization",
                "schema": "<type>: <body>",
                "schema_pattern": "(feature|bug fix):(\\s.*)",
                "bump_pattern": "^(break|new|fix|hotfix)",
                "bump_map": { "break": "MAJOR", "new": "MINOR", "fix": "PATCH" },
                "bump_map_major_version_zero": { "break": "MINOR" },
                "change_type_order": ["BREAKING CHANGE", "feat", "fix"],
                "change_type_map": { "feature": "Feat", "bug fix": "Fix" },
                "commit_parser": "^(?P<change_type>feature|bug fix):\\s(?P<message>.*)?",
                "changelog_pattern": "^(feature|bug fix)?(!)?",
                "info": "This is customized info",
                "info_path": "cz_customize_info.txt",
                "questions": [
                    {
                        "type": "list",
                        "name": "change_type",
                        "message": "Select the type of change",
                        "choices": [
                            { "value": "feature", "name": "feature: A new feature.", "key": "f" },
                            { "value": "bug fix", "name": "bug fix: A bug fix." },
                        ],
                    },
                    { "type": "input", "name": "message", "message": "Body." },
                ],
            },
        })),
    )];

    fixtures.extend(QuestionType::ALL.iter().map(|kind| {
        Fixture::accept(
            category,
            format!("question_type_{kind}"),
            settings(json!({
                "customize": {
                    "questions": [{
                        "type": kind.as_str(),
                        "name": "answer",
                        "message": "Question?",
                    }],
                },
            })),
        )
    }));

    fixtures.extend([
        Fixture::reject(
            category,
            "invalid_question_type",
            settings(json!({
                "customize": {
                    "questions": [{
                        "type": "select",
                        "name": "answer",
                        "message": "Question?",
                    }],
                },
            })),
        ),
        Fixture::reject(
            category,
            "question_without_message",
            settings(json!({
                "customize": {
                    "questions": [{ "type": "input", "name": "answer" }],
                },
            })),
        ),
        Fixture::reject(
            category,
            "unknown_customize_setting",
            settings(json!({ "customize": { "prompt": "Commit?" } })),
        ),
    ]);

    fixtures
}

#[cfg(test)]
mod test {
    #![allow(clippy::pedantic, clippy::restriction)]

    use std::collections::HashSet;

    use assert_fs::{TempDir, prelude::*};

    use super::*;

    #[test]
    fn builtin_ids_are_unique() {
        let fixtures = builtin();
        let ids: HashSet<_> = fixtures
            .iter()
            .map(|fixture| (fixture.category, fixture.id.as_str()))
            .collect();

        assert_eq!(ids.len(), fixtures.len());
    }

    #[test]
    fn every_boolean_setting_has_rejection_fixtures() {
        let ids: Vec<_> = invalid_configs()
            .into_iter()
            .map(|fixture| fixture.id)
            .collect();

        for setting in BOOLEAN_SETTINGS {
            assert!(ids.contains(&format!("{setting}_string")));
            assert!(ids.contains(&format!("{setting}_integer")));
        }
    }

    #[test]
    fn every_question_type_has_a_fixture() {
        let ids: Vec<_> = customize()
            .into_iter()
            .filter(|fixture| fixture.expectation == Expectation::Accept)
            .map(|fixture| fixture.id)
            .collect();

        for kind in QuestionType::ALL {
            assert!(ids.contains(&format!("question_type_{kind}")));
        }
    }

    #[test]
    fn load_dir_reads_valid_and_invalid_fixtures_in_order() {
        let temp_dir = TempDir::new().unwrap();
        temp_dir
            .child("valid/b.json")
            .write_str(r#"{"commitizen": {}}"#)
            .unwrap();
        temp_dir
            .child("valid/a.toml")
            .write_str("[tool.commitizen]\nname = \"cz_customize\"\n")
            .unwrap();
        temp_dir
            .child("invalid/c.json")
            .write_str(r#"{"commitizen": {"gpg_sign": 1}}"#)
            .unwrap();
        temp_dir.child("invalid/README.md").write_str("ignored").unwrap();

        let fixtures = load_dir(temp_dir.path()).unwrap();

        let ids: Vec<_> =
            fixtures.iter().map(|fixture| fixture.id.as_str()).collect();
        assert_eq!(ids, ["valid/a.toml", "valid/b.json", "invalid/c.json"]);
        assert_eq!(fixtures[0].expectation, Expectation::Accept);
        assert_eq!(fixtures[2].category, Category::InvalidConfigs);
        assert_eq!(fixtures[2].expectation, Expectation::Reject);
        assert_eq!(
            fixtures[0].instance,
            json!({ "commitizen": { "name": "cz_customize" } })
        );
    }

    #[test]
    fn load_dir_fails_without_fixtures() {
        let temp_dir = TempDir::new().unwrap();

        assert!(matches!(
            load_dir(temp_dir.path()),
            Err(FixtureLoadError::Empty { .. })
        ));
    }

    #[test]
    fn load_dir_fails_on_unparsable_fixtures() {
        let temp_dir = TempDir::new().unwrap();
        temp_dir.child("valid/broken.json").write_str("{").unwrap();

        assert!(matches!(
            load_dir(temp_dir.path()),
            Err(FixtureLoadError::Load(config::LoadError::Json { .. }))
        ));
    }
}

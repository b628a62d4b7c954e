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

//! Typed model of the Commitizen settings.

// NOTE: Keep the fields in sync with `schemas/cz-schema.json`. The tests of
// this module check both describe the same closed sets.

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

/// Defines a closed set of string values.
macro_rules! closed_set {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident => $repr:literal,
            )+
        }
    ) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize,
        )]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                #[serde(rename = $repr)]
                $variant,
            )+
        }

        impl $name {
            /// Every member of the set, in schema order.
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            /// Returns the representation of the value in configuration
            /// files.
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $repr,)+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

closed_set! {
    /// Where the current version is read from and written to.
    pub enum VersionProvider {
        /// The `version` setting itself.
        Commitizen => "commitizen",
        /// The latest Git tag.
        Scm => "scm",
        /// `project.version` in `pyproject.toml`.
        Pep621 => "pep621",
        /// `tool.poetry.version` in `pyproject.toml`.
        Poetry => "poetry",
        /// `project.version` in `pyproject.toml`, plus `uv.lock`.
        Uv => "uv",
        /// `package.version` in `Cargo.toml`.
        Cargo => "cargo",
        /// `version` in `package.json`.
        Npm => "npm",
        /// `version` in `composer.json`.
        Composer => "composer",
    }
}

closed_set! {
    /// The scheme used to compute new versions.
    pub enum VersionScheme {
        /// PEP 440 versions.
        Pep440 => "pep440",
        /// Semantic versions, prereleases without separator.
        Semver => "semver",
        /// Semantic versions 2.0.
        Semver2 => "semver2",
    }
}

closed_set! {
    /// The format of the changelog.
    pub enum ChangelogFormat {
        /// Markdown.
        Markdown => "markdown",
        /// AsciiDoc.
        Asciidoc => "asciidoc",
        /// Textile.
        Textile => "textile",
        /// reStructuredText.
        Restructuredtext => "restructuredtext",
    }
}

closed_set! {
    /// The level of a version bump.
    pub enum BumpLevel {
        /// Bumps the major version.
        Major => "MAJOR",
        /// Bumps the minor version.
        Minor => "MINOR",
        /// Bumps the patch version.
        Patch => "PATCH",
    }
}

closed_set! {
    /// The kind of a customised question.
    pub enum QuestionType {
        /// A single choice in a list.
        List => "list",
        /// Free text.
        Input => "input",
        /// Multiple choices in a list.
        Checkbox => "checkbox",
        /// A yes / no question.
        Confirm => "confirm",
        /// Hidden free text.
        Password => "password",
    }
}

/// A setting that can be omitted, explicitly `null`, or set.
///
/// Omission and `null` are different representations: both are accepted by
/// the schema for nullable settings and round-trip to what they were.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Nullable<T> {
    /// The setting is not present.
    Absent,
    /// The setting is present and `null`.
    Null,
    /// The setting has a value.
    Value(T),
}

/// A Commitizen configuration document, as found in `.cz.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// The settings.
    pub commitizen: Settings,
}

/// The Commitizen settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    /// The committing rules plugin.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// The current version.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    /// Where the version is read from.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version_provider: Option<VersionProvider>,
    /// The version scheme.
    #[serde(default, skip_serializing_if = "Nullable::is_absent")]
    pub version_scheme: Nullable<VersionScheme>,
    /// The deprecated alias of `version_scheme`.
    #[serde(default, skip_serializing_if = "Nullable::is_absent")]
    pub version_type: Nullable<VersionScheme>,
    /// The files where the version is bumped.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version_files: Option<Vec<String>>,
    /// The tag format.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag_format: Option<String>,
    /// Former tag formats.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub legacy_tag_formats: Option<Vec<String>>,
    /// Ignored tag formats.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ignored_tag_formats: Option<Vec<String>>,
    /// Whether to create annotated tags.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub annotated_tag: Option<bool>,
    /// Whether to sign tags.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gpg_sign: Option<bool>,
    /// The changelog file.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub changelog_file: Option<String>,
    /// The changelog format.
    #[serde(default, skip_serializing_if = "Nullable::is_absent")]
    pub changelog_format: Nullable<ChangelogFormat>,
    /// Whether to update the changelog incrementally.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub changelog_incremental: Option<bool>,
    /// Whether to merge prereleases in the changelog.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub changelog_merge_prerelease: Option<bool>,
    /// The revision to start the changelog from.
    #[serde(default, skip_serializing_if = "Nullable::is_absent")]
    pub changelog_start_rev: Nullable<String>,
    /// Whether to update the changelog on bump.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub update_changelog_on_bump: Option<bool>,
    /// The changelog template.
    #[serde(default, skip_serializing_if = "Nullable::is_absent")]
    pub template: Nullable<String>,
    /// The message of bump commits.
    #[serde(default, skip_serializing_if = "Nullable::is_absent")]
    pub bump_message: Nullable<String>,
    /// Commands run before bumping.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pre_bump_hooks: Option<Vec<String>>,
    /// Commands run after bumping.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub post_bump_hooks: Option<Vec<String>>,
    /// The offset of the first prerelease.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prerelease_offset: Option<u64>,
    /// Whether to keep the major version at zero.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub major_version_zero: Option<bool>,
    /// The file encoding.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub encoding: Option<String>,
    /// Whether empty messages abort the commit.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_abort: Option<bool>,
    /// Message prefixes accepted without validation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allowed_prefixes: Option<Vec<String>>,
    /// The maximum length of a commit message.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message_length_limit: Option<u64>,
    /// Whether to always sign off commits.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub always_signoff: Option<bool>,
    /// Whether to mark breaking changes with `!`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub breaking_change_exclamation_in_title: Option<bool>,
    /// Whether to reuse the last message after a failure.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retry_after_failure: Option<bool>,
    /// Whether to enable keyboard shortcuts.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub use_shortcuts: Option<bool>,
    /// The prompt style, as `(name, style)` pairs.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<Vec<(String, String)>>,
    /// The settings of `cz_customize`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customize: Option<Customize>,
    /// Free-form values for the plugin.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extras: Option<Map<String, Value>>,
}

/// The settings of the `cz_customize` plugin.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Customize {
    /// The template of the commit message.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message_template: Option<String>,
    /// An example commit message.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub example: Option<String>,
    /// A human-readable schema of commit messages.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,
    /// The pattern commit messages must match.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema_pattern: Option<String>,
    /// The pattern of commits triggering a bump.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bump_pattern: Option<String>,
    /// The bump level of each pattern.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bump_map: Option<IndexMap<String, BumpLevel>>,
    /// The bump level of each pattern while the major version is zero.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bump_map_major_version_zero: Option<IndexMap<String, BumpLevel>>,
    /// The order of change types in the changelog.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub change_type_order: Option<Vec<String>>,
    /// The changelog title of each change type.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub change_type_map: Option<IndexMap<String, String>>,
    /// The pattern extracting changelog entries.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub commit_parser: Option<String>,
    /// The pattern of commits included in the changelog.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub changelog_pattern: Option<String>,
    /// An explanation of the rules.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub info: Option<String>,
    /// A file explaining the rules.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub info_path: Option<String>,
    /// The questions asked to build the message.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub questions: Option<Vec<Question>>,
}

/// A question asked to build the commit message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Question {
    /// The kind of question.
    pub r#type: QuestionType,
    /// The name of the answer.
    pub name: String,
    /// The prompt.
    pub message: String,
    /// The choices of `list` and `checkbox` questions.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub choices: Option<Vec<Choice>>,
    /// The default answer.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    /// The filter applied to the answer.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,
}

/// A choice of a `list` or `checkbox` question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Choice {
    /// The value of the answer.
    pub value: String,
    /// The label shown to the user.
    pub name: String,
    /// The shortcut key.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
}

impl Config {
    /// Builds the typed configuration from a JSON instance.
    ///
    /// The instance is expected to be valid against the schema already.
    pub fn from_instance(instance: &Value) -> Result<Self, serde_json::Error> {
        Self::deserialize(instance)
    }
}

impl<T> Nullable<T> {
    /// Returns whether the setting is not present.
    pub const fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    /// Returns whether the setting is explicitly `null`.
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns the value, if any.
    pub const fn as_option(&self) -> Option<&T> {
        match self {
            Self::Value(value) => Some(value),
            Self::Absent | Self::Null => None,
        }
    }
}

impl<T> Default for Nullable<T> {
    fn default() -> Self {
        Self::Absent
    }
}

impl<'de, T> Deserialize<'de> for Nullable<T>
where
    T: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        // Absent fields never reach this point: they use `Default`.
        Ok(match Option::<T>::deserialize(deserializer)? {
            None => Self::Null,
            Some(value) => Self::Value(value),
        })
    }
}

impl<T> Serialize for Nullable<T>
where
    T: Serialize,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Self::Value(value) => value.serialize(serializer),
            Self::Absent | Self::Null => serializer.serialize_none(),
        }
    }
}

#[cfg(test)]
mod test {
    #![allow(clippy::pedantic, clippy::restriction)]

    use serde_json::json;

    use super::*;
    use crate::schema::{EMBEDDED_EXAMPLE, SchemaDocument};

    fn as_strs<T: Copy>(all: &[T], as_str: fn(T) -> &'static str) -> Vec<&str> {
        all.iter().copied().map(as_str).collect()
    }

    #[test]
    fn closed_sets_match_the_schema() {
        let schema = SchemaDocument::embedded().unwrap();

        assert_eq!(
            schema.setting_enum_values("version_provider").unwrap(),
            as_strs(VersionProvider::ALL, VersionProvider::as_str)
        );
        assert_eq!(
            schema.setting_enum_values("version_scheme").unwrap(),
            as_strs(VersionScheme::ALL, VersionScheme::as_str)
        );
        assert_eq!(
            schema.setting_enum_values("version_type").unwrap(),
            as_strs(VersionScheme::ALL, VersionScheme::as_str)
        );
        assert_eq!(
            schema.setting_enum_values("changelog_format").unwrap(),
            as_strs(ChangelogFormat::ALL, ChangelogFormat::as_str)
        );
        assert_eq!(
            schema.enum_values("/definitions/bump_level").unwrap(),
            as_strs(BumpLevel::ALL, BumpLevel::as_str)
        );
        assert_eq!(
            schema
                .enum_values("/definitions/question/properties/type")
                .unwrap(),
            as_strs(QuestionType::ALL, QuestionType::as_str)
        );
    }

    #[test]
    fn nullable_settings_accept_null_in_the_schema() {
        let schema = SchemaDocument::embedded().unwrap();

        for setting in ["version_scheme", "version_type", "changelog_format"] {
            assert!(schema.setting_accepts_null(setting), "{setting}");
        }
    }

    #[test]
    fn example_deserialises_into_the_typed_model() {
        let instance: Value = serde_json::from_str(EMBEDDED_EXAMPLE).unwrap();
        let config = Config::from_instance(&instance).unwrap();

        let settings = &config.commitizen;
        assert_eq!(settings.version_provider, Some(VersionProvider::Commitizen));
        assert_eq!(
            settings.version_scheme,
            Nullable::Value(VersionScheme::Semver2)
        );
        assert!(settings.version_type.is_absent());
        assert!(settings.changelog_start_rev.is_null());

        let questions = settings
            .customize
            .as_ref()
            .and_then(|customize| customize.questions.as_ref())
            .unwrap();
        assert_eq!(questions.len(), 3);
        assert_eq!(questions[0].r#type, QuestionType::List);
    }

    #[test]
    fn example_round_trips_through_the_typed_model() {
        let instance: Value = serde_json::from_str(EMBEDDED_EXAMPLE).unwrap();
        let config = Config::from_instance(&instance).unwrap();

        assert_eq!(serde_json::to_value(&config).unwrap(), instance);
    }

    #[test]
    fn null_and_omitted_version_scheme_are_distinct() {
        let omitted = json!({ "commitizen": { "name": "x" } });
        let null = json!({ "commitizen": { "name": "x", "version_scheme": null } });

        let omitted_config = Config::from_instance(&omitted).unwrap();
        let null_config = Config::from_instance(&null).unwrap();

        assert!(omitted_config.commitizen.version_scheme.is_absent());
        assert!(null_config.commitizen.version_scheme.is_null());
        assert_eq!(serde_json::to_value(&omitted_config).unwrap(), omitted);
        assert_eq!(serde_json::to_value(&null_config).unwrap(), null);
    }

    #[test]
    fn style_elements_are_pairs() {
        let instance = json!({ "commitizen": { "style": [["qmark"]] } });
        assert!(Config::from_instance(&instance).is_err());
    }

    #[test]
    fn unknown_settings_are_rejected() {
        let instance = json!({ "commitizen": { "nmae": "x" } });
        assert!(Config::from_instance(&instance).is_err());
    }

    #[test]
    fn closed_sets_display_their_representation() {
        assert_eq!(VersionProvider::Pep621.to_string(), "pep621");
        assert_eq!(BumpLevel::Minor.to_string(), "MINOR");
        assert_eq!(Nullable::Value(3).as_option(), Some(&3));
        assert_eq!(Nullable::<u8>::Null.as_option(), None);
    }
}

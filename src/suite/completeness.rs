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

//! Completeness of the settings declared by the schema.

use crate::schema::SchemaDocument;

/// The settings Commitizen reads from its configuration.
pub const EXPECTED_PROPERTIES: [&str; 34] = [
    "name",
    "version",
    "version_provider",
    "version_scheme",
    "version_type",
    "version_files",
    "tag_format",
    "legacy_tag_formats",
    "ignored_tag_formats",
    "annotated_tag",
    "gpg_sign",
    "changelog_file",
    "changelog_format",
    "changelog_incremental",
    "changelog_merge_prerelease",
    "changelog_start_rev",
    "update_changelog_on_bump",
    "template",
    "bump_message",
    "pre_bump_hooks",
    "post_bump_hooks",
    "prerelease_offset",
    "major_version_zero",
    "encoding",
    "allow_abort",
    "allowed_prefixes",
    "message_length_limit",
    "always_signoff",
    "breaking_change_exclamation_in_title",
    "retry_after_failure",
    "use_shortcuts",
    "style",
    "customize",
    "extras",
];

/// The difference between the declared and the expected settings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Completeness {
    /// Expected settings the schema does not declare, in expected order.
    pub missing: Vec<String>,
    /// Declared settings that are not expected, in schema order.
    pub extra: Vec<String>,
}

impl Completeness {
    /// Returns whether every expected setting is declared.
    pub fn is_complete(&self) -> bool {
        self.missing.is_empty()
    }
}

/// Compares the settings declared by the schema with the expected ones.
pub fn check(schema: &SchemaDocument, expected: &[&str]) -> Completeness {
    let declared = schema.commitizen_properties();

    let completeness = Completeness {
        missing: expected
            .iter()
            .filter(|property| !declared.contains(*property))
            .map(|&property| property.to_owned())
            .collect(),
        extra: declared
            .iter()
            .filter(|property| !expected.contains(*property))
            .map(|&property| property.to_owned())
            .collect(),
    };

    tracing::debug!(?completeness, "completeness checked");
    completeness
}

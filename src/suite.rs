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

//! The validation test suite.
//!
//! The suite feeds a schema with fixtures whose outcome is known in advance,
//! and records every case where the observed outcome differs. Only a malformed
//! schema stops a run: any other failure is recorded and the run goes on.

pub mod completeness;
pub mod fixtures;
pub mod report;

pub use fixtures::{Fixture, FixtureLoadError};

use serde_json::Value;
use thiserror::Error;

use crate::{
    config::LoadError,
    schema::{
        Draft7Validator, HeaderError, SchemaDocument, SchemaMalformedError,
        Validate, ValidationFailure,
    },
    tracing::error_chain,
};

use self::completeness::EXPECTED_PROPERTIES;

/// A group of cases reported together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    /// The schema itself.
    SchemaValidity,
    /// The example configuration.
    ExampleFile,
    /// Configurations the schema must accept.
    ValidConfigs,
    /// Configurations the schema must reject.
    InvalidConfigs,
    /// The grammar of the `version` setting.
    VersionFormats,
    /// The `customize` settings.
    Customize,
    /// The settings declared by the schema.
    Completeness,
}

/// The outcome expected from a case.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expectation {
    /// The configuration must be valid.
    Accept,
    /// The configuration must be invalid.
    Reject,
}

/// Why a case has failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CaseFailure {
    /// A configuration expected to be valid has been rejected.
    #[error("rejected at {}: {}", .0.path_display(), .0.message)]
    UnexpectedFailure(ValidationFailure),
    /// A configuration expected to be invalid has been accepted.
    #[error("accepted, but should have been rejected")]
    UnexpectedPass,
    /// The schema does not declare some expected settings.
    #[error("missing properties: {}", .missing.join(", "))]
    CompletenessGap {
        /// The settings missing from the schema.
        missing: Vec<String>,
    },
    /// The top-level fields of the schema are incomplete.
    #[error("{0}")]
    Header(HeaderError),
    /// The document to validate cannot be loaded.
    #[error("{0}")]
    Unreadable(String),
}

/// The result of a single case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaseResult {
    /// The category of the case.
    pub category: Category,
    /// The name of the case.
    pub id: String,
    /// The failure, if the observed outcome differs from the expected one.
    pub failure: Option<CaseFailure>,
}

/// Something worth reporting that does not fail the run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Note {
    /// The category the note relates to.
    pub category: Category,
    /// The message.
    pub message: String,
}

/// The results of a run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Report {
    /// Every case, in execution order.
    pub cases: Vec<CaseResult>,
    /// Informational notes.
    pub notes: Vec<Note>,
}

/// The aggregated results of a category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategorySummary {
    /// The category.
    pub category: Category,
    /// The number of cases.
    pub total: usize,
    /// The number of failed cases.
    pub failed: usize,
}

/// The validation suite.
#[derive(Debug)]
pub struct Suite<'a> {
    /// The schema under test.
    schema: &'a SchemaDocument,
    /// The example configuration, with its name.
    example: Option<(String, Result<Value, LoadError>)>,
    /// The fixtures.
    fixtures: Vec<Fixture>,
}

impl Category {
    /// Every category, in report order.
    pub const ALL: [Self; 7] = [
        Self::SchemaValidity,
        Self::ExampleFile,
        Self::ValidConfigs,
        Self::InvalidConfigs,
        Self::VersionFormats,
        Self::Customize,
        Self::Completeness,
    ];

    /// Returns the title of the category.
    pub const fn title(self) -> &'static str {
        match self {
            Self::SchemaValidity => "Schema validity",
            Self::ExampleFile => "Example file",
            Self::ValidConfigs => "Valid configs",
            Self::InvalidConfigs => "Invalid configs",
            Self::VersionFormats => "Version formats",
            Self::Customize => "Customize",
            Self::Completeness => "Schema completeness",
        }
    }
}

impl Report {
    /// Returns whether every case has the expected outcome.
    pub fn passed(&self) -> bool {
        self.cases.iter().all(|case| case.failure.is_none())
    }

    /// Returns the number of failed cases.
    pub fn failed_count(&self) -> usize {
        self.failures().count()
    }

    /// Returns the failed cases.
    pub fn failures(&self) -> impl Iterator<Item = &CaseResult> {
        self.cases.iter().filter(|case| case.failure.is_some())
    }

    /// Returns the cases of a category.
    pub fn cases_in(
        &self,
        category: Category,
    ) -> impl Iterator<Item = &CaseResult> {
        self.cases
            .iter()
            .filter(move |case| case.category == category)
    }

    /// Returns the notes of a category.
    pub fn notes_in(&self, category: Category) -> impl Iterator<Item = &Note> {
        self.notes
            .iter()
            .filter(move |note| note.category == category)
    }

    /// Summarises every category with at least one case, in report order.
    pub fn summaries(&self) -> Vec<CategorySummary> {
        Category::ALL
            .into_iter()
            .map(|category| CategorySummary {
                category,
                total: self.cases_in(category).count(),
                failed: self
                    .cases_in(category)
                    .filter(|case| case.failure.is_some())
                    .count(),
            })
            .filter(|summary| summary.total > 0)
            .collect()
    }

    /// Records a case.
    fn record(
        &mut self,
        category: Category,
        id: impl Into<String>,
        failure: Option<CaseFailure>,
    ) {
        let id = id.into();

        match &failure {
            None => tracing::debug!(?category, %id, "case passed"),
            Some(failure) => {
                tracing::info!(?category, %id, %failure, "case failed");
            }
        }

        self.cases.push(CaseResult {
            category,
            id,
            failure,
        });
    }
}

impl CategorySummary {
    /// Returns whether every case of the category has passed.
    pub const fn passed(&self) -> bool {
        self.failed == 0
    }
}

impl<'a> Suite<'a> {
    /// Builds a suite with the built-in fixtures.
    pub fn new(schema: &'a SchemaDocument) -> Self {
        Self {
            schema,
            example: None,
            fixtures: fixtures::builtin(),
        }
    }

    /// Builds a suite without any fixture.
    pub const fn empty(schema: &'a SchemaDocument) -> Self {
        Self {
            schema,
            example: None,
            fixtures: Vec::new(),
        }
    }

    /// Sets the example configuration, which must be valid.
    #[must_use]
    pub fn with_example(
        mut self,
        name: impl Into<String>,
        example: Result<Value, LoadError>,
    ) -> Self {
        self.example = Some((name.into(), example));
        self
    }

    /// Adds fixtures.
    #[must_use]
    pub fn with_fixtures(
        mut self,
        fixtures: impl IntoIterator<Item = Fixture>,
    ) -> Self {
        self.fixtures.extend(fixtures);
        self
    }

    /// Returns the fixtures of the suite.
    pub fn fixtures(&self) -> &[Fixture] {
        &self.fixtures
    }

    /// Runs the suite against the Draft 7 engine.
    ///
    /// Fails only if the schema is malformed.
    #[tracing::instrument(name = "suite", level = "trace", skip_all)]
    pub fn run(&self) -> Result<Report, SchemaMalformedError> {
        let validator = Draft7Validator::new(self.schema)?;

        let mut report = Report::default();
        report.record(Category::SchemaValidity, "draft7_meta_schema", None);
        self.run_cases(&validator, &mut report);

        Ok(report)
    }

    /// Runs the suite against any validator.
    ///
    /// The schema is not meta-validated.
    pub fn run_with<V>(&self, validator: &V) -> Report
    where
        V: Validate + ?Sized,
    {
        let mut report = Report::default();
        self.run_cases(validator, &mut report);
        report
    }

    /// Runs every case and records the results.
    fn run_cases<V>(&self, validator: &V, report: &mut Report)
    where
        V: Validate + ?Sized,
    {
        report.record(
            Category::SchemaValidity,
            "header",
            self.schema.check_header().err().map(CaseFailure::Header),
        );

        if let Some((name, example)) = &self.example {
            let failure = match example {
                Ok(instance) => {
                    check_case(validator, instance, Expectation::Accept)
                }
                Err(error) => Some(CaseFailure::Unreadable(error_chain(error))),
            };

            report.record(Category::ExampleFile, name.as_str(), failure);
        }

        for fixture in &self.fixtures {
            report.record(
                fixture.category,
                fixture.id.as_str(),
                check_case(validator, &fixture.instance, fixture.expectation),
            );
        }

        let completeness = completeness::check(self.schema, &EXPECTED_PROPERTIES);

        report.record(
            Category::Completeness,
            "commitizen_properties",
            (!completeness.is_complete()).then(|| {
                CaseFailure::CompletenessGap {
                    missing: completeness.missing.clone(),
                }
            }),
        );

        if !completeness.extra.is_empty() {
            report.notes.push(Note {
                category: Category::Completeness,
                message: format!(
                    "Extra properties (might be new): {}",
                    completeness.extra.join(", ")
                ),
            });
        }
    }
}

/// Compares the outcome of a validation with the expected one.
fn check_case<V>(
    validator: &V,
    instance: &Value,
    expectation: Expectation,
) -> Option<CaseFailure>
where
    V: Validate + ?Sized,
{
    match (validator.validate(instance), expectation) {
        (Ok(()), Expectation::Accept) => None,
        (Err(failure), Expectation::Reject) => {
            tracing::trace!(%failure, "rejected as expected");
            None
        }
        (Err(failure), Expectation::Accept) => {
            Some(CaseFailure::UnexpectedFailure(failure))
        }
        (Ok(()), Expectation::Reject) => Some(CaseFailure::UnexpectedPass),
    }
}

#[cfg(test)]
mod test {
    #![allow(clippy::pedantic, clippy::restriction)]

    use std::cell::Cell;

    use serde_json::json;

    use super::*;

    /// A validator accepting everything, counting its calls.
    struct AcceptAll {
        calls: Cell<usize>,
    }

    impl Validate for AcceptAll {
        fn validate(&self, _: &Value) -> Result<(), ValidationFailure> {
            self.calls.set(self.calls.get() + 1);
            Ok(())
        }
    }

    #[test]
    fn builtin_suite_passes_on_the_embedded_schema() {
        let schema = SchemaDocument::embedded().unwrap();
        let report = Suite::new(&schema)
            .with_example("cz.example.json", crate::config::embedded_example())
            .run()
            .unwrap();

        let failures: Vec<_> = report.failures().collect();
        assert!(failures.is_empty(), "{failures:#?}");
        assert!(report.notes.is_empty());
    }

    #[test]
    fn every_category_is_exercised() {
        let schema = SchemaDocument::embedded().unwrap();
        let report = Suite::new(&schema)
            .with_example("cz.example.json", crate::config::embedded_example())
            .run()
            .unwrap();

        let categories: Vec<_> = report
            .summaries()
            .iter()
            .map(|summary| summary.category)
            .collect();
        assert_eq!(categories, Category::ALL.to_vec());
    }

    #[test]
    fn failures_do_not_stop_the_run() {
        let schema = SchemaDocument::embedded().unwrap();
        let validator = AcceptAll {
            calls: Cell::new(0),
        };

        let suite = Suite::new(&schema);
        let report = suite.run_with(&validator);

        let rejections = suite
            .fixtures()
            .iter()
            .filter(|fixture| fixture.expectation == Expectation::Reject)
            .count();

        assert_eq!(validator.calls.get(), suite.fixtures().len());
        assert_eq!(report.failed_count(), rejections);
        assert!(
            report
                .failures()
                .all(|case| case.failure == Some(CaseFailure::UnexpectedPass))
        );
    }

    #[test]
    fn unexpected_rejections_carry_the_failure() {
        let schema = SchemaDocument::embedded().unwrap();
        let report = Suite::empty(&schema)
            .with_fixtures([Fixture::accept(
                Category::ValidConfigs,
                "bad_version",
                json!({ "commitizen": { "version": "v1.0.0" } }),
            )])
            .run()
            .unwrap();

        let case = report.failures().next().unwrap();
        match &case.failure {
            Some(CaseFailure::UnexpectedFailure(failure)) => {
                assert_eq!(failure.path_display(), "commitizen -> version");
            }
            other => panic!("unexpected failure: {other:?}"),
        }
        assert_eq!(report.failed_count(), 1);
    }

    #[test]
    fn malformed_schema_is_fatal() {
        let schema = SchemaDocument::from_value(json!({
            "$schema": "http://json-schema.org/draft-07/schema#",
            "type": "commitizen"
        }));

        assert!(matches!(
            Suite::new(&schema).run(),
            Err(SchemaMalformedError::MetaSchema { .. })
        ));
    }

    #[test]
    fn unreadable_example_is_a_case_failure() {
        let schema = SchemaDocument::embedded().unwrap();
        let example = crate::config::load_file(std::path::Path::new(
            "does/not/exist.json",
        ));

        let report = Suite::empty(&schema)
            .with_example("exist.json", example)
            .run()
            .unwrap();

        let failures: Vec<_> = report.failures().collect();
        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].category, Category::ExampleFile);
        assert!(matches!(
            failures[0].failure,
            Some(CaseFailure::Unreadable(_))
        ));
    }

    #[test]
    fn extra_properties_are_informational() {
        let mut value: Value =
            serde_json::from_str(crate::schema::EMBEDDED_SCHEMA).unwrap();
        value["properties"]["commitizen"]["properties"]["new_setting"] =
            json!({ "type": "string" });
        let schema = SchemaDocument::from_value(value);

        let report = Suite::empty(&schema).run().unwrap();

        assert!(report.passed());
        assert_eq!(
            report.notes,
            vec![Note {
                category: Category::Completeness,
                message: String::from(
                    "Extra properties (might be new): new_setting"
                ),
            }]
        );
    }

    #[test]
    fn missing_properties_fail_the_completeness_case() {
        let mut value: Value =
            serde_json::from_str(crate::schema::EMBEDDED_SCHEMA).unwrap();
        value["properties"]["commitizen"]["properties"]
            .as_object_mut()
            .unwrap()
            .remove("encoding");
        let schema = SchemaDocument::from_value(value);

        let report = Suite::empty(&schema).run().unwrap();

        let case = report.cases_in(Category::Completeness).next().unwrap();
        assert_eq!(
            case.failure,
            Some(CaseFailure::CompletenessGap {
                missing: vec![String::from("encoding")],
            })
        );
    }
}

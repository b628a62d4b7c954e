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

//! The `check` subcommand.

use std::path::PathBuf;

use clap::Parser;
use colored::Colorize as _;
use eyre::{Result, bail};
use thiserror::Error;

use crate::{
    config,
    schema::EXAMPLE_FILE_NAME,
    suite::{Suite, fixtures::load_dir},
};

use super::helpers::load_schema;

/// The check command.
#[derive(Debug, Parser)]
pub struct Check {
    /// The schema to check, instead of the embedded one.
    #[arg(long, env = "CZ_SCHEMA", value_name = "PATH")]
    schema: Option<PathBuf>,
    /// The example configuration, instead of the embedded one.
    #[arg(long, value_name = "PATH")]
    example: Option<PathBuf>,
    /// A directory with additional `valid/` and `invalid/` fixtures.
    #[arg(long, value_name = "DIR")]
    fixtures: Option<PathBuf>,
}

/// Usage errors of `cz-schema check`.
#[derive(Debug, Error)]
pub enum CheckError {
    /// Some cases do not have the expected outcome.
    #[error("{failed} of {total} cases failed")]
    CasesFailed {
        /// The number of failed cases.
        failed: usize,
        /// The total number of cases.
        total: usize,
    },
}

impl super::Command for Check {
    #[tracing::instrument(name = "check", level = "trace", skip_all)]
    fn run(&self) -> Result<()> {
        let Self {
            schema,
            example,
            fixtures,
        } = self;

        let schema = load_schema(schema.as_deref())?;

        let (example_name, example) = match example {
            Some(path) => (
                path.file_name().map_or_else(
                    || path.display().to_string(),
                    |name| name.to_string_lossy().into_owned(),
                ),
                config::load_file(path),
            ),
            None => (
                String::from(EXAMPLE_FILE_NAME),
                config::embedded_example(),
            ),
        };

        let extra_fixtures = match fixtures {
            Some(dir) => load_dir(dir)?,
            None => Vec::new(),
        };

        let report = Suite::new(&schema)
            .with_example(example_name, example)
            .with_fixtures(extra_fixtures)
            .run()?;

        let heading = format!("Schema: {}", schema.origin());
        println!("{}\n", heading.bold());
        println!("{report}");

        if !report.passed() {
            bail!(CheckError::CasesFailed {
                failed: report.failed_count(),
                total: report.cases.len(),
            });
        }

        Ok(())
    }
}

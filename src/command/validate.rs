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

//! The `validate` subcommand.

use std::{env, path::PathBuf};

use clap::Parser;
use eyre::{Result, bail};
use thiserror::Error;

use crate::{
    config::{self, Config, lint::lint},
    schema::Draft7Validator,
    success, warning,
};

use super::helpers::load_schema;

/// The validate command.
#[derive(Debug, Parser)]
pub struct Validate {
    /// The configuration file to validate.
    ///
    /// Without it, the configuration is looked for in the current directory.
    #[arg(value_name = "FILE")]
    file: Option<PathBuf>,
    /// The schema to validate against, instead of the embedded one.
    #[arg(long, env = "CZ_SCHEMA", value_name = "PATH")]
    schema: Option<PathBuf>,
}

/// Usage errors of `cz-schema validate`.
#[derive(Debug, Error)]
pub enum ValidateError {
    /// The configuration violates the schema.
    #[error("{} is invalid ({count} violation(s))", .path.display())]
    Invalid {
        /// The path of the configuration file.
        path: PathBuf,
        /// The number of violations.
        count: usize,
    },
}

impl super::Command for Validate {
    #[tracing::instrument(name = "validate", level = "trace", skip_all)]
    fn run(&self) -> Result<()> {
        let Self { file, schema } = self;

        let schema = load_schema(schema.as_deref())?;
        let validator = Draft7Validator::new(&schema)?;

        let (path, instance) = match file {
            Some(path) => (path.clone(), config::load_file(path)?),
            None => config::discover(&env::current_dir()?)?,
        };

        let violations = validator.validate_all(&instance);

        if !violations.is_empty() {
            for violation in &violations {
                eprintln!("  - {}: {violation}", violation.path_display());
            }

            bail!(ValidateError::Invalid {
                path,
                count: violations.len(),
            });
        }

        success!("{} is valid.", path.display());

        match Config::from_instance(&instance) {
            Ok(config) => {
                for lint in lint(&config) {
                    warning!("Warning: {lint}");
                }
            }
            Err(error) => {
                tracing::warn!(%error, "the settings cannot be linted");
            }
        }

        Ok(())
    }
}

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

//! The command-line interface.

mod check;
pub mod helpers;
mod show;
mod validate;

use clap::Parser;
use eyre::Result;

use self::{
    check::{Check, CheckError},
    show::Show,
    validate::{Validate, ValidateError},
};
use crate::{config::DiscoverError, error, hint, schema::SchemaMalformedError};

/// A validation harness for the Commitizen configuration schema.
#[derive(Debug, Parser)]
#[command(author, version)]
pub enum CzSchema {
    /// Runs the validation suite against the schema.
    Check(Check),
    /// Validates a configuration file against the schema.
    Validate(Validate),
    /// Prints a bundled document.
    Show(Show),
}

trait Command {
    /// Runs the command.
    fn run(&self) -> Result<()>;
}

impl CzSchema {
    /// Runs cz-schema.
    pub fn run() -> Result<()> {
        let cli = Self::parse();
        crate::tracing::init();

        let result = match cli {
            Self::Check(check) => check.run(),
            Self::Validate(validate) => validate.run(),
            Self::Show(show) => show.run(),
        };

        match result {
            Err(e) => handle_errors(e),
            Ok(()) => Ok(()),
        }
    }
}

fn handle_errors(e: color_eyre::Report) -> Result<()> {
    if let Some(e) = e.downcast_ref::<CheckError>() {
        match e {
            CheckError::CasesFailed { .. } => error!("{e}"),
        }
        std::process::exit(exitcode::DATAERR);
    } else if let Some(e) = e.downcast_ref::<ValidateError>() {
        match e {
            ValidateError::Invalid { .. } => error!("{e}"),
        }
        std::process::exit(exitcode::DATAERR);
    } else if let Some(e) = e.downcast_ref::<SchemaMalformedError>() {
        error!("{e}");
        if let SchemaMalformedError::MetaSchema { violations } = e {
            for violation in violations {
                eprintln!("  - {}: {violation}", violation.path_display());
            }
        }
        hint!("Fix the schema so that it is a valid Draft 7 JSON Schema.");
        std::process::exit(exitcode::CONFIG);
    } else if let Some(DiscoverError::NotFound { .. }) =
        e.downcast_ref::<DiscoverError>()
    {
        error!("{e}");
        hint!(
            "You can pass the configuration file to validate, like \
            `cz-schema validate pyproject.toml`."
        );
        std::process::exit(exitcode::NOINPUT);
    } else {
        Err(e)
    }
}

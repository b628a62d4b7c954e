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

//! The `show` subcommand.

use clap::{Parser, ValueEnum};
use eyre::Result;

use crate::schema::{EMBEDDED_EXAMPLE, EMBEDDED_SCHEMA};

/// The show command.
#[derive(Debug, Parser)]
pub struct Show {
    /// The document to print.
    #[arg(value_enum, default_value_t = Document::Schema)]
    document: Document,
}

/// A document bundled with the binary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Document {
    /// The JSON Schema.
    Schema,
    /// The example configuration.
    Example,
}

impl super::Command for Show {
    fn run(&self) -> Result<()> {
        let Self { document } = self;

        let content = match document {
            Document::Schema => EMBEDDED_SCHEMA,
            Document::Example => EMBEDDED_EXAMPLE,
        };

        print!("{content}");
        Ok(())
    }
}

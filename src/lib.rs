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

//! Validation harness for the Commitizen configuration schema.
//!
//! The crate bundles the JSON Schema describing Commitizen configuration files
//! (`.cz.json`, `cz.json`, or `[tool.commitizen]` in TOML files), a typed model
//! of the same settings, and a suite of fixtures checking that the schema
//! accepts what it should and rejects what it should not.

pub mod command;
pub mod config;
pub mod schema;
pub mod suite;
pub mod tracing;

pub use command::CzSchema;

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

//! Utilities to help with tracing.

use std::{error::Error, iter};

use itertools::Itertools as _;
use tracing_subscriber::EnvFilter;

use crate::command::helpers::uncapitalise;

/// The environment variable used to configure the log filter.
pub const LOG_ENV_VAR: &str = "CZ_SCHEMA_LOG";

/// The log filter used when [`LOG_ENV_VAR`] is not set.
const DEFAULT_FILTER: &str = "warn";

/// Installs the global tracing subscriber.
///
/// Logs are written to stderr so that they never mix with the report printed
/// on stdout.
pub fn init() {
    let filter = EnvFilter::try_from_env(LOG_ENV_VAR)
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Renders an error and its sources on one line.
pub fn error_chain(error: &(dyn Error + 'static)) -> String {
    iter::successors(Some(error), |&error| error.source())
        .map(|error| error.to_string().trim().to_owned())
        .dedup()
        .join(": ")
}

/// An extension trait for [`Result`] to insert logging.
pub trait LogResult {
    /// Logs the error.
    ///
    /// If the [`Result`] is an [`Err`], logs the error. Otherwise this function
    /// does nothing.
    fn log_err(self) -> Self;
}

impl<T, E> LogResult for Result<T, E>
where
    E: std::fmt::Display + std::fmt::Debug,
{
    fn log_err(self) -> Self {
        if let Err(error) = &self {
            tracing::error!(?error, "{}", uncapitalise(&error.to_string()));
        }

        self
    }
}

#[cfg(test)]
mod test {
    #![allow(clippy::pedantic, clippy::restriction)]

    use std::path::Path;

    use super::*;

    #[test]
    fn error_chain_joins_sources() {
        let error = crate::config::load_file(Path::new("missing/.cz.json"))
            .unwrap_err();
        let chain = error_chain(&error);

        assert!(chain.starts_with("Failed to read missing/.cz.json: "));
        assert_eq!(chain.matches("Failed to read").count(), 1);
    }

    #[test]
    fn error_chain_of_a_single_error_is_its_message() {
        let error = crate::suite::CaseFailure::UnexpectedPass;
        assert_eq!(
            error_chain(&error),
            "accepted, but should have been rejected"
        );
    }
}

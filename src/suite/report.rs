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

//! Rendering of the suite results.

use std::fmt;

use colored::Colorize as _;

use super::{Category, CategorySummary, Report};

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for category in Category::ALL {
            if self.cases_in(category).next().is_none() {
                continue;
            }

            writeln!(f, "{}", category.title().bold())?;

            for case in self.cases_in(category) {
                match &case.failure {
                    None => writeln!(f, "  ✅ {}", case.id)?,
                    Some(failure) => writeln!(
                        f,
                        "  ❌ {}: {}",
                        case.id.bold(),
                        failure.to_string().red()
                    )?,
                }
            }

            for note in self.notes_in(category) {
                writeln!(f, "  ℹ️  {}", note.message.blue())?;
            }

            writeln!(f)?;
        }

        writeln!(f, "{}", "Summary".bold())?;
        for summary in self.summaries() {
            writeln!(f, "{summary}")?;
        }
        writeln!(f)?;

        let total = self.cases.len();
        let failed = self.failed_count();

        if failed == 0 {
            write!(f, "{}", format!("🎉 All {total} cases passed!").green().bold())
        } else {
            write!(
                f,
                "{}",
                format!("⚠️  {failed}/{total} cases failed").red().bold()
            )
        }
    }
}

impl fmt::Display for CategorySummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let passed = self.total - self.failed;
        let title = self.category.title();

        if self.passed() {
            write!(f, "  ✅ PASS: {title} ({passed}/{})", self.total)
        } else {
            let line = format!("  ❌ FAIL: {title} ({passed}/{})", self.total);
            write!(f, "{}", line.red())
        }
    }
}

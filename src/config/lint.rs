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

//! Checks the schema cannot express.
//!
//! These lints run on configurations that are already valid against the
//! schema. They report likely mistakes, not invalid documents.

use std::fmt;

use indexmap::IndexMap;
use itertools::Itertools as _;
use regex::Regex;
use tera::Tera;

use super::{Config, Customize, Question, QuestionType};
use crate::tracing::error_chain;

/// A likely mistake in a configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lint {
    /// The dotted path of the setting.
    pub setting: String,
    /// What is wrong with it.
    pub message: String,
}

/// Lints a configuration.
#[tracing::instrument(level = "trace", skip_all)]
pub fn lint(config: &Config) -> Vec<Lint> {
    let settings = &config.commitizen;
    let mut lints = Vec::new();

    if !settings.version_type.is_absent() {
        lints.push(Lint::new(
            "version_type",
            "deprecated, use `version_scheme` instead",
        ));
    }

    if let Some(customize) = &settings.customize {
        lint_customize(customize, &mut lints);
    }

    tracing::debug!(count = lints.len(), "linting done");
    lints
}

impl Lint {
    /// Builds a new lint.
    fn new(setting: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            setting: setting.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for Lint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.setting, self.message)
    }
}

/// Lints the `customize` settings.
fn lint_customize(customize: &Customize, lints: &mut Vec<Lint>) {
    if let Some(template) = &customize.message_template {
        check_template("customize.message_template", template, lints);
    }

    let patterns = [
        ("customize.schema_pattern", &customize.schema_pattern),
        ("customize.bump_pattern", &customize.bump_pattern),
        ("customize.commit_parser", &customize.commit_parser),
        ("customize.changelog_pattern", &customize.changelog_pattern),
    ];

    for (setting, pattern) in patterns {
        if let Some(pattern) = pattern {
            check_pattern(setting, pattern, lints);
        }
    }

    let bump_maps = [
        ("customize.bump_map", &customize.bump_map),
        (
            "customize.bump_map_major_version_zero",
            &customize.bump_map_major_version_zero,
        ),
    ];

    for (setting, bump_map) in bump_maps {
        for pattern in bump_map.iter().flat_map(IndexMap::keys) {
            check_pattern(&format!("{setting}.{pattern}"), pattern, lints);
        }
    }

    if customize.bump_pattern.is_some() && customize.bump_map.is_none() {
        lints.push(Lint::new(
            "customize.bump_map",
            "`bump_pattern` is set, but no `bump_map` gives its matches a bump level",
        ));
    }

    if let Some(questions) = &customize.questions {
        lint_questions(questions, lints);
    }
}

/// Lints the customised questions.
fn lint_questions(questions: &[Question], lints: &mut Vec<Lint>) {
    for (index, question) in questions.iter().enumerate() {
        let setting = format!("customize.questions.{index}");
        let Question {
            r#type: kind,
            name,
            choices,
            ..
        } = question;

        match (kind, choices) {
            (QuestionType::List | QuestionType::Checkbox, None) => {
                lints.push(Lint::new(
                    setting,
                    format!("`{kind}` question `{name}` has no choices"),
                ));
            }
            (
                QuestionType::Input
                | QuestionType::Confirm
                | QuestionType::Password,
                Some(_),
            ) => {
                lints.push(Lint::new(
                    setting,
                    format!("choices of `{kind}` question `{name}` are ignored"),
                ));
            }
            _ => (),
        }
    }

    for name in questions.iter().map(|question| &question.name).duplicates() {
        lints.push(Lint::new(
            "customize.questions",
            format!("several questions store their answer in `{name}`"),
        ));
    }
}

/// Comments, expressions and statements of a Jinja template.
const JINJA_TAG: &str = r"(?s)\{#.*?#\}|\{\{.*?\}\}|\{%-?\s*(\w*).*?%\}";

/// Checks the statement structure of a message template.
///
/// Commitizen renders templates with Jinja2. Only the structure Tera shares
/// with it is checked: delimiters and the nesting of `if`, `for`, `set` and
/// `raw` blocks. Expressions are not checked.
fn check_template(setting: &str, template: &str, lints: &mut Vec<Lint>) {
    let Some(skeleton) = template_skeleton(template) else {
        tracing::debug!(setting, "the template uses statements Tera ignores");
        return;
    };

    let mut tera = Tera::default();

    if let Err(error) = tera.add_raw_template(setting, &skeleton) {
        lints.push(Lint::new(
            setting,
            format!("invalid template: {}", error_chain(&error)),
        ));
    }
}

/// Reduces a Jinja template to its statements, with placeholder expressions.
///
/// Returns [`None`] if the template uses a statement Tera does not know.
fn template_skeleton(template: &str) -> Option<String> {
    let jinja_tag = Regex::new(JINJA_TAG).ok()?;

    let mut skeleton = String::with_capacity(template.len());
    let mut blocks = Vec::new();
    let mut last = 0;

    for captures in jinja_tag.captures_iter(template) {
        let tag = captures.get(0)?;
        skeleton.push_str(template.get(last..tag.start())?);
        last = tag.end();

        if tag.as_str().starts_with("{#") {
            continue;
        } else if tag.as_str().starts_with("{{") {
            skeleton.push_str("{{ x }}");
            continue;
        }

        let keyword = captures.get(1).map_or("", |keyword| keyword.as_str());
        let statement = match keyword {
            "if" => {
                blocks.push(keyword);
                "{% if x %}"
            }
            "for" => {
                blocks.push(keyword);
                "{% for x in x %}"
            }
            "elif" => "{% elif x %}",
            // Tera has no `for ... else`.
            "else" if blocks.last() == Some(&"if") => "{% else %}",
            "endif" => {
                blocks.pop();
                "{% endif %}"
            }
            "endfor" => {
                blocks.pop();
                "{% endfor %}"
            }
            "set" => "{% set x = x %}",
            "raw" => "{% raw %}",
            "endraw" => "{% endraw %}",
            _ => return None,
        };

        skeleton.push_str(statement);
    }

    skeleton.push_str(template.get(last..)?);
    Some(skeleton)
}

/// Checks a regular expression compiles.
///
/// Commitizen uses Python regular expressions, so look-around and
/// backreferences are accepted.
fn check_pattern(setting: &str, pattern: &str, lints: &mut Vec<Lint>) {
    if let Err(error) = fancy_regex::Regex::new(pattern) {
        lints.push(Lint::new(
            setting,
            format!("invalid regular expression: {error}"),
        ));
    }
}

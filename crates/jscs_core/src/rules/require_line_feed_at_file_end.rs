//! Requires files to end with a line feed.

use crate::autofix::TextEdit;
use crate::declare_rule;
use crate::diagnostic::Diagnostic;
use crate::errors::Errors;
use crate::file::SourceFile;
use crate::rule::{ConfigError, Rule};
use jscs_syntax::Position;
use serde_json::Value;

declare_rule! {
    /// Requires a newline as the last character of a non-empty file.
    RequireLineFeedAtFileEnd,
    "requireLineFeedAtFileEnd",
}

impl Default for RequireLineFeedAtFileEnd {
    fn default() -> Self {
        Self {}
    }
}

impl Rule for RequireLineFeedAtFileEnd {
    fn option_name(&self) -> &'static str {
        Self::OPTION_NAME
    }

    fn configure(&mut self, value: &Value) -> Result<(), ConfigError> {
        if *value == Value::Bool(true) {
            Ok(())
        } else {
            Err(ConfigError::invalid(
                Self::OPTION_NAME,
                format!("expected `true`, got `{}`", value),
            ))
        }
    }

    fn check(&self, file: &SourceFile, errors: &mut Errors) {
        let source = file.source();
        if source.is_empty() || source.ends_with('\n') {
            return;
        }
        let last_line = file.lines().len() as u32;
        let column = file.lines().last().map_or(0, |l| l.chars().count()) as u32;
        errors.add(
            "Missing line feed at file end",
            Position::new(last_line, column),
        );
    }

    fn can_fix(&self) -> bool {
        true
    }

    fn fix(&self, file: &SourceFile, _diagnostic: &Diagnostic) -> Option<Vec<TextEdit>> {
        Some(vec![TextEdit::insert_at(file.source().len(), "\n")])
    }
}

#[cfg(test)]
mod tests {
    use crate::rule_tests;
    use serde_json::json;

    rule_tests! {
        json!({ "requireLineFeedAtFileEnd": true }),
        err: {
            "var a = 1;",
        },
        ok: {
            "var a = 1;\n",
            "",
        }
    }

    #[test]
    fn appends_the_missing_newline() {
        let mut checker = crate::Checker::new();
        checker
            .configure(
                json!({ "requireLineFeedAtFileEnd": true })
                    .as_object()
                    .unwrap(),
            )
            .unwrap();
        let fixed = checker.fix_string("var a = 1;", "test.js");
        assert_eq!(fixed.output, "var a = 1;\n");
        assert!(fixed.errors.is_empty());
    }
}

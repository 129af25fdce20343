//! Requires comments to start with an uppercase letter.

use crate::autofix::TextEdit;
use crate::declare_rule;
use crate::diagnostic::Diagnostic;
use crate::directives::is_pragma_comment;
use crate::errors::Errors;
use crate::file::SourceFile;
use crate::rule::{ConfigError, Rule};
use jscs_syntax::{Token, TokenType};
use serde_json::Value;

declare_rule! {
    /// Requires the first letter of a comment to be uppercase.
    ///
    /// ```js
    /// // Incorrect
    /// //invalid comment
    ///
    /// // Correct
    /// //Valid comment
    /// ```
    ///
    /// Line comments continuing a comment on the previous line (textblocks)
    /// are exempt, as are pragma directives and comments whose first word is
    /// listed in `allExcept` (e.g. `"jshint"`).
    RequireCapitalizedComments,
    "requireCapitalizedComments",
    pub all_except: Vec<String>,
}

impl Default for RequireCapitalizedComments {
    fn default() -> Self {
        Self {
            all_except: Vec::new(),
        }
    }
}

impl RequireCapitalizedComments {
    fn is_excepted(&self, text: &str) -> bool {
        let trimmed = text.trim_start();
        self.all_except
            .iter()
            .any(|except| trimmed.starts_with(except.as_str()))
    }
}

/// The first alphabetic char of the comment body with its byte offset.
fn first_letter(text: &str) -> Option<(usize, char)> {
    text.char_indices().find(|(_, c)| c.is_alphabetic())
}

/// Whether a line comment merely continues a comment ending on the previous
/// line, forming one textblock.
fn is_textblock_continuation(file: &SourceFile, token: &Token) -> bool {
    if token.ty != TokenType::LineComment {
        return false;
    }
    file.comments().any(|(_, prev)| {
        prev.ty == TokenType::LineComment && prev.loc.start.line + 1 == token.loc.start.line
    })
}

impl Rule for RequireCapitalizedComments {
    fn option_name(&self) -> &'static str {
        Self::OPTION_NAME
    }

    fn configure(&mut self, value: &Value) -> Result<(), ConfigError> {
        match value {
            Value::Bool(true) => Ok(()),
            Value::Object(map) => {
                let list = map.get("allExcept").and_then(|v| v.as_array()).ok_or_else(|| {
                    ConfigError::invalid(Self::OPTION_NAME, "expected `true` or `{\"allExcept\": [...]}`")
                })?;
                self.all_except = list
                    .iter()
                    .map(|v| {
                        v.as_str().map(|s| s.to_string()).ok_or_else(|| {
                            ConfigError::invalid(Self::OPTION_NAME, "allExcept entries must be strings")
                        })
                    })
                    .collect::<Result<_, _>>()?;
                Ok(())
            }
            _ => Err(ConfigError::invalid(
                Self::OPTION_NAME,
                format!("expected `true` or `{{\"allExcept\": [...]}}`, got `{}`", value),
            )),
        }
    }

    fn check(&self, file: &SourceFile, errors: &mut Errors) {
        for (_, token) in file.comments() {
            if is_pragma_comment(&token.value) || self.is_excepted(&token.value) {
                continue;
            }
            if is_textblock_continuation(file, token) {
                continue;
            }
            if let Some((_, letter)) = first_letter(&token.value) {
                if letter.is_lowercase() {
                    errors.add(
                        "Comments must start with an uppercase letter, unless it is part of a textblock",
                        token.loc.start,
                    );
                }
            }
        }
    }

    fn can_fix(&self) -> bool {
        true
    }

    fn fix(&self, file: &SourceFile, diagnostic: &Diagnostic) -> Option<Vec<TextEdit>> {
        let (_, token) = file
            .comments()
            .find(|(_, t)| t.loc.start == diagnostic.position())?;
        let (offset, letter) = first_letter(&token.value)?;
        if !letter.is_lowercase() {
            return None;
        }
        // The comment body starts after the two delimiter bytes.
        let start = token.range.start + 2 + offset;
        let end = start + letter.len_utf8();
        Some(vec![TextEdit::replace(
            start..end,
            letter.to_uppercase().to_string(),
        )])
    }
}

#[cfg(test)]
mod tests {
    use crate::rule_tests;
    use serde_json::json;

    rule_tests! {
        json!({ "requireCapitalizedComments": true }),
        err: {
            "//invalid",
            "// lowercase start",
            "/* block comments count too */",
        },
        ok: {
            "//Valid",
            "// Valid comment",
            "/* Block comment */",
            "// jscs:disable someRule",
            "// Textblocks are fine:\n// even when continued lowercase",
            "// 1234",
        }
    }

    rule_tests! {
        all_except_valid,
        all_except_invalid,
        json!({ "requireCapitalizedComments": { "allExcept": ["jshint"] } }),
        err: {
            "//other lowercase",
        },
        ok: {
            "//jshint ignore:line",
        }
    }

    #[test]
    fn fixes_the_first_letter() {
        let mut checker = crate::Checker::new();
        checker
            .configure(
                json!({ "requireCapitalizedComments": true })
                    .as_object()
                    .unwrap(),
            )
            .unwrap();
        let fixed = checker.fix_string("//invalid", "test.js");
        assert_eq!(fixed.output, "//Invalid");
        assert!(fixed.errors.is_empty());
    }
}

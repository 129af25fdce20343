//! Disallows spaces just inside `(` and `)`.

use crate::autofix::TextEdit;
use crate::categorizer::{categorize_close_paren, categorize_open_paren, ParenCategory};
use crate::declare_rule;
use crate::diagnostic::Diagnostic;
use crate::errors::Errors;
use crate::file::SourceFile;
use crate::rule::{ConfigError, Rule};
use serde_json::Value;

declare_rule! {
    /// Disallows a space after an opening round bracket and before a closing
    /// one, on the same line.
    ///
    /// ```js
    /// // Incorrect
    /// f( a );
    ///
    /// // Correct
    /// f(a);
    /// ```
    ///
    /// `only` narrows the check to specific paren roles:
    /// `"statement"`, `"function"`, `"callExpression"`, `"grouping"`.
    DisallowSpacesInsideParentheses,
    "disallowSpacesInsideParentheses",
    pub only: Option<Vec<ParenCategory>>,
}

impl Default for DisallowSpacesInsideParentheses {
    fn default() -> Self {
        Self { only: None }
    }
}

fn category_from_name(name: &str) -> Option<ParenCategory> {
    match name {
        "statement" => Some(ParenCategory::Statement),
        "function" => Some(ParenCategory::Function),
        "callExpression" => Some(ParenCategory::CallExpression),
        "grouping" => Some(ParenCategory::ParenthesizedExpression),
        _ => None,
    }
}

impl DisallowSpacesInsideParentheses {
    fn applies_to(&self, category: ParenCategory) -> bool {
        match &self.only {
            None => true,
            Some(categories) => categories.contains(&category),
        }
    }
}

impl Rule for DisallowSpacesInsideParentheses {
    fn option_name(&self) -> &'static str {
        Self::OPTION_NAME
    }

    fn configure(&mut self, value: &Value) -> Result<(), ConfigError> {
        match value {
            Value::Bool(true) => {
                self.only = None;
                Ok(())
            }
            Value::Object(map) => {
                let list = map.get("only").and_then(|v| v.as_array()).ok_or_else(|| {
                    ConfigError::invalid(Self::OPTION_NAME, "expected `true` or `{\"only\": [...]}`")
                })?;
                let mut categories = Vec::new();
                for entry in list {
                    let name = entry.as_str().ok_or_else(|| {
                        ConfigError::invalid(Self::OPTION_NAME, "only entries must be strings")
                    })?;
                    categories.push(category_from_name(name).ok_or_else(|| {
                        ConfigError::invalid(
                            Self::OPTION_NAME,
                            format!("unknown paren category `{}`", name),
                        )
                    })?);
                }
                self.only = Some(categories);
                Ok(())
            }
            _ => Err(ConfigError::invalid(
                Self::OPTION_NAME,
                format!("expected `true` or `{{\"only\": [...]}}`, got `{}`", value),
            )),
        }
    }

    fn check(&self, file: &SourceFile, errors: &mut Errors) {
        file.iterate_token_by_value("(", |id, tok| {
            let next = match file.next_token(id, true) {
                Some(next) => next,
                None => return,
            };
            let next_tok = file.token(next);
            if next_tok.is_eof()
                || next_tok.loc.start.line != tok.loc.end.line
                || next_tok.range.start == tok.range.end
            {
                return;
            }
            if self.applies_to(categorize_open_paren(file, id)) {
                errors.add("Illegal space after opening round bracket", tok.loc.start);
            }
        });

        file.iterate_token_by_value(")", |id, tok| {
            let prev = match file.prev_token(id, true) {
                Some(prev) => prev,
                None => return,
            };
            let prev_tok = file.token(prev);
            if prev_tok.loc.end.line != tok.loc.start.line
                || prev_tok.range.end == tok.range.start
            {
                return;
            }
            if self.applies_to(categorize_close_paren(file, id)) {
                errors.add("Illegal space before closing round bracket", tok.loc.start);
            }
        });
    }

    fn can_fix(&self) -> bool {
        true
    }

    fn fix(&self, file: &SourceFile, diagnostic: &Diagnostic) -> Option<Vec<TextEdit>> {
        let paren = file.token_at(diagnostic.position())?;
        let tok = file.token(paren);
        if tok.is_punct("(") {
            let next = file.next_token(paren, true)?;
            Some(vec![TextEdit::delete(
                tok.range.end..file.token(next).range.start,
            )])
        } else if tok.is_punct(")") {
            let prev = file.prev_token(paren, true)?;
            Some(vec![TextEdit::delete(
                file.token(prev).range.end..tok.range.start,
            )])
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::rule_tests;
    use serde_json::json;

    rule_tests! {
        json!({ "disallowSpacesInsideParentheses": true }),
        err: {
            "f( a);",
            "f(a );",
            "if ( x) f(y);",
            "x = ( 1 + 2) * 3;",
            "function foo( a) {}",
        },
        ok: {
            "f(a);",
            "if (x) f(y);",
            "f();",
            "x = (1 + 2) * 3;",
            "f(\n    a\n);",
        }
    }

    rule_tests! {
        only_calls_valid,
        only_calls_invalid,
        json!({ "disallowSpacesInsideParentheses": { "only": ["callExpression"] } }),
        err: {
            "f( a );",
        },
        ok: {
            "if ( x ) f(y);",
            "x = ( 1 + 2 ) * 3;",
        }
    }

    #[test]
    fn fixes_both_sides() {
        let mut checker = crate::Checker::new();
        checker
            .configure(
                json!({ "disallowSpacesInsideParentheses": true })
                    .as_object()
                    .unwrap(),
            )
            .unwrap();
        let fixed = checker.fix_string("f( a );", "test.js");
        assert_eq!(fixed.output, "f(a);");
        assert!(fixed.errors.is_empty());
    }
}

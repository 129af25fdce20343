//! Disallows a comma after the final element of an object or array literal.

use crate::autofix::TextEdit;
use crate::declare_rule;
use crate::diagnostic::Diagnostic;
use crate::errors::Errors;
use crate::file::SourceFile;
use crate::rule::{ConfigError, Rule};
use jscs_syntax::NodeType;
use serde_json::Value;

declare_rule! {
    /// Disallows a trailing comma in object and array literals.
    ///
    /// ```js
    /// // Incorrect
    /// var x = {a: 1,};
    /// var y = [1, 2,];
    ///
    /// // Correct
    /// var x = {a: 1};
    /// var y = [1, 2];
    /// ```
    DisallowTrailingComma,
    "disallowTrailingComma",
}

impl Default for DisallowTrailingComma {
    fn default() -> Self {
        Self {}
    }
}

impl Rule for DisallowTrailingComma {
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
        file.iterate_nodes_by_type(
            &[NodeType::ObjectExpression, NodeType::ArrayExpression],
            |id, _| {
                let close = match file.last_token_of(id) {
                    Some(close) => close,
                    None => return true,
                };
                if let Some(prev) = file.prev_token(close, false) {
                    let prev_tok = file.token(prev);
                    if prev_tok.is_punct(",") {
                        errors.add(
                            "Extra comma following the final element of an array or object literal",
                            prev_tok.loc.start,
                        );
                    }
                }
                true
            },
        );
    }

    fn can_fix(&self) -> bool {
        true
    }

    fn fix(&self, file: &SourceFile, diagnostic: &Diagnostic) -> Option<Vec<TextEdit>> {
        let comma = file.token_at(diagnostic.position())?;
        let tok = file.token(comma);
        if !tok.is_punct(",") {
            return None;
        }
        Some(vec![TextEdit::delete(tok.range.clone())])
    }
}

#[cfg(test)]
mod tests {
    use crate::rule_tests;
    use serde_json::json;

    rule_tests! {
        json!({ "disallowTrailingComma": true }),
        err: {
            "x = {a: 1,};",
            "x = [1, 2,];",
            "({b: 2,})",
            "x = {a: {b: 2,}};",
            "x = [[1,],];",
        },
        ok: {
            "x = {a: 1};",
            "x = [1, 2];",
            "x = {};",
            "x = [];",
            "f(a, b);",
        }
    }

    #[test]
    fn reports_the_comma_position() {
        let mut checker = crate::Checker::new();
        checker
            .configure(json!({ "disallowTrailingComma": true }).as_object().unwrap())
            .unwrap();
        let errors = checker.check_string("({b: 2,})", "test.js");
        let list = errors.get_error_list();
        assert_eq!(list.len(), 1);
        assert_eq!((list[0].line, list[0].column), (1, 6));
    }
}

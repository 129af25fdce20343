//! Disallows quoted keys in object literals when the quotes are unnecessary.

use crate::autofix::TextEdit;
use crate::declare_rule;
use crate::diagnostic::Diagnostic;
use crate::errors::Errors;
use crate::file::SourceFile;
use crate::rule::{ConfigError, Rule};
use jscs_syntax::{NodeKind, NodeType};
use serde_json::Value;

declare_rule! {
    /// Disallows quotes around object keys that are valid identifier names.
    ///
    /// ```js
    /// // Incorrect
    /// var x = { "a": 1 };
    ///
    /// // Correct
    /// var x = { a: 1 };
    /// var y = { "a-b": 1 };
    /// ```
    ///
    /// `allExcept` lists key names that may stay quoted.
    DisallowQuotedKeysInObjects,
    "disallowQuotedKeysInObjects",
    pub all_except: Vec<String>,
}

impl Default for DisallowQuotedKeysInObjects {
    fn default() -> Self {
        Self {
            all_except: Vec::new(),
        }
    }
}

impl Rule for DisallowQuotedKeysInObjects {
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
        file.iterate_nodes_by_type(&[NodeType::Property], |_, node| {
            let key = match &node.kind {
                NodeKind::Property { key, .. } => *key,
                _ => return true,
            };
            let key_node = file.node(key);
            if let NodeKind::Literal { raw } = &key_node.kind {
                if let Some(inner) = unquote(raw) {
                    if !self.all_except.iter().any(|k| k == inner)
                        && is_identifier_name(inner)
                    {
                        errors.add("Extra quotes for key", key_node.loc.start);
                    }
                }
            }
            true
        });
    }

    fn can_fix(&self) -> bool {
        true
    }

    fn fix(&self, file: &SourceFile, diagnostic: &Diagnostic) -> Option<Vec<TextEdit>> {
        let key = file.token_at(diagnostic.position())?;
        let tok = file.token(key);
        let inner = unquote(&tok.value)?;
        if !is_identifier_name(inner) {
            return None;
        }
        Some(vec![TextEdit::replace(tok.range.clone(), inner)])
    }
}

/// The text between the quotes, if the raw literal is a simple quoted string
/// with no escapes.
fn unquote(raw: &str) -> Option<&str> {
    let first = raw.chars().next()?;
    if (first == '"' || first == '\'') && raw.len() >= 2 && raw.ends_with(first) {
        let inner = &raw[1..raw.len() - 1];
        if inner.contains('\\') || inner.contains(first) {
            None
        } else {
            Some(inner)
        }
    } else {
        None
    }
}

fn is_identifier_name(text: &str) -> bool {
    let mut chars = text.chars();
    match chars.next() {
        Some(c) if c == '_' || c == '$' || c.is_ascii_alphabetic() => {}
        _ => return false,
    }
    chars.all(|c| c == '_' || c == '$' || c.is_ascii_alphanumeric())
}

#[cfg(test)]
mod tests {
    use crate::rule_tests;
    use serde_json::json;

    rule_tests! {
        json!({ "disallowQuotedKeysInObjects": true }),
        err: {
            "var x = { 'a': 1 };",
            "var x = { \"a\": 1 };",
            "var x = { a: 1, 'b': 2 };",
            "var x = { '$special': 1 };",
        },
        ok: {
            "var x = { a: 1 };",
            "var x = { 'a-b': 1 };",
            "var x = { '1a': 1 };",
            "var x = { '': 1 };",
            "var x = { 'has space': 1 };",
            "var x = { 123: 1 };",
        }
    }

    rule_tests! {
        all_except_valid,
        all_except_invalid,
        json!({ "disallowQuotedKeysInObjects": { "allExcept": ["keep"] } }),
        err: {
            "var x = { 'other': 1 };",
        },
        ok: {
            "var x = { 'keep': 1 };",
        }
    }

    #[test]
    fn fixes_to_an_unquoted_key() {
        let mut checker = crate::Checker::new();
        checker
            .configure(
                json!({ "disallowQuotedKeysInObjects": true })
                    .as_object()
                    .unwrap(),
            )
            .unwrap();
        let fixed = checker.fix_string("var x = { \"a\": 1 };", "test.js");
        assert_eq!(fixed.output, "var x = { a: 1 };");
        assert!(fixed.errors.is_empty());
    }
}

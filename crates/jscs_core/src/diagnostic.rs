//! The positioned diagnostic produced by rules.

use jscs_syntax::Position;
use serde::Serialize;

/// One reported style violation.
///
/// This shape is stable: reporters and editor integrations consume it as-is.
/// `line` is 1-based, `column` is 0-based. `rule` names the owning rule's
/// option name, or `"parseError"` / `"internalError"` for issues the engine
/// itself produced.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Diagnostic {
    pub message: String,
    pub line: u32,
    pub column: u32,
    pub rule: Option<String>,
    /// Set by the fix loop: `Some(true)` once a fix was produced for this
    /// diagnostic, `Some(false)` when the owning rule declined.
    #[serde(skip)]
    pub(crate) fixed: Option<bool>,
}

impl Diagnostic {
    pub fn new(message: impl Into<String>, line: u32, column: u32) -> Self {
        Self {
            message: message.into(),
            line,
            column,
            rule: None,
            fixed: None,
        }
    }

    pub fn with_rule(mut self, rule: impl Into<String>) -> Self {
        self.rule = Some(rule.into());
        self
    }

    pub fn position(&self) -> Position {
        Position::new(self.line, self.column)
    }
}

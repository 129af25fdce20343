//! The per-file diagnostics collector.
//!
//! `Errors` is a pure accumulator: nothing here ever fails. Rules write into
//! it through [`add`](Errors::add)/[`cast`](Errors::cast) while the checker
//! tags them with the running rule via
//! [`set_current_rule`](Errors::set_current_rule), so rule implementations
//! never pass their own name around.

use crate::diagnostic::Diagnostic;
use colored::Colorize;
use jscs_syntax::Position;

#[derive(Debug, Clone, Default)]
pub struct Errors {
    filename: String,
    lines: Vec<String>,
    list: Vec<Diagnostic>,
    current_rule: Option<String>,
}

impl Errors {
    pub fn new(filename: impl Into<String>, source: &str) -> Self {
        Self {
            filename: filename.into(),
            lines: source.split('\n').map(|l| l.to_string()).collect(),
            list: Vec::new(),
            current_rule: None,
        }
    }

    /// Tag every subsequently added diagnostic with this rule name.
    pub fn set_current_rule(&mut self, name: impl Into<String>) {
        self.current_rule = Some(name.into());
    }

    pub(crate) fn clear_current_rule(&mut self) {
        self.current_rule = None;
    }

    /// Append a diagnostic at a position. Callers without a position pass
    /// `Position::default()` (line 1, column 0); this never fails.
    pub fn add(&mut self, message: impl Into<String>, position: Position) {
        let diagnostic = Diagnostic {
            message: message.into(),
            line: position.line,
            column: position.column,
            rule: self.current_rule.clone(),
            fixed: None,
        };
        self.list.push(diagnostic);
    }

    /// Append a pre-built diagnostic. The current rule is filled in unless
    /// the diagnostic already carries one.
    pub fn cast(&mut self, mut diagnostic: Diagnostic) {
        if diagnostic.rule.is_none() {
            diagnostic.rule = self.current_rule.clone();
        }
        self.list.push(diagnostic);
    }

    /// Keep only the diagnostics the predicate accepts, preserving order.
    pub fn filter(&mut self, mut predicate: impl FnMut(&Diagnostic) -> bool) {
        self.list.retain(|d| predicate(d));
    }

    /// Truncate to the first `max` diagnostics.
    pub fn strip_error_list(&mut self, max: usize) {
        self.list.truncate(max);
    }

    pub fn get_error_list(&self) -> &[Diagnostic] {
        &self.list
    }

    pub(crate) fn list_mut(&mut self) -> &mut Vec<Diagnostic> {
        &mut self.list
    }

    pub fn get_error_count(&self) -> usize {
        self.list.len()
    }

    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    pub fn get_filename(&self) -> &str {
        &self.filename
    }

    /// Render a diagnostic with up to two lines of context either side, a
    /// line-number gutter, and a pointer under the reported column.
    ///
    /// ```text
    /// 1 |if (a){
    /// 2 |	b=c;
    /// 3 |		c=d;
    /// -----^
    /// 4 |e=f;
    /// ```
    pub fn explain_error(&self, diagnostic: &Diagnostic, colorize: bool) -> String {
        let target = diagnostic.line as usize;
        let first = target.saturating_sub(2).max(1);
        let last = (target + 2).min(self.lines.len().max(1));
        let gutter_width = last.to_string().len();

        let mut out = String::new();
        for line_no in first..=last {
            let text = self
                .lines
                .get(line_no - 1)
                .map(|s| s.as_str())
                .unwrap_or("");
            let gutter = format!("{:>width$} |", line_no, width = gutter_width);
            if colorize {
                out.push_str(&format!("{}{}\n", gutter.green(), text));
            } else {
                out.push_str(&format!("{}{}\n", gutter, text));
            }
            if line_no == target {
                let pointer_len = gutter_width + 2 + diagnostic.column as usize;
                let pointer = format!("{}^", "-".repeat(pointer_len));
                if colorize {
                    out.push_str(&format!("{}\n", pointer.red()));
                } else {
                    out.push_str(&format!("{}\n", pointer));
                }
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collector() -> Errors {
        Errors::new("test.js", "var a;\nvar b;\nvar c;\nvar d;\nvar e;\n")
    }

    #[test]
    fn tags_diagnostics_with_the_current_rule() {
        let mut errors = collector();
        errors.add("untagged", Position::default());
        errors.set_current_rule("someRule");
        errors.add("tagged", Position::new(2, 4));

        let list = errors.get_error_list();
        assert_eq!(list[0].rule, None);
        assert_eq!(list[1].rule.as_deref(), Some("someRule"));
        assert_eq!((list[1].line, list[1].column), (2, 4));
    }

    #[test]
    fn cast_keeps_an_explicit_rule() {
        let mut errors = collector();
        errors.set_current_rule("someRule");
        errors.cast(Diagnostic::new("explicit", 1, 0).with_rule("parseError"));
        assert_eq!(errors.get_error_list()[0].rule.as_deref(), Some("parseError"));
    }

    #[test]
    fn strip_preserves_order() {
        let mut errors = collector();
        for i in 0..5 {
            errors.add(format!("e{}", i), Position::new(i + 1, 0));
        }
        errors.strip_error_list(3);
        let messages: Vec<_> = errors
            .get_error_list()
            .iter()
            .map(|d| d.message.as_str())
            .collect();
        assert_eq!(messages, ["e0", "e1", "e2"]);
    }

    #[test]
    fn explain_error_points_at_the_column() {
        let mut errors = collector();
        errors.add("oops", Position::new(3, 4));
        let rendered = errors.explain_error(&errors.get_error_list()[0], false);
        let lines: Vec<_> = rendered.lines().collect();
        assert_eq!(lines[0], "1 |var a;");
        assert_eq!(lines[2], "3 |var c;");
        // gutter is "3 |" (3 chars) + 4 columns
        assert_eq!(lines[3], "-------^");
        assert_eq!(lines.len(), 6);
    }
}

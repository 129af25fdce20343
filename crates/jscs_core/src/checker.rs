//! The checker: configures rules, runs them over source strings, and drives
//! the fix loop.
//!
//! Everything recoverable at file granularity (a parse failure, one rule
//! panicking) becomes a diagnostic and never escapes
//! [`check_string`](Checker::check_string)/[`fix_string`](Checker::fix_string).
//! Setup mistakes (unknown rule names, bad option shapes) fail fast from
//! [`configure`](Checker::configure) instead, so they cannot be masked by
//! per-file tolerance.

use crate::autofix::{apply_edits, runnable_edits, TaggedEdit, MAX_FIX_ITERATIONS};
use crate::diagnostic::Diagnostic;
use crate::directives::PragmaIndex;
use crate::errors::Errors;
use crate::file::SourceFile;
use crate::rule::{ConfigError, Rule};
use crate::store::RuleStore;
use jscs_syntax::Position;
use serde_json::{Map, Value};
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;

/// A user-supplied predicate deciding which diagnostics survive.
pub type ErrorFilter = Arc<dyn Fn(&Diagnostic) -> bool + Send + Sync>;

/// The result of [`Checker::fix_string`].
#[derive(Debug)]
pub struct FixResult {
    /// The corrected source text.
    pub output: String,
    /// Diagnostics that remained unfixable or were declined by their rule.
    pub errors: Errors,
}

#[derive(Clone)]
pub struct Checker {
    store: RuleStore,
    active: Vec<Box<dyn Rule>>,
    /// Whether panic payloads from misbehaving rules are included in their
    /// `internalError` diagnostics.
    verbose: bool,
    max_errors: Option<usize>,
    budget_used: usize,
    error_filter: Option<ErrorFilter>,
}

impl Default for Checker {
    fn default() -> Self {
        Self::new()
    }
}

impl Checker {
    /// A checker with every built in rule registered and none active.
    pub fn new() -> Self {
        Self::with_store(RuleStore::new().builtins())
    }

    pub fn with_store(store: RuleStore) -> Self {
        Self {
            store,
            active: Vec::new(),
            verbose: true,
            max_errors: None,
            budget_used: 0,
            error_filter: None,
        }
    }

    pub fn set_verbose(&mut self, verbose: bool) {
        self.verbose = verbose;
    }

    /// Install a predicate run over every diagnostic before it is returned.
    pub fn set_error_filter(&mut self, filter: ErrorFilter) {
        self.error_filter = Some(filter);
    }

    /// Configure the active rule set from a flat option map.
    ///
    /// Every key must name a registered rule (`maxErrors` is handled by the
    /// checker itself); unknown keys are a hard error. A key set to `false`
    /// or `null` deactivates the rule. Rules run in registration order, not
    /// config order.
    pub fn configure(&mut self, config: &Map<String, Value>) -> Result<(), ConfigError> {
        let mut configured: Vec<Box<dyn Rule>> = Vec::new();

        for (key, value) in config {
            if key == "maxErrors" {
                self.max_errors = match value {
                    Value::Number(n) => n.as_u64().filter(|n| *n > 0).map(|n| n as usize),
                    _ => None,
                };
                continue;
            }
            if value.is_null() || *value == Value::Bool(false) {
                continue;
            }
            match self.store.get(key) {
                Some(rule) => {
                    let mut rule = dyn_clone::clone_box(rule);
                    rule.configure(value)?;
                    configured.push(rule);
                }
                None => return Err(ConfigError::UnknownRule(key.clone())),
            }
        }

        // Registration order is run order.
        configured.sort_by_key(|rule| {
            self.store
                .rules
                .iter()
                .position(|r| r.option_name() == rule.option_name())
                .unwrap_or(usize::MAX)
        });
        self.active = configured;
        self.budget_used = 0;
        Ok(())
    }

    pub fn set_max_errors(&mut self, max: Option<usize>) {
        self.max_errors = max;
    }

    pub fn max_errors(&self) -> Option<usize> {
        self.max_errors
    }

    /// Re-arm the cumulative max-errors budget for a fresh logical run.
    pub fn reset_budget(&mut self) {
        self.budget_used = 0;
    }

    /// Check a source string, returning the surviving diagnostics.
    ///
    /// A parse failure yields exactly one `parseError` diagnostic; a rule
    /// that panics yields one `internalError` diagnostic and the remaining
    /// rules still run. The cumulative max-errors budget is debited across
    /// calls on this checker instance.
    pub fn check_string(&mut self, text: &str, filename: &str) -> Errors {
        let (_, mut errors) = self.run_rules(text, filename);

        if let Some(max) = self.max_errors {
            let remaining = max.saturating_sub(self.budget_used);
            errors.strip_error_list(remaining);
            self.budget_used += errors.get_error_count();
        }
        errors
    }

    /// Check and iteratively fix a source string.
    ///
    /// Each pass checks, asks every fixable diagnostic's rule for edits,
    /// applies the non-overlapping ones, re-parses, and re-checks; it stops
    /// when a pass produces nothing fixable (or after
    /// [`MAX_FIX_ITERATIONS`]). Diagnostics whose rules have no fix
    /// capability are returned untouched.
    pub fn fix_string(&mut self, text: &str, filename: &str) -> FixResult {
        let shebang = shebang_line(text);
        let mut current = text.to_string();
        let mut iterations = 0;

        let errors = loop {
            let (file, mut errors) = self.run_rules(&current, filename);
            let file = match file {
                Some(file) => file,
                // Unparseable (possibly a fix made it worse): stop here.
                None => break errors,
            };
            if iterations >= MAX_FIX_ITERATIONS {
                break errors;
            }

            let mut tagged: Vec<TaggedEdit> = Vec::new();
            let mut fix_failures: Vec<Diagnostic> = Vec::new();
            for diagnostic in errors.list_mut().iter_mut() {
                let rule = match &diagnostic.rule {
                    Some(name) => match self.active.iter().find(|r| r.option_name() == name) {
                        Some(rule) if rule.can_fix() => rule,
                        _ => continue,
                    },
                    None => continue,
                };

                let outcome = catch_unwind(AssertUnwindSafe(|| rule.fix(&file, diagnostic)));
                match outcome {
                    Ok(Some(edits)) if !edits.is_empty() => {
                        diagnostic.fixed = Some(true);
                        let tag = rule.option_name().to_string();
                        tagged.extend(edits.into_iter().map(|edit| TaggedEdit {
                            tag: tag.clone(),
                            edit,
                        }));
                    }
                    Ok(_) => diagnostic.fixed = Some(false),
                    Err(payload) => {
                        diagnostic.fixed = Some(false);
                        fix_failures.push(
                            Diagnostic::new(
                                format!(
                                    "Error running rule {}: {}",
                                    rule.option_name(),
                                    panic_message(&payload)
                                ),
                                diagnostic.line,
                                diagnostic.column,
                            )
                            .with_rule("internalError"),
                        );
                    }
                }
            }
            for failure in fix_failures {
                errors.cast(failure);
            }

            let runnable = runnable_edits(tagged);
            if runnable.is_empty() {
                break errors;
            }
            apply_edits(&runnable, &mut current);
            iterations += 1;
        };

        // The shebang was blanked for parsing; put it back.
        if let Some(shebang) = shebang {
            let first_line_end = current.find('\n').unwrap_or_else(|| current.len());
            current.replace_range(..first_line_end, &shebang);
        }

        FixResult {
            output: current,
            errors,
        }
    }

    /// Parse and run the active rules once. Returns the parsed file (for
    /// the fix loop) and the pragma- and filter-screened diagnostics.
    fn run_rules(&self, text: &str, filename: &str) -> (Option<SourceFile>, Errors) {
        let parse_input = blank_shebang(text);
        let mut errors = Errors::new(filename, &parse_input);

        let file = match SourceFile::parse(parse_input, filename) {
            Ok(file) => file,
            Err(err) => {
                errors.cast(
                    Diagnostic::new(err.message, err.line, err.column).with_rule("parseError"),
                );
                return (None, errors);
            }
        };

        for rule in &self.active {
            errors.set_current_rule(rule.option_name());
            let outcome = catch_unwind(AssertUnwindSafe(|| {
                let mut scratch = Errors::new(filename, file.source());
                scratch.set_current_rule(rule.option_name());
                rule.check(&file, &mut scratch);
                scratch
            }));
            match outcome {
                Ok(scratch) => {
                    for diagnostic in scratch.get_error_list() {
                        errors.cast(diagnostic.clone());
                    }
                }
                Err(payload) => {
                    let message = if self.verbose {
                        format!(
                            "Error running rule {}: {}",
                            rule.option_name(),
                            panic_message(&payload)
                        )
                    } else {
                        format!("Error running rule {}", rule.option_name())
                    };
                    errors.cast(Diagnostic::new(message, 1, 0).with_rule("internalError"));
                }
            }
        }
        errors.clear_current_rule();

        let pragmas = PragmaIndex::build(&file);
        if !pragmas.is_empty() {
            errors.filter(|d| match &d.rule {
                Some(rule) if rule != "parseError" && rule != "internalError" => {
                    pragmas.is_rule_enabled(rule, Position::new(d.line, d.column))
                }
                _ => true,
            });
        }
        if let Some(filter) = &self.error_filter {
            let filter = filter.clone();
            errors.filter(|d| filter(d));
        }

        (Some(file), errors)
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

/// The original shebang line, if any.
fn shebang_line(text: &str) -> Option<String> {
    if text.starts_with("#!") {
        let end = text.find('\n').unwrap_or_else(|| text.len());
        Some(text[..end].to_string())
    } else {
        None
    }
}

/// Replace a leading `#!` line with spaces so the parser never sees it while
/// every byte offset, line, and column stays put.
fn blank_shebang(text: &str) -> String {
    match shebang_line(text) {
        Some(shebang) => {
            let blank: String = shebang.chars().map(|_| ' ').collect();
            format!("{}{}", blank, &text[shebang.len()..])
        }
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn checker(config: serde_json::Value) -> Checker {
        let mut checker = Checker::new();
        checker
            .configure(config.as_object().expect("config must be an object"))
            .unwrap();
        checker
    }

    #[test]
    fn unknown_config_key_is_rejected() {
        let mut c = Checker::new();
        let config = json!({ "noSuchRuleHere": true });
        let err = c.configure(config.as_object().unwrap()).unwrap_err();
        assert_eq!(
            err,
            ConfigError::UnknownRule("noSuchRuleHere".to_string())
        );
    }

    #[test]
    fn parse_error_becomes_a_single_diagnostic() {
        let mut c = checker(json!({ "disallowTrailingComma": true }));
        let errors = c.check_string("function () {}", "broken.js");
        let list = errors.get_error_list();
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].rule.as_deref(), Some("parseError"));
        assert_eq!(list[0].message, "Unexpected token (");
        assert_eq!((list[0].line, list[0].column), (1, 9));
    }

    #[test]
    fn null_and_false_deactivate_a_rule() {
        let mut c = checker(json!({ "disallowTrailingComma": false }));
        let errors = c.check_string("x = {a: 1,};", "test.js");
        assert!(errors.is_empty());
    }

    #[test]
    fn shebang_is_ignored_but_lines_are_kept() {
        let mut c = checker(json!({ "disallowTrailingComma": true }));
        let errors = c.check_string("#!/usr/bin/env node\nx = {a: 1,};", "bin.js");
        let list = errors.get_error_list();
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].line, 2);
    }

    #[test]
    fn max_errors_budget_spans_calls() {
        let mut c = checker(json!({ "disallowTrailingComma": true, "maxErrors": 3 }));
        let src = "x = {a: 1,};\ny = [1, 2,];\n";
        assert_eq!(c.check_string(src, "a.js").get_error_count(), 2);
        assert_eq!(c.check_string(src, "b.js").get_error_count(), 1);
        assert_eq!(c.check_string(src, "c.js").get_error_count(), 0);
        c.reset_budget();
        assert_eq!(c.check_string(src, "d.js").get_error_count(), 2);
    }

    #[test]
    fn non_numeric_max_errors_disables_the_budget() {
        let mut c = checker(json!({ "disallowTrailingComma": true, "maxErrors": null }));
        let src = "x = {a: 1,};\ny = [1, 2,];\n";
        for _ in 0..5 {
            assert_eq!(c.check_string(src, "a.js").get_error_count(), 2);
        }
    }

    #[test]
    fn pragmas_suppress_and_reenable() {
        let mut c = checker(json!({ "disallowQuotedKeysInObjects": true }));
        let src = "//jscs:disable\n//jscs:enable someRuleName, disallowQuotedKeysInObjects\n\tvar x = { \"a\": 1 };";
        let errors = c.check_string(src, "test.js");
        assert_eq!(errors.get_error_count(), 1);
        assert_eq!(
            errors.get_error_list()[0].rule.as_deref(),
            Some("disallowQuotedKeysInObjects")
        );

        let suppressed = "//jscs:disable\nvar x = { \"a\": 1 };";
        let errors = c.check_string(suppressed, "test.js");
        assert!(errors.is_empty());
    }

    #[test]
    fn error_filter_runs_over_diagnostics() {
        let mut c = checker(json!({ "disallowTrailingComma": true }));
        c.set_error_filter(Arc::new(|d: &Diagnostic| d.line > 1));
        let errors = c.check_string("x = {a: 1,};\ny = [1,];\n", "test.js");
        assert_eq!(errors.get_error_count(), 1);
        assert_eq!(errors.get_error_list()[0].line, 2);
    }

    #[test]
    fn fix_string_is_idempotent() {
        let mut c = checker(json!({ "disallowTrailingComma": true }));
        let fixed = c.fix_string("({b: 2,})", "test.js");
        assert_eq!(fixed.output, "({b: 2})");
        assert!(fixed.errors.is_empty());

        let again = c.fix_string(&fixed.output, "test.js");
        assert_eq!(again.output, fixed.output);
        assert!(again.errors.is_empty());
    }

    #[test]
    fn fix_string_keeps_the_shebang() {
        let mut c = checker(json!({ "disallowTrailingComma": true }));
        let fixed = c.fix_string("#!/usr/bin/env node\nx = {a: 1,};", "bin.js");
        assert_eq!(fixed.output, "#!/usr/bin/env node\nx = {a: 1};");
    }

    #[test]
    fn unfixable_diagnostics_survive_the_fix_loop() {
        let mut c = checker(json!({
            "disallowTrailingComma": true,
            "maximumLineLength": 10
        }));
        let fixed = c.fix_string("var xy = {a: 1,}; // pretty long line", "test.js");
        assert!(!fixed.output.contains("1,}"));
        let rules: Vec<_> = fixed
            .errors
            .get_error_list()
            .iter()
            .filter_map(|d| d.rule.as_deref())
            .collect();
        assert_eq!(rules, ["maximumLineLength"]);
    }
}

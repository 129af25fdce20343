//! Validates indentation across nested block-like constructs.
//!
//! The algorithm runs in two passes. An annotation pass walks the syntax
//! tree once and marks, per line, how the indent stack changes there: a
//! construct's opening line pushes a level, the closing line pops it, and
//! every line starting a direct child gets checked. The validation pass then
//! walks the lines in order maintaining the stack of expected indentations,
//! reporting every line whose actual indentation disagrees — and treating
//! the actual as corrected from there on, so one bad line does not cascade.
//!
//! Function bodies push a two-candidate level (anchored at the body's
//! opening line or at the function's closing line) that is collapsed by the
//! first line checked against it: both anchorings are common for functions
//! passed as trailing call arguments. A switch's cases may sit at the
//! switch's own column or one level in; a case body may sit at the case's
//! column or one level in, inferred once per switch from its first `break`.

use crate::autofix::TextEdit;
use crate::declare_rule;
use crate::diagnostic::Diagnostic;
use crate::errors::Errors;
use crate::file::SourceFile;
use crate::rule::{ConfigError, Rule};
use jscs_syntax::{NodeId, NodeKind, NodeType, Position, SyntaxTree};
use serde_json::Value;

declare_rule! {
    /// Validates indentation of complex statements against a configured
    /// indent unit: a number of spaces, or `"\t"`.
    ///
    /// ```js
    /// // With "validateIndentation": "\t"
    /// if (a) {
    /// 	b();
    /// }
    /// ```
    ///
    /// `includeEmptyLines` also validates lines holding only whitespace;
    /// `allExcept: ["comments"]` skips lines starting with or inside a
    /// comment.
    ValidateIndentation,
    "validateIndentation",
    pub indent_char: char,
    pub indent_size: usize,
    pub include_empty_lines: bool,
    pub except_comments: bool,
}

impl Default for ValidateIndentation {
    fn default() -> Self {
        Self {
            indent_char: ' ',
            indent_size: 4,
            include_empty_lines: false,
            except_comments: false,
        }
    }
}

/// How a construct's opening line grows the indent stack.
#[derive(Debug, Clone)]
enum Push {
    /// `actual + levels * unit`.
    Levels(usize),
    /// `actual + chars`; used for aligned `var` declarators.
    Chars(usize),
    /// Two candidates: anchored at this line or at `alt_line` (function
    /// bodies as trailing call arguments mix both anchorings).
    Alt { levels: usize, alt_line: usize },
    /// The module-pattern wrapper body may legally stay unindented.
    ModulePattern,
}

/// Per-line stack effects gathered by the annotation pass.
#[derive(Debug, Clone, Default)]
struct LineRecord {
    pushes: Vec<Push>,
    /// Pops whose closing token starts the line: pop first, then validate
    /// this line against the outdented value (`} else {` etc).
    pops_before: Vec<usize>,
    /// Pops applied only after this line's check: the last line of a case
    /// body validates at the inner level, then pops for the next case.
    pops_after: usize,
    check: bool,
}

/// An expected indentation: settled, or an unresolved candidate pair.
#[derive(Debug, Clone, Copy)]
enum Level {
    Exact(isize),
    Either(isize, isize),
}

impl Level {
    fn offset(self, delta: isize) -> Level {
        match self {
            Level::Exact(a) => Level::Exact(a + delta),
            Level::Either(a, b) => Level::Either(a + delta, b + delta),
        }
    }

    /// Collapse against an actual indentation: whichever candidate matches
    /// wins, the first by default.
    fn resolve(self, actual: isize) -> isize {
        match self {
            Level::Exact(a) => a,
            Level::Either(a, b) => {
                if actual == b {
                    b
                } else {
                    a
                }
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Issue {
    /// 0-based line index.
    line: usize,
    expected: usize,
    actual: usize,
}

/// Walk-scoped state for one validation run; never stored on the rule.
struct Annotator<'f> {
    file: &'f SourceFile,
    records: Vec<LineRecord>,
}

fn start_line(tree: &SyntaxTree, id: NodeId) -> usize {
    tree.node(id).loc.start.line as usize - 1
}

fn end_line(tree: &SyntaxTree, id: NodeId) -> usize {
    tree.node(id).loc.end.line as usize - 1
}

fn is_multiline(tree: &SyntaxTree, id: NodeId) -> bool {
    start_line(tree, id) != end_line(tree, id)
}

/// Leading whitespace width in chars (spaces and tabs).
fn line_whitespace_len(line: &str) -> usize {
    line.chars().take_while(|c| *c == ' ' || *c == '\t').count()
}

impl<'f> Annotator<'f> {
    fn new(file: &'f SourceFile) -> Self {
        Self {
            records: vec![LineRecord::default(); file.lines().len()],
            file,
        }
    }

    fn tree(&self) -> &SyntaxTree {
        self.file.tree()
    }

    fn mark_check(&mut self, line: usize) {
        self.records[line].check = true;
    }

    fn mark_push(&mut self, line: usize, push: Push) {
        self.records[line].pushes.push(push);
    }

    /// Record a construct's close. When the closing token starts its line
    /// the line validates against the outdented value; otherwise the pop
    /// happens after whatever check the line already has.
    fn mark_close(&mut self, id: NodeId, levels: usize) {
        let line = end_line(self.tree(), id);
        let close_starts_line = self
            .file
            .last_token_of(id)
            .map(|tok| {
                let tok = self.file.token(tok);
                tok.loc.start.line as usize - 1 == line
                    && tok.loc.start.column as usize
                        == line_whitespace_len(&self.file.lines()[line])
            })
            .unwrap_or(false);
        if close_starts_line {
            self.records[line].pops_before.push(levels);
        } else {
            self.records[line].pops_after += 1;
        }
    }

    /// Mark `check` on every direct child starting below the construct's
    /// opening line.
    fn mark_children(&mut self, open_line: usize, children: &[NodeId]) {
        for &child in children {
            let line = start_line(self.tree(), child);
            if line != open_line {
                self.mark_check(line);
            }
        }
    }

    fn annotate(mut self) -> Vec<LineRecord> {
        let ids: Vec<NodeId> = {
            let mut out = Vec::new();
            self.tree().walk(|id, _| {
                out.push(id);
                true
            });
            out
        };
        for id in ids {
            match self.tree().node(id).ty() {
                NodeType::Program => self.annotate_program(id),
                NodeType::BlockStatement => self.annotate_block(id),
                NodeType::ObjectExpression | NodeType::ArrayExpression => {
                    self.annotate_literal(id)
                }
                NodeType::SwitchStatement => self.annotate_switch(id),
                NodeType::VariableDeclaration => self.annotate_var(id),
                _ => {}
            }
        }
        self.records
    }

    fn annotate_program(&mut self, id: NodeId) {
        let children = match &self.tree().node(id).kind {
            NodeKind::Program { body } => body.clone(),
            _ => return,
        };
        self.mark_children(0, &children);
    }

    fn annotate_block(&mut self, id: NodeId) {
        if !is_multiline(self.tree(), id) {
            return;
        }
        let children = match &self.tree().node(id).kind {
            NodeKind::BlockStatement { body } => body.clone(),
            _ => return,
        };
        let open = start_line(self.tree(), id);

        let parent = self.tree().parent(id);
        let push = match parent {
            Some(parent) if self.tree().node(parent).is_function() => {
                if self.is_module_pattern(parent) {
                    Push::ModulePattern
                } else {
                    Push::Alt {
                        levels: 1,
                        alt_line: end_line(self.tree(), parent),
                    }
                }
            }
            _ => Push::Levels(1),
        };
        self.mark_push(open, push);
        self.mark_children(open, &children);
        self.mark_close(id, 1);
    }

    fn annotate_literal(&mut self, id: NodeId) {
        if !is_multiline(self.tree(), id) {
            return;
        }
        let children: Vec<NodeId> = match &self.tree().node(id).kind {
            NodeKind::ObjectExpression { properties } => properties.clone(),
            NodeKind::ArrayExpression { elements } => elements.iter().filter_map(|e| *e).collect(),
            _ => return,
        };
        let open = start_line(self.tree(), id);
        self.mark_push(open, Push::Levels(1));
        self.mark_children(open, &children);
        self.mark_close(id, 1);
    }

    fn annotate_switch(&mut self, id: NodeId) {
        if !is_multiline(self.tree(), id) {
            return;
        }
        let cases = match &self.tree().node(id).kind {
            NodeKind::SwitchStatement { cases, .. } => cases.clone(),
            _ => return,
        };
        let open = start_line(self.tree(), id);
        let switch_column = self.tree().node(id).loc.start.column;

        // Cases aligned with the switch keyword introduce no level.
        let case_levels = match cases.first() {
            Some(&first) if self.tree().node(first).loc.start.column == switch_column => 0,
            Some(_) => 1,
            None => 1,
        };
        self.mark_push(open, Push::Levels(case_levels));
        self.mark_children(open, &cases);
        self.mark_close(id, case_levels);

        // Whether case bodies sit one level in or at the case's own column,
        // decided once per switch by its first `break`.
        let body_levels = self.infer_case_body_levels(&cases);
        for &case in &cases {
            self.annotate_case(case, body_levels);
        }
    }

    fn infer_case_body_levels(&self, cases: &[NodeId]) -> usize {
        for &case in cases {
            let consequent = match &self.tree().node(case).kind {
                NodeKind::SwitchCase { consequent, .. } => consequent,
                _ => continue,
            };
            for &stmt in consequent {
                if self.tree().node(stmt).ty() == NodeType::BreakStatement {
                    let case_line = start_line(self.tree(), case);
                    let break_line = start_line(self.tree(), stmt);
                    if break_line == case_line {
                        continue;
                    }
                    let lines = self.file.lines();
                    let case_indent = line_whitespace_len(&lines[case_line]);
                    let break_indent = line_whitespace_len(&lines[break_line]);
                    return if break_indent == case_indent { 0 } else { 1 };
                }
            }
        }
        1
    }

    fn annotate_case(&mut self, id: NodeId, body_levels: usize) {
        let consequent = match &self.tree().node(id).kind {
            NodeKind::SwitchCase { consequent, .. } => consequent.clone(),
            _ => return,
        };
        if consequent.is_empty() {
            // Fallthrough case: shares the next case's level.
            return;
        }
        // A single block body indents through the block's own marks.
        if consequent.len() == 1
            && self.tree().node(consequent[0]).ty() == NodeType::BlockStatement
        {
            return;
        }
        let case_line = start_line(self.tree(), id);
        let last_line = end_line(self.tree(), id);
        if last_line == case_line {
            return;
        }
        if body_levels > 0 {
            self.mark_push(case_line, Push::Levels(body_levels));
            self.records[last_line].pops_after += 1;
        }
        self.mark_children(case_line, &consequent);
    }

    fn annotate_var(&mut self, id: NodeId) {
        let declarations = match &self.tree().node(id).kind {
            NodeKind::VariableDeclaration { declarations, .. } => declarations.clone(),
            _ => return,
        };
        if declarations.len() < 2 {
            return;
        }
        let decl_line = start_line(self.tree(), id);
        let later: Vec<NodeId> = declarations
            .iter()
            .copied()
            .filter(|&d| start_line(self.tree(), d) != decl_line)
            .collect();
        let first_later = match later.first() {
            Some(&d) => d,
            None => return,
        };

        // Aligned declarators indent by the declaration's own offset, which
        // is legally a non-multiple of the indent unit.
        let anchor = line_whitespace_len(&self.file.lines()[decl_line]);
        let chars = (self.tree().node(first_later).loc.start.column as usize).saturating_sub(anchor);
        self.mark_push(decl_line, Push::Chars(chars));
        self.mark_children(decl_line, &later);
        let end = end_line(self.tree(), id);
        self.records[end].pops_after += 1;
    }

    /// A top-level IIFE or AMD `define`/`require` wrapper: the program's
    /// single statement immediately invokes this function expression (or
    /// passes it to define/require), so its body may legally stay
    /// unindented.
    fn is_module_pattern(&self, func: NodeId) -> bool {
        let tree = self.tree();
        if tree.node(func).ty() != NodeType::FunctionExpression {
            return false;
        }
        match &tree.node(tree.root()).kind {
            NodeKind::Program { body } if body.len() == 1 => {}
            _ => return false,
        }
        let parent = match tree.parent(func) {
            Some(parent) => parent,
            None => return false,
        };
        match &tree.node(parent).kind {
            NodeKind::CallExpression { callee, arguments } => {
                if *callee == func {
                    return true;
                }
                if arguments.contains(&func) {
                    if let NodeKind::Identifier { name } = &tree.node(*callee).kind {
                        return name == "define" || name == "require";
                    }
                }
                false
            }
            // `(function() {}).call(this)`
            NodeKind::MemberExpression { object, .. } => *object == func,
            // `!function() {}()`
            NodeKind::UnaryExpression { .. } => true,
            _ => false,
        }
    }
}

impl ValidateIndentation {
    fn leading_units(&self, line: &str) -> usize {
        line.chars().take_while(|c| *c == self.indent_char).count()
    }

    fn unit(&self) -> isize {
        self.indent_size as isize
    }

    /// Lines holding only whitespace or led by comments may be exempt.
    fn line_exempt(&self, file: &SourceFile, idx: usize, line: &str) -> bool {
        if line.trim().is_empty() {
            return !self.include_empty_lines;
        }
        if self.except_comments {
            let line_no = (idx + 1) as u32;
            for (_, tok) in file.comments() {
                if tok.loc.start.line < line_no && tok.loc.end.line >= line_no {
                    return true;
                }
                if tok.loc.start.line == line_no
                    && tok.loc.start.column as usize == line_whitespace_len(line)
                {
                    return true;
                }
            }
        }
        false
    }

    /// The two-pass run shared by check and fix.
    fn run(&self, file: &SourceFile) -> Vec<Issue> {
        let records = Annotator::new(file).annotate();
        let lines = file.lines();

        let mut stack: Vec<Level> = vec![Level::Exact(0)];
        let mut issues = Vec::new();

        for (idx, record) in records.iter().enumerate() {
            let line = &lines[idx];
            let mut actual = self.leading_units(line) as isize;

            let mut popped_expected = None;
            for &levels in &record.pops_before {
                if stack.len() > 1 {
                    let popped = stack.pop().unwrap();
                    popped_expected = Some(popped.offset(-(levels as isize) * self.unit()));
                }
            }

            let empty_line_check = self.include_empty_lines && line.trim().is_empty();
            let validate = record.check || !record.pops_before.is_empty() || empty_line_check;

            if validate && !self.line_exempt(file, idx, line) {
                let expected = match popped_expected {
                    Some(level) => level.resolve(actual),
                    None => {
                        let top = stack.last_mut().unwrap();
                        let resolved = top.resolve(actual);
                        *top = Level::Exact(resolved);
                        resolved
                    }
                };
                if expected >= 0 && actual != expected {
                    issues.push(Issue {
                        line: idx,
                        expected: expected as usize,
                        actual: actual as usize,
                    });
                    // Validate the rest of the file against the corrected
                    // baseline instead of cascading this error.
                    actual = expected;
                }
            }

            for _ in 0..record.pops_after {
                if stack.len() > 1 {
                    stack.pop();
                }
            }

            for push in &record.pushes {
                let level = match push {
                    Push::Levels(levels) => Level::Exact(actual + (*levels as isize) * self.unit()),
                    Push::Chars(chars) => Level::Exact(actual + *chars as isize),
                    Push::Alt { levels, alt_line } => {
                        let delta = (*levels as isize) * self.unit();
                        let alt =
                            lines.get(*alt_line).map_or(0, |l| self.leading_units(l)) as isize;
                        if actual == alt {
                            Level::Exact(actual + delta)
                        } else {
                            Level::Either(actual + delta, alt + delta)
                        }
                    }
                    Push::ModulePattern => Level::Either(actual, actual + self.unit()),
                };
                stack.push(level);
            }
        }
        issues
    }
}

impl Rule for ValidateIndentation {
    fn option_name(&self) -> &'static str {
        Self::OPTION_NAME
    }

    fn configure(&mut self, value: &Value) -> Result<(), ConfigError> {
        let unit = match value {
            Value::Object(map) => {
                if let Some(include) = map.get("includeEmptyLines") {
                    self.include_empty_lines = include.as_bool().ok_or_else(|| {
                        ConfigError::invalid(Self::OPTION_NAME, "`includeEmptyLines` must be a boolean")
                    })?;
                }
                if let Some(except) = map.get("allExcept") {
                    let list = except.as_array().ok_or_else(|| {
                        ConfigError::invalid(Self::OPTION_NAME, "`allExcept` must be an array")
                    })?;
                    for entry in list {
                        match entry.as_str() {
                            Some("comments") => self.except_comments = true,
                            other => {
                                return Err(ConfigError::invalid(
                                    Self::OPTION_NAME,
                                    format!("unknown allExcept entry `{:?}`", other),
                                ))
                            }
                        }
                    }
                }
                map.get("value").cloned().ok_or_else(|| {
                    ConfigError::invalid(Self::OPTION_NAME, "`value` is required")
                })?
            }
            other => other.clone(),
        };

        match unit {
            Value::Number(n) => {
                let size = n.as_u64().filter(|n| *n > 0).ok_or_else(|| {
                    ConfigError::invalid(Self::OPTION_NAME, "expected a positive number of spaces")
                })?;
                self.indent_char = ' ';
                self.indent_size = size as usize;
                Ok(())
            }
            Value::String(s) if s == "\t" => {
                self.indent_char = '\t';
                self.indent_size = 1;
                Ok(())
            }
            other => Err(ConfigError::invalid(
                Self::OPTION_NAME,
                format!("expected a number of spaces or \"\\t\", got `{}`", other),
            )),
        }
    }

    fn check(&self, file: &SourceFile, errors: &mut Errors) {
        for issue in self.run(file) {
            errors.add(
                format!("Expected indentation of {} characters", issue.expected),
                Position::new(issue.line as u32 + 1, issue.actual as u32),
            );
        }
    }

    fn can_fix(&self) -> bool {
        true
    }

    fn fix(&self, file: &SourceFile, diagnostic: &Diagnostic) -> Option<Vec<TextEdit>> {
        let target = diagnostic.line as usize - 1;
        let issue = self.run(file).into_iter().find(|i| i.line == target)?;

        let mut offset = 0;
        for line in file.lines().iter().take(target) {
            offset += line.len() + 1;
        }
        let line = &file.lines()[target];
        let whitespace_len: usize = line
            .chars()
            .take_while(|c| *c == ' ' || *c == '\t')
            .map(|c| c.len_utf8())
            .sum();

        Some(vec![TextEdit::replace(
            offset..offset + whitespace_len,
            self.indent_char.to_string().repeat(issue.expected),
        )])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rule_tests;
    use serde_json::json;

    fn check(config: serde_json::Value, src: &str) -> Vec<(u32, String)> {
        let mut checker = crate::Checker::new();
        checker.configure(config.as_object().unwrap()).unwrap();
        checker
            .check_string(src, "test.js")
            .get_error_list()
            .iter()
            .map(|d| (d.line, d.message.clone()))
            .collect()
    }

    fn fix(config: serde_json::Value, src: &str) -> String {
        let mut checker = crate::Checker::new();
        checker.configure(config.as_object().unwrap()).unwrap();
        let result = checker.fix_string(src, "test.js");
        assert!(
            result.errors.is_empty(),
            "expected a clean fix, got {:#?}",
            result.errors.get_error_list()
        );
        result.output
    }

    #[test]
    fn tab_indented_block_reports_both_bad_lines() {
        let issues = check(
            json!({ "validateIndentation": "\t" }),
            "if (a){\n\tb=c;\n\t\tc=d;\ne=f;\n}",
        );
        assert_eq!(
            issues,
            vec![
                (3, "Expected indentation of 1 characters".to_string()),
                (4, "Expected indentation of 1 characters".to_string()),
            ]
        );
    }

    #[test]
    fn fixing_indentation_round_trips() {
        let fixed = fix(
            json!({ "validateIndentation": "\t" }),
            "if (a){\n\tb=c;\n\t\tc=d;\ne=f;\n}",
        );
        assert_eq!(fixed, "if (a){\n\tb=c;\n\tc=d;\n\te=f;\n}");
        assert!(check(json!({ "validateIndentation": "\t" }), &fixed).is_empty());
    }

    rule_tests! {
        json!({ "validateIndentation": 4 }),
        err: {
            "if (a) {\n  b();\n}",
            "if (a) {\n        b();\n}",
            "if (a) {\n    b();\n  }",
            "var x = {\n  a: 1\n};",
            "a();\n    b();",
            "switch (a) {\n    case 1:\n            b();\n}",
        },
        ok: {
            "if (a) {\n    b();\n}",
            "if (a) {\n    b();\n} else {\n    c();\n}",
            "var x = {\n    a: 1,\n    b: 2\n};",
            "var x = [\n    1,\n    2\n];",
            "while (a) {\n    b();\n}",
            "try {\n    a();\n} catch (e) {\n    b();\n}",
            "if (a) { b(); }",
            "function f() {\n    return 1;\n}",
        }
    }

    rule_tests! {
        switch_valid,
        switch_invalid,
        json!({ "validateIndentation": 2 }),
        err: {
            "switch (a) {\n  case 1:\n      b();\n    break;\n}",
            "switch (a) {\ncase 1:\n    b();\n  break;\n}",
        },
        ok: {
            // Cases one level in, bodies one further.
            "switch (a) {\n  case 1:\n    b();\n    break;\n  case 2:\n  default:\n    c();\n}",
            // Cases aligned with the switch keyword.
            "switch (a) {\ncase 1:\n  b();\n  break;\ncase 2:\n  c();\n}",
            // Bodies aligned with their cases, inferred from the break.
            "switch (a) {\n  case 1:\n  b();\n  break;\n  case 2:\n  c();\n}",
            // Single block body indents as a block.
            "switch (a) {\n  case 1: {\n    b();\n  }\n}",
        }
    }

    rule_tests! {
        functions_valid,
        functions_invalid,
        json!({ "validateIndentation": 2 }),
        err: {
            "function f() {\n      a();\n}",
        },
        ok: {
            "function f() {\n  a();\n}",
            // Body anchored at the call's closing line.
            "foo(a, b, function() {\n    x();\n  });",
            // Body anchored at its own opening line.
            "foo(a, b, function() {\n  x();\n});",
            "promise.then(\n  function() {\n    x();\n  }\n);",
        }
    }

    rule_tests! {
        module_pattern_valid,
        module_pattern_invalid,
        json!({ "validateIndentation": 2 }),
        err: {
            "(function() {\n   misaligned();\n})();",
        },
        ok: {
            // The idiomatic unindented wrapper.
            "(function() {\nvar a = 1;\nif (a) {\n  b();\n}\n})();",
            // And the indented form of the same wrapper.
            "(function() {\n  var a = 1;\n})();",
            "define(['a'], function(a) {\nvar b = 1;\n});",
        }
    }

    rule_tests! {
        var_alignment_valid,
        var_alignment_invalid,
        json!({ "validateIndentation": 2 }),
        err: {
            // The first aligned declarator sets the level; later ones must
            // match it.
            "var first = 1,\n    second = 2,\n  third = 3;",
        },
        ok: {
            "var first = 1,\n    second = 2;",
            "var first = 1,\n    second = 2,\n    third = 3;",
            "function f() {\n  var a = 1,\n      b = 2;\n  return a;\n}",
        }
    }

    rule_tests! {
        empty_lines_valid,
        empty_lines_invalid,
        json!({ "validateIndentation": { "value": 2, "includeEmptyLines": true } }),
        err: {
            "if (a) {\n  b();\n\n  c();\n}",
        },
        ok: {
            "if (a) {\n  b();\n  \n  c();\n}",
        }
    }

    rule_tests! {
        comments_valid,
        comments_invalid,
        json!({ "validateIndentation": { "value": 2, "allExcept": ["comments"] } }),
        err: {
            // Ordinary misindentation is still flagged.
            "if (a) {\nb();\n}",
        },
        ok: {
            // A comment-led line is exempt.
            "if (a) {\n/* x */ b();\n}",
            "if (a) {\n  b();\n}",
        }
    }

    #[test]
    fn comment_led_lines_are_checked_without_the_exemption() {
        let issues = check(
            json!({ "validateIndentation": 2 }),
            "if (a) {\n/* x */ b();\n}",
        );
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].0, 2);
    }

    #[test]
    fn nested_literals_on_one_line_share_a_level() {
        let issues = check(
            json!({ "validateIndentation": 2 }),
            "var x = [{\n  a: 1\n}];",
        );
        assert!(issues.is_empty(), "{:?}", issues);
    }

    #[test]
    fn else_on_the_closing_line_validates_both_sides() {
        let issues = check(
            json!({ "validateIndentation": 2 }),
            "if (a) {\n  b();\n} else {\n  c();\n}",
        );
        assert!(issues.is_empty(), "{:?}", issues);

        let issues = check(
            json!({ "validateIndentation": 2 }),
            "if (a) {\n  b();\n  } else {\n  c();\n}",
        );
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].0, 3);
    }
}

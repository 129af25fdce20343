//! Requires lines to stay under a maximum length.

use crate::declare_rule;
use crate::errors::Errors;
use crate::file::SourceFile;
use crate::rule::{ConfigError, Rule};
use jscs_syntax::{Position, TokenType};
use serde_json::Value;

declare_rule! {
    /// Requires every line to be at most `value` characters long.
    ///
    /// Tabs count as `tabSize` characters. `allExcept` may list
    /// `"comments"` (lines that are entirely comments), `"urlComments"`
    /// (comment lines containing a URL), and `"regex"` (lines containing a
    /// regex literal).
    MaximumLineLength,
    "maximumLineLength",
    pub value: usize,
    pub tab_size: usize,
    pub all_except: Vec<String>,
}

impl Default for MaximumLineLength {
    fn default() -> Self {
        Self {
            value: 100,
            tab_size: 1,
            all_except: Vec::new(),
        }
    }
}

impl MaximumLineLength {
    fn excepts(&self, what: &str) -> bool {
        self.all_except.iter().any(|e| e == what)
    }

    fn line_width(&self, line: &str) -> usize {
        line.chars()
            .map(|c| if c == '\t' { self.tab_size } else { 1 })
            .sum()
    }
}

impl Rule for MaximumLineLength {
    fn option_name(&self) -> &'static str {
        Self::OPTION_NAME
    }

    fn configure(&mut self, value: &Value) -> Result<(), ConfigError> {
        match value {
            Value::Number(n) => {
                self.value = n.as_u64().ok_or_else(|| {
                    ConfigError::invalid(Self::OPTION_NAME, "expected a positive integer")
                })? as usize;
                Ok(())
            }
            Value::Object(map) => {
                self.value = map
                    .get("value")
                    .and_then(|v| v.as_u64())
                    .ok_or_else(|| {
                        ConfigError::invalid(Self::OPTION_NAME, "`value` must be a positive integer")
                    })? as usize;
                if let Some(tab_size) = map.get("tabSize") {
                    self.tab_size = tab_size.as_u64().ok_or_else(|| {
                        ConfigError::invalid(Self::OPTION_NAME, "`tabSize` must be a positive integer")
                    })? as usize;
                }
                if let Some(list) = map.get("allExcept") {
                    let list = list.as_array().ok_or_else(|| {
                        ConfigError::invalid(Self::OPTION_NAME, "`allExcept` must be an array")
                    })?;
                    self.all_except = list
                        .iter()
                        .map(|v| {
                            v.as_str().map(|s| s.to_string()).ok_or_else(|| {
                                ConfigError::invalid(
                                    Self::OPTION_NAME,
                                    "allExcept entries must be strings",
                                )
                            })
                        })
                        .collect::<Result<_, _>>()?;
                }
                Ok(())
            }
            _ => Err(ConfigError::invalid(
                Self::OPTION_NAME,
                format!("expected a number or an options object, got `{}`", value),
            )),
        }
    }

    fn check(&self, file: &SourceFile, errors: &mut Errors) {
        for (idx, line) in file.lines().iter().enumerate() {
            if self.line_width(line) <= self.value {
                continue;
            }
            let line_no = (idx + 1) as u32;

            if self.excepts("comments") && line_is_comment(file, line_no) {
                continue;
            }
            if self.excepts("urlComments") && line_has_url_comment(file, line_no) {
                continue;
            }
            if self.excepts("regex") && line_has_regex(file, line_no) {
                continue;
            }

            errors.add(
                format!("Line must be at most {} characters", self.value),
                Position::new(line_no, 0),
            );
        }
    }
}

/// Whether every token touching the line is a comment.
fn line_is_comment(file: &SourceFile, line: u32) -> bool {
    let mut any = false;
    for (_, tok) in file.tokens() {
        if tok.is_eof() || tok.loc.end.line < line {
            continue;
        }
        if tok.loc.start.line > line {
            break;
        }
        if !tok.is_comment() {
            return false;
        }
        any = true;
    }
    any
}

fn line_has_url_comment(file: &SourceFile, line: u32) -> bool {
    file.comments().any(|(_, tok)| {
        tok.loc.start.line <= line && line <= tok.loc.end.line && tok.value.contains("://")
    })
}

fn line_has_regex(file: &SourceFile, line: u32) -> bool {
    file.tokens().any(|(_, tok)| {
        tok.ty == TokenType::RegularExpression && tok.loc.start.line == line
    })
}

#[cfg(test)]
mod tests {
    use crate::rule_tests;
    use serde_json::json;

    rule_tests! {
        json!({ "maximumLineLength": 20 }),
        err: {
            "var someLongName = 100000;",
            "a = 1;\nvar someLongName = 100000;",
        },
        ok: {
            "var a = 1;",
            "a = 1;\nb = 2;\nc = 3;",
        }
    }

    rule_tests! {
        tabs_valid,
        tabs_invalid,
        json!({ "maximumLineLength": { "value": 10, "tabSize": 4 } }),
        err: {
            "\t\tvar abc;",
        },
        ok: {
            "\tvar a;",
        }
    }

    rule_tests! {
        except_valid,
        except_invalid,
        json!({ "maximumLineLength": { "value": 15, "allExcept": ["comments", "urlComments", "regex"] } }),
        err: {
            "var tooLongStatement = 1;",
        },
        ok: {
            "// this comment line is much too long but exempt",
            "a = 1; // see https://example.com/a/very/long/path",
            "re = /something quite long here/;",
        }
    }
}

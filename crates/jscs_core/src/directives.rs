//! Pragma comments that toggle rules over a range of the file.
//!
//! The wire format is stable and user facing:
//!
//! ```text
//! // jscs:disable ruleA, ruleB
//! // jscs:enable
//! /* jscs:disable */
//! ```
//!
//! A `disable` with no rule list disables every rule until a matching
//! `enable`; an `enable` with a rule list re-enables only those rules, even
//! inside a disable-all region. Whitespace around the directive and inside
//! the rule list is tolerated, in both comment forms.

use crate::file::SourceFile;
use jscs_syntax::Position;
use std::collections::HashMap;

const PRAGMA_PREFIX: &str = "jscs:";

#[derive(Debug, Clone)]
struct Toggle {
    position: Position,
    enable: bool,
    /// `None` means "all rules".
    rules: Option<Vec<String>>,
}

/// All pragma toggles of one file, in source order.
#[derive(Debug, Clone, Default)]
pub struct PragmaIndex {
    toggles: Vec<Toggle>,
}

impl PragmaIndex {
    pub fn build(file: &SourceFile) -> Self {
        let mut toggles = Vec::new();
        for (_, token) in file.comments() {
            if let Some(toggle) = parse_pragma(&token.value, token.loc.start) {
                toggles.push(toggle);
            }
        }
        Self { toggles }
    }

    pub fn is_empty(&self) -> bool {
        self.toggles.is_empty()
    }

    /// Whether `rule` is enabled at `position`, replaying every toggle that
    /// appears at or before it.
    pub fn is_rule_enabled(&self, rule: &str, position: Position) -> bool {
        let mut disabled_all = false;
        let mut explicit: HashMap<&str, bool> = HashMap::new();

        for toggle in self
            .toggles
            .iter()
            .take_while(|t| t.position <= position)
        {
            match &toggle.rules {
                None => {
                    disabled_all = !toggle.enable;
                    explicit.clear();
                }
                Some(rules) => {
                    for name in rules {
                        explicit.insert(name.as_str(), toggle.enable);
                    }
                }
            }
        }

        explicit.get(rule).copied().unwrap_or(!disabled_all)
    }
}

fn parse_pragma(comment: &str, position: Position) -> Option<Toggle> {
    let text = comment.trim();
    let rest = text.strip_prefix(PRAGMA_PREFIX)?.trim_start();

    let (enable, tail) = if let Some(tail) = rest.strip_prefix("disable") {
        (false, tail)
    } else if let Some(tail) = rest.strip_prefix("enable") {
        (true, tail)
    } else {
        return None;
    };

    // `jscs:disabled` or similar is not a directive.
    if tail.chars().next().map_or(false, |c| !c.is_whitespace()) {
        return None;
    }

    let rules: Vec<String> = tail
        .split(',')
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
        .collect();

    Some(Toggle {
        position,
        enable,
        rules: if rules.is_empty() { None } else { Some(rules) },
    })
}

/// Whether a comment is a pragma directive; such comments are exempt from
/// comment-content rules.
pub fn is_pragma_comment(comment: &str) -> bool {
    comment.trim().starts_with(PRAGMA_PREFIX)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn index(src: &str) -> PragmaIndex {
        let file = SourceFile::parse(src, "test.js").unwrap();
        PragmaIndex::build(&file)
    }

    #[test]
    fn disable_all_suppresses_until_enable() {
        let idx = index("// jscs:disable\nvar a;\n// jscs:enable\nvar b;\n");
        assert!(!idx.is_rule_enabled("anyRule", Position::new(2, 0)));
        assert!(idx.is_rule_enabled("anyRule", Position::new(4, 0)));
    }

    #[test]
    fn rule_scoped_disable_only_hits_that_rule() {
        let idx = index("/* jscs:disable ruleA , ruleB */\nvar a;\n");
        assert!(!idx.is_rule_enabled("ruleA", Position::new(2, 0)));
        assert!(!idx.is_rule_enabled("ruleB", Position::new(2, 0)));
        assert!(idx.is_rule_enabled("ruleC", Position::new(2, 0)));
    }

    #[test]
    fn enable_with_list_reenables_inside_disable_all() {
        let idx = index("//jscs:disable\n//jscs:enable someRuleName, disallowQuotedKeysInObjects\nvar x;\n");
        assert!(idx.is_rule_enabled("disallowQuotedKeysInObjects", Position::new(3, 1)));
        assert!(idx.is_rule_enabled("someRuleName", Position::new(3, 1)));
        assert!(!idx.is_rule_enabled("otherRule", Position::new(3, 1)));
    }

    #[test]
    fn diagnostics_before_the_pragma_are_unaffected() {
        let idx = index("var a;\n// jscs:disable\nvar b;\n");
        assert!(idx.is_rule_enabled("anyRule", Position::new(1, 0)));
        assert!(!idx.is_rule_enabled("anyRule", Position::new(3, 0)));
    }

    #[test]
    fn lookalike_comments_are_not_directives() {
        let idx = index("// jscs:disabled nothing\n// disable\nvar a;\n");
        assert!(idx.is_empty());
    }
}

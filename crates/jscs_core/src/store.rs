//! A rule store housing the registered rules for a checking run.

use crate::rule::Rule;
use crate::rules;

/// A utility structure holding the rules a [`Checker`](crate::Checker) knows
/// about, keyed by their option names.
#[derive(Debug, Default, Clone)]
pub struct RuleStore {
    pub rules: Vec<Box<dyn Rule>>,
}

impl RuleStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// All built in rules.
    pub fn builtins(mut self) -> Self {
        self.rules.extend(rules::default_rules());
        self
    }

    /// Load a list of rules into this store. Registration order is run
    /// order.
    pub fn load_rules(&mut self, rules: impl IntoIterator<Item = Box<dyn Rule>>) {
        self.rules.extend(rules);
    }

    /// Get a rule by its option name from this store.
    pub fn get(&self, option_name: impl AsRef<str>) -> Option<&(dyn Rule + 'static)> {
        self.rules
            .iter()
            .find(|rule| rule.option_name() == option_name.as_ref())
            .map(|rule| &**rule)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtins_register_the_featured_rules() {
        let store = RuleStore::new().builtins();
        assert!(store.get("validateIndentation").is_some());
        assert!(store.get("disallowTrailingComma").is_some());
        assert!(store.get("noSuchRule").is_none());
    }
}

//! The core runner for jscs responsible for the bulk of the style checker's
//! work.
//!
//! The crate is not CLI-specific and can be used from any project: the
//! runner takes a configuration, source code, and produces positioned
//! diagnostics. It is important to decouple the CLI work from the low level
//! checking work to be able to reuse the checking facilities, therefore the
//! core runner never does anything `jscs_cli`-specific.
//!
//! The structure at the core of the crate is the [`Rule`] trait and the
//! [`Checker`]. A rule answers to one configuration key
//! ([`Rule::option_name`]), validates its options once at configure time,
//! and is then run over a [`SourceFile`] — the per-file facade unifying the
//! raw text, the line table, the token stream, and the syntax tree — writing
//! positioned diagnostics into an [`Errors`] collector. Rules have a couple
//! of restrictions for clarity:
//! - rules must be [`Send`](std::marker::Send) and
//!   [`Sync`](std::marker::Sync) so batch runners can fan files out across
//!   threads; each file's check is itself strictly sequential
//! - rules may never rely on the results of other rules
//! - rules should never make any network or file requests
//!
//! ## Using the runner
//!
//! Create a [`Checker`], [`configure`](Checker::configure) it with the flat
//! option map from the user's config, then call
//! [`check_string`](Checker::check_string) per file. Parse failures and
//! panicking rules come back as `parseError`/`internalError` diagnostics
//! rather than escaping the call. [`fix_string`](Checker::fix_string) runs
//! the same checks and lets every rule with a fix capability rewrite the
//! source until nothing fixable remains.

mod categorizer;
mod checker;
mod diagnostic;
mod errors;
mod file;
mod rule;
mod store;
mod testing;

pub mod autofix;
pub mod directives;
pub mod rules;

pub use self::{
    categorizer::{categorize_close_paren, categorize_open_paren, ParenCategory},
    checker::{Checker, ErrorFilter, FixResult},
    diagnostic::Diagnostic,
    errors::Errors,
    file::SourceFile,
    rule::{ConfigError, Rule},
    store::RuleStore,
};
pub use jscs_syntax::{
    Loc, Node, NodeId, NodeKind, NodeType, ParseError, Position, SyntaxTree, Token, TokenId,
    TokenType,
};

/// Get a rule by its option name.
pub fn get_rule_by_name(name: &str) -> Option<Box<dyn Rule>> {
    RuleStore::new()
        .builtins()
        .rules
        .iter()
        .find(|rule| rule.option_name() == name)
        .map(|rule| dyn_clone::clone_box(&**rule))
}

/// The option names of every built in rule, in registration order.
pub fn rule_names() -> Vec<&'static str> {
    RuleStore::new()
        .builtins()
        .rules
        .iter()
        .map(|rule| rule.option_name())
        .collect()
}

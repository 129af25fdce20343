//! The rule capability trait and configuration error taxonomy.

use crate::autofix::TextEdit;
use crate::diagnostic::Diagnostic;
use crate::errors::Errors;
use crate::file::SourceFile;
use dyn_clone::DynClone;
use serde_json::Value;
use std::fmt::Debug;
use thiserror::Error;

/// A configuration mistake. These are programmer/user setup errors and fail
/// fast at configure time; they are never converted into diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("unsupported rule or option: `{0}`")]
    UnknownRule(String),
    #[error("invalid configuration for `{rule}`: {reason}")]
    InvalidOption { rule: &'static str, reason: String },
}

impl ConfigError {
    pub fn invalid(rule: &'static str, reason: impl Into<String>) -> Self {
        ConfigError::InvalidOption {
            rule,
            reason: reason.into(),
        }
    }
}

/// A pluggable style checker.
///
/// Rules are configured once from the user's JSON option value, then run
/// over any number of files. `check` must not retain per-file state on the
/// rule instance; walk-scoped memory belongs in a state struct created per
/// call. Rules are [`Send`] and [`Sync`] so batch runners can fan files out
/// across threads.
pub trait Rule: Debug + DynClone + Send + Sync {
    /// The configuration key this rule answers to, e.g. `"validateIndentation"`.
    fn option_name(&self) -> &'static str;

    /// Validate and apply the rule's option value. Invalid shapes are
    /// rejected here, synchronously, never silently ignored.
    fn configure(&mut self, value: &Value) -> Result<(), ConfigError>;

    /// Check a file, writing diagnostics into `errors`. The collector is
    /// already tagged with this rule's name.
    fn check(&self, file: &SourceFile, errors: &mut Errors);

    /// Whether this rule can fix its own diagnostics.
    fn can_fix(&self) -> bool {
        false
    }

    /// Produce the edits that fix one of this rule's diagnostics, or `None`
    /// to decline. Only called when [`can_fix`](Rule::can_fix) is true.
    fn fix(&self, file: &SourceFile, diagnostic: &Diagnostic) -> Option<Vec<TextEdit>> {
        let _ = (file, diagnostic);
        None
    }
}

dyn_clone::clone_trait_object!(Rule);

/// Generates the struct and option-name boilerplate for a rule.
///
/// ```ignore
/// declare_rule! {
///     /// Disallows something.
///     DisallowSomething,
///     "disallowSomething",
///     pub all_except: Vec<String>,
/// }
/// ```
///
/// `Default`, `configure`, and `check` stay hand-written: every rule's
/// option shape is different and validation belongs next to the rule.
#[macro_export]
macro_rules! declare_rule {
    (
        $(#[$meta:meta])*
        $name:ident,
        $option:literal
        $(, $(#[$field_meta:meta])* pub $field:ident : $ty:ty)* $(,)?
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone)]
        pub struct $name {
            $(
                $(#[$field_meta])*
                pub $field: $ty,
            )*
        }

        impl $name {
            pub const OPTION_NAME: &'static str = $option;

            pub fn new() -> Self {
                Self::default()
            }
        }
    };
}

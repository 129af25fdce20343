//! The built in rules.

pub mod disallow_quoted_keys_in_objects;
pub mod disallow_spaces_inside_parentheses;
pub mod disallow_trailing_comma;
pub mod maximum_line_length;
pub mod require_capitalized_comments;
pub mod require_line_feed_at_file_end;
pub mod validate_indentation;

pub use disallow_quoted_keys_in_objects::DisallowQuotedKeysInObjects;
pub use disallow_spaces_inside_parentheses::DisallowSpacesInsideParentheses;
pub use disallow_trailing_comma::DisallowTrailingComma;
pub use maximum_line_length::MaximumLineLength;
pub use require_capitalized_comments::RequireCapitalizedComments;
pub use require_line_feed_at_file_end::RequireLineFeedAtFileEnd;
pub use validate_indentation::ValidateIndentation;

use crate::rule::Rule;

/// Every built in rule in registration order.
pub fn default_rules() -> Vec<Box<dyn Rule>> {
    vec![
        Box::new(ValidateIndentation::new()),
        Box::new(DisallowTrailingComma::new()),
        Box::new(DisallowQuotedKeysInObjects::new()),
        Box::new(DisallowSpacesInsideParentheses::new()),
        Box::new(RequireCapitalizedComments::new()),
        Box::new(MaximumLineLength::new()),
        Box::new(RequireLineFeedAtFileEnd::new()),
    ]
}

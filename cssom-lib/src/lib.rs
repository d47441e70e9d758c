//! An in-memory CSS object model: an ordered, editable rule list that can be
//! rendered back to canonical stylesheet text.
//!
//! The serializer regroups rules authored as continuation fragments (marked
//! with the `is-continuation: yes` bookkeeping property) into single output
//! blocks without disturbing the stored rules.

pub mod error;
pub mod parser;
pub mod style;

pub use error::Error;
pub use style::declaration::{Declaration, StyleDeclaration};
pub use style::rule::{CssRule, FontFaceRule, OtherRule, RuleType, StyleRule};
pub use style::sheet::CssStyleSheet;

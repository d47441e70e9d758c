//! Rule-text parsing built on `cssparser`.

pub mod css;

pub use css::{parse_rule, parse_rule_list};

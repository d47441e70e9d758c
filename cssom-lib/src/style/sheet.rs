use std::fmt;

use crate::error::Error;
use crate::parser;
use crate::style::rule::CssRule;
use crate::style::serializer;

/// An in-memory stylesheet: shared stylesheet metadata plus the ordered,
/// index-addressable rule list. Rule order is both the cascade order and the
/// serialization order.
#[derive(Debug, Clone, Default)]
pub struct CssStyleSheet {
    /// Location the stylesheet was loaded from, if any.
    pub href: Option<String>,
    /// Advisory title.
    pub title: Option<String>,
    /// Intended destination media, e.g. "screen".
    pub media: Vec<String>,
    /// Disabled sheets are kept but take no effect downstream.
    pub disabled: bool,
    rules: Vec<CssRule>,
}

impl CssStyleSheet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a stylesheet from source text. Rules that fail to parse are
    /// skipped (CSS error recovery); everything else is kept in source order.
    pub fn parse(text: &str) -> Self {
        Self {
            rules: parser::parse_rule_list(text),
            ..Self::default()
        }
    }

    pub fn rules(&self) -> &[CssRule] {
        &self.rules
    }

    pub fn rules_mut(&mut self) -> &mut [CssRule] {
        &mut self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Parses `rule_text` and inserts the resulting rule at `index`, shifting
    /// later rules right. Returns `index`.
    ///
    /// Valid indices are `0..=len`; anything else is [`Error::IndexSize`] and
    /// leaves the list untouched. Parse failures propagate unchanged and also
    /// leave the list untouched.
    pub fn insert_rule(&mut self, rule_text: &str, index: usize) -> Result<usize, Error> {
        if index > self.rules.len() {
            return Err(Error::IndexSize {
                index,
                len: self.rules.len(),
            });
        }
        let rule = parser::parse_rule(rule_text)?;
        self.rules.insert(index, rule);
        Ok(index)
    }

    /// Removes the rule at `index`, shifting later rules left. Valid indices
    /// are `0..len`.
    pub fn delete_rule(&mut self, index: usize) -> Result<(), Error> {
        if index >= self.rules.len() {
            return Err(Error::IndexSize {
                index,
                len: self.rules.len(),
            });
        }
        self.rules.remove(index);
        Ok(())
    }

    /// Renders the whole rule list as canonical CSS text, folding
    /// continuation fragments into their head rule's block.
    pub fn to_css_string(&self) -> String {
        serializer::serialize_rules(&self.rules)
    }
}

impl fmt::Display for CssStyleSheet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_css_string())
    }
}

use std::fmt;

use crate::style::declaration::StyleDeclaration;

/// DOM-style rule type tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleType {
    Style,
    FontFace,
    Other,
}

/// One entry in a stylesheet's ordered rule list.
#[derive(Debug, Clone, PartialEq)]
pub enum CssRule {
    Style(StyleRule),
    FontFace(FontFaceRule),
    Other(OtherRule),
}

/// A qualified rule: selector list plus declaration block.
#[derive(Debug, Clone, PartialEq)]
pub struct StyleRule {
    /// Raw selector text, treated as opaque.
    pub selector_text: String,
    pub style: Option<StyleDeclaration>,
}

/// An `@font-face` rule; its `font-family` property identifies the face.
#[derive(Debug, Clone, PartialEq)]
pub struct FontFaceRule {
    pub style: Option<StyleDeclaration>,
}

/// Any other at-rule, kept only as source text.
#[derive(Debug, Clone, PartialEq)]
pub struct OtherRule {
    /// Precomputed textual form, e.g. `@import url(a.css);`.
    pub css_text: String,
}

impl CssRule {
    pub fn rule_type(&self) -> RuleType {
        match self {
            CssRule::Style(_) => RuleType::Style,
            CssRule::FontFace(_) => RuleType::FontFace,
            CssRule::Other(_) => RuleType::Other,
        }
    }

    pub fn style(&self) -> Option<&StyleDeclaration> {
        match self {
            CssRule::Style(rule) => rule.style.as_ref(),
            CssRule::FontFace(rule) => rule.style.as_ref(),
            CssRule::Other(_) => None,
        }
    }

    pub fn style_mut(&mut self) -> Option<&mut StyleDeclaration> {
        match self {
            CssRule::Style(rule) => rule.style.as_mut(),
            CssRule::FontFace(rule) => rule.style.as_mut(),
            CssRule::Other(_) => None,
        }
    }

    pub fn selector_text(&self) -> Option<&str> {
        match self {
            CssRule::Style(rule) => Some(&rule.selector_text),
            _ => None,
        }
    }

    /// Renders this rule on its own, without continuation merging.
    pub fn css_text(&self) -> String {
        match self {
            CssRule::Style(rule) => {
                let body = rule.style.as_ref().map(StyleDeclaration::css_text);
                format!("{} {{{}}}", rule.selector_text, body.unwrap_or_default())
            }
            CssRule::FontFace(rule) => {
                let body = rule.style.as_ref().map(StyleDeclaration::css_text);
                format!("@font-face {{{}}}", body.unwrap_or_default())
            }
            CssRule::Other(rule) => rule.css_text.clone(),
        }
    }
}

impl fmt::Display for CssRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.css_text())
    }
}

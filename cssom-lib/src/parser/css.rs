//! Converts rule source text into owned [`CssRule`] values.
//!
//! Qualified rules become style rules with their selector kept as raw text;
//! `@font-face` blocks get their declarations parsed; every other at-rule is
//! kept only as reconstructed source text. Unknown property names (including
//! the serializer's `is-continuation` marker) are preserved verbatim.

use cssparser::AtRuleParser;
use cssparser::BasicParseErrorKind;
use cssparser::CowRcStr;
use cssparser::DeclarationParser;
use cssparser::ParseError;
use cssparser::Parser;
use cssparser::ParserInput;
use cssparser::ParserState;
use cssparser::QualifiedRuleParser;
use cssparser::RuleBodyItemParser;
use cssparser::RuleBodyParser;
use cssparser::StyleSheetParser;
use log::{debug, warn};

use crate::error::Error;
use crate::style::declaration::{Declaration, StyleDeclaration};
use crate::style::rule::{CssRule, FontFaceRule, OtherRule, StyleRule};

/// Parse `!important` at the end of a value, returning the value without the
/// marker and the importance flag.
fn split_important_tail(value: &str) -> (String, bool) {
    let trimmed = value.trim();
    if let Some(head) = trimmed.strip_suffix("!important") {
        return (head.trim_end().to_owned(), true);
    }
    (trimmed.to_owned(), false)
}

/// A declaration parser that records property name and raw value text.
struct DeclBodyParser;

impl<'i> DeclarationParser<'i> for DeclBodyParser {
    type Declaration = Declaration;
    type Error = ();

    fn parse_value<'t>(
        &mut self,
        name: CowRcStr<'i>,
        input: &mut Parser<'i, 't>,
        _decl_start: &ParserState,
    ) -> Result<Self::Declaration, ParseError<'i, Self::Error>> {
        let start = input.position();
        // Consume until the end of the declaration item.
        while input.next_including_whitespace_and_comments().is_ok() {}
        let raw = input.slice_from(start);
        let (value, important) = split_important_tail(raw);
        Ok(Declaration {
            name: name.to_ascii_lowercase(),
            value,
            important,
        })
    }
}

impl<'i> AtRuleParser<'i> for DeclBodyParser {
    type Prelude = ();
    type AtRule = Declaration; // Not produced
    type Error = ();

    #[inline]
    fn parse_prelude<'t>(
        &mut self,
        _name: CowRcStr<'i>,
        _input: &mut Parser<'i, 't>,
    ) -> Result<Self::Prelude, ParseError<'i, Self::Error>> {
        Ok(())
    }

    #[inline]
    fn parse_block<'t>(
        &mut self,
        _prelude: Self::Prelude,
        _state: &ParserState,
        input: &mut Parser<'i, 't>,
    ) -> Result<Self::AtRule, ParseError<'i, Self::Error>> {
        Err(input.new_error(BasicParseErrorKind::AtRuleBodyInvalid))
    }

    #[inline]
    fn rule_without_block(
        &mut self,
        _prelude: Self::Prelude,
        _state: &ParserState,
    ) -> Result<Self::AtRule, Self::Error> {
        Err(())
    }
}

impl<'i> QualifiedRuleParser<'i> for DeclBodyParser {
    type Prelude = ();
    type QualifiedRule = Declaration; // Not produced
    type Error = ();

    #[inline]
    fn parse_prelude<'t>(
        &mut self,
        input: &mut Parser<'i, 't>,
    ) -> Result<Self::Prelude, ParseError<'i, Self::Error>> {
        Err(input.new_error(BasicParseErrorKind::QualifiedRuleInvalid))
    }

    #[inline]
    fn parse_block<'t>(
        &mut self,
        _prelude: Self::Prelude,
        _state: &ParserState,
        input: &mut Parser<'i, 't>,
    ) -> Result<Self::QualifiedRule, ParseError<'i, Self::Error>> {
        Err(input.new_error(BasicParseErrorKind::QualifiedRuleInvalid))
    }
}

impl<'i> RuleBodyItemParser<'i, Declaration, ()> for DeclBodyParser {
    fn parse_declarations(&self) -> bool {
        true
    }
    fn parse_qualified(&self) -> bool {
        false
    }
}

/// Parse declarations from a rule block using the `cssparser` body parser.
fn parse_declaration_block<'i>(block: &mut Parser<'i, '_>) -> Vec<Declaration> {
    let mut out: Vec<Declaration> = Vec::new();
    let mut body = DeclBodyParser;
    for item in RuleBodyParser::new(block, &mut body) {
        match item {
            Ok(decl) => out.push(decl),
            Err((err, slice)) => {
                debug!("skipping malformed declaration `{}`: {:?}", slice.trim(), err.kind);
            }
        }
    }
    out
}

/// Raw prelude of an at-rule, captured before we know whether a block follows.
struct AtRulePrelude {
    /// Lowercased at-keyword, without the `@`.
    name: String,
    /// Raw prelude text after the keyword, trimmed.
    prelude: String,
}

/// Top-level parser producing one [`CssRule`] per rule in the input.
struct TopLevelRuleParser;

impl<'i> AtRuleParser<'i> for TopLevelRuleParser {
    type Prelude = AtRulePrelude;
    type AtRule = CssRule;
    type Error = ();

    fn parse_prelude<'t>(
        &mut self,
        name: CowRcStr<'i>,
        input: &mut Parser<'i, 't>,
    ) -> Result<Self::Prelude, ParseError<'i, Self::Error>> {
        let start = input.position();
        while input.next_including_whitespace_and_comments().is_ok() {}
        Ok(AtRulePrelude {
            name: name.to_ascii_lowercase(),
            prelude: input.slice_from(start).trim().to_owned(),
        })
    }

    fn parse_block<'t>(
        &mut self,
        prelude: Self::Prelude,
        _state: &ParserState,
        input: &mut Parser<'i, 't>,
    ) -> Result<Self::AtRule, ParseError<'i, Self::Error>> {
        if prelude.name == "font-face" {
            let declarations = parse_declaration_block(input);
            return Ok(CssRule::FontFace(FontFaceRule {
                style: Some(StyleDeclaration::from_declarations(declarations)),
            }));
        }
        // Anything else is kept opaque, with its source text reconstructed.
        let start = input.position();
        while input.next_including_whitespace_and_comments().is_ok() {}
        let body = input.slice_from(start).trim();
        let css_text = if prelude.prelude.is_empty() {
            format!("@{} {{{}}}", prelude.name, body)
        } else {
            format!("@{} {} {{{}}}", prelude.name, prelude.prelude, body)
        };
        Ok(CssRule::Other(OtherRule { css_text }))
    }

    fn rule_without_block(
        &mut self,
        prelude: Self::Prelude,
        _state: &ParserState,
    ) -> Result<Self::AtRule, Self::Error> {
        let css_text = if prelude.prelude.is_empty() {
            format!("@{};", prelude.name)
        } else {
            format!("@{} {};", prelude.name, prelude.prelude)
        };
        Ok(CssRule::Other(OtherRule { css_text }))
    }
}

impl<'i> QualifiedRuleParser<'i> for TopLevelRuleParser {
    type Prelude = String; // raw selector text
    type QualifiedRule = CssRule;
    type Error = ();

    fn parse_prelude<'t>(
        &mut self,
        input: &mut Parser<'i, 't>,
    ) -> Result<Self::Prelude, ParseError<'i, Self::Error>> {
        let start = input.position();
        while input.next_including_whitespace_and_comments().is_ok() {}
        let selector = input.slice_from(start).trim().to_owned();
        if selector.is_empty() {
            return Err(input.new_error(BasicParseErrorKind::QualifiedRuleInvalid));
        }
        Ok(selector)
    }

    fn parse_block<'t>(
        &mut self,
        prelude: Self::Prelude,
        _state: &ParserState,
        input: &mut Parser<'i, 't>,
    ) -> Result<Self::QualifiedRule, ParseError<'i, Self::Error>> {
        let declarations = parse_declaration_block(input);
        Ok(CssRule::Style(StyleRule {
            selector_text: prelude,
            style: Some(StyleDeclaration::from_declarations(declarations)),
        }))
    }
}

/// Parses a single rule from `text`. Exactly one rule is expected; input
/// that yields none is an error. This is the parser behind
/// [`crate::CssStyleSheet::insert_rule`].
pub fn parse_rule(text: &str) -> Result<CssRule, Error> {
    let mut input = ParserInput::new(text);
    let mut parser = Parser::new(&mut input);
    let mut top = TopLevelRuleParser;
    let mut rules = StyleSheetParser::new(&mut parser, &mut top);
    match rules.next() {
        Some(Ok(rule)) => Ok(rule),
        Some(Err((err, slice))) => Err(Error::Parse(format!(
            "{:?} in `{}`",
            err.kind,
            slice.trim()
        ))),
        None => Err(Error::Parse(format!(
            "no rule found in `{}`",
            text.trim()
        ))),
    }
}

/// Parses a full rule list, skipping malformed rules (CSS error recovery).
pub fn parse_rule_list(text: &str) -> Vec<CssRule> {
    let mut input = ParserInput::new(text);
    let mut parser = Parser::new(&mut input);
    let mut top = TopLevelRuleParser;
    let mut rules = Vec::new();
    for item in StyleSheetParser::new(&mut parser, &mut top) {
        match item {
            Ok(rule) => rules.push(rule),
            Err((err, slice)) => {
                warn!("skipping malformed rule `{}`: {:?}", slice.trim(), err.kind);
            }
        }
    }
    rules
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::rule::RuleType;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_a_style_rule() {
        let rule = parse_rule("body { margin: 0; color: red }").unwrap();
        assert_eq!(rule.rule_type(), RuleType::Style);
        assert_eq!(rule.selector_text(), Some("body"));
        let style = rule.style().unwrap();
        assert_eq!(style.get_property_value("margin"), "0");
        assert_eq!(style.get_property_value("color"), "red");
    }

    #[test]
    fn preserves_unknown_properties() {
        let rule = parse_rule("a { x: 1; is-continuation: yes }").unwrap();
        let style = rule.style().unwrap();
        assert_eq!(style.get_property_value("is-continuation"), "yes");
        assert_eq!(style.css_text(), "x:1; is-continuation:yes;");
    }

    #[test]
    fn parses_important() {
        let rule = parse_rule("a { color: red !important }").unwrap();
        let style = rule.style().unwrap();
        assert_eq!(style.get_property_value("color"), "red");
        assert_eq!(style.get_property_priority("color"), "important");
    }

    #[test]
    fn parses_a_font_face_rule() {
        let rule = parse_rule("@font-face { font-family: Foo; src: url(a.woff) }").unwrap();
        assert_eq!(rule.rule_type(), RuleType::FontFace);
        let style = rule.style().unwrap();
        assert_eq!(style.get_property_value("font-family"), "Foo");
        assert_eq!(style.get_property_value("src"), "url(a.woff)");
    }

    #[test]
    fn other_at_rule_without_block_keeps_text() {
        let rule = parse_rule("@import url(extra.css);").unwrap();
        assert_eq!(rule.rule_type(), RuleType::Other);
        assert_eq!(rule.css_text(), "@import url(extra.css);");
    }

    #[test]
    fn other_at_rule_with_block_keeps_text() {
        let rule = parse_rule("@media screen { a { x: 1 } }").unwrap();
        assert_eq!(rule.rule_type(), RuleType::Other);
        assert_eq!(rule.css_text(), "@media screen {a { x: 1 }}");
    }

    #[test]
    fn empty_input_is_a_parse_error() {
        assert!(matches!(parse_rule("   "), Err(Error::Parse(_))));
    }

    #[test]
    fn rule_without_a_block_is_a_parse_error() {
        assert!(matches!(parse_rule("not-a-rule"), Err(Error::Parse(_))));
    }

    #[test]
    fn rule_list_recovers_from_bad_rules() {
        let rules = parse_rule_list("a { x: 1 }\nb { y: 2 }\nnot-a-rule");
        assert_eq!(rules.len(), 2);
        assert_eq!(rules[0].selector_text(), Some("a"));
        assert_eq!(rules[1].selector_text(), Some("b"));
    }
}

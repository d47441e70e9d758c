//! Canonical text rendering for an ordered rule list.
//!
//! A rule can be authored as a continuation fragment of the rule before it by
//! carrying the `is-continuation: yes` bookkeeping property. The serializer
//! folds each contiguous run of such fragments into a single output block and
//! never lets the marker reach the rendered text. Rendering is read-only: the
//! marker (and, for font faces, the shared `font-family`) is filtered while
//! rendering instead of being removed and re-added, so the stored rules are
//! byte-identical before and after a call.

use crate::style::declaration::StyleDeclaration;
use crate::style::rule::CssRule;

/// Bookkeeping property marking a rule as a textual continuation of the
/// immediately preceding rule of the same kind.
pub const CONTINUATION_PROPERTY: &str = "is-continuation";

/// Value the continuation property must carry for a merge to happen.
pub const CONTINUATION_FLAG: &str = "yes";

const FONT_FAMILY: &str = "font-family";

fn is_continuation(style: &StyleDeclaration) -> bool {
    style.get_property_value(CONTINUATION_PROPERTY) == CONTINUATION_FLAG
}

/// Serializes `rules` into canonical stylesheet text: one `}`-and-newline
/// terminated block per style/font-face run, raw text for other rules.
///
/// A single left-to-right scan with one-step lookahead. Style fragments merge
/// when the next rule has an identical selector and the continuation marker;
/// font-face fragments merge when the next rule's `font-family` matches the
/// run's head rule. A candidate without a style declaration never merges.
pub fn serialize_rules(rules: &[CssRule]) -> String {
    let mut out = String::new();
    let mut i = 0;
    while i < rules.len() {
        match &rules[i] {
            CssRule::Style(rule) => {
                out.push_str(&rule.selector_text);
                out.push_str(" {");
                if let Some(style) = &rule.style {
                    out.push_str(&style.render(&[CONTINUATION_PROPERTY]));
                }
                while let Some(CssRule::Style(next)) = rules.get(i + 1) {
                    if next.selector_text != rule.selector_text {
                        break;
                    }
                    let Some(style) = next.style.as_ref() else {
                        break;
                    };
                    if !is_continuation(style) {
                        break;
                    }
                    i += 1;
                    out.push(' ');
                    out.push_str(&style.render(&[CONTINUATION_PROPERTY]));
                }
                out.push_str("}\n");
            }
            CssRule::FontFace(rule) => {
                out.push_str("@font-face {");
                if let Some(style) = &rule.style {
                    out.push_str(&style.render(&[CONTINUATION_PROPERTY]));
                }
                // The run is keyed on the head rule's font-family; without
                // one there is nothing to match against.
                let family = match &rule.style {
                    Some(style) => style.get_property_value(FONT_FAMILY),
                    None => String::new(),
                };
                if !family.is_empty() {
                    while let Some(CssRule::FontFace(next)) = rules.get(i + 1) {
                        let Some(style) = next.style.as_ref() else {
                            break;
                        };
                        if !is_continuation(style)
                            || style.get_property_value(FONT_FAMILY) != family
                        {
                            break;
                        }
                        i += 1;
                        out.push(' ');
                        out.push_str(&style.render(&[CONTINUATION_PROPERTY, FONT_FAMILY]));
                    }
                }
                out.push_str("}\n");
            }
            CssRule::Other(rule) => {
                out.push_str(&rule.css_text);
                out.push('\n');
            }
        }
        i += 1;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::rule::{FontFaceRule, OtherRule, StyleRule};
    use pretty_assertions::assert_eq;

    fn style_rule(selector: &str, props: &[(&str, &str)]) -> CssRule {
        let mut style = StyleDeclaration::new();
        for (name, value) in props {
            style.set_property(name, value);
        }
        CssRule::Style(StyleRule {
            selector_text: selector.to_owned(),
            style: Some(style),
        })
    }

    fn font_face_rule(props: &[(&str, &str)]) -> CssRule {
        let mut style = StyleDeclaration::new();
        for (name, value) in props {
            style.set_property(name, value);
        }
        CssRule::FontFace(FontFaceRule { style: Some(style) })
    }

    #[test]
    fn empty_list_serializes_to_empty_string() {
        assert_eq!(serialize_rules(&[]), "");
    }

    #[test]
    fn style_rule_without_declaration_emits_empty_body() {
        let rule = CssRule::Style(StyleRule {
            selector_text: "a".into(),
            style: None,
        });
        assert_eq!(serialize_rules(&[rule]), "a {}\n");
    }

    #[test]
    fn other_rule_passes_through_raw_text() {
        let rule = CssRule::Other(OtherRule {
            css_text: "@import url(a.css);".into(),
        });
        assert_eq!(serialize_rules(&[rule]), "@import url(a.css);\n");
    }

    #[test]
    fn continuation_run_merges_into_one_block() {
        let rules = [
            style_rule("a", &[("x", "1")]),
            style_rule("a", &[("y", "2"), (CONTINUATION_PROPERTY, "yes")]),
            style_rule("a", &[("z", "3"), (CONTINUATION_PROPERTY, "yes")]),
        ];
        assert_eq!(serialize_rules(&rules), "a {x:1; y:2; z:3;}\n");
    }

    #[test]
    fn different_selector_breaks_the_run() {
        let rules = [
            style_rule("a", &[("x", "1")]),
            style_rule("b", &[("y", "2"), (CONTINUATION_PROPERTY, "yes")]),
        ];
        assert_eq!(serialize_rules(&rules), "a {x:1;}\nb {y:2;}\n");
    }

    #[test]
    fn marker_value_other_than_yes_does_not_merge() {
        let rules = [
            style_rule("a", &[("x", "1")]),
            style_rule("a", &[("y", "2"), (CONTINUATION_PROPERTY, "no")]),
        ];
        // The marker is still suppressed from the rendered body, but the
        // blocks stay separate.
        assert_eq!(serialize_rules(&rules), "a {x:1;}\na {y:2;}\n");
    }

    #[test]
    fn candidate_without_declaration_never_merges() {
        let rules = [
            style_rule("a", &[("x", "1")]),
            CssRule::Style(StyleRule {
                selector_text: "a".into(),
                style: None,
            }),
        ];
        assert_eq!(serialize_rules(&rules), "a {x:1;}\na {}\n");
    }

    #[test]
    fn font_face_run_merges_on_matching_family() {
        let rules = [
            font_face_rule(&[("font-family", "Foo"), ("src", "url(a.woff)")]),
            font_face_rule(&[
                ("font-family", "Foo"),
                ("src", "url(b.woff)"),
                (CONTINUATION_PROPERTY, "yes"),
            ]),
        ];
        assert_eq!(
            serialize_rules(&rules),
            "@font-face {font-family:Foo; src:url(a.woff); src:url(b.woff);}\n"
        );
    }

    #[test]
    fn font_face_with_different_family_stays_separate() {
        let rules = [
            font_face_rule(&[("font-family", "Foo")]),
            font_face_rule(&[("font-family", "Bar"), (CONTINUATION_PROPERTY, "yes")]),
        ];
        assert_eq!(
            serialize_rules(&rules),
            "@font-face {font-family:Foo;}\n@font-face {font-family:Bar;}\n"
        );
    }

    #[test]
    fn font_face_without_family_never_starts_a_run() {
        let rules = [
            font_face_rule(&[("src", "url(a.woff)")]),
            font_face_rule(&[("src", "url(b.woff)"), (CONTINUATION_PROPERTY, "yes")]),
        ];
        assert_eq!(
            serialize_rules(&rules),
            "@font-face {src:url(a.woff);}\n@font-face {src:url(b.woff);}\n"
        );
    }

    #[test]
    fn serialization_leaves_rules_untouched() {
        let rules = [
            style_rule("a", &[("x", "1")]),
            style_rule("a", &[("y", "2"), (CONTINUATION_PROPERTY, "yes")]),
        ];
        let before = rules.to_vec();
        let text = serialize_rules(&rules);
        assert!(!text.contains(CONTINUATION_PROPERTY));
        assert_eq!(rules.to_vec(), before);
    }
}

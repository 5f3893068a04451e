//! Integration tests for selector scanning into rules.

use css2xpath::rule::{SHORTHANDS, shorthand};
use css2xpath::{
    AttributeFilter, Matcher, PseudoClass, PseudoFilter, Rule, SelectorScanner, scan,
    split_selector_group,
};

#[test]
fn test_scan_universal_yields_one_empty_rule() {
    let rules = scan("*").unwrap();
    assert_eq!(rules, vec![Rule::new(false)]);
    assert!(rules[0].is_universal());
}

#[test]
fn test_scan_compound_rule() {
    let rules = scan(r#"a.cls[href^="url"]:first-child"#).unwrap();
    assert_eq!(rules.len(), 1);

    let rule = &rules[0];
    assert_eq!(rule.tag_name.as_deref(), Some("a"));
    assert_eq!(
        rule.attributes,
        vec![
            AttributeFilter::new("class", Matcher::ContainsWord, Some("cls".to_owned())),
            AttributeFilter::new("href", Matcher::Start, Some("url".to_owned())),
        ]
    );
    assert_eq!(
        rule.pseudo_selectors,
        vec![PseudoFilter {
            name: "first-child".to_owned(),
            value: None,
        }]
    );
}

#[test]
fn test_scan_bare_attribute_has_no_value() {
    let rules = scan("[disabled]").unwrap();
    assert_eq!(
        rules[0].attributes,
        vec![AttributeFilter::new("disabled", Matcher::Exists, None)]
    );
}

#[test]
fn test_scan_combinators_in_order() {
    // [§ 16.1 Descendant combinator](https://www.w3.org/TR/selectors-4/#descendant-combinators)
    // [§ 16.2 Child combinator](https://www.w3.org/TR/selectors-4/#child-combinators)
    let rules = scan("#id > .cls   .x").unwrap();
    let direct: Vec<bool> = rules.iter().map(|r| r.direct_child).collect();
    assert_eq!(direct, vec![false, true, false]);
}

#[test]
fn test_scan_child_combinator_without_spaces() {
    let rules = scan("ul>li").unwrap();
    assert_eq!(rules.len(), 2);
    assert!(rules[1].direct_child);
    assert_eq!(rules[1].tag_name.as_deref(), Some("li"));
}

#[test]
fn test_scan_stray_character_does_not_add_empty_rule() {
    let rules = scan("a + b").unwrap();
    assert_eq!(rules.len(), 2);
    assert!(!rules[1].direct_child);
}

#[test]
fn test_scan_stray_character_before_child_combinator() {
    let rules = scan("a ~> b").unwrap();
    assert_eq!(rules.len(), 2);
    assert!(rules[1].direct_child);
}

#[test]
fn test_scan_keeps_nested_parentheses_verbatim() {
    let rules = scan(":nth-child((1))").unwrap();
    assert_eq!(rules[0].pseudo_selectors[0].value.as_deref(), Some("(1)"));

    let rules = scan(":not(:nth-child(2)).x").unwrap();
    assert_eq!(
        rules[0].pseudo_selectors[0].value.as_deref(),
        Some(":nth-child(2)")
    );
    assert_eq!(rules[0].attributes[0].name, "class");
}

#[test]
fn test_scan_trims_input() {
    assert_eq!(scan("  a  ").unwrap(), scan("a").unwrap());
}

#[test]
fn test_scanner_run_matches_scan() {
    let selector = "div > p.note";
    assert_eq!(SelectorScanner::new(selector).run(), scan(selector));
}

#[test]
fn test_split_selector_group_top_level_only() {
    assert_eq!(
        split_selector_group(r#"a, b:not(c, d), [x=","]"#),
        vec!["a", " b:not(c, d)", r#" [x=","]"#]
    );
}

#[test]
fn test_split_selector_group_single_member() {
    assert_eq!(split_selector_group("a b"), vec!["a b"]);
    assert_eq!(split_selector_group(""), vec![""]);
}

#[test]
fn test_matcher_operators() {
    assert_eq!(Matcher::from_operator("="), Some(Matcher::Same));
    assert_eq!(Matcher::from_operator("|="), Some(Matcher::ContainsPrefix));
    assert_eq!(Matcher::from_operator("~="), Some(Matcher::ContainsWord));
    assert_eq!(Matcher::from_operator("$="), Some(Matcher::End));
    assert_eq!(Matcher::from_operator("^="), Some(Matcher::Start));
    assert_eq!(Matcher::from_operator("!="), Some(Matcher::Not));
    assert_eq!(Matcher::from_operator("*="), Some(Matcher::Contains));
    assert_eq!(Matcher::from_operator(""), Some(Matcher::Exists));
    assert_eq!(Matcher::from_operator("=="), None);
}

#[test]
fn test_matcher_names() {
    assert_eq!(Matcher::ContainsWord.to_string(), "contains-word");
    assert_eq!(Matcher::ContainsPrefix.to_string(), "contains-prefix");
    assert_eq!(Matcher::Exists.to_string(), "none");
}

#[test]
fn test_pseudo_class_names() {
    assert_eq!("nth-child".parse::<PseudoClass>(), Ok(PseudoClass::NthChild));
    assert_eq!(PseudoClass::FirstChild.to_string(), "first-child");
    assert!("hover".parse::<PseudoClass>().is_err());
}

#[test]
fn test_shorthand_table() {
    assert_eq!(SHORTHANDS.len(), 2);
    let id = shorthand('#').unwrap();
    assert_eq!((id.attribute, id.matcher), ("id", Matcher::Same));
    let class = shorthand('.').unwrap();
    assert_eq!((class.attribute, class.matcher), ("class", Matcher::ContainsWord));
    assert!(shorthand('@').is_none());
}

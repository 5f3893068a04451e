//! XPath emission.
//!
//! Every rule becomes one location step from the previous rule's match:
//! `/*` for a direct child, `/descendant::*` otherwise. The rule's
//! constraints become predicates on that step, in the order tag name,
//! attributes, pseudo-selectors. Paths are anchored at the document element
//! (`/*`).

/// `:nth-child()` argument parsing.
pub mod nth;

use crate::error::MalformedSelector;
use crate::rule::{AttributeFilter, Matcher, PseudoClass, PseudoFilter, Rule};
use crate::scanner;

pub use nth::NthChild;

/// Anchor every path starts from: the document element.
pub const ROOT: &str = "/*";

/// Step for the child combinator.
const CHILD_STEP: &str = "/*";

/// Step for the descendant combinator.
const DESCENDANT_STEP: &str = "/descendant::*";

/// Separator between the paths of a selector group (XPath union).
const UNION: &str = "|";

/// How many `:not()` may be nested inside one another.
pub const MAX_NEGATION_DEPTH: usize = 32;

/// Render the rules of one sub-selector as a rooted XPath location path.
///
/// # Errors
///
/// Returns [`MalformedSelector`] if a pseudo-selector cannot be expressed.
pub fn render(rules: &[Rule]) -> Result<String, MalformedSelector> {
    let mut xpath = String::from(ROOT);

    for rule in rules {
        xpath.push_str(if rule.direct_child {
            CHILD_STEP
        } else {
            DESCENDANT_STEP
        });
        for predicate in render_predicates(rule)? {
            xpath.push('[');
            xpath.push_str(&predicate);
            xpath.push(']');
        }
    }

    #[cfg(feature = "scan-trace")]
    eprintln!("[EMIT] xpath={xpath}");

    Ok(xpath)
}

/// Render every member of a selector group and join them into one union.
///
/// # Errors
///
/// Returns the first [`MalformedSelector`] raised by any member.
pub fn render_group(group: &[Vec<Rule>]) -> Result<String, MalformedSelector> {
    let paths = group
        .iter()
        .map(|rules| render(rules))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(paths.join(UNION))
}

/// Render the predicates of a single rule, without brackets and without the
/// location step.
///
/// # Errors
///
/// Returns [`MalformedSelector`] if a pseudo-selector cannot be expressed.
pub fn render_predicates(rule: &Rule) -> Result<Vec<String>, MalformedSelector> {
    predicates_at(rule, 0)
}

/// Render the predicates of `rule`, which sits inside `depth` negations.
fn predicates_at(rule: &Rule, depth: usize) -> Result<Vec<String>, MalformedSelector> {
    let mut predicates =
        Vec::with_capacity(1 + rule.attributes.len() + rule.pseudo_selectors.len());

    if let Some(tag_name) = &rule.tag_name {
        predicates.push(format!("name() = {}", literal(tag_name)));
    }
    predicates.extend(rule.attributes.iter().map(attribute_expression));
    for pseudo in &rule.pseudo_selectors {
        predicates.push(pseudo_expression(pseudo, depth)?);
    }

    Ok(predicates)
}

/// [§ 6.4 Attribute selectors](https://www.w3.org/TR/selectors-4/#attribute-selectors)
fn attribute_expression(attribute: &AttributeFilter) -> String {
    let name = &attribute.name;
    let value = attribute.value.as_deref().unwrap_or_default();

    match attribute.matcher {
        Matcher::Same => format!("@{name}={}", literal(value)),
        Matcher::Start => format!("starts-with(@{name}, {})", literal(value)),
        // XPath 1.0 has no ends-with(); pad both sides with a sentinel.
        Matcher::End => format!(
            "contains(concat(@{name}, \"___\"), {})",
            literal(&format!("{value}___"))
        ),
        Matcher::ContainsWord => format!(
            "contains(concat(\" \", @{name}, \" \"), {})",
            literal(&format!(" {value} "))
        ),
        Matcher::ContainsPrefix => format!(
            "@{name}={} or starts-with(@{name}, {}) or starts-with(@{name}, {})",
            literal(value),
            literal(&format!("{value} ")),
            literal(&format!("{value}-"))
        ),
        Matcher::Not => format!("not(@{name}={})", literal(value)),
        Matcher::Exists => format!("@{name}"),
        Matcher::Contains => format!("contains(@{name}, {})", literal(value)),
    }
}

/// [§ 4 Pseudo-classes](https://www.w3.org/TR/selectors-4/#pseudo-classes)
fn pseudo_expression(pseudo: &PseudoFilter, depth: usize) -> Result<String, MalformedSelector> {
    let class = pseudo.class()?;
    let argument = || {
        pseudo
            .value
            .as_deref()
            .ok_or_else(|| MalformedSelector::MissingArgument {
                name: class.to_string(),
            })
    };

    match class {
        PseudoClass::FirstChild => Ok("position() = 1".to_owned()),
        PseudoClass::LastChild => Ok("position() = last()".to_owned()),
        PseudoClass::NthChild => Ok(argument()?.parse::<NthChild>()?.to_predicate()),
        PseudoClass::Not => negation(argument()?, depth + 1),
    }
}

/// [§ 4.3 The Negation Pseudo-class](https://www.w3.org/TR/selectors-4/#negation)
///
/// "The negation pseudo-class, :not(), is a functional pseudo-class taking a
/// selector list as an argument. It represents an element that is not
/// represented by its argument."
///
/// Each member of the argument must be a single rule without a combinator;
/// its predicates are and-ed, and the members are or-ed. `depth` counts this
/// negation and every one around it.
fn negation(selector: &str, depth: usize) -> Result<String, MalformedSelector> {
    if depth > MAX_NEGATION_DEPTH {
        return Err(MalformedSelector::NegationTooDeep {
            limit: MAX_NEGATION_DEPTH,
        });
    }
    let invalid = || MalformedSelector::InvalidNegation {
        selector: selector.to_owned(),
    };

    let mut alternatives = Vec::new();
    for rules in scanner::parse_group(selector)? {
        let [rule] = rules.as_slice() else {
            return Err(invalid());
        };
        if rule.direct_child || rule.is_universal() {
            return Err(invalid());
        }
        alternatives.push(join_parenthesized(&predicates_at(rule, depth)?, " and "));
    }

    Ok(format!("not({})", join_parenthesized(&alternatives, " or ")))
}

/// Join boolean expressions with `operator`, parenthesizing each one when
/// there is more than one.
fn join_parenthesized(expressions: &[String], operator: &str) -> String {
    match expressions {
        [single] => single.clone(),
        _ => expressions
            .iter()
            .map(|e| format!("({e})"))
            .collect::<Vec<_>>()
            .join(operator),
    }
}

/// Quote `value` as an XPath 1.0 string literal.
///
/// XPath 1.0 literals cannot escape their delimiter, so a value holding
/// both quote kinds is assembled with `concat()`.
#[must_use]
pub fn literal(value: &str) -> String {
    if !value.contains('"') {
        format!("\"{value}\"")
    } else if !value.contains('\'') {
        format!("'{value}'")
    } else {
        let parts = value
            .split('"')
            .map(|part| format!("\"{part}\""))
            .collect::<Vec<_>>();
        format!("concat({})", parts.join(", '\"', "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literal_prefers_double_quotes() {
        assert_eq!(literal("url"), "\"url\"");
    }

    #[test]
    fn test_literal_falls_back_to_single_quotes() {
        assert_eq!(literal("say \"hi\""), "'say \"hi\"'");
    }

    #[test]
    fn test_literal_uses_concat_for_mixed_quotes() {
        assert_eq!(literal("a\"b'c"), "concat(\"a\", '\"', \"b'c\")");
    }

    #[test]
    fn test_join_parenthesized_single_is_bare() {
        assert_eq!(join_parenthesized(&["x".to_owned()], " or "), "x");
        assert_eq!(
            join_parenthesized(&["x".to_owned(), "y".to_owned()], " or "),
            "(x) or (y)"
        );
    }
}

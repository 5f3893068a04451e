//! Selector scanning.
//!
//! A selector group is split on its top-level commas, and each member is
//! scanned left-to-right into an ordered list of [`Rule`]s.
//!
//! The grammar is deliberately lenient: characters that start no known
//! token end the current rule and are otherwise skipped, with a warning.
//! Only attribute blocks can fail to scan.

mod cursor;

use std::mem;

use css2xpath_common::warning::warn_once;

use crate::error::MalformedSelector;
use crate::rule::{AttributeFilter, Matcher, PseudoFilter, Rule, shorthand};

use cursor::Cursor;

/// Component name used for warnings.
const COMPONENT: &str = "Selector";

/// Characters allowed in `#id`/`.class` shorthands and unquoted values.
const fn is_value_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '-'
}

/// Characters allowed after the leading letter of a tag or attribute name.
const fn is_name_char(c: char) -> bool {
    is_value_char(c)
}

/// Characters that make up an attribute matcher operator.
const fn is_operator_char(c: char) -> bool {
    matches!(c, '!' | '=' | '^' | '$' | '*' | '|' | '~')
}

/// Characters allowed in a pseudo-selector name.
const fn is_pseudo_name_char(c: char) -> bool {
    c.is_ascii_lowercase() || c == '-'
}

/// Characters that separate two rules.
const fn is_combinator_char(c: char) -> bool {
    c.is_ascii_whitespace() || c == '>'
}

/// Scanner over one member of a selector group.
pub struct SelectorScanner<'a> {
    cursor: Cursor<'a>,
}

impl<'a> SelectorScanner<'a> {
    /// Create a scanner for `selector`. Surrounding whitespace is ignored.
    #[must_use]
    pub fn new(selector: &'a str) -> Self {
        Self {
            cursor: Cursor::new(selector.trim()),
        }
    }

    /// Scan the whole selector into rules, in document order.
    ///
    /// Always yields at least one rule; an empty selector yields a single
    /// unconstrained one.
    ///
    /// # Errors
    ///
    /// Returns [`MalformedSelector`] if an attribute block is malformed.
    pub fn run(mut self) -> Result<Vec<Rule>, MalformedSelector> {
        let mut rules = Vec::new();
        let mut current = Rule::new(self.consume_combinator());
        // Whether `current` has consumed any token since it was started.
        let mut touched = false;

        while let Some(c) = self.cursor.peek() {
            if let Some(short) = shorthand(c) {
                let _ = self.cursor.consume();
                let value = self.cursor.extract_while(is_value_char);
                current.attributes.push(AttributeFilter::new(
                    short.attribute,
                    short.matcher,
                    Some(value.to_owned()),
                ));
            } else if c.is_ascii_alphabetic() {
                // A second tag name in the same rule replaces the first.
                current.tag_name = Some(self.cursor.extract_while(is_name_char).to_owned());
            } else if c == '*' {
                let _ = self.cursor.consume();
            } else if c == ':' {
                current.pseudo_selectors.push(self.consume_pseudo_selector());
            } else if c == '[' {
                current.attributes.push(self.consume_attribute_block()?);
            } else if is_combinator_char(c) {
                let next = Rule::new(self.consume_combinator());
                rules.push(finish_rule(mem::replace(&mut current, next)));
                touched = false;
                continue;
            } else {
                let offset = self.cursor.position();
                warn_once(
                    COMPONENT,
                    &format!("unexpected '{c}' at offset {offset} treated as a combinator"),
                );
                let _ = self.cursor.consume();
                if touched {
                    let next = Rule::new(self.consume_combinator());
                    rules.push(finish_rule(mem::replace(&mut current, next)));
                    touched = false;
                } else {
                    current.direct_child |= self.consume_combinator();
                }
                continue;
            }
            touched = true;
        }

        rules.push(finish_rule(current));
        Ok(rules)
    }

    /// [§ 16 Combinators](https://www.w3.org/TR/selectors-4/#combinators)
    ///
    /// Consume a run of whitespace containing at most one `>`.
    /// Returns `true` if the run was a child combinator.
    fn consume_combinator(&mut self) -> bool {
        let mut is_direct_child = false;
        let _ = self.cursor.extract_while(|c| {
            if c == '>' && !is_direct_child {
                is_direct_child = true;
                true
            } else {
                c.is_ascii_whitespace()
            }
        });
        is_direct_child
    }

    fn skip_whitespace(&mut self) {
        let _ = self.cursor.extract_while(|c| c.is_ascii_whitespace());
    }

    /// Extract a name: a letter followed by name characters, or nothing.
    fn consume_name(&mut self) -> &'a str {
        if self.cursor.peek().is_some_and(|c| c.is_ascii_alphabetic()) {
            self.cursor.extract_while(is_name_char)
        } else {
            ""
        }
    }

    /// [§ 6.4 Attribute selectors](https://www.w3.org/TR/selectors-4/#attribute-selectors)
    ///
    /// Consume `[name]`, `[name op value]` or `[name op "value"]`.
    fn consume_attribute_block(&mut self) -> Result<AttributeFilter, MalformedSelector> {
        let _ = self.cursor.consume(); // [
        self.skip_whitespace();

        let name_offset = self.cursor.position();
        let name = self.consume_name();
        if name.is_empty() {
            return Err(MalformedSelector::MissingAttributeName {
                offset: name_offset,
            });
        }
        let _ = self.consume_combinator();

        let operator_offset = self.cursor.position();
        let operator = self.cursor.extract_while(is_operator_char);
        let matcher = Matcher::from_operator(operator).ok_or_else(|| {
            MalformedSelector::UnrecognizedMatcher {
                offset: operator_offset,
                operator: operator.to_owned(),
            }
        })?;
        self.skip_whitespace();

        let value = match self.cursor.peek() {
            Some(quote @ ('"' | '\'')) => Some(self.consume_quoted(quote)?),
            _ if matcher != Matcher::Exists => {
                Some(self.cursor.extract_while(is_value_char).to_owned())
            }
            _ => None,
        };
        self.skip_whitespace();

        if !self.cursor.consume_if(']') {
            return Err(MalformedSelector::UnterminatedAttribute {
                offset: self.cursor.position(),
                found: self.cursor.peek().map(String::from).unwrap_or_default(),
            });
        }

        Ok(AttributeFilter::new(name, matcher, value))
    }

    /// Consume a string quoted with `quote` and return its contents.
    fn consume_quoted(&mut self, quote: char) -> Result<String, MalformedSelector> {
        let offset = self.cursor.position();
        let _ = self.cursor.consume();
        let value = self.cursor.extract_while(|c| c != quote);
        if !self.cursor.consume_if(quote) {
            return Err(MalformedSelector::UnterminatedValue { offset });
        }
        Ok(value.to_owned())
    }

    /// [§ 4 Pseudo-classes](https://www.w3.org/TR/selectors-4/#pseudo-classes)
    ///
    /// Consume `:name` or `:name(value)`. Nested parentheses are kept in the
    /// value verbatim.
    fn consume_pseudo_selector(&mut self) -> PseudoFilter {
        let _ = self.cursor.consume(); // :
        let name = self.cursor.extract_while(is_pseudo_name_char).to_owned();

        let value = if self.cursor.consume_if('(') {
            let offset = self.cursor.position();
            let mut depth = 1usize;
            let inner = self.cursor.extract_while(|c| {
                match c {
                    '(' => depth += 1,
                    ')' => depth -= 1,
                    _ => {}
                }
                depth != 0
            });
            if !self.cursor.consume_if(')') {
                warn_once(
                    COMPONENT,
                    &format!("unbalanced parentheses after ':{name}(' at offset {offset}"),
                );
            }
            Some(inner.to_owned())
        } else {
            None
        };

        PseudoFilter { name, value }
    }
}

fn finish_rule(rule: Rule) -> Rule {
    #[cfg(feature = "scan-trace")]
    eprintln!("[SCAN] rule={rule:?}");
    rule
}

/// Scan one member of a selector group into rules.
///
/// # Errors
///
/// Returns [`MalformedSelector`] if an attribute block is malformed.
pub fn scan(selector: &str) -> Result<Vec<Rule>, MalformedSelector> {
    SelectorScanner::new(selector).run()
}

/// [§ 4.1 Selector lists](https://www.w3.org/TR/selectors-4/#grouping)
///
/// Split a selector group on its top-level commas. Commas inside
/// parentheses, brackets or quotes do not split.
#[must_use]
pub fn split_selector_group(selector: &str) -> Vec<&str> {
    let mut members = Vec::new();
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut start = 0;

    for (i, c) in selector.char_indices() {
        match (quote, c) {
            (Some(q), _) if c == q => quote = None,
            (Some(_), _) => {}
            (None, '"' | '\'') => quote = Some(c),
            (None, '(' | '[') => depth += 1,
            (None, ')' | ']') => depth = depth.saturating_sub(1),
            (None, ',') if depth == 0 => {
                members.push(&selector[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    members.push(&selector[start..]);
    members
}

/// Split a selector group and scan every member.
///
/// # Errors
///
/// Returns the first [`MalformedSelector`] raised by any member.
pub fn parse_group(selector: &str) -> Result<Vec<Vec<Rule>>, MalformedSelector> {
    let members = split_selector_group(selector);
    let is_list = members.len() > 1;
    members
        .into_iter()
        .map(|member| {
            if is_list && member.trim().is_empty() {
                warn_once(COMPONENT, "empty member in selector list matches any element");
            }
            scan(member)
        })
        .collect()
}

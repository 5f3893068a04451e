//! The intermediate rule model produced by the scanner and consumed by the
//! XPath emitter.
//!
//! Rules are transient: one scan builds them, one render consumes them.

use serde::Serialize;
use strum_macros::{Display, EnumString};

use crate::error::MalformedSelector;

/// [§ 6.4 Attribute selectors](https://www.w3.org/TR/selectors-4/#attribute-selectors)
///
/// The comparison applied between an attribute and the selector's value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum Matcher {
    /// `[attr=value]` and `#id`: "whose value is exactly 'val'"
    Same,

    /// `[attr^=value]`: "whose value begins with the prefix 'val'"
    Start,

    /// `[attr$=value]`: "whose value ends with the suffix 'val'"
    End,

    /// `[attr~=value]` and `.class`: "a whitespace-separated list of words,
    /// one of which is exactly 'val'"
    ContainsWord,

    /// `[attr|=value]`: "either being exactly 'val' or beginning with 'val'
    /// immediately followed by '-'"
    ContainsPrefix,

    /// `[attr!=value]`: non-standard negated equality.
    Not,

    /// `[attr]`: "Represents an element with the att attribute"
    #[strum(serialize = "none")]
    #[serde(rename = "none")]
    Exists,

    /// `[attr*=value]`: "contains at least one instance of the substring 'val'"
    Contains,
}

impl Matcher {
    /// Map an operator as written inside `[...]` to its matcher.
    ///
    /// The empty operator is a bare existence check.
    #[must_use]
    pub fn from_operator(operator: &str) -> Option<Self> {
        match operator {
            "=" => Some(Self::Same),
            "|=" => Some(Self::ContainsPrefix),
            "~=" => Some(Self::ContainsWord),
            "$=" => Some(Self::End),
            "^=" => Some(Self::Start),
            "!=" => Some(Self::Not),
            "*=" => Some(Self::Contains),
            "" => Some(Self::Exists),
            _ => None,
        }
    }
}

/// One `#`/`.` shorthand and the attribute filter it stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shorthand {
    /// The prefix character.
    pub symbol: char,
    /// The attribute the shorthand constrains.
    pub attribute: &'static str,
    /// How the attribute is compared.
    pub matcher: Matcher,
}

/// [§ 6.6 Class selector](https://www.w3.org/TR/selectors-4/#class-html) and
/// [§ 6.7 ID selector](https://www.w3.org/TR/selectors-4/#id-selectors)
///
/// `#x` is `[id="x"]` and `.x` is `[class~="x"]`.
pub const SHORTHANDS: &[Shorthand] = &[
    Shorthand {
        symbol: '#',
        attribute: "id",
        matcher: Matcher::Same,
    },
    Shorthand {
        symbol: '.',
        attribute: "class",
        matcher: Matcher::ContainsWord,
    },
];

/// Look up the shorthand introduced by `symbol`.
#[must_use]
pub fn shorthand(symbol: char) -> Option<&'static Shorthand> {
    SHORTHANDS.iter().find(|s| s.symbol == symbol)
}

/// A single attribute constraint on an element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AttributeFilter {
    /// Attribute name (`id`/`class` for the shorthands).
    pub name: String,
    /// Comparison semantics.
    pub matcher: Matcher,
    /// Comparison operand; `None` only for bare existence checks.
    pub value: Option<String>,
}

impl AttributeFilter {
    /// Create an attribute filter.
    #[must_use]
    pub fn new(name: impl Into<String>, matcher: Matcher, value: Option<String>) -> Self {
        Self {
            name: name.into(),
            matcher,
            value,
        }
    }
}

/// [§ 4 Pseudo-classes](https://www.w3.org/TR/selectors-4/#pseudo-classes)
///
/// The pseudo-classes the emitter knows how to express in XPath.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "kebab-case")]
pub enum PseudoClass {
    /// [§ 4.12 :first-child](https://www.w3.org/TR/selectors-4/#the-first-child-pseudo)
    FirstChild,
    /// [§ 4.12 :last-child](https://www.w3.org/TR/selectors-4/#the-last-child-pseudo)
    LastChild,
    /// [§ 14.4.1 :nth-child()](https://www.w3.org/TR/selectors-4/#the-nth-child-pseudo)
    NthChild,
    /// [§ 4.3 :not()](https://www.w3.org/TR/selectors-4/#negation)
    Not,
}

/// A pseudo-selector as written: `:name` or `:name(value)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PseudoFilter {
    /// The name without the leading `:`.
    pub name: String,
    /// Everything between the outer parentheses, verbatim.
    pub value: Option<String>,
}

impl PseudoFilter {
    /// Resolve the name to a supported pseudo-class.
    ///
    /// # Errors
    ///
    /// Returns [`MalformedSelector::UnrecognizedPseudoSelector`] for any other name.
    pub fn class(&self) -> Result<PseudoClass, MalformedSelector> {
        self.name
            .parse()
            .map_err(|_| MalformedSelector::UnrecognizedPseudoSelector {
                name: self.name.clone(),
            })
    }
}

/// One simple-selector segment, bound to the previous rule by a combinator.
///
/// Example: `div.container > ul.nav li` scans as
/// ```text
/// [div.container] --(child)--> [ul.nav] --(descendant)--> [li]
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Rule {
    /// [§ 16.2 Child combinator](https://www.w3.org/TR/selectors-4/#child-combinators)
    /// `true` when this rule must match a direct child of the previous
    /// rule's match; `false` for the
    /// [descendant combinator](https://www.w3.org/TR/selectors-4/#descendant-combinators).
    pub direct_child: bool,
    /// Element name; `None` matches any element.
    pub tag_name: Option<String>,
    /// Attribute constraints in source order.
    pub attributes: Vec<AttributeFilter>,
    /// Pseudo-selectors in source order.
    pub pseudo_selectors: Vec<PseudoFilter>,
}

impl Rule {
    /// Create an unconstrained rule.
    #[must_use]
    pub const fn new(direct_child: bool) -> Self {
        Self {
            direct_child,
            tag_name: None,
            attributes: Vec::new(),
            pseudo_selectors: Vec::new(),
        }
    }

    /// Check if this rule carries no constraint at all (`*`).
    #[must_use]
    pub fn is_universal(&self) -> bool {
        self.tag_name.is_none() && self.attributes.is_empty() && self.pseudo_selectors.is_empty()
    }
}

//! CSS selector to XPath 1.0 translation.
//!
//! # Scope
//!
//! This crate implements:
//! - **Selector Scanner** ([Selectors Level 4](https://www.w3.org/TR/selectors-4/))
//!   - Type, universal, ID and class selectors
//!   - Attribute selectors: `[a]`, `=`, `~=`, `|=`, `^=`, `$=`, `*=` and the non-standard `!=`
//!   - Descendant and child combinators
//!   - Selector lists (`a, b`)
//!   - `:first-child`, `:last-child`, `:nth-child()`, `:not()`
//!
//! - **XPath Emitter** ([XPath 1.0](https://www.w3.org/TR/1999/REC-xpath-19991116/))
//!   - One location step per rule, anchored at the document element
//!   - Selector lists rendered as a union (`|`)
//!
//! # Not Implemented
//!
//! - Sibling combinators (`+`, `~`)
//! - Namespaces, escapes and case-insensitive attribute matching
//! - Any other pseudo-class or pseudo-element
//!
//! # Quirks
//!
//! The scanner is lenient: characters that do not start a known token are
//! treated as a combinator and reported through
//! [`css2xpath_common::warning`]. Positions such as `:first-child` and
//! `:nth-child()` are rendered with `position()` on the location step, i.e.
//! relative to the elements selected by that step.
//!
//! # Example
//!
//! ```
//! let xpath = css2xpath::translate("#id > .cls")?;
//! assert_eq!(
//!     xpath,
//!     r#"/*/descendant::*[@id="id"]/*[contains(concat(" ", @class, " "), " cls ")]"#
//! );
//! # Ok::<(), css2xpath::MalformedSelector>(())
//! ```

/// Translation errors.
pub mod error;
/// The rule model shared by the scanner and the emitter.
pub mod rule;
/// Selector scanning into rules.
pub mod scanner;
/// XPath emission from rules.
pub mod xpath;

pub use error::MalformedSelector;
pub use rule::{AttributeFilter, Matcher, PseudoClass, PseudoFilter, Rule};
pub use scanner::{SelectorScanner, parse_group, scan, split_selector_group};
pub use xpath::{render, render_group, render_predicates};

/// Translate a CSS selector (or selector list) into an XPath 1.0 expression.
///
/// # Errors
///
/// Returns [`MalformedSelector`] on the first construct that cannot be
/// scanned or expressed; no partial result is produced.
pub fn translate(selector: &str) -> Result<String, MalformedSelector> {
    let group = parse_group(selector)?;
    render_group(&group)
}

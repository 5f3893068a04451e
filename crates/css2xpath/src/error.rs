//! Translation errors.

use thiserror::Error;

/// A selector that cannot be translated.
///
/// Every failure aborts the whole translation; there are no partial results.
/// Offsets are byte offsets into the trimmed sub-selector being scanned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MalformedSelector {
    /// An attribute block was not closed by `]`.
    #[error("']' expected at offset {offset}, was '{found}'")]
    UnterminatedAttribute {
        /// Where `]` was expected.
        offset: usize,
        /// The text found instead (empty at end of input).
        found: String,
    },

    /// An attribute block used an operator outside `= |= ~= $= ^= != *=`.
    #[error("Unrecognized matcher at offset {offset}: '{operator}'")]
    UnrecognizedMatcher {
        /// Where the operator starts.
        offset: usize,
        /// The operator text.
        operator: String,
    },

    /// An attribute block did not start with an attribute name.
    #[error("Attribute name expected at offset {offset}")]
    MissingAttributeName {
        /// Where the name was expected.
        offset: usize,
    },

    /// A quoted attribute value ran to the end of the input.
    #[error("Unterminated attribute value starting at offset {offset}")]
    UnterminatedValue {
        /// Offset of the opening quote.
        offset: usize,
    },

    /// The pseudo-selector name is not one of the supported ones.
    #[error("Unrecognized pseudo selector '{name}'")]
    UnrecognizedPseudoSelector {
        /// The name as written.
        name: String,
    },

    /// A functional pseudo-selector was written without `(...)`.
    #[error("Pseudo selector '{name}' requires an argument")]
    MissingArgument {
        /// The pseudo-selector name.
        name: String,
    },

    /// The `:nth-child(...)` argument is neither an integer nor `an+b`.
    #[error("Invalid nth-child argument '{value}'")]
    InvalidNthChild {
        /// The raw argument.
        value: String,
    },

    /// The `:not(...)` argument is not a list of simple selectors.
    #[error("':not()' expects a simple selector, got '{selector}'")]
    InvalidNegation {
        /// The raw argument.
        selector: String,
    },

    /// `:not()` was nested deeper than the emitter allows.
    #[error("':not()' nested more than {limit} levels deep")]
    NegationTooDeep {
        /// The maximum nesting depth.
        limit: usize,
    },
}

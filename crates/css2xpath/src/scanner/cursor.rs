//! Offset cursor over an immutable selector string.

/// A read position into a borrowed selector.
///
/// Positions are byte offsets; every advance steps over a whole `char`.
#[derive(Debug, Clone, Copy)]
pub struct Cursor<'a> {
    /// The input string being scanned
    input: &'a str,
    /// Current position in the input
    position: usize,
}

impl<'a> Cursor<'a> {
    /// Create a cursor at the start of `input`.
    #[must_use]
    pub const fn new(input: &'a str) -> Self {
        Self { input, position: 0 }
    }

    /// Current byte offset.
    #[must_use]
    pub const fn position(&self) -> usize {
        self.position
    }

    /// The unconsumed remainder of the input.
    #[must_use]
    pub fn rest(&self) -> &'a str {
        &self.input[self.position..]
    }

    /// Peek at the next character without consuming it.
    #[must_use]
    pub fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    /// Consume the next character.
    pub fn consume(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.position += c.len_utf8();
        Some(c)
    }

    /// Consume the next character if it is `expected`.
    pub fn consume_if(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.position += expected.len_utf8();
            true
        } else {
            false
        }
    }

    /// Consume the longest prefix whose characters all satisfy `predicate`
    /// and return it. Stops at the first rejected character or at the end
    /// of input; the rejected character is left in place.
    pub fn extract_while(&mut self, mut predicate: impl FnMut(char) -> bool) -> &'a str {
        let rest = self.rest();
        let len = rest
            .char_indices()
            .find(|&(_, c)| !predicate(c))
            .map_or(rest.len(), |(i, _)| i);
        self.position += len;
        &rest[..len]
    }
}

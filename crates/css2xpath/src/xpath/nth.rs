//! `:nth-child()` arguments.
//!
//! [§ 14.4.1 :nth-child()](https://www.w3.org/TR/selectors-4/#the-nth-child-pseudo)
//! "The :nth-child(An+B) pseudo-class notation represents elements that are
//! among An+Bth elements from the list composed of their inclusive siblings."

use std::str::FromStr;

use crate::error::MalformedSelector;

/// A parsed `:nth-child()` argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NthChild {
    /// A plain integer: one fixed position.
    Index(i64),
    /// `factor`n + `offset`.
    Linear {
        /// Multiplier of `n`.
        factor: i64,
        /// Additive term.
        offset: i64,
    },
}

impl FromStr for NthChild {
    type Err = MalformedSelector;

    /// Parse an integer, `odd`, `even`, or a sum of `n` terms and constants
    /// such as `3n + 2`, `-n+3` or `2+3n`. Whitespace is allowed around the
    /// input and around `+`/`-` signs only.
    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let invalid = || MalformedSelector::InvalidNthChild {
            value: raw.to_owned(),
        };

        // Whitespace may only sit next to a sign: `3n + 2` but not `1 2n`.
        let mut compact = String::with_capacity(raw.len());
        let mut gap = false;
        for c in raw.trim().chars() {
            if c.is_whitespace() {
                gap = true;
                continue;
            }
            if gap && !compact.ends_with(['+', '-']) && !matches!(c, '+' | '-') {
                return Err(invalid());
            }
            gap = false;
            compact.push(c.to_ascii_lowercase());
        }

        match compact.as_str() {
            "odd" => return Ok(Self::Linear { factor: 2, offset: 1 }),
            "even" => return Ok(Self::Linear { factor: 2, offset: 0 }),
            _ => {}
        }
        if let Ok(index) = compact.parse::<i64>() {
            return Ok(Self::Index(index));
        }

        let mut factor: Option<i64> = None;
        let mut offset = 0i64;
        let mut rest = compact.as_str();
        let mut first = true;

        while !rest.is_empty() {
            let (sign, unsigned) = if let Some(tail) = rest.strip_prefix('+') {
                (1, tail)
            } else if let Some(tail) = rest.strip_prefix('-') {
                (-1, tail)
            } else if first {
                (1, rest)
            } else {
                return Err(invalid());
            };

            let digits_len = unsigned.bytes().take_while(u8::is_ascii_digit).count();
            let (digits, tail) = unsigned.split_at(digits_len);
            let magnitude = if digits.is_empty() {
                None
            } else {
                Some(digits.parse::<i64>().map_err(|_| invalid())?)
            };

            if let Some(tail) = tail.strip_prefix('n') {
                let term = sign * magnitude.unwrap_or(1);
                factor = Some(
                    factor
                        .unwrap_or(0)
                        .checked_add(term)
                        .ok_or_else(invalid)?,
                );
                rest = tail;
            } else {
                let term = sign * magnitude.ok_or_else(invalid)?;
                offset = offset.checked_add(term).ok_or_else(invalid)?;
                rest = tail;
            }
            first = false;
        }

        let factor = factor.ok_or_else(invalid)?;
        Ok(Self::Linear { factor, offset })
    }
}

impl NthChild {
    /// Render as an XPath predicate over `position()`.
    #[must_use]
    pub fn to_predicate(self) -> String {
        match self {
            Self::Index(index) | Self::Linear { factor: 0, offset: index } => {
                format!("position() = {index}")
            }
            Self::Linear { factor, offset } => {
                let shift = if offset > 0 {
                    format!("- {offset}")
                } else {
                    format!("+ {}", -i128::from(offset))
                };
                let cycle = format!("(position() {shift}) mod {} = 0", factor.unsigned_abs());
                if factor < 0 {
                    format!("{cycle} and position() <= {offset}")
                } else if offset >= 0 {
                    format!("{cycle} and position() >= {offset}")
                } else {
                    cycle
                }
            }
        }
    }
}

//! Operands combined with cursors, and one-shot unpacking.

use super::error::rejected;
use super::{ActionCursor, CursorError, Root};
use crate::value::{EvaluationError, Value};

/// Something a cursor step can be applied with.
///
/// A cursor operand is evaluated against the same binding as the cursor it
/// is combined with; a value operand is a constant.
#[derive(Debug, Clone)]
pub enum Operand {
    /// Another cursor.
    Cursor(ActionCursor),
    /// A constant.
    Value(Value),
    /// A cursor whose sequence result spreads into positional arguments.
    Spread(ActionCursor),
}

impl Operand {
    pub(crate) const fn cursor(&self) -> Option<&ActionCursor> {
        match self {
            Self::Cursor(cursor) | Self::Spread(cursor) => Some(cursor),
            Self::Value(_) => None,
        }
    }

    pub(crate) const fn is_spread(&self) -> bool {
        matches!(self, Self::Spread(_))
    }

    pub(crate) fn evaluate(&self, root: &Root) -> Result<Value, EvaluationError> {
        match self {
            Self::Cursor(cursor) | Self::Spread(cursor) => cursor.run(root.clone()),
            Self::Value(value) => Ok(value.clone()),
        }
    }

    pub(crate) fn repr(&self) -> String {
        match self {
            Self::Cursor(cursor) => cursor.internal_repr().to_string(),
            Self::Spread(cursor) => format!("*{}", cursor.adapted_repr(true)),
            Self::Value(value) => value.to_repr(),
        }
    }

    /// Returns the string constant, if this is one.
    pub(crate) fn as_str(&self) -> Option<&str> {
        match self {
            Self::Value(value) => value.as_str(),
            _ => None,
        }
    }
}

impl From<ActionCursor> for Operand {
    fn from(cursor: ActionCursor) -> Self {
        Self::Cursor(cursor)
    }
}

impl From<&ActionCursor> for Operand {
    fn from(cursor: &ActionCursor) -> Self {
        Self::Cursor(cursor.clone())
    }
}

impl From<Value> for Operand {
    fn from(value: Value) -> Self {
        Self::Value(value)
    }
}

macro_rules! operand_from_values {
    ($($source:ty),* $(,)?) => {
        $(
            impl From<$source> for Operand {
                fn from(value: $source) -> Self {
                    Self::Value(Value::from(value))
                }
            }
        )*
    };
}

operand_from_values!((), bool, i32, i64, f64, &str, String, Vec<Value>);

/// Builds a `Vec<Operand>` from cursors and plain values.
///
/// # Examples
///
/// ```rust
/// use actkit::cursor::{Operand, a};
/// use actkit::operands;
///
/// let operands = operands![a(), 1, "text"];
///
/// assert_eq!(operands.len(), 3);
/// assert!(matches!(operands[0], Operand::Cursor(_)));
/// ```
#[macro_export]
macro_rules! operands {
    ($($operand:expr),* $(,)?) => {
        ::std::vec![$($crate::cursor::Operand::from($operand)),*]
    };
}

/// A one-shot iterator yielding its cursor as a spread operand.
///
/// # Examples
///
/// ```rust
/// use actkit::cursor::{CursorError, a};
///
/// let mut unpacking = a().unpack();
///
/// assert!(unpacking.try_next().is_ok());
/// assert_eq!(unpacking.try_next().unwrap_err(), CursorError::UnpackingExhausted);
/// ```
#[derive(Debug, Clone)]
pub struct Unpacking {
    cursor: ActionCursor,
    was_unpacked: bool,
}

impl Unpacking {
    pub(crate) fn new(cursor: ActionCursor) -> Self {
        Self {
            cursor,
            was_unpacked: false,
        }
    }

    /// Returns the unpacked cursor.
    #[must_use]
    pub fn cursor(&self) -> &ActionCursor {
        &self.cursor
    }

    /// Yields the spread operand once.
    ///
    /// # Errors
    ///
    /// Returns [`CursorError::UnpackingExhausted`] on every later attempt.
    pub fn try_next(&mut self) -> Result<Operand, CursorError> {
        self.next().ok_or_else(|| rejected(CursorError::UnpackingExhausted))
    }
}

impl Iterator for Unpacking {
    type Item = Operand;

    fn next(&mut self) -> Option<Self::Item> {
        if self.was_unpacked {
            return None;
        }

        self.was_unpacked = true;
        Some(Operand::Spread(self.cursor.clone()))
    }
}

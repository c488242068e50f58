//! Errors raised by operations on dynamic values.

use crate::arguments::ArgumentError;

/// Failure of an operation performed on [`Value`](super::Value)s.
///
/// These are the errors a recorded cursor step surfaces unchanged: the cursor
/// layer adds no wrapping of its own.
///
/// # Examples
///
/// ```rust
/// use actkit::value::{EvaluationError, Value};
///
/// let error = Value::from(1).get_attribute("real").unwrap_err();
/// assert_eq!(format!("{error}"), "'int' object has no attribute 'real'");
///
/// let failure = EvaluationError::failed("out of stock");
/// assert_eq!(format!("{failure}"), "out of stock");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EvaluationError {
    /// A binary operation does not support the operand types.
    TypeMismatch {
        /// The operator symbol.
        operation: &'static str,
        /// Type name of the left operand.
        left: String,
        /// Type name of the right operand.
        right: String,
    },
    /// A unary operation does not support the operand type.
    UnaryTypeMismatch {
        /// The operator symbol.
        operation: &'static str,
        /// Type name of the operand.
        operand: String,
    },
    /// An ordering comparison does not support the operand types.
    NotComparable {
        /// The operator symbol.
        operation: &'static str,
        /// Type name of the left operand.
        left: String,
        /// Type name of the right operand.
        right: String,
    },
    /// Division or modulo by zero.
    DivisionByZero,
    /// Integer arithmetic left the `i64` range.
    Overflow {
        /// The operator symbol.
        operation: &'static str,
    },
    /// A shift by a negative amount.
    NegativeShift,
    /// A dot product of sequences of different lengths.
    ShapeMismatch {
        /// Length of the left sequence.
        left: usize,
        /// Length of the right sequence.
        right: usize,
    },
    /// Attribute lookup failed.
    MissingAttribute {
        /// Type name of the receiver.
        type_name: String,
        /// The attribute name.
        name: String,
    },
    /// Attribute assignment is not supported by the receiver.
    AttributeNotSettable {
        /// Type name of the receiver.
        type_name: String,
        /// The attribute name.
        name: String,
    },
    /// Sequence index outside the sequence.
    IndexOutOfRange {
        /// The requested index.
        index: i64,
        /// Length of the sequence.
        length: usize,
    },
    /// Mapping key lookup failed.
    MissingKey {
        /// The rendered key.
        key: String,
    },
    /// Item access or assignment is not supported by the receiver.
    NotSubscriptable {
        /// Type name of the receiver.
        type_name: String,
        /// Type name of the key.
        key_type: String,
    },
    /// A spread positional argument is not a sequence.
    NotIterable {
        /// Type name of the value.
        type_name: String,
    },
    /// A spread keyword argument is not a dict.
    NotMapping {
        /// Type name of the value.
        type_name: String,
    },
    /// The value cannot be called.
    NotCallable {
        /// Type name of the value.
        type_name: String,
    },
    /// A free identifier was not found in the evaluation scope.
    UnboundName {
        /// The identifier.
        name: String,
    },
    /// A function could not find one of its arguments.
    Argument(ArgumentError),
    /// A user function failed.
    Failed {
        /// Description of the failure.
        message: String,
    },
}

impl EvaluationError {
    /// Creates a failure for user functions.
    #[must_use]
    pub fn failed(message: &str) -> Self {
        Self::Failed {
            message: message.to_string(),
        }
    }
}

impl std::fmt::Display for EvaluationError {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TypeMismatch {
                operation,
                left,
                right,
            } => write!(
                formatter,
                "unsupported operand type(s) for {operation}: '{left}' and '{right}'"
            ),
            Self::UnaryTypeMismatch { operation, operand } => {
                write!(formatter, "bad operand type for unary {operation}: '{operand}'")
            }
            Self::NotComparable {
                operation,
                left,
                right,
            } => write!(
                formatter,
                "'{operation}' not supported between instances of '{left}' and '{right}'"
            ),
            Self::DivisionByZero => write!(formatter, "division by zero"),
            Self::Overflow { operation } => write!(formatter, "integer overflow in {operation}"),
            Self::NegativeShift => write!(formatter, "negative shift count"),
            Self::ShapeMismatch { left, right } => {
                write!(formatter, "shapes of length {left} and {right} do not match")
            }
            Self::MissingAttribute { type_name, name } => {
                write!(formatter, "'{type_name}' object has no attribute '{name}'")
            }
            Self::AttributeNotSettable { type_name, name } => {
                write!(formatter, "cannot set attribute '{name}' of '{type_name}' object")
            }
            Self::IndexOutOfRange { index, length } => {
                write!(formatter, "index {index} out of range for length {length}")
            }
            Self::MissingKey { key } => write!(formatter, "missing key {key}"),
            Self::NotSubscriptable {
                type_name,
                key_type,
            } => write!(
                formatter,
                "'{type_name}' object is not subscriptable by '{key_type}'"
            ),
            Self::NotIterable { type_name } => {
                write!(formatter, "argument after * must be a sequence, not '{type_name}'")
            }
            Self::NotMapping { type_name } => {
                write!(formatter, "argument after ** must be a dict, not '{type_name}'")
            }
            Self::NotCallable { type_name } => {
                write!(formatter, "'{type_name}' object is not callable")
            }
            Self::UnboundName { name } => write!(formatter, "name '{name}' is not defined"),
            Self::Argument(error) => write!(formatter, "{error}"),
            Self::Failed { message } => write!(formatter, "{message}"),
        }
    }
}

impl std::error::Error for EvaluationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Argument(error) => Some(error),
            _ => None,
        }
    }
}

impl From<ArgumentError> for EvaluationError {
    fn from(error: ArgumentError) -> Self {
        Self::Argument(error)
    }
}

//! Error types for cursor construction and invocation.

use tracing::debug;

use super::Parameter;
use crate::value::EvaluationError;

/// Logs a construction or usage error on its way to the caller.
pub(crate) fn rejected(error: CursorError) -> CursorError {
    debug!(%error, "action cursor rejected");
    error
}

/// A construction or usage error of an action cursor.
///
/// These errors are raised before any recorded step runs.
///
/// # Examples
///
/// ```rust
/// use actkit::cursor::{CursorError, a, action_cursor_with_priority};
///
/// let clashing = action_cursor_with_priority("other", 0);
/// let error = a().try_add(&clashing).unwrap_err();
///
/// assert!(matches!(error, CursorError::DuplicatePriority { .. }));
/// assert_eq!(
///     format!("{error}"),
///     "parameters with the same priority: a (0), other (0)"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CursorError {
    /// Two different parameters share a priority.
    DuplicatePriority {
        /// The clashing parameters.
        parameters: Vec<Parameter>,
    },
    /// More positional arguments than parameters.
    ExtraArguments {
        /// The surplus arguments, rendered.
        arguments: Vec<String>,
    },
    /// `set` on a cursor whose last step is not an attribute or item read.
    NowhereToSet,
    /// Priority of a cursor with several parameters.
    MulticursorPriority,
    /// Priority of a cursor without parameters.
    ConstantCursorPriority,
    /// A keyword argument names no parameter.
    UnexpectedKeyword {
        /// The keyword.
        name: String,
    },
    /// A parameter is bound both positionally and by keyword.
    DuplicateArgument {
        /// The parameter name.
        name: String,
    },
    /// A parameter is left unbound by a keyword invocation.
    MissingArgument {
        /// The parameter name.
        name: String,
    },
    /// A one-shot unpacking was consumed twice.
    UnpackingExhausted,
    /// Name resolution requested on a cursor that already records steps.
    NameOnExpression {
        /// The requested name.
        name: String,
    },
}

impl std::fmt::Display for CursorError {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DuplicatePriority { parameters } => {
                write!(formatter, "parameters with the same priority: ")?;
                for (position, parameter) in parameters.iter().enumerate() {
                    if position > 0 {
                        write!(formatter, ", ")?;
                    }
                    write!(formatter, "{} ({})", parameter.name(), parameter.priority())?;
                }
                Ok(())
            }
            Self::ExtraArguments { arguments } => {
                write!(formatter, "extra arguments: {}", arguments.join(", "))
            }
            Self::NowhereToSet => {
                write!(formatter, "setting a value when there is nowhere to set")
            }
            Self::MulticursorPriority => write!(formatter, "getting multicursor priority"),
            Self::ConstantCursorPriority => write!(formatter, "getting constant cursor priority"),
            Self::UnexpectedKeyword { name } => {
                write!(formatter, "unexpected keyword argument '{name}'")
            }
            Self::DuplicateArgument { name } => {
                write!(formatter, "multiple values for argument '{name}'")
            }
            Self::MissingArgument { name } => write!(formatter, "missing argument '{name}'"),
            Self::UnpackingExhausted => write!(formatter, "cursor unpacking is exhausted"),
            Self::NameOnExpression { name } => write!(
                formatter,
                "cannot resolve name '{name}' on a cursor that already records steps"
            ),
        }
    }
}

impl std::error::Error for CursorError {}

/// Any failure of a cursor invocation.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// The invocation itself is invalid.
    Cursor(CursorError),
    /// A recorded step failed.
    Evaluation(EvaluationError),
}

impl std::fmt::Display for Error {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Cursor(error) => write!(formatter, "{error}"),
            Self::Evaluation(error) => write!(formatter, "{error}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Cursor(error) => Some(error),
            Self::Evaluation(error) => Some(error),
        }
    }
}

impl From<CursorError> for Error {
    fn from(error: CursorError) -> Self {
        Self::Cursor(error)
    }
}

impl From<EvaluationError> for Error {
    fn from(error: EvaluationError) -> Self {
        Self::Evaluation(error)
    }
}

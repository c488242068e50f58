//! Error types for flag construction.

/// Represents an invalid flag construction.
///
/// # Examples
///
/// ```rust
/// use actkit::flag::{Flag, FlagError, flag, nothing};
///
/// let error = Flag::try_union(flag("first"), nothing()).unwrap_err();
/// assert_eq!(error, FlagError::CombiningWithNothing);
/// assert_eq!(format!("{error}"), "combining with \"nothing\"");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FlagError {
    /// A union was requested with the zero element as one of its sides.
    CombiningWithNothing,
    /// A value flag was requested around a value that is itself a flag.
    NestedFlag,
}

impl std::fmt::Display for FlagError {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CombiningWithNothing => write!(formatter, "combining with \"nothing\""),
            Self::NestedFlag => write!(formatter, "flag pointing to another flag"),
        }
    }
}

impl std::error::Error for FlagError {}

//! Error types for argument keys and packs.

/// Represents an invalid argument key or a failed lookup.
///
/// # Examples
///
/// ```rust
/// use actkit::arguments::{ArgumentError, ArgumentKey, ArgumentPack};
///
/// let pack: ArgumentPack<i32> = ArgumentPack::positional([1]);
/// let error = pack.get(&ArgumentKey::position(3)).unwrap_err();
///
/// assert_eq!(error, ArgumentError::MissingKey { key: "3".to_string() });
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ArgumentError {
    /// A positional key was given a name or a keyword key was given a position.
    KeyKindMismatch {
        /// The rendered key value.
        value: String,
        /// Whether the key was declared as a keyword.
        is_keyword: bool,
    },
    /// The key is absent from the pack and has no default.
    MissingKey {
        /// The rendered key.
        key: String,
    },
}

impl std::fmt::Display for ArgumentError {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::KeyKindMismatch {
                value,
                is_keyword: true,
            } => write!(formatter, "keyword ArgumentKey value must be a string, got {value}"),
            Self::KeyKindMismatch {
                value,
                is_keyword: false,
            } => write!(formatter, "positional ArgumentKey value must be an index, got {value}"),
            Self::MissingKey { key } => write!(formatter, "missing argument {key}"),
        }
    }
}

impl std::error::Error for ArgumentError {}

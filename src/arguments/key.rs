//! Typed keys addressing values inside an [`ArgumentPack`](super::ArgumentPack).

use std::fmt;
use std::hash::{Hash, Hasher};

use super::ArgumentError;

/// The address part of an [`ArgumentKey`]: a position or a keyword name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum KeyValue {
    /// Index into the positional arguments.
    Position(usize),
    /// Name of a keyword argument.
    Name(String),
}

impl fmt::Display for KeyValue {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Position(position) => write!(formatter, "{position}"),
            Self::Name(name) => write!(formatter, "{name}"),
        }
    }
}

impl From<usize> for KeyValue {
    fn from(position: usize) -> Self {
        Self::Position(position)
    }
}

impl From<&str> for KeyValue {
    fn from(name: &str) -> Self {
        Self::Name(name.to_string())
    }
}

impl From<String> for KeyValue {
    fn from(name: String) -> Self {
        Self::Name(name)
    }
}

/// A key for getting a value out of an [`ArgumentPack`](super::ArgumentPack).
///
/// Positional keys always hold a [`KeyValue::Position`] and keyword keys always
/// hold a [`KeyValue::Name`]. The optional default is used as a lookup
/// fallback only and never takes part in equality or hashing.
///
/// # Examples
///
/// ```rust
/// use actkit::arguments::{ArgumentKey, KeyValue};
///
/// let key: ArgumentKey<i32> = ArgumentKey::keyword("limit").with_default(10);
/// assert!(key.is_keyword());
/// assert_eq!(key, ArgumentKey::keyword("limit"));
/// assert_eq!(format!("{key}"), "limit=10");
///
/// assert!(ArgumentKey::<i32>::new(KeyValue::Position(0), true).is_err());
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ArgumentKey<V> {
    value: KeyValue,
    default: Option<V>,
}

impl<V> ArgumentKey<V> {
    /// Creates a key, checking that the value kind matches `is_keyword`.
    ///
    /// # Errors
    ///
    /// Returns [`ArgumentError::KeyKindMismatch`] for a keyword key holding a
    /// position or a positional key holding a name.
    pub fn new(value: KeyValue, is_keyword: bool) -> Result<Self, ArgumentError> {
        if matches!(value, KeyValue::Name(_)) != is_keyword {
            return Err(ArgumentError::KeyKindMismatch {
                value: value.to_string(),
                is_keyword,
            });
        }

        Ok(Self {
            value,
            default: None,
        })
    }

    /// Creates a positional key.
    #[must_use]
    pub const fn position(position: usize) -> Self {
        Self {
            value: KeyValue::Position(position),
            default: None,
        }
    }

    /// Creates a keyword key.
    #[must_use]
    pub fn keyword(name: &str) -> Self {
        Self {
            value: KeyValue::Name(name.to_string()),
            default: None,
        }
    }

    /// Returns the same key with a lookup fallback.
    #[must_use]
    pub fn with_default(self, default: V) -> Self {
        Self {
            value: self.value,
            default: Some(default),
        }
    }

    /// Returns the address of the key.
    #[must_use]
    pub const fn value(&self) -> &KeyValue {
        &self.value
    }

    /// Returns `true` for keyword keys.
    #[must_use]
    pub const fn is_keyword(&self) -> bool {
        matches!(self.value, KeyValue::Name(_))
    }

    /// Returns the lookup fallback, if any.
    #[must_use]
    pub const fn default_value(&self) -> Option<&V> {
        self.default.as_ref()
    }

    fn render(&self, formatter: &mut fmt::Formatter<'_>, with_position: bool) -> fmt::Result
    where
        V: fmt::Display,
    {
        match (&self.value, &self.default) {
            (KeyValue::Name(name), Some(default)) => write!(formatter, "{name}={default}"),
            (KeyValue::Name(name), None) => write!(formatter, "{name}=..."),
            (KeyValue::Position(position), _) if with_position => write!(formatter, "{position}"),
            (KeyValue::Position(_), _) => write!(formatter, "..."),
        }
    }
}

impl<V> PartialEq for ArgumentKey<V> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<V> Eq for ArgumentKey<V> {}

impl<V> Hash for ArgumentKey<V> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.value.hash(state);
    }
}

impl<V: fmt::Display> fmt::Display for ArgumentKey<V> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.render(formatter, true)
    }
}

impl<V> From<usize> for ArgumentKey<V> {
    fn from(position: usize) -> Self {
        Self::position(position)
    }
}

impl<V> From<&str> for ArgumentKey<V> {
    fn from(name: &str) -> Self {
        Self::keyword(name)
    }
}

/// An ordered collection of argument keys, split into positional and keyword
/// parts on demand.
///
/// # Examples
///
/// ```rust
/// use actkit::arguments::ArgumentPack;
///
/// let pack = ArgumentPack::new(vec![1, 2], [("x".to_string(), 3)]);
/// let keys = pack.keys();
///
/// assert_eq!(keys.positional().len(), 2);
/// assert_eq!(keys.keywords().len(), 1);
/// assert_eq!(format!("{keys}"), "(..., ..., x=...)");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArgumentKeys<V> {
    keys: Vec<ArgumentKey<V>>,
}

impl<V> ArgumentKeys<V> {
    /// Wraps keys in their given order.
    pub fn new<I>(keys: I) -> Self
    where
        I: IntoIterator<Item = ArgumentKey<V>>,
    {
        Self {
            keys: keys.into_iter().collect(),
        }
    }

    /// Returns the keyword keys without duplicates, in order.
    #[must_use]
    pub fn keywords(&self) -> Vec<&ArgumentKey<V>> {
        let mut keywords: Vec<&ArgumentKey<V>> = Vec::new();

        for key in self.keys.iter().filter(|key| key.is_keyword()) {
            if !keywords.contains(&key) {
                keywords.push(key);
            }
        }

        keywords
    }

    /// Returns the positional keys, in order.
    #[must_use]
    pub fn positional(&self) -> Vec<&ArgumentKey<V>> {
        self.keys.iter().filter(|key| !key.is_keyword()).collect()
    }

    /// Returns the addresses of all keys.
    #[must_use]
    pub fn values(&self) -> Vec<KeyValue> {
        self.keys.iter().map(|key| key.value().clone()).collect()
    }

    /// Returns the number of keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Returns `true` if there are no keys.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Returns `true` if `key` is one of the keys.
    #[must_use]
    pub fn contains(&self, key: &ArgumentKey<V>) -> bool {
        self.keys.contains(key)
    }

    /// Returns an iterator over the keys.
    pub fn iter(&self) -> std::slice::Iter<'_, ArgumentKey<V>> {
        self.keys.iter()
    }
}

impl<V> IntoIterator for ArgumentKeys<V> {
    type Item = ArgumentKey<V>;
    type IntoIter = std::vec::IntoIter<ArgumentKey<V>>;

    fn into_iter(self) -> Self::IntoIter {
        self.keys.into_iter()
    }
}

impl<V: fmt::Display> fmt::Display for ArgumentKeys<V> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "(")?;

        for (index, key) in self.keys.iter().enumerate() {
            if index > 0 {
                write!(formatter, ", ")?;
            }
            key.render(formatter, false)?;
        }

        write!(formatter, ")")
    }
}

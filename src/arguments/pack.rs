//! The [`ArgumentPack`] container.

use std::collections::BTreeMap;
use std::fmt;
use std::ops::{BitOr, Index};

use super::{ArgumentError, ArgumentKey, ArgumentKeys, KeyValue};

/// Positional and keyword arguments of an eventual call, decoupled from the
/// callee.
///
/// Every operation is pure and returns a new pack.
///
/// # Laws
///
/// ```text
/// pack.merge_with(&ArgumentPack::empty()) == pack
/// ArgumentPack::new(a, k).call(|a, k| (a.to_vec(), k.clone())) == (a, k)
/// ```
///
/// # Examples
///
/// ```rust
/// use actkit::arguments::{ArgumentKey, ArgumentPack};
///
/// let pack = ArgumentPack::new(vec![1, 2], [("scale".to_string(), 10)]);
///
/// assert_eq!(pack[0], 1);
/// assert_eq!(pack["scale"], 10);
/// assert_eq!(pack.get(&ArgumentKey::keyword("offset").with_default(0)), Ok(0));
///
/// let total = pack.call(|args, kwargs| (args[0] + args[1]) * kwargs["scale"]);
/// assert_eq!(total, 30);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ArgumentPack<T> {
    args: Vec<T>,
    kwargs: BTreeMap<String, T>,
}

impl<T> ArgumentPack<T> {
    /// Creates a pack from positional and keyword arguments.
    pub fn new<A, K>(args: A, kwargs: K) -> Self
    where
        A: IntoIterator<Item = T>,
        K: IntoIterator<Item = (String, T)>,
    {
        Self {
            args: args.into_iter().collect(),
            kwargs: kwargs.into_iter().collect(),
        }
    }

    /// Creates a pack with positional arguments only.
    pub fn positional<A>(args: A) -> Self
    where
        A: IntoIterator<Item = T>,
    {
        Self::new(args, [])
    }

    /// Creates a pack with no arguments.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            args: Vec::new(),
            kwargs: BTreeMap::new(),
        }
    }

    /// Returns the positional arguments.
    #[must_use]
    pub fn args(&self) -> &[T] {
        &self.args
    }

    /// Returns the keyword arguments.
    #[must_use]
    pub const fn kwargs(&self) -> &BTreeMap<String, T> {
        &self.kwargs
    }

    /// Splits the pack into its positional and keyword parts.
    #[must_use]
    pub fn into_parts(self) -> (Vec<T>, BTreeMap<String, T>) {
        (self.args, self.kwargs)
    }

    /// Returns the total number of arguments.
    #[must_use]
    pub fn len(&self) -> usize {
        self.args.len() + self.kwargs.len()
    }

    /// Returns `true` if the pack holds no arguments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.args.is_empty() && self.kwargs.is_empty()
    }

    /// Returns a key for every stored argument, positional ones first.
    #[must_use]
    pub fn keys(&self) -> ArgumentKeys<T> {
        ArgumentKeys::new(
            (0..self.args.len())
                .map(ArgumentKey::position)
                .chain(self.kwargs.keys().map(|name| ArgumentKey::keyword(name))),
        )
    }

    /// Returns `true` if the pack holds an argument under `key`.
    #[must_use]
    pub fn contains(&self, key: &ArgumentKey<T>) -> bool {
        self.lookup(key.value()).is_some()
    }

    /// Returns the positional argument at `position`.
    ///
    /// # Errors
    ///
    /// Returns [`ArgumentError::MissingKey`] if there is no such argument.
    pub fn positional_at(&self, position: usize) -> Result<&T, ArgumentError> {
        self.args.get(position).ok_or_else(|| ArgumentError::MissingKey {
            key: position.to_string(),
        })
    }

    /// Returns the keyword argument named `name`.
    ///
    /// # Errors
    ///
    /// Returns [`ArgumentError::MissingKey`] if there is no such argument.
    pub fn keyword(&self, name: &str) -> Result<&T, ArgumentError> {
        self.kwargs.get(name).ok_or_else(|| ArgumentError::MissingKey {
            key: name.to_string(),
        })
    }

    fn lookup(&self, value: &KeyValue) -> Option<&T> {
        match value {
            KeyValue::Position(position) => self.args.get(*position),
            KeyValue::Name(name) => self.kwargs.get(name),
        }
    }

    /// Returns the argument at `key`, falling back to the key's default.
    ///
    /// # Errors
    ///
    /// Returns [`ArgumentError::MissingKey`] when the argument is absent and
    /// the key has no default.
    pub fn get(&self, key: &ArgumentKey<T>) -> Result<T, ArgumentError>
    where
        T: Clone,
    {
        self.lookup(key.value())
            .or_else(|| key.default_value())
            .cloned()
            .ok_or_else(|| ArgumentError::MissingKey {
                key: key.value().to_string(),
            })
    }

    /// Concatenates positional arguments and unites keyword arguments, with
    /// `other` winning on duplicate names.
    #[must_use]
    pub fn merge_with(&self, other: &Self) -> Self
    where
        T: Clone,
    {
        let mut merged = self.clone();
        merged.args.extend(other.args.iter().cloned());
        merged.kwargs.extend(
            other
                .kwargs
                .iter()
                .map(|(name, value)| (name.clone(), value.clone())),
        );
        merged
    }

    /// Like [`merge_with`](Self::merge_with), building the other pack inline.
    #[must_use]
    pub fn expand_with<A, K>(&self, args: A, kwargs: K) -> Self
    where
        T: Clone,
        A: IntoIterator<Item = T>,
        K: IntoIterator<Item = (String, T)>,
    {
        self.merge_with(&Self::new(args, kwargs))
    }

    /// Projects the pack onto exactly the listed keys.
    ///
    /// Positional results keep the order of the listed positional keys.
    ///
    /// # Errors
    ///
    /// Returns [`ArgumentError::MissingKey`] for an absent key without default.
    pub fn only_with<'a, I>(&self, keys: I) -> Result<Self, ArgumentError>
    where
        T: Clone + 'a,
        I: IntoIterator<Item = &'a ArgumentKey<T>>,
    {
        let mut projected = Self::empty();

        for key in keys {
            let value = self.get(key)?;

            match key.value() {
                KeyValue::Position(_) => projected.args.push(value),
                KeyValue::Name(name) => {
                    projected.kwargs.insert(name.clone(), value);
                }
            }
        }

        Ok(projected)
    }

    /// Removes the arguments addressed by `keys`.
    #[must_use]
    pub fn without<'a, I>(&self, keys: I) -> Self
    where
        T: Clone + 'a,
        I: IntoIterator<Item = &'a ArgumentKey<T>>,
    {
        let excluded: Vec<&KeyValue> = keys.into_iter().map(ArgumentKey::value).collect();

        Self {
            args: self
                .args
                .iter()
                .enumerate()
                .filter(|(position, _)| !excluded.contains(&&KeyValue::Position(*position)))
                .map(|(_, value)| value.clone())
                .collect(),
            kwargs: self
                .kwargs
                .iter()
                .filter(|(name, _)| !excluded.contains(&&KeyValue::Name((*name).clone())))
                .map(|(name, value)| (name.clone(), value.clone()))
                .collect(),
        }
    }

    /// Removes every argument equal to one of `values`.
    ///
    /// Counterpart of [`without`](Self::without) addressing arguments by
    /// value instead of by key.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use actkit::arguments::ArgumentPack;
    ///
    /// let pack = ArgumentPack::new(vec![1, 2, 1], [("x".to_string(), 1), ("y".to_string(), 3)]);
    ///
    /// assert_eq!(format!("{}", pack.without_values(&[1])), "2, y=3");
    /// ```
    #[must_use]
    pub fn without_values(&self, values: &[T]) -> Self
    where
        T: Clone + PartialEq,
    {
        Self {
            args: self
                .args
                .iter()
                .filter(|value| !values.contains(*value))
                .cloned()
                .collect(),
            kwargs: self
                .kwargs
                .iter()
                .filter(|(_, value)| !values.contains(*value))
                .map(|(name, value)| (name.clone(), value.clone()))
                .collect(),
        }
    }

    /// Invokes `function` with the stored arguments.
    pub fn call<R, F>(&self, function: F) -> R
    where
        F: FnOnce(&[T], &BTreeMap<String, T>) -> R,
    {
        function(&self.args, &self.kwargs)
    }
}

impl<T> Default for ArgumentPack<T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T> From<Vec<T>> for ArgumentPack<T> {
    fn from(args: Vec<T>) -> Self {
        Self::positional(args)
    }
}

impl<T: Clone> BitOr for &ArgumentPack<T> {
    type Output = ArgumentPack<T>;

    fn bitor(self, other: Self) -> Self::Output {
        self.merge_with(other)
    }
}

impl<T: Clone> BitOr for ArgumentPack<T> {
    type Output = Self;

    fn bitor(self, other: Self) -> Self::Output {
        self.merge_with(&other)
    }
}

impl<T> Index<usize> for ArgumentPack<T> {
    type Output = T;

    fn index(&self, position: usize) -> &Self::Output {
        &self.args[position]
    }
}

impl<T> Index<&str> for ArgumentPack<T> {
    type Output = T;

    fn index(&self, name: &str) -> &Self::Output {
        &self.kwargs[name]
    }
}

impl<T: fmt::Display> fmt::Display for ArgumentPack<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered = self
            .args
            .iter()
            .map(ToString::to_string)
            .chain(self.kwargs.iter().map(|(name, value)| format!("{name}={value}")));

        for (index, argument) in rendered.enumerate() {
            if index > 0 {
                write!(formatter, ", ")?;
            }
            write!(formatter, "{argument}")?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn sample() -> ArgumentPack<i32> {
        ArgumentPack::new(vec![1, 2, 3], [("x".to_string(), 4), ("y".to_string(), 5)])
    }

    #[rstest]
    fn test_merge_concatenates_and_overrides() {
        let merged = sample().merge_with(&ArgumentPack::new(vec![6], [("x".to_string(), 7)]));

        assert_eq!(merged.args(), &[1, 2, 3, 6]);
        assert_eq!(merged.kwargs()["x"], 7);
        assert_eq!(merged.kwargs()["y"], 5);
    }

    #[rstest]
    fn test_merge_with_empty_is_identity() {
        assert_eq!(sample().merge_with(&ArgumentPack::empty()), sample());
        assert_eq!(&sample() | &ArgumentPack::empty(), sample());
    }

    #[rstest]
    fn test_expand_with_builds_pack_inline() {
        let expanded = sample().expand_with([9], [("z".to_string(), 0)]);

        assert_eq!(expanded.args(), &[1, 2, 3, 9]);
        assert_eq!(expanded.kwargs().len(), 3);
    }

    #[rstest]
    fn test_only_with_projects_keys() {
        let projected = sample()
            .only_with(&[ArgumentKey::position(2), ArgumentKey::keyword("y")])
            .unwrap();

        assert_eq!(projected, ArgumentPack::new(vec![3], [("y".to_string(), 5)]));
    }

    #[rstest]
    fn test_only_with_missing_key_fails() {
        let error = sample().only_with(&[ArgumentKey::keyword("w")]).unwrap_err();

        assert_eq!(error, ArgumentError::MissingKey { key: "w".to_string() });
    }

    #[rstest]
    fn test_without_is_complement_of_only_with() {
        let reduced = sample().without(&[ArgumentKey::position(0), ArgumentKey::keyword("x")]);

        assert_eq!(reduced, ArgumentPack::new(vec![2, 3], [("y".to_string(), 5)]));
    }

    #[rstest]
    fn test_default_is_used_only_when_absent() {
        let present = ArgumentKey::position(0).with_default(100);
        let absent = ArgumentKey::position(10).with_default(100);

        assert_eq!(sample().get(&present), Ok(1));
        assert_eq!(sample().get(&absent), Ok(100));
        assert!(!sample().contains(&absent));
    }

    #[rstest]
    fn test_display_lists_arguments() {
        assert_eq!(format!("{}", sample()), "1, 2, 3, x=4, y=5");
        assert_eq!(format!("{}", ArgumentPack::<i32>::empty()), "");
    }
}

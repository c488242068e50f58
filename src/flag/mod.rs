//! Algebraic flags - immutable, order-insensitive marker values.
//!
//! This module provides [`Flag`], a nominal or value-carrying marker that can
//! be combined with `|`, reduced with `-` and repeated with `*`.
//!
//! # Overview
//!
//! A flag is either *atomic* (a pure name/sign pair, or a wrapped value) or a
//! *union* of two flags. Unions compare "by or": a union equals anything that
//! equals at least one of its components.
//!
//! # Laws
//!
//! For all flags `x` and `y`:
//!
//! ```text
//! x | nothing == x
//! (x | y) == x
//! (x | y) == y
//! (x | x) == x
//! x - x == nothing
//! (x | y) - y == x        (when x != y)
//! x * 0 == nothing
//! x * 1 == x
//! x * 2 == x | x
//! ```
//!
//! `nothing` is the identity of `|` and is the only falsy nominal flag
//! created by the library.
//!
//! # Examples
//!
//! ```rust
//! use actkit::flag::{flag, nothing};
//!
//! let first = flag("first");
//! let second = flag("second");
//! let both = first.clone() | second.clone();
//!
//! assert!(both == first);
//! assert!(both == second);
//! assert_eq!(both.len(), 2);
//! assert!((both - second.clone()) == first);
//! assert!((first.clone() | nothing()) == first);
//! assert!(!nothing().sign());
//! ```

mod error;

pub use error::FlagError;

use std::collections::hash_map::DefaultHasher;
use std::convert::Infallible;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::{BitOr, Mul, Sub};
use std::rc::Rc;

const NOTHING_NAME: &str = "nothing";

enum FlagKind<T> {
    Nominal { name: Rc<str>, sign: bool },
    Value(Rc<T>),
    Union(Rc<Flag<T>>, Rc<Flag<T>>),
}

/// An immutable marker value with set-like equality.
///
/// `Flag<T>` is either atomic or a union of flags. Atomic flags are nominal
/// (identified by a name and a sign) or wrap a value of type `T`. Nominal-only
/// flags use the default `T = Infallible`.
///
/// # Type Parameters
///
/// * `T` - The type of values that value flags point to
///
/// # Examples
///
/// ```rust
/// use actkit::flag::Flag;
///
/// let one = Flag::value(1).unwrap();
/// let two = Flag::value(2).unwrap();
///
/// let numbers = one | two;
/// assert_eq!(numbers.len(), 2);
/// assert_eq!(format!("{numbers}"), "flag[1] | flag[2]");
/// ```
pub struct Flag<T = Infallible> {
    kind: FlagKind<T>,
}

/// The point of an atomic flag, as seen by [`Flag::filter`].
///
/// Nominal flags and unions point to themselves, value flags point to their
/// value.
#[derive(Debug)]
pub enum FlagPoint<'a, T> {
    /// The flag itself.
    Flag(&'a Flag<T>),
    /// The value wrapped by a value flag.
    Value(&'a T),
}

impl<T> Flag<T> {
    /// Creates a nominal flag.
    ///
    /// Equality and hashing of nominal flags are based on the name and the
    /// sign. The sign is what [`Flag::sign`] reports.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use actkit::flag::Flag;
    ///
    /// let bad: Flag<i32> = Flag::nominal("bad", false);
    /// assert!(!bad.sign());
    /// ```
    #[must_use]
    pub fn nominal(name: &str, sign: bool) -> Self {
        Self {
            kind: FlagKind::Nominal {
                name: Rc::from(name),
                sign,
            },
        }
    }

    /// Returns the zero element of `|`.
    #[must_use]
    pub fn nothing() -> Self {
        Self::nominal(NOTHING_NAME, false)
    }

    /// Creates a flag pointing to `point`.
    ///
    /// # Errors
    ///
    /// Returns [`FlagError::NestedFlag`] when `point` is itself a flag.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use actkit::flag::{Flag, FlagError, flag};
    ///
    /// assert!(Flag::value("text").is_ok());
    /// assert_eq!(Flag::value(flag("inner")).unwrap_err(), FlagError::NestedFlag);
    /// ```
    pub fn value(point: T) -> Result<Self, FlagError> {
        if points_to_flag::<T>() {
            return Err(FlagError::NestedFlag);
        }

        Ok(Self {
            kind: FlagKind::Value(Rc::new(point)),
        })
    }

    /// Creates a union node holding both flags.
    ///
    /// Unlike `|`, this never short-circuits on the zero element.
    ///
    /// # Errors
    ///
    /// Returns [`FlagError::CombiningWithNothing`] when either side is
    /// `nothing`, since such a union would collapse to the zero element.
    pub fn try_union(first: Self, second: Self) -> Result<Self, FlagError> {
        if first.is_nothing() || second.is_nothing() {
            return Err(FlagError::CombiningWithNothing);
        }

        Ok(Self::union_of(first, second))
    }

    fn union_of(first: Self, second: Self) -> Self {
        Self {
            kind: FlagKind::Union(Rc::new(first), Rc::new(second)),
        }
    }

    /// Returns `true` if this is the zero element.
    #[must_use]
    pub fn is_nothing(&self) -> bool {
        matches!(
            &self.kind,
            FlagKind::Nominal { name, sign: false } if &**name == NOTHING_NAME
        )
    }

    /// Returns `true` if this flag is a union of other flags.
    #[must_use]
    pub const fn is_union(&self) -> bool {
        matches!(self.kind, FlagKind::Union(..))
    }

    /// Truthiness of the flag.
    ///
    /// Nominal flags report their sign, value flags are always positive and a
    /// union is positive when any side is. Use [`Flag::sign_by`] to let value
    /// flags take the truthiness of their value.
    #[must_use]
    pub fn sign(&self) -> bool {
        self.sign_by(|_| true)
    }

    /// Truthiness of the flag, with value flags judged by `truthiness`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use actkit::flag::{Flag, flag_to};
    ///
    /// let nonzero = |value: &i32| *value != 0;
    ///
    /// assert!(!Flag::value(0).unwrap().sign_by(nonzero));
    /// assert!(flag_to([0, 1]).unwrap().sign_by(nonzero));
    /// ```
    #[must_use]
    pub fn sign_by<P>(&self, truthiness: P) -> bool
    where
        P: Fn(&T) -> bool,
    {
        self.atoms().any(|atom| match &atom.kind {
            FlagKind::Nominal { sign, .. } => *sign,
            FlagKind::Value(value) => truthiness(value),
            FlagKind::Union(..) => false,
        })
    }

    /// Returns the name of a nominal flag.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        match &self.kind {
            FlagKind::Nominal { name, .. } => Some(name),
            _ => None,
        }
    }

    /// Returns what this flag points to.
    #[must_use]
    pub fn point(&self) -> FlagPoint<'_, T> {
        match &self.kind {
            FlagKind::Value(value) => FlagPoint::Value(value),
            _ => FlagPoint::Flag(self),
        }
    }

    /// Returns the leftmost atomic component.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use actkit::flag::flag;
    ///
    /// let union = flag("a") | flag("b") | flag("c");
    /// assert_eq!(union.atomic().name(), Some("a"));
    /// ```
    #[must_use]
    pub fn atomic(&self) -> &Self {
        match &self.kind {
            FlagKind::Union(first, _) => first.atomic(),
            _ => self,
        }
    }

    /// Returns the number of atomic components, `0` for `nothing`.
    #[must_use]
    pub fn len(&self) -> usize {
        match &self.kind {
            FlagKind::Union(first, second) => first.len() + second.len(),
            _ if self.is_nothing() => 0,
            _ => 1,
        }
    }

    /// Returns `true` for the zero element.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns an iterator over the atomic components in union order.
    #[must_use]
    pub fn atoms(&self) -> Atoms<'_, T> {
        Atoms {
            pending: vec![self],
        }
    }

    /// Keeps only the atomic components whose point satisfies `predicate`.
    ///
    /// Returns `nothing` when no component matches.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use actkit::flag::{Flag, FlagPoint, flag_to};
    ///
    /// let numbers = flag_to([1, 2, 3, 4]).unwrap();
    /// let even = numbers.filter(|point| matches!(point, FlagPoint::Value(n) if *n % 2 == 0));
    ///
    /// assert_eq!(format!("{even}"), "flag[2] | flag[4]");
    /// ```
    #[must_use]
    pub fn filter<P>(&self, predicate: P) -> Self
    where
        P: Fn(FlagPoint<'_, T>) -> bool,
    {
        self.filter_by(&predicate)
    }

    fn filter_by<P>(&self, predicate: &P) -> Self
    where
        P: Fn(FlagPoint<'_, T>) -> bool,
    {
        match &self.kind {
            FlagKind::Union(first, second) => first.filter_by(predicate) | second.filter_by(predicate),
            _ if !self.is_nothing() && predicate(self.point()) => self.clone(),
            _ => Self::nothing(),
        }
    }

    /// Self-union `times` times; `nothing` for `times <= 0`.
    ///
    /// The repeated components form a balanced union, so its depth grows
    /// with the logarithm of `times`.
    #[must_use]
    pub fn times(&self, times: i64) -> Self {
        match &self.kind {
            FlagKind::Union(first, second) => first.times(times) | second.times(times),
            _ if times <= 0 => Self::nothing(),
            _ if times == 1 => self.clone(),
            _ => {
                let half = times / 2;
                self.times(half) | self.times(times - half)
            }
        }
    }

    fn hash_code(&self) -> u64
    where
        T: Hash,
    {
        match &self.kind {
            FlagKind::Nominal { name, sign } => {
                let mut hasher = DefaultHasher::new();
                name.hash(&mut hasher);
                sign.hash(&mut hasher);
                hasher.finish()
            }
            FlagKind::Value(value) => {
                let mut hasher = DefaultHasher::new();
                value.hash(&mut hasher);
                hasher.finish()
            }
            FlagKind::Union(first, second) => first.hash_code().wrapping_add(second.hash_code()),
        }
    }
}

impl<T: PartialEq> Flag<T> {
    /// Removes one atomic component equal to `other`.
    ///
    /// The right branch of a union is tried before the left one. Subtracting a
    /// union removes each of its components in turn.
    #[must_use]
    pub fn subtract(&self, other: &Self) -> Self {
        if let FlagKind::Union(first, second) = &other.kind {
            return self.subtract(second).subtract(first);
        }

        match &self.kind {
            FlagKind::Union(first, second) => {
                let reduced_second = second.subtract(other);

                if reduced_second.len() != second.len() {
                    return (**first).clone() | reduced_second;
                }

                let reduced_first = first.subtract(other);

                if reduced_first.len() != first.len() {
                    return reduced_first | (**second).clone();
                }

                self.clone()
            }
            _ if self == other => Self::nothing(),
            _ => self.clone(),
        }
    }
}

/// Returns `true` when `T` is one of the `Flag` instantiations.
///
/// `T` carries no bounds, so the check compares type names. Their format is
/// not guaranteed between compiler releases; an unrecognized name lets a
/// nested flag through rather than rejecting a plain value.
fn points_to_flag<T>() -> bool {
    let flag_type = std::any::type_name::<Flag>();
    let flag_path = flag_type.split('<').next().unwrap_or(flag_type);
    let point_type = std::any::type_name::<T>();

    point_type
        .strip_prefix(flag_path)
        .is_some_and(|rest| rest.is_empty() || rest.starts_with('<'))
}

/// Creates a positive nominal flag.
///
/// # Examples
///
/// ```rust
/// use actkit::flag::flag;
///
/// assert!(flag("ready") == flag("ready"));
/// assert!(flag("ready") != flag("done"));
/// assert!(flag("ready").sign());
/// ```
#[must_use]
pub fn flag(name: &str) -> Flag {
    Flag::nominal(name, true)
}

/// Returns the zero element of nominal flags.
#[must_use]
pub fn nothing() -> Flag {
    Flag::nothing()
}

/// Combines all flags with `|`; `nothing` for no flags.
#[must_use]
pub fn flag_sum<T, I>(flags: I) -> Flag<T>
where
    I: IntoIterator<Item = Flag<T>>,
{
    flags.into_iter().fold(Flag::nothing(), BitOr::bitor)
}

/// Wraps every value into a value flag and combines them with `|`.
///
/// # Errors
///
/// Returns [`FlagError::NestedFlag`] when the values are flags themselves.
pub fn flag_to<T, I>(values: I) -> Result<Flag<T>, FlagError>
where
    I: IntoIterator<Item = T>,
{
    values
        .into_iter()
        .map(Flag::value)
        .try_fold(Flag::nothing(), |sum, flag| Ok(sum | flag?))
}

/// Iterator over the atomic components of a flag.
///
/// Created by [`Flag::atoms`].
pub struct Atoms<'a, T> {
    pending: Vec<&'a Flag<T>>,
}

impl<'a, T> Iterator for Atoms<'a, T> {
    type Item = &'a Flag<T>;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(flag) = self.pending.pop() {
            match &flag.kind {
                FlagKind::Union(first, second) => {
                    self.pending.push(second);
                    self.pending.push(first);
                }
                _ if flag.is_nothing() => {}
                _ => return Some(flag),
            }
        }

        None
    }
}

impl<'a, T> IntoIterator for &'a Flag<T> {
    type Item = &'a Flag<T>;
    type IntoIter = Atoms<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.atoms()
    }
}

impl<T> Clone for Flag<T> {
    fn clone(&self) -> Self {
        let kind = match &self.kind {
            FlagKind::Nominal { name, sign } => FlagKind::Nominal {
                name: Rc::clone(name),
                sign: *sign,
            },
            FlagKind::Value(value) => FlagKind::Value(Rc::clone(value)),
            FlagKind::Union(first, second) => FlagKind::Union(Rc::clone(first), Rc::clone(second)),
        };

        Self { kind }
    }
}

impl<T: PartialEq> PartialEq for Flag<T> {
    fn eq(&self, other: &Self) -> bool {
        match (&self.kind, &other.kind) {
            (FlagKind::Union(first, second), _) => **first == *other || **second == *other,
            (_, FlagKind::Union(first, second)) => *self == **first || *self == **second,
            (
                FlagKind::Nominal { name, sign },
                FlagKind::Nominal {
                    name: other_name,
                    sign: other_sign,
                },
            ) => name == other_name && sign == other_sign,
            (FlagKind::Value(value), FlagKind::Value(other_value)) => value == other_value,
            _ => false,
        }
    }
}

// Union hashes are the sum of their sides, so `a | b` and `b | a` agree.
impl<T: Hash> Hash for Flag<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.hash_code());
    }
}

impl<T> BitOr for Flag<T> {
    type Output = Self;

    fn bitor(self, other: Self) -> Self::Output {
        if self.is_nothing() {
            other
        } else if other.is_nothing() {
            self
        } else {
            Self::union_of(self, other)
        }
    }
}

impl<T> BitOr for &Flag<T> {
    type Output = Flag<T>;

    fn bitor(self, other: Self) -> Self::Output {
        self.clone() | other.clone()
    }
}

impl<T: PartialEq> Sub for Flag<T> {
    type Output = Self;

    fn sub(self, other: Self) -> Self::Output {
        self.subtract(&other)
    }
}

impl<T: PartialEq> Sub for &Flag<T> {
    type Output = Flag<T>;

    fn sub(self, other: Self) -> Self::Output {
        self.subtract(other)
    }
}

impl<T> Mul<i64> for Flag<T> {
    type Output = Self;

    fn mul(self, times: i64) -> Self::Output {
        self.times(times)
    }
}

impl<T> Mul<i64> for &Flag<T> {
    type Output = Flag<T>;

    fn mul(self, times: i64) -> Self::Output {
        self.times(times)
    }
}

impl<T: fmt::Display> fmt::Display for Flag<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            FlagKind::Nominal { name, .. } => write!(formatter, "{name}"),
            FlagKind::Value(value) => write!(formatter, "flag[{value}]"),
            FlagKind::Union(first, second) => write!(formatter, "{first} | {second}"),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Flag<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            FlagKind::Nominal { name, sign } => {
                formatter.debug_tuple("Flag").field(name).field(sign).finish()
            }
            FlagKind::Value(value) => formatter.debug_tuple("Flag").field(value).finish(),
            FlagKind::Union(first, second) => write!(formatter, "{first:?} | {second:?}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn test_nothing_is_identity() {
        let first = flag("first");

        assert!((first.clone() | nothing()) == first);
        assert!((nothing() | first.clone()) == first);
        assert!((first | nothing()) != nothing());
        assert!(nothing() | nothing() == nothing());
    }

    #[rstest]
    fn test_union_equality_is_symmetric() {
        let union = flag("a") | flag("b");

        assert!(union == flag("a"));
        assert!(flag("a") == union);
        assert!(union == flag("b") | flag("c"));
        assert!(union != flag("c"));
    }

    #[rstest]
    fn test_sign_takes_part_in_equality() {
        assert!(Flag::<Infallible>::nominal("x", true) != Flag::nominal("x", false));
    }

    #[rstest]
    fn test_subtraction_tries_right_branch_first() {
        let union = flag("a") | flag("b") | flag("a");
        let reduced = union - flag("a");

        assert_eq!(reduced.len(), 2);
        assert_eq!(format!("{reduced}"), "a | b");
    }

    #[rstest]
    fn test_subtraction_of_absent_component_is_noop() {
        let union = flag("a") | flag("b");

        assert_eq!((union.clone() - flag("c")).len(), 2);
        assert!((flag("a") - flag("c")) == flag("a"));
    }

    #[rstest]
    fn test_subtraction_of_union() {
        let union = flag("a") | flag("b") | flag("c");
        let reduced = union - (flag("c") | flag("a"));

        assert_eq!(reduced.len(), 1);
        assert_eq!(reduced.name(), Some("b"));
    }

    #[rstest]
    #[case(-1, 0)]
    #[case(0, 0)]
    #[case(1, 1)]
    #[case(3, 3)]
    fn test_multiplication_repeats(#[case] times: i64, #[case] expected: usize) {
        assert_eq!((flag("a") * times).len(), expected);
    }

    #[rstest]
    fn test_large_multiplication_stays_shallow() {
        let repeated = flag("a") * 1_000_000;

        assert_eq!(repeated.len(), 1_000_000);
        assert_eq!(repeated.atoms().count(), 1_000_000);
        assert_eq!((repeated - flag("a")).len(), 999_999);
    }

    #[rstest]
    fn test_sign_by_judges_values() {
        let zero = Flag::value(0).unwrap();
        let nonzero = |value: &i32| *value != 0;

        assert!(zero.sign());
        assert!(!zero.sign_by(nonzero));
        assert!((zero.clone() | Flag::value(2).unwrap()).sign_by(nonzero));
        assert!((zero | Flag::nominal("on", true)).sign_by(nonzero));
        assert!(!Flag::<i32>::nothing().sign_by(nonzero));
    }

    #[rstest]
    fn test_union_multiplication_multiplies_each_side() {
        let doubled = (flag("a") | flag("b")) * 2;

        assert_eq!(format!("{doubled}"), "a | a | b | b");
    }

    #[rstest]
    fn test_atoms_skip_nothing_and_keep_order() {
        let union = flag("a") | flag("b") | flag("c");
        let names: Vec<_> = union.atoms().filter_map(Flag::name).collect();

        assert_eq!(names, vec!["a", "b", "c"]);
        assert_eq!(nothing().atoms().count(), 0);
    }

    #[rstest]
    fn test_try_union_rejects_nothing() {
        assert_eq!(
            Flag::try_union(nothing(), flag("a")).unwrap_err(),
            FlagError::CombiningWithNothing
        );
        assert!(Flag::try_union(flag("a"), flag("b")).is_ok());
    }

    #[rstest]
    fn test_value_flag_rejects_flags() {
        assert_eq!(Flag::value(flag("a")).unwrap_err(), FlagError::NestedFlag);
        assert_eq!(
            Flag::value(Flag::value(1).unwrap()).unwrap_err(),
            FlagError::NestedFlag
        );
        assert_eq!(
            Flag::value(Flag::<String>::nothing()).unwrap_err(),
            FlagError::NestedFlag
        );
        assert!(Flag::value(vec![flag("a")]).is_ok());
        assert!(Flag::value(Some(flag("a"))).is_ok());
    }

    #[rstest]
    fn test_filter_returns_nothing_without_matches() {
        let numbers = flag_to([1, 3, 5]).unwrap();
        let even = numbers.filter(|point| matches!(point, FlagPoint::Value(n) if n % 2 == 0));

        assert!(even.is_nothing());
    }

    #[rstest]
    fn test_hash_is_order_insensitive() {
        let mut first = DefaultHasher::new();
        (flag("a") | flag("b")).hash(&mut first);

        let mut second = DefaultHasher::new();
        (flag("b") | flag("a")).hash(&mut second);

        assert_eq!(first.finish(), second.finish());
    }

    #[rstest]
    fn test_flag_sum_of_empty_is_nothing() {
        let sum: Flag = flag_sum(Vec::new());

        assert!(sum.is_nothing());
        assert_eq!(flag_sum([flag("a"), flag("b")]).len(), 2);
    }
}

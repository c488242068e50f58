//! Values carried together with a side context, and helpers lifting plain
//! transformations into context-aware ones.

use std::fmt;
use std::rc::Rc;

/// A value together with a context describing it.
///
/// # Examples
///
/// ```rust
/// use actkit::chain::Contextual;
///
/// let root = Contextual::new(2, "meters");
/// let doubled = root.map_value(|value| value * 2);
///
/// assert_eq!(doubled.value(), &4);
/// assert_eq!(doubled.context(), &"meters");
/// assert_eq!(format!("{doubled}"), "4 when meters");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Contextual<V, C> {
    value: V,
    context: C,
}

impl<V, C> Contextual<V, C> {
    /// Pairs `value` with `context`.
    pub const fn new(value: V, context: C) -> Self {
        Self { value, context }
    }

    /// Returns the main value.
    pub const fn value(&self) -> &V {
        &self.value
    }

    /// Returns the context.
    pub const fn context(&self) -> &C {
        &self.context
    }

    /// Splits into value and context.
    pub fn into_parts(self) -> (V, C) {
        (self.value, self.context)
    }

    /// Returns the main value, dropping the context.
    pub fn into_value(self) -> V {
        self.value
    }

    /// Transforms the value, keeping the context.
    pub fn map_value<W, F>(self, function: F) -> Contextual<W, C>
    where
        F: FnOnce(V) -> W,
    {
        Contextual::new(function(self.value), self.context)
    }

    /// Transforms the context, keeping the value.
    pub fn map_context<D, F>(self, function: F) -> Contextual<V, D>
    where
        F: FnOnce(C) -> D,
    {
        Contextual::new(self.value, function(self.context))
    }
}

impl<V: fmt::Display, C: fmt::Display> fmt::Display for Contextual<V, C> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{} when {}", self.value, self.context)
    }
}

/// Lifts a value transformation; the context passes through untouched.
///
/// # Examples
///
/// ```rust
/// use actkit::chain::{Contextual, saving_context};
///
/// let increment = saving_context(|value: i32| Ok::<_, ()>(value + 1));
/// let result = increment(Contextual::new(1, "context")).unwrap();
///
/// assert_eq!(result, Contextual::new(2, "context"));
/// ```
pub fn saving_context<V, C, E, F>(node: F) -> impl Fn(Contextual<V, C>) -> Result<Contextual<V, C>, E>
where
    F: Fn(V) -> Result<V, E>,
{
    move |root| {
        let (value, context) = root.into_parts();
        Ok(Contextual::new(node(value)?, context))
    }
}

/// Lifts a transformation that reads the context to compute the next value.
pub fn reading<V, C, E, F>(node: F) -> impl Fn(Contextual<V, C>) -> Result<Contextual<V, C>, E>
where
    F: Fn(V, &C) -> Result<V, E>,
{
    move |root| {
        let (value, context) = root.into_parts();
        let value = node(value, &context)?;
        Ok(Contextual::new(value, context))
    }
}

/// Lifts a transformation that rewrites the context from the current value.
///
/// The value itself passes through untouched.
pub fn writing<V, C, E, F>(node: F) -> impl Fn(Contextual<V, C>) -> Result<Contextual<V, C>, E>
where
    F: Fn(&V, C) -> Result<C, E>,
{
    move |root| {
        let (value, context) = root.into_parts();
        let context = node(&value, context)?;
        Ok(Contextual::new(value, context))
    }
}

type PlainNode<V, E> = Rc<dyn Fn(V) -> Result<V, E>>;
type ReadingNode<V, C, E> = Rc<dyn Fn(V, &C) -> Result<V, E>>;
type WritingNode<V, C, E> = Rc<dyn Fn(&V, C) -> Result<C, E>>;

/// A node tagged with the way it interacts with the context.
pub enum ContextualNode<V, C, E> {
    /// Transforms the value only.
    Plain(PlainNode<V, E>),
    /// Reads the context to produce the value.
    Reading(ReadingNode<V, C, E>),
    /// Writes the context from the value.
    Writing(WritingNode<V, C, E>),
}

impl<V, C, E> Clone for ContextualNode<V, C, E> {
    fn clone(&self) -> Self {
        match self {
            Self::Plain(node) => Self::Plain(Rc::clone(node)),
            Self::Reading(node) => Self::Reading(Rc::clone(node)),
            Self::Writing(node) => Self::Writing(Rc::clone(node)),
        }
    }
}

/// Lifts a tagged node according to its tag.
///
/// # Examples
///
/// ```rust
/// use std::rc::Rc;
/// use actkit::chain::{Contextual, ContextualNode, considering_context};
///
/// let read_limit = considering_context(ContextualNode::Reading(Rc::new(
///     |_value: i32, limit: &i32| Ok::<_, ()>(*limit),
/// )));
///
/// assert_eq!(read_limit(Contextual::new(0, 7)).unwrap().into_value(), 7);
/// ```
pub fn considering_context<V, C, E>(
    node: ContextualNode<V, C, E>,
) -> impl Fn(Contextual<V, C>) -> Result<Contextual<V, C>, E> {
    move |root| {
        let (value, context) = root.into_parts();

        match &node {
            ContextualNode::Plain(node) => Ok(Contextual::new(node(value)?, context)),
            ContextualNode::Reading(node) => {
                let value = node(value, &context)?;
                Ok(Contextual::new(value, context))
            }
            ContextualNode::Writing(node) => {
                let context = node(&value, context)?;
                Ok(Contextual::new(value, context))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn test_reading_uses_context() {
        let scaled = reading(|value: i32, factor: &i32| Ok::<_, ()>(value * factor));

        assert_eq!(scaled(Contextual::new(3, 4)), Ok(Contextual::new(12, 4)));
    }

    #[rstest]
    fn test_writing_keeps_value() {
        let remember = writing(|value: &i32, _: i32| Ok::<_, ()>(*value));

        assert_eq!(remember(Contextual::new(5, 0)), Ok(Contextual::new(5, 5)));
    }

    #[rstest]
    fn test_saving_context_propagates_errors() {
        let failing = saving_context(|_: i32| Err::<i32, _>("failed"));

        assert_eq!(failing(Contextual::new(1, ())), Err("failed"));
    }

    #[rstest]
    fn test_considering_context_plain_node() {
        let node = considering_context(ContextualNode::Plain(Rc::new(|value: i32| {
            Ok::<_, ()>(value - 1)
        })));

        assert_eq!(node(Contextual::new(1, 'c')), Ok(Contextual::new(0, 'c')));
    }
}

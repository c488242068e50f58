//! Sequential composition of fallible steps.

use std::fmt;
use std::rc::Rc;

type Step<T, E> = Rc<dyn Fn(T) -> Result<T, E>>;

/// An ordered composition of `T -> Result<T, E>` steps.
///
/// Each step receives the output of the previous one; the first error stops
/// the chain. An empty chain returns its input unchanged.
///
/// Chains are persistent: [`then`](Self::then) and [`concat`](Self::concat)
/// return new chains sharing the steps of their sources.
///
/// # Laws
///
/// ```text
/// ActionChain::new().call(x) == Ok(x)
/// a.concat(&b).call(x) == a.call(x).and_then(|y| b.call(y))
/// ```
///
/// # Examples
///
/// ```rust
/// use actkit::chain::ActionChain;
///
/// let chain: ActionChain<i32, String> = ActionChain::new()
///     .then(|x| Ok(x + 1))
///     .then(|x| Ok(x * 10));
///
/// assert_eq!(chain.len(), 2);
/// assert_eq!(chain.call(1), Ok(20));
///
/// let guarded = chain.then(|x| if x > 100 { Err(format!("{x} is too big")) } else { Ok(x) });
/// assert_eq!(guarded.call(10), Err("110 is too big".to_string()));
/// ```
pub struct ActionChain<T, E> {
    steps: Rc<[Step<T, E>]>,
}

impl<T, E> ActionChain<T, E> {
    /// Creates an empty chain.
    #[must_use]
    pub fn new() -> Self {
        Self {
            steps: Rc::from(Vec::new()),
        }
    }

    /// Creates a chain from boxed steps, keeping their order.
    pub fn from_steps<I>(steps: I) -> Self
    where
        I: IntoIterator<Item = Rc<dyn Fn(T) -> Result<T, E>>>,
    {
        Self {
            steps: steps.into_iter().collect(),
        }
    }

    /// Creates a chain of a single step.
    pub fn single<F>(step: F) -> Self
    where
        F: Fn(T) -> Result<T, E> + 'static,
    {
        Self::new().then(step)
    }

    /// Returns the number of steps.
    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Returns `true` if the chain has no steps.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Returns a clone of this chain with `step` appended.
    #[must_use]
    pub fn then<F>(&self, step: F) -> Self
    where
        F: Fn(T) -> Result<T, E> + 'static,
    {
        let mut steps: Vec<Step<T, E>> = self.steps.iter().map(Rc::clone).collect();
        steps.push(Rc::new(step));

        Self {
            steps: Rc::from(steps),
        }
    }

    /// Returns a chain running this chain and then `other`.
    #[must_use]
    pub fn concat(&self, other: &Self) -> Self {
        if other.is_empty() {
            return self.clone();
        }

        if self.is_empty() {
            return other.clone();
        }

        Self {
            steps: self.steps.iter().chain(other.steps.iter()).map(Rc::clone).collect(),
        }
    }

    /// Runs every step in order.
    ///
    /// # Errors
    ///
    /// Returns the first error produced by a step.
    pub fn call(&self, input: T) -> Result<T, E> {
        self.steps.iter().try_fold(input, |value, step| step(value))
    }
}

impl<T, E> Clone for ActionChain<T, E> {
    fn clone(&self) -> Self {
        Self {
            steps: Rc::clone(&self.steps),
        }
    }
}

impl<T, E> Default for ActionChain<T, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, E> fmt::Debug for ActionChain<T, E> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "ActionChain(<{} steps>)", self.steps.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn test_empty_chain_returns_input() {
        let chain: ActionChain<i32, ()> = ActionChain::new();

        assert_eq!(chain.call(7), Ok(7));
        assert!(chain.is_empty());
    }

    #[rstest]
    fn test_then_does_not_touch_source() {
        let source: ActionChain<i32, ()> = ActionChain::single(|x| Ok(x + 1));
        let extended = source.then(|x| Ok(x * 2));

        assert_eq!(source.len(), 1);
        assert_eq!(source.call(1), Ok(2));
        assert_eq!(extended.call(1), Ok(4));
    }

    #[rstest]
    fn test_concat_runs_left_then_right() {
        let left: ActionChain<String, ()> = ActionChain::single(|text| Ok(text + "a"));
        let right: ActionChain<String, ()> = ActionChain::single(|text| Ok(text + "b"));

        assert_eq!(left.concat(&right).call(String::new()), Ok("ab".to_string()));
        assert_eq!(right.concat(&left).call(String::new()), Ok("ba".to_string()));
    }

    #[rstest]
    fn test_from_steps_keeps_order() {
        let steps: Vec<Rc<dyn Fn(i32) -> Result<i32, ()>>> =
            vec![Rc::new(|x| Ok(x - 1)), Rc::new(|x| Ok(x * 3))];

        assert_eq!(ActionChain::from_steps(steps).call(2), Ok(3));
    }

    #[rstest]
    fn test_error_stops_chain() {
        let chain: ActionChain<i32, &str> = ActionChain::single(|_| Err("stop"))
            .then(|_| panic!("unreachable step"));

        assert_eq!(chain.call(0), Err("stop"));
    }
}

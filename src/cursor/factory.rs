//! Named cursors and the priorities they bind with.
//!
//! Letter cursors have fixed priorities in alphabetical order, so `b() - a()`
//! still binds its first argument to `a`. Cursors made by
//! [`action_cursor_by`] draw later priorities from a process-wide counter.

use std::sync::atomic::{AtomicI64, Ordering};

use super::error::rejected;
use super::{ActionCursor, CursorError, Parameter, Priority};

/// A monotonically increasing source of parameter priorities.
///
/// # Examples
///
/// ```rust
/// use actkit::cursor::PriorityCounter;
///
/// let counter = PriorityCounter::starting_at(10);
/// let first = counter.cursor_by("first");
/// let second = counter.cursor_by("second");
///
/// assert_eq!(first.parameters().names(), vec!["first"]);
/// assert_eq!(format!("{}", (second - first)), "<action(first, second): second - first>");
/// ```
#[derive(Debug)]
pub struct PriorityCounter {
    next: AtomicI64,
}

impl PriorityCounter {
    /// Creates a counter whose first priority is `start`.
    #[must_use]
    pub const fn starting_at(start: Priority) -> Self {
        Self {
            next: AtomicI64::new(start),
        }
    }

    /// Returns the next priority.
    pub fn next_priority(&self) -> Priority {
        self.next.fetch_add(1, Ordering::Relaxed)
    }

    /// Creates a cursor named `name` with the next priority.
    pub fn cursor_by(&self, name: &str) -> ActionCursor {
        action_cursor_with_priority(name, self.next_priority())
    }
}

impl Default for PriorityCounter {
    fn default() -> Self {
        Self::starting_at(0)
    }
}

/// Priorities below this are taken by the letter cursors.
const FIRST_FREE_PRIORITY: Priority = 25;

static PRIORITIES: PriorityCounter = PriorityCounter::starting_at(FIRST_FREE_PRIORITY);

/// Creates a cursor named `name`, binding after every cursor created before.
#[must_use]
pub fn action_cursor_by(name: &str) -> ActionCursor {
    PRIORITIES.cursor_by(name)
}

/// Creates a cursor named `name` with an explicit priority.
#[must_use]
pub fn action_cursor_with_priority(name: &str, priority: Priority) -> ActionCursor {
    ActionCursor::operated_by(Parameter::new(name, priority))
}

/// Returns the priority of a single-parameter cursor.
///
/// # Errors
///
/// Returns [`CursorError::MulticursorPriority`] for several parameters and
/// [`CursorError::ConstantCursorPriority`] for none.
///
/// # Examples
///
/// ```rust
/// use actkit::cursor::{CursorError, a, act, b, c, priority_of};
///
/// assert_eq!(priority_of(&c()), Ok(2));
/// assert_eq!(priority_of(&(a() + 1)), Ok(0));
/// assert_eq!(priority_of(&(a() + b())), Err(CursorError::MulticursorPriority));
/// assert_eq!(priority_of(&act()), Err(CursorError::ConstantCursorPriority));
/// ```
pub fn priority_of(cursor: &ActionCursor) -> Result<Priority, CursorError> {
    let mut parameters = cursor.parameters().iter();

    match (parameters.next(), parameters.next()) {
        (Some(parameter), None) => Ok(parameter.priority()),
        (Some(_), Some(_)) => Err(rejected(CursorError::MulticursorPriority)),
        (None, _) => Err(rejected(CursorError::ConstantCursorPriority)),
    }
}

/// Creates an empty cursor, the root of packing and name resolution.
#[must_use]
pub fn act() -> ActionCursor {
    ActionCursor::new()
}

/// Creates an empty cursor; the same as [`act`].
#[must_use]
pub fn placeholder() -> ActionCursor {
    ActionCursor::new()
}

macro_rules! letters {
    ($($name:ident = $priority:literal),* $(,)?) => {
        $(
            #[doc = concat!("The cursor `", stringify!($name), "`, priority ", stringify!($priority), ".")]
            #[must_use]
            pub fn $name() -> ActionCursor {
                action_cursor_with_priority(stringify!($name), $priority)
            }
        )*
    };
}

letters! {
    a = 0, b = 1, c = 2, d = 3, e = 4, g = 5, h = 6, i = 7, j = 8, k = 9,
    l = 10, m = 11, n = 12, o = 13, p = 14, q = 15, r = 16, s = 17, t = 18,
    u = 19, v = 20, w = 21, x = 22, y = 23, z = 24,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn test_counter_is_monotonic() {
        let counter = PriorityCounter::default();

        assert_eq!(counter.next_priority(), 0);
        assert_eq!(counter.next_priority(), 1);
        assert_eq!(priority_of(&counter.cursor_by("third")), Ok(2));
    }

    #[rstest]
    fn test_named_cursors_bind_after_letters() {
        let first = action_cursor_by("first");
        let second = action_cursor_by("second");

        let first_priority = priority_of(&first).unwrap();
        assert!(first_priority >= FIRST_FREE_PRIORITY);
        assert!(priority_of(&second).unwrap() > first_priority);
        assert_eq!((z() + first).parameters().names(), vec!["z", "first"]);
    }

    #[rstest]
    #[case(a(), 0)]
    #[case(e(), 4)]
    #[case(g(), 5)]
    #[case(z(), 24)]
    fn test_letter_priorities(#[case] cursor: ActionCursor, #[case] expected: Priority) {
        assert_eq!(priority_of(&cursor), Ok(expected));
    }

    #[rstest]
    fn test_placeholder_is_empty() {
        assert!(placeholder().is_empty());
        assert_eq!(format!("{}", placeholder()), "<action(): ...>");
    }
}

//! Cursor parameters and the priority-ordered set holding them.

use std::fmt;
use std::rc::Rc;

use smallvec::SmallVec;

use super::CursorError;

/// Parameters stored inline before spilling to the heap.
const INLINE_PARAMETERS: usize = 4;

/// Order in which positional arguments bind to parameters; lower binds first.
pub type Priority = i64;

/// A named parameter of an action cursor.
///
/// Parameters order by priority, then by name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Parameter {
    priority: Priority,
    name: Rc<str>,
}

impl Parameter {
    /// Creates a parameter.
    #[must_use]
    pub fn new(name: &str, priority: Priority) -> Self {
        Self {
            priority,
            name: Rc::from(name),
        }
    }

    /// Returns the name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the name as a shared string.
    #[must_use]
    pub fn shared_name(&self) -> Rc<str> {
        Rc::clone(&self.name)
    }

    /// Returns the priority.
    #[must_use]
    pub const fn priority(&self) -> Priority {
        self.priority
    }
}

impl fmt::Display for Parameter {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}", self.name)
    }
}

/// A set of parameters sorted by priority, unique on priority.
///
/// Identical parameters collapse into one; two different parameters sharing a
/// priority are rejected.
///
/// # Examples
///
/// ```rust
/// use actkit::cursor::{Parameter, ParameterSet};
///
/// let set = ParameterSet::try_from_parameters([
///     Parameter::new("b", 1),
///     Parameter::new("a", 0),
///     Parameter::new("b", 1),
/// ])
/// .unwrap();
///
/// assert_eq!(set.names(), vec!["a", "b"]);
/// assert!(ParameterSet::try_from_parameters([Parameter::new("a", 0), Parameter::new("c", 0)]).is_err());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParameterSet {
    parameters: SmallVec<[Parameter; INLINE_PARAMETERS]>,
}

impl ParameterSet {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a set of one parameter.
    #[must_use]
    pub fn single(parameter: Parameter) -> Self {
        let mut parameters = SmallVec::new();
        parameters.push(parameter);
        Self { parameters }
    }

    /// Sorts, deduplicates and validates `parameters`.
    ///
    /// # Errors
    ///
    /// Returns [`CursorError::DuplicatePriority`] listing every parameter
    /// involved in a clash.
    pub fn try_from_parameters<I>(parameters: I) -> Result<Self, CursorError>
    where
        I: IntoIterator<Item = Parameter>,
    {
        let mut parameters: SmallVec<[Parameter; INLINE_PARAMETERS]> =
            parameters.into_iter().collect();
        parameters.sort();
        parameters.dedup();

        let mut clashing: Vec<Parameter> = parameters
            .windows(2)
            .filter(|pair| pair[0].priority == pair[1].priority)
            .flat_map(|pair| pair.iter().cloned())
            .collect();

        if clashing.is_empty() {
            Ok(Self { parameters })
        } else {
            clashing.dedup();
            Err(CursorError::DuplicatePriority {
                parameters: clashing,
            })
        }
    }

    /// Returns the union of both sets.
    ///
    /// # Errors
    ///
    /// Returns [`CursorError::DuplicatePriority`] when the union has a clash.
    pub fn merge(&self, other: &Self) -> Result<Self, CursorError> {
        if other.is_empty() {
            return Ok(self.clone());
        }

        Self::try_from_parameters(self.iter().chain(other.iter()).cloned())
    }

    /// Returns the number of parameters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.parameters.len()
    }

    /// Returns `true` if there are no parameters.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.parameters.is_empty()
    }

    /// Iterates in binding order.
    pub fn iter(&self) -> std::slice::Iter<'_, Parameter> {
        self.parameters.iter()
    }

    /// Returns the names in binding order.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        self.iter().map(Parameter::name).collect()
    }

    /// Returns the parameter named `name`.
    #[must_use]
    pub fn find(&self, name: &str) -> Option<&Parameter> {
        self.iter().find(|parameter| parameter.name() == name)
    }
}

impl<'a> IntoIterator for &'a ParameterSet {
    type Item = &'a Parameter;
    type IntoIter = std::slice::Iter<'a, Parameter>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn test_sorted_by_priority() {
        let set = ParameterSet::try_from_parameters([
            Parameter::new("late", 10),
            Parameter::new("early", -1),
        ])
        .unwrap();

        assert_eq!(set.names(), vec!["early", "late"]);
    }

    #[rstest]
    fn test_merge_collapses_shared_parameter() {
        let left = ParameterSet::single(Parameter::new("a", 0));
        let right = ParameterSet::try_from_parameters([
            Parameter::new("a", 0),
            Parameter::new("b", 1),
        ])
        .unwrap();

        assert_eq!(left.merge(&right).unwrap().len(), 2);
    }

    #[rstest]
    fn test_clash_lists_all_parameters() {
        let error = ParameterSet::try_from_parameters([
            Parameter::new("x", 3),
            Parameter::new("y", 3),
            Parameter::new("z", 3),
        ])
        .unwrap_err();

        assert_eq!(
            error,
            CursorError::DuplicatePriority {
                parameters: vec![
                    Parameter::new("x", 3),
                    Parameter::new("y", 3),
                    Parameter::new("z", 3),
                ]
            }
        );
    }
}

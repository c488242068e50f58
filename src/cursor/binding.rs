//! The environment a cursor is evaluated in.

use std::collections::BTreeMap;
use std::rc::Rc;

use crate::value::{EvaluationError, Value};

#[cfg(feature = "fxhash")]
type ArgumentMap = rustc_hash::FxHashMap<Rc<str>, Value>;

#[cfg(not(feature = "fxhash"))]
type ArgumentMap = std::collections::HashMap<Rc<str>, Value>;

/// Values of free identifiers read by name-resolving cursors.
///
/// A scope is supplied explicitly by the caller of a cursor; names missing
/// from it fail with [`EvaluationError::UnboundName`].
///
/// # Examples
///
/// ```rust
/// use actkit::cursor::Scope;
/// use actkit::value::Value;
///
/// let scope = Scope::new().with("limit", Value::from(3));
///
/// assert_eq!(scope.lookup("limit"), Ok(Value::from(3)));
/// assert!(scope.lookup("other").is_err());
/// ```
#[derive(Debug, Clone, Default)]
pub struct Scope {
    names: Rc<BTreeMap<String, Value>>,
}

impl Scope {
    /// Creates an empty scope.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns this scope with `name` bound to `value`.
    #[must_use]
    pub fn with(mut self, name: &str, value: Value) -> Self {
        Rc::make_mut(&mut self.names).insert(name.to_string(), value);
        self
    }

    /// Returns the value of `name`, if bound.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.names.get(name)
    }

    /// Returns the value of `name`.
    ///
    /// # Errors
    ///
    /// Returns [`EvaluationError::UnboundName`] if `name` is not bound.
    pub fn lookup(&self, name: &str) -> Result<Value, EvaluationError> {
        self.get(name)
            .cloned()
            .ok_or_else(|| EvaluationError::UnboundName {
                name: name.to_string(),
            })
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for Scope {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(entries: I) -> Self {
        Self {
            names: Rc::new(
                entries
                    .into_iter()
                    .map(|(name, value)| (name.into(), value))
                    .collect(),
            ),
        }
    }
}

/// Parameter values of one evaluation, together with its scope.
#[derive(Debug, Clone, Default)]
pub struct Binding {
    arguments: Rc<ArgumentMap>,
    scope: Scope,
}

impl Binding {
    /// Binds parameter names to values.
    pub fn new<I>(arguments: I, scope: Scope) -> Self
    where
        I: IntoIterator<Item = (Rc<str>, Value)>,
    {
        Self {
            arguments: Rc::new(arguments.into_iter().collect()),
            scope,
        }
    }

    /// Returns the value bound to the parameter `name`.
    ///
    /// # Errors
    ///
    /// Returns [`EvaluationError::UnboundName`] for unknown parameters.
    pub fn argument(&self, name: &str) -> Result<Value, EvaluationError> {
        self.arguments
            .get(name)
            .cloned()
            .ok_or_else(|| EvaluationError::UnboundName {
                name: name.to_string(),
            })
    }

    /// Returns the number of bound parameters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.arguments.len()
    }

    /// Returns `true` if no parameter is bound.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.arguments.is_empty()
    }

    /// Returns the scope.
    #[must_use]
    pub const fn scope(&self) -> &Scope {
        &self.scope
    }
}

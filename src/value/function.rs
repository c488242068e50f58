//! Callable dynamic values and their binders.

use std::fmt;
use std::rc::Rc;

use super::{EvaluationError, Value};
use crate::arguments::ArgumentPack;

type Body = dyn Fn(&ArgumentPack<Value>) -> Result<Value, EvaluationError>;

/// A named callable taking an [`ArgumentPack`] of [`Value`]s.
///
/// Binders (`partial`, `keyword_partial`, `rpartial`, `flipped`) return new
/// functions and keep the name for display.
///
/// # Examples
///
/// ```rust
/// use actkit::arguments::ArgumentPack;
/// use actkit::value::{Function, Value};
///
/// let subtract = Function::new("subtract", |arguments| {
///     let left = arguments.positional_at(0)?.as_int().unwrap_or_default();
///     let right = arguments.positional_at(1)?.as_int().unwrap_or_default();
///     Ok(Value::from(left - right))
/// });
///
/// let from_ten = subtract.partial([Value::from(10)]);
/// assert_eq!(from_ten.call(&ArgumentPack::positional([Value::from(3)])), Ok(Value::from(7)));
///
/// let flipped = subtract.flipped();
/// let pack = ArgumentPack::positional([Value::from(10), Value::from(3)]);
/// assert_eq!(flipped.call(&pack), Ok(Value::from(-7)));
/// ```
#[derive(Clone)]
pub struct Function {
    name: Rc<str>,
    body: Rc<Body>,
}

impl Function {
    /// Wraps `body` under `name`.
    pub fn new<F>(name: &str, body: F) -> Self
    where
        F: Fn(&ArgumentPack<Value>) -> Result<Value, EvaluationError> + 'static,
    {
        Self {
            name: Rc::from(name),
            body: Rc::new(body),
        }
    }

    fn wrapping<F>(&self, body: F) -> Self
    where
        F: Fn(&ArgumentPack<Value>) -> Result<Value, EvaluationError> + 'static,
    {
        Self {
            name: Rc::clone(&self.name),
            body: Rc::new(body),
        }
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Invokes the function.
    ///
    /// # Errors
    ///
    /// Returns whatever error the function body produces.
    pub fn call(&self, arguments: &ArgumentPack<Value>) -> Result<Value, EvaluationError> {
        (self.body)(arguments)
    }

    /// Binds leading positional arguments.
    #[must_use]
    pub fn partial<I>(&self, args: I) -> Self
    where
        I: IntoIterator<Item = Value>,
    {
        let bound = ArgumentPack::positional(args);
        let body = Rc::clone(&self.body);

        self.wrapping(move |arguments| body(&bound.merge_with(arguments)))
    }

    /// Binds keyword arguments; keywords given at call time win.
    #[must_use]
    pub fn keyword_partial<I>(&self, kwargs: I) -> Self
    where
        I: IntoIterator<Item = (String, Value)>,
    {
        let bound = ArgumentPack::new([], kwargs);
        let body = Rc::clone(&self.body);

        self.wrapping(move |arguments| body(&bound.merge_with(arguments)))
    }

    /// Binds trailing positional arguments.
    #[must_use]
    pub fn rpartial<I>(&self, args: I) -> Self
    where
        I: IntoIterator<Item = Value>,
    {
        let bound = ArgumentPack::positional(args);
        let body = Rc::clone(&self.body);

        self.wrapping(move |arguments| body(&arguments.merge_with(&bound)))
    }

    /// Reverses the order of positional arguments.
    #[must_use]
    pub fn flipped(&self) -> Self {
        let body = Rc::clone(&self.body);

        self.wrapping(move |arguments| {
            let (args, kwargs) = arguments.clone().into_parts();
            body(&ArgumentPack::new(args.into_iter().rev(), kwargs))
        })
    }

    /// Returns `true` if both handles share the same body.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.body, &other.body)
    }
}

impl fmt::Debug for Function {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "Function({})", self.name)
    }
}

impl fmt::Display for Function {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "<function {}>", self.name)
    }
}

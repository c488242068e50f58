//! Dynamic values computed over by action cursors.
//!
//! Cursors record operations on placeholders whose concrete types are only
//! known at call time, so the engine evaluates over a small dynamic [`Value`]
//! model:
//!
//! - scalars: `Nil`, `Bool`, `Int` (`i64`), `Float` (`f64`), `Str`
//! - immutable sequences: `Tuple`
//! - shared mutable containers: `List`, `Dict` (string keys), `Object`
//!   (named attributes)
//! - callables: [`Function`]
//!
//! Cloning a `Value` is cheap: containers are reference counted, so clones of
//! a `List`, `Dict` or `Object` observe each other's mutations.
//!
//! # Examples
//!
//! ```rust
//! use actkit::value::{BinaryOperator, Value};
//!
//! let point = Value::object("Point", [("x", Value::from(1)), ("y", Value::from(2))]);
//! let x = point.get_attribute("x").unwrap();
//!
//! assert_eq!(BinaryOperator::Add.apply(&x, &Value::from(41)), Ok(Value::from(42)));
//!
//! point.set_attribute("x", Value::from(10)).unwrap();
//! assert_eq!(format!("{point}"), "Point(x=10, y=2)");
//! ```

mod error;
mod function;
mod operations;

pub use error::EvaluationError;
pub use function::Function;
pub use operations::{BinaryOperator, UnaryOperator};

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

use crate::arguments::ArgumentPack;

/// A record with a class name and mutable named attributes.
#[derive(Debug)]
pub struct Object {
    class_name: Rc<str>,
    attributes: RefCell<BTreeMap<String, Value>>,
}

impl Object {
    /// Creates an object of class `class_name`.
    pub fn new<'a, I>(class_name: &str, attributes: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, Value)>,
    {
        Self {
            class_name: Rc::from(class_name),
            attributes: RefCell::new(
                attributes
                    .into_iter()
                    .map(|(name, value)| (name.to_string(), value))
                    .collect(),
            ),
        }
    }

    /// Returns the class name.
    #[must_use]
    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    /// Returns a clone of the attribute `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<Value> {
        self.attributes.borrow().get(name).cloned()
    }

    /// Sets the attribute `name`, creating it if absent.
    pub fn set(&self, name: &str, value: Value) {
        self.attributes.borrow_mut().insert(name.to_string(), value);
    }
}

/// A dynamically typed value.
#[derive(Debug, Clone, Default)]
pub enum Value {
    /// The absent value.
    #[default]
    Nil,
    /// A boolean.
    Bool(bool),
    /// A 64-bit signed integer.
    Int(i64),
    /// A 64-bit float.
    Float(f64),
    /// An immutable string.
    Str(Rc<str>),
    /// An immutable sequence.
    Tuple(Rc<[Value]>),
    /// A shared mutable sequence.
    List(Rc<RefCell<Vec<Value>>>),
    /// A shared mutable mapping from strings.
    Dict(Rc<RefCell<BTreeMap<String, Value>>>),
    /// A shared object with attributes.
    Object(Rc<Object>),
    /// A callable.
    Function(Function),
}

impl Value {
    /// Creates a tuple.
    pub fn tuple<I>(items: I) -> Self
    where
        I: IntoIterator<Item = Self>,
    {
        Self::Tuple(items.into_iter().collect())
    }

    /// Creates a list.
    pub fn list<I>(items: I) -> Self
    where
        I: IntoIterator<Item = Self>,
    {
        Self::List(Rc::new(RefCell::new(items.into_iter().collect())))
    }

    /// Creates a dict.
    pub fn dict<K, I>(entries: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Self)>,
    {
        Self::Dict(Rc::new(RefCell::new(
            entries
                .into_iter()
                .map(|(key, value)| (key.into(), value))
                .collect(),
        )))
    }

    /// Creates an object.
    pub fn object<'a, I>(class_name: &str, attributes: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, Self)>,
    {
        Self::Object(Rc::new(Object::new(class_name, attributes)))
    }

    /// Creates a function value.
    pub fn function<F>(name: &str, body: F) -> Self
    where
        F: Fn(&ArgumentPack<Self>) -> Result<Self, EvaluationError> + 'static,
    {
        Self::Function(Function::new(name, body))
    }

    /// Returns the integer, also for booleans.
    #[must_use]
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(value) => Some(*value),
            Self::Bool(value) => Some(i64::from(*value)),
            _ => None,
        }
    }

    /// Returns the number as a float.
    #[must_use]
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Self::Float(value) => Some(*value),
            _ => self.as_int().map(int_to_float),
        }
    }

    /// Returns the boolean.
    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(value) => Some(*value),
            _ => None,
        }
    }

    /// Returns the string slice.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(value) => Some(value),
            _ => None,
        }
    }

    /// Returns the function.
    #[must_use]
    pub const fn as_function(&self) -> Option<&Function> {
        match self {
            Self::Function(function) => Some(function),
            _ => None,
        }
    }

    /// Copies the items of a tuple or list.
    #[must_use]
    pub fn to_vec(&self) -> Option<Vec<Self>> {
        match self {
            Self::Tuple(items) => Some(items.to_vec()),
            Self::List(items) => Some(items.borrow().clone()),
            _ => None,
        }
    }

    /// Returns the name of the value's type, the class name for objects.
    #[must_use]
    pub fn type_name(&self) -> String {
        match self {
            Self::Nil => "nil".to_string(),
            Self::Bool(_) => "bool".to_string(),
            Self::Int(_) => "int".to_string(),
            Self::Float(_) => "float".to_string(),
            Self::Str(_) => "str".to_string(),
            Self::Tuple(_) => "tuple".to_string(),
            Self::List(_) => "list".to_string(),
            Self::Dict(_) => "dict".to_string(),
            Self::Object(object) => object.class_name().to_string(),
            Self::Function(_) => "function".to_string(),
        }
    }

    /// Returns the truthiness of the value.
    ///
    /// `Nil`, `false`, zeros and empty containers are falsy.
    #[must_use]
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Nil => false,
            Self::Bool(value) => *value,
            Self::Int(value) => *value != 0,
            Self::Float(value) => *value != 0.0,
            Self::Str(value) => !value.is_empty(),
            Self::Tuple(items) => !items.is_empty(),
            Self::List(items) => !items.borrow().is_empty(),
            Self::Dict(entries) => !entries.borrow().is_empty(),
            Self::Object(_) | Self::Function(_) => true,
        }
    }

    /// Returns `true` if both values are the same value.
    ///
    /// Shared containers and functions are identical only when they are the
    /// same allocation; immutable values are identical when equal.
    #[must_use]
    pub fn is_identical(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::List(left), Self::List(right)) => Rc::ptr_eq(left, right),
            (Self::Dict(left), Self::Dict(right)) => Rc::ptr_eq(left, right),
            (Self::Object(left), Self::Object(right)) => Rc::ptr_eq(left, right),
            (Self::Function(left), Self::Function(right)) => left.ptr_eq(right),
            (Self::Bool(left), Self::Bool(right)) => left == right,
            (Self::Int(left), Self::Int(right)) => left == right,
            (Self::Float(left), Self::Float(right)) => left.to_bits() == right.to_bits(),
            (Self::Nil, Self::Nil) => true,
            (Self::Str(_) | Self::Tuple(_), _) => {
                std::mem::discriminant(self) == std::mem::discriminant(other) && self == other
            }
            _ => false,
        }
    }

    /// Reads the attribute `name`.
    ///
    /// # Errors
    ///
    /// Returns [`EvaluationError::MissingAttribute`] for absent attributes
    /// and non-object receivers.
    pub fn get_attribute(&self, name: &str) -> Result<Self, EvaluationError> {
        match self {
            Self::Object(object) => object.get(name),
            _ => None,
        }
        .ok_or_else(|| EvaluationError::MissingAttribute {
            type_name: self.type_name(),
            name: name.to_string(),
        })
    }

    /// Writes the attribute `name`.
    ///
    /// # Errors
    ///
    /// Returns [`EvaluationError::AttributeNotSettable`] for non-object
    /// receivers.
    pub fn set_attribute(&self, name: &str, value: Self) -> Result<(), EvaluationError> {
        match self {
            Self::Object(object) => {
                object.set(name, value);
                Ok(())
            }
            _ => Err(EvaluationError::AttributeNotSettable {
                type_name: self.type_name(),
                name: name.to_string(),
            }),
        }
    }

    /// Reads the item at `key`.
    ///
    /// Integer keys index sequences and strings, negative keys counting from
    /// the end. String keys index dicts. A tuple key indexes successively.
    ///
    /// # Errors
    ///
    /// Returns [`EvaluationError::IndexOutOfRange`],
    /// [`EvaluationError::MissingKey`] or
    /// [`EvaluationError::NotSubscriptable`].
    ///
    /// # Examples
    ///
    /// ```rust
    /// use actkit::value::Value;
    ///
    /// let grid = Value::list([Value::list([Value::from(1), Value::from(2)])]);
    /// let key = Value::tuple([Value::from(0), Value::from(-1)]);
    ///
    /// assert_eq!(grid.get_item(&key), Ok(Value::from(2)));
    /// ```
    pub fn get_item(&self, key: &Self) -> Result<Self, EvaluationError> {
        match (self, key) {
            (_, Self::Tuple(keys)) => keys
                .iter()
                .try_fold(self.clone(), |receiver, key| receiver.get_item(key)),
            (Self::List(items), Self::Int(index)) => {
                let items = items.borrow();
                Ok(items[position_in(*index, items.len())?].clone())
            }
            (Self::Tuple(items), Self::Int(index)) => {
                Ok(items[position_in(*index, items.len())?].clone())
            }
            (Self::Str(text), Self::Int(index)) => {
                let length = text.chars().count();
                let position = position_in(*index, length)?;

                Ok(text
                    .chars()
                    .nth(position)
                    .map_or(Self::Nil, |character| Self::from(character.to_string())))
            }
            (Self::Dict(entries), Self::Str(name)) => entries
                .borrow()
                .get(name.as_ref())
                .cloned()
                .ok_or_else(|| EvaluationError::MissingKey {
                    key: key.to_repr(),
                }),
            _ => Err(self.not_subscriptable(key)),
        }
    }

    /// Writes the item at `key`.
    ///
    /// A tuple key indexes successively and writes into the last receiver.
    ///
    /// # Errors
    ///
    /// Returns the errors of [`get_item`](Self::get_item) and
    /// [`EvaluationError::NotSubscriptable`] for immutable receivers.
    pub fn set_item(&self, key: &Self, value: Self) -> Result<(), EvaluationError> {
        match (self, key) {
            (_, Self::Tuple(keys)) => match keys.split_last() {
                Some((last, path)) => path
                    .iter()
                    .try_fold(self.clone(), |receiver, key| receiver.get_item(key))?
                    .set_item(last, value),
                None => Err(self.not_subscriptable(key)),
            },
            (Self::List(items), Self::Int(index)) => {
                let mut items = items.borrow_mut();
                let position = position_in(*index, items.len())?;
                items[position] = value;
                Ok(())
            }
            (Self::Dict(entries), Self::Str(name)) => {
                entries.borrow_mut().insert(name.to_string(), value);
                Ok(())
            }
            _ => Err(self.not_subscriptable(key)),
        }
    }

    fn not_subscriptable(&self, key: &Self) -> EvaluationError {
        EvaluationError::NotSubscriptable {
            type_name: self.type_name(),
            key_type: key.type_name(),
        }
    }

    /// Calls the value.
    ///
    /// # Errors
    ///
    /// Returns [`EvaluationError::NotCallable`] for non-functions, or the
    /// function's own error.
    pub fn call(&self, arguments: &ArgumentPack<Self>) -> Result<Self, EvaluationError> {
        match self {
            Self::Function(function) => function.call(arguments),
            _ => Err(EvaluationError::NotCallable {
                type_name: self.type_name(),
            }),
        }
    }

    /// Returns `true` if `item` is in the value.
    ///
    /// # Errors
    ///
    /// Returns [`EvaluationError::TypeMismatch`] for receivers that are not
    /// containers, and for non-string items looked up in strings.
    pub fn contains(&self, item: &Self) -> Result<bool, EvaluationError> {
        match (self, item) {
            (Self::Str(text), Self::Str(part)) => Ok(text.contains(part.as_ref())),
            (Self::Tuple(items), _) => Ok(items.contains(item)),
            (Self::List(items), _) => Ok(items.borrow().contains(item)),
            (Self::Dict(entries), Self::Str(name)) => Ok(entries.borrow().contains_key(name.as_ref())),
            (Self::Dict(_), _) => Ok(false),
            _ => Err(EvaluationError::TypeMismatch {
                operation: "in",
                left: item.type_name(),
                right: self.type_name(),
            }),
        }
    }

    /// Renders the value the way it appears inside containers: strings are
    /// quoted.
    #[must_use]
    pub fn to_repr(&self) -> String {
        match self {
            Self::Str(text) => format!("'{text}'"),
            _ => self.to_string(),
        }
    }
}

#[allow(clippy::cast_precision_loss)]
const fn int_to_float(value: i64) -> f64 {
    value as f64
}

/// Resolves a possibly negative index against `length`.
fn position_in(index: i64, length: usize) -> Result<usize, EvaluationError> {
    let out_of_range = || EvaluationError::IndexOutOfRange { index, length };

    let position = if index < 0 {
        let back = usize::try_from(index.unsigned_abs()).map_err(|_| out_of_range())?;
        length.checked_sub(back).ok_or_else(out_of_range)?
    } else {
        usize::try_from(index).map_err(|_| out_of_range())?
    };

    if position < length {
        Ok(position)
    } else {
        Err(out_of_range())
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Nil, Self::Nil) => true,
            (Self::Str(left), Self::Str(right)) => left == right,
            (Self::Tuple(left), Self::Tuple(right)) => left == right,
            (Self::List(left), Self::List(right)) => {
                Rc::ptr_eq(left, right) || *left.borrow() == *right.borrow()
            }
            (Self::Dict(left), Self::Dict(right)) => {
                Rc::ptr_eq(left, right) || *left.borrow() == *right.borrow()
            }
            (Self::Object(left), Self::Object(right)) => Rc::ptr_eq(left, right),
            (Self::Function(left), Self::Function(right)) => left.ptr_eq(right),
            (Self::Int(_) | Self::Bool(_), Self::Int(_) | Self::Bool(_)) => {
                self.as_int() == other.as_int()
            }
            (Self::Int(_) | Self::Bool(_) | Self::Float(_), Self::Int(_) | Self::Bool(_) | Self::Float(_)) => {
                self.as_float() == other.as_float()
            }
            _ => false,
        }
    }
}

fn write_items(
    formatter: &mut fmt::Formatter<'_>,
    items: &[Value],
) -> fmt::Result {
    for (position, item) in items.iter().enumerate() {
        if position > 0 {
            write!(formatter, ", ")?;
        }
        write!(formatter, "{}", item.to_repr())?;
    }
    Ok(())
}

impl fmt::Display for Value {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Nil => write!(formatter, "nil"),
            Self::Bool(value) => write!(formatter, "{value}"),
            Self::Int(value) => write!(formatter, "{value}"),
            Self::Float(value) => write!(formatter, "{value:?}"),
            Self::Str(text) => write!(formatter, "{text}"),
            Self::Tuple(items) => {
                write!(formatter, "(")?;
                write_items(formatter, items)?;
                if items.len() == 1 {
                    write!(formatter, ",")?;
                }
                write!(formatter, ")")
            }
            Self::List(items) => {
                write!(formatter, "[")?;
                write_items(formatter, &items.borrow())?;
                write!(formatter, "]")
            }
            Self::Dict(entries) => {
                write!(formatter, "{{")?;
                for (position, (key, value)) in entries.borrow().iter().enumerate() {
                    if position > 0 {
                        write!(formatter, ", ")?;
                    }
                    write!(formatter, "'{key}': {}", value.to_repr())?;
                }
                write!(formatter, "}}")
            }
            Self::Object(object) => {
                write!(formatter, "{}(", object.class_name())?;
                for (position, (name, value)) in object.attributes.borrow().iter().enumerate() {
                    if position > 0 {
                        write!(formatter, ", ")?;
                    }
                    write!(formatter, "{name}={}", value.to_repr())?;
                }
                write!(formatter, ")")
            }
            Self::Function(function) => write!(formatter, "{function}"),
        }
    }
}

impl From<()> for Value {
    fn from((): ()) -> Self {
        Self::Nil
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Str(Rc::from(value))
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::Str(Rc::from(value))
    }
}

impl From<Vec<Self>> for Value {
    fn from(items: Vec<Self>) -> Self {
        Self::list(items)
    }
}

impl From<Function> for Value {
    fn from(function: Function) -> Self {
        Self::Function(function)
    }
}

impl From<Object> for Value {
    fn from(object: Object) -> Self {
        Self::Object(Rc::new(object))
    }
}

//! The action cursor expression builder.

use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

use static_assertions::assert_not_impl_any;
use tracing::trace;

use super::error::rejected;
use super::nature::{self, NatureContext, OperatorModel};
use super::{Binding, CursorError, Error, Operand, Parameter, ParameterSet, Scope, Unpacking};
use crate::arguments::ArgumentPack;
use crate::chain::{ActionChain, Contextual, reading, saving_context};
use crate::flag::Flag;
use crate::value::{BinaryOperator, EvaluationError, UnaryOperator, Value};

/// The value threaded through recorded steps, with its binding as context.
pub(crate) type Root = Contextual<Value, Binding>;

type Actions = ActionChain<Root, EvaluationError>;

type Nature = Contextual<Flag, NatureContext>;

/// Prefix of the synthetic keyword marking a keyword unpacking.
pub const KEYWORD_UNPACKING_TEMPLATE: &str = "__action_cursor_keyword_unpacking";

const EMPTY_REPR: &str = "...";

static IDENTITIES: AtomicU64 = AtomicU64::new(0);

fn next_identity() -> u64 {
    IDENTITIES.fetch_add(1, Ordering::Relaxed)
}

fn natured(flag: Flag, context: NatureContext) -> Nature {
    Contextual::new(flag, context)
}

/// Indexes with the only key, or with a tuple of all of them.
fn key_of(keys: &[Value]) -> Value {
    match keys {
        [key] => key.clone(),
        _ => Value::tuple(keys.iter().cloned()),
    }
}

fn joined_reprs(operands: &[Operand]) -> String {
    operands
        .iter()
        .map(Operand::repr)
        .collect::<Vec<_>>()
        .join(", ")
}

fn is_keyword_for_unpacking(key: &str) -> bool {
    key.starts_with(KEYWORD_UNPACKING_TEMPLATE)
}

struct CursorInner {
    identity: u64,
    parameters: ParameterSet,
    actions: Actions,
    previous: Option<ActionCursor>,
    nature: Nature,
    internal_repr: String,
}

/// A placeholder recording the operations applied to it.
///
/// Every builder method returns a new cursor whose recorded steps extend the
/// receiver's; nothing is mutated. Invoking a cursor binds positional
/// arguments to its parameters in ascending priority order and replays the
/// steps.
///
/// A cursor that records no steps is *empty*: invoking it packs its
/// arguments into a tuple instead of evaluating.
///
/// # Examples
///
/// ```rust
/// use actkit::cursor::{a, b, c};
/// use actkit::value::Value;
///
/// let expression = (a() + b()) * c();
///
/// assert_eq!(format!("{expression}"), "<action(a, b, c): (a + b) * c>");
/// assert_eq!(
///     expression.evaluate_with([Value::from(1), Value::from(2), Value::from(3)]),
///     Ok(Value::from(9))
/// );
///
/// let half = a() / 2;
/// assert_eq!(half.evaluate_with([Value::from(5)]), Ok(Value::from(2.5)));
/// ```
#[derive(Clone)]
pub struct ActionCursor {
    inner: Rc<CursorInner>,
}

assert_not_impl_any!(ActionCursor: Send, Sync);

/// The outcome of [`ActionCursor::call`].
#[derive(Debug, Clone)]
pub enum Invocation {
    /// The cursor was fully applied and evaluated.
    Value(Value),
    /// Fewer arguments than parameters were given.
    Partial(PartialCursor),
    /// The call extended the cursor instead of evaluating it.
    Cursor(ActionCursor),
}

impl Invocation {
    /// Returns the evaluated value.
    #[must_use]
    pub fn into_value(self) -> Option<Value> {
        match self {
            Self::Value(value) => Some(value),
            _ => None,
        }
    }

    /// Returns the partial application.
    #[must_use]
    pub fn into_partial(self) -> Option<PartialCursor> {
        match self {
            Self::Partial(partial) => Some(partial),
            _ => None,
        }
    }

    /// Returns the extended cursor.
    #[must_use]
    pub fn into_cursor(self) -> Option<ActionCursor> {
        match self {
            Self::Cursor(cursor) => Some(cursor),
            _ => None,
        }
    }
}

/// A cursor with its leading arguments already supplied.
///
/// # Examples
///
/// ```rust
/// use actkit::cursor::{a, b};
/// use actkit::value::Value;
///
/// let difference = a() - b();
/// let from_ten = difference.call([Value::from(10)]).unwrap().into_partial().unwrap();
///
/// assert_eq!(format!("{from_ten}"), "partial(<action(a, b): a - b>, 10)");
/// assert_eq!(
///     from_ten.call([Value::from(3)]).unwrap().into_value(),
///     Some(Value::from(7))
/// );
/// ```
#[derive(Debug, Clone)]
pub struct PartialCursor {
    cursor: ActionCursor,
    arguments: Vec<Value>,
    scope: Scope,
}

impl PartialCursor {
    /// Returns the cursor being applied.
    #[must_use]
    pub const fn cursor(&self) -> &ActionCursor {
        &self.cursor
    }

    /// Returns the arguments supplied so far.
    #[must_use]
    pub fn arguments(&self) -> &[Value] {
        &self.arguments
    }

    /// Supplies further arguments.
    ///
    /// # Errors
    ///
    /// Same as [`ActionCursor::call`].
    pub fn call<I>(&self, values: I) -> Result<Invocation, Error>
    where
        I: IntoIterator<Item = Value>,
    {
        self.cursor.call_in(
            &self.scope,
            self.arguments.iter().cloned().chain(values),
        )
    }
}

impl fmt::Display for PartialCursor {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "partial({}", self.cursor)?;
        for argument in &self.arguments {
            write!(formatter, ", {}", argument.to_repr())?;
        }
        write!(formatter, ")")
    }
}

impl ActionCursor {
    fn from_inner(inner: CursorInner) -> Self {
        Self {
            inner: Rc::new(inner),
        }
    }

    /// Creates an empty cursor.
    #[must_use]
    pub fn new() -> Self {
        Self::from_inner(CursorInner {
            identity: next_identity(),
            parameters: ParameterSet::new(),
            actions: ActionChain::new(),
            previous: None,
            nature: natured(nature::set_by_initialization(), NatureContext::Nothing),
            internal_repr: EMPTY_REPR.to_string(),
        })
    }

    /// Creates a cursor returning the argument bound to `parameter`.
    #[must_use]
    pub fn operated_by(parameter: Parameter) -> Self {
        let name = parameter.shared_name();

        Self::from_inner(CursorInner {
            identity: next_identity(),
            internal_repr: parameter.name().to_string(),
            parameters: ParameterSet::single(parameter),
            actions: ActionChain::single(reading(move |_, binding: &Binding| {
                binding.argument(&name)
            })),
            previous: None,
            nature: natured(nature::returning(), NatureContext::Nothing),
        })
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Returns the parameters in binding order.
    #[must_use]
    pub fn parameters(&self) -> &ParameterSet {
        &self.inner.parameters
    }

    /// Returns how the cursor was last extended.
    #[must_use]
    pub fn nature(&self) -> &Flag {
        self.inner.nature.value()
    }

    /// Returns what the last extension was applied with.
    #[must_use]
    pub fn nature_context(&self) -> &NatureContext {
        self.inner.nature.context()
    }

    /// Returns the cursor this one was built from.
    #[must_use]
    pub fn previous(&self) -> Option<&Self> {
        self.inner.previous.as_ref()
    }

    /// Returns `true` if the cursor records no steps.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.actions.is_empty()
    }

    /// Returns the number of recorded steps.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.actions.len()
    }

    /// Returns the textual form of the recorded expression.
    #[must_use]
    pub fn internal_repr(&self) -> &str {
        &self.inner.internal_repr
    }

    /// Returns the only key of the cursor seen as a mapping, used to spread
    /// its result into keyword arguments.
    #[must_use]
    pub fn keys(&self) -> [String; 1] {
        [format!("{KEYWORD_UNPACKING_TEMPLATE}_of_{}", self.inner.identity)]
    }

    /// Returns the cursor as a one-shot spread into positional arguments.
    #[must_use]
    pub fn unpack(&self) -> Unpacking {
        Unpacking::new(self.clone())
    }

    /// Returns the cursor as a spread into positional arguments.
    #[must_use]
    pub fn spread(&self) -> Operand {
        Operand::Spread(self.clone())
    }

    /// Returns the keyword entry spreading the cursor's dict result into
    /// keyword arguments.
    #[must_use]
    pub fn keyword_unpacking(&self) -> (String, Operand) {
        let [key] = self.keys();
        (key, Operand::Cursor(self.for_keyword_unpacking()))
    }

    // =========================================================================
    // Representation
    // =========================================================================

    pub(crate) fn adapted_repr(&self, single: bool) -> String {
        let repr = &self.inner.internal_repr;

        if repr == EMPTY_REPR || (!single && self.nature() == &nature::operation()) {
            format!("({repr})")
        } else {
            repr.clone()
        }
    }

    fn repr_by(&self, model: OperatorModel, on_left_side: bool) -> String {
        let repr = &self.inner.internal_repr;

        let NatureContext::Operator(own) = self.nature_context() else {
            return repr.clone();
        };

        // Equal priorities group to the left.
        let binds_looser = if on_left_side {
            own.priority() > model.priority()
        } else {
            own.priority() >= model.priority()
        };

        if binds_looser && self.nature() == &nature::operation() {
            format!("({repr})")
        } else {
            repr.clone()
        }
    }

    fn operand_repr_by(operand: &Operand, model: OperatorModel, on_left_side: bool) -> String {
        match operand {
            Operand::Cursor(cursor) => cursor.repr_by(model, on_left_side),
            _ => operand.repr(),
        }
    }

    // =========================================================================
    // Step recording
    // =========================================================================

    fn extended(
        &self,
        actions: Actions,
        parameters: ParameterSet,
        nature: Nature,
        internal_repr: String,
    ) -> Self {
        Self::from_inner(CursorInner {
            identity: next_identity(),
            parameters,
            actions,
            previous: Some(self.clone()),
            nature,
            internal_repr,
        })
    }

    fn with_step<F>(&self, step: F, nature: Nature, internal_repr: String) -> Self
    where
        F: Fn(Value) -> Result<Value, EvaluationError> + 'static,
    {
        self.extended(
            self.inner.actions.then(saving_context(step)),
            self.inner.parameters.clone(),
            nature,
            internal_repr,
        )
    }

    /// Records a step combining the current value with the operand values.
    ///
    /// Cursor operands are evaluated against the same root as the receiver,
    /// so the recorded steps collapse into one.
    fn merged<F>(
        &self,
        operands: Vec<Operand>,
        combine: F,
        nature: Nature,
        internal_repr: String,
    ) -> Result<Self, CursorError>
    where
        F: Fn(Value, &[Value]) -> Result<Value, EvaluationError> + 'static,
    {
        let parameters = operands
            .iter()
            .filter_map(Operand::cursor)
            .try_fold(self.inner.parameters.clone(), |parameters, cursor| {
                parameters.merge(&cursor.inner.parameters)
            })
            .map_err(rejected)?;

        let actions: Actions = if operands.iter().any(|operand| operand.cursor().is_some()) {
            let receiver = self.inner.actions.clone();

            ActionChain::single(move |root: Root| {
                let value = receiver.call(root.clone())?.into_value();
                let values = operands
                    .iter()
                    .map(|operand| operand.evaluate(&root))
                    .collect::<Result<Vec<_>, _>>()?;
                let (_, binding) = root.into_parts();

                Ok(Contextual::new(combine(value, &values)?, binding))
            })
        } else {
            let values: Vec<Value> = operands
                .into_iter()
                .filter_map(|operand| match operand {
                    Operand::Value(value) => Some(value),
                    _ => None,
                })
                .collect();

            self.inner
                .actions
                .then(saving_context(move |value| combine(value, &values)))
        };

        Ok(self.extended(actions, parameters, nature, internal_repr))
    }

    pub(crate) fn run(&self, root: Root) -> Result<Value, EvaluationError> {
        self.inner.actions.call(root).map(Contextual::into_value)
    }

    fn for_keyword_unpacking(&self) -> Self {
        self.extended(
            self.inner.actions.clone(),
            self.inner.parameters.clone(),
            self.inner.nature.clone(),
            format!("**{}", self.adapted_repr(true)),
        )
    }

    // =========================================================================
    // Attribute, name and item access
    // =========================================================================

    /// Reads `name`: as a free identifier on an empty cursor, as an attribute
    /// otherwise.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use actkit::cursor::{ActionCursor, Scope, a, act};
    /// use actkit::value::Value;
    ///
    /// let point = Value::object("Point", [("x", Value::from(4))]);
    /// assert_eq!(a().attr("x").evaluate_with([point]), Ok(Value::from(4)));
    ///
    /// let scope = Scope::new().with("limit", Value::from(10));
    /// let limit = act().attr("limit").call_in(&scope, []).unwrap();
    /// assert!(limit.into_cursor().is_some());
    /// ```
    #[must_use]
    pub fn attr(&self, name: &str) -> Self {
        if self.is_empty() {
            self.resolved_name(name)
        } else {
            self.field(name)
        }
    }

    /// Reads the attribute `name` of the current value.
    #[must_use]
    pub fn field(&self, name: &str) -> Self {
        let attribute = name.to_string();

        self.with_step(
            move |value| value.get_attribute(&attribute),
            natured(nature::attrgetting(), NatureContext::Name(name.to_string())),
            format!("{}.{name}", self.adapted_repr(false)),
        )
    }

    /// Resolves the free identifier `name` from the evaluation scope.
    ///
    /// # Errors
    ///
    /// Returns [`CursorError::NameOnExpression`] if the cursor already
    /// records steps.
    pub fn bound_name(&self, name: &str) -> Result<Self, CursorError> {
        if self.is_empty() {
            Ok(self.resolved_name(name))
        } else {
            Err(rejected(CursorError::NameOnExpression {
                name: name.to_string(),
            }))
        }
    }

    fn resolved_name(&self, name: &str) -> Self {
        let identifier = name.to_string();

        self.extended(
            self.inner.actions.then(reading(move |_, binding: &Binding| {
                binding.scope().lookup(&identifier)
            })),
            self.inner.parameters.clone(),
            natured(nature::vargetting(), NatureContext::Name(name.to_string())),
            name.to_string(),
        )
    }

    /// Reads the item at `key`.
    ///
    /// # Errors
    ///
    /// Returns [`CursorError::DuplicatePriority`] if a cursor key clashes
    /// with the receiver's parameters.
    pub fn item<K: Into<Operand>>(&self, key: K) -> Result<Self, CursorError> {
        self.items([key.into()])
    }

    /// Reads the item at several keys.
    ///
    /// On an empty cursor this builds a list of the keys instead. Several
    /// keys index with a tuple. The synthetic key from [`keys`](Self::keys)
    /// marks the cursor for keyword unpacking.
    ///
    /// # Errors
    ///
    /// Returns [`CursorError::DuplicatePriority`] if a cursor key clashes
    /// with the receiver's parameters.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use actkit::cursor::{a, act, b};
    /// use actkit::operands;
    /// use actkit::value::Value;
    ///
    /// let listed = act().items(operands![a(), b(), 3]).unwrap();
    /// assert_eq!(format!("{listed}"), "<action(a, b): [a, b, 3]>");
    ///
    /// let result = listed.evaluate_with([Value::from(1), Value::from(2)]).unwrap();
    /// assert_eq!(format!("{result}"), "[1, 2, 3]");
    /// ```
    pub fn items<I>(&self, keys: I) -> Result<Self, CursorError>
    where
        I: IntoIterator<Item = Operand>,
    {
        let keys: Vec<Operand> = keys.into_iter().collect();

        if let [key] = keys.as_slice()
            && key.as_str().is_some_and(is_keyword_for_unpacking)
        {
            return Ok(self.for_keyword_unpacking());
        }

        let formatted_keys = format!("[{}]", joined_reprs(&keys));

        if self.is_empty() {
            return self.merged(
                keys.clone(),
                |_, items| Ok(Value::list(items.iter().cloned())),
                natured(nature::packing(), NatureContext::Key(keys)),
                formatted_keys,
            );
        }

        let internal_repr = format!("{}{formatted_keys}", self.adapted_repr(false));

        self.merged(
            keys.clone(),
            |receiver, keys| receiver.get_item(&key_of(keys)),
            natured(nature::itemgetting(), NatureContext::Key(keys)),
            internal_repr,
        )
    }

    // =========================================================================
    // Calls, packing and assignment
    // =========================================================================

    /// Calls the current value with positional and keyword operands.
    ///
    /// [`Operand::Spread`] operands spread their sequence result; keyword
    /// entries made by [`keyword_unpacking`](Self::keyword_unpacking) spread
    /// their dict result.
    ///
    /// # Errors
    ///
    /// Returns [`CursorError::DuplicatePriority`] if operand cursors clash.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use actkit::cursor::{a, b};
    /// use actkit::operands;
    /// use actkit::value::Value;
    ///
    /// let called = a().apply(operands![b(), 1], []).unwrap();
    /// assert_eq!(format!("{called}"), "<action(a, b): a(b, 1)>");
    ///
    /// let add = Value::function("add", |arguments| {
    ///     let total = arguments.args().iter().filter_map(Value::as_int).sum::<i64>();
    ///     Ok(Value::from(total))
    /// });
    /// assert_eq!(called.evaluate_with([add, Value::from(2)]), Ok(Value::from(3)));
    /// ```
    pub fn apply<A, K>(&self, args: A, kwargs: K) -> Result<Self, CursorError>
    where
        A: IntoIterator<Item = Operand>,
        K: IntoIterator<Item = (String, Operand)>,
    {
        let args: Vec<Operand> = args.into_iter().collect();
        let kwargs: Vec<(String, Operand)> = kwargs.into_iter().collect();

        let spread_args: Vec<bool> = args.iter().map(Operand::is_spread).collect();
        let keywords: Vec<(String, bool)> = kwargs
            .iter()
            .map(|(name, _)| (name.clone(), is_keyword_for_unpacking(name)))
            .collect();

        let rendered: Vec<String> = args
            .iter()
            .map(Operand::repr)
            .chain(kwargs.iter().map(|(name, operand)| {
                if is_keyword_for_unpacking(name) {
                    operand.repr()
                } else {
                    format!("{name}={}", operand.repr())
                }
            }))
            .collect();

        let internal_repr = format!("{}({})", self.adapted_repr(false), rendered.join(", "));

        let operands: Vec<Operand> = args
            .into_iter()
            .chain(kwargs.into_iter().map(|(_, operand)| operand))
            .collect();

        self.merged(
            operands,
            move |function, values| {
                let (positional, keyword) = values.split_at(spread_args.len());
                let mut args = Vec::with_capacity(positional.len());
                let mut kwargs = BTreeMap::new();

                for (value, is_spread) in positional.iter().zip(&spread_args) {
                    if *is_spread {
                        args.extend(value.to_vec().ok_or_else(|| EvaluationError::NotIterable {
                            type_name: value.type_name(),
                        })?);
                    } else {
                        args.push(value.clone());
                    }
                }

                for (value, (name, is_spread)) in keyword.iter().zip(&keywords) {
                    match value {
                        Value::Dict(entries) if *is_spread => {
                            kwargs.extend(entries.borrow().clone());
                        }
                        _ if *is_spread => {
                            return Err(EvaluationError::NotMapping {
                                type_name: value.type_name(),
                            });
                        }
                        _ => {
                            kwargs.insert(name.clone(), value.clone());
                        }
                    }
                }

                function.call(&ArgumentPack::new(args, kwargs))
            },
            natured(nature::calling(), NatureContext::Nothing),
            internal_repr,
        )
    }

    /// Builds a tuple of the operands.
    ///
    /// # Errors
    ///
    /// Returns [`CursorError::DuplicatePriority`] if operand cursors clash.
    pub fn pack<I>(&self, items: I) -> Result<Self, CursorError>
    where
        I: IntoIterator<Item = Operand>,
    {
        let items: Vec<Operand> = items.into_iter().collect();

        let internal_repr = match items.as_slice() {
            [item] => format!("({},)", item.repr()),
            _ => format!("({})", joined_reprs(&items)),
        };

        self.merged(
            items,
            |_, items| Ok(Value::tuple(items.iter().cloned())),
            natured(nature::packing(), NatureContext::Nothing),
            internal_repr,
        )
    }

    /// Writes `value` where the last step read from, yielding `value`.
    ///
    /// # Errors
    ///
    /// Returns [`CursorError::NowhereToSet`] unless the last step is an
    /// attribute or item read, and [`CursorError::DuplicatePriority`] if a
    /// cursor value clashes.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use actkit::cursor::{CursorError, a, b};
    /// use actkit::value::Value;
    ///
    /// let assign = a().field("x").set(b()).unwrap();
    /// assert_eq!(format!("{assign}"), "<action(a, b): (a.x := b)>");
    ///
    /// let point = Value::object("Point", [("x", Value::from(0))]);
    /// assert_eq!(assign.evaluate_with([point.clone(), Value::from(5)]), Ok(Value::from(5)));
    /// assert_eq!(point.get_attribute("x"), Ok(Value::from(5)));
    ///
    /// assert_eq!((a() + 1).set(2).unwrap_err(), CursorError::NowhereToSet);
    /// ```
    pub fn set<V: Into<Operand>>(&self, value: V) -> Result<Self, CursorError> {
        let value = value.into();

        let previous = match &self.inner.previous {
            Some(previous)
                if self.nature() == &(nature::attrgetting() | nature::itemgetting()) =>
            {
                previous
            }
            _ => return Err(rejected(CursorError::NowhereToSet)),
        };

        let internal_repr = format!("({} := {})", self.inner.internal_repr, value.repr());
        let setting = natured(nature::setting(), NatureContext::Nothing);

        match self.nature_context() {
            NatureContext::Name(name) => {
                let name = name.clone();

                previous.merged(
                    vec![value],
                    move |receiver, values| {
                        let value = values.first().cloned().unwrap_or_default();
                        receiver.set_attribute(&name, value.clone())?;
                        Ok(value)
                    },
                    setting,
                    internal_repr,
                )
            }
            NatureContext::Key(keys) => {
                let mut operands = keys.clone();
                operands.push(value);

                previous.merged(
                    operands,
                    |receiver, values| match values.split_last() {
                        Some((value, keys)) => {
                            receiver.set_item(&key_of(keys), value.clone())?;
                            Ok(value.clone())
                        }
                        None => Ok(receiver),
                    },
                    setting,
                    internal_repr,
                )
            }
            _ => Err(rejected(CursorError::NowhereToSet)),
        }
    }

    // =========================================================================
    // Operators
    // =========================================================================

    /// Applies `operator` with the cursor on the left.
    ///
    /// # Errors
    ///
    /// Returns [`CursorError::DuplicatePriority`] if a cursor operand
    /// clashes.
    pub fn binary<O: Into<Operand>>(
        &self,
        operator: BinaryOperator,
        operand: O,
    ) -> Result<Self, CursorError> {
        let operand = operand.into();
        let model = OperatorModel::of_binary(operator);

        let internal_repr = format!(
            "{} {} {}",
            self.repr_by(model, true),
            model.sign(),
            Self::operand_repr_by(&operand, model, false),
        );

        self.merged(
            vec![operand],
            move |left, values| operator.apply(&left, values.first().unwrap_or(&Value::Nil)),
            natured(nature::binary_operation(), NatureContext::Operator(model)),
            internal_repr,
        )
    }

    /// Applies `operator` with the cursor on the right of a constant.
    #[must_use]
    pub fn reflected<V: Into<Value>>(&self, operator: BinaryOperator, value: V) -> Self {
        let value = value.into();
        let model = OperatorModel::of_binary(operator);

        let internal_repr = format!(
            "{} {} {}",
            value.to_repr(),
            model.sign(),
            self.repr_by(model, false),
        );

        self.with_step(
            move |right| operator.apply(&value, &right),
            natured(nature::binary_operation(), NatureContext::Operator(model)),
            internal_repr,
        )
    }

    /// Applies a unary operator.
    #[must_use]
    pub fn unary(&self, operator: UnaryOperator) -> Self {
        let model = OperatorModel::of_unary(operator);

        self.with_step(
            move |value| operator.apply(&value),
            natured(nature::single_operation(), NatureContext::Operator(model)),
            format!("{}{}", model.sign(), self.repr_by(model, true)),
        )
    }

    // =========================================================================
    // Invocation
    // =========================================================================

    /// Invokes the cursor with positional arguments and an empty scope.
    ///
    /// - An empty cursor packs the arguments into a tuple.
    /// - A name-resolving cursor is extended with a call of the name.
    /// - With as many arguments as parameters, the cursor is evaluated.
    /// - With fewer, a [`PartialCursor`] is returned.
    ///
    /// # Errors
    ///
    /// Returns [`CursorError::ExtraArguments`] naming surplus arguments, or
    /// the error of a failing step.
    pub fn call<I>(&self, values: I) -> Result<Invocation, Error>
    where
        I: IntoIterator<Item = Value>,
    {
        self.call_in(&Scope::new(), values)
    }

    /// Like [`call`](Self::call), resolving free identifiers in `scope`.
    ///
    /// # Errors
    ///
    /// Same as [`call`](Self::call).
    pub fn call_in<I>(&self, scope: &Scope, values: I) -> Result<Invocation, Error>
    where
        I: IntoIterator<Item = Value>,
    {
        let values: Vec<Value> = values.into_iter().collect();

        if self.is_empty() {
            return Ok(Invocation::Cursor(
                self.pack(values.into_iter().map(Operand::Value))?,
            ));
        }

        if self.nature() == &(nature::vargetting() | nature::set_by_initialization()) {
            return Ok(Invocation::Cursor(
                self.apply(values.into_iter().map(Operand::Value), [])?,
            ));
        }

        let arity = self.inner.parameters.len();

        if values.len() > arity {
            return Err(rejected(CursorError::ExtraArguments {
                arguments: values[arity..].iter().map(Value::to_repr).collect(),
            })
            .into());
        }

        if values.len() < arity {
            return Ok(Invocation::Partial(PartialCursor {
                cursor: self.clone(),
                arguments: values,
                scope: scope.clone(),
            }));
        }

        let binding = Binding::new(
            self.inner
                .parameters
                .iter()
                .map(Parameter::shared_name)
                .zip(values),
            scope.clone(),
        );

        Ok(Invocation::Value(self.evaluate(&binding)?))
    }

    /// Binds every parameter positionally and evaluates.
    ///
    /// # Errors
    ///
    /// Returns [`CursorError::ExtraArguments`] or
    /// [`CursorError::MissingArgument`] when the count differs from the
    /// parameter count, or the error of a failing step.
    pub fn evaluate_with<I>(&self, values: I) -> Result<Value, Error>
    where
        I: IntoIterator<Item = Value>,
    {
        self.call_with(&ArgumentPack::positional(values))
    }

    /// Binds positional arguments by priority and keyword arguments by
    /// parameter name, then evaluates.
    ///
    /// # Errors
    ///
    /// Returns [`CursorError::ExtraArguments`],
    /// [`CursorError::UnexpectedKeyword`], [`CursorError::DuplicateArgument`]
    /// or [`CursorError::MissingArgument`] for a binding mismatch, or the
    /// error of a failing step.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use actkit::arguments::ArgumentPack;
    /// use actkit::cursor::{a, b};
    /// use actkit::value::Value;
    ///
    /// let difference = a() - b();
    /// let pack = ArgumentPack::new([Value::from(10)], [("b".to_string(), Value::from(4))]);
    ///
    /// assert_eq!(difference.call_with(&pack), Ok(Value::from(6)));
    /// ```
    pub fn call_with(&self, arguments: &ArgumentPack<Value>) -> Result<Value, Error> {
        self.call_with_in(&Scope::new(), arguments)
    }

    /// Like [`call_with`](Self::call_with), resolving free identifiers in
    /// `scope`.
    ///
    /// # Errors
    ///
    /// Same as [`call_with`](Self::call_with).
    pub fn call_with_in(
        &self,
        scope: &Scope,
        arguments: &ArgumentPack<Value>,
    ) -> Result<Value, Error> {
        let parameters = &self.inner.parameters;
        let positional = arguments.args();

        if positional.len() > parameters.len() {
            return Err(rejected(CursorError::ExtraArguments {
                arguments: positional[parameters.len()..]
                    .iter()
                    .map(Value::to_repr)
                    .collect(),
            })
            .into());
        }

        let mut bound: Vec<(Rc<str>, Value)> = parameters
            .iter()
            .map(Parameter::shared_name)
            .zip(positional.iter().cloned())
            .collect();

        for (name, value) in arguments.kwargs() {
            let parameter = parameters.find(name).ok_or_else(|| {
                rejected(CursorError::UnexpectedKeyword { name: name.clone() })
            })?;

            if bound.iter().any(|(bound_name, _)| **bound_name == **name) {
                return Err(rejected(CursorError::DuplicateArgument { name: name.clone() }).into());
            }

            bound.push((parameter.shared_name(), value.clone()));
        }

        if let Some(missing) = parameters
            .iter()
            .find(|parameter| bound.iter().all(|(name, _)| **name != *parameter.name()))
        {
            return Err(rejected(CursorError::MissingArgument {
                name: missing.name().to_string(),
            })
            .into());
        }

        Ok(self.evaluate(&Binding::new(bound, scope.clone()))?)
    }

    /// Replays the recorded steps against `binding`.
    ///
    /// # Errors
    ///
    /// Returns the error of the first failing step, unchanged.
    pub fn evaluate(&self, binding: &Binding) -> Result<Value, EvaluationError> {
        trace!(
            parameters = ?self.inner.parameters.names(),
            arguments = binding.len(),
            expression = %self.inner.internal_repr,
            "evaluating action cursor"
        );

        self.run(Contextual::new(Value::Nil, binding.clone()))
    }
}

impl Default for ActionCursor {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ActionCursor {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            formatter,
            "<action({}): {}>",
            self.inner.parameters.names().join(", "),
            self.inner.internal_repr
        )
    }
}

impl fmt::Debug for ActionCursor {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("ActionCursor")
            .field("parameters", &self.inner.parameters.names())
            .field("nature", self.nature())
            .field("steps", &self.inner.actions.len())
            .field("expression", &self.inner.internal_repr)
            .finish()
    }
}

impl<'a> IntoIterator for &'a ActionCursor {
    type Item = Operand;
    type IntoIter = Unpacking;

    fn into_iter(self) -> Self::IntoIter {
        self.unpack()
    }
}

//! Operator semantics over [`Value`]s.
//!
//! Numbers follow the usual dynamic-language conventions: booleans act as
//! integers, mixing an integer with a float yields a float, integer
//! arithmetic is checked, and floor division and modulo round toward negative
//! infinity.

use std::cmp::Ordering;

use super::{EvaluationError, Value, int_to_float};

/// Every binary operator a cursor can record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOperator {
    /// `**`
    Power,
    /// `*`
    Multiply,
    /// `/`
    TrueDivide,
    /// `//`
    FloorDivide,
    /// `%`
    Modulo,
    /// `@`
    MatrixMultiply,
    /// `+`
    Add,
    /// `-`
    Subtract,
    /// `<<`
    LeftShift,
    /// `>>`
    RightShift,
    /// `&`
    BitAnd,
    /// `^`
    BitXor,
    /// `|`
    BitOr,
    /// `==`
    Equal,
    /// `!=`
    NotEqual,
    /// `<`
    Less,
    /// `<=`
    LessEqual,
    /// `>`
    Greater,
    /// `>=`
    GreaterEqual,
    /// `is`
    Is,
    /// `is not`
    IsNot,
    /// `in`
    In,
    /// `not in`
    NotIn,
    /// `and`
    And,
    /// `or`
    Or,
}

impl BinaryOperator {
    /// All binary operators.
    pub const ALL: [Self; 25] = [
        Self::Power,
        Self::Multiply,
        Self::TrueDivide,
        Self::FloorDivide,
        Self::Modulo,
        Self::MatrixMultiply,
        Self::Add,
        Self::Subtract,
        Self::LeftShift,
        Self::RightShift,
        Self::BitAnd,
        Self::BitXor,
        Self::BitOr,
        Self::Equal,
        Self::NotEqual,
        Self::Less,
        Self::LessEqual,
        Self::Greater,
        Self::GreaterEqual,
        Self::Is,
        Self::IsNot,
        Self::In,
        Self::NotIn,
        Self::And,
        Self::Or,
    ];

    /// Returns the operator as written in expressions.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Power => "**",
            Self::Multiply => "*",
            Self::TrueDivide => "/",
            Self::FloorDivide => "//",
            Self::Modulo => "%",
            Self::MatrixMultiply => "@",
            Self::Add => "+",
            Self::Subtract => "-",
            Self::LeftShift => "<<",
            Self::RightShift => ">>",
            Self::BitAnd => "&",
            Self::BitXor => "^",
            Self::BitOr => "|",
            Self::Equal => "==",
            Self::NotEqual => "!=",
            Self::Less => "<",
            Self::LessEqual => "<=",
            Self::Greater => ">",
            Self::GreaterEqual => ">=",
            Self::Is => "is",
            Self::IsNot => "is not",
            Self::In => "in",
            Self::NotIn => "not in",
            Self::And => "and",
            Self::Or => "or",
        }
    }

    /// Applies the operator.
    ///
    /// `and` and `or` return one of their operands, like short-circuit
    /// connectives; both operands are already evaluated.
    ///
    /// # Errors
    ///
    /// Returns the [`EvaluationError`] the operation raises for these
    /// operands.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use actkit::value::{BinaryOperator, EvaluationError, Value};
    ///
    /// let floor = BinaryOperator::FloorDivide.apply(&Value::from(-7), &Value::from(2));
    /// assert_eq!(floor, Ok(Value::from(-4)));
    ///
    /// let modulo = BinaryOperator::Modulo.apply(&Value::from(-7), &Value::from(2));
    /// assert_eq!(modulo, Ok(Value::from(1)));
    ///
    /// let error = BinaryOperator::TrueDivide.apply(&Value::from(1), &Value::from(0));
    /// assert_eq!(error, Err(EvaluationError::DivisionByZero));
    /// ```
    pub fn apply(self, left: &Value, right: &Value) -> Result<Value, EvaluationError> {
        match self {
            Self::Power => power(left, right),
            Self::Multiply => multiply(left, right),
            Self::TrueDivide => true_divide(left, right),
            Self::FloorDivide => floor_divide(left, right),
            Self::Modulo => modulo(left, right),
            Self::MatrixMultiply => dot(left, right),
            Self::Add => add(left, right),
            Self::Subtract => subtract(left, right),
            Self::LeftShift => left_shift(left, right),
            Self::RightShift => right_shift(left, right),
            Self::BitAnd | Self::BitXor | Self::BitOr => bitwise(self, left, right),
            Self::Equal => Ok(Value::Bool(left == right)),
            Self::NotEqual => Ok(Value::Bool(left != right)),
            Self::Less => compare(self, left, right, Ordering::is_lt),
            Self::LessEqual => compare(self, left, right, Ordering::is_le),
            Self::Greater => compare(self, left, right, Ordering::is_gt),
            Self::GreaterEqual => compare(self, left, right, Ordering::is_ge),
            Self::Is => Ok(Value::Bool(left.is_identical(right))),
            Self::IsNot => Ok(Value::Bool(!left.is_identical(right))),
            Self::In => right.contains(left).map(Value::Bool),
            Self::NotIn => right.contains(left).map(|found| Value::Bool(!found)),
            Self::And => Ok((if left.is_truthy() { right } else { left }).clone()),
            Self::Or => Ok((if left.is_truthy() { left } else { right }).clone()),
        }
    }
}

/// Every unary operator a cursor can record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryOperator {
    /// `+`
    Positive,
    /// `-`
    Negative,
    /// `~`
    Invert,
}

impl UnaryOperator {
    /// Returns the operator as written in expressions.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Positive => "+",
            Self::Negative => "-",
            Self::Invert => "~",
        }
    }

    /// Applies the operator.
    ///
    /// # Errors
    ///
    /// Returns [`EvaluationError::UnaryTypeMismatch`] for non-numbers and
    /// [`EvaluationError::Overflow`] when negating `i64::MIN`.
    pub fn apply(self, operand: &Value) -> Result<Value, EvaluationError> {
        let mismatch = || EvaluationError::UnaryTypeMismatch {
            operation: self.symbol(),
            operand: operand.type_name(),
        };

        match (self, operand) {
            (Self::Positive | Self::Negative, Value::Float(value)) => Ok(Value::Float(
                if self == Self::Negative { -value } else { *value },
            )),
            (Self::Positive, _) => operand.as_int().map(Value::Int).ok_or_else(mismatch),
            (Self::Negative, _) => operand
                .as_int()
                .ok_or_else(mismatch)?
                .checked_neg()
                .map(Value::Int)
                .ok_or(EvaluationError::Overflow { operation: "-" }),
            (Self::Invert, Value::Float(_)) => Err(mismatch()),
            (Self::Invert, _) => operand.as_int().map(|value| Value::Int(!value)).ok_or_else(mismatch),
        }
    }
}

enum Numbers {
    Ints(i64, i64),
    Floats(f64, f64),
}

fn numbers(left: &Value, right: &Value) -> Option<Numbers> {
    match (left.as_int(), right.as_int()) {
        (Some(left), Some(right)) => Some(Numbers::Ints(left, right)),
        _ => Some(Numbers::Floats(left.as_float()?, right.as_float()?)),
    }
}

fn integers(left: &Value, right: &Value) -> Option<(i64, i64)> {
    Some((left.as_int()?, right.as_int()?))
}

fn mismatch(operation: &'static str, left: &Value, right: &Value) -> EvaluationError {
    EvaluationError::TypeMismatch {
        operation,
        left: left.type_name(),
        right: right.type_name(),
    }
}

const fn overflow(operation: &'static str) -> EvaluationError {
    EvaluationError::Overflow { operation }
}

fn add(left: &Value, right: &Value) -> Result<Value, EvaluationError> {
    if let Some(numbers) = numbers(left, right) {
        return match numbers {
            Numbers::Ints(left, right) => left.checked_add(right).map(Value::Int).ok_or(overflow("+")),
            Numbers::Floats(left, right) => Ok(Value::Float(left + right)),
        };
    }

    match (left, right) {
        (Value::Str(first), Value::Str(second)) => Ok(Value::from(format!("{first}{second}"))),
        (Value::Tuple(first), Value::Tuple(second)) => {
            Ok(Value::tuple(first.iter().chain(second.iter()).cloned()))
        }
        (Value::List(first), Value::List(second)) => {
            let items: Vec<Value> = first.borrow().iter().chain(second.borrow().iter()).cloned().collect();
            Ok(Value::list(items))
        }
        _ => Err(mismatch("+", left, right)),
    }
}

fn subtract(left: &Value, right: &Value) -> Result<Value, EvaluationError> {
    match numbers(left, right) {
        Some(Numbers::Ints(left, right)) => left.checked_sub(right).map(Value::Int).ok_or(overflow("-")),
        Some(Numbers::Floats(left, right)) => Ok(Value::Float(left - right)),
        None => Err(mismatch("-", left, right)),
    }
}

/// Length of `len` elements of `size` bytes repeated `times` times, refusing
/// results no allocation could hold.
fn repeated_length(len: usize, size: usize, times: i64) -> Result<usize, EvaluationError> {
    let times = usize::try_from(times).unwrap_or(0);
    let total = len.checked_mul(times).ok_or(overflow("*"))?;

    match total.checked_mul(size.max(1)).map(isize::try_from) {
        Some(Ok(_)) => Ok(total),
        _ => Err(overflow("*")),
    }
}

fn repeated(items: &[Value], times: i64) -> Result<Vec<Value>, EvaluationError> {
    let total = repeated_length(items.len(), std::mem::size_of::<Value>(), times)?;
    Ok(items.iter().cloned().cycle().take(total).collect())
}

fn multiply(left: &Value, right: &Value) -> Result<Value, EvaluationError> {
    if let Some(numbers) = numbers(left, right) {
        return match numbers {
            Numbers::Ints(left, right) => left.checked_mul(right).map(Value::Int).ok_or(overflow("*")),
            Numbers::Floats(left, right) => Ok(Value::Float(left * right)),
        };
    }

    match (left, right) {
        (Value::Str(text), Value::Int(times)) | (Value::Int(times), Value::Str(text)) => {
            repeated_length(text.len(), 1, *times)?;
            Ok(Value::from(text.repeat(usize::try_from(*times).unwrap_or(0))))
        }
        (Value::Tuple(items), Value::Int(times)) | (Value::Int(times), Value::Tuple(items)) => {
            Ok(Value::tuple(repeated(items, *times)?))
        }
        (Value::List(items), Value::Int(times)) | (Value::Int(times), Value::List(items)) => {
            Ok(Value::list(repeated(&items.borrow(), *times)?))
        }
        _ => Err(mismatch("*", left, right)),
    }
}

fn true_divide(left: &Value, right: &Value) -> Result<Value, EvaluationError> {
    let (Some(dividend), Some(divisor)) = (left.as_float(), right.as_float()) else {
        return Err(mismatch("/", left, right));
    };

    if divisor == 0.0 {
        return Err(EvaluationError::DivisionByZero);
    }

    Ok(Value::Float(dividend / divisor))
}

fn floor_divide(left: &Value, right: &Value) -> Result<Value, EvaluationError> {
    match numbers(left, right) {
        Some(Numbers::Ints(_, 0)) => Err(EvaluationError::DivisionByZero),
        Some(Numbers::Ints(dividend, divisor)) => {
            let quotient = dividend.checked_div(divisor).ok_or(overflow("//"))?;
            let inexact = dividend % divisor != 0;

            Ok(Value::Int(
                if inexact && ((dividend < 0) != (divisor < 0)) {
                    quotient - 1
                } else {
                    quotient
                },
            ))
        }
        Some(Numbers::Floats(_, divisor)) if divisor == 0.0 => Err(EvaluationError::DivisionByZero),
        Some(Numbers::Floats(dividend, divisor)) => Ok(Value::Float((dividend / divisor).floor())),
        None => Err(mismatch("//", left, right)),
    }
}

fn modulo(left: &Value, right: &Value) -> Result<Value, EvaluationError> {
    match numbers(left, right) {
        Some(Numbers::Ints(_, 0)) => Err(EvaluationError::DivisionByZero),
        Some(Numbers::Ints(dividend, divisor)) => {
            let remainder = dividend.checked_rem(divisor).ok_or(overflow("%"))?;

            Ok(Value::Int(
                if remainder != 0 && ((remainder < 0) != (divisor < 0)) {
                    remainder + divisor
                } else {
                    remainder
                },
            ))
        }
        Some(Numbers::Floats(_, divisor)) if divisor == 0.0 => Err(EvaluationError::DivisionByZero),
        Some(Numbers::Floats(dividend, divisor)) => {
            let remainder = dividend % divisor;

            Ok(Value::Float(
                if remainder != 0.0 && ((remainder < 0.0) != (divisor < 0.0)) {
                    remainder + divisor
                } else {
                    remainder
                },
            ))
        }
        None => Err(mismatch("%", left, right)),
    }
}

fn power(left: &Value, right: &Value) -> Result<Value, EvaluationError> {
    match numbers(left, right) {
        Some(Numbers::Ints(base, exponent)) if exponent >= 0 => u32::try_from(exponent)
            .ok()
            .and_then(|exponent| base.checked_pow(exponent))
            .map(Value::Int)
            .ok_or(overflow("**")),
        Some(Numbers::Ints(0, _)) => Err(EvaluationError::DivisionByZero),
        Some(Numbers::Ints(base, exponent)) => {
            Ok(Value::Float(int_to_float(base).powf(int_to_float(exponent))))
        }
        Some(Numbers::Floats(base, exponent)) if base == 0.0 && exponent < 0.0 => {
            Err(EvaluationError::DivisionByZero)
        }
        Some(Numbers::Floats(base, exponent)) => Ok(Value::Float(base.powf(exponent))),
        None => Err(mismatch("**", left, right)),
    }
}

fn dot(left: &Value, right: &Value) -> Result<Value, EvaluationError> {
    let (Some(first), Some(second)) = (left.to_vec(), right.to_vec()) else {
        return Err(mismatch("@", left, right));
    };

    if first.len() != second.len() {
        return Err(EvaluationError::ShapeMismatch {
            left: first.len(),
            right: second.len(),
        });
    }

    first
        .iter()
        .zip(&second)
        .try_fold(Value::Int(0), |total, (x, y)| add(&total, &multiply(x, y)?))
}

fn left_shift(left: &Value, right: &Value) -> Result<Value, EvaluationError> {
    let (value, count) = integers(left, right).ok_or_else(|| mismatch("<<", left, right))?;

    if count < 0 {
        return Err(EvaluationError::NegativeShift);
    }

    if value == 0 {
        return Ok(Value::Int(0));
    }

    if count >= 64 {
        return Err(overflow("<<"));
    }

    i64::try_from(i128::from(value) << count)
        .map(Value::Int)
        .map_err(|_| overflow("<<"))
}

fn right_shift(left: &Value, right: &Value) -> Result<Value, EvaluationError> {
    let (value, count) = integers(left, right).ok_or_else(|| mismatch(">>", left, right))?;

    match count {
        ..0 => Err(EvaluationError::NegativeShift),
        64.. => Ok(Value::Int(if value < 0 { -1 } else { 0 })),
        _ => Ok(Value::Int(value >> count)),
    }
}

fn bitwise(operator: BinaryOperator, left: &Value, right: &Value) -> Result<Value, EvaluationError> {
    if let (Value::Bool(first), Value::Bool(second)) = (left, right) {
        return Ok(Value::Bool(match operator {
            BinaryOperator::BitAnd => first & second,
            BinaryOperator::BitXor => first ^ second,
            _ => first | second,
        }));
    }

    let (first, second) =
        integers(left, right).ok_or_else(|| mismatch(operator.symbol(), left, right))?;

    Ok(Value::Int(match operator {
        BinaryOperator::BitAnd => first & second,
        BinaryOperator::BitXor => first ^ second,
        _ => first | second,
    }))
}

fn compare<P>(
    operator: BinaryOperator,
    left: &Value,
    right: &Value,
    predicate: P,
) -> Result<Value, EvaluationError>
where
    P: Fn(Ordering) -> bool,
{
    Ok(Value::Bool(
        ordering(operator.symbol(), left, right)?.is_some_and(predicate),
    ))
}

/// `None` for unordered floats.
fn ordering(
    operation: &'static str,
    left: &Value,
    right: &Value,
) -> Result<Option<Ordering>, EvaluationError> {
    if let Some(numbers) = numbers(left, right) {
        return Ok(match numbers {
            Numbers::Ints(left, right) => Some(left.cmp(&right)),
            Numbers::Floats(left, right) => left.partial_cmp(&right),
        });
    }

    match (left, right) {
        (Value::Str(first), Value::Str(second)) => Ok(Some(first.cmp(second))),
        (Value::Tuple(first), Value::Tuple(second)) => sequence_ordering(operation, first, second),
        (Value::List(first), Value::List(second)) => {
            sequence_ordering(operation, &first.borrow(), &second.borrow())
        }
        _ => Err(EvaluationError::NotComparable {
            operation,
            left: left.type_name(),
            right: right.type_name(),
        }),
    }
}

fn sequence_ordering(
    operation: &'static str,
    left: &[Value],
    right: &[Value],
) -> Result<Option<Ordering>, EvaluationError> {
    for (first, second) in left.iter().zip(right) {
        if first != second {
            return ordering(operation, first, second);
        }
    }

    Ok(Some(left.len().cmp(&right.len())))
}

//! Operator methods and `std::ops` implementations for action cursors.
//!
//! Fallible `try_*` methods report clashing parameter priorities as
//! [`CursorError::DuplicatePriority`]; the `std::ops` operators panic on such
//! a clash instead. Reflected `r*` methods put a constant on the left and
//! never fail.

use std::ops::{Add, BitAnd, BitOr, BitXor, Div, Mul, Neg, Not, Rem, Shl, Shr, Sub};

use paste::paste;

use super::{ActionCursor, CursorError, Operand};
use crate::value::{BinaryOperator, UnaryOperator, Value};

macro_rules! arithmetic_methods {
    ($($name:ident => $operator:ident),* $(,)?) => {
        paste! {
            impl ActionCursor {
                $(
                    #[doc = "Records `" $name "` with the cursor on the left."]
                    ///
                    /// # Errors
                    ///
                    /// Returns [`CursorError::DuplicatePriority`] if a cursor
                    /// operand clashes with this cursor's parameters.
                    pub fn [<try_ $name>]<O: Into<Operand>>(&self, operand: O) -> Result<Self, CursorError> {
                        self.binary(BinaryOperator::$operator, operand)
                    }

                    #[doc = "Records `" $name "` with `value` on the left."]
                    #[must_use]
                    pub fn [<r $name>]<V: Into<Value>>(&self, value: V) -> Self {
                        self.reflected(BinaryOperator::$operator, value)
                    }
                )*
            }
        }
    };
}

arithmetic_methods! {
    pow => Power,
    mul => Multiply,
    div => TrueDivide,
    floor_div => FloorDivide,
    rem => Modulo,
    matmul => MatrixMultiply,
    add => Add,
    sub => Subtract,
    shl => LeftShift,
    shr => RightShift,
    bitand => BitAnd,
    bitxor => BitXor,
    bitor => BitOr,
}

macro_rules! comparison_methods {
    ($($(#[$meta:meta])* $name:ident => $operator:ident),* $(,)?) => {
        impl ActionCursor {
            $(
                $(#[$meta])*
                ///
                /// # Errors
                ///
                /// Returns [`CursorError::DuplicatePriority`] if a cursor
                /// operand clashes with this cursor's parameters.
                pub fn $name<O: Into<Operand>>(&self, operand: O) -> Result<Self, CursorError> {
                    self.binary(BinaryOperator::$operator, operand)
                }
            )*
        }
    };
}

comparison_methods! {
    /// Records `==`.
    eq => Equal,
    /// Records `!=`.
    ne => NotEqual,
    /// Records `<`.
    lt => Less,
    /// Records `<=`.
    le => LessEqual,
    /// Records `>`.
    gt => Greater,
    /// Records `>=`.
    ge => GreaterEqual,
    /// Records an identity check.
    is_ => Is,
    /// Records a negated identity check.
    is_not => IsNot,
    /// Records a membership check of the current value in the operand.
    in_ => In,
    /// Records a negated membership check.
    not_in => NotIn,
    /// Records a short-circuit `and` of the two values.
    and_ => And,
    /// Records a short-circuit `or` of the two values.
    or_ => Or,
}

impl ActionCursor {
    /// Records unary `+`.
    #[must_use]
    pub fn pos(&self) -> Self {
        self.unary(UnaryOperator::Positive)
    }

    /// Records bitwise inversion.
    #[must_use]
    pub fn invert(&self) -> Self {
        self.unary(UnaryOperator::Invert)
    }
}

fn clashing(error: CursorError) -> ! {
    panic!("cannot combine action cursors: {error}")
}

macro_rules! operator_impls {
    ($($trait:ident :: $method:ident => $try_method:ident, $reflected:ident);* $(;)?) => {
        $(
            /// # Panics
            ///
            /// Panics if a cursor operand has a parameter clashing with this
            /// cursor's parameters.
            impl<T: Into<Operand>> $trait<T> for ActionCursor {
                type Output = Self;

                fn $method(self, operand: T) -> Self {
                    self.$try_method(operand).unwrap_or_else(|error| clashing(error))
                }
            }

            /// # Panics
            ///
            /// Panics if a cursor operand has a parameter clashing with this
            /// cursor's parameters.
            impl<T: Into<Operand>> $trait<T> for &ActionCursor {
                type Output = ActionCursor;

                fn $method(self, operand: T) -> ActionCursor {
                    self.$try_method(operand).unwrap_or_else(|error| clashing(error))
                }
            }

            impl $trait<ActionCursor> for i64 {
                type Output = ActionCursor;

                fn $method(self, cursor: ActionCursor) -> ActionCursor {
                    cursor.$reflected(self)
                }
            }

            impl $trait<ActionCursor> for f64 {
                type Output = ActionCursor;

                fn $method(self, cursor: ActionCursor) -> ActionCursor {
                    cursor.$reflected(self)
                }
            }

            impl $trait<ActionCursor> for Value {
                type Output = ActionCursor;

                fn $method(self, cursor: ActionCursor) -> ActionCursor {
                    cursor.$reflected(self)
                }
            }
        )*
    };
}

operator_impls! {
    Add::add => try_add, radd;
    Sub::sub => try_sub, rsub;
    Mul::mul => try_mul, rmul;
    Div::div => try_div, rdiv;
    Rem::rem => try_rem, rrem;
    Shl::shl => try_shl, rshl;
    Shr::shr => try_shr, rshr;
    BitAnd::bitand => try_bitand, rbitand;
    BitOr::bitor => try_bitor, rbitor;
    BitXor::bitxor => try_bitxor, rbitxor;
}

impl Neg for ActionCursor {
    type Output = Self;

    fn neg(self) -> Self {
        self.unary(UnaryOperator::Negative)
    }
}

impl Neg for &ActionCursor {
    type Output = ActionCursor;

    fn neg(self) -> ActionCursor {
        self.unary(UnaryOperator::Negative)
    }
}

impl Not for ActionCursor {
    type Output = Self;

    fn not(self) -> Self {
        self.invert()
    }
}

impl Not for &ActionCursor {
    type Output = ActionCursor;

    fn not(self) -> ActionCursor {
        self.invert()
    }
}

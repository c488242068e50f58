//! How a cursor was last extended.
//!
//! Natures are nominal [`Flag`]s, so a group such as [`operation`] compares
//! equal to each of its members.

use crate::flag::{Flag, flag};
use crate::value::{BinaryOperator, UnaryOperator};

use super::Operand;

macro_rules! natures {
    ($($(#[$meta:meta])* $name:ident),* $(,)?) => {
        $(
            $(#[$meta])*
            #[must_use]
            pub fn $name() -> Flag {
                flag(stringify!($name))
            }
        )*
    };
}

natures! {
    /// An attribute read on the previous value.
    attrgetting,
    /// A free identifier resolved from the scope.
    vargetting,
    /// An item read on the previous value.
    itemgetting,
    /// A call of the previous value.
    calling,
    /// A tuple or list built from operands.
    packing,
    /// An attribute or item write.
    setting,
    /// A binary operator.
    binary_operation,
    /// A unary operator.
    single_operation,
    /// A cursor that records nothing yet.
    set_by_initialization,
    /// A cursor returning one of its arguments.
    returning,
}

/// Either kind of operator.
#[must_use]
pub fn operation() -> Flag {
    binary_operation() | single_operation()
}

/// Display descriptor of an operator: its sign and how loosely it binds.
///
/// Higher priorities bind more loosely. The priority only decides where
/// cursor representations need parentheses.
///
/// | priority | operators                                   |
/// |----------|---------------------------------------------|
/// | 0        | `**`                                        |
/// | 1        | unary `+` `-` `~`                           |
/// | 2        | `*` `/` `//` `%` `@`                        |
/// | 3        | `+` `-`                                     |
/// | 4        | `<<` `>>`                                   |
/// | 5        | `&`                                         |
/// | 6        | `^`                                         |
/// | 7        | `\|`                                        |
/// | 8        | comparisons, `is`, `is not`, `in`, `not in` |
/// | 9        | `and`                                       |
/// | 10       | `or`                                        |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OperatorModel {
    sign: &'static str,
    priority: u8,
}

impl OperatorModel {
    /// Returns the model of a binary operator.
    #[must_use]
    pub const fn of_binary(operator: BinaryOperator) -> Self {
        let priority = match operator {
            BinaryOperator::Power => 0,
            BinaryOperator::Multiply
            | BinaryOperator::TrueDivide
            | BinaryOperator::FloorDivide
            | BinaryOperator::Modulo
            | BinaryOperator::MatrixMultiply => 2,
            BinaryOperator::Add | BinaryOperator::Subtract => 3,
            BinaryOperator::LeftShift | BinaryOperator::RightShift => 4,
            BinaryOperator::BitAnd => 5,
            BinaryOperator::BitXor => 6,
            BinaryOperator::BitOr => 7,
            BinaryOperator::Equal
            | BinaryOperator::NotEqual
            | BinaryOperator::Less
            | BinaryOperator::LessEqual
            | BinaryOperator::Greater
            | BinaryOperator::GreaterEqual
            | BinaryOperator::Is
            | BinaryOperator::IsNot
            | BinaryOperator::In
            | BinaryOperator::NotIn => 8,
            BinaryOperator::And => 9,
            BinaryOperator::Or => 10,
        };

        Self {
            sign: operator.symbol(),
            priority,
        }
    }

    /// Returns the model of a unary operator.
    #[must_use]
    pub const fn of_unary(operator: UnaryOperator) -> Self {
        Self {
            sign: operator.symbol(),
            priority: 1,
        }
    }

    /// Returns the sign.
    #[must_use]
    pub const fn sign(self) -> &'static str {
        self.sign
    }

    /// Returns the display priority.
    #[must_use]
    pub const fn priority(self) -> u8 {
        self.priority
    }
}

/// What the last extension of a cursor was applied with.
#[derive(Debug, Clone)]
pub enum NatureContext {
    /// No detail.
    Nothing,
    /// The attribute or identifier name.
    Name(String),
    /// The item keys.
    Key(Vec<Operand>),
    /// The operator.
    Operator(OperatorModel),
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn test_operation_matches_both_kinds() {
        assert!(binary_operation() == operation());
        assert!(operation() == single_operation());
        assert!(calling() != operation());
    }

    #[rstest]
    fn test_get_group_for_setting() {
        let gets = attrgetting() | itemgetting();

        assert!(itemgetting() == gets);
        assert!(vargetting() != gets);
    }

    #[rstest]
    #[case(BinaryOperator::Power, 0)]
    #[case(BinaryOperator::FloorDivide, 2)]
    #[case(BinaryOperator::Subtract, 3)]
    #[case(BinaryOperator::BitOr, 7)]
    #[case(BinaryOperator::LessEqual, 8)]
    #[case(BinaryOperator::Or, 10)]
    fn test_binary_priorities(#[case] operator: BinaryOperator, #[case] priority: u8) {
        assert_eq!(OperatorModel::of_binary(operator).priority(), priority);
    }

    #[rstest]
    fn test_less_equal_sign() {
        assert_eq!(OperatorModel::of_binary(BinaryOperator::LessEqual).sign(), "<=");
    }
}

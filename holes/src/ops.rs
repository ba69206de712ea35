//! `std::ops` implementations. Each one routes through [`binary`] or [`unary`].
//!
//! `i32` literals are accepted alongside `i64` so unsuffixed integer literals resolve on
//! either side of an operator.

use std::ops::{Add, BitAnd, BitOr, BitXor, Div, Mul, Neg, Not, Rem, Shl, Shr, Sub};

use crate::{
    composable::{Operand, binary, unary},
    expression::{BinaryOp, UnaryOp},
    lambda::Lambda,
    placeholder::Placeholder,
};

macro_rules! binary_operator {
    ($trait:ident, $method:ident, $op:expr) => {
        binary_operator!(@forward $trait, $method, $op, Placeholder);
        binary_operator!(@forward $trait, $method, $op, Lambda);
        binary_operator!(@forward $trait, $method, $op, &Lambda);

        binary_operator!(@reflected $trait, $method, $op, i64);
        binary_operator!(@reflected $trait, $method, $op, i32);
    };
    (@forward $trait:ident, $method:ident, $op:expr, $lhs:ty) => {
        impl<R: Into<Operand>> $trait<R> for $lhs {
            type Output = Lambda;

            fn $method(self, rhs: R) -> Lambda {
                binary($op, self, rhs)
            }
        }
    };
    (@reflected $trait:ident, $method:ident, $op:expr, $literal:ty) => {
        impl $trait<Placeholder> for $literal {
            type Output = Lambda;

            fn $method(self, rhs: Placeholder) -> Lambda {
                binary($op, self, rhs)
            }
        }

        impl $trait<Lambda> for $literal {
            type Output = Lambda;

            fn $method(self, rhs: Lambda) -> Lambda {
                binary($op, self, rhs)
            }
        }

        impl $trait<&Lambda> for $literal {
            type Output = Lambda;

            fn $method(self, rhs: &Lambda) -> Lambda {
                binary($op, self, rhs)
            }
        }
    };
}

binary_operator!(Add, add, BinaryOp::Add);
binary_operator!(Sub, sub, BinaryOp::Sub);
binary_operator!(Mul, mul, BinaryOp::Mul);
binary_operator!(Div, div, BinaryOp::TrueDiv);
binary_operator!(Rem, rem, BinaryOp::Mod);
binary_operator!(BitOr, bitor, BinaryOp::BitOr);
binary_operator!(BitAnd, bitand, BinaryOp::BitAnd);
binary_operator!(BitXor, bitxor, BinaryOp::BitXor);
binary_operator!(Shl, shl, BinaryOp::Shl);
binary_operator!(Shr, shr, BinaryOp::Shr);

macro_rules! unary_operator {
    ($trait:ident, $method:ident, $op:expr) => {
        unary_operator!(@impl $trait, $method, $op, Placeholder);
        unary_operator!(@impl $trait, $method, $op, Lambda);
        unary_operator!(@impl $trait, $method, $op, &Lambda);
    };
    (@impl $trait:ident, $method:ident, $op:expr, $operand:ty) => {
        impl $trait for $operand {
            type Output = Lambda;

            fn $method(self) -> Lambda {
                unary($op, self)
            }
        }
    };
}

unary_operator!(Neg, neg, UnaryOp::Neg);
// `!` is bitwise complement on integers; logical negation is `Composable::logical_not`.
unary_operator!(Not, not, UnaryOp::Invert);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{composable::Composable, number::Number, placeholder::underscore};

    #[test]
    fn operators_build_the_same_tree_as_builders() {
        let x = underscore();
        assert_eq!(x + 1, binary(BinaryOp::Add, x, 1));
        assert_eq!(1 - x, binary(BinaryOp::Sub, 1, x));
        assert_eq!(x / 2, binary(BinaryOp::TrueDiv, x, 2));
        assert_eq!(-x, unary(UnaryOp::Neg, x));
        assert_eq!(!x, unary(UnaryOp::Invert, x));
    }

    #[test]
    fn borrowed_lambdas_compose() {
        let x = underscore();
        let inc = x + 1;
        let squared = &inc * &inc;
        assert_eq!(squared.call(&[2]), Ok(Number::Int(9)));
        assert_eq!((2i64 * &inc).call(&[2]), Ok(Number::Int(6)));
        assert_eq!((-&inc).call(&[2]), Ok(Number::Int(-3)));
        assert_eq!(inc.free_vars().len(), 1);
    }
}

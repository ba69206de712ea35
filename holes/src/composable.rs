//! Building lambdas out of placeholders, lambdas and integer literals.
//!
//! Every operator funnels into [`unary`], [`binary`] or [`compare`]. These are the only places
//! where bodies are wrapped and free-variable sequences merged: the left operand's placeholders
//! come first, then the right operand's, and later repeats are dropped. The resulting order is
//! the order in which the produced lambda binds its arguments.

use std::sync::Arc;

use derive_more::From;
use indexmap::IndexSet;

use crate::{
    expression::{BinaryOp, Comparison, Expression, UnaryOp},
    lambda::Lambda,
    placeholder::Placeholder,
};

/// Ordered, duplicate-free sequence of placeholders.
pub type FreeVars = IndexSet<Placeholder>;

/// One side of an operator.
#[derive(Clone, Debug, PartialEq, From)]
pub enum Operand {
    Literal(i64),
    Hole(Placeholder),
    Lambda(Lambda),
}

impl From<i32> for Operand {
    fn from(value: i32) -> Self {
        Self::Literal(value.into())
    }
}

impl From<&Lambda> for Operand {
    fn from(lambda: &Lambda) -> Self {
        Self::Lambda(lambda.clone())
    }
}

impl Operand {
    pub fn body(&self) -> Arc<Expression> {
        match self {
            Self::Literal(value) => Arc::new(Expression::from(*value)),
            Self::Hole(hole) => hole.body(),
            Self::Lambda(lambda) => lambda.body(),
        }
    }

    /// Free placeholders; literals contribute none.
    pub fn free_vars(&self) -> FreeVars {
        match self {
            Self::Literal(_) => FreeVars::new(),
            Self::Hole(hole) => hole.free_vars(),
            Self::Lambda(lambda) => lambda.free_vars(),
        }
    }
}

/// Builds `op(operand)`; the free variables carry over unchanged.
pub fn unary(op: UnaryOp, operand: impl Into<Operand>) -> Lambda {
    let operand = operand.into();
    Lambda::new(operand.free_vars(), Expression::unary(op, operand.body()))
}

/// Builds `lhs op rhs`.
pub fn binary(op: BinaryOp, lhs: impl Into<Operand>, rhs: impl Into<Operand>) -> Lambda {
    let (lhs, rhs) = (lhs.into(), rhs.into());
    let free_vars = lhs.free_vars().into_iter().chain(rhs.free_vars());
    Lambda::new(free_vars, Expression::binary(op, lhs.body(), rhs.body()))
}

/// Builds the comparison `lhs cmp rhs`.
///
/// Comparisons have no reflected form: a literal on the left is passed as `lhs` as is, e.g.
/// `compare(Comparison::Lt, 5, x)` is `5 < x`.
pub fn compare(cmp: Comparison, lhs: impl Into<Operand>, rhs: impl Into<Operand>) -> Lambda {
    binary(cmp.into(), lhs, rhs)
}

/// Shared by [`Placeholder`] and [`Lambda`]: a body, the placeholders it depends on, and the
/// operators Rust has no overloadable syntax for.
pub trait Composable: Into<Operand> + Sized {
    fn body(&self) -> Arc<Expression>;

    fn free_vars(&self) -> FreeVars;

    fn abs(self) -> Lambda {
        unary(UnaryOp::Abs, self)
    }

    /// Unary plus.
    fn pos(self) -> Lambda {
        unary(UnaryOp::Pos, self)
    }

    /// `1` where the operand is zero, `0` elsewhere.
    fn logical_not(self) -> Lambda {
        unary(UnaryOp::Not, self)
    }

    fn floor_div(self, rhs: impl Into<Operand>) -> Lambda {
        binary(BinaryOp::FloorDiv, self, rhs)
    }

    /// `lhs // self`.
    fn rfloor_div(self, lhs: i64) -> Lambda {
        binary(BinaryOp::FloorDiv, lhs, self)
    }

    /// `self ** rhs`. Chains nest to the right when written `a.pow(b.pow(c))`.
    fn pow(self, rhs: impl Into<Operand>) -> Lambda {
        binary(BinaryOp::Pow, self, rhs)
    }

    /// `lhs ** self`.
    fn rpow(self, lhs: i64) -> Lambda {
        binary(BinaryOp::Pow, lhs, self)
    }

    fn lt(self, rhs: impl Into<Operand>) -> Lambda {
        compare(Comparison::Lt, self, rhs)
    }

    fn le(self, rhs: impl Into<Operand>) -> Lambda {
        compare(Comparison::Le, self, rhs)
    }

    fn gt(self, rhs: impl Into<Operand>) -> Lambda {
        compare(Comparison::Gt, self, rhs)
    }

    fn ge(self, rhs: impl Into<Operand>) -> Lambda {
        compare(Comparison::Ge, self, rhs)
    }

    fn equals(self, rhs: impl Into<Operand>) -> Lambda {
        compare(Comparison::Eq, self, rhs)
    }

    fn not_equals(self, rhs: impl Into<Operand>) -> Lambda {
        compare(Comparison::Ne, self, rhs)
    }
}

impl Composable for Placeholder {
    fn body(&self) -> Arc<Expression> {
        Arc::new(Expression::from(*self))
    }

    fn free_vars(&self) -> FreeVars {
        FreeVars::from([*self])
    }
}

impl Composable for Lambda {
    fn body(&self) -> Arc<Expression> {
        Arc::clone(self.expression())
    }

    fn free_vars(&self) -> FreeVars {
        self.holes().clone()
    }
}

impl Composable for &Lambda {
    fn body(&self) -> Arc<Expression> {
        Arc::clone(self.expression())
    }

    fn free_vars(&self) -> FreeVars {
        self.holes().clone()
    }
}

use std::sync::Arc;

use indexmap::IndexMap;
use thiserror::Error;

use crate::{
    expression::{BinaryOp, Constant, Expression, Operator, UnaryOp},
    number::Number,
    placeholder::Placeholder,
};

/// Placeholder bindings for one evaluation.
pub type Context = IndexMap<Placeholder, i64>;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum EvalError {
    #[error("Placeholder `{0}` is not bound")]
    Unbound(Placeholder),

    #[error("Division by zero in `{op}`")]
    DivisionByZero { op: Operator },

    #[error("Integer overflow in `{op}`")]
    Overflow { op: Operator },

    #[error("Unsupported operand `{value}` for `{op}`")]
    UnsupportedOperand { op: Operator, value: Number },

    #[error("Negative shift count")]
    NegativeShift,
}

impl Constant {
    pub fn evaluate(&self, context: &Context) -> Result<Number, EvalError> {
        match self {
            Self::Literal(value) => Ok(Number::Int(*value)),
            Self::Hole(hole) => context
                .get(hole)
                .copied()
                .map(Number::Int)
                .ok_or(EvalError::Unbound(*hole)),
        }
    }
}

impl UnaryOp {
    pub fn apply(self, value: Number) -> Result<Number, EvalError> {
        match self {
            Self::Abs => value.absolute(),
            Self::Pos => Ok(value),
            Self::Neg => value.negate(),
            Self::Not => Ok(value.logical_not()),
            Self::Invert => value.invert(),
        }
    }
}

impl BinaryOp {
    pub fn apply(self, left: Number, right: Number) -> Result<Number, EvalError> {
        match self {
            Self::Add => left.plus(right),
            Self::Sub => left.minus(right),
            Self::Mul => left.times(right),
            Self::FloorDiv => left.floor_div(right),
            Self::TrueDiv => left.true_div(right),
            Self::Mod => left.modulo(right),
            Self::Pow => left.power(right),
            Self::BitOr => left.bitwise(self, right, |a, b| a | b),
            Self::BitAnd => left.bitwise(self, right, |a, b| a & b),
            Self::BitXor => left.bitwise(self, right, |a, b| a ^ b),
            Self::Shl => left.shift_left(right),
            Self::Shr => left.shift_right(right),
            Self::Cmp(cmp) => Ok(left.compare(cmp, right)),
        }
    }
}

/// Pending work above the node currently being evaluated.
enum Frame<'a> {
    Unary(UnaryOp),
    Left { op: BinaryOp, right: &'a Expression },
    Right { op: BinaryOp, left: Number },
}

impl Expression {
    /// Evaluates the tree under `context`.
    ///
    /// Walks the tree with an explicit stack, left operand before right, so the depth of the
    /// tree is not limited by the call stack.
    pub fn evaluate(&self, context: &Context) -> Result<Number, EvalError> {
        let mut frames: Vec<Frame<'_>> = Vec::new();
        let mut expr = self;
        loop {
            let mut value = loop {
                match expr {
                    Self::Constant(constant) => break constant.evaluate(context)?,
                    Self::Unary { op, operand } => {
                        frames.push(Frame::Unary(*op));
                        expr = Arc::as_ref(operand);
                    }
                    Self::Binary { op, left, right } => {
                        frames.push(Frame::Left {
                            op: *op,
                            right: Arc::as_ref(right),
                        });
                        expr = Arc::as_ref(left);
                    }
                }
            };
            loop {
                match frames.pop() {
                    None => return Ok(value),
                    Some(Frame::Unary(op)) => value = op.apply(value)?,
                    Some(Frame::Left { op, right }) => {
                        frames.push(Frame::Right { op, left: value });
                        expr = right;
                        break;
                    }
                    Some(Frame::Right { op, left }) => value = op.apply(left, value)?,
                }
            }
        }
    }
}

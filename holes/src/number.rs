//! Numeric results and the laws each operator follows.
//!
//! Integers are `i64` with checked arithmetic: anything that would overflow fails with
//! [`EvalError::Overflow`] instead of wrapping. True division, and integer powers with a
//! negative exponent, produce [`Number::Real`]. Once a real value is involved the arithmetic
//! stays in `f64`; bitwise operators reject reals. Comparing an `Int` with a `Real` is exact,
//! with no rounding of the integer side.

use std::cmp::Ordering;

use derive_more::{Display, From};
use num::Integer;

use crate::{
    eval::EvalError,
    expression::{BinaryOp, Comparison, Operator, UnaryOp},
};

/// Result of evaluating an expression.
#[derive(Copy, Clone, Debug, Display, From)]
pub enum Number {
    #[display("{_0}")]
    Int(i64),
    #[display("{_0:?}")]
    Real(f64),
}

impl PartialEq for Number {
    fn eq(&self, other: &Self) -> bool {
        self.partial_cmp(other) == Some(Ordering::Equal)
    }
}

impl PartialEq<i64> for Number {
    fn eq(&self, other: &i64) -> bool {
        *self == Self::Int(*other)
    }
}

impl PartialEq<i32> for Number {
    fn eq(&self, other: &i32) -> bool {
        *self == Self::Int(i64::from(*other))
    }
}

impl PartialEq<f64> for Number {
    fn eq(&self, other: &f64) -> bool {
        *self == Self::Real(*other)
    }
}

impl PartialOrd for Number {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (*self, *other) {
            (Self::Int(a), Self::Int(b)) => Some(a.cmp(&b)),
            (Self::Real(a), Self::Real(b)) => a.partial_cmp(&b),
            (Self::Int(a), Self::Real(b)) => compare_int_real(a, b),
            (Self::Real(a), Self::Int(b)) => compare_int_real(b, a).map(Ordering::reverse),
        }
    }
}

impl From<bool> for Number {
    fn from(value: bool) -> Self {
        Self::Int(i64::from(value))
    }
}

impl Number {
    #[allow(clippy::cast_precision_loss)]
    pub fn to_f64(self) -> f64 {
        match self {
            Self::Int(n) => n as f64,
            Self::Real(x) => x,
        }
    }

    pub fn as_int(self) -> Option<i64> {
        match self {
            Self::Int(n) => Some(n),
            Self::Real(_) => None,
        }
    }

    pub fn is_real(self) -> bool {
        matches!(self, Self::Real(_))
    }

    pub fn is_zero(self) -> bool {
        match self {
            Self::Int(n) => n == 0,
            Self::Real(x) => x == 0.0,
        }
    }

    fn integer(self, op: impl Into<Operator>) -> Result<i64, EvalError> {
        match self {
            Self::Int(n) => Ok(n),
            Self::Real(_) => Err(EvalError::UnsupportedOperand {
                op: op.into(),
                value: self,
            }),
        }
    }

    fn arithmetic(
        self,
        rhs: Self,
        op: BinaryOp,
        int: impl FnOnce(i64, i64) -> Option<i64>,
        real: impl FnOnce(f64, f64) -> f64,
    ) -> Result<Self, EvalError> {
        match (self, rhs) {
            (Self::Int(a), Self::Int(b)) => int(a, b)
                .map(Self::Int)
                .ok_or(EvalError::Overflow { op: op.into() }),
            _ => Ok(Self::Real(real(self.to_f64(), rhs.to_f64()))),
        }
    }

    fn nonzero_divisor(self, op: BinaryOp) -> Result<(), EvalError> {
        if self.is_zero() {
            Err(EvalError::DivisionByZero { op: op.into() })
        } else {
            Ok(())
        }
    }

    pub fn plus(self, rhs: Self) -> Result<Self, EvalError> {
        self.arithmetic(rhs, BinaryOp::Add, i64::checked_add, |a, b| a + b)
    }

    pub fn minus(self, rhs: Self) -> Result<Self, EvalError> {
        self.arithmetic(rhs, BinaryOp::Sub, i64::checked_sub, |a, b| a - b)
    }

    pub fn times(self, rhs: Self) -> Result<Self, EvalError> {
        self.arithmetic(rhs, BinaryOp::Mul, i64::checked_mul, |a, b| a * b)
    }

    /// Quotient rounded toward negative infinity.
    pub fn floor_div(self, rhs: Self) -> Result<Self, EvalError> {
        rhs.nonzero_divisor(BinaryOp::FloorDiv)?;
        self.arithmetic(
            rhs,
            BinaryOp::FloorDiv,
            // `checked_div` only fails on `i64::MIN / -1` once zero is excluded
            |a, b| a.checked_div(b).map(|_| Integer::div_floor(&a, &b)),
            |a, b| (a / b).floor(),
        )
    }

    /// Real quotient, whatever the operand types.
    pub fn true_div(self, rhs: Self) -> Result<Self, EvalError> {
        rhs.nonzero_divisor(BinaryOp::TrueDiv)?;
        Ok(Self::Real(self.to_f64() / rhs.to_f64()))
    }

    /// Remainder taking the sign of the divisor, consistent with [`Number::floor_div`].
    pub fn modulo(self, rhs: Self) -> Result<Self, EvalError> {
        rhs.nonzero_divisor(BinaryOp::Mod)?;
        self.arithmetic(
            rhs,
            BinaryOp::Mod,
            |a, b| Some(if b == -1 { 0 } else { Integer::mod_floor(&a, &b) }),
            |a, b| {
                let rem = a % b;
                if rem != 0.0 && (rem < 0.0) != (b < 0.0) {
                    rem + b
                } else {
                    rem
                }
            },
        )
    }

    pub fn power(self, rhs: Self) -> Result<Self, EvalError> {
        let overflow = EvalError::Overflow {
            op: BinaryOp::Pow.into(),
        };
        match (self, rhs) {
            (Self::Int(base), Self::Int(exp)) if exp >= 0 => {
                let exp = usize::try_from(exp).map_err(|_| overflow.clone())?;
                num::checked_pow(base, exp).map(Self::Int).ok_or(overflow)
            }
            _ => {
                if self.is_zero() && rhs.to_f64() < 0.0 {
                    return Err(EvalError::DivisionByZero {
                        op: BinaryOp::Pow.into(),
                    });
                }
                Ok(Self::Real(self.to_f64().powf(rhs.to_f64())))
            }
        }
    }

    /// Comparison result as `1` or `0`. Any comparison involving NaN is false except `!=`.
    pub fn compare(self, cmp: Comparison, rhs: Self) -> Self {
        let ordering = self.partial_cmp(&rhs);
        let holds = match cmp {
            Comparison::Lt => ordering == Some(Ordering::Less),
            Comparison::Le => matches!(ordering, Some(Ordering::Less | Ordering::Equal)),
            Comparison::Gt => ordering == Some(Ordering::Greater),
            #[cfg(not(feature = "legacy-ge"))]
            Comparison::Ge => matches!(ordering, Some(Ordering::Greater | Ordering::Equal)),
            // legacy behaviour: `>=` shares the `<=` law
            #[cfg(feature = "legacy-ge")]
            Comparison::Ge => matches!(ordering, Some(Ordering::Less | Ordering::Equal)),
            Comparison::Eq => ordering == Some(Ordering::Equal),
            Comparison::Ne => ordering != Some(Ordering::Equal),
        };
        holds.into()
    }

    pub fn bitwise(
        self,
        op: BinaryOp,
        rhs: Self,
        law: impl FnOnce(i64, i64) -> i64,
    ) -> Result<Self, EvalError> {
        Ok(Self::Int(law(self.integer(op)?, rhs.integer(op)?)))
    }

    pub fn shift_left(self, rhs: Self) -> Result<Self, EvalError> {
        let op = BinaryOp::Shl;
        let (value, count) = (self.integer(op)?, shift_count(rhs, op)?);
        if value == 0 {
            return Ok(Self::Int(0));
        }
        let overflow = EvalError::Overflow { op: op.into() };
        let count = u32::try_from(count)
            .ok()
            .filter(|count| *count < i64::BITS)
            .ok_or(overflow.clone())?;
        let shifted = value << count;
        if shifted >> count == value {
            Ok(Self::Int(shifted))
        } else {
            Err(overflow)
        }
    }

    /// Arithmetic shift; counts past the width saturate to `0` or `-1`.
    pub fn shift_right(self, rhs: Self) -> Result<Self, EvalError> {
        let op = BinaryOp::Shr;
        let (value, count) = (self.integer(op)?, shift_count(rhs, op)?);
        let shifted = match u32::try_from(count) {
            Ok(count) if count < i64::BITS => value >> count,
            _ if value < 0 => -1,
            _ => 0,
        };
        Ok(Self::Int(shifted))
    }

    pub fn absolute(self) -> Result<Self, EvalError> {
        match self {
            Self::Int(n) => n.checked_abs().map(Self::Int).ok_or(EvalError::Overflow {
                op: UnaryOp::Abs.into(),
            }),
            Self::Real(x) => Ok(Self::Real(x.abs())),
        }
    }

    pub fn negate(self) -> Result<Self, EvalError> {
        match self {
            Self::Int(n) => n.checked_neg().map(Self::Int).ok_or(EvalError::Overflow {
                op: UnaryOp::Neg.into(),
            }),
            Self::Real(x) => Ok(Self::Real(-x)),
        }
    }

    pub fn logical_not(self) -> Self {
        self.is_zero().into()
    }

    pub fn invert(self) -> Result<Self, EvalError> {
        Ok(Self::Int(!self.integer(UnaryOp::Invert)?))
    }
}

// `i64::MIN as f64` is exactly -2^63, and every float in [-2^63, 2^63) truncates to an i64
// without loss.
#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
fn compare_int_real(int: i64, real: f64) -> Option<Ordering> {
    let min = i64::MIN as f64;
    if real.is_nan() {
        None
    } else if real >= -min {
        Some(Ordering::Less)
    } else if real < min {
        Some(Ordering::Greater)
    } else {
        let whole = real.trunc();
        Some(int.cmp(&(whole as i64)).then(whole.total_cmp(&real)))
    }
}

fn shift_count(count: Number, op: BinaryOp) -> Result<i64, EvalError> {
    match count.integer(op)? {
        count if count < 0 => Err(EvalError::NegativeShift),
        count => Ok(count),
    }
}

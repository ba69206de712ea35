//! Deferred integer expressions with named holes.
//!
//! ```
//! use holes::{Composable, underscore};
//!
//! let x = underscore();
//! let f = (x + 1).pow(2);
//! assert_eq!(f.call(&[3]).unwrap(), 16);
//! ```

#![warn(clippy::all, rust_2018_idioms)]

pub mod composable;
pub mod eval;
pub mod expression;
pub mod lambda;
pub mod number;
mod ops;
pub mod placeholder;
pub mod prettyprinter;

pub use composable::{Composable, FreeVars, Operand, binary, compare, unary};
pub use eval::{Context, EvalError};
pub use expression::{BinaryOp, Comparison, Constant, Expression, Operator, UnaryOp};
pub use lambda::{CallError, Lambda};
pub use number::Number;
pub use placeholder::{Placeholder, Registry, placeholder, underscore};
pub use prettyprinter::PrettyPrint;

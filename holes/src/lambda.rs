use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, trace};

use crate::{
    composable::FreeVars,
    eval::{Context, EvalError},
    expression::Expression,
    number::Number,
    placeholder::Placeholder,
};

#[derive(Debug, Error, Clone, PartialEq)]
pub enum CallError {
    #[error("Lambda takes {expected} positional argument(s) but {given} were given")]
    Arity { expected: usize, given: usize },

    #[error(transparent)]
    Eval(#[from] EvalError),
}

/// A deferred computation: free placeholders, bound positionally when called, and a body.
#[derive(Clone, Debug)]
pub struct Lambda {
    holes: FreeVars,
    body: Arc<Expression>,
}

// `IndexSet` equality ignores order, but argument order is part of a lambda's meaning.
impl PartialEq for Lambda {
    fn eq(&self, other: &Self) -> bool {
        self.holes.iter().eq(other.holes.iter()) && self.body == other.body
    }
}

impl From<Placeholder> for Lambda {
    fn from(hole: Placeholder) -> Self {
        Self::new([hole], Expression::from(hole))
    }
}

impl Lambda {
    /// Repeated placeholders in `holes` are dropped, keeping the first occurrence.
    pub fn new(
        holes: impl IntoIterator<Item = Placeholder>,
        body: impl Into<Arc<Expression>>,
    ) -> Self {
        Self {
            holes: holes.into_iter().collect(),
            body: body.into(),
        }
    }

    /// Placeholders in argument order.
    pub fn holes(&self) -> &FreeVars {
        &self.holes
    }

    pub fn expression(&self) -> &Arc<Expression> {
        &self.body
    }

    /// Number of arguments [`Lambda::call`] expects.
    pub fn arity(&self) -> usize {
        self.holes.len()
    }

    /// Binds `args` to the placeholders in order and evaluates the body.
    pub fn call(&self, args: &[i64]) -> Result<Number, CallError> {
        if args.len() != self.arity() {
            debug!(
                "rejecting call with {} argument(s), expected {}",
                args.len(),
                self.arity()
            );
            return Err(CallError::Arity {
                expected: self.arity(),
                given: args.len(),
            });
        }
        let context: Context = self.holes.iter().copied().zip(args.iter().copied()).collect();
        let result = self.body.evaluate(&context)?;
        trace!("called with {args:?}, got {result}");
        Ok(result)
    }

    /// One-argument function view, for passing to iterator adaptors.
    pub fn as_fn(&self) -> impl Fn(i64) -> Result<Number, CallError> + '_ {
        move |arg| self.call(&[arg])
    }
}

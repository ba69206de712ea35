use std::sync::{Arc, OnceLock};

use derive_more::{Display, From};
use indexmap::IndexSet;

use crate::placeholder::Placeholder;

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Display)]
pub enum UnaryOp {
    #[display("abs")]
    Abs,
    #[display("+")]
    Pos,
    #[display("-")]
    Neg,
    #[display("not")]
    Not,
    #[display("~")]
    Invert,
}

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Display)]
pub enum Comparison {
    #[display("<")]
    Lt,
    #[display("<=")]
    Le,
    #[display(">")]
    Gt,
    #[display(">=")]
    Ge,
    #[display("==")]
    Eq,
    #[display("!=")]
    Ne,
}

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Display, From)]
pub enum BinaryOp {
    #[display("+")]
    Add,
    #[display("-")]
    Sub,
    #[display("*")]
    Mul,
    #[display("//")]
    FloorDiv,
    #[display("/")]
    TrueDiv,
    #[display("%")]
    Mod,
    #[display("**")]
    Pow,
    #[display("|")]
    BitOr,
    #[display("&")]
    BitAnd,
    #[display("^")]
    BitXor,
    #[display("<<")]
    Shl,
    #[display(">>")]
    Shr,
    #[display("{_0}")]
    #[from]
    Cmp(Comparison),
}

/// Either kind of operator tag, for error reporting.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Display, From)]
pub enum Operator {
    Unary(UnaryOp),
    Binary(BinaryOp),
}

impl From<Comparison> for Operator {
    fn from(cmp: Comparison) -> Self {
        Self::Binary(BinaryOp::Cmp(cmp))
    }
}

/// Leaf of an expression tree.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Display, From)]
pub enum Constant {
    Literal(i64),
    Hole(Placeholder),
}

/// Immutable expression tree.
///
/// Subtrees are reference counted so composing lambdas never copies nodes. Dropping, comparing
/// and rendering a tree are iterative, so arbitrarily deep chains are handled.
#[derive(Clone)]
pub enum Expression {
    Constant(Constant),
    Unary {
        op: UnaryOp,
        operand: Arc<Expression>,
    },
    Binary {
        op: BinaryOp,
        left: Arc<Expression>,
        right: Arc<Expression>,
    },
}

impl From<i64> for Expression {
    fn from(value: i64) -> Self {
        Self::Constant(Constant::Literal(value))
    }
}

impl From<Placeholder> for Expression {
    fn from(hole: Placeholder) -> Self {
        Self::Constant(Constant::Hole(hole))
    }
}

impl PartialEq for Expression {
    fn eq(&self, other: &Self) -> bool {
        let mut pending = vec![(self, other)];
        while let Some(pair) = pending.pop() {
            match pair {
                (Self::Constant(a), Self::Constant(b)) => {
                    if a != b {
                        return false;
                    }
                }
                (
                    Self::Unary { op, operand },
                    Self::Unary {
                        op: other_op,
                        operand: other_operand,
                    },
                ) => {
                    if op != other_op {
                        return false;
                    }
                    pending.extend(unshared(operand, other_operand));
                }
                (
                    Self::Binary { op, left, right },
                    Self::Binary {
                        op: other_op,
                        left: other_left,
                        right: other_right,
                    },
                ) => {
                    if op != other_op {
                        return false;
                    }
                    pending.extend(unshared(right, other_right));
                    pending.extend(unshared(left, other_left));
                }
                _ => return false,
            }
        }
        true
    }
}

impl Eq for Expression {}

// Shared subtrees are equal without being walked.
fn unshared<'a>(
    a: &'a Arc<Expression>,
    b: &'a Arc<Expression>,
) -> Option<(&'a Expression, &'a Expression)> {
    (!Arc::ptr_eq(a, b)).then(|| (Arc::as_ref(a), Arc::as_ref(b)))
}

impl Expression {
    pub fn unary(op: UnaryOp, operand: Arc<Expression>) -> Self {
        Self::Unary { op, operand }
    }

    pub fn binary(op: BinaryOp, left: Arc<Expression>, right: Arc<Expression>) -> Self {
        Self::Binary { op, left, right }
    }

    /// Direct subexpressions, left to right.
    pub fn children(&self) -> impl Iterator<Item = &Arc<Expression>> {
        let (first, second) = match self {
            Self::Constant(_) => (None, None),
            Self::Unary { operand, .. } => (Some(operand), None),
            Self::Binary { left, right, .. } => (Some(left), Some(right)),
        };
        first.into_iter().chain(second)
    }

    /// Placeholders referenced anywhere in the tree, in left-to-right first-occurrence order.
    pub fn placeholders(&self) -> IndexSet<Placeholder> {
        let mut holes = IndexSet::new();
        let mut stack = vec![self];
        while let Some(expr) = stack.pop() {
            if let Self::Constant(Constant::Hole(hole)) = expr {
                holes.insert(*hole);
            }
            // pushed in reverse so the left child is visited first
            let children: Vec<_> = expr.children().collect();
            stack.extend(children.into_iter().rev().map(Arc::as_ref));
        }
        holes
    }

    /// Number of nodes.
    pub fn size(&self) -> usize {
        let mut size = 0;
        let mut stack = vec![self];
        while let Some(expr) = stack.pop() {
            size += 1;
            stack.extend(expr.children().map(Arc::as_ref));
        }
        size
    }

    /// Length of the longest root-to-leaf path, counting nodes.
    pub fn depth(&self) -> usize {
        let mut depth = 0;
        let mut stack = vec![(self, 1)];
        while let Some((expr, level)) = stack.pop() {
            depth = depth.max(level);
            stack.extend(expr.children().map(|child| (Arc::as_ref(child), level + 1)));
        }
        depth
    }

    fn detach_children(&mut self, detached: &mut Vec<Arc<Expression>>) {
        match self {
            Self::Constant(_) => {}
            Self::Unary { operand, .. } => detached.push(std::mem::replace(operand, leaf())),
            Self::Binary { left, right, .. } => {
                detached.push(std::mem::replace(left, leaf()));
                detached.push(std::mem::replace(right, leaf()));
            }
        }
    }
}

// Shared stand-in swapped into nodes while they are being torn down.
fn leaf() -> Arc<Expression> {
    static LEAF: OnceLock<Arc<Expression>> = OnceLock::new();
    Arc::clone(LEAF.get_or_init(|| Arc::new(Expression::from(0i64))))
}

impl Drop for Expression {
    fn drop(&mut self) {
        let mut detached = Vec::new();
        self.detach_children(&mut detached);
        while let Some(child) = detached.pop() {
            if let Some(mut expr) = Arc::into_inner(child) {
                expr.detach_children(&mut detached);
            }
        }
    }
}

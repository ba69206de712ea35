use std::fmt::{Debug, Display};

use itertools::Itertools;
use pretty::RcDoc;

use crate::{
    expression::{Constant, Expression, Operator, UnaryOp},
    lambda::Lambda,
};

pub trait PrettyPrint {
    fn to_doc(&self) -> RcDoc<'_, ()>;

    fn to_pretty(&self) -> String {
        self.to_doc()
            .pretty(usize::MAX) // debug rendering, never wrapped
            .to_string()
    }
}

impl PrettyPrint for Constant {
    fn to_doc(&self) -> RcDoc<'_, ()> {
        RcDoc::as_string(self)
    }
}

impl PrettyPrint for Expression {
    fn to_doc(&self) -> RcDoc<'_, ()> {
        RcDoc::text(self.render())
    }
}

/// Unit of pending output while rendering an expression.
enum Piece<'a> {
    Node(&'a Expression),
    Text(&'static str),
    Symbol(Operator),
}

impl Expression {
    /// Renders the tree with an explicit work stack, so depth is not limited by the call stack.
    fn render(&self) -> String {
        let mut out = String::new();
        let mut stack = vec![Piece::Node(self)];
        // pieces are pushed in reverse so they pop in output order
        while let Some(piece) = stack.pop() {
            match piece {
                Piece::Text(text) => out.push_str(text),
                Piece::Symbol(op) => out.push_str(&op.to_string()),
                Piece::Node(Self::Constant(constant)) => out.push_str(&constant.to_string()),
                Piece::Node(Self::Unary {
                    op: UnaryOp::Abs,
                    operand,
                }) => stack.extend([
                    Piece::Text(")"),
                    Piece::Node(operand),
                    Piece::Text("abs("),
                ]),
                Piece::Node(Self::Unary {
                    op: UnaryOp::Not,
                    operand,
                }) => {
                    push_operand(&mut stack, operand);
                    stack.push(Piece::Text("not "));
                }
                Piece::Node(Self::Unary { op, operand }) => {
                    push_operand(&mut stack, operand);
                    stack.push(Piece::Symbol((*op).into()));
                }
                Piece::Node(Self::Binary { op, left, right }) => {
                    push_operand(&mut stack, right);
                    stack.extend([
                        Piece::Text(" "),
                        Piece::Symbol((*op).into()),
                        Piece::Text(" "),
                    ]);
                    push_operand(&mut stack, left);
                }
            }
        }
        out
    }
}

// Operands that would read ambiguously next to an operator get parentheses.
fn push_operand<'a>(stack: &mut Vec<Piece<'a>>, operand: &'a Expression) {
    match operand {
        Expression::Binary { .. }
        | Expression::Unary {
            op: UnaryOp::Not, ..
        } => stack.extend([Piece::Text(")"), Piece::Node(operand), Piece::Text("(")]),
        _ => stack.push(Piece::Node(operand)),
    }
}

impl PrettyPrint for Lambda {
    fn to_doc(&self) -> RcDoc<'_, ()> {
        let params = self.holes().iter().join(", ");
        let head = if params.is_empty() {
            RcDoc::text("lambda:")
        } else {
            RcDoc::text("lambda")
                .append(RcDoc::space())
                .append(RcDoc::text(params))
                .append(RcDoc::text(":"))
        };
        head.append(RcDoc::space())
            .append(self.expression().to_doc())
    }
}

impl Display for Expression {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.render())
    }
}

impl Debug for Expression {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Expression({})", self.render())
    }
}

impl Display for Lambda {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_pretty())
    }
}

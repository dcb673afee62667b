//! The expression tree produced by the parser and consumed by the emitter.

use crate::HostAddress;

/// A node of the parsed expression tree.
///
/// Every non-leaf node exclusively owns its children: the tree is a finite,
/// acyclic, non-shared structure. It is built once by the parser and walked
/// once by the emitter.
#[derive(Debug, PartialEq, Eq)]
pub enum Expr {
    Add(Box<Expr>, Box<Expr>),
    Sub(Box<Expr>, Box<Expr>),
    Mul(Box<Expr>, Box<Expr>),
    ExternValue(HostAddress),
    ExternFunction(HostAddress, Vec<Expr>),
    Literal(i32),
    Parenthesised(Box<Expr>),
}

impl Expr {
    pub fn add(lhs: Expr, rhs: Expr) -> Expr {
        Expr::Add(Box::new(lhs), Box::new(rhs))
    }

    pub fn sub(lhs: Expr, rhs: Expr) -> Expr {
        Expr::Sub(Box::new(lhs), Box::new(rhs))
    }

    pub fn mul(lhs: Expr, rhs: Expr) -> Expr {
        Expr::Mul(Box::new(lhs), Box::new(rhs))
    }

    pub fn parenthesised(inner: Expr) -> Expr {
        Expr::Parenthesised(Box::new(inner))
    }
}

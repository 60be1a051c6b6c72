use super::*;

/// Predicates that must all hold. Never nests another `ExprAnd`.
#[derive(Debug, Clone, PartialEq)]
pub struct ExprAnd {
    pub operands: Vec<Expr>,
}

/// Predicates of which at least one must hold. Never nests another `ExprOr`.
#[derive(Debug, Clone, PartialEq)]
pub struct ExprOr {
    pub operands: Vec<Expr>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExprNot {
    pub expr: Box<Expr>,
}

impl Expr {
    /// Combines two predicates with `AND`, flattening nested `AND` nodes.
    pub fn and(lhs: impl Into<Self>, rhs: impl Into<Self>) -> Self {
        let operands = flatten(lhs.into(), rhs.into(), |expr| match expr {
            Expr::And(and) => Ok(and.operands),
            other => Err(other),
        });
        ExprAnd { operands }.into()
    }

    /// Combines an optional predicate with another; `None` yields `rhs`.
    pub fn and_option(lhs: Option<Self>, rhs: impl Into<Self>) -> Self {
        match lhs {
            Some(lhs) => Expr::and(lhs, rhs),
            None => rhs.into(),
        }
    }

    /// Combines two predicates with `OR`, flattening nested `OR` nodes.
    pub fn or(lhs: impl Into<Self>, rhs: impl Into<Self>) -> Self {
        let operands = flatten(lhs.into(), rhs.into(), |expr| match expr {
            Expr::Or(or) => Ok(or.operands),
            other => Err(other),
        });
        ExprOr { operands }.into()
    }

    pub fn not(expr: impl Into<Self>) -> Self {
        ExprNot {
            expr: Box::new(expr.into()),
        }
        .into()
    }
}

/// Operands of `lhs` and `rhs` in order, splicing in the operands of
/// either side that `split` recognizes as the same connective.
fn flatten(lhs: Expr, rhs: Expr, split: impl Fn(Expr) -> Result<Vec<Expr>, Expr>) -> Vec<Expr> {
    let mut operands = vec![];

    for expr in [lhs, rhs] {
        match split(expr) {
            Ok(nested) => operands.extend(nested),
            Err(expr) => operands.push(expr),
        }
    }

    operands
}

impl From<ExprAnd> for Expr {
    fn from(value: ExprAnd) -> Self {
        Self::And(value)
    }
}

impl From<ExprOr> for Expr {
    fn from(value: ExprOr) -> Self {
        Self::Or(value)
    }
}

impl From<ExprNot> for Expr {
    fn from(value: ExprNot) -> Self {
        Self::Not(value)
    }
}

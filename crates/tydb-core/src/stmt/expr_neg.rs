use super::*;

#[derive(Debug, Clone, PartialEq)]
pub struct ExprNeg {
    pub expr: Box<Expr>,
}

impl Expr {
    pub fn neg(expr: impl Into<Operand>) -> Self {
        ExprNeg {
            expr: Box::new(expr.into().into_expr(None)),
        }
        .into()
    }
}

impl From<ExprNeg> for Expr {
    fn from(value: ExprNeg) -> Self {
        Self::Neg(value)
    }
}

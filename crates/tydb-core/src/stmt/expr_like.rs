use super::*;

/// `expr LIKE pattern`, or `ILIKE` when case-insensitive.
#[derive(Debug, Clone, PartialEq)]
pub struct ExprLike {
    pub expr: Box<Expr>,
    pub pattern: Box<Expr>,
    pub case_insensitive: bool,
}

impl Expr {
    pub fn like(expr: impl Into<Operand>, pattern: impl Into<Operand>) -> Self {
        Self::like_impl(expr.into(), pattern.into(), false)
    }

    pub fn ilike(expr: impl Into<Operand>, pattern: impl Into<Operand>) -> Self {
        Self::like_impl(expr.into(), pattern.into(), true)
    }

    fn like_impl(expr: Operand, pattern: Operand, case_insensitive: bool) -> Self {
        let (expr, pattern) = Operand::encode_pair(expr, pattern);

        ExprLike {
            expr: Box::new(expr),
            pattern: Box::new(pattern),
            case_insensitive,
        }
        .into()
    }
}

impl From<ExprLike> for Expr {
    fn from(value: ExprLike) -> Self {
        Self::Like(value)
    }
}

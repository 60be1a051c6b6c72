use super::*;

/// Tests whether an expression is null.
///
/// # Examples
///
/// ```text
/// is_null(x)      // x IS NULL
/// is_not_null(x)  // x IS NOT NULL
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ExprIsNull {
    /// When `true`, this is an "is not null" check.
    pub negate: bool,

    /// The expression to check for null.
    pub expr: Box<Expr>,
}

impl ExprIsNull {
    pub(crate) fn new(negate: bool, expr: Expr) -> ExprIsNull {
        ExprIsNull {
            negate,
            expr: Box::new(expr),
        }
    }
}

impl Expr {
    pub fn is_null(expr: impl Into<Operand>) -> Self {
        ExprIsNull::new(false, expr.into().into_expr(None)).into()
    }

    pub fn is_not_null(expr: impl Into<Operand>) -> Self {
        ExprIsNull::new(true, expr.into().into_expr(None)).into()
    }
}

impl From<ExprIsNull> for Expr {
    fn from(value: ExprIsNull) -> Self {
        Self::IsNull(value)
    }
}

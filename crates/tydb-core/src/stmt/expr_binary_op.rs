use super::*;

#[derive(Debug, Clone, PartialEq)]
pub struct ExprBinaryOp {
    pub lhs: Box<Expr>,
    pub op: BinaryOp,
    pub rhs: Box<Expr>,
}

impl Expr {
    /// Builds a comparison.
    ///
    /// When exactly one operand is a field column, the other operand is
    /// encoded through that field's codec. Equality against null becomes an
    /// `IS NULL` / `IS NOT NULL` check.
    pub fn binary_op(lhs: impl Into<Operand>, op: BinaryOp, rhs: impl Into<Operand>) -> Self {
        let (lhs, rhs) = Operand::encode_pair(lhs.into(), rhs.into());

        if op.is_equality() {
            if rhs.is_value_null() {
                return ExprIsNull::new(op.is_ne(), lhs).into();
            }

            if lhs.is_value_null() {
                return ExprIsNull::new(op.is_ne(), rhs).into();
            }
        }

        ExprBinaryOp {
            lhs: Box::new(lhs),
            op,
            rhs: Box::new(rhs),
        }
        .into()
    }

    pub fn eq(lhs: impl Into<Operand>, rhs: impl Into<Operand>) -> Self {
        Self::binary_op(lhs, BinaryOp::Eq, rhs)
    }

    pub fn ne(lhs: impl Into<Operand>, rhs: impl Into<Operand>) -> Self {
        Self::binary_op(lhs, BinaryOp::Ne, rhs)
    }

    pub fn ge(lhs: impl Into<Operand>, rhs: impl Into<Operand>) -> Self {
        Self::binary_op(lhs, BinaryOp::Ge, rhs)
    }

    pub fn gt(lhs: impl Into<Operand>, rhs: impl Into<Operand>) -> Self {
        Self::binary_op(lhs, BinaryOp::Gt, rhs)
    }

    pub fn le(lhs: impl Into<Operand>, rhs: impl Into<Operand>) -> Self {
        Self::binary_op(lhs, BinaryOp::Le, rhs)
    }

    pub fn lt(lhs: impl Into<Operand>, rhs: impl Into<Operand>) -> Self {
        Self::binary_op(lhs, BinaryOp::Lt, rhs)
    }
}

impl From<ExprBinaryOp> for Expr {
    fn from(value: ExprBinaryOp) -> Self {
        Self::BinaryOp(value)
    }
}

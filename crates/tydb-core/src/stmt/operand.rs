use super::*;
use crate::schema::{Field, FieldTy};

use chrono::{DateTime, FixedOffset, Utc};

/// One side of an expression under construction.
///
/// Operands are lowered to [`Expr`] once the builder knows whether a single
/// field takes part, which decides whether literals get encoded.
#[derive(Debug, Clone)]
pub enum Operand {
    /// A field column, with the field's kind for encoding literals.
    Column { column: ExprColumn, ty: FieldTy },

    /// An already built expression.
    Expr(Expr),

    /// A literal, not yet encoded.
    Value(Value),
}

impl Operand {
    /// The field kind when this operand is a column.
    pub fn field_ty(&self) -> Option<FieldTy> {
        match self {
            Operand::Column { ty, .. } => Some(*ty),
            _ => None,
        }
    }

    /// Lowers both operands, encoding literals through the single
    /// participating column when there is exactly one.
    pub(crate) fn encode_pair(lhs: Operand, rhs: Operand) -> (Expr, Expr) {
        let ty = match (lhs.field_ty(), rhs.field_ty()) {
            (Some(ty), None) | (None, Some(ty)) => Some(ty),
            _ => None,
        };

        (lhs.into_expr(ty), rhs.into_expr(ty))
    }

    pub(crate) fn into_expr(self, encode: Option<FieldTy>) -> Expr {
        match self {
            Operand::Column { column, .. } => Expr::Column(column),
            Operand::Expr(expr) => expr,
            Operand::Value(value) => match encode {
                Some(ty) => Expr::Value(ty.encode(value)),
                None => Expr::Value(value),
            },
        }
    }
}

impl From<&Field> for Operand {
    fn from(field: &Field) -> Self {
        Operand::Column {
            column: ExprColumn::new(field.id),
            ty: field.ty,
        }
    }
}

impl From<Expr> for Operand {
    fn from(expr: Expr) -> Self {
        Operand::Expr(expr)
    }
}

impl From<Operand> for Expr {
    fn from(operand: Operand) -> Self {
        operand.into_expr(None)
    }
}

impl From<&Field> for Expr {
    fn from(field: &Field) -> Self {
        Expr::Column(ExprColumn::new(field.id))
    }
}

macro_rules! impl_operand_from_value {
    ( $( $t:ty ),* $(,)? ) => {
        $(
            impl From<$t> for Operand {
                fn from(value: $t) -> Self {
                    Operand::Value(Value::from(value))
                }
            }
        )*
    };
}

impl_operand_from_value!(
    Value,
    &Value,
    bool,
    i32,
    i64,
    f64,
    &str,
    String,
    &String,
    DateTime<FixedOffset>,
    DateTime<Utc>,
    Option<bool>,
    Option<i64>,
    Option<f64>,
    Option<&str>,
    Option<String>,
);

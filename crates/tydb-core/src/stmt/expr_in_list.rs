use super::*;

/// `expr IN (values...)`
#[derive(Debug, Clone, PartialEq)]
pub struct ExprInList {
    pub expr: Box<Expr>,
    pub list: Vec<Value>,
}

impl Expr {
    /// Builds a membership test. List items are encoded element-wise
    /// through the field's codec when `expr` is a field column.
    pub fn in_list<I>(expr: impl Into<Operand>, list: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        let expr = expr.into();
        let ty = expr.field_ty();

        let list = list
            .into_iter()
            .map(|item| {
                let item = item.into();
                match ty {
                    Some(ty) => ty.encode(item),
                    None => item,
                }
            })
            .collect();

        ExprInList {
            expr: Box::new(expr.into_expr(None)),
            list,
        }
        .into()
    }
}

impl From<ExprInList> for Expr {
    fn from(value: ExprInList) -> Self {
        Self::InList(value)
    }
}

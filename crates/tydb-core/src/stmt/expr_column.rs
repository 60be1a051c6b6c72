use super::*;
use crate::schema::FieldId;

/// Reference to a field's column.
///
/// Without an alias the column is qualified by its owning table's name;
/// with one it is qualified by the join alias.
#[derive(Debug, Clone, PartialEq)]
pub struct ExprColumn {
    pub field: FieldId,
    pub alias: Option<String>,
}

impl ExprColumn {
    pub fn new(field: FieldId) -> ExprColumn {
        ExprColumn { field, alias: None }
    }

    pub fn aliased(field: FieldId, alias: impl Into<String>) -> ExprColumn {
        ExprColumn {
            field,
            alias: Some(alias.into()),
        }
    }
}

impl From<ExprColumn> for Expr {
    fn from(value: ExprColumn) -> Self {
        Self::Column(value)
    }
}

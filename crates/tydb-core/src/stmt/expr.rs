use super::*;

/// A node of a predicate tree.
///
/// Expressions are built through the constructors on [`Expr`] and on
/// [`Field`](crate::schema::Field); literal operands are encoded through the
/// participating field's codec at construction time.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// AND a set of binary expressions
    And(ExprAnd),

    /// Binary comparison
    BinaryOp(ExprBinaryOp),

    /// A column of a table, possibly through a join alias
    Column(ExprColumn),

    /// Membership of a value in a list of literals
    InList(ExprInList),

    /// Null check
    IsNull(ExprIsNull),

    /// String pattern match
    Like(ExprLike),

    /// Arithmetic negation
    Neg(ExprNeg),

    /// Boolean negation
    Not(ExprNot),

    /// OR a set of binary expressions
    Or(ExprOr),

    /// A literal value
    Value(Value),
}

impl Expr {
    pub fn is_value(&self) -> bool {
        matches!(self, Expr::Value(_))
    }

    pub fn is_value_null(&self) -> bool {
        matches!(self, Expr::Value(Value::Null))
    }

    pub fn is_column(&self) -> bool {
        matches!(self, Expr::Column(_))
    }

    /// Returns `true` for `AND`/`OR` nodes, which need grouping when nested
    /// under a different combinator.
    pub fn is_combinator(&self) -> bool {
        matches!(self, Expr::And(_) | Expr::Or(_))
    }
}

impl From<Value> for Expr {
    fn from(value: Value) -> Self {
        Expr::Value(value)
    }
}

use super::{comma, Delimited, Ident, Params, ToSql};

use crate::stmt;

/// An operand, parenthesized when `group` is set.
struct Operand<'a> {
    expr: &'a stmt::Expr,
    group: bool,
}

impl ToSql for &stmt::Expr {
    fn to_sql<P: Params>(self, f: &mut super::Formatter<'_, P>) {
        use stmt::Expr::*;

        match self {
            And(expr) => {
                let operands = expr
                    .operands
                    .iter()
                    .map(|operand| Operand::group_if(operand, matches!(operand, Or(_))));
                fmt!(f, Delimited(operands, " AND "));
            }
            BinaryOp(expr) => {
                debug_assert!(!expr.lhs.is_value_null());
                debug_assert!(!expr.rhs.is_value_null());

                fmt!(f, Operand::atomic(&expr.lhs) " " expr.op " " Operand::atomic(&expr.rhs));
            }
            Column(expr) => {
                let column = f.serializer.column_name(expr.field);

                match &expr.alias {
                    Some(alias) => fmt!(f, Ident(alias) "." column),
                    None => {
                        let owner = f.serializer.schema.field(expr.field).owner;
                        let table = f.serializer.table_name(owner);
                        fmt!(f, table "." column);
                    }
                }
            }
            InList(expr) if expr.list.is_empty() => {
                // Nothing is a member of the empty list
                fmt!(f, "1 = 0");
            }
            InList(expr) => {
                let items = comma(&expr.list);
                fmt!(f, Operand::atomic(&expr.expr) " IN (" items ")");
            }
            IsNull(expr) => {
                let check = if expr.negate { " IS NOT NULL" } else { " IS NULL" };
                fmt!(f, Operand::atomic(&expr.expr) check);
            }
            Like(expr) if expr.case_insensitive && !f.serializer.dialect.supports_ilike() => {
                let (lhs, pattern) = (&*expr.expr, &*expr.pattern);
                fmt!(f, "LOWER(" lhs ") LIKE LOWER(" pattern ")");
            }
            Like(expr) => {
                let op = if expr.case_insensitive { " ILIKE " } else { " LIKE " };
                fmt!(f, Operand::atomic(&expr.expr) op Operand::atomic(&expr.pattern));
            }
            Neg(expr) => {
                fmt!(f, "-" Operand::atomic(&expr.expr));
            }
            Not(expr) => {
                fmt!(f, "NOT " Operand::atomic(&expr.expr));
            }
            Or(expr) => {
                let operands = expr
                    .operands
                    .iter()
                    .map(|operand| Operand::group_if(operand, matches!(operand, And(_))));
                fmt!(f, Delimited(operands, " OR "));
            }
            Value(value) => fmt!(f, value),
        }
    }
}

impl<'a> Operand<'a> {
    fn group_if(expr: &'a stmt::Expr, group: bool) -> Operand<'a> {
        Operand { expr, group }
    }

    /// Groups anything that is not a column or a value.
    fn atomic(expr: &'a stmt::Expr) -> Operand<'a> {
        Operand {
            expr,
            group: !(expr.is_column() || expr.is_value()),
        }
    }
}

impl ToSql for Operand<'_> {
    fn to_sql<P: Params>(self, f: &mut super::Formatter<'_, P>) {
        if self.group {
            fmt!(f, "(" self.expr ")");
        } else {
            fmt!(f, self.expr);
        }
    }
}

impl ToSql for &stmt::BinaryOp {
    fn to_sql<P: Params>(self, f: &mut super::Formatter<'_, P>) {
        f.dst.push_str(self.as_sql());
    }
}

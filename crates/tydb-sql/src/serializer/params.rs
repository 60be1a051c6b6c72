use super::{Formatter, ToSql};

use tydb_core::stmt;

/// Collects the values bound to a statement's placeholders.
pub trait Params {
    fn push(&mut self, param: &stmt::Value) -> Placeholder;
}

/// 1-based position of a bound parameter.
pub struct Placeholder(pub usize);

impl Params for Vec<stmt::Value> {
    fn push(&mut self, value: &stmt::Value) -> Placeholder {
        self.push(value.clone());
        Placeholder(self.len())
    }
}

impl ToSql for Placeholder {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        f.serializer.dialect.write_placeholder(f.dst, self.0);
    }
}

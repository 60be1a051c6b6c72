use super::*;

use tydb_core::{
    schema::{Schema, TableId},
    Error, Result,
};

/// `DELETE` of the rows matching a filter.
#[derive(Debug, Clone)]
pub struct Delete {
    pub table: TableId,
    pub filter: Expr,
}

impl Delete {
    /// Deletes the rows whose primary key is one of `keys`.
    pub fn by_keys(schema: &Schema, table: TableId, keys: Vec<Value>) -> Result<Delete> {
        let Some(primary_key) = schema.primary_key(table) else {
            return Err(Error::invalid_statement(format!(
                "table `{}` has no primary key",
                schema.table(table).type_name
            )));
        };

        Ok(Delete {
            table,
            filter: primary_key.in_list(keys),
        })
    }

    /// Deletes the rows equal to `values` in every field, for tables
    /// without a primary key.
    pub fn matching(schema: &Schema, table: TableId, values: &[Value]) -> Result<Delete> {
        let mut filter = None;

        for (field, value) in schema.fields_of(table).zip(values) {
            filter = Some(Expr::and_option(filter, field.eq(value)));
        }

        let Some(filter) = filter else {
            return Err(Error::invalid_statement(format!(
                "table `{}` has no fields to match",
                schema.table(table).type_name
            )));
        };

        Ok(Delete { table, filter })
    }
}

impl From<Delete> for Statement {
    fn from(value: Delete) -> Self {
        Self::Delete(value)
    }
}

use super::*;

use tydb_core::{
    schema::{FieldId, TableId},
    Error, Result,
};

/// `INSERT` of one or more rows sharing a column list.
#[derive(Debug, Clone)]
pub struct Insert {
    pub table: TableId,

    /// Columns receiving values; may be empty
    pub columns: Vec<FieldId>,

    /// One entry per row, each as wide as `columns`
    pub rows: Vec<Vec<InsertValue>>,
}

/// One value of an inserted row.
#[derive(Debug, Clone, PartialEq)]
pub enum InsertValue {
    /// A value already encoded for storage
    Value(Value),

    /// The dialect's per-value default keyword
    ServerDefault,
}

impl Insert {
    /// Validates the shape of an insert.
    ///
    /// A single row with no columns inserts all defaults; several such rows
    /// have no SQL form.
    pub fn new(table: TableId, columns: Vec<FieldId>, rows: Vec<Vec<InsertValue>>) -> Result<Insert> {
        if rows.is_empty() {
            return Err(Error::invalid_statement("insert has no rows"));
        }

        if columns.is_empty() && rows.len() > 1 {
            return Err(Error::invalid_statement(
                "can't represent multiple rows with no columns",
            ));
        }

        if let Some(row) = rows.iter().find(|row| row.len() != columns.len()) {
            return Err(Error::invalid_statement(format!(
                "insert row has {} values for {} columns",
                row.len(),
                columns.len()
            )));
        }

        Ok(Insert {
            table,
            columns,
            rows,
        })
    }

    /// True when the insert has no column list, i.e. `DEFAULT VALUES`.
    pub fn is_default_values(&self) -> bool {
        self.columns.is_empty()
    }
}

impl From<Value> for InsertValue {
    fn from(value: Value) -> Self {
        InsertValue::Value(value)
    }
}

impl From<Insert> for Statement {
    fn from(value: Insert) -> Self {
        Self::Insert(value)
    }
}

use super::*;

use tydb_core::schema::{Schema, TableId};

/// A statement to drop a SQL table.
#[derive(Debug, Clone)]
pub struct DropTable {
    /// Name of the table.
    pub name: String,

    /// Whether or not to add an `IF EXISTS` clause.
    pub if_exists: bool,
}

impl Statement {
    /// Drops a table if it exists.
    pub fn drop_table_if_exists(schema: &Schema, table: TableId) -> Self {
        DropTable {
            name: schema.table(table).name.clone(),
            if_exists: true,
        }
        .into()
    }
}

impl From<DropTable> for Statement {
    fn from(value: DropTable) -> Self {
        Self::DropTable(value)
    }
}

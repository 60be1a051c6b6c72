mod column_def;
pub use column_def::{ColumnDef, ColumnDefault};

mod create_table;
pub use create_table::CreateTable;

mod delete;
pub use delete::Delete;

mod drop_table;
pub use drop_table::DropTable;

mod insert;
pub use insert::{Insert, InsertValue};

mod select;
pub use select::Select;

pub use tydb_core::stmt::*;

/// A statement the serializer can render.
#[derive(Debug, Clone)]
pub enum Statement {
    CreateTable(CreateTable),
    Delete(Delete),
    DropTable(DropTable),
    Insert(Insert),
    Select(Select),
}

impl Statement {
    /// True for statements whose execution yields rows.
    pub fn is_query(&self) -> bool {
        matches!(self, Statement::Select(_))
    }
}

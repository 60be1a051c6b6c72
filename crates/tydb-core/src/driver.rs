mod blocking;
pub use blocking::Blocking;

use crate::{async_trait, stmt::Value, Result};

/// One result row, with values in the order of the selected columns.
pub type Row = Vec<Value>;

/// A blocking database connection.
///
/// Connections are transport only: they execute already serialized SQL
/// with positional parameters and hand rows back. They know nothing about
/// the schema.
pub trait Connection: Send {
    /// Opens a cursor borrowing the connection.
    fn cursor(&mut self) -> Result<Box<dyn Cursor + '_>>;
}

/// Executes one statement at a time and yields its rows.
pub trait Cursor: Send {
    /// Executes `sql`, binding `params` in order.
    fn execute(&mut self, sql: &str, params: &[Value]) -> Result<()>;

    /// Returns the next row of the last executed statement, or `None` once
    /// the rows are exhausted.
    fn fetch_one(&mut self) -> Result<Option<Row>>;

    /// Row id generated by the last insert, when the database reports one.
    fn last_row_id(&self) -> Option<i64> {
        None
    }
}

/// The async counterpart of [`Connection`].
#[async_trait]
pub trait AsyncConnection: Send {
    async fn cursor<'a>(&'a mut self) -> Result<Box<dyn AsyncCursor + 'a>>;
}

/// The async counterpart of [`Cursor`].
#[async_trait]
pub trait AsyncCursor: Send {
    async fn execute(&mut self, sql: &str, params: &[Value]) -> Result<()>;

    async fn fetch_one(&mut self) -> Result<Option<Row>>;

    fn last_row_id(&self) -> Option<i64> {
        None
    }
}

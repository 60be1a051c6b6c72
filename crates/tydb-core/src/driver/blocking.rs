use super::{AsyncConnection, AsyncCursor, Connection, Cursor, Row};
use crate::{async_trait, stmt::Value, Result};

/// Exposes a blocking [`Connection`] through the async interface.
///
/// Calls run inline on the polling task, so this suits drivers whose calls
/// return quickly, such as an embedded SQLite database.
#[derive(Debug)]
pub struct Blocking<C>(pub C);

struct BlockingCursor<'a>(Box<dyn Cursor + 'a>);

impl<C> Blocking<C> {
    pub fn into_inner(self) -> C {
        self.0
    }
}

#[async_trait]
impl<C: Connection> AsyncConnection for Blocking<C> {
    async fn cursor<'a>(&'a mut self) -> Result<Box<dyn AsyncCursor + 'a>> {
        let cursor = self.0.cursor()?;
        Ok(Box::new(BlockingCursor(cursor)))
    }
}

#[async_trait]
impl AsyncCursor for BlockingCursor<'_> {
    async fn execute(&mut self, sql: &str, params: &[Value]) -> Result<()> {
        self.0.execute(sql, params)
    }

    async fn fetch_one(&mut self) -> Result<Option<Row>> {
        self.0.fetch_one()
    }

    fn last_row_id(&self) -> Option<i64> {
        self.0.last_row_id()
    }
}

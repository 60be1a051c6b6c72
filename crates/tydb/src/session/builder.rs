use super::AsyncSession;
use crate::Session;

use tydb_core::{
    driver::{AsyncConnection, Blocking, Connection},
    Result, Schema,
};
use tydb_sql::{dialect, Dialect};

use std::sync::Arc;

/// Configures and opens sessions.
#[derive(Debug, Default)]
pub struct Builder {
    /// SQL flavor statements are rendered in; generic when unset
    dialect: Option<Arc<dyn Dialect>>,
}

impl Builder {
    pub fn dialect(&mut self, dialect: impl Dialect) -> &mut Self {
        self.dialect = Some(Arc::new(dialect));
        self
    }

    /// Selects the dialect by name, e.g. `"sqlite"` or `"postgresql"`.
    pub fn dialect_name(&mut self, name: &str) -> Result<&mut Self> {
        self.dialect = Some(Arc::from(dialect::from_name(name)?));
        Ok(self)
    }

    /// Opens an async session over `conn`.
    pub fn connect<C: AsyncConnection>(
        &self,
        schema: impl Into<Arc<Schema>>,
        conn: C,
    ) -> AsyncSession<C> {
        AsyncSession::new(schema.into(), self.resolve_dialect(), conn)
    }

    /// Opens a blocking session over `conn`.
    pub fn connect_blocking<C: Connection>(
        &self,
        schema: impl Into<Arc<Schema>>,
        conn: C,
    ) -> Session<C> {
        Session::from_async(self.connect(schema, Blocking(conn)))
    }

    fn resolve_dialect(&self) -> Arc<dyn Dialect> {
        match &self.dialect {
            Some(dialect) => dialect.clone(),
            None => Arc::new(dialect::Generic),
        }
    }
}

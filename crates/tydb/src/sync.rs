//! Blocking sessions.
//!
//! [`Session`] drives the async session over a [`Blocking`] connection,
//! completing each operation before returning. A blocking cursor never
//! yields, so every future resolves on its first poll.

use crate::{result, AsyncSession, Builder, Instance, Joins, Query, Record};

use futures::executor::block_on;
use tydb_core::{
    driver::{Blocking, Connection},
    schema::TableId,
    stmt::Value,
    Result, Row, Schema,
};
use tydb_sql::Dialect;

use std::sync::Arc;

/// A session over a blocking [`Connection`].
pub struct Session<C> {
    inner: AsyncSession<Blocking<C>>,
}

/// Rows of a blocking query; iterating fetches them one at a time.
#[derive(Debug)]
pub struct QueryResult<'a, T> {
    inner: result::QueryResult<'a, T>,
}

impl Session<()> {
    pub fn builder() -> Builder {
        Builder::default()
    }
}

impl<C: Connection> Session<C> {
    pub(crate) fn from_async(inner: AsyncSession<Blocking<C>>) -> Session<C> {
        Session { inner }
    }

    pub fn schema(&self) -> &Arc<Schema> {
        self.inner.schema()
    }

    pub fn dialect(&self) -> &dyn Dialect {
        self.inner.dialect()
    }

    pub fn connection(&mut self) -> &mut C {
        &mut self.inner.connection().0
    }

    pub fn into_connection(self) -> C {
        self.inner.into_connection().into_inner()
    }

    pub fn setup(&mut self, tables: &[TableId]) -> Result<()> {
        block_on(self.inner.setup(tables))
    }

    pub fn destroy(&mut self, tables: &[TableId]) -> Result<()> {
        block_on(self.inner.destroy(tables))
    }

    pub fn select(&mut self, query: impl Into<Query>) -> Result<QueryResult<'_, Instance>> {
        block_on(self.inner.select(query)).map(QueryResult::new)
    }

    pub fn get(&mut self, query: impl Into<Query>) -> Result<Instance> {
        block_on(self.inner.get(query))
    }

    pub fn first(&mut self, query: impl Into<Query>) -> Result<Option<Instance>> {
        block_on(self.inner.first(query))
    }

    pub fn load(&mut self, instance: &mut Instance, name: &str) -> Result<Option<Instance>> {
        block_on(self.inner.load(instance, name))
    }

    pub fn load_with(
        &mut self,
        instance: &mut Instance,
        name: &str,
        joins: Joins,
    ) -> Result<Option<Instance>> {
        block_on(self.inner.load_with(instance, name, joins))
    }

    pub fn create(&mut self, table: impl Into<TableId>, record: Record) -> Result<Option<i64>> {
        block_on(self.inner.create(table, record))
    }

    pub fn bulk_create<I>(&mut self, table: impl Into<TableId>, columns: &[&str], rows: I) -> Result<()>
    where
        I: IntoIterator<Item = Vec<Value>>,
    {
        block_on(self.inner.bulk_create(table, columns, rows))
    }

    pub fn remove(&mut self, instances: &[Instance]) -> Result<()> {
        block_on(self.inner.remove(instances))
    }

    pub fn delete<I>(&mut self, table: impl Into<TableId>, keys: I) -> Result<()>
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        block_on(self.inner.delete(table, keys))
    }

    pub fn raw(&mut self, sql: &str, params: &[Value]) -> Result<QueryResult<'_, Row>> {
        block_on(self.inner.raw(sql, params)).map(QueryResult::new)
    }
}

impl<'a, T: Clone> QueryResult<'a, T> {
    fn new(inner: result::QueryResult<'a, T>) -> QueryResult<'a, T> {
        QueryResult { inner }
    }

    /// Every row; replays the buffer once the rows have been fetched.
    pub fn collect_vec(&mut self) -> Result<Vec<T>> {
        block_on(self.inner.collect())
    }

    pub fn buffered(&self) -> Result<&[T]> {
        self.inner.buffered()
    }

    pub fn is_done(&self) -> bool {
        self.inner.is_done()
    }
}

impl<T: Clone> Iterator for QueryResult<'_, T> {
    type Item = Result<T>;

    fn next(&mut self) -> Option<Self::Item> {
        block_on(self.inner.next())
    }
}

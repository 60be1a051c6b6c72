mod value;
pub(crate) use value::Value;

use rusqlite::Connection as RusqliteConnection;
use std::{
    borrow::Cow,
    collections::VecDeque,
    path::{Path, PathBuf},
};
use tydb_core::{
    async_trait,
    driver::{AsyncConnection, AsyncCursor, Row},
    err, stmt, Error, Result,
};
use url::Url;

#[derive(Debug)]
pub enum Sqlite {
    File(PathBuf),
    InMemory,
}

impl Sqlite {
    /// Create a new SQLite driver from a `sqlite:` connection URL
    pub fn new(url: impl Into<String>) -> Result<Self> {
        let url_str = url.into();
        let url = Url::parse(&url_str).map_err(Error::driver)?;

        if url.scheme() != "sqlite" {
            return Err(err!(
                "connection URL does not have a `sqlite` scheme; url={}",
                url_str
            ));
        }

        if url.path() == ":memory:" {
            Ok(Self::InMemory)
        } else {
            Ok(Self::File(PathBuf::from(url.path())))
        }
    }

    /// Create an in-memory SQLite database
    pub fn in_memory() -> Self {
        Self::InMemory
    }

    /// Open a SQLite database at the specified file path
    pub fn open<P: AsRef<Path>>(path: P) -> Self {
        Self::File(path.as_ref().to_path_buf())
    }

    pub fn url(&self) -> Cow<'_, str> {
        match self {
            Sqlite::InMemory => Cow::Borrowed("sqlite::memory:"),
            Sqlite::File(path) => Cow::Owned(format!("sqlite:{}", path.display())),
        }
    }

    /// Opens a connection. Every in-memory connection is a fresh database.
    pub fn connect(&self) -> Result<Connection> {
        match self {
            Sqlite::File(path) => Connection::open(path),
            Sqlite::InMemory => Connection::in_memory(),
        }
    }
}

#[derive(Debug)]
pub struct Connection {
    connection: RusqliteConnection,
}

impl Connection {
    pub fn in_memory() -> Result<Self> {
        let connection = RusqliteConnection::open_in_memory().map_err(Error::driver)?;
        Ok(Self { connection })
    }

    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let connection = RusqliteConnection::open(path).map_err(Error::driver)?;
        Ok(Self { connection })
    }
}

impl tydb_core::Connection for Connection {
    fn cursor(&mut self) -> Result<Box<dyn tydb_core::Cursor + '_>> {
        Ok(Box::new(Cursor::new(&mut self.connection)))
    }
}

#[async_trait]
impl AsyncConnection for Connection {
    async fn cursor<'a>(&'a mut self) -> Result<Box<dyn AsyncCursor + 'a>> {
        Ok(Box::new(Cursor::new(&mut self.connection)))
    }
}

/// Runs statements on a borrowed connection.
///
/// Query rows are read in full when the statement executes and handed out
/// one at a time afterwards.
#[derive(Debug)]
pub struct Cursor<'a> {
    connection: &'a mut RusqliteConnection,
    rows: VecDeque<Row>,
    last_row_id: Option<i64>,
}

impl<'a> Cursor<'a> {
    fn new(connection: &'a mut RusqliteConnection) -> Self {
        Self {
            connection,
            rows: VecDeque::new(),
            last_row_id: None,
        }
    }

    fn exec(&mut self, sql: &str, params: &[stmt::Value]) -> Result<()> {
        self.rows.clear();

        let mut stmt = self.connection.prepare_cached(sql).map_err(Error::driver)?;
        let params = params.iter().cloned().map(Value::from);
        let width = stmt.column_count();

        if width == 0 {
            let count = stmt
                .execute(rusqlite::params_from_iter(params))
                .map_err(Error::driver)?;

            // Zero means no row was ever inserted on this connection
            let id = self.connection.last_insert_rowid();
            self.last_row_id = (id != 0).then_some(id);

            tracing::trace!(count, "sqlite statement executed");
            return Ok(());
        }

        let mut rows = stmt
            .query(rusqlite::params_from_iter(params))
            .map_err(Error::driver)?;

        while let Some(row) = rows.next().map_err(Error::driver)? {
            let items = (0..width)
                .map(|index| Value::from_sql(row, index).map(Value::into_inner))
                .collect::<Result<Vec<_>>>()?;

            self.rows.push_back(items);
        }

        Ok(())
    }
}

impl tydb_core::Cursor for Cursor<'_> {
    fn execute(&mut self, sql: &str, params: &[stmt::Value]) -> Result<()> {
        self.exec(sql, params)
    }

    fn fetch_one(&mut self) -> Result<Option<Row>> {
        Ok(self.rows.pop_front())
    }

    fn last_row_id(&self) -> Option<i64> {
        self.last_row_id
    }
}

#[async_trait]
impl<'a> AsyncCursor for Cursor<'a> {
    async fn execute(&mut self, sql: &str, params: &[stmt::Value]) -> Result<()> {
        self.exec(sql, params)
    }

    async fn fetch_one(&mut self) -> Result<Option<Row>> {
        Ok(self.rows.pop_front())
    }

    fn last_row_id(&self) -> Option<i64> {
        self.last_row_id
    }
}

mod instance;
pub use instance::{Binding, Instance};

mod materialize;

pub mod query;
pub use query::{BoundCollection, Joins, Query};

mod record;
pub use record::Record;

pub mod result;
pub use result::QueryResult;

pub mod session;
pub use session::{AsyncSession, Builder};

pub mod sync;
pub use sync::Session;

pub use tydb_core::{
    driver::{self, AsyncConnection, AsyncCursor, Blocking, Connection, Cursor, Row},
    err,
    schema::{self, Schema},
    stmt::{self, Expr, Value},
    Error, Result,
};
pub use tydb_sql::{dialect, Dialect};

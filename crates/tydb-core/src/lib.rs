pub mod driver;
pub use driver::{AsyncConnection, AsyncCursor, Connection, Cursor, Row};

mod error;
pub use error::Error;

pub mod schema;
pub use schema::Schema;

pub mod stmt;

/// A Result type alias that uses TyDB's [`Error`] type.
pub type Result<T> = core::result::Result<T, Error>;

pub use async_trait::async_trait;

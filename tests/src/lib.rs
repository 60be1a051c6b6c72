#[macro_use]
mod macros;

pub mod fixtures;

use tydb::{dialect, AsyncSession, Schema, Session};
use tydb_driver_sqlite::{Connection, Sqlite};

use std::{future::Future, sync::Arc, sync::Once};

/// Installs a `tracing` subscriber once per test process.
///
/// Filtered by `RUST_LOG`; output is captured per test.
pub fn init_logging() {
    static INIT: Once = Once::new();

    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// A blocking session over a fresh in-memory SQLite database with every
/// table of `schema` created.
pub fn session(schema: &Arc<Schema>) -> Session<Connection> {
    init_logging();

    let conn = assert_ok!(Sqlite::in_memory().connect());
    let mut session = Session::builder()
        .dialect(dialect::Sqlite)
        .connect_blocking(schema.clone(), conn);

    let tables: Vec<_> = schema.tables.iter().map(|table| table.id).collect();
    assert_ok!(session.setup(&tables));
    session
}

/// The async counterpart of [`session`].
pub async fn async_session(schema: &Arc<Schema>) -> AsyncSession<Connection> {
    init_logging();

    let conn = assert_ok!(Sqlite::in_memory().connect());
    let mut session = Session::builder()
        .dialect(dialect::Sqlite)
        .connect(schema.clone(), conn);

    let tables: Vec<_> = schema.tables.iter().map(|table| table.id).collect();
    assert_ok!(session.setup(&tables).await);
    session
}

/// Runs an async test body on a current-thread Tokio runtime.
pub fn run<F, Fut>(test_fn: F)
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = ()>,
{
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("Failed to create Tokio runtime");

    runtime.block_on(test_fn());
}

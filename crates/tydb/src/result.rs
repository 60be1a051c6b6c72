use tydb_core::{driver::AsyncCursor, Error, Result, Row};

use std::fmt;

/// Rows of an executed statement, fetched lazily and buffered.
///
/// The first pass pulls rows from the cursor one at a time with
/// [`next`](QueryResult::next). Once every row has been fetched the result
/// can be replayed from its buffer any number of times. Only one pass may
/// be in flight: asking for the buffer while the first pass is partway
/// through is an error.
pub struct QueryResult<'a, T> {
    cursor: Box<dyn AsyncCursor + 'a>,
    transform: Box<dyn FnMut(Row) -> Result<T> + Send + 'a>,
    state: State,
    buffer: Vec<T>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Pending,
    Iterating,
    Done,
    Failed,
}

impl<'a, T: Clone> QueryResult<'a, T> {
    pub(crate) fn new(
        cursor: Box<dyn AsyncCursor + 'a>,
        transform: impl FnMut(Row) -> Result<T> + Send + 'a,
    ) -> QueryResult<'a, T> {
        QueryResult {
            cursor,
            transform: Box::new(transform),
            state: State::Pending,
            buffer: vec![],
        }
    }

    /// Fetches the next row of the first pass.
    ///
    /// Returns `None` once the rows are exhausted, and keeps returning
    /// `None` afterwards; use [`collect`](QueryResult::collect) to replay.
    pub async fn next(&mut self) -> Option<Result<T>> {
        match self.state {
            State::Done | State::Failed => return None,
            State::Pending => self.state = State::Iterating,
            State::Iterating => {}
        }

        let row = match self.cursor.fetch_one().await {
            Ok(Some(row)) => row,
            Ok(None) => {
                self.state = State::Done;
                return None;
            }
            Err(err) => return Some(Err(self.fail(err))),
        };

        tracing::trace!(columns = row.len(), "fetched row");

        match (self.transform)(row) {
            Ok(item) => {
                self.buffer.push(item.clone());
                Some(Ok(item))
            }
            Err(err) => Some(Err(self.fail(err))),
        }
    }

    /// Every row, fetching whatever the first pass has not read yet.
    pub async fn collect(&mut self) -> Result<Vec<T>> {
        if self.state == State::Pending {
            while let Some(item) = self.next().await {
                item?;
            }
        }

        self.buffered().map(<[T]>::to_vec)
    }

    /// The buffered rows of a finished first pass.
    pub fn buffered(&self) -> Result<&[T]> {
        match self.state {
            State::Done => Ok(&self.buffer),
            State::Pending => Err(Error::invalid_statement("result has not been iterated yet")),
            State::Iterating => Err(Error::invalid_statement(
                "initial result iteration still in progress",
            )),
            State::Failed => Err(Error::invalid_statement("result iteration failed")),
        }
    }

    pub fn is_done(&self) -> bool {
        self.state == State::Done
    }

    /// Generated key reported by the statement's cursor.
    pub fn last_row_id(&self) -> Option<i64> {
        self.cursor.last_row_id()
    }

    fn fail(&mut self, err: Error) -> Error {
        self.state = State::Failed;
        err
    }
}

impl<T> fmt::Debug for QueryResult<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QueryResult")
            .field("state", &self.state)
            .field("buffered", &self.buffer.len())
            .finish()
    }
}

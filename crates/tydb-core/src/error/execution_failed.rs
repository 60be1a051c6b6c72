use super::Error;

/// Error when a statement fails inside the connection's cursor.
///
/// The SQL text is kept so the failing statement can be reported. The
/// driver's error is attached as the cause.
#[derive(Debug)]
pub(super) struct ExecutionFailed {
    sql: Box<str>,
}

impl std::error::Error for ExecutionFailed {}

impl core::fmt::Display for ExecutionFailed {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "execution failed: {}", self.sql)
    }
}

impl Error {
    /// Creates an execution failure for the given SQL text.
    ///
    /// Use with [`Error::context`] on the driver error so the original cause
    /// stays in the chain.
    pub fn execution_failed(sql: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::ExecutionFailed(ExecutionFailed {
            sql: sql.into().into(),
        }))
    }

    /// Returns `true` if this error is an execution failure.
    pub fn is_execution_failed(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::ExecutionFailed(_))
    }

    /// Returns the SQL text of the first execution failure in the chain.
    pub fn sql(&self) -> Option<&str> {
        self.chain().find_map(|err| match err.kind() {
            super::ErrorKind::ExecutionFailed(failed) => Some(&*failed.sql),
            _ => None,
        })
    }
}

use super::{Error, ErrorKind};

/// A definition or a request TyDB refuses before touching the database.
///
/// Schema errors come from the builder: an attribute bound twice, a
/// reference over a field that is not a foreign key, a deferred slot left
/// unassigned. Statement errors come from sessions and builders: a missing
/// required value, a join path from the wrong table, removing several rows
/// of a table without a primary key.
#[derive(Debug)]
pub(super) struct InvalidError {
    subject: Subject,
    message: Box<str>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Subject {
    Schema,
    Statement,
}

impl std::error::Error for InvalidError {}

impl core::fmt::Display for InvalidError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        let subject = match self.subject {
            Subject::Schema => "schema",
            Subject::Statement => "statement",
        };
        write!(f, "invalid {subject}: {}", self.message)
    }
}

impl Error {
    pub fn invalid_schema(message: impl Into<String>) -> Error {
        Error::invalid(Subject::Schema, message.into())
    }

    pub fn invalid_statement(message: impl Into<String>) -> Error {
        Error::invalid(Subject::Statement, message.into())
    }

    fn invalid(subject: Subject, message: String) -> Error {
        Error::from(ErrorKind::Invalid(InvalidError {
            subject,
            message: message.into(),
        }))
    }

    /// Returns `true` if a schema definition was rejected.
    pub fn is_invalid_schema(&self) -> bool {
        matches!(self.kind(), ErrorKind::Invalid(err) if err.subject == Subject::Schema)
    }

    /// Returns `true` if a request was rejected before execution.
    pub fn is_invalid_statement(&self) -> bool {
        matches!(self.kind(), ErrorKind::Invalid(err) if err.subject == Subject::Statement)
    }
}

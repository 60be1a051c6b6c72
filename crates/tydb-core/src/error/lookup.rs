use super::{Error, ErrorKind};

/// A lookup expecting exactly one row found some other number.
///
/// Raised by `get` on a query and by `load` on a reference whose foreign
/// key points at no row. The target names what was looked up, e.g.
/// ``table `Inner` `` or ``"`Outer.inner` points at a missing row"``.
#[derive(Debug)]
pub(super) struct LookupError {
    outcome: Outcome,
    target: Box<str>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Outcome {
    NoRows,
    ManyRows,
}

impl std::error::Error for LookupError {}

impl core::fmt::Display for LookupError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        match self.outcome {
            Outcome::NoRows => write!(f, "record not found: {}", self.target),
            Outcome::ManyRows => write!(f, "too many records: {}", self.target),
        }
    }
}

impl Error {
    pub fn record_not_found(target: impl Into<String>) -> Error {
        Error::lookup(Outcome::NoRows, target.into())
    }

    pub fn too_many_records(target: impl Into<String>) -> Error {
        Error::lookup(Outcome::ManyRows, target.into())
    }

    fn lookup(outcome: Outcome, target: String) -> Error {
        Error::from(ErrorKind::Lookup(LookupError {
            outcome,
            target: target.into(),
        }))
    }

    /// Returns `true` if a lookup matched no row.
    pub fn is_record_not_found(&self) -> bool {
        matches!(self.kind(), ErrorKind::Lookup(err) if err.outcome == Outcome::NoRows)
    }

    /// Returns `true` if a lookup matched more than one row.
    pub fn is_too_many_records(&self) -> bool {
        matches!(self.kind(), ErrorKind::Lookup(err) if err.outcome == Outcome::ManyRows)
    }
}

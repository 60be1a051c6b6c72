use super::{Error, ErrorKind};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// A failure reported by the connection, such as `rusqlite::Error`.
///
/// The original error stays reachable through `source()`.
#[derive(Debug)]
pub(super) struct DriverError(pub(super) BoxError);

impl std::error::Error for DriverError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&*self.0)
    }
}

impl core::fmt::Display for DriverError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "{}", self.0)?;

        // Transport errors often wrap the useful message one level down
        let mut cause = self.0.source();
        while let Some(err) = cause {
            write!(f, ": {err}")?;
            cause = err.source();
        }
        Ok(())
    }
}

impl Error {
    pub fn driver(err: impl std::error::Error + Send + Sync + 'static) -> Error {
        Error::from(ErrorKind::Driver(DriverError(Box::new(err))))
    }

    /// Returns `true` if the connection itself failed.
    pub fn is_driver(&self) -> bool {
        matches!(self.kind(), ErrorKind::Driver(_))
    }

    /// The driver's own error, if this is a driver error of type `E`.
    pub fn downcast_driver<E: std::error::Error + 'static>(&self) -> Option<&E> {
        match self.kind() {
            ErrorKind::Driver(err) => err.0.downcast_ref(),
            _ => None,
        }
    }
}

/// Unwraps an `Ok`, failing the test with the error chain otherwise.
#[macro_export]
macro_rules! assert_ok {
    ($e:expr $(,)?) => {
        match $e {
            Ok(value) => value,
            Err(err) => panic!("expected `Ok`, got error: {err}\n{err:#?}"),
        }
    };
}

/// Unwraps an `Err`, failing the test with the value otherwise.
///
/// Extra arguments are formatted into the failure message.
#[macro_export]
macro_rules! assert_err {
    ($e:expr $(,)?) => {
        match $e {
            Err(err) => err,
            Ok(value) => panic!("expected `Err`, got {value:?}"),
        }
    };
    ($e:expr, $($msg:tt)+) => {
        match $e {
            Err(err) => err,
            Ok(value) => panic!("expected `Err`, got {value:?}: {}", format_args!($($msg)+)),
        }
    };
}

#[macro_export]
macro_rules! assert_none {
    ($e:expr $(,)?) => {
        if let Some(value) = $e {
            panic!("expected `None`, got {value:?}");
        }
    };
}

//! Utility macros shared across the crate.

/// Returns early with `Err($error)` when `$predicate` doesn't hold.
///
/// Works like `assert!`, but hands the caller an error instead of panicking.
///
/// ```ignore
/// ensure!(!self.closed, BufferError::Closed);
/// ```
macro_rules! ensure {
    ($predicate:expr, $error:expr) => {
        if !$predicate {
            return Err($error);
        }
    };
}

pub(crate) use ensure;

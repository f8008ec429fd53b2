/**
 * Soft-Failure Policy
 *
 * Read paths that have a sensible default (the service catalog) swallow
 * store failures and serve the default instead. The policy is spelled out
 * at each call site with `or_fallback`, and every substitution is logged.
 */

use crate::backend::storage::error::StoreError;

pub trait OrFallback<T> {
    /// The value on success, otherwise `fallback()` after logging the failure
    fn or_fallback<F>(self, what: &str, fallback: F) -> T
    where
        F: FnOnce() -> T;
}

impl<T> OrFallback<T> for Result<T, StoreError> {
    fn or_fallback<F>(self, what: &str, fallback: F) -> T
    where
        F: FnOnce() -> T,
    {
        match self {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!("{} unavailable, serving fallback: {}", what, e);
                fallback()
            }
        }
    }
}

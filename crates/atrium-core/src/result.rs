//! Result type aliases for Atrium.

use crate::AtriumError;

/// A specialized `Result` type for Atrium operations.
pub type AtriumResult<T> = Result<T, AtriumError>;

/// A boxed future returning an `AtriumResult`.
pub type BoxFuture<'a, T> = std::pin::Pin<Box<dyn std::future::Future<Output = AtriumResult<T>> + Send + 'a>>;

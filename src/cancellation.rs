//! Provides a token-based mechanism for graceful cancellation.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// A token that can be used to signal cancellation to long-running operations.
///
/// A cloneable, thread-safe flag around an `Arc<AtomicBool>`. The signal
/// handler cancels it; discovery and `pipe` check it before each file.
///
/// # Examples
///
/// ```
/// use prettier_pipe::CancellationToken;
///
/// let token = CancellationToken::new();
/// let handler_side = token.clone();
///
/// assert!(!token.is_cancelled());
/// handler_side.cancel();
/// assert!(token.is_cancelled());
/// ```
#[derive(Debug, Clone)]
pub struct CancellationToken {
    inner: Arc<AtomicBool>,
}

impl CancellationToken {
    /// Creates a new `CancellationToken` in a non-cancelled state.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Signals cancellation.
    ///
    /// This sets the token's state to "cancelled". All subsequent calls to
    /// `is_cancelled()` on this token or any of its clones will return `true`.
    pub fn cancel(&self) {
        self.inner.store(true, Ordering::SeqCst);
    }

    /// Returns `true` once `cancel()` has been called on this token or any of its clones.
    pub fn is_cancelled(&self) -> bool {
        self.inner.load(Ordering::SeqCst)
    }
}

impl Default for CancellationToken {
    fn default() -> Self {
        Self::new()
    }
}

//! Cooperative suspension used to space out repeated operations.

use std::time::Duration;

/// Suspend the calling task for at least `ms` milliseconds.
///
/// This is a yield point on the tokio timer, not a blocking sleep. Dropping
/// the returned future cancels the wait. `delay(0)` still yields once.
///
/// # Example
/// ```rust,no_run
/// use cookielens::base::delay::delay;
///
/// # async fn poll() {
/// for _ in 0..3 {
///     // ... inspect cookies ...
///     delay(500).await;
/// }
/// # }
/// ```
pub async fn delay(ms: u64) {
    if ms == 0 {
        tokio::task::yield_now().await;
        return;
    }
    tokio::time::sleep(Duration::from_millis(ms)).await;
}

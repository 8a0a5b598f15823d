use async_trait::async_trait;

/// The admission gate contract.
///
/// For a fixed key, across all concurrent callers within one window, exactly
/// one call observes `true`; all others observe `false` until the window
/// elapses. First-atomic-operation wins; no ordering guarantee beyond that.
#[async_trait]
pub trait AdmissionGate: Send + Sync {
    /// Attempt to claim `key` for the current window.
    ///
    /// Returns `true` iff this call is the first successful claim while no
    /// live record exists. Blocked is a normal return value, never an error.
    async fn try_acquire(&self, key: &str) -> bool;

    /// Fixed window length in seconds, for retry-after hints.
    fn window_seconds(&self) -> u64;
}

//! Base trait for intents (atomic actions) in MVI architecture.

use std::fmt::Debug;

/// An atomic state transition.
///
/// Intents represent:
/// - User actions (option changes, button presses)
/// - System events (API responses, timers)
///
/// Intents are plain values. The reducer turns them into draft edits, so
/// anything non-deterministic (random draws, clock reads) must be captured in
/// the intent when it is constructed.
pub trait Intent: Debug + Send + 'static {
    /// Short stable name used in log fields.
    fn name(&self) -> &'static str;
}

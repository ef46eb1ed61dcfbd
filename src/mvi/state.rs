//! Base trait for store state in MVI architecture.

/// Marker trait for state snapshots.
///
/// States should be:
/// - Immutable once published (Clone to create a draft)
/// - Self-contained (all data needed by consumers)
/// - Comparable (PartialEq for detecting no-op transitions)
/// - Cheap to clone (large collections behind `Arc`)
pub trait StoreState: Clone + PartialEq + Send + Sync + 'static {}

//! Base trait for controller states.

/// Marker trait for state enums.
///
/// States should be:
/// - Cheap to clone (payloads behind `Arc`)
/// - Self-contained (everything an observer needs to render)
/// - Comparable (PartialEq drives the stale-completion guard)
pub trait MachineState: Clone + PartialEq + Send + 'static {}

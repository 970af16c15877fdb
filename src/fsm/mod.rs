//! State-machine primitives shared by both fetch controllers.
//!
//! # Architecture
//!
//! ```text
//! Intent ──→ Reducer ──→ Step ──→ Controller applies + publishes
//! ```
//!
//! - **State**: closed enum describing where a controller is
//! - **Intent**: public operation or transport completion
//! - **Reducer**: pure lookup deciding what a (state, intent) pair means
//!
//! The reducer never performs side effects; issuing, cancelling, and
//! publishing all happen in the controller around the `reduce` call.

mod intent;
mod reducer;
mod state;

pub use intent::Intent;
pub use reducer::{Reducer, Step};
pub use state::MachineState;

//! Model-View-Intent (MVI) primitives shared by every store.
//!
//! This module provides the base traits for unidirectional data flow.
//!
//! # Architecture
//!
//! ```text
//! Intent ──→ Reducer ──→ Draft ──→ State ──→ Subscribers
//!    ↑                                           │
//!    └───────────────────────────────────────────┘
//! ```
//!
//! - **State**: Immutable snapshot owned by a [`Store`](crate::store::Store)
//! - **Intent**: Atomic state transition requested by a consumer
//! - **Reducer**: Applies an intent to a mutable draft of the state

mod intent;
mod reducer;
mod state;

pub use intent::Intent;
pub use reducer::Reducer;
pub use state::StoreState;

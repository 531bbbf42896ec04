//! Circuit model: an arena of components and interfaces.
//!
//! Components form an ownership tree; interfaces belong to exactly one
//! component and are linked by explicit connection edges. Everything is
//! addressed through copyable handles so that ownership and connectivity
//! never form reference cycles.

mod circuit;
mod component;
mod connect;
mod interface;

pub use circuit::{Circuit, CircuitStats};
pub use component::ComponentId;
pub use interface::{InterfaceId, InterfaceShape};

//! Netforge - hierarchical circuit modelling and netlist extraction
//!
//! A design is a tree of components, each exposing electrical interfaces.
//! Interfaces are wired together with shape-checked connections, components
//! are annotated with typed traits (footprint, pin map, bridge, ...), and the
//! finished tree is flattened into a netlist of footprint pins.
//!
//! # Quick Start
//!
//! ```
//! use netforge::prelude::*;
//!
//! let mut circuit = Circuit::new();
//! let top = circuit.add_component("divider");
//! let vin = circuit.add_interface(top, "vin", InterfaceShape::Electrical).unwrap();
//! let gnd = circuit.add_interface(top, "gnd", InterfaceShape::Electrical).unwrap();
//!
//! let r = Resistor::new(&mut circuit, Parameter::constant(10e3))
//!     .and_then(|r| r.place(&mut circuit, top, "r1"))
//!     .unwrap();
//! r.assign_smd_footprint(&mut circuit, SmdSize::I0805).unwrap();
//! circuit.connect_via(vin, r.component, gnd).unwrap();
//!
//! let extraction = NetforgeCore::extract(&circuit, top, &ExtractionOptions::default()).unwrap();
//! for net in &extraction.physical.nets {
//!     println!("{}: {:?}", net.name, net.connected_components());
//! }
//! ```
//!
//! # Features
//!
//! - **Hierarchy**: arena-backed component tree with stable handles
//! - **Connections**: direct, star, bridged and chained, composite-aware
//! - **Traits**: one capability per kind, configurable duplicate policy
//! - **Extraction**: logical nets, pin resolution, reference designators
//! - **Parts**: passives, transistors, jacks and Eurorack power rails

pub mod core;
pub mod library;
pub mod model;
pub mod netlist;
pub mod traits;

// Re-export main types
pub use core::{
    CircuitOptions, DuplicatePolicy, ErrorKind, ExtractionOptions, Issue, NetforgeCore,
    NetforgeError, NetlistStats, Result, Severity,
};
pub use model::{Circuit, CircuitStats, ComponentId, InterfaceId, InterfaceShape};
pub use netlist::{
    ComponentRecord, Extraction, LogicalNet, LogicalNetlist, NetId, PhysicalNet,
    PhysicalNetlist, PinRef,
};
pub use traits::{Capability, Footprint, Parameter, PinId, SmdSize, TraitKind};

/// Extract the netlist of `root` with default options.
pub fn extract(circuit: &Circuit, root: ComponentId) -> Result<Extraction> {
    NetforgeCore::extract(circuit, root, &ExtractionOptions::default())
}

/// Everything needed to describe and extract a design.
pub mod prelude {
    pub use crate::core::{CircuitOptions, DuplicatePolicy, ExtractionOptions, NetforgeCore};
    pub use crate::library::{
        AudioJack2Ground, Bjt, Capacitor, EurorackPower, Part, Potentiometer, Power, Resistor,
    };
    pub use crate::model::{Circuit, ComponentId, InterfaceId, InterfaceShape};
    pub use crate::traits::{Capability, Footprint, Parameter, PinId, SmdSize};
}

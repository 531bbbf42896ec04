//! Stage T2: resolve logical nets to component pins.
//!
//! Each interface is resolved through its *packaged component*: the
//! outermost ancestor-or-self of its owner (within the extracted tree) that
//! carries a pin mapping. Everything below a packaged component is part of
//! that part's internal model and never shows up as a pin of its own.

use std::collections::{BTreeMap, HashMap, HashSet};

use serde::{Deserialize, Serialize};

use super::{LogicalNet, LogicalNetlist, NetId};
use crate::core::{ExtractionOptions, NetforgeError, Result};
use crate::model::{Circuit, ComponentId, InterfaceId};
use crate::traits::{Parameter, PinId};

/// Connection from a component pin to a net
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PinRef {
    pub component: ComponentId,
    pub reference: String,
    pub pin: PinId,
}

/// A net expressed as component pins
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhysicalNet {
    pub id: NetId,
    pub name: String,
    pub pins: Vec<PinRef>,
    /// Fewer than two pins.
    pub dangling: bool,
}

impl PhysicalNet {
    /// Get all component references connected to this net
    pub fn connected_components(&self) -> Vec<&str> {
        let mut refs: Vec<&str> = Vec::new();
        for pin in &self.pins {
            if !refs.contains(&pin.reference.as_str()) {
                refs.push(&pin.reference);
            }
        }
        refs
    }

    /// Check if a specific component is connected to this net
    pub fn has_component(&self, reference: &str) -> bool {
        self.pins.iter().any(|p| p.reference == reference)
    }

    pub fn has_pin(&self, reference: &str, pin: &str) -> bool {
        self.pins
            .iter()
            .any(|p| p.reference == reference && p.pin.as_str() == pin)
    }
}

/// Per-component metadata for downstream serializers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentRecord {
    pub id: ComponentId,
    pub reference: String,
    pub path: String,
    pub type_description: Option<String>,
    pub footprint: Option<String>,
    pub value: Option<Parameter>,
    pub pin_count: usize,
}

/// The physical netlist: packaged components and their pin-resolved nets.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PhysicalNetlist {
    pub components: Vec<ComponentRecord>,
    pub nets: Vec<PhysicalNet>,
}

impl PhysicalNetlist {
    pub fn component(&self, reference: &str) -> Option<&ComponentRecord> {
        self.components.iter().find(|c| c.reference == reference)
    }

    /// Reference designator assigned to a component handle.
    pub fn reference_of(&self, id: ComponentId) -> Option<&str> {
        self.components
            .iter()
            .find(|c| c.id == id)
            .map(|c| c.reference.as_str())
    }

    /// The net a given pin ended up in.
    pub fn net_of_pin(&self, reference: &str, pin: &str) -> Option<&PhysicalNet> {
        self.nets.iter().find(|n| n.has_pin(reference, pin))
    }

    pub fn pin_count(&self) -> usize {
        self.nets.iter().map(|n| n.pins.len()).sum()
    }

    pub fn dangling_nets(&self) -> impl Iterator<Item = &PhysicalNet> {
        self.nets.iter().filter(|n| n.dangling)
    }
}

/// Output of T2 before it is folded into an extraction report.
#[derive(Debug, Default)]
pub(crate) struct Resolution {
    pub netlist: PhysicalNetlist,
    pub errors: Vec<NetforgeError>,
    pub dangling: Vec<NetforgeError>,
    /// Part-internal nets that reach none of the part's pins.
    pub isolated: Vec<NetforgeError>,
    pub withheld: usize,
}

enum Resolved {
    Pins(Vec<PinRef>),
    /// Hierarchical port.
    Skipped,
    /// Inside the given packaged component.
    Internal(ComponentId),
    /// Unresolvable; the error is `None` when already reported.
    Failed(Option<NetforgeError>),
}

struct PinResolver<'a> {
    circuit: &'a Circuit,
    root: ComponentId,
    packaged: HashMap<ComponentId, Option<ComponentId>>,
    references: HashMap<ComponentId, String>,
    positions: HashMap<ComponentId, Vec<InterfaceId>>,
    reported: HashSet<ComponentId>,
}

impl<'a> PinResolver<'a> {
    fn new(circuit: &'a Circuit, root: ComponentId) -> Self {
        Self {
            circuit,
            root,
            packaged: HashMap::new(),
            references: HashMap::new(),
            positions: HashMap::new(),
            reported: HashSet::new(),
        }
    }

    /// Outermost ancestor-or-self of `component` carrying a pin mapping.
    fn packaged_component(&mut self, component: ComponentId) -> Result<Option<ComponentId>> {
        if let Some(found) = self.packaged.get(&component) {
            return Ok(*found);
        }
        let mut found = None;
        let mut current = Some(component);
        while let Some(id) = current {
            if self.circuit.has_pin_mapping(id) {
                found = Some(id);
            }
            if id == self.root {
                break;
            }
            current = self.circuit.parent(id)?;
        }
        self.packaged.insert(component, found);
        Ok(found)
    }

    /// Assign reference designators to every packaged component, pre-order.
    fn assign_references(&mut self, options: &ExtractionOptions) -> Result<Vec<ComponentRecord>> {
        let mut counters: BTreeMap<String, usize> = BTreeMap::new();
        let mut issued: HashSet<String> = HashSet::new();
        let mut records = Vec::new();
        for id in self.circuit.subtree(self.root)? {
            if self.packaged_component(id)? != Some(id) {
                continue;
            }
            let prefix = self
                .circuit
                .type_description(id)
                .unwrap_or(&options.default_reference_prefix)
                .to_string();
            // Prefixes are free text, so "R" + 11 and "R1" + 1 can meet.
            let counter = counters.entry(prefix.clone()).or_insert(0);
            let reference = loop {
                *counter += 1;
                let candidate = format!("{}{}", prefix, counter);
                if issued.insert(candidate.clone()) {
                    break candidate;
                }
            };

            let pin_count = match self.circuit.pin_map(id) {
                Some(pairs) => pairs.len(),
                None => self.circuit.leaf_interfaces(id)?.len(),
            };
            records.push(ComponentRecord {
                id,
                reference: reference.clone(),
                path: self.circuit.component_path(id),
                type_description: self.circuit.type_description(id).map(str::to_string),
                footprint: self.circuit.footprint(id).map(|f| f.identifier.clone()),
                value: self.circuit.value(id),
                pin_count,
            });
            self.references.insert(id, reference);
        }
        Ok(records)
    }

    fn resolve(&mut self, interface: InterfaceId) -> Result<Resolved> {
        let Some(owner) = self.circuit.owner(interface)? else {
            return Ok(Resolved::Skipped);
        };
        match self.packaged_component(owner)? {
            Some(package) if package == owner => self.lookup(owner, interface),
            Some(package) => {
                tracing::trace!(
                    "Skipping '{}' inside '{}'",
                    self.circuit.interface_path(interface),
                    self.circuit.component_path(package)
                );
                Ok(Resolved::Internal(package))
            }
            None => {
                if !self.circuit.is_leaf_component(owner)? {
                    tracing::trace!(
                        "Skipping hierarchical port '{}'",
                        self.circuit.interface_path(interface)
                    );
                    return Ok(Resolved::Skipped);
                }
                if self.reported.insert(owner) {
                    Ok(Resolved::Failed(Some(NetforgeError::MissingFootprintPinmap {
                        component: self.circuit.component_path(owner),
                    })))
                } else {
                    Ok(Resolved::Failed(None))
                }
            }
        }
    }

    fn lookup(&mut self, owner: ComponentId, interface: InterfaceId) -> Result<Resolved> {
        let reference = self.references[&owner].clone();
        let pin_ref = |pin: PinId| PinRef {
            component: owner,
            reference: reference.clone(),
            pin,
        };

        if let Some(pairs) = self.circuit.pin_map(owner) {
            let pins: Vec<PinRef> = pairs
                .iter()
                .filter(|(_, mapped)| *mapped == interface)
                .map(|(pin, _)| pin_ref(pin.clone()))
                .collect();
            if pins.is_empty() {
                return Ok(Resolved::Failed(Some(NetforgeError::UnmappedPin {
                    component: self.circuit.component_path(owner),
                    interface: self.circuit.interface_path(interface),
                })));
            }
            return Ok(Resolved::Pins(pins));
        }

        if !self.positions.contains_key(&owner) {
            let leaves = self.circuit.leaf_interfaces(owner)?;
            self.positions.insert(owner, leaves);
        }
        match self.positions[&owner].iter().position(|i| *i == interface) {
            Some(index) => Ok(Resolved::Pins(vec![pin_ref(PinId::from(
                (index + 1).to_string(),
            ))])),
            // Sub-interfaces always appear among the owner's leaves.
            None => Ok(Resolved::Failed(Some(NetforgeError::UnmappedPin {
                component: self.circuit.component_path(owner),
                interface: self.circuit.interface_path(interface),
            }))),
        }
    }
}

/// Resolve every logical net of the tree under `root`.
pub(crate) fn resolve(
    circuit: &Circuit,
    root: ComponentId,
    logical: &LogicalNetlist,
    options: &ExtractionOptions,
) -> Result<Resolution> {
    let mut resolver = PinResolver::new(circuit, root);
    let mut resolution = Resolution {
        netlist: PhysicalNetlist {
            components: resolver.assign_references(options)?,
            nets: Vec::new(),
        },
        ..Default::default()
    };

    for net in logical.nets() {
        match resolve_net(&mut resolver, net, &mut resolution.errors)? {
            None => {
                resolution.withheld += 1;
                tracing::debug!("Withholding {} with unresolved members", net.id);
            }
            Some(NetPins { pins, internal }) if pins.is_empty() => match internal {
                Some(package) => {
                    tracing::warn!(
                        "{} stays inside '{}' without reaching a pin",
                        net.id,
                        circuit.component_path(package)
                    );
                    resolution.isolated.push(NetforgeError::IsolatedInternalNet {
                        net: net.name(),
                        component: circuit.component_path(package),
                    });
                }
                None => tracing::trace!("{} has no physical pins", net.id),
            },
            Some(NetPins { pins, .. }) => {
                let dangling = pins.len() < 2;
                if dangling {
                    tracing::warn!(
                        "{} is dangling: only {} is connected",
                        net.id,
                        describe(&pins)
                    );
                    resolution.dangling.push(NetforgeError::DanglingNet {
                        net: net.name(),
                        pins: pins.len(),
                    });
                    if !options.emit_dangling {
                        continue;
                    }
                }
                resolution.netlist.nets.push(PhysicalNet {
                    id: net.id,
                    name: net.name(),
                    pins,
                    dangling,
                });
            }
        }
    }
    Ok(resolution)
}

struct NetPins {
    pins: Vec<PinRef>,
    /// First packaged component with an internal member.
    internal: Option<ComponentId>,
}

/// Pins of one net, or `None` if any member failed to resolve.
fn resolve_net(
    resolver: &mut PinResolver<'_>,
    net: &LogicalNet,
    errors: &mut Vec<NetforgeError>,
) -> Result<Option<NetPins>> {
    let mut pins = Vec::new();
    let mut internal = None;
    let mut complete = true;
    for member in &net.members {
        match resolver.resolve(*member)? {
            Resolved::Pins(found) => pins.extend(found),
            Resolved::Skipped => {}
            Resolved::Internal(package) => {
                internal.get_or_insert(package);
            }
            Resolved::Failed(error) => {
                complete = false;
                errors.extend(error);
            }
        }
    }
    Ok(complete.then_some(NetPins { pins, internal }))
}

fn describe(pins: &[PinRef]) -> String {
    pins.iter()
        .map(|p| format!("{}.{}", p.reference, p.pin))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::InterfaceShape;
    use crate::traits::Capability;

    fn resolve_tree(circuit: &Circuit, root: ComponentId) -> Resolution {
        let logical = LogicalNetlist::build(circuit, root).unwrap();
        resolve(circuit, root, &logical, &ExtractionOptions::default()).unwrap()
    }

    #[test]
    fn test_multi_pin_mapping_emits_every_pin() {
        let mut circuit = Circuit::new();
        let top = circuit.add_component("top");
        let reg = circuit.add_subcomponent(top, "reg").unwrap();
        let vin = circuit.add_interface(reg, "vin", InterfaceShape::Electrical).unwrap();
        let gnd = circuit.add_interface(reg, "gnd", InterfaceShape::Electrical).unwrap();
        circuit
            .add_trait(reg, Capability::pin_map([(1u32, vin), (2u32, gnd), (4u32, gnd)]))
            .unwrap();
        let cap = circuit.add_subcomponent(top, "cap").unwrap();
        let c = circuit.add_interfaces(cap, "unnamed", 2).unwrap();
        circuit.add_trait(cap, Capability::SymmetricPinMap).unwrap();
        circuit.add_trait(cap, Capability::type_description("C")).unwrap();
        circuit.connect(gnd, c[1]).unwrap();
        circuit.connect(vin, c[0]).unwrap();

        let resolution = resolve_tree(&circuit, top);
        assert!(resolution.errors.is_empty());
        let gnd_net = resolution.netlist.net_of_pin("U1", "2").unwrap();
        assert!(gnd_net.has_pin("U1", "4"));
        assert!(gnd_net.has_pin("C1", "2"));
        assert_eq!(gnd_net.pins.len(), 3);
        assert_eq!(resolution.netlist.component("U1").unwrap().pin_count, 3);
    }

    #[test]
    fn test_unmapped_interface_withholds_net() {
        let mut circuit = Circuit::new();
        let top = circuit.add_component("top");
        let ic = circuit.add_subcomponent(top, "ic").unwrap();
        let a = circuit.add_interface(ic, "a", InterfaceShape::Electrical).unwrap();
        let b = circuit.add_interface(ic, "b", InterfaceShape::Electrical).unwrap();
        circuit.add_trait(ic, Capability::pin_map([(1u32, a)])).unwrap();
        let other = circuit.add_subcomponent(top, "other").unwrap();
        let o = circuit.add_interfaces(other, "unnamed", 1).unwrap();
        circuit.add_trait(other, Capability::SymmetricPinMap).unwrap();
        circuit.connect(b, o[0]).unwrap();

        let resolution = resolve_tree(&circuit, top);
        assert_eq!(
            resolution.errors,
            vec![NetforgeError::UnmappedPin {
                component: "top.ic".to_string(),
                interface: "top.ic.b".to_string(),
            }]
        );
        assert_eq!(resolution.withheld, 1);
        assert!(resolution.netlist.net_of_pin("U2", "1").is_none());
    }

    #[test]
    fn test_missing_pinmap_reported_once() {
        let mut circuit = Circuit::new();
        let top = circuit.add_component("top");
        let bare = circuit.add_subcomponent(top, "bare").unwrap();
        circuit.add_interfaces(bare, "unnamed", 3).unwrap();

        let resolution = resolve_tree(&circuit, top);
        assert_eq!(
            resolution.errors,
            vec![NetforgeError::MissingFootprintPinmap {
                component: "top.bare".to_string()
            }]
        );
        assert_eq!(resolution.withheld, 3);
        assert!(resolution.netlist.nets.is_empty());
    }

    #[test]
    fn test_internal_parts_are_opaque() {
        let mut circuit = Circuit::new();
        let top = circuit.add_component("top");
        let part = circuit.add_subcomponent(top, "part").unwrap();
        let outer = circuit.add_interface(part, "io", InterfaceShape::Electrical).unwrap();
        circuit.add_trait(part, Capability::pin_map([(1u32, outer)])).unwrap();
        let inner = circuit.add_subcomponent(part, "inner").unwrap();
        let inner_pin = circuit.add_interfaces(inner, "unnamed", 1).unwrap();
        circuit.add_trait(inner, Capability::SymmetricPinMap).unwrap();
        circuit.connect(outer, inner_pin[0]).unwrap();

        let resolution = resolve_tree(&circuit, top);
        assert_eq!(resolution.netlist.components.len(), 1);
        assert_eq!(resolution.netlist.nets.len(), 1);
        assert_eq!(resolution.netlist.nets[0].pins.len(), 1);
        assert!(resolution.netlist.nets[0].dangling);
        assert_eq!(resolution.dangling.len(), 1);
    }

    #[test]
    fn test_hierarchical_ports_are_skipped() {
        let mut circuit = Circuit::new();
        let top = circuit.add_component("top");
        let port = circuit.add_interface(top, "port", InterfaceShape::Electrical).unwrap();
        let loose = circuit.add_interface(top, "loose", InterfaceShape::Electrical).unwrap();
        let r = circuit.add_subcomponent(top, "r").unwrap();
        let pins = circuit.add_interfaces(r, "unnamed", 2).unwrap();
        circuit.add_trait(r, Capability::SymmetricPinMap).unwrap();
        circuit.add_trait(r, Capability::type_description("R")).unwrap();
        circuit.connect(port, pins[0]).unwrap();
        circuit.connect(port, pins[1]).unwrap();

        let resolution = resolve_tree(&circuit, top);
        assert!(resolution.errors.is_empty());
        // `loose` resolves to no pins and is omitted.
        assert_eq!(resolution.netlist.nets.len(), 1);
        assert_eq!(resolution.netlist.nets[0].connected_components(), vec!["R1"]);
        assert!(!circuit.is_directly_connected(loose, port));
    }

    #[test]
    fn test_reference_numbering_per_prefix() {
        let mut circuit = Circuit::new();
        let top = circuit.add_component("top");
        for (name, prefix) in [("a", "R"), ("b", "C"), ("c", "R"), ("d", "")] {
            let part = circuit.add_subcomponent(top, name).unwrap();
            circuit.add_interfaces(part, "unnamed", 2).unwrap();
            circuit.add_trait(part, Capability::SymmetricPinMap).unwrap();
            if !prefix.is_empty() {
                circuit.add_trait(part, Capability::type_description(prefix)).unwrap();
            }
        }

        let resolution = resolve_tree(&circuit, top);
        let refs: Vec<&str> = resolution
            .netlist
            .components
            .iter()
            .map(|c| c.reference.as_str())
            .collect();
        assert_eq!(refs, vec!["R1", "C1", "R2", "U1"]);
        assert_eq!(resolution.netlist.component("R2").unwrap().path, "top.c");
    }

    #[test]
    fn test_references_unique_across_overlapping_prefixes() {
        let mut circuit = Circuit::new();
        let top = circuit.add_component("top");
        let mut parts: Vec<(String, &str)> = (0..11).map(|i| (format!("r{}", i), "R")).collect();
        parts.push(("odd".to_string(), "R1"));
        parts.push(("late".to_string(), "R"));
        for (name, prefix) in &parts {
            let part = circuit.add_subcomponent(top, name.as_str()).unwrap();
            circuit.add_interfaces(part, "unnamed", 2).unwrap();
            circuit.add_trait(part, Capability::SymmetricPinMap).unwrap();
            circuit.add_trait(part, Capability::type_description(*prefix)).unwrap();
        }

        let resolution = resolve_tree(&circuit, top);
        let components = &resolution.netlist.components;
        let unique: HashSet<&str> = components.iter().map(|c| c.reference.as_str()).collect();
        assert_eq!(unique.len(), components.len(), "duplicate reference designators");
        assert_eq!(resolution.netlist.component("R11").unwrap().path, "top.r10");
        assert_eq!(resolution.netlist.component("R12").unwrap().path, "top.odd");
        assert_eq!(resolution.netlist.component("R13").unwrap().path, "top.late");
    }

    #[test]
    fn test_isolated_internal_net_is_reported() {
        let mut circuit = Circuit::new();
        let top = circuit.add_component("top");
        let part = circuit.add_subcomponent(top, "part").unwrap();
        let io = circuit.add_interface(part, "io", InterfaceShape::Electrical).unwrap();
        circuit.add_trait(part, Capability::pin_map([(1u32, io)])).unwrap();
        let inner = circuit.add_subcomponent(part, "inner").unwrap();
        let inner_pins = circuit.add_interfaces(inner, "unnamed", 2).unwrap();
        circuit.add_trait(inner, Capability::SymmetricPinMap).unwrap();
        circuit.connect(io, inner_pins[0]).unwrap();

        let resolution = resolve_tree(&circuit, top);
        assert!(resolution.errors.is_empty());
        assert_eq!(
            resolution.isolated,
            vec![NetforgeError::IsolatedInternalNet {
                net: "Net-2".to_string(),
                component: "top.part".to_string(),
            }]
        );
        assert_eq!(resolution.netlist.nets.len(), 1);
    }
}

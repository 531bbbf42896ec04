//! Circuit Graph Implementation
//!
//! This module provides the arena holding every component and interface of a
//! design. Components form an ownership tree; interfaces hang off components
//! and are linked by undirected connection edges kept in a petgraph graph
//! whose node index equals the interface index.
//!
//! The arena enables:
//! - Deterministic pre-order traversal of the component tree
//! - Composite interface expansion
//! - Trait lookup per component or interface
//! - Connection queries without ownership cycles

use petgraph::graph::{NodeIndex, UnGraph};
use petgraph::visit::EdgeRef;
use serde::{Deserialize, Serialize};

use super::component::ComponentNode;
use super::interface::InterfaceNode;
use super::{ComponentId, InterfaceId, InterfaceShape};
use crate::core::{CircuitOptions, NetforgeError, Result};
use crate::traits::{
    Capability, Footprint, Owner, Parameter, PinId, TraitKind, TraitRegistry,
};

/// The arena owning a whole design.
#[derive(Debug, Clone)]
pub struct Circuit {
    components: Vec<ComponentNode>,
    interfaces: Vec<InterfaceNode>,
    /// Connection edges. Node weights mirror the interface handles.
    graph: UnGraph<InterfaceId, ()>,
    traits: TraitRegistry,
}

impl Circuit {
    /// Create a new empty circuit
    pub fn new() -> Self {
        Self::with_options(CircuitOptions::default())
    }

    pub fn with_options(options: CircuitOptions) -> Self {
        Self {
            components: Vec::new(),
            interfaces: Vec::new(),
            graph: UnGraph::default(),
            traits: TraitRegistry::new(options.duplicate_traits),
        }
    }

    // ============ Components ============

    /// Create a detached component. It becomes a root unless adopted later.
    pub fn add_component(&mut self, name: impl Into<String>) -> ComponentId {
        let id = ComponentId::from_index(self.components.len());
        self.components.push(ComponentNode::new(name.into()));
        id
    }

    /// Create a component directly under `parent`.
    pub fn add_subcomponent(
        &mut self,
        parent: ComponentId,
        name: impl Into<String>,
    ) -> Result<ComponentId> {
        let name = name.into();
        self.ensure_unique_component_name(parent, &name)?;
        let child = self.add_component(name.clone());
        self.adopt(parent, name, child)?;
        Ok(child)
    }

    /// Make `child` a sub-component of `parent` under `name`.
    pub fn adopt(
        &mut self,
        parent: ComponentId,
        name: impl Into<String>,
        child: ComponentId,
    ) -> Result<()> {
        let name = name.into();
        self.component_node(parent)?;
        if let Some(owner) = self.component_node(child)?.parent {
            return Err(NetforgeError::AlreadyOwned {
                item: self.component_path(child),
                owner: self.component_path(owner),
            });
        }
        if child == parent || self.is_ancestor(child, parent) {
            return Err(NetforgeError::CyclicHierarchy {
                component: self.component_path(child),
            });
        }
        self.ensure_unique_component_name(parent, &name)?;

        let node = &mut self.components[child.0];
        node.name = name;
        node.parent = Some(parent);
        self.components[parent.0].children.push(child);
        Ok(())
    }

    fn is_ancestor(&self, ancestor: ComponentId, node: ComponentId) -> bool {
        let mut current = self.components[node.0].parent;
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.components[id.0].parent;
        }
        false
    }

    fn ensure_unique_component_name(&self, parent: ComponentId, name: &str) -> Result<()> {
        let taken = self
            .component_node(parent)?
            .children
            .iter()
            .any(|c| self.components[c.0].name == name);
        if taken {
            return Err(NetforgeError::DuplicateName {
                parent: self.component_path(parent),
                name: name.to_string(),
            });
        }
        Ok(())
    }

    fn ensure_unique_interface_name(&self, component: ComponentId, name: &str) -> Result<()> {
        let taken = self
            .component_node(component)?
            .interfaces
            .iter()
            .any(|i| self.interfaces[i.0].name == name);
        if taken {
            return Err(NetforgeError::DuplicateName {
                parent: self.component_path(component),
                name: name.to_string(),
            });
        }
        Ok(())
    }

    // ============ Interfaces ============

    /// Create an interface owned by `component`.
    pub fn add_interface(
        &mut self,
        component: ComponentId,
        name: impl Into<String>,
        shape: InterfaceShape,
    ) -> Result<InterfaceId> {
        let name = name.into();
        self.ensure_unique_interface_name(component, &name)?;
        let id = self.new_interface(name.clone(), shape);
        self.attach_interface(component, name, id)?;
        Ok(id)
    }

    /// Add `count` electrical interfaces named `base[0]`, `base[1]`, ...
    pub fn add_interfaces(
        &mut self,
        component: ComponentId,
        base: &str,
        count: usize,
    ) -> Result<Vec<InterfaceId>> {
        (0..count)
            .map(|i| {
                self.add_interface(
                    component,
                    format!("{}[{}]", base, i),
                    InterfaceShape::Electrical,
                )
            })
            .collect()
    }

    /// Create an interface with no owner yet.
    pub fn new_interface(&mut self, name: impl Into<String>, shape: InterfaceShape) -> InterfaceId {
        self.create_interface(name.into(), None, shape)
    }

    fn create_interface(
        &mut self,
        name: String,
        parent: Option<InterfaceId>,
        shape: InterfaceShape,
    ) -> InterfaceId {
        let id = InterfaceId::from_index(self.interfaces.len());
        self.interfaces.push(InterfaceNode::new(name, parent));
        let node = self.graph.add_node(id);
        debug_assert_eq!(node.index(), id.0);

        if let InterfaceShape::Composite(members) = shape {
            for (member, member_shape) in members {
                let child = self.create_interface(member, Some(id), member_shape);
                self.interfaces[id.0].children.push(child);
            }
        }
        id
    }

    /// Give an unowned top-level interface to `component` under `name`.
    pub fn attach_interface(
        &mut self,
        component: ComponentId,
        name: impl Into<String>,
        interface: InterfaceId,
    ) -> Result<()> {
        let name = name.into();
        self.component_node(component)?;
        let node = self.interface_node(interface)?;
        let holder = match (node.owner, node.parent) {
            (Some(owner), _) => Some(self.component_path(owner)),
            (None, Some(parent)) => Some(self.interface_path(parent)),
            (None, None) => None,
        };
        if let Some(owner) = holder {
            return Err(NetforgeError::AlreadyOwned {
                item: self.interface_path(interface),
                owner,
            });
        }
        self.ensure_unique_interface_name(component, &name)?;

        self.interfaces[interface.0].name = name;
        let mut stack = vec![interface];
        while let Some(id) = stack.pop() {
            let node = &mut self.interfaces[id.0];
            node.owner = Some(component);
            stack.extend(node.children.iter().copied());
        }
        self.components[component.0].interfaces.push(interface);
        Ok(())
    }

    // ============ Lookup ============

    pub(crate) fn component_node(&self, id: ComponentId) -> Result<&ComponentNode> {
        self.components
            .get(id.0)
            .ok_or(NetforgeError::UnknownComponent { index: id.0 })
    }

    pub(crate) fn interface_node(&self, id: InterfaceId) -> Result<&InterfaceNode> {
        self.interfaces
            .get(id.0)
            .ok_or(NetforgeError::UnknownInterface { index: id.0 })
    }

    pub fn component_count(&self) -> usize {
        self.components.len()
    }

    pub fn interface_count(&self) -> usize {
        self.interfaces.len()
    }

    pub fn component_name(&self, id: ComponentId) -> Result<&str> {
        Ok(&self.component_node(id)?.name)
    }

    pub fn interface_name(&self, id: InterfaceId) -> Result<&str> {
        Ok(&self.interface_node(id)?.name)
    }

    pub fn parent(&self, id: ComponentId) -> Result<Option<ComponentId>> {
        Ok(self.component_node(id)?.parent)
    }

    /// Owning component of an interface, `None` while unattached.
    pub fn owner(&self, id: InterfaceId) -> Result<Option<ComponentId>> {
        Ok(self.interface_node(id)?.owner)
    }

    pub fn subcomponents(&self, id: ComponentId) -> Result<&[ComponentId]> {
        Ok(&self.component_node(id)?.children)
    }

    /// Top-level interfaces of a component, composites unexpanded.
    pub fn interfaces(&self, id: ComponentId) -> Result<&[InterfaceId]> {
        Ok(&self.component_node(id)?.interfaces)
    }

    pub fn sub_interfaces(&self, id: InterfaceId) -> Result<&[InterfaceId]> {
        Ok(&self.interface_node(id)?.children)
    }

    pub fn sub_interface(&self, id: InterfaceId, name: &str) -> Option<InterfaceId> {
        self.interfaces
            .get(id.0)?
            .children
            .iter()
            .copied()
            .find(|c| self.interfaces[c.0].name == name)
    }

    pub fn is_composite(&self, id: InterfaceId) -> bool {
        self.interfaces
            .get(id.0)
            .map(InterfaceNode::is_composite)
            .unwrap_or(false)
    }

    pub fn is_leaf_component(&self, id: ComponentId) -> Result<bool> {
        Ok(self.component_node(id)?.children.is_empty())
    }

    /// Shape of an existing interface.
    pub fn shape_of(&self, id: InterfaceId) -> Result<InterfaceShape> {
        let node = self.interface_node(id)?;
        if !node.is_composite() {
            return Ok(InterfaceShape::Electrical);
        }
        let members = node
            .children
            .iter()
            .map(|c| Ok((self.interfaces[c.0].name.clone(), self.shape_of(*c)?)))
            .collect::<Result<Vec<_>>>()?;
        Ok(InterfaceShape::Composite(members))
    }

    /// Leaf interfaces below `id` (itself if it is a leaf), depth-first.
    pub fn leaves(&self, id: InterfaceId) -> Result<Vec<InterfaceId>> {
        self.interface_node(id)?;
        let mut out = Vec::new();
        self.push_leaves(id, &mut out);
        Ok(out)
    }

    fn push_leaves(&self, id: InterfaceId, out: &mut Vec<InterfaceId>) {
        let node = &self.interfaces[id.0];
        if node.is_composite() {
            for child in &node.children {
                self.push_leaves(*child, out);
            }
        } else {
            out.push(id);
        }
    }

    /// The component's own leaf interfaces in declaration order.
    pub fn leaf_interfaces(&self, id: ComponentId) -> Result<Vec<InterfaceId>> {
        let mut out = Vec::new();
        for interface in &self.component_node(id)?.interfaces {
            self.push_leaves(*interface, &mut out);
        }
        Ok(out)
    }

    /// Leaf interfaces of `root` and all its descendants, in pre-order.
    pub fn all_leaf_interfaces(&self, root: ComponentId) -> Result<Vec<InterfaceId>> {
        let mut out = Vec::new();
        for component in self.subtree(root)? {
            for interface in &self.components[component.0].interfaces {
                self.push_leaves(*interface, &mut out);
            }
        }
        Ok(out)
    }

    /// `root` followed by every descendant, pre-order in declaration order.
    pub fn subtree(&self, root: ComponentId) -> Result<Vec<ComponentId>> {
        self.component_node(root)?;
        let mut order = Vec::new();
        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            order.push(id);
            stack.extend(self.components[id.0].children.iter().rev().copied());
        }
        Ok(order)
    }

    /// All descendants of `id`, excluding `id` itself.
    pub fn descendants(&self, id: ComponentId) -> Result<Vec<ComponentId>> {
        let mut order = self.subtree(id)?;
        order.remove(0);
        Ok(order)
    }

    /// Resolve a dotted interface path such as `power.hv` relative to `component`.
    pub fn find_interface(&self, component: ComponentId, path: &str) -> Option<InterfaceId> {
        let mut parts = path.split('.');
        let first = parts.next()?;
        let mut current = self
            .components
            .get(component.0)?
            .interfaces
            .iter()
            .copied()
            .find(|i| self.interfaces[i.0].name == first)?;
        for part in parts {
            current = self.sub_interface(current, part)?;
        }
        Some(current)
    }

    /// Resolve a dotted sub-component path relative to `component`.
    pub fn find_component(&self, component: ComponentId, path: &str) -> Option<ComponentId> {
        let mut current = component;
        for part in path.split('.') {
            current = self
                .components
                .get(current.0)?
                .children
                .iter()
                .copied()
                .find(|c| self.components[c.0].name == part)?;
        }
        Some(current)
    }

    /// Dotted path from the root, e.g. `vco.osc_core.charge_capacitor`.
    pub fn component_path(&self, id: ComponentId) -> String {
        let mut names = Vec::new();
        let mut current = Some(id);
        while let Some(c) = current {
            match self.components.get(c.0) {
                Some(node) => {
                    names.push(node.name.as_str());
                    current = node.parent;
                }
                None => return format!("#{}", c.0),
            }
        }
        names.reverse();
        names.join(".")
    }

    /// Dotted path including the owner, e.g. `vco.power.hv`.
    pub fn interface_path(&self, id: InterfaceId) -> String {
        let Some(node) = self.interfaces.get(id.0) else {
            return format!("#{}", id.0);
        };
        let mut names = vec![node.name.as_str()];
        let mut current = node.parent;
        while let Some(parent) = current {
            let parent_node = &self.interfaces[parent.0];
            names.push(parent_node.name.as_str());
            current = parent_node.parent;
        }
        names.reverse();
        let local = names.join(".");
        match node.owner {
            Some(owner) => format!("{}.{}", self.component_path(owner), local),
            None => local,
        }
    }

    // ============ Connections ============

    pub(crate) fn node(id: InterfaceId) -> NodeIndex {
        NodeIndex::new(id.0)
    }

    pub(crate) fn add_edge(&mut self, a: InterfaceId, b: InterfaceId) {
        if a == b {
            return;
        }
        let (na, nb) = (Self::node(a), Self::node(b));
        if self.graph.find_edge(na, nb).is_none() {
            self.graph.add_edge(na, nb, ());
        }
    }

    /// Direct neighbours of a leaf interface, in connection order.
    pub fn connections(&self, id: InterfaceId) -> Result<Vec<InterfaceId>> {
        self.interface_node(id)?;
        let node = Self::node(id);
        let mut edges: Vec<(usize, InterfaceId)> = self
            .graph
            .edges(node)
            .map(|edge| {
                let other = if edge.source() == node {
                    edge.target()
                } else {
                    edge.source()
                };
                (edge.id().index(), self.graph[other])
            })
            .collect();
        edges.sort_by_key(|(index, _)| *index);
        Ok(edges.into_iter().map(|(_, other)| other).collect())
    }

    pub fn is_directly_connected(&self, a: InterfaceId, b: InterfaceId) -> bool {
        a.0 < self.interfaces.len()
            && b.0 < self.interfaces.len()
            && self.graph.find_edge(Self::node(a), Self::node(b)).is_some()
    }

    /// Every edge as an interface pair, in insertion order.
    pub fn connection_pairs(&self) -> impl Iterator<Item = (InterfaceId, InterfaceId)> + '_ {
        self.graph
            .edge_references()
            .map(|edge| (self.graph[edge.source()], self.graph[edge.target()]))
    }

    pub fn connection_count(&self) -> usize {
        self.graph.edge_count()
    }

    // ============ Traits ============

    fn owner_path(&self, owner: Owner) -> String {
        match owner {
            Owner::Component(c) => self.component_path(c),
            Owner::Interface(i) => self.interface_path(i),
        }
    }

    /// Attach a trait, returning the one it replaced.
    pub fn add_trait(
        &mut self,
        owner: impl Into<Owner>,
        capability: Capability,
    ) -> Result<Option<Capability>> {
        let owner = owner.into();
        match owner {
            Owner::Component(component) => {
                self.component_node(component)?;
                for interface in capability.referenced_interfaces() {
                    if self.interface_node(interface)?.owner != Some(component) {
                        return Err(NetforgeError::ForeignInterface {
                            component: self.component_path(component),
                            interface: self.interface_path(interface),
                        });
                    }
                }
            }
            Owner::Interface(interface) => {
                self.interface_node(interface)?;
            }
        }
        let name = self.owner_path(owner);
        self.traits.attach(owner, &name, capability)
    }

    pub fn query_trait(&self, owner: impl Into<Owner>, kind: TraitKind) -> Option<&Capability> {
        self.traits.query(owner.into(), kind)
    }

    pub fn has_trait(&self, owner: impl Into<Owner>, kind: TraitKind) -> bool {
        self.traits.has(owner.into(), kind)
    }

    pub fn traits(&self) -> &TraitRegistry {
        &self.traits
    }

    pub fn footprint(&self, id: ComponentId) -> Option<&Footprint> {
        match self.query_trait(id, TraitKind::Footprint)? {
            Capability::Footprint(footprint) => Some(footprint),
            _ => None,
        }
    }

    pub fn pin_map(&self, id: ComponentId) -> Option<&[(PinId, InterfaceId)]> {
        match self.query_trait(id, TraitKind::PinMap)? {
            Capability::PinMap(pairs) => Some(pairs),
            _ => None,
        }
    }

    pub fn has_symmetric_pin_map(&self, id: ComponentId) -> bool {
        self.has_trait(id, TraitKind::SymmetricPinMap)
    }

    /// Either kind of pin mapping.
    pub fn has_pin_mapping(&self, id: ComponentId) -> bool {
        self.has_trait(id, TraitKind::PinMap) || self.has_symmetric_pin_map(id)
    }

    /// Entry and exit interfaces of a bridgeable component.
    pub fn bridge(&self, id: ComponentId) -> Option<(InterfaceId, InterfaceId)> {
        match self.query_trait(id, TraitKind::CanBridge)? {
            Capability::CanBridge { entry, exit } => Some((*entry, *exit)),
            _ => None,
        }
    }

    pub fn type_description(&self, id: ComponentId) -> Option<&str> {
        match self.query_trait(id, TraitKind::TypeDescription)? {
            Capability::TypeDescription(description) => Some(description),
            _ => None,
        }
    }

    pub fn value(&self, id: ComponentId) -> Option<Parameter> {
        match self.query_trait(id, TraitKind::Value)? {
            Capability::Value(parameter) => Some(*parameter),
            _ => None,
        }
    }

    /// Get statistics about the circuit
    pub fn stats(&self) -> CircuitStats {
        CircuitStats {
            component_count: self.components.len(),
            interface_count: self.interfaces.len(),
            connection_count: self.graph.edge_count(),
            trait_count: self.traits.len(),
        }
    }
}

impl Default for Circuit {
    fn default() -> Self {
        Self::new()
    }
}

/// Statistics about a circuit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CircuitStats {
    pub component_count: usize,
    pub interface_count: usize,
    pub connection_count: usize,
    pub trait_count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::DuplicatePolicy;

    fn create_test_circuit() -> (Circuit, ComponentId) {
        let mut circuit = Circuit::new();
        let top = circuit.add_component("top");
        circuit
            .add_interface(top, "power", InterfaceShape::rails(&["hv", "gnd", "lv"]))
            .unwrap();
        circuit
            .add_interface(top, "out", InterfaceShape::Electrical)
            .unwrap();

        let stage = circuit.add_subcomponent(top, "stage").unwrap();
        circuit.add_interfaces(stage, "unnamed", 2).unwrap();
        let inner = circuit.add_subcomponent(stage, "inner").unwrap();
        circuit
            .add_interface(inner, "pin", InterfaceShape::Electrical)
            .unwrap();
        circuit.add_subcomponent(top, "tail").unwrap();
        (circuit, top)
    }

    #[test]
    fn test_circuit_creation() {
        let (circuit, top) = create_test_circuit();
        assert_eq!(circuit.component_count(), 4);
        assert_eq!(circuit.interface_count(), 8);
        assert_eq!(circuit.interfaces(top).unwrap().len(), 2);
        assert!(circuit.find_component(top, "stage.inner").is_some());
        assert!(circuit.find_component(top, "missing").is_none());
    }

    #[test]
    fn test_subtree_is_preorder() {
        let (circuit, top) = create_test_circuit();
        let names: Vec<String> = circuit
            .subtree(top)
            .unwrap()
            .into_iter()
            .map(|c| circuit.component_path(c))
            .collect();
        assert_eq!(
            names,
            vec!["top", "top.stage", "top.stage.inner", "top.tail"]
        );
        assert_eq!(circuit.descendants(top).unwrap().len(), 3);
    }

    #[test]
    fn test_leaf_interfaces_expand_composites() {
        let (circuit, top) = create_test_circuit();
        let own: Vec<String> = circuit
            .leaf_interfaces(top)
            .unwrap()
            .into_iter()
            .map(|i| circuit.interface_path(i))
            .collect();
        assert_eq!(
            own,
            vec!["top.power.hv", "top.power.gnd", "top.power.lv", "top.out"]
        );

        let all: Vec<String> = circuit
            .all_leaf_interfaces(top)
            .unwrap()
            .into_iter()
            .map(|i| circuit.interface_path(i))
            .collect();
        assert_eq!(
            all,
            vec![
                "top.power.hv",
                "top.power.gnd",
                "top.power.lv",
                "top.out",
                "top.stage.unnamed[0]",
                "top.stage.unnamed[1]",
                "top.stage.inner.pin",
            ]
        );
    }

    #[test]
    fn test_find_interface_dotted() {
        let (circuit, top) = create_test_circuit();
        let gnd = circuit.find_interface(top, "power.gnd").unwrap();
        assert_eq!(circuit.interface_name(gnd).unwrap(), "gnd");
        assert_eq!(circuit.owner(gnd).unwrap(), Some(top));
        assert!(circuit.find_interface(top, "power.vbat").is_none());
    }

    #[test]
    fn test_shape_roundtrip() {
        let (circuit, top) = create_test_circuit();
        let power = circuit.find_interface(top, "power").unwrap();
        assert_eq!(
            circuit.shape_of(power).unwrap(),
            InterfaceShape::rails(&["hv", "gnd", "lv"])
        );
    }

    #[test]
    fn test_duplicate_names_rejected() {
        let (mut circuit, top) = create_test_circuit();
        let err = circuit
            .add_interface(top, "out", InterfaceShape::Electrical)
            .unwrap_err();
        assert!(matches!(err, NetforgeError::DuplicateName { .. }));
        let err = circuit.add_subcomponent(top, "stage").unwrap_err();
        assert!(matches!(err, NetforgeError::DuplicateName { .. }));
    }

    #[test]
    fn test_exclusive_ownership() {
        let (mut circuit, top) = create_test_circuit();
        let stage = circuit.find_component(top, "stage").unwrap();
        let err = circuit.adopt(top, "again", stage).unwrap_err();
        assert!(matches!(err, NetforgeError::AlreadyOwned { .. }));

        let out = circuit.find_interface(top, "out").unwrap();
        let err = circuit.attach_interface(stage, "stolen", out).unwrap_err();
        assert!(matches!(err, NetforgeError::AlreadyOwned { .. }));
    }

    #[test]
    fn test_adopting_ancestor_is_cyclic() {
        let mut circuit = Circuit::new();
        let a = circuit.add_component("a");
        let b = circuit.add_subcomponent(a, "b").unwrap();
        let err = circuit.adopt(b, "a", a).unwrap_err();
        assert!(matches!(err, NetforgeError::CyclicHierarchy { .. }));
        let err = circuit.adopt(a, "self", a).unwrap_err();
        assert!(matches!(err, NetforgeError::CyclicHierarchy { .. }));
    }

    #[test]
    fn test_detached_interface_attach() {
        let mut circuit = Circuit::new();
        let part = circuit.add_component("part");
        let rail = circuit.new_interface("rail", InterfaceShape::rails(&["hv", "lv"]));
        assert_eq!(circuit.owner(rail).unwrap(), None);
        circuit.attach_interface(part, "supply", rail).unwrap();
        let lv = circuit.sub_interface(rail, "lv").unwrap();
        assert_eq!(circuit.owner(lv).unwrap(), Some(part));
        assert_eq!(circuit.interface_path(lv), "part.supply.lv");
    }

    #[test]
    fn test_unknown_handles() {
        let circuit = Circuit::new();
        let err = circuit.subtree(ComponentId::from_index(3)).unwrap_err();
        assert_eq!(err, NetforgeError::UnknownComponent { index: 3 });
        let err = circuit.connections(InterfaceId::from_index(9)).unwrap_err();
        assert_eq!(err, NetforgeError::UnknownInterface { index: 9 });
    }

    #[test]
    fn test_foreign_interface_in_bridge() {
        let (mut circuit, top) = create_test_circuit();
        let stage = circuit.find_component(top, "stage").unwrap();
        let out = circuit.find_interface(top, "out").unwrap();
        let own = circuit.find_interface(stage, "unnamed[0]").unwrap();
        let err = circuit
            .add_trait(stage, Capability::bridge(own, out))
            .unwrap_err();
        assert!(matches!(err, NetforgeError::ForeignInterface { .. }));
        assert!(circuit.bridge(stage).is_none());
    }

    #[test]
    fn test_typed_trait_accessors() {
        let mut circuit = Circuit::with_options(
            CircuitOptions::new().with_duplicate_traits(DuplicatePolicy::Overwrite),
        );
        let r = circuit.add_component("r1");
        let pins = circuit.add_interfaces(r, "unnamed", 2).unwrap();
        circuit
            .add_trait(r, Capability::bridge(pins[0], pins[1]))
            .unwrap();
        circuit
            .add_trait(r, Capability::type_description("R"))
            .unwrap();
        circuit
            .add_trait(r, Capability::Value(Parameter::constant(1e3)))
            .unwrap();
        circuit.add_trait(r, Capability::SymmetricPinMap).unwrap();

        assert_eq!(circuit.bridge(r), Some((pins[0], pins[1])));
        assert_eq!(circuit.type_description(r), Some("R"));
        assert_eq!(circuit.value(r), Some(Parameter::constant(1e3)));
        assert!(circuit.has_pin_mapping(r));
        assert!(circuit.footprint(r).is_none());
        assert_eq!(circuit.stats().trait_count, 4);
    }
}

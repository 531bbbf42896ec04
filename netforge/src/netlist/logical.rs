//! Stage T1: logical nets by connectivity closure.

use std::collections::HashMap;
use std::fmt;

use petgraph::unionfind::UnionFind;
use serde::{Deserialize, Serialize};

use crate::core::Result;
use crate::model::{Circuit, ComponentId, InterfaceId};

/// Net number, starting at 1 in traversal order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NetId(pub usize);

impl fmt::Display for NetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Net-{}", self.0)
    }
}

/// A maximal set of connected leaf interfaces, members in pre-order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogicalNet {
    pub id: NetId,
    pub members: Vec<InterfaceId>,
}

impl LogicalNet {
    pub fn name(&self) -> String {
        self.id.to_string()
    }

    pub fn contains(&self, interface: InterfaceId) -> bool {
        self.members.contains(&interface)
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// All logical nets of one component tree.
#[derive(Debug, Clone, Default)]
pub struct LogicalNetlist {
    nets: Vec<LogicalNet>,
    membership: HashMap<InterfaceId, usize>,
}

impl LogicalNetlist {
    /// Merge the leaf interfaces of the tree under `root` into nets.
    ///
    /// Union-find runs over every edge in the arena, so interfaces outside
    /// the tree still carry connectivity, but only tree interfaces become
    /// members. Nets are numbered by their first member in pre-order.
    pub fn build(circuit: &Circuit, root: ComponentId) -> Result<Self> {
        let order = circuit.all_leaf_interfaces(root)?;

        let mut sets = UnionFind::<usize>::new(circuit.interface_count());
        for (a, b) in circuit.connection_pairs() {
            sets.union(a.index(), b.index());
        }

        let mut nets: Vec<LogicalNet> = Vec::new();
        let mut by_label: HashMap<usize, usize> = HashMap::new();
        let mut membership = HashMap::with_capacity(order.len());
        for interface in order {
            let label = sets.find(interface.index());
            let slot = *by_label.entry(label).or_insert_with(|| {
                nets.push(LogicalNet {
                    id: NetId(nets.len() + 1),
                    members: Vec::new(),
                });
                nets.len() - 1
            });
            nets[slot].members.push(interface);
            membership.insert(interface, slot);
        }

        tracing::debug!(
            "T1: {} interfaces merged into {} nets under '{}'",
            membership.len(),
            nets.len(),
            circuit.component_path(root)
        );
        Ok(Self { nets, membership })
    }

    pub fn nets(&self) -> &[LogicalNet] {
        &self.nets
    }

    pub fn len(&self) -> usize {
        self.nets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nets.is_empty()
    }

    pub fn get(&self, id: NetId) -> Option<&LogicalNet> {
        id.0.checked_sub(1).and_then(|i| self.nets.get(i))
    }

    /// The net containing `interface`, if it belongs to the tree.
    pub fn net_of(&self, interface: InterfaceId) -> Option<&LogicalNet> {
        self.membership.get(&interface).map(|slot| &self.nets[*slot])
    }

    pub fn same_net(&self, a: InterfaceId, b: InterfaceId) -> bool {
        match (self.membership.get(&a), self.membership.get(&b)) {
            (Some(x), Some(y)) => x == y,
            _ => false,
        }
    }
}

//! Connection protocol: direct, star, bridged and chained connections.

use super::{Circuit, ComponentId, InterfaceId};
use crate::core::{NetforgeError, Result};

impl Circuit {
    /// Connect two interfaces.
    ///
    /// Leaves get a single undirected edge. Composites must have the identical
    /// shape and are connected member by member. Repeated and self connections
    /// are no-ops.
    pub fn connect(&mut self, a: InterfaceId, b: InterfaceId) -> Result<()> {
        let pairs = self.matching_leaves(a, b)?;
        for (x, y) in pairs {
            self.add_edge(x, y);
        }
        Ok(())
    }

    /// Pair up the leaves of two same-shaped interfaces.
    fn matching_leaves(
        &self,
        a: InterfaceId,
        b: InterfaceId,
    ) -> Result<Vec<(InterfaceId, InterfaceId)>> {
        let left = self.shape_of(a)?;
        let right = self.shape_of(b)?;
        if left != right {
            return Err(NetforgeError::ShapeMismatch {
                left: self.interface_path(a),
                left_shape: left.to_string(),
                right: self.interface_path(b),
                right_shape: right.to_string(),
            });
        }
        // Equal shapes expand to equally long, name-aligned leaf lists.
        Ok(self.leaves(a)?.into_iter().zip(self.leaves(b)?).collect())
    }

    /// Connect every interface in `others` to `hub` (star topology).
    pub fn connect_all(&mut self, hub: InterfaceId, others: &[InterfaceId]) -> Result<()> {
        let mut pairs = Vec::new();
        for other in others {
            pairs.extend(self.matching_leaves(hub, *other)?);
        }
        for (x, y) in pairs {
            self.add_edge(x, y);
        }
        Ok(())
    }

    /// Entry and exit of `bridge`, or `NotBridgeable`.
    fn bridge_ends(&self, bridge: ComponentId) -> Result<(InterfaceId, InterfaceId)> {
        self.component_node(bridge)?;
        self.bridge(bridge).ok_or_else(|| NetforgeError::NotBridgeable {
            component: self.component_path(bridge),
        })
    }

    /// Connect `x` to the bridge's entry and the bridge's exit to `y`.
    ///
    /// The bridge's own entry and exit stay distinct nets.
    pub fn connect_via(
        &mut self,
        x: InterfaceId,
        bridge: ComponentId,
        y: InterfaceId,
    ) -> Result<()> {
        self.connect_via_chain(x, &[bridge], y)
    }

    /// Thread `entry` through each bridge in turn and finish at `exit`.
    ///
    /// All bridges and shapes are checked before the first edge is added.
    pub fn connect_via_chain(
        &mut self,
        entry: InterfaceId,
        bridges: &[ComponentId],
        exit: InterfaceId,
    ) -> Result<()> {
        let ends = bridges
            .iter()
            .map(|bridge| self.bridge_ends(*bridge))
            .collect::<Result<Vec<_>>>()?;

        let mut pairs = Vec::new();
        let mut current = entry;
        for (bridge_entry, bridge_exit) in ends {
            pairs.extend(self.matching_leaves(current, bridge_entry)?);
            current = bridge_exit;
        }
        pairs.extend(self.matching_leaves(current, exit)?);

        tracing::trace!(
            "Connecting {} through {} bridge(s) to {}",
            self.interface_path(entry),
            bridges.len(),
            self.interface_path(exit)
        );
        for (x, y) in pairs {
            self.add_edge(x, y);
        }
        Ok(())
    }
}

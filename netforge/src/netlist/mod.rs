//! Netlist extraction
//!
//! Two stages turn a component tree into a netlist:
//!
//! 1. [`LogicalNetlist`] groups connected leaf interfaces into nets.
//! 2. [`PhysicalNetlist`] maps every net member to footprint pins of its
//!    packaged component and assigns reference designators.
//!
//! [`Extraction`] bundles both stages together with the collected issues.

mod logical;
mod physical;

use serde::Serialize;

pub use logical::{LogicalNet, LogicalNetlist, NetId};
pub use physical::{ComponentRecord, PhysicalNet, PhysicalNetlist, PinRef};

use crate::core::{
    ExtractionOptions, Issue, NetforgeError, NetlistStats, Result, Severity,
};
use crate::model::{Circuit, ComponentId};

/// Result of running both extraction stages on one tree.
#[derive(Debug, Clone, Serialize)]
pub struct Extraction {
    #[serde(skip)]
    pub logical: LogicalNetlist,
    pub physical: PhysicalNetlist,
    pub issues: Vec<Issue>,
    pub stats: NetlistStats,
    #[serde(skip)]
    errors: Vec<NetforgeError>,
}

impl Extraction {
    pub(crate) fn run(
        circuit: &Circuit,
        root: ComponentId,
        options: &ExtractionOptions,
    ) -> Result<Self> {
        let logical = LogicalNetlist::build(circuit, root)?;
        let resolution = physical::resolve(circuit, root, &logical, options)?;

        let dangling_severity = if options.strict_dangling {
            Severity::Error
        } else {
            Severity::Warning
        };
        let mut issues: Vec<Issue> = resolution
            .errors
            .iter()
            .map(|e| Issue::from_error(e, Severity::Error))
            .collect();
        issues.extend(
            resolution
                .dangling
                .iter()
                .map(|e| Issue::from_error(e, dangling_severity)),
        );
        issues.extend(
            resolution
                .isolated
                .iter()
                .map(|e| Issue::from_error(e, Severity::Warning)),
        );

        let mut errors = resolution.errors;
        if options.strict_dangling {
            errors.extend(resolution.dangling.iter().cloned());
        }

        let netlist = resolution.netlist;
        let stats = NetlistStats {
            logical_nets: logical.len(),
            physical_nets: netlist.nets.len(),
            components: netlist.components.len(),
            pins: netlist.pin_count(),
            dangling: resolution.dangling.len(),
            withheld: resolution.withheld,
            errors: errors.len(),
        };

        tracing::info!(
            "Extracted '{}': {} nets, {} components, {} error(s)",
            circuit.component_path(root),
            stats.physical_nets,
            stats.components,
            stats.errors
        );

        Ok(Self {
            logical,
            physical: netlist,
            issues,
            stats,
            errors,
        })
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Resolution errors, plus dangling nets under strict mode.
    pub fn errors(&self) -> &[NetforgeError] {
        &self.errors
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Issue> {
        self.issues
            .iter()
            .filter(|i| i.severity == Severity::Warning)
    }

    /// The physical netlist, or every collected error at once.
    pub fn into_netlist(self) -> Result<PhysicalNetlist> {
        if self.errors.is_empty() {
            Ok(self.physical)
        } else {
            Err(NetforgeError::Unresolved(self.errors))
        }
    }
}

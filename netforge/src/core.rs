//! Core extraction API shared by the library and the CLI.
//! Error type, options and the issue model live here.

use serde::{Deserialize, Serialize};

use crate::model::{Circuit, ComponentId};
use crate::netlist::{Extraction, LogicalNetlist};

/// Result type alias using [`NetforgeError`].
pub type Result<T> = std::result::Result<T, NetforgeError>;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum NetforgeError {
    // ============ Construction errors ============
    #[error("Shape mismatch: cannot connect '{left}' ({left_shape}) to '{right}' ({right_shape})")]
    ShapeMismatch {
        left: String,
        left_shape: String,
        right: String,
        right_shape: String,
    },

    #[error("Component '{component}' has no bridge trait and cannot be connected through")]
    NotBridgeable { component: String },

    #[error("Unknown interface handle #{index}")]
    UnknownInterface { index: usize },

    #[error("Unknown component handle #{index}")]
    UnknownComponent { index: usize },

    #[error("'{item}' is already owned by '{owner}'")]
    AlreadyOwned { item: String, owner: String },

    #[error("'{parent}' already has a member named '{name}'")]
    DuplicateName { parent: String, name: String },

    #[error("Adopting '{component}' would make it its own ancestor")]
    CyclicHierarchy { component: String },

    #[error("'{owner}' already carries a {kind} trait")]
    DuplicateTrait { owner: String, kind: String },

    #[error("Interface '{interface}' does not belong to component '{component}'")]
    ForeignInterface { component: String, interface: String },

    // ============ Resolution errors ============
    #[error("Interface '{interface}' is not in the pin map of '{component}'")]
    UnmappedPin { component: String, interface: String },

    #[error("Component '{component}' has neither a pin map nor a symmetric pin map")]
    MissingFootprintPinmap { component: String },

    #[error("Net '{net}' has only {pins} resolved pin(s)")]
    DanglingNet { net: String, pins: usize },

    #[error("Net '{net}' is internal to '{component}' and reaches none of its pins")]
    IsolatedInternalNet { net: String, component: String },

    #[error("{} extraction error(s)", .0.len())]
    Unresolved(Vec<NetforgeError>),
}

/// Discriminant of [`NetforgeError`], used in serialized reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    ShapeMismatch,
    NotBridgeable,
    UnknownInterface,
    UnknownComponent,
    AlreadyOwned,
    DuplicateName,
    CyclicHierarchy,
    DuplicateTrait,
    ForeignInterface,
    UnmappedPin,
    MissingFootprintPinmap,
    DanglingNet,
    IsolatedInternalNet,
    Unresolved,
}

impl NetforgeError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            NetforgeError::ShapeMismatch { .. } => ErrorKind::ShapeMismatch,
            NetforgeError::NotBridgeable { .. } => ErrorKind::NotBridgeable,
            NetforgeError::UnknownInterface { .. } => ErrorKind::UnknownInterface,
            NetforgeError::UnknownComponent { .. } => ErrorKind::UnknownComponent,
            NetforgeError::AlreadyOwned { .. } => ErrorKind::AlreadyOwned,
            NetforgeError::DuplicateName { .. } => ErrorKind::DuplicateName,
            NetforgeError::CyclicHierarchy { .. } => ErrorKind::CyclicHierarchy,
            NetforgeError::DuplicateTrait { .. } => ErrorKind::DuplicateTrait,
            NetforgeError::ForeignInterface { .. } => ErrorKind::ForeignInterface,
            NetforgeError::UnmappedPin { .. } => ErrorKind::UnmappedPin,
            NetforgeError::MissingFootprintPinmap { .. } => ErrorKind::MissingFootprintPinmap,
            NetforgeError::DanglingNet { .. } => ErrorKind::DanglingNet,
            NetforgeError::IsolatedInternalNet { .. } => ErrorKind::IsolatedInternalNet,
            NetforgeError::Unresolved(_) => ErrorKind::Unresolved,
        }
    }

    /// Errors raised while building the tree, as opposed to during extraction.
    pub fn is_structural(&self) -> bool {
        !matches!(
            self.kind(),
            ErrorKind::UnmappedPin
                | ErrorKind::MissingFootprintPinmap
                | ErrorKind::DanglingNet
                | ErrorKind::IsolatedInternalNet
                | ErrorKind::Unresolved
        )
    }
}

/// What to do when a trait of an already attached kind is attached again.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DuplicatePolicy {
    /// Replace the existing trait (last write wins).
    #[default]
    Overwrite,
    /// Fail with [`NetforgeError::DuplicateTrait`].
    Reject,
}

/// Options for circuit construction.
#[derive(Debug, Clone, Default)]
pub struct CircuitOptions {
    pub duplicate_traits: DuplicatePolicy,
}

impl CircuitOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_duplicate_traits(mut self, policy: DuplicatePolicy) -> Self {
        self.duplicate_traits = policy;
        self
    }
}

/// Options for netlist extraction runs (CLI or library).
#[derive(Debug, Clone)]
pub struct ExtractionOptions {
    /// Reference prefix for packaged components without a type description.
    pub default_reference_prefix: String,
    /// Report dangling nets as errors instead of warnings.
    pub strict_dangling: bool,
    /// Keep single-pin nets in the physical netlist.
    pub emit_dangling: bool,
}

impl Default for ExtractionOptions {
    fn default() -> Self {
        Self {
            default_reference_prefix: "U".to_string(),
            strict_dangling: false,
            emit_dangling: true,
        }
    }
}

impl ExtractionOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_default_reference_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.default_reference_prefix = prefix.into();
        self
    }

    pub fn with_strict_dangling(mut self, strict: bool) -> Self {
        self.strict_dangling = strict;
        self
    }

    pub fn with_emit_dangling(mut self, emit: bool) -> Self {
        self.emit_dangling = emit;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
    Info,
}

/// A finding collected during extraction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Issue {
    pub kind: ErrorKind,
    pub severity: Severity,
    pub message: String,
    pub component: Option<String>,
    pub net: Option<String>,
}

impl Issue {
    pub fn from_error(error: &NetforgeError, severity: Severity) -> Self {
        let (component, net) = match error {
            NetforgeError::UnmappedPin { component, .. }
            | NetforgeError::MissingFootprintPinmap { component }
            | NetforgeError::NotBridgeable { component }
            | NetforgeError::ForeignInterface { component, .. } => (Some(component.clone()), None),
            NetforgeError::DanglingNet { net, .. } => (None, Some(net.clone())),
            NetforgeError::IsolatedInternalNet { net, component } => {
                (Some(component.clone()), Some(net.clone()))
            }
            _ => (None, None),
        };
        Self {
            kind: error.kind(),
            severity,
            message: error.to_string(),
            component,
            net,
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

/// Counts describing one extraction run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetlistStats {
    pub logical_nets: usize,
    pub physical_nets: usize,
    pub components: usize,
    pub pins: usize,
    pub dangling: usize,
    pub withheld: usize,
    pub errors: usize,
}

/// Core extraction API used by both the CLI and library callers.
pub struct NetforgeCore;

impl NetforgeCore {
    /// Run T1 and T2 on the tree rooted at `root`.
    pub fn extract(
        circuit: &Circuit,
        root: ComponentId,
        options: &ExtractionOptions,
    ) -> Result<Extraction> {
        Extraction::run(circuit, root, options)
    }

    /// Run T1 only.
    pub fn logical_nets(circuit: &Circuit, root: ComponentId) -> Result<LogicalNetlist> {
        LogicalNetlist::build(circuit, root)
    }
}

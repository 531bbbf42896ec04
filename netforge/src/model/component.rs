//! Component handles and tree nodes.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::InterfaceId;

/// Stable handle to a component in a [`super::Circuit`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ComponentId(pub(crate) usize);

impl ComponentId {
    pub(crate) fn from_index(index: usize) -> Self {
        ComponentId(index)
    }

    pub fn index(&self) -> usize {
        self.0
    }
}

impl fmt::Display for ComponentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "C{}", self.0)
    }
}

/// A named node in the hierarchy.
#[derive(Debug, Clone)]
pub(crate) struct ComponentNode {
    pub name: String,
    pub parent: Option<ComponentId>,
    /// Top-level interfaces in declaration order.
    pub interfaces: Vec<InterfaceId>,
    /// Sub-components in declaration order.
    pub children: Vec<ComponentId>,
}

impl ComponentNode {
    pub fn new(name: String) -> Self {
        Self {
            name,
            parent: None,
            interfaces: Vec::new(),
            children: Vec::new(),
        }
    }
}

//! Interface handles, shapes and graph nodes.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::ComponentId;

/// Stable handle to an interface in a [`super::Circuit`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct InterfaceId(pub(crate) usize);

impl InterfaceId {
    pub(crate) fn from_index(index: usize) -> Self {
        InterfaceId(index)
    }

    pub fn index(&self) -> usize {
        self.0
    }
}

impl fmt::Display for InterfaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "I{}", self.0)
    }
}

/// Structure of an interface: a single electrical node, or an ordered set of
/// named sub-interfaces.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum InterfaceShape {
    #[default]
    Electrical,
    Composite(Vec<(String, InterfaceShape)>),
}

impl InterfaceShape {
    pub fn composite<S, I>(members: I) -> Self
    where
        S: Into<String>,
        I: IntoIterator<Item = (S, InterfaceShape)>,
    {
        InterfaceShape::Composite(
            members
                .into_iter()
                .map(|(name, shape)| (name.into(), shape))
                .collect(),
        )
    }

    /// A composite whose members are all electrical, e.g. `["hv", "gnd", "lv"]`.
    pub fn rails(names: &[&str]) -> Self {
        Self::composite(names.iter().map(|n| (*n, InterfaceShape::Electrical)))
    }

    pub fn is_composite(&self) -> bool {
        matches!(self, InterfaceShape::Composite(_))
    }

    pub fn leaf_count(&self) -> usize {
        match self {
            InterfaceShape::Electrical => 1,
            InterfaceShape::Composite(members) => {
                members.iter().map(|(_, shape)| shape.leaf_count()).sum()
            }
        }
    }
}

impl fmt::Display for InterfaceShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InterfaceShape::Electrical => f.write_str("electrical"),
            InterfaceShape::Composite(members) => {
                f.write_str("{")?;
                for (i, (name, shape)) in members.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    match shape {
                        InterfaceShape::Electrical => f.write_str(name)?,
                        composite => write!(f, "{}: {}", name, composite)?,
                    }
                }
                f.write_str("}")
            }
        }
    }
}

/// An electrical connection point in the arena.
#[derive(Debug, Clone)]
pub(crate) struct InterfaceNode {
    pub name: String,
    pub owner: Option<ComponentId>,
    /// Composite parent for sub-interfaces.
    pub parent: Option<InterfaceId>,
    /// Named sub-interfaces in declaration order.
    pub children: Vec<InterfaceId>,
}

impl InterfaceNode {
    pub fn new(name: String, parent: Option<InterfaceId>) -> Self {
        Self {
            name,
            owner: None,
            parent,
            children: Vec::new(),
        }
    }

    pub fn is_composite(&self) -> bool {
        !self.children.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shape_display() {
        let power = InterfaceShape::rails(&["hv", "gnd", "lv"]);
        assert_eq!(power.to_string(), "{hv, gnd, lv}");
        assert_eq!(InterfaceShape::Electrical.to_string(), "electrical");
    }

    #[test]
    fn test_nested_shape_leaf_count() {
        let shape = InterfaceShape::composite([
            ("power", InterfaceShape::rails(&["hv", "lv"])),
            ("signal", InterfaceShape::Electrical),
        ]);
        assert_eq!(shape.leaf_count(), 3);
        assert!(shape.is_composite());
        assert_eq!(shape.to_string(), "{power: {hv, lv}, signal}");
    }
}

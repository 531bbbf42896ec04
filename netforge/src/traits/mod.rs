//! Trait Registry
//!
//! Typed capability records attached to components and interfaces. Each owner
//! holds at most one trait per [`TraitKind`]; lookups return `None` when a
//! kind is absent and callers decide whether that is fatal.
//!
//! ```text
//! Owner ──▶ TraitSet ──▶ { Footprint, PinMap, SymmetricPinMap,
//!                           CanBridge, TypeDescription, Value }
//! ```

mod payload;

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::{DuplicatePolicy, NetforgeError, Result};
use crate::model::{ComponentId, InterfaceId};

pub use payload::{Footprint, Parameter, PinId, SmdSize};

/// Closed enumeration of capability kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TraitKind {
    Footprint,
    PinMap,
    SymmetricPinMap,
    CanBridge,
    TypeDescription,
    Value,
}

impl fmt::Display for TraitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TraitKind::Footprint => "footprint",
            TraitKind::PinMap => "pin map",
            TraitKind::SymmetricPinMap => "symmetric pin map",
            TraitKind::CanBridge => "bridge",
            TraitKind::TypeDescription => "type description",
            TraitKind::Value => "value",
        };
        f.write_str(name)
    }
}

/// A capability together with its payload.
#[derive(Debug, Clone, PartialEq)]
pub enum Capability {
    Footprint(Footprint),
    /// Pin to interface pairs in declaration order. Several pins may name
    /// the same interface.
    PinMap(Vec<(PinId, InterfaceId)>),
    SymmetricPinMap,
    CanBridge { entry: InterfaceId, exit: InterfaceId },
    TypeDescription(String),
    Value(Parameter),
}

impl Capability {
    pub fn kind(&self) -> TraitKind {
        match self {
            Capability::Footprint(_) => TraitKind::Footprint,
            Capability::PinMap(_) => TraitKind::PinMap,
            Capability::SymmetricPinMap => TraitKind::SymmetricPinMap,
            Capability::CanBridge { .. } => TraitKind::CanBridge,
            Capability::TypeDescription(_) => TraitKind::TypeDescription,
            Capability::Value(_) => TraitKind::Value,
        }
    }

    /// Build a pin map from `(pin, interface)` pairs.
    pub fn pin_map<P, I>(pairs: I) -> Self
    where
        P: Into<PinId>,
        I: IntoIterator<Item = (P, InterfaceId)>,
    {
        Capability::PinMap(pairs.into_iter().map(|(p, i)| (p.into(), i)).collect())
    }

    pub fn bridge(entry: InterfaceId, exit: InterfaceId) -> Self {
        Capability::CanBridge { entry, exit }
    }

    pub fn type_description(description: impl Into<String>) -> Self {
        Capability::TypeDescription(description.into())
    }

    /// Interfaces named by the payload.
    pub fn referenced_interfaces(&self) -> Vec<InterfaceId> {
        match self {
            Capability::PinMap(pairs) => pairs.iter().map(|(_, i)| *i).collect(),
            Capability::CanBridge { entry, exit } => vec![*entry, *exit],
            _ => Vec::new(),
        }
    }
}

/// Something a trait can be attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Owner {
    Component(ComponentId),
    Interface(InterfaceId),
}

impl From<ComponentId> for Owner {
    fn from(id: ComponentId) -> Self {
        Owner::Component(id)
    }
}

impl From<InterfaceId> for Owner {
    fn from(id: InterfaceId) -> Self {
        Owner::Interface(id)
    }
}

/// The traits held by one owner, one per kind.
#[derive(Debug, Clone, Default)]
pub struct TraitSet {
    traits: BTreeMap<TraitKind, Capability>,
}

impl TraitSet {
    pub fn get(&self, kind: TraitKind) -> Option<&Capability> {
        self.traits.get(&kind)
    }

    pub fn contains(&self, kind: TraitKind) -> bool {
        self.traits.contains_key(&kind)
    }

    pub fn kinds(&self) -> impl Iterator<Item = TraitKind> + '_ {
        self.traits.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.traits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.traits.is_empty()
    }

    fn insert(&mut self, capability: Capability) -> Option<Capability> {
        self.traits.insert(capability.kind(), capability)
    }
}

/// Registry mapping owners to their trait sets.
#[derive(Debug, Clone, Default)]
pub struct TraitRegistry {
    sets: HashMap<Owner, TraitSet>,
    policy: DuplicatePolicy,
}

impl TraitRegistry {
    pub fn new(policy: DuplicatePolicy) -> Self {
        Self {
            sets: HashMap::new(),
            policy,
        }
    }

    pub fn policy(&self) -> DuplicatePolicy {
        self.policy
    }

    /// Install `capability` on `owner`, returning the trait it replaced.
    ///
    /// `owner_name` is only used for the error message under
    /// [`DuplicatePolicy::Reject`].
    pub fn attach(
        &mut self,
        owner: Owner,
        owner_name: &str,
        capability: Capability,
    ) -> Result<Option<Capability>> {
        let kind = capability.kind();
        let set = self.sets.entry(owner).or_default();
        if set.contains(kind) {
            match self.policy {
                DuplicatePolicy::Reject => {
                    return Err(NetforgeError::DuplicateTrait {
                        owner: owner_name.to_string(),
                        kind: kind.to_string(),
                    });
                }
                DuplicatePolicy::Overwrite => {
                    tracing::debug!("Replacing {} trait on '{}'", kind, owner_name);
                }
            }
        }
        Ok(set.insert(capability))
    }

    pub fn query(&self, owner: Owner, kind: TraitKind) -> Option<&Capability> {
        self.sets.get(&owner).and_then(|set| set.get(kind))
    }

    pub fn has(&self, owner: Owner, kind: TraitKind) -> bool {
        self.query(owner, kind).is_some()
    }

    pub fn traits_of(&self, owner: Owner) -> Option<&TraitSet> {
        self.sets.get(&owner)
    }

    /// Total number of attached traits across all owners.
    pub fn len(&self) -> usize {
        self.sets.values().map(TraitSet::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

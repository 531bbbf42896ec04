//! Power rail interfaces.
//!
//! [`Power`] is a plain two-rail supply (`hv`, `lv`); [`EurorackPower`] is
//! the split +12V / GND / -12V bus (`hv`, `gnd`, `lv`). Both are composite
//! interfaces, so connecting two of the same kind pairs the rails by name.

use crate::core::{NetforgeError, Result};
use crate::model::{Circuit, ComponentId, InterfaceId, InterfaceShape};

/// The named rails of `interface`, which must consist of exactly `names`.
fn rails<const N: usize>(
    circuit: &Circuit,
    interface: InterfaceId,
    names: [&str; N],
) -> Result<[InterfaceId; N]> {
    let shape = circuit.shape_of(interface)?;
    let expected = InterfaceShape::rails(&names);
    if shape != expected {
        return Err(NetforgeError::ShapeMismatch {
            left: circuit.interface_path(interface),
            left_shape: shape.to_string(),
            right: names.join("/"),
            right_shape: expected.to_string(),
        });
    }
    let mut out = [interface; N];
    for (slot, name) in out.iter_mut().zip(names) {
        *slot = circuit
            .sub_interface(interface, name)
            .ok_or(NetforgeError::UnknownInterface {
                index: interface.index(),
            })?;
    }
    Ok(out)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Power {
    pub interface: InterfaceId,
    pub hv: InterfaceId,
    pub lv: InterfaceId,
}

impl Power {
    const RAILS: [&'static str; 2] = ["hv", "lv"];

    pub fn shape() -> InterfaceShape {
        InterfaceShape::rails(&Self::RAILS)
    }

    pub fn add(circuit: &mut Circuit, component: ComponentId, name: &str) -> Result<Self> {
        let interface = circuit.add_interface(component, name, Self::shape())?;
        Self::from_interface(circuit, interface)
    }

    /// View an existing interface as a supply, failing on any other shape.
    pub fn from_interface(circuit: &Circuit, interface: InterfaceId) -> Result<Self> {
        let [hv, lv] = rails(circuit, interface, Self::RAILS)?;
        Ok(Self { interface, hv, lv })
    }

    pub fn connect(&self, circuit: &mut Circuit, other: &Power) -> Result<()> {
        circuit.connect(self.interface, other.interface)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EurorackPower {
    pub interface: InterfaceId,
    pub hv: InterfaceId,
    pub gnd: InterfaceId,
    pub lv: InterfaceId,
}

impl EurorackPower {
    const RAILS: [&'static str; 3] = ["hv", "gnd", "lv"];

    pub fn shape() -> InterfaceShape {
        InterfaceShape::rails(&Self::RAILS)
    }

    pub fn add(circuit: &mut Circuit, component: ComponentId, name: &str) -> Result<Self> {
        let interface = circuit.add_interface(component, name, Self::shape())?;
        Self::from_interface(circuit, interface)
    }

    pub fn from_interface(circuit: &Circuit, interface: InterfaceId) -> Result<Self> {
        let [hv, gnd, lv] = rails(circuit, interface, Self::RAILS)?;
        Ok(Self {
            interface,
            hv,
            gnd,
            lv,
        })
    }

    pub fn connect(&self, circuit: &mut Circuit, other: &EurorackPower) -> Result<()> {
        circuit.connect(self.interface, other.interface)
    }

    /// Positive half: `hv`-`hv`, `gnd`-`lv`.
    pub fn connect_pos(&self, circuit: &mut Circuit, power: &Power) -> Result<()> {
        circuit.connect(self.hv, power.hv)?;
        circuit.connect(self.gnd, power.lv)
    }

    /// Negative half: `gnd`-`hv`, `lv`-`lv`.
    pub fn connect_neg(&self, circuit: &mut Circuit, power: &Power) -> Result<()> {
        circuit.connect(self.gnd, power.hv)?;
        circuit.connect(self.lv, power.lv)
    }

    /// Full swing: `hv`-`hv`, `lv`-`lv`. Ground stays unconnected.
    pub fn connect_full(&self, circuit: &mut Circuit, power: &Power) -> Result<()> {
        circuit.connect(self.hv, power.hv)?;
        circuit.connect(self.lv, power.lv)
    }
}

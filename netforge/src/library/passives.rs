//! Resistors, capacitors and potentiometers.

use super::{Part, POTENTIOMETER_FOOTPRINT};
use crate::core::Result;
use crate::model::{Circuit, ComponentId, InterfaceId, InterfaceShape};
use crate::traits::{Capability, Footprint, Parameter, SmdSize};

/// Detached two-terminal bridgeable part with `unnamed[0]` and `unnamed[1]`.
fn two_terminal(
    circuit: &mut Circuit,
    name: &str,
    prefix: &str,
    value: Parameter,
) -> Result<(ComponentId, [InterfaceId; 2])> {
    let component = circuit.add_component(name);
    let pins = circuit.add_interfaces(component, "unnamed", 2)?;
    let terminals = [pins[0], pins[1]];
    circuit.add_trait(component, Capability::bridge(terminals[0], terminals[1]))?;
    circuit.add_trait(component, Capability::type_description(prefix))?;
    circuit.add_trait(component, Capability::Value(value))?;
    Ok((component, terminals))
}

/// Package a two-terminal part as a generic SMD chip with symmetric pins.
fn assign_smd(circuit: &mut Circuit, component: ComponentId, size: SmdSize) -> Result<()> {
    circuit.add_trait(component, Capability::Footprint(Footprint::smd_two_pin(size)))?;
    circuit.add_trait(component, Capability::SymmetricPinMap)?;
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resistor {
    pub component: ComponentId,
    pub terminals: [InterfaceId; 2],
}

impl Resistor {
    pub fn new(circuit: &mut Circuit, resistance: Parameter) -> Result<Self> {
        let (component, terminals) = two_terminal(circuit, "resistor", "R", resistance)?;
        Ok(Self {
            component,
            terminals,
        })
    }

    pub fn assign_smd_footprint(&self, circuit: &mut Circuit, size: SmdSize) -> Result<()> {
        assign_smd(circuit, self.component, size)
    }
}

impl Part for Resistor {
    fn component(&self) -> ComponentId {
        self.component
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capacitor {
    pub component: ComponentId,
    pub terminals: [InterfaceId; 2],
}

impl Capacitor {
    pub fn new(circuit: &mut Circuit, capacitance: Parameter) -> Result<Self> {
        let (component, terminals) = two_terminal(circuit, "capacitor", "C", capacitance)?;
        Ok(Self {
            component,
            terminals,
        })
    }

    pub fn assign_smd_footprint(&self, circuit: &mut Circuit, size: SmdSize) -> Result<()> {
        assign_smd(circuit, self.component, size)
    }
}

impl Part for Capacitor {
    fn component(&self) -> ComponentId {
        self.component
    }
}

/// Three-terminal potentiometer modelled as two resistors meeting at the
/// wiper.
///
/// ```text
/// resistors[0] ── R0 ──┬── R1 ── resistors[1]
///                      │
///                    wiper
/// ```
///
/// The inner resistors carry symmetric pin maps of their own, so an
/// unpackaged potentiometer still extracts as two resistors. Once
/// [`Potentiometer::assign_footprint`] is called the potentiometer becomes
/// the packaged part and the inner resistors disappear from the netlist.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Potentiometer {
    pub component: ComponentId,
    pub resistors: [Resistor; 2],
    /// Outer ends, `resistors[0]` and `resistors[1]`.
    pub ends: [InterfaceId; 2],
    pub wiper: InterfaceId,
}

impl Potentiometer {
    pub fn new(circuit: &mut Circuit, resistance: Parameter) -> Result<Self> {
        let component = circuit.add_component("potentiometer");
        circuit.add_trait(component, Capability::type_description("R"))?;
        circuit.add_trait(component, Capability::Value(resistance))?;

        let ends = circuit.add_interfaces(component, "resistors", 2)?;
        let ends = [ends[0], ends[1]];
        let wiper = circuit.add_interface(component, "wiper", InterfaceShape::Electrical)?;

        let mut resistors = Vec::with_capacity(2);
        for (i, end) in ends.iter().enumerate() {
            let resistor = Resistor::new(circuit, resistance)?.place(
                circuit,
                component,
                &format!("resistors[{}]", i),
            )?;
            circuit.add_trait(resistor.component, Capability::SymmetricPinMap)?;
            circuit.connect(*end, resistor.terminals[0])?;
            resistors.push(resistor);
        }
        let resistors = [resistors[0], resistors[1]];
        circuit.connect_all(
            wiper,
            &[resistors[0].terminals[1], resistors[1].terminals[1]],
        )?;

        Ok(Self {
            component,
            resistors,
            ends,
            wiper,
        })
    }

    /// Wire the ends across `high`/`low` with the wiper driving `out`.
    pub fn connect_as_voltage_divider(
        &self,
        circuit: &mut Circuit,
        high: InterfaceId,
        low: InterfaceId,
        out: InterfaceId,
    ) -> Result<()> {
        circuit.connect(self.ends[0], high)?;
        circuit.connect(self.ends[1], low)?;
        circuit.connect(self.wiper, out)
    }

    /// Package as the Alpha dual-gang footprint: pin 1 and 3 are the ends,
    /// pin 2 the wiper.
    pub fn assign_footprint(&self, circuit: &mut Circuit) -> Result<()> {
        circuit.add_trait(
            self.component,
            Capability::Footprint(Footprint::new(POTENTIOMETER_FOOTPRINT)),
        )?;
        circuit.add_trait(
            self.component,
            Capability::pin_map([(1u32, self.ends[0]), (2u32, self.wiper), (3u32, self.ends[1])]),
        )?;
        Ok(())
    }
}

impl Part for Potentiometer {
    fn component(&self) -> ComponentId {
        self.component
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ExtractionOptions;
    use crate::core::NetforgeCore;

    #[test]
    fn test_resistor_is_bridgeable() {
        let mut circuit = Circuit::new();
        let r = Resistor::new(&mut circuit, Parameter::constant(1e3)).unwrap();
        assert_eq!(circuit.bridge(r.component), Some((r.terminals[0], r.terminals[1])));
        assert_eq!(circuit.type_description(r.component), Some("R"));
        assert_eq!(circuit.value(r.component), Some(Parameter::constant(1e3)));
        assert_eq!(circuit.interface_path(r.terminals[1]), "resistor.unnamed[1]");
        assert!(!circuit.has_pin_mapping(r.component));
    }

    #[test]
    fn test_smd_footprint_adds_symmetric_pins() {
        let mut circuit = Circuit::new();
        let c = Capacitor::new(&mut circuit, Parameter::constant(10e-9)).unwrap();
        c.assign_smd_footprint(&mut circuit, SmdSize::I0805).unwrap();
        assert_eq!(
            circuit.footprint(c.component).map(|f| f.identifier.as_str()),
            Some("SMD_TwoPin_0805")
        );
        assert!(circuit.has_symmetric_pin_map(c.component));
    }

    #[test]
    fn test_place_renames_into_parent() {
        let mut circuit = Circuit::new();
        let top = circuit.add_component("top");
        let r = Resistor::new(&mut circuit, Parameter::Tbd)
            .unwrap()
            .place(&mut circuit, top, "pull_down")
            .unwrap();
        assert_eq!(circuit.component_path(r.component), "top.pull_down");
        assert_eq!(circuit.subcomponents(top).unwrap(), &[r.component]);
    }

    #[test]
    fn test_potentiometer_wiper_joins_inner_resistors() {
        let mut circuit = Circuit::new();
        let pot = Potentiometer::new(&mut circuit, Parameter::constant(10e3)).unwrap();
        let logical = NetforgeCore::logical_nets(&circuit, pot.component).unwrap();
        assert!(logical.same_net(pot.wiper, pot.resistors[0].terminals[1]));
        assert!(logical.same_net(pot.wiper, pot.resistors[1].terminals[1]));
        assert!(logical.same_net(pot.ends[0], pot.resistors[0].terminals[0]));
        assert!(!logical.same_net(pot.ends[0], pot.ends[1]));
    }

    #[test]
    fn test_packaged_potentiometer_hides_inner_resistors() {
        let mut circuit = Circuit::new();
        let top = circuit.add_component("top");
        let rails = circuit.add_interfaces(top, "rail", 3).unwrap();
        let pot = Potentiometer::new(&mut circuit, Parameter::constant(10e3))
            .unwrap()
            .place(&mut circuit, top, "trimmer")
            .unwrap();
        pot.assign_footprint(&mut circuit).unwrap();
        pot.connect_as_voltage_divider(&mut circuit, rails[0], rails[1], rails[2])
            .unwrap();

        let netlist = NetforgeCore::extract(&circuit, top, &ExtractionOptions::default())
            .unwrap()
            .into_netlist()
            .unwrap();
        assert_eq!(netlist.components.len(), 1);
        assert_eq!(netlist.components[0].reference, "R1");
        assert_eq!(netlist.components[0].pin_count, 3);
        let wiper_net = netlist.net_of_pin("R1", "2").unwrap();
        assert_eq!(wiper_net.pins.len(), 1);
    }

    #[test]
    fn test_bare_potentiometer_extracts_as_two_resistors() {
        let mut circuit = Circuit::new();
        let pot = Potentiometer::new(&mut circuit, Parameter::constant(1e3)).unwrap();
        let netlist = NetforgeCore::extract(&circuit, pot.component, &ExtractionOptions::default())
            .unwrap()
            .into_netlist()
            .unwrap();
        let refs: Vec<&str> = netlist.components.iter().map(|c| c.reference.as_str()).collect();
        assert_eq!(refs, vec!["R1", "R2"]);
        let wiper = netlist.net_of_pin("R1", "2").unwrap();
        assert!(wiper.has_pin("R2", "2"));
    }
}

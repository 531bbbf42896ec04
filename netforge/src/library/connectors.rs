//! Panel connectors.

use super::{Part, JACK_3_5MM_FOOTPRINT};
use crate::core::Result;
use crate::model::{Circuit, ComponentId, InterfaceId, InterfaceShape};
use crate::traits::{Capability, Footprint};

/// Mono 3.5mm jack with grounded sleeve: sleeve, tip switch and tip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AudioJack2Ground {
    pub component: ComponentId,
    pub s: InterfaceId,
    pub tn: InterfaceId,
    pub t: InterfaceId,
}

impl AudioJack2Ground {
    pub fn new(circuit: &mut Circuit) -> Result<Self> {
        let component = circuit.add_component("jack");
        let s = circuit.add_interface(component, "S", InterfaceShape::Electrical)?;
        let tn = circuit.add_interface(component, "TN", InterfaceShape::Electrical)?;
        let t = circuit.add_interface(component, "T", InterfaceShape::Electrical)?;

        circuit.add_trait(
            component,
            Capability::Footprint(Footprint::new(JACK_3_5MM_FOOTPRINT)),
        )?;
        circuit.add_trait(component, Capability::pin_map([("S", s), ("TN", tn), ("T", t)]))?;
        circuit.add_trait(component, Capability::type_description("J"))?;
        Ok(Self { component, s, tn, t })
    }
}

impl Part for AudioJack2Ground {
    fn component(&self) -> ComponentId {
        self.component
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{ExtractionOptions, NetforgeCore};

    #[test]
    fn test_jack_pins_are_named() {
        let mut circuit = Circuit::new();
        let top = circuit.add_component("top");
        let gnd = circuit.add_interface(top, "gnd", InterfaceShape::Electrical).unwrap();
        let jack = AudioJack2Ground::new(&mut circuit)
            .unwrap()
            .place(&mut circuit, top, "input")
            .unwrap();
        circuit.connect(jack.s, gnd).unwrap();

        let extraction =
            NetforgeCore::extract(&circuit, top, &ExtractionOptions::default()).unwrap();
        let netlist = extraction.into_netlist().unwrap();
        assert_eq!(netlist.components[0].reference, "J1");
        assert_eq!(
            netlist.components[0].footprint.as_deref(),
            Some(JACK_3_5MM_FOOTPRINT)
        );
        assert!(netlist.net_of_pin("J1", "S").is_some());
        assert!(netlist.net_of_pin("J1", "TN").is_some());
        assert!(netlist.net_of_pin("J1", "1").is_none());
    }
}

//! Small-signal bipolar transistors.

use super::{Part, TO92_FOOTPRINT};
use crate::core::Result;
use crate::model::{Circuit, ComponentId, InterfaceId, InterfaceShape};
use crate::traits::{Capability, Footprint};

/// A TO-92 BJT with emitter, base and collector on pins 1, 2 and 3.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bjt {
    pub component: ComponentId,
    pub e: InterfaceId,
    pub b: InterfaceId,
    pub c: InterfaceId,
}

impl Bjt {
    /// 2N3904 NPN transistor.
    pub fn npn_2n3904(circuit: &mut Circuit) -> Result<Self> {
        Self::to92(circuit, "2N3904")
    }

    /// 2N3906 PNP transistor.
    pub fn pnp_2n3906(circuit: &mut Circuit) -> Result<Self> {
        Self::to92(circuit, "2N3906")
    }

    fn to92(circuit: &mut Circuit, part: &str) -> Result<Self> {
        let component = circuit.add_component(part);
        let e = circuit.add_interface(component, "E", InterfaceShape::Electrical)?;
        let b = circuit.add_interface(component, "B", InterfaceShape::Electrical)?;
        let c = circuit.add_interface(component, "C", InterfaceShape::Electrical)?;

        circuit.add_trait(component, Capability::Footprint(Footprint::new(TO92_FOOTPRINT)))?;
        circuit.add_trait(component, Capability::pin_map([(1u32, e), (2u32, b), (3u32, c)]))?;
        circuit.add_trait(component, Capability::type_description("Q"))?;
        Ok(Self { component, e, b, c })
    }
}

impl Part for Bjt {
    fn component(&self) -> ComponentId {
        self.component
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::PinId;

    #[test]
    fn test_pinout_is_ebc() {
        let mut circuit = Circuit::new();
        let q = Bjt::npn_2n3904(&mut circuit).unwrap();
        let map = circuit.pin_map(q.component).unwrap();
        assert_eq!(
            map,
            &[
                (PinId::from("1"), q.e),
                (PinId::from("2"), q.b),
                (PinId::from("3"), q.c),
            ]
        );
        assert_eq!(circuit.type_description(q.component), Some("Q"));
        assert_eq!(circuit.component_name(q.component).unwrap(), "2N3904");
    }

    #[test]
    fn test_pnp_shares_package() {
        let mut circuit = Circuit::new();
        let npn = Bjt::npn_2n3904(&mut circuit).unwrap();
        let pnp = Bjt::pnp_2n3906(&mut circuit).unwrap();
        assert_eq!(circuit.footprint(npn.component), circuit.footprint(pnp.component));
        assert_eq!(
            circuit.footprint(pnp.component).unwrap().identifier,
            TO92_FOOTPRINT
        );
    }
}

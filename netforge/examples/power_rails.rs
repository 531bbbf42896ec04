//! Power rails example: feed a split-supply module from a Eurorack bus in the
//! three ways the bus can be tapped, then print the logical nets.

use netforge::prelude::*;
use netforge::NetforgeError;

fn main() -> Result<(), NetforgeError> {
    let mut circuit = Circuit::new();
    let rack = circuit.add_component("rack");
    let bus = EurorackPower::add(&mut circuit, rack, "bus")?;

    let mut supplies = Vec::new();
    for name in ["positive", "negative", "full"] {
        let module = circuit.add_subcomponent(rack, name)?;
        let supply = Power::add(&mut circuit, module, "power")?;
        let decoupling = Capacitor::new(&mut circuit, Parameter::constant(100e-9))?
            .place(&mut circuit, module, "decoupling")?;
        decoupling.assign_smd_footprint(&mut circuit, SmdSize::I0603)?;
        circuit.connect_via(supply.hv, decoupling.component, supply.lv)?;
        supplies.push(supply);
    }

    bus.connect_pos(&mut circuit, &supplies[0])?;
    bus.connect_neg(&mut circuit, &supplies[1])?;
    bus.connect_full(&mut circuit, &supplies[2])?;

    let logical = NetforgeCore::logical_nets(&circuit, rack)?;
    for net in logical.nets() {
        let members: Vec<String> = net
            .members
            .iter()
            .map(|m| circuit.interface_path(*m))
            .collect();
        println!("{}: {}", net.name(), members.join(", "));
    }

    let extraction = NetforgeCore::extract(&circuit, rack, &ExtractionOptions::default())?;
    for net in &extraction.physical.nets {
        println!("{} -> {:?}", net.name, net.connected_components());
    }
    Ok(())
}

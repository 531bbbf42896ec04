//! Voltage divider example: build a two-resistor divider and print its netlist.

use netforge::prelude::*;
use netforge::NetforgeError;

fn main() -> Result<(), NetforgeError> {
    let mut circuit = Circuit::new();
    let top = circuit.add_component("divider");
    let vin = circuit.add_interface(top, "vin", InterfaceShape::Electrical)?;
    let vout = circuit.add_interface(top, "vout", InterfaceShape::Electrical)?;
    let gnd = circuit.add_interface(top, "gnd", InterfaceShape::Electrical)?;

    let upper = Resistor::new(&mut circuit, Parameter::constant(10e3))?;
    let upper = upper.place(&mut circuit, top, "upper")?;
    let lower = Resistor::new(&mut circuit, Parameter::constant(4.7e3))?;
    let lower = lower.place(&mut circuit, top, "lower")?;
    for r in [&upper, &lower] {
        r.assign_smd_footprint(&mut circuit, SmdSize::I0805)?;
    }

    circuit.connect_via_chain(vin, &[upper.component, lower.component], gnd)?;
    circuit.connect(vout, lower.terminals[0])?;

    let extraction = NetforgeCore::extract(&circuit, top, &ExtractionOptions::default())?;
    println!("Components:");
    for component in &extraction.physical.components {
        println!(
            "  {} = {} ({})",
            component.reference,
            component.value.map(|v| v.to_string()).unwrap_or_default(),
            component.path
        );
    }
    println!("Nets:");
    for net in &extraction.physical.nets {
        let pins: Vec<String> = net
            .pins
            .iter()
            .map(|p| format!("{}.{}", p.reference, p.pin))
            .collect();
        println!("  {}: {}", net.name, pins.join(", "));
    }

    let netlist = extraction.into_netlist()?;
    println!("\n{} pins on {} nets", netlist.pin_count(), netlist.nets.len());
    Ok(())
}

//! Built-in designs the CLI can extract.

use clap::ValueEnum;
use netforge::prelude::*;
use netforge::Result;

const K: f64 = 1e3;
const N: f64 = 1e-9;
const U: f64 = 1e-6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Design {
    /// Kassutronics avalanche VCO Eurorack module
    Vco,
    /// Two-resistor voltage divider
    Divider,
    /// Divider whose lower resistor was never given a footprint
    Unpackaged,
}

impl Design {
    pub fn all() -> &'static [Design] {
        &[Design::Vco, Design::Divider, Design::Unpackaged]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Design::Vco => "vco",
            Design::Divider => "divider",
            Design::Unpackaged => "unpackaged",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Design::Vco => {
                "Reverse-avalanche VCO: CV input, expo converter, oscillator core, \
                 output buffer and audio output on a Eurorack bus"
            }
            Design::Divider => "10k/10k divider between vin and gnd with a vout tap",
            Design::Unpackaged => "Divider with an unpackaged resistor; extraction reports it",
        }
    }

    /// Build the design, returning the circuit and its root component.
    pub fn build(&self, options: CircuitOptions) -> Result<(Circuit, ComponentId)> {
        let mut circuit = Circuit::with_options(options);
        let root = match self {
            Design::Vco => Vco::build(&mut circuit)?.component,
            Design::Divider => divider(&mut circuit, true)?,
            Design::Unpackaged => divider(&mut circuit, false)?,
        };
        Ok((circuit, root))
    }
}

fn resistor(circuit: &mut Circuit, parent: ComponentId, name: &str, ohms: f64) -> Result<Resistor> {
    let r = Resistor::new(circuit, Parameter::constant(ohms))?.place(circuit, parent, name)?;
    r.assign_smd_footprint(circuit, SmdSize::I0805)?;
    Ok(r)
}

fn capacitor(
    circuit: &mut Circuit,
    parent: ComponentId,
    name: &str,
    farads: f64,
) -> Result<Capacitor> {
    let c = Capacitor::new(circuit, Parameter::constant(farads))?.place(circuit, parent, name)?;
    c.assign_smd_footprint(circuit, SmdSize::I0805)?;
    Ok(c)
}

fn potentiometer(
    circuit: &mut Circuit,
    parent: ComponentId,
    name: &str,
    ohms: f64,
) -> Result<Potentiometer> {
    let pot = Potentiometer::new(circuit, Parameter::constant(ohms))?.place(circuit, parent, name)?;
    pot.assign_footprint(circuit)?;
    Ok(pot)
}

fn electrical(circuit: &mut Circuit, component: ComponentId, name: &str) -> Result<InterfaceId> {
    circuit.add_interface(component, name, InterfaceShape::Electrical)
}

fn divider(circuit: &mut Circuit, package_bottom: bool) -> Result<ComponentId> {
    let top = circuit.add_component("divider");
    let vin = electrical(circuit, top, "vin")?;
    let vout = electrical(circuit, top, "vout")?;
    let gnd = electrical(circuit, top, "gnd")?;

    let upper = resistor(circuit, top, "upper", 10.0 * K)?;
    let lower = Resistor::new(circuit, Parameter::constant(10.0 * K))?.place(circuit, top, "lower")?;
    if package_bottom {
        lower.assign_smd_footprint(circuit, SmdSize::I0805)?;
    }

    circuit.connect_via(vin, upper.component, vout)?;
    circuit.connect_via(vout, lower.component, gnd)?;
    Ok(top)
}

/// Reverse-avalanche oscillator core.
struct OscCore {
    component: ComponentId,
    vcc: InterfaceId,
}

impl OscCore {
    fn build(circuit: &mut Circuit) -> Result<Self> {
        let component = circuit.add_component("osc_core");
        let vcc = electrical(circuit, component, "vcc")?;
        let wave_out = electrical(circuit, component, "wave_out")?;
        let pitch_in = electrical(circuit, component, "pitch_in")?;

        let limiter = resistor(circuit, component, "current_limiting_resistor", 1.0 * K)?;
        let transistor =
            Bjt::npn_2n3904(circuit)?.place(circuit, component, "reverse_avalanche_transistor")?;
        let charge = capacitor(circuit, component, "charge_capacitor", 10.0 * N)?;

        // Base is left open for reverse avalanche operation.
        circuit.connect(transistor.e, vcc)?;
        circuit.connect_via(transistor.c, charge.component, transistor.e)?;
        circuit.connect(wave_out, transistor.c)?;
        circuit.connect_via(pitch_in, limiter.component, transistor.c)?;

        circuit.add_trait(component, Capability::bridge(pitch_in, wave_out))?;
        Ok(Self { component, vcc })
    }
}

/// Linear to exponential current converter.
struct ExpoConverter {
    component: ComponentId,
    power: EurorackPower,
}

impl ExpoConverter {
    fn build(circuit: &mut Circuit) -> Result<Self> {
        let component = circuit.add_component("expo_converter");
        let power = EurorackPower::add(circuit, component, "power")?;
        let pitch_out = electrical(circuit, component, "pitch_out")?;
        let freq_in = electrical(circuit, component, "freq_in")?;

        let sink = Bjt::npn_2n3904(circuit)?.place(circuit, component, "current_sink")?;
        let buffer = Bjt::pnp_2n3906(circuit)?.place(circuit, component, "buffer")?;
        let trimmer = potentiometer(circuit, component, "frequency_offset_trimmer", 10.0 * K)?;
        let min_resistor = resistor(
            circuit,
            component,
            "frequency_offset_current_min_resistor",
            100.0 * K,
        )?;

        circuit.connect(freq_in, buffer.b)?;
        circuit.connect(pitch_out, sink.c)?;
        circuit.add_trait(component, Capability::bridge(freq_in, pitch_out))?;

        circuit.connect(min_resistor.terminals[0], buffer.e)?;
        circuit.connect(buffer.e, sink.b)?;
        circuit.connect(buffer.c, power.lv)?;
        circuit.connect(sink.e, power.gnd)?;
        trimmer.connect_as_voltage_divider(
            circuit,
            power.hv,
            power.gnd,
            min_resistor.terminals[1],
        )?;
        Ok(Self { component, power })
    }
}

/// CV input mixer with coarse tune and V/oct scaling.
struct CvInput {
    component: ComponentId,
    power: EurorackPower,
    freq_out: InterfaceId,
}

impl CvInput {
    fn build(circuit: &mut Circuit) -> Result<Self> {
        let component = circuit.add_component("cv_input");
        let power = EurorackPower::add(circuit, component, "power")?;
        let freq_out = electrical(circuit, component, "freq_out")?;

        let jack = AudioJack2Ground::new(circuit)?.place(circuit, component, "input_jack")?;
        let frequency_pot =
            potentiometer(circuit, component, "frequency_control_potentiometer", 100.0 * K)?;
        let voct_trimmer = potentiometer(circuit, component, "voct_scale_trimmer", 1.0 * K)?;
        let input_impedance = resistor(circuit, component, "input_impedance_resistor", 100.0 * K)?;
        let negative_bias = resistor(circuit, component, "negative_bias_resistor", 220.0 * K)?;
        let voct_min = resistor(circuit, component, "voct_min_resistor", 1.5 * K)?;
        let mix = resistor(circuit, component, "freq_divider_mix_resistor", 150.0 * K)?;

        circuit.connect(jack.s, power.gnd)?;
        // Only one half of the trimmer is used, as a variable resistor to ground.
        circuit.connect_via(
            voct_min.terminals[1],
            voct_trimmer.resistors[0].component,
            power.gnd,
        )?;
        circuit.connect(negative_bias.terminals[1], power.lv)?;
        frequency_pot.connect_as_voltage_divider(
            circuit,
            power.hv,
            power.gnd,
            mix.terminals[1],
        )?;
        for summing in [
            negative_bias.terminals[0],
            mix.terminals[0],
            voct_min.terminals[0],
            freq_out,
        ] {
            circuit.connect_via(jack.t, input_impedance.component, summing)?;
        }

        Ok(Self {
            component,
            power,
            freq_out,
        })
    }
}

/// Two-stage emitter follower.
struct OutputBuffer {
    component: ComponentId,
    power: Power,
}

impl OutputBuffer {
    fn build(circuit: &mut Circuit) -> Result<Self> {
        let component = circuit.add_component("output_buffer");
        let power = Power::add(circuit, component, "power")?;
        let buffered_out = electrical(circuit, component, "wave_buffered_out")?;
        let unbuffered_in = electrical(circuit, component, "wave_unbuffered_in")?;

        let stages = [
            Bjt::npn_2n3904(circuit)?.place(circuit, component, "stages[0]")?,
            Bjt::npn_2n3904(circuit)?.place(circuit, component, "stages[1]")?,
        ];
        let limiter = resistor(circuit, component, "current_limiting_resistor", 10.0 * K)?;

        circuit.connect(unbuffered_in, stages[0].b)?;
        circuit.connect(buffered_out, stages[1].e)?;
        circuit.add_trait(component, Capability::bridge(unbuffered_in, buffered_out))?;

        for stage in &stages {
            circuit.connect(stage.c, power.hv)?;
        }
        circuit.connect_via(stages[1].e, limiter.component, power.lv)?;
        circuit.connect(stages[0].e, stages[1].b)?;
        Ok(Self { component, power })
    }
}

/// AC-coupled output jack.
struct AudioOutput {
    component: ComponentId,
    gnd: InterfaceId,
    wave_in: InterfaceId,
}

impl AudioOutput {
    fn build(circuit: &mut Circuit) -> Result<Self> {
        let component = circuit.add_component("audio_output");
        let gnd = electrical(circuit, component, "gnd")?;
        let wave_in = electrical(circuit, component, "wave_buffered_in")?;

        let pull_down = resistor(circuit, component, "pull_down_resistor", 10.0 * K)?;
        let coupling = capacitor(circuit, component, "ac_coupling_capacitor", 10.0 * U)?;
        let jack = AudioJack2Ground::new(circuit)?.place(circuit, component, "jack")?;

        circuit.connect_via(wave_in, coupling.component, jack.t)?;
        circuit.connect_via(jack.t, pull_down.component, gnd)?;
        circuit.connect(jack.s, gnd)?;
        Ok(Self {
            component,
            gnd,
            wave_in,
        })
    }
}

/// The complete VCO module.
struct Vco {
    component: ComponentId,
}

impl Vco {
    fn build(circuit: &mut Circuit) -> Result<Self> {
        let component = circuit.add_component("vco");
        let power = EurorackPower::add(circuit, component, "power")?;

        let cv = CvInput::build(circuit)?;
        circuit.adopt(component, "cv_input", cv.component)?;
        let expo = ExpoConverter::build(circuit)?;
        circuit.adopt(component, "expo_converter", expo.component)?;
        let osc = OscCore::build(circuit)?;
        circuit.adopt(component, "osc_core", osc.component)?;
        let buffer = OutputBuffer::build(circuit)?;
        circuit.adopt(component, "output_buffer", buffer.component)?;
        let output = AudioOutput::build(circuit)?;
        circuit.adopt(component, "audio_output", output.component)?;

        power.connect(circuit, &cv.power)?;
        power.connect(circuit, &expo.power)?;
        circuit.connect(power.hv, osc.vcc)?;
        power.connect_full(circuit, &buffer.power)?;
        circuit.connect(power.gnd, output.gnd)?;

        circuit.connect_via_chain(
            cv.freq_out,
            &[expo.component, osc.component, buffer.component],
            output.wave_in,
        )?;

        tracing::debug!(
            "Built VCO with {} components",
            circuit.descendants(component)?.len()
        );
        Ok(Self { component })
    }
}

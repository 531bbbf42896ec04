//! Part library
//!
//! Ready-made components for common parts. Each constructor creates a
//! detached component with its interfaces and traits in place and returns a
//! typed handle; [`Part::place`] then adopts it into a design.

mod connectors;
mod passives;
mod power;
mod semiconductors;

pub use connectors::AudioJack2Ground;
pub use passives::{Capacitor, Potentiometer, Resistor};
pub use power::{EurorackPower, Power};
pub use semiconductors::Bjt;

use crate::core::Result;
use crate::model::{Circuit, ComponentId};

/// A library part backed by one component of the arena.
pub trait Part: Sized {
    fn component(&self) -> ComponentId;

    /// Adopt the part into `parent` under `name`.
    fn place(self, circuit: &mut Circuit, parent: ComponentId, name: &str) -> Result<Self> {
        circuit.adopt(parent, name, self.component())?;
        Ok(self)
    }
}

/// KiCad footprint shared by the dual-gang potentiometers.
pub const POTENTIOMETER_FOOTPRINT: &str =
    "Potentiometer_THT:Potentiometer_Alpha_RD902F-40-00D_Dual_Vertical_CircularHoles";

/// TO-92 package used by the small-signal transistors.
pub const TO92_FOOTPRINT: &str = "Package_TO_SOT_THT:TO-92_Inline";

pub const JACK_3_5MM_FOOTPRINT: &str =
    "Connector_Audio:Jack_3.5mm_QingPu_WQP-PJ398SM_Vertical_CircularHoles";

//! Pipe bend loss.

use ef_core::units::{Length, m};

use crate::traits::{Geometry, LossModel};

/// Bend settings. Defaults: 0.1 m bore, bend factor 0.9, radius 0.5 m.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BendConfig {
    pub diameter: Length,
    /// Fraction of kinetic power retained through the bend
    pub bend_factor: f64,
    /// Centerline radius; carried for reporting, the loss does not use it
    pub bend_radius: Length,
}

impl Default for BendConfig {
    fn default() -> Self {
        Self {
            diameter: m(0.1),
            bend_factor: 0.9,
            bend_radius: m(0.5),
        }
    }
}

/// Loss `mdot * (1 - bend_factor) * v² / 2`; zero when either flow is zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bend {
    pub bend_factor: f64,
    /// Radius (m)
    pub bend_radius: f64,
}

impl Bend {
    pub fn new(bend_factor: f64, bend_radius: Length) -> Self {
        Self {
            bend_factor,
            bend_radius: bend_radius.value,
        }
    }
}

impl From<&BendConfig> for Bend {
    fn from(config: &BendConfig) -> Self {
        Bend::new(config.bend_factor, config.bend_radius)
    }
}

impl LossModel for Bend {
    fn kind(&self) -> &'static str {
        "Bend"
    }

    fn power_loss(&self, geometry: &Geometry, volumetric_flow: f64, mass_flow: f64) -> f64 {
        if volumetric_flow == 0.0 || mass_flow == 0.0 {
            return 0.0;
        }
        let v = geometry.velocity(volumetric_flow);
        mass_flow * (1.0 - self.bend_factor) * v.powi(2) / 2.0
    }
}

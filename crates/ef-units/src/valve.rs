//! Valve loss from a resistance coefficient.

use ef_core::units::{Length, m};

use crate::traits::{Geometry, LossModel};

/// Valve settings. Defaults: 0.1 m bore, K = 1.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValveConfig {
    pub diameter: Length,
    pub resistance_coefficient: f64,
}

impl Default for ValveConfig {
    fn default() -> Self {
        Self {
            diameter: m(0.1),
            resistance_coefficient: 1.0,
        }
    }
}

/// Loss `mdot * v² * K / 2`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Valve {
    pub resistance_coefficient: f64,
}

impl From<&ValveConfig> for Valve {
    fn from(config: &ValveConfig) -> Self {
        Valve {
            resistance_coefficient: config.resistance_coefficient,
        }
    }
}

impl LossModel for Valve {
    fn kind(&self) -> &'static str {
        "Valve"
    }

    fn power_loss(&self, geometry: &Geometry, volumetric_flow: f64, mass_flow: f64) -> f64 {
        let v = geometry.velocity(volumetric_flow);
        mass_flow * v.powi(2) * self.resistance_coefficient / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_coefficient_loses_all_kinetic_power() {
        let valve = Valve::from(&ValveConfig::default());
        let g = Geometry::circular(m(0.1));
        let v = g.velocity(0.01);
        assert_eq!(valve.power_loss(&g, 0.01, 10.0), 10.0 * v * v / 2.0);
    }

    #[test]
    fn zero_coefficient_is_lossless() {
        let valve = Valve {
            resistance_coefficient: 0.0,
        };
        assert_eq!(valve.power_loss(&Geometry::circular(m(0.1)), 0.01, 10.0), 0.0);
    }
}

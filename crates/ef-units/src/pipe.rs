//! Straight pipe with Darcy-Weisbach friction loss.

use std::f64::consts::PI;

use ef_core::numeric::div_or_zero;
use ef_core::units::{Length, m};

use crate::traits::{Geometry, LossModel};

/// Pipe settings. Defaults: 0.1 m bore, 1 m long, friction factor 0.02.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PipeConfig {
    pub diameter: Length,
    pub length: Length,
    /// Darcy friction factor
    pub friction_factor: f64,
}

impl Default for PipeConfig {
    fn default() -> Self {
        Self {
            diameter: m(0.1),
            length: m(1.0),
            friction_factor: 0.02,
        }
    }
}

/// Friction loss `mdot * 8 f L q² / (π² D⁵)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pipe {
    /// Length (m)
    pub length: f64,
    pub friction_factor: f64,
}

impl Pipe {
    pub fn new(length: Length, friction_factor: f64) -> Self {
        Self {
            length: length.value,
            friction_factor,
        }
    }
}

impl From<&PipeConfig> for Pipe {
    fn from(config: &PipeConfig) -> Self {
        Pipe::new(config.length, config.friction_factor)
    }
}

impl LossModel for Pipe {
    fn kind(&self) -> &'static str {
        "Pipe"
    }

    fn power_loss(&self, geometry: &Geometry, volumetric_flow: f64, mass_flow: f64) -> f64 {
        let numerator = mass_flow * 8.0 * self.friction_factor * self.length * volumetric_flow.powi(2);
        div_or_zero(numerator, PI.powi(2) * geometry.diameter.powi(5))
    }
}

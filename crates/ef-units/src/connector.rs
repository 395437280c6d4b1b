//! Transport element between unit operations.
//!
//! A connector turns an inlet flow into an outlet flow by removing the power
//! its loss model dissipates from the stream's kinetic power:
//!
//! ```text
//! v      = q / A
//! P_in   = 0.5 * mdot * v²
//! P_out  = P_in - loss(q, mdot)
//! rho    = mdot / q
//! q_out  = cbrt(2 * P_out * A² / rho)
//! ```
//!
//! `q_out` inverts `P = 0.5 * rho * q³ / A²`. It is a modeling simplification,
//! not a continuity solve. Zero area, flow or density yield 0 instead of
//! failing so start-up states stay computable.

use ef_core::numeric::div_or_zero;
use ef_core::units::{Area, Length, MassRate, Power, VolumeRate, m, m2, m3ps, w};
use tracing::warn;

use crate::bend::{Bend, BendConfig};
use crate::common::check_non_negative;
use crate::error::UnitResult;
use crate::pipe::{Pipe, PipeConfig};
use crate::traits::{Geometry, LossModel};
use crate::valve::{Valve, ValveConfig};

#[derive(Debug)]
pub struct Connector {
    name: String,
    geometry: Geometry,
    loss: Box<dyn LossModel>,
}

impl Connector {
    /// Create a connector named after its loss model.
    ///
    /// # Errors
    /// Returns error if the diameter is negative or non-finite.
    pub fn new(diameter: Length, loss: impl LossModel + 'static) -> UnitResult<Self> {
        check_non_negative(diameter.value, "diameter")?;
        Ok(Self {
            name: loss.kind().to_string(),
            geometry: Geometry::circular(diameter),
            loss: Box::new(loss),
        })
    }

    pub fn pipe(config: PipeConfig) -> UnitResult<Self> {
        check_non_negative(config.length.value, "pipe length")?;
        Self::new(config.diameter, Pipe::from(&config))
    }

    pub fn bend(config: BendConfig) -> UnitResult<Self> {
        Self::new(config.diameter, Bend::from(&config))
    }

    pub fn valve(config: ValveConfig) -> UnitResult<Self> {
        Self::new(config.diameter, Valve::from(&config))
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> &'static str {
        self.loss.kind()
    }

    pub fn diameter(&self) -> Length {
        m(self.geometry.diameter)
    }

    pub fn cross_sectional_area(&self) -> Area {
        m2(self.geometry.area)
    }

    /// Mean velocity (m/s) for a volumetric flow.
    pub fn velocity(&self, q: VolumeRate) -> f64 {
        self.geometry.velocity(q.value)
    }

    /// Kinetic power carried by the inlet stream.
    pub fn kinetic_power(&self, q: VolumeRate, mdot: MassRate) -> Power {
        let v = self.velocity(q);
        w(0.5 * mdot.value * v.powi(2))
    }

    /// Power dissipated by this connector.
    pub fn power_consumed(&self, q: VolumeRate, mdot: MassRate) -> Power {
        w(self.loss.power_loss(&self.geometry, q.value, mdot.value))
    }

    /// Kinetic power left after losses. May be negative.
    pub fn output_power(&self, q: VolumeRate, mdot: MassRate) -> Power {
        self.kinetic_power(q, mdot) - self.power_consumed(q, mdot)
    }

    /// Bulk density `mdot / q` (kg/m³); 0 for zero flow.
    pub fn density(&self, q: VolumeRate, mdot: MassRate) -> f64 {
        div_or_zero(mdot.value, q.value)
    }

    /// Outlet volumetric flow.
    pub fn output_flow(&self, q: VolumeRate, mdot: MassRate) -> VolumeRate {
        let p_out = self.output_power(q, mdot).value;
        let rho = self.density(q, mdot);
        let radicand = div_or_zero(2.0 * p_out * self.geometry.area.powi(2), rho);

        if radicand < 0.0 {
            warn!(
                connector = %self.name,
                output_power = p_out,
                "losses exceed kinetic power, outlet flow clamped to zero"
            );
            return m3ps(0.0);
        }
        m3ps(radicand.cbrt())
    }
}

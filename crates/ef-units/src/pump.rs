//! Pump collaborator run once at the head of a facility.
//!
//! ## Model
//!
//! A pump receives the feed volumetric flow and its volume fractions and
//! reports the delivered flows and the shaft power it draws:
//!
//! ```text
//! rho   = Σ x_c * rho_c
//! mdot  = rho * q_out
//! P     = rho * g * q_out * H / eta
//! ```
//!
//! Power is reported as a positive draw.

use std::fmt;

use ef_core::units::{MassRate, Power, VolumeRate, constants, kgps, m3ps, w};
use ef_streams::ComponentMap;

use crate::common::{check_finite, check_finite_map};
use crate::error::{UnitError, UnitResult};

/// Flows delivered by a pump and the power it drew.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PumpOutput {
    pub mass_flow: MassRate,
    pub volumetric_flow: VolumeRate,
    pub power: Power,
}

pub trait Pump: Send + Sync + fmt::Debug {
    fn name(&self) -> &str;

    /// Pump a feed of `q` with the given volume fractions.
    fn pump(&self, q: VolumeRate, composition: &ComponentMap) -> UnitResult<PumpOutput>;
}

/// Mixture density from volume fractions (kg/m³). Undefined entries count as zero.
pub fn mixture_density(composition: &ComponentMap) -> f64 {
    composition
        .iter()
        .map(|(c, x)| x * c.density_kgpm3())
        .sum()
}

/// Passes the feed through without drawing power.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdealPump;

impl Pump for IdealPump {
    fn name(&self) -> &str {
        "Pump"
    }

    fn pump(&self, q: VolumeRate, composition: &ComponentMap) -> UnitResult<PumpOutput> {
        check_finite(q.value, "pump inlet flow")?;
        check_finite_map(composition, "pump inlet composition")?;
        Ok(PumpOutput {
            mass_flow: kgps(mixture_density(composition) * q.value),
            volumetric_flow: q,
            power: w(0.0),
        })
    }
}

/// Pump lifting the feed through a fixed head.
#[derive(Debug, Clone, PartialEq)]
pub struct HeadPump {
    name: String,
    /// Head (m)
    head: f64,
    /// Hydraulic efficiency (0 < eta <= 1)
    eta: f64,
    /// Delivered flow; the feed flow when unset
    rated_flow: Option<f64>,
}

impl HeadPump {
    /// Create a new pump.
    ///
    /// # Arguments
    /// * `head` - Head added to the stream (m)
    /// * `eta` - Efficiency (0 < eta <= 1)
    ///
    /// # Errors
    /// Returns error if parameters are out of physical bounds.
    pub fn new(name: impl Into<String>, head: f64, eta: f64) -> UnitResult<Self> {
        check_finite(head, "pump head")?;
        check_finite(eta, "pump efficiency")?;
        if eta <= 0.0 || eta > 1.0 {
            return Err(UnitError::InvalidArg {
                what: "pump efficiency must be in (0,1]",
            });
        }
        if head < 0.0 {
            return Err(UnitError::InvalidArg {
                what: "pump head must be non-negative",
            });
        }
        Ok(Self {
            name: name.into(),
            head,
            eta,
            rated_flow: None,
        })
    }

    /// Deliver a fixed flow regardless of the feed.
    pub fn with_rated_flow(mut self, q: VolumeRate) -> UnitResult<Self> {
        check_finite(q.value, "rated flow")?;
        if q.value < 0.0 {
            return Err(UnitError::InvalidArg {
                what: "rated flow must be non-negative",
            });
        }
        self.rated_flow = Some(q.value);
        Ok(self)
    }

    pub fn head(&self) -> f64 {
        self.head
    }

    pub fn eta(&self) -> f64 {
        self.eta
    }

    pub fn rated_flow(&self) -> Option<VolumeRate> {
        self.rated_flow.map(m3ps)
    }
}

impl Pump for HeadPump {
    fn name(&self) -> &str {
        &self.name
    }

    fn pump(&self, q: VolumeRate, composition: &ComponentMap) -> UnitResult<PumpOutput> {
        check_finite(q.value, "pump inlet flow")?;
        check_finite_map(composition, "pump inlet composition")?;

        let q_out = self.rated_flow.unwrap_or(q.value);
        let rho = mixture_density(composition);
        let power = rho * constants::G0_MPS2 * q_out * self.head / self.eta;
        check_finite(power, "pump power")?;

        Ok(PumpOutput {
            mass_flow: kgps(rho * q_out),
            volumetric_flow: m3ps(q_out),
            power: w(power),
        })
    }
}

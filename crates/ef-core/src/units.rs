// ef-core/src/units.rs

use std::fmt;
use std::str::FromStr;

use crate::CoreError;
use uom::si::f64::{
    Acceleration as UomAcceleration, Area as UomArea, Energy as UomEnergy, Length as UomLength,
    MassDensity as UomMassDensity, MassRate as UomMassRate, Power as UomPower, Ratio as UomRatio,
    Time as UomTime, Velocity as UomVelocity, VolumeRate as UomVolumeRate,
};

// Public canonical unit types (SI, f64)
pub type Accel = UomAcceleration;
pub type Area = UomArea;
pub type Energy = UomEnergy;
pub type Length = UomLength;
pub type Density = UomMassDensity;
pub type MassRate = UomMassRate;
pub type Power = UomPower;
pub type Ratio = UomRatio;
pub type Time = UomTime;
pub type Velocity = UomVelocity;
pub type VolumeRate = UomVolumeRate;

#[inline]
pub fn kgps(v: f64) -> MassRate {
    use uom::si::mass_rate::kilogram_per_second;
    MassRate::new::<kilogram_per_second>(v)
}

#[inline]
pub fn m3ps(v: f64) -> VolumeRate {
    use uom::si::volume_rate::cubic_meter_per_second;
    VolumeRate::new::<cubic_meter_per_second>(v)
}

#[inline]
pub fn kgpm3(v: f64) -> Density {
    use uom::si::mass_density::kilogram_per_cubic_meter;
    Density::new::<kilogram_per_cubic_meter>(v)
}

#[inline]
pub fn m(v: f64) -> Length {
    use uom::si::length::meter;
    Length::new::<meter>(v)
}

#[inline]
pub fn m2(v: f64) -> Area {
    use uom::si::area::square_meter;
    Area::new::<square_meter>(v)
}

#[inline]
pub fn s(v: f64) -> Time {
    use uom::si::time::second;
    Time::new::<second>(v)
}

#[inline]
pub fn w(v: f64) -> Power {
    use uom::si::power::watt;
    Power::new::<watt>(v)
}

#[inline]
pub fn j(v: f64) -> Energy {
    use uom::si::energy::joule;
    Energy::new::<joule>(v)
}

#[inline]
pub fn unitless(v: f64) -> Ratio {
    use uom::si::ratio::ratio;
    Ratio::new::<ratio>(v)
}

/// Unit a power consumption rate is quoted in.
///
/// Rates are converted to watts once, when a unit is configured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PowerUnit {
    /// Energy per day, the customary plant-datasheet figure.
    #[default]
    #[cfg_attr(feature = "serde", serde(rename = "kWh/day"))]
    KilowattHourPerDay,
    #[cfg_attr(feature = "serde", serde(rename = "kWh/hour"))]
    KilowattHourPerHour,
    #[cfg_attr(feature = "serde", serde(rename = "kW"))]
    Kilowatt,
    #[cfg_attr(feature = "serde", serde(rename = "W"))]
    Watt,
}

impl PowerUnit {
    pub const ALL: [PowerUnit; 4] = [
        PowerUnit::KilowattHourPerDay,
        PowerUnit::KilowattHourPerHour,
        PowerUnit::Kilowatt,
        PowerUnit::Watt,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            PowerUnit::KilowattHourPerDay => "kWh/day",
            PowerUnit::KilowattHourPerHour => "kWh/hour",
            PowerUnit::Kilowatt => "kW",
            PowerUnit::Watt => "W",
        }
    }

    /// Watts represented by one of this unit.
    pub fn watts_per_unit(&self) -> f64 {
        match self {
            PowerUnit::KilowattHourPerDay => 1000.0 / 24.0,
            PowerUnit::KilowattHourPerHour | PowerUnit::Kilowatt => 1000.0,
            PowerUnit::Watt => 1.0,
        }
    }

    pub fn to_power(&self, rate: f64) -> Power {
        w(rate * self.watts_per_unit())
    }
}

impl fmt::Display for PowerUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for PowerUnit {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PowerUnit::ALL
            .into_iter()
            .find(|unit| unit.key() == s.trim())
            .ok_or_else(|| CoreError::UnknownPowerUnit { unit: s.to_string() })
    }
}

pub mod constants {
    use super::*;

    pub const G0_MPS2: f64 = 9.806_65;

    /// Lower heating value of ethanol (J/kg).
    pub const ETHANOL_ENERGY_DENSITY_JPKG: f64 = 28.818e6;

    #[inline]
    pub fn g0() -> Accel {
        use uom::si::acceleration::meter_per_second_squared;
        Accel::new::<meter_per_second_squared>(G0_MPS2)
    }
}

//! Representation selector for a stream.

use std::fmt;
use std::str::FromStr;

use crate::error::StreamError;

/// Which rate a stream's amounts are expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Basis {
    /// Mass rate (kg/s)
    Mass,
    /// Volumetric rate (m³/s)
    Volumetric,
}

impl Basis {
    pub fn key(&self) -> &'static str {
        match self {
            Basis::Mass => "mass",
            Basis::Volumetric => "volumetric",
        }
    }

    pub fn unit(&self) -> &'static str {
        match self {
            Basis::Mass => "kg/s",
            Basis::Volumetric => "m³/s",
        }
    }

    pub fn other(&self) -> Basis {
        match self {
            Basis::Mass => Basis::Volumetric,
            Basis::Volumetric => Basis::Mass,
        }
    }
}

impl fmt::Display for Basis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Basis {
    type Err = StreamError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "mass" | "mass_flow" => Ok(Basis::Mass),
            "volumetric" | "volume" | "volumetric_flow" => Ok(Basis::Volumetric),
            _ => Err(StreamError::InvalidBasis {
                name: s.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_and_other() {
        assert_eq!("mass".parse::<Basis>().unwrap(), Basis::Mass);
        assert_eq!("Volumetric".parse::<Basis>().unwrap().other(), Basis::Mass);
        assert!(matches!(
            "molar".parse::<Basis>(),
            Err(StreamError::InvalidBasis { .. })
        ));
    }
}

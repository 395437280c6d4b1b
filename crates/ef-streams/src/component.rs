//! Chemical components carried by plant streams.

use std::fmt;
use std::str::FromStr;

use ef_core::units::{Density, kgpm3};

use crate::error::StreamError;

/// Components tracked through the plant. The set is closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Component {
    /// Ethanol (C₂H₅OH)
    Ethanol,
    /// Water (H₂O)
    Water,
    /// Dissolved fermentable sugar
    Sugar,
    /// Insoluble plant fiber
    Fiber,
}

impl Component {
    pub const COUNT: usize = 4;

    pub const ALL: [Component; Component::COUNT] = [
        Component::Ethanol,
        Component::Water,
        Component::Sugar,
        Component::Fiber,
    ];

    /// Stable position in [`Component::ALL`].
    pub const fn index(self) -> usize {
        match self {
            Component::Ethanol => 0,
            Component::Water => 1,
            Component::Sugar => 2,
            Component::Fiber => 3,
        }
    }

    pub fn key(&self) -> &'static str {
        match self {
            Component::Ethanol => "ethanol",
            Component::Water => "water",
            Component::Sugar => "sugar",
            Component::Fiber => "fiber",
        }
    }

    /// Density at 20 °C, 1 atm (kg/m³).
    pub const fn density_kgpm3(self) -> f64 {
        match self {
            Component::Ethanol => 789.0,
            Component::Water => 997.0,
            Component::Sugar => 1590.0,
            Component::Fiber => 1311.0,
        }
    }

    pub fn density(self) -> Density {
        kgpm3(self.density_kgpm3())
    }
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Component {
    type Err = StreamError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "ethanol" | "etoh" => Ok(Component::Ethanol),
            "water" | "h2o" => Ok(Component::Water),
            "sugar" => Ok(Component::Sugar),
            "fiber" | "fibre" => Ok(Component::Fiber),
            _ => Err(StreamError::UnknownComponent {
                name: s.to_string(),
            }),
        }
    }
}

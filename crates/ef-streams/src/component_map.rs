//! Per-component values with explicit "undefined" entries.

use std::fmt;

use crate::component::Component;
use crate::error::{StreamError, StreamResult};

/// A value (amount or fraction) for each component, where any entry may be
/// undefined.
///
/// Undefined differs from zero: transforms mark outputs undefined when an
/// input they depend on is missing, and undefined entries are dropped from
/// totals instead of contributing 0.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ComponentMap {
    values: [Option<f64>; Component::COUNT],
}

impl ComponentMap {
    /// A map with every component undefined.
    pub const fn new() -> Self {
        Self {
            values: [None; Component::COUNT],
        }
    }

    /// A complete map in registry order (ethanol, water, sugar, fiber).
    pub const fn from_values(ethanol: f64, water: f64, sugar: f64, fiber: f64) -> Self {
        Self {
            values: [Some(ethanol), Some(water), Some(sugar), Some(fiber)],
        }
    }

    /// Build a complete map by evaluating `f` for every component.
    pub fn filled(mut f: impl FnMut(Component) -> f64) -> Self {
        let mut map = Self::new();
        for c in Component::ALL {
            map.set(c, f(c));
        }
        map
    }

    /// Parse a map keyed by component names.
    ///
    /// Fails on the first name outside the registry.
    pub fn from_named<'a, I>(entries: I) -> StreamResult<Self>
    where
        I: IntoIterator<Item = (&'a str, f64)>,
    {
        let mut map = Self::new();
        for (name, value) in entries {
            let component: Component = name.parse()?;
            map.set(component, value);
        }
        Ok(map)
    }

    pub fn get(&self, component: Component) -> Option<f64> {
        self.values[component.index()]
    }

    /// Value of `component`, or a missing-component error.
    pub fn require(&self, component: Component) -> StreamResult<f64> {
        self.get(component)
            .ok_or(StreamError::MissingComponent { component })
    }

    /// All four values in registry order, or the first missing component.
    pub fn require_all(&self) -> StreamResult<[f64; Component::COUNT]> {
        let mut out = [0.0; Component::COUNT];
        for c in Component::ALL {
            out[c.index()] = self.require(c)?;
        }
        Ok(out)
    }

    /// All four values in registry order, if every component is defined.
    pub fn complete(&self) -> Option<[f64; Component::COUNT]> {
        self.require_all().ok()
    }

    pub fn is_complete(&self) -> bool {
        self.values.iter().all(Option::is_some)
    }

    pub fn is_empty(&self) -> bool {
        self.values.iter().all(Option::is_none)
    }

    /// Number of defined entries.
    pub fn len(&self) -> usize {
        self.values.iter().filter(|v| v.is_some()).count()
    }

    pub fn set(&mut self, component: Component, value: f64) {
        self.values[component.index()] = Some(value);
    }

    /// Set or clear an entry.
    pub fn set_opt(&mut self, component: Component, value: Option<f64>) {
        self.values[component.index()] = value;
    }

    pub fn unset(&mut self, component: Component) {
        self.values[component.index()] = None;
    }

    /// Builder-style [`ComponentMap::set`].
    pub fn with(mut self, component: Component, value: f64) -> Self {
        self.set(component, value);
        self
    }

    /// Iterate over defined entries in registry order.
    pub fn iter(&self) -> impl Iterator<Item = (Component, f64)> + '_ {
        Component::ALL
            .into_iter()
            .filter_map(|c| self.get(c).map(|v| (c, v)))
    }

    /// Sum of defined entries.
    pub fn sum(&self) -> f64 {
        self.iter().map(|(_, v)| v).sum()
    }

    /// Apply `f` to each defined entry; undefined entries stay undefined.
    pub fn map(&self, mut f: impl FnMut(Component, f64) -> f64) -> Self {
        let mut out = Self::new();
        for (c, v) in self.iter() {
            out.set(c, f(c, v));
        }
        out
    }

    pub fn scaled(&self, factor: f64) -> Self {
        self.map(|_, v| v * factor)
    }

    /// True when both maps define exactly the same components.
    pub fn defined_like(&self, other: &ComponentMap) -> bool {
        Component::ALL
            .iter()
            .all(|&c| self.get(c).is_some() == other.get(c).is_some())
    }
}

impl FromIterator<(Component, f64)> for ComponentMap {
    fn from_iter<T: IntoIterator<Item = (Component, f64)>>(iter: T) -> Self {
        let mut map = Self::new();
        for (c, v) in iter {
            map.set(c, v);
        }
        map
    }
}

impl fmt::Display for ComponentMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, c) in Component::ALL.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            match self.get(*c) {
                Some(v) => write!(f, "{c}: {v:.6}")?,
                None => write!(f, "{c}: -")?,
            }
        }
        f.write_str("}")
    }
}

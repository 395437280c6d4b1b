//! Plant file schema definitions.

use std::collections::BTreeMap;

use ef_core::PowerUnit;
use serde::{Deserialize, Serialize};

pub const LATEST_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlantDef {
    pub version: u32,
    pub name: String,
    #[serde(default)]
    pub pump: PumpDef,
    #[serde(default)]
    pub stages: Vec<StageDef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feed: Option<FeedDef>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(tag = "type")]
pub enum PumpDef {
    #[default]
    Ideal,
    Head {
        #[serde(default = "default_pump_name")]
        name: String,
        head_m: f64,
        eta: f64,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        rated_flow_m3ps: Option<f64>,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StageDef {
    pub name: String,
    pub kind: StageKind,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum StageKind {
    Fermentation(ProcessDef),
    Filtration(ProcessDef),
    Distillation(ProcessDef),
    Dehydration(ProcessDef),
    /// Pass-through unit that only draws power and cost
    Process(ProcessDef),
    Pipe {
        #[serde(default = "default_diameter_m")]
        diameter_m: f64,
        #[serde(default = "default_length_m")]
        length_m: f64,
        #[serde(default = "default_friction_factor")]
        friction_factor: f64,
    },
    Bend {
        #[serde(default = "default_diameter_m")]
        diameter_m: f64,
        #[serde(default = "default_bend_factor")]
        bend_factor: f64,
        #[serde(default = "default_bend_radius_m")]
        bend_radius_m: f64,
    },
    Valve {
        #[serde(default = "default_diameter_m")]
        diameter_m: f64,
        #[serde(default = "default_resistance_coefficient")]
        resistance_coefficient: f64,
    },
}

impl StageKind {
    pub fn type_name(&self) -> &'static str {
        match self {
            StageKind::Fermentation(_) => "Fermentation",
            StageKind::Filtration(_) => "Filtration",
            StageKind::Distillation(_) => "Distillation",
            StageKind::Dehydration(_) => "Dehydration",
            StageKind::Process(_) => "Process",
            StageKind::Pipe { .. } => "Pipe",
            StageKind::Bend { .. } => "Bend",
            StageKind::Valve { .. } => "Valve",
        }
    }

    pub fn process(&self) -> Option<&ProcessDef> {
        match self {
            StageKind::Fermentation(p)
            | StageKind::Filtration(p)
            | StageKind::Distillation(p)
            | StageKind::Dehydration(p)
            | StageKind::Process(p) => Some(p),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProcessDef {
    #[serde(default = "default_efficiency")]
    pub efficiency: f64,
    #[serde(default)]
    pub power_consumption_rate: f64,
    #[serde(default)]
    pub power_consumption_unit: PowerUnit,
    #[serde(default)]
    pub cost_usd: f64,
    #[serde(default)]
    pub cost_per_flow_usd: f64,
}

impl Default for ProcessDef {
    fn default() -> Self {
        Self {
            efficiency: default_efficiency(),
            power_consumption_rate: 0.0,
            power_consumption_unit: PowerUnit::default(),
            cost_usd: 0.0,
            cost_per_flow_usd: 0.0,
        }
    }
}

/// Feed for a run: volume fractions by component name.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FeedDef {
    pub composition: BTreeMap<String, f64>,
    pub flow_m3ps: f64,
    #[serde(default = "default_interval_s")]
    pub interval_s: f64,
}

fn default_pump_name() -> String {
    "Pump".to_string()
}

fn default_efficiency() -> f64 {
    1.0
}

fn default_diameter_m() -> f64 {
    0.1
}

fn default_length_m() -> f64 {
    1.0
}

fn default_friction_factor() -> f64 {
    0.02
}

fn default_bend_factor() -> f64 {
    0.9
}

fn default_bend_radius_m() -> f64 {
    0.5
}

fn default_resistance_coefficient() -> f64 {
    1.0
}

fn default_interval_s() -> f64 {
    1.0
}

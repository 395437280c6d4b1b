//! Serializable summary of a facility run.

use std::collections::BTreeMap;

use ef_plant::{Facility, FacilityRun, Stage};
use ef_streams::ComponentMap;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct RunReport {
    pub plant: String,
    pub flow_m3ps: f64,
    pub mass_flow_kgps: f64,
    pub volumetric_composition: BTreeMap<String, f64>,
    pub mass_composition: BTreeMap<String, f64>,
    pub total_power_w: f64,
    pub total_energy_j: f64,
    pub ethanol_energy_w: f64,
    pub fixed_cost_usd: f64,
    pub recorded_cost_usd: f64,
    pub contributions: Vec<ContributionReport>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub logs: Vec<LogReport>,
}

#[derive(Debug, Serialize)]
pub struct ContributionReport {
    pub name: String,
    pub kind: String,
    pub power_w: f64,
    pub energy_j: f64,
}

/// Per-process log summary, present when data was stored.
#[derive(Debug, Serialize)]
pub struct LogReport {
    pub process: String,
    pub inputs: usize,
    pub outputs: usize,
    pub energy_j: f64,
    pub cost_usd: f64,
}

impl RunReport {
    pub fn new(facility: &Facility, run: &FacilityRun) -> Self {
        let logs = facility
            .stages()
            .iter()
            .filter_map(Stage::as_process)
            .filter_map(|p| {
                p.log().map(|log| LogReport {
                    process: p.name().to_string(),
                    inputs: log.inputs.mass.len(),
                    outputs: log.outputs.mass.len(),
                    energy_j: log.total_energy().value,
                    cost_usd: log.total_cost(),
                })
            })
            .collect();

        Self {
            plant: facility.name().to_string(),
            flow_m3ps: run.volumetric.total(),
            mass_flow_kgps: run.mass.total(),
            volumetric_composition: named(run.volumetric.composition()),
            mass_composition: named(run.mass.composition()),
            total_power_w: run.total_power.value,
            total_energy_j: run.total_energy.value,
            ethanol_energy_w: run.ethanol_energy_rate().value,
            fixed_cost_usd: facility.fixed_cost(),
            recorded_cost_usd: facility.recorded_cost(),
            contributions: run
                .contributions
                .iter()
                .map(|c| ContributionReport {
                    name: c.name.clone(),
                    kind: c.kind.to_string(),
                    power_w: c.power.value,
                    energy_j: c.energy.value,
                })
                .collect(),
            logs,
        }
    }

    pub fn print(&self) {
        println!("Plant: {}", self.plant);
        println!(
            "  Outlet flow: {:.6e} m³/s ({:.6e} kg/s)",
            self.flow_m3ps, self.mass_flow_kgps
        );
        println!("  Composition (volume / mass fraction):");
        for (name, x_vol) in &self.volumetric_composition {
            let x_mass = self.mass_composition.get(name).copied().unwrap_or(0.0);
            println!("    {:<8} {:>10.6} {:>10.6}", name, x_vol, x_mass);
        }
        println!("  Power drawn:");
        for c in &self.contributions {
            println!("    {:<20} {:<8} {:>14.3} W", c.name, c.kind, c.power_w);
        }
        println!("  Total power: {:.3} W", self.total_power_w);
        println!("  Total energy: {:.3} J", self.total_energy_j);
        println!("  Ethanol energy out: {:.3} W", self.ethanol_energy_w);
        println!("  Fixed cost: {:.2} USD", self.fixed_cost_usd);
        if !self.logs.is_empty() {
            println!("  Recorded cost: {:.2} USD", self.recorded_cost_usd);
            println!("  Process logs:");
            for log in &self.logs {
                println!(
                    "    {:<20} {} in / {} out, {:.3} J, {:.2} USD",
                    log.process, log.inputs, log.outputs, log.energy_j, log.cost_usd
                );
            }
        }
    }
}

fn named(map: &ComponentMap) -> BTreeMap<String, f64> {
    map.iter().map(|(c, v)| (c.key().to_string(), v)).collect()
}

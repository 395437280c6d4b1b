//! Turn a plant definition into a runnable facility.

use ef_core::units::{m, m3ps, s};
use ef_plant::{Facility, RunInput, Stage};
use ef_streams::ComponentMap;
use ef_units::{
    BendConfig, Connector, HeadPump, PipeConfig, Process, ProcessConfig, ValveConfig,
};

use crate::schema::{FeedDef, PlantDef, ProcessDef, PumpDef, StageDef, StageKind};
use crate::{ProjectError, ProjectResult};

/// Build a facility with the stages in file order.
pub fn build_facility(plant: &PlantDef) -> ProjectResult<Facility> {
    let mut facility = match &plant.pump {
        PumpDef::Ideal => Facility::new(&plant.name),
        PumpDef::Head {
            name,
            head_m,
            eta,
            rated_flow_m3ps,
        } => {
            let mut pump = HeadPump::new(name, *head_m, *eta)?;
            if let Some(q) = rated_flow_m3ps {
                pump = pump.with_rated_flow(m3ps(*q))?;
            }
            Facility::new(&plant.name).with_pump(pump)
        }
    };

    for stage in &plant.stages {
        facility.add_stage(build_stage(stage)?);
    }
    Ok(facility)
}

pub fn build_stage(stage: &StageDef) -> ProjectResult<Stage> {
    let stage: Stage = match &stage.kind {
        StageKind::Fermentation(p) => Process::fermentation(process_config(p))?
            .with_name(&stage.name)
            .into(),
        StageKind::Filtration(p) => Process::filtration(process_config(p))?
            .with_name(&stage.name)
            .into(),
        StageKind::Distillation(p) => Process::distillation(process_config(p))?
            .with_name(&stage.name)
            .into(),
        StageKind::Dehydration(p) => Process::dehydration(process_config(p))?
            .with_name(&stage.name)
            .into(),
        StageKind::Process(p) => Process::new(&stage.name, process_config(p))?.into(),
        StageKind::Pipe {
            diameter_m,
            length_m,
            friction_factor,
        } => Connector::pipe(PipeConfig {
            diameter: m(*diameter_m),
            length: m(*length_m),
            friction_factor: *friction_factor,
        })?
        .with_name(&stage.name)
        .into(),
        StageKind::Bend {
            diameter_m,
            bend_factor,
            bend_radius_m,
        } => Connector::bend(BendConfig {
            diameter: m(*diameter_m),
            bend_factor: *bend_factor,
            bend_radius: m(*bend_radius_m),
        })?
        .with_name(&stage.name)
        .into(),
        StageKind::Valve {
            diameter_m,
            resistance_coefficient,
        } => Connector::valve(ValveConfig {
            diameter: m(*diameter_m),
            resistance_coefficient: *resistance_coefficient,
        })?
        .with_name(&stage.name)
        .into(),
    };
    Ok(stage)
}

fn process_config(p: &ProcessDef) -> ProcessConfig {
    ProcessConfig {
        efficiency: p.efficiency,
        power_consumption_rate: p.power_consumption_rate,
        power_consumption_unit: p.power_consumption_unit,
        cost: p.cost_usd,
        cost_per_flow: p.cost_per_flow_usd,
    }
}

pub fn build_run_input(feed: &FeedDef) -> ProjectResult<RunInput> {
    let composition =
        ComponentMap::from_named(feed.composition.iter().map(|(k, v)| (k.as_str(), *v)))?;
    Ok(RunInput::new(composition, m3ps(feed.flow_m3ps)).with_interval(s(feed.interval_s)))
}

/// Run input from the plant's own feed.
pub fn plant_run_input(plant: &PlantDef) -> ProjectResult<RunInput> {
    let feed = plant.feed.as_ref().ok_or(ProjectError::MissingFeed)?;
    build_run_input(feed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::LATEST_VERSION;
    use ef_streams::Component;

    #[test]
    fn stages_keep_file_names() {
        let plant = PlantDef {
            version: LATEST_VERSION,
            name: "Plant".to_string(),
            pump: PumpDef::Head {
                name: "Feed pump".to_string(),
                head_m: 3.0,
                eta: 0.8,
                rated_flow_m3ps: None,
            },
            stages: vec![
                StageDef {
                    name: "Fermenter".to_string(),
                    kind: StageKind::Fermentation(ProcessDef::default()),
                },
                StageDef {
                    name: "Transfer line".to_string(),
                    kind: StageKind::Pipe {
                        diameter_m: 0.1,
                        length_m: 2.0,
                        friction_factor: 0.02,
                    },
                },
            ],
            feed: None,
        };
        let facility = build_facility(&plant).unwrap();
        assert_eq!(facility.name(), "Plant");
        assert_eq!(facility.pump().name(), "Feed pump");
        let names: Vec<_> = facility.stages().iter().map(Stage::name).collect();
        assert_eq!(names, ["Fermenter", "Transfer line"]);
        assert_eq!(facility.stages()[1].kind(), "Pipe");
    }

    #[test]
    fn feed_uses_component_names() {
        let feed = FeedDef {
            composition: [("Water", 0.9), ("EtOH", 0.1), ("sugar", 0.0), ("fibre", 0.0)]
                .into_iter()
                .map(|(k, v)| (k.to_string(), v))
                .collect(),
            flow_m3ps: 0.5,
            interval_s: 60.0,
        };
        let input = build_run_input(&feed).unwrap();
        assert_eq!(input.composition.get(Component::Ethanol), Some(0.1));
        assert_eq!(input.total_flow.value, 0.5);
        assert_eq!(input.interval.value, 60.0);
    }

    #[test]
    fn missing_feed() {
        let plant = PlantDef {
            version: LATEST_VERSION,
            name: "Plant".to_string(),
            pump: PumpDef::Ideal,
            stages: vec![],
            feed: None,
        };
        assert!(matches!(
            plant_run_input(&plant),
            Err(ProjectError::MissingFeed)
        ));
    }
}

//! End-to-end runs of a complete ethanol train.

use ef_core::PowerUnit;
use ef_core::numeric::{Tolerances, nearly_equal};
use ef_core::units::{m, m3ps, s};
use ef_plant::{Facility, RunInput, RunOptions, Stage};
use ef_streams::{Basis, Component, ComponentMap};
use ef_units::{
    BendConfig, Connector, HeadPump, PipeConfig, Process, ProcessConfig, ValveConfig,
};
use proptest::prelude::*;

fn unit(efficiency: f64, kwh_per_day: f64) -> ProcessConfig {
    ProcessConfig {
        efficiency,
        power_consumption_rate: kwh_per_day,
        power_consumption_unit: PowerUnit::KilowattHourPerDay,
        ..Default::default()
    }
}

fn plant() -> Facility {
    Facility::new("Ethanol plant")
        .with_pump(HeadPump::new("Feed pump", 5.0, 0.7).unwrap())
        .with_stage(Process::fermentation(unit(0.85, 240.0)).unwrap())
        .with_stage(Connector::pipe(PipeConfig::default()).unwrap())
        .with_stage(Process::filtration(unit(0.95, 48.0)).unwrap())
        .with_stage(Connector::bend(BendConfig::default()).unwrap())
        .with_stage(Process::distillation(unit(0.9, 480.0)).unwrap())
        .with_stage(
            Connector::valve(ValveConfig {
                resistance_coefficient: 0.2,
                ..Default::default()
            })
            .unwrap(),
        )
        .with_stage(Process::dehydration(unit(0.98, 96.0)).unwrap())
}

fn feed(q: f64) -> RunInput {
    RunInput::new(ComponentMap::from_values(0.0, 0.7, 0.2, 0.1), m3ps(q))
}

#[test]
fn full_train_produces_ethanol() {
    let mut facility = plant();
    let run = facility.run(&feed(0.01), RunOptions::default()).unwrap();

    let tol = Tolerances::default();
    assert_eq!(run.volumetric.basis(), Basis::Volumetric);
    assert_eq!(run.mass.basis(), Basis::Mass);
    assert!(run.volumetric.is_consistent(tol));
    assert!(run.mass.is_consistent(tol));

    let x_ethanol = run.mass.composition().get(Component::Ethanol).unwrap();
    assert!(x_ethanol > 0.8, "ethanol mass fraction {x_ethanol}");
    assert!(run.ethanol_energy_rate().value > 0.0);

    // the two views describe the same stream
    for c in Component::ALL {
        let v = run.volumetric.amount().get(c).unwrap();
        let mdot = run.mass.amount().get(c).unwrap();
        assert!(nearly_equal(mdot, v * c.density_kgpm3(), tol));
    }
}

#[test]
fn total_power_is_sum_of_contributions() {
    let mut facility = plant();
    let run = facility
        .run(&feed(0.01).with_interval(s(3600.0)), RunOptions::default())
        .unwrap();

    assert_eq!(run.contributions.len(), 1 + facility.stages().len());
    assert_eq!(run.contributions[0].kind, "Pump");

    let sum: f64 = run.contributions.iter().map(|c| c.power.value).sum();
    let tol = Tolerances::default();
    assert!(nearly_equal(run.total_power.value, sum, tol));
    assert!(nearly_equal(
        run.total_energy.value,
        run.total_power.value * 3600.0,
        tol
    ));

    // fixed process rates: 240 + 48 + 480 + 96 kWh/day = 36 kW
    let process_power: f64 = run
        .contributions
        .iter()
        .filter(|c| c.kind == "Process")
        .map(|c| c.power.value)
        .sum();
    assert!(nearly_equal(process_power, 36_000.0, tol));
}

#[test]
fn stages_keep_order_and_logs() {
    let mut facility = plant();
    facility.run(&feed(0.01), RunOptions { store_data: true }).unwrap();
    facility.run(&feed(0.02), RunOptions { store_data: true }).unwrap();

    let kinds: Vec<_> = facility.stages().iter().map(Stage::kind).collect();
    assert_eq!(
        kinds,
        ["Process", "Pipe", "Process", "Bend", "Process", "Valve", "Process"]
    );

    let fermenter = facility.stage("Fermentation").unwrap().as_process().unwrap();
    let log = fermenter.log().unwrap();
    assert_eq!(log.inputs.len(Basis::Volumetric), 2);
    assert_eq!(log.consumption.len(), 2);
    let totals = log.inputs.total_series(Basis::Volumetric);
    assert!(totals[1] > totals[0]);
}

#[test]
fn add_stage_extends_a_running_plant() {
    let mut facility = Facility::default();
    facility.add_stage(Process::filtration(unit(0.5, 0.0)).unwrap());
    let first = facility.run(&feed(0.01), RunOptions::default()).unwrap();

    facility.add_stage(
        Connector::pipe(PipeConfig {
            diameter: m(0.05),
            length: m(1.0),
            ..Default::default()
        })
        .unwrap(),
    );
    let second = facility.run(&feed(0.01), RunOptions::default()).unwrap();
    assert!(second.volumetric.total() < first.volumetric.total());
    assert!(second.total_power.value > first.total_power.value);
}

proptest! {
    #[test]
    fn power_is_non_negative(q in 1e-4_f64..0.05, eff in 0.5_f64..1.0) {
        let mut facility = Facility::default()
            .with_stage(Process::fermentation(unit(eff, 24.0)).unwrap())
            .with_stage(Connector::bend(BendConfig::default()).unwrap())
            .with_stage(Process::dehydration(unit(eff, 24.0)).unwrap());
        let run = facility.run(&feed(q), RunOptions::default()).unwrap();
        prop_assert!(run.total_power.value >= 0.0);
        for c in &run.contributions {
            prop_assert!(c.power.value >= 0.0);
        }
        let sum: f64 = run.contributions.iter().map(|c| c.power.value).sum();
        prop_assert!(nearly_equal(run.total_power.value, sum, Tolerances::default()));
    }
}

use std::path::Path;

use ef_core::PowerUnit;
use ef_plant::RunOptions;
use ef_project::{
    PlantDef, ProcessDef, ProjectError, PumpDef, StageDef, StageKind, ValidationError,
    build_facility, from_yaml_str, load_json, load_yaml, plant_run_input, save_json, save_yaml,
};

fn sample_path() -> std::path::PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../../plants/ethanol_plant.yaml")
}

#[test]
fn sample_plant_loads_and_runs() {
    let plant = load_yaml(&sample_path()).unwrap();
    assert_eq!(plant.stages.len(), 7);

    let mut facility = build_facility(&plant).unwrap();
    let input = plant_run_input(&plant).unwrap();
    let run = facility.run(&input, RunOptions { store_data: true }).unwrap();

    assert!(run.total_power.value > 0.0);
    assert!(run.volumetric.total() > 0.0);
    assert!(facility.fixed_cost() > 0.0);
    assert!(facility.recorded_cost() > 0.0);
}

#[test]
fn roundtrip_yaml_simple_plant() {
    let plant = PlantDef {
        version: 1,
        name: "Simple".to_string(),
        pump: PumpDef::Ideal,
        stages: vec![
            StageDef {
                name: "Still".to_string(),
                kind: StageKind::Distillation(ProcessDef {
                    efficiency: 0.9,
                    power_consumption_rate: 5.0,
                    power_consumption_unit: PowerUnit::Kilowatt,
                    ..Default::default()
                }),
            },
            StageDef {
                name: "Valve".to_string(),
                kind: StageKind::Valve {
                    diameter_m: 0.08,
                    resistance_coefficient: 0.5,
                },
            },
        ],
        feed: None,
    };

    let path = std::env::temp_dir().join("ef_project_roundtrip_simple.yaml");
    save_yaml(&path, &plant).unwrap();
    let loaded = load_yaml(&path).unwrap();
    assert_eq!(plant, loaded);

    let path = std::env::temp_dir().join("ef_project_roundtrip_simple.json");
    save_json(&path, &plant).unwrap();
    let loaded = load_json(&path).unwrap();
    assert_eq!(plant, loaded);
}

#[test]
fn defaults_fill_missing_fields() {
    let plant = from_yaml_str(
        r#"
version: 1
name: Defaults
stages:
  - name: Tank
    kind:
      type: Process
  - name: Line
    kind:
      type: Pipe
"#,
    )
    .unwrap();

    assert_eq!(plant.pump, PumpDef::Ideal);
    assert_eq!(plant.stages[0].kind, StageKind::Process(ProcessDef::default()));
    assert_eq!(
        plant.stages[1].kind,
        StageKind::Pipe {
            diameter_m: 0.1,
            length_m: 1.0,
            friction_factor: 0.02,
        }
    );
}

#[test]
fn unknown_stage_type_is_rejected() {
    let err = from_yaml_str(
        r#"
version: 1
name: Bad
stages:
  - name: Reactor
    kind:
      type: Centrifuge
"#,
    )
    .unwrap_err();
    assert!(matches!(err, ProjectError::Yaml(_)));
}

#[test]
fn unknown_power_unit_is_rejected() {
    let err = from_yaml_str(
        r#"
version: 1
name: Bad
stages:
  - name: Still
    kind:
      type: Distillation
      power_consumption_unit: horsepower
"#,
    )
    .unwrap_err();
    assert!(matches!(err, ProjectError::Yaml(_)));
}

#[test]
fn unsupported_version_is_rejected() {
    let err = from_yaml_str("version: 9\nname: Future\n").unwrap_err();
    assert!(matches!(
        err,
        ProjectError::Validation(ValidationError::UnsupportedVersion { version: 9 })
    ));
}

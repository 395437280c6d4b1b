//! Plant validation logic.

use std::collections::HashSet;

use ef_core::numeric::{Tolerances, nearly_equal};
use ef_streams::Component;

use crate::schema::{FeedDef, LATEST_VERSION, PlantDef, PumpDef, StageDef, StageKind};

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Duplicate stage name: {name}")]
    DuplicateName { name: String },

    #[error("Invalid value: {field} = {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Unknown component '{name}' in {context}")]
    UnknownComponent { name: String, context: String },

    #[error("Unsupported version: {version}")]
    UnsupportedVersion { version: u32 },
}

pub fn validate_plant(plant: &PlantDef) -> Result<(), ValidationError> {
    if plant.version == 0 || plant.version > LATEST_VERSION {
        return Err(ValidationError::UnsupportedVersion {
            version: plant.version,
        });
    }

    validate_pump(&plant.pump)?;

    let mut names = HashSet::new();
    for stage in &plant.stages {
        if !names.insert(stage.name.as_str()) {
            return Err(ValidationError::DuplicateName {
                name: stage.name.clone(),
            });
        }
        validate_stage(stage)?;
    }

    if let Some(feed) = &plant.feed {
        validate_feed(feed)?;
    }

    Ok(())
}

fn validate_pump(pump: &PumpDef) -> Result<(), ValidationError> {
    match pump {
        PumpDef::Ideal => Ok(()),
        PumpDef::Head {
            head_m,
            eta,
            rated_flow_m3ps,
            ..
        } => {
            non_negative("pump.head_m", *head_m)?;
            finite("pump.eta", *eta)?;
            if *eta <= 0.0 || *eta > 1.0 {
                return Err(invalid("pump.eta", *eta, "must be in (0, 1]"));
            }
            if let Some(q) = rated_flow_m3ps {
                non_negative("pump.rated_flow_m3ps", *q)?;
            }
            Ok(())
        }
    }
}

fn validate_stage(stage: &StageDef) -> Result<(), ValidationError> {
    let field = |f: &str| format!("stage '{}'.{}", stage.name, f);

    if let Some(p) = stage.kind.process() {
        finite(&field("efficiency"), p.efficiency)?;
        finite(&field("power_consumption_rate"), p.power_consumption_rate)?;
        finite(&field("cost_usd"), p.cost_usd)?;
        finite(&field("cost_per_flow_usd"), p.cost_per_flow_usd)?;
        return Ok(());
    }

    match &stage.kind {
        StageKind::Pipe {
            diameter_m,
            length_m,
            friction_factor,
        } => {
            non_negative(&field("diameter_m"), *diameter_m)?;
            non_negative(&field("length_m"), *length_m)?;
            non_negative(&field("friction_factor"), *friction_factor)?;
        }
        StageKind::Bend {
            diameter_m,
            bend_factor,
            bend_radius_m,
        } => {
            non_negative(&field("diameter_m"), *diameter_m)?;
            finite(&field("bend_factor"), *bend_factor)?;
            non_negative(&field("bend_radius_m"), *bend_radius_m)?;
        }
        StageKind::Valve {
            diameter_m,
            resistance_coefficient,
        } => {
            non_negative(&field("diameter_m"), *diameter_m)?;
            non_negative(&field("resistance_coefficient"), *resistance_coefficient)?;
        }
        _ => {}
    }
    Ok(())
}

fn validate_feed(feed: &FeedDef) -> Result<(), ValidationError> {
    let mut seen = HashSet::new();
    for (name, fraction) in &feed.composition {
        let component: Component = name.parse().map_err(|_| ValidationError::UnknownComponent {
            name: name.clone(),
            context: "feed composition".to_string(),
        })?;
        if !seen.insert(component) {
            return Err(invalid(
                "feed.composition",
                name,
                "component listed more than once",
            ));
        }
        non_negative(&format!("feed.composition.{name}"), *fraction)?;
    }

    for component in Component::ALL {
        if !seen.contains(&component) {
            return Err(invalid(
                "feed.composition",
                component.key(),
                "every component must be given",
            ));
        }
    }

    let sum: f64 = feed.composition.values().sum();
    if !nearly_equal(sum, 1.0, Tolerances::input()) {
        return Err(invalid("feed.composition", sum, "fractions must sum to 1"));
    }

    finite("feed.flow_m3ps", feed.flow_m3ps)?;
    if feed.flow_m3ps <= 0.0 {
        return Err(invalid("feed.flow_m3ps", feed.flow_m3ps, "must be positive"));
    }
    non_negative("feed.interval_s", feed.interval_s)?;
    Ok(())
}

fn invalid(field: &str, value: impl ToString, reason: &str) -> ValidationError {
    ValidationError::InvalidValue {
        field: field.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

fn finite(field: &str, value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() {
        return Err(invalid(field, value, "must be finite"));
    }
    Ok(())
}

fn non_negative(field: &str, value: f64) -> Result<(), ValidationError> {
    finite(field, value)?;
    if value < 0.0 {
        return Err(invalid(field, value, "must be non-negative"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::ProcessDef;
    use std::collections::BTreeMap;

    fn plant() -> PlantDef {
        PlantDef {
            version: LATEST_VERSION,
            name: "Test".to_string(),
            pump: PumpDef::Ideal,
            stages: vec![StageDef {
                name: "F-1".to_string(),
                kind: StageKind::Filtration(ProcessDef::default()),
            }],
            feed: None,
        }
    }

    fn feed(pairs: &[(&str, f64)]) -> FeedDef {
        FeedDef {
            composition: pairs
                .iter()
                .map(|(k, v)| (k.to_string(), *v))
                .collect::<BTreeMap<_, _>>(),
            flow_m3ps: 0.01,
            interval_s: 1.0,
        }
    }

    #[test]
    fn accepts_minimal_plant() {
        validate_plant(&plant()).unwrap();
    }

    #[test]
    fn rejects_future_version() {
        let mut p = plant();
        p.version = LATEST_VERSION + 1;
        assert!(matches!(
            validate_plant(&p),
            Err(ValidationError::UnsupportedVersion { .. })
        ));
    }

    #[test]
    fn rejects_duplicate_stage_names() {
        let mut p = plant();
        p.stages.push(p.stages[0].clone());
        assert_eq!(
            validate_plant(&p),
            Err(ValidationError::DuplicateName {
                name: "F-1".to_string()
            })
        );
    }

    #[test]
    fn rejects_negative_diameter() {
        let mut p = plant();
        p.stages.push(StageDef {
            name: "P-1".to_string(),
            kind: StageKind::Pipe {
                diameter_m: -0.1,
                length_m: 1.0,
                friction_factor: 0.02,
            },
        });
        assert!(matches!(
            validate_plant(&p),
            Err(ValidationError::InvalidValue { .. })
        ));
    }

    #[test]
    fn rejects_non_finite_efficiency() {
        let mut p = plant();
        p.stages[0].kind = StageKind::Distillation(ProcessDef {
            efficiency: f64::NAN,
            ..Default::default()
        });
        assert!(validate_plant(&p).is_err());
    }

    #[test]
    fn feed_checks() {
        let mut p = plant();
        p.feed = Some(feed(&[("water", 0.7), ("sugar", 0.2), ("fiber", 0.1), ("ethanol", 0.0)]));
        validate_plant(&p).unwrap();

        p.feed = Some(feed(&[("water", 0.7), ("sugar", 0.2), ("fiber", 0.1)]));
        assert!(matches!(
            validate_plant(&p),
            Err(ValidationError::InvalidValue { .. })
        ));

        p.feed = Some(feed(&[("water", 0.7), ("sugar", 0.2), ("fiber", 0.1), ("methanol", 0.0)]));
        assert!(matches!(
            validate_plant(&p),
            Err(ValidationError::UnknownComponent { .. })
        ));

        p.feed = Some(feed(&[("water", 0.7), ("sugar", 0.2), ("fiber", 0.2), ("ethanol", 0.0)]));
        assert!(matches!(
            validate_plant(&p),
            Err(ValidationError::InvalidValue { .. })
        ));
    }

    #[test]
    fn head_pump_efficiency_bounds() {
        let mut p = plant();
        p.pump = PumpDef::Head {
            name: "P".to_string(),
            head_m: 10.0,
            eta: 1.2,
            rated_flow_m3ps: None,
        };
        assert!(validate_plant(&p).is_err());
    }
}

//! ef-project: plant file format, validation and facility builder.

pub mod build;
pub mod schema;
pub mod validate;

pub use build::{build_facility, build_run_input, build_stage, plant_run_input};
pub use schema::*;
pub use validate::{ValidationError, validate_plant};

pub type ProjectResult<T> = Result<T, ProjectError>;

#[derive(thiserror::Error, Debug)]
pub enum ProjectError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Plant has no feed")]
    MissingFeed,

    #[error("Unit error: {0}")]
    Unit(#[from] ef_units::UnitError),

    #[error("Stream error: {0}")]
    Stream(#[from] ef_streams::StreamError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub fn from_yaml_str(content: &str) -> ProjectResult<PlantDef> {
    let plant: PlantDef = serde_yaml::from_str(content)?;
    validate_plant(&plant)?;
    Ok(plant)
}

pub fn load_yaml(path: &std::path::Path) -> ProjectResult<PlantDef> {
    let content = std::fs::read_to_string(path)?;
    from_yaml_str(&content)
}

pub fn save_yaml(path: &std::path::Path, plant: &PlantDef) -> ProjectResult<()> {
    validate_plant(plant)?;
    let content = serde_yaml::to_string(plant)?;
    std::fs::write(path, content)?;
    Ok(())
}

pub fn load_json(path: &std::path::Path) -> ProjectResult<PlantDef> {
    let content = std::fs::read_to_string(path)?;
    let plant: PlantDef = serde_json::from_str(&content)?;
    validate_plant(&plant)?;
    Ok(plant)
}

pub fn save_json(path: &std::path::Path, plant: &PlantDef) -> ProjectResult<()> {
    validate_plant(plant)?;
    let content = serde_json::to_string_pretty(plant)?;
    std::fs::write(path, content)?;
    Ok(())
}

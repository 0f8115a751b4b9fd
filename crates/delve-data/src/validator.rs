use delve_core::config::SimConfig;
use delve_core::error::ConfigError;
use delve_core::material::MaterialTable;
use std::collections::HashSet;
use thiserror::Error;

/// Upper bound on hardness: ten minutes at nominal speed.
pub const MAX_HARDNESS_MS: u32 = 600_000;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Duplicate material ID {0}")]
    DuplicateMaterialId(u8),
    #[error("Material table has no entry for air (ID 0)")]
    MissingAir,
    #[error("Material '{name}' hardness {value}ms exceeds max {max}ms")]
    HardnessExceedsMax { name: String, value: u32, max: u32 },
    #[error("Invalid config: {0}")]
    Config(#[from] ConfigError),
}

/// Validate a material table for completeness and ranges.
pub fn validate_materials(table: &MaterialTable) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    let mut seen_ids = HashSet::new();
    for mat in &table.materials {
        if !seen_ids.insert(mat.id) {
            errors.push(ValidationError::DuplicateMaterialId(mat.id));
        }
    }

    if !seen_ids.contains(&0) {
        errors.push(ValidationError::MissingAir);
    }

    for mat in &table.materials {
        if mat.hardness > MAX_HARDNESS_MS {
            errors.push(ValidationError::HardnessExceedsMax {
                name: mat.name.clone(),
                value: mat.hardness,
                max: MAX_HARDNESS_MS,
            });
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validate simulation tuning values.
pub fn validate_config(config: &SimConfig) -> Result<(), ValidationError> {
    config.validate().map_err(ValidationError::from)
}

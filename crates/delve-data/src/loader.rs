use crate::validator::{validate_config, validate_materials, ValidationError};
use delve_core::config::SimConfig;
use delve_core::material::{MaterialDef, MaterialTable};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Failed to parse materials RON: {0}")]
    MaterialParseError(String),
    #[error("Failed to parse config RON: {0}")]
    ConfigParseError(String),
    #[error("Invalid data: {}", format_errors(.0))]
    Invalid(Vec<ValidationError>),
}

fn format_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Parse a materials RON string into a validated MaterialTable.
pub fn load_materials_from_str(ron_str: &str) -> Result<MaterialTable, LoadError> {
    let options = ron::Options::default();
    let materials: Vec<MaterialDef> = options
        .from_str(ron_str)
        .map_err(|e| LoadError::MaterialParseError(e.to_string()))?;
    let table = MaterialTable { materials };
    validate_materials(&table).map_err(LoadError::Invalid)?;
    log::info!("Loaded {} materials", table.len());
    Ok(table)
}

/// Load and merge several material sources. Later sources may not reuse ids.
pub fn load_all_materials(sources: &[&str]) -> Result<MaterialTable, LoadError> {
    let options = ron::Options::default();
    let mut all_materials = Vec::new();
    for source in sources {
        let materials: Vec<MaterialDef> = options
            .from_str(source)
            .map_err(|e| LoadError::MaterialParseError(e.to_string()))?;
        all_materials.extend(materials);
    }
    let table = MaterialTable {
        materials: all_materials,
    };
    validate_materials(&table).map_err(LoadError::Invalid)?;
    Ok(table)
}

/// Parse a simulation config. Omitted fields take their defaults.
pub fn load_config_from_str(ron_str: &str) -> Result<SimConfig, LoadError> {
    let options = ron::Options::default();
    let config: SimConfig = options
        .from_str(ron_str)
        .map_err(|e| LoadError::ConfigParseError(e.to_string()))?;
    validate_config(&config).map_err(|e| LoadError::Invalid(vec![e]))?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use delve_core::config::TerrainKind;
    use delve_core::types::MaterialId;

    #[test]
    fn test_load_single_material() {
        let ron = r#"[
            (id: 0, name: "Air"),
            (
                id: 1,
                name: "Stone",
                hardness: 1500,
                color: (0.5, 0.5, 0.5),
            ),
        ]"#;
        let table = load_materials_from_str(ron).expect("should parse");
        assert_eq!(table.len(), 2);
        assert_eq!(table.hardness(MaterialId(1)), Some(1500));
        assert_eq!(table.hardness(MaterialId(0)), Some(0));
    }

    #[test]
    fn test_malformed_materials_rejected() {
        let err = load_materials_from_str("[ (id: 1, name: ) ]").expect_err("should fail");
        assert!(matches!(err, LoadError::MaterialParseError(_)));
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let ron = r#"[(id: 0, name: "Air"), (id: 1, name: "A"), (id: 1, name: "B")]"#;
        let err = load_materials_from_str(ron).expect_err("should fail");
        match err {
            LoadError::Invalid(errors) => {
                assert!(errors.contains(&ValidationError::DuplicateMaterialId(1)))
            }
            other => panic!("unexpected error {other}"),
        }
    }

    #[test]
    fn test_load_all_materials_merges() {
        let base = r#"[(id: 0, name: "Air"), (id: 1, name: "Stone", hardness: 1500)]"#;
        let extra = r#"[(id: 9, name: "Crystal", hardness: 4000)]"#;
        let table = load_all_materials(&[base, extra]).expect("should merge");
        assert_eq!(table.len(), 3);
        assert_eq!(table.hardness(MaterialId(9)), Some(4000));

        let clash = r#"[(id: 1, name: "Granite")]"#;
        assert!(load_all_materials(&[base, clash]).is_err());
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config = load_config_from_str("(gravity: 35, terrain: Empty)").expect("should parse");
        assert_eq!(config.gravity, 35);
        assert_eq!(config.terrain, TerrainKind::Empty);
        assert_eq!(config.tick_ms, SimConfig::default().tick_ms);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let err = load_config_from_str("(tick_ms: 0)").expect_err("should fail");
        assert!(matches!(err, LoadError::Invalid(_)));
        let err = load_config_from_str("(gravity: \"high\")").expect_err("should fail");
        assert!(matches!(err, LoadError::ConfigParseError(_)));
    }
}

use crate::types::MaterialId;
use serde::{Deserialize, Serialize};

/// A single material definition loaded from RON data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialDef {
    /// Stable material ID. 0 = air.
    pub id: u8,
    /// Human-readable name for debug display.
    pub name: String,
    /// Milliseconds to break at nominal mining speed (1000).
    #[serde(default)]
    pub hardness: u32,
    /// RGB color (0.0–1.0 per channel), for the rendering collaborator.
    #[serde(default)]
    pub color: (f32, f32, f32),
}

/// Collection of material definitions indexed by ID.
///
/// The table is supplied complete by the data layer. The core only asks
/// it for hardness; a missing entry is handled by the caller.
#[derive(Debug, Clone, Default)]
pub struct MaterialTable {
    pub materials: Vec<MaterialDef>,
}

impl MaterialTable {
    /// Look up a material by ID. Returns None if not found.
    pub fn get(&self, id: MaterialId) -> Option<&MaterialDef> {
        self.materials.iter().find(|m| m.id == id.0)
    }

    /// Hardness in milliseconds at nominal speed.
    pub fn hardness(&self, id: MaterialId) -> Option<u32> {
        self.get(id).map(|m| m.hardness)
    }

    /// Look up a material by name (case-sensitive).
    pub fn by_name(&self, name: &str) -> Option<&MaterialDef> {
        self.materials.iter().find(|m| m.name == name)
    }

    /// Number of materials.
    pub fn len(&self) -> usize {
        self.materials.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }
}

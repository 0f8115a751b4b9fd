use super::within_reach;
use crate::entity::Entity;
use delve_core::config::SimConfig;
use delve_core::material::MaterialTable;
use delve_core::types::WorldCoord;
use delve_world::World;

/// Advance progressive mining by one tick.
///
/// Returns the block that broke this tick. The caller clears it in the
/// world. Progress resets when mining stops, the target changes, the
/// target leaves `reach` or the target is air. A material without a
/// hardness entry never breaks.
pub fn apply_mining(
    entity: &mut Entity,
    world: &World,
    materials: &MaterialTable,
    config: &SimConfig,
) -> Option<WorldCoord> {
    if !entity.intent.mine {
        entity.mining.reset();
        return None;
    }

    let target = entity.intent.target;
    if !within_reach(&entity.body, target, config.reach) {
        entity.mining.reset();
        return None;
    }

    if entity.mining.target != Some(target) {
        entity.mining.progress_ms = 0;
        entity.mining.target = Some(target);
    }

    let voxel = world.voxel_at(target);
    if voxel.is_air() {
        entity.mining.reset();
        return None;
    }

    let Some(hardness) = materials.hardness(voxel.material) else {
        log::warn!(
            "No hardness for material {} at {target}; treating as unbreakable",
            voxel.material.0
        );
        return None;
    };

    // Zero mining speed never finishes.
    let required = (hardness as u64 * 1000).checked_div(entity.body.mining_speed as u64)?;

    entity.mining.progress_ms = entity.mining.progress_ms.saturating_add(config.tick_ms);
    if entity.mining.progress_ms as u64 >= required {
        entity.mining.reset();
        return Some(target);
    }
    None
}

/// Ticks needed to break a block of `hardness` at `mining_speed`.
pub fn ticks_to_break(hardness: u32, mining_speed: u32, tick_ms: u32) -> Option<u64> {
    let required = (hardness as u64 * 1000).checked_div(mining_speed as u64)?;
    Some(required.div_ceil(tick_ms as u64).max(1))
}

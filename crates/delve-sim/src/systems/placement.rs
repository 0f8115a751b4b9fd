use super::within_reach;
use crate::entity::Entity;
use delve_core::config::SimConfig;
use delve_core::constants::FIXED_ONE;
use delve_core::math::fixed_to_block;
use delve_core::types::{MaterialId, WorldCoord};
use delve_core::voxel::Voxel;
use delve_world::World;

/// Validate a placement request for this tick.
///
/// Returns the target and the voxel to write when the target is air,
/// within `reach` blocks (Chebyshev distance from the feet block) and
/// outside the entity's own column. The caller writes the voxel.
pub fn apply_placement(
    entity: &Entity,
    world: &World,
    config: &SimConfig,
) -> Option<(WorldCoord, Voxel)> {
    let intent = &entity.intent;
    if !intent.place || intent.place_material == MaterialId::AIR {
        return None;
    }

    let target = intent.target;
    if !world.voxel_at(target).is_air() {
        return None;
    }

    if !within_reach(&entity.body, target, config.reach) {
        return None;
    }

    if occupies(entity, target) {
        return None;
    }

    Some((target, Voxel::solid(intent.place_material)))
}

/// Whether `block` intersects the entity's column.
pub fn occupies(entity: &Entity, block: WorldCoord) -> bool {
    let body = &entity.body;
    let feet = body.block_position();
    let head = fixed_to_block(body.position.y + body.height * FIXED_ONE - 1);
    block.x == feet.x && block.z == feet.z && (feet.y..=head).contains(&block.y)
}

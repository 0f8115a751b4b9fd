//! Exact grid traversal (DDA) from a continuous ray to the first solid voxel.
//!
//! Every voxel the ray passes through is visited in order, so thin
//! geometry cannot be skipped the way fixed-step sampling can.

use crate::World;
use delve_core::direction::Direction;
use delve_core::types::WorldCoord;
use glam::{IVec3, Vec3};

/// Largest coordinate magnitude a ray may reach. Beyond this `f32` loses
/// whole-voxel precision and voxel indices approach the `i32` limits.
pub const COORD_LIMIT: f32 = 1.0e9;

/// First solid voxel along a ray.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    /// The solid voxel that stopped the ray.
    pub block: WorldCoord,
    /// The voxel entered just before `block`; where a placement goes.
    pub previous: WorldCoord,
    /// Exact impact point on the boundary of `block`.
    pub point: Vec3,
    /// Distance travelled along the (normalized) direction.
    pub distance: f32,
    /// Face of `block` the ray entered through.
    pub face: Direction,
}

/// Walk the grid from `origin` along `direction` until a solid voxel is
/// entered or `max_distance` is exceeded.
///
/// `direction` need not be normalized; distances are measured along its
/// normalized form. The voxel containing `origin` is not tested. A zero
/// direction, a non-finite/negative distance, or a ray that could leave
/// `COORD_LIMIT` is a miss.
pub fn traverse(world: &World, origin: Vec3, direction: Vec3, max_distance: f32) -> Option<RayHit> {
    let dir = direction.normalize_or_zero();
    if dir == Vec3::ZERO || !max_distance.is_finite() || max_distance < 0.0 {
        return None;
    }
    if !origin.is_finite() || origin.abs().max_element() + max_distance > COORD_LIMIT {
        return None;
    }

    let mut voxel = origin.floor().as_ivec3();

    // An axis with a zero component is never crossed; its step is +1 and
    // its crossing distances are infinite.
    let mut step = IVec3::ONE;
    let mut t_delta = Vec3::splat(f32::INFINITY);
    let mut t_max = Vec3::splat(f32::INFINITY);
    for axis in 0..3 {
        let d = dir[axis];
        if d < 0.0 {
            step[axis] = -1;
        }
        if d != 0.0 {
            t_delta[axis] = (1.0 / d).abs();
            let boundary = if step[axis] > 0 {
                (voxel[axis] + 1) as f32
            } else {
                voxel[axis] as f32
            };
            t_max[axis] = (boundary - origin[axis]) / d;
        }
    }

    loop {
        let axis = if t_max.x < t_max.y {
            if t_max.x < t_max.z {
                0
            } else {
                2
            }
        } else if t_max.y < t_max.z {
            1
        } else {
            2
        };

        let distance = t_max[axis];
        if distance > max_distance {
            return None;
        }

        let previous = voxel;
        voxel[axis] += step[axis];
        t_max[axis] += t_delta[axis];

        if world.is_solid(voxel) {
            // Entered through the face pointing back along the step.
            let face = Direction::from_axis_step(axis, step[axis])
                .map(Direction::opposite)
                .unwrap_or(Direction::Up);
            return Some(RayHit {
                block: voxel,
                previous,
                point: origin + dir * distance,
                distance,
                face,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use delve_core::types::MaterialId;
    use delve_core::voxel::Voxel;

    fn world_with(blocks: &[IVec3]) -> World {
        let mut world = World::default();
        for b in blocks {
            world.set_voxel(*b, Voxel::solid(MaterialId(1)));
        }
        world
    }

    #[test]
    fn test_hit_along_x() {
        let world = world_with(&[IVec3::new(3, 0, 0)]);
        let hit = traverse(&world, Vec3::new(0.5, 0.5, 0.5), Vec3::X, 10.0).expect("should hit");
        assert_eq!(hit.block, IVec3::new(3, 0, 0));
        assert_eq!(hit.previous, IVec3::new(2, 0, 0));
        assert!((hit.point.x - 3.0).abs() < 1e-5, "impact x = {}", hit.point.x);
        assert!((hit.distance - 2.5).abs() < 1e-5);
        assert_eq!(hit.face, Direction::West);
    }

    #[test]
    fn test_miss_when_aimed_away() {
        let world = world_with(&[IVec3::new(3, 0, 0)]);
        assert!(traverse(&world, Vec3::new(0.5, 0.5, 0.5), -Vec3::X, 10.0).is_none());
        assert!(traverse(&world, Vec3::new(0.5, 0.5, 0.5), Vec3::Y, 10.0).is_none());
    }

    #[test]
    fn test_miss_beyond_max_distance() {
        let world = world_with(&[IVec3::new(3, 0, 0)]);
        assert!(traverse(&world, Vec3::new(0.5, 0.5, 0.5), Vec3::X, 2.0).is_none());
        assert!(traverse(&world, Vec3::new(0.5, 0.5, 0.5), Vec3::X, 2.5).is_some());
    }

    #[test]
    fn test_unnormalized_direction() {
        let world = world_with(&[IVec3::new(3, 0, 0)]);
        let hit = traverse(&world, Vec3::new(0.5, 0.5, 0.5), Vec3::new(40.0, 0.0, 0.0), 10.0)
            .expect("should hit");
        assert_eq!(hit.block, IVec3::new(3, 0, 0));
        assert!((hit.point.x - 3.0).abs() < 1e-5);
    }

    #[test]
    fn test_negative_direction_and_coordinates() {
        let world = world_with(&[IVec3::new(-4, 0, 0)]);
        let hit = traverse(&world, Vec3::new(0.5, 0.5, 0.5), -Vec3::X, 10.0).expect("should hit");
        assert_eq!(hit.block, IVec3::new(-4, 0, 0));
        assert_eq!(hit.previous, IVec3::new(-3, 0, 0));
        assert!((hit.point.x + 3.0).abs() < 1e-5);
        assert_eq!(hit.face, Direction::East);
    }

    #[test]
    fn test_looking_down_hits_floor() {
        let world = world_with(&[IVec3::new(0, -1, 0)]);
        let hit = traverse(&world, Vec3::new(0.5, 1.7, 0.5), Vec3::NEG_Y, 5.0).expect("should hit");
        assert_eq!(hit.block, IVec3::new(0, -1, 0));
        assert_eq!(hit.previous, IVec3::new(0, 0, 0));
        assert_eq!(hit.face, Direction::Up);
        assert!(hit.point.y.abs() < 1e-5);
    }

    #[test]
    fn test_diagonal_does_not_skip_thin_wall() {
        // A one-voxel-thick diagonal wall of cells at x + z == 4; a
        // fixed-step sampler with step 1.0 can slip between the corners.
        let wall: Vec<IVec3> = (0..=4).map(|x| IVec3::new(x, 0, 4 - x)).collect();
        let world = world_with(&wall);
        let hit = traverse(&world, Vec3::new(0.1, 0.5, 0.2), Vec3::new(1.0, 0.0, 1.0), 10.0)
            .expect("diagonal ray must hit the wall");
        assert_eq!(hit.block.x + hit.block.z, 4);
        let step = hit.block - hit.previous;
        assert_eq!(step.abs().element_sum(), 1, "previous must share a face with the hit");
    }

    #[test]
    fn test_traverse_does_not_allocate() {
        let world = World::default();
        assert!(traverse(&world, Vec3::ZERO, Vec3::new(1.0, 0.3, -0.2), 64.0).is_none());
        assert_eq!(world.chunk_map().loaded_count(), 0);
    }

    #[test]
    fn test_degenerate_inputs_miss() {
        let world = world_with(&[IVec3::new(1, 0, 0)]);
        assert!(traverse(&world, Vec3::splat(0.5), Vec3::ZERO, 10.0).is_none());
        assert!(traverse(&world, Vec3::splat(0.5), Vec3::X, f32::INFINITY).is_none());
        assert!(traverse(&world, Vec3::splat(0.5), Vec3::X, f32::NAN).is_none());
        assert!(traverse(&world, Vec3::splat(0.5), Vec3::X, -1.0).is_none());
    }

    #[test]
    fn test_far_or_non_finite_origin_misses() {
        let world = World::default();
        let far = Vec3::new(3.0e9, 0.5, 0.5);
        assert!(traverse(&world, far, Vec3::X, 10.0).is_none());
        assert!(traverse(&world, -far, -Vec3::X, 10.0).is_none());
        assert!(traverse(&world, Vec3::new(f32::NAN, 0.0, 0.0), Vec3::X, 10.0).is_none());
        assert!(traverse(&world, Vec3::new(0.0, f32::INFINITY, 0.0), Vec3::Y, 10.0).is_none());
        // The reach itself counts toward the limit.
        assert!(traverse(&world, Vec3::new(COORD_LIMIT - 5.0, 0.0, 0.0), Vec3::X, 1000.0).is_none());
    }

    #[test]
    fn test_large_but_valid_origin_hits() {
        let x = 1_000_000;
        let world = world_with(&[IVec3::new(x + 3, 0, 0)]);
        let origin = Vec3::new(x as f32 + 0.5, 0.5, 0.5);
        let hit = traverse(&world, origin, Vec3::X, 10.0).expect("should hit");
        assert_eq!(hit.block, IVec3::new(x + 3, 0, 0));
        assert_eq!(hit.face, Direction::West);
    }
}

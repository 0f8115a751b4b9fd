use delve_core::config::{SimConfig, TerrainKind};
use delve_core::material::MaterialTable;
use delve_core::types::MaterialId;
use delve_core::voxel::Voxel;
use delve_sim::brain::WanderBrain;
use delve_sim::command::Command;
use delve_sim::entity::EntityId;
use delve_sim::error::SimError;
use delve_sim::systems::movement::on_ground;
use delve_sim::Simulation;
use glam::IVec3;

/// First id used for command-driven miners.
pub const MINER_BASE_ID: u32 = 1;
/// First id used for wandering entities.
pub const WALKER_BASE_ID: u32 = 10_000;

const SPAWN_Y: i32 = 30_000;
const WALL_MATERIAL: MaterialId = MaterialId(1);

/// Configuration for a single replay scene.
pub struct SceneConfig {
    pub name: &'static str,
    pub terrain: TerrainKind,
    /// Entities driven by `WanderBrain`.
    pub walkers: u32,
    /// Command-driven entities tunnelling along +X.
    pub miners: u32,
    /// Stone wall `[x0, x1)` in front of the miners, two blocks tall.
    pub wall: Option<(i32, i32)>,
}

/// Return the standard suite of replay scenes.
pub fn standard_scenes() -> Vec<SceneConfig> {
    vec![
        SceneConfig {
            name: "flat-walkers-64",
            terrain: TerrainKind::Flat { height: 4 },
            walkers: 64,
            miners: 0,
            wall: None,
        },
        SceneConfig {
            name: "hills-walkers-256",
            terrain: TerrainKind::Hills {
                base_height: 8,
                amplitude: 6,
            },
            walkers: 256,
            miners: 0,
            wall: None,
        },
        SceneConfig {
            name: "dig-site-16",
            terrain: TerrainKind::Flat { height: 4 },
            walkers: 0,
            miners: 16,
            wall: Some((4, 40)),
        },
        SceneConfig {
            name: "mixed-128",
            terrain: TerrainKind::Hills {
                base_height: 8,
                amplitude: 3,
            },
            walkers: 112,
            miners: 16,
            wall: None,
        },
    ]
}

/// Build the starting state of a scene.
pub fn build_simulation(
    config: &SceneConfig,
    materials: MaterialTable,
) -> Result<Simulation, SimError> {
    let sim_config = SimConfig {
        terrain: config.terrain,
        ..SimConfig::default()
    };
    let mut sim = Simulation::new(sim_config, materials)?;

    for i in 0..config.miners {
        sim.spawn(EntityId(MINER_BASE_ID + i), miner_spawn(i), None)?;
    }

    if let Some((x0, x1)) = config.wall {
        let ground = sim.world().terrain().column_height(0, 0);
        for i in 0..config.miners {
            let z = miner_row(i);
            for x in x0..x1 {
                for y in ground..ground + 2 {
                    sim.world_mut()
                        .set_voxel(IVec3::new(x, y, z), Voxel::solid(WALL_MATERIAL));
                }
            }
        }
        // Setup edits are not part of the replay.
        sim.world_mut().take_dirty_chunks();
    }

    for i in 0..config.walkers {
        let position = IVec3::new(
            (i % 16) as i32 * 3000 + 500,
            SPAWN_Y,
            (i / 16) as i32 * 3000 + 500,
        );
        let brain = Box::new(WanderBrain::new(i.wrapping_mul(2654435761), 40));
        sim.spawn(EntityId(WALKER_BASE_ID + i), position, Some(brain))?;
    }

    Ok(sim)
}

fn miner_row(i: u32) -> i32 {
    -4 - 3 * i as i32
}

fn miner_spawn(i: u32) -> IVec3 {
    IVec3::new(500, SPAWN_Y, miner_row(i) * 1000 + 500)
}

/// Commands for tick `tick`, derived from the current state.
///
/// Each miner digs the first solid block ahead of it (head level first)
/// and walks forward once grounded when the way is clear. Every 200 ticks it places a
/// marker block behind itself.
pub fn scene_commands(config: &SceneConfig, sim: &Simulation, tick: u64) -> Vec<Command> {
    let mut commands = Vec::new();
    for i in 0..config.miners {
        let id = EntityId(MINER_BASE_ID + i);
        let Some(entity) = sim.entity(id) else {
            continue;
        };
        let feet = entity.body.block_position();
        let ahead = feet + IVec3::X;
        let head = ahead + IVec3::Y;
        let world = sim.world();

        let blocked = [head, ahead]
            .into_iter()
            .find(|pos| !world.voxel_at(*pos).is_air());
        match blocked {
            Some(target) => commands.push(Command::Mine {
                entity: id,
                target,
                active: true,
            }),
            None if on_ground(&entity.body, world) => commands.push(Command::Move {
                entity: id,
                move_x: 1000,
                move_z: 0,
            }),
            None => {}
        }

        if tick % 200 == 199 {
            commands.push(Command::Place {
                entity: id,
                target: feet - IVec3::X,
                material: MaterialId(6),
            });
        }
    }
    commands
}

#[cfg(test)]
mod tests {
    use super::*;
    use delve_data::defaults::default_materials;

    #[test]
    fn test_standard_scene_names_unique() {
        let scenes = standard_scenes();
        let mut names: Vec<&str> = scenes.iter().map(|s| s.name).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), scenes.len());
    }

    #[test]
    fn test_dig_site_miners_break_wall() {
        let scenes = standard_scenes();
        let config = scenes
            .iter()
            .find(|s| s.name == "dig-site-16")
            .expect("dig site scene");
        let materials = default_materials().expect("materials");
        let mut sim = build_simulation(config, materials).expect("scene builds");
        assert_eq!(sim.entities().len(), 16);

        let mut broken = 0;
        for tick in 0..600 {
            for command in scene_commands(config, &sim, tick) {
                sim.submit(command);
            }
            broken += sim.tick().broken.len();
        }
        assert!(broken > 0);
    }
}

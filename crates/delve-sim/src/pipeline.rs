use crate::brain::Brain;
use crate::command::{Command, CommandBuffer, PeerCommands};
use crate::entity::{Body, Entity, EntityId};
use crate::error::SimError;
use crate::rng::StateDigest;
use crate::systems::mining::apply_mining;
use crate::systems::movement::{apply_gravity, apply_jump, apply_movement};
use crate::systems::placement::apply_placement;
use delve_core::config::SimConfig;
use delve_core::material::MaterialTable;
use delve_core::types::{ChunkCoord, FixedPos, WorldCoord};
use delve_core::voxel::Voxel;
use delve_world::World;

/// Outcome of one call to [`Simulation::tick`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickReport {
    /// Tick number that ran (or would have run, when paused).
    pub tick: u64,
    /// False when paused without a pending single step.
    pub ran: bool,
    /// Blocks broken by mining, in entity order.
    pub broken: Vec<WorldCoord>,
    /// Blocks placed, in entity order.
    pub placed: Vec<WorldCoord>,
    /// Chunks whose derived data must be rebuilt, sorted.
    pub dirty_chunks: Vec<ChunkCoord>,
}

/// Single struct owning the whole deterministic simulation.
///
/// Each tick runs, in order: command flush, brains, movement/jump/gravity,
/// mining/placement, intent clear. Entities are processed in ascending id
/// order within every phase.
pub struct Simulation {
    world: World,
    /// Sorted by id.
    entities: Vec<Entity>,
    commands: CommandBuffer,
    materials: MaterialTable,
    config: SimConfig,
    tick_count: u64,
    paused: bool,
    single_step_requested: bool,
}

impl Simulation {
    /// Create a simulation with terrain generated from `config`.
    pub fn new(config: SimConfig, materials: MaterialTable) -> Result<Self, SimError> {
        let world = World::from_config(&config);
        Self::with_world(config, materials, world)
    }

    pub fn with_world(
        config: SimConfig,
        materials: MaterialTable,
        world: World,
    ) -> Result<Self, SimError> {
        config.validate()?;
        Ok(Self {
            world,
            entities: Vec::new(),
            commands: CommandBuffer::new(),
            materials,
            config,
            tick_count: 0,
            paused: false,
            single_step_requested: false,
        })
    }

    /// Add an entity at a fixed-point position with config defaults.
    pub fn spawn(
        &mut self,
        id: EntityId,
        position: FixedPos,
        brain: Option<Box<dyn Brain>>,
    ) -> Result<EntityId, SimError> {
        let index = match self.entities.binary_search_by_key(&id, |e| e.id) {
            Ok(_) => return Err(SimError::DuplicateEntity(id)),
            Err(index) => index,
        };
        let mut entity = Entity::new(id, Body::new(position, &self.config));
        entity.brain = brain;
        self.entities.insert(index, entity);
        log::info!("Spawned entity {id} at {position}");
        Ok(id)
    }

    pub fn despawn(&mut self, id: EntityId) -> Option<Entity> {
        let index = self.entities.binary_search_by_key(&id, |e| e.id).ok()?;
        log::info!("Despawned entity {id}");
        Some(self.entities.remove(index))
    }

    /// Queue a command for the next tick.
    pub fn submit(&mut self, command: Command) {
        self.commands.add(command);
    }

    /// Queue a lockstep tick's worth of peer commands in merged order.
    pub fn submit_peers(&mut self, peers: &mut PeerCommands) {
        peers.drain_into(&mut self.commands);
    }

    /// Advance one tick. Does nothing while paused unless a single step was
    /// requested; queued commands then wait for the next tick that runs.
    pub fn tick(&mut self) -> TickReport {
        if self.paused && !self.single_step_requested {
            return TickReport {
                tick: self.tick_count,
                ..TickReport::default()
            };
        }
        self.single_step_requested = false;

        let tick = self.tick_count;
        let mut report = TickReport {
            tick,
            ran: true,
            ..TickReport::default()
        };

        self.commands.flush_all(&mut self.entities);

        for entity in &mut self.entities {
            if let Some(brain) = entity.brain.as_mut() {
                brain.decide(entity.id, &entity.body, &self.world, tick, &mut entity.intent);
            }
        }

        for entity in &mut self.entities {
            let intent = entity.intent;
            apply_movement(&mut entity.body, &self.world, intent.move_x, intent.move_z);
            apply_jump(&mut entity.body, &intent, &self.world);
            apply_gravity(
                &mut entity.body,
                &self.world,
                self.config.gravity,
                self.config.max_fall_speed,
            );
        }

        for entity in &mut self.entities {
            if let Some(pos) = apply_mining(entity, &self.world, &self.materials, &self.config) {
                self.world.set_voxel(pos, Voxel::AIR);
                report.broken.push(pos);
            }
            if let Some((pos, voxel)) = apply_placement(entity, &self.world, &self.config) {
                self.world.set_voxel(pos, voxel);
                report.placed.push(pos);
            }
        }

        for entity in &mut self.entities {
            entity.intent.clear();
        }

        report.dirty_chunks = self.world.take_dirty_chunks();
        self.tick_count += 1;
        report
    }

    /// Run `n` ticks, returning the report of each.
    pub fn run(&mut self, n: u64) -> Vec<TickReport> {
        (0..n).map(|_| self.tick()).collect()
    }

    /// Hash of every entity and every loaded chunk. Equal digests after the
    /// same command stream mean the runs agree.
    pub fn state_digest(&self) -> u64 {
        let mut d = StateDigest::new();
        d.write_u64(self.tick_count);

        d.write_u32(self.entities.len() as u32);
        for e in &self.entities {
            d.write_u32(e.id.0);
            let b = &e.body;
            for v in [
                b.position.x,
                b.position.y,
                b.position.z,
                b.yaw,
                b.pitch,
                b.velocity_y,
                b.speed,
                b.jump_force,
                b.height,
            ] {
                d.write_i32(v);
            }
            d.write_u32(b.mining_speed);
            d.write_u32(e.mining.progress_ms);
            match e.mining.target {
                Some(t) => {
                    d.write_u8(1);
                    d.write_i32(t.x);
                    d.write_i32(t.y);
                    d.write_i32(t.z);
                }
                None => d.write_u8(0),
            }
        }

        let coords = self.world.chunk_coords();
        d.write_u32(coords.len() as u32);
        for coord in coords {
            let Some(chunk) = self.world.chunk(coord) else {
                continue;
            };
            d.write_i32(coord.x);
            d.write_i32(coord.y);
            d.write_i32(coord.z);
            for voxel in chunk.voxels() {
                d.write_u8(voxel.material.0);
                d.write_u16(voxel.shape.0);
            }
            for (key, cell) in chunk.sub_cell_entries() {
                d.write_u64(key);
                d.write_u8(cell.shape);
                d.write_u8(cell.material.0);
                d.write_u8(cell.orientation.index());
            }
        }
        d.finish()
    }

    pub fn entity(&self, id: EntityId) -> Option<&Entity> {
        self.entities
            .binary_search_by_key(&id, |e| e.id)
            .ok()
            .map(|i| &self.entities[i])
    }

    pub fn entity_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        let index = self.entities.binary_search_by_key(&id, |e| e.id).ok()?;
        Some(&mut self.entities[index])
    }

    /// All entities in id order.
    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    /// Direct world access for setup and tests. Gameplay edits go through
    /// commands.
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn materials(&self) -> &MaterialTable {
        &self.materials
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Commands waiting for the next tick.
    pub fn pending_commands(&self) -> &[Command] {
        self.commands.commands()
    }

    pub fn pause(&mut self) {
        self.paused = true;
    }

    pub fn resume(&mut self) {
        self.paused = false;
    }

    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
    }

    /// Run exactly one tick on the next `tick` call while paused.
    pub fn single_step(&mut self) {
        self.single_step_requested = true;
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Ticks run so far.
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }
}

//! Autonomous decision sources for entities not driven by input.
//!
//! Brains run after commands are flushed and may overwrite intent. They
//! must be deterministic: any randomness comes from `sim_hash` over
//! simulation state, never from the host.

use crate::entity::{Body, EntityId};
use crate::intent::Intent;
use crate::rng::sim_hash;
use crate::systems::movement::column_blocked;
use delve_core::constants::FIXED_ONE;
use delve_world::World;
use glam::IVec3;
use std::fmt::Debug;

pub trait Brain: Debug {
    /// Mutate `intent` for this tick. `world` is read-only.
    fn decide(&mut self, id: EntityId, body: &Body, world: &World, tick: u64, intent: &mut Intent);
}

/// Does nothing; leaves command-driven intent untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdleBrain;

impl Brain for IdleBrain {
    fn decide(&mut self, _id: EntityId, _body: &Body, _world: &World, _tick: u64, _intent: &mut Intent) {}
}

/// Walks in a direction chosen every `interval` ticks, and jumps when the
/// block ahead is solid.
#[derive(Debug, Clone, Copy)]
pub struct WanderBrain {
    seed: u32,
    interval: u64,
    heading: (i32, i32),
}

impl WanderBrain {
    pub fn new(seed: u32, interval: u64) -> Self {
        Self {
            seed,
            interval: interval.max(1),
            heading: (0, 0),
        }
    }

    pub fn heading(&self) -> (i32, i32) {
        self.heading
    }

    fn choose_heading(&self, id: EntityId, tick: u64) -> (i32, i32) {
        let h = sim_hash(id.0 as i32, self.seed as i32, 0, tick as u32);
        match h % 5 {
            0 => (0, 0),
            1 => (FIXED_ONE, 0),
            2 => (-FIXED_ONE, 0),
            3 => (0, FIXED_ONE),
            _ => (0, -FIXED_ONE),
        }
    }
}

impl Brain for WanderBrain {
    fn decide(&mut self, id: EntityId, body: &Body, world: &World, tick: u64, intent: &mut Intent) {
        if tick % self.interval == 0 {
            self.heading = self.choose_heading(id, tick);
        }
        let (move_x, move_z) = self.heading;
        if move_x == 0 && move_z == 0 {
            return;
        }
        intent.set_move(move_x, move_z);

        // One full block ahead at feet level.
        let ahead = body.position + IVec3::new(move_x, 0, move_z);
        if column_blocked(world, ahead, 1) {
            intent.jump = true;
        }
    }
}

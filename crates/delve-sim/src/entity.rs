use crate::brain::Brain;
use crate::intent::Intent;
use delve_core::config::SimConfig;
use delve_core::math::fixed_to_block_pos;
use delve_core::types::{FixedPos, WorldCoord};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique entity identifier. Entities are processed in ascending id order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EntityId(pub u32);

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Physical state of an entity. Position is the center of the feet in
/// fixed-point (x1000) world units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Body {
    pub position: FixedPos,
    /// Degrees.
    pub yaw: i32,
    /// Degrees.
    pub pitch: i32,
    /// Fixed-point units per tick, positive is up.
    pub velocity_y: i32,
    /// Horizontal displacement per tick at full move intent.
    pub speed: i32,
    pub jump_force: i32,
    /// 1000 is nominal.
    pub mining_speed: u32,
    /// Whole blocks.
    pub height: i32,
}

impl Body {
    pub fn new(position: FixedPos, config: &SimConfig) -> Self {
        Self {
            position,
            yaw: 0,
            pitch: 0,
            velocity_y: 0,
            speed: config.default_speed,
            jump_force: config.default_jump_force,
            mining_speed: config.default_mining_speed,
            height: config.entity_height,
        }
    }

    /// Block containing the feet.
    pub fn block_position(&self) -> WorldCoord {
        fixed_to_block_pos(self.position)
    }
}

/// Progress on the block currently being mined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MiningState {
    pub progress_ms: u32,
    pub target: Option<WorldCoord>,
}

impl MiningState {
    pub fn reset(&mut self) {
        *self = MiningState::default();
    }
}

/// A simulated actor.
#[derive(Debug)]
pub struct Entity {
    pub id: EntityId,
    pub body: Body,
    pub intent: Intent,
    pub mining: MiningState,
    /// Autonomous decision source. `None` for entities driven by commands only.
    pub brain: Option<Box<dyn Brain>>,
}

impl Entity {
    pub fn new(id: EntityId, body: Body) -> Self {
        Self {
            id,
            body,
            intent: Intent::default(),
            mining: MiningState::default(),
            brain: None,
        }
    }

    pub fn with_brain(mut self, brain: Box<dyn Brain>) -> Self {
        self.brain = Some(brain);
        self
    }
}

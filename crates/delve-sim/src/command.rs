//! Commands: the only way external input reaches entity state.
//!
//! Input layers (local keyboard, network peers, replays) produce commands.
//! The buffer applies them to entity intent in arrival order at the start
//! of a tick, so every participant that receives the same ordered stream
//! reaches the same intent before any physics runs.

use crate::entity::{Entity, EntityId};
use crate::intent::Intent;
use delve_core::types::{MaterialId, WorldCoord};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    /// Fixed-point move vector, 1000 = full speed per axis.
    Move {
        entity: EntityId,
        move_x: i32,
        move_z: i32,
    },
    Jump {
        entity: EntityId,
    },
    /// Progressive mining of `target`. `active: false` releases it.
    Mine {
        entity: EntityId,
        target: WorldCoord,
        active: bool,
    },
    Place {
        entity: EntityId,
        target: WorldCoord,
        material: MaterialId,
    },
}

impl Command {
    pub fn entity(&self) -> EntityId {
        match *self {
            Command::Move { entity, .. }
            | Command::Jump { entity }
            | Command::Mine { entity, .. }
            | Command::Place { entity, .. } => entity,
        }
    }

    /// Write this command into an intent. Later commands overwrite the
    /// fields earlier ones set.
    pub fn apply_to(&self, intent: &mut Intent) {
        match *self {
            Command::Move { move_x, move_z, .. } => intent.set_move(move_x, move_z),
            Command::Jump { .. } => intent.jump = true,
            Command::Mine { target, active, .. } => {
                intent.mine = active;
                intent.target = target;
            }
            Command::Place {
                target, material, ..
            } => {
                intent.place = true;
                intent.target = target;
                intent.place_material = material;
            }
        }
    }
}

/// FIFO queue of commands awaiting the next tick.
#[derive(Debug, Clone, Default)]
pub struct CommandBuffer {
    commands: Vec<Command>,
}

impl CommandBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, command: Command) {
        self.commands.push(command);
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Pending commands in arrival order.
    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    /// Apply every buffered command addressed to `entity`, in arrival
    /// order, and remove them. Commands for other entities stay queued.
    pub fn flush(&mut self, entity: &mut Entity) {
        let id = entity.id;
        self.commands.retain(|command| {
            if command.entity() == id {
                command.apply_to(&mut entity.intent);
                false
            } else {
                true
            }
        });
    }

    /// Apply every buffered command to its entity in arrival order, then
    /// empty the buffer. `entities` must be sorted by id. Commands for
    /// unknown entities are dropped.
    pub fn flush_all(&mut self, entities: &mut [Entity]) {
        for command in self.commands.drain(..) {
            let id = command.entity();
            match entities.binary_search_by_key(&id, |e| e.id) {
                Ok(index) => command.apply_to(&mut entities[index].intent),
                Err(_) => log::debug!("Dropping {command:?}: no entity {id}"),
            }
        }
    }
}

/// Peer identifier in a lockstep session.
pub type PeerId = u32;

/// Per-peer command streams collected for one tick.
///
/// Peers may deliver in any interleaving; the merged order is by peer id,
/// then by each peer's own submission order.
#[derive(Debug, Clone, Default)]
pub struct PeerCommands {
    streams: BTreeMap<PeerId, Vec<Command>>,
}

impl PeerCommands {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn submit(&mut self, peer: PeerId, command: Command) {
        self.streams.entry(peer).or_default().push(command);
    }

    pub fn len(&self) -> usize {
        self.streams.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Move all collected commands into `buffer` in merged order.
    pub fn drain_into(&mut self, buffer: &mut CommandBuffer) {
        for (_, stream) in std::mem::take(&mut self.streams) {
            for command in stream {
                buffer.add(command);
            }
        }
    }
}

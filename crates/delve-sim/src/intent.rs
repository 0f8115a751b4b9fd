use delve_core::constants::FIXED_ONE;
use delve_core::types::{MaterialId, WorldCoord};
use serde::{Deserialize, Serialize};

/// What an entity wants to do this tick.
///
/// Written by commands and brains, read by the systems, then cleared once
/// at the end of the tick. The move vector is fixed-point where 1000 is
/// full speed along that axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Intent {
    pub move_x: i32,
    pub move_z: i32,
    pub jump: bool,
    pub mine: bool,
    pub place: bool,
    /// Block targeted by mining or placement.
    pub target: WorldCoord,
    pub place_material: MaterialId,
}

impl Intent {
    /// Set the move vector, clamping each axis to full speed.
    pub fn set_move(&mut self, move_x: i32, move_z: i32) {
        self.move_x = move_x.clamp(-FIXED_ONE, FIXED_ONE);
        self.move_z = move_z.clamp(-FIXED_ONE, FIXED_ONE);
    }

    /// Whether any action is requested.
    pub fn is_idle(&self) -> bool {
        self.move_x == 0 && self.move_z == 0 && !self.jump && !self.mine && !self.place
    }

    pub fn clear(&mut self) {
        *self = Intent::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::IVec3;

    #[test]
    fn test_clear_resets_everything() {
        let mut intent = Intent {
            move_x: 500,
            move_z: -1000,
            jump: true,
            mine: true,
            place: true,
            target: IVec3::new(1, 2, 3),
            place_material: MaterialId(4),
        };
        assert!(!intent.is_idle());
        intent.clear();
        assert_eq!(intent, Intent::default());
        assert!(intent.is_idle());
    }

    #[test]
    fn test_set_move_clamps() {
        let mut intent = Intent::default();
        intent.set_move(5000, -5000);
        assert_eq!((intent.move_x, intent.move_z), (1000, -1000));
        intent.set_move(250, 0);
        assert_eq!((intent.move_x, intent.move_z), (250, 0));
    }
}

pub mod collision;
pub mod config;
pub mod constants;
pub mod direction;
pub mod error;
pub mod material;
pub mod math;
pub mod shape;
pub mod types;
pub mod voxel;

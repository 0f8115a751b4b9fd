pub mod defaults;
pub mod loader;
pub mod validator;

pub use loader::{load_config_from_str, load_materials_from_str, LoadError};

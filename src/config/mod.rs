mod r#impl;
mod structs;
pub mod validators;

pub use r#impl::{load_config, load_config_from};
pub use structs::*;

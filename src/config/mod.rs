//! Configuration module.

mod error;
mod loader;
mod types;

pub use error::*;
pub use loader::*;
pub use types::*;

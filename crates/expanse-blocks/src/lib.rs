//! Block handles and the block registry used by chunk columns and carvers.
#![forbid(unsafe_code)]

pub mod config;
pub mod error;
pub mod registry;
pub mod types;

pub use error::BlockConfigError;
pub use registry::{BlockRegistry, BlockType};
pub use types::{Block, BlockId, BlockState};

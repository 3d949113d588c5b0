//! World carvers for the taller expanse world: the blue hole pit and the two
//! scaled ravine variants, run against a shared per-chunk carve mask.
#![forbid(unsafe_code)]

pub mod carver;
pub mod config;
pub mod context;
pub mod error;
pub mod mask;
pub mod random;
pub mod set;
pub mod shapes;
pub mod variants;
pub mod writer;

pub use carver::{CarveOutcome, CarvePhase, CarveRun, Carver, ConfiguredCarver};
pub use config::{CanyonConfig, CarversConfig, PitConfig};
pub use context::CarveContext;
pub use error::CarverConfigError;
pub use mask::CarveMask;
pub use random::{FloatProvider, IntRange, LegacyRandom, RandomSource};
pub use set::{CarverSet, CarverStats, ChunkCarveReport};
pub use shapes::{CanyonScaling, CanyonShape, CanyonStart, FootprintShape, PitShape};
pub use writer::CarveWriter;

//! Vertical anchor rescaling for placement definitions.
//!
//! Placement definitions describe heights relative to the original -64..320
//! world. [`PlacementRescaler`] walks their configuration trees and rewrites
//! every anchor object into an `absolute` anchor projected onto the taller
//! range described by a [`ScaleRange`].
#![forbid(unsafe_code)]

pub mod anchor;
pub mod codec;
pub mod config;
pub mod error;
pub mod guard;
pub mod range;
pub mod rescale;
pub mod rewrite;

pub use anchor::{AnchorShape, HeightAnchor};
pub use codec::{HeightProvider, HeightRangeModifier, PlacedFeature, PlacedFeatureCodec, TreeCodec, TypedHeight};
pub use config::HeightsConfig;
pub use error::{AnchorWireError, CodecError, RegistryError, RescaleError, ScaleRangeError};
pub use guard::{OneShotRescaler, ReloadGuard};
pub use range::{ScaleProfile, ScaleRange};
pub use rescale::{PlacementCodec, PlacementRegistry, PlacementRescaler, RescaleReport, rescale_all};
pub use rewrite::rewrite;

/// A node of a placement configuration tree (ordered objects, arrays, primitives).
pub type ConfigNode = serde_json::Value;

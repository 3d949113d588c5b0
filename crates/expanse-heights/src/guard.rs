use std::sync::atomic::{AtomicBool, Ordering};

use crate::rescale::{PlacementCodec, PlacementRegistry, PlacementRescaler, RescaleReport};

/// Marks a registry snapshot as already rescaled.
///
/// Rescaling is not idempotent: an `absolute` anchor produced by one pass
/// would be scaled again by the next. A fresh guard goes with every freshly
/// loaded snapshot.
#[derive(Debug, Default)]
pub struct ReloadGuard {
    applied: AtomicBool,
}

impl ReloadGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` exactly once.
    pub fn try_claim(&self) -> bool {
        !self.applied.swap(true, Ordering::AcqRel)
    }

    pub fn is_applied(&self) -> bool {
        self.applied.load(Ordering::Acquire)
    }
}

/// Reload listener that rescales one tag at most once per snapshot.
#[derive(Debug)]
pub struct OneShotRescaler {
    rescaler: PlacementRescaler,
    tag: String,
    guard: ReloadGuard,
}

impl OneShotRescaler {
    pub fn new(rescaler: PlacementRescaler, tag: impl Into<String>) -> Self {
        Self { rescaler, tag: tag.into(), guard: ReloadGuard::new() }
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Runs the rescale pass the first time it is called; `None` on every later call.
    pub fn on_reload<R, C>(&self, registry: &mut R, codec: &C) -> Option<RescaleReport>
    where
        R: PlacementRegistry,
        C: PlacementCodec<R::Definition>,
    {
        if !self.guard.try_claim() {
            log::debug!("placements for tag {} already rescaled, ignoring reload", self.tag);
            return None;
        }
        Some(self.rescaler.rescale_tag(registry, codec, &self.tag))
    }
}

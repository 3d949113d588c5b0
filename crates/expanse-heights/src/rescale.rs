use std::collections::BTreeSet;

use indexmap::IndexMap;

use crate::ConfigNode;
use crate::error::{CodecError, RegistryError, RescaleError};
use crate::range::ScaleRange;
use crate::rewrite::rewrite;

/// The host's store of placement definitions, grouped by tag.
pub trait PlacementRegistry {
    type Definition;

    /// Every `(name, definition)` pair carrying `tag`, or `None` if the tag is unknown.
    fn lookup(&self, tag: &str) -> Option<Vec<(String, Self::Definition)>>;

    fn replace(&mut self, name: &str, definition: Self::Definition) -> Result<(), RegistryError>;
}

/// Bidirectional mapping between a stored definition and its configuration tree.
pub trait PlacementCodec<D> {
    fn encode(&self, definition: &D) -> Result<ConfigNode, CodecError>;
    fn decode(&self, node: ConfigNode) -> Result<D, CodecError>;
}

/// Outcome of one reload pass over a tag.
#[derive(Debug, Default)]
pub struct RescaleReport {
    pub changed: BTreeSet<String>,
    pub unchanged: usize,
    pub skipped: Vec<(String, RescaleError)>,
}

impl RescaleReport {
    pub fn visited(&self) -> usize {
        self.changed.len() + self.unchanged + self.skipped.len()
    }

    pub fn is_empty(&self) -> bool {
        self.visited() == 0
    }
}

/// Rewrites each definition's tree and replaces those that changed.
///
/// Returns the names of the replaced definitions. Definitions whose trees
/// contain no well-formed anchors are left untouched.
pub fn rescale_all(definitions: &mut IndexMap<String, ConfigNode>, range: &ScaleRange) -> BTreeSet<String> {
    let mut changed = BTreeSet::new();
    for (name, tree) in definitions.iter_mut() {
        let mut candidate = tree.clone();
        if rewrite(&mut candidate, range) {
            *tree = candidate;
            changed.insert(name.clone());
        }
    }
    changed
}

#[derive(Clone, Copy, Debug, Default)]
pub struct PlacementRescaler {
    range: ScaleRange,
}

impl PlacementRescaler {
    pub fn new(range: ScaleRange) -> Self {
        Self { range }
    }

    pub fn range(&self) -> &ScaleRange {
        &self.range
    }

    /// Rescales every definition carrying `tag` in `registry`.
    ///
    /// A definition that fails to encode, decode, or be replaced stays as it
    /// was and is listed in [`RescaleReport::skipped`]; the pass continues.
    pub fn rescale_tag<R, C>(&self, registry: &mut R, codec: &C, tag: &str) -> RescaleReport
    where
        R: PlacementRegistry,
        C: PlacementCodec<R::Definition>,
    {
        let mut report = RescaleReport::default();
        let Some(entries) = registry.lookup(tag) else {
            log::debug!("tag {tag} not present, nothing to rescale");
            return report;
        };

        for (name, definition) in entries {
            match self.rescale_one(registry, codec, &name, &definition) {
                Ok(true) => {
                    report.changed.insert(name);
                }
                Ok(false) => report.unchanged += 1,
                Err(err) => {
                    log::debug!("skipping placement {name}: {err}");
                    report.skipped.push((name, err));
                }
            }
        }
        report
    }

    fn rescale_one<R, C>(
        &self,
        registry: &mut R,
        codec: &C,
        name: &str,
        definition: &R::Definition,
    ) -> Result<bool, RescaleError>
    where
        R: PlacementRegistry,
        C: PlacementCodec<R::Definition>,
    {
        let mut tree = codec.encode(definition).map_err(RescaleError::Encode)?;
        if !rewrite(&mut tree, &self.range) {
            return Ok(false);
        }
        let rescaled = codec.decode(tree).map_err(RescaleError::Decode)?;
        registry.replace(name, rescaled).map_err(RescaleError::Replace)?;
        Ok(true)
    }
}

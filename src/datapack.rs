//! A datapack directory used as the placement registry.
//!
//! Definitions live in `<pack>/placed_feature/**/*.json` and are named by
//! their path relative to that directory, without extension. Tags live in
//! `<pack>/tags/placed_feature/**/*.json` as `{"values": [...]}`.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use expanse_heights::{PlacedFeature, PlacementRegistry, RegistryError};
use hashbrown::{HashMap, HashSet};
use indexmap::IndexMap;
use serde::Deserialize;

use crate::error::HostError;

pub const FEATURE_DIR: &str = "placed_feature";
pub const TAG_DIR: &str = "tags/placed_feature";

#[derive(Deserialize)]
struct TagFile {
    #[serde(default)]
    values: Vec<TagEntry>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum TagEntry {
    Id(String),
    Entry { id: String },
}

impl TagEntry {
    fn id(&self) -> &str {
        match self {
            TagEntry::Id(id) | TagEntry::Entry { id } => id,
        }
    }
}

/// Drops a `namespace:` prefix.
fn local_name(id: &str) -> &str {
    id.split_once(':').map_or(id, |(_, name)| name)
}

#[derive(Debug, Default)]
pub struct PlacementStore {
    features: IndexMap<String, PlacedFeature>,
    tags: HashMap<String, Vec<String>>,
    changed: BTreeSet<String>,
}

impl PlacementStore {
    /// Reads every definition and tag under `pack`.
    ///
    /// A definition that fails to parse is left out with a warning. A missing
    /// `placed_feature` directory, an unreadable directory, or a malformed tag
    /// file makes the whole pack unusable.
    pub fn load(pack: &Path) -> Result<Self, HostError> {
        let feature_dir = pack.join(FEATURE_DIR);
        if !feature_dir.is_dir() {
            return Err(HostError::MissingPlacementDir(pack.to_path_buf()));
        }

        let mut store = PlacementStore::default();
        for (name, path) in json_files(&feature_dir)? {
            let text = read(&path)?;
            match serde_json::from_str::<PlacedFeature>(&text) {
                Ok(feature) => {
                    store.features.insert(name, feature);
                }
                Err(e) => log::warn!("ignoring placed feature {}: {e}", path.display()),
            }
        }

        let tag_dir = pack.join(TAG_DIR);
        if tag_dir.is_dir() {
            for (name, path) in json_files(&tag_dir)? {
                let text = read(&path)?;
                let file: TagFile = serde_json::from_str(&text)
                    .map_err(|source| HostError::BadTag { path: path.clone(), source })?;
                let values = file.values.iter().map(|v| v.id().to_string()).collect();
                store.tags.insert(name, values);
            }
        }

        log::info!(
            "loaded {} placed features and {} tags from {}",
            store.len(),
            store.tags.len(),
            pack.display()
        );
        Ok(store)
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&PlacedFeature> {
        self.features.get(name)
    }

    /// Names replaced since the store was loaded.
    pub fn changed(&self) -> &BTreeSet<String> {
        &self.changed
    }

    /// Definition names carrying `tag`, with nested `#tag` references expanded.
    fn resolve_tag(&self, tag: &str, seen: &mut HashSet<String>, out: &mut Vec<String>) {
        let tag = local_name(tag);
        if !seen.insert(tag.to_string()) {
            return;
        }
        let Some(values) = self.tags.get(tag) else {
            log::debug!("unknown tag {tag}");
            return;
        };
        for value in values {
            match value.strip_prefix('#') {
                Some(nested) => self.resolve_tag(nested, seen, out),
                None => {
                    let name = local_name(value);
                    if !out.iter().any(|n| n == name) {
                        out.push(name.to_string());
                    }
                }
            }
        }
    }

    /// Writes every changed definition below `out/placed_feature`.
    pub fn write_changed(&self, out: &Path) -> Result<usize, HostError> {
        for name in &self.changed {
            let Some(feature) = self.features.get(name) else {
                continue;
            };
            let path = out.join(FEATURE_DIR).join(format!("{name}.json"));
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent).map_err(|source| HostError::Io {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
            let mut text = serde_json::to_string_pretty(feature)
                .map_err(|source| HostError::Encode { path: path.clone(), source })?;
            text.push('\n');
            fs::write(&path, text).map_err(|source| HostError::Io { path: path.clone(), source })?;
            log::debug!("wrote {}", path.display());
        }
        Ok(self.changed.len())
    }
}

impl PlacementRegistry for PlacementStore {
    type Definition = PlacedFeature;

    fn lookup(&self, tag: &str) -> Option<Vec<(String, PlacedFeature)>> {
        if !self.tags.contains_key(local_name(tag)) {
            return None;
        }
        let mut names = Vec::new();
        self.resolve_tag(tag, &mut HashSet::new(), &mut names);
        let entries = names
            .into_iter()
            .filter_map(|name| match self.features.get(&name) {
                Some(feature) => Some((name, feature.clone())),
                None => {
                    log::debug!("tag {tag} names missing placed feature {name}");
                    None
                }
            })
            .collect();
        Some(entries)
    }

    fn replace(&mut self, name: &str, definition: PlacedFeature) -> Result<(), RegistryError> {
        let slot = self
            .features
            .get_mut(name)
            .ok_or_else(|| RegistryError::UnknownDefinition(name.to_string()))?;
        *slot = definition;
        self.changed.insert(name.to_string());
        Ok(())
    }
}

fn read(path: &Path) -> Result<String, HostError> {
    fs::read_to_string(path).map_err(|source| HostError::Io { path: path.to_path_buf(), source })
}

/// `(name, path)` of every `.json` file below `dir`, sorted by name.
fn json_files(dir: &Path) -> Result<Vec<(String, PathBuf)>, HostError> {
    let mut out = Vec::new();
    let mut pending = vec![dir.to_path_buf()];
    while let Some(current) = pending.pop() {
        let entries = fs::read_dir(&current).map_err(|source| HostError::Io { path: current.clone(), source })?;
        for entry in entries {
            let entry = entry.map_err(|source| HostError::Io { path: current.clone(), source })?;
            let path = entry.path();
            if path.is_dir() {
                pending.push(path);
                continue;
            }
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            let Ok(relative) = path.with_extension("").strip_prefix(dir).map(Path::to_path_buf) else {
                continue;
            };
            let name = relative
                .components()
                .map(|c| c.as_os_str().to_string_lossy())
                .collect::<Vec<_>>()
                .join("/");
            out.push((name, path));
        }
    }
    out.sort();
    Ok(out)
}

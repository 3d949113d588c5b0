use std::collections::HashMap;
use std::fs;
use std::path::Path;

use super::config::{BlockDef, BlocksConfig};
use super::error::BlockConfigError;
use super::types::{Block, BlockId};

#[derive(Clone, Debug)]
pub struct BlockType {
    pub id: BlockId,
    pub name: String,
    pub fluid: bool,
    pub carvable: bool,
}

impl BlockType {
    fn placeholder(id: BlockId) -> Self {
        BlockType {
            id,
            name: String::new(),
            fluid: false,
            carvable: false,
        }
    }
}

#[derive(Default, Clone, Debug)]
pub struct BlockRegistry {
    pub blocks: Vec<BlockType>,
    pub by_name: HashMap<String, BlockId>,
}

impl BlockRegistry {
    /// Default table used when no `blocks.toml` is configured.
    pub fn builtin() -> Self {
        let mut bedrock = BlockDef::named("bedrock");
        bedrock.carvable = Some(false);
        let mut water = BlockDef::named("water");
        water.fluid = Some(true);
        let mut lava = BlockDef::named("lava");
        lava.fluid = Some(true);
        let cfg = BlocksConfig {
            blocks: vec![
                BlockDef::named("air"),
                BlockDef::named("stone"),
                BlockDef::named("deepslate"),
                BlockDef::named("dirt"),
                BlockDef::named("grass_block"),
                BlockDef::named("sand"),
                BlockDef::named("gravel"),
                water,
                lava,
                bedrock,
            ],
        };
        // The builtin table is well-formed; an error here is a bug in this function.
        Self::from_config(cfg).unwrap_or_default()
    }

    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self, BlockConfigError> {
        let s = fs::read_to_string(path)?;
        Self::from_toml_str(&s)
    }

    pub fn from_toml_str(s: &str) -> Result<Self, BlockConfigError> {
        let cfg: BlocksConfig = toml::from_str(s)?;
        Self::from_config(cfg)
    }

    pub fn from_config(cfg: BlocksConfig) -> Result<Self, BlockConfigError> {
        let mut reg = BlockRegistry {
            blocks: vec![BlockType {
                id: 0,
                name: "air".to_string(),
                fluid: false,
                carvable: false,
            }],
            by_name: HashMap::from([("air".to_string(), 0)]),
        };
        let mut claimed: Vec<bool> = vec![true];
        for def in cfg.blocks.into_iter() {
            if def.name == "air" {
                match def.id {
                    Some(0) | None => continue,
                    Some(_) => return Err(BlockConfigError::AirSlot(def.name)),
                }
            }
            if reg.by_name.contains_key(&def.name) {
                return Err(BlockConfigError::DuplicateName(def.name));
            }
            let id = match def.id {
                Some(0) => return Err(BlockConfigError::AirSlot(def.name)),
                Some(id) => id,
                None => next_free(&claimed),
            };
            let slot = id as usize;
            if claimed.len() <= slot {
                claimed.resize(slot + 1, false);
                reg.blocks.resize(slot + 1, BlockType::placeholder(0));
            }
            if claimed[slot] {
                return Err(BlockConfigError::DuplicateId {
                    id,
                    first: reg.blocks[slot].name.clone(),
                    second: def.name,
                });
            }
            let fluid = def.fluid.unwrap_or(false);
            claimed[slot] = true;
            reg.by_name.insert(def.name.clone(), id);
            reg.blocks[slot] = BlockType {
                id,
                name: def.name,
                fluid,
                carvable: def.carvable.unwrap_or(true),
            };
        }
        Ok(reg)
    }

    #[inline]
    pub fn get(&self, id: BlockId) -> Option<&BlockType> {
        self.blocks.get(id as usize).filter(|ty| !ty.name.is_empty())
    }

    pub fn id_by_name(&self, name: &str) -> Option<BlockId> {
        self.by_name.get(name).copied()
    }

    pub fn block_by_name(&self, name: &str) -> Option<Block> {
        self.id_by_name(name).map(Block::new)
    }

    pub fn require(&self, name: &str) -> Result<Block, BlockConfigError> {
        self.block_by_name(name)
            .ok_or_else(|| BlockConfigError::Missing(name.to_string()))
    }

    #[inline]
    pub fn is_air(&self, block: Block) -> bool {
        block.is_air_id()
    }

    #[inline]
    pub fn is_fluid(&self, block: Block) -> bool {
        self.get(block.id).is_some_and(|ty| ty.fluid)
    }

    /// Unknown ids are never carvable.
    #[inline]
    pub fn is_carvable(&self, block: Block) -> bool {
        self.get(block.id).is_some_and(|ty| ty.carvable)
    }

    pub fn name_of(&self, block: Block) -> &str {
        self.get(block.id)
            .map(|ty| ty.name.as_str())
            .unwrap_or("unknown")
    }
}

fn next_free(claimed: &[bool]) -> BlockId {
    claimed
        .iter()
        .position(|c| !*c)
        .unwrap_or(claimed.len()) as BlockId
}

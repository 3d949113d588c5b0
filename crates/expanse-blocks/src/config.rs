use serde::Deserialize;

/// Block table as read from `blocks.toml`.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct BlocksConfig {
    #[serde(default)]
    pub blocks: Vec<BlockDef>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct BlockDef {
    pub name: String,
    #[serde(default)]
    pub id: Option<u16>,
    #[serde(default)]
    pub fluid: Option<bool>,
    /// Carvers leave non-carvable blocks (bedrock) in place. Defaults to carvable.
    #[serde(default)]
    pub carvable: Option<bool>,
}

impl BlockDef {
    pub fn named(name: &str) -> Self {
        Self {
            name: name.to_string(),
            id: None,
            fluid: None,
            carvable: None,
        }
    }
}

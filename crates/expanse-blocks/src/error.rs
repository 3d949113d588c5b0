use thiserror::Error;

#[derive(Debug, Error)]
pub enum BlockConfigError {
    #[error("failed to read block table: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid block table: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("block `{0}` is defined more than once")]
    DuplicateName(String),

    #[error("block id {id} is claimed by both `{first}` and `{second}`")]
    DuplicateId {
        id: u16,
        first: String,
        second: String,
    },

    #[error("block id 0 must be `air`, found `{0}`")]
    AirSlot(String),

    #[error("required block `{0}` is not defined")]
    Missing(String),
}

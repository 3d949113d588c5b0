pub type BlockId = u16;
pub type BlockState = u16;

/// Runtime block handle stored in chunk columns.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Block {
    pub id: BlockId,
    pub state: BlockState,
}

impl Block {
    /// Id 0 is reserved for air in every registry.
    pub const AIR: Block = Block { id: 0, state: 0 };

    #[inline]
    pub const fn new(id: BlockId) -> Self {
        Self { id, state: 0 }
    }

    #[inline]
    pub fn is_air_id(self) -> bool {
        self.id == 0
    }
}

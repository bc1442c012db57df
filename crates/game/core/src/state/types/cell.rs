use bitflags::bitflags;

bitflags! {
    /// Membership sets over [`CellType`].
    ///
    /// Each cell type carries a fixed set of group bits; membership tests are a
    /// single mask check instead of a match over every variant.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    pub struct CellGroup: u8 {
        /// Removed by a blast that reaches it.
        const DESTRUCTIBLE     = 1 << 0;
        /// Can be walked onto.
        const PASSABLE         = 1 << 1;
        /// Stops a blast travelling along an axis.
        const BLOCKS_EXPLOSION = 1 << 2;
        /// A collectable item lying on the floor.
        const BONUS            = 1 << 3;
        /// A box, with or without a bonus inside. Counted by utility scoring.
        const CRATE            = 1 << 4;
    }
}

/// Static type of a single grid cell, rebuilt from the snapshot every turn.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display, strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum CellType {
    #[default]
    Floor,
    Box,
    BoxWithBonusRange,
    BoxWithBonusBomb,
    BonusRange,
    BonusBomb,
    Wall,
    BombOccupied,
}

impl CellType {
    pub const fn groups(self) -> CellGroup {
        match self {
            CellType::Floor => CellGroup::PASSABLE,
            CellType::Box | CellType::BoxWithBonusRange | CellType::BoxWithBonusBomb => {
                CellGroup::DESTRUCTIBLE
                    .union(CellGroup::BLOCKS_EXPLOSION)
                    .union(CellGroup::CRATE)
            }
            CellType::BonusRange | CellType::BonusBomb => CellGroup::DESTRUCTIBLE
                .union(CellGroup::PASSABLE)
                .union(CellGroup::BLOCKS_EXPLOSION)
                .union(CellGroup::BONUS),
            CellType::Wall | CellType::BombOccupied => CellGroup::BLOCKS_EXPLOSION,
        }
    }

    #[inline]
    pub const fn is(self, group: CellGroup) -> bool {
        self.groups().contains(group)
    }

    #[inline]
    pub const fn is_passable(self) -> bool {
        self.is(CellGroup::PASSABLE)
    }

    #[inline]
    pub const fn is_destructible(self) -> bool {
        self.is(CellGroup::DESTRUCTIBLE)
    }

    #[inline]
    pub const fn blocks_explosion(self) -> bool {
        self.is(CellGroup::BLOCKS_EXPLOSION)
    }

    #[inline]
    pub const fn is_bonus(self) -> bool {
        self.is(CellGroup::BONUS)
    }

    #[inline]
    pub const fn is_crate(self) -> bool {
        self.is(CellGroup::CRATE)
    }

    /// Utility weight of destroying this cell: 1 for a plain box, 2 for a box
    /// hiding a bonus, 0 for anything else.
    pub const fn crate_weight(self) -> u32 {
        if !self.is_crate() {
            0
        } else if matches!(self, CellType::Box) {
            1
        } else {
            2
        }
    }

    /// Grid symbol. `R`, `B` and `*` are overlay symbols used by diagnostics;
    /// the turn protocol itself only sends `.`, `0`, `1`, `2` and `X`.
    pub const fn symbol(self) -> char {
        match self {
            CellType::Floor => '.',
            CellType::Box => '0',
            CellType::BoxWithBonusRange => '1',
            CellType::BoxWithBonusBomb => '2',
            CellType::BonusRange => 'R',
            CellType::BonusBomb => 'B',
            CellType::Wall => 'X',
            CellType::BombOccupied => '*',
        }
    }

    pub const fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            '.' => Some(CellType::Floor),
            '0' => Some(CellType::Box),
            '1' => Some(CellType::BoxWithBonusRange),
            '2' => Some(CellType::BoxWithBonusBomb),
            'R' => Some(CellType::BonusRange),
            'B' => Some(CellType::BonusBomb),
            'X' => Some(CellType::Wall),
            '*' => Some(CellType::BombOccupied),
            _ => None,
        }
    }
}

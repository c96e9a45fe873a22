//! Raw Tiled GIDs: flip flags, the empty sentinel and tileset lookup.

/// Raw GID of an empty cell.
pub const EMPTY_GID: u32 = 0;

/// Horizontal flip flag, bit 31.
pub const FLIP_H: u32 = 0x8000_0000;
/// Vertical flip flag, bit 30.
pub const FLIP_V: u32 = 0x4000_0000;
/// Diagonal flip flag, bit 29.
pub const FLIP_D: u32 = 0x2000_0000;
/// Keeps the lower 29 bits (bit 28 is free).
pub const GID_MASK: u32 = 0x1FFF_FFFF;

/// A raw Tiled GID as stored in layer data, flip flags included.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TileId(pub u32);

impl TileId {
    /// The GID as stored, flags included.
    #[inline]
    pub fn raw(self) -> u32 {
        self.0
    }

    /// The GID with flip flags removed.
    #[inline]
    pub fn clean(self) -> u32 {
        self.0 & GID_MASK
    }

    /// Mirrored horizontally.
    #[inline]
    pub fn flip_h(self) -> bool {
        (self.0 & FLIP_H) != 0
    }

    /// Mirrored vertically.
    #[inline]
    pub fn flip_v(self) -> bool {
        (self.0 & FLIP_V) != 0
    }

    /// Mirrored across the diagonal.
    #[inline]
    pub fn flip_d(self) -> bool {
        (self.0 & FLIP_D) != 0
    }

    /// True for the empty-cell sentinel, whatever flip bits are set.
    #[inline]
    pub fn is_empty(self) -> bool {
        self.clean() == EMPTY_GID
    }
}

/// Maps clean GIDs to the index of the tileset that owns them.
///
/// Ranges are kept sorted by first GID and searched, so memory does not
/// depend on how large the GIDs are.
pub(crate) struct GidLookup {
    // (first_gid, one past the last gid, tileset index)
    ranges: Vec<(u32, u32, usize)>,
}

impl GidLookup {
    /// `ranges` yields `(first_gid, tilecount)` per tileset, in tileset order.
    pub fn new(ranges: impl Iterator<Item = (u32, u32)>) -> Self {
        let mut ranges: Vec<(u32, u32, usize)> = ranges
            .enumerate()
            .filter(|(_, (_, count))| *count > 0)
            .map(|(i, (start, count))| (start, start.saturating_add(count), i))
            .collect();
        ranges.sort_unstable_by_key(|r| r.0);
        Self { ranges }
    }

    #[inline]
    pub fn tileset_for(&self, gid: TileId) -> Option<usize> {
        let gid = gid.clean();
        let after = self.ranges.partition_point(|r| r.0 <= gid);
        let &(_, end, idx) = self.ranges.get(after.checked_sub(1)?)?;
        (gid < end).then_some(idx)
    }
}

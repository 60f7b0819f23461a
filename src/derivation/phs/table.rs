//! Table memory layout and ownership.
//!
//! The table is a flat, heap-allocated array of blocks divided into
//! `lanes` equal regions. Its length and every lane length are powers of
//! two, so reference indices are reduced with a mask and can never fall
//! outside a lane.

use zeroize::Zeroize;

use super::block::{BLOCK_LEN, Block};
use super::error::{ParamError, PhsError};
use super::params::{BASE_BLOCKS_LOG2, MIN_LANE_BLOCKS};

/// The memory region that must be materialized to compute a tag.
///
/// A table is exclusively owned by one hashing invocation. It is allocated
/// with its final capacity (it never reallocates, so no stale copy of its
/// contents is released to the allocator) and every block is zeroed on
/// drop.
pub struct Table {
    blocks: Vec<Block>,
    lane_len: usize,
}

impl Table {
    /// Allocates the table for `m_cost`, split into `lanes` regions.
    ///
    /// Blocks start zeroed and are overwritten by the expander.
    pub(crate) fn allocate(m_cost: u32, lanes: u32) -> Result<Self, PhsError> {
        let total = 1usize
            .checked_shl(m_cost.saturating_add(BASE_BLOCKS_LOG2))
            .filter(|&total| total <= isize::MAX as usize)
            .ok_or(ParamError::MemoryCostTooLarge(m_cost))?;
        debug_assert!(total / lanes as usize >= MIN_LANE_BLOCKS);
        Self::allocate_blocks(total, lanes as usize)
    }

    pub(crate) fn allocate_blocks(total: usize, lanes: usize) -> Result<Self, PhsError> {
        debug_assert!(total.is_power_of_two() && lanes.is_power_of_two() && lanes <= total);

        let bytes = total
            .checked_mul(BLOCK_LEN)
            .ok_or(PhsError::OutOfMemory { bytes: usize::MAX })?;

        let mut blocks = Vec::new();
        blocks
            .try_reserve_exact(total)
            .map_err(|_| PhsError::OutOfMemory { bytes })?;
        blocks.resize(total, Block::ZERO);

        Ok(Self {
            blocks,
            lane_len: total / lanes,
        })
    }

    /// Total number of blocks.
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Number of blocks in each lane (a power of two).
    pub fn lane_len(&self) -> usize {
        self.lane_len
    }

    pub fn lanes(&self) -> usize {
        self.blocks.len() / self.lane_len
    }

    /// Read-only view of lane `lane`.
    pub fn lane(&self, lane: usize) -> &[Block] {
        let start = lane * self.lane_len;
        &self.blocks[start..start + self.lane_len]
    }

    /// Disjoint mutable lane regions, in lane order.
    pub(crate) fn lanes_mut(&mut self) -> core::slice::ChunksExactMut<'_, Block> {
        self.blocks.chunks_exact_mut(self.lane_len)
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// Runs `f` once per lane with that lane's region and its entry of
    /// `per_lane`.
    ///
    /// Lanes only ever see their own region. With the `parallel` feature
    /// and more than one lane, the lanes run as rayon tasks and this call
    /// returns once all of them have finished.
    pub(crate) fn for_each_lane<T, F>(&mut self, per_lane: &mut [T], f: F)
    where
        T: Send,
        F: Fn(usize, &mut [Block], &mut T) + Send + Sync,
    {
        assert_eq!(per_lane.len(), self.lanes(), "one entry per lane");

        #[cfg(feature = "parallel")]
        if per_lane.len() > 1 {
            use rayon::prelude::*;
            let lane_len = self.lane_len;
            self.blocks
                .par_chunks_exact_mut(lane_len)
                .zip(per_lane.par_iter_mut())
                .enumerate()
                .for_each(|(k, (lane, extra))| f(k, lane, extra));
            return;
        }

        self.lanes_mut()
            .zip(per_lane.iter_mut())
            .enumerate()
            .for_each(|(k, (lane, extra))| f(k, lane, extra));
    }

    /// Zeroes every block in place.
    pub(crate) fn wipe(&mut self) {
        self.zeroize();
    }
}

impl core::fmt::Debug for Table {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Table")
            .field("blocks", &self.blocks.len())
            .field("lane_len", &self.lane_len)
            .finish_non_exhaustive()
    }
}

impl Zeroize for Table {
    fn zeroize(&mut self) {
        self.blocks.iter_mut().for_each(Zeroize::zeroize);
    }
}

impl Drop for Table {
    fn drop(&mut self) {
        self.wipe();
    }
}

//! Table expansion.
//!
//! The expander seeds the table from the encoded inputs and fills every
//! lane through a one-way hash chain: each block is the primitive hash of
//! the block before it, so a block can only be recomputed by walking the
//! chain from the seed.
//!
//! ```text
//! seed      = H(encoded)
//! B[k][0]   = H(seed || LE32(k) || LE64(0) || 0x00) || H(seed || LE32(k) || LE64(0) || 0x01)
//! B[k][i]   = H(B[k][i-1] || LE64(i) || 0x00)       || H(B[k][i-1] || LE64(i) || 0x01)
//! ```

use log::debug;
use zeroize::Zeroizing;

use super::block::{BLOCK_LEN, Block};
use super::error::PhsError;
use super::params::check_memory;
use super::table::Table;
use crate::hash::PrimitiveHash;

/// Hashes `parts` twice, with a trailing domain byte of 0 and 1, into the
/// two halves of a block.
pub(crate) fn hash_block<H: PrimitiveHash>(parts: &[&[u8]]) -> Block {
    let halves = [0u8, 1u8].map(|half| {
        let mut ctx = H::new();
        for part in parts {
            ctx.update(part);
        }
        ctx.update(&[half]);
        Zeroizing::new(ctx.finalize())
    });
    Block::from_halves(&halves[0], &halves[1])
}

/// Fills one lane with its hash chain.
fn fill_lane<H: PrimitiveHash>(seed: &[u8], lane_index: u32, lane: &mut [Block]) {
    lane[0] = hash_block::<H>(&[seed, &lane_index.to_le_bytes(), &0u64.to_le_bytes()]);

    let mut prev = Zeroizing::new([0u8; BLOCK_LEN]);
    for i in 1..lane.len() {
        *prev = lane[i - 1].to_bytes();
        lane[i] = hash_block::<H>(&[&prev[..], &(i as u64).to_le_bytes()]);
    }
}

/// Allocates the table for `m_cost` and fills it from `encoded`.
///
/// The output is fully determined by `encoded`, `m_cost` and `lanes`.
///
/// # Errors
///
/// Returns [`PhsError::InvalidParameter`] when `m_cost` or `lanes` is out
/// of bounds, and [`PhsError::OutOfMemory`] when the table cannot be
/// allocated. Nothing has been computed in either case.
pub fn expand<H: PrimitiveHash>(
    encoded: &[u8],
    m_cost: u32,
    lanes: u32,
) -> Result<Table, PhsError> {
    check_memory(m_cost, lanes)?;
    let mut table = Table::allocate(m_cost, lanes)?;

    debug!(
        "expanding {} blocks ({} bytes) over {} lane(s) with {}",
        table.len(),
        table.len() * BLOCK_LEN,
        lanes,
        H::NAME
    );

    let seed = Zeroizing::new(H::digest(&[encoded]));
    let mut lane_ids: Vec<()> = vec![(); table.lanes()];
    table.for_each_lane(&mut lane_ids, |k, lane, _| {
        fill_lane::<H>(&seed[..], k as u32, lane)
    });

    Ok(table)
}

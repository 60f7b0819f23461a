//! Finalization and server relief.
//!
//! The finalizer condenses the lane states and the last block of every
//! lane into the tag:
//!
//! ```text
//! acc = XOR over lanes k of (state[k] ⊕ B[k][L-1])
//! A   = H(0x00 || acc || LE32(T))
//! B   = H(0x01 || acc || LE32(T))
//! pre = A || B
//! z   = P⁴(pre) ⊕ pre
//! tag = z[..T]
//! ```
//!
//! The tag is the first `T` bytes of `z`. `P⁴` spreads both halves over
//! the whole block, so every tag byte depends on `A` and `B` alike.
//!
//! The `pre` value is also exposed as a [`PreTag`] so that the expensive
//! part can run on a client while the server only performs the cheap
//! permute-and-XOR-back step.

use zeroize::Zeroizing;

use super::block::{BLOCK_LEN, Block};
use super::error::{ParamError, PhsError};
use super::params::check_output;
use super::table::Table;
use crate::hash::PrimitiveHash;

/// Permutation rounds applied to the combined value before the XOR back.
pub const FINAL_ROUNDS: usize = 4;

/// Offset into the round-constant table, distinct from the mixing rounds.
const FINAL_CONSTANT_OFFSET: usize = 128;

/// Intermediate value produced by the client side of server relief.
///
/// A pre-tag is as sensitive as the password: it is zeroed on drop and
/// its [`Debug`] output is redacted.
#[derive(Clone)]
pub struct PreTag {
    block: Block,
    out_len: usize,
}

impl PreTag {
    /// Tag length this pre-tag was computed for.
    pub fn out_len(&self) -> usize {
        self.out_len
    }

    /// Serializes the pre-tag for transport.
    pub fn to_bytes(&self) -> Zeroizing<[u8; BLOCK_LEN]> {
        Zeroizing::new(self.block.to_bytes())
    }

    /// Rebuilds a pre-tag received from a client.
    ///
    /// # Errors
    ///
    /// Returns [`PhsError::InvalidParameter`] if `out_len` is out of bounds.
    pub fn from_bytes(bytes: &[u8; BLOCK_LEN], out_len: usize) -> Result<Self, PhsError> {
        check_output(out_len)?;
        Ok(Self {
            block: Block::from_bytes(bytes),
            out_len,
        })
    }
}

impl core::fmt::Debug for PreTag {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("PreTag")
            .field("out_len", &self.out_len)
            .finish_non_exhaustive()
    }
}

/// Combines the lane states with the table tail into a pre-tag.
///
/// Consumes and wipes both the states and the table.
pub(crate) fn pre_tag<H: PrimitiveHash>(
    states: Vec<Block>,
    mut table: Table,
    out_len: usize,
) -> PreTag {
    assert_eq!(states.len(), table.lanes(), "one running state per lane");

    let mut acc = Block::ZERO;
    for (k, state) in states.iter().enumerate() {
        acc.in_place_xor(state);
        acc.in_place_xor(&table.lane(k)[table.lane_len() - 1]);
    }
    drop(states);
    table.wipe();
    drop(table);

    let acc_bytes = Zeroizing::new(acc.to_bytes());
    let len = (out_len as u32).to_le_bytes();
    let a = Zeroizing::new(H::digest(&[&[0x00u8], &acc_bytes[..], &len]));
    let b = Zeroizing::new(H::digest(&[&[0x01u8], &acc_bytes[..], &len]));

    PreTag {
        block: Block::from_halves(&a, &b),
        out_len,
    }
}

/// Turns a pre-tag into the final tag: `z = P⁴(pre) ⊕ pre`, truncated.
///
/// # Panics
///
/// Panics if `out` does not have the pre-tag's length.
pub(crate) fn finish(pre: &PreTag, out: &mut [u8]) {
    assert_eq!(out.len(), pre.out_len, "output buffer length mismatch");

    let mut z = pre.block.clone();
    z.permute(FINAL_ROUNDS, FINAL_CONSTANT_OFFSET);
    z.in_place_xor(&pre.block);

    let bytes = Zeroizing::new(z.to_bytes());
    out.copy_from_slice(&bytes[..out.len()]);
}

/// Finalizes the computation into `out`.
///
/// The tag length is `out.len()`. Consumes and wipes the states and the
/// table, also when the length is rejected.
///
/// # Errors
///
/// Returns [`PhsError::InvalidParameter`] if `out.len()` is outside
/// `MIN_OUTLEN..=MAX_OUTLEN`; `out` is left untouched.
pub fn finalize<H: PrimitiveHash>(
    states: Vec<Block>,
    table: Table,
    out: &mut [u8],
) -> Result<(), PhsError> {
    check_output(out.len())?;
    let pre = pre_tag::<H>(states, table, out.len());
    finish(&pre, out);
    Ok(())
}

/// Server side of server relief: finishes a client pre-tag into `out`.
///
/// # Errors
///
/// Returns [`PhsError::InvalidParameter`] if `out` does not have the length
/// the pre-tag was computed for.
pub fn server_finish(pre: &PreTag, out: &mut [u8]) -> Result<(), PhsError> {
    if out.len() != pre.out_len {
        let err = if out.len() < pre.out_len {
            ParamError::OutputTooShort(out.len())
        } else {
            ParamError::OutputTooLong(out.len())
        };
        return Err(err.into());
    }
    finish(pre, out);
    Ok(())
}

//! Reference index computation.
//!
//! Each mixing step combines the running state with one reference block
//! of the current lane. The reference index comes from one of two
//! schedules:
//!
//! - **data-independent**: the bit-reversal permutation of the position,
//!   shifted by the pass number. It never depends on the password.
//! - **data-dependent**: the low-order `log2(L)` bits of word 0 (the first
//!   eight bytes, little-endian) of the running state.
//!
//! Both results are reduced with the lane mask `L - 1`. Lane lengths are
//! powers of two, so the mask keeps every index inside the lane by
//! construction. The high-order bits of the state are never used.

use super::block::Block;
use super::params::AddressingPolicy;

/// Which schedule produces the reference index of one step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Addressing {
    Independent,
    Dependent,
}

/// Reverses the low `bits` bits of `i`.
#[inline]
pub(crate) fn bit_reverse(i: usize, bits: u32) -> usize {
    if bits == 0 {
        return 0;
    }
    i.reverse_bits() >> (usize::BITS - bits)
}

/// Selects the schedule for position `index` of pass `pass`.
///
/// The hybrid policy keeps the first half of the first pass free of
/// password-dependent accesses.
#[inline]
pub(crate) fn addressing(
    policy: AddressingPolicy,
    pass: u32,
    index: usize,
    lane_len: usize,
) -> Addressing {
    match policy {
        AddressingPolicy::DataIndependent => Addressing::Independent,
        AddressingPolicy::DataDependent => Addressing::Dependent,
        AddressingPolicy::Hybrid => {
            if pass == 0 && index < lane_len / 2 {
                Addressing::Independent
            } else {
                Addressing::Dependent
            }
        }
    }
}

/// Computes the lane-local reference index for position `index`.
#[inline]
pub(crate) fn reference_index(
    mode: Addressing,
    pass: u32,
    index: usize,
    state: &Block,
    lane_len: usize,
) -> usize {
    debug_assert!(lane_len.is_power_of_two());
    let mask = lane_len - 1;

    let j = match mode {
        Addressing::Independent => {
            bit_reverse(index, lane_len.trailing_zeros()).wrapping_add(pass as usize) & mask
        }
        // Truncating to usize keeps the low-order bits on every target.
        Addressing::Dependent => (state.word(0) as usize) & mask,
    };

    debug_assert!(j < lane_len, "reference index {j} outside lane of {lane_len}");
    j
}

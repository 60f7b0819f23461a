//! Block operations.
//!
//! This module defines the 128-byte block, the unit of memory of the
//! table, and the compression function G used by the mixing phase. The
//! permutation inside G is one round of the BLAKE2b-style mixing over a
//! 4×4 matrix of 64-bit words, with multiplication for extra diffusion and
//! a round constant injected before each round.

use once_cell::sync::Lazy;
use zeroize::Zeroize;

use crate::hash::DIGEST_LEN;

/// Number of 64-bit words in a block.
pub const BLOCK_WORDS: usize = 16;
/// Block length in bytes.
pub const BLOCK_LEN: usize = BLOCK_WORDS * 8;

/// Permutation rounds inside the compression function G.
const COMPRESS_ROUNDS: usize = 2;

const ROUND_CONSTANT_COUNT: usize = 256;

/// Process-wide round constants, computed once on first use.
///
/// The constants are the output of SplitMix64 seeded with the first 64
/// fractional bits of π.
static ROUND_CONSTANTS: Lazy<[u64; ROUND_CONSTANT_COUNT]> = Lazy::new(|| {
    let mut seed = 0x243f_6a88_85a3_08d3u64;
    core::array::from_fn(|_| {
        seed = seed.wrapping_add(0x9e37_79b9_7f4a_7c15);
        let mut z = seed;
        z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
        z ^ (z >> 31)
    })
});

/// A 128-byte memory block (16 × 64-bit little-endian words).
///
/// Blocks are aligned to a cache line and zeroed on drop, so neither the
/// table nor any running state leaves key material behind.
#[derive(Debug, Clone, PartialEq, Eq)]
#[repr(C, align(64))]
pub struct Block(pub [u64; BLOCK_WORDS]);

impl Block {
    pub(crate) const ZERO: Self = Self([0u64; BLOCK_WORDS]);

    /// Builds a block from two primitive hash outputs (first half, second half).
    pub(crate) fn from_halves(low: &[u8; DIGEST_LEN], high: &[u8; DIGEST_LEN]) -> Self {
        Block(core::array::from_fn(|i| {
            let half = if i < BLOCK_WORDS / 2 { low } else { high };
            let start = (i % (BLOCK_WORDS / 2)) * 8;
            let mut word = [0u8; 8];
            word.copy_from_slice(&half[start..start + 8]);
            u64::from_le_bytes(word)
        }))
    }

    pub(crate) fn from_bytes(bytes: &[u8; BLOCK_LEN]) -> Self {
        Block(core::array::from_fn(|i| {
            let mut word = [0u8; 8];
            word.copy_from_slice(&bytes[i * 8..i * 8 + 8]);
            u64::from_le_bytes(word)
        }))
    }

    pub(crate) fn to_bytes(&self) -> [u8; BLOCK_LEN] {
        let mut out = [0u8; BLOCK_LEN];
        self.0.iter().enumerate().for_each(|(i, word)| {
            out[i * 8..i * 8 + 8].copy_from_slice(&word.to_le_bytes());
        });
        out
    }

    #[inline]
    pub(crate) fn word(&self, i: usize) -> u64 {
        self.0[i]
    }

    pub(crate) fn in_place_xor(&mut self, other: &Block) {
        self.0
            .iter_mut()
            .zip(other.0.iter())
            .for_each(|(a, b)| *a ^= b);
    }

    pub(crate) fn xor(&self, other: &Block) -> Block {
        let mut out = self.clone();
        out.in_place_xor(other);
        out
    }

    /// Applies `rounds` rounds of the permutation P, using the round
    /// constants starting at `constant_offset`.
    pub(crate) fn permute(&mut self, rounds: usize, constant_offset: usize) {
        for round in 0..rounds {
            self.0[0] ^= ROUND_CONSTANTS[(constant_offset + round) % ROUND_CONSTANT_COUNT];
            permute_p(&mut self.0);
        }
    }

    /// Compression function G.
    ///
    /// Computes G(X, Y) = P²(X ⊕ Y) ⊕ X ⊕ Y. The feed-forward XOR makes G
    /// non-invertible even though P is a permutation.
    pub(crate) fn compress(x: &Self, y: &Self) -> Self {
        let r = x.xor(y);
        let mut z = r.clone();
        z.permute(COMPRESS_ROUNDS, 0);
        z.in_place_xor(&r);
        z
    }
}

impl Zeroize for Block {
    fn zeroize(&mut self) {
        self.0.zeroize();
    }
}

impl Drop for Block {
    fn drop(&mut self) {
        self.zeroize();
    }
}

/// GB mixing function (BLAKE2b G with multiplication).
///
/// Each addition also adds twice the product of the lower 32 bits of its
/// operands:
///
/// ```text
/// a = a + b + 2 × trunc(a) × trunc(b)
/// d = (d ⊕ a) >>> rotation
/// ```
///
/// with rotations of 32, 24, 16 and 63 bits.
#[inline(always)]
fn gb(a: u64, b: u64, c: u64, d: u64) -> (u64, u64, u64, u64) {
    #[inline(always)]
    fn fused(x: u64, y: u64) -> u64 {
        x.wrapping_add(y)
            .wrapping_add(2u64.wrapping_mul(x & 0xffff_ffff).wrapping_mul(y & 0xffff_ffff))
    }

    let a = fused(a, b);
    let d = (d ^ a).rotate_right(32);
    let c = fused(c, d);
    let b = (b ^ c).rotate_right(24);
    let a = fused(a, b);
    let d = (d ^ a).rotate_right(16);
    let c = fused(c, d);
    let b = (b ^ c).rotate_right(63);

    (a, b, c, d)
}

/// P permutation: GB along the columns, then along the diagonals of the
/// 4×4 word matrix.
#[inline(always)]
fn permute_p(v: &mut [u64; BLOCK_WORDS]) {
    (v[0], v[4], v[8], v[12]) = gb(v[0], v[4], v[8], v[12]);
    (v[1], v[5], v[9], v[13]) = gb(v[1], v[5], v[9], v[13]);
    (v[2], v[6], v[10], v[14]) = gb(v[2], v[6], v[10], v[14]);
    (v[3], v[7], v[11], v[15]) = gb(v[3], v[7], v[11], v[15]);

    (v[0], v[5], v[10], v[15]) = gb(v[0], v[5], v[10], v[15]);
    (v[1], v[6], v[11], v[12]) = gb(v[1], v[6], v[11], v[12]);
    (v[2], v[7], v[8], v[13]) = gb(v[2], v[7], v[8], v[13]);
    (v[3], v[4], v[9], v[14]) = gb(v[3], v[4], v[9], v[14]);
}

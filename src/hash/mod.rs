//! Primitive hash functions used by the password hashing scheme.
//!
//! The scheme never reimplements a hash function: it drives an existing,
//! standardized one through the small [`PrimitiveHash`] capability
//! interface (`new`, `update`, `finalize`). Every primitive produces a
//! 64-byte digest, which is half of a memory block.
//!
//! Two interchangeable primitives are provided:
//!
//! - [`Blake2b`]
//!   BLAKE2b-512, the default primitive.
//!
//! - [`Sha512`]
//!   SHA-512 (FIPS 180-4).
//!
//! The primitive is selected at construction time through a generic
//! parameter, so no dynamic dispatch happens in the hot loops.
//!
//! The `blake2` and `sha2` contexts keep up to one block of absorbed input
//! in an internal buffer and do not zeroize it on drop. Callers wipe the
//! inputs they own (the encoded password, the table, the running states),
//! but a copy of the last absorbed block may remain in released stack
//! memory.

use blake2::Blake2b512;
use sha2::Digest;

/// Output length, in bytes, of every primitive hash.
pub const DIGEST_LEN: usize = 64;

/// Streaming hash capability used as the sole source of pseudorandomness.
///
/// Implementations must provide at least 256 bits of security and produce
/// exactly [`DIGEST_LEN`] bytes.
pub trait PrimitiveHash: Sized {
    /// Human-readable algorithm name, used in log output.
    const NAME: &'static str;

    /// Creates a fresh hashing context.
    fn new() -> Self;

    /// Absorbs `data` into the context.
    fn update(&mut self, data: &[u8]);

    /// Consumes the context and returns the digest.
    fn finalize(self) -> [u8; DIGEST_LEN];

    /// Hashes the concatenation of `parts` in one call.
    fn digest(parts: &[&[u8]]) -> [u8; DIGEST_LEN] {
        let mut ctx = Self::new();
        for part in parts {
            ctx.update(part);
        }
        ctx.finalize()
    }
}

/// BLAKE2b with a 512-bit output.
#[derive(Clone)]
pub struct Blake2b(Blake2b512);

impl PrimitiveHash for Blake2b {
    const NAME: &'static str = "blake2b-512";

    fn new() -> Self {
        Self(Blake2b512::new())
    }

    fn update(&mut self, data: &[u8]) {
        Digest::update(&mut self.0, data);
    }

    fn finalize(self) -> [u8; DIGEST_LEN] {
        let mut out = [0u8; DIGEST_LEN];
        out.copy_from_slice(&Digest::finalize(self.0));
        out
    }
}

/// SHA-512.
#[derive(Clone)]
pub struct Sha512(sha2::Sha512);

impl PrimitiveHash for Sha512 {
    const NAME: &'static str = "sha-512";

    fn new() -> Self {
        Self(sha2::Sha512::new())
    }

    fn update(&mut self, data: &[u8]) {
        Digest::update(&mut self.0, data);
    }

    fn finalize(self) -> [u8; DIGEST_LEN] {
        let mut out = [0u8; DIGEST_LEN];
        out.copy_from_slice(&Digest::finalize(self.0));
        out
    }
}

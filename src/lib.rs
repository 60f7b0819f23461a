//! Memory-hard password hashing for Nebula
//!
//! This crate turns a password and a salt into a fixed-length tag whose
//! computation requires a configurable amount of memory and time, so that
//! large-scale guessing is expensive on every kind of hardware.
//!
//! The focus is on **clarity, predictability, and auditability**. The
//! scheme never reimplements a hash function: all pseudorandomness comes
//! from a standard primitive hash, and everything else is simple word
//! arithmetic over a large in-memory table.
//!
//! # Module overview
//!
//! - `hash`  
//!   The primitive hash capability (`new`, `update`, `finalize`) and its
//!   BLAKE2b-512 and SHA-512 implementations.
//!
//! - `primitives`  
//!   Low-level helpers such as constant-time comparison.
//!
//! - `derivation`  
//!   The password hashing scheme itself: input encoding, table expansion,
//!   mixing, finalization and the public entry points.
//!
//! # Quick start
//!
//! ```rust
//! use cryptal_phs::phs;
//!
//! let mut tag = [0u8; 32];
//! phs(&mut tag, b"password", b"NaCl-salt", 1, 4).unwrap();
//! ```
//!
//! # Design goals
//!
//! - One allocation per invocation, zeroed before release
//! - No secret material in logs or `Debug` output
//! - Every parameter validated before any memory is touched
//! - Parallel lanes with results identical to sequential execution

pub mod derivation;
pub mod hash;
pub mod primitives;

pub use derivation::phs::{
    AddressingPolicy, MAX_OUTLEN, MIN_OUTLEN, ParamError, Phs, PhsError, PhsParams, PreTag, phs,
    phs_status, server_finish,
};
pub use hash::{Blake2b, PrimitiveHash, Sha512};

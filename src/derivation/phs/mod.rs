//! Memory-hard password hashing.
//!
//! The scheme turns a password and a salt into a fixed-length tag whose
//! computation needs a configurable amount of memory and time. It is built
//! entirely on top of a standard primitive hash (see [`crate::hash`]).
//!
//! # Algorithm Overview
//!
//! 1. **Encoding**: serialize the password, salt, costs, tag length and
//!    optional inputs into one unambiguous byte string.
//! 2. **Expansion**: hash the encoding into a seed and derive every block
//!    of the table from its predecessor with the primitive hash.
//! 3. **Mixing**: walk the table `t_cost` times. Each step combines the
//!    running state, the previous block and one reference block with the
//!    compression function `G` and XORs the result into the current block.
//! 4. **Finalization**: condense the lane states and the last block of
//!    every lane into the tag.
//!
//! # Memory Organization
//!
//! The table holds `16 << m_cost` blocks of 128 bytes, allocated once
//! and zeroed before release. It is split into a power-of-two number of
//! lanes that are mixed independently and synchronized after each pass.
//!
//! # Addressing Policies
//!
//! - **Data-independent**: reference indices follow a bit-reversal
//!   schedule, which resists cache timing attacks.
//! - **Data-dependent**: reference indices are taken from the running
//!   state, which resists time-memory trade-offs.
//! - **Hybrid** (default): data-independent for the first half of the
//!   first pass, data-dependent afterwards.
//!
//! # Server Relief
//!
//! [`Phs::client_hash`] runs everything except the final permutation and
//! returns a [`PreTag`]; [`server_finish`] turns it into the tag at the
//! cost of a few permutation rounds.

pub(crate) mod block;
pub(crate) mod boundary;
pub mod core;
pub(crate) mod encoding;
pub(crate) mod error;
pub(crate) mod expand;
pub(crate) mod mixing;
pub(crate) mod params;
pub(crate) mod reference;
pub(crate) mod table;

pub use block::{BLOCK_LEN, Block};
pub use boundary::{FINAL_ROUNDS, PreTag, finalize, server_finish};
pub use self::core::{Phs, phs, phs_status};
pub use encoding::{EncodingExtras, encode};
pub use error::{ParamError, PhsError};
pub use expand::expand;
pub use mixing::{AccessObserver, NoopObserver, Step, mix, mix_observed};
pub use params::{
    AddressingPolicy, MAX_ASSOCIATED_DATA, MAX_LANES, MAX_MEMORY, MAX_OUTLEN, MAX_PASSWORD,
    MAX_SALT, MAX_SECRET, MAX_TIME, MIN_MEMORY, MIN_OUTLEN, MIN_TIME, PhsParams, PhsParamsBuilder,
};
pub use table::Table;

//! Key and password derivation functions.
//!
//! - `phs`
//!   Memory-hard password hashing built on a standard primitive hash,
//!   with tunable time and memory costs, parallel lanes and optional
//!   server relief.

pub mod phs;

pub use phs::{AddressingPolicy, ParamError, Phs, PhsError, PhsParams, PhsParamsBuilder, PreTag};
pub use phs::{phs, phs_status, server_finish};

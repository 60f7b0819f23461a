//! Primitive helpers
//!
//! Small, dependency-free building blocks shared by the rest of the crate.
//!
//! Current primitives include:
//! - `ct`: constant-time comparison of byte strings, used when checking
//!   a recomputed tag against a stored one

pub mod ct;

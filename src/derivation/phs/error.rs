//! Error types for the password hashing scheme.
//!
//! Only recoverable conditions are represented here. Programming errors
//! such as an out-of-range table index are invariant violations and panic
//! instead of being converted into an error value.

use thiserror::Error;

/// A parameter outside its documented bounds.
///
/// Every variant is detected before any memory is allocated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ParamError {
    #[error("output length {0} is below the minimum")]
    OutputTooShort(usize),

    #[error("output length {0} exceeds the maximum")]
    OutputTooLong(usize),

    #[error("password length {0} exceeds the maximum")]
    PasswordTooLong(usize),

    #[error("salt length {0} exceeds the maximum")]
    SaltTooLong(usize),

    #[error("secret length {0} exceeds the maximum")]
    SecretTooLong(usize),

    #[error("associated data length {0} exceeds the maximum")]
    AssociatedDataTooLong(usize),

    #[error("time cost must be at least 1")]
    TimeCostTooSmall,

    #[error("time cost {0} exceeds the maximum")]
    TimeCostTooLarge(u32),

    #[error("memory cost must be at least 1")]
    MemoryCostTooSmall,

    #[error("memory cost {0} exceeds the maximum")]
    MemoryCostTooLarge(u32),

    /// Lanes must be a non-zero power of two.
    #[error("lane count {0} is not a non-zero power of two")]
    LanesInvalid(u32),

    /// Too many lanes for the maximum, or for the table size.
    #[error("lane count {lanes} is too large for memory cost {m_cost}")]
    LanesTooMany { lanes: u32, m_cost: u32 },
}

/// Errors returned by the password hashing scheme.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PhsError {
    #[error("invalid parameter: {0}")]
    InvalidParameter(#[from] ParamError),

    /// A field does not fit the fixed-width input encoding.
    #[error("{field} length {len} exceeds the encodable maximum {max}")]
    ParameterTooLarge {
        field: &'static str,
        len: usize,
        max: usize,
    },

    /// The table could not be allocated at the requested memory cost.
    #[error("unable to allocate {bytes} bytes for the hashing table")]
    OutOfMemory { bytes: usize },

    /// A recomputed tag did not match the expected one.
    #[error("tag verification failed")]
    VerificationFailed,
}

impl PhsError {
    /// Non-zero status code for the C-style surface (`0` means success).
    pub fn status_code(&self) -> i32 {
        match self {
            PhsError::InvalidParameter(_) => 1,
            PhsError::ParameterTooLarge { .. } => 2,
            PhsError::OutOfMemory { .. } => 3,
            PhsError::VerificationFailed => 4,
        }
    }
}

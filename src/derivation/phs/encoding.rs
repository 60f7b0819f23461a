//! Unambiguous input encoding.
//!
//! Every input of a hashing invocation is serialized into one byte string
//! that is hashed to seed the table. Variable-length fields are always
//! preceded by their fixed-width length, so two distinct parameter tuples
//! can never produce the same encoding.
//!
//! ```text
//! LE32(|P|) || LE32(|S|) || LE32(t) || LE32(m) || LE32(T) || P || S
//!   || LE32(lanes) || policy || LE32(|K|) || K || LE32(|X|) || X
//! ```

use zeroize::Zeroizing;

use super::error::PhsError;
use super::params::{
    AddressingPolicy, MAX_ASSOCIATED_DATA, MAX_OUTLEN, MAX_PASSWORD, MAX_SALT, MAX_SECRET,
};

/// Optional inputs appended after the password and salt.
#[derive(Clone, Copy, Debug)]
pub struct EncodingExtras<'a> {
    pub lanes: u32,
    pub policy: AddressingPolicy,
    pub secret: &'a [u8],
    pub associated_data: &'a [u8],
}

impl Default for EncodingExtras<'_> {
    fn default() -> Self {
        Self {
            lanes: 1,
            policy: AddressingPolicy::default(),
            secret: &[],
            associated_data: &[],
        }
    }
}

fn check_len(field: &'static str, len: usize, max: usize) -> Result<(), PhsError> {
    if len > max {
        return Err(PhsError::ParameterTooLarge { field, len, max });
    }
    Ok(())
}

/// Serializes all inputs of one invocation.
///
/// The result contains the password, so it is returned in a buffer that
/// is zeroed on drop.
///
/// # Errors
///
/// Returns [`PhsError::ParameterTooLarge`] when the password, salt, secret,
/// associated data or output length exceeds its maximum.
pub fn encode(
    password: &[u8],
    salt: &[u8],
    t_cost: u32,
    m_cost: u32,
    out_len: usize,
    extras: &EncodingExtras<'_>,
) -> Result<Zeroizing<Vec<u8>>, PhsError> {
    check_len("password", password.len(), MAX_PASSWORD)?;
    check_len("salt", salt.len(), MAX_SALT)?;
    check_len("output", out_len, MAX_OUTLEN)?;
    check_len("secret", extras.secret.len(), MAX_SECRET)?;
    check_len(
        "associated data",
        extras.associated_data.len(),
        MAX_ASSOCIATED_DATA,
    )?;

    let capacity = 5 * 4
        + password.len()
        + salt.len()
        + 4
        + 1
        + 4
        + extras.secret.len()
        + 4
        + extras.associated_data.len();
    let mut buf = Zeroizing::new(Vec::with_capacity(capacity));

    // All lengths were bounded above, so the casts are lossless.
    buf.extend_from_slice(&(password.len() as u32).to_le_bytes());
    buf.extend_from_slice(&(salt.len() as u32).to_le_bytes());
    buf.extend_from_slice(&t_cost.to_le_bytes());
    buf.extend_from_slice(&m_cost.to_le_bytes());
    buf.extend_from_slice(&(out_len as u32).to_le_bytes());
    buf.extend_from_slice(password);
    buf.extend_from_slice(salt);

    buf.extend_from_slice(&extras.lanes.to_le_bytes());
    buf.push(extras.policy.code());

    buf.extend_from_slice(&(extras.secret.len() as u32).to_le_bytes());
    buf.extend_from_slice(extras.secret);

    buf.extend_from_slice(&(extras.associated_data.len() as u32).to_le_bytes());
    buf.extend_from_slice(extras.associated_data);

    debug_assert_eq!(buf.len(), capacity);
    Ok(buf)
}

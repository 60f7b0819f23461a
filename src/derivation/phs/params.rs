//! Parameter definitions and validation.
//!
//! This module publishes the parameter limits of the scheme and defines
//! the configurable cost parameters. Every limit is checked before any
//! memory is allocated, and values outside the limits are rejected rather
//! than clamped.

use core::fmt;

use zeroize::Zeroizing;

use super::error::ParamError;

/// Minimum tag length in bytes.
pub const MIN_OUTLEN: usize = 4;
/// Maximum tag length in bytes (two 64-byte sub-tags).
pub const MAX_OUTLEN: usize = 128;
/// Maximum password length in bytes.
pub const MAX_PASSWORD: usize = 256;
/// Maximum salt length in bytes.
pub const MAX_SALT: usize = 32;
/// Maximum secret (pepper) length in bytes.
pub const MAX_SECRET: usize = 64;
/// Maximum associated data length in bytes.
pub const MAX_ASSOCIATED_DATA: usize = 1024;
/// Minimum number of mixing passes.
pub const MIN_TIME: u32 = 1;
/// Maximum number of mixing passes.
pub const MAX_TIME: u32 = 1 << 20;
/// Minimum memory cost.
pub const MIN_MEMORY: u32 = 1;
/// Maximum memory cost (2^28 blocks, 32 GiB).
pub const MAX_MEMORY: u32 = 24;
/// Maximum number of lanes.
pub const MAX_LANES: u32 = 16;

/// Table size at `m_cost = 0` is `1 << BASE_BLOCKS_LOG2` blocks.
pub(crate) const BASE_BLOCKS_LOG2: u32 = 4;
/// Every lane holds at least this many blocks.
pub(crate) const MIN_LANE_BLOCKS: usize = 1 << BASE_BLOCKS_LOG2;

/// Checks a tag length against `MIN_OUTLEN..=MAX_OUTLEN`.
pub(crate) fn check_output(out_len: usize) -> Result<(), ParamError> {
    if out_len < MIN_OUTLEN {
        return Err(ParamError::OutputTooShort(out_len));
    }

    if out_len > MAX_OUTLEN {
        return Err(ParamError::OutputTooLong(out_len));
    }

    Ok(())
}

/// Checks a pass count against `MIN_TIME..=MAX_TIME`.
pub(crate) fn check_time(t_cost: u32) -> Result<(), ParamError> {
    if t_cost < MIN_TIME {
        return Err(ParamError::TimeCostTooSmall);
    }

    if t_cost > MAX_TIME {
        return Err(ParamError::TimeCostTooLarge(t_cost));
    }

    Ok(())
}

/// Checks a memory cost and a lane count that must fit its table.
pub(crate) fn check_memory(m_cost: u32, lanes: u32) -> Result<(), ParamError> {
    if m_cost < MIN_MEMORY {
        return Err(ParamError::MemoryCostTooSmall);
    }

    if m_cost > MAX_MEMORY {
        return Err(ParamError::MemoryCostTooLarge(m_cost));
    }

    if lanes == 0 || !lanes.is_power_of_two() {
        return Err(ParamError::LanesInvalid(lanes));
    }

    // lanes <= M / MIN_LANE_BLOCKS, i.e. lanes <= 2^m_cost
    if lanes > MAX_LANES || lanes.trailing_zeros() > m_cost {
        return Err(ParamError::LanesTooMany { lanes, m_cost });
    }

    Ok(())
}

/// How reference indices are chosen during mixing.
///
/// Data-independent indices never depend on the password and resist cache
/// timing attacks. Data-dependent indices follow the running state and
/// resist time-memory trade-offs better.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum AddressingPolicy {
    /// Bit-reversal schedule on every pass.
    DataIndependent,
    /// Running-state indices on every pass.
    DataDependent,
    /// Bit-reversal for the first half of the first pass, running-state
    /// indices afterwards.
    #[default]
    Hybrid,
}

impl AddressingPolicy {
    /// Byte used for this policy in the input encoding.
    pub(crate) fn code(self) -> u8 {
        match self {
            AddressingPolicy::DataIndependent => 0,
            AddressingPolicy::DataDependent => 1,
            AddressingPolicy::Hybrid => 2,
        }
    }
}

/// Cost parameters and optional inputs of one hashing configuration.
///
/// The memory cost is exponential: the table holds
/// `16 << m_cost` blocks of 128 bytes, so `m_cost = 12` uses 8 MiB.
#[derive(Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PhsParams {
    /// Number of mixing passes (`MIN_TIME..=MAX_TIME`).
    pub t_cost: u32,
    /// Memory cost exponent (`MIN_MEMORY..=MAX_MEMORY`).
    pub m_cost: u32,
    /// Tag length in bytes (`MIN_OUTLEN..=MAX_OUTLEN`).
    pub out_len: usize,
    /// Number of independent lanes (power of two, at most `MAX_LANES`).
    pub lanes: u32,
    /// Reference index policy.
    pub policy: AddressingPolicy,
    /// Optional secret key mixed into the input (pepper).
    #[cfg_attr(feature = "serde", serde(skip))]
    pub secret: Option<Zeroizing<Vec<u8>>>,
    /// Optional associated data.
    #[cfg_attr(
        feature = "serde",
        serde(skip_serializing_if = "Option::is_none")
    )]
    pub associated_data: Option<Vec<u8>>,
}

impl PhsParams {
    /// Returns a builder initialised with the default parameters.
    pub fn builder() -> PhsParamsBuilder {
        PhsParamsBuilder::new()
    }

    /// Checks every parameter, including the configured tag length.
    pub fn validate(&self) -> Result<(), ParamError> {
        check_output(self.out_len)?;
        self.validate_costs()
    }

    /// Checks the parameters for a tag of `out_len` bytes computed from a
    /// password and salt of the given lengths.
    pub fn validate_inputs(
        &self,
        out_len: usize,
        password_len: usize,
        salt_len: usize,
    ) -> Result<(), ParamError> {
        check_output(out_len)?;
        self.validate_costs()?;

        if password_len > MAX_PASSWORD {
            return Err(ParamError::PasswordTooLong(password_len));
        }

        if salt_len > MAX_SALT {
            return Err(ParamError::SaltTooLong(salt_len));
        }

        Ok(())
    }

    fn validate_costs(&self) -> Result<(), ParamError> {
        check_time(self.t_cost)?;
        check_memory(self.m_cost, self.lanes)?;

        if let Some(secret) = &self.secret {
            if secret.len() > MAX_SECRET {
                return Err(ParamError::SecretTooLong(secret.len()));
            }
        }

        if let Some(ad) = &self.associated_data {
            if ad.len() > MAX_ASSOCIATED_DATA {
                return Err(ParamError::AssociatedDataTooLong(ad.len()));
            }
        }

        Ok(())
    }

    /// Total number of blocks in the table.
    pub fn table_blocks(&self) -> usize {
        1usize << (self.m_cost + BASE_BLOCKS_LOG2)
    }
}

impl Default for PhsParams {
    /// Default parameters: 8 MiB table, 3 passes, 1 lane, 32-byte tag.
    fn default() -> Self {
        Self {
            t_cost: 3,
            m_cost: 12,
            out_len: 32,
            lanes: 1,
            policy: AddressingPolicy::Hybrid,
            secret: None,
            associated_data: None,
        }
    }
}

impl fmt::Debug for PhsParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PhsParams")
            .field("t_cost", &self.t_cost)
            .field("m_cost", &self.m_cost)
            .field("out_len", &self.out_len)
            .field("lanes", &self.lanes)
            .field("policy", &self.policy)
            .field("secret", &self.secret.as_ref().map(|_| "<redacted>"))
            .field(
                "associated_data_len",
                &self.associated_data.as_ref().map(Vec::len),
            )
            .finish()
    }
}

/// Builder used to assemble [`PhsParams`] with validation.
///
/// | Field | Default |
/// |-------|---------|
/// | `t_cost` | `3` |
/// | `m_cost` | `12` |
/// | `out_len` | `32` |
/// | `lanes` | `1` |
/// | `policy` | [`AddressingPolicy::Hybrid`] |
#[derive(Debug, Clone, Default)]
pub struct PhsParamsBuilder {
    params: PhsParams,
}

impl PhsParamsBuilder {
    /// Returns a builder initialised with the default parameters.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn t_cost(mut self, t_cost: u32) -> Self {
        self.params.t_cost = t_cost;
        self
    }

    pub fn m_cost(mut self, m_cost: u32) -> Self {
        self.params.m_cost = m_cost;
        self
    }

    pub fn out_len(mut self, out_len: usize) -> Self {
        self.params.out_len = out_len;
        self
    }

    pub fn lanes(mut self, lanes: u32) -> Self {
        self.params.lanes = lanes;
        self
    }

    pub fn policy(mut self, policy: AddressingPolicy) -> Self {
        self.params.policy = policy;
        self
    }

    pub fn secret(mut self, secret: &[u8]) -> Self {
        self.params.secret = Some(Zeroizing::new(secret.to_vec()));
        self
    }

    pub fn associated_data(mut self, ad: &[u8]) -> Self {
        self.params.associated_data = Some(ad.to_vec());
        self
    }

    /// Validates and returns the parameters.
    pub fn build(self) -> Result<PhsParams, ParamError> {
        self.params.validate()?;
        Ok(self.params)
    }
}

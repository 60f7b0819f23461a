use core::marker::PhantomData;

use log::debug;
use zeroize::Zeroizing;

use super::block::Block;
use super::boundary::{PreTag, finalize, pre_tag};
use super::encoding::{EncodingExtras, encode};
use super::error::PhsError;
use super::expand::expand;
use super::mixing::mix;
use super::params::PhsParams;
use super::table::Table;
use crate::hash::{Blake2b, PrimitiveHash};
use crate::primitives::ct::ConstantTimeEq;

/// A password hasher bound to one parameter set and one primitive hash.
///
/// The primitive is chosen at construction time through `H`; BLAKE2b is
/// the default.
///
/// # Example
///
/// ```rust
/// use cryptal_phs::derivation::{Phs, PhsParams};
///
/// let params = PhsParams::builder().t_cost(1).m_cost(4).build().unwrap();
/// let hasher: Phs = Phs::new(params).unwrap();
///
/// let tag = hasher.hash(b"correct horse", b"16-byte salt....").unwrap();
/// assert_eq!(tag.len(), 32);
/// assert!(hasher.verify(b"correct horse", b"16-byte salt....", &tag).is_ok());
/// ```
pub struct Phs<H: PrimitiveHash = Blake2b> {
    params: PhsParams,
    _hash: PhantomData<fn() -> H>,
}

impl<H: PrimitiveHash> Clone for Phs<H> {
    fn clone(&self) -> Self {
        Self {
            params: self.params.clone(),
            _hash: PhantomData,
        }
    }
}

impl<H: PrimitiveHash> core::fmt::Debug for Phs<H> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Phs")
            .field("hash", &H::NAME)
            .field("params", &self.params)
            .finish()
    }
}

impl<H: PrimitiveHash> Phs<H> {
    /// Creates a hasher after validating `params`.
    ///
    /// # Errors
    ///
    /// Returns [`PhsError::InvalidParameter`] for any out-of-range value.
    pub fn new(params: PhsParams) -> Result<Self, PhsError> {
        params.validate()?;
        Ok(Self {
            params,
            _hash: PhantomData,
        })
    }

    pub fn params(&self) -> &PhsParams {
        &self.params
    }

    /// Runs validation, encoding, expansion and mixing for a tag of
    /// `out_len` bytes.
    fn run(
        &self,
        password: &[u8],
        salt: &[u8],
        out_len: usize,
    ) -> Result<(Vec<Block>, Table), PhsError> {
        let params = &self.params;
        if let Err(err) = params.validate_inputs(out_len, password.len(), salt.len()) {
            debug!("rejected parameters: {err}");
            return Err(err.into());
        }

        debug!(
            "hashing with {}: t_cost={} m_cost={} lanes={} policy={:?} out_len={}",
            H::NAME,
            params.t_cost,
            params.m_cost,
            params.lanes,
            params.policy,
            out_len
        );

        let extras = EncodingExtras {
            lanes: params.lanes,
            policy: params.policy,
            secret: params.secret.as_deref().map_or(&[][..], Vec::as_slice),
            associated_data: params.associated_data.as_deref().unwrap_or(&[]),
        };
        let encoded = encode(
            password,
            salt,
            params.t_cost,
            params.m_cost,
            out_len,
            &extras,
        )?;

        let mut table = expand::<H>(&encoded, params.m_cost, params.lanes)?;
        drop(encoded);

        let states = mix(&mut table, params.t_cost, params.policy)?;
        Ok((states, table))
    }

    /// Hashes `password` with `salt` into `out`.
    ///
    /// The tag length is `out.len()`, which must lie within
    /// `MIN_OUTLEN..=MAX_OUTLEN`. On error, `out` is left untouched.
    pub fn hash_into(&self, password: &[u8], salt: &[u8], out: &mut [u8]) -> Result<(), PhsError> {
        let (states, table) = self.run(password, salt, out.len())?;

        let mut tag = Zeroizing::new(vec![0u8; out.len()]);
        finalize::<H>(states, table, &mut tag)?;
        out.copy_from_slice(&tag);

        debug!("tag of {} bytes produced", out.len());
        Ok(())
    }

    /// Hashes `password` with `salt` into a new tag of the configured
    /// length.
    pub fn hash(&self, password: &[u8], salt: &[u8]) -> Result<Zeroizing<Vec<u8>>, PhsError> {
        let mut tag = Zeroizing::new(vec![0u8; self.params.out_len]);
        self.hash_into(password, salt, &mut tag)?;
        Ok(tag)
    }

    /// Recomputes the tag for `password` and compares it with `expected`
    /// in constant time.
    ///
    /// The tag length is taken from `expected`.
    ///
    /// # Errors
    ///
    /// Returns [`PhsError::VerificationFailed`] on mismatch, or any error
    /// [`hash_into`](Self::hash_into) can return.
    pub fn verify(&self, password: &[u8], salt: &[u8], expected: &[u8]) -> Result<(), PhsError> {
        let mut tag = Zeroizing::new(vec![0u8; expected.len()]);
        self.hash_into(password, salt, &mut tag)?;

        if tag[..].ct_eq(expected) {
            Ok(())
        } else {
            debug!("tag verification failed");
            Err(PhsError::VerificationFailed)
        }
    }

    /// Client side of server relief: everything except the final
    /// permute-and-XOR-back step, for a tag of the configured length.
    ///
    /// Pass the result to [`server_finish`](super::boundary::server_finish).
    pub fn client_hash(&self, password: &[u8], salt: &[u8]) -> Result<PreTag, PhsError> {
        let out_len = self.params.out_len;
        let (states, table) = self.run(password, salt, out_len)?;
        Ok(pre_tag::<H>(states, table, out_len))
    }
}

/// Hashes `password` with `salt` into `out` with the default primitive,
/// one lane and the hybrid addressing policy.
///
/// This is the classic `PHS(out, in, salt, t_cost, m_cost)` entry point;
/// the tag length is `out.len()`. On error, `out` is left untouched.
///
/// Zero costs are rejected, as is any tag length outside
/// `MIN_OUTLEN..=MAX_OUTLEN`.
pub fn phs(
    out: &mut [u8],
    password: &[u8],
    salt: &[u8],
    t_cost: u32,
    m_cost: u32,
) -> Result<(), PhsError> {
    let params = PhsParams {
        t_cost,
        m_cost,
        out_len: out.len(),
        ..PhsParams::default()
    };
    Phs::<Blake2b>::new(params)?.hash_into(password, salt, out)
}

/// Status-code form of [`phs`]: `0` on success, otherwise
/// [`PhsError::status_code`].
pub fn phs_status(out: &mut [u8], password: &[u8], salt: &[u8], t_cost: u32, m_cost: u32) -> i32 {
    match phs(out, password, salt, t_cost, m_cost) {
        Ok(()) => 0,
        Err(err) => err.status_code(),
    }
}

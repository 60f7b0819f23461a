/// Constant-time comparison utilities.
///
/// Tag verification must not leak, through timing, how many leading bytes
/// of a candidate tag were correct. Implementations of this trait compare
/// every byte regardless of where the first difference occurs.
pub trait ConstantTimeEq {
    /// Returns `true` if `self == other`, in constant time.
    ///
    /// This method must not introduce data-dependent branches or early exits.
    fn ct_eq(&self, other: &Self) -> bool;
}

impl ConstantTimeEq for u8 {
    #[inline(always)]
    fn ct_eq(&self, other: &Self) -> bool {
        ((((*self ^ *other) as u64).wrapping_sub(1) >> 63) as u8) == 1
    }
}

impl ConstantTimeEq for [u8] {
    /// Constant-time equality test for byte slices.
    ///
    /// The lengths are public (a tag length is part of the parameters), so
    /// a length mismatch returns early. For equal lengths, all bytes are
    /// XORed and accumulated before the single final comparison.
    #[inline(always)]
    fn ct_eq(&self, other: &Self) -> bool {
        if self.len() != other.len() {
            return false;
        }

        let diff = self
            .iter()
            .zip(other)
            .map(|(a, b)| a ^ b)
            .fold(0u8, |acc, v| acc | v);

        diff.ct_eq(&0)
    }
}

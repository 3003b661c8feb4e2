use crate::WideUint;

/// `rand_support` functions
impl WideUint {
    // this is tested by `testcrate/tests/rand.rs`

    /// Randomly-assigns `self` using a `rand_core::RngCore` random number
    /// generator. This works by calling `RngCore::try_fill_bytes` on a little
    /// endian byte buffer, assigning the buffer to `self`, and returning the
    /// result.
    ///
    /// ```
    /// // Example using the `rand_xoshiro` crate.
    /// use fltconv::WideUint;
    /// use rand_xoshiro::{rand_core::SeedableRng, Xoshiro128StarStar};
    ///
    /// let mut rng = Xoshiro128StarStar::seed_from_u64(0);
    /// let mut x = WideUint::ZERO;
    /// x.rand_assign_using(&mut rng).unwrap();
    /// let mut y = WideUint::ZERO;
    /// y.rand_assign_using(&mut rng).unwrap();
    /// assert_ne!(x, y);
    /// ```
    pub fn rand_assign_using<R>(&mut self, rng: &mut R) -> Result<(), rand_core::Error>
    where
        R: rand_core::RngCore,
    {
        let mut bytes = [0u8; 16];
        let result = rng.try_fill_bytes(&mut bytes);
        *self = WideUint::from_u128(u128::from_le_bytes(bytes));
        result
    }
}

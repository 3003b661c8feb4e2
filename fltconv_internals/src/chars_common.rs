//! Common conversion status types and decimal scaling tables

use core::fmt;

/// The text layout produced by `to_chars` and accepted by `from_chars`
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CharsFormat {
    /// Fixed layout for decimal exponents in a window around zero, scientific
    /// layout outside of it. Trailing fractional zeros are trimmed.
    #[default]
    General,
    /// One digit before the point and a signed exponent after `e`
    Scientific,
    /// All integer digits, no exponent
    Fixed,
    /// Hexadecimal mantissa digits with a signed binary exponent after `p`
    Hex,
}

/// A conversion error
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CharsError {
    /// A well formed literal has a magnitude that the target float type
    /// cannot represent. This includes nonzero literals that round to zero.
    ValueTooLarge,
    /// There is no parseable literal at the start of the input, or the output
    /// buffer is too small
    InvalidArgument,
}

impl fmt::Display for CharsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self:?}")
    }
}

/// The status of a conversion. `pos` is the number of bytes written by
/// `to_chars` or the number of bytes consumed by `from_chars`.
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CharsResult {
    pub pos: usize,
    pub err: Option<CharsError>,
}

impl CharsResult {
    /// A successful result ending at `pos`
    #[inline]
    pub const fn ok(pos: usize) -> Self {
        Self { pos, err: None }
    }

    /// A failed result ending at `pos`
    #[inline]
    pub const fn err(pos: usize, err: CharsError) -> Self {
        Self {
            pos,
            err: Some(err),
        }
    }

    #[inline]
    pub const fn is_ok(&self) -> bool {
        self.err.is_none()
    }

    /// Converts into a `Result` carrying the end position on success. Note
    /// that the position of a `ValueTooLarge` parse is lost this way.
    #[inline]
    pub const fn into_result(self) -> Result<usize, CharsError> {
        match self.err {
            None => Ok(self.pos),
            Some(e) => Err(e),
        }
    }
}

/// Powers of ten that fit in a `u64`
pub const POW10_U64: [u64; 20] = [
    1,
    10,
    100,
    1_000,
    10_000,
    100_000,
    1_000_000,
    10_000_000,
    100_000_000,
    1_000_000_000,
    10_000_000_000,
    100_000_000_000,
    1_000_000_000_000,
    10_000_000_000_000,
    100_000_000_000_000,
    1_000_000_000_000_000,
    10_000_000_000_000_000,
    100_000_000_000_000_000,
    1_000_000_000_000_000_000,
    10_000_000_000_000_000_000,
];

/// The largest power of ten that fits in a `u64`
pub const MAX_POW10_U64: u32 = 19;

/// Returns `floor(e * log10(2))`, exact for `-2620 <= e <= 2620`
#[inline]
pub const fn floor_log10_pow2(e: i32) -> i32 {
    // 315653 / 2^20 is log10(2) rounded up in u12p20 fixed point
    (e * 315653) >> 20
}

#[test]
fn pow10_u64() {
    let mut x = 1u64;
    for (i, p) in POW10_U64.iter().enumerate() {
        assert_eq!(*p, x);
        if i < (MAX_POW10_U64 as usize) {
            x *= 10;
        }
    }
    assert!(POW10_U64[MAX_POW10_U64 as usize].checked_mul(10).is_none());
}

#[test]
fn log10_pow2() {
    // log10(2) to 14 places is far more precise than needed in this range
    for e in -1200i32..=1200 {
        let expected = ((e as i64) * 30102999566398).div_euclid(100000000000000);
        assert_eq!(floor_log10_pow2(e) as i64, expected, "{e}");
    }
}

use core::{
    cmp::Ordering,
    fmt,
    ops::{Neg, Not},
};

use const_fn::const_fn;

use crate::widening::mul64x64_128;

/// An unsigned 128 bit integer stored as two 64 bit words, with value
/// `high * 2^64 + low`. All arithmetic wraps modulo 2^128.
///
/// This is the accumulator used for exact decimal scaling. It works the same
/// on every target, and converts losslessly to and from `u128`.
///
/// ```
/// use fltconv::WideUint;
///
/// let x = WideUint::new(1, 0);
/// assert_eq!(x.to_u128(), 1 << 64);
/// assert_eq!(x - 1u8, WideUint::new(0, u64::MAX));
/// // a negative value is always less than any `WideUint`
/// assert!(WideUint::ZERO > -1i32);
/// assert_eq!(x.high_bit(), 64);
/// ```
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WideUint {
    // the derived `Ord` depends on `high` coming first
    pub high: u64,
    pub low: u64,
}

/// Compares `lhs` against a narrower integer that has been split into its
/// sign and its `WideUint` conversion. Negative integers are always less.
const fn cmp_narrow(lhs: WideUint, rhs_negative: bool, rhs: WideUint) -> Ordering {
    if rhs_negative || rhs.ult(lhs) {
        Ordering::Greater
    } else if lhs.const_eq(rhs) {
        Ordering::Equal
    } else {
        Ordering::Less
    }
}

/// Saturates a shift amount at 128, anything at or above which shifts out
/// every bit
const fn shift_amount(s: u128) -> u32 {
    if s > 128 {
        128
    } else {
        s as u32
    }
}

impl WideUint {
    pub const BITS: u32 = 128;
    pub const MAX: Self = Self::new(u64::MAX, u64::MAX);
    pub const MIN: Self = Self::ZERO;
    pub const ONE: Self = Self::new(0, 1);
    pub const ZERO: Self = Self::new(0, 0);

    #[inline]
    pub const fn new(high: u64, low: u64) -> Self {
        Self { high, low }
    }

    #[inline]
    pub const fn from_u64(x: u64) -> Self {
        Self::new(0, x)
    }

    /// Sign extends `x`
    #[inline]
    pub const fn from_i64(x: i64) -> Self {
        Self::new(if x < 0 { u64::MAX } else { 0 }, x as u64)
    }

    #[inline]
    pub const fn from_u128(x: u128) -> Self {
        Self::new((x >> 64) as u64, x as u64)
    }

    #[inline]
    pub const fn to_u128(self) -> u128 {
        ((self.high as u128) << 64) | (self.low as u128)
    }

    /// Lossy conversion to the nearest `f64` of `high * 2^64 + low`, rounded
    /// once with ties to even
    pub fn to_f64(self) -> f64 {
        self.to_u128() as f64
    }

    /// Lossy conversion to the nearest `f32` of `high * 2^64 + low`, rounded
    /// once with ties to even. Values at or above `f32::MAX` plus half an ulp
    /// become infinity.
    pub fn to_f32(self) -> f32 {
        self.to_u128() as f32
    }

    #[inline]
    pub const fn is_zero(self) -> bool {
        (self.high == 0) && (self.low == 0)
    }

    #[inline]
    pub const fn const_eq(self, rhs: Self) -> bool {
        (self.high == rhs.high) && (self.low == rhs.low)
    }

    /// Unsigned less-than
    #[inline]
    pub const fn ult(self, rhs: Self) -> bool {
        (self.high < rhs.high) || ((self.high == rhs.high) && (self.low < rhs.low))
    }

    #[inline]
    pub const fn leading_zeros(self) -> u32 {
        if self.high != 0 {
            self.high.leading_zeros()
        } else {
            64 + self.low.leading_zeros()
        }
    }

    /// Returns the index of the most significant set bit. Note that both
    /// `ZERO` and `ONE` return 0.
    #[inline]
    pub const fn high_bit(self) -> u32 {
        if self.is_zero() {
            0
        } else {
            127 - self.leading_zeros()
        }
    }

    #[inline]
    pub const fn not(self) -> Self {
        Self::new(!self.high, !self.low)
    }

    #[inline]
    pub const fn and(self, rhs: Self) -> Self {
        Self::new(self.high & rhs.high, self.low & rhs.low)
    }

    #[inline]
    pub const fn or(self, rhs: Self) -> Self {
        Self::new(self.high | rhs.high, self.low | rhs.low)
    }

    #[inline]
    pub const fn xor(self, rhs: Self) -> Self {
        Self::new(self.high ^ rhs.high, self.low ^ rhs.low)
    }

    /// Left shift. Amounts of 128 and above return zero.
    pub const fn shl(self, s: u32) -> Self {
        if s == 0 {
            self
        } else if s < 64 {
            Self::new((self.high << s) | (self.low >> (64 - s)), self.low << s)
        } else if s < 128 {
            Self::new(self.low << (s - 64), 0)
        } else {
            Self::ZERO
        }
    }

    /// Logical right shift. Amounts of 128 and above return zero.
    pub const fn shr(self, s: u32) -> Self {
        if s == 0 {
            self
        } else if s < 64 {
            Self::new(self.high >> s, (self.low >> s) | (self.high << (64 - s)))
        } else if s < 128 {
            Self::new(0, self.high >> (s - 64))
        } else {
            Self::ZERO
        }
    }

    pub const fn wrapping_add(self, rhs: Self) -> Self {
        let low = self.low.wrapping_add(rhs.low);
        // the low word wrapped around if it ended up less than an addend
        let carry = (low < self.low) as u64;
        Self::new(self.high.wrapping_add(rhs.high).wrapping_add(carry), low)
    }

    pub const fn wrapping_sub(self, rhs: Self) -> Self {
        let borrow = (self.low < rhs.low) as u64;
        Self::new(
            self.high.wrapping_sub(rhs.high).wrapping_sub(borrow),
            self.low.wrapping_sub(rhs.low),
        )
    }

    /// Multiplies modulo 2^128. The full product of the low words is
    /// computed, the cross terms only affect the high word, and the product
    /// of the high words is entirely shifted out.
    pub const fn wrapping_mul(self, rhs: Self) -> Self {
        let tmp = mul64x64_128(self.low, rhs.low);
        Self::new(
            tmp.high
                .wrapping_add(self.high.wrapping_mul(rhs.low))
                .wrapping_add(self.low.wrapping_mul(rhs.high)),
            tmp.low,
        )
    }

    /// Two's complement negation
    #[inline]
    pub const fn wrapping_neg(self) -> Self {
        Self::ZERO.wrapping_sub(self)
    }

    /// Increment-assigns `self`, wrapping at `MAX`
    #[const_fn(cfg(feature = "const_support"))]
    #[inline]
    pub const fn inc_assign(&mut self) {
        self.low = self.low.wrapping_add(1);
        if self.low == 0 {
            self.high = self.high.wrapping_add(1);
        }
    }

    /// Decrement-assigns `self`, wrapping at zero
    #[const_fn(cfg(feature = "const_support"))]
    #[inline]
    pub const fn dec_assign(&mut self) {
        if self.low == 0 {
            self.high = self.high.wrapping_sub(1);
        }
        self.low = self.low.wrapping_sub(1);
    }

    /// Divides `self` by `rhs` and returns the quotient and remainder, or
    /// `None` if `rhs` is zero. Both come out of the same shift-subtract
    /// loop, which runs at most 128 times.
    pub const fn div_rem(self, rhs: Self) -> Option<(Self, Self)> {
        if rhs.is_zero() {
            return None
        }
        if self.ult(rhs) {
            return Some((Self::ZERO, self))
        }
        if self.const_eq(rhs) {
            return Some((Self::ONE, Self::ZERO))
        }
        let shift = self.high_bit() - rhs.high_bit();
        let mut denom = rhs.shl(shift);
        let mut quo = Self::ZERO;
        let mut rem = self;
        let mut i = 0;
        while i <= shift {
            quo = quo.shl(1);
            if !rem.ult(denom) {
                rem = rem.wrapping_sub(denom);
                quo.low |= 1;
            }
            denom = denom.shr(1);
            i += 1;
        }
        Some((quo, rem))
    }

    /// Returns `None` if `rhs` is zero
    #[inline]
    pub const fn checked_div(self, rhs: Self) -> Option<Self> {
        match self.div_rem(rhs) {
            Some((quo, _)) => Some(quo),
            None => None,
        }
    }

    /// Returns `None` if `rhs` is zero
    #[inline]
    pub const fn checked_rem(self, rhs: Self) -> Option<Self> {
        match self.div_rem(rhs) {
            Some((_, rem)) => Some(rem),
            None => None,
        }
    }

    #[track_caller]
    const fn panicking_div(self, rhs: Self) -> Self {
        match self.checked_div(rhs) {
            Some(quo) => quo,
            None => panic!("attempt to divide by zero"),
        }
    }

    #[track_caller]
    const fn panicking_rem(self, rhs: Self) -> Self {
        match self.checked_rem(rhs) {
            Some(rem) => rem,
            None => panic!("attempt to calculate the remainder with a divisor of zero"),
        }
    }
}

wide_binop!(
    Add add AddAssign add_assign => wrapping_add;
    Sub sub SubAssign sub_assign => wrapping_sub;
    Mul mul MulAssign mul_assign => wrapping_mul;
    Div div DivAssign div_assign => panicking_div;
    Rem rem RemAssign rem_assign => panicking_rem;
    BitAnd bitand BitAndAssign bitand_assign => and;
    BitOr bitor BitOrAssign bitor_assign => or;
    BitXor bitxor BitXorAssign bitxor_assign => xor;
);

wide_shift!(u8 u16 u32 u64 u128 usize i8 i16 i32 i64 i128 isize);

wide_narrow!(
    u8 x => false, WideUint::from_u64(x as u64);
    u16 x => false, WideUint::from_u64(x as u64);
    u32 x => false, WideUint::from_u64(x as u64);
    u64 x => false, WideUint::from_u64(x);
    usize x => false, WideUint::from_u64(x as u64);
    u128 x => false, WideUint::from_u128(x);
    i8 x => x < 0, WideUint::from_i64(x as i64);
    i16 x => x < 0, WideUint::from_i64(x as i64);
    i32 x => x < 0, WideUint::from_i64(x as i64);
    i64 x => x < 0, WideUint::from_i64(x);
    isize x => x < 0, WideUint::from_i64(x as i64);
    i128 x => x < 0, WideUint::from_u128(x as u128);
);

impl From<WideUint> for u128 {
    #[inline]
    fn from(x: WideUint) -> u128 {
        x.to_u128()
    }
}

impl Not for WideUint {
    type Output = WideUint;

    #[inline]
    fn not(self) -> WideUint {
        WideUint::not(self)
    }
}

impl Neg for WideUint {
    type Output = WideUint;

    #[inline]
    fn neg(self) -> WideUint {
        self.wrapping_neg()
    }
}

impl fmt::Display for WideUint {
    /// Formats in decimal
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const CHUNK: WideUint = WideUint::from_u64(10_000_000_000_000_000_000);
        // 2^128 has 39 decimal digits
        let mut buf = [b'0'; 39];
        let mut i = buf.len();
        let mut x = *self;
        while let Some((quo, rem)) = x.div_rem(CHUNK) {
            let mut chunk = rem.low;
            if quo.is_zero() {
                loop {
                    i -= 1;
                    buf[i] = b'0' + ((chunk % 10) as u8);
                    chunk /= 10;
                    if chunk == 0 {
                        break
                    }
                }
                break
            }
            // interior chunks are zero padded
            for _ in 0..19 {
                i -= 1;
                buf[i] = b'0' + ((chunk % 10) as u8);
                chunk /= 10;
            }
            x = quo;
        }
        let s = core::str::from_utf8(&buf[i..]).map_err(|_| fmt::Error)?;
        f.pad_integral(true, "", s)
    }
}

impl fmt::LowerHex for WideUint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::LowerHex::fmt(&self.to_u128(), f)
    }
}

use core::cmp::Ordering;

use const_fn::const_fn;
use fltconv_internals::*;

/// A fixed capacity unsigned integer made of `N` little endian `u64` digits,
/// kept entirely on the stack. This is what exact scaling by large powers of
/// ten and two runs on. Operations that can exceed the capacity report it
/// instead of growing.
///
/// ```
/// use fltconv::Bignum;
///
/// let mut x = Bignum::<4>::from_u64(3);
/// assert!(!x.mul_pow10_assign(40));
/// let mut div = Bignum::<4>::from_u64(1);
/// assert!(!div.mul_pow10_assign(39));
/// let mut quo = Bignum::zero();
/// let mut rem = Bignum::zero();
/// Bignum::udivide(&mut quo, &mut rem, &x, &div).unwrap();
/// assert_eq!(quo, Bignum::from_u64(30));
/// assert!(rem.is_zero());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Bignum<const N: usize> {
    digits: [u64; N],
}

impl<const N: usize> Bignum<N> {
    /// The capacity in bits
    pub const BITS: usize = N * 64;

    #[inline]
    pub const fn zero() -> Self {
        Self { digits: [0; N] }
    }

    #[inline]
    pub const fn from_u64(x: u64) -> Self {
        let mut digits = [0; N];
        digits[0] = x;
        Self { digits }
    }

    #[inline]
    pub const fn from_wide(x: WideUint) -> Self {
        let mut digits = [0; N];
        digits[0] = x.low;
        digits[1] = x.high;
        Self { digits }
    }

    /// Returns the digit at index `i`
    #[inline]
    pub const fn digit(&self, i: usize) -> u64 {
        self.digits[i]
    }

    pub const fn is_zero(&self) -> bool {
        const_for!(i in {0..N} {
            if self.digits[i] != 0 {
                return false
            }
        });
        true
    }

    /// Returns the number of leading zeros
    pub const fn lz(&self) -> usize {
        const_for!(i in {0..N}.rev() {
            if self.digits[i] != 0 {
                return ((N - 1 - i) * 64) + (self.digits[i].leading_zeros() as usize)
            }
        });
        Self::BITS
    }

    /// Returns the number of significant bits
    #[inline]
    pub const fn sig(&self) -> usize {
        Self::BITS - self.lz()
    }

    /// Returns bit `i`
    #[inline]
    pub const fn get(&self, i: usize) -> bool {
        ((self.digits[i / 64] >> (i % 64)) & 1) != 0
    }

    pub const fn const_cmp(&self, rhs: &Self) -> Ordering {
        const_for!(i in {0..N}.rev() {
            if self.digits[i] != rhs.digits[i] {
                return if self.digits[i] < rhs.digits[i] {
                    Ordering::Less
                } else {
                    Ordering::Greater
                }
            }
        });
        Ordering::Equal
    }

    /// Unsigned less-than
    #[inline]
    pub const fn ult(&self, rhs: &Self) -> bool {
        matches!(self.const_cmp(rhs), Ordering::Less)
    }

    /// Assigns `cin + (self * rhs)` to `self` and returns the overflow
    #[const_fn(cfg(feature = "const_support"))]
    pub const fn short_cin_mul(&mut self, cin: u64, rhs: u64) -> u64 {
        let mut carry = cin;
        const_for!(i in {0..N} {
            let tmp = widen_mul_add(self.digits[i], rhs, carry);
            self.digits[i] = tmp.0;
            carry = tmp.1;
        });
        carry
    }

    /// Multiply-assigns `10^exp` and returns if overflow happened
    #[const_fn(cfg(feature = "const_support"))]
    pub const fn mul_pow10_assign(&mut self, exp: u32) -> bool {
        let mut exp = exp;
        let mut oflow = false;
        while exp > MAX_POW10_U64 {
            oflow |= self.short_cin_mul(0, POW10_U64[MAX_POW10_U64 as usize]) != 0;
            exp -= MAX_POW10_U64;
        }
        oflow |= self.short_cin_mul(0, POW10_U64[exp as usize]) != 0;
        oflow
    }

    /// Add-assigns `rhs` and returns the carry
    #[const_fn(cfg(feature = "const_support"))]
    pub const fn add_assign(&mut self, rhs: &Self) -> bool {
        let mut carry = 0;
        const_for!(i in {0..N} {
            let tmp = widen_add(self.digits[i], rhs.digits[i], carry);
            self.digits[i] = tmp.0;
            carry = tmp.1;
        });
        carry != 0
    }

    /// Subtract-assigns `rhs` and returns the borrow
    #[const_fn(cfg(feature = "const_support"))]
    pub const fn sub_assign(&mut self, rhs: &Self) -> bool {
        let mut borrow = false;
        const_for!(i in {0..N} {
            let (tmp, b0) = self.digits[i].overflowing_sub(rhs.digits[i]);
            let (tmp, b1) = tmp.overflowing_sub(borrow as u64);
            self.digits[i] = tmp;
            borrow = b0 || b1;
        });
        borrow
    }

    /// Left-shift-assigns by `s` bits and returns if any set bits were shifted
    /// out
    #[const_fn(cfg(feature = "const_support"))]
    pub const fn shl_assign(&mut self, s: usize) -> bool {
        if s == 0 {
            return false
        }
        let oflow = !self.is_zero() && (s > self.lz());
        let digits = s / 64;
        let bits = s % 64;
        // top down so that the sources are not overwritten before being read
        const_for!(i in {0..N}.rev() {
            let mut x = 0;
            if i >= digits {
                x = self.digits[i - digits] << bits;
                if (bits != 0) && (i > digits) {
                    x |= self.digits[i - digits - 1] >> (64 - bits);
                }
            }
            self.digits[i] = x;
        });
        oflow
    }

    /// Logical-right-shift-assigns by `s` bits
    #[const_fn(cfg(feature = "const_support"))]
    pub const fn shr_assign(&mut self, s: usize) {
        if s == 0 {
            return
        }
        let digits = s / 64;
        let bits = s % 64;
        const_for!(i in {0..N} {
            let mut x = 0;
            if (i + digits) < N {
                x = self.digits[i + digits] >> bits;
                if (bits != 0) && ((i + digits + 1) < N) {
                    x |= self.digits[i + digits + 1] << (64 - bits);
                }
            }
            self.digits[i] = x;
        });
    }

    /// Unsigned-divides `duo` by `div` and assigns the quotient to `quo` and
    /// remainder to `rem`. Returns `None` if `div.is_zero()`.
    #[const_fn(cfg(feature = "const_support"))]
    pub const fn udivide(quo: &mut Self, rem: &mut Self, duo: &Self, div: &Self) -> Option<()> {
        if div.is_zero() {
            return None
        }
        *quo = Self::zero();
        *rem = *duo;
        if duo.ult(div) {
            return Some(())
        }
        let shift = duo.sig() - div.sig();
        let mut denom = *div;
        denom.shl_assign(shift);
        let mut i = 0;
        while i <= shift {
            quo.shl_assign(1);
            if !rem.ult(&denom) {
                rem.sub_assign(&denom);
                quo.digits[0] |= 1;
            }
            denom.shr_assign(1);
            i += 1;
        }
        Some(())
    }

    /// Returns the 64 most significant bits `top`, an exponent `e`, and a
    /// sticky flag, such that `self` is `top * 2^e` plus some nonzero amount
    /// less than `2^e` if the sticky flag is set. `top` is normalized so that
    /// its most significant bit is set, unless `self` is zero.
    pub const fn top_u64(&self) -> (u64, i64, bool) {
        let sig = self.sig();
        if sig == 0 {
            return (0, 0, false)
        }
        if sig <= 64 {
            return (self.digits[0] << (64 - sig), -((64 - sig) as i64), false)
        }
        let lo = sig - 64;
        let d = lo / 64;
        let b = lo % 64;
        let mut top = self.digits[d] >> b;
        if b != 0 {
            top |= self.digits[d + 1] << (64 - b);
        }
        let mut sticky = (b != 0) && ((self.digits[d] << (64 - b)) != 0);
        const_for!(i in {0..d} {
            sticky |= self.digits[i] != 0;
        });
        (top, lo as i64, sticky)
    }
}

impl<const N: usize> PartialOrd for Bignum<N> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<const N: usize> Ord for Bignum<N> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.const_cmp(other)
    }
}

#[test]
fn shifts() {
    let mut x = Bignum::<3>::from_u64(0b1011);
    assert!(!x.shl_assign(130));
    assert_eq!(x.digit(2), 0b1011 << 2);
    assert_eq!(x.sig(), 134);
    assert!(x.get(130) && x.get(131) && !x.get(132) && x.get(133));
    x.shr_assign(67);
    assert_eq!(x.digit(1), 0b101);
    assert_eq!(x.digit(0), 1 << 63);
    let mut y = x;
    assert!(!y.shl_assign(125));
    assert!(y.shl_assign(1));
    assert_eq!(x.top_u64(), (0b1011 << 60, 3, false));
    x.short_cin_mul(1, 1);
    assert_eq!(x.top_u64(), (0b1011 << 60, 3, true));
}

#[test]
fn arithmetic() {
    let mut x = Bignum::<2>::from_wide(WideUint::MAX);
    assert_eq!(x.short_cin_mul(5, 1), 1);
    assert_eq!(x, Bignum::from_u64(4));
    let mut y = Bignum::<2>::from_wide(WideUint::MAX);
    assert!(y.add_assign(&Bignum::from_u64(1)));
    assert!(y.is_zero());
    assert!(y.sub_assign(&Bignum::from_u64(1)));
    assert_eq!(y, Bignum::from_wide(WideUint::MAX));
    let mut z = Bignum::<2>::from_u64(1);
    assert!(!z.mul_pow10_assign(38));
    assert!(z.mul_pow10_assign(1));
}

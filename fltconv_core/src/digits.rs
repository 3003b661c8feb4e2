//! Decimal digit generation for `to_chars`

use core::cmp::Ordering;

use fltconv_internals::floor_log10_pow2;

use crate::{Bignum, Decoded};

/// The largest intermediate is the mantissa of a subnormal `f64` scaled up by
/// `10^324` and a few more bits, which fits comfortably
type Big = Bignum<24>;

/// Enough for the exact decimal expansion of any `f64`, which is at most 767
/// significant digits
pub(crate) const MAX_DIGITS: usize = 800;

/// A decimal digit string with value `sum(buf[i] * 10^(exp - i))`. Digits past
/// `len` are implied zeros.
pub(crate) struct Digits {
    buf: [u8; MAX_DIGITS],
    pub len: usize,
    /// The decimal exponent of the first digit
    pub exp: i32,
}

/// How far precision bounded digit generation goes
#[derive(Debug, Clone, Copy)]
pub(crate) enum Limit {
    /// This many significant digits
    Significant(usize),
    /// Down to this many digits after the decimal point
    Fractional(usize),
}

impl Digits {
    /// The representation of zero, which has no digits
    pub const fn zero() -> Self {
        Self::empty(0)
    }

    const fn empty(exp: i32) -> Self {
        Self {
            buf: [0; MAX_DIGITS],
            len: 0,
            exp,
        }
    }

    /// Returns digit `i`, which is zero past the end
    #[inline]
    pub fn get(&self, i: usize) -> u8 {
        if i < self.len {
            self.buf[i]
        } else {
            0
        }
    }

    fn push(&mut self, digit: u8) {
        debug_assert!(digit < 10);
        self.buf[self.len] = digit;
        self.len += 1;
    }

    fn trim_trailing_zeros(&mut self) {
        while (self.len > 0) && (self.buf[self.len - 1] == 0) {
            self.len -= 1;
        }
    }

    /// Adds one unit in the last place. A carry out of all nines leaves a
    /// single `1` one decimal place higher.
    fn round_up(&mut self) {
        let mut i = self.len;
        while i > 0 {
            i -= 1;
            if self.buf[i] < 9 {
                self.buf[i] += 1;
                self.len = i + 1;
                return
            }
        }
        self.buf[0] = 1;
        self.len = 1;
        self.exp += 1;
    }
}

/// Subtracts `s` from `r` until `r < s` and returns the number of
/// subtractions. `r < 10 * s` is required.
fn next_digit(r: &mut Big, s: &Big) -> u8 {
    let mut digit = 0;
    while !r.ult(s) {
        r.sub_assign(s);
        digit += 1;
    }
    debug_assert!(digit < 10);
    digit
}

/// Returns `floor(log2(mantissa * 2^exponent))`
fn floor_log2(dec: &Decoded) -> i32 {
    (63 - (dec.mantissa.leading_zeros() as i32)) + dec.exponent
}

/// Returns the shortest digits that parse back to the nonzero finite value of
/// `dec`. This is the free-format algorithm of Burger and Dybvig, run on exact
/// integers: `r / s` is the value, `m_plus / s` and `m_minus / s` are the
/// distances to the rounding boundaries halfway to the neighboring floats.
pub(crate) fn shortest(dec: &Decoded) -> Digits {
    let m = dec.mantissa;
    let e = dec.exponent;
    // boundaries are included with round-half-even parsing
    let even = (m & 1) == 0;
    let mut r = Big::from_u64(m);
    let mut s = Big::from_u64(1);
    let mut m_plus = Big::from_u64(1);
    let mut m_minus = Big::from_u64(1);
    // the shifts here cannot overflow
    if e >= 0 {
        let e = e as usize;
        if dec.uneven_gaps {
            r.shl_assign(e + 2);
            s.shl_assign(2);
            m_plus.shl_assign(e + 1);
            m_minus.shl_assign(e);
        } else {
            r.shl_assign(e + 1);
            s.shl_assign(1);
            m_plus.shl_assign(e);
            m_minus.shl_assign(e);
        }
    } else {
        let e = e.unsigned_abs() as usize;
        if dec.uneven_gaps {
            r.shl_assign(2);
            s.shl_assign(e + 2);
            m_plus.shl_assign(1);
        } else {
            r.shl_assign(1);
            s.shl_assign(e + 1);
        }
    }
    // estimate `k` so that the high boundary is just below `10^k`
    let mut k = floor_log10_pow2(floor_log2(dec)) + 1;
    if k >= 0 {
        s.mul_pow10_assign(k as u32);
    } else {
        let k = k.unsigned_abs();
        r.mul_pow10_assign(k);
        m_plus.mul_pow10_assign(k);
        m_minus.mul_pow10_assign(k);
    }
    let high_reaches = |r: &Big, m_plus: &Big, s: &Big| {
        let mut high = *r;
        high.add_assign(m_plus);
        match high.const_cmp(s) {
            Ordering::Less => false,
            Ordering::Equal => even,
            Ordering::Greater => true,
        }
    };
    while high_reaches(&r, &m_plus, &s) {
        s.short_cin_mul(0, 10);
        k += 1;
    }
    loop {
        let mut r10 = r;
        r10.short_cin_mul(0, 10);
        let mut m_plus10 = m_plus;
        m_plus10.short_cin_mul(0, 10);
        if high_reaches(&r10, &m_plus10, &s) {
            break
        }
        r = r10;
        m_plus = m_plus10;
        m_minus.short_cin_mul(0, 10);
        k -= 1;
    }

    let mut digits = Digits::empty(k - 1);
    loop {
        r.short_cin_mul(0, 10);
        m_plus.short_cin_mul(0, 10);
        m_minus.short_cin_mul(0, 10);
        let digit = next_digit(&mut r, &s);
        let low_ok = match r.const_cmp(&m_minus) {
            Ordering::Less => true,
            Ordering::Equal => even,
            Ordering::Greater => false,
        };
        let high_ok = high_reaches(&r, &m_plus, &s);
        match (low_ok, high_ok) {
            (false, false) => {
                digits.push(digit);
            }
            (true, false) => {
                digits.push(digit);
                break
            }
            (false, true) => {
                digits.push(digit + 1);
                break
            }
            (true, true) => {
                // both candidates round trip, pick the closer one
                let mut r2 = r;
                r2.shl_assign(1);
                let up = match r2.const_cmp(&s) {
                    Ordering::Less => false,
                    Ordering::Equal => (digit & 1) == 1,
                    Ordering::Greater => true,
                };
                digits.push(digit + (up as u8));
                break
            }
        }
    }
    digits.trim_trailing_zeros();
    digits
}

/// Returns the correctly rounded digits of the nonzero finite value of `dec`,
/// stopping at `limit`. Ties round to an even last digit.
pub(crate) fn exact(dec: &Decoded, limit: Limit) -> Digits {
    let mut r = Big::from_u64(dec.mantissa);
    let mut s = Big::from_u64(1);
    if dec.exponent >= 0 {
        r.shl_assign(dec.exponent as usize);
    } else {
        s.shl_assign(dec.exponent.unsigned_abs() as usize);
    }
    // this is `floor(log10(value))` or one less
    let mut k = floor_log10_pow2(floor_log2(dec));
    if k >= 0 {
        s.mul_pow10_assign(k as u32);
    } else {
        r.mul_pow10_assign(k.unsigned_abs());
    }
    let mut s10 = s;
    s10.short_cin_mul(0, 10);
    if !r.ult(&s10) {
        s = s10;
        k += 1;
    }
    // `1 <= r / s < 10` from here on, and `r / s` is always the value of the
    // next digit position

    let want = match limit {
        Limit::Significant(n) => i64::try_from(n).unwrap_or(i64::MAX),
        Limit::Fractional(n) => i64::try_from(n)
            .unwrap_or(i64::MAX)
            .saturating_add((k as i64) + 1),
    };
    if want < 0 {
        return Digits::zero()
    }
    let mut digits = Digits::empty(k);
    while ((digits.len as i64) < want) && (digits.len < MAX_DIGITS) && !r.is_zero() {
        let digit = next_digit(&mut r, &s);
        digits.push(digit);
        r.short_cin_mul(0, 10);
    }
    if !r.is_zero() {
        let mut half = s;
        half.short_cin_mul(0, 5);
        let up = match r.const_cmp(&half) {
            Ordering::Less => false,
            Ordering::Equal => (digits.get(digits.len.wrapping_sub(1)) & 1) == 1,
            Ordering::Greater => true,
        };
        if up {
            digits.round_up();
        }
    }
    digits.trim_trailing_zeros();
    if digits.len == 0 {
        // rounded down to nothing
        return Digits::zero()
    }
    digits
}

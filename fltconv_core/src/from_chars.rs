use fltconv_internals::{
    CharsError, CharsFormat, CharsResult, NumericLimits, WideUint, MAX_POW10_U64, POW10_U64,
};

use crate::{Bignum, RawFloat};

/// The largest intermediate is an 800 digit significand divided by `10^1125`,
/// with the dividend shifted to keep 65 quotient bits
type Big = Bignum<64>;

/// Significant decimal digits kept before the rest is folded into a sticky
/// digit. Every halfway point between two `f64`s has fewer.
const MAX_DIGITS: usize = 800;

/// A decimal literal with value `0.d1d2d3... * 10^decimal_point`
struct Decimal {
    digits: [u8; MAX_DIGITS],
    num_digits: usize,
    decimal_point: i64,
    /// nonzero digits were dropped past `MAX_DIGITS`
    truncated: bool,
}

impl Decimal {
    const fn new() -> Self {
        Self {
            digits: [0; MAX_DIGITS],
            num_digits: 0,
            decimal_point: 0,
            truncated: false,
        }
    }

    fn store(&mut self, digit: u8) {
        if self.num_digits < MAX_DIGITS {
            self.digits[self.num_digits] = digit;
            self.num_digits += 1;
        } else if digit != 0 {
            self.truncated = true;
        }
    }

    fn push_integer_digit(&mut self, digit: u8) {
        if (self.num_digits == 0) && (digit == 0) {
            return
        }
        self.store(digit);
        self.decimal_point += 1;
    }

    fn push_fraction_digit(&mut self, digit: u8) {
        if (self.num_digits == 0) && (digit == 0) {
            self.decimal_point -= 1;
            return
        }
        self.store(digit);
    }

    fn trim_trailing_zeros(&mut self) {
        // trailing zeros are only exact to drop if nothing was dropped after them
        if !self.truncated {
            while (self.num_digits > 0) && (self.digits[self.num_digits - 1] == 0) {
                self.num_digits -= 1;
            }
        }
    }

    /// Returns the significand as an integer if it has at most `DIGITS10`
    /// digits
    fn small_significand(&self) -> Option<WideUint> {
        if self.truncated || (self.num_digits > (<WideUint as NumericLimits>::DIGITS10 as usize)) {
            return None
        }
        let mut acc = WideUint::ZERO;
        for digit in &self.digits[..self.num_digits] {
            acc = (acc * 10u8) + *digit;
        }
        Some(acc)
    }

    /// Returns the significand as a bignum, with a sticky `1` appended if
    /// digits were truncated, and the power of ten it is scaled by
    fn big_significand(&self) -> (Big, i64) {
        let mut big = Big::zero();
        for chunk in self.digits[..self.num_digits].chunks(MAX_POW10_U64 as usize) {
            let mut x = 0u64;
            for digit in chunk {
                x = (x * 10) + (*digit as u64);
            }
            let oflow = big.short_cin_mul(x, POW10_U64[chunk.len()]);
            debug_assert_eq!(oflow, 0);
        }
        let mut exp10 = self.decimal_point - (self.num_digits as i64);
        if self.truncated {
            big.short_cin_mul(1, 10);
            exp10 -= 1;
        }
        (big, exp10)
    }
}

/// Returns if `text` starts with `pat`, ignoring ASCII case
fn starts_with_ignore_case(text: &[u8], pat: &[u8]) -> bool {
    match text.get(..pat.len()) {
        Some(prefix) => prefix.eq_ignore_ascii_case(pat),
        None => false,
    }
}

/// Parses an optional sign and decimal exponent digits starting at `i`. Returns
/// the saturated exponent and the end position, or `None` if there are no
/// digits.
fn scan_exponent(text: &[u8], i: usize) -> Option<(i64, usize)> {
    let mut i = i;
    let negative = match text.get(i) {
        Some(b'-') => {
            i += 1;
            true
        }
        Some(b'+') => {
            i += 1;
            false
        }
        _ => false,
    };
    let start = i;
    let mut exp = 0i64;
    while let Some(c) = text.get(i).filter(|c| c.is_ascii_digit()) {
        exp = exp.saturating_mul(10).saturating_add((c - b'0') as i64);
        i += 1;
    }
    if i == start {
        None
    } else {
        Some((if negative { -exp } else { exp }, i))
    }
}

/// Scans a decimal literal starting at `i`. Returns `None` if there is no
/// literal.
fn scan_decimal(text: &[u8], i: usize, fmt: CharsFormat) -> Option<(Decimal, usize)> {
    let mut i = i;
    let mut dec = Decimal::new();
    let mut any_digits = false;
    while let Some(c) = text.get(i).filter(|c| c.is_ascii_digit()) {
        dec.push_integer_digit(c - b'0');
        any_digits = true;
        i += 1;
    }
    if text.get(i) == Some(&b'.') {
        i += 1;
        while let Some(c) = text.get(i).filter(|c| c.is_ascii_digit()) {
            dec.push_fraction_digit(c - b'0');
            any_digits = true;
            i += 1;
        }
    }
    if !any_digits {
        return None
    }
    let mut has_exp = false;
    if matches!(text.get(i), Some(b'e' | b'E')) {
        // a malformed exponent is not part of the literal
        if let Some((exp, end)) = scan_exponent(text, i + 1) {
            dec.decimal_point = dec.decimal_point.saturating_add(exp);
            has_exp = true;
            i = end;
        }
    }
    if (fmt == CharsFormat::Scientific) && !has_exp {
        return None
    }
    dec.trim_trailing_zeros();
    Some((dec, i))
}

/// A hexadecimal literal with value `mantissa * 2^exp2`, plus some nonzero
/// amount less than `2^exp2` if `sticky` is set
struct HexLiteral {
    mantissa: WideUint,
    exp2: i64,
    sticky: bool,
}

/// Scans a hexadecimal literal without prefix starting at `i`. Returns `None`
/// if there is no literal.
fn scan_hex(text: &[u8], i: usize) -> Option<(HexLiteral, usize)> {
    const MAX_NIBBLES: u32 = WideUint::BITS / 4;
    let mut i = i;
    let mut lit = HexLiteral {
        mantissa: WideUint::ZERO,
        exp2: 0,
        sticky: false,
    };
    let mut kept = 0;
    let mut any_digits = false;
    let mut fraction = false;
    loop {
        let nibble = match text.get(i) {
            Some(b'.') if !fraction => {
                fraction = true;
                i += 1;
                continue
            }
            Some(c) => match (*c as char).to_digit(16) {
                Some(nibble) => nibble,
                None => break,
            },
            None => break,
        };
        any_digits = true;
        i += 1;
        if lit.mantissa.is_zero() && (nibble == 0) {
            // leading zeros only matter for their position
            if fraction {
                lit.exp2 -= 4;
            }
        } else if kept < MAX_NIBBLES {
            lit.mantissa = (lit.mantissa << 4u32) | nibble;
            kept += 1;
            if fraction {
                lit.exp2 -= 4;
            }
        } else {
            lit.sticky |= nibble != 0;
            if !fraction {
                lit.exp2 += 4;
            }
        }
    }
    if !any_digits {
        return None
    }
    if matches!(text.get(i), Some(b'p' | b'P')) {
        if let Some((exp, end)) = scan_exponent(text, i + 1) {
            lit.exp2 = lit.exp2.saturating_add(exp);
            i = end;
        }
    }
    Some((lit, i))
}

/// Rounds `top * 2^e2`, plus a nonzero amount less than `2^e2` if `sticky`,
/// to the nearest float with ties to even. `top` must have its most
/// significant bit set. Returns the bits without sign.
fn round_to_bits<F: RawFloat>(top: u64, e2: i64, sticky: bool) -> Result<u64, CharsError> {
    debug_assert!(top.leading_zeros() == 0);
    let explicit = F::MANTISSA_EXPLICIT_BITS as i64;
    let min_exp = 1 - (F::EXPONENT_BIAS as i64);
    // the binary exponent of the leading bit
    let unbiased = e2.saturating_add(63);
    if unbiased > (F::EXPONENT_BIAS as i64) {
        return Err(CharsError::ValueTooLarge)
    }
    // subnormals have fewer mantissa bits
    let drop = (63 - explicit) + (min_exp - unbiased).max(0);
    if drop > 64 {
        return Err(CharsError::ValueTooLarge)
    }
    let drop = drop as u32;
    let q = WideUint::from_u64(top);
    let mut m = q >> drop;
    let rem = q & ((WideUint::ONE << drop) - 1u8);
    let half = WideUint::ONE << (drop - 1);
    if (rem > half) || ((rem == half) && (sticky || ((m.low & 1) == 1))) {
        m.inc_assign();
    }
    let mut m = m.low;
    if m == 0 {
        // a nonzero value rounded down to zero
        return Err(CharsError::ValueTooLarge)
    }
    if unbiased < min_exp {
        // a rounding carry into the implicit bit is the correct encoding of
        // the smallest normal
        return Ok(m)
    }
    let mut biased = unbiased + (F::EXPONENT_BIAS as i64);
    if (m >> (explicit + 1)) != 0 {
        m >>= 1;
        biased += 1;
    }
    if biased >= (F::INFINITE_POWER as i64) {
        return Err(CharsError::ValueTooLarge)
    }
    Ok(((biased as u64) << explicit) | (m & ((1 << explicit) - 1)))
}

/// Converts a scanned decimal literal into float bits without sign
fn decimal_to_bits<F: RawFloat>(dec: &Decimal) -> Result<u64, CharsError> {
    if dec.num_digits == 0 {
        return Ok(0)
    }
    if dec.decimal_point > (F::LARGEST_POWER_OF_TEN + 1) {
        return Err(CharsError::ValueTooLarge)
    }
    if dec.decimal_point <= F::SMALLEST_POWER_OF_TEN {
        return Err(CharsError::ValueTooLarge)
    }
    // Clinger's fast path, where both the significand and the power of ten
    // are exact and a single float operation rounds correctly
    if let Some(small) = dec.small_significand() {
        let exp10 = dec.decimal_point - (dec.num_digits as i64);
        if (small <= F::MAX_MANTISSA_FAST_PATH)
            && (exp10 >= F::MIN_EXPONENT_FAST_PATH)
            && (exp10 <= F::MAX_EXPONENT_FAST_PATH)
        {
            let x = F::from_u64(small.low);
            let value = if exp10 < 0 {
                x / F::pow10_fast_path(exp10.unsigned_abs() as usize)
            } else {
                x * F::pow10_fast_path(exp10 as usize)
            };
            return Ok(value.to_bits_u64())
        }
    }
    let (mut big, exp10) = dec.big_significand();
    let (top, e2, sticky) = if exp10 >= 0 {
        let oflow = big.mul_pow10_assign(exp10 as u32);
        debug_assert!(!oflow);
        big.top_u64()
    } else {
        let mut den = Big::from_u64(1);
        let oflow = den.mul_pow10_assign(exp10.unsigned_abs() as u32);
        debug_assert!(!oflow);
        // keep at least 65 quotient bits so that the remainder only matters as
        // a sticky bit
        let s = (den.sig() + 65).saturating_sub(big.sig());
        let oflow = big.shl_assign(s);
        debug_assert!(!oflow);
        let mut quo = Big::zero();
        let mut rem = Big::zero();
        Big::udivide(&mut quo, &mut rem, &big, &den).ok_or(CharsError::InvalidArgument)?;
        let (top, e2, sticky) = quo.top_u64();
        (top, e2 - (s as i64), sticky || !rem.is_zero())
    };
    round_to_bits::<F>(top, e2, sticky)
}

/// Converts a scanned hexadecimal literal into float bits without sign
fn hex_to_bits<F: RawFloat>(lit: &HexLiteral) -> Result<u64, CharsError> {
    if lit.mantissa.is_zero() {
        return Ok(0)
    }
    let lz = lit.mantissa.leading_zeros();
    let normalized = lit.mantissa << lz;
    let e2 = lit.exp2.saturating_add(64 - (lz as i64));
    round_to_bits::<F>(normalized.high, e2, lit.sticky || (normalized.low != 0))
}

/// `inf`, `infinity`, `nan`, and `nan(chars)`, ignoring ASCII case. Returns
/// the value and its length.
fn scan_special<F: RawFloat>(text: &[u8], negative: bool) -> Option<(F, usize)> {
    if starts_with_ignore_case(text, b"infinity") {
        return Some((F::infinity(negative), 8))
    }
    if starts_with_ignore_case(text, b"inf") {
        return Some((F::infinity(negative), 3))
    }
    if !starts_with_ignore_case(text, b"nan") {
        return None
    }
    if text.get(3) == Some(&b'(') {
        let mut end = 4;
        while let Some(c) = text.get(end) {
            if c.is_ascii_alphanumeric() || (*c == b'_') {
                end += 1;
            } else {
                break
            }
        }
        if text.get(end) == Some(&b')') {
            let value = if text[4..end].eq_ignore_ascii_case(b"snan") {
                F::signaling_nan(negative)
            } else {
                F::quiet_nan(negative)
            };
            return Some((value, end + 1))
        }
    }
    Some((F::quiet_nan(negative), 3))
}

/// Parses a float literal from the start of `text` into `value`, and returns
/// the number of bytes consumed.
///
/// The literal is an optional `-`, then digits with an optional point, then an
/// exponent. For `General` and `Fixed` the `e` exponent is optional, for
/// `Scientific` it is required. `Hex` takes hexadecimal digits without a `0x`
/// prefix and an optional `p` exponent of two. `inf`, `infinity`, `nan`, and
/// `nan(...)` are accepted in any case, where `nan(snan)` gives a signaling
/// NaN. An exponent without digits is not part of the literal.
///
/// If there is no literal, `err` is `Some(CharsError::InvalidArgument)` and
/// `pos` is 0. If the literal is out of the range of `F`, including nonzero
/// literals that round to zero, `err` is `Some(CharsError::ValueTooLarge)`,
/// `value` is left unchanged, and `pos` is still past the literal.
///
/// ```
/// use fltconv::{from_chars, CharsError, CharsFormat};
///
/// let mut x = 0.0f64;
/// let res = from_chars(b"1.25e-3xyz", &mut x, CharsFormat::General);
/// assert_eq!((res.pos, res.err, x), (7, None, 0.00125));
///
/// let mut x = 42.0f64;
/// let res = from_chars(b"1e99999", &mut x, CharsFormat::General);
/// assert_eq!((res.pos, res.err, x), (7, Some(CharsError::ValueTooLarge), 42.0));
///
/// let mut y = 0.0f32;
/// let res = from_chars(b"-1.8p+1", &mut y, CharsFormat::Hex);
/// assert_eq!((res.pos, y), (7, -3.0));
/// ```
pub fn from_chars<F: RawFloat>(text: &[u8], value: &mut F, fmt: CharsFormat) -> CharsResult {
    let negative = text.first() == Some(&b'-');
    let start = negative as usize;
    if let Some((x, len)) = scan_special::<F>(&text[start..], negative) {
        *value = x;
        return CharsResult::ok(start + len)
    }
    let (bits, end) = if fmt == CharsFormat::Hex {
        match scan_hex(text, start) {
            Some((lit, end)) => (hex_to_bits::<F>(&lit), end),
            None => return CharsResult::err(0, CharsError::InvalidArgument),
        }
    } else {
        match scan_decimal(text, start, fmt) {
            Some((dec, end)) => (decimal_to_bits::<F>(&dec), end),
            None => return CharsResult::err(0, CharsError::InvalidArgument),
        }
    };
    match bits {
        Ok(bits) => {
            *value = F::from_bits_u64(bits | F::sign_bit(negative));
            CharsResult::ok(end)
        }
        Err(e) => CharsResult::err(end, e),
    }
}

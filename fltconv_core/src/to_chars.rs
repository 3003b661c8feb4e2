use fltconv_internals::{CharsError, CharsFormat, CharsResult};

use crate::{
    digits::{exact, shortest, Digits, Limit},
    Decoded, FloatClass, RawFloat,
};

/// Bounded writer over the caller's buffer. Every method returns `None`
/// without writing anything past the end when the buffer is too small.
struct Cursor<'a> {
    buf: &'a mut [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(buf: &'a mut [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    #[inline]
    fn push(&mut self, byte: u8) -> Option<()> {
        *self.buf.get_mut(self.pos)? = byte;
        self.pos += 1;
        Some(())
    }

    fn push_slice(&mut self, s: &[u8]) -> Option<()> {
        let end = self.pos.checked_add(s.len())?;
        self.buf.get_mut(self.pos..end)?.copy_from_slice(s);
        self.pos = end;
        Some(())
    }

    fn push_repeat(&mut self, byte: u8, n: usize) -> Option<()> {
        let end = self.pos.checked_add(n)?;
        self.buf.get_mut(self.pos..end)?.fill(byte);
        self.pos = end;
        Some(())
    }

    /// Writes the decimal digits of `x` without leading zeros, padded with
    /// zeros to at least `min_len` digits
    fn push_decimal(&mut self, x: u32, min_len: usize) -> Option<()> {
        let mut tmp = [b'0'; 10];
        let mut i = tmp.len();
        let mut x = x;
        while (x != 0) || ((tmp.len() - i) < min_len) {
            i -= 1;
            tmp[i] = b'0' + ((x % 10) as u8);
            x /= 10;
        }
        self.push_slice(&tmp[i..])
    }
}

/// Writes the digits starting at index `from`, for `n` places
fn push_digits(w: &mut Cursor, digits: &Digits, from: usize, n: usize) -> Option<()> {
    let end = from.saturating_add(n);
    let stored = end.min(digits.len);
    for i in from..stored {
        w.push(b'0' + digits.get(i))?;
    }
    w.push_repeat(b'0', end - stored.max(from))
}

/// `d.ddde+XX` with `frac` digits after the point and at least two exponent
/// digits. The point is omitted when `frac == 0`.
fn write_scientific(w: &mut Cursor, digits: &Digits, frac: usize) -> Option<()> {
    w.push(b'0' + digits.get(0))?;
    if frac > 0 {
        w.push(b'.')?;
        push_digits(w, digits, 1, frac)?;
    }
    w.push(b'e')?;
    w.push(if digits.exp < 0 { b'-' } else { b'+' })?;
    w.push_decimal(digits.exp.unsigned_abs(), 2)
}

/// All integer digits, then `frac` digits after the point. The point is
/// omitted when `frac == 0`.
fn write_fixed(w: &mut Cursor, digits: &Digits, frac: usize) -> Option<()> {
    if (digits.len > 0) && (digits.exp >= 0) {
        push_digits(w, digits, 0, (digits.exp as usize) + 1)?;
    } else {
        w.push(b'0')?;
    }
    if frac > 0 {
        w.push(b'.')?;
        if digits.exp >= 0 {
            push_digits(w, digits, (digits.exp as usize) + 1, frac)?;
        } else {
            // zeros between the point and the first digit
            let zeros = ((digits.exp.unsigned_abs() - 1) as usize).min(frac);
            w.push_repeat(b'0', zeros)?;
            push_digits(w, digits, 0, frac - zeros)?;
        }
    }
    Some(())
}

/// Number of digits after the point needed to show every stored digit
fn frac_needed(digits: &Digits) -> usize {
    let frac = (digits.len as i64) - 1 - (digits.exp as i64);
    frac.max(0) as usize
}

/// Fixed layout for decimal exponents in `-4..window_end`, scientific
/// otherwise. Trailing zeros were already trimmed from `digits`, so at most
/// `precision` significant digits are shown.
fn write_general(
    w: &mut Cursor,
    digits: &Digits,
    precision: Option<usize>,
    window_end: i32,
) -> Option<()> {
    let x = digits.exp;
    if (x >= -4) && (x < window_end) {
        let mut frac = frac_needed(digits);
        if let Some(p) = precision {
            let limit = (i64::try_from(p).unwrap_or(i64::MAX) - 1 - (x as i64)).max(0);
            frac = frac.min(limit as usize);
        }
        write_fixed(w, digits, frac)
    } else {
        let mut frac = digits.len.saturating_sub(1);
        if let Some(p) = precision {
            frac = frac.min(p.saturating_sub(1));
        }
        write_scientific(w, digits, frac)
    }
}

fn write_special(w: &mut Cursor, dec: &Decoded, explicit_bits: u32) -> Option<()> {
    if dec.class == FloatClass::Infinite {
        w.push_slice(b"inf")
    } else {
        let quiet = ((dec.mantissa >> (explicit_bits - 1)) & 1) != 0;
        if !quiet {
            w.push_slice(b"nan(snan)")
        } else if dec.negative {
            w.push_slice(b"nan(ind)")
        } else {
            w.push_slice(b"nan")
        }
    }
}

fn write_hex<F: RawFloat>(w: &mut Cursor, dec: &Decoded, precision: Option<usize>) -> Option<()> {
    let explicit = F::MANTISSA_EXPLICIT_BITS;
    // widen the fraction to whole nibbles
    let pad = (4 - (explicit % 4)) % 4;
    let nibbles = ((explicit + pad) / 4) as usize;
    let (mut leading, fraction, exp2) = match dec.class {
        FloatClass::Zero => (0u8, 0u64, 0i32),
        FloatClass::Subnormal => (0, dec.mantissa, 1 - F::EXPONENT_BIAS),
        _ => (
            1,
            dec.mantissa & ((1 << explicit) - 1),
            dec.exponent + (explicit as i32),
        ),
    };
    let mut fraction = fraction << pad;
    let mut shown = nibbles;
    match precision {
        None => {
            while (shown > 0) && (((fraction >> (4 * (nibbles - shown))) & 0xf) == 0) {
                shown -= 1;
            }
            fraction >>= 4 * (nibbles - shown);
        }
        Some(p) if p < nibbles => {
            let drop = 4 * (nibbles - p);
            let mut kept = fraction >> drop;
            let rem = fraction & ((1 << drop) - 1);
            let half = 1 << (drop - 1);
            // the last kept digit is the leading one if no nibbles are kept
            let last = if p == 0 { leading } else { kept as u8 };
            if (rem > half) || ((rem == half) && ((last & 1) == 1)) {
                kept += 1;
                if (kept >> (4 * p)) != 0 {
                    kept = 0;
                    leading += 1;
                }
            }
            fraction = kept;
            shown = p;
        }
        Some(_) => (),
    }
    w.push(b'0' + leading)?;
    let total = precision.unwrap_or(shown);
    if total > 0 {
        w.push(b'.')?;
        for i in (0..shown).rev() {
            let nibble = ((fraction >> (4 * i)) & 0xf) as u8;
            w.push(if nibble < 10 {
                b'0' + nibble
            } else {
                b'a' + (nibble - 10)
            })?;
        }
        w.push_repeat(b'0', total - shown)?;
    }
    w.push(b'p')?;
    w.push(if exp2 < 0 { b'-' } else { b'+' })?;
    w.push_decimal(exp2.unsigned_abs(), 1)
}

fn write_float<F: RawFloat>(
    w: &mut Cursor,
    value: F,
    fmt: CharsFormat,
    precision: Option<usize>,
) -> Option<()> {
    let dec = value.decode();
    if dec.negative {
        w.push(b'-')?;
    }
    match dec.class {
        FloatClass::Infinite | FloatClass::Nan => {
            return write_special(w, &dec, F::MANTISSA_EXPLICIT_BITS)
        }
        _ => (),
    }
    if fmt == CharsFormat::Hex {
        return write_hex::<F>(w, &dec, precision)
    }
    let is_zero = dec.class == FloatClass::Zero;
    let digits_for = |limit: Limit| {
        if is_zero {
            Digits::zero()
        } else {
            exact(&dec, limit)
        }
    };
    let shortest_digits = || {
        if is_zero {
            Digits::zero()
        } else {
            shortest(&dec)
        }
    };
    match (fmt, precision) {
        (CharsFormat::Scientific, None) => {
            let digits = shortest_digits();
            write_scientific(w, &digits, digits.len.saturating_sub(1))
        }
        (CharsFormat::Scientific, Some(p)) => {
            let digits = digits_for(Limit::Significant(p.saturating_add(1)));
            write_scientific(w, &digits, p)
        }
        (CharsFormat::Fixed, None) => {
            let digits = shortest_digits();
            write_fixed(w, &digits, frac_needed(&digits))
        }
        (CharsFormat::Fixed, Some(p)) => {
            let digits = digits_for(Limit::Fractional(p));
            write_fixed(w, &digits, p)
        }
        (_, None) => {
            let digits = shortest_digits();
            write_general(w, &digits, None, F::MAX_DIGITS10)
        }
        (_, Some(p)) => {
            let p = p.max(1);
            let digits = digits_for(Limit::Significant(p));
            let window_end = p.min(i32::MAX as usize) as i32;
            write_general(w, &digits, Some(p), window_end)
        }
    }
}

/// Writes the text of `value` into `buf` and returns the number of bytes
/// written.
///
/// Without a `precision`, the output is the shortest text that `from_chars`
/// parses back to exactly `value`. With a `precision`, it is the number of
/// digits after the point for `Fixed` and `Scientific`, the number of
/// significant digits for `General`, and the number of hexadecimal digits after
/// the point for `Hex`, with ties rounding to even.
///
/// If `buf` is too small, `pos` is `buf.len()` and `err` is
/// `Some(CharsError::InvalidArgument)`. Nothing is ever written past the end
/// of `buf`, but the contents of `buf` are unspecified after an error.
///
/// ```
/// use fltconv::{to_chars, CharsFormat};
///
/// let mut buf = [0u8; 64];
/// let res = to_chars(&mut buf, 0.1f64, CharsFormat::Scientific, Some(20));
/// assert_eq!(&buf[..res.pos], b"1.00000000000000005551e-01");
/// let res = to_chars(&mut buf, 1e21f64, CharsFormat::General, None);
/// assert_eq!(&buf[..res.pos], b"1e+21");
/// let res = to_chars(&mut buf, -3.0f32, CharsFormat::Hex, None);
/// assert_eq!(&buf[..res.pos], b"-1.8p+1");
/// let res = to_chars(&mut buf[..4], 12345.0f64, CharsFormat::Fixed, None);
/// assert!(!res.is_ok());
/// ```
pub fn to_chars<F: RawFloat>(
    buf: &mut [u8],
    value: F,
    fmt: CharsFormat,
    precision: Option<usize>,
) -> CharsResult {
    let len = buf.len();
    let mut w = Cursor::new(buf);
    match write_float(&mut w, value, fmt, precision) {
        Some(()) => CharsResult::ok(w.pos),
        None => CharsResult::err(len, CharsError::InvalidArgument),
    }
}

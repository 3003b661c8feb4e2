use core::{
    fmt::Debug,
    ops::{Div, Mul},
};

mod private {
    pub trait Sealed {}

    impl Sealed for f32 {}
    impl Sealed for f64 {}
}

/// The class of a decoded float
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FloatClass {
    Zero,
    /// A normal value with the implicit leading bit
    Finite,
    Subnormal,
    Infinite,
    Nan,
}

/// A float split into its parts. For `Finite` and `Subnormal` values the
/// magnitude is exactly `mantissa * 2^exponent`. For `Nan`, `mantissa` holds
/// the raw fraction bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Decoded {
    pub negative: bool,
    pub mantissa: u64,
    pub exponent: i32,
    pub class: FloatClass,
    /// The next float toward zero is half as far away as the next float away
    /// from zero. This happens when the fraction bits are all zero and the
    /// binary exponent is above the minimum.
    pub uneven_gaps: bool,
}

/// IEEE-754 binary interchange formats. This is sealed and implemented for
/// `f32` and `f64`.
pub trait RawFloat:
    Copy + Debug + PartialEq + Mul<Output = Self> + Div<Output = Self> + private::Sealed
{
    /// Number of stored fraction bits
    const MANTISSA_EXPLICIT_BITS: u32;
    const EXPONENT_BITS: u32;
    const EXPONENT_BIAS: i32;
    /// Number of significant decimal digits needed to round trip any value
    const MAX_DIGITS10: i32;

    /// Powers of ten at or below this magnitude are exact
    const MAX_EXPONENT_FAST_PATH: i64;
    const MIN_EXPONENT_FAST_PATH: i64;

    /// Any literal whose leading digit sits at or above `10^(this + 1)`
    /// overflows
    const LARGEST_POWER_OF_TEN: i64;
    /// Any literal below `10^this` rounds to zero
    const SMALLEST_POWER_OF_TEN: i64;

    const SIGN_INDEX: u32 = Self::MANTISSA_EXPLICIT_BITS + Self::EXPONENT_BITS;
    /// The biased exponent of infinities and NaNs
    const INFINITE_POWER: i32 = (1 << Self::EXPONENT_BITS) - 1;
    /// Largest mantissa for which every integer is exactly representable
    const MAX_MANTISSA_FAST_PATH: u64 = 2 << Self::MANTISSA_EXPLICIT_BITS;
    /// Binary exponent of the least significant bit of the smallest values
    const MIN_EXPONENT: i32 = 1 - Self::EXPONENT_BIAS - (Self::MANTISSA_EXPLICIT_BITS as i32);

    fn to_bits_u64(self) -> u64;

    fn from_bits_u64(bits: u64) -> Self;

    /// Exact for values up to `MAX_MANTISSA_FAST_PATH`
    fn from_u64(x: u64) -> Self;

    /// Returns `10^exp` for `exp <= MAX_EXPONENT_FAST_PATH`
    fn pow10_fast_path(exp: usize) -> Self;

    fn decode(self) -> Decoded {
        let bits = self.to_bits_u64();
        let explicit = Self::MANTISSA_EXPLICIT_BITS;
        let negative = ((bits >> Self::SIGN_INDEX) & 1) != 0;
        let biased = ((bits >> explicit) as i32) & Self::INFINITE_POWER;
        let fraction = bits & ((1 << explicit) - 1);
        let (mantissa, exponent, class) = if biased == 0 {
            if fraction == 0 {
                (0, 0, FloatClass::Zero)
            } else {
                (fraction, Self::MIN_EXPONENT, FloatClass::Subnormal)
            }
        } else if biased == Self::INFINITE_POWER {
            if fraction == 0 {
                (0, 0, FloatClass::Infinite)
            } else {
                (fraction, 0, FloatClass::Nan)
            }
        } else {
            (
                fraction | (1 << explicit),
                biased - Self::EXPONENT_BIAS - (explicit as i32),
                FloatClass::Finite,
            )
        };
        Decoded {
            negative,
            mantissa,
            exponent,
            class,
            uneven_gaps: (class == FloatClass::Finite) && (fraction == 0) && (biased > 1),
        }
    }

    /// Returns the sign bit for `negative`
    fn sign_bit(negative: bool) -> u64 {
        (negative as u64) << Self::SIGN_INDEX
    }

    fn infinity(negative: bool) -> Self {
        Self::from_bits_u64(
            Self::sign_bit(negative)
                | ((Self::INFINITE_POWER as u64) << Self::MANTISSA_EXPLICIT_BITS),
        )
    }

    /// A NaN with only the quiet bit set
    fn quiet_nan(negative: bool) -> Self {
        Self::from_bits_u64(
            Self::sign_bit(negative)
                | ((Self::INFINITE_POWER as u64) << Self::MANTISSA_EXPLICIT_BITS)
                | (1 << (Self::MANTISSA_EXPLICIT_BITS - 1)),
        )
    }

    /// A NaN with the quiet bit clear and the next lower bit set
    fn signaling_nan(negative: bool) -> Self {
        Self::from_bits_u64(
            Self::sign_bit(negative)
                | ((Self::INFINITE_POWER as u64) << Self::MANTISSA_EXPLICIT_BITS)
                | (1 << (Self::MANTISSA_EXPLICIT_BITS - 2)),
        )
    }
}

impl RawFloat for f32 {
    const EXPONENT_BIAS: i32 = 127;
    const EXPONENT_BITS: u32 = 8;
    const LARGEST_POWER_OF_TEN: i64 = 38;
    const MANTISSA_EXPLICIT_BITS: u32 = 23;
    const MAX_DIGITS10: i32 = 9;
    const MAX_EXPONENT_FAST_PATH: i64 = 10;
    const MIN_EXPONENT_FAST_PATH: i64 = -10;
    const SMALLEST_POWER_OF_TEN: i64 = -46;

    fn to_bits_u64(self) -> u64 {
        self.to_bits() as u64
    }

    fn from_bits_u64(bits: u64) -> Self {
        f32::from_bits(bits as u32)
    }

    fn from_u64(x: u64) -> Self {
        x as f32
    }

    fn pow10_fast_path(exp: usize) -> Self {
        const TABLE: [f32; 16] = [
            1e0, 1e1, 1e2, 1e3, 1e4, 1e5, 1e6, 1e7, 1e8, 1e9, 1e10, 0., 0., 0., 0., 0.,
        ];
        TABLE[exp & 15]
    }
}

impl RawFloat for f64 {
    const EXPONENT_BIAS: i32 = 1023;
    const EXPONENT_BITS: u32 = 11;
    const LARGEST_POWER_OF_TEN: i64 = 308;
    const MANTISSA_EXPLICIT_BITS: u32 = 52;
    const MAX_DIGITS10: i32 = 17;
    const MAX_EXPONENT_FAST_PATH: i64 = 22;
    const MIN_EXPONENT_FAST_PATH: i64 = -22;
    const SMALLEST_POWER_OF_TEN: i64 = -324;

    fn to_bits_u64(self) -> u64 {
        self.to_bits()
    }

    fn from_bits_u64(bits: u64) -> Self {
        f64::from_bits(bits)
    }

    fn from_u64(x: u64) -> Self {
        x as f64
    }

    fn pow10_fast_path(exp: usize) -> Self {
        const TABLE: [f64; 32] = [
            1e0, 1e1, 1e2, 1e3, 1e4, 1e5, 1e6, 1e7, 1e8, 1e9, 1e10, 1e11, 1e12, 1e13, 1e14, 1e15,
            1e16, 1e17, 1e18, 1e19, 1e20, 1e21, 1e22, 0., 0., 0., 0., 0., 0., 0., 0., 0.,
        ];
        TABLE[exp & 31]
    }
}

#[test]
fn decode() {
    let d = 1.5f64.decode();
    assert_eq!(d.class, FloatClass::Finite);
    assert_eq!((d.mantissa, d.exponent), (3 << 51, -52));
    assert!(!d.uneven_gaps);
    assert!(1.0f64.decode().uneven_gaps);
    // the smallest normal is evenly spaced from the largest subnormal
    assert!(!f64::MIN_POSITIVE.decode().uneven_gaps);
    let d = (-5e-324f64).decode();
    assert_eq!(d.class, FloatClass::Subnormal);
    assert!(d.negative);
    assert_eq!((d.mantissa, d.exponent), (1, -1074));
    let d = 1.0f32.decode();
    assert_eq!((d.mantissa, d.exponent), (1 << 23, -23));
    assert_eq!(f32::NAN.decode().class, FloatClass::Nan);
    assert_eq!((-0.0f32).decode().class, FloatClass::Zero);
    assert!(<f64 as RawFloat>::signaling_nan(false).is_nan());
    assert_eq!(<f32 as RawFloat>::infinity(true), f32::NEG_INFINITY);
    assert_eq!(<f64 as RawFloat>::MAX_MANTISSA_FAST_PATH, 1 << 53);
}

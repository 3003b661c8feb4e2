use crate::WideUint;

/// Static description of an integer type, in the manner of the metadata
/// constants of the primitive integers
pub trait NumericLimits: Sized {
    /// Number of value bits
    const BITS: u32;
    const IS_SIGNED: bool;
    /// Arithmetic wraps instead of trapping
    const IS_MODULO: bool;
    const RADIX: u32;
    /// Number of radix digits representable without change
    const DIGITS: u32;
    /// Number of decimal digits representable without change
    const DIGITS10: u32;
    const MIN: Self;
    const MAX: Self;
}

impl NumericLimits for WideUint {
    const BITS: u32 = 128;
    const DIGITS: u32 = 128;
    // floor(128 * log10(2))
    const DIGITS10: u32 = 38;
    const IS_MODULO: bool = true;
    const IS_SIGNED: bool = false;
    const MAX: Self = WideUint::MAX;
    const MIN: Self = WideUint::MIN;
    const RADIX: u32 = 2;
}

#[test]
fn wide_uint_limits() {
    assert_eq!(
        <WideUint as NumericLimits>::DIGITS10,
        crate::floor_log10_pow2(<WideUint as NumericLimits>::DIGITS as i32) as u32
    );
    assert_eq!(<WideUint as NumericLimits>::MAX.to_u128(), u128::MAX);
    assert_eq!(<WideUint as NumericLimits>::MIN.to_u128(), 0);
    assert_eq!(<WideUint as NumericLimits>::BITS, u128::BITS);
}

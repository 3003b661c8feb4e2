//! Widening multiplications that keep the full product of their operands.
//!
//! There are two interchangeable strategies. `native` uses the compiler's
//! `u128` multiplication, `portable` builds every product out of 32 bit limbs
//! so that it only needs `u32 * u32 -> u64` multiplies. Exactly one of them is
//! reexported at this level, chosen once at build time: `portable` if the
//! `portable_mul` feature is active or the target is not 64 bits wide, `native`
//! otherwise. Both always produce bit-identical results.

use crate::WideUint;

/// The `u128` strategy
pub mod native {
    use crate::WideUint;

    /// Returns the full 128 bit product of `x` and `y`
    #[inline]
    pub const fn mul64x64_128(x: u64, y: u64) -> WideUint {
        WideUint::from_u128((x as u128).wrapping_mul(y as u128))
    }

    /// Returns the upper 64 bits of the product of `x` and `y`
    #[inline]
    pub const fn mul64x64_upper64(x: u64, y: u64) -> u64 {
        ((x as u128).wrapping_mul(y as u128) >> 64) as u64
    }

    /// Returns the upper 64 bits of the 96 bit product of `x` and `y`
    #[inline]
    pub const fn mul32x64_upper64(x: u32, y: u64) -> u64 {
        ((x as u128).wrapping_mul(y as u128) >> 32) as u64
    }
}

/// The 32 bit limb strategy
pub mod portable {
    use crate::WideUint;

    const LO32: u64 = u32::MAX as u64;

    /// Returns the full 128 bit product of `x` and `y`
    pub const fn mul64x64_128(x: u64, y: u64) -> WideUint {
        //                 [ x_hi  ][ x_lo  ]
        //                 [ y_hi  ][ y_lo  ]
        //               X___________________
        //                 [----lo_lo-------]
        //         [----hi_lo-------]
        //         [----lo_hi-------]
        // [----hi_hi-------]
        // +__________________________________
        // [----high--------][------low-----]
        let x_lo = x & LO32;
        let x_hi = x >> 32;
        let y_lo = y & LO32;
        let y_hi = y >> 32;
        let lo_lo = x_lo * y_lo;
        let hi_lo = x_hi * y_lo;
        let lo_hi = x_lo * y_hi;
        let hi_hi = x_hi * y_hi;
        // the sum of three values less than 2^32 cannot overflow
        let mid = (lo_lo >> 32) + (hi_lo & LO32) + (lo_hi & LO32);
        let high = hi_hi + (mid >> 32) + (hi_lo >> 32) + (lo_hi >> 32);
        let low = (mid << 32) | (lo_lo & LO32);
        WideUint::new(high, low)
    }

    /// Returns the upper 64 bits of the product of `x` and `y`
    #[inline]
    pub const fn mul64x64_upper64(x: u64, y: u64) -> u64 {
        mul64x64_128(x, y).high
    }

    /// Returns the upper 64 bits of the 96 bit product of `x` and `y`
    pub const fn mul32x64_upper64(x: u32, y: u64) -> u64 {
        let x = x as u64;
        // `x * y_hi` is already aligned to the upper 64 bits, and only the
        // bits of `x * y_lo` above 32 reach them
        (x * (y >> 32)) + ((x * (y & LO32)) >> 32)
    }
}

#[cfg(any(feature = "portable_mul", not(target_pointer_width = "64")))]
pub use portable::{mul32x64_upper64, mul64x64_128, mul64x64_upper64};

#[cfg(not(any(feature = "portable_mul", not(target_pointer_width = "64"))))]
pub use native::{mul32x64_upper64, mul64x64_128, mul64x64_upper64};

/// Returns the lower 64 bits of the 96 bit product of `x` and `y`
#[inline]
pub const fn mul32x64_lower64(x: u32, y: u64) -> u64 {
    (x as u64).wrapping_mul(y)
}

/// Returns the upper 128 bits of the 192 bit product of `x` and `y`
pub const fn mul64x128_upper128(x: u64, y: WideUint) -> WideUint {
    //                   [ y.high ][ y.low  ]
    //                             [   x    ]
    //                 X_____________________
    //                   [------carry-------]
    //         [-------high-------]
    // +_____________________________________
    //         [----result--------]
    //
    // only the upper word of `x * y.low` reaches the result, and it cannot
    // carry out because the full product fits in 192 bits
    mul64x64_128(x, y.high).wrapping_add(WideUint::from_u64(mul64x64_upper64(x, y.low)))
}

/// Returns the lower 128 bits of the 192 bit product of `x` and `y`
pub const fn mul64x128_lower128(x: u64, y: WideUint) -> WideUint {
    let low = mul64x64_128(x, y.low);
    WideUint::new(x.wrapping_mul(y.high).wrapping_add(low.high), low.low)
}

/// Computes x + y + z and returns the widened result as a tuple, where the
/// first element is the sum and the second is the carry
#[inline]
pub const fn widen_add(x: u64, y: u64, z: u64) -> (u64, u64) {
    let (sum, carry0) = x.overflowing_add(y);
    let (sum, carry1) = sum.overflowing_add(z);
    (sum, (carry0 as u64) + (carry1 as u64))
}

/// Computes (x * y) + z. This cannot overflow, because it returns the value
/// widened into a tuple, where the first element is the least significant part
/// of the integer and the second is the most significant.
#[inline]
pub const fn widen_mul_add(x: u64, y: u64, z: u64) -> (u64, u64) {
    let tmp = mul64x64_128(x, y).wrapping_add(WideUint::from_u64(z));
    (tmp.low, tmp.high)
}

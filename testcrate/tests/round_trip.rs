use fltconv::prelude::*;
use rand_xoshiro::{
    rand_core::{RngCore, SeedableRng},
    Xoshiro128StarStar,
};

const N: u32 = if cfg!(miri) {
    32
} else if cfg!(debug_assertions) {
    10_000
} else {
    1_000_000
};

const FORMATS: [CharsFormat; 4] = [
    CharsFormat::General,
    CharsFormat::Scientific,
    CharsFormat::Fixed,
    CharsFormat::Hex,
];

/// Writes `x` with `fmt` and `precision`, parses it back with the same format,
/// and returns the bits
fn round_trip<F: RawFloat + Default>(
    x: F,
    fmt: CharsFormat,
    precision: Option<usize>,
    buf: &mut [u8],
) -> u64 {
    let len = to_chars(buf, x, fmt, precision).into_result().unwrap();
    let mut y = F::default();
    let res = from_chars(&buf[..len], &mut y, fmt);
    assert_eq!(
        res.into_result(),
        Ok(len),
        "{x:?} {fmt:?} {:?}",
        core::str::from_utf8(&buf[..len])
    );
    y.to_bits_u64()
}

fn check<F: RawFloat + Default>(x: F, buf: &mut [u8]) {
    for fmt in FORMATS {
        assert_eq!(round_trip(x, fmt, None, buf), x.to_bits_u64(), "{x:?} {fmt:?}");
    }
    // enough significant digits always identify the value
    let p = (F::MAX_DIGITS10 - 1) as usize;
    assert_eq!(
        round_trip(x, CharsFormat::Scientific, Some(p), buf),
        x.to_bits_u64(),
        "{x:?}"
    );
    assert_eq!(
        round_trip(x, CharsFormat::General, Some(p + 1), buf),
        x.to_bits_u64(),
        "{x:?}"
    );
}

#[test]
fn round_trip_f64() {
    let mut buf = [0u8; 1200];
    let mut rng = Xoshiro128StarStar::seed_from_u64(0);
    for _ in 0..N {
        let x = f64::from_bits(rng.next_u64());
        if x.is_nan() {
            continue
        }
        check(x, &mut buf);
    }
    for x in [
        0.0,
        -0.0,
        f64::MAX,
        f64::MIN,
        f64::MIN_POSITIVE,
        5e-324,
        f64::from_bits(0x000f_ffff_ffff_ffff),
        f64::INFINITY,
        f64::NEG_INFINITY,
        1.0,
        0.1,
        2.0f64.powi(63),
    ] {
        check(x, &mut buf);
    }
}

#[test]
fn round_trip_f32() {
    let mut buf = [0u8; 200];
    let mut rng = Xoshiro128StarStar::seed_from_u64(1);
    for _ in 0..N {
        let x = f32::from_bits(rng.next_u32());
        if x.is_nan() {
            continue
        }
        check(x, &mut buf);
    }
    for x in [
        0.0,
        -0.0,
        f32::MAX,
        f32::MIN_POSITIVE,
        1e-45,
        f32::INFINITY,
        16777216.0,
    ] {
        check(x, &mut buf);
    }
}

#[test]
fn round_trip_nan() {
    let mut buf = [0u8; 32];
    for x in [
        f64::NAN,
        -f64::NAN,
        <f64 as RawFloat>::signaling_nan(false),
        <f64 as RawFloat>::signaling_nan(true),
    ] {
        for fmt in FORMATS {
            assert_eq!(round_trip(x, fmt, None, &mut buf), x.to_bits());
        }
    }
    for x in [
        f32::NAN,
        -f32::NAN,
        <f32 as RawFloat>::signaling_nan(false),
    ] {
        assert_eq!(
            round_trip(x, CharsFormat::General, None, &mut buf),
            x.to_bits() as u64
        );
    }
}

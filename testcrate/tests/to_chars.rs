use std::{fmt, str::FromStr};

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

fn fmt<F: RawFloat>(x: F, fmt: CharsFormat, precision: Option<usize>) -> String {
    let mut buf = [0u8; 1200];
    let res = to_chars(&mut buf, x, fmt, precision);
    assert!(res.is_ok(), "{x:?} {fmt:?} {precision:?}");
    String::from_utf8(buf[..res.pos].to_vec()).unwrap()
}

fn sci(x: f64, p: usize) -> String {
    fmt(x, CharsFormat::Scientific, Some(p))
}

fn fixed(x: f64, p: usize) -> String {
    fmt(x, CharsFormat::Fixed, Some(p))
}

fn gen(x: f64, p: usize) -> String {
    fmt(x, CharsFormat::General, Some(p))
}

/// Converts `1.5e-7` style output of `LowerExp` to `1.5e-07`
fn c_style_exp(s: &str) -> String {
    let (mantissa, exp) = s.split_once('e').unwrap();
    let exp: i32 = exp.parse().unwrap();
    let sign = if exp < 0 { '-' } else { '+' };
    format!("{mantissa}e{sign}{:02}", exp.unsigned_abs())
}

fn rand_finite_f64(rng: &mut Xoshiro128StarStar) -> f64 {
    loop {
        let x = f64::from_bits(rng.next_u64());
        if x.is_finite() {
            return x
        }
    }
}

fn rand_finite_f32(rng: &mut Xoshiro128StarStar) -> f32 {
    loop {
        let x = f32::from_bits(rng.next_u32());
        if x.is_finite() {
            return x
        }
    }
}

#[test]
fn long_precision() {
    assert_eq!(
        fixed(1e-15, 50),
        "0.00000000000000100000000000000007770539987666107924"
    );
    assert_eq!(
        sci(1e-15, 50),
        "1.00000000000000007770539987666107923830718560119502e-15"
    );
    assert_eq!(
        sci(1e-17, 50),
        "1.00000000000000007154242405462192450852805618492325e-17"
    );
    assert_eq!(
        fixed(1e-17, 50),
        "0.00000000000000001000000000000000071542424054621925"
    );
    assert_eq!(sci(1e15, 50), format!("1.{}e+15", "0".repeat(50)));
    assert_eq!(sci(1e17, 50), format!("1.{}e+17", "0".repeat(50)));
    assert_eq!(fixed(1e15, 50), format!("1{}.{}", "0".repeat(15), "0".repeat(50)));
    assert_eq!(fixed(1e17, 50), format!("1{}.{}", "0".repeat(17), "0".repeat(50)));
}

#[test]
fn rounding_carries() {
    let x = 999999999.999999;
    assert_eq!(sci(x, 10), "1.0000000000e+09");
    assert_eq!(fixed(x, 3), "1000000000.000");
    assert_eq!(gen(x, 9), "1e+09");
    assert_eq!(gen(x, 10), "1000000000");

    let x = 999999.999999;
    assert_eq!(sci(x, 10), "1.0000000000e+06");
    assert_eq!(fixed(x, 3), "1000000.000");
    assert_eq!(gen(x, 6), "1e+06");
    assert_eq!(gen(x, 7), "1000000");

    let x = 9.999999;
    assert_eq!(sci(x, 5), "1.00000e+01");
    assert_eq!(fixed(x, 3), "10.000");
    assert_eq!(gen(x, 6), "10");
    assert_eq!(gen(x, 7), "9.999999");

    let x = 0.9999999;
    assert_eq!(sci(x, 5), "1.00000e+00");
    assert_eq!(fixed(x, 3), "1.000");
    assert_eq!(gen(x, 6), "1");
    assert_eq!(gen(x, 7), "0.9999999");

    let x = 0.0009999999;
    assert_eq!(sci(x, 5), "1.00000e-03");
    assert_eq!(fixed(x, 3), "0.001");
    assert_eq!(gen(x, 6), "0.001");
    assert_eq!(gen(x, 7), "0.0009999999");

    let x = 0.00009999999;
    assert_eq!(sci(x, 5), "1.00000e-04");
    assert_eq!(fixed(x, 3), "0.000");
    assert_eq!(gen(x, 6), "0.0001");
    assert_eq!(gen(x, 7), "9.999999e-05");

    let x = 0.00000009999999;
    assert_eq!(sci(x, 5), "1.00000e-07");
    assert_eq!(fixed(x, 3), "0.000");
    assert_eq!(gen(x, 6), "1e-07");
    assert_eq!(gen(x, 7), "9.999999e-08");

    assert_eq!(fixed(3746.348756384763, 6), "3746.348756");
    assert_eq!(fixed(3746.348759784763, 6), "3746.348760");
    #[allow(clippy::excessive_precision)]
    {
        assert_eq!(fixed(3746.9999999999999999, 6), "3747.000000");
        assert_eq!(fixed(9999.999999999999999999, 6), "10000.000000");
    }
}

#[test]
fn ties_round_to_even() {
    assert_eq!(fixed(0.5, 0), "0");
    assert_eq!(fixed(1.5, 0), "2");
    assert_eq!(fixed(2.5, 0), "2");
    assert_eq!(fixed(0.125, 2), "0.12");
    assert_eq!(fixed(0.375, 2), "0.38");
    assert_eq!(sci(2.5, 0), "2e+00");
    assert_eq!(sci(3.5, 0), "4e+00");
    assert_eq!(sci(1250.0, 1), "1.2e+03");
    // 0.15 is slightly below the tie
    assert_eq!(fixed(0.15, 1), "0.1");
    assert_eq!(fixed(0.35, 1), "0.3");
    // and 0.45 is slightly above
    assert_eq!(fixed(0.45, 1), "0.5");
}

#[test]
fn zeros() {
    assert_eq!(sci(0.0, 50), format!("0.{}e+00", "0".repeat(50)));
    assert_eq!(fixed(0.0, 50), format!("0.{}", "0".repeat(50)));
    assert_eq!(gen(0.0, 50), "0");
    assert_eq!(fmt(0.0f64, CharsFormat::General, None), "0");
    assert_eq!(fmt(-0.0f64, CharsFormat::General, None), "-0");
    assert_eq!(fmt(0.0f64, CharsFormat::Scientific, None), "0e+00");
    assert_eq!(fmt(-0.0f32, CharsFormat::Fixed, None), "-0");
    assert_eq!(fmt(0.0f64, CharsFormat::Hex, None), "0p+0");
    assert_eq!(fmt(-0.0f64, CharsFormat::Hex, Some(2)), "-0.00p+0");
    // nonzero values that round away entirely
    assert_eq!(fixed(1e-10, 3), "0.000");
    assert_eq!(fixed(-1e-10, 3), "-0.000");
    assert_eq!(fixed(0.4, 0), "0");
}

#[test]
fn shortest() {
    let general = |x: f64| fmt(x, CharsFormat::General, None);
    assert_eq!(general(1.0), "1");
    assert_eq!(general(0.1), "0.1");
    assert_eq!(general(-2.5), "-2.5");
    assert_eq!(general(123456.0), "123456");
    assert_eq!(general(1e16), "10000000000000000");
    assert_eq!(general(1e17), "1e+17");
    assert_eq!(general(0.0001), "0.0001");
    assert_eq!(general(0.00001), "1e-05");
    assert_eq!(general(1.0 / 3.0), "0.3333333333333333");
    assert_eq!(general(f64::MAX), "1.7976931348623157e+308");
    assert_eq!(general(f64::MIN_POSITIVE), "2.2250738585072014e-308");
    assert_eq!(general(5e-324), "5e-324");
    assert_eq!(general(1e23), "1e+23");
    assert_eq!(general(9007199254740993.0), "9007199254740992");
    assert_eq!(fmt(0.1f32, CharsFormat::General, None), "0.1");
    assert_eq!(fmt(16777216.0f32, CharsFormat::General, None), "16777216");
    assert_eq!(fmt(1e9f32, CharsFormat::General, None), "1e+09");
    assert_eq!(fmt(f32::MAX, CharsFormat::General, None), "3.4028235e+38");
    assert_eq!(fmt(1e-45f32, CharsFormat::Scientific, None), "1e-45");
    assert_eq!(fmt(1e300f64, CharsFormat::Scientific, None), "1e+300");
    assert_eq!(fmt(1.5e-7f64, CharsFormat::Scientific, None), "1.5e-07");
    assert_eq!(fmt(1e21f64, CharsFormat::Fixed, None), "1000000000000000000000");
    assert_eq!(fmt(1.25e-5f64, CharsFormat::Fixed, None), "0.0000125");
}

/// Returns if `ours` and `std` differ in exactly one digit, with `std` one
/// above `ours` and `ours` even
fn differs_by_tie(ours: &str, std: &str) -> bool {
    if ours.len() != std.len() {
        return false
    }
    let mut diffs = ours.bytes().zip(std.bytes()).filter(|(a, b)| a != b);
    match (diffs.next(), diffs.next()) {
        (Some((a, b)), None) => a.is_ascii_digit() && (b == (a + 1)) && ((a & 1) == 0),
        _ => false,
    }
}

/// The significant digits of `s` without sign, point, or exponent
fn mantissa_digits(s: &str) -> String {
    let mantissa = s.split_once('e').map_or(s, |(m, _)| m);
    mantissa.chars().filter(char::is_ascii_digit).collect()
}

/// Compares shortest output against `core`, which rounds exact ties in the
/// last digit half up where we round half to even
fn check_shortest<F>(x: F)
where
    F: RawFloat + fmt::Display + fmt::LowerExp + FromStr,
    <F as FromStr>::Err: fmt::Debug,
{
    let sci_ours = fmt(x, CharsFormat::Scientific, None);
    let sci_std = c_style_exp(&format!("{x:e}"));
    let fixed_ours = fmt(x, CharsFormat::Fixed, None);
    let fixed_std = format!("{x}");
    if sci_ours == sci_std {
        assert_eq!(fixed_ours, fixed_std);
        return
    }
    assert!(differs_by_tie(&sci_ours, &sci_std), "{sci_ours} {sci_std}");
    assert!(differs_by_tie(&fixed_ours, &fixed_std), "{fixed_ours} {fixed_std}");
    assert_eq!(sci_ours.parse::<F>().unwrap(), x, "{sci_ours}");
    assert_eq!(fixed_ours.parse::<F>().unwrap(), x, "{fixed_ours}");
    // the exact expansion is one digit longer and ends in the tying 5
    let digits = mantissa_digits(&sci_ours);
    let exact = fmt(x, CharsFormat::Scientific, Some(digits.len()));
    let exact_digits = mantissa_digits(&exact);
    let exact_digits = exact_digits.trim_end_matches('0');
    assert_eq!(exact_digits, format!("{digits}5"), "{sci_ours} {exact}");
    assert_eq!(exact, c_style_exp(&format!("{x:.p$e}", p = digits.len())));
}

#[test]
fn shortest_against_std() {
    let mut rng = Xoshiro128StarStar::seed_from_u64(0);
    for _ in 0..N {
        check_shortest(rand_finite_f64(&mut rng));
        check_shortest(rand_finite_f32(&mut rng));
    }
}

#[test]
fn shortest_ties_to_even() {
    assert_eq!(fmt(3382957.25f32, CharsFormat::Scientific, None), "3.3829572e+06");
    assert_eq!(fmt(3382957.25f32, CharsFormat::Fixed, None), "3382957.2");
    assert_eq!(fmt(3382957.25f32, CharsFormat::General, None), "3382957.2");
    assert_eq!(
        fmt(-206484909629765.625f64, CharsFormat::Scientific, None),
        "-2.0648490962976562e+14"
    );
    assert_eq!(
        fmt(-206484909629765.625f64, CharsFormat::Fixed, None),
        "-206484909629765.62"
    );
    check_shortest(3382957.25f32);
    check_shortest(-206484909629765.625f64);
}

#[test]
fn precision_against_std() {
    let mut rng = Xoshiro128StarStar::seed_from_u64(1);
    for _ in 0..(N / 10) {
        let p = (rng.next_u32() % 40) as usize;
        let x = rand_finite_f64(&mut rng);
        assert_eq!(sci(x, p), c_style_exp(&format!("{x:.p$e}")));
        assert_eq!(fixed(x, p), format!("{x:.p$}"));
        // short binary fractions, which have exact decimal ties
        let x = (rng.next_u32() as f64) / 1024.0;
        assert_eq!(sci(x, p), c_style_exp(&format!("{x:.p$e}")));
        assert_eq!(fixed(x, p), format!("{x:.p$}"));
        let y = rand_finite_f32(&mut rng);
        assert_eq!(
            fmt(y, CharsFormat::Scientific, Some(p)),
            c_style_exp(&format!("{y:.p$e}"))
        );
        assert_eq!(fmt(y, CharsFormat::Fixed, Some(p)), format!("{y:.p$}"));
    }
}

#[test]
fn general_precision() {
    assert_eq!(gen(100.0, 3), "100");
    assert_eq!(gen(1000.0, 3), "1e+03");
    assert_eq!(gen(123.456, 0), "1e+02");
    assert_eq!(gen(123.456, 1), "1e+02");
    assert_eq!(gen(123.456, 4), "123.5");
    assert_eq!(gen(0.00001234, 3), "1.23e-05");
    assert_eq!(gen(0.0001234, 3), "0.000123");
    assert_eq!(gen(1.5, 20), "1.5");
    assert_eq!(gen(-1e100, 5), "-1e+100");
    assert_eq!(gen(0.1, 30), "0.100000000000000005551115123126");
    // the fixed window still ends at the precision
    assert_eq!(gen(123456789.0, 30), "123456789");
}

#[test]
fn hex() {
    let hex = |x: f64, p: Option<usize>| fmt(x, CharsFormat::Hex, p);
    assert_eq!(hex(1.0, None), "1p+0");
    assert_eq!(hex(0.5, None), "1p-1");
    assert_eq!(hex(-3.0, None), "-1.8p+1");
    assert_eq!(hex(0.1, None), "1.999999999999ap-4");
    assert_eq!(hex(f64::MAX, None), "1.fffffffffffffp+1023");
    assert_eq!(hex(5e-324, None), "0.0000000000001p-1022");
    assert_eq!(hex(f64::MIN_POSITIVE, None), "1p-1022");
    assert_eq!(fmt(0.1f32, CharsFormat::Hex, None), "1.99999ap-4");
    assert_eq!(fmt(1e-45f32, CharsFormat::Hex, None), "0.000002p-126");
    assert_eq!(hex(1.0, Some(3)), "1.000p+0");
    assert_eq!(hex(f64::from_bits(0x3fff_ffff_ffff_fffb), None), "1.ffffffffffffbp+0");
    assert_eq!(hex(f64::from_bits(0x3fff_ffff_ffff_fffb), Some(2)), "2.00p+0");
    // ties to even, including on the leading digit
    assert_eq!(hex(1.5, Some(0)), "2p+0");
    assert_eq!(hex(2.5, Some(0)), "1p+1");
    assert_eq!(hex(1.03125, Some(1)), "1.0p+0");
    assert_eq!(hex(1.09375, Some(1)), "1.2p+0");
    assert_eq!(hex(0.1, Some(20)), "1.999999999999a0000000p-4");
}

#[test]
fn specials() {
    let general = |x: f64| fmt(x, CharsFormat::General, None);
    assert_eq!(general(f64::INFINITY), "inf");
    assert_eq!(general(f64::NEG_INFINITY), "-inf");
    assert_eq!(general(f64::NAN), "nan");
    assert_eq!(general(-f64::NAN), "-nan(ind)");
    assert_eq!(general(<f64 as RawFloat>::signaling_nan(false)), "nan(snan)");
    assert_eq!(general(<f64 as RawFloat>::signaling_nan(true)), "-nan(snan)");
    // precision and format do not matter
    assert_eq!(fmt(f32::INFINITY, CharsFormat::Fixed, Some(10)), "inf");
    assert_eq!(fmt(-f32::NAN, CharsFormat::Hex, Some(3)), "-nan(ind)");
    assert_eq!(fmt(f32::NAN, CharsFormat::Scientific, Some(3)), "nan");
}

#[test]
fn small_buffers() {
    let mut buf = [b'x'; 16];
    let res = to_chars(&mut buf[..4], 12345.0f64, CharsFormat::Fixed, None);
    assert_eq!(res.pos, 4);
    assert_eq!(res.err, Some(CharsError::InvalidArgument));
    assert_eq!(res.into_result(), Err(CharsError::InvalidArgument));
    // nothing is written past the end
    assert_eq!(&buf[4..], b"xxxxxxxxxxxx");

    let res = to_chars(&mut buf[..5], 12345.0f64, CharsFormat::Fixed, None);
    assert_eq!(res.into_result(), Ok(5));
    assert_eq!(&buf[..5], b"12345");

    let res = to_chars(&mut [], 1.0f64, CharsFormat::General, None);
    assert_eq!((res.pos, res.err), (0, Some(CharsError::InvalidArgument)));
    let res = to_chars(&mut buf[..3], f64::NEG_INFINITY, CharsFormat::General, None);
    assert_eq!(res.err, Some(CharsError::InvalidArgument));
    let res = to_chars(&mut buf[..4], f64::NEG_INFINITY, CharsFormat::General, None);
    assert_eq!(res.into_result(), Ok(4));

    // huge precisions fail cleanly instead of overflowing
    let res = to_chars(&mut buf, 1.0f64, CharsFormat::Fixed, Some(usize::MAX));
    assert_eq!(res.err, Some(CharsError::InvalidArgument));
    let res = to_chars(&mut buf, 1.0f64, CharsFormat::Scientific, Some(usize::MAX));
    assert_eq!(res.err, Some(CharsError::InvalidArgument));
    let res = to_chars(&mut buf, 1.0f64, CharsFormat::Hex, Some(usize::MAX));
    assert_eq!(res.err, Some(CharsError::InvalidArgument));
    // but general precision only bounds the digits
    let res = to_chars(&mut buf, 1.0f64, CharsFormat::General, Some(usize::MAX));
    assert_eq!(res.into_result(), Ok(1));
}

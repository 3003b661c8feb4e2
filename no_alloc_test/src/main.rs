#![no_std]
#![no_main]

extern crate panic_halt;

use fltconv::prelude::*;
use rand_xoshiro::{rand_core::SeedableRng, Xoshiro128StarStar};
use riscv_minimal_rt::entry;

#[entry]
fn main() -> ! {
    // the 32 bit target goes through the portable widening multiplication
    let mut buf = [0u8; 64];
    let res = to_chars(&mut buf, 0.1f64, CharsFormat::Scientific, Some(20));
    assert_eq!(&buf[..res.pos], b"1.00000000000000005551e-01");
    let res = to_chars(&mut buf, 1e21f64, CharsFormat::General, None);
    assert_eq!(&buf[..res.pos], b"1e+21");
    let res = to_chars(&mut buf, -3.0f32, CharsFormat::Hex, None);
    assert_eq!(&buf[..res.pos], b"-1.8p+1");
    let res = to_chars(&mut buf[..4], 12345.0f64, CharsFormat::Fixed, None);
    assert_eq!(res.err, Some(CharsError::InvalidArgument));

    let mut x = 42.0f64;
    let res = from_chars(b"1e99999", &mut x, CharsFormat::General);
    assert_eq!(res.err, Some(CharsError::ValueTooLarge));
    assert_eq!(x, 42.0);
    let res = from_chars(b"2.2250738585072012e-308", &mut x, CharsFormat::General);
    assert!(res.is_ok());
    assert_eq!(x, f64::MIN_POSITIVE);
    let mut y = 0.0f32;
    let res = from_chars(b"-nan(snan)", &mut y, CharsFormat::General);
    assert!(res.is_ok() && y.is_nan());

    let mut rng = Xoshiro128StarStar::seed_from_u64(0);
    let mut w = WideUint::ZERO;
    w.rand_assign_using(&mut rng).unwrap();
    let (quo, rem) = w.div_rem(WideUint::from_u64(10)).unwrap();
    assert_eq!((quo * 10u8) + rem, w);

    panic!("main is not allowed to return")
}

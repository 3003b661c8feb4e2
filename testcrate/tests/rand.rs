use fltconv::prelude::*;
use rand_xoshiro::{
    rand_core::{RngCore, SeedableRng},
    Xoshiro128StarStar,
};

#[test]
fn rand() {
    // `rand_assign_using` fills little endian bytes, so this matches two
    // `u64`s from the same generator
    let mut rng0 = Xoshiro128StarStar::seed_from_u64(0);
    let mut rng1 = Xoshiro128StarStar::seed_from_u64(0);
    let mut x = WideUint::ZERO;
    for _ in 0..16 {
        x.rand_assign_using(&mut rng0).unwrap();
        let mut bytes = [0u8; 16];
        rng1.fill_bytes(&mut bytes);
        assert_eq!(x.to_u128(), u128::from_le_bytes(bytes));
    }
}

#[test]
fn rand_values_format() {
    // random `WideUint`s as float bits exercise every class of value
    let mut rng = Xoshiro128StarStar::seed_from_u64(1);
    let mut x = WideUint::ZERO;
    let mut buf = [0u8; 1200];
    for _ in 0..64 {
        x.rand_assign_using(&mut rng).unwrap();
        for bits in [x.high, x.low] {
            let f = <f64 as RawFloat>::from_bits_u64(bits);
            let res = to_chars(&mut buf, f, CharsFormat::General, None);
            assert!(res.is_ok() && (res.pos > 0));
        }
    }
}

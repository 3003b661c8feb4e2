//! Correctly rounded conversions between binary floating point values and
//! their text, without allocation.
//!
//! `to_chars` writes the shortest round trip text or a fixed precision in
//! general, scientific, fixed, or hexadecimal form. `from_chars` parses the
//! same forms back, reporting out of range literals instead of saturating.
//! Both work on caller provided byte buffers and never panic.
//!
//! ```
//! use fltconv::prelude::*;
//!
//! let mut buf = [0u8; 32];
//! let res = to_chars(&mut buf, 1.0f64 / 3.0, CharsFormat::General, None);
//! assert_eq!(&buf[..res.pos], b"0.3333333333333333");
//!
//! let mut x = 0.0f64;
//! let res = from_chars(&buf[..res.pos], &mut x, CharsFormat::General);
//! assert!(res.is_ok());
//! assert_eq!(x, 1.0 / 3.0);
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

#[doc(hidden)]
pub use fltconv_core::fltconv_internals;
pub use fltconv_core::*;

pub mod prelude {
    pub use fltconv_core::prelude::*;
}

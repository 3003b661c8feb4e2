//! Macros for export

/// A basic for loop for const contexts
#[macro_export]
macro_rules! const_for {
    ($i:ident in $range:block $b:block) => {
        let mut $i: usize = $range.start.wrapping_sub(1);
        loop {
            // the increment must happen before `$b` so that `continue`s still cause it
            $i = $i.wrapping_add(1);
            if $i >= $range.end {
                break
            }
            $b;
        }
    };
    ($i:ident in $range:block.rev() $b:block) => {
        let mut $i: usize = $range.end;
        loop {
            if $i <= $range.start {
                break
            }
            $i = $i.wrapping_sub(1);
            $b;
        }
    };
}

/// Implements a binary operator and its assigning variant for `WideUint` in
/// terms of an inherent `const fn`. The right hand side may be anything that
/// converts into a `WideUint`.
macro_rules! wide_binop {
    ($($Op:ident $op:ident $OpAssign:ident $op_assign:ident => $f:ident);*;) => {
        $(
            impl<T: Into<WideUint>> core::ops::$Op<T> for WideUint {
                type Output = WideUint;

                #[inline]
                fn $op(self, rhs: T) -> WideUint {
                    self.$f(rhs.into())
                }
            }

            impl<T: Into<WideUint>> core::ops::$OpAssign<T> for WideUint {
                #[inline]
                fn $op_assign(&mut self, rhs: T) {
                    *self = self.$f(rhs.into());
                }
            }
        )*
    };
}

/// Implements `Shl` and `Shr` for `WideUint` with the given shift amount
/// types. Amounts are taken as unsigned magnitudes, so negative signed amounts
/// are huge and shift everything out.
macro_rules! wide_shift {
    ($($ty:ident)*) => {
        $(
            impl core::ops::Shl<$ty> for WideUint {
                type Output = WideUint;

                #[inline]
                fn shl(self, s: $ty) -> WideUint {
                    self.shl(shift_amount(s as u128))
                }
            }

            impl core::ops::ShlAssign<$ty> for WideUint {
                #[inline]
                fn shl_assign(&mut self, s: $ty) {
                    *self = WideUint::shl(*self, shift_amount(s as u128));
                }
            }

            impl core::ops::Shr<$ty> for WideUint {
                type Output = WideUint;

                #[inline]
                fn shr(self, s: $ty) -> WideUint {
                    self.shr(shift_amount(s as u128))
                }
            }

            impl core::ops::ShrAssign<$ty> for WideUint {
                #[inline]
                fn shr_assign(&mut self, s: $ty) {
                    *self = WideUint::shr(*self, shift_amount(s as u128));
                }
            }
        )*
    };
}

/// Implements conversion from and comparison against a narrower (or equal
/// width) primitive integer. `$neg` and `$wide` are evaluated with `$x` bound
/// to the primitive value.
macro_rules! wide_narrow {
    ($($ty:ident $x:ident => $neg:expr, $wide:expr);*;) => {
        $(
            impl From<$ty> for WideUint {
                #[inline]
                fn from($x: $ty) -> WideUint {
                    $wide
                }
            }

            impl PartialEq<$ty> for WideUint {
                #[inline]
                fn eq(&self, rhs: &$ty) -> bool {
                    let $x = *rhs;
                    cmp_narrow(*self, $neg, $wide).is_eq()
                }
            }

            impl PartialOrd<$ty> for WideUint {
                #[inline]
                fn partial_cmp(&self, rhs: &$ty) -> Option<Ordering> {
                    let $x = *rhs;
                    Some(cmp_narrow(*self, $neg, $wide))
                }
            }

            impl PartialEq<WideUint> for $ty {
                #[inline]
                fn eq(&self, rhs: &WideUint) -> bool {
                    rhs == self
                }
            }

            impl PartialOrd<WideUint> for $ty {
                #[inline]
                fn partial_cmp(&self, rhs: &WideUint) -> Option<Ordering> {
                    rhs.partial_cmp(self).map(Ordering::reverse)
                }
            }
        )*
    };
}

/*
 *  Copyright (c) 2018 The WebRTC project authors. All Rights Reserved.
 *
 *  Use of this source code is governed by a BSD-style license
 *  that can be found in the LICENSE file in the root of the source
 *  tree. An additional intellectual property rights grant can be found
 *  in the file PATENTS.  All contributing project authors may
 *  be found in the AUTHORS file in the root of the source tree.
 */

// UnitBase is a superclass in C++.
// The closest we can do in Rust is a macro, as traits don't support const.
macro_rules! unit_base {
    ($ty:ident) => {
        #[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
        pub struct $ty(i64);

        #[allow(dead_code)]
        impl $ty {
            pub const fn zero() -> Self {
                Self(0)
            }
            pub const fn plus_infinity() -> Self {
                Self(i64::MAX)
            }
            pub const fn minus_infinity() -> Self {
                Self(i64::MIN)
            }

            pub const fn is_zero(&self) -> bool {
                self.0 == 0
            }
            pub const fn is_finite(&self) -> bool {
                !self.is_infinite()
            }
            pub const fn is_infinite(&self) -> bool {
                self.0 == i64::MAX || self.0 == i64::MIN
            }
            pub const fn is_plus_infinity(&self) -> bool {
                self.0 == i64::MAX
            }
            pub const fn is_minus_infinity(&self) -> bool {
                self.0 == i64::MIN
            }

            const fn from_fraction(denominator: i64, value: i64) -> Self {
                assert!(denominator >= 0);
                Self::from_value(value * denominator)
            }

            fn from_fraction_float(denominator: f64, value: f64) -> Self {
                Self::from_value_float(value * denominator)
            }

            const fn to_fraction(&self, denominator: i64) -> i64 {
                self.divide_round_to_nearest(denominator)
            }

            const fn divide_round_to_nearest(&self, d: i64) -> i64 {
                assert!(d > 0);

                let v = self.to_value();
                let mut result = v / d;
                let remainder = v % d;

                if remainder.abs() * 2 >= d {
                    if v < 0 {
                        result -= 1
                    } else {
                        result += 1
                    }
                }
                result
            }

            fn to_fraction_float(&self, denominator: f64) -> f64 {
                assert!(denominator > 0.0);
                self.to_value_float() / denominator
            }

            const fn to_fraction_or(&self, denominator: i64, fallback_value: i64) -> i64 {
                if self.is_finite() {
                    self.divide_round_to_nearest(denominator)
                } else {
                    fallback_value
                }
            }

            const fn from_value(value: i64) -> Self {
                assert!(value != i64::MAX && value != i64::MIN);
                if Self::ONE_SIDED {
                    assert!(value >= 0);
                }
                Self(value)
            }

            fn from_value_float(value: f64) -> Self {
                assert!(!value.is_nan());

                if value == f64::INFINITY {
                    return Self::plus_infinity();
                }
                if value == f64::NEG_INFINITY {
                    assert!(!Self::ONE_SIDED);
                    return Self::minus_infinity();
                }
                if Self::ONE_SIDED {
                    assert!(value >= 0.0);
                }
                Self(value as i64)
            }

            const fn to_value(&self) -> i64 {
                assert!(self.is_finite());
                self.0
            }

            const fn to_value_or(&self, fallback_value: i64) -> i64 {
                if self.is_finite() {
                    self.0
                } else {
                    fallback_value
                }
            }

            fn to_value_float(&self) -> f64 {
                if self.is_plus_infinity() {
                    f64::INFINITY
                } else if self.is_minus_infinity() {
                    f64::NEG_INFINITY
                } else {
                    self.0 as f64
                }
            }
        }
    };
}

// RelativeUnit adds arithmetic between values of the same unit.
macro_rules! relative_unit {
    ($ty:ident) => {
        crate::api::units::unit_base!($ty);

        impl $ty {
            pub fn clamped(&self, min_value: Self, max_value: Self) -> Self {
                Self(self.0.max(min_value.0).min(max_value.0))
            }
        }

        impl ::std::ops::Add for $ty {
            type Output = Self;

            fn add(self, rhs: Self) -> Self::Output {
                if self.is_plus_infinity() || rhs.is_plus_infinity() {
                    assert!(!self.is_minus_infinity());
                    assert!(!rhs.is_minus_infinity());
                    return Self::plus_infinity();
                } else if self.is_minus_infinity() || rhs.is_minus_infinity() {
                    assert!(!self.is_plus_infinity());
                    assert!(!rhs.is_plus_infinity());
                    return Self::minus_infinity();
                }
                Self::from_value(self.to_value() + rhs.to_value())
            }
        }

        impl ::std::ops::Sub for $ty {
            type Output = Self;

            fn sub(self, rhs: Self) -> Self::Output {
                if self.is_plus_infinity() || rhs.is_minus_infinity() {
                    assert!(!self.is_minus_infinity());
                    assert!(!rhs.is_plus_infinity());
                    return Self::plus_infinity();
                } else if self.is_minus_infinity() || rhs.is_plus_infinity() {
                    assert!(!self.is_plus_infinity());
                    assert!(!rhs.is_minus_infinity());
                    return Self::minus_infinity();
                }
                Self::from_value(self.to_value() - rhs.to_value())
            }
        }

        impl ::std::ops::AddAssign for $ty {
            fn add_assign(&mut self, rhs: Self) {
                *self = *self + rhs;
            }
        }

        impl ::std::ops::SubAssign for $ty {
            fn sub_assign(&mut self, rhs: Self) {
                *self = *self - rhs;
            }
        }

        impl ::std::ops::Div for $ty {
            type Output = f64;

            fn div(self, rhs: Self) -> Self::Output {
                self.to_value_float() / rhs.to_value_float()
            }
        }

        impl ::std::ops::Div<i64> for $ty {
            type Output = Self;

            fn div(self, rhs: i64) -> Self::Output {
                Self::from_value(self.to_value() / rhs)
            }
        }

        impl ::std::ops::Mul<f64> for $ty {
            type Output = Self;

            fn mul(self, rhs: f64) -> Self::Output {
                Self::from_value_float((self.to_value_float() * rhs).round())
            }
        }

        impl ::std::ops::Mul<i64> for $ty {
            type Output = Self;

            fn mul(self, rhs: i64) -> Self::Output {
                Self::from_value(self.to_value() * rhs)
            }
        }

        impl ::std::ops::Mul<$ty> for f64 {
            type Output = $ty;

            fn mul(self, rhs: $ty) -> Self::Output {
                rhs * self
            }
        }

        impl ::std::ops::Mul<$ty> for i64 {
            type Output = $ty;

            fn mul(self, rhs: $ty) -> Self::Output {
                rhs * self
            }
        }
    };
}

pub(crate) use relative_unit;
pub(crate) use unit_base;

#[cfg(test)]
mod test {
    use approx::assert_relative_eq;

    relative_unit!(TestUnit);

    impl std::fmt::Debug for TestUnit {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.debug_tuple("TestUnit").field(&self.0).finish()
        }
    }

    impl TestUnit {
        const ONE_SIDED: bool = false;

        pub const fn from_kilo(kilo: i64) -> Self {
            Self::from_fraction(1000, kilo)
        }

        pub fn from_kilo_float(kilo: f64) -> Self {
            Self::from_fraction_float(1000.0, kilo)
        }

        pub const fn to_kilo(&self) -> i64 {
            self.to_fraction(1000)
        }

        pub const fn to_kilo_or(&self, fallback: i64) -> i64 {
            self.to_fraction_or(1000, fallback)
        }

        pub fn to_kilo_float(&self) -> f64 {
            self.to_fraction_float(1000.0)
        }

        pub const fn raw(&self) -> i64 {
            self.to_value_or(-1)
        }
    }

    #[test]
    fn rounds_to_nearest_when_converting_down() {
        assert_eq!(TestUnit(1499).to_kilo(), 1);
        assert_eq!(TestUnit(1500).to_kilo(), 2);
        assert_eq!(TestUnit(-1499).to_kilo(), -1);
        assert_eq!(TestUnit(-1500).to_kilo(), -2);
    }

    #[test]
    fn infinity_falls_back() {
        assert_eq!(TestUnit::plus_infinity().to_kilo_or(-7), -7);
        assert_eq!(TestUnit::plus_infinity().raw(), -1);
        assert_eq!(TestUnit::from_kilo(3).to_kilo_or(-7), 3);
        assert!(TestUnit::from_kilo_float(f64::INFINITY).is_plus_infinity());
        assert_relative_eq!(TestUnit::from_kilo(5).to_kilo_float(), 5.0);
    }

    #[test]
    fn infinity_absorbs_finite_arithmetic() {
        let finite = TestUnit::from_kilo(10);
        assert!((TestUnit::plus_infinity() + finite).is_plus_infinity());
        assert!((TestUnit::minus_infinity() - finite).is_minus_infinity());
        assert!((finite - TestUnit::plus_infinity()).is_minus_infinity());
    }

    #[test]
    fn clamps_between_bounds() {
        let lower = TestUnit::from_kilo(1);
        let upper = TestUnit::from_kilo(5);
        assert_eq!(TestUnit::from_kilo(0).clamped(lower, upper), lower);
        assert_eq!(TestUnit::from_kilo(9).clamped(lower, upper), upper);
        assert_eq!(TestUnit::from_kilo(3).clamped(lower, upper), TestUnit::from_kilo(3));
    }

    #[test]
    fn scales_by_scalars() {
        let value = TestUnit::from_kilo(2);
        assert_eq!(value * 3i64, TestUnit::from_kilo(6));
        assert_eq!(1.25 * value, TestUnit(2500));
        assert_eq!(value / 4i64, TestUnit(500));
        assert_relative_eq!(value / TestUnit::from_kilo(4), 0.5);
    }
}

/*
 *  Copyright (c) 2018 The WebRTC project authors. All Rights Reserved.
 *
 *  Use of this source code is governed by a BSD-style license
 *  that can be found in the LICENSE file in the root of the source
 *  tree. An additional intellectual property rights grant can be found
 *  in the file PATENTS.  All contributing project authors may
 *  be found in the AUTHORS file in the root of the source tree.
 */

// DataRate is a class that represents a given data rate. This can be used to
// represent bandwidth, encoding bitrate, etc. The internal storage is bits per
// second (bps).

use std::fmt;

super::relative_unit!(DataRate);

impl DataRate {
    const ONE_SIDED: bool = true;

    pub const fn from_bits_per_sec(value: i64) -> Self {
        Self::from_value(value)
    }

    pub fn from_bits_per_sec_float(value: f64) -> Self {
        Self::from_value_float(value)
    }

    pub const fn from_kilobits_per_sec(value: i64) -> Self {
        Self::from_fraction(1000, value)
    }

    pub const fn infinity() -> Self {
        Self::plus_infinity()
    }

    pub const fn bps(&self) -> i64 {
        self.to_value()
    }

    pub const fn kbps(&self) -> i64 {
        self.to_fraction(1000)
    }

    pub const fn bps_or(&self, fallback_value: i64) -> i64 {
        self.to_value_or(fallback_value)
    }

    pub const fn kbps_or(&self, fallback_value: i64) -> i64 {
        self.to_fraction_or(1000, fallback_value)
    }

    /// Difference between two rates, floored at zero instead of asserting on a
    /// negative result.
    pub fn saturating_sub(self, rhs: Self) -> Self {
        if rhs >= self {
            Self::zero()
        } else {
            self - rhs
        }
    }
}

impl fmt::Debug for DataRate {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.is_plus_infinity() {
            write!(f, "+inf bps")
        } else if self.is_minus_infinity() {
            write!(f, "-inf bps")
        } else if self.bps() == 0 || self.bps() % 1000 != 0 {
            write!(f, "{} bps", self.bps())
        } else {
            write!(f, "{} kbps", self.kbps())
        }
    }
}

impl fmt::Display for DataRate {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn const_expr() {
        const VALUE: i64 = 12345;
        const DATA_RATE_ZERO: DataRate = DataRate::zero();
        const DATA_RATE_INF: DataRate = DataRate::infinity();
        assert_eq!(DataRate::default(), DATA_RATE_ZERO);
        assert!(DATA_RATE_ZERO.is_zero());
        assert!(DATA_RATE_INF.is_infinite());
        assert_eq!(DATA_RATE_INF.bps_or(-1), -1);
        assert!(DATA_RATE_INF > DATA_RATE_ZERO);

        const DATA_RATE_BPS: DataRate = DataRate::from_bits_per_sec(VALUE);
        const DATA_RATE_KBPS: DataRate = DataRate::from_kilobits_per_sec(VALUE);
        assert_eq!(DATA_RATE_BPS.bps(), VALUE);
        assert_eq!(DATA_RATE_BPS.bps_or(0), VALUE);
        assert_eq!(DATA_RATE_KBPS.kbps_or(0), VALUE);
    }

    #[test]
    fn get_different_prefix() {
        const VALUE: i64 = 123 * 8000;
        assert_eq!(DataRate::from_bits_per_sec(VALUE).kbps(), VALUE / 1000);
        assert_eq!(DataRate::from_kilobits_per_sec(30).bps(), 30_000);
    }

    #[test]
    fn saturating_sub_floors_at_zero() {
        let target = DataRate::from_kilobits_per_sec(200);
        let link = DataRate::from_kilobits_per_sec(250);
        assert_eq!(link.saturating_sub(target), DataRate::from_kilobits_per_sec(50));
        assert_eq!(target.saturating_sub(link), DataRate::zero());
        assert_eq!(target.saturating_sub(target), DataRate::zero());
    }

    #[test]
    fn math_operations() {
        const VALUE_A: i64 = 450;
        const VALUE_B: i64 = 267;
        let rate_a = DataRate::from_bits_per_sec(VALUE_A);
        let rate_b = DataRate::from_bits_per_sec(VALUE_B);

        assert_eq!((rate_a + rate_b).bps(), VALUE_A + VALUE_B);
        assert_eq!((rate_a - rate_b).bps(), VALUE_A - VALUE_B);
        assert_eq!((rate_a * VALUE_B).bps(), VALUE_A * VALUE_B);
        assert_eq!((rate_a / 10).bps(), VALUE_A / 10);

        let mut mutable_rate = rate_a;
        mutable_rate += rate_b;
        assert_eq!(mutable_rate.bps(), VALUE_A + VALUE_B);
        mutable_rate -= rate_a;
        assert_eq!(mutable_rate.bps(), VALUE_B);
    }

    #[test]
    fn formats_in_kbps_when_exact() {
        assert_eq!(format!("{:?}", DataRate::from_kilobits_per_sec(300)), "300 kbps");
        assert_eq!(format!("{}", DataRate::from_bits_per_sec(1500)), "1500 bps");
        assert_eq!(format!("{:?}", DataRate::infinity()), "+inf bps");
    }

    #[test]
    #[should_panic]
    fn negative_rate_is_rejected() {
        let _ = DataRate::from_bits_per_sec(100) - DataRate::from_bits_per_sec(200);
    }
}

/*
 *  Copyright (c) 2013 The WebRTC project authors. All Rights Reserved.
 *
 *  Use of this source code is governed by a BSD-style license
 *  that can be found in the LICENSE file in the root of the source
 *  tree. An additional intellectual property rights grant can be found
 *  in the file PATENTS.  All contributing project authors may
 *  be found in the AUTHORS file in the root of the source tree.
 */

use std::sync::atomic::{AtomicI64, Ordering};
use std::time::Instant;

use crate::api::units::{TimeDelta, Timestamp};

/// A clock interface that allows reading of absolute and relative timestamps.
pub trait Clock {
    /// Returns a timestamp relative to an unspecified epoch.
    fn current_time(&self) -> Timestamp;

    fn time_in_milliseconds(&self) -> i64 {
        self.current_time().ms()
    }
}

/// Monotonic clock whose epoch is the moment it was created.
#[derive(Debug)]
pub struct RealTimeClock {
    start: Instant,
}

impl RealTimeClock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl Default for RealTimeClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for RealTimeClock {
    fn current_time(&self) -> Timestamp {
        Timestamp::from_micros(self.start.elapsed().as_micros() as i64)
    }
}

/// Clock that only moves when told to.
#[derive(Debug)]
pub struct SimulatedClock {
    time_us: AtomicI64,
}

impl SimulatedClock {
    pub fn new(initial_time: Timestamp) -> Self {
        Self {
            time_us: AtomicI64::new(initial_time.us()),
        }
    }

    pub fn advance_time(&self, delta: TimeDelta) {
        assert!(delta >= TimeDelta::zero());
        self.time_us.fetch_add(delta.us(), Ordering::Relaxed);
    }
}

impl Clock for SimulatedClock {
    fn current_time(&self) -> Timestamp {
        Timestamp::from_micros(self.time_us.load(Ordering::Relaxed))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn simulated_clock_advances() {
        let clock = SimulatedClock::new(Timestamp::from_seconds(1000));
        assert_eq!(clock.time_in_milliseconds(), 1_000_000);

        clock.advance_time(TimeDelta::from_millis(500));
        assert_eq!(clock.current_time(), Timestamp::from_millis(1_000_500));
    }

    #[test]
    fn real_time_clock_is_monotonic() {
        let clock = RealTimeClock::new();
        let first = clock.current_time();
        assert!(clock.current_time() >= first);
    }
}

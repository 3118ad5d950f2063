/*
 *  Copyright (c) 2018 The WebRTC project authors. All Rights Reserved.
 *
 *  Use of this source code is governed by a BSD-style license
 *  that can be found in the LICENSE file in the root of the source
 *  tree. An additional intellectual property rights grant can be found
 *  in the file PATENTS.  All contributing project authors may
 *  be found in the AUTHORS file in the root of the source tree.
 */

use crate::api::units::{TimeDelta, Timestamp};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EncoderActivityChange {
    // No frame was encoded during a whole check interval.
    TimedOut,
    // Frames are flowing again after a time out.
    Active,
}

/// Tracks whether the encoder produces frames, in fixed intervals of
/// [ENCODER_TIME_OUT](Self::ENCODER_TIME_OUT).
///
/// There is no timer: [check](Self::check) replays every interval that ended
/// since the previous call.
#[derive(Debug)]
pub struct EncoderActivityMonitor {
    last_check: Timestamp,
    activity: bool,
    timed_out: bool,
}

impl EncoderActivityMonitor {
    pub const ENCODER_TIME_OUT: TimeDelta = TimeDelta::from_seconds(2);

    pub fn new(now: Timestamp) -> Self {
        Self {
            last_check: now,
            activity: false,
            timed_out: false,
        }
    }

    pub fn update_encoder_activity(&mut self) {
        self.activity = true;
    }

    pub fn timed_out(&self) -> bool {
        self.timed_out
    }

    pub fn check(&mut self, now: Timestamp) -> Vec<EncoderActivityChange> {
        let mut changes = Vec::new();
        while now - self.last_check >= Self::ENCODER_TIME_OUT {
            self.last_check += Self::ENCODER_TIME_OUT;

            if !self.activity {
                if !self.timed_out {
                    changes.push(EncoderActivityChange::TimedOut);
                }
                self.timed_out = true;
            } else if self.timed_out {
                changes.push(EncoderActivityChange::Active);
                self.timed_out = false;
            }
            self.activity = false;
        }
        changes
    }
}

#[cfg(test)]
mod test {
    use test_trace::test;

    use super::*;

    #[test]
    fn nothing_happens_within_an_interval() {
        let start = Timestamp::from_seconds(10);
        let mut monitor = EncoderActivityMonitor::new(start);
        assert!(monitor.check(start + TimeDelta::from_millis(1999)).is_empty());
        assert!(!monitor.timed_out());
    }

    #[test]
    fn times_out_once_without_frames() {
        let start = Timestamp::from_seconds(10);
        let mut monitor = EncoderActivityMonitor::new(start);
        assert_eq!(
            monitor.check(start + TimeDelta::from_seconds(2)),
            vec![EncoderActivityChange::TimedOut]
        );
        assert!(monitor.timed_out());
        assert!(monitor.check(start + TimeDelta::from_seconds(4)).is_empty());
    }

    #[test]
    fn frame_keeps_one_interval_alive() {
        let start = Timestamp::from_seconds(10);
        let mut monitor = EncoderActivityMonitor::new(start);
        monitor.update_encoder_activity();

        // The first interval saw a frame, the second did not.
        assert_eq!(
            monitor.check(start + TimeDelta::from_seconds(5)),
            vec![EncoderActivityChange::TimedOut]
        );
    }

    #[test]
    fn becomes_active_again() {
        let start = Timestamp::from_seconds(10);
        let mut monitor = EncoderActivityMonitor::new(start);
        monitor.check(start + TimeDelta::from_seconds(2));
        assert!(monitor.timed_out());

        monitor.update_encoder_activity();
        assert_eq!(
            monitor.check(start + TimeDelta::from_seconds(4)),
            vec![EncoderActivityChange::Active]
        );
        assert!(!monitor.timed_out());
    }
}

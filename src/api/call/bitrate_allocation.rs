/*
 *  Copyright (c) 2018 The WebRTC project authors. All Rights Reserved.
 *
 *  Use of this source code is governed by a BSD-style license
 *  that can be found in the LICENSE file in the root of the source
 *  tree. An additional intellectual property rights grant can be found
 *  in the file PATENTS.  All contributing project authors may
 *  be found in the AUTHORS file in the root of the source tree.
 */

use crate::api::units::{DataRate, TimeDelta};

/// BitrateAllocationUpdate contains information about desired send
/// information for a single stream, as produced by the bitrate allocator
/// each time the network estimate or the set of registered streams changes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BitrateAllocationUpdate {
    // The allocated target bitrate. Media streams should produce this amount of
    // data. (Note that this may include packet overhead depending on
    // configuration.)
    pub target_bitrate: DataRate,
    // The allocated part of the estimated link capacity. This is more stable than
    // the target as it is based on the underlying link capacity estimate. This
    // should be used to change encoder configuration when the cost of change is
    // high.
    pub link_capacity: DataRate,
    // Predicted packet loss ratio.
    pub packet_loss_ratio: f64,
    // Predicted round trip time.
    pub round_trip_time: TimeDelta,
}

impl Default for BitrateAllocationUpdate {
    fn default() -> Self {
        Self {
            target_bitrate: DataRate::zero(),
            link_capacity: DataRate::zero(),
            packet_loss_ratio: 0.0,
            round_trip_time: TimeDelta::plus_infinity(),
        }
    }
}

impl BitrateAllocationUpdate {
    /// Loss expressed the way RTCP reports it: a fraction of 256, truncated and
    /// saturating at 255.
    pub fn fraction_loss(&self) -> u8 {
        (self.packet_loss_ratio.clamp(0.0, 1.0) * 256.0).min(255.0) as u8
    }

    /// Round trip time in milliseconds, or 0 when it has not been estimated.
    pub fn round_trip_time_ms(&self) -> i64 {
        self.round_trip_time.ms_or(0)
    }
}

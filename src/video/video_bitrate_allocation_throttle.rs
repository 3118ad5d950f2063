/*
 *  Copyright (c) 2018 The WebRTC project authors. All Rights Reserved.
 *
 *  Use of this source code is governed by a BSD-style license
 *  that can be found in the LICENSE file in the root of the source
 *  tree. An additional intellectual property rights grant can be found
 *  in the file PATENTS.  All contributing project authors may
 *  be found in the AUTHORS file in the root of the source tree.
 */

use crate::api::{
    units::{TimeDelta, Timestamp},
    video::VideoBitrateAllocation,
};

/// Limits how often similar allocations are sent to the RTP layer.
///
/// An allocation that is similar to the last one sent, and arrives within
/// [MAX_VBA_THROTTLE_TIME](Self::MAX_VBA_THROTTLE_TIME) of it, is held back.
/// The newest held back allocation is retried on the next encoded frame.
#[derive(Debug, Default)]
pub struct VideoBitrateAllocationThrottle {
    last_sent: Option<(VideoBitrateAllocation, Timestamp)>,
    throttled_allocation: Option<VideoBitrateAllocation>,
}

impl VideoBitrateAllocationThrottle {
    pub const MAX_VBA_THROTTLE_TIME: TimeDelta = TimeDelta::from_millis(500);

    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the allocation if it should be sent now, recording it as the
    /// last sent one. Otherwise it's kept as the throttled allocation.
    pub fn on_allocation(
        &mut self,
        allocation: VideoBitrateAllocation,
        now: Timestamp,
    ) -> Option<VideoBitrateAllocation> {
        if let Some((last, last_send_time)) = &self.last_sent {
            // Decreases go out right away; similar increases wait.
            let is_decrease = allocation.get_sum_bps() < last.get_sum_bps();
            if !is_decrease
                && allocation.is_similar_to(last)
                && now - *last_send_time < Self::MAX_VBA_THROTTLE_TIME
            {
                tracing::trace!(%allocation, "throttling similar allocation");
                self.throttled_allocation = Some(allocation);
                return None;
            }
        }

        self.throttled_allocation = None;
        self.last_sent = Some((allocation.clone(), now));
        Some(allocation)
    }

    /// Retries the throttled allocation, if any.
    pub fn on_encoded_frame(&mut self, now: Timestamp) -> Option<VideoBitrateAllocation> {
        let allocation = self.throttled_allocation.take()?;
        self.on_allocation(allocation, now)
    }

    pub fn has_throttled_allocation(&self) -> bool {
        self.throttled_allocation.is_some()
    }

    pub fn reset(&mut self) {
        self.last_sent = None;
        self.throttled_allocation = None;
    }
}

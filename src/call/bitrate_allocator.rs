/*
 *  Copyright (c) 2015 The WebRTC project authors. All Rights Reserved.
 *
 *  Use of this source code is governed by a BSD-style license
 *  that can be found in the LICENSE file in the root of the source
 *  tree. An additional intellectual property rights grant can be found
 *  in the file PATENTS.  All contributing project authors may
 *  be found in the AUTHORS file in the root of the source tree.
 */

use crate::api::call::BitrateAllocationUpdate;

/// Identifies an observer registered with a bitrate allocator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObserverId(pub u64);

// Used by all send streams with adaptive bitrate, to get the currently
// allocated bitrate for the send stream. The current network properties are
// given at the same time, to let the send stream decide about possible loss
// protection.
pub trait BitrateAllocatorObserver {
    // Returns the amount of protection used by the BitrateAllocatorObserver
    // implementation, as bitrate in bps.
    fn on_bitrate_updated(&mut self, update: BitrateAllocationUpdate) -> u32;
}

// Struct describing parameters for how a media stream should get allocated
// bitrate.
#[derive(Clone, Debug, PartialEq)]
pub struct MediaStreamAllocationConfig {
    // Minimum bitrate supported by track. 0 equals no min bitrate.
    pub min_bitrate_bps: u32,
    // Maximum bitrate supported by track. 0 equals no max bitrate.
    pub max_bitrate_bps: u32,
    pub pad_up_bitrate_bps: u32,
    pub priority_bitrate_bps: i64,
    // True means track may not be paused by allocating 0 bitrate will allocate at
    // least `min_bitrate_bps` for this observer, even if the BWE is too low,
    // false will allocate 0 to the observer if BWE doesn't allow
    // `min_bitrate_bps`.
    pub enforce_min_bitrate: bool,
    // MediaStreamTrack ID as defined by application. May be empty.
    pub track_id: String,
    // The amount of bitrate allocated to this observer relative to all other
    // observers. If an observer has twice the bitrate_priority of other
    // observers, it should be allocated twice the bitrate above its min.
    pub bitrate_priority: f64,
}

// Interface used for mocking.
pub trait BitrateAllocatorInterface {
    // Adds an observer, or updates the configuration of an observer that is
    // already registered.
    fn add_observer(&mut self, observer: ObserverId, config: MediaStreamAllocationConfig);
    // Removes a previously added observer, but will not trigger a new bitrate
    // allocation.
    fn remove_observer(&mut self, observer: ObserverId);
    // Returns the initial bitrate for `observer` if it is known, or the current
    // estimate for the network otherwise.
    fn get_start_bitrate(&self, observer: ObserverId) -> u32;
}

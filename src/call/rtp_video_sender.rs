/*
 *  Copyright (c) 2018 The WebRTC project authors. All Rights Reserved.
 *
 *  Use of this source code is governed by a BSD-style license
 *  that can be found in the LICENSE file in the root of the source
 *  tree. An additional intellectual property rights grant can be found
 *  in the file PATENTS.  All contributing project authors may
 *  be found in the AUTHORS file in the root of the source tree.
 */

use crate::api::video::{EncodedImageCallback, VideoBitrateAllocationObserver};

/// The RTP side of a video send stream. It splits the network rate between
/// media and protection, and packetizes encoded frames.
pub trait RtpVideoSenderInterface: EncodedImageCallback + VideoBitrateAllocationObserver {
    fn set_active(&mut self, active: bool);
    fn is_active(&self) -> bool;

    // Implements the media/protection split for the given network rate. Frame
    // rate is the highest configured for the stream.
    fn on_bitrate_updated(
        &mut self,
        bitrate_bps: u32,
        fraction_loss: u8,
        round_trip_time_ms: i64,
        framerate: i32,
    );
    fn get_payload_bitrate_bps(&self) -> u32;
    fn get_protection_bitrate_bps(&self) -> u32;

    fn set_encoding_data(&mut self, width: usize, height: usize, num_temporal_layers: usize);
}

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
    units::DataRate,
    video::{VideoContentType, VideoStream},
};

// The encoder as seen from the send stream.
pub trait VideoStreamEncoderInterface {
    // Sets the rate the encoder should produce and the share of the link it may
    // use, including headroom above the target.
    fn on_bitrate_updated(
        &mut self,
        target_bitrate: DataRate,
        link_allocation: DataRate,
        fraction_lost: u8,
        round_trip_time_ms: i64,
    );

    fn set_start_bitrate(&mut self, start_bitrate_bps: u32);

    // Request a key frame. Used for signalling from the remote receiver.
    fn send_key_frame(&mut self);
}

// Receives the layer configuration whenever the encoder is reconfigured.
pub trait EncoderSink {
    fn on_encoder_configuration_changed(
        &mut self,
        streams: &[VideoStream],
        content_type: VideoContentType,
        min_transmit_bitrate_bps: u32,
    );
}

/*
 *  Copyright (c) 2013 The WebRTC project authors. All Rights Reserved.
 *
 *  Use of this source code is governed by a BSD-style license
 *  that can be found in the LICENSE file in the root of the source
 *  tree. An additional intellectual property rights grant can be found
 *  in the file PATENTS.  All contributing project authors may
 *  be found in the AUTHORS file in the root of the source tree.
 */

use crate::api::{
    rtp_parameters::RtpExtension,
    video::{VideoCodecType, VideoContentType},
};

#[derive(Clone, Debug, Default, PartialEq)]
pub struct RtpConfig {
    // Sender SSRCs. One per simulcast layer.
    pub ssrcs: Vec<u32>,
    // RTP header extensions to use for this send stream.
    pub extensions: Vec<RtpExtension>,
    // Name of the payload, used to pick the codec specific padding rules.
    pub payload_name: String,
    pub payload_type: u8,
}

impl RtpConfig {
    pub fn codec_type(&self) -> VideoCodecType {
        VideoCodecType::from_payload_name(&self.payload_name)
    }

    pub fn has_transport_sequence_number(&self) -> bool {
        RtpExtension::find(&self.extensions, RtpExtension::TRANSPORT_SEQUENCE_NUMBER_URI)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct VideoSendStreamConfig {
    pub rtp: RtpConfig,

    // Track ID as specified during track creation.
    pub track_id: String,

    // True if the stream should be suspended when the available bitrate fall
    // below the minimum configured bitrate. If this variable is false, the
    // stream may send at a rate higher than the estimated available bitrate.
    pub suspend_below_min_bitrate: bool,

    // Enables periodic bandwidth probing in application-limited region.
    pub periodic_alr_bandwidth_probing: bool,

    pub content_type: VideoContentType,

    // Used until the encoder reports its first configuration.
    pub initial_encoder_max_bitrate_bps: u32,
    pub initial_encoder_bitrate_priority: f64,
}

impl Default for VideoSendStreamConfig {
    fn default() -> Self {
        Self {
            rtp: RtpConfig::default(),
            track_id: String::new(),
            suspend_below_min_bitrate: false,
            periodic_alr_bandwidth_probing: false,
            content_type: VideoContentType::RealtimeVideo,
            initial_encoder_max_bitrate_bps: 0,
            initial_encoder_bitrate_priority: 1.0,
        }
    }
}

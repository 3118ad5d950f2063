/*
 *  Copyright (c) 2017 The WebRTC project authors. All Rights Reserved.
 *
 *  Use of this source code is governed by a BSD-style license
 *  that can be found in the LICENSE file in the root of the source
 *  tree. An additional intellectual property rights grant can be found
 *  in the file PATENTS.  All contributing project authors may
 *  be found in the AUTHORS file in the root of the source tree.
 */

use crate::Result;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum VideoCodecType {
    #[default]
    Generic,
    Vp8,
    Vp9,
    Av1,
    H264,
}

impl VideoCodecType {
    /// Maps an SDP payload name onto a codec, case insensitively. Unknown
    /// names are treated as generic.
    pub fn from_payload_name(name: &str) -> Self {
        if name.eq_ignore_ascii_case("VP8") {
            Self::Vp8
        } else if name.eq_ignore_ascii_case("VP9") {
            Self::Vp9
        } else if name.eq_ignore_ascii_case("AV1") {
            Self::Av1
        } else if name.eq_ignore_ascii_case("H264") {
            Self::H264
        } else {
            Self::Generic
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum VideoFrameType {
    #[default]
    Empty,
    Key,
    Delta,
}

/// An encoded frame as handed from the encoder to the RTP layer. The payload is
/// opaque to the send stream.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EncodedImage {
    pub rtp_timestamp: u32,
    pub capture_time_ms: i64,
    pub encoded_width: u32,
    pub encoded_height: u32,
    pub frame_type: VideoFrameType,
    pub spatial_index: Option<usize>,
    pub data: Vec<u8>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct CodecSpecificInfo {
    pub codec_type: VideoCodecType,
    pub end_of_picture: bool,
}

/// Result of delivering an encoded frame to the RTP layer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EncodedImageCallbackResult {
    pub frame_id: u32,
    pub drop_next_frame: bool,
}

/// Sink for frames coming out of an encoder.
pub trait EncodedImageCallback {
    fn on_encoded_image(
        &mut self,
        encoded_image: &EncodedImage,
        codec_specific_info: Option<&CodecSpecificInfo>,
    ) -> Result<EncodedImageCallbackResult>;
}

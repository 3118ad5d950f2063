/*
 *  Copyright (c) 2015 The WebRTC project authors. All Rights Reserved.
 *
 *  Use of this source code is governed by a BSD-style license
 *  that can be found in the LICENSE file in the root of the source
 *  tree. An additional intellectual property rights grant can be found
 *  in the file PATENTS.  All contributing project authors may
 *  be found in the AUTHORS file in the root of the source tree.
 */

/// RTP header extension, see RFC8285.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct RtpExtension {
    pub uri: String,
    pub id: u8,
    pub encrypt: bool,
}

impl RtpExtension {
    pub const ABS_SEND_TIME_URI: &'static str =
        "http://www.webrtc.org/experiments/rtp-hdrext/abs-send-time";
    pub const TRANSPORT_SEQUENCE_NUMBER_URI: &'static str =
        "http://www.ietf.org/id/draft-holmer-rmcat-transport-wide-cc-extensions-01";
    pub const VIDEO_ROTATION_URI: &'static str = "urn:3gpp:video-orientation";

    pub fn new(uri: impl Into<String>, id: u8) -> Self {
        Self {
            uri: uri.into(),
            id,
            encrypt: false,
        }
    }

    /// True if `uri` is present in `extensions`.
    pub fn find(extensions: &[RtpExtension], uri: &str) -> bool {
        extensions.iter().any(|extension| extension.uri == uri)
    }
}

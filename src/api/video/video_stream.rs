/*
 *  Copyright (c) 2019 The WebRTC project authors. All Rights Reserved.
 *
 *  Use of this source code is governed by a BSD-style license
 *  that can be found in the LICENSE file in the root of the source
 *  tree. An additional intellectual property rights grant can be found
 *  in the file PATENTS.  All contributing project authors may
 *  be found in the AUTHORS file in the root of the source tree.
 */

/// Kind of content carried by a send stream. Screen content enables the
/// screenshare specific hysteresis and ALR experiment.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum VideoContentType {
    #[default]
    RealtimeVideo,
    Screen,
}

/// One simulcast layer (or the single layer of an SVC stream) as configured by
/// the encoder.
#[derive(Clone, Debug, PartialEq)]
pub struct VideoStream {
    pub width: usize,
    pub height: usize,
    pub max_framerate: i32,

    pub min_bitrate_bps: i32,
    pub target_bitrate_bps: i32,
    pub max_bitrate_bps: i32,

    pub max_qp: i32,
    pub num_temporal_layers: Option<usize>,
    pub bitrate_priority: Option<f64>,

    pub active: bool,
}

impl Default for VideoStream {
    fn default() -> Self {
        Self {
            width: 0,
            height: 0,
            max_framerate: -1,
            min_bitrate_bps: -1,
            target_bitrate_bps: -1,
            max_bitrate_bps: -1,
            max_qp: -1,
            num_temporal_layers: None,
            bitrate_priority: None,
            active: true,
        }
    }
}

/*
 *  Copyright (c) 2019 The WebRTC project authors. All Rights Reserved.
 *
 *  Use of this source code is governed by a BSD-style license
 *  that can be found in the LICENSE file in the root of the source
 *  tree. An additional intellectual property rights grant can be found
 *  in the file PATENTS.  All contributing project authors may
 *  be found in the AUTHORS file in the root of the source tree.
 */

use super::field_trials::{key_values, parse_bool, parse_value};
use crate::{api::video::VideoContentType, FieldTrials, Result};

// WebRTC-VideoRateControl
#[derive(Clone, Debug, PartialEq)]
pub struct VideoRateControlConfig {
    pub pacing_factor: Option<f64>,      // pacing_factor
    pub alr_probing: bool,               // alr_probing
    pub video_hysteresis: f64,           // video_hysteresis
    pub screenshare_hysteresis: f64,     // screenshare_hysteresis
}

impl Default for VideoRateControlConfig {
    fn default() -> Self {
        Self {
            pacing_factor: None,
            alr_probing: false,
            // Default to 35% hysteresis for simulcast screenshare.
            video_hysteresis: 1.0,
            screenshare_hysteresis: 1.35,
        }
    }
}

impl VideoRateControlConfig {
    pub fn parse(value: &str) -> Result<Self> {
        let mut config = Self::default();
        for (key, value) in key_values(value) {
            match key {
                "pacing_factor" => config.pacing_factor = Some(parse_value(key, value)?),
                "alr_probing" => config.alr_probing = parse_bool(key, value)?,
                "video_hysteresis" => config.video_hysteresis = parse_value(key, value)?,
                "screenshare_hysteresis" => {
                    config.screenshare_hysteresis = parse_value(key, value)?
                }
                _ => tracing::debug!(key, "ignoring unknown video rate control key"),
            }
        }
        Ok(config)
    }
}

#[derive(Clone, Debug, Default)]
pub struct RateControlSettings {
    video_config: VideoRateControlConfig,
}

impl RateControlSettings {
    pub fn new(field_trials: &FieldTrials) -> Self {
        Self {
            video_config: field_trials.video_rate_control.clone(),
        }
    }

    pub fn get_pacing_factor(&self) -> Option<f64> {
        self.video_config.pacing_factor
    }

    pub fn use_alr_probing(&self) -> bool {
        self.video_config.alr_probing
    }

    // Multiplier applied to the min bitrate of the top simulcast layer before
    // it is enabled, so the layer is not toggled on and off at the threshold.
    pub fn get_simulcast_hysteresis_factor(&self, content_type: VideoContentType) -> f64 {
        match content_type {
            VideoContentType::RealtimeVideo => self.video_config.video_hysteresis,
            VideoContentType::Screen => self.video_config.screenshare_hysteresis,
        }
    }
}

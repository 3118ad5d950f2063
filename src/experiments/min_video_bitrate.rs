/*
 *  Copyright (c) 2019 The WebRTC project authors. All Rights Reserved.
 *
 *  Use of this source code is governed by a BSD-style license
 *  that can be found in the LICENSE file in the root of the source
 *  tree. An additional intellectual property rights grant can be found
 *  in the file PATENTS.  All contributing project authors may
 *  be found in the AUTHORS file in the root of the source tree.
 */

use super::field_trials::{key_values, parse_bool};
use crate::{api::units::DataRate, Error, Result};

// WebRTC-Video-MinVideoBitrate
// Enabled,br:30kbps
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MinVideoBitrateConfig {
    pub enabled: bool,            // Enabled
    pub min_video_bitrate: Option<DataRate>, // br
}

impl MinVideoBitrateConfig {
    pub const DEFAULT_MIN_VIDEO_BITRATE: DataRate = DataRate::from_kilobits_per_sec(30);

    pub fn parse(value: &str) -> Result<Self> {
        let mut config = Self::default();
        for (key, value) in key_values(value) {
            match key {
                "Enabled" => config.enabled = parse_bool(key, value)?,
                "br" => config.min_video_bitrate = Some(parse_data_rate(key, value)?),
                _ => tracing::debug!(key, "ignoring unknown min video bitrate key"),
            }
        }
        Ok(config)
    }

    /// Lowest bitrate the encoder is ever configured with.
    pub fn encoder_min_bitrate(&self) -> DataRate {
        match self.min_video_bitrate {
            Some(bitrate) if self.enabled => bitrate,
            _ => Self::DEFAULT_MIN_VIDEO_BITRATE,
        }
    }
}

// Rates are written as `<n>kbps` or `<n>bps`; a bare number is kbps.
fn parse_data_rate(key: &str, value: Option<&str>) -> Result<DataRate> {
    let invalid = || Error::InvalidFieldTrialValue {
        key: key.to_string(),
        value: value.unwrap_or_default().to_string(),
    };

    let value = value.ok_or_else(invalid)?.trim();
    let (number, scale) = if let Some(kbps) = value.strip_suffix("kbps") {
        (kbps, 1000.0)
    } else if let Some(bps) = value.strip_suffix("bps") {
        (bps, 1.0)
    } else {
        (value, 1000.0)
    };

    let number: f64 = number.trim().parse().map_err(|_| invalid())?;
    if !number.is_finite() || number < 0.0 {
        return Err(invalid());
    }
    Ok(DataRate::from_bits_per_sec_float(number * scale))
}

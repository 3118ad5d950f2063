/*
 *  Copyright (c) 2019 The WebRTC project authors. All Rights Reserved.
 *
 *  Use of this source code is governed by a BSD-style license
 *  that can be found in the LICENSE file in the root of the source
 *  tree. An additional intellectual property rights grant can be found
 *  in the file PATENTS.  All contributing project authors may
 *  be found in the AUTHORS file in the root of the source tree.
 */

use super::{AlrExperimentSettings, MinVideoBitrateConfig, VideoRateControlConfig};

use crate::{Error, Result};

/// Field trials for WebRTC that impact how a video send stream distributes bitrate.
///
/// Every trial is a typed field which doubles as documentation. The doc comment
/// on each field names the trial it is parsed from by [FieldTrials::parse].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FieldTrials {
    /// WebRTC-ProbingScreenshareBwe
    ///
    /// ALR experiment applied to screen content.
    pub probing_screenshare_bwe: Option<AlrExperimentSettings>,

    /// WebRTC-StrictPacingAndProbing
    ///
    /// ALR experiment applied to realtime video.
    pub strict_pacing_and_probing: Option<AlrExperimentSettings>,

    /// WebRTC-VideoRateControl
    pub video_rate_control: VideoRateControlConfig,

    /// WebRTC-Video-MinVideoBitrate
    pub min_video_bitrate: MinVideoBitrateConfig,
}

impl FieldTrials {
    pub const PROBING_SCREENSHARE_BWE: &'static str = "WebRTC-ProbingScreenshareBwe";
    pub const STRICT_PACING_AND_PROBING: &'static str = "WebRTC-StrictPacingAndProbing";
    pub const VIDEO_RATE_CONTROL: &'static str = "WebRTC-VideoRateControl";
    pub const MIN_VIDEO_BITRATE: &'static str = "WebRTC-Video-MinVideoBitrate";

    /// Parses a field trial string of the form `Name1/Value1/Name2/Value2/`.
    ///
    /// Trials that don't affect the send stream are skipped. A trial that
    /// appears more than once keeps its last value.
    pub fn parse(trials: &str) -> Result<Self> {
        let mut field_trials = Self::default();

        let segments: Vec<&str> = trials.split('/').collect();
        // The string is terminated by a slash, leaving an empty final segment.
        let Some((last, pairs)) = segments.split_last() else {
            return Ok(field_trials);
        };
        if !last.is_empty() || pairs.len() % 2 != 0 {
            return Err(Error::MalformedFieldTrials {
                trials: trials.to_string(),
            });
        }

        for pair in pairs.chunks_exact(2) {
            let (name, value) = (pair[0], pair[1]);
            if name.is_empty() {
                return Err(Error::MalformedFieldTrials {
                    trials: trials.to_string(),
                });
            }

            match name {
                Self::PROBING_SCREENSHARE_BWE => {
                    field_trials.probing_screenshare_bwe =
                        Some(AlrExperimentSettings::parse(name, value)?)
                }
                Self::STRICT_PACING_AND_PROBING => {
                    field_trials.strict_pacing_and_probing =
                        Some(AlrExperimentSettings::parse(name, value)?)
                }
                Self::VIDEO_RATE_CONTROL => {
                    field_trials.video_rate_control = VideoRateControlConfig::parse(value)?
                }
                Self::MIN_VIDEO_BITRATE => {
                    field_trials.min_video_bitrate = MinVideoBitrateConfig::parse(value)?
                }
                _ => tracing::debug!(name, "ignoring unrelated field trial"),
            }
        }

        Ok(field_trials)
    }
}

/// Splits a `key:value,flag,key:value` list as used by structured field trials.
/// Keys without a colon are flags and have no value.
pub(crate) fn key_values(value: &str) -> impl Iterator<Item = (&str, Option<&str>)> {
    value
        .split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(|entry| match entry.split_once(':') {
            Some((key, value)) => (key, Some(value)),
            None => (entry, None),
        })
}

pub(crate) fn parse_value<T: std::str::FromStr>(key: &str, value: Option<&str>) -> Result<T> {
    let value = value.unwrap_or_default();
    value.trim().parse().map_err(|_| Error::InvalidFieldTrialValue {
        key: key.to_string(),
        value: value.to_string(),
    })
}

/// Booleans accept `true`/`false` as well as `1`/`0`. A bare flag is true.
pub(crate) fn parse_bool(key: &str, value: Option<&str>) -> Result<bool> {
    match value.map(str::trim) {
        None | Some("true") | Some("1") => Ok(true),
        Some("false") | Some("0") => Ok(false),
        Some(value) => Err(Error::InvalidFieldTrialValue {
            key: key.to_string(),
            value: value.to_string(),
        }),
    }
}

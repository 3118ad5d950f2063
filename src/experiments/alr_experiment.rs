/*
 *  Copyright (c) 2018 The WebRTC project authors. All Rights Reserved.
 *
 *  Use of this source code is governed by a BSD-style license
 *  that can be found in the LICENSE file in the root of the source
 *  tree. An additional intellectual property rights grant can be found
 *  in the file PATENTS.  All contributing project authors may
 *  be found in the AUTHORS file in the root of the source tree.
 */

use crate::{api::video::VideoContentType, Error, FieldTrials, Result};

// WebRTC-ProbingScreenshareBwe and WebRTC-StrictPacingAndProbing
// pacing_factor,max_paced_queue_time,alr_bandwidth_usage_percent,
// alr_start_budget_level_percent,alr_stop_budget_level_percent,group_id
#[derive(Clone, Debug, PartialEq)]
pub struct AlrExperimentSettings {
    pub pacing_factor: f64,
    pub max_paced_queue_time: i64,
    pub alr_bandwidth_usage_percent: isize,
    pub alr_start_budget_level_percent: isize,
    pub alr_stop_budget_level_percent: isize,
    // Will be sent to the receive side for stats slicing.
    // Can be 0..6, because it's sent as a 3 bits value and there's also
    // reserved value to indicate absence of experiment.
    pub group_id: isize,
}

impl Default for AlrExperimentSettings {
    fn default() -> Self {
        Self {
            pacing_factor: 1.0,
            max_paced_queue_time: 2875,
            alr_bandwidth_usage_percent: 80,
            alr_start_budget_level_percent: 40,
            alr_stop_budget_level_percent: -60,
            group_id: 3,
        }
    }
}

impl AlrExperimentSettings {
    /// Parses the six comma separated values of an ALR experiment. All of them
    /// are required.
    pub fn parse(name: &str, value: &str) -> Result<Self> {
        let malformed = || Error::MalformedFieldTrial {
            name: name.to_string(),
            value: value.to_string(),
        };

        let parts: Vec<&str> = value.split(',').map(str::trim).collect();
        let &[pacing_factor, max_paced_queue_time, usage, start, stop, group_id] = parts.as_slice() else {
            tracing::warn!(name, value, "ALR experiment needs six values");
            return Err(malformed());
        };

        Ok(Self {
            pacing_factor: pacing_factor.parse().map_err(|_| malformed())?,
            max_paced_queue_time: max_paced_queue_time.parse().map_err(|_| malformed())?,
            alr_bandwidth_usage_percent: usage.parse().map_err(|_| malformed())?,
            alr_start_budget_level_percent: start.parse().map_err(|_| malformed())?,
            alr_stop_budget_level_percent: stop.parse().map_err(|_| malformed())?,
            group_id: group_id.parse().map_err(|_| malformed())?,
        })
    }

    /// The experiment that applies to streams of `content_type`, if enabled.
    pub fn for_content_type(
        field_trials: &FieldTrials,
        content_type: VideoContentType,
    ) -> Option<&Self> {
        match content_type {
            VideoContentType::Screen => field_trials.probing_screenshare_bwe.as_ref(),
            VideoContentType::RealtimeVideo => field_trials.strict_pacing_and_probing.as_ref(),
        }
    }
}

#[cfg(test)]
mod test {
    use approx::assert_relative_eq;
    use test_trace::test;

    use super::*;

    #[test]
    fn parses_all_values() {
        let settings =
            AlrExperimentSettings::parse("WebRTC-ProbingScreenshareBwe", "1.1,2000,75,30,-50,2")
                .unwrap();
        assert_relative_eq!(settings.pacing_factor, 1.1);
        assert_eq!(settings.max_paced_queue_time, 2000);
        assert_eq!(settings.alr_bandwidth_usage_percent, 75);
        assert_eq!(settings.alr_start_budget_level_percent, 30);
        assert_eq!(settings.alr_stop_budget_level_percent, -50);
        assert_eq!(settings.group_id, 2);
    }

    #[test]
    fn default_matches_the_canonical_string() {
        let settings =
            AlrExperimentSettings::parse("WebRTC-ProbingScreenshareBwe", "1.0,2875,80,40,-60,3")
                .unwrap();
        assert_eq!(settings, AlrExperimentSettings::default());
    }

    #[test]
    fn rejects_partial_values() {
        assert!(AlrExperimentSettings::parse("WebRTC-StrictPacingAndProbing", "1.0,2875").is_err());
        assert!(AlrExperimentSettings::parse("WebRTC-StrictPacingAndProbing", "x,2875,80,40,-60,3").is_err());
        assert!(AlrExperimentSettings::parse("WebRTC-StrictPacingAndProbing", "Enabled").is_err());
    }

    #[test]
    fn selected_by_content_type() {
        let trials = FieldTrials {
            probing_screenshare_bwe: Some(AlrExperimentSettings::default()),
            ..Default::default()
        };
        assert!(AlrExperimentSettings::for_content_type(&trials, VideoContentType::Screen).is_some());
        assert!(AlrExperimentSettings::for_content_type(&trials, VideoContentType::RealtimeVideo).is_none());
    }
}

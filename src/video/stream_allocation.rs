/*
 *  Copyright (c) 2018 The WebRTC project authors. All Rights Reserved.
 *
 *  Use of this source code is governed by a BSD-style license
 *  that can be found in the LICENSE file in the root of the source
 *  tree. An additional intellectual property rights grant can be found
 *  in the file PATENTS.  All contributing project authors may
 *  be found in the AUTHORS file in the root of the source tree.
 */

use crate::api::video::VideoStream;

/// Calculates the bitrate the stream pads up to while the encoder produces
/// less than its allocation.
///
/// `is_svc` means the single stream carries all spatial layers, with bitrates
/// already aggregated over them.
pub fn calculate_max_pad_bitrate_bps(
    streams: &[VideoStream],
    is_svc: bool,
    hysteresis_factor: f64,
    min_transmit_bitrate_bps: u32,
    pad_to_min_bitrate: bool,
    alr_probing: bool,
) -> u32 {
    debug_assert!(!is_svc || streams.len() <= 1, "only one stream is allowed in SVC mode");

    let active_streams: Vec<&VideoStream> = streams.iter().filter(|stream| stream.active).collect();

    let mut pad_up_to_bitrate_bps = 0;
    if let Some((top, lower)) = active_streams.split_last() {
        if active_streams.len() > 1 || is_svc {
            if alr_probing {
                // With alr probing, just pad to the min bitrate of the lowest stream,
                // probing will handle the rest of the rampup.
                pad_up_to_bitrate_bps = bps(active_streams[0].min_bitrate_bps);
            } else if is_svc {
                pad_up_to_bitrate_bps = bps(active_streams[0].target_bitrate_bps);
            } else {
                // Pad up to the start bitrate of the highest active stream, and
                // the target of every stream below it.
                let top_start = (hysteresis_factor * top.min_bitrate_bps as f64 + 0.5) as i64;
                pad_up_to_bitrate_bps = top_start.min(top.target_bitrate_bps as i64).max(0) as u32;
                pad_up_to_bitrate_bps = lower
                    .iter()
                    .map(|stream| bps(stream.target_bitrate_bps))
                    .fold(pad_up_to_bitrate_bps, u32::saturating_add);
            }
        } else if pad_to_min_bitrate {
            pad_up_to_bitrate_bps = bps(top.min_bitrate_bps);
        }
    }

    pad_up_to_bitrate_bps.max(min_transmit_bitrate_bps)
}

/// Sum of the max bitrates of the active streams. Inactive streams get nothing.
pub fn calculate_max_encoder_bitrate_bps(streams: &[VideoStream]) -> u32 {
    streams
        .iter()
        .filter(|stream| stream.active)
        .map(|stream| bps(stream.max_bitrate_bps))
        .fold(0, u32::saturating_add)
}

/// Sum of the configured priorities, or None if no stream sets one.
pub fn calculate_bitrate_priority(streams: &[VideoStream]) -> Option<f64> {
    streams
        .iter()
        .filter_map(|stream| stream.bitrate_priority)
        .inspect(|priority| debug_assert!(*priority > 0.0))
        .fold(None, |sum, priority| Some(sum.unwrap_or(0.0) + priority))
}

/// Highest frame rate among the active streams.
pub fn calculate_max_framerate(streams: &[VideoStream]) -> i32 {
    streams
        .iter()
        .filter(|stream| stream.active)
        .map(|stream| stream.max_framerate)
        .max()
        .unwrap_or(0)
        .max(0)
}

// Unset (negative) bitrates count as zero.
fn bps(bitrate_bps: i32) -> u32 {
    bitrate_bps.max(0) as u32
}

#[cfg(test)]
mod test {
    use approx::assert_relative_eq;
    use test_trace::test;

    use super::*;

    fn stream(min: i32, target: i32, max: i32) -> VideoStream {
        VideoStream {
            width: 320,
            height: 180,
            max_framerate: 30,
            min_bitrate_bps: min,
            target_bitrate_bps: target,
            max_bitrate_bps: max,
            max_qp: 56,
            bitrate_priority: Some(1.0),
            ..Default::default()
        }
    }

    #[test]
    fn simulcast_pads_to_top_stream_start() {
        let streams = [stream(30000, 150000, 200000), stream(150000, 500000, 700000)];
        assert_eq!(
            calculate_max_pad_bitrate_bps(&streams, false, 1.0, 30000, false, false),
            150000 + 150000
        );
    }

    #[test]
    fn hysteresis_scales_top_stream_min() {
        let streams = [stream(30000, 100000, 200000), stream(150000, 500000, 750000)];
        assert_eq!(
            calculate_max_pad_bitrate_bps(&streams, false, 1.25, 0, false, false),
            100000 + 187500
        );
    }

    #[test]
    fn hysteresis_is_capped_at_target() {
        let streams = [stream(30000, 100000, 200000), stream(150000, 160000, 750000)];
        assert_eq!(
            calculate_max_pad_bitrate_bps(&streams, false, 1.35, 0, false, false),
            100000 + 160000
        );
    }

    #[test]
    fn alr_probing_pads_to_lowest_min() {
        let streams = [stream(30000, 200000, 1000000), stream(60000, 1250000, 1250000)];
        assert_eq!(
            calculate_max_pad_bitrate_bps(&streams, false, 1.25, 0, false, true),
            30000
        );
        // The min transmit bitrate still applies.
        assert_eq!(
            calculate_max_pad_bitrate_bps(&streams, false, 1.25, 400000, false, true),
            400000
        );
    }

    #[test]
    fn single_stream_pads_only_when_suspending() {
        let streams = [stream(30000, 150000, 200000)];
        assert_eq!(calculate_max_pad_bitrate_bps(&streams, false, 1.0, 0, false, false), 0);
        assert_eq!(calculate_max_pad_bitrate_bps(&streams, false, 1.0, 0, true, false), 30000);
        assert_eq!(
            calculate_max_pad_bitrate_bps(&streams, false, 1.0, 50000, false, false),
            50000
        );
    }

    #[test]
    fn svc_pads_to_target() {
        let streams = [stream(30000, 300000, 700000)];
        assert_eq!(calculate_max_pad_bitrate_bps(&streams, true, 1.0, 0, false, false), 300000);
        assert_eq!(calculate_max_pad_bitrate_bps(&streams, true, 1.0, 0, false, true), 30000);
    }

    #[test]
    fn inactive_streams_are_ignored() {
        let mut streams = [stream(30000, 150000, 200000), stream(150000, 500000, 700000)];
        streams[1].active = false;
        assert_eq!(calculate_max_pad_bitrate_bps(&streams, false, 1.0, 0, false, false), 0);
        assert_eq!(calculate_max_encoder_bitrate_bps(&streams), 200000);

        streams[0].active = false;
        assert_eq!(calculate_max_pad_bitrate_bps(&streams, false, 1.0, 0, true, false), 0);
        assert_eq!(calculate_max_encoder_bitrate_bps(&streams), 0);
    }

    #[test]
    fn sums_saturate_instead_of_overflowing() {
        let streams = [
            stream(i32::MAX, i32::MAX, i32::MAX),
            stream(i32::MAX, i32::MAX, i32::MAX),
            stream(i32::MAX, i32::MAX, i32::MAX),
        ];
        assert_eq!(calculate_max_encoder_bitrate_bps(&streams), u32::MAX);
        assert_eq!(
            calculate_max_pad_bitrate_bps(&streams, false, 1.0, 0, false, false),
            u32::MAX
        );
    }

    #[test]
    fn priorities_are_summed() {
        let mut streams = [stream(30000, 150000, 200000), stream(150000, 500000, 700000)];
        assert_relative_eq!(calculate_bitrate_priority(&streams).unwrap(), 2.0);

        streams[0].bitrate_priority = None;
        streams[1].bitrate_priority = None;
        assert!(calculate_bitrate_priority(&streams).is_none());
    }

    #[test]
    fn framerate_of_active_streams() {
        let mut streams = [stream(30000, 150000, 200000), stream(150000, 500000, 700000)];
        streams[1].max_framerate = 60;
        assert_eq!(calculate_max_framerate(&streams), 60);
        streams[1].active = false;
        assert_eq!(calculate_max_framerate(&streams), 30);
        assert_eq!(calculate_max_framerate(&[]), 0);
    }
}

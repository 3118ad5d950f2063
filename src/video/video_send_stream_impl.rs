/*
 *  Copyright (c) 2018 The WebRTC project authors. All Rights Reserved.
 *
 *  Use of this source code is governed by a BSD-style license
 *  that can be found in the LICENSE file in the root of the source
 *  tree. An additional intellectual property rights grant can be found
 *  in the file PATENTS.  All contributing project authors may
 *  be found in the AUTHORS file in the root of the source tree.
 */

use std::rc::Rc;

use super::{
    calculate_bitrate_priority, calculate_max_encoder_bitrate_bps, calculate_max_framerate,
    calculate_max_pad_bitrate_bps, EncoderActivityChange, EncoderActivityMonitor, EncoderSink,
    VideoBitrateAllocationThrottle, VideoSendStreamConfig, VideoStreamEncoderInterface,
};
use crate::{
    api::{
        call::BitrateAllocationUpdate,
        units::DataRate,
        video::{
            CodecSpecificInfo, EncodedImage, EncodedImageCallback, EncodedImageCallbackResult,
            VideoBitrateAllocation, VideoBitrateAllocationObserver, VideoCodecType,
            VideoContentType, VideoStream,
        },
    },
    call::{
        BitrateAllocatorInterface, BitrateAllocatorObserver, MediaStreamAllocationConfig,
        ObserverId, RtpTransportControllerSendInterface, RtpVideoSenderInterface,
    },
    experiments::{AlrExperimentSettings, RateControlSettings},
    rtc::Clock,
    Error, FieldTrials, Result,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum StreamState {
    Created,
    Started,
    Stopped,
}

/// Owns the bitrate of one video send stream.
///
/// The stream registers with the bitrate allocator, splits each allocation
/// between the encoder and the RTP layer, throttles per-layer allocation
/// reports, and recomputes its allocator limits whenever the encoder is
/// reconfigured. It is driven from a single context; every entry point takes
/// `&mut self` and reads the [Clock] instead of running timers.
pub struct VideoSendStreamImpl {
    clock: Rc<dyn Clock>,
    id: ObserverId,
    config: VideoSendStreamConfig,
    rate_control_settings: RateControlSettings,
    encoder_min_bitrate_floor: DataRate,
    has_alr_probing: bool,
    configured_pacing_factor: Option<f64>,

    bitrate_allocator: Box<dyn BitrateAllocatorInterface>,
    video_stream_encoder: Box<dyn VideoStreamEncoderInterface>,
    rtp_video_sender: Box<dyn RtpVideoSenderInterface>,

    state: StreamState,
    // Padding is requested only once the encoder has produced a frame.
    disable_padding: bool,
    max_padding_bitrate: u32,
    encoder_min_bitrate_bps: u32,
    encoder_max_bitrate_bps: u32,
    // Zero while the encoder is paused.
    encoder_target_rate_bps: u32,
    encoder_bitrate_priority: f64,
    max_framerate: i32,

    allocation_throttle: VideoBitrateAllocationThrottle,
    encoder_activity: Option<EncoderActivityMonitor>,
}

impl VideoSendStreamImpl {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        clock: Rc<dyn Clock>,
        id: ObserverId,
        config: VideoSendStreamConfig,
        field_trials: &FieldTrials,
        transport: &mut dyn RtpTransportControllerSendInterface,
        bitrate_allocator: Box<dyn BitrateAllocatorInterface>,
        mut video_stream_encoder: Box<dyn VideoStreamEncoderInterface>,
        rtp_video_sender: Box<dyn RtpVideoSenderInterface>,
    ) -> Self {
        debug_assert!(!config.rtp.ssrcs.is_empty());
        tracing::info!(
            ?id,
            track_id = %config.track_id,
            content_type = ?config.content_type,
            "creating video send stream"
        );

        let rate_control_settings = RateControlSettings::new(field_trials);
        let alr_settings = AlrExperimentSettings::for_content_type(field_trials, config.content_type);
        let has_alr_probing = config.periodic_alr_bandwidth_probing || alr_settings.is_some();

        // Pacing is only tuned for ALR when the receiver can send transport
        // feedback.
        let mut configured_pacing_factor = None;
        match alr_settings {
            Some(alr_settings) if config.rtp.has_transport_sequence_number() => {
                transport.enable_periodic_alr_probing(true);
                transport.set_pacing_factor(alr_settings.pacing_factor);
                transport.set_queue_time_limit(alr_settings.max_paced_queue_time);
                configured_pacing_factor = Some(alr_settings.pacing_factor);
            }
            _ => transport.enable_periodic_alr_probing(rate_control_settings.use_alr_probing()),
        }

        let start_bitrate_bps = bitrate_allocator.get_start_bitrate(id);
        video_stream_encoder.set_start_bitrate(start_bitrate_bps);

        Self {
            clock,
            id,
            rate_control_settings,
            encoder_min_bitrate_floor: field_trials.min_video_bitrate.encoder_min_bitrate(),
            has_alr_probing,
            configured_pacing_factor,
            bitrate_allocator,
            video_stream_encoder,
            rtp_video_sender,
            state: StreamState::Created,
            disable_padding: true,
            max_padding_bitrate: 0,
            encoder_min_bitrate_bps: 0,
            encoder_max_bitrate_bps: config.initial_encoder_max_bitrate_bps,
            encoder_target_rate_bps: 0,
            encoder_bitrate_priority: config.initial_encoder_bitrate_priority,
            max_framerate: 0,
            allocation_throttle: VideoBitrateAllocationThrottle::new(),
            encoder_activity: None,
            config,
        }
    }

    pub fn id(&self) -> ObserverId {
        self.id
    }

    /// The pacing factor set on the transport for ALR, if any.
    pub fn configured_pacing_factor(&self) -> Option<f64> {
        self.configured_pacing_factor
    }

    pub fn start(&mut self) {
        match self.state {
            StreamState::Started => return,
            StreamState::Stopped => {
                tracing::warn!(id = ?self.id, "ignoring start of a stopped stream");
                return;
            }
            StreamState::Created => {}
        }

        tracing::info!(id = ?self.id, "starting video send stream");
        self.state = StreamState::Started;
        self.rtp_video_sender.set_active(true);

        self.bitrate_allocator
            .add_observer(self.id, self.get_allocation_config());
        self.encoder_activity = Some(EncoderActivityMonitor::new(self.clock.current_time()));
        self.video_stream_encoder.send_key_frame();
    }

    /// Stops the stream for good. The encoder is told to stop producing and the
    /// stream leaves the allocator.
    pub fn stop(&mut self) {
        if self.state != StreamState::Started {
            self.state = StreamState::Stopped;
            return;
        }

        tracing::info!(id = ?self.id, "stopping video send stream");
        self.state = StreamState::Stopped;
        self.rtp_video_sender.set_active(false);

        self.bitrate_allocator.remove_observer(self.id);
        self.encoder_activity = None;
        self.allocation_throttle.reset();
        self.encoder_target_rate_bps = 0;
        self.video_stream_encoder
            .on_bitrate_updated(DataRate::zero(), DataRate::zero(), 0, 0);
    }

    /// Runs the encoder activity check for every interval that ended since the
    /// last call. A stream whose encoder stopped producing frames leaves the
    /// allocator until frames resume.
    pub fn check_encoder_activity(&mut self) {
        let now = self.clock.current_time();
        let changes = match self.encoder_activity.as_mut() {
            Some(monitor) => monitor.check(now),
            None => return,
        };

        for change in changes {
            match change {
                EncoderActivityChange::TimedOut => self.signal_encoder_timed_out(),
                EncoderActivityChange::Active => self.signal_encoder_active(),
            }
        }
    }

    fn signal_encoder_timed_out(&mut self) {
        // If the encoder has not produced anything during the last time out and it
        // is supposed to, deregister as BitrateAllocatorObserver. This can happen
        // if a camera stops producing frames.
        if self.encoder_target_rate_bps > 0 {
            tracing::info!(id = ?self.id, "encoder timed out");
            self.bitrate_allocator.remove_observer(self.id);
        }
    }

    fn signal_encoder_active(&mut self) {
        if self.rtp_video_sender.is_active() {
            tracing::info!(id = ?self.id, "encoder is active");
            self.bitrate_allocator
                .add_observer(self.id, self.get_allocation_config());
        }
    }

    fn is_paused(&self) -> bool {
        self.encoder_target_rate_bps == 0
    }

    fn get_allocation_config(&self) -> MediaStreamAllocationConfig {
        let pad_up_bitrate_bps = if self.disable_padding || self.is_paused() {
            0
        } else {
            self.max_padding_bitrate
        };

        MediaStreamAllocationConfig {
            min_bitrate_bps: self.encoder_min_bitrate_bps,
            max_bitrate_bps: self.encoder_max_bitrate_bps,
            pad_up_bitrate_bps,
            priority_bitrate_bps: 0,
            enforce_min_bitrate: !self.config.suspend_below_min_bitrate,
            track_id: self.config.track_id.clone(),
            bitrate_priority: self.encoder_bitrate_priority,
        }
    }
}

impl BitrateAllocatorObserver for VideoSendStreamImpl {
    fn on_bitrate_updated(&mut self, update: BitrateAllocationUpdate) -> u32 {
        debug_assert!(
            self.state == StreamState::Started,
            "bitrate update for a stream that is not started"
        );
        if self.state != StreamState::Started {
            tracing::warn!(id = ?self.id, state = ?self.state, "ignoring bitrate update");
            return 0;
        }
        self.check_encoder_activity();

        let fraction_loss = update.fraction_loss();
        let round_trip_time_ms = update.round_trip_time_ms();
        self.rtp_video_sender.on_bitrate_updated(
            saturated_bps(update.target_bitrate),
            fraction_loss,
            round_trip_time_ms,
            self.max_framerate,
        );

        if self.rtp_video_sender.get_payload_bitrate_bps() == 0 {
            if !self.is_paused() {
                tracing::debug!(id = ?self.id, "encoder paused");
            }
            self.encoder_target_rate_bps = 0;
            self.video_stream_encoder
                .on_bitrate_updated(DataRate::zero(), DataRate::zero(), 0, 0);
            return 0;
        }

        let protection_bitrate_bps = self.rtp_video_sender.get_protection_bitrate_bps();
        let encoder_max_bitrate =
            DataRate::from_bits_per_sec(self.encoder_max_bitrate_bps as i64);
        let encoder_target_rate = update.target_bitrate.min(encoder_max_bitrate);

        // Headroom above the target, less what protection uses, may be spent by
        // the encoder.
        let headroom = update
            .link_capacity
            .saturating_sub(encoder_target_rate)
            .saturating_sub(DataRate::from_bits_per_sec(protection_bitrate_bps as i64));
        let link_allocation = encoder_target_rate + headroom;

        self.encoder_target_rate_bps = saturated_bps(encoder_target_rate);
        tracing::debug!(
            id = ?self.id,
            ?encoder_target_rate,
            ?link_allocation,
            protection_bitrate_bps,
            "updating encoder bitrate"
        );
        self.video_stream_encoder.on_bitrate_updated(
            encoder_target_rate,
            link_allocation,
            fraction_loss,
            round_trip_time_ms,
        );

        protection_bitrate_bps
    }
}

impl VideoBitrateAllocationObserver for VideoSendStreamImpl {
    fn on_bitrate_allocation_updated(&mut self, allocation: &VideoBitrateAllocation) {
        // Allocations are not sent while the encoder is paused.
        if self.is_paused() {
            return;
        }

        let now = self.clock.current_time();
        if let Some(allocation) = self.allocation_throttle.on_allocation(allocation.clone(), now) {
            tracing::debug!(id = ?self.id, %allocation, "sending bitrate allocation");
            self.rtp_video_sender.on_bitrate_allocation_updated(&allocation);
        }
    }
}

impl EncodedImageCallback for VideoSendStreamImpl {
    fn on_encoded_image(
        &mut self,
        encoded_image: &EncodedImage,
        codec_specific_info: Option<&CodecSpecificInfo>,
    ) -> Result<EncodedImageCallbackResult> {
        if self.state == StreamState::Stopped {
            tracing::warn!(id = ?self.id, "dropping encoded image of a stopped stream");
            return Err(Error::StreamStopped);
        }
        // A stream that timed out has left the allocator and gets no bitrate
        // updates, so frames drive the activity check as well.
        self.check_encoder_activity();

        if self.disable_padding {
            self.disable_padding = false;
            // To ensure that padding bitrate is propagated to the bitrate allocator.
            self.signal_encoder_active();
        }
        if let Some(monitor) = self.encoder_activity.as_mut() {
            monitor.update_encoder_activity();
        }

        let result = self
            .rtp_video_sender
            .on_encoded_image(encoded_image, codec_specific_info);

        // Check if there's a throttled VideoBitrateAllocation that we should try
        // sending.
        if !self.is_paused() {
            let now = self.clock.current_time();
            if let Some(allocation) = self.allocation_throttle.on_encoded_frame(now) {
                tracing::debug!(id = ?self.id, %allocation, "sending throttled bitrate allocation");
                self.rtp_video_sender.on_bitrate_allocation_updated(&allocation);
            }
        }

        result
    }
}

impl EncoderSink for VideoSendStreamImpl {
    fn on_encoder_configuration_changed(
        &mut self,
        streams: &[VideoStream],
        content_type: VideoContentType,
        min_transmit_bitrate_bps: u32,
    ) {
        let (Some(first), Some(last)) = (streams.first(), streams.last()) else {
            debug_assert!(false, "encoder configured without streams");
            tracing::warn!(id = ?self.id, "ignoring encoder configuration without streams");
            return;
        };
        debug_assert!(self.config.rtp.ssrcs.len() >= streams.len());

        self.encoder_min_bitrate_bps = (first.min_bitrate_bps.max(0) as u32)
            .max(saturated_bps(self.encoder_min_bitrate_floor));
        self.encoder_max_bitrate_bps =
            calculate_max_encoder_bitrate_bps(streams).max(self.encoder_min_bitrate_bps);
        if let Some(priority) = calculate_bitrate_priority(streams) {
            self.encoder_bitrate_priority = priority;
        }
        self.max_framerate = calculate_max_framerate(streams);

        let is_svc = self.config.rtp.codec_type() == VideoCodecType::Vp9;
        let hysteresis_factor = self
            .rate_control_settings
            .get_simulcast_hysteresis_factor(content_type);
        self.max_padding_bitrate = calculate_max_pad_bitrate_bps(
            streams,
            is_svc,
            hysteresis_factor,
            min_transmit_bitrate_bps,
            self.config.suspend_below_min_bitrate,
            self.has_alr_probing,
        );

        tracing::debug!(
            id = ?self.id,
            min_bitrate_bps = self.encoder_min_bitrate_bps,
            max_bitrate_bps = self.encoder_max_bitrate_bps,
            max_padding_bitrate_bps = self.max_padding_bitrate,
            "encoder configuration changed"
        );

        let num_temporal_layers = last.num_temporal_layers.unwrap_or(1);
        self.rtp_video_sender
            .set_encoding_data(first.width, first.height, num_temporal_layers);

        if self.rtp_video_sender.is_active() {
            // The send stream is started already. Update the allocator with new
            // bitrate limits.
            self.bitrate_allocator
                .add_observer(self.id, self.get_allocation_config());
        }
    }
}

fn saturated_bps(rate: DataRate) -> u32 {
    if rate.is_plus_infinity() {
        u32::MAX
    } else {
        rate.bps().clamp(0, u32::MAX as i64) as u32
    }
}

/*
 *  Copyright (c) 2017 The WebRTC project authors. All Rights Reserved.
 *
 *  Use of this source code is governed by a BSD-style license
 *  that can be found in the LICENSE file in the root of the source
 *  tree. An additional intellectual property rights grant can be found
 *  in the file PATENTS.  All contributing project authors may
 *  be found in the AUTHORS file in the root of the source tree.
 */

// The parts of the transport controller a video send stream configures. The
// pacer and probing live behind it.
pub trait RtpTransportControllerSendInterface {
    fn set_pacing_factor(&mut self, pacing_factor: f64);
    fn enable_periodic_alr_probing(&mut self, enable: bool);
    fn set_queue_time_limit(&mut self, limit_ms: i64);
}

/*
 *  Copyright (c) 2018 The WebRTC project authors. All Rights Reserved.
 *
 *  Use of this source code is governed by a BSD-style license
 *  that can be found in the LICENSE file in the root of the source
 *  tree. An additional intellectual property rights grant can be found
 *  in the file PATENTS.  All contributing project authors may
 *  be found in the AUTHORS file in the root of the source tree.
 */

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum Error {
    #[error("field trial string is malformed: {trials:?}")]
    MalformedFieldTrials { trials: String },
    #[error("field trial {name} has malformed value {value:?}")]
    MalformedFieldTrial { name: String, value: String },
    #[error("invalid value {value:?} for field trial key {key}")]
    InvalidFieldTrialValue { key: String, value: String },
    #[error("rtp sender failed to send encoded image")]
    SendFailed,
    #[error("send stream is stopped")]
    StreamStopped,
}

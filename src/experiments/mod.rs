mod alr_experiment;
mod field_trials;
mod min_video_bitrate;
mod rate_control;

pub use alr_experiment::*;
pub use field_trials::FieldTrials;
pub use min_video_bitrate::*;
pub use rate_control::*;

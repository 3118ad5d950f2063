mod encoder_activity;
mod stream_allocation;
mod video_bitrate_allocation_throttle;
mod video_send_stream;
mod video_send_stream_impl;
mod video_stream_encoder;

pub use encoder_activity::*;
pub use stream_allocation::*;
pub use video_bitrate_allocation_throttle::*;
pub use video_send_stream::*;
pub use video_send_stream_impl::*;
pub use video_stream_encoder::*;

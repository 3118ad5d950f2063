mod bitrate_allocator;
mod rtp_transport_controller_send;
mod rtp_video_sender;

pub use bitrate_allocator::*;
pub use rtp_transport_controller_send::*;
pub use rtp_video_sender::*;

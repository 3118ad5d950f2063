mod error;
mod experiments;

pub use error::*;
pub use experiments::*;

pub mod api;

/// Interfaces of the collaborators around a send stream: the bitrate allocator, RTP sender and transport controller.
pub mod call;

/// Clocks: [Clock](rtc::Clock), with a real and a simulated implementation.
pub mod rtc;

/// The video send stream: [VideoSendStreamImpl](video::VideoSendStreamImpl).
pub mod video;

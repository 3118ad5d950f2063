/// Values exchanged with the bitrate allocator: [BitrateAllocationUpdate](call::BitrateAllocationUpdate).
pub mod call;

/// RTP header extensions: [RtpExtension](rtp_parameters::RtpExtension).
pub mod rtp_parameters;

/// Some unit types, such as [DataRate](units::DataRate) and [Timestamp](units::Timestamp).
pub mod units;

/// Video layer configuration and allocation: [VideoBitrateAllocation](video::VideoBitrateAllocation).
pub mod video;

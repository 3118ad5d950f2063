mod bitrate_allocation;

pub use bitrate_allocation::*;

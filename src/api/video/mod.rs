mod encoded_image;
mod video_bitrate_allocation;
mod video_stream;

pub use encoded_image::*;
pub use video_bitrate_allocation::*;
pub use video_stream::*;

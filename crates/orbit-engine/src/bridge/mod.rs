pub mod protocol;

pub use protocol::{FrameBuffer, FrameHeader, FrameSections, ProtocolLayout};

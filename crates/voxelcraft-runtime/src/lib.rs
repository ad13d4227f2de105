//! Chunk streaming: keeps the live mesh table in step with a moving viewpoint.
#![forbid(unsafe_code)]

mod streamer;

pub use streamer::{ChunkStreamer, StreamDelta, StreamStats, required_set};

//! Audio input types
//!
//! The decoded sample buffer and the frame iterator every analysis stage
//! walks. Decoding itself belongs to the host application.

pub mod sample_buffer;

pub use sample_buffer::{frames, Frame, FrameLayout, Frames, SampleBuffer};

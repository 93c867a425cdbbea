//! `flatscript` — flat-stream transcript extraction and caption rendering.
//!
//! This crate provides:
//! - A tree↔stream codec for nested speech-recognition transcripts
//! - Lazy word-level stream transforms (hyphen split/join, search/replace, timeshift)
//! - Block segmentation (time-bucket quantization, soft/hard character breaking)
//! - Pluggable caption encoders (plain text, transcript, SRT, WebVTT)
//!
//! The library is designed to be used by both CLI tools and long-running services,
//! with an emphasis on clarity, streaming passes, and minimal surprises.

// High-level API (most consumers should start here).
pub mod extract;
pub mod opts;

// Transcript data structures.
pub mod recording;
pub mod word;

// The flat stream and its tree codec.
pub mod flat;

// Word-level stream transforms.
pub mod hyphen;
pub mod replace;
pub mod timeshift;

// Block segmentation over the reconstructed tree.
pub mod breaks;
pub mod quantize;

// Output selection and encoder interfaces.
pub mod block_encoder;
pub mod output_type;

// Caption encoders that render block lists into the various formats.
pub mod srt_encoder;
pub mod text_encoder;
pub mod timefmt;
pub mod transcript_encoder;
pub mod vtt_encoder;

// Logging configuration and control.
#[cfg(feature = "logging")]
pub mod logging;

mod error;

pub use error::{Error, Result};

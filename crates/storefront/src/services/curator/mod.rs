//! The AI curator: passthrough wrappers around the hosted generative-model
//! service.
//!
//! Three independent, stateless capabilities:
//!
//! - [`CuratorClient::analyze`] - single-shot image-to-text garment analysis
//! - [`CuratorClient::generate_concept`] - single-shot text-to-image concept
//!   render, returned as a displayable data URI
//! - [`CuratorClient::start_live_session`] - bidirectional audio streaming
//!   with the curator persona
//!
//! None of these retry, back off, or reconnect: a failure surfaces inline
//! and a dropped live connection simply ends the session.

pub mod client;
pub mod error;
pub mod live;
pub mod playback;

pub use client::CuratorClient;
pub use error::CuratorError;
pub use live::{LiveEvent, LiveSession};
pub use playback::{PlaybackScheduler, pcm16_duration};

/// Persona for every curator capability.
pub const CURATOR_SYSTEM_INSTRUCTION: &str =
    "You are the Lead Curator at PixelPunk, an elite vintage archive. You are sophisticated, \
     knowledgeable about 20th-century fashion (from Victorian to Y2K), and have an eye for \
     modern silhouettes. You help clients understand the provenance of their pieces and how to \
     style them with contemporary techwear and minimalism. Keep your tone professional yet \
     artistic.";

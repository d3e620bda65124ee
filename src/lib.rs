//! Wayfinder - landmark-aware directions for audio playback
//!
//! Fetches turn-by-turn directions from a mapping provider, enriches each step
//! with a nearby landmark and plain-language cues, and synthesizes a single
//! narrative suitable for text-to-speech.

pub mod api;
pub mod cli;
pub mod config;
pub mod extract;
pub mod logging;
pub mod metrics;
pub mod pipeline;
pub mod provider;
pub mod store;

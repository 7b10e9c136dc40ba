//! Data models for tunediff
//!
//! The raw record as decoded from an export, and the normalized identity
//! used for set comparison.

mod song;

pub use song::{SongIdentity, SongRecord};

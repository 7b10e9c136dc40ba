//! Utility modules for tunediff

pub mod parsers;

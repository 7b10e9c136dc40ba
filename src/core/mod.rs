//! Core comparison logic

pub mod comparator;
pub mod sink;

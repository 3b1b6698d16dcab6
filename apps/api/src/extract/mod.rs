//! Field extractors — independent, stateless scans over raw text.
//!
//! Each extractor is a pure function `(text) -> Option<T>`: a miss is a
//! `None`, never an error, and extractors are safe to call redundantly
//! or in any order.

pub mod city;
pub mod contact;
pub mod date;
pub mod markers;
pub mod rate;
pub mod skills;
pub mod time_range;

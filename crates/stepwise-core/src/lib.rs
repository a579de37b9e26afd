//! stepwise-core — progression and assessment engine.
//!
//! Grades answers against stored answer keys, turns graded attempts into
//! completion records, and lays a content snapshot out as a sequentially
//! gated learning path.

pub mod answer;
pub mod config;
pub mod engine;
pub mod error;
pub mod gating;
pub mod grading;
pub mod layout;
pub mod model;
pub mod parser;
pub mod progress;
pub mod results;
pub mod traits;

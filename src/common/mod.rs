//! Common traits and types used across the codebase

pub mod traits;

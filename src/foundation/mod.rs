//! Shared building blocks: error taxonomy, hashing and fixed-point helpers, pixel geometry.

pub(crate) mod core;
pub(crate) mod error;
pub(crate) mod math;

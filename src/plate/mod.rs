//! Name-plate detection.

pub(crate) mod detect;

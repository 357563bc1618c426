//! Raster loading boundary.

pub(crate) mod decode;
pub(crate) mod source;

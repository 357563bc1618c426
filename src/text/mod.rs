//! Name text shaping and rasterization.

pub(crate) mod glyph;

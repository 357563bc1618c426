//! Compositing: the over kernel, row stitching, band composition and the incremental renderer.

pub(crate) mod band;
pub(crate) mod composite;
pub(crate) mod row;
pub(crate) mod session;

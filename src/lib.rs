//! leatherband composes "leather band" images.
//!
//! A band is a background plate with two kinds of overlay:
//!
//! - a **name plate**: the largest near-white area of the background, auto-detected,
//!   onto which a text string is drawn and clipped to the plate's silhouette
//! - a **badge stack**: single badges or horizontally stitched badge rows, each scaled
//!   to the background width and stacked bottom-up with a fixed margin
//!
//! # Pipeline overview
//!
//! 1. **Load**: [`ImageSource`] turns configured paths into straight-alpha RGBA8 rasters.
//! 2. **Detect**: [`detect`] labels 8-connected near-white components and keeps the largest.
//! 3. **Name**: [`render_name`] lays out text with a caller-provided [`NameFont`] and masks it.
//! 4. **Stack**: [`compose`] scales and over-composites every [`BadgeUnit`] bottom-up.
//!
//! [`render`] is the single-shot entry point; [`BandRenderer`] caches the name-plate
//! region per background so edits to badges, margin or name skip re-detection.
//!
//! Only a missing background aborts a render. Everything else is reported as a
//! [`BandWarning`] alongside a best-effort image.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod assets;
mod compose;
mod foundation;
mod model;
mod plate;
mod text;

pub use assets::decode::decode_image;
pub use assets::source::{FsImageSource, ImageSource, MemoryImageSource};
pub use compose::band::{
    BADGE_FILTER, BandWarning, NameRequest, PlateHint, RenderedBand, compose, render,
    scale_to_width,
};
pub use compose::composite::overlay_at;
pub use compose::row::compose_row;
pub use compose::session::BandRenderer;
pub use foundation::core::PixelBox;
pub use foundation::error::{BandError, BandResult};
pub use model::band::{
    Badge, BadgeRow, BadgeUnit, BandChange, BandConfig, DEFAULT_MARGIN_PX,
};
pub use plate::detect::{NamePlateRegion, PLATE_LUMA_THRESHOLD, detect, luminance, plate_mask};
pub use text::glyph::{DEFAULT_NAME_SIZE_PX, InkRgba8, NameFont, render_name};

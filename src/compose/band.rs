use std::path::Path;

use anyhow::Context;
use image::{RgbaImage, imageops};

use crate::{
    assets::source::ImageSource,
    compose::composite::overlay_at,
    compose::row::compose_row,
    foundation::error::{BandError, BandResult},
    model::band::{BadgeRow, BadgeUnit, BandConfig},
    plate::detect::{NamePlateRegion, detect},
    text::glyph::{NameFont, render_name},
};

/// Resampling filter used when scaling badges to the background width.
pub const BADGE_FILTER: imageops::FilterType = imageops::FilterType::Lanczos3;

/// Text to print on the name plate and how to draw it.
#[derive(Debug)]
pub struct NameRequest<'a> {
    /// Text to render; empty means "no overlay".
    pub text: &'a str,
    /// Loaded font used for shaping and rasterization.
    pub font: &'a mut NameFont,
    /// Font size in pixels (see [`crate::DEFAULT_NAME_SIZE_PX`]).
    pub size_px: u32,
}

#[derive(Clone, Copy, Debug, Default)]
/// Where the composer gets the name-plate region from.
pub enum PlateHint<'a> {
    /// Run detection on the loaded background.
    #[default]
    Detect,
    /// The background is unchanged since this result was computed; reuse it.
    Known(Option<&'a NamePlateRegion>),
}

#[derive(Clone, Debug, PartialEq, Eq)]
/// Recoverable condition met while composing; the affected unit was skipped.
pub enum BandWarning {
    /// A badge (or row member) image could not be loaded.
    MissingBadgeSource {
        /// Index of the stacking item in `BandConfig::items`.
        item: usize,
        /// Configured image path.
        path: String,
        /// Why loading failed.
        reason: String,
    },
    /// A row had no loadable members.
    EmptyRow {
        /// Index of the stacking item in `BandConfig::items`.
        item: usize,
    },
    /// A row's members could not be stitched or the result could not be placed.
    UnusableItem {
        /// Index of the stacking item in `BandConfig::items`.
        item: usize,
        /// Why the item was dropped.
        reason: String,
    },
    /// The name could not be drawn.
    NameSkipped {
        /// Why the overlay was dropped.
        reason: String,
    },
}

impl std::fmt::Display for BandWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingBadgeSource { item, path, reason } => {
                write!(f, "item {item}: badge image '{path}' not usable: {reason}")
            }
            Self::EmptyRow { item } => write!(f, "item {item}: badge row has no usable badges"),
            Self::UnusableItem { item, reason } => write!(f, "item {item}: skipped: {reason}"),
            Self::NameSkipped { reason } => write!(f, "name not drawn: {reason}"),
        }
    }
}

#[derive(Clone, Debug)]
/// Output of one render call.
pub struct RenderedBand {
    /// The composited band.
    pub image: RgbaImage,
    /// Name-plate region used for this render (detected or reused).
    pub region: Option<NamePlateRegion>,
    /// Units skipped along the way.
    pub warnings: Vec<BandWarning>,
    /// Stack cursor after the last placed item; negative when the stack overflowed the top.
    pub next_y: i64,
}

impl RenderedBand {
    /// `true` when some stacked item reaches above the top edge of the background.
    pub fn overflows_top(&self) -> bool {
        self.next_y < 0
    }

    /// Encode as PNG at `path`, creating parent directories as needed.
    pub fn save_png(&self, path: impl AsRef<Path>) -> BandResult<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create output dir '{}'", parent.display()))?;
        }
        self.image
            .save_with_format(path, image::ImageFormat::Png)
            .with_context(|| format!("write png '{}'", path.display()))?;
        Ok(())
    }
}

/// Render `config` from scratch: load, detect the plate, draw the name, stack badges.
///
/// Pure with respect to its inputs; identical inputs give pixel-identical output.
pub fn render(
    config: &BandConfig,
    source: &dyn ImageSource,
    name: Option<NameRequest<'_>>,
) -> BandResult<RenderedBand> {
    compose(config, source, name, PlateHint::Detect)
}

/// Compose a band.
///
/// 1. Load the background; failure is [`BandError::MissingBackground`].
/// 2. Take the plate region from `plate` or detect it.
/// 3. With a non-empty name and a region, draw the name and composite it at the
///    region's top-left.
/// 4. Stack `config.items` bottom-up: each resolved raster is scaled to the background
///    width, centered horizontally, placed with its bottom edge on the cursor, and the
///    cursor moves up by its height plus `config.margin`.
///
/// Units that cannot be resolved are skipped with a [`BandWarning`] and do not move the
/// cursor. Items may end up partly or fully above the canvas; nothing is clamped.
#[tracing::instrument(level = "debug", skip_all, fields(background = %config.background_path, items = config.items.len()))]
pub fn compose(
    config: &BandConfig,
    source: &dyn ImageSource,
    name: Option<NameRequest<'_>>,
    plate: PlateHint<'_>,
) -> BandResult<RenderedBand> {
    let mut background = load_background(config, source)?;
    let (bg_w, bg_h) = background.dimensions();
    let mut warnings = Vec::new();

    let region = match plate {
        PlateHint::Detect => detect(&background),
        PlateHint::Known(region) => {
            tracing::debug!(present = region.is_some(), "reusing name plate region");
            region.cloned()
        }
    };

    if let Some(name) = name
        && !name.text.is_empty()
    {
        match &region {
            Some(region) => match render_name(region, name.text, name.font, name.size_px) {
                Ok(overlay) => overlay_at(
                    &mut background,
                    &overlay,
                    i64::from(region.bbox.x0),
                    i64::from(region.bbox.y0),
                ),
                Err(e) => {
                    let warning = BandWarning::NameSkipped {
                        reason: e.to_string(),
                    };
                    tracing::warn!("{warning}");
                    warnings.push(warning);
                }
            },
            None => tracing::debug!("no name plate region; name overlay skipped"),
        }
    }

    let mut current_y = i64::from(bg_h);
    for (index, unit) in config.items.iter().enumerate() {
        let Some(raster) = resolve_unit(index, unit, source, &mut warnings) else {
            tracing::debug!(item = index, unit = %unit.label(), "unit skipped");
            continue;
        };

        let scaled = match scale_to_width(&raster, bg_w) {
            Ok(scaled) => scaled,
            Err(e) => {
                let warning = BandWarning::UnusableItem {
                    item: index,
                    reason: e.to_string(),
                };
                tracing::warn!("{warning}");
                warnings.push(warning);
                continue;
            }
        };

        let x = (i64::from(bg_w) - i64::from(scaled.width())).div_euclid(2);
        let top_y = current_y - i64::from(scaled.height());
        tracing::debug!(item = index, x, top_y, h = scaled.height(), "placing unit");
        overlay_at(&mut background, &scaled, x, top_y);
        current_y = top_y - i64::from(config.margin);
    }

    if current_y < 0 {
        tracing::debug!(next_y = current_y, "badge stack overflows the top edge");
    }

    Ok(RenderedBand {
        image: background,
        region,
        warnings,
        next_y: current_y,
    })
}

fn load_background(config: &BandConfig, source: &dyn ImageSource) -> BandResult<RgbaImage> {
    if config.background_path.trim().is_empty() {
        return Err(BandError::missing_background("background path is empty"));
    }
    source.load(&config.background_path).map_err(|e| {
        BandError::missing_background(format!("'{}': {e}", config.background_path))
    })
}

fn resolve_unit(
    index: usize,
    unit: &BadgeUnit,
    source: &dyn ImageSource,
    warnings: &mut Vec<BandWarning>,
) -> Option<RgbaImage> {
    match unit {
        BadgeUnit::Badge(badge) => load_badge(index, &badge.image_path, source, warnings),
        BadgeUnit::BadgeRow(row) => resolve_row(index, row, source, warnings),
    }
}

fn resolve_row(
    index: usize,
    row: &BadgeRow,
    source: &dyn ImageSource,
    warnings: &mut Vec<BandWarning>,
) -> Option<RgbaImage> {
    let members = row
        .badges
        .iter()
        .map(|badge| load_badge(index, &badge.image_path, source, warnings))
        .collect::<Vec<_>>();

    match compose_row(&members) {
        Ok(Some(raster)) => Some(raster),
        Ok(None) => {
            let warning = BandWarning::EmptyRow { item: index };
            tracing::warn!("{warning}");
            warnings.push(warning);
            None
        }
        Err(e) => {
            let warning = BandWarning::UnusableItem {
                item: index,
                reason: e.to_string(),
            };
            tracing::warn!("{warning}");
            warnings.push(warning);
            None
        }
    }
}

fn load_badge(
    index: usize,
    path: &str,
    source: &dyn ImageSource,
    warnings: &mut Vec<BandWarning>,
) -> Option<RgbaImage> {
    match source.load(path) {
        Ok(img) => Some(img),
        Err(e) => {
            let warning = BandWarning::MissingBadgeSource {
                item: index,
                path: path.to_string(),
                reason: e.to_string(),
            };
            tracing::warn!("{warning}");
            warnings.push(warning);
            None
        }
    }
}

/// Uniformly scale `raster` to `width`, rounding the new height (at least 1px).
pub fn scale_to_width(raster: &RgbaImage, width: u32) -> BandResult<RgbaImage> {
    let (w, h) = raster.dimensions();
    if w == 0 || h == 0 || width == 0 {
        return Err(BandError::validation(format!(
            "cannot scale a {w}x{h} raster to width {width}"
        )));
    }
    let scale = f64::from(width) / f64::from(w);
    let new_h = (f64::from(h) * scale).round().max(1.0);
    if new_h > f64::from(u32::MAX) {
        return Err(BandError::validation("scaled badge height overflows u32"));
    }
    let new_h = new_h as u32;
    if (w, h) == (width, new_h) {
        return Ok(raster.clone());
    }
    Ok(imageops::resize(raster, width, new_h, BADGE_FILTER))
}

#[cfg(test)]
#[path = "../../tests/unit/compose/band.rs"]
mod tests;

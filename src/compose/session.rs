use crate::{
    assets::source::ImageSource,
    compose::band::{NameRequest, PlateHint, RenderedBand, compose},
    foundation::error::BandResult,
    model::band::{BandChange, BandConfig},
    plate::detect::NamePlateRegion,
};

#[derive(Clone, Debug, PartialEq, Eq)]
struct PlateKey {
    background_path: String,
    fingerprint: u64,
}

#[derive(Clone, Debug)]
struct CachedPlate {
    key: PlateKey,
    region: Option<NamePlateRegion>,
}

/// Incremental renderer that memoizes the name-plate region per background.
///
/// The cache is keyed by background path plus the source's content fingerprint, so a
/// background file replaced in place is re-analyzed. Changes to items, margin or the
/// name never trigger re-detection. Single-owner and not thread-safe; callers wanting
/// concurrent previews must serialize renders themselves.
#[derive(Debug, Default)]
pub struct BandRenderer {
    cached: Option<CachedPlate>,
    detections: u64,
}

impl BandRenderer {
    /// Construct a renderer with an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply the invalidation rule for a [`BandConfig`] mutation.
    pub fn note_change(&mut self, change: BandChange) {
        if change.invalidates_plate() {
            self.invalidate();
        }
    }

    /// Drop the cached region unconditionally.
    pub fn invalidate(&mut self) {
        self.cached = None;
    }

    /// Cached region for the most recent background, if one was computed.
    pub fn cached_region(&self) -> Option<&NamePlateRegion> {
        self.cached.as_ref().and_then(|c| c.region.as_ref())
    }

    /// Number of plate detections performed so far (cache misses).
    pub fn detections(&self) -> u64 {
        self.detections
    }

    /// Render `config`, reusing the cached plate region when the background is unchanged.
    pub fn render(
        &mut self,
        config: &BandConfig,
        source: &dyn ImageSource,
        name: Option<NameRequest<'_>>,
    ) -> BandResult<RenderedBand> {
        let key = source
            .fingerprint(&config.background_path)
            .map(|fingerprint| PlateKey {
                background_path: config.background_path.clone(),
                fingerprint,
            });

        let hit = match (&self.cached, &key) {
            (Some(cached), Some(key)) => cached.key == *key,
            _ => false,
        };

        let rendered = if hit {
            tracing::debug!(path = %config.background_path, "name plate cache hit");
            let region = self.cached.as_ref().and_then(|c| c.region.as_ref());
            compose(config, source, name, PlateHint::Known(region))?
        } else {
            tracing::debug!(path = %config.background_path, "name plate cache miss");
            let rendered = compose(config, source, name, PlateHint::Detect)?;
            self.detections += 1;
            self.cached = key.map(|key| CachedPlate {
                key,
                region: rendered.region.clone(),
            });
            rendered
        };
        Ok(rendered)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/compose/session.rs"]
mod tests;

use std::{fs::File, io::BufReader, path::Path};

use anyhow::Context;

use crate::foundation::error::{BandError, BandResult};

/// Vertical gap used when a preset omits `margin`.
pub const DEFAULT_MARGIN_PX: u32 = 10;

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
/// Complete leather band configuration.
///
/// The band is a pure data model that can be:
/// - mutated through explicit setters, each reporting a [`BandChange`]
/// - serialized/deserialized via Serde (JSON presets)
///
/// Rendering is performed by [`crate::render`], [`crate::compose`] or [`crate::BandRenderer`].
pub struct BandConfig {
    /// Background plate image path.
    #[serde(default)]
    pub background_path: String,
    /// Vertical gap in pixels between stacked items.
    #[serde(default = "default_margin")]
    pub margin: u32,
    /// Stacked items, first element nearest the bottom edge.
    #[serde(default)]
    pub items: Vec<BadgeUnit>,
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
/// A single badge image.
pub struct Badge {
    /// Badge image path.
    pub image_path: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
/// Badges stitched left-to-right into one stacking item.
pub struct BadgeRow {
    /// Row members, left to right.
    #[serde(default)]
    pub badges: Vec<Badge>,
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
/// One stacking item: a badge or a horizontally stitched row of badges.
pub enum BadgeUnit {
    /// Single badge.
    Badge(Badge),
    /// Row of badges.
    BadgeRow(BadgeRow),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// What a [`BandConfig`] mutation touched.
pub enum BandChange {
    /// Nothing observable changed.
    None,
    /// The background changed; any cached name-plate region is stale.
    Background,
    /// Only margin or items changed; the name-plate region stays valid.
    Layout,
}

impl BandChange {
    /// `true` when a cached name-plate region must be recomputed.
    pub fn invalidates_plate(self) -> bool {
        matches!(self, Self::Background)
    }
}

fn default_margin() -> u32 {
    DEFAULT_MARGIN_PX
}

impl Default for BandConfig {
    fn default() -> Self {
        Self {
            background_path: String::new(),
            margin: DEFAULT_MARGIN_PX,
            items: Vec::new(),
        }
    }
}

impl Badge {
    /// Construct a badge for `image_path`.
    pub fn new(image_path: impl Into<String>) -> Self {
        Self {
            image_path: image_path.into(),
        }
    }

    /// Display name: the file name component of the image path.
    pub fn name(&self) -> &str {
        Path::new(&self.image_path)
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or(self.image_path.as_str())
    }
}

impl BadgeRow {
    /// Construct a row from badge image paths.
    pub fn from_paths<I, S>(paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            badges: paths.into_iter().map(Badge::new).collect(),
        }
    }
}

impl BadgeUnit {
    /// Single-badge unit for `image_path`.
    pub fn badge(image_path: impl Into<String>) -> Self {
        Self::Badge(Badge::new(image_path))
    }

    /// Row unit from badge image paths.
    pub fn row<I, S>(paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::BadgeRow(BadgeRow::from_paths(paths))
    }

    /// Human-readable label used in diagnostics.
    pub fn label(&self) -> String {
        match self {
            Self::Badge(b) => b.name().to_string(),
            Self::BadgeRow(r) => {
                let names = r.badges.iter().map(Badge::name).collect::<Vec<_>>();
                format!("row[{}]", names.join(", "))
            }
        }
    }
}

impl BandConfig {
    /// Construct a band with `background_path`, `margin` and no items.
    pub fn new(background_path: impl Into<String>, margin: u32) -> Self {
        Self {
            background_path: background_path.into(),
            margin,
            items: Vec::new(),
        }
    }

    /// Replace the background path.
    pub fn set_background(&mut self, path: impl Into<String>) -> BandChange {
        let path = path.into();
        if path == self.background_path {
            return BandChange::None;
        }
        self.background_path = path;
        BandChange::Background
    }

    /// Replace the vertical gap between stacked items.
    pub fn set_margin(&mut self, margin: u32) -> BandChange {
        if margin == self.margin {
            return BandChange::None;
        }
        self.margin = margin;
        BandChange::Layout
    }

    /// Append an item at the top of the stack.
    pub fn push_item(&mut self, item: BadgeUnit) -> BandChange {
        self.items.push(item);
        BandChange::Layout
    }

    /// Insert an item at stack position `index` (0 = bottom).
    pub fn insert_item(&mut self, index: usize, item: BadgeUnit) -> BandResult<BandChange> {
        if index > self.items.len() {
            return Err(BandError::validation(format!(
                "insert index {index} out of range for {} items",
                self.items.len()
            )));
        }
        self.items.insert(index, item);
        Ok(BandChange::Layout)
    }

    /// Remove and return the item at stack position `index`.
    pub fn remove_item(&mut self, index: usize) -> BandResult<(BadgeUnit, BandChange)> {
        if index >= self.items.len() {
            return Err(BandError::validation(format!(
                "remove index {index} out of range for {} items",
                self.items.len()
            )));
        }
        Ok((self.items.remove(index), BandChange::Layout))
    }

    /// Move the item at `from` so that it ends up at position `to`.
    pub fn move_item(&mut self, from: usize, to: usize) -> BandResult<BandChange> {
        let len = self.items.len();
        if from >= len || to >= len {
            return Err(BandError::validation(format!(
                "move {from} -> {to} out of range for {len} items"
            )));
        }
        if from == to {
            return Ok(BandChange::None);
        }
        let item = self.items.remove(from);
        self.items.insert(to, item);
        Ok(BandChange::Layout)
    }

    /// Check structural invariants that serde alone does not enforce.
    ///
    /// Missing or empty badge paths are not errors here: they are reported as
    /// render diagnostics so a half-edited preset still previews.
    pub fn validate(&self) -> BandResult<()> {
        if self.background_path.trim().is_empty() {
            return Err(BandError::validation("background_path must be non-empty"));
        }
        Ok(())
    }

    /// Parse a preset from a JSON string.
    pub fn from_json_str(json: &str) -> BandResult<Self> {
        serde_json::from_str(json).map_err(|e| BandError::serde(format!("parse preset: {e}")))
    }

    /// Serialize to a pretty-printed JSON preset.
    pub fn to_json_string(&self) -> BandResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| BandError::serde(format!("serialize preset: {e}")))
    }

    /// Load a preset file.
    pub fn from_path(path: impl AsRef<Path>) -> BandResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).with_context(|| format!("open preset '{}'", path.display()))?;
        serde_json::from_reader(BufReader::new(f))
            .map_err(|e| BandError::serde(format!("parse preset '{}': {e}", path.display())))
    }

    /// Write this band as a preset file, creating parent directories as needed.
    pub fn save_to_path(&self, path: impl AsRef<Path>) -> BandResult<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create preset dir '{}'", parent.display()))?;
        }
        let json = self.to_json_string()?;
        std::fs::write(path, json)
            .with_context(|| format!("write preset '{}'", path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/model/band.rs"]
mod tests;

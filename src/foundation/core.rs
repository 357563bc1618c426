#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
/// Half-open pixel rectangle `[x0, x1) x [y0, y1)` in raster coordinates.
pub struct PixelBox {
    /// Left edge (inclusive).
    pub x0: u32,
    /// Top edge (inclusive).
    pub y0: u32,
    /// Right edge (exclusive).
    pub x1: u32,
    /// Bottom edge (exclusive).
    pub y1: u32,
}

impl PixelBox {
    /// Construct a box from its edges; `x1 >= x0` and `y1 >= y0` are required.
    pub fn new(x0: u32, y0: u32, x1: u32, y1: u32) -> Self {
        debug_assert!(x1 >= x0 && y1 >= y0);
        Self { x0, y0, x1, y1 }
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.x1 - self.x0
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.y1 - self.y0
    }

    /// `true` when the box is taller than it is wide.
    pub fn is_portrait(&self) -> bool {
        self.height() > self.width()
    }

    /// Grow the box to cover pixel `(x, y)`.
    pub(crate) fn include(&mut self, x: u32, y: u32) {
        self.x0 = self.x0.min(x);
        self.y0 = self.y0.min(y);
        self.x1 = self.x1.max(x + 1);
        self.y1 = self.y1.max(y + 1);
    }

    /// Box covering exactly pixel `(x, y)`.
    pub(crate) fn pixel(x: u32, y: u32) -> Self {
        Self::new(x, y, x + 1, y + 1)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;

use std::path::Path;

use anyhow::Context;
use image::{RgbaImage, imageops};

use crate::{
    compose::composite::mask_alpha_in_place,
    foundation::error::{BandError, BandResult},
    foundation::math::unpremultiply,
    plate::detect::NamePlateRegion,
};

/// Pixel size used for names unless configured otherwise.
pub const DEFAULT_NAME_SIZE_PX: u32 = 8;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
/// RGBA8 ink color carried through Parley layouts.
pub struct InkRgba8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

impl InkRgba8 {
    /// Opaque black, the ink used for names.
    pub const BLACK: Self = Self {
        r: 0,
        g: 0,
        b: 0,
        a: 255,
    };
}

/// A loaded font plus the Parley contexts needed to shape text with it.
///
/// Owned by the caller and passed explicitly to [`render_name`]; shaping needs
/// mutable scratch state, so a `NameFont` is not shared across concurrent renders.
pub struct NameFont {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<InkRgba8>,
    family: String,
    data: vello_cpu::peniko::FontData,
}

impl std::fmt::Debug for NameFont {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NameFont")
            .field("family", &self.family)
            .finish_non_exhaustive()
    }
}

impl NameFont {
    /// Register raw TrueType/OpenType bytes.
    pub fn from_bytes(font_bytes: Vec<u8>) -> BandResult<Self> {
        let mut font_ctx = parley::FontContext::default();
        let families = font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::from(font_bytes.clone()), None);
        let family_id = families
            .first()
            .map(|(id, _)| *id)
            .ok_or_else(|| BandError::text("no font families registered from font bytes"))?;
        let family = font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| BandError::text("registered font family has no name"))?
            .to_string();

        let data = vello_cpu::peniko::FontData::new(vello_cpu::peniko::Blob::from(font_bytes), 0);
        Ok(Self {
            font_ctx,
            layout_ctx: parley::LayoutContext::new(),
            family,
            data,
        })
    }

    /// Read and register a font file.
    pub fn from_path(path: impl AsRef<Path>) -> BandResult<Self> {
        let path = path.as_ref();
        let bytes =
            std::fs::read(path).with_context(|| format!("read font '{}'", path.display()))?;
        Self::from_bytes(bytes)
    }

    /// Family name reported by the font.
    pub fn family(&self) -> &str {
        &self.family
    }

    /// Advance width of `text` laid out on a single line at `size_px`.
    pub fn measure(&mut self, text: &str, size_px: f32) -> BandResult<f32> {
        let layout = self.layout(text, size_px)?;
        Ok(layout_width(&layout))
    }

    fn layout(&mut self, text: &str, size_px: f32) -> BandResult<parley::Layout<InkRgba8>> {
        if !size_px.is_finite() || size_px <= 0.0 {
            return Err(BandError::validation("name size_px must be finite and > 0"));
        }

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(std::borrow::Cow::Owned(self.family.clone())),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));
        builder.push_default(parley::style::StyleProperty::Brush(InkRgba8::BLACK));

        let mut layout: parley::Layout<InkRgba8> = builder.build(text);
        layout.break_all_lines(None);
        Ok(layout)
    }
}

fn layout_width(layout: &parley::Layout<InkRgba8>) -> f32 {
    layout
        .lines()
        .map(|line| line.metrics().advance)
        .fold(0.0f32, f32::max)
}

/// Rasterize `text` into a transparent raster the size of `region.bbox`.
///
/// Text is always laid out landscape: for a portrait box the working canvas is
/// transposed, the text drawn horizontally, and the canvas turned 90° counter-clockwise
/// back to the box's orientation. The glyph run is centered horizontally (never closer
/// than 1px to the left edge) and placed `(h - font_size) / 2` from the top, in opaque
/// black. Finally the alpha channel is multiplied by `region.mask`, so only pixels over
/// the near-white plate survive.
#[tracing::instrument(level = "debug", skip(region, font), fields(bbox = ?region.bbox))]
pub fn render_name(
    region: &NamePlateRegion,
    text: &str,
    font: &mut NameFont,
    font_size: u32,
) -> BandResult<RgbaImage> {
    let (w, h) = (region.bbox.width(), region.bbox.height());
    if text.is_empty() {
        return Ok(RgbaImage::new(w, h));
    }
    if font_size == 0 {
        return Err(BandError::validation("font_size must be > 0"));
    }

    let rotate = region.bbox.is_portrait();
    let (cw, ch) = if rotate { (h, w) } else { (w, h) };
    let cw16: u16 = cw
        .try_into()
        .map_err(|_| BandError::text("name plate width exceeds u16"))?;
    let ch16: u16 = ch
        .try_into()
        .map_err(|_| BandError::text("name plate height exceeds u16"))?;

    let layout = font.layout(text, font_size as f32)?;
    let text_width = layout_width(&layout);
    let x = ((cw as f32 - text_width) / 2.0).floor().max(1.0);
    let y = (i64::from(ch) - i64::from(font_size)).div_euclid(2);
    tracing::debug!(text_width, x, y, rotate, "laying out name");

    let mut ctx = vello_cpu::RenderContext::new(cw16, ch16);
    ctx.set_transform(vello_cpu::kurbo::Affine::translate((f64::from(x), y as f64)));
    for line in layout.lines() {
        for item in line.items() {
            let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                continue;
            };

            let ink = run.style().brush;
            ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
                ink.r, ink.g, ink.b, ink.a,
            ));

            let glyphs = run.positioned_glyphs().map(|g| vello_cpu::Glyph {
                id: g.id,
                x: g.x,
                y: g.y,
            });
            ctx.glyph_run(&font.data)
                .font_size(run.run().font_size())
                .fill_glyphs(glyphs);
        }
    }
    ctx.flush();

    let mut pixmap = vello_cpu::Pixmap::new(cw16, ch16);
    ctx.render_to_pixmap(&mut pixmap);

    let straight = pixmap
        .data_as_u8_slice()
        .chunks_exact(4)
        .flat_map(|px| unpremultiply([px[0], px[1], px[2], px[3]]))
        .collect::<Vec<u8>>();
    let mut canvas = RgbaImage::from_raw(cw, ch, straight)
        .ok_or_else(|| BandError::text("glyph pixmap size mismatch"))?;

    if rotate {
        canvas = imageops::rotate270(&canvas);
    }

    if canvas.dimensions() != region.mask.dimensions() {
        return Err(BandError::validation(format!(
            "name plate mask is {:?} but bbox is {:?}",
            region.mask.dimensions(),
            canvas.dimensions()
        )));
    }
    mask_alpha_in_place(&mut canvas, &region.mask);
    Ok(canvas)
}

#[cfg(test)]
#[path = "../../tests/unit/text/glyph.rs"]
mod tests;

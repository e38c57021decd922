//====================================================================

use std::{error::Error, fmt::Display, hash::BuildHasherDefault};

use common::{Color, Size};
use cosmic_text::{
    Attrs, Buffer, CacheKey, FontSystem, Metrics, Shaping, SwashCache, SwashContent, SwashImage,
    Wrap,
};
use lru::LruCache;
use rustc_hash::FxHasher;

use crate::canvas::Canvas;

//====================================================================

type FastHasher = BuildHasherDefault<FxHasher>;

const GLYPH_CACHE_LIMIT: usize = 512;

#[derive(Debug)]
pub enum CacheGlyphError {
    NoGlyphImage,
    LruStorageError,
}

impl Error for CacheGlyphError {}

impl Display for CacheGlyphError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let msg = match &self {
            CacheGlyphError::NoGlyphImage => "Unable to get image from provided glyph.",
            CacheGlyphError::LruStorageError => {
                "Error accessing glyphs from LRU - This shouldn't really happen."
            }
        };

        write!(f, "{}", msg)
    }
}

//====================================================================

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextStyle {
    pub font_size: f32,
    /// Multiplier over `font_size`.
    pub line_height: f32,
    pub color: Color,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            font_size: 14.,
            line_height: 1.2,
            color: Color::WHITE,
        }
    }
}

impl TextStyle {
    #[inline]
    fn metrics(&self) -> Metrics {
        Metrics::relative(self.font_size, self.line_height)
    }
}

//====================================================================

/// Rasterized glyphs, most recently used first. Trimmed back to
/// `GLYPH_CACHE_LIMIT` after each paint.
struct GlyphCache {
    cached_glyphs: LruCache<CacheKey, SwashImage, FastHasher>,
}

impl GlyphCache {
    fn new() -> Self {
        Self {
            cached_glyphs: LruCache::unbounded_with_hasher(FastHasher::default()),
        }
    }

    fn use_glyph(
        &mut self,
        font_system: &mut FontSystem,
        swash_cache: &mut SwashCache,
        key: CacheKey,
    ) -> Result<&SwashImage, CacheGlyphError> {
        if !self.cached_glyphs.contains(&key) {
            let image = swash_cache
                .get_image_uncached(font_system, key)
                .ok_or(CacheGlyphError::NoGlyphImage)?;

            self.cached_glyphs.put(key, image);
        }

        self.cached_glyphs
            .get(&key)
            .ok_or(CacheGlyphError::LruStorageError)
    }

    fn trim(&mut self) {
        while self.cached_glyphs.len() > GLYPH_CACHE_LIMIT {
            self.cached_glyphs.pop_lru();
        }
    }
}

//====================================================================

pub struct TextPainter {
    font_system: FontSystem,
    swash_cache: SwashCache,
    glyphs: GlyphCache,
}

impl Default for TextPainter {
    fn default() -> Self {
        Self::new()
    }
}

impl TextPainter {
    pub fn new() -> Self {
        log::debug!("Loading font system");

        Self {
            font_system: FontSystem::new(),
            swash_cache: SwashCache::new(),
            glyphs: GlyphCache::new(),
        }
    }

    fn layout(&mut self, text: &str, style: &TextStyle) -> Buffer {
        let mut buffer = Buffer::new(&mut self.font_system, style.metrics());
        buffer.set_wrap(&mut self.font_system, Wrap::None);
        buffer.set_size(&mut self.font_system, None, None);
        buffer.set_text(&mut self.font_system, text, Attrs::new(), Shaping::Advanced);
        buffer.shape_until_scroll(&mut self.font_system, false);

        buffer
    }

    /// Width of the widest line and the total height of all lines.
    pub fn measure(&mut self, text: &str, style: &TextStyle) -> Size<f32> {
        let buffer = self.layout(text, style);

        buffer
            .layout_runs()
            .fold(Size::new(0., 0.), |acc, run| {
                Size::new(acc.width.max(run.line_w), acc.height + run.line_height)
            })
    }

    /// Paints `text` with its top left corner at `position`.
    pub fn draw_text(
        &mut self,
        canvas: &mut Canvas,
        text: &str,
        position: glam::Vec2,
        style: &TextStyle,
    ) {
        let buffer = self.layout(text, style);

        buffer.layout_runs().for_each(|run| {
            run.glyphs.iter().for_each(|glyph| {
                let physical = glyph.physical((position.x, position.y + run.line_y), 1.);

                let color = match glyph.color_opt {
                    Some(color) => Color::rgba(color.r(), color.g(), color.b(), color.a()),
                    None => style.color,
                };

                match self.glyphs.use_glyph(
                    &mut self.font_system,
                    &mut self.swash_cache,
                    physical.cache_key,
                ) {
                    Ok(image) => blit_glyph(canvas, image, physical.x, physical.y, color),
                    Err(e) => log::trace!("Skipping glyph {:?}: {}", physical.cache_key, e),
                }
            })
        });

        self.glyphs.trim();
    }
}

//====================================================================

fn blit_glyph(canvas: &mut Canvas, image: &SwashImage, x: i32, y: i32, color: Color) {
    let width = image.placement.width as usize;
    if width == 0 {
        return;
    }

    let origin_x = x + image.placement.left;
    let origin_y = y - image.placement.top;

    let position = |index: usize| {
        (
            origin_x + (index % width) as i32,
            origin_y + (index / width) as i32,
        )
    };

    match image.content {
        SwashContent::Mask => image
            .data
            .iter()
            .enumerate()
            .for_each(|(index, coverage)| {
                let (px, py) = position(index);
                canvas.blend_pixel(px, py, color, *coverage);
            }),

        SwashContent::SubpixelMask => {
            image
                .data
                .chunks_exact(4)
                .enumerate()
                .for_each(|(index, rgba)| {
                    let coverage = ((rgba[0] as u32 + rgba[1] as u32 + rgba[2] as u32) / 3) as u8;
                    let (px, py) = position(index);
                    canvas.blend_pixel(px, py, color, coverage);
                })
        }

        // Emoji and other color glyphs carry their own color
        SwashContent::Color => image
            .data
            .chunks_exact(4)
            .enumerate()
            .for_each(|(index, rgba)| {
                let (px, py) = position(index);
                canvas.blend_pixel(px, py, Color::rgb(rgba[0], rgba[1], rgba[2]), rgba[3]);
            }),
    }
}

//====================================================================

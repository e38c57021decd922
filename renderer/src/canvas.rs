//====================================================================

use common::{Color, Rect, Size};
use image::{Rgba, RgbaImage};

//====================================================================

/// CPU side drawing surface. Everything the client shows is painted into a
/// canvas first and then handed to the renderer as a single texture.
#[derive(Clone, Debug)]
pub struct Canvas {
    image: RgbaImage,
}

impl Canvas {
    pub fn new(size: Size<u32>, background: Color) -> Self {
        Self {
            image: RgbaImage::from_pixel(size.width, size.height, Rgba(background.to_array())),
        }
    }

    #[inline]
    pub fn size(&self) -> Size<u32> {
        Size::new(self.image.width(), self.image.height())
    }

    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        self.image
            .get_pixel_checked(x, y)
            .map(|&Rgba([r, g, b, a])| Color::rgba(r, g, b, a))
    }

    /// Raw RGBA8 rows, tightly packed.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        self.image.as_raw()
    }

    pub fn fill_rect(&mut self, rect: Rect, color: Color) {
        let size = self.size();

        let x_start = rect.x.max(0.).round() as u32;
        let y_start = rect.y.max(0.).round() as u32;
        let x_end = ((rect.x + rect.width).round().max(0.) as u32).min(size.width);
        let y_end = ((rect.y + rect.height).round().max(0.) as u32).min(size.height);

        (y_start..y_end).for_each(|y| {
            (x_start..x_end).for_each(|x| self.blend_pixel(x as i32, y as i32, color, u8::MAX));
        });
    }

    /// Blends `color` over the pixel at (x, y). `coverage` scales the color's
    /// own alpha. Out of bounds coordinates are ignored.
    pub fn blend_pixel(&mut self, x: i32, y: i32, color: Color, coverage: u8) {
        if x < 0 || y < 0 {
            return;
        }

        let Some(pixel) = self.image.get_pixel_mut_checked(x as u32, y as u32) else {
            return;
        };

        let alpha = color.a as u32 * coverage as u32 / 255;
        if alpha == 0 {
            return;
        }

        let inverse = 255 - alpha;
        let src = color.to_array();

        (0..3).for_each(|channel| {
            pixel.0[channel] =
                ((src[channel] as u32 * alpha + pixel.0[channel] as u32 * inverse) / 255) as u8;
        });
        pixel.0[3] = (alpha + pixel.0[3] as u32 * inverse / 255).min(255) as u8;
    }

    /// Copies `source` into this canvas with its top left corner at (x, y),
    /// clipping whatever falls outside.
    pub fn blit(&mut self, source: &Canvas, x: u32, y: u32) {
        image::imageops::replace(&mut self.image, &source.image, x as i64, y as i64);
    }
}

//====================================================================


//====================================================================

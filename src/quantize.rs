//! Palette derivation and pixel remapping
//!
//! The palette is computed exactly once, from the first frame of a job, and
//! stays fixed for every frame after that. Pixels are posterized to a reduced
//! color format before any palette work, so the quantizer only ever sees
//! colors representable in that format.

use crate::error::GifResult;
use crate::Settings;
use rgb::RGBA8;

/// Reduced color format applied before quantization.
///
/// The `Rgb*` formats discard alpha entirely; `Rgba4444` keeps it,
/// optionally collapsed to 1 bit by [`Settings::one_bit_alpha`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum PixelFormat {
    /// 4 bits per channel, including alpha
    #[default]
    Rgba4444,
    /// 4 bits per color channel, opaque
    Rgb444,
    /// 5-6-5 bits, opaque
    Rgb565,
}

#[inline]
fn posterize4(v: u8) -> u8 {
    (v & 0xF0) | (v >> 4)
}

#[inline]
fn posterize5(v: u8) -> u8 {
    (v & 0xF8) | (v >> 5)
}

#[inline]
fn posterize6(v: u8) -> u8 {
    (v & 0xFC) | (v >> 6)
}

/// Reduces every pixel to the chosen format, in place.
///
/// With `one_bit_alpha`, translucency collapses to a 128 threshold and fully
/// transparent pixels have their color zeroed so they all land on the same
/// reserved palette entry.
pub fn reduce_pixels(pixels: &mut [RGBA8], format: PixelFormat, one_bit_alpha: bool) {
    for px in pixels {
        *px = match format {
            PixelFormat::Rgba4444 => {
                let a = if one_bit_alpha {
                    if px.a < 128 { 0 } else { 255 }
                } else {
                    posterize4(px.a)
                };
                if a == 0 {
                    RGBA8::new(0, 0, 0, 0)
                } else {
                    RGBA8::new(posterize4(px.r), posterize4(px.g), posterize4(px.b), a)
                }
            },
            PixelFormat::Rgb444 => RGBA8::new(posterize4(px.r), posterize4(px.g), posterize4(px.b), 255),
            PixelFormat::Rgb565 => RGBA8::new(posterize5(px.r), posterize6(px.g), posterize5(px.b), 255),
        };
    }
}

/// A fixed ≤256-entry palette shared by every frame of one job.
///
/// Constructing it runs the quantizer over frame 0; [`Palette::remap`] then
/// maps any later frame onto the same entries. Dithering is disabled so a
/// given pixel value always maps to the same index.
pub struct Palette {
    liq: imagequant::Attributes,
    result: imagequant::QuantizationResult,
    colors: Vec<RGBA8>,
    transparent_index: Option<u8>,
}

impl Palette {
    /// Derives the palette from the first frame and remaps that frame,
    /// returning the palette and the frame's indexed bitmap.
    pub fn from_frame(pixels: &[RGBA8], width: usize, height: usize, settings: &Settings) -> GifResult<(Self, Vec<u8>)> {
        let mut liq = imagequant::Attributes::new();
        if settings.fast {
            liq.set_speed(10)?;
        }
        liq.set_quality(0, settings.quality)?;
        liq.set_max_colors(settings.max_colors)?;

        let mut img = liq.new_image_borrowed(pixels, width, height, 0.)?;
        if settings.one_bit_alpha {
            img.add_fixed_color(RGBA8::new(0, 0, 0, 0))?;
        }
        let mut result = liq.quantize(&mut img)?;
        result.set_dithering_level(0.)?;

        let (colors, indices) = result.remapped(&mut img)?;
        let transparent_index = colors.iter().position(|p| p.a == 0).map(|i| i as u8);
        log::debug!("palette fixed: {} colors, transparent entry {:?}", colors.len(), transparent_index);

        Ok((Self { liq, result, colors, transparent_index }, indices))
    }

    /// Maps a frame's pixels to the nearest palette entries.
    pub fn remap(&mut self, pixels: &[RGBA8], width: usize, height: usize) -> GifResult<Vec<u8>> {
        let mut img = self.liq.new_image_borrowed(pixels, width, height, 0.)?;
        let (_, indices) = self.result.remapped(&mut img)?;
        Ok(indices)
    }

    pub fn colors(&self) -> &[RGBA8] {
        &self.colors
    }

    pub fn transparent_index(&self) -> Option<u8> {
        self.transparent_index
    }

    /// Global color table for the GIF header: RGB triplets padded to a
    /// power-of-two entry count as the format requires.
    pub(crate) fn global_color_table(&self) -> Vec<u8> {
        let mut table: Vec<u8> = self.colors.iter().flat_map(|c| [c.r, c.g, c.b]).collect();
        let needed_size = 3 * self.colors.len().max(2).next_power_of_two();
        table.resize(needed_size, 0);
        table
    }
}

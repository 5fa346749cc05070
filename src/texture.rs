//! Texture compositing: mask tinting, overlay merging and tint slot counting.
//!
//! The free functions work on raw pixel slices and expect every slice passed
//! together to have the same length. They index the companion slices with the
//! base slice's indices, so a shorter companion panics and a longer one is
//! partly ignored. [`Texture`] wraps the same operations with size checks.
use crate::error::{Error, Result};
use image::{Rgba, RgbaImage};

/// An RGBA color with channels nominally in `[0, 1]`. Nothing clamps them.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const CLEAR: Color = Color::new(0.0, 0.0, 0.0, 0.0);
    pub const WHITE: Color = Color::new(1.0, 1.0, 1.0, 1.0);

    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Color {
        Color { r, g, b, a }
    }

    /// An opaque color.
    pub const fn rgb(r: f32, g: f32, b: f32) -> Color {
        Color { r, g, b, a: 1.0 }
    }

    pub fn into_array(self) -> [u8; 4] {
        let to_u8 = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        [to_u8(self.r), to_u8(self.g), to_u8(self.b), to_u8(self.a)]
    }

    pub fn from_array(rgba: &[u8]) -> Color {
        Color {
            r: rgba[0] as f32 / 255.0,
            g: rgba[1] as f32 / 255.0,
            b: rgba[2] as f32 / 255.0,
            a: rgba[3] as f32 / 255.0,
        }
    }

    /// Parses `#rrggbb` or `#rrggbbaa`, the leading `#` being optional.
    pub fn from_hex(color: &str) -> Result<Color> {
        let mut rgba: [u8; 4] = [0, 0, 0, 255];
        let mut hex = color.strip_prefix('#').unwrap_or(color).to_owned();
        if hex.len() == 6 {
            hex += "ff";
        }
        if hex::decode_to_slice(&hex, &mut rgba).is_err() {
            return Err(Error::InvalidHexColor(color.to_owned()));
        }
        Ok(Color::from_array(&rgba))
    }

    /// Uppercase `RRGGBB`, alpha dropped.
    pub fn to_html_rgb(&self) -> String {
        hex::encode_upper(&self.into_array()[..3])
    }
}

/// The tint slot a mask pixel selects and the intensity of the channel that selected it.
/// Red beats green beats blue, and a slot only counts if `tint_count` covers it.
fn tint_slot(mask: &Color, tint_count: usize) -> Option<(usize, f32)> {
    let visible = mask.a > 0.0;
    if !visible {
        return None;
    }
    if tint_count > 0 && mask.r > 0.0 {
        Some((0, mask.r))
    } else if tint_count > 1 && mask.g > 0.0 {
        Some((1, mask.g))
    } else if tint_count > 2 && mask.b > 0.0 {
        Some((2, mask.b))
    } else {
        None
    }
}

/// Recolors a texture that carries its own mask: the selecting channel's
/// intensity scales the chosen tint, which replaces the pixel's RGB.
pub fn tint_texture<'a>(texture: &'a mut [Color], tints: &[Color]) -> &'a mut [Color] {
    for pixel in texture.iter_mut() {
        if let Some((slot, intensity)) = tint_slot(pixel, tints.len()) {
            let tint = &tints[slot];
            pixel.r = intensity * tint.r;
            pixel.g = intensity * tint.g;
            pixel.b = intensity * tint.b;
        }
    }
    texture
}

/// Multiplies the base RGB by the tint that `mask` selects for each pixel.
///
/// # Panics
///
/// If `mask` is shorter than `base`.
pub fn tint_texture_from_mask<'a>(
    base: &'a mut [Color],
    tints: &[Color],
    mask: &[Color],
) -> &'a mut [Color] {
    for (i, pixel) in base.iter_mut().enumerate() {
        if let Some((slot, _)) = tint_slot(&mask[i], tints.len()) {
            let tint = &tints[slot];
            pixel.r *= tint.r;
            pixel.g *= tint.g;
            pixel.b *= tint.b;
        }
    }
    base
}

/// Draws `overlay` over `base`. Opaque overlay pixels replace the base pixel,
/// translucent ones are lerped in and their alpha is added to the base alpha,
/// which may end up above 1.
///
/// # Panics
///
/// If `overlay` is shorter than `base`.
pub fn merge_texture<'a>(base: &'a mut [Color], overlay: &[Color]) -> &'a mut [Color] {
    for (i, pixel) in base.iter_mut().enumerate() {
        let over = overlay[i];
        if over.a > 0.0 {
            if over.a >= 1.0 {
                *pixel = over;
            } else {
                pixel.r += (over.r - pixel.r) * over.a;
                pixel.g += (over.g - pixel.g) * over.a;
                pixel.b += (over.b - pixel.b) * over.a;
                pixel.a += over.a;
            }
        }
    }
    base
}

/// How many tint slots a mask uses: 0 to 3.
pub fn color_number(mask: &[Color]) -> u8 {
    let mut count = 0;
    for pixel in mask.iter().filter(|pixel| pixel.a > 0.0) {
        if count < 1 && pixel.r > 0.0 {
            count = 1;
        } else if count < 2 && pixel.g > 0.0 {
            count = 2;
        } else if pixel.b > 0.0 {
            return 3;
        }
    }
    count
}

/// Owned pixel buffer, row-major, top row first.
#[derive(Clone, Debug, PartialEq)]
pub struct Texture {
    width: u32,
    height: u32,
    pixels: Vec<Color>,
}

impl Texture {
    /// A fully transparent texture.
    pub fn new(width: u32, height: u32) -> Texture {
        Texture {
            width,
            height,
            pixels: vec![Color::CLEAR; width as usize * height as usize],
        }
    }

    pub fn from_pixels(width: u32, height: u32, pixels: Vec<Color>) -> Result<Texture> {
        if pixels.len() != width as usize * height as usize {
            return Err(Error::PixelCount {
                width,
                height,
                len: pixels.len(),
            });
        }
        Ok(Texture {
            width,
            height,
            pixels,
        })
    }

    pub fn from_image(image: &RgbaImage) -> Texture {
        Texture {
            width: image.width(),
            height: image.height(),
            pixels: image.pixels().map(|px| Color::from_array(&px.0)).collect(),
        }
    }

    pub fn to_image(&self) -> RgbaImage {
        let width = self.width as usize;
        RgbaImage::from_fn(self.width, self.height, |x, y| {
            Rgba(self.pixels[y as usize * width + x as usize].into_array())
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }

    pub fn pixels_mut(&mut self) -> &mut [Color] {
        &mut self.pixels
    }

    pub fn into_pixels(self) -> Vec<Color> {
        self.pixels
    }

    fn check_size(&self, other: &Texture) -> Result<()> {
        if self.width != other.width || self.height != other.height {
            return Err(Error::SizeMismatch {
                width: self.width,
                height: self.height,
                found_width: other.width,
                found_height: other.height,
            });
        }
        Ok(())
    }

    pub fn tint(&mut self, tints: &[Color]) -> &mut Texture {
        tint_texture(&mut self.pixels, tints);
        self
    }

    pub fn tint_from_mask(&mut self, tints: &[Color], mask: &Texture) -> Result<&mut Texture> {
        self.check_size(mask)?;
        tint_texture_from_mask(&mut self.pixels, tints, &mask.pixels);
        Ok(self)
    }

    pub fn merge(&mut self, overlay: &Texture) -> Result<&mut Texture> {
        self.check_size(overlay)?;
        merge_texture(&mut self.pixels, &overlay.pixels);
        Ok(self)
    }

    pub fn color_number(&self) -> u8 {
        color_number(&self.pixels)
    }
}

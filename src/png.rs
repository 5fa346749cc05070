//! PNG encoding and decoding of textures.
use crate::{error::Result, texture::Texture};
use ::png::{BitDepth, ColorType, Encoder};
use image::ImageFormat;
use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

fn write_png<W: Write>(writer: W, texture: &Texture) -> Result<()> {
    let mut encoder = Encoder::new(writer, texture.width(), texture.height());
    encoder.set_color(ColorType::Rgba);
    encoder.set_depth(BitDepth::Eight);
    let mut writer = encoder.write_header()?;
    writer.write_image_data(texture.to_image().as_raw())?;
    writer.finish()?;
    Ok(())
}

/// Encodes a texture as an 8-bit RGBA PNG.
pub fn encode(texture: &Texture) -> Result<Vec<u8>> {
    let mut bytes = Vec::new();
    write_png(&mut bytes, texture)?;
    Ok(bytes)
}

/// Decodes a PNG of any color type into a texture.
pub fn decode(bytes: &[u8]) -> Result<Texture> {
    let image = image::load_from_memory_with_format(bytes, ImageFormat::Png)?;
    Ok(Texture::from_image(&image.to_rgba8()))
}

/// Writes `texture` to `{path}.png`, creating missing parent directories.
pub fn save(texture: &Texture, path: &str) -> Result<()> {
    let path = format!("{path}.png");
    let path = Path::new(&path);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let mut writer = BufWriter::new(File::create(path)?);
    write_png(&mut writer, texture)?;
    writer.flush()?;
    Ok(())
}

/// Reads the texture stored at `{path}.png`.
pub fn load(path: &str) -> Result<Texture> {
    let bytes = std::fs::read(format!("{path}.png"))?;
    decode(&bytes)
}

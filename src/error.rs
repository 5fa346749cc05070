use std::{io, result};
use thiserror::Error;

pub type Result<T> = result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Position {0} is outside of the grid.")]
    OutOfBounds(String),
    #[error("Invalid grid dimensions {width}x{height}x{depth}.")]
    InvalidDimensions {
        width: usize,
        height: usize,
        depth: usize,
    },
    #[error(transparent)]
    Io(#[from] io::Error),
    #[cfg(feature = "texture")]
    #[error("Invalid hex color {0}.")]
    InvalidHexColor(String),
    #[cfg(feature = "texture")]
    #[error("Pixel count {len} does not match a {width}x{height} texture.")]
    PixelCount { width: u32, height: u32, len: usize },
    #[cfg(feature = "texture")]
    #[error("Texture size {found_width}x{found_height} does not match {width}x{height}.")]
    SizeMismatch {
        width: u32,
        height: u32,
        found_width: u32,
        found_height: u32,
    },
    #[cfg(feature = "texture")]
    #[error(transparent)]
    Image(#[from] image::ImageError),
    #[cfg(feature = "png")]
    #[error(transparent)]
    PngEncoding(#[from] ::png::EncodingError),
    #[cfg(feature = "http")]
    #[error(transparent)]
    Request(#[from] Box<ureq::Error>),
    #[cfg(feature = "http")]
    #[error("HTTP response too big")]
    HttpTooBig,
    #[cfg(feature = "mail")]
    #[error(transparent)]
    MailAddress(#[from] lettre::address::AddressError),
    #[cfg(feature = "mail")]
    #[error(transparent)]
    MailContentType(#[from] lettre::message::header::ContentTypeErr),
    #[cfg(feature = "mail")]
    #[error(transparent)]
    MailBuild(#[from] lettre::error::Error),
    #[cfg(feature = "mail")]
    #[error(transparent)]
    Smtp(#[from] lettre::transport::smtp::Error),
}

impl From<Error> for String {
    fn from(error: Error) -> String {
        error.to_string()
    }
}

pub mod error;

pub use error::{Error, Result};

#[cfg(feature = "grid")]
pub mod grid;
#[cfg(feature = "http")]
pub mod http;
#[cfg(feature = "jobs")]
pub mod jobs;
#[cfg(feature = "mail")]
pub mod mail;
#[cfg(feature = "png")]
pub mod png;
#[cfg(feature = "texture")]
pub mod texture;
#[cfg(feature = "time")]
pub mod time;
#[cfg(feature = "util")]
pub mod util;

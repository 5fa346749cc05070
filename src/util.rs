//! Small extension helpers.
use crate::texture::Color;
use std::{
    any::Any,
    fmt::Display,
    panic::{self, UnwindSafe},
};

pub trait DistanceTo {
    type Output;

    /// Absolute difference between `self` and `other`.
    fn distance_to(self, other: Self) -> Self::Output;
}

macro_rules! impl_distance_to_float {
    ($($t:ty),*) => {
        $(
            impl DistanceTo for $t {
                type Output = $t;

                fn distance_to(self, other: $t) -> $t {
                    (other - self).abs()
                }
            }
        )*
    };
}

// Integer distances are unsigned, `i32::MIN.distance_to(i32::MAX)` is `u32::MAX`.
macro_rules! impl_distance_to_int {
    ($($t:ty => $out:ty),*) => {
        $(
            impl DistanceTo for $t {
                type Output = $out;

                fn distance_to(self, other: $t) -> $out {
                    self.abs_diff(other)
                }
            }
        )*
    };
}

impl_distance_to_float!(f32, f64);
impl_distance_to_int!(i32 => u32, i64 => u64);

/// Wraps `text` in a `<#RRGGBB>...</color>` rich text tag.
pub fn colorize<T: Display + ?Sized>(text: &T, color: &Color) -> String {
    format!("<#{}>{text}</color>", color.to_html_rgb())
}

pub trait Colorize {
    fn colorize(&self, color: &Color) -> String;
}

impl<T: Display + ?Sized> Colorize for T {
    fn colorize(&self, color: &Color) -> String {
        colorize(self, color)
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message
    } else {
        "unknown panic"
    }
}

/// Runs `action`, turning a panic into `None`.
pub fn ignore_panic<T, F>(action: F) -> Option<T>
where
    F: FnOnce() -> T + UnwindSafe,
{
    match panic::catch_unwind(action) {
        Ok(value) => Some(value),
        Err(payload) => {
            log::warn!("ignored panic: {}", panic_message(payload.as_ref()));
            None
        }
    }
}

/// Runs `action`, falling back to `fallback` if it panics.
pub fn ignore_panic_or<T, F, G>(action: F, fallback: G) -> T
where
    F: FnOnce() -> T + UnwindSafe,
    G: FnOnce() -> T,
{
    ignore_panic(action).unwrap_or_else(fallback)
}

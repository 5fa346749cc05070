#![cfg(feature = "util")]
use essentials::{
    texture::Color,
    util::{colorize, ignore_panic, ignore_panic_or, Colorize, DistanceTo},
};

#[test]
fn distance_is_symmetric() {
    assert_eq!(3_i32.distance_to(-4), 7);
    assert_eq!((-4_i32).distance_to(3), 7);
    assert_eq!(10_i64.distance_to(10), 0);
    assert_eq!(3_i32.distance_to(-4), (-4_i32).distance_to(3));
    assert_eq!(1.5_f32.distance_to(-1.0), 2.5);
    assert_eq!((-1.0_f64).distance_to(1.5), 2.5);
}

#[test]
fn integer_distance_does_not_overflow() {
    assert_eq!(i32::MAX.distance_to(-1), 2_147_483_648_u32);
    assert_eq!(i32::MIN.distance_to(i32::MAX), u32::MAX);
    assert_eq!(i64::MIN.distance_to(i64::MAX), u64::MAX);
    assert_eq!(i64::MAX.distance_to(i64::MIN), u64::MAX);
}

#[test]
fn colorize_wraps_in_rich_text_tag() {
    let orange = Color::from_hex("#ff8000").unwrap();
    assert_eq!(colorize("gold", &orange), "<#FF8000>gold</color>");
    assert_eq!("gold".colorize(&orange), "<#FF8000>gold</color>");
    assert_eq!(String::from("hp").colorize(&Color::WHITE), "<#FFFFFF>hp</color>");
    assert_eq!(12_i32.colorize(&Color::rgb(0.0, 0.0, 0.0)), "<#000000>12</color>");
    assert_eq!(0.5_f32.colorize(&Color::rgb(1.0, 0.0, 0.0)), "<#FF0000>0.5</color>");
}

#[test]
fn ignore_panic_swallows_panics() {
    let _ = env_logger::builder().is_test(true).try_init();
    assert_eq!(ignore_panic(|| 4), Some(4));
    assert_eq!(ignore_panic(|| -> i32 { panic!("nope") }), None);
    assert_eq!(ignore_panic_or(|| -> i32 { panic!("nope") }, || -1), -1);
    assert_eq!(ignore_panic_or(|| 2, || -1), 2);
}

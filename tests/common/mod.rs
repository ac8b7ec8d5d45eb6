//! Helpers shared by the integration tests.

// Not every test target uses every helper.
#![allow(dead_code)]

use ndpix::{rgb_channels, Color, Image};

/// A checkerboard whose pixels alternate between full white and full
/// black in storage order, starting white at (0, 0).
pub fn make_checkerboard(width: usize, height: usize) -> Image<f32> {
    let mut img = Image::new_sized(width, height, rgb_channels());
    for (i, pixel) in img.data_mut().chunks_exact_mut(3).enumerate() {
        if i % 2 == 0 {
            pixel.fill(1.0);
        }
    }
    img
}

/// A three-channel grey color.
pub fn grey(v: f32) -> Color<f32> {
    Color::filled([3], v)
}

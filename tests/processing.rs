//! Integration tests for the processing algorithms: blur, noise,
//! statistics and compositing.

mod common;

use approx::assert_relative_eq;
use common::{grey, make_checkerboard};
use ndpix::{
    fast_gaussian, gaussian_noise, histogram, magic_mist, matmul, merge, rgb_channels,
    salt_and_pepper, uniform_noise, Bilinear, Image, NdVec, NearestNeighbor, Transform2d,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

#[test]
fn blur_preserves_geometry_and_spreads_energy() {
    let board = make_checkerboard(8, 8);
    let blurred = fast_gaussian(&board, 1.5, 3);

    assert_eq!(blurred.width(), 8);
    assert_eq!(blurred.height(), 8);
    assert_eq!(blurred.channel_semantics(), board.channel_semantics());

    // The hard black/white contrast is gone.
    let (mut min, mut max) = (f32::MAX, f32::MIN);
    for &s in blurred.data() {
        min = min.min(s);
        max = max.max(s);
    }
    assert!(min > 0.0);
    assert!(max < 1.0);
    assert!(max - min < 0.5);
}

#[test]
fn blur_keeps_a_uniform_image_uniform() {
    let img: Image<f32> = Image::filled(6, 6, rgb_channels(), 0.25);
    let blurred = fast_gaussian(&img, 1.5, 3);
    let first = blurred.get(0, 0, 0);
    for &s in blurred.data() {
        assert_relative_eq!(s, first, epsilon = 1e-5);
    }
}

#[test]
fn mist_brightens_without_darkening() {
    let board = make_checkerboard(8, 8);
    let misted = magic_mist(&board, 1.0, 1.0, 0.5, 3);

    assert_eq!(misted.width(), 8);
    assert_eq!(misted.height(), 8);
    assert_eq!(misted.channel_semantics(), board.channel_semantics());

    // Glow only adds light: every sample gains or keeps its value,
    // and the black pixels next to white ones pick up a halo.
    for (&after, &before) in misted.data().iter().zip(board.data()) {
        assert!(after >= before);
    }
    assert!(misted
        .data()
        .iter()
        .zip(board.data())
        .any(|(&after, &before)| after > before));
}

#[test]
fn noise_is_reproducible_and_bounded() {
    let mut a: Image<f32> = Image::filled(8, 8, rgb_channels(), 0.5);
    let mut b = a.clone();

    uniform_noise(&mut a, -0.1, 0.1, &mut StdRng::seed_from_u64(99)).unwrap();
    uniform_noise(&mut b, -0.1, 0.1, &mut StdRng::seed_from_u64(99)).unwrap();
    assert_eq!(a, b);
    assert!(a.data().iter().all(|&v| (0.4..=0.6).contains(&v)));

    let mut c: Image<f32> = Image::filled(8, 8, rgb_channels(), 0.5);
    salt_and_pepper(&mut c, 1.0, &mut StdRng::seed_from_u64(4));
    assert!(c.data().iter().all(|&v| v == 0.0 || v == 1.0));

    let mut d: Image<f32> = Image::filled(4, 4, rgb_channels(), 0.5);
    assert!(gaussian_noise(&mut d, 0.0, -0.5, &mut StdRng::seed_from_u64(0)).is_err());
    assert!(gaussian_noise(&mut d, 0.0, 0.1, &mut StdRng::seed_from_u64(0)).is_ok());
}

#[test]
fn histogram_impulses() {
    let black: Image<f32> = Image::new_sized(10, 10, vec![String::from("A")]);
    let hist = histogram(&black, 42);
    assert_eq!(hist.len(), 1);
    assert_eq!(hist[0].len(), 42);
    assert_eq!(hist[0][0], 100);

    let white: Image<u16> = Image::filled(10, 42, vec![String::from("A")], u16::MAX);
    let hist = histogram(&white, 47);
    assert_eq!(hist[0][46], 420);
    assert_eq!(hist[0].iter().sum::<usize>(), 420);
}

#[test]
fn transform_composition_and_getters() {
    let tx = Transform2d::new().translate(2.0, 5.0).rotate(42.0).scale(2.0, 1.0);
    assert_eq!(tx.translation(), (2.0, 5.0));
    assert_relative_eq!(tx.rotation(), 42.0, epsilon = 1e-4);
    let (sx, sy) = tx.scaling();
    assert_relative_eq!(sx, 2.0, epsilon = 1e-5);
    assert_relative_eq!(sy, 1.0, epsilon = 1e-5);

    let inv = tx.inverse().unwrap();
    let (x, y) = tx.apply(3.0, -1.0);
    let (rx, ry) = inv.apply(x, y);
    assert_relative_eq!(rx, 3.0, epsilon = 1e-3);
    assert_relative_eq!(ry, -1.0, epsilon = 1e-3);
}

#[test]
fn matmul_through_the_public_surface() {
    let a = NdVec::from_vec(vec![1.0f32, 3.0, 2.0, 4.0], [2, 2]).unwrap();
    let identity = NdVec::from_vec(vec![1.0f32, 0.0, 0.0, 1.0], [2, 2]).unwrap();
    assert_eq!(matmul(&a.span(), &identity.span()).unwrap(), a);

    let bad: NdVec<f32, 2> = NdVec::new([3, 3]);
    assert!(matmul(&a.span(), &bad.span()).is_err());
}

#[test]
fn merge_with_translation() {
    let mut a: Image<f32> = Image::new_sized(50, 50, rgb_channels());
    let b: Image<f32> = Image::filled(50, 50, rgb_channels(), 1.0);

    let tx = Transform2d::new().translate(10.0, 20.0);
    merge::<f32, Bilinear>(&mut a, &b, &tx).unwrap();

    assert_eq!(a.pixel(0, 0), grey(0.0).span());
    assert_eq!(a.pixel(9, 19), grey(0.0).span());
    assert_eq!(a.pixel(10, 20), grey(1.0).span());
    assert_eq!(a.pixel(49, 49), grey(1.0).span());
}

#[test]
fn merge_with_scale() {
    let mut a: Image<f32> = Image::new_sized(50, 50, rgb_channels());
    let b: Image<f32> = Image::filled(50, 50, rgb_channels(), 1.0);

    let tx = Transform2d::new().scale(2.0, 0.5);
    merge::<f32, Bilinear>(&mut a, &b, &tx).unwrap();

    // x stretches to twice the source width, y squeezes to half the
    // height.
    assert_eq!(a.pixel(0, 0), grey(1.0).span());
    assert_eq!(a.pixel(1, 0), grey(1.0).span());
    assert_eq!(a.pixel(49, 0), grey(1.0).span());
    assert_eq!(a.pixel(0, 25), grey(0.0).span());
    assert_eq!(a.pixel(49, 25), grey(0.0).span());
    assert_eq!(a.pixel(49, 49), grey(0.0).span());
}

#[test]
fn merge_samples_through_the_interpolator() {
    // A 2x1 source scaled up 4x: nearest neighbor produces hard
    // blocks, bilinear a ramp.
    let board = make_checkerboard(2, 1);
    let tx = Transform2d::new().scale(4.0, 1.0);

    let mut hard: Image<f32> = Image::new_sized(8, 1, rgb_channels());
    merge::<f32, NearestNeighbor>(&mut hard, &board, &tx).unwrap();
    assert_eq!(hard.pixel(0, 0), grey(1.0).span());
    assert_eq!(hard.pixel(3, 0), grey(1.0).span());
    assert_eq!(hard.pixel(4, 0), grey(0.0).span());

    let mut soft: Image<f32> = Image::new_sized(8, 1, rgb_channels());
    merge::<f32, Bilinear>(&mut soft, &board, &tx).unwrap();
    assert_relative_eq!(soft.get(1, 0, 0), 0.75, epsilon = 1e-6);
    assert_relative_eq!(soft.get(2, 0, 0), 0.5, epsilon = 1e-6);
    assert_relative_eq!(soft.get(3, 0, 0), 0.25, epsilon = 1e-6);
}

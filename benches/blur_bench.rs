use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use ndpix::{fast_gaussian, histogram, merge, rgb_channels, Bilinear, Image, Transform2d};
use rand::{rngs::StdRng, Rng, SeedableRng};

fn random_image(width: usize, height: usize, seed: u64) -> Image<f32> {
    let mut rng = StdRng::seed_from_u64(seed);
    let data: Vec<f32> = (0..width * height * 3).map(|_| rng.gen::<f32>()).collect();
    match Image::from_vec(data, width, height, rgb_channels()) {
        Ok(img) => img,
        Err(err) => panic!("image construction failed: {err}"),
    }
}

fn bench_fast_gaussian(c: &mut Criterion) {
    let mut group = c.benchmark_group("fast_gaussian");
    for size in [64usize, 256, 512] {
        let pixels = size * size;
        group.throughput(Throughput::Elements(pixels as u64));

        let img = random_image(size, size, 42);
        group.bench_with_input(BenchmarkId::new("sigma_3", size), &size, |b, _| {
            b.iter(|| fast_gaussian(&img, 3.0, 3));
        });
    }
    group.finish();
}

fn bench_histogram(c: &mut Criterion) {
    let mut group = c.benchmark_group("histogram");
    for size in [256usize, 1024] {
        let pixels = size * size;
        group.throughput(Throughput::Elements(pixels as u64));

        let img = random_image(size, size, 7);
        group.bench_with_input(BenchmarkId::new("buckets_256", size), &size, |b, _| {
            b.iter(|| histogram(&img, 256));
        });
    }
    group.finish();
}

fn bench_merge(c: &mut Criterion) {
    let mut group = c.benchmark_group("merge");
    for size in [128usize, 512] {
        let pixels = size * size;
        group.throughput(Throughput::Elements(pixels as u64));

        let src = random_image(size, size, 11);
        let tx = Transform2d::new().rotate(42.0).scale(1.2, 0.8);
        group.bench_with_input(BenchmarkId::new("bilinear", size), &size, |b, _| {
            b.iter(|| {
                let mut dst: Image<f32> = Image::new_sized(size, size, rgb_channels());
                if let Err(err) = merge::<f32, Bilinear>(&mut dst, &src, &tx) {
                    panic!("merge failed: {err}");
                }
                dst
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_fast_gaussian, bench_histogram, bench_merge);
criterion_main!(benches);

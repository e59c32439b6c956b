//! Benchmarks for the AGCWD pipeline stages.
//!
//! Run with: cargo bench -p agcwd-core

use agcwd_core::analysis::histogram::Histogram;
use agcwd_core::transform::remap::remap;
use agcwd_core::{AgcwdParams, GammaLut, PixelGrid, PixelLayout, ValueChannel, enhance_with};
use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

/// Synthetic BGR scene with a diagonal brightness ramp.
fn generate_scene(width: u32, height: u32) -> PixelGrid {
    let mut data = Vec::with_capacity((width * height * 3) as usize);
    for y in 0..height {
        for x in 0..width {
            let v = ((x + y) * 255 / (width + height)) as u8;
            data.extend_from_slice(&[v / 2, v, v.saturating_add(20)]);
        }
    }
    PixelGrid::color(width, height, PixelLayout::Bgr, data).expect("scene dimensions")
}

fn bench_enhance(c: &mut Criterion) {
    let mut group = c.benchmark_group("enhance");
    let params = AgcwdParams::default();

    for size in [256u32, 512, 1024, 2048] {
        let image = generate_scene(size, size);
        group.throughput(Throughput::Elements(image.pixel_count() as u64));
        let id = BenchmarkId::new("bgr", format!("{size}x{size}"));
        group.bench_with_input(id, &image, |b, img| {
            b.iter(|| enhance_with(black_box(img), black_box(&params)));
        });
    }

    group.finish();
}

fn bench_stages(c: &mut Criterion) {
    let mut group = c.benchmark_group("stages");
    let size = 1024u32;
    let data = (0..size * size).map(|i| (i % 251) as u8).collect();
    let channel = ValueChannel::new(size, size, data).expect("channel dimensions");
    let threshold = AgcwdParams::default().parallel_threshold;
    group.throughput(Throughput::Elements(channel.pixel_count() as u64));

    group.bench_function("histogram", |b| {
        b.iter(|| Histogram::from_samples(black_box(channel.data()), threshold));
    });

    let lut = GammaLut::identity();
    group.bench_function("remap", |b| {
        b.iter(|| remap(black_box(&channel), black_box(&lut), threshold));
    });

    group.finish();
}

criterion_group!(benches, bench_enhance, bench_stages);
criterion_main!(benches);

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use vulkan_tex_format::{compute_pitch, CpFlags, Format};

fn criterion_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("compute_pitch");

    group.bench_function("bc1_4096", |b| {
        b.iter(|| {
            compute_pitch(
                black_box(Format::BC1_RGB_UNORM_BLOCK),
                black_box(4096),
                black_box(4096),
                CpFlags::empty(),
            )
        })
    });

    group.bench_function("rgba8_dword_aligned", |b| {
        b.iter(|| {
            compute_pitch(
                black_box(Format::R8G8B8A8_UNORM),
                black_box(4096),
                black_box(4096),
                CpFlags::LEGACY_DWORD,
            )
        })
    });

    group.finish();
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::hint::black_box;

use farol::{ansi, encoding, simd};

/// Generate terminal output corpora with different escape densities.
fn generate_corpora() -> Vec<(&'static str, Vec<u8>)> {
    let mut plain = Vec::new();
    while plain.len() < 64 * 1024 {
        plain.extend_from_slice(b"drwxr-xr-x  2 user group 4096 Jan  1 12:00 target\r\n");
    }

    let mut colored = Vec::new();
    while colored.len() < 64 * 1024 {
        colored.extend_from_slice(b"\x1b[1;34msrc\x1b[0m \x1b[32mCargo.toml\x1b[0m README.md\r\n");
    }

    let mut unicode = Vec::new();
    while unicode.len() < 64 * 1024 {
        unicode.extend_from_slice("caf\u{e9} na\u{ef}ve \u{4e2d}\u{6587} \u{1F980}\r\n".as_bytes());
    }

    vec![("plain_ascii", plain), ("escape_heavy", colored), ("utf8_heavy", unicode)]
}

fn bench_find_byte(c: &mut Criterion) {
    let mut group = c.benchmark_group("find_byte");
    for (name, data) in generate_corpora() {
        group.throughput(Throughput::Bytes(data.len() as u64));
        group.bench_with_input(BenchmarkId::new("dispatched", name), &data, |b, data| {
            b.iter(|| black_box(simd::find_byte(black_box(data), 0x07)))
        });
        group.bench_with_input(BenchmarkId::new("scalar", name), &data, |b, data| {
            b.iter(|| black_box(simd::scalar::find_byte(black_box(data), 0x07)))
        });
    }
    group.finish();
}

fn bench_csi_scanning(c: &mut Criterion) {
    let mut group = c.benchmark_group("csi_scan");
    for (name, data) in generate_corpora() {
        group.throughput(Throughput::Bytes(data.len() as u64));
        group.bench_with_input(BenchmarkId::new("full_chunk", name), &data, |b, data| {
            b.iter(|| {
                let mut at = 0;
                let mut sequences = 0usize;
                while at < data.len() {
                    let csi = ansi::find_csi_start(&data[at..]);
                    if csi == data[at..].len() {
                        break;
                    }
                    match ansi::extract_csi_sequence(data, at + csi) {
                        Some(seq) => {
                            sequences += 1;
                            at = seq.end;
                        }
                        None => at += csi + 1,
                    }
                }
                black_box(sequences)
            })
        });
    }
    group.finish();
}

fn bench_printable_run(c: &mut Criterion) {
    let mut group = c.benchmark_group("printable_run");
    for (name, data) in generate_corpora() {
        group.throughput(Throughput::Bytes(data.len() as u64));
        group.bench_with_input(BenchmarkId::new("dispatched", name), &data, |b, data| {
            b.iter(|| {
                let mut at = 0;
                while at < data.len() {
                    at += ansi::printable_ascii_run(&data[at..]) + 1;
                }
                black_box(at)
            })
        });
    }
    group.finish();
}

fn bench_utf8_validation(c: &mut Criterion) {
    let mut group = c.benchmark_group("utf8_validate");
    for (name, data) in generate_corpora() {
        group.throughput(Throughput::Bytes(data.len() as u64));
        group.bench_with_input(BenchmarkId::new("simdutf8", name), &data, |b, data| {
            b.iter(|| black_box(encoding::validate_utf8(black_box(data))))
        });
        group.bench_with_input(BenchmarkId::new("std", name), &data, |b, data| {
            b.iter(|| black_box(std::str::from_utf8(black_box(data)).is_ok()))
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_find_byte,
    bench_csi_scanning,
    bench_printable_run,
    bench_utf8_validation
);
criterion_main!(benches);

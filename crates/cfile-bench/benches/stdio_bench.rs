//! Stdio benchmarks: block I/O, formatted output, and open/close through `CFile`.

use std::ffi::c_int;

use cfile::{AccessMode, CFile};
use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

fn bench_block_write_read(c: &mut Criterion) {
    let sizes: &[usize] = &[64, 1024, 16_384, 262_144];
    let mut group = c.benchmark_group("block_io");

    for &size in sizes {
        let data = vec![0xA5u8; size];
        let mut back = vec![0u8; size];
        group.throughput(Throughput::Bytes(size as u64));

        group.bench_with_input(BenchmarkId::new("write_items", size), &size, |b, _| {
            let mut file = CFile::tmpfile();
            b.iter(|| {
                file.rewind();
                black_box(file.write_items(&data));
            });
        });

        group.bench_with_input(BenchmarkId::new("read_items", size), &size, |b, _| {
            let mut file = CFile::tmpfile();
            file.write_items(&data);
            b.iter(|| {
                file.rewind();
                black_box(file.read_items(&mut back));
            });
        });
    }
    group.finish();
}

fn bench_char_io(c: &mut Criterion) {
    let mut group = c.benchmark_group("char_io");
    group.throughput(Throughput::Elements(1024));

    group.bench_function("fputc_1k", |b| {
        let mut file = CFile::tmpfile();
        b.iter(|| {
            file.rewind();
            for i in 0..1024 {
                black_box(file.fputc((i & 0x7f) as c_int));
            }
        });
    });

    group.bench_function("fgetc_1k", |b| {
        let mut file = CFile::tmpfile();
        file.write_items(&[b'x'; 1024]);
        b.iter(|| {
            file.rewind();
            for _ in 0..1024 {
                black_box(file.fgetc());
            }
        });
    });
    group.finish();
}

fn bench_formatted(c: &mut Criterion) {
    let mut group = c.benchmark_group("formatted");

    group.bench_function("print_fmt", |b| {
        let mut file = CFile::tmpfile();
        b.iter(|| {
            file.rewind();
            black_box(file.print_fmt(format_args!("{} {} {}\n", 42, "token", -9.5)));
        });
    });

    group.bench_function("fprintf", |b| {
        let file = CFile::tmpfile();
        b.iter(|| {
            let written = unsafe {
                cfile::fprintf!(file, c"%d %s %f\n", 42 as c_int, c"token".as_ptr(), -9.5f64)
            };
            black_box(written);
        });
    });
    group.finish();
}

fn bench_open_close(c: &mut Criterion) {
    let path = std::env::temp_dir().join(format!("cfile-bench-open-{}", std::process::id()));
    std::fs::write(&path, b"seed").unwrap();
    let mut group = c.benchmark_group("open_close");

    group.bench_function("symbolic_mode", |b| {
        b.iter(|| black_box(CFile::open(&path, AccessMode::READ | AccessMode::BINARY)));
    });
    group.bench_function("raw_mode", |b| {
        b.iter(|| black_box(CFile::open(&path, "rb")));
    });
    group.bench_function("libc_direct", |b| {
        let c_path = std::ffi::CString::new(path.to_str().unwrap()).unwrap();
        b.iter(|| unsafe {
            let fp = libc::fopen(c_path.as_ptr(), c"rb".as_ptr());
            libc::fclose(black_box(fp));
        });
    });
    group.finish();

    let _ = std::fs::remove_file(&path);
}

criterion_group!(
    benches,
    bench_block_write_read,
    bench_char_io,
    bench_formatted,
    bench_open_close
);
criterion_main!(benches);

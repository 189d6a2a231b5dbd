use criterion::{black_box, criterion_group, criterion_main, Criterion};
use hashreduce::hk::Hk;

fn bench_reduce(c: &mut Criterion) {
    let a = Hk::from_int(12345);
    let b = Hk::from_int(67890);
    c.bench_function("hk_reduce", |bencher| {
        bencher.iter(|| Hk::reduce(black_box(&a), black_box(&b)))
    });
}

fn bench_combine(c: &mut Criterion) {
    let a = Hk::from_int(1);
    let b = Hk::from_int(2);
    c.bench_function("hk_combine", |bencher| {
        bencher.iter(|| Hk::combine(black_box(&a), black_box(&b)))
    });
}

fn bench_rehash(c: &mut Criterion) {
    let a = Hk::from_int(42);
    c.bench_function("hk_rehash", |bencher| bencher.iter(|| Hk::rehash(black_box(&a))));
}

fn bench_from_bytes(c: &mut Criterion) {
    let data = vec![0xABu8; 256];
    c.bench_function("hk_from_bytes_256", |bencher| {
        bencher.iter(|| Hk::from_bytes(black_box(&data)))
    });
}

criterion_group!(benches, bench_reduce, bench_combine, bench_rehash, bench_from_bytes);
criterion_main!(benches);

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use demodulizer_bench::synthetic_module;
use demodulizer_core::{ModuleKey, Transpiler};

fn bench_transpile(c: &mut Criterion) {
    let mut group = c.benchmark_group("transpile");
    let transpiler = Transpiler::default();
    let key = ModuleKey::new("app/src/app.js");

    for (imports, exports) in [(4, 4), (32, 32), (128, 256)] {
        let src = synthetic_module(imports, exports);
        group.throughput(Throughput::Bytes(src.len() as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{imports}i-{exports}e")),
            &src,
            |b, src| {
                b.iter(|| transpiler.transpile(black_box(&key), black_box(src)));
            },
        );
    }

    group.finish();
}

fn bench_output_hash(c: &mut Criterion) {
    let transpiler = Transpiler::default();
    let key = ModuleKey::new("app/src/app.js");
    let out = transpiler
        .transpile(&key, &synthetic_module(32, 32))
        .expect("synthetic module should transpile");

    c.bench_function("etag_hash", |b| {
        b.iter(|| blake3::hash(black_box(out.output.as_bytes())));
    });
}

criterion_group!(benches, bench_transpile, bench_output_hash);
criterion_main!(benches);

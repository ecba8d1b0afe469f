use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use kdl_parse::lexer::Lexer;
use kdl_parse::{parse, to_string};

/// A manifest-like document with `packages` top-level nodes, each holding a
/// small dependency block.
fn manifest(packages: usize) -> String {
    let mut out = String::from("/- kdl-version 2\n// generated\n");
    for i in 0..packages {
        out.push_str(&format!(
            "package name=\"pkg-{i}\" version=\"1.{i}.0\" id=(u32){i} {{\n"
        ));
        out.push_str(&format!("    description #\"raw \"text\" {i}\"#\n"));
        out.push_str("    /- disabled #true\n");
        out.push_str(&format!(
            "    dependencies {{\n        serde \"1.0\" features=derive\n        size 0x{i:x}_FF 1_000.5e-3\n    }}\n"
        ));
        out.push_str("}\n");
    }
    out
}

/// The fixture must stay valid KDL, or the timings measure the error path.
fn checked_manifest(packages: usize) -> String {
    let input = manifest(packages);
    if let Err(err) = parse(&input) {
        panic!("benchmark fixture does not parse: {}", err);
    }
    input
}

fn benchmark_tokenize(c: &mut Criterion) {
    let mut group = c.benchmark_group("tokenize");

    for size in [10, 100, 1000].iter() {
        let input = checked_manifest(*size);
        group.throughput(Throughput::Bytes(input.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &input, |b, input| {
            b.iter(|| Lexer::new(black_box(input)).tokenize())
        });
    }
    group.finish();
}

fn benchmark_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");

    for size in [10, 100, 1000].iter() {
        let input = checked_manifest(*size);
        group.throughput(Throughput::Bytes(input.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &input, |b, input| {
            b.iter(|| parse(black_box(input)))
        });
    }
    group.finish();
}

fn benchmark_deep_nesting(c: &mut Criterion) {
    let depth = 200;
    let input = format!("{}{}", "n {".repeat(depth), "}".repeat(depth));

    c.bench_function("parse_deep_nesting", |b| b.iter(|| parse(black_box(&input))));
}

fn benchmark_serialize(c: &mut Criterion) {
    let mut group = c.benchmark_group("serialize");

    for size in [10, 100, 1000].iter() {
        let doc = parse(&checked_manifest(*size)).unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(size), &doc, |b, doc| {
            b.iter(|| to_string(black_box(doc)))
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    benchmark_tokenize,
    benchmark_parse,
    benchmark_deep_nesting,
    benchmark_serialize
);
criterion_main!(benches);

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use fiptoml::{from_str, parse_str, to_string, to_string_with_options, WriteOptions};
use serde::Deserialize;

#[derive(Deserialize)]
#[allow(dead_code)]
struct Product {
    name: String,
    sku: u64,
    price: f64,
    tags: Vec<String>,
}

#[derive(Deserialize)]
#[allow(dead_code)]
struct Inventory {
    products: Vec<Product>,
}

const CONFIG: &str = r#"title = "TOML Example"

[owner]
name = "Lance Uppercut"
dob = 1979-05-27T07:32:00-08:00

[database]
server = "192.168.1.1"
ports = [ 8001, 8001, 8002 ]
connection_max = 5000
enabled = true

[servers.alpha]
ip = "10.0.0.1"
dc = "eqdc10"

[servers.beta]
ip = "10.0.0.2"
dc = "eqdc10"
"#;

fn inventory(size: usize) -> String {
    let mut text = String::new();
    for i in 0..size {
        text.push_str(&format!(
            "[[products]]\nname = \"Product {i}\"\nsku = {sku}\nprice = {price:.2}\ntags = [\"a\", \"b\", \"c\"]\n\n",
            i = i,
            sku = 1000 + i,
            price = 9.99 + i as f64,
        ));
    }
    text
}

fn benchmark_decode_config(c: &mut Criterion) {
    c.bench_function("decode_config", |b| b.iter(|| parse_str(black_box(CONFIG))));
}

fn benchmark_decode_array_of_tables(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode_array_of_tables");

    for size in [10, 50, 100, 500].iter() {
        let text = inventory(*size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &text, |b, text| {
            b.iter(|| parse_str(black_box(text)))
        });
    }
    group.finish();
}

fn benchmark_deserialize_typed(c: &mut Criterion) {
    let mut group = c.benchmark_group("deserialize_typed");

    for size in [10, 100].iter() {
        let text = inventory(*size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &text, |b, text| {
            b.iter(|| from_str::<Inventory>(black_box(text)))
        });
    }
    group.finish();
}

fn benchmark_strings(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode_strings");

    let basic = "s = \"This is a medium length string with some content\"\n";
    let escaped = "s = \"tab\\there \\\"quoted\\\" \\u00e9\\U0001F600 and more\"\n";
    let multiline = "s = \"\"\"\nThe quick brown \\\n  fox jumps over \\\n  the lazy dog.\"\"\"\n";

    group.bench_function("basic", |b| b.iter(|| parse_str(black_box(basic))));
    group.bench_function("escaped", |b| b.iter(|| parse_str(black_box(escaped))));
    group.bench_function("multiline", |b| b.iter(|| parse_str(black_box(multiline))));

    group.finish();
}

fn benchmark_serialize(c: &mut Criterion) {
    let doc = parse_str(&inventory(100)).unwrap();
    let mut group = c.benchmark_group("serialize");

    group.bench_function("compact", |b| b.iter(|| to_string(black_box(&doc))));
    group.bench_function("pretty_sorted", |b| {
        b.iter(|| {
            to_string_with_options(
                black_box(&doc),
                WriteOptions::pretty().with_sorted_keys(true),
            )
        })
    });

    group.finish();
}

fn benchmark_comparison_with_json(c: &mut Criterion) {
    let doc = parse_str(CONFIG).unwrap();
    let json = serde_json::to_string(&doc).unwrap();

    let mut group = c.benchmark_group("comparison");

    group.bench_function("fiptoml_decode", |b| b.iter(|| parse_str(black_box(CONFIG))));
    group.bench_function("json_decode", |b| {
        b.iter(|| serde_json::from_str::<serde_json::Value>(black_box(&json)))
    });

    group.finish();
}

fn benchmark_roundtrip(c: &mut Criterion) {
    c.bench_function("roundtrip_config", |b| {
        b.iter(|| {
            let doc = parse_str(black_box(CONFIG)).unwrap();
            let text = to_string(&doc);
            parse_str(black_box(&text)).unwrap()
        })
    });
}

criterion_group!(
    benches,
    benchmark_decode_config,
    benchmark_decode_array_of_tables,
    benchmark_deserialize_typed,
    benchmark_strings,
    benchmark_serialize,
    benchmark_comparison_with_json,
    benchmark_roundtrip
);
criterion_main!(benches);

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use jetjson::generate::Generator;
use jetjson::{Lexer, Parser};
use serde_json::Value;

// A sample "medium" JSON document
const MEDIUM_JSON: &str = r#"
{
    "name": "Babbage",
    "age": 30,
    "admin": true,
    "friends": ["Ada", "Charles", "Grace"],
    "tasks": [
        { "id": 1, "title": "Parse JSON", "done": false },
        { "id": 2, "title": "Write docs", "done": true }
    ],
    "nested": {"key": [null, 1, 1.23e4]}
}
"#;

fn bench_medium(c: &mut Criterion) {
    let mut group = c.benchmark_group("Medium document");

    group.bench_function("jetjson lex", |b| {
        b.iter(|| Lexer::new(black_box(MEDIUM_JSON)).lex().unwrap())
    });

    group.bench_function("jetjson lex + parse", |b| {
        b.iter(|| {
            let tokens = Lexer::new(black_box(MEDIUM_JSON)).lex().unwrap();
            Parser::new(&tokens).parse().unwrap()
        })
    });

    group.bench_function("serde_json::from_str", |b| {
        b.iter(|| {
            let _: Value = serde_json::from_str(black_box(MEDIUM_JSON)).unwrap();
        })
    });

    group.finish();
}

fn bench_generated(c: &mut Criterion) {
    // A fixed seed keeps the input identical across runs.
    let sample = Generator::new(1815, 10, 5).sample(10);
    let text = serde_json::to_string_pretty(&sample).unwrap();

    let mut group = c.benchmark_group("Generated sample");

    group.bench_function("jetjson lex + parse", |b| {
        b.iter(|| {
            let tokens = Lexer::new(black_box(&text)).lex().unwrap();
            Parser::new(&tokens).parse().unwrap()
        })
    });

    group.bench_function("serde_json::from_str", |b| {
        b.iter(|| {
            let _: Value = serde_json::from_str(black_box(&text)).unwrap();
        })
    });

    group.finish();
}

criterion_group!(benches, bench_medium, bench_generated);
criterion_main!(benches);

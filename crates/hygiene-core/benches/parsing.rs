use std::fmt::Write;
use std::path::Path;

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use hygiene_core::parser::{parse_audit_str, validate_audit};

fn make_audit_toml(sections: usize, items: usize) -> String {
    let labels = ["Complying", "Need Improvement", "NC", "NA"];
    let weightage = 100.0 / sections as f64;

    let mut toml = String::from("[audit]\nid = \"bench\"\nname = \"Bench audit\"\n");
    for s in 0..sections {
        let _ = write!(
            toml,
            "\n[[sections]]\nid = \"s{s}\"\nname = \"Section {s}\"\nweightage = {weightage}\n"
        );
        for i in 0..items {
            let _ = write!(
                toml,
                "\n[[sections.items]]\nid = \"s{s}-i{i}\"\nquestion = \"Check {i}\"\ntpp = 10\nanswer = \"{}\"\npoints = 5\n",
                labels[i % labels.len()]
            );
        }
    }
    toml
}

fn bench_parse_audit(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_audit");
    let source = Path::new("bench.toml");

    let small = make_audit_toml(3, 10);
    let large = make_audit_toml(20, 40);

    group.bench_function("small", |b| {
        b.iter(|| parse_audit_str(black_box(&small), source))
    });

    group.bench_function("large", |b| {
        b.iter(|| parse_audit_str(black_box(&large), source))
    });

    group.finish();
}

fn bench_validate_audit(c: &mut Criterion) {
    let audit = parse_audit_str(&make_audit_toml(20, 40), Path::new("bench.toml"))
        .expect("bench audit parses");

    c.bench_function("validate_audit", |b| {
        b.iter(|| validate_audit(black_box(&audit), 0.01))
    });
}

criterion_group!(benches, bench_parse_audit, bench_validate_audit);
criterion_main!(benches);

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use hygiene_core::answer::{points_for_answer, Answer};
use hygiene_core::metrics::{compute_overall_score, compute_section_metrics};
use hygiene_core::model::{Item, ItemWithAnswer, Section, SectionWithAnswers};

const CYCLE: [Answer; 4] = [
    Answer::Complying,
    Answer::NeedImprovement,
    Answer::Nc,
    Answer::Na,
];

fn make_section(index: usize, items: usize, weightage: f64) -> SectionWithAnswers {
    let id = format!("section-{index}");
    let items = (0..items)
        .map(|i| {
            let answer = CYCLE[i % CYCLE.len()];
            let mut item = Item::new(format!("{id}-{i}"), id.clone(), 10.0);
            item.record_answer(answer);
            ItemWithAnswer::new(item, answer)
        })
        .collect();
    SectionWithAnswers::new(Section::new(id.clone(), id, weightage), items)
}

fn bench_points_for_answer(c: &mut Criterion) {
    c.bench_function("points_for_answer", |b| {
        b.iter(|| {
            CYCLE
                .iter()
                .map(|a| points_for_answer(black_box(*a), black_box(7.0)))
                .sum::<f64>()
        })
    });
}

fn bench_section_metrics(c: &mut Criterion) {
    let mut group = c.benchmark_group("section_metrics");

    for size in [10, 50, 500] {
        let section = make_section(0, size, 25.0);
        group.bench_function(format!("items={size}"), |b| {
            b.iter(|| compute_section_metrics(black_box(&section)))
        });
    }

    group.finish();
}

fn bench_overall_score(c: &mut Criterion) {
    let mut group = c.benchmark_group("overall_score");

    for sections in [5, 20, 100] {
        let weightage = 100.0 / sections as f64;
        let report: Vec<SectionWithAnswers> = (0..sections)
            .map(|i| make_section(i, 30, weightage))
            .collect();
        group.bench_function(format!("sections={sections}"), |b| {
            b.iter(|| compute_overall_score(black_box(&report)))
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_points_for_answer,
    bench_section_metrics,
    bench_overall_score
);
criterion_main!(benches);

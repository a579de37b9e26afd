use criterion::{black_box, criterion_group, criterion_main, Criterion};

use stepwise_core::answer::evaluate;
use stepwise_core::grading::{aggregate, Submissions};
use stepwise_core::model::{AnswerOption, Exercise, QuestionType};

fn bench_evaluate(c: &mut Criterion) {
    let mut group = c.benchmark_group("evaluate");

    let options = vec![
        AnswerOption::new("opt-1", &[("en", "Water"), ("tr", "Su")]),
        AnswerOption::new("opt-2", &[("en", "Bread"), ("tr", "Ekmek")]),
        AnswerOption::new("opt-3", &[("en", "Tea"), ("tr", "Çay")]),
    ];
    let no_options: Vec<AnswerOption> = Vec::new();

    let pairs_key = {
        let pairs: Vec<String> = (0..12)
            .map(|i| format!(r#"{{"left":"word-{i}","right":"kelime-{i}"}}"#))
            .collect();
        format!("[{}]", pairs.join(","))
    };
    let pairs_submission = {
        let pairs: Vec<String> = (0..12)
            .rev()
            .map(|i| format!(r#"{{"left":"WORD-{i} ","right":"kelime-{i}"}}"#))
            .collect();
        format!("[{}]", pairs.join(","))
    };

    group.bench_function("multiple_choice_text_fallback", |b| {
        b.iter(|| {
            evaluate(
                black_box(QuestionType::MultipleChoice),
                black_box("çay"),
                black_box(Some("opt-3")),
                black_box(&options),
            )
        })
    });

    group.bench_function("fill_blank", |b| {
        b.iter(|| {
            evaluate(
                black_box(QuestionType::FillBlank),
                black_box(r#"["Merhaba","Selam","Selamlar"]"#),
                black_box(Some("  selamlar ")),
                black_box(&no_options),
            )
        })
    });

    group.bench_function("matching_12_pairs", |b| {
        b.iter(|| {
            evaluate(
                black_box(QuestionType::Matching),
                black_box(&pairs_key),
                black_box(Some(pairs_submission.as_str())),
                black_box(&no_options),
            )
        })
    });

    group.finish();
}

fn bench_aggregate(c: &mut Criterion) {
    let questions: Vec<Exercise> = (0..50)
        .map(|i| Exercise {
            id: format!("q{i}"),
            order: i,
            question_type: QuestionType::FillBlank,
            correct_answer: format!(r#"["answer-{i}"]"#),
            options: vec![],
            translations: vec![],
        })
        .collect();
    let submissions: Submissions = (0..50)
        .map(|i| (format!("q{i}"), format!("Answer-{}", if i % 3 == 0 { i + 1 } else { i })))
        .collect();

    c.bench_function("aggregate_50_questions", |b| {
        b.iter(|| aggregate(black_box("lesson"), black_box(&questions), black_box(&submissions), None))
    });
}

criterion_group!(benches, bench_evaluate, bench_aggregate);
criterion_main!(benches);

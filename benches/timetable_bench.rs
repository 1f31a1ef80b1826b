//! Criterion benchmarks for u-timetable.
//!
//! Uses a synthetic catalog: every offering has lecture sections on three
//! day patterns at four times, and half of them pair with two tutorials.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use u_timetable::catalog::{CourseOption, MeetingRecord, OfferingCatalog, SectionCombination};
use u_timetable::timetable::fitness::evaluate_intervals;
use u_timetable::timetable::{FitnessWeights, HourSet};
use u_timetable::{SearchCache, SearchConfig, TimetableSolver};

// ===========================================================================
// Synthetic catalog
// ===========================================================================

const DAY_PATTERNS: [&[&str]; 3] = [&["Mon", "Wed"], &["Tue", "Thu"], &["Wed", "Fri"]];
const TIMES: [&str; 4] = ["08:35-09:55", "10:05-11:25", "13:05-14:25", "16:05-17:25"];

fn synthetic_catalog(courses: usize) -> OfferingCatalog {
    let mut catalog = OfferingCatalog::new();
    for c in 0..courses {
        let mut candidates = Vec::new();
        for (d, days) in DAY_PATTERNS.iter().enumerate() {
            for (t, time) in TIMES.iter().enumerate() {
                let lecture = CourseOption::new(format!("{c}-{d}-{t}"), format!("SUBJ {c:04} A"))
                    .with_meeting(MeetingRecord::new(days.iter().copied(), *time));
                if c % 2 == 0 {
                    candidates.push(SectionCombination::LectureOnly(lecture));
                    continue;
                }
                for (k, tut_day) in ["Mon", "Fri"].iter().enumerate() {
                    let tutorial = CourseOption::new(
                        format!("{c}-{d}-{t}-T{k}"),
                        format!("SUBJ {c:04} A{k}"),
                    )
                    .with_meeting(MeetingRecord::new([*tut_day], TIMES[(t + k + 1) % TIMES.len()]));
                    candidates.push(SectionCombination::LectureAndTutorial {
                        lecture: lecture.clone(),
                        tutorial,
                    });
                }
            }
        }
        catalog.insert(format!("SUBJ {c:04}"), candidates);
    }
    catalog
}

fn config(population: usize, generations: usize) -> SearchConfig {
    SearchConfig::default()
        .with_population_size(population)
        .with_max_generations(generations)
        .with_return_size(10)
        .with_unwanted_hours(HourSet::from_hours([8]).unwrap_or_default())
        .with_seed(42)
}

// ===========================================================================
// Benchmarks
// ===========================================================================

fn bench_fitness(c: &mut Criterion) {
    let mut group = c.benchmark_group("fitness");

    for courses in [3usize, 6, 10] {
        let catalog = synthetic_catalog(courses);
        let intervals: Vec<_> = catalog
            .offerings()
            .iter()
            .flat_map(|o| o.candidates[0].options())
            .flat_map(u_timetable::timetable::interval::intervals_of)
            .collect();
        let weights = FitnessWeights::default();
        let unwanted = HourSet::from_hours([8, 16]).unwrap_or_default();

        group.bench_with_input(BenchmarkId::from_parameter(courses), &intervals, |b, iv| {
            b.iter(|| black_box(evaluate_intervals(black_box(iv), unwanted, &weights)))
        });
    }
    group.finish();
}

fn bench_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("search");
    group.sample_size(10);

    for (courses, pop, gen) in [(3usize, 50usize, 50usize), (6, 100, 100), (10, 100, 200)] {
        let catalog = synthetic_catalog(courses);
        let config = config(pop, gen);
        group.bench_with_input(
            BenchmarkId::new(format!("c{}_p{}_g{}", courses, pop, gen), courses),
            &(catalog, config),
            |b, (cat, cfg)| {
                b.iter(|| {
                    let outcome = TimetableSolver::run(black_box(cat), black_box(cfg));
                    black_box(outcome)
                })
            },
        );
    }
    group.finish();
}

fn bench_search_memoized_fitness(c: &mut Criterion) {
    let mut group = c.benchmark_group("search_memoized_fitness");
    group.sample_size(10);

    let catalog = synthetic_catalog(6);
    let config = config(100, 100);
    group.bench_function("c6_p100_g100", |b| {
        b.iter(|| {
            // Fresh cache per iteration so only the fitness memo is measured.
            let cache = SearchCache::new();
            black_box(cache.search(black_box(&catalog), black_box(&config)))
        })
    });
    group.finish();
}

criterion_group!(benches, bench_fitness, bench_search, bench_search_memoized_fitness);
criterion_main!(benches);

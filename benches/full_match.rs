use card_football::{Action, FootballRules, MatchState, RulesEngine};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

fn play(rules: &FootballRules, seed: u64, formation: &str) -> MatchState {
    let mut state = rules
        .apply_action(&rules.new_match(seed), &Action::setup("Home", "Away", formation))
        .unwrap()
        .state;
    while let Some(action) = rules.auto_action(&state) {
        state = rules.apply_action(&state, &action).unwrap().state;
    }
    state
}

fn full_match(c: &mut Criterion) {
    let rules = FootballRules::default();
    let mut group = c.benchmark_group("full_match");
    for formation in ["4-4-2", "4-2-3-1", "3-4-1-1-1"] {
        group.bench_function(BenchmarkId::new("autoplay", formation), |b| {
            let mut seed = 0u64;
            b.iter(|| {
                seed = seed.wrapping_add(1);
                black_box(play(&rules, seed, formation))
            })
        });
    }
    group.finish();
}

fn snapshot(c: &mut Criterion) {
    let rules = FootballRules::default();
    let state = rules
        .apply_action(&rules.new_match(7), &Action::setup("Home", "Away", "4-4-2"))
        .unwrap()
        .state;

    c.bench_function("snapshot", |b| b.iter(|| black_box(state.snapshot())));
    c.bench_function("state_clone", |b| b.iter(|| black_box(state.clone())));
}

criterion_group!(benches, full_match, snapshot);
criterion_main!(benches);

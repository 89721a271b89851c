use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use take6::agents::AutomatedStrategy;
use take6::cards::parse_cards;
use take6::config::Settings;
use take6::events::EventBus;
use take6::player::Player;
use take6::round::Round;
use take6::table::Table;

fn bench_decide(c: &mut Criterion) {
    let open = Table::seeded(parse_cards("12 37 58 81").unwrap(), 6);
    let crowded = Table::from_rows(
        vec![
            parse_cards("1 2 3 4 10").unwrap(),
            parse_cards("11 12 13 14 20").unwrap(),
            parse_cards("21 22 23 24 30").unwrap(),
            parse_cards("31 32 33 34 40").unwrap(),
        ],
        6,
    )
    .unwrap();
    let hand = parse_cards("5 17 26 44 59 63 70 88 95 102").unwrap();

    let mut g = c.benchmark_group("decide");
    for (name, table) in [("open", &open), ("crowded", &crowded)] {
        g.bench_with_input(BenchmarkId::new("automated", name), table, |b, t| {
            let mut bot = AutomatedStrategy::with_seed(1);
            b.iter(|| bot.decide(black_box(&hand), black_box(t)))
        });
    }
    g.finish();
}

fn bench_round(c: &mut Criterion) {
    c.bench_function("classic_round", |b| {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        b.iter(|| {
            let players = (0..4).map(|i| Player::seeded(format!("Bot {i}"), i)).collect();
            let mut round = Round::new(players, Settings::default()).unwrap();
            let mut events = EventBus::new();
            black_box(round.run(&mut rng, &mut events).unwrap())
        })
    });
}

criterion_group!(benches, bench_decide, bench_round);
criterion_main!(benches);

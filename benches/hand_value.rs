use std::hint::black_box;

use blackjack_rs::cards::parse_cards;
use blackjack_rs::config::TableConfig;
use blackjack_rs::hand::hand_value;
use blackjack_rs::money::Money;
use blackjack_rs::round::{Decision, Table};
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};

fn bench_hand_value(c: &mut Criterion) {
    let hard = parse_cards("10h 7c").unwrap();
    let soft = parse_cards("Ah 6c").unwrap();
    let aces = parse_cards("Ah As Ad Ac 5h 2c").unwrap();

    let mut g = c.benchmark_group("hand_value");
    g.bench_with_input(BenchmarkId::new("hard", "10,7"), &hard, |b, input| {
        b.iter(|| hand_value(black_box(input)))
    });
    g.bench_with_input(BenchmarkId::new("soft", "A,6"), &soft, |b, input| {
        b.iter(|| hand_value(black_box(input)))
    });
    g.bench_with_input(BenchmarkId::new("four_aces", "A,A,A,A,5,2"), &aces, |b, input| {
        b.iter(|| hand_value(black_box(input)))
    });
    g.finish();
}

fn bench_round(c: &mut Criterion) {
    c.bench_function("round_stand_on_17", |b| {
        let mut table = Table::with_seed(TableConfig::default(), 7);
        b.iter(|| {
            if table.needs_cash_in() {
                let _ = table.cash_in();
            }
            if table.start_round(Money::from_units(10)).is_ok() {
                if table.insurance_offered() {
                    let _ = table.take_insurance(false);
                }
                while let Some(active) = table.active_hand() {
                    let d = if table.player().hands()[active].value() < 17 {
                        Decision::Hit
                    } else {
                        Decision::Stand
                    };
                    let _ = table.decide(d, active);
                }
            }
            black_box(table.bankroll())
        })
    });
}

criterion_group!(benches, bench_hand_value, bench_round);
criterion_main!(benches);

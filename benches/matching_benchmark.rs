// ============================================================================
// Book Matcher Benchmarks
// ============================================================================
//
// Benchmark Categories:
// 1. Matching - Resting sell plus crossing buy against a pre-filled book
// 2. Sweep - One large order consuming many resting orders
// 3. Book Operations - Snapshot and non-crossing submission
//
// Each matching iteration adds one resting order and removes one, so book
// depth stays at its pre-filled size.
// ============================================================================

use book_matcher::prelude::*;
use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use rust_decimal::Decimal;
use std::hint::black_box;
use std::sync::Arc;

struct Fixture {
    asset: Arc<Asset>,
    seller: Arc<InvestorAccount>,
    buyer: Arc<InvestorAccount>,
    next_id: u64,
}

impl Fixture {
    fn new() -> Self {
        Self {
            asset: Arc::new(Asset::new("PETR4", "Petrobras", 1_000_000_000)),
            seller: Arc::new(InvestorAccount::new("seller", "Seller")),
            buyer: Arc::new(InvestorAccount::new("buyer", "Buyer")),
            next_id: 0,
        }
    }

    fn engine(&self, config: BookConfig) -> MatchingEngine {
        MatchingEngine::new(
            Arc::clone(&self.asset),
            config,
            Arc::new(NoOpEventHandler),
            Arc::new(NoOpCompletion),
        )
    }

    fn order(&mut self, side: Side, cents: i64, shares: Shares) -> Arc<Order> {
        self.next_id += 1;
        let investor: Arc<dyn Investor> = match side {
            Side::Sell => self.seller.clone(),
            Side::Buy => self.buyer.clone(),
        };
        Arc::new(Order::new(
            format!("o{}", self.next_id),
            investor,
            Arc::clone(&self.asset),
            shares,
            Decimal::new(cents, 2),
            side,
        ))
    }

    /// Resting asks from 10.00 upward, one per cent
    fn fill_asks(&mut self, engine: &mut MatchingEngine, depth: i64) {
        for i in 0..depth {
            let sell = self.order(Side::Sell, 1_000 + i, 1);
            // Nothing on the bid side yet, so nothing crosses
            let _ = engine.process_order(sell);
        }
    }
}

fn disciplines() -> [(&'static str, BookConfig); 2] {
    [
        ("price_time", BookConfig::price_time()),
        ("insertion_stack", BookConfig::faithful()),
    ]
}

// ============================================================================
// Matching Benchmarks
// ============================================================================

fn benchmark_single_match(c: &mut Criterion) {
    let mut group = c.benchmark_group("single_match");

    for (name, config) in disciplines() {
        for depth in [100, 1000, 10000] {
            group.bench_with_input(BenchmarkId::new(name, depth), &depth, |b, &depth| {
                let mut fixture = Fixture::new();
                let mut engine = fixture.engine(config.clone());
                fixture.fill_asks(&mut engine, depth);

                b.iter(|| {
                    let sell = fixture.order(Side::Sell, 999, 1);
                    let buy = fixture.order(Side::Buy, 1_000, 1);
                    let _ = engine.process_order(sell);
                    black_box(engine.process_order(buy))
                });
            });
        }
    }

    group.finish();
}

fn benchmark_sweep(c: &mut Criterion) {
    let mut group = c.benchmark_group("sweep");

    for levels in [10, 100] {
        group.bench_with_input(
            BenchmarkId::from_parameter(levels),
            &levels,
            |b, &levels| {
                b.iter_batched(
                    || {
                        let mut fixture = Fixture::new();
                        let mut engine = fixture.engine(BookConfig::continuous());
                        fixture.fill_asks(&mut engine, levels);
                        let buy = fixture.order(Side::Buy, 1_000 + levels, levels);
                        (engine, buy)
                    },
                    |(mut engine, buy)| black_box(engine.process_order(buy)),
                    BatchSize::SmallInput,
                );
            },
        );
    }

    group.finish();
}

// ============================================================================
// Book Operations Benchmarks
// ============================================================================

fn benchmark_snapshot(c: &mut Criterion) {
    c.bench_function("book_snapshot", |b| {
        let mut fixture = Fixture::new();
        let mut engine = fixture.engine(BookConfig::price_time());
        fixture.fill_asks(&mut engine, 100);
        for i in 0..100 {
            let buy = fixture.order(Side::Buy, 900 - i, 1);
            let _ = engine.process_order(buy);
        }

        b.iter(|| black_box(engine.snapshot()));
    });
}

fn benchmark_submission_no_match(c: &mut Criterion) {
    let mut group = c.benchmark_group("submission_no_match");

    for (name, config) in disciplines() {
        group.bench_function(name, |b| {
            b.iter_batched(
                || {
                    let mut fixture = Fixture::new();
                    let engine = fixture.engine(config.clone());
                    let sells: Vec<_> = (0..100)
                        .map(|i| fixture.order(Side::Sell, 1_000 + i, 1))
                        .collect();
                    (engine, sells)
                },
                |(mut engine, sells)| {
                    for sell in sells {
                        let _ = black_box(engine.process_order(sell));
                    }
                    engine
                },
                BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    benchmark_single_match,
    benchmark_sweep,
    benchmark_snapshot,
    benchmark_submission_no_match,
);
criterion_main!(benches);

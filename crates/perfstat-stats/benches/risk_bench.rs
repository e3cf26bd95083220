use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use perfstat_stats::path::{drawdowns, max_drawdown_duration};
use perfstat_stats::risk::{historical_simulation_var, modified_parametric_var};
use perfstat_stats::{PerformanceSummary, StatsConfig};

/// Deterministic pseudo-returns in roughly [-5%, 5%].
fn synthetic_returns(n: usize) -> Vec<f64> {
    let mut state: u64 = 0x9E37_79B9_7F4A_7C15;
    (0..n)
        .map(|_| {
            state = state
                .wrapping_mul(6_364_136_223_846_793_005)
                .wrapping_add(1_442_695_040_888_963_407);
            ((state >> 11) as f64 / (1u64 << 53) as f64 - 0.5) / 10.0
        })
        .collect()
}

fn bench_risk(c: &mut Criterion) {
    let mut group = c.benchmark_group("Risk");

    // Monthly history, ten years of daily data, a long intraday series.
    let sizes = [120, 2520, 50_000];

    for n in sizes.iter() {
        let returns = synthetic_returns(*n);

        // Sort-bound path.
        group.bench_with_input(BenchmarkId::new("HistoricalVaR", n), n, |b, _| {
            b.iter(|| historical_simulation_var(black_box(&returns), 0.95))
        });

        group.bench_with_input(BenchmarkId::new("ModifiedVaR", n), n, |b, _| {
            b.iter(|| modified_parametric_var(black_box(&returns), 0.99))
        });

        // Single-pass running peak.
        group.bench_with_input(BenchmarkId::new("Drawdowns", n), n, |b, _| {
            b.iter(|| drawdowns(black_box(&returns)))
        });

        group.bench_with_input(BenchmarkId::new("DrawdownDuration", n), n, |b, _| {
            b.iter(|| max_drawdown_duration(black_box(&returns)))
        });

        let market = synthetic_returns(*n + 1)[1..].to_vec();
        let cfg = StatsConfig::daily();
        group.bench_with_input(BenchmarkId::new("Summary", n), n, |b, _| {
            b.iter(|| PerformanceSummary::compute(black_box(&returns), Some(&market), &cfg))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_risk);
criterion_main!(benches);

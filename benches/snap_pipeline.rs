//! Performance benchmarks for the snap decision pipeline
//!
//! Every hotkey press runs classify -> transition -> synthesize before the
//! window moves, so the decision path has to stay well under a millisecond
//! for snapping to feel instant.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use std::sync::Arc;
use tokio::runtime::Runtime;
use xsnap::config::{MarginConfig, Settings};
use xsnap::models::{Direction, Rect, TilingState};
use xsnap::services::{classify, synthesize, transition, SnapCoordinator};
use xsnap::ui::RecordingNotifier;
use xsnap::x11::{InMemoryDisplays, InMemoryWindowSystem};

/// Create a benchmark runtime for async operations
fn create_runtime() -> Runtime {
    Runtime::new().expect("Failed to create Tokio runtime")
}

fn work_area() -> Rect {
    Rect::new(0, 0, 1920, 1080)
}

fn margins() -> MarginConfig {
    MarginConfig { outer: 10, gap: 8 }
}

/// Benchmark state classification for the best and worst case: a rectangle
/// matching the first candidate checked, and one matching none of them.
fn bench_classify(c: &mut Criterion) {
    let tiled = synthesize(TilingState::LeftHalf, work_area(), margins());
    let floating = Rect::new(431, 227, 993, 641);

    let mut group = c.benchmark_group("classify");
    group.bench_with_input(BenchmarkId::new("window", "tiled"), &tiled, |b, rect| {
        b.iter(|| classify(black_box(*rect), work_area(), margins(), 8))
    });
    group.bench_with_input(
        BenchmarkId::new("window", "floating"),
        &floating,
        |b, rect| b.iter(|| classify(black_box(*rect), work_area(), margins(), 8)),
    );
    group.finish();
}

/// Benchmark a full sweep of the transition table
fn bench_transition(c: &mut Criterion) {
    c.bench_function("transition_table_sweep", |b| {
        b.iter(|| {
            for state in TilingState::SNAP_TARGETS {
                for direction in Direction::ALL {
                    black_box(transition(black_box(state), black_box(direction)));
                }
            }
        })
    });
}

/// Benchmark synthesizing every snap target's rectangle
fn bench_synthesize(c: &mut Criterion) {
    c.bench_function("synthesize_all_targets", |b| {
        b.iter(|| {
            for target in TilingState::SNAP_TARGETS {
                black_box(synthesize(black_box(target), work_area(), margins()));
            }
        })
    });
}

/// Benchmark one complete snap event through the coordinator, including the
/// in-memory window and display queries around the decision.
fn bench_coordinator_event(c: &mut Criterion) {
    let rt = create_runtime();

    c.bench_function("coordinator_snap_event", |b| {
        b.to_async(&rt).iter(|| async {
            let windows = Arc::new(InMemoryWindowSystem::with_window(
                1,
                Rect::new(200, 200, 800, 500),
            ));
            let coordinator = SnapCoordinator::new(
                windows,
                Arc::new(InMemoryDisplays::single_1080p()),
                Arc::new(RecordingNotifier::new()),
                Settings::default(),
            );

            coordinator
                .snap(black_box(Direction::Left))
                .await
                .expect("snap should succeed against in-memory doubles")
        })
    });
}

criterion_group!(
    benches,
    bench_classify,
    bench_transition,
    bench_synthesize,
    bench_coordinator_event
);
criterion_main!(benches);

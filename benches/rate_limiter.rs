//! # Rate Limiter Benchmarks
//!
//! Measures the bookkeeping cost of admission. A [`ManualClock`] stands in
//! for the system clock so that no iteration actually sleeps.
//!
//! Run with: `cargo bench --bench rate_limiter`

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use entrez_client::{ManualClock, RateLimiter, RateLimiterConfig};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

fn manual_limiter(max_requests: usize) -> (RateLimiter, Arc<ManualClock>) {
    let clock = Arc::new(ManualClock::new());
    let limiter = RateLimiter::with_clock(
        RateLimiterConfig::new(max_requests, Duration::from_secs(1)),
        clock.clone(),
    );
    (limiter, clock)
}

/// Admission while the window always has room
fn bench_admit_open_window(c: &mut Criterion) {
    let mut group = c.benchmark_group("admit_open_window");
    group.throughput(Throughput::Elements(1));

    for max_requests in [3, 10, 100] {
        group.bench_with_input(
            BenchmarkId::from_parameter(max_requests),
            &max_requests,
            |b, &max_requests| {
                let (limiter, clock) = manual_limiter(max_requests);
                b.iter(|| {
                    // Step past the window so every call is immediate
                    clock.advance(Duration::from_secs(1));
                    std::hint::black_box(limiter.admit())
                });
            },
        );
    }

    group.finish();
}

/// Admission that has to compute (and fake) a wait
fn bench_admit_full_window(c: &mut Criterion) {
    c.bench_function("admit_full_window", |b| {
        let (limiter, _clock) = manual_limiter(3);
        b.iter(|| std::hint::black_box(limiter.admit()));
    });
}

/// Non-blocking checks
fn bench_try_admit(c: &mut Criterion) {
    let mut group = c.benchmark_group("try_admit");

    group.bench_function("rejected", |b| {
        let (limiter, _clock) = manual_limiter(3);
        for _ in 0..3 {
            limiter.admit();
        }
        b.iter(|| std::hint::black_box(limiter.try_admit()));
    });

    group.bench_function("time_until_ready", |b| {
        let (limiter, _clock) = manual_limiter(3);
        for _ in 0..3 {
            limiter.admit();
        }
        b.iter(|| std::hint::black_box(limiter.time_until_ready()));
    });

    group.finish();
}

/// Lock contention with several threads sharing one limiter
fn bench_concurrent_admit(c: &mut Criterion) {
    let mut group = c.benchmark_group("concurrent_admit");

    for num_threads in [2, 4, 8] {
        group.throughput(Throughput::Elements(num_threads as u64 * 1000));
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{}_threads", num_threads)),
            &num_threads,
            |b, &num_threads| {
                let (limiter, _clock) = manual_limiter(3);
                let limiter = Arc::new(limiter);

                b.iter(|| {
                    let handles: Vec<_> = (0..num_threads)
                        .map(|_| {
                            let limiter = limiter.clone();
                            thread::spawn(move || {
                                for _ in 0..1000 {
                                    std::hint::black_box(limiter.admit());
                                }
                            })
                        })
                        .collect();

                    for handle in handles {
                        handle.join().unwrap();
                    }
                });
            },
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_admit_open_window,
    bench_admit_full_window,
    bench_try_admit,
    bench_concurrent_admit,
);
criterion_main!(benches);

//! Criterion benchmarks for log_interceptor

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use log_interceptor::counters::SimpleCounterRegistry;
use log_interceptor::interceptors::parse_blocked_thread;
use log_interceptor::interceptors::thread_blocked::BLOCKED_THREAD_CHECKER;
use log_interceptor::interceptors::ThreadBlockedInterceptor;
use log_interceptor::prelude::*;
use std::sync::Arc;

/// Sink that drops everything, so only interception is measured
struct NullSink;

impl LogSink for NullSink {
    fn log(&self, _record: &LogRecord<'_>) -> Result<()> {
        Ok(())
    }

    fn name(&self) -> &str {
        "null"
    }
}

fn sink_with_chain(len: usize, mode: EvaluationMode) -> DelegatingSink {
    let registry = InterceptorRegistry::shared();
    for _ in 0..len {
        registry.register(Arc::new(NoOpInterceptor));
    }
    DelegatingSink::new("bench", Box::new(NullSink), registry).with_evaluation_mode(mode)
}

// ============================================================================
// Interception Overhead Benchmarks
// ============================================================================

fn bench_chain_length(c: &mut Criterion) {
    let mut group = c.benchmark_group("chain_length");
    group.throughput(Throughput::Elements(1));

    for len in [0usize, 1, 4, 16] {
        let sink = sink_with_chain(len, EvaluationMode::Exhaustive);
        group.bench_with_input(BenchmarkId::new("info", len), &len, |b, _| {
            b.iter(|| sink.info(black_box("Info message")));
        });
    }

    group.finish();
}

fn bench_evaluation_modes(c: &mut Criterion) {
    let mut group = c.benchmark_group("evaluation_mode");
    group.throughput(Throughput::Elements(1));

    for mode in [EvaluationMode::Exhaustive, EvaluationMode::ShortCircuit] {
        let registry = InterceptorRegistry::shared();
        registry.register(Arc::new(FnInterceptor::new(
            |_: &str, _: &LogRecord<'_>| LogPropagation::Block,
        )));
        for _ in 0..8 {
            registry.register(Arc::new(NoOpInterceptor));
        }
        let sink = DelegatingSink::new("bench", Box::new(NullSink), registry)
            .with_evaluation_mode(mode);

        group.bench_function(format!("{:?}", mode), |b| {
            b.iter(|| sink.warn(black_box("Blocked message")));
        });
    }

    group.finish();
}

// ============================================================================
// Blocked Thread Benchmarks
// ============================================================================

fn bench_blocked_thread(c: &mut Criterion) {
    let mut group = c.benchmark_group("blocked_thread");
    group.throughput(Throughput::Elements(1));

    let message =
        "Thread Thread[vert.x-eventloop-thread-1,5,main]=task has been blocked for 2304 ms, time limit is 2000 ms";

    group.bench_function("parse", |b| {
        b.iter(|| parse_blocked_thread(black_box(message)));
    });

    group.bench_function("parse_reject", |b| {
        b.iter(|| parse_blocked_thread(black_box("Connection reset by peer")));
    });

    let counters = Arc::new(SimpleCounterRegistry::new());
    let registry = InterceptorRegistry::shared();
    registry.register_for(
        LogLevel::Warn,
        Arc::new(ThreadBlockedInterceptor::new(counters)),
    );
    let sink = DelegatingSink::new(BLOCKED_THREAD_CHECKER, Box::new(NullSink), registry);

    group.bench_function("intercept_and_count", |b| {
        b.iter(|| sink.warn(black_box(message)));
    });

    group.finish();
}

// ============================================================================
// Registry Benchmarks
// ============================================================================

fn bench_registry_lookup(c: &mut Criterion) {
    let mut group = c.benchmark_group("registry");

    let registry = InterceptorRegistry::new();
    for _ in 0..4 {
        registry.register(Arc::new(NoOpInterceptor));
    }

    group.bench_function("lookup_hit", |b| {
        b.iter(|| registry.interceptors_for(black_box(LogLevel::Info)));
    });

    let empty = InterceptorRegistry::new();
    group.bench_function("lookup_miss", |b| {
        b.iter(|| empty.interceptors_for(black_box(LogLevel::Info)));
    });

    group.finish();
}

// ============================================================================
// Criterion Configuration
// ============================================================================

criterion_group!(
    benches,
    bench_chain_length,
    bench_evaluation_modes,
    bench_blocked_thread,
    bench_registry_lookup
);

criterion_main!(benches);

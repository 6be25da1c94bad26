//! Blocked thread metrics example
//!
//! Routes the `log` facade through the interception layer and turns blocked
//! thread reports into per-thread counters.
//!
//! Run with: cargo run --example thread_blocked_metrics

use log_interceptor::interceptors::thread_blocked::BLOCKED_THREAD_CHECKER;
use log_interceptor::prelude::*;
use std::sync::Arc;

fn main() -> Result<()> {
    println!("=== Log Interceptor - Blocked Thread Metrics Example ===\n");

    let counters = Arc::new(SimpleCounterRegistry::new());
    let registry = InterceptorRegistry::shared();
    registry.register_for(
        LogLevel::Warn,
        Arc::new(ThreadBlockedInterceptor::new(counters.clone())),
    );

    let factory = SinkFactory::builder()
        .use_colors(false)
        .registry(registry)
        .build()?;
    InterceptingLogger::new(factory)
        .with_max_level(log::LevelFilter::Info)
        .init()
        .map_err(|e| LoggerError::other(e.to_string()))?;

    for (thread, ms) in [
        ("vert.x-eventloop-thread-0", 2304),
        ("vert.x-worker-thread-3", 61_000),
        ("vert.x-eventloop-thread-0", 2890),
    ] {
        log::warn!(
            target: BLOCKED_THREAD_CHECKER,
            "Thread Thread[{},5,main]=task has been blocked for {} ms, time limit is 2000 ms",
            thread,
            ms
        );
    }
    log::warn!(target: "app", "unrelated warning");
    log::logger().flush();

    println!("\nCounters:");
    for (name, tags, count) in counters.snapshot() {
        println!("  {} {:?} = {}", name, tags, count);
    }

    println!("\n=== Example completed successfully! ===");

    Ok(())
}

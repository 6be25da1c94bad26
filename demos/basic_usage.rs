//! Basic interception example
//!
//! Demonstrates registering interceptors per level and logging through a
//! factory-built console sink.
//!
//! Run with: cargo run --example basic_usage

use log_interceptor::prelude::*;
use std::io;
use std::sync::Arc;

fn main() -> Result<()> {
    println!("=== Log Interceptor - Basic Usage Example ===\n");

    let registry = InterceptorRegistry::shared();

    // Block anything that looks like a credential, at every level
    registry.register(Arc::new(FnInterceptor::new(
        |_: &str, record: &LogRecord<'_>| {
            if record.message.to_string().contains("password") {
                LogPropagation::Block
            } else {
                LogPropagation::Continue
            }
        },
    )));

    // Silence debug output from one noisy logger only
    registry.register_for(
        LogLevel::Debug,
        Arc::new(FnInterceptor::new(|logger: &str, _: &LogRecord<'_>| {
            if logger == "noisy" {
                LogPropagation::Block
            } else {
                LogPropagation::Continue
            }
        })),
    );

    let factory = SinkFactory::builder()
        .backend(Backend::Console)
        .timestamp_format(TimestampFormat::Rfc3339)
        .registry(registry)
        .build()?;

    let app = factory.create_sink("app")?;
    let noisy = factory.create_sink("noisy")?;

    println!("1. Logging at different levels:");
    app.trace("This is a trace message")?;
    app.debug("This is a debug message")?;
    app.info("This is an info message")?;
    app.warn_with_params("Disk usage high", &[LogValue::from(91), LogValue::from("%")])?;
    app.error_with_error("Request failed", &io::Error::other("connection reset"))?;
    app.fatal("This is a fatal message")?;

    println!("\n2. Blocked calls never reach the console:");
    app.info("login ok, password=hunter2")?;
    noisy.debug("polling...")?;
    noisy.info("noisy info still passes")?;

    println!(
        "\n   app: {} forwarded, {} blocked",
        app.metrics().forwarded_count(),
        app.metrics().blocked_count()
    );
    println!(
        "   noisy: {} forwarded, {} blocked",
        noisy.metrics().forwarded_count(),
        noisy.metrics().blocked_count()
    );

    println!("\n=== Example completed successfully! ===");

    Ok(())
}

//! Criterion benchmarks for rust_log_dispatcher

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rust_log_dispatcher::core::interpolate::interpolate;
use rust_log_dispatcher::core::runtime::VarMap;
use rust_log_dispatcher::prelude::*;
use serde_json::json;
use std::sync::Arc;

struct NullHandler;

impl Handler for NullHandler {
    fn can_handle(&self, _level: LogLevel) -> bool {
        true
    }

    fn set_date_format(&mut self, _format: &str) -> &mut dyn Handler {
        self
    }

    fn handle(&mut self, _level: LogLevel, message: &str) -> Result<bool> {
        black_box(message);
        Ok(true)
    }

    fn name(&self) -> &str {
        "null"
    }
}

fn null_builder() -> LoggerBuilder {
    Logger::builder()
        .factory("null", |_config: &HandlerConfig| {
            Ok(Box::new(NullHandler) as Box<dyn Handler>)
        })
        .handler("null", serde_json::Value::Null)
        .runtime(
            AmbientRuntime::new()
                .with_environment("production")
                .with_process_env(false),
        )
}

// ============================================================================
// Logger Creation Benchmarks
// ============================================================================

fn bench_logger_creation(c: &mut Criterion) {
    let mut group = c.benchmark_group("logger_creation");
    group.throughput(Throughput::Elements(1));

    group.bench_function("builder", |b| {
        b.iter(|| black_box(null_builder().build().unwrap()));
    });

    let config = LoggerConfig::from_json_str(
        r#"{ "threshold": [1, 2, 3, "error"], "handlers": { "console": { "colors": false } } }"#,
    )
    .unwrap();
    group.bench_function("from_config", |b| {
        b.iter(|| black_box(Logger::from_config(black_box(&config)).unwrap()));
    });

    group.finish();
}

// ============================================================================
// Dispatch Benchmarks
// ============================================================================

fn bench_dispatch(c: &mut Criterion) {
    let mut group = c.benchmark_group("dispatch");
    group.throughput(Throughput::Elements(1));

    let logger = null_builder().build().unwrap();
    let empty = LogContext::new();

    group.bench_function("plain", |b| {
        b.iter(|| logger.info(black_box("Info message"), &empty).unwrap());
    });

    let ctx = LogContext::new()
        .with_field("user", "ana")
        .with_field("id", 42);
    group.bench_function("with_context", |b| {
        b.iter(|| {
            logger
                .info(black_box("User {user} ({id}) logged in from {env}"), &ctx)
                .unwrap()
        });
    });

    group.bench_function("file_and_line", |b| {
        b.iter(|| logger.debug(black_box("at {file}:{line}"), &empty).unwrap());
    });

    let cached = null_builder().cache_logs(true).build().unwrap();
    group.bench_function("with_record_cache", |b| {
        b.iter(|| cached.info(black_box("Cached message"), &empty).unwrap());
    });

    let reported = null_builder()
        .reporter(|severity: ReportSeverity, message: &str| -> Result<()> {
            black_box((severity, message));
            Ok(())
        })
        .build()
        .unwrap();
    group.bench_function("with_reporter", |b| {
        b.iter(|| reported.error(black_box("Reported message"), &empty).unwrap());
    });

    group.finish();
}

fn bench_chain_length(c: &mut Criterion) {
    let mut group = c.benchmark_group("chain_length");

    for len in [1usize, 4, 16] {
        let mut builder = Logger::builder();
        for i in 0..len {
            let id = format!("null-{}", i);
            builder = builder
                .factory(id.as_str(), |_config: &HandlerConfig| {
                    Ok(Box::new(NullHandler) as Box<dyn Handler>)
                })
                .handler(id, json!({}));
        }
        let logger = builder.build().unwrap();
        logger.warm_up().unwrap();

        group.throughput(Throughput::Elements(len as u64));
        group.bench_with_input(BenchmarkId::from_parameter(len), &logger, |b, logger| {
            b.iter(|| logger.warning(black_box("Chained message"), &LogContext::new()).unwrap());
        });
    }

    group.finish();
}

fn bench_concurrent_logging(c: &mut Criterion) {
    let mut group = c.benchmark_group("concurrent_logging");

    let logger = Arc::new(null_builder().build().unwrap());

    group.bench_function("single_thread", |b| {
        let logger = Arc::clone(&logger);
        b.iter(|| {
            logger
                .info(black_box("Concurrent message"), &LogContext::new())
                .unwrap();
        });
    });

    group.bench_function("multi_thread_4", |b| {
        let logger = Arc::clone(&logger);
        b.iter(|| {
            let handles: Vec<_> = (0..4)
                .map(|_| {
                    let logger = Arc::clone(&logger);
                    std::thread::spawn(move || {
                        logger
                            .info(black_box("Concurrent message"), &LogContext::new())
                            .unwrap();
                    })
                })
                .collect();

            for handle in handles {
                handle.join().unwrap();
            }
        });
    });

    group.finish();
}

// ============================================================================
// Level Filtering Benchmarks
// ============================================================================

fn bench_level_filtering(c: &mut Criterion) {
    let mut group = c.benchmark_group("level_filtering");
    group.throughput(Throughput::Elements(1));

    let logger = null_builder().threshold(LogLevel::Error).build().unwrap();
    let empty = LogContext::new();

    group.bench_function("filtered_out", |b| {
        b.iter(|| logger.debug(black_box("Debug message"), &empty).unwrap());
    });

    group.bench_function("by_name", |b| {
        b.iter(|| logger.log(black_box("notice"), "Named level", &empty).unwrap());
    });

    group.bench_function("by_rank", |b| {
        b.iter(|| logger.log(black_box(7_i64), "Ranked level", &empty).unwrap());
    });

    group.finish();
}

// ============================================================================
// Interpolation Benchmarks
// ============================================================================

fn bench_interpolation(c: &mut Criterion) {
    let mut group = c.benchmark_group("interpolation");
    group.throughput(Throughput::Elements(1));

    let runtime = AmbientRuntime::new()
        .with_environment("production")
        .with_process_env(false)
        .with_env_var("API_HOST", "localhost");
    let request: VarMap = [("page".to_string(), json!(2)), ("q".to_string(), json!("rust"))]
        .into_iter()
        .collect();
    runtime.set_get_vars(request);

    let ctx: LogContext = (0..16).map(|i| (format!("k{}", i), i)).collect();

    group.bench_function("no_placeholders", |b| {
        b.iter(|| {
            interpolate(
                Message::from(black_box("A message without any tokens")),
                &ctx,
                &runtime,
                None,
            )
        });
    });

    group.bench_function("sixteen_keys", |b| {
        b.iter(|| {
            interpolate(
                Message::from(black_box("{k0} {k3} {k7} {k11} {k15} {missing}")),
                &ctx,
                &runtime,
                None,
            )
        });
    });

    group.bench_function("runtime_placeholders", |b| {
        b.iter(|| {
            interpolate(
                Message::from(black_box("{env} {env:API_HOST} {env:UNSET} {get_vars}")),
                &ctx,
                &runtime,
                None,
            )
        });
    });

    group.finish();
}

// ============================================================================
// Criterion Configuration
// ============================================================================

criterion_group!(
    benches,
    bench_logger_creation,
    bench_dispatch,
    bench_chain_length,
    bench_concurrent_logging,
    bench_level_filtering,
    bench_interpolation
);

criterion_main!(benches);

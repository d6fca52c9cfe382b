//! Configuration-driven logging example
//!
//! Builds a logger from JSON, attaches a reporter and the record cache, and
//! shows request-scoped placeholders.
//!
//! Run with: cargo run --example config_logging

use rust_log_dispatcher::core::runtime::VarMap;
use rust_log_dispatcher::prelude::*;
use serde_json::json;

const CONFIG: &str = r#"{
    "threshold": ["emergency", "alert", "critical", "error", "warning", "info"],
    "date_format": "%H:%M:%S",
    "cache_logs": true,
    "handlers": {
        "console": { "colors": false }
    }
}"#;

fn main() -> Result<()> {
    println!("=== Rust Log Dispatcher - Config Example ===\n");

    let config = LoggerConfig::from_json_str(CONFIG)?;
    let runtime = AmbientRuntime::new()
        .with_environment("staging")
        .with_roots(PathRoots::new().with_app(env!("CARGO_MANIFEST_DIR")));

    let logger = LoggerBuilder::from_config(&config)
        .runtime(runtime.clone())
        .reporter(|severity: ReportSeverity, message: &str| -> Result<()> {
            println!("   [reporter:{}] {}", severity, message);
            Ok(())
        })
        .build()?;

    println!("1. Record from {{file}} with sanitised path:");
    logger.info("Booting {env} from {file}", &LogContext::new())?;

    println!("\n2. Request-scoped variables:");
    {
        let get: VarMap = [("page".to_string(), json!(3))].into_iter().collect();
        let post: VarMap = [("name".to_string(), json!("ana"))].into_iter().collect();
        let _request = runtime.enter_request(get, post);
        logger.warning("Slow request {get_vars} {post_vars}", &LogContext::new())?;
    }

    println!("\n3. Suppressed debug record:");
    let dispatched = logger.debug("never shown", &LogContext::new())?;
    println!("   dispatched: {}", dispatched);

    println!("\n4. Cached records:");
    for entry in logger.cached_records() {
        println!("   {} {}", entry.level.label(), entry.message.lines().next().unwrap_or(""));
    }

    let metrics = logger.metrics();
    println!(
        "\nDispatched: {}, suppressed: {}",
        metrics.dispatched(),
        metrics.suppressed()
    );

    println!("\n=== Example completed successfully! ===");

    Ok(())
}

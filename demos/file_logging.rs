//! File logging example
//!
//! Demonstrates a handler chain writing severe records to a file and
//! everything to the console.
//!
//! Run with: cargo run --example file_logging --features file

use rust_log_dispatcher::prelude::*;
use serde_json::json;

fn main() -> Result<()> {
    println!("=== Rust Log Dispatcher - File Logging Example ===\n");

    let logger = Logger::builder()
        .date_format("%Y-%m-%d %H:%M:%S%.3f")
        .handler(
            "file",
            json!({
                "path": "logs/application.log",
                "handles": ["emergency", "alert", "critical", "error", "warning"]
            }),
        )
        .handler("console", json!({ "colors": true }))
        .build()?;

    // Surface a bad path now instead of on the first record
    logger.warm_up()?;

    println!("1. Logging to both console and file:");
    let ctx = LogContext::new();
    logger.info("Application started", &ctx)?;
    logger.debug("Loading configuration...", &ctx)?;
    logger.warning("Using default settings for some options", &ctx)?;
    logger.error("Failed to load optional plugin", &ctx)?;

    println!("\n2. Performing some operations:");
    for i in 1..=5 {
        let ctx = LogContext::new().with_field("i", i);
        logger.info("Processing item {i}/5", &ctx)?;
        if i == 3 {
            logger.warning("Item {i} took longer than expected", &ctx)?;
        }
    }

    println!("\n3. Logging an error value:");
    if let Err(err) = std::fs::read_to_string("does/not/exist.toml") {
        let ctx = LogContext::new().with_exception(&err);
        logger.critical("Configuration unreadable: {exception}", &ctx)?;
    }

    println!("\n=== Example completed successfully! ===");
    println!("Check 'logs/application.log' for warning and above");

    Ok(())
}

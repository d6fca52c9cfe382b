//! Basic logger usage example
//!
//! Demonstrates the console handler, the eight severities and placeholder
//! interpolation.
//!
//! Run with: cargo run --example basic_usage

use rust_log_dispatcher::prelude::*;
use rust_log_dispatcher::{info, warning};
use serde_json::json;

fn main() -> Result<()> {
    println!("=== Rust Log Dispatcher - Basic Usage Example ===\n");

    let logger = Logger::builder()
        .handler("console", json!({ "colors": true }))
        .runtime(AmbientRuntime::new().with_environment("development"))
        .build()?;

    println!("1. Logging at every level:");
    let ctx = LogContext::new();
    logger.emergency("This is an emergency message", &ctx)?;
    logger.alert("This is an alert message", &ctx)?;
    logger.critical("This is a critical message", &ctx)?;
    logger.error("This is an error message", &ctx)?;
    logger.warning("This is a warning message", &ctx)?;
    logger.notice("This is a notice message", &ctx)?;
    logger.info("This is an info message", &ctx)?;
    logger.debug("This is a debug message", &ctx)?;

    println!("\n2. Placeholders:");
    let ctx = LogContext::new()
        .with_field("user", "ana")
        .with_field("id", 42);
    logger.info("User {user} (#{id}) logged in from {env}", &ctx)?;
    logger.notice("Called from {file} line {line}", &ctx)?;
    logger.warning("API key is {env:API_KEY}", &ctx)?;

    println!("\n3. Threshold by rank:");
    let strict = Logger::builder()
        .threshold(LogLevel::Error)
        .handler("console", json!({ "colors": false }))
        .build()?;
    println!("   Threshold set to ERROR (rank 4) - warning and info won't show:");
    let shown = strict.error("Error message (visible)", &LogContext::new())?;
    let hidden = strict.info("Info message (hidden)", &LogContext::new())?;
    println!("   dispatched: error={}, info={}", shown, hidden);

    println!("\n4. Macros:");
    info!(logger, "Server listening on port {}", 8080)?;
    warning!(logger, "{} connections pending", 3)?;

    println!("\n=== Example completed successfully! ===");

    Ok(())
}

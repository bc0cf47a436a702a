//! Basic logger usage example
//!
//! Demonstrates levels, call-scoped styling, timers, tables and recorded
//! log export.
//!
//! Run with: cargo run --example basic_usage

use namespace_logger::prelude::*;
use serde_json::json;

fn main() -> Result<()> {
    println!("=== Namespace Logger - Basic Usage Example ===\n");

    let logger = create_logger(
        "Shop",
        LoggerOptions {
            banner: true,
            record_to_storage: true,
            ..LoggerOptions::default()
        },
    );

    println!("1. Logging at different levels:");
    logger.debug("This is a debug message");
    logger.info("This is an info message");
    logger.warn("This is a warning message");
    logger.error("This is an error message");
    logger.log("This message is never gated");

    println!("\n2. Styling a single call:");
    logger
        .color("magenta")
        .bold()
        .label("cart")
        .label("retry")
        .warn(vec![json!("payment declined"), json!({"attempt": 2})]);
    logger.info("Back to the default style");

    println!("\n3. Timers and tables:");
    logger.label("checkout").time();
    logger.table(json!([{"sku": "A-1", "qty": 2}, {"sku": "B-7", "qty": 1}]));
    logger.label("checkout").time_end();

    println!("\n4. Raising the minimum level through the registry:");
    Registry::global().apply(RegistrySetting::Level(LogLevel::Warn));
    logger.info("Info message (hidden)");
    logger.warn("Warning message (visible)");

    println!("\n5. Exporting recorded logs:");
    logger.flush_records()?;
    let dir = std::env::temp_dir();
    match download_logs(&logger, &dir)? {
        Some(path) => println!("   written to {}", path.display()),
        None => println!("   nothing recorded"),
    }

    println!("\n=== Example completed successfully! ===");

    Ok(())
}

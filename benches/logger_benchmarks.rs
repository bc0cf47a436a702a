//! Criterion benchmarks for namespace_logger

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use namespace_logger::core::call_stack;
use namespace_logger::core::template::{render_title, TitleFields, DEFAULT_TEMPLATE};
use namespace_logger::prelude::*;
use serde_json::json;
use std::sync::Arc;

fn capture_logger(namespace: &str) -> Logger {
    Logger::builder(namespace).sink(MemoryConsole::new()).build()
}

// ============================================================================
// Logger Creation Benchmarks
// ============================================================================

fn bench_logger_creation(c: &mut Criterion) {
    let mut group = c.benchmark_group("logger_creation");
    group.throughput(Throughput::Elements(1));

    group.bench_function("builder", |b| {
        b.iter(|| black_box(capture_logger("bench")));
    });

    group.bench_function("registry_hit", |b| {
        let registry = Registry::new();
        registry.get_or_create("bench", || capture_logger("bench"));
        b.iter(|| black_box(registry.get_or_create("bench", || capture_logger("bench"))));
    });

    group.finish();
}

// ============================================================================
// Logging Performance Benchmarks
// ============================================================================

fn bench_logging(c: &mut Criterion) {
    let mut group = c.benchmark_group("logging");
    group.throughput(Throughput::Elements(1));

    let console = MemoryConsole::new();
    let plain = Logger::builder("bench")
        .formatter("[$namespace$] [$level$]")
        .sink(console.clone())
        .build();
    let tracked = Logger::builder("bench")
        .sink(console.clone())
        .build();
    let browser = Logger::builder("bench")
        .formatter("[$namespace$] [$level$]")
        .target(Target::Browser)
        .sink(console.clone())
        .build();

    group.bench_function("info_without_tracker", |b| {
        b.iter(|| {
            plain.info(black_box("Info message"));
            console.clear();
        });
    });

    group.bench_function("info_with_tracker", |b| {
        b.iter(|| {
            tracked.info(black_box("Info message"));
            console.clear();
        });
    });

    group.bench_function("styled_warn", |b| {
        b.iter(|| {
            plain
                .color("orange")
                .bold()
                .label("cart")
                .warn(black_box("Warning message"));
            console.clear();
        });
    });

    group.bench_function("browser_info_with_object", |b| {
        let messages = Messages::new().with("order").with(json!({"id": 42, "items": [1, 2, 3]}));
        b.iter(|| {
            browser.info(black_box(messages.clone()));
            console.clear();
        });
    });

    group.finish();
}

// ============================================================================
// Level Filtering Benchmarks
// ============================================================================

fn bench_level_filtering(c: &mut Criterion) {
    let mut group = c.benchmark_group("level_filtering");

    let logger = Logger::builder("bench")
        .level(LogLevel::Error)
        .sink(MemoryConsole::new())
        .build();

    group.bench_function("filtered_debug", |b| {
        b.iter(|| logger.debug(black_box("Filtered message")));
    });

    group.bench_function("disabled_logger", |b| {
        let disabled = Logger::builder("bench")
            .enabled(false)
            .sink(MemoryConsole::new())
            .build();
        b.iter(|| disabled.error(black_box("Disabled message")));
    });

    group.finish();
}

// ============================================================================
// Rendering Benchmarks
// ============================================================================

fn bench_rendering(c: &mut Criterion) {
    let mut group = c.benchmark_group("rendering");

    let fields = TitleFields {
        namespace: "bench".to_string(),
        time: "2025-01-08 10:30:45".to_string(),
        level: "INFO".to_string(),
        tracker: String::new(),
        label: "a|b".to_string(),
    };

    group.bench_function("render_title", |b| {
        b.iter(|| black_box(render_title(black_box(DEFAULT_TEMPLATE), &fields)));
    });

    group.bench_function("resolve_trace", |b| {
        let trace = "Error\n    at resolve (src/core/call_stack.rs:104:5)\n    \
                     at print (src/core/logger.rs:300:9)\n    \
                     at info (src/core/logger.rs:240:9)\n    \
                     at checkout (src/cart.rs:12:5)";
        b.iter(|| black_box(call_stack::resolve_trace(black_box(trace), 0)));
    });

    group.finish();
}

// ============================================================================
// Recording Benchmarks
// ============================================================================

fn bench_recording(c: &mut Criterion) {
    let mut group = c.benchmark_group("recording");
    group.throughput(Throughput::Elements(100));

    let logger = Arc::new(
        Logger::builder("bench")
            .formatter("[$namespace$]")
            .record_to_storage(true)
            .overflow_policy(OverflowPolicy::Block)
            .sink(MemoryConsole::new())
            .build(),
    );

    group.bench_function("record_and_flush_100", |b| {
        b.iter(|| {
            for i in 0..100 {
                logger.info(black_box(format!("message {}", i)));
            }
            logger.flush_records().expect("flush failed");
            logger.stores().logs.clear().expect("clear failed");
        });
    });

    group.bench_function("export_100", |b| {
        for i in 0..100 {
            logger.info(format!("message {}", i));
        }
        logger.flush_records().expect("flush failed");
        let store = Arc::clone(&logger.stores().logs);
        b.iter(|| black_box(export_logs(store.as_ref()).expect("export failed")));
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_logger_creation,
    bench_logging,
    bench_level_filtering,
    bench_rendering,
    bench_recording
);
criterion_main!(benches);

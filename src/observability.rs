//! Observability module for tracing setup, spans and metrics recording.
//!
//! This module provides:
//! - Structured logging with configurable levels and formats
//! - Tracing span creation utilities
//! - Metrics recording through the `metrics` facade
//!
//! No exporter is installed here. Recording without a registered recorder is a no-op,
//! so the library stays usable from tests and embedding applications.

use std::time::Duration;

use anyhow::Result;
use tracing_subscriber::prelude::*;

use crate::observability_config::ObservabilityConfig;

/// Initialize structured logging with tracing and configuration
///
/// Pretty output is used when the configuration asks for it, JSON otherwise. Calling this
/// more than once keeps the first subscriber.
pub fn init_tracing_with_config(config: &ObservabilityConfig) -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(format!("cookbook_core={}", config.log_level).parse()?)
        .add_directive(format!("shopping_list={}", config.log_level).parse()?);

    let installed = if config.use_pretty_logs() {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .pretty()
                    .with_target(true)
                    .with_thread_ids(false)
                    .with_thread_names(false)
                    .with_writer(std::io::stderr),
            )
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_target(true)
                    .with_thread_ids(true)
                    .with_thread_names(true)
                    .with_writer(std::io::stderr),
            )
            .try_init()
    };

    if let Err(e) = installed {
        tracing::debug!(error = %e, "Tracing subscriber already installed");
        return Ok(());
    }

    tracing::info!(
        environment = %config.environment,
        log_level = %config.log_level,
        log_format = %config.log_format,
        "Tracing initialized with structured logging"
    );
    Ok(())
}

/// Create a span for shopping list aggregation
pub fn aggregation_span(recipe_count: usize) -> tracing::Span {
    tracing::info_span!(
        "shopping_list_operation",
        operation = "generate",
        recipe_count = recipe_count,
        component = "shopping_list"
    )
}

/// Create a span for recipe scaling
pub fn scaling_span(factor: f64, line_count: usize) -> tracing::Span {
    tracing::info_span!(
        "scaling_operation",
        factor = factor,
        line_count = line_count,
        component = "scaling"
    )
}

/// Record the outcome of parsing one ingredient line
pub fn record_parse_metrics(has_quantity: bool, has_unit: bool) {
    metrics::counter!(
        "ingredient_lines_parsed_total",
        "quantity" => if has_quantity { "found" } else { "missing" },
        "unit" => if has_unit { "found" } else { "missing" }
    )
    .increment(1);
}

/// Record shopping list aggregation metrics
pub fn record_shopping_list_metrics(
    duration: Duration,
    recipe_count: usize,
    line_count: usize,
    item_count: usize,
) {
    metrics::counter!("shopping_list_operations_total").increment(1);
    metrics::histogram!("shopping_list_duration_seconds").record(duration.as_secs_f64());
    metrics::histogram!("shopping_list_recipe_count").record(recipe_count as f64);
    metrics::histogram!("shopping_list_line_count").record(line_count as f64);
    metrics::histogram!("shopping_list_item_count").record(item_count as f64);

    metrics::histogram!("shopping_list_throughput_lines_per_sec")
        .record(lines_per_second(duration, line_count));
}

/// Lines processed per second, 0 for an instantaneous run
pub fn lines_per_second(duration: Duration, line_count: usize) -> f64 {
    if duration.as_secs_f64() > 0.0 {
        line_count as f64 / duration.as_secs_f64()
    } else {
        0.0
    }
}

/// Record a scaling run
pub fn record_scaling_metrics(line_count: usize, converted_count: usize) {
    metrics::counter!("scaling_operations_total").increment(1);
    metrics::histogram!("scaling_line_count").record(line_count as f64);
    metrics::counter!("scaling_unit_conversions_total").increment(converted_count as u64);
}

/// Record an application error by type and component
pub fn record_error_metrics(error_type: &str, component: &str) {
    let error_type = error_type.to_string();
    let component = component.to_string();
    metrics::counter!("errors_total", "type" => error_type, "component" => component).increment(1);
}

//! Metrics collection.
//!
//! # Metrics
//! - `bankwire_attempts_total` (counter): transport attempts by route, result
//! - `bankwire_retries_total` (counter): backoff sleeps by route
//! - `bankwire_outcomes_total` (counter): classified calls by operation, kind
//! - `bankwire_call_duration_seconds` (histogram): end-to-end call latency
//!
//! # Design Decisions
//! - The library records through the `metrics` facade only; installing an
//!   exporter is the embedding application's choice
//! - Label values are static strings, never user data

use std::time::Instant;

/// Record one transport attempt.
pub fn record_attempt(route: &'static str, result: &'static str) {
    metrics::counter!("bankwire_attempts_total", "route" => route, "result" => result).increment(1);
}

/// Record a backoff sleep before a retry.
pub fn record_retry(route: &'static str) {
    metrics::counter!("bankwire_retries_total", "route" => route).increment(1);
}

/// Record the end of a facade call.
pub fn record_outcome(operation: &'static str, kind: &'static str, start_time: Instant) {
    metrics::counter!("bankwire_outcomes_total", "operation" => operation, "kind" => kind).increment(1);
    metrics::histogram!("bankwire_call_duration_seconds", "operation" => operation)
        .record(start_time.elapsed().as_secs_f64());
}

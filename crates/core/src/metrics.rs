//! Prometheus metrics for core components.
//!
//! This module provides metrics for:
//! - Conversions (counts by result, duration)
//! - Uploads (counts, bytes)

use once_cell::sync::Lazy;
use prometheus::{HistogramOpts, HistogramVec, IntCounter, IntCounterVec, Opts, Registry};

/// Conversions total by result.
pub static CONVERSIONS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("mediaconv_conversions_total", "Total conversion attempts"),
        &["result"], // "ok", "failed"
    )
    .unwrap()
});

/// Conversion duration in seconds by target kind.
pub static CONVERSION_DURATION: Lazy<HistogramVec> = Lazy::new(|| {
    HistogramVec::new(
        HistogramOpts::new(
            "mediaconv_conversion_duration_seconds",
            "Duration of a single conversion",
        )
        .buckets(vec![0.5, 1.0, 2.5, 5.0, 10.0, 30.0, 60.0, 120.0, 300.0, 600.0]),
        &["kind"], // "audio", "video"
    )
    .unwrap()
});

/// Files uploaded since startup.
pub static UPLOADS_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    IntCounter::new("mediaconv_uploads_total", "Total files uploaded").unwrap()
});

/// Bytes uploaded since startup.
pub static UPLOAD_BYTES_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    IntCounter::new("mediaconv_upload_bytes_total", "Total bytes uploaded").unwrap()
});

/// Registers core metrics with the given registry.
pub fn register_core_metrics(registry: &Registry) {
    let _ = registry.register(Box::new(CONVERSIONS_TOTAL.clone()));
    let _ = registry.register(Box::new(CONVERSION_DURATION.clone()));
    let _ = registry.register(Box::new(UPLOADS_TOTAL.clone()));
    let _ = registry.register(Box::new(UPLOAD_BYTES_TOTAL.clone()));
}

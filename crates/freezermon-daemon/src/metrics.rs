//! Prometheus gauges published by the exporter.

use anyhow::{Context, Result};
use prometheus::{Encoder, Gauge, Registry, TextEncoder};

use crate::sampler::MetricsSink;

/// The two gauges scraped from `/metrics`.
pub struct Metrics {
    registry: Registry,
    temperature: Gauge,
    up: Gauge,
}

impl Metrics {
    /// Creates the gauges and registers them on a private registry.
    pub fn new() -> Result<Self> {
        let temperature = Gauge::new("temperature_celsius", "Current temperature in Celsius")
            .context("Failed to create temperature gauge")?;
        let up = Gauge::new(
            "up",
            "Whether the collector is healthy (1 = healthy, 0 = failed)",
        )
        .context("Failed to create up gauge")?;

        let registry = Registry::new();
        registry
            .register(Box::new(temperature.clone()))
            .context("Failed to register temperature gauge")?;
        registry
            .register(Box::new(up.clone()))
            .context("Failed to register up gauge")?;

        Ok(Self {
            registry,
            temperature,
            up,
        })
    }

    pub fn temperature(&self) -> f64 {
        self.temperature.get()
    }

    pub fn up(&self) -> f64 {
        self.up.get()
    }

    /// Encodes all gauges in the Prometheus text exposition format.
    pub fn render(&self) -> Result<String> {
        let mut buffer = Vec::new();
        TextEncoder::new()
            .encode(&self.registry.gather(), &mut buffer)
            .context("Failed to encode metrics")?;
        String::from_utf8(buffer).context("Metrics output is not UTF-8")
    }

    /// Content type of [`render`](Self::render) output.
    pub fn content_type(&self) -> &'static str {
        prometheus::TEXT_FORMAT
    }
}

impl MetricsSink for Metrics {
    fn set_temperature(&self, celsius: f64) {
        self.temperature.set(celsius);
    }

    fn set_up(&self, up: bool) {
        self.up.set(if up { 1.0 } else { 0.0 });
    }
}

//! Periodic temperature sampling.
//!
//! The sampler is the only writer of the published gauges. A failed sample
//! overwrites the last good temperature with 0 and drops `up` to 0, so a
//! broken sensor never keeps reporting a stale, plausible value.

use freezermon_w1::DeviceRegistry;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info, warn};

/// Time between two samples.
pub const SAMPLE_INTERVAL: Duration = Duration::from_secs(10);

/// Destination for sampled values.
pub trait MetricsSink: Send + Sync {
    /// Publishes the current temperature in degrees Celsius.
    fn set_temperature(&self, celsius: f64);

    /// Publishes collector health.
    fn set_up(&self, up: bool);
}

/// Something that yields one temperature reading per call.
pub trait TemperatureSource: Send + Sync {
    fn measure(&self) -> freezermon_w1::Result<f64>;
}

impl TemperatureSource for DeviceRegistry {
    fn measure(&self) -> freezermon_w1::Result<f64> {
        self.measure_first()
    }
}

/// Drives the gauges from a temperature source.
pub struct Sampler<S> {
    source: S,
    sink: Arc<dyn MetricsSink>,
    verbose: bool,
    interval: Duration,
}

impl<S: TemperatureSource> Sampler<S> {
    pub fn new(source: S, sink: Arc<dyn MetricsSink>, verbose: bool) -> Self {
        Self {
            source,
            sink,
            verbose,
            interval: SAMPLE_INTERVAL,
        }
    }

    #[cfg(test)]
    fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Takes one sample and publishes the outcome.
    pub fn tick(&self) -> freezermon_w1::Result<f64> {
        match self.source.measure() {
            Ok(celsius) => {
                if self.verbose {
                    info!("Sampled temperature: {:.2}°C", celsius);
                } else {
                    debug!("Sampled temperature: {:.2}°C", celsius);
                }
                self.sink.set_temperature(celsius);
                self.sink.set_up(true);
                Ok(celsius)
            }
            Err(e) => {
                warn!("Error measuring temperature: {}", e);
                self.sink.set_temperature(0.0);
                self.sink.set_up(false);
                Err(e)
            }
        }
    }

    /// Samples forever.
    ///
    /// Each sample runs on the blocking pool, since a sensor read stalls for
    /// the whole conversion time. If this future stops for any reason
    /// (panic, abort, runtime shutdown), `up` is forced to 0 on the way out.
    pub async fn run(self)
    where
        S: 'static,
    {
        let _guard = DownOnExit(self.sink.clone());
        let sampler = Arc::new(self);
        loop {
            let worker = sampler.clone();
            if let Err(e) = tokio::task::spawn_blocking(move || worker.tick()).await {
                error!("Sampling worker failed: {}", e);
                sampler.sink.set_temperature(0.0);
                sampler.sink.set_up(false);
            }
            tokio::time::sleep(sampler.interval).await;
        }
    }
}

/// Sets `up` to 0 when dropped.
struct DownOnExit(Arc<dyn MetricsSink>);

impl Drop for DownOnExit {
    fn drop(&mut self) {
        if std::thread::panicking() {
            error!("Sampling task panicked, setting up to 0");
        } else {
            info!("Sampling task stopped, setting up to 0");
        }
        self.0.set_up(false);
    }
}

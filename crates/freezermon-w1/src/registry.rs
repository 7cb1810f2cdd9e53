//! Sensor discovery and measurement.
//!
//! Only one sensor is tracked. With several on the bus, the first one the
//! directory listing returns wins; the listing is not sorted.

use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::device::DeviceId;
use crate::reading::parse_reading;
use crate::{Error, Result, DATA_FILE};

/// Sensors found on the bus at startup.
#[derive(Debug, Clone)]
pub struct DeviceRegistry {
    base_dir: PathBuf,
    devices: Vec<DeviceId>,
}

impl DeviceRegistry {
    /// Lists `base_dir` and keeps every entry with a supported family prefix,
    /// in enumeration order.
    pub fn discover<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let entries = fs::read_dir(&base_dir).map_err(|source| Error::DeviceDir {
            path: base_dir.clone(),
            source,
        })?;

        let mut devices = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|source| Error::DeviceDir {
                path: base_dir.clone(),
                source,
            })?;
            let file_name = entry.file_name();
            let Some(name) = file_name.to_str() else {
                debug!("Skipping non UTF-8 entry: {:?}", file_name);
                continue;
            };

            debug!("Checking file: {}", name);
            if let Some(id) = DeviceId::parse(name) {
                debug!("Found device: {} ({:?})", id, id.family());
                devices.push(id);
            }
        }

        Ok(Self { base_dir, devices })
    }

    /// Creates a registry from already known devices.
    pub fn with_devices<P: AsRef<Path>>(base_dir: P, devices: Vec<DeviceId>) -> Self {
        Self {
            base_dir: base_dir.as_ref().to_path_buf(),
            devices,
        }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    pub fn devices(&self) -> &[DeviceId] {
        &self.devices
    }

    pub fn device_count(&self) -> usize {
        self.devices.len()
    }

    /// Returns the sensor that [`measure_first`](Self::measure_first) reads.
    pub fn first(&self) -> Option<&DeviceId> {
        self.devices.first()
    }

    /// Path of the data file for `id`.
    pub fn data_path(&self, id: &DeviceId) -> PathBuf {
        self.base_dir.join(id.as_str()).join(DATA_FILE)
    }

    /// Reads one sensor and returns its temperature in degrees Celsius.
    pub fn measure(&self, id: &DeviceId) -> Result<f64> {
        let path = self.data_path(id);
        match path.try_exists() {
            Ok(true) => {}
            Ok(false) => return Err(Error::NotFound(path)),
            Err(source) => return Err(Error::Io { path, source }),
        }

        let contents = match fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(source) => return Err(Error::Io { path, source }),
        };

        parse_reading(&contents).map_err(|e| Error::from_reading(path, e))
    }

    /// Reads the first discovered sensor.
    pub fn measure_first(&self) -> Result<f64> {
        let id = self.first().ok_or(Error::NoDevices)?;
        self.measure(id)
    }
}

//! Freezermon 1-Wire Library
//!
//! Discovers DS18B20-family temperature sensors exposed by the kernel's
//! `w1` driver and parses their `w1_slave` output into Celsius readings.

pub mod device;
pub mod error;
pub mod reading;
pub mod registry;

pub use device::{DeviceId, Family};
pub use error::{Error, ErrorKind, Result};
pub use reading::{parse_reading, ReadingError};
pub use registry::DeviceRegistry;

/// Directory where the `w1` bus driver exposes one entry per slave device.
pub const DEVICE_DIR: &str = "/sys/bus/w1/devices";

/// Data file inside each device directory.
pub const DATA_FILE: &str = "w1_slave";

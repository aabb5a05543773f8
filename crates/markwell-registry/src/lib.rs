//! Markwell Device Registry
//!
//! Loads literary-device definitions from a knowledge-base JSON file and
//! resolves the (often imprecise) device names students write to canonical
//! registry entries, via a ladder of matching strategies with explicit
//! confidence values.

#![warn(missing_docs)]
#![warn(clippy::all)]

mod device;
mod error;
mod registry;

pub use device::{Device, DeviceRecord};
pub use error::RegistryError;
pub use registry::{DeviceMatch, DeviceRegistry};

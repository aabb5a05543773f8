//! Device records as stored in the knowledge-base JSON

use serde::{Deserialize, Serialize};

/// One device entry as it appears on disk
///
/// Records carry two function fields; `pedagogical_function` holds prose
/// while `function` may hold internal shorthand, so the former is preferred
/// when both are present.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeviceRecord {
    /// Canonical device name
    pub name: String,

    /// What the device is
    #[serde(default)]
    pub definition: String,

    /// Prose description of what the device accomplishes
    #[serde(default)]
    pub pedagogical_function: Option<String>,

    /// Fallback function field
    #[serde(default)]
    pub function: Option<String>,

    /// Device classification
    #[serde(default)]
    pub classification: String,

    /// Role the device plays in the work's larger pattern
    #[serde(default)]
    pub macro_role: String,

    /// Usage examples
    #[serde(default)]
    pub examples: Vec<String>,
}

/// A resolved in-memory device entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Device {
    /// Canonical device name, as written in the registry
    pub name: String,
    /// What the device is
    pub definition: String,
    /// What the device accomplishes
    pub function: String,
    /// Device classification
    pub classification: String,
    /// Role in the work's larger pattern
    pub macro_role: String,
    /// Usage examples
    pub examples: Vec<String>,
}

impl From<DeviceRecord> for Device {
    fn from(record: DeviceRecord) -> Self {
        let function = record
            .pedagogical_function
            .filter(|f| !f.is_empty())
            .or(record.function)
            .unwrap_or_default();
        Self {
            name: record.name,
            definition: record.definition,
            function,
            classification: record.classification,
            macro_role: record.macro_role,
            examples: record.examples,
        }
    }
}

//! Resource kinds and the per-kind cost/capacity table.
use std::collections::HashMap;

use serde_derive::{Deserialize, Serialize};

use crate::error::AdmissionError;
use crate::util::load_yaml;

/// The kinds of physical resources a function can be scheduled on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    Cpu,
    Gpu,
}

impl ResourceKind {
    /// All kinds, in the fixed order used wherever iteration order is observable.
    pub fn kinds() -> [ResourceKind; 2] {
        [ResourceKind::Cpu, ResourceKind::Gpu]
    }
}

/// Scalar attributes of one resource kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceClass {
    pub unit_cost: i32,
    pub node_memory: i32,
}

/// Validated map from every [`ResourceKind`] to its [`ResourceClass`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceTable {
    resource_classes: HashMap<ResourceKind, ResourceClass>,
}

#[derive(Debug, Clone, Deserialize)]
struct ResourceTableConfig {
    resource_classes: HashMap<ResourceKind, ResourceClass>,
}

impl ResourceTable {
    pub fn new(
        resource_classes: HashMap<ResourceKind, ResourceClass>,
    ) -> Result<ResourceTable, AdmissionError> {
        for kind in ResourceKind::kinds() {
            let class = resource_classes.get(&kind).ok_or_else(|| {
                AdmissionError::Configuration(format!("no resource class defined for {:?}", kind))
            })?;
            if class.unit_cost <= 0 {
                return Err(AdmissionError::Configuration(format!(
                    "unit_cost of {:?} must be positive, got {}",
                    kind, class.unit_cost
                )));
            }
            if class.node_memory <= 0 {
                return Err(AdmissionError::Configuration(format!(
                    "node_memory of {:?} must be positive, got {}",
                    kind, class.node_memory
                )));
            }
        }
        Ok(ResourceTable { resource_classes })
    }

    /// Load and validate a resource class table from a yaml file:
    ///
    /// ```yaml
    /// resource_classes:
    ///   cpu:
    ///     unit_cost: 1
    ///     node_memory: 100
    ///   gpu:
    ///     unit_cost: 3
    ///     node_memory: 20
    /// ```
    pub fn from_yaml(file_path: &str) -> Result<ResourceTable, AdmissionError> {
        let config: ResourceTableConfig = load_yaml(file_path)?;
        ResourceTable::new(config.resource_classes)
    }

    pub fn unit_cost(&self, kind: ResourceKind) -> i32 {
        self.resource_classes[&kind].unit_cost
    }

    pub fn node_memory(&self, kind: ResourceKind) -> i32 {
        self.resource_classes[&kind].node_memory
    }
}

//! Shared constructors for unit tests across the workspace.
use std::collections::HashMap;

use crate::graph_extension::FuncData;
use crate::resource::{ResourceClass, ResourceKind, ResourceTable};

/// The reference table used throughout the test suite:
/// cpu = (unit_cost 1, node_memory 100), gpu = (unit_cost 3, node_memory 20).
pub fn reference_resource_table() -> ResourceTable {
    let mut resource_classes = HashMap::new();
    resource_classes.insert(
        ResourceKind::Cpu,
        ResourceClass {
            unit_cost: 1,
            node_memory: 100,
        },
    );
    resource_classes.insert(
        ResourceKind::Gpu,
        ResourceClass {
            unit_cost: 3,
            node_memory: 20,
        },
    );
    ResourceTable::new(resource_classes).unwrap()
}

pub fn create_func(
    id: i32,
    cpu_runtime: i32,
    gpu_runtime: i32,
    cpu_memory: i32,
    gpu_memory: i32,
) -> FuncData {
    let mut runtimes = HashMap::new();
    runtimes.insert(ResourceKind::Cpu, cpu_runtime);
    runtimes.insert(ResourceKind::Gpu, gpu_runtime);
    let mut max_memories = HashMap::new();
    max_memories.insert(ResourceKind::Cpu, cpu_memory);
    max_memories.insert(ResourceKind::Gpu, gpu_memory);
    FuncData::new(id, &runtimes, &max_memories)
}

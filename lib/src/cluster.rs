//! Physical nodes and the per-kind cluster inventory.
use std::collections::HashMap;

use log::warn;
use serde_derive::Deserialize;

use crate::error::AdmissionError;
use crate::resource::{ResourceKind, ResourceTable};
use crate::util::load_yaml;

/// A physical machine of one resource kind with finite memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub id: i32,
    pub kind: ResourceKind,
    pub available_memory: i32,
}

impl Node {
    pub fn new(id: i32, kind: ResourceKind, table: &ResourceTable) -> Node {
        Node {
            id,
            kind,
            available_memory: table.node_memory(kind),
        }
    }
}

/// Node inventory grouped by resource kind. Every kind has a pool (possibly
/// empty), each kept sorted by ascending available memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cluster {
    pub nodes_by_kind: HashMap<ResourceKind, Vec<Node>>,
}

impl Cluster {
    pub fn new(nodes: Vec<Node>) -> Cluster {
        let mut nodes_by_kind: HashMap<ResourceKind, Vec<Node>> = HashMap::new();
        for kind in ResourceKind::kinds() {
            nodes_by_kind.insert(kind, Vec::new());
        }
        for node in nodes {
            nodes_by_kind.entry(node.kind).or_default().push(node);
        }
        for (kind, pool) in nodes_by_kind.iter_mut() {
            if pool.is_empty() {
                warn!("the inventory holds no {:?} nodes", kind);
            }
            pool.sort_by_key(|node| node.available_memory);
        }
        Cluster { nodes_by_kind }
    }
}

#[derive(Debug, Clone, Deserialize)]
struct ClusterConfig {
    nodes: Vec<NodeConfig>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
struct NodeConfig {
    id: i32,
    kind: ResourceKind,
}

/// Load a cluster inventory from a yaml file:
///
/// ```yaml
/// nodes:
///   - id: 0
///     kind: cpu
///   - id: 1
///     kind: gpu
/// ```
///
/// Each node starts with the full memory its kind exposes in `table`.
pub fn create_cluster_from_yaml(
    file_path: &str,
    table: &ResourceTable,
) -> Result<Cluster, AdmissionError> {
    let config: ClusterConfig = load_yaml(file_path)?;
    let nodes = config
        .nodes
        .iter()
        .map(|node| Node::new(node.id, node.kind, table))
        .collect();
    Ok(Cluster::new(nodes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::reference_resource_table;

    #[test]
    fn test_node_new_starts_with_full_memory() {
        let table = reference_resource_table();
        let node = Node::new(0, ResourceKind::Gpu, &table);
        assert_eq!(node.available_memory, 20);
    }

    #[test]
    fn test_cluster_new_groups_nodes_by_kind() {
        let table = reference_resource_table();
        let cluster = Cluster::new(vec![
            Node::new(0, ResourceKind::Cpu, &table),
            Node::new(1, ResourceKind::Gpu, &table),
            Node::new(2, ResourceKind::Cpu, &table),
        ]);
        assert_eq!(cluster.nodes_by_kind[&ResourceKind::Cpu].len(), 2);
        assert_eq!(cluster.nodes_by_kind[&ResourceKind::Gpu].len(), 1);
    }

    #[test]
    fn test_cluster_new_empty_pool_for_absent_kind() {
        let table = reference_resource_table();
        let cluster = Cluster::new(vec![Node::new(0, ResourceKind::Cpu, &table)]);
        assert!(cluster.nodes_by_kind[&ResourceKind::Gpu].is_empty());
    }

    #[test]
    fn test_cluster_new_pools_sorted_by_ascending_memory() {
        let table = reference_resource_table();
        let mut partially_used = Node::new(0, ResourceKind::Cpu, &table);
        partially_used.available_memory = 40;
        let cluster = Cluster::new(vec![
            Node::new(1, ResourceKind::Cpu, &table),
            partially_used,
        ]);
        let pool = &cluster.nodes_by_kind[&ResourceKind::Cpu];
        assert_eq!(pool[0].id, 0);
        assert_eq!(pool[1].id, 1);
    }

    #[test]
    fn test_create_cluster_from_yaml_normal() {
        let table = reference_resource_table();
        let cluster =
            create_cluster_from_yaml("tests/sample_inputs/cluster.yaml", &table).unwrap();
        assert_eq!(cluster.nodes_by_kind[&ResourceKind::Cpu].len(), 2);
        assert_eq!(cluster.nodes_by_kind[&ResourceKind::Gpu].len(), 1);
        assert_eq!(cluster.nodes_by_kind[&ResourceKind::Cpu][0].available_memory, 100);
    }
}

//! Memory-aware first-fit placement of one instance onto the cluster.
use std::collections::HashMap;

use lib::cluster::Cluster;
use lib::resource::ResourceKind;
use log::info;

use crate::enumerator::DAGInstance;

/// Place every function of `instance` onto a node of its assigned kind.
///
/// Work lists come in decreasing memory demand; each pool is scanned in
/// ascending available memory, so taking the first fitting node
/// approximates best-fit. Placement is all-or-nothing: it operates on a
/// snapshot of the pools and commits only when every function landed, so
/// on `None` the cluster is exactly as it was before the call.
pub fn get_placements(
    cluster: &mut Cluster,
    instance: &DAGInstance,
) -> Option<HashMap<i32, i32>> {
    let mut place_map = HashMap::new();
    let mut nodes_by_kind = cluster.nodes_by_kind.clone();

    for kind in ResourceKind::kinds() {
        let pool = nodes_by_kind.entry(kind).or_default();
        pool.sort_by_key(|node| node.available_memory);

        for &(func_id, memory_demand) in instance.funcs_per_kind(kind) {
            match pool
                .iter_mut()
                .find(|node| node.available_memory >= memory_demand)
            {
                Some(node) => {
                    place_map.insert(func_id, node.id);
                    node.available_memory -= memory_demand;
                }
                None => {
                    info!(
                        "no {:?} node fits function {} (demand {}); placement abandoned",
                        kind, func_id, memory_demand
                    );
                    return None;
                }
            }
        }
        pool.sort_by_key(|node| node.available_memory);
    }

    cluster.nodes_by_kind = nodes_by_kind;
    info!("placed {} functions", place_map.len());
    Some(place_map)
}

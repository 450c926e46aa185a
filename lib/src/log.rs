//! Serializable summaries of a planner run, dumped as yaml.
use std::collections::HashMap;

use petgraph::graph::Graph;
use serde::Serialize;
use serde_derive::{Deserialize, Serialize};

use crate::cluster::Cluster;
use crate::error::AdmissionError;
use crate::graph_extension::FuncData;
use crate::resource::ResourceKind;
use crate::util::append_info_to_yaml;

/// Serialize any struct and append it to a yaml file.
pub fn dump_struct(file_path: &str, target_struct: &impl Serialize) -> Result<(), AdmissionError> {
    let yaml = serde_yaml::to_string(target_struct).map_err(|source| AdmissionError::Yaml {
        path: file_path.to_string(),
        source,
    })?;
    append_info_to_yaml(file_path, &yaml)
}

#[derive(Clone, Default, Serialize, Deserialize)]
pub struct DAGInfo {
    num_funcs: usize,
    num_edges: usize,
}

impl DAGInfo {
    pub fn new(dag: &Graph<FuncData, ()>) -> Self {
        Self {
            num_funcs: dag.node_count(),
            num_edges: dag.edge_count(),
        }
    }
}

#[derive(Clone, Default, Serialize, Deserialize)]
pub struct ClusterInfo {
    nodes_per_kind: HashMap<ResourceKind, usize>,
}

impl ClusterInfo {
    pub fn new(cluster: &Cluster) -> Self {
        let nodes_per_kind = cluster
            .nodes_by_kind
            .iter()
            .map(|(&kind, pool)| (kind, pool.len()))
            .collect();
        Self { nodes_per_kind }
    }
}

/// (makespan, cost) of one enumerated assignment.
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct CandidateInfo {
    running_time: i32,
    running_cost: i32,
}

impl CandidateInfo {
    pub fn new(running_time: i32, running_cost: i32) -> Self {
        Self {
            running_time,
            running_cost,
        }
    }
}

#[derive(Clone, Default, Serialize, Deserialize)]
pub struct PlacementInfo {
    function_id: i32,
    node_id: i32,
}

impl PlacementInfo {
    pub fn new(function_id: i32, node_id: i32) -> Self {
        Self {
            function_id,
            node_id,
        }
    }
}

#[derive(Clone, Default, Serialize, Deserialize)]
pub struct AdmissionReport {
    dag_info: DAGInfo,
    cluster_info: ClusterInfo,
    num_instances: usize,
    pareto_front: Vec<CandidateInfo>,
    placements: Vec<PlacementInfo>,
    admitted: bool,
}

impl AdmissionReport {
    pub fn new(
        dag_info: DAGInfo,
        cluster_info: ClusterInfo,
        num_instances: usize,
        pareto_front: Vec<CandidateInfo>,
        placements: Vec<PlacementInfo>,
    ) -> Self {
        let admitted = !placements.is_empty();
        Self {
            dag_info,
            cluster_info,
            num_instances,
            pareto_front,
            placements,
            admitted,
        }
    }
}

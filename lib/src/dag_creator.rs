//! Generate a function dag (petgraph) from a yaml file.
use std::collections::HashMap;

use petgraph::graph::{Graph, NodeIndex};
use serde_derive::Deserialize;

use crate::error::AdmissionError;
use crate::graph_extension::{FuncData, GraphExtension};
use crate::resource::ResourceKind;
use crate::util::load_yaml;

#[derive(Debug, Clone, Deserialize)]
struct DagConfig {
    functions: Vec<FunctionConfig>,
    #[serde(default)]
    links: Vec<LinkConfig>,
}

#[derive(Debug, Clone, Deserialize)]
struct FunctionConfig {
    id: i32,
    runtimes: HashMap<ResourceKind, i32>,
    max_memories: HashMap<ResourceKind, i32>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
struct LinkConfig {
    source: usize,
    target: usize,
}

/// Load a function dag from a yaml file:
///
/// ```yaml
/// functions:
///   - id: 0
///     runtimes: { cpu: 3, gpu: 1 }
///     max_memories: { cpu: 10, gpu: 5 }
///   - id: 1
///     runtimes: { cpu: 5, gpu: 1 }
///     max_memories: { cpu: 20, gpu: 10 }
/// links:
///   - source: 0
///     target: 1
/// ```
///
/// Function ids must be dense from 0; they become the petgraph node indices.
pub fn create_dag_from_yaml(file_path: &str) -> Result<Graph<FuncData, ()>, AdmissionError> {
    let config: DagConfig = load_yaml(file_path)?;

    let mut functions = config.functions;
    functions.sort_by_key(|function| function.id);

    let mut dag = Graph::<FuncData, ()>::new();
    for (index, function) in functions.iter().enumerate() {
        if function.id != index as i32 {
            return Err(AdmissionError::MalformedDag(format!(
                "function ids must be dense from 0; expected id {}, found {}",
                index, function.id
            )));
        }
        dag.add_node_with_id_consistency(FuncData::new(
            function.id,
            &function.runtimes,
            &function.max_memories,
        ));
    }

    for link in &config.links {
        if link.source >= dag.node_count() || link.target >= dag.node_count() {
            return Err(AdmissionError::MalformedDag(format!(
                "link {} -> {} references an unknown function",
                link.source, link.target
            )));
        }
        dag.add_edge(NodeIndex::new(link.source), NodeIndex::new(link.target), ());
    }

    Ok(dag)
}

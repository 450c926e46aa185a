//! Expand a function dag into every per-kind resource assignment.
use std::collections::HashMap;

use lib::error::AdmissionError;
use lib::graph_extension::{FuncData, GraphExtension};
use lib::resource::{ResourceKind, ResourceTable};
use log::info;
use petgraph::graph::Graph;

/// One complete assignment of functions to resource kinds, together with the
/// makespan and cost it implies.
///
/// `Clone` is the branching operation of the enumerator: every field is
/// owned, so a clone shares no mutable state with its parent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DAGInstance {
    assignment: HashMap<i32, ResourceKind>,
    funcs_per_kind: HashMap<ResourceKind, Vec<(i32, i32)>>,
    max_prev_times: HashMap<i32, i32>,
    running_time: i32,
    running_cost: i32,
}

impl DAGInstance {
    fn new() -> DAGInstance {
        let mut funcs_per_kind = HashMap::new();
        for kind in ResourceKind::kinds() {
            funcs_per_kind.insert(kind, Vec::new());
        }
        DAGInstance {
            assignment: HashMap::new(),
            funcs_per_kind,
            max_prev_times: HashMap::new(),
            running_time: 0,
            running_cost: 0,
        }
    }

    /// The chosen resource kind per function id.
    pub fn assignment(&self) -> &HashMap<i32, ResourceKind> {
        &self.assignment
    }

    /// `(function_id, memory_demand)` work list of one kind, sorted by
    /// decreasing memory demand once enumeration has finished.
    pub fn funcs_per_kind(&self, kind: ResourceKind) -> &[(i32, i32)] {
        &self.funcs_per_kind[&kind]
    }

    pub fn running_time(&self) -> i32 {
        self.running_time
    }

    pub fn running_cost(&self) -> i32 {
        self.running_cost
    }

    /// Assign `func` to `kind` and propagate its finish time to successors.
    ///
    /// The function's own arrival entry is consumed here; it was inserted
    /// when the last of its predecessors was assigned (the root has none).
    fn assign_func(
        &mut self,
        func: &FuncData,
        suc_ids: &[i32],
        kind: ResourceKind,
        table: &ResourceTable,
    ) {
        let arrival_time = self.max_prev_times.remove(&func.id).unwrap_or(0);
        let finish_time = arrival_time + func.runtimes[&kind];

        for &suc_id in suc_ids {
            let max_prev = self.max_prev_times.entry(suc_id).or_insert(0);
            *max_prev = (*max_prev).max(finish_time);
        }

        self.running_time = self.running_time.max(finish_time);
        self.running_cost += table.unit_cost(kind);
        self.assignment.insert(func.id, kind);
        self.funcs_per_kind
            .entry(kind)
            .or_default()
            .push((func.id, func.max_memories[&kind]));
    }
}

/// Construct every resource assignment of `dag`: one [`DAGInstance`] per
/// element of kinds^num_funcs, in lexicographic order of the choices made
/// along the dependency order.
pub fn gen_dag_instances(
    dag: &Graph<FuncData, ()>,
    table: &ResourceTable,
) -> Result<Vec<DAGInstance>, AdmissionError> {
    validate_against_table(dag, table)?;
    let dependency_order = dag.get_dependency_order()?;

    let mut instance_list = vec![DAGInstance::new()];
    for node_i in dependency_order {
        let func = &dag[node_i];
        let suc_ids: Vec<i32> = dag
            .get_suc_nodes(node_i)
            .unwrap_or_default()
            .iter()
            .map(|&suc_i| dag[suc_i].id)
            .collect();

        let mut new_instance_list =
            Vec::with_capacity(instance_list.len() * ResourceKind::kinds().len());
        for instance in &instance_list {
            for kind in ResourceKind::kinds() {
                let mut new_instance = instance.clone();
                new_instance.assign_func(func, &suc_ids, kind, table);
                new_instance_list.push(new_instance);
            }
        }
        instance_list = new_instance_list;
    }

    // First-fit-decreasing order for the placer.
    for instance in &mut instance_list {
        for work in instance.funcs_per_kind.values_mut() {
            work.sort_by(|(_, memory_a), (_, memory_b)| memory_b.cmp(memory_a));
        }
    }

    info!("enumerated {} instances", instance_list.len());
    Ok(instance_list)
}

fn validate_against_table(
    dag: &Graph<FuncData, ()>,
    table: &ResourceTable,
) -> Result<(), AdmissionError> {
    for node_i in dag.node_indices() {
        let func = &dag[node_i];
        for kind in ResourceKind::kinds() {
            let runtime = func.get_runtime(kind).ok_or_else(|| {
                AdmissionError::Configuration(format!(
                    "function {} declares no runtime for {:?}",
                    func.id, kind
                ))
            })?;
            if runtime <= 0 {
                return Err(AdmissionError::Configuration(format!(
                    "function {} must have a positive runtime for {:?}, got {}",
                    func.id, kind, runtime
                )));
            }
            let max_memory = func.get_max_memory(kind).ok_or_else(|| {
                AdmissionError::Configuration(format!(
                    "function {} declares no memory demand for {:?}",
                    func.id, kind
                ))
            })?;
            if max_memory < 0 || max_memory > table.node_memory(kind) {
                return Err(AdmissionError::Configuration(format!(
                    "function {} demands {} memory on {:?}, but nodes of that kind expose {}",
                    func.id,
                    max_memory,
                    kind,
                    table.node_memory(kind)
                )));
            }
        }
    }
    Ok(())
}

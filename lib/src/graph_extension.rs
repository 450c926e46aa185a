//! Function DAG support on petgraph graphs.
use std::collections::{HashMap, VecDeque};

use petgraph::graph::{Graph, NodeIndex};
use petgraph::Direction::{Incoming, Outgoing};
use serde_derive::{Deserialize, Serialize};

use crate::error::AdmissionError;
use crate::resource::ResourceKind;

/// custom node data structure for function dag nodes (petgraph)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FuncData {
    pub id: i32,
    pub runtimes: HashMap<ResourceKind, i32>,
    pub max_memories: HashMap<ResourceKind, i32>,
}

impl FuncData {
    pub fn new(
        id: i32,
        runtimes: &HashMap<ResourceKind, i32>,
        max_memories: &HashMap<ResourceKind, i32>,
    ) -> FuncData {
        FuncData {
            id,
            runtimes: runtimes.clone(),
            max_memories: max_memories.clone(),
        }
    }

    pub fn get_runtime(&self, kind: ResourceKind) -> Option<i32> {
        self.runtimes.get(&kind).copied()
    }

    pub fn get_max_memory(&self, kind: ResourceKind) -> Option<i32> {
        self.max_memories.get(&kind).copied()
    }
}

pub trait GraphExtension {
    fn add_node_with_id_consistency(&mut self, func: FuncData) -> NodeIndex;
    fn get_source_nodes(&self) -> Vec<NodeIndex>;
    fn get_sink_nodes(&self) -> Vec<NodeIndex>;
    fn get_pre_nodes(&self, node_i: NodeIndex) -> Option<Vec<NodeIndex>>;
    fn get_suc_nodes(&self, node_i: NodeIndex) -> Option<Vec<NodeIndex>>;
    fn get_dependency_order(&self) -> Result<Vec<NodeIndex>, AdmissionError>;
}

impl GraphExtension for Graph<FuncData, ()> {
    fn add_node_with_id_consistency(&mut self, func: FuncData) -> NodeIndex {
        let node_index = self.add_node(func);

        assert_eq!(
            node_index.index() as i32,
            self[node_index].id,
            "The add node id is different from NodeIndex."
        );

        node_index
    }

    fn get_source_nodes(&self) -> Vec<NodeIndex> {
        self.node_indices()
            .filter(|&i| self.edges_directed(i, Incoming).next().is_none())
            .collect::<Vec<_>>()
    }

    fn get_sink_nodes(&self) -> Vec<NodeIndex> {
        self.node_indices()
            .filter(|&i| self.edges_directed(i, Outgoing).next().is_none())
            .collect::<Vec<_>>()
    }

    fn get_pre_nodes(&self, node_i: NodeIndex) -> Option<Vec<NodeIndex>> {
        //Since node indices are sequentially numbered, this is used to determine whether a node exists or not.
        if node_i.index() < self.node_count() {
            let mut pre_nodes = self
                .neighbors_directed(node_i, Incoming)
                .collect::<Vec<_>>();
            pre_nodes.sort();

            if pre_nodes.is_empty() {
                None
            } else {
                Some(pre_nodes)
            }
        } else {
            panic!("Node {:?} does not exist!", node_i);
        }
    }

    fn get_suc_nodes(&self, node_i: NodeIndex) -> Option<Vec<NodeIndex>> {
        //Since node indices are sequentially numbered, this is used to determine whether a node exists or not.
        if node_i.index() < self.node_count() {
            let mut suc_nodes = self
                .neighbors_directed(node_i, Outgoing)
                .collect::<Vec<_>>();
            suc_nodes.sort();

            if suc_nodes.is_empty() {
                None
            } else {
                Some(suc_nodes)
            }
        } else {
            panic!("Node {:?} does not exist!", node_i);
        }
    }

    /// Kahn-style topological order seeded with the unique root.
    ///
    /// Successors become ready once all their predecessors were emitted and
    /// are enqueued in ascending id order, so ties between simultaneously
    /// ready functions resolve the same way on every run.
    fn get_dependency_order(&self) -> Result<Vec<NodeIndex>, AdmissionError> {
        let source_nodes = self.get_source_nodes();
        if source_nodes.len() != 1 {
            return Err(AdmissionError::MalformedDag(format!(
                "expected exactly one root function, found {}",
                source_nodes.len()
            )));
        }

        let mut dependency_order = Vec::with_capacity(self.node_count());
        let mut satisfied_counts: HashMap<NodeIndex, usize> = HashMap::new();
        let mut ready_queue = VecDeque::new();
        ready_queue.push_back(source_nodes[0]);

        while let Some(node_i) = ready_queue.pop_front() {
            dependency_order.push(node_i);
            for suc_i in self.get_suc_nodes(node_i).unwrap_or_default() {
                let satisfied = satisfied_counts.entry(suc_i).or_insert(0);
                *satisfied += 1;
                if *satisfied == self.get_pre_nodes(suc_i).unwrap_or_default().len() {
                    ready_queue.push_back(suc_i);
                }
            }
        }

        if dependency_order.len() != self.node_count() {
            return Err(AdmissionError::MalformedDag(format!(
                "only {} of {} functions could be ordered; the graph has a cycle or an unreachable function",
                dependency_order.len(),
                self.node_count()
            )));
        }
        Ok(dependency_order)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::create_func;

    fn add_func(dag: &mut Graph<FuncData, ()>, id: i32) -> NodeIndex {
        dag.add_node_with_id_consistency(create_func(id, 1, 1, 10, 10))
    }

    #[test]
    fn test_get_source_nodes_normal() {
        let mut dag = Graph::<FuncData, ()>::new();
        let n0 = add_func(&mut dag, 0);
        let n1 = add_func(&mut dag, 1);
        let n2 = add_func(&mut dag, 2);
        assert_eq!(dag.get_source_nodes(), vec![n0, n1, n2]);
        dag.add_edge(n0, n1, ());
        dag.add_edge(n0, n2, ());
        assert_eq!(dag.get_source_nodes(), vec![n0]);
    }

    #[test]
    fn test_get_sink_nodes_normal() {
        let mut dag = Graph::<FuncData, ()>::new();
        let n0 = add_func(&mut dag, 0);
        let n1 = add_func(&mut dag, 1);
        let n2 = add_func(&mut dag, 2);
        dag.add_edge(n0, n1, ());
        dag.add_edge(n0, n2, ());
        assert_eq!(dag.get_sink_nodes(), vec![n1, n2]);
    }

    #[test]
    fn test_get_pre_nodes_normal() {
        let mut dag = Graph::<FuncData, ()>::new();
        let n0 = add_func(&mut dag, 0);
        let n1 = add_func(&mut dag, 1);
        let n2 = add_func(&mut dag, 2);
        dag.add_edge(n1, n2, ());
        dag.add_edge(n0, n2, ());
        assert_eq!(dag.get_pre_nodes(n2), Some(vec![n0, n1]));
    }

    #[test]
    fn test_get_pre_nodes_no_exist_pre_nodes() {
        let mut dag = Graph::<FuncData, ()>::new();
        let n0 = add_func(&mut dag, 0);
        assert_eq!(dag.get_pre_nodes(n0), None);
    }

    #[test]
    #[should_panic]
    fn test_get_pre_nodes_no_exist_target_node() {
        let dag = Graph::<FuncData, ()>::new();
        let invalid_node = NodeIndex::new(999);
        dag.get_pre_nodes(invalid_node);
    }

    #[test]
    fn test_get_suc_nodes_normal() {
        let mut dag = Graph::<FuncData, ()>::new();
        let n0 = add_func(&mut dag, 0);
        let n1 = add_func(&mut dag, 1);
        let n2 = add_func(&mut dag, 2);
        dag.add_edge(n0, n1, ());
        dag.add_edge(n0, n2, ());
        assert_eq!(dag.get_suc_nodes(n0), Some(vec![n1, n2]));
    }

    #[test]
    fn test_get_suc_nodes_no_exist_suc_nodes() {
        let mut dag = Graph::<FuncData, ()>::new();
        let n0 = add_func(&mut dag, 0);
        assert_eq!(dag.get_suc_nodes(n0), None);
    }

    #[test]
    #[should_panic]
    fn test_get_suc_nodes_no_exist_target_node() {
        let dag = Graph::<FuncData, ()>::new();
        let invalid_node = NodeIndex::new(999);
        dag.get_suc_nodes(invalid_node);
    }

    #[test]
    #[should_panic]
    fn test_add_node_with_id_consistency_id_duplication() {
        let mut dag = Graph::<FuncData, ()>::new();
        add_func(&mut dag, 0);
        add_func(&mut dag, 0);
    }

    #[test]
    fn test_get_dependency_order_linear() {
        let mut dag = Graph::<FuncData, ()>::new();
        let n0 = add_func(&mut dag, 0);
        let n1 = add_func(&mut dag, 1);
        let n2 = add_func(&mut dag, 2);
        dag.add_edge(n0, n1, ());
        dag.add_edge(n1, n2, ());
        assert_eq!(dag.get_dependency_order().unwrap(), vec![n0, n1, n2]);
    }

    #[test]
    fn test_get_dependency_order_diamond_ties_resolved_by_id() {
        let mut dag = Graph::<FuncData, ()>::new();
        let n0 = add_func(&mut dag, 0);
        let n1 = add_func(&mut dag, 1);
        let n2 = add_func(&mut dag, 2);
        let n3 = add_func(&mut dag, 3);
        // Edge insertion order deliberately differs from id order.
        dag.add_edge(n0, n2, ());
        dag.add_edge(n0, n1, ());
        dag.add_edge(n1, n3, ());
        dag.add_edge(n2, n3, ());
        assert_eq!(dag.get_dependency_order().unwrap(), vec![n0, n1, n2, n3]);
    }

    #[test]
    fn test_get_dependency_order_predecessors_come_first() {
        let mut dag = Graph::<FuncData, ()>::new();
        let n0 = add_func(&mut dag, 0);
        let n1 = add_func(&mut dag, 1);
        let n2 = add_func(&mut dag, 2);
        let n3 = add_func(&mut dag, 3);
        dag.add_edge(n0, n3, ());
        dag.add_edge(n0, n1, ());
        dag.add_edge(n1, n2, ());
        dag.add_edge(n3, n2, ());

        let order = dag.get_dependency_order().unwrap();
        assert_eq!(order.len(), dag.node_count());
        for (position, &node_i) in order.iter().enumerate() {
            for pre_i in dag.get_pre_nodes(node_i).unwrap_or_default() {
                let pre_position = order.iter().position(|&o| o == pre_i).unwrap();
                assert!(pre_position < position);
            }
        }
    }

    #[test]
    fn test_get_dependency_order_multiple_roots() {
        let mut dag = Graph::<FuncData, ()>::new();
        let n0 = add_func(&mut dag, 0);
        let n1 = add_func(&mut dag, 1);
        let n2 = add_func(&mut dag, 2);
        dag.add_edge(n0, n2, ());
        dag.add_edge(n1, n2, ());
        assert!(matches!(
            dag.get_dependency_order(),
            Err(AdmissionError::MalformedDag(_))
        ));
    }

    #[test]
    fn test_get_dependency_order_cycle() {
        let mut dag = Graph::<FuncData, ()>::new();
        let n0 = add_func(&mut dag, 0);
        let n1 = add_func(&mut dag, 1);
        let n2 = add_func(&mut dag, 2);
        dag.add_edge(n0, n1, ());
        dag.add_edge(n1, n2, ());
        dag.add_edge(n2, n1, ());
        assert!(matches!(
            dag.get_dependency_order(),
            Err(AdmissionError::MalformedDag(_))
        ));
    }

    #[test]
    fn test_get_dependency_order_empty_graph() {
        let dag = Graph::<FuncData, ()>::new();
        assert!(matches!(
            dag.get_dependency_order(),
            Err(AdmissionError::MalformedDag(_))
        ));
    }
}

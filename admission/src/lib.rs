//! Admission-control planner for function dags on a heterogeneous cluster.
//!
//! Given one dag and a cluster inventory, the planner answers whether the
//! workload can be admitted under latency and cost bounds, and on which
//! nodes each function lands:
//!
//! 1. [`enumerator`] expands the dag into every per-kind resource
//!    assignment, with the makespan and cost each implies.
//! 2. [`pareto`] and [`selector`] reduce the assignments to the Pareto
//!    frontier and sample candidates within the caller's bounds.
//! 3. [`placer`] packs one sampled assignment onto concrete nodes,
//!    all-or-nothing.
pub mod enumerator;
pub mod pareto;
pub mod placer;
pub mod selector;

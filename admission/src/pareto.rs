//! Pareto reduction of enumerated instances over (makespan, cost).
use log::info;

use crate::enumerator::DAGInstance;

/// Keep every instance no other instance strictly dominates.
///
/// `y` dominates `x` when it is no worse on both axes and better on at
/// least one; instances with identical (time, cost) therefore never
/// dominate each other and are all retained. Input order is preserved.
pub fn select_pareto_instances(instance_list: &[DAGInstance]) -> Vec<DAGInstance> {
    let mut pareto_list = Vec::new();
    for (index, instance) in instance_list.iter().enumerate() {
        let is_dominated = instance_list.iter().enumerate().any(|(comp_index, comp)| {
            comp_index != index
                && comp.running_time() <= instance.running_time()
                && comp.running_cost() <= instance.running_cost()
                && (comp.running_time() < instance.running_time()
                    || comp.running_cost() < instance.running_cost())
        });
        if !is_dominated {
            pareto_list.push(instance.clone());
        }
    }
    info!(
        "pareto frontier keeps {} of {} instances",
        pareto_list.len(),
        instance_list.len()
    );
    pareto_list
}

//! SLO-constrained uniform sampling over a pareto frontier.
use std::collections::HashSet;

use lib::error::AdmissionError;
use log::warn;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::enumerator::DAGInstance;

/// Samples admissible instances from a fixed candidate list.
///
/// Holds the list once plus two index orderings, by cost and by time;
/// an SLO query cuts a prefix from each ordering and intersects them.
pub struct DAGSelector {
    instance_list: Vec<DAGInstance>,
    cost_order: Vec<usize>,
    time_order: Vec<usize>,
    sample_size: usize,
}

impl DAGSelector {
    pub fn new(
        instance_list: Vec<DAGInstance>,
        sample_size: usize,
    ) -> Result<DAGSelector, AdmissionError> {
        if sample_size == 0 {
            return Err(AdmissionError::Configuration(
                "sample size must be positive".to_string(),
            ));
        }
        let sample_size = if !instance_list.is_empty() && sample_size > instance_list.len() {
            warn!(
                "sample size {} exceeds the {} candidate instances and is clamped",
                sample_size,
                instance_list.len()
            );
            instance_list.len()
        } else {
            sample_size
        };

        let mut cost_order: Vec<usize> = (0..instance_list.len()).collect();
        cost_order.sort_by_key(|&index| instance_list[index].running_cost());
        let mut time_order: Vec<usize> = (0..instance_list.len()).collect();
        time_order.sort_by_key(|&index| instance_list[index].running_time());

        Ok(DAGSelector {
            instance_list,
            cost_order,
            time_order,
            sample_size,
        })
    }

    /// Uniformly sample instances satisfying both SLO bounds, without
    /// replacement. An unsatisfiable bound yields an empty list, not an
    /// error; callers routinely need to see "none admissible".
    pub fn get_sample_list(
        &self,
        cost_slo: i32,
        time_slo: i32,
        rng: &mut impl Rng,
    ) -> Vec<DAGInstance> {
        let cost_prefix = self
            .cost_order
            .partition_point(|&index| self.instance_list[index].running_cost() <= cost_slo);
        let time_prefix = self
            .time_order
            .partition_point(|&index| self.instance_list[index].running_time() <= time_slo);
        if cost_prefix == 0 || time_prefix == 0 {
            return Vec::new();
        }

        let time_valid: HashSet<usize> = self.time_order[..time_prefix].iter().copied().collect();
        let candidates: Vec<usize> = self.cost_order[..cost_prefix]
            .iter()
            .copied()
            .filter(|index| time_valid.contains(index))
            .collect();

        candidates
            .choose_multiple(rng, self.sample_size.min(candidates.len()))
            .map(|&index| self.instance_list[index].clone())
            .collect()
    }
}

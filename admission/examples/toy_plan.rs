//! Plan the toy linear workload end to end: enumerate every assignment,
//! reduce to the Pareto frontier, sample within the SLOs, place the first
//! sampled instance that fits, and dump an admission report.
//!
//! Run with `RUST_LOG=info cargo run --example toy_plan` for stage logs.
use admission::enumerator::gen_dag_instances;
use admission::pareto::select_pareto_instances;
use admission::placer::get_placements;
use admission::selector::DAGSelector;
use lib::cluster::create_cluster_from_yaml;
use lib::dag_creator::create_dag_from_yaml;
use lib::log::{
    dump_struct, AdmissionReport, CandidateInfo, ClusterInfo, DAGInfo, PlacementInfo,
};
use lib::resource::ResourceTable;
use rand::rngs::StdRng;
use rand::SeedableRng;

const COST_SLO: i32 = 7;
const TIME_SLO: i32 = 9;
const SAMPLE_SIZE: usize = 3;
const RNG_SEED: u64 = 42;

fn toy_path(file_name: &str) -> String {
    format!("{}/examples/toy/{}", env!("CARGO_MANIFEST_DIR"), file_name)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let table = ResourceTable::from_yaml(&toy_path("resource_classes.yaml"))?;
    let mut cluster = create_cluster_from_yaml(&toy_path("cluster.yaml"), &table)?;
    let dag = create_dag_from_yaml(&toy_path("linear_dag.yaml"))?;

    let dag_info = DAGInfo::new(&dag);
    let cluster_info = ClusterInfo::new(&cluster);

    let instance_list = gen_dag_instances(&dag, &table)?;
    let pareto_list = select_pareto_instances(&instance_list);
    let selector = DAGSelector::new(pareto_list.clone(), SAMPLE_SIZE)?;

    let mut rng = StdRng::seed_from_u64(RNG_SEED);
    let sample_list = selector.get_sample_list(COST_SLO, TIME_SLO, &mut rng);

    let mut placements = Vec::new();
    for sample_instance in &sample_list {
        if let Some(place_map) = get_placements(&mut cluster, sample_instance) {
            println!(
                "admitted with makespan {} and cost {}:",
                sample_instance.running_time(),
                sample_instance.running_cost()
            );
            let mut entries: Vec<_> = place_map.iter().collect();
            entries.sort();
            for (func_id, node_id) in entries {
                println!("  function {} -> node {}", func_id, node_id);
                placements.push(PlacementInfo::new(*func_id, *node_id));
            }
            break;
        }
    }
    if placements.is_empty() {
        println!(
            "not admissible under cost <= {} and time <= {}",
            COST_SLO, TIME_SLO
        );
    }

    let report = AdmissionReport::new(
        dag_info,
        cluster_info,
        instance_list.len(),
        pareto_list
            .iter()
            .map(|instance| CandidateInfo::new(instance.running_time(), instance.running_cost()))
            .collect(),
        placements,
    );
    let report_path = std::env::temp_dir().join("toy_plan_report.yaml");
    let report_path = report_path.to_str().ok_or("temp path is not utf-8")?;
    dump_struct(report_path, &report)?;
    println!("report appended to {}", report_path);

    Ok(())
}

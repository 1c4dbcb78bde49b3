use log::LevelFilter;

use ql::q_table::Parameter;
use pong_game::simulation::Simulation;

#[ctor::ctor]
fn init() {
    env_logger::builder()
        .format_timestamp_secs()
        .filter_level(LevelFilter::Info)
        .parse_default_env()
        .is_test(true)
        .init()
}

pub fn simulation(seed: u64) -> Simulation {
    Simulation::new(seed, Parameter::default())
}

use std::env;
use std::error::Error;

use bombers::config::Config;
use bombers::{FileTableStore, Simulation};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

const DEFAULT_EPISODES: u64 = 100;

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("bombers=info"));

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");
}

fn main() -> Result<(), Box<dyn Error>> {
    init_logging();

    let mut config = Config::from_env();
    let episodes = *config.max_episodes.get_or_insert(DEFAULT_EPISODES);
    let log_path = env::var("BOMBERS_EPISODE_LOG").unwrap_or_else(|_| "episodes.csv".to_owned());

    tracing::info!("training {} agents for {} episodes", config.num_agents, episodes);

    let store = FileTableStore::new(config.table_dir.clone());
    let mut sim = Simulation::new(config, store)?;
    let mut log = csv::Writer::from_path(&log_path)?;

    // no clock here: tick back to back
    while !sim.is_finished() {
        let report = sim.tick()?;
        if let Some(summary) = report.episode_end {
            log.serialize(&summary)?;
        }
    }
    log.flush()?;

    tracing::info!("training finished, episode log written to {}", log_path);
    Ok(())
}

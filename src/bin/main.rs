use macroquad::prelude::*;
use bombers::config::Config;
use bombers::render::draw_snapshot;
use bombers::{FileTableStore, Simulation};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("bombers=info"));

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");
}

fn window_conf() -> Conf {
    let config = Config::default();
    Conf {
        window_title: "Bombers - Multi-Agent Training".to_owned(),
        window_width: config.world_width as i32,
        window_height: config.world_height as i32,
        window_resizable: false,
        ..Default::default()
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    init_logging();

    let config = Config::from_env();
    let store = FileTableStore::new(config.table_dir.clone());

    let mut sim = match Simulation::new(config, store) {
        Ok(sim) => sim,
        Err(e) => {
            tracing::error!("failed to start simulation: {}", e);
            return;
        }
    };

    loop {
        match sim.step(get_frame_time()) {
            Ok(snapshot) => draw_snapshot(&snapshot),
            Err(e) => {
                tracing::error!("simulation stopped: {}", e);
                break;
            }
        }

        if sim.is_finished() {
            tracing::info!("reached {} episodes", sim.episode());
            break;
        }

        next_frame().await
    }
}

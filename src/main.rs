use clap::Parser;
use log::{error, info};

use city_sim::simulation::{self, CityConfig, CityManager, LogObserver};

#[derive(Parser)]
#[command(name = "city_sim")]
#[command(about = "Procedural city generation and traffic with optional UI")]
struct Cli {
    /// Run with the Bevy game engine UI
    #[arg(long)]
    ui: bool,

    /// Seed for the city layout (random when omitted)
    #[arg(long)]
    seed: Option<u32>,

    /// Building density multiplier (0.1 - 3.0)
    #[arg(long, default_value = "1.0")]
    density: f32,

    /// Number of simulation ticks to run in headless mode
    #[arg(long, default_value = "200")]
    ticks: u32,

    /// Time delta per tick in seconds (clamped to 0.05)
    #[arg(long, default_value = "0.016")]
    delta: f32,

    /// Print an ASCII map of the city before and after the run
    #[arg(long)]
    map: bool,

    /// Render the city at night
    #[arg(long)]
    night: bool,
}

fn main() {
    let cli = Cli::parse();
    let config = CityConfig::default().with_density(simulation::clamp_density(cli.density));

    if cli.ui {
        #[cfg(feature = "ui")]
        {
            run_with_ui(config, cli.seed, cli.night);
        }
        #[cfg(not(feature = "ui"))]
        {
            eprintln!("Error: UI feature is not enabled. Rebuild with --features ui");
            std::process::exit(1);
        }
    } else {
        // Bevy installs its own logger, so env_logger is only set up for headless runs
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
            .init();
        if let Err(err) = run_headless(config, cli.seed, cli.ticks, cli.delta, cli.map) {
            error!("{err:#}");
            std::process::exit(1);
        }
    }
}

/// Run the simulation in headless mode (no graphics)
fn run_headless(
    config: CityConfig,
    seed: Option<u32>,
    ticks: u32,
    delta: f32,
    map: bool,
) -> anyhow::Result<()> {
    info!("Running city simulation in headless mode...");
    info!("Ticks: {}, Delta: {}s", ticks, delta);

    let mut manager = CityManager::new(config)?;
    manager.add_observer(Box::new(LogObserver));
    manager.regenerate(seed)?;

    if let Some(city) = manager.city() {
        city.print_summary();
        if map {
            println!("{}", city.render_map(96));
        }
    }

    for _ in 0..ticks {
        manager.tick(delta);
    }

    info!("=== SIMULATION COMPLETE ===");
    if let Some(city) = manager.city() {
        city.print_summary();
        if map {
            println!("{}", city.render_map(96));
        }
    }

    manager.dispose();
    Ok(())
}

#[cfg(feature = "ui")]
fn run_with_ui(config: CityConfig, seed: Option<u32>, night: bool) {
    use bevy::log::LogPlugin;
    use bevy::prelude::*;

    println!("Starting City Sim UI...");
    println!();
    println!("Controls:");
    println!("  W/A/S/D     - Move camera");
    println!("  Z/X         - Zoom in/out");
    println!("  R           - New random city");
    println!("  [ / ]       - Lower/raise density and regenerate");
    println!("  ESC         - Exit");
    println!();

    App::new()
        .add_plugins(
            DefaultPlugins
                .set(LogPlugin {
                    filter: "warn,city_sim=debug".to_string(),
                    level: bevy::log::Level::DEBUG,
                    ..default()
                })
                .set(WindowPlugin {
                    primary_window: Some(Window {
                        title: "City Sim".into(),
                        resolution: (1280, 720).into(),
                        ..default()
                    }),
                    ..default()
                }),
        )
        .add_plugins(city_sim::ui::CitySimUIPlugin {
            config,
            seed,
            night,
        })
        .run();
}

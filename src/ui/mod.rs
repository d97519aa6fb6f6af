//! UI module that visualizes the city using Bevy
//!
//! This module is purely for visualization - all generation and traffic logic is
//! in the `simulation` module. The UI reads the current `City` from the
//! `CityManager` and renders it using Bevy's 3D graphics.

mod components;
mod input;
mod spawner;
mod sync;
mod world;

use bevy::prelude::*;
use log::error;

pub use components::CityResource;

use crate::simulation::{CityConfig, CityManager, LogObserver};
use components::{CameraSettings, NightMode, RenderedGeneration};
use input::{handle_camera_movement, handle_input};
use spawner::spawn_city_visuals;
use sync::{setup_hud, sync_vehicles, tick_simulation, update_hud};
use world::setup_world;

/// Plugin to register all UI systems
pub struct CitySimUIPlugin {
    pub config: CityConfig,
    pub seed: Option<u32>,
    pub night: bool,
}

impl CitySimUIPlugin {
    fn create_manager(&self) -> CityManager {
        let mut manager = CityManager::new(self.config.clone()).unwrap_or_else(|err| {
            error!("{err:#}; falling back to the default configuration");
            CityManager::new(CityConfig::default())
                .expect("default city configuration is valid")
        });
        manager.add_observer(Box::new(LogObserver));
        if let Err(err) = manager.regenerate(self.seed) {
            error!("Initial generation failed: {err:#}");
        }
        manager
    }
}

impl Plugin for CitySimUIPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(CityResource(self.create_manager()))
            .insert_resource(NightMode(self.night))
            .init_resource::<RenderedGeneration>()
            .init_resource::<CameraSettings>()
            .add_systems(Startup, (setup_world, setup_hud))
            .add_systems(
                Update,
                (
                    handle_input,
                    handle_camera_movement,
                    spawn_city_visuals,
                    tick_simulation,
                    sync_vehicles,
                    update_hud,
                )
                    .chain(),
            );
    }
}

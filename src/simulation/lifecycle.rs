//! Ownership of the current city
//!
//! `CityManager` is the single owner of the live `City`. Regeneration builds the
//! replacement completely before the old city is released, so a renderer never
//! observes a partially built or partially disposed city.

use anyhow::{Context, Result};
use log::{debug, info};
use rand::Rng;

use super::city::{City, CitySummary};
use super::config::{clamp_density, CityConfig, MAX_TICK_DELTA};

/// Receives lifecycle events, e.g. a HUD or a renderer holding GPU resources
pub trait CityObserver: Send + Sync {
    /// A new city became current
    fn city_generated(&mut self, summary: &CitySummary);

    /// The city generated from `seed` was released
    fn city_disposed(&mut self, _seed: u32) {}
}

/// Observer that reports generated cities through the log
#[derive(Debug, Default)]
pub struct LogObserver;

impl CityObserver for LogObserver {
    fn city_generated(&mut self, summary: &CitySummary) {
        info!("{}", summary.hud_line());
    }

    fn city_disposed(&mut self, seed: u32) {
        debug!("Released city with seed {}", seed);
    }
}

/// Clamp a frame delta to the largest step the simulation accepts
pub fn clamp_delta(delta_secs: f32) -> f32 {
    if delta_secs.is_finite() {
        delta_secs.clamp(0.0, MAX_TICK_DELTA)
    } else {
        0.0
    }
}

/// Owns the current city and regenerates it on request
pub struct CityManager {
    config: CityConfig,
    current: Option<City>,
    observers: Vec<Box<dyn CityObserver>>,
    /// Bumped every time the current city changes
    generation: u64,
}

impl CityManager {
    pub fn new(config: CityConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            current: None,
            observers: Vec::new(),
            generation: 0,
        })
    }

    pub fn add_observer(&mut self, observer: Box<dyn CityObserver>) {
        self.observers.push(observer);
    }

    pub fn config(&self) -> &CityConfig {
        &self.config
    }

    pub fn city(&self) -> Option<&City> {
        self.current.as_ref()
    }

    pub fn city_mut(&mut self) -> Option<&mut City> {
        self.current.as_mut()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn density(&self) -> f32 {
        self.config.density
    }

    /// Set the density used by the next regeneration, clamped to the UI range
    pub fn set_density(&mut self, density: f32) -> f32 {
        self.config.density = clamp_density(density);
        self.config.density
    }

    /// Replace the current city with one generated from `seed`, or a random seed
    pub fn regenerate(&mut self, seed: Option<u32>) -> Result<&CitySummary> {
        let seed = seed.unwrap_or_else(|| rand::rng().random::<u32>());
        let city = City::generate(self.config.clone(), seed)
            .with_context(|| format!("Failed to generate city for seed {seed}"))?;

        self.dispose();
        for observer in &mut self.observers {
            observer.city_generated(city.summary());
        }
        self.generation += 1;
        info!(
            "City {} ready: seed={} buildings={} cars={}",
            self.generation,
            seed,
            city.building_count(),
            city.vehicle_count()
        );
        Ok(self.current.insert(city).summary())
    }

    /// Release the current city; does nothing if there is none
    pub fn dispose(&mut self) {
        if let Some(city) = self.current.take() {
            for observer in &mut self.observers {
                observer.city_disposed(city.seed);
            }
        }
    }

    /// Advance traffic by one frame, clamping `delta_secs`
    pub fn tick(&mut self, delta_secs: f32) {
        if let Some(city) = &mut self.current {
            city.tick(clamp_delta(delta_secs));
        }
    }
}

//! Standalone city generation and traffic module
//!
//! This module contains all the core layout generation and traffic logic that
//! can run independently of the Bevy game engine. It can be exercised from the
//! console without booting up the renderer.

mod city;
mod config;
mod grid;
mod instances;
mod lanes;
mod lifecycle;
mod parcels;
mod rng;
mod traffic;
mod types;

// Re-export public types for external use
pub use city::{City, CitySummary};
pub use config::*;
pub use grid::{build_blocks, build_roads, grid_line, Block, RoadSegment};
pub use instances::InstanceBuffer;
pub use lanes::{build_lanes, spawn_vehicles, Lane, Vehicle};
pub use lifecycle::{clamp_delta, CityManager, CityObserver, LogObserver};
pub use parcels::{park_trees, populate, sample_height, Building, Parcel, PopulatedParcels, Tree};
pub use rng::SeqRng;
pub use traffic::{
    advance_progress, lane_position, step, VehicleInstances, WHEELS_PER_VEHICLE, WHEEL_OFFSETS,
};
pub use types::{
    heading, Axis, BlockId, InstanceTransform, LaneId, LotRect, Position, Rgb, VehicleId,
};

//! Lane derivation and vehicle spawning
//!
//! Every road grid line carries two opposing lanes. Vehicles are bound to a lane
//! for the lifetime of a city and never interact with each other.

use super::config::{
    CityConfig, VEHICLE_LIGHTNESS, VEHICLE_SATURATION, VEHICLE_SPEED_MAX, VEHICLE_SPEED_MIN,
};
use super::grid::{x_lines, z_lines};
use super::rng::SeqRng;
use super::types::{Axis, LaneId, Rgb, VehicleId};

/// A one-directional loop along a road
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lane {
    /// Axis of travel
    pub axis: Axis,
    /// Fixed coordinate on the perpendicular axis
    pub offset: f32,
    /// +1.0 or -1.0
    pub direction: f32,
    /// Distance covered by one full cycle of `t`
    pub length: f32,
}

/// A vehicle looping along its lane
#[derive(Debug, Clone, PartialEq)]
pub struct Vehicle {
    pub id: VehicleId,
    pub lane: LaneId,
    pub speed: f32,
    /// Travel progress in [0, 1)
    pub t: f32,
    pub color: Rgb,
    /// Copied from the lane at spawn
    pub length: f32,
}

fn lane_pair(axis: Axis, center: f32, lane_offset: f32, length: f32) -> [Lane; 2] {
    [
        Lane {
            axis,
            offset: center + lane_offset,
            direction: 1.0,
            length,
        },
        Lane {
            axis,
            offset: center - lane_offset,
            direction: -1.0,
            length,
        },
    ]
}

/// Two lanes for every road grid line, horizontal lines first
pub fn build_lanes(config: &CityConfig) -> Vec<Lane> {
    let x_cycle = config.extent_x() + config.block_size;
    let z_cycle = config.extent_z() + config.block_size;

    let horizontal =
        z_lines(config).flat_map(|z| lane_pair(Axis::X, z, config.lane_offset, x_cycle));
    let vertical =
        x_lines(config).flat_map(|x| lane_pair(Axis::Z, x, config.lane_offset, z_cycle));
    horizontal.chain(vertical).collect()
}

/// Spawn the vehicle population, drawing lane, hue, speed and start progress per vehicle
pub fn spawn_vehicles(config: &CityConfig, lanes: &[Lane], rng: &mut SeqRng) -> Vec<Vehicle> {
    if lanes.is_empty() {
        return Vec::new();
    }
    let last_lane = lanes.len() as i32 - 1;

    (0..config.vehicle_count())
        .map(|i| {
            let lane_index = rng.int_range(0, last_lane) as usize;
            let hue = rng.next();
            let speed = rng.range(VEHICLE_SPEED_MIN, VEHICLE_SPEED_MAX);
            let t = rng.next();
            Vehicle {
                id: VehicleId(i),
                lane: LaneId(lane_index),
                speed,
                t,
                color: Rgb::from_hsl(hue, VEHICLE_SATURATION, VEHICLE_LIGHTNESS),
                length: lanes[lane_index].length,
            }
        })
        .collect()
}

//! Generation parameters for a city
//!
//! Tuning constants live here, alongside `CityConfig`, which carries the values
//! that vary per generation and derives the quantities computed from them.

use anyhow::{ensure, Result};

/// Blocks along each axis
pub const DEFAULT_BLOCKS: u32 = 12;
/// Side length of one block, road centerline to road centerline
pub const DEFAULT_BLOCK_SIZE: f32 = 60.0;
pub const DEFAULT_ROAD_WIDTH: f32 = 12.0;
/// Gap between the road edge and the usable lot
pub const DEFAULT_LOT_PADDING: f32 = 4.0;
/// Distance from a road centerline to each of its lanes
pub const DEFAULT_LANE_OFFSET: f32 = 3.0;
pub const DEFAULT_PARK_CHANCE: f32 = 0.14;

/// Density bounds and step exposed to the UI
pub const MIN_DENSITY: f32 = 0.1;
pub const MAX_DENSITY: f32 = 3.0;
pub const DENSITY_STEP: f32 = 0.1;

/// Lots drawn per building block, before density scaling
pub const LOTS_PER_BLOCK_MIN: i32 = 4;
pub const LOTS_PER_BLOCK_MAX: i32 = 9;
/// Lots per block assumed when sizing the building buffer
pub const LOTS_PER_BLOCK_ESTIMATE: f32 = 6.0;
/// Fewest lots a building block or estimate may have
pub const MIN_LOTS_PER_BLOCK: i32 = 2;

pub const FOOTPRINT_MIN: f32 = 8.0;
pub const FOOTPRINT_MAX: f32 = 16.0;
pub const HEIGHT_SHAPE_MIN: f32 = 0.2;
pub const HEIGHT_SHAPE_MAX: f32 = 1.0;
/// Exponent applied to the shape draw; above 1 skews toward low buildings
pub const HEIGHT_EXPONENT: f32 = 1.8;
pub const HEIGHT_SCALE_MIN: f32 = 20.0;
pub const HEIGHT_SCALE_MAX: f32 = 150.0;
pub const YAW_JITTER: f32 = 0.07;

pub const TREES_PER_PARK_MIN: i32 = 6;
pub const TREES_PER_PARK_MAX: i32 = 14;
pub const TRUNK_HEIGHT: f32 = 2.0;
pub const CANOPY_HEIGHT: f32 = 5.0;
/// Park ground plane relative to the lot
pub const PARK_GROUND_SCALE: f32 = 0.92;

pub const DEFAULT_MAX_VEHICLES: usize = 600;
/// Vehicles spawned per block along each axis
pub const VEHICLES_PER_AXIS_BLOCK: usize = 18;
pub const VEHICLE_SPEED_MIN: f32 = 12.0;
pub const VEHICLE_SPEED_MAX: f32 = 26.0;
pub const VEHICLE_SATURATION: f32 = 0.65;
pub const VEHICLE_LIGHTNESS: f32 = 0.5;

/// Largest time step a single tick will simulate
pub const MAX_TICK_DELTA: f32 = 0.05;

/// Parameters for one city generation pass
#[derive(Debug, Clone, PartialEq)]
pub struct CityConfig {
    pub blocks_x: u32,
    pub blocks_z: u32,
    pub block_size: f32,
    pub road_width: f32,
    pub lot_padding: f32,
    /// Multiplies the number of lots drawn per building block
    pub density: f32,
    pub lane_offset: f32,
    pub park_chance: f32,
    pub max_vehicles: usize,
    /// Replaces the estimated building capacity when set
    pub building_capacity_override: Option<usize>,
}

impl Default for CityConfig {
    fn default() -> Self {
        Self {
            blocks_x: DEFAULT_BLOCKS,
            blocks_z: DEFAULT_BLOCKS,
            block_size: DEFAULT_BLOCK_SIZE,
            road_width: DEFAULT_ROAD_WIDTH,
            lot_padding: DEFAULT_LOT_PADDING,
            density: 1.0,
            lane_offset: DEFAULT_LANE_OFFSET,
            park_chance: DEFAULT_PARK_CHANCE,
            max_vehicles: DEFAULT_MAX_VEHICLES,
            building_capacity_override: None,
        }
    }
}

impl CityConfig {
    pub fn with_density(mut self, density: f32) -> Self {
        self.density = density;
        self
    }

    /// Reject configurations that cannot produce a valid layout
    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.blocks_x > 0 && self.blocks_z > 0,
            "city needs at least one block per axis (got {}x{})",
            self.blocks_x,
            self.blocks_z
        );
        ensure!(
            self.block_size > 0.0 && self.block_size.is_finite(),
            "block size must be positive, got {}",
            self.block_size
        );
        ensure!(
            self.road_width > 0.0 && self.lot_padding >= 0.0,
            "road width must be positive and lot padding non-negative"
        );
        ensure!(
            self.lot_inset() * 2.0 < self.block_size,
            "road width {} plus padding {} leaves no lot inside a {} block",
            self.road_width,
            self.lot_padding,
            self.block_size
        );
        ensure!(
            (MIN_DENSITY..=MAX_DENSITY).contains(&self.density),
            "density must be in [{}, {}], got {}",
            MIN_DENSITY,
            MAX_DENSITY,
            self.density
        );
        ensure!(
            self.lane_offset > 0.0 && self.lane_offset < self.road_width / 2.0,
            "lane offset {} must lie inside half the road width {}",
            self.lane_offset,
            self.road_width / 2.0
        );
        ensure!(
            (0.0..=1.0).contains(&self.park_chance),
            "park chance must be in [0, 1], got {}",
            self.park_chance
        );
        Ok(())
    }

    pub fn extent_x(&self) -> f32 {
        self.blocks_x as f32 * self.block_size
    }

    pub fn extent_z(&self) -> f32 {
        self.blocks_z as f32 * self.block_size
    }

    pub fn block_count(&self) -> usize {
        self.blocks_x as usize * self.blocks_z as usize
    }

    /// Distance from a block edge to its lot edge
    pub fn lot_inset(&self) -> f32 {
        self.road_width / 2.0 + self.lot_padding
    }

    /// Scale a raw lot count by density, never going below the minimum
    pub fn scale_lots(&self, lots: f32) -> usize {
        ((lots * self.density).round() as i32).max(MIN_LOTS_PER_BLOCK) as usize
    }

    pub fn per_block_estimate(&self) -> usize {
        self.scale_lots(LOTS_PER_BLOCK_ESTIMATE)
    }

    /// Fixed size of the building instance buffer
    pub fn building_capacity(&self) -> usize {
        self.building_capacity_override
            .unwrap_or_else(|| self.block_count() * self.per_block_estimate())
    }

    pub fn vehicle_count(&self) -> usize {
        let axis_blocks = self.blocks_x as usize + self.blocks_z as usize;
        let per_axis = axis_blocks * VEHICLES_PER_AXIS_BLOCK;
        self.max_vehicles.min(per_axis)
    }
}

/// Clamp a requested density to the supported range, snapped to the UI step
pub fn clamp_density(density: f32) -> f32 {
    if !density.is_finite() {
        return 1.0;
    }
    let snapped = (density / DENSITY_STEP).round() * DENSITY_STEP;
    snapped.clamp(MIN_DENSITY, MAX_DENSITY)
}

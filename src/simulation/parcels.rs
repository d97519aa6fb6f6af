//! Parcel population for city blocks
//!
//! Every block becomes either a park or a set of building lots. Buildings are
//! written into one shared instance buffer whose capacity is fixed up front;
//! once it fills, the remaining lots of the whole city are skipped.

use log::debug;

use super::config::{
    CityConfig, CANOPY_HEIGHT, FOOTPRINT_MAX, FOOTPRINT_MIN, HEIGHT_EXPONENT, HEIGHT_SCALE_MAX,
    HEIGHT_SCALE_MIN, HEIGHT_SHAPE_MAX, HEIGHT_SHAPE_MIN, LOTS_PER_BLOCK_MAX, LOTS_PER_BLOCK_MIN,
    PARK_GROUND_SCALE, TREES_PER_PARK_MAX, TREES_PER_PARK_MIN, TRUNK_HEIGHT, YAW_JITTER,
};
use super::grid::Block;
use super::instances::InstanceBuffer;
use super::rng::SeqRng;
use super::types::{InstanceTransform, LotRect, Position};

/// A building placed inside a lot
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Building {
    pub x: f32,
    pub z: f32,
    pub width: f32,
    pub depth: f32,
    pub height: f32,
    pub yaw: f32,
}

impl Building {
    /// Transform for a unit cube resting on the ground
    pub fn transform(&self) -> InstanceTransform {
        InstanceTransform {
            translation: Position::new(self.x, self.height / 2.0, self.z),
            yaw: self.yaw,
            scale: Position::new(self.width, self.height, self.depth),
        }
    }
}

/// A tree in a park
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tree {
    pub trunk: Position,
    pub canopy: Position,
}

/// What a block was turned into
#[derive(Debug, Clone, PartialEq)]
pub enum Parcel {
    Park {
        /// Ground surface, slightly inset from the lot
        ground: LotRect,
        trees: Vec<Tree>,
    },
    BuildingLots {
        /// Indices into the city's building list
        buildings: Vec<usize>,
    },
}

impl Parcel {
    pub fn is_park(&self) -> bool {
        matches!(self, Parcel::Park { .. })
    }
}

/// Every tree across `parcels`, in block order
pub fn park_trees(parcels: &[Parcel]) -> impl Iterator<Item = &Tree> {
    parcels
        .iter()
        .filter_map(|parcel| match parcel {
            Parcel::Park { trees, .. } => Some(trees.iter()),
            Parcel::BuildingLots { .. } => None,
        })
        .flatten()
}

/// Output of populating every block
#[derive(Debug, Clone)]
pub struct PopulatedParcels {
    /// One parcel per block, in block order
    pub parcels: Vec<Parcel>,
    pub buildings: Vec<Building>,
    pub building_instances: InstanceBuffer,
    /// Lots skipped because the building buffer was full
    pub dropped_lots: usize,
}

impl PopulatedParcels {
    pub fn trees(&self) -> impl Iterator<Item = &Tree> {
        park_trees(&self.parcels)
    }

    pub fn park_count(&self) -> usize {
        self.parcels.iter().filter(|p| p.is_park()).count()
    }
}

/// Height draw: `pow(u, 1.8) * s` with `u` in [0.2, 1) and `s` in [20, 150)
pub fn sample_height(rng: &mut SeqRng) -> f32 {
    let shape = rng.range(HEIGHT_SHAPE_MIN, HEIGHT_SHAPE_MAX);
    let scale = rng.range(HEIGHT_SCALE_MIN, HEIGHT_SCALE_MAX);
    shape.powf(HEIGHT_EXPONENT) * scale
}

fn sample_building(rng: &mut SeqRng, lot: &LotRect) -> Building {
    let x = rng.range(lot.min_x, lot.max_x);
    let z = rng.range(lot.min_z, lot.max_z);
    let width = rng.range(FOOTPRINT_MIN, FOOTPRINT_MAX);
    let depth = rng.range(FOOTPRINT_MIN, FOOTPRINT_MAX);
    let height = sample_height(rng);
    let yaw = rng.range(-YAW_JITTER, YAW_JITTER);
    Building {
        x,
        z,
        width,
        depth,
        height,
        yaw,
    }
}

fn populate_park(rng: &mut SeqRng, lot: &LotRect) -> Parcel {
    let tree_count = rng.int_range(TREES_PER_PARK_MIN, TREES_PER_PARK_MAX);
    let trees = (0..tree_count)
        .map(|_| {
            let x = rng.range(lot.min_x, lot.max_x);
            let z = rng.range(lot.min_z, lot.max_z);
            Tree {
                trunk: Position::new(x, TRUNK_HEIGHT, z),
                canopy: Position::new(x, CANOPY_HEIGHT, z),
            }
        })
        .collect();
    Parcel::Park {
        ground: lot.scaled(PARK_GROUND_SCALE),
        trees,
    }
}

/// Decide each block's use and place its contents
pub fn populate(config: &CityConfig, blocks: &[Block], rng: &mut SeqRng) -> PopulatedParcels {
    let capacity = config.building_capacity();
    let mut building_instances = InstanceBuffer::with_capacity(capacity);
    let mut buildings = Vec::with_capacity(capacity);
    let mut parcels = Vec::with_capacity(blocks.len());
    let mut dropped_lots = 0;

    for block in blocks {
        if rng.next() < config.park_chance {
            parcels.push(populate_park(rng, &block.lot));
            continue;
        }

        let drawn = rng.int_range(LOTS_PER_BLOCK_MIN, LOTS_PER_BLOCK_MAX);
        let lots = config.scale_lots(drawn as f32);
        let mut indices = Vec::with_capacity(lots);
        for _ in 0..lots {
            if building_instances.is_full() {
                dropped_lots += 1;
                continue;
            }
            let building = sample_building(rng, &block.lot);
            building_instances.push(building.transform());
            indices.push(buildings.len());
            buildings.push(building);
        }
        parcels.push(Parcel::BuildingLots { buildings: indices });
    }

    if dropped_lots > 0 {
        debug!(
            "Building buffer full at {} instances, dropped {} lots",
            capacity, dropped_lots
        );
    }

    PopulatedParcels {
        parcels,
        buildings,
        building_instances,
        dropped_lots,
    }
}

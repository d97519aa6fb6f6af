//! The generated city aggregate
//!
//! `City` owns everything one generation pass produces: the grid, parcels,
//! lanes, vehicles and the instance buffers handed to the renderer. It is the
//! only place the traffic simulator writes into.

use anyhow::{Context, Result};
use log::{debug, info};
use ordered_float::OrderedFloat;

use super::config::CityConfig;
use super::grid::{build_blocks, build_roads, Block, RoadSegment};
use super::instances::InstanceBuffer;
use super::lanes::{build_lanes, spawn_vehicles, Lane, Vehicle};
use super::parcels::{park_trees, populate, Building, Parcel, PopulatedParcels, Tree};
use super::rng::SeqRng;
use super::traffic::{self, VehicleInstances};
use super::types::LotRect;

/// Metadata published whenever a city is generated
#[derive(Debug, Clone, PartialEq)]
pub struct CitySummary {
    pub seed: u32,
    pub density: f32,
    pub car_count: usize,
    pub block_count: usize,
    pub building_count: usize,
    pub building_capacity: usize,
    pub park_count: usize,
    pub tree_count: usize,
    pub dropped_lots: usize,
    pub median_height: f32,
    pub tallest_height: f32,
}

impl CitySummary {
    /// Short line for a HUD
    pub fn hud_line(&self) -> String {
        format!(
            "Cars: {} | Blocks: {} | Seed: {}",
            self.car_count, self.block_count, self.seed
        )
    }
}

/// One generated city
#[derive(Debug, Clone)]
pub struct City {
    pub config: CityConfig,
    pub seed: u32,
    pub roads: Vec<RoadSegment>,
    pub blocks: Vec<Block>,
    /// One parcel per block, same order as `blocks`
    pub parcels: Vec<Parcel>,
    pub buildings: Vec<Building>,
    pub building_instances: InstanceBuffer,
    pub lanes: Vec<Lane>,
    pub vehicles: Vec<Vehicle>,
    pub vehicle_instances: VehicleInstances,
    /// Simulated seconds since generation
    pub time: f32,
    summary: CitySummary,
}

impl City {
    /// Run the full generation pipeline for `seed`
    pub fn generate(config: CityConfig, seed: u32) -> Result<Self> {
        config
            .validate()
            .context("Invalid city configuration")?;

        let mut rng = SeqRng::new(seed);
        let roads = build_roads(&config);
        let blocks = build_blocks(&config);
        let populated = populate(&config, &blocks, &mut rng);
        let lanes = build_lanes(&config);
        let vehicles = spawn_vehicles(&config, &lanes, &mut rng);

        let summary = summarize(&config, seed, &populated, vehicles.len());
        debug!(
            "Generated city seed={} roads={} lanes={} final rng state={:#010x}",
            seed,
            roads.len(),
            lanes.len(),
            rng.state()
        );

        let mut city = Self {
            vehicle_instances: VehicleInstances::new(vehicles.len()),
            config,
            seed,
            roads,
            blocks,
            parcels: populated.parcels,
            buildings: populated.buildings,
            building_instances: populated.building_instances,
            lanes,
            vehicles,
            time: 0.0,
            summary,
        };
        city.refresh_vehicle_transforms();
        Ok(city)
    }

    /// Advance traffic by `delta_secs` (not clamped here)
    pub fn tick(&mut self, delta_secs: f32) {
        self.time += delta_secs;
        traffic::step(
            delta_secs,
            &self.lanes,
            &mut self.vehicles,
            &mut self.vehicle_instances,
        );
    }

    /// Rewrite vehicle transforms from current progress without moving anything
    pub fn refresh_vehicle_transforms(&mut self) {
        for (index, vehicle) in self.vehicles.iter().enumerate() {
            traffic::write_vehicle_transforms(
                index,
                vehicle,
                &self.lanes[vehicle.lane.0],
                &mut self.vehicle_instances,
            );
        }
    }

    pub fn summary(&self) -> &CitySummary {
        &self.summary
    }

    pub fn building_count(&self) -> usize {
        self.building_instances.count()
    }

    pub fn vehicle_count(&self) -> usize {
        self.vehicles.len()
    }

    pub fn trees(&self) -> impl Iterator<Item = &Tree> {
        park_trees(&self.parcels)
    }

    /// Park ground planes paired with the block they belong to
    pub fn park_grounds(&self) -> impl Iterator<Item = (&Block, &LotRect)> {
        self.blocks
            .iter()
            .zip(&self.parcels)
            .filter_map(|(block, parcel)| match parcel {
                Parcel::Park { ground, .. } => Some((block, ground)),
                Parcel::BuildingLots { .. } => None,
            })
    }

    /// Log a summary of the city state
    pub fn print_summary(&self) {
        let s = &self.summary;
        info!("=== City Summary ===");
        info!("Seed: {}", s.seed);
        info!("Density: {:.1}", s.density);
        info!("Time: {:.2}s", self.time);
        info!("Blocks: {} ({} parks)", s.block_count, s.park_count);
        info!("Roads: {}, Lanes: {}", self.roads.len(), self.lanes.len());
        info!(
            "Buildings: {}/{} (dropped lots: {})",
            s.building_count, s.building_capacity, s.dropped_lots
        );
        info!(
            "Skyline: median {:.1}, tallest {:.1}",
            s.median_height, s.tallest_height
        );
        info!("Trees: {}", s.tree_count);
        info!("Cars: {}", s.car_count);
    }

    /// Render a top-down ASCII map roughly `columns` characters wide
    pub fn render_map(&self, columns: usize) -> String {
        let half_x = (self.config.extent_x() + self.config.block_size) / 2.0;
        let half_z = (self.config.extent_z() + self.config.block_size) / 2.0;
        let width = columns.max(8);
        let scale = width as f32 / (half_x * 2.0);
        // Terminal cells are about twice as tall as they are wide
        let height = ((half_z * 2.0 * scale) / 2.0).ceil().max(4.0) as usize;

        let mut grid = vec![vec![' '; width]; height];
        let to_grid = |x: f32, z: f32| -> (usize, usize) {
            let col = ((x + half_x) / (half_x * 2.0) * width as f32) as usize;
            let row = ((z + half_z) / (half_z * 2.0) * height as f32) as usize;
            (row.min(height - 1), col.min(width - 1))
        };
        let fill = |rect: &LotRect, ch: char, grid: &mut Vec<Vec<char>>| {
            let (r0, c0) = to_grid(rect.min_x, rect.min_z);
            let (r1, c1) = to_grid(rect.max_x, rect.max_z);
            for row in grid.iter_mut().take(r1 + 1).skip(r0) {
                for cell in row.iter_mut().take(c1 + 1).skip(c0) {
                    *cell = ch;
                }
            }
        };

        for road in &self.roads {
            fill(&road.rect(), '#', &mut grid);
        }
        for (_, ground) in self.park_grounds() {
            fill(ground, '.', &mut grid);
        }
        for tree in self.trees() {
            let (row, col) = to_grid(tree.trunk.x, tree.trunk.z);
            grid[row][col] = 'T';
        }
        for building in &self.buildings {
            let (row, col) = to_grid(building.x, building.z);
            grid[row][col] = 'B';
        }
        for body in self.vehicle_instances.bodies.live() {
            let (row, col) = to_grid(body.translation.x, body.translation.z);
            grid[row][col] = 'C';
        }

        let mut out = String::new();
        out.push_str("=== City Map ===\n");
        out.push_str("Legend: #=Road, B=Building, .=Park, T=Tree, C=Car\n");
        for row in &grid {
            out.extend(row.iter());
            out.push('\n');
        }
        out
    }
}

fn summarize(
    config: &CityConfig,
    seed: u32,
    populated: &PopulatedParcels,
    car_count: usize,
) -> CitySummary {
    let mut heights: Vec<OrderedFloat<f32>> = populated
        .buildings
        .iter()
        .map(|b| OrderedFloat(b.height))
        .collect();
    heights.sort();
    let median_height = heights
        .get(heights.len() / 2)
        .map(|h| h.into_inner())
        .unwrap_or(0.0);
    let tallest_height = heights.last().map(|h| h.into_inner()).unwrap_or(0.0);

    CitySummary {
        seed,
        density: config.density,
        car_count,
        block_count: config.block_count(),
        building_count: populated.building_instances.count(),
        building_capacity: populated.building_instances.capacity(),
        park_count: populated.park_count(),
        tree_count: populated.trees().count(),
        dropped_lots: populated.dropped_lots,
        median_height,
        tallest_height,
    }
}

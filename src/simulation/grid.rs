//! Block grid and road network
//!
//! Roads sit on every grid line. Each block between them exposes a sidewalk
//! rectangle and a smaller lot rectangle that parcels are placed in.

use super::config::CityConfig;
use super::types::{Axis, BlockId, LotRect, Position};

/// A straight road along one grid line
#[derive(Debug, Clone, PartialEq)]
pub struct RoadSegment {
    /// Axis the road runs along
    pub axis: Axis,
    /// Coordinate on the perpendicular axis
    pub offset: f32,
    pub length: f32,
    pub width: f32,
}

impl RoadSegment {
    pub fn center(&self) -> Position {
        match self.axis {
            Axis::X => Position::new(0.0, 0.0, self.offset),
            Axis::Z => Position::new(self.offset, 0.0, 0.0),
        }
    }

    /// Ground rectangle covered by the road surface
    pub fn rect(&self) -> LotRect {
        let half_len = self.length / 2.0;
        let half_width = self.width / 2.0;
        match self.axis {
            Axis::X => LotRect {
                min_x: -half_len,
                max_x: half_len,
                min_z: self.offset - half_width,
                max_z: self.offset + half_width,
            },
            Axis::Z => LotRect {
                min_x: self.offset - half_width,
                max_x: self.offset + half_width,
                min_z: -half_len,
                max_z: half_len,
            },
        }
    }
}

/// One cell of the city grid
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub id: BlockId,
    /// Raw footprint between road centerlines
    pub footprint: LotRect,
    /// Footprint minus the road surface
    pub sidewalk: LotRect,
    /// Usable interior for buildings or a park
    pub lot: LotRect,
}

/// Coordinate of grid line `index` on an axis spanning `extent`
pub fn grid_line(index: u32, extent: f32, block_size: f32) -> f32 {
    -extent / 2.0 + index as f32 * block_size
}

/// Z coordinates of the horizontal grid lines
pub fn z_lines(config: &CityConfig) -> impl Iterator<Item = f32> + '_ {
    (0..=config.blocks_z).map(move |j| grid_line(j, config.extent_z(), config.block_size))
}

/// X coordinates of the vertical grid lines
pub fn x_lines(config: &CityConfig) -> impl Iterator<Item = f32> + '_ {
    (0..=config.blocks_x).map(move |i| grid_line(i, config.extent_x(), config.block_size))
}

/// Build one road per grid line, each widened by a block to close the outer corners
pub fn build_roads(config: &CityConfig) -> Vec<RoadSegment> {
    let horizontal = z_lines(config).map(|z| RoadSegment {
        axis: Axis::X,
        offset: z,
        length: config.extent_x() + config.block_size,
        width: config.road_width,
    });
    let vertical = x_lines(config).map(|x| RoadSegment {
        axis: Axis::Z,
        offset: x,
        length: config.extent_z() + config.block_size,
        width: config.road_width,
    });
    horizontal.chain(vertical).collect()
}

/// Build every block in generation order (rows of Z, then X within a row)
pub fn build_blocks(config: &CityConfig) -> Vec<Block> {
    let mut blocks = Vec::with_capacity(config.block_count());
    for bz in 0..config.blocks_z {
        for bx in 0..config.blocks_x {
            let min_x = grid_line(bx, config.extent_x(), config.block_size);
            let min_z = grid_line(bz, config.extent_z(), config.block_size);
            let footprint = LotRect {
                min_x,
                max_x: min_x + config.block_size,
                min_z,
                max_z: min_z + config.block_size,
            };
            blocks.push(Block {
                id: BlockId { bx, bz },
                footprint,
                sidewalk: footprint.shrink(config.road_width / 2.0),
                lot: footprint.shrink(config.lot_inset()),
            });
        }
    }
    blocks
}

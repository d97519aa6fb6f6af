//! Core types for the city simulation
//!
//! These are standalone types that don't depend on Bevy.

use std::f32::consts::{FRAC_PI_2, PI};

/// Index of a block in the city grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BlockId {
    pub bx: u32,
    pub bz: u32,
}

/// A wrapper type for lane indices
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LaneId(pub usize);

/// A wrapper type for vehicle indices
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VehicleId(pub usize);

/// Horizontal axis a road or lane runs along
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    /// Runs along X, sits at a fixed Z
    X,
    /// Runs along Z, sits at a fixed X
    Z,
}

/// A 3D position in the simulation
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Position {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Position {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Rotate a local-space offset about +Y by `yaw` and add it to this position
    pub fn offset_by_yaw(&self, local: &Position, yaw: f32) -> Position {
        let (sin, cos) = yaw.sin_cos();
        Position {
            x: self.x + local.x * cos + local.z * sin,
            y: self.y + local.y,
            z: self.z - local.x * sin + local.z * cos,
        }
    }

    /// Coordinate along the given horizontal axis
    pub fn along(&self, axis: Axis) -> f32 {
        match axis {
            Axis::X => self.x,
            Axis::Z => self.z,
        }
    }

    /// Coordinate across the given horizontal axis
    pub fn across(&self, axis: Axis) -> f32 {
        match axis {
            Axis::X => self.z,
            Axis::Z => self.x,
        }
    }
}

/// Fixed heading for a vehicle travelling along `axis` in direction `dir`
///
/// Uses the same convention as `atan2(dx, dz)`: facing +Z is 0.
pub fn heading(axis: Axis, dir: f32) -> f32 {
    match (axis, dir >= 0.0) {
        (Axis::X, true) => FRAC_PI_2,
        (Axis::X, false) => -FRAC_PI_2,
        (Axis::Z, true) => 0.0,
        (Axis::Z, false) => PI,
    }
}

/// Axis-aligned rectangle on the ground plane
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LotRect {
    pub min_x: f32,
    pub max_x: f32,
    pub min_z: f32,
    pub max_z: f32,
}

impl LotRect {
    pub fn width(&self) -> f32 {
        self.max_x - self.min_x
    }

    pub fn depth(&self) -> f32 {
        self.max_z - self.min_z
    }

    pub fn center(&self) -> Position {
        Position::new(
            (self.min_x + self.max_x) / 2.0,
            0.0,
            (self.min_z + self.max_z) / 2.0,
        )
    }

    pub fn contains(&self, x: f32, z: f32) -> bool {
        x >= self.min_x && x <= self.max_x && z >= self.min_z && z <= self.max_z
    }

    /// Shrink by `amount` on every side
    pub fn shrink(&self, amount: f32) -> LotRect {
        LotRect {
            min_x: self.min_x + amount,
            max_x: self.max_x - amount,
            min_z: self.min_z + amount,
            max_z: self.max_z - amount,
        }
    }

    /// Scale about the center
    pub fn scaled(&self, factor: f32) -> LotRect {
        let c = self.center();
        let hw = self.width() * factor / 2.0;
        let hd = self.depth() * factor / 2.0;
        LotRect {
            min_x: c.x - hw,
            max_x: c.x + hw,
            min_z: c.z - hd,
            max_z: c.z + hd,
        }
    }

    pub fn overlaps(&self, other: &LotRect) -> bool {
        self.min_x < other.max_x
            && other.min_x < self.max_x
            && self.min_z < other.max_z
            && other.min_z < self.max_z
    }
}

/// Position, rotation about +Y, and scale of one rendered instance
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InstanceTransform {
    pub translation: Position,
    pub yaw: f32,
    pub scale: Position,
}

impl Default for InstanceTransform {
    fn default() -> Self {
        Self {
            translation: Position::default(),
            yaw: 0.0,
            scale: Position::new(1.0, 1.0, 1.0),
        }
    }
}

/// Linear RGB color with components in [0, 1]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Rgb {
    /// Convert hue/saturation/lightness (all in [0, 1]) to RGB
    pub fn from_hsl(h: f32, s: f32, l: f32) -> Self {
        if s == 0.0 {
            return Self { r: l, g: l, b: l };
        }
        let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
        let p = 2.0 * l - q;
        let channel = |mut t: f32| {
            if t < 0.0 {
                t += 1.0;
            }
            if t > 1.0 {
                t -= 1.0;
            }
            if t < 1.0 / 6.0 {
                p + (q - p) * 6.0 * t
            } else if t < 0.5 {
                q
            } else if t < 2.0 / 3.0 {
                p + (q - p) * (2.0 / 3.0 - t) * 6.0
            } else {
                p
            }
        };
        Self {
            r: channel(h + 1.0 / 3.0),
            g: channel(h),
            b: channel(h - 1.0 / 3.0),
        }
    }
}

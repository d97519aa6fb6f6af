//! Per-tick vehicle movement
//!
//! Standalone implementation that doesn't depend on Bevy. Each tick advances
//! every vehicle's progress and rewrites its body, roof and wheel transforms
//! from scratch, so nothing but the modular wrap accumulates over time.

use super::instances::InstanceBuffer;
use super::lanes::{Lane, Vehicle};
use super::types::{heading, Axis, InstanceTransform, Position};

/// Wheels per vehicle
pub const WHEELS_PER_VEHICLE: usize = 4;

/// Wheel hub offsets in vehicle-local space (x right, z forward)
pub const WHEEL_OFFSETS: [Position; WHEELS_PER_VEHICLE] = [
    Position { x: 0.9, y: 0.35, z: 1.3 },
    Position { x: -0.9, y: 0.35, z: 1.3 },
    Position { x: 0.9, y: 0.35, z: -1.3 },
    Position { x: -0.9, y: 0.35, z: -1.3 },
];

/// Instance buffers for the vehicle meshes
#[derive(Debug, Clone, PartialEq)]
pub struct VehicleInstances {
    pub bodies: InstanceBuffer,
    pub roofs: InstanceBuffer,
    /// `WHEELS_PER_VEHICLE` consecutive entries per vehicle
    pub wheels: InstanceBuffer,
}

impl VehicleInstances {
    pub fn new(vehicle_count: usize) -> Self {
        let mut bodies = InstanceBuffer::with_capacity(vehicle_count);
        let mut roofs = InstanceBuffer::with_capacity(vehicle_count);
        let mut wheels = InstanceBuffer::with_capacity(vehicle_count * WHEELS_PER_VEHICLE);
        bodies.set_count(vehicle_count);
        roofs.set_count(vehicle_count);
        wheels.set_count(vehicle_count * WHEELS_PER_VEHICLE);
        Self {
            bodies,
            roofs,
            wheels,
        }
    }
}

/// Advance progress by `speed * dt / length`, wrapping into [0, 1)
pub fn advance_progress(t: f32, speed: f32, delta_secs: f32, length: f32) -> f32 {
    let next = (t + speed * delta_secs / length).rem_euclid(1.0);
    // rem_euclid can round up to exactly 1.0 for values just below a whole cycle
    if next >= 1.0 {
        0.0
    } else {
        next
    }
}

/// World position of a vehicle on its lane at progress `t`
pub fn lane_position(lane: &Lane, t: f32, length: f32) -> Position {
    let along = (t * length - length / 2.0) * lane.direction;
    match lane.axis {
        Axis::X => Position::new(along, 0.0, lane.offset),
        Axis::Z => Position::new(lane.offset, 0.0, along),
    }
}

/// Write the body, roof and wheel transforms for vehicle `index`
pub fn write_vehicle_transforms(
    index: usize,
    vehicle: &Vehicle,
    lane: &Lane,
    instances: &mut VehicleInstances,
) {
    let position = lane_position(lane, vehicle.t, vehicle.length);
    let yaw = heading(lane.axis, lane.direction);
    let body = InstanceTransform {
        translation: position,
        yaw,
        ..InstanceTransform::default()
    };
    instances.bodies.set(index, body);
    instances.roofs.set(index, body);

    for (wheel, local) in WHEEL_OFFSETS.iter().enumerate() {
        instances.wheels.set(
            index * WHEELS_PER_VEHICLE + wheel,
            InstanceTransform {
                translation: position.offset_by_yaw(local, yaw),
                yaw,
                ..InstanceTransform::default()
            },
        );
    }
}

/// Advance all vehicles by `delta_secs` and refresh their transforms
pub fn step(
    delta_secs: f32,
    lanes: &[Lane],
    vehicles: &mut [Vehicle],
    instances: &mut VehicleInstances,
) {
    for (index, vehicle) in vehicles.iter_mut().enumerate() {
        vehicle.t = advance_progress(vehicle.t, vehicle.speed, delta_secs, vehicle.length);
        write_vehicle_transforms(index, vehicle, &lanes[vehicle.lane.0], instances);
    }
}

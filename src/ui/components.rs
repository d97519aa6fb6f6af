//! UI components and resources for linking Bevy entities to city state

use bevy::prelude::*;

use crate::simulation::{CityManager, InstanceTransform};

/// Resource wrapper for the city lifecycle manager
#[derive(Resource)]
pub struct CityResource(pub CityManager);

/// Generation of the city whose visuals are currently spawned
#[derive(Resource, Default)]
pub struct RenderedGeneration(pub Option<u64>);

/// Whether materials are built for night lighting
#[derive(Resource, Clone, Copy, Default)]
pub struct NightMode(pub bool);

/// Marker component for the main camera
#[derive(Component)]
pub struct MainCamera;

/// Resource to control camera movement settings
#[derive(Resource)]
pub struct CameraSettings {
    pub movement_speed: f32,
    pub zoom_speed: f32,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            movement_speed: 250.0,
            zoom_speed: 300.0,
        }
    }
}

/// Marker for every entity belonging to the current city; despawned on regeneration
#[derive(Component)]
pub struct CityEntity;

/// Which vehicle mesh an entity renders
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VehiclePartKind {
    Body,
    Roof,
    /// Index into the vehicle's wheels
    Wheel(usize),
}

/// Links a Bevy entity to one part of a simulated vehicle
#[derive(Component)]
pub struct VehiclePart {
    pub vehicle: usize,
    pub kind: VehiclePartKind,
}

/// Marker for the HUD summary text
#[derive(Component)]
pub struct HudText;

/// Convert a simulation instance transform to a Bevy transform
pub fn to_transform(instance: &InstanceTransform) -> Transform {
    let t = instance.translation;
    let s = instance.scale;
    Transform::from_translation(Vec3::new(t.x, t.y, t.z))
        .with_rotation(Quat::from_rotation_y(instance.yaw))
        .with_scale(Vec3::new(s.x, s.y, s.z))
}
